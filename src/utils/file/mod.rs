pub mod json_snapshot_file;
