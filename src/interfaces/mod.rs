pub mod clock;
pub mod snapshot_storage;
