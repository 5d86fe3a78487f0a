use std::path::Path;

pub fn ensure_parent_dir_exists(file_path: &Path) -> std::io::Result<()> {
    match file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
