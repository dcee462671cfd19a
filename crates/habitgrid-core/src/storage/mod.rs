mod config;
pub mod kv;

pub use config::Config;
pub use kv::{keys, KvStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `HABITGRID_DATA_DIR` overrides the location outright (useful for tests
/// and sandboxed runs). Otherwise this is `~/.config/habitgrid[-dev]/`
/// based on HABITGRID_ENV; set HABITGRID_ENV=dev to use the development
/// data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    if let Ok(dir) = std::env::var("HABITGRID_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITGRID_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitgrid-dev")
    } else {
        base_dir.join("habitgrid")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
