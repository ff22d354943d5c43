mod config;
pub mod store;

pub use config::{Config, LogConfig, NotificationsConfig, TimerConfig};
pub use store::{Store, StoredInputs};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/devhub[-dev]/`, creating it if needed.
///
/// `DEVHUB_DATA_DIR` overrides the location entirely; otherwise
/// `DEVHUB_ENV=dev` selects the development directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DEVHUB_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DEVHUB_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("devhub-dev")
            } else {
                base_dir.join("devhub")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
