mod config;
pub mod database;
pub mod habit_store;
pub mod migrations;

pub use config::{Config, DefaultsConfig, DisplayConfig, LogConfig};
pub use database::Database;
pub use habit_store::{HabitStore, APP_DATA_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the directory holding `habitchain.db` and `config.toml`.
///
/// `HABITCHAIN_DATA_DIR` wins when set. Otherwise `~/.config/habitchain`, or
/// `~/.config/habitchain-dev` with `HABITCHAIN_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HABITCHAIN_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITCHAIN_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("habitchain-dev")
            } else {
                base_dir.join("habitchain")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
