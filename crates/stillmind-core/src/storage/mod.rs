mod config;
pub mod database;

pub use config::{BreathingConfig, Config, MeditationConfig, MoodConfig};
pub use database::{Database, SessionKind, SessionRecord, SessionStats};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/stillmind[-dev]/` based on STILLMIND_ENV.
///
/// Set STILLMIND_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STILLMIND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("stillmind-dev")
    } else {
        base_dir.join("stillmind")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
