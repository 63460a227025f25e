use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

pub const LOG_ENV_VAR: &str = "LEGACY_NOTEPAD_LOG";
pub const LOG_FILE_NAME: &str = "legacy-notepad.log";

/// Parses a level name such as `debug`; anything else means INFO.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO)
}

pub fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

fn open_log_file(dir: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(dir))
}

pub fn init() {
    let level = level_from(std::env::var(LOG_ENV_VAR).ok().as_deref());
    let dir = Settings::config_dir();

    match open_log_file(&dir) {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(level)
                .try_init();
        }
        Err(e) => {
            let _ = tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(level)
                .try_init();
            tracing::warn!(dir = %dir.display(), error = %e, "cannot open log file, logging to stderr");
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env_value() {
        assert_eq!(level_from(Some("debug")), LevelFilter::DEBUG);
        assert_eq!(level_from(Some(" WARN ")), LevelFilter::WARN);
        assert_eq!(level_from(Some("off")), LevelFilter::OFF);
        assert_eq!(level_from(Some("chatty")), LevelFilter::INFO);
        assert_eq!(level_from(None), LevelFilter::INFO);
    }

    #[test]
    fn test_log_file_is_created_in_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("LegacyNotepad");
        open_log_file(&nested).unwrap();
        assert!(log_path(&nested).exists());
    }
}
