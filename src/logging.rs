use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::paths;

/// Fallback used when no platform cache directory is available.
const FALLBACK_LOG_FILE: &str = "employee-records.log";

/// Pick the log destination: an explicit path wins, then the platform cache
/// directory, then the working directory.
pub fn resolve_log_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(paths::log_file)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_LOG_FILE))
}

/// Route the `log` facade into a file. The terminal belongs to the TUI, so
/// nothing is ever logged to stdout or stderr. Returns the file in use.
pub fn init_logging(level: LevelFilter, explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = resolve_log_path(explicit);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("failed to initialize logger")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_log_path(Some(PathBuf::from("/tmp/custom.log")));
        assert_eq!(path, PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn default_path_names_the_log_file() {
        let path = resolve_log_path(None);
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("employee-records.log")
        );
    }
}
