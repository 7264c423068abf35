//! Platform-specific locations. The record store itself is in memory, so the
//! only thing written to disk is the log file.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "employee-records";
const APPLICATION: &str = "employee-records";
/// File name of the session log inside the cache directory.
const LOG_FILE_NAME: &str = "employee-records.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Default log file path, or `None` when no home directory can be found.
///
/// - Linux: `$XDG_CACHE_HOME/employee-records` or `~/.cache/employee-records`
/// - macOS: `~/Library/Caches/org.employee-records.employee-records`
/// - Windows: `%LOCALAPPDATA%\employee-records\employee-records\cache`
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join(LOG_FILE_NAME))
}
