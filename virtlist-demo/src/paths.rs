//! Where the demo keeps its config and logs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const CONFIG_NAME: &str = "config.json";
const LATEST_LOG: &str = "latest.log";

/// Rotated logs kept next to `latest.log`.
const KEEP_LOGS: usize = 10;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "virtlist", "virtlist-demo")
}

/// `config.json` in the platform config directory, if one exists for this user.
pub fn config_file() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join(CONFIG_NAME))
}

/// Platform cache directory, falling back to the working directory.
pub fn log_dir() -> PathBuf {
    dirs().map_or_else(|| PathBuf::from("."), |d| d.cache_dir().to_path_buf())
}

/// Create `dir`, move an existing `latest.log` aside under a timestamped
/// name, and prune rotated logs beyond the newest `keep`. Returns the path
/// the new log should be written to.
pub fn rotate_logs(dir: &Path, keep: usize) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        fs::rename(&latest, dir.join(format!("{stamp}.log")))?;
    }

    // Timestamped names sort oldest first.
    let mut rotated = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_rotated = path.extension().is_some_and(|ext| ext == "log")
            && path.file_name().is_some_and(|name| name != LATEST_LOG);
        if is_rotated {
            rotated.push(path);
        }
    }
    rotated.sort();
    let excess = rotated.len().saturating_sub(keep);
    for path in &rotated[..excess] {
        fs::remove_file(path)?;
    }
    Ok(latest)
}

/// [`rotate_logs`] in [`log_dir`] with the default retention.
pub fn prepare_log_file() -> io::Result<PathBuf> {
    rotate_logs(&log_dir(), KEEP_LOGS)
}
