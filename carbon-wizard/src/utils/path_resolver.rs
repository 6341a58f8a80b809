use anyhow::Result;
use std::path::{Path, PathBuf};

pub const LOG_FOLDER_NAME: &str = "wizard-logs";
pub const CONFIG_FILE_NAME: &str = "carbon-wizard.toml";

/// Resolve log folder (absolute path), creating it if needed.
///
/// Order: explicit override, an existing `wizard-logs/` in the working directory or one of its
/// parents, the per-user data directory, and finally `./wizard-logs`.
pub fn resolve_log_folder(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", dir, e))?;
        return Ok(dir.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(found) = find_upwards(&cwd, LOG_FOLDER_NAME, 12) {
            return Ok(found);
        }
    }

    let base = dirs::data_local_dir()
        .map(|d| d.join("carbon-wizard"))
        .unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });
    let log_dir = base.join(LOG_FOLDER_NAME);
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
    Ok(log_dir)
}

/// Locate the optional configuration file: working directory first, then the user config dir.
pub fn resolve_config_file() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let candidate = dirs::config_dir()?.join("carbon-wizard").join("config.toml");
    candidate.is_file().then_some(candidate)
}

fn find_upwards(start: &Path, name: &str, max_depth: usize) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    for _ in 0..max_depth {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("logs");
        let resolved = resolve_log_folder(Some(&target)).unwrap();
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn find_upwards_walks_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let logs = tmp.path().join(LOG_FOLDER_NAME);
        std::fs::create_dir_all(&logs).unwrap();
        let deep = tmp.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_upwards(&deep, LOG_FOLDER_NAME, 12), Some(logs));
        assert_eq!(find_upwards(&deep, LOG_FOLDER_NAME, 2), None);
    }
}
