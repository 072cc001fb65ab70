use crate::error::Result;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const SNIPPETS_FILENAME: &str = "snippets.json";
pub const PID_FILENAME: &str = "textbutler-daemon.pid";
pub const DAEMON_LOG_FILENAME: &str = "daemon.log";

/// Snippets written on first run so a fresh install expands something.
pub const DEFAULT_SNIPPETS_JSON: &str = r#"[
  { "shortcut": "brb", "text": "be right back" },
  { "shortcut": "omw", "text": "on my way" }
]
"#;

/// Get the textbutler configuration directory
pub fn get_config_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".textbutler"))
        .unwrap_or_else(|_| PathBuf::from(".textbutler"))
}

/// Ensure the configuration directory and a snippets file exist
pub fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    let snippets_path = get_snippets_file_path();
    if !snippets_path.exists() {
        fs::write(&snippets_path, DEFAULT_SNIPPETS_JSON)?;
    }

    Ok(config_dir)
}

/// Get the path to the snippets file
pub fn get_snippets_file_path() -> PathBuf {
    get_config_dir().join(SNIPPETS_FILENAME)
}

/// Get the path to the PID file
pub fn get_pid_file_path() -> PathBuf {
    get_config_dir().join(PID_FILENAME)
}

/// Get the path to the daemon log file
pub fn get_daemon_log_path() -> PathBuf {
    get_config_dir().join(DAEMON_LOG_FILENAME)
}

/// Check if daemon is running, by the PID recorded in the PID file
pub fn is_daemon_running() -> Result<Option<u32>> {
    let pid_file = get_pid_file_path();

    if pid_file.exists() {
        match fs::read_to_string(&pid_file) {
            Ok(contents) => match contents.trim().parse::<u32>() {
                Ok(pid) => Ok(Some(pid)),
                Err(_) => {
                    // Invalid PID, treat as not running and clean up
                    let _ = fs::remove_file(&pid_file);
                    Ok(None)
                }
            },
            Err(_) => {
                // Can't read file, treat as not running and clean up
                let _ = fs::remove_file(&pid_file);
                Ok(None)
            }
        }
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snippet;

    #[test]
    fn default_snippets_parse() {
        let snippets: Vec<Snippet> = serde_json::from_str(DEFAULT_SNIPPETS_JSON).unwrap();
        assert_eq!(snippets.len(), 2);
        assert!(snippets.iter().all(|s| !s.shortcut.is_empty()));
    }

    #[test]
    fn config_paths_share_the_config_dir() {
        let dir = get_config_dir();
        assert_eq!(get_snippets_file_path(), dir.join(SNIPPETS_FILENAME));
        assert_eq!(get_pid_file_path(), dir.join(PID_FILENAME));
    }
}
