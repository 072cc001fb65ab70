use std::fmt;
use std::io;

#[derive(Debug)]
pub enum TextButlerError {
    Io(io::Error),
    Json(serde_json::Error),
    Enigo(String),
    Keyboard(String),
    Watch(String),
    SnippetsNotFound(String),
    DaemonAlreadyRunning(u32),
    DaemonNotRunning,
    InvalidPid,
    PermissionDenied(String),
    Other(String),
}

impl fmt::Display for TextButlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextButlerError::Io(err) => write!(f, "I/O error: {}", err),
            TextButlerError::Json(err) => write!(f, "JSON error: {}", err),
            TextButlerError::Enigo(err) => write!(f, "Keyboard controller error: {}", err),
            TextButlerError::Keyboard(err) => write!(f, "Keyboard error: {}", err),
            TextButlerError::Watch(err) => write!(f, "File watch error: {}", err),
            TextButlerError::SnippetsNotFound(path) => {
                write!(f, "Snippets file not found at: {}", path)
            }
            TextButlerError::DaemonAlreadyRunning(pid) => {
                write!(f, "Daemon already running with PID {}", pid)
            }
            TextButlerError::DaemonNotRunning => write!(f, "Daemon is not running"),
            TextButlerError::InvalidPid => write!(f, "Invalid PID in daemon file"),
            TextButlerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            TextButlerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TextButlerError {}

impl From<io::Error> for TextButlerError {
    fn from(err: io::Error) -> Self {
        TextButlerError::Io(err)
    }
}

impl From<serde_json::Error> for TextButlerError {
    fn from(err: serde_json::Error) -> Self {
        TextButlerError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, TextButlerError>;
