//! Error mapping guide:
//! - Every fatal condition exits with code 1; there is no finer taxonomy.
//! - Tolerated step failures never become a `SetupError`; the runner only
//!   returns `Err` for steps that were not marked `ignore_errors`.
//! - `Display` renders the text printed after the `[-]` prefix.
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SetupError {
    /// Linux path without root.
    NotPrivileged,
    UnsupportedDistro(String),
    UnsupportedOs(String),
    CommandFailed { command: String, code: Option<i32> },
    LockHeld,
    Io(io::Error),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NotPrivileged => write!(f, "Please run this script with sudo on Linux."),
            SetupError::UnsupportedDistro(d) => write!(f, "Unsupported Linux distro: {d}"),
            SetupError::UnsupportedOs(_) => write!(f, "Unsupported OS"),
            SetupError::CommandFailed { command, .. } => write!(f, "Command failed: {command}"),
            SetupError::LockHeld => {
                write!(f, "Another docker-setup run is in progress (lock held).")
            }
            SetupError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SetupError {
    fn from(e: io::Error) -> Self {
        SetupError::Io(e)
    }
}

/// Process exit code for a fatal condition.
pub fn exit_code_for_setup_error(_e: &SetupError) -> u8 {
    1
}
