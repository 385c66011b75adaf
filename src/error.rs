use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing the BOOKING_SLOTS spec string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown day token '{0}' (expected Sun/Mon/Tue/Wed/Thu/Fri/Sat)")]
    UnknownDay(String),
    #[error("invalid time token '{0}' (expected e.g. 8am or 5:30pm)")]
    InvalidTime(String),
    #[error("booking group '{0}' has no time slots (expected Day_time1_time2_...)")]
    MissingTimes(String),
}

/// Authentication against the booking site failed.
#[derive(Debug, Error)]
#[error("authentication failed: {0}")]
pub struct AuthError(pub String);

/// The ledger file could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read ledger file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write ledger file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Transport or session problem on the booking site. Aborts the remaining
/// sport attempts for the current target only; the run continues.
#[derive(Debug, Error)]
#[error("session fault: {0}")]
pub struct SessionFault(pub String);

/// Missing or malformed environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {var} has invalid value '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

/// Fatal errors that abort a whole run before or during setup.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
