//! Error types.

use std::io;
use std::num::ParseIntError;

pub type Result<T> = core::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IoError(String),

    #[error("failed parsing int: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("toml deserialization error: {0}")]
    TomlDeserError(#[from] toml::de::Error),

    #[error("invalid value for {0}: {1}")]
    InvalidConfigValue(String, String),
    #[error("missing required config field: {0}")]
    MissingConfigValue(String),

    #[error("failed preparing run directory {0}: {1}")]
    FailedPreparingRunDir(String, String),
    #[error("failed launching simulator process: {0}")]
    FailedLaunchingProcess(String),

    #[error("other error: {0}")]
    Other(String),
}
