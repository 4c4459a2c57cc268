use std::result::Result as StdResult;

use giftbook_config::ConfigError;
use giftbook_core::CoreError;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the domain, storage and config layers.
#[derive(Error, Debug)]
pub enum GiftbookError {
    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),
    #[error("Invalid data: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, GiftbookError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] GiftbookError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for GiftbookError {
    fn from(err: std::io::Error) -> Self {
        GiftbookError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for GiftbookError {
    fn from(err: serde_json::Error) -> Self {
        GiftbookError::StorageError(err.to_string())
    }
}

impl From<CoreError> for GiftbookError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RecordNotFound(id) => GiftbookError::RecordNotFound(id),
            CoreError::Validation(message) => GiftbookError::Validation(message),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                GiftbookError::StorageError(message)
            }
            CoreError::Io(err) => GiftbookError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for GiftbookError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => GiftbookError::StorageError(io.to_string()),
            ConfigError::Serde(message) => GiftbookError::ConfigError(message),
            ConfigError::InvalidValue { key, reason } => {
                GiftbookError::ConfigError(format!("`{key}`: {reason}"))
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(GiftbookError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(GiftbookError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::from(GiftbookError::from(err))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
