//! Error types for taskboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, failed validation, invalid move)
//! - 4: Operation failed (storage, serialization, lock)

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskboard CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level validation failures collected at the form boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Message for a given field, if it was rejected.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.message.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|entry| format!("{}: {}", entry.field, entry.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Main error type for taskboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::TaskNotFound(_)
            | Error::ColumnNotFound(_)
            | Error::InvalidMove(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::Storage(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Validation(err) => Some(serde_json::json!({ "fields": err.fields })),
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task_id": id })),
            Error::ColumnNotFound(id) => Some(serde_json::json!({ "column_id": id })),
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            Error::LockFailed(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for taskboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
