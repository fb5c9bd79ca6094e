//! Error types for the crate.
//!
//! Most fallible functions return the `anyhow`-backed `Result`. The few errors that callers need
//! to match on, such as a row that failed validation or a backend that reported a failure, have
//! their own small types.

use crate::model::Column;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// A grid row that cannot be turned into a `Transaction`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidationError {
    /// Zero-based row index.
    row: usize,
    /// The first offending column.
    field: Column,
    reason: String,
}

impl ValidationError {
    pub(crate) fn new(row: usize, field: Column, reason: impl Into<String>) -> Self {
        Self {
            row,
            field,
            reason: reason.into(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn field(&self) -> Column {
        self.field
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row + 1, self.reason)
    }
}

impl StdError for ValidationError {}

/// Failures when talking to the ledger backend.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    Transport(String),
    /// The server answered with a non-2xx status or with `"success": false`. `message` is the
    /// body's `error` field when one was present.
    Server {
        status: Option<u16>,
        message: Option<String>,
    },
    /// The response body could not be decoded.
    Decode(String),
}

impl ApiError {
    /// The server-supplied message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Transport error: {e}"),
            ApiError::Server { status, message } => {
                let message = message.as_deref().unwrap_or("unknown error");
                match status {
                    Some(status) => write!(f, "Server error ({status}): {message}"),
                    None => write!(f, "Server error: {message}"),
                }
            }
            ApiError::Decode(e) => write!(f, "Unable to decode response: {e}"),
        }
    }
}

impl StdError for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Reasons a bulk save did not go through.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SaveError {
    /// Every row was blank.
    NothingToSave,
    /// Another save for the same grid has not finished yet.
    InFlight,
    Validation(ValidationError),
    Api(ApiError),
}

impl SaveError {
    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SaveError::NothingToSave => String::from("Nothing to save."),
            SaveError::InFlight => String::from("A save is already in progress."),
            SaveError::Validation(e) => e.to_string(),
            SaveError::Api(e) => format!(
                "Error while saving: {}",
                e.server_message().unwrap_or("unknown error")
            ),
        }
    }
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Api(e) => Display::fmt(e, f),
            other => f.write_str(&other.user_message()),
        }
    }
}

impl StdError for SaveError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SaveError::Validation(e) => Some(e),
            SaveError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for SaveError {
    fn from(e: ValidationError) -> Self {
        SaveError::Validation(e)
    }
}

impl From<ApiError> for SaveError {
    fn from(e: ApiError) -> Self {
        SaveError::Api(e)
    }
}
