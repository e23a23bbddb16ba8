//! Error types for the gdrive_find crate.

use thiserror::Error;

/// Errors that can occur while searching Google Drive.
///
/// Wrapped errors are exposed through `source()` only, not repeated in the message.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Failed to read credentials file")]
    CredentialsFileError(#[from] std::io::Error),

    #[error("Failed to parse credentials JSON")]
    CredentialsParseError(#[from] serde_json::Error),

    #[error("Invalid service account credentials: {0}")]
    InvalidCredentials(String),

    #[error("JWT encoding error")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Token refresh failed: {0}")]
    TokenRefreshError(String),

    #[error("HTTP request failed")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid modified time {value:?} for {name:?}")]
    InvalidTimestamp {
        name: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Broad failure category of a [`DriveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential file missing, unreadable or malformed.
    Config,
    /// Token could not be issued.
    Auth,
    /// Transport or API failure.
    Remote,
    /// The response carried data we could not interpret.
    Data,
}

impl DriveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DriveError::CredentialsFileError(_)
            | DriveError::CredentialsParseError(_)
            | DriveError::InvalidCredentials(_) => ErrorKind::Config,
            DriveError::JwtError(_) | DriveError::TokenRefreshError(_) => ErrorKind::Auth,
            DriveError::HttpError(_) | DriveError::ApiError { .. } => ErrorKind::Remote,
            DriveError::InvalidTimestamp { .. } => ErrorKind::Data,
        }
    }
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
