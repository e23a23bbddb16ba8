//! Runtime configuration for a search.
//!
//! Everything the original tool hard-coded lives here, so tests can point the
//! authenticator and the client at a local mock server.

use std::path::PathBuf;

/// Service account key file, relative to the working directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Read-only Google Drive scope.
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Maximum results per page (Google Drive API limit).
pub const PAGE_SIZE: u32 = 1000;

/// Base URL for Google Drive API v3.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Google OAuth2 token endpoint.
pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Environment variable naming the account to impersonate.
pub const SUBJECT_ENV: &str = "GDF_SUBJECT";

/// Subject baked in at build time, if `GDF_SUBJECT` was set for the compiler.
const DEFAULT_SUBJECT: &str = match option_env!("GDF_SUBJECT") {
    Some(subject) => subject,
    None => "you@you.com",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub scope: String,
    pub page_size: u32,
    /// Domain user impersonated through domain-wide delegation.
    pub subject: String,
    pub api_base: String,
    /// Used when the key file carries no `token_uri` of its own.
    pub token_uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(CREDENTIALS_FILE),
            scope: DRIVE_READONLY_SCOPE.to_string(),
            page_size: PAGE_SIZE,
            subject: DEFAULT_SUBJECT.to_string(),
            api_base: DRIVE_API_BASE.to_string(),
            token_uri: TOKEN_URI.to_string(),
        }
    }
}

impl Config {
    /// Defaults, with the subject taken from `GDF_SUBJECT` when it is set and non-empty.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(SUBJECT_ENV) {
            Ok(subject) if !subject.trim().is_empty() => config.with_subject(subject.trim()),
            _ => config,
        }
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }
}
