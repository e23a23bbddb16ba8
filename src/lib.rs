//! gdrive_find - find files in Google Drive by name.
//!
//! This library provides functionality to:
//! - Authenticate as a service account impersonating a domain user
//! - Search Google Drive (shared drives included) for names containing a phrase
//! - Render the matches as a compact size / age / name listing
//!
//! # Example
//!
//! ```no_run
//! use gdrive_find::{format_listing, Authenticator, Config, DriveClient, SearchCriteria};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let auth = Authenticator::from_file(&config)?;
//!     let client = DriveClient::new(auth, &config);
//!
//!     let criteria = SearchCriteria::from_args(["quarterly", "report"]).unwrap();
//!     let result = client.search(&criteria).await?;
//!     print!("{}", format_listing(&result.files, chrono::Utc::now())?);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod search;

// Re-exports for convenience
pub use auth::{load_credentials, Authenticator};
pub use client::DriveClient;
pub use config::Config;
pub use error::{DriveError, ErrorKind, Result};
pub use format::{format_listing, format_relative, format_size};
pub use models::{FileListResponse, FileMetadata};
pub use search::SearchCriteria;
