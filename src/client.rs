//! Google Drive API client for name searches.

use reqwest::Client;
use tracing::{debug, warn};

use crate::auth::Authenticator;
use crate::config::Config;
use crate::error::{DriveError, Result};
use crate::models::{ApiErrorResponse, FileListResponse};
use crate::search::SearchCriteria;

/// Partial response mask for files.list.
pub const LIST_FIELDS: &str = "nextPageToken, files(id, mimeType, modifiedTime, name, size)";

/// Client for searching Google Drive, shared drives included.
pub struct DriveClient {
    auth: Authenticator,
    http: Client,
    api_base: String,
    page_size: u32,
}

impl DriveClient {
    /// Create a new DriveClient.
    ///
    /// # Arguments
    /// * `auth` - Authenticator for obtaining access tokens; its HTTP client is reused
    /// * `config` - Supplies the API base URL and page size
    pub fn new(auth: Authenticator, config: &Config) -> Self {
        Self {
            http: auth.http_client().clone(),
            auth,
            api_base: config.api_base.clone(),
            page_size: config.page_size,
        }
    }

    /// Find files whose names contain the search phrase.
    ///
    /// Only the first page is fetched. If Drive reports more results, the
    /// continuation token is returned untouched in the response.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<FileListResponse> {
        self.query_files(&criteria.to_query()).await
    }

    /// Run one files.list call with a raw Drive query.
    pub async fn query_files(&self, query: &str) -> Result<FileListResponse> {
        let token = self.auth.get_access_token().await?;
        let page_size = self.page_size.to_string();

        debug!(query, page_size = self.page_size, "listing files");

        let response = self
            .http
            .get(format!("{}/files", self.api_base))
            .bearer_auth(&token)
            .query(&[
                ("q", query),
                ("fields", LIST_FIELDS),
                ("pageSize", page_size.as_str()),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
                return Err(DriveError::ApiError {
                    status: api_error.error.code,
                    message: api_error.error.message,
                });
            }
            return Err(DriveError::ApiError {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let list_response: FileListResponse = response.json().await?;
        debug!(count = list_response.files.len(), "files listed");

        if list_response.next_page_token.is_some() {
            warn!(
                shown = list_response.files.len(),
                "more matches exist; only the first page is listed"
            );
        }

        Ok(list_response)
    }
}
