//! Service account authentication for Google APIs.
//!
//! Builds an RS256-signed JWT assertion that impersonates a domain user
//! (domain-wide delegation) and trades it for a bearer token.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::error::{DriveError, Result};
use crate::models::{ServiceAccountCredentials, TokenErrorResponse, TokenResponse};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Lifetime requested for each assertion.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// `iat` is backdated by this much to tolerate clock skew.
const ISSUED_AT_SKEW_SECS: i64 = 10;

/// JWT claims for service account authentication.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,   // Issuer (service account email)
    scope: String, // OAuth scope
    aud: String,   // Audience (token endpoint)
    sub: String,   // Impersonated user
    exp: i64,      // Expiration time
    iat: i64,      // Issued at
}

/// Cached access token with expiration.
#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Read the key file in full.
///
/// This is the only filesystem access the tool makes, and it happens before
/// anything touches the network.
pub fn load_credentials<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading credentials file");
    Ok(fs::read(path)?)
}

/// Authenticator for Google APIs using service account credentials.
#[derive(Clone)]
pub struct Authenticator {
    client_email: String,
    key_id: Option<String>,
    key: EncodingKey,
    token_uri: String,
    scope: String,
    subject: String,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl Authenticator {
    /// Create a new authenticator from the key file named in `config`.
    pub fn from_file(config: &Config) -> Result<Self> {
        let bytes = load_credentials(&config.credentials_path)?;
        Self::from_json(&bytes, config)
    }

    /// Create a new authenticator from raw key file contents.
    pub fn from_json(bytes: &[u8], config: &Config) -> Result<Self> {
        let credentials: ServiceAccountCredentials = serde_json::from_slice(bytes)?;
        Self::new(credentials, config)
    }

    /// Create a new authenticator from credentials.
    ///
    /// The private key is parsed here, so a broken key fails before any
    /// request is made.
    pub fn new(credentials: ServiceAccountCredentials, config: &Config) -> Result<Self> {
        if let Some(account_type) = credentials.account_type.as_deref() {
            if account_type != SERVICE_ACCOUNT_TYPE {
                return Err(DriveError::InvalidCredentials(format!(
                    "'type' field is {:?} (expected {:?})",
                    account_type, SERVICE_ACCOUNT_TYPE
                )));
            }
        }

        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| DriveError::InvalidCredentials(format!("private key: {}", e)))?;

        let token_uri = credentials
            .token_uri
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| config.token_uri.clone());

        Ok(Self {
            client_email: credentials.client_email,
            key_id: credentials.private_key_id,
            key,
            token_uri,
            scope: config.scope.clone(),
            subject: config.subject.clone(),
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Send token requests, and any client built on this authenticator, through `http`.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.client = http;
        self
    }

    /// HTTP client shared with [`DriveClient`](crate::client::DriveClient).
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Service account email used as the token issuer.
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Account being impersonated.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                // Add 60 second buffer before expiration
                if token.expires_at > Utc::now() + Duration::seconds(60) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let new_token = self.refresh_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp() - ISSUED_AT_SKEW_SECS;
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.token_uri.clone(),
            sub: self.subject.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();
        Ok(encode(&header, &claims, &self.key)?)
    }

    /// Refresh the access token using JWT assertion.
    async fn refresh_token(&self) -> Result<CachedToken> {
        let jwt = self.assertion(Utc::now())?;

        debug!(
            issuer = %self.client_email,
            subject = %self.subject,
            token_uri = %self.token_uri,
            "exchanging JWT assertion for access token"
        );

        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", &jwt)];

        let response = self
            .client
            .post(&self.token_uri)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, message
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        debug!(
            token_type = %token_response.token_type,
            expires_in = token_response.expires_in,
            "access token issued"
        );

        // Never trust a token past the assertion's own lifetime.
        let expires_in = i64::try_from(token_response.expires_in)
            .unwrap_or(ASSERTION_LIFETIME_SECS)
            .min(ASSERTION_LIFETIME_SECS);
        let expires_at = Utc::now() + Duration::seconds(expires_in);

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }
}
