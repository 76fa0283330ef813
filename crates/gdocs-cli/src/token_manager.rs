//! OAuth token manager backed by a local credentials file.
//!
//! Reads the stored tokens on first use, caches the access token in memory
//! and refreshes it through the OAuth2 token endpoint when it is about to
//! expire. Refreshed tokens are written back to the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// On-disk credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_expires_at: Option<String>,
}

/// Cached token with expiration.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => chrono::Utc::now() >= exp - chrono::Duration::minutes(5),
            None => true,
        }
    }
}

pub struct TokenManager {
    path: PathBuf,
    token_url: String,
    http: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(path: PathBuf, token_url: impl Into<String>) -> Self {
        Self {
            path,
            token_url: token_url.into(),
            http: reqwest::Client::new(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_valid_token(&self) -> anyhow::Result<String> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if !cached.is_expired() {
                debug!("Token cache hit");
                return Ok(cached.access_token.clone());
            }
            debug!("Cached token expired, refreshing");
        }

        let stored = self.load().await?;
        if let Some(access_token) = &stored.access_token {
            let expires_at = stored
                .token_expires_at
                .as_ref()
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc));
            let token = CachedToken {
                access_token: access_token.clone(),
                expires_at,
            };
            if !token.is_expired() {
                *cache = Some(token.clone());
                return Ok(token.access_token);
            }
        }

        info!("Refreshing OAuth token from {}", self.path.display());
        let token = self.refresh(stored).await?;
        let access_token = token.access_token.clone();
        *cache = Some(token);
        Ok(access_token)
    }

    async fn load(&self) -> anyhow::Result<StoredCredentials> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read credentials file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid credentials file {}", self.path.display()))
    }

    /// Refresh with the refresh_token grant and persist the result.
    #[instrument(skip(self, stored), level = "debug")]
    async fn refresh(&self, mut stored: StoredCredentials) -> anyhow::Result<CachedToken> {
        let resp = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", stored.client_id.as_str()),
                ("client_secret", stored.client_secret.as_str()),
                ("refresh_token", stored.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OAuth token refresh failed: {} {}", status, body);
        }

        #[derive(Deserialize)]
        struct RefreshResponse {
            access_token: String,
            expires_in: u64,
            refresh_token: Option<String>,
        }

        let token_resp: RefreshResponse = resp.json().await?;
        let expires_at =
            chrono::Utc::now() + chrono::Duration::seconds(token_resp.expires_in as i64);

        // The refresh token may be rotated.
        if let Some(rotated) = token_resp.refresh_token {
            stored.refresh_token = rotated;
        }
        stored.access_token = Some(token_resp.access_token.clone());
        stored.token_expires_at = Some(expires_at.to_rfc3339());

        if let Err(e) = self.store(&stored).await {
            warn!(
                "Failed to write refreshed token to {}: {:#}",
                self.path.display(),
                e
            );
        }

        info!("Refreshed OAuth token, expires at {}", expires_at.to_rfc3339());
        Ok(CachedToken {
            access_token: token_resp.access_token,
            expires_at: Some(expires_at),
        })
    }

    async fn store(&self, stored: &StoredCredentials) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(stored)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
