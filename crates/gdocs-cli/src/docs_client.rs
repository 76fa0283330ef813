//! Docs API v1 client.
//!
//! Implements [`DocumentService`] over HTTP. The access token is resolved on
//! the first remote call, never earlier, so a command rejected by local
//! validation touches neither the network nor the credentials file.

use async_trait::async_trait;
use gdocs_core::{DocsError, Document, DocumentService, Reply, Request};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::token_manager::TokenManager;

pub const DEFAULT_API_BASE: &str = "https://docs.googleapis.com/v1";

/// Where access tokens come from.
pub enum TokenSource {
    /// Supplied directly, used as-is.
    Static(String),
    Managed(TokenManager),
}

impl TokenSource {
    async fn token(&self) -> Result<String, DocsError> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Managed(manager) => manager.get_valid_token().await.map_err(|e| {
                DocsError::Remote(format!(
                    "authentication failed ({}): {:#}",
                    manager.path().display(),
                    e
                ))
            }),
        }
    }
}

#[derive(Serialize)]
struct BatchUpdateRequest<'a> {
    requests: &'a [Request],
}

#[derive(Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<Reply>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn transport(e: reqwest::Error) -> DocsError {
    DocsError::Remote(e.to_string())
}

/// Turn a non-success response into a remote error carrying the status and
/// the service's own message when it sent one.
async fn error_from(resp: Response) -> DocsError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or(body);
    DocsError::Remote(format!("Docs API error {}: {}", status, message))
}

pub struct DocsClient {
    http: Client,
    api_base: String,
    tokens: TokenSource,
}

impl DocsClient {
    pub fn new(api_base: impl Into<String>, tokens: TokenSource) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

#[async_trait]
impl DocumentService for DocsClient {
    #[instrument(skip(self), level = "debug")]
    async fn get_document(&self, document_id: &str) -> Result<Document, DocsError> {
        let token = self.tokens.token().await?;
        let url = format!("{}/documents/{}", self.api_base, document_id);

        let resp = self
            .http
            .get(&url)
            .query(&[("includeTabsContent", "true")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }

        let document: Document = resp.json().await.map_err(transport)?;
        debug!(
            "Fetched document {} ({} top-level tabs)",
            document_id,
            document.tabs.len()
        );
        Ok(document)
    }

    #[instrument(skip(self, requests), level = "debug", fields(requests = requests.len()))]
    async fn batch_update(
        &self,
        document_id: &str,
        requests: &[Request],
    ) -> Result<Vec<Reply>, DocsError> {
        let token = self.tokens.token().await?;
        let url = format!("{}/documents/{}:batchUpdate", self.api_base, document_id);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&BatchUpdateRequest { requests })
            .send()
            .await
            .map_err(transport)?;

        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }

        let body: BatchUpdateResponse = resp.json().await.map_err(transport)?;
        debug!("Batch update returned {} replies", body.replies.len());
        Ok(body.replies)
    }
}
