use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::document::Document;
use crate::error::{DocsError, Result};
use crate::operation::{Reply, Request};

/// Remote document service, already authenticated.
///
/// Implementations report transport and service failures as
/// [`DocsError::Remote`].
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Fetch a full snapshot of the document, including per-tab content.
    async fn get_document(&self, document_id: &str) -> Result<Document>;

    /// Apply `requests` atomically and in order, returning one reply per request.
    async fn batch_update(&self, document_id: &str, requests: &[Request]) -> Result<Vec<Reply>>;
}

/// Submit a batch in one call.
///
/// Remote failures are reported as `failed to <intent>: <cause>` and never
/// retried; a failed call means nothing was applied.
#[instrument(skip(service, requests), level = "debug", fields(requests = requests.len()))]
pub async fn submit<S>(
    service: &S,
    document_id: &str,
    requests: &[Request],
    intent: &str,
) -> Result<Vec<Reply>>
where
    S: DocumentService + ?Sized,
{
    if requests.is_empty() {
        return Err(DocsError::Validation(format!(
            "nothing to submit for {}",
            intent
        )));
    }

    debug!(
        "Submitting {:?} to {}",
        requests.iter().map(Request::kind).collect::<Vec<_>>(),
        document_id
    );
    let replies = service
        .batch_update(document_id, requests)
        .await
        .map_err(|e| e.during(intent))?;

    if replies.len() != requests.len() {
        warn!(
            "Expected {} replies for {}, got {}",
            requests.len(),
            intent,
            replies.len()
        );
    }
    debug!("Applied {} requests to {}", requests.len(), document_id);
    Ok(replies)
}

/// Reply for the request at `index`.
pub fn reply_at(replies: &[Reply], index: usize) -> Option<&Reply> {
    replies.get(index)
}
