//! Gmail-backed mail service

use async_trait::async_trait;
use google_gmail1::api;
use tracing::debug;

use crate::auth::{GmailHub, READONLY_SCOPES};
use crate::error::{Result, TrackerError};
use crate::models::{Header, LabelInfo, Thread, ThreadMessage, ThreadSummary};

/// Mail service operations used by the pipeline, mockable in tests
#[async_trait]
pub trait MailService: Send + Sync {
    /// List up to `max_results` thread summaries carrying `label_id` (single page)
    async fn list_threads(&self, label_id: &str, max_results: u32) -> Result<Vec<ThreadSummary>>;

    /// Get a thread with the header collection of each message
    async fn get_thread(&self, thread_id: &str) -> Result<Thread>;

    /// List all labels in the account
    async fn list_labels(&self) -> Result<Vec<LabelInfo>>;
}

/// Production mail service on top of the Gmail API hub
pub struct GmailMailService {
    hub: GmailHub,
    user_id: String,
}

impl GmailMailService {
    pub fn new(hub: GmailHub, user_id: impl Into<String>) -> Self {
        Self {
            hub,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl MailService for GmailMailService {
    async fn list_threads(&self, label_id: &str, max_results: u32) -> Result<Vec<ThreadSummary>> {
        debug!("Listing threads for label {} (max {})", label_id, max_results);
        let (_, response) = self
            .hub
            .users()
            .threads_list(&self.user_id)
            .add_label_ids(label_id)
            .max_results(max_results)
            .add_scope(READONLY_SCOPES[0])
            .doit()
            .await?;

        let summaries: Vec<ThreadSummary> = response
            .threads
            .unwrap_or_default()
            .into_iter()
            .filter_map(convert_summary)
            .collect();

        debug!("Listed {} threads", summaries.len());
        Ok(summaries)
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Thread> {
        let (_, thread) = self
            .hub
            .users()
            .threads_get(&self.user_id, thread_id)
            .format("metadata")
            .add_metadata_headers("Subject")
            .add_metadata_headers("Date")
            .add_scope(READONLY_SCOPES[0])
            .doit()
            .await?;

        convert_thread(thread_id, thread)
    }

    async fn list_labels(&self) -> Result<Vec<LabelInfo>> {
        let (_, response) = self
            .hub
            .users()
            .labels_list(&self.user_id)
            .add_scope(READONLY_SCOPES[0])
            .doit()
            .await?;

        let labels = response
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|label| match (label.id, label.name) {
                (Some(id), Some(name)) => Some(LabelInfo { id, name }),
                _ => None,
            })
            .collect();

        Ok(labels)
    }
}

/// Summaries without an id cannot be fetched and are skipped
fn convert_summary(thread: api::Thread) -> Option<ThreadSummary> {
    Some(ThreadSummary {
        id: thread.id?,
        snippet: thread.snippet.unwrap_or_default(),
    })
}

/// Convert a Gmail API thread, keeping message order and header order
fn convert_thread(requested_id: &str, thread: api::Thread) -> Result<Thread> {
    let id = thread.id.unwrap_or_else(|| requested_id.to_string());
    if id != requested_id {
        return Err(TrackerError::InvalidThreadFormat(format!(
            "requested thread {} but received {}",
            requested_id, id
        )));
    }

    let messages = thread
        .messages
        .unwrap_or_default()
        .into_iter()
        .map(|message| ThreadMessage {
            headers: message
                .payload
                .and_then(|p| p.headers)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|h| {
                    let name = h.name?;
                    Some(Header {
                        name,
                        value: h.value.unwrap_or_default(),
                    })
                })
                .collect(),
        })
        .collect();

    Ok(Thread { id, messages })
}
