//! Thread listing and traversal

use tracing::{debug, warn};

use crate::client::MailService;
use crate::config::{TraversalConfig, TraversalDirection};
use crate::error::Result;
use crate::models::{Thread, ThreadSummary};

/// Lists the threads of a label and fetches them one by one
pub struct ThreadFetcher<'a> {
    service: &'a dyn MailService,
    traversal: TraversalConfig,
}

impl<'a> ThreadFetcher<'a> {
    pub fn new(service: &'a dyn MailService, traversal: TraversalConfig) -> Self {
        Self { service, traversal }
    }

    /// List the summaries of one page. Errors are fatal to the run.
    ///
    /// The result never holds more than `max_results` entries, even if the
    /// service returned more.
    pub async fn list_threads(&self, label_id: &str, max_results: u32) -> Result<Vec<ThreadSummary>> {
        let mut summaries = self.service.list_threads(label_id, max_results).await?;
        let limit = usize::try_from(max_results).unwrap_or(usize::MAX);
        if summaries.len() > limit {
            debug!(
                "Service returned {} summaries, truncating to {}",
                summaries.len(),
                limit
            );
            summaries.truncate(limit);
        }
        Ok(summaries)
    }

    /// Fetch a thread. Failures are logged and yield `None`; they never end the run.
    pub async fn get_thread(&self, thread_id: &str) -> Option<Thread> {
        match self.service.get_thread(thread_id).await {
            Ok(thread) => Some(thread),
            Err(e) => {
                warn!("Failed to fetch thread {}: {}", thread_id, e);
                None
            }
        }
    }

    /// Summary positions to visit, in visiting order
    pub fn traversal_order(&self, len: usize) -> Vec<usize> {
        traversal_order(len, &self.traversal)
    }
}

/// Positions `0..len` walked in the configured direction, capped at `max_threads`
pub fn traversal_order(len: usize, traversal: &TraversalConfig) -> Vec<usize> {
    match traversal.direction {
        TraversalDirection::Descending => (0..len).rev().take(traversal.max_threads).collect(),
        TraversalDirection::Ascending => (0..len).take(traversal.max_threads).collect(),
    }
}
