//! Common test utilities and fixtures

use mockall::mock;
use std::path::Path;
use stock_mail_tracker::config::Config;
use stock_mail_tracker::error::Result;
use stock_mail_tracker::models::{Header, LabelInfo, Thread, ThreadMessage, ThreadSummary};
use stock_mail_tracker::MailService;

/// Create a thread summary as returned by a label listing
pub fn summary(id: &str, snippet: &str) -> ThreadSummary {
    ThreadSummary {
        id: id.to_string(),
        snippet: snippet.to_string(),
    }
}

/// Summaries `t0..t{count}` with a neutral snippet
pub fn summaries(count: usize) -> Vec<ThreadSummary> {
    (0..count)
        .map(|i| summary(&format!("t{}", i), "snippet"))
        .collect()
}

/// Create a single-message thread with Subject and Date headers
pub fn thread_with(id: &str, subject: &str, date: &str) -> Thread {
    Thread {
        id: id.to_string(),
        messages: vec![ThreadMessage {
            headers: vec![
                Header::new("From", "alerts@broker.example"),
                Header::new("Subject", subject),
                Header::new("Date", date),
            ],
        }],
    }
}

/// Default config writing to `output`
pub fn config_for(output: &Path) -> Config {
    let mut config = Config::default();
    config.output.path = output.to_path_buf();
    config
}

/// Read back an export without a header row
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

// Mock implementation of MailService for testing
mock! {
    pub MailService {}

    #[async_trait::async_trait]
    impl MailService for MailService {
        async fn list_threads(&self, label_id: &str, max_results: u32) -> Result<Vec<ThreadSummary>>;
        async fn get_thread(&self, thread_id: &str) -> Result<Thread>;
        async fn list_labels(&self) -> Result<Vec<LabelInfo>>;
    }
}
