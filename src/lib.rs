//! Stock Mail Tracker
//!
//! Scans the Gmail threads under one label, classifies each subject line as a
//! buy or hold recommendation, extracts the stock code and message date, and
//! exports the results as CSV rows.
//!
//! # Example Usage
//!
//! ```no_run
//! use stock_mail_tracker::{auth, client::GmailMailService, config::Config, pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml".as_ref()).await?;
//!
//!     let hub = auth::initialize_gmail_hub(
//!         &config.auth.credentials,
//!         &config.auth.token_cache,
//!     ).await?;
//!     let service = GmailMailService::new(hub, config.mail.user_id.clone());
//!
//!     let report = pipeline::run_export(&service, &config, None).await?;
//!     println!("{} rows written", report.records_written);
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 authentication and Gmail API initialization
//! - [`client`] - Mail service trait and its Gmail implementation
//! - [`fetcher`] - Thread listing, traversal order and best-effort fetching
//! - [`headers`] - Subject and Date extraction
//! - [`classifier`] - Buy/hold classification and stock code extraction
//! - [`aggregator`] - Ordered record accumulation
//! - [`exporter`] - CSV export
//! - [`pipeline`] - End-to-end export run
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration management
//! - [`error`] - Error types and result aliases
//! - [`models`] - Core data structures

pub mod aggregator;
pub mod auth;
pub mod classifier;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod exporter;
pub mod fetcher;
pub mod headers;
pub mod models;
pub mod pipeline;

pub use error::{Result, TrackerError};

pub use models::{Header, LabelInfo, MailRecord, Operation, Thread, ThreadMessage, ThreadSummary};

pub use aggregator::RecordAggregator;
pub use classifier::{Classification, Classifier};
pub use client::{GmailMailService, MailService};
pub use config::{Config, TraversalDirection, WriteMode};
pub use exporter::CsvExporter;
pub use fetcher::ThreadFetcher;
pub use headers::{extract_headers, MailHeaders};
pub use pipeline::{run_export, ExportReport};
