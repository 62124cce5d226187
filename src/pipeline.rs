//! End-to-end export: list, traverse, classify, aggregate, write

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::aggregator::RecordAggregator;
use crate::classifier::Classifier;
use crate::client::MailService;
use crate::config::Config;
use crate::error::Result;
use crate::exporter::CsvExporter;
use crate::fetcher::ThreadFetcher;
use crate::headers::extract_headers;
use crate::models::{MailRecord, Thread};

/// Progress callback invoked after each visited thread with `(visited, total)`
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Outcome of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub threads_listed: usize,
    pub threads_visited: usize,
    pub fetch_failures: usize,
    pub records_written: usize,
    pub output_path: PathBuf,
}

/// Build the record for one thread from its first message's headers
pub fn build_record(index: usize, thread: &Thread, classifier: &Classifier) -> MailRecord {
    let headers = extract_headers(thread.first_message_headers());
    let classification = classifier.classify(&headers.subject);

    MailRecord {
        index,
        subject: headers.subject,
        date: headers.date,
        stock_code: classification.stock_code,
        operation: classification.operation,
    }
}

/// Collect the records of the configured label without writing them
pub async fn collect_records(
    service: &dyn MailService,
    config: &Config,
    on_progress: Option<ProgressCallback>,
) -> Result<(Vec<MailRecord>, ExportReport)> {
    let classifier = Classifier::from_config(&config.classification);
    let fetcher = ThreadFetcher::new(service, config.traversal.clone());

    let summaries = fetcher
        .list_threads(&config.mail.label_id, config.mail.list_max_results)
        .await?;
    info!(
        "Listed {} threads under label {}",
        summaries.len(),
        config.mail.label_id
    );

    let mut aggregator = if config.classification.filter_by_trigger {
        RecordAggregator::filtered_by(classifier.clone())
    } else {
        RecordAggregator::keep_all()
    };

    let order = fetcher.traversal_order(summaries.len());
    let mut fetch_failures = 0;

    for (visited, &index) in order.iter().enumerate() {
        let summary = &summaries[index];
        let thread = match fetcher.get_thread(&summary.id).await {
            Some(thread) => thread,
            None => {
                fetch_failures += 1;
                Thread::empty(&summary.id)
            }
        };

        let record = build_record(index, &thread, &classifier);
        debug!("--- {}: {}", index, record.subject);
        aggregator.push(record, &summary.snippet);

        if let Some(cb) = &on_progress {
            cb(visited + 1, order.len());
        }
    }

    let report = ExportReport {
        threads_listed: summaries.len(),
        threads_visited: order.len(),
        fetch_failures,
        records_written: 0,
        output_path: config.output.path.clone(),
    };

    Ok((aggregator.into_records(), report))
}

/// Run the whole pipeline and write the CSV file once at the end
pub async fn run_export(
    service: &dyn MailService,
    config: &Config,
    on_progress: Option<ProgressCallback>,
) -> Result<ExportReport> {
    let (records, mut report) = collect_records(service, config, on_progress).await?;

    let exporter = CsvExporter::new(
        Classifier::from_config(&config.classification),
        config.output.mode,
    );
    report.records_written = exporter.export(records, &config.output.path)?;

    info!(
        "Export finished: {} visited, {} fetch failures, {} rows",
        report.threads_visited, report.fetch_failures, report.records_written
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Header, Operation, ThreadMessage};

    #[test]
    fn test_build_record_from_first_message() {
        let thread = Thread {
            id: "t1".to_string(),
            messages: vec![
                ThreadMessage {
                    headers: vec![
                        Header::new("Subject", "推薦買進 (2330)"),
                        Header::new("Date", "Tue, 3 Jan 2017 09:12:44 +0800"),
                    ],
                },
                ThreadMessage {
                    headers: vec![Header::new("Subject", "Re: 持有 (2317)")],
                },
            ],
        };

        let record = build_record(4, &thread, &Classifier::default());
        assert_eq!(record.index, 4);
        assert_eq!(record.subject, "推薦買進 (2330)");
        assert_eq!(record.stock_code, "2330");
        assert_eq!(record.operation, Operation::Buy);
        assert!(record.date.is_some());
    }

    #[test]
    fn test_build_record_for_empty_thread() {
        let record = build_record(9, &Thread::empty("t9"), &Classifier::default());
        assert_eq!(record, MailRecord::empty(9));
    }
}
