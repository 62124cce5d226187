//! Ordered accumulation of classified records

use crate::classifier::Classifier;
use crate::models::MailRecord;

/// Builds the insertion-ordered record collection for one run
pub struct RecordAggregator {
    records: Vec<MailRecord>,
    filter_by_trigger: Option<Classifier>,
}

impl RecordAggregator {
    /// Aggregator that keeps every record
    pub fn keep_all() -> Self {
        Self {
            records: Vec::new(),
            filter_by_trigger: None,
        }
    }

    /// Aggregator that keeps a record only when its thread snippet mentions a trigger
    pub fn filtered_by(classifier: Classifier) -> Self {
        Self {
            records: Vec::new(),
            filter_by_trigger: Some(classifier),
        }
    }

    /// Append a record, returning whether it was kept
    pub fn push(&mut self, record: MailRecord, snippet: &str) -> bool {
        if let Some(classifier) = &self.filter_by_trigger {
            if !classifier.mentions_trigger(snippet) {
                return false;
            }
        }
        self.records.push(record);
        true
    }

    pub fn into_records(self) -> Vec<MailRecord> {
        self.records
    }
}
