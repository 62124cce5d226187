//! CSV export of classified records

use chrono::{DateTime, Datelike, FixedOffset};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::classifier::Classifier;
use crate::config::WriteMode;
use crate::error::Result;
use crate::models::MailRecord;

/// Writes records as `stock_code, date, operation label, subject` rows without a header row
pub struct CsvExporter {
    classifier: Classifier,
    mode: WriteMode,
}

impl CsvExporter {
    pub fn new(classifier: Classifier, mode: WriteMode) -> Self {
        Self { classifier, mode }
    }

    /// Write every record to `path`, returning the number of rows written
    pub fn export(&self, records: Vec<MailRecord>, path: &Path) -> Result<usize> {
        let mut options = OpenOptions::new();
        options.create(true);
        match self.mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        let file = options.open(path)?;

        let rows = self.write_records(&records, file)?;
        info!("Wrote {} rows to {:?}", rows, path);
        Ok(rows)
    }

    /// Write rows to any writer, flushing at the end
    pub fn write_records<W: Write>(&self, records: &[MailRecord], writer: W) -> Result<usize> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        for record in records {
            wtr.write_record([
                record.stock_code.as_str(),
                format_date(record.date.as_ref()).as_str(),
                self.classifier.operation_label(record.operation),
                record.subject.as_str(),
            ])?;
        }

        wtr.flush()?;
        Ok(records.len())
    }
}

/// Rendering of a missing date: year 1, January 1st
pub const ZERO_DATE: &str = "1/1/1";

/// `year/month/day` in the date's own offset, without zero padding
pub fn format_date(date: Option<&DateTime<FixedOffset>>) -> String {
    match date {
        Some(d) => format!("{}/{}/{}", d.year(), d.month(), d.day()),
        None => ZERO_DATE.to_string(),
    }
}
