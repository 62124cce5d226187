//! Subject and Date extraction from a message header list

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::models::Header;

/// Values pulled from the first message of a thread
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailHeaders {
    pub subject: String,
    pub date: Option<DateTime<FixedOffset>>,
}

/// Scan the headers once, in order. A later `Subject` or `Date` overwrites an
/// earlier one. Names are matched exactly.
pub fn extract_headers(headers: &[Header]) -> MailHeaders {
    let mut extracted = MailHeaders::default();

    for header in headers {
        match header.name.as_str() {
            "Subject" => extracted.subject = header.value.clone(),
            "Date" => extracted.date = parse_date(&header.value),
            _ => {}
        }
    }

    extracted
}

/// Parse an RFC 5322 date-time, returning `None` when it does not parse
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date);
    }

    // "Tue, 3 Jan 2017 09:12:44 +0800 (CST)"
    if let Some(open) = value.rfind('(') {
        if value.ends_with(')') {
            if let Ok(date) = DateTime::parse_from_rfc2822(value[..open].trim_end()) {
                return Some(date);
            }
        }
    }

    debug!("Unparsable Date header: {:?}", value);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_extracts_subject_and_date() {
        let headers = vec![
            Header::new("From", "alerts@broker.example"),
            Header::new("Subject", "買進 (2330)"),
            Header::new("Date", "Mon, 24 Nov 2025 10:30:00 +0800"),
        ];

        let extracted = extract_headers(&headers);
        assert_eq!(extracted.subject, "買進 (2330)");
        let date = extracted.date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 11, 24));
        assert_eq!(date.hour(), 10);
        assert_eq!(date.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let headers = vec![
            Header::new("Subject", "first"),
            Header::new("Subject", "second"),
        ];
        assert_eq!(extract_headers(&headers).subject, "second");
    }

    #[test]
    fn test_later_unparsable_date_clears_earlier() {
        let headers = vec![
            Header::new("Date", "Mon, 24 Nov 2025 10:30:00 +0000"),
            Header::new("Date", "yesterday"),
        ];
        assert!(extract_headers(&headers).date.is_none());
    }

    #[test]
    fn test_names_match_exactly() {
        let headers = vec![
            Header::new("subject", "lowercase"),
            Header::new("DATE", "Mon, 24 Nov 2025 10:30:00 +0000"),
        ];
        assert_eq!(extract_headers(&headers), MailHeaders::default());
    }

    #[test]
    fn test_missing_headers() {
        assert_eq!(extract_headers(&[]), MailHeaders::default());
    }

    #[test]
    fn test_parse_date_variants() {
        assert!(parse_date("Mon, 24 Nov 2025 10:30:00 +0000").is_some());
        assert!(parse_date("24 Nov 2025 10:30:00 +0000").is_some());
        assert!(parse_date("Tue, 3 Jan 2017 09:12:44 +0800 (CST)").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }
}
