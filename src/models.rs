use chrono::{DateTime, FixedOffset};

/// One classified thread, as written to the CSV export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRecord {
    /// Position of the thread in the listed summary sequence
    pub index: usize,
    pub subject: String,
    /// `None` when the Date header was absent or unparsable
    pub date: Option<DateTime<FixedOffset>>,
    pub stock_code: String,
    pub operation: Operation,
}

impl MailRecord {
    /// Record for a thread whose headers could not be read
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            subject: String::new(),
            date: None,
            stock_code: String::new(),
            operation: Operation::None,
        }
    }
}

/// Trading recommendation carried by a subject line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    Buy,
    Hold,
    #[default]
    None,
}

/// Entry returned by a thread listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub id: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadMessage {
    pub headers: Vec<Header>,
}

/// Full thread with the header collection of every message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    pub id: String,
    pub messages: Vec<ThreadMessage>,
}

impl Thread {
    /// Thread standing in for one that could not be fetched
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            messages: Vec::new(),
        }
    }

    /// Headers of the first message, or an empty slice for a thread without messages
    pub fn first_message_headers(&self) -> &[Header] {
        self.messages
            .first()
            .map(|m| m.headers.as_slice())
            .unwrap_or(&[])
    }
}

/// Label info returned from Gmail API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInfo {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let record = MailRecord::empty(7);
        assert_eq!(record.index, 7);
        assert!(record.subject.is_empty());
        assert!(record.date.is_none());
        assert!(record.stock_code.is_empty());
        assert_eq!(record.operation, Operation::None);
    }

    #[test]
    fn test_first_message_headers() {
        let thread = Thread {
            id: "t1".to_string(),
            messages: vec![
                ThreadMessage {
                    headers: vec![Header::new("Subject", "first")],
                },
                ThreadMessage {
                    headers: vec![Header::new("Subject", "second")],
                },
            ],
        };
        assert_eq!(thread.first_message_headers()[0].value, "first");
        assert!(Thread::empty("t2").first_message_headers().is_empty());
    }
}
