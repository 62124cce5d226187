//! Subject-line classification into trading recommendations

use crate::config::ClassificationConfig;
use crate::models::Operation;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening parenthesis followed by four ASCII digits, e.g. `(2330`
static STOCK_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9]{4})").expect("stock code pattern is valid"));

/// Result of classifying one subject line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub operation: Operation,
    /// Empty unless `operation` is `Buy` or `Hold` and a code followed a `(`
    pub stock_code: String,
}

/// Rule-based classifier matching trigger substrings in subject lines
#[derive(Debug, Clone)]
pub struct Classifier {
    buy_trigger: String,
    hold_trigger: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&ClassificationConfig::default())
    }
}

impl Classifier {
    pub fn new(buy_trigger: impl Into<String>, hold_trigger: impl Into<String>) -> Self {
        Self {
            buy_trigger: buy_trigger.into(),
            hold_trigger: hold_trigger.into(),
        }
    }

    pub fn from_config(config: &ClassificationConfig) -> Self {
        Self::new(config.buy_trigger.clone(), config.hold_trigger.clone())
    }

    /// Decide the operation and stock code for a subject line.
    ///
    /// The buy trigger takes priority over the hold trigger. A stock code is
    /// only extracted once a trigger matched.
    pub fn classify(&self, subject: &str) -> Classification {
        let operation = self.detect_operation(subject);
        if operation == Operation::None {
            return Classification::default();
        }

        Classification {
            operation,
            stock_code: extract_stock_code(subject).unwrap_or_default(),
        }
    }

    /// Whether `text` contains either trigger
    pub fn mentions_trigger(&self, text: &str) -> bool {
        self.detect_operation(text) != Operation::None
    }

    /// Human-readable label written to the export, the trigger itself
    pub fn operation_label(&self, operation: Operation) -> &str {
        match operation {
            Operation::Buy => &self.buy_trigger,
            Operation::Hold => &self.hold_trigger,
            Operation::None => "",
        }
    }

    fn detect_operation(&self, text: &str) -> Operation {
        if text.contains(self.buy_trigger.as_str()) {
            Operation::Buy
        } else if text.contains(self.hold_trigger.as_str()) {
            Operation::Hold
        } else {
            Operation::None
        }
    }
}

/// First four-digit code following an opening parenthesis
pub fn extract_stock_code(subject: &str) -> Option<String> {
    STOCK_CODE_PATTERN
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
