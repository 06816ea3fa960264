use serde::Serialize;
use sift_core::Transaction;

use crate::error::Notice;
use crate::parsers::StatementFormat;

/// Result of running the ingestion pipeline over one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    /// `None` when no registered format matched
    pub format: Option<StatementFormat>,
    pub transactions: Vec<Transaction>,
    /// Section lines that did not match their grammar
    pub dropped_lines: usize,
    /// Rows removed as duplicates of an earlier `(date, amount, description)`
    pub duplicates_removed: usize,
    pub notices: Vec<Notice>,
}

impl Extraction {
    pub fn for_format(format: StatementFormat) -> Self {
        Self {
            format: Some(format),
            transactions: Vec::new(),
            dropped_lines: 0,
            duplicates_removed: 0,
            notices: Vec::new(),
        }
    }

    /// Outcome for a document no format recognizes
    pub fn unsupported() -> Self {
        Self {
            format: None,
            transactions: Vec::new(),
            dropped_lines: 0,
            duplicates_removed: 0,
            notices: vec![Notice::UnknownFormat],
        }
    }

    pub fn is_supported(&self) -> bool {
        self.format.is_some()
    }
}
