//! Document-level extraction: detect, parse sections, de-duplicate, sort.

use std::collections::HashSet;

use sift_core::Transaction;

use crate::detector::FormatDetector;
use crate::error::Result;
use crate::types::Extraction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Year for month/day rows when the statement has no period header.
    /// `None` means the current calendar year.
    pub fallback_year: Option<i32>,
}

/// Drop repeated `(date, amount, description)` triples (first one wins) and
/// sort by calendar date. The sort is stable, so same-day rows keep their
/// extraction order. Returns the number of rows removed.
pub fn finalize(transactions: &mut Vec<Transaction>) -> usize {
    let before = transactions.len();
    let mut seen = HashSet::new();
    transactions.retain(|txn| seen.insert(txn.dedup_key()));
    transactions.sort_by_key(|txn| txn.posted_on);
    before - transactions.len()
}

/// One-shot extraction with a freshly built detector.
///
/// Callers processing many documents should build a [`FormatDetector`] once
/// and call [`FormatDetector::extract`].
pub fn extract_transactions(text: &str, options: ExtractOptions) -> Result<Extraction> {
    Ok(FormatDetector::new()?.extract(text, options))
}
