//! Format detection over the registered statement layouts.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::parsers::{FormatParser, StatementFormat};
use crate::period::PeriodScanner;
use crate::pipeline::{ExtractOptions, finalize};
use crate::types::Extraction;

/// Compiled parsers for every supported format, in detection priority order.
///
/// Immutable once built; one detector can serve any number of documents.
#[derive(Debug, Clone)]
pub struct FormatDetector {
    parsers: Vec<FormatParser>,
    period: PeriodScanner,
}

impl FormatDetector {
    pub fn new() -> Result<Self> {
        Self::with_formats(&StatementFormat::PRIORITY)
    }

    /// Detector restricted to `formats`, tried in the given order
    pub fn with_formats(formats: &[StatementFormat]) -> Result<Self> {
        let parsers = formats
            .iter()
            .map(|f| FormatParser::new(*f))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            parsers,
            period: PeriodScanner::new()?,
        })
    }

    pub fn formats(&self) -> impl Iterator<Item = StatementFormat> + '_ {
        self.parsers.iter().map(FormatParser::format)
    }

    /// First parser whose predicate accepts `text`; `None` is the unknown-format case.
    pub fn detect(&self, text: &str) -> Option<&FormatParser> {
        for parser in &self.parsers {
            if parser.detect(text) {
                debug!(format = %parser.format(), "Format matched");
                return Some(parser);
            }
            debug!(format = %parser.format(), "Format did not match");
        }
        None
    }

    /// Full pipeline for one document. Never fails: an unrecognized layout
    /// yields an empty, unsupported [`Extraction`].
    pub fn extract(&self, text: &str, options: ExtractOptions) -> Extraction {
        let Some(parser) = self.detect(text) else {
            warn!("Unknown bank statement format; no transactions extracted");
            return Extraction::unsupported();
        };

        let year = self.period.scan(text, options.fallback_year);
        let mut out = parser.parse(text, &year);
        out.duplicates_removed = finalize(&mut out.transactions);

        info!(
            format = %parser.format(),
            transactions = out.transactions.len(),
            dropped_lines = out.dropped_lines,
            duplicates = out.duplicates_removed,
            "Statement extracted"
        );
        out
    }
}
