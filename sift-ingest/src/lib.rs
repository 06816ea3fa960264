//! sift-ingest: statement text ingestion (format detection, section
//! extraction, line grammars) and the bank-specific layouts.

pub mod detector;
pub mod error;
pub mod grammar;
pub mod page;
pub mod parsers;
pub mod period;
pub mod pipeline;
pub mod section;
pub mod types;

pub use detector::FormatDetector;
pub use error::{Error, Notice, Result};
pub use grammar::Polarity;
pub use page::{PAGE_BREAK, join_pages, normalize_page_breaks};
pub use parsers::StatementFormat;
pub use pipeline::{ExtractOptions, extract_transactions};
pub use types::Extraction;
