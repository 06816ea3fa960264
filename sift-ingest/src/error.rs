//! Error and notice types for statement ingestion.
//!
//! Only grammar construction and IO can fail. Everything that goes wrong while
//! reading a statement is a [`Notice`] attached to the extraction result.

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid grammar pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown statement format: {0}")]
    UnknownFormatId(String),
}

/// Recoverable conditions met while extracting one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// No registered format matched; the document yields no transactions.
    UnknownFormat,
    /// A declared section header never occurred in the text.
    EmptySection { section: &'static str },
    /// A section line did not match its grammar and was dropped.
    UnparseableLine { section: &'static str, line: String },
}
