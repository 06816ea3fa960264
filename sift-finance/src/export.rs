//! Tabular and JSON export of extracted transactions

use serde::Serialize;
use sift_core::Transaction;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const CSV_HEADER: [&str; 3] = ["date", "amount", "description"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Write the `date,amount,description` projection, header row first.
pub fn write_csv<W: Write>(txns: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for txn in txns {
        let amount = txn.amount.to_string();
        wtr.write_record([txn.date.as_str(), amount.as_str(), txn.description.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(txns: &[Transaction], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(txns, BufWriter::new(file))?;
    info!(path = %path.display(), rows = txns.len(), "Wrote CSV export");
    Ok(())
}

/// Pretty-printed JSON of any serializable value (usually an `AnalysisDocument`)
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn write_json_file<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_json(value, BufWriter::new(file))?;
    info!(path = %path.display(), "Wrote JSON export");
    Ok(())
}
