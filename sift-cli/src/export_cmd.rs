use anyhow::{Context, Result};
use clap::ValueEnum;
use sift_core::Transaction;
use sift_finance::{AnalysisDocument, write_csv_file, write_json_file};
use sift_ingest::{ExtractOptions, Extraction, FormatDetector};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::input::read_statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// date,amount,description rows
    Csv,
    /// Full analysis document (summary, categories, merchants)
    Json,
}

impl ExportFormat {
    fn suffix(self) -> &'static str {
        match self {
            ExportFormat::Csv => "transactions.csv",
            ExportFormat::Json => "analysis.json",
        }
    }
}

/// `<dir>/<stem>_transactions.csv` for one input, `<dir>/combined_transactions.csv` for several
pub fn default_output(files: &[PathBuf], format: ExportFormat, dir: &Path) -> PathBuf {
    let stem = match files {
        [single] => single
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement".to_string()),
        _ => "combined".to_string(),
    };
    dir.join(format!("{stem}_{}", format.suffix()))
}

pub fn run(
    files: &[PathBuf],
    out: Option<PathBuf>,
    format: ExportFormat,
    export_dir: &Path,
    extract: ExtractOptions,
    pdftotext: &str,
) -> Result<()> {
    let detector = FormatDetector::new()?;
    let mut extractions: Vec<Extraction> = Vec::with_capacity(files.len());
    for path in files {
        let text = read_statement(path, pdftotext)?;
        let extraction = detector.extract(&text, extract);
        if !extraction.is_supported() {
            warn!(path = %path.display(), "Unsupported bank statement format; nothing to export");
        }
        extractions.push(extraction);
    }

    let target = out.unwrap_or_else(|| default_output(files, format, export_dir));

    match format {
        ExportFormat::Csv => {
            let rows: Vec<Transaction> = extractions
                .into_iter()
                .flat_map(|e| e.transactions)
                .collect();
            write_csv_file(&rows, &target).with_context(|| format!("write {}", target.display()))?;
            println!("Saved {} transactions to {}", rows.len(), target.display());
        }
        ExportFormat::Json => {
            let docs: Vec<AnalysisDocument> = extractions.iter().map(AnalysisDocument::new).collect();
            let written = if let [doc] = docs.as_slice() {
                write_json_file(doc, &target)
            } else {
                write_json_file(&docs, &target)
            };
            written.with_context(|| format!("write {}", target.display()))?;
            println!("Saved analysis of {} statement(s) to {}", docs.len(), target.display());
        }
    }
    Ok(())
}
