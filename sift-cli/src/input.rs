//! Statement text loading: plain text as-is, PDFs through `pdftotext`.

use anyhow::{Context, Result, bail};
use sift_ingest::normalize_page_breaks;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Statement text with page breaks normalized to the marker line
pub fn read_statement(path: &Path, pdftotext: &str) -> Result<String> {
    if !path.exists() {
        bail!("Statement not found: {}", path.display());
    }

    let raw = if is_pdf(path) {
        render_pdf(path, pdftotext)?
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };
    Ok(normalize_page_breaks(&raw))
}

fn render_pdf(path: &Path, pdftotext: &str) -> Result<String> {
    debug!(path = %path.display(), bin = pdftotext, "Rendering PDF");
    let output = Command::new(pdftotext)
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .with_context(|| format!("running {} (set [pdf] pdftotext in config.toml)", pdftotext))?;

    if !output.status.success() {
        bail!(
            "{} failed on {} ({}): {}",
            pdftotext,
            path.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
