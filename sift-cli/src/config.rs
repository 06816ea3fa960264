use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_sift_home, sift_home};

/// `~/.sift/config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSection,
    pub export: ExportSection,
    pub extract: ExtractSection,
    pub pdf: PdfSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Merchant groups shown per ranking
    pub top: usize,
    /// Show category and rule columns in transaction tables
    pub details: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory for default-named export files
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Year for month/day rows of statements without a period header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSection {
    /// Text renderer used for `.pdf` inputs
    pub pdftotext: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top: 25,
            details: false,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Default for PdfSection {
    fn default() -> Self {
        Self {
            pdftotext: "pdftotext".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(sift_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_sift_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    if !p.exists() {
        println!("# {} not found; showing defaults", p.display());
    }
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.report.top, 25);
        assert!(!cfg.report.details);
        assert_eq!(cfg.export.dir, PathBuf::from("."));
        assert_eq!(cfg.extract.fallback_year, None);
        assert_eq!(cfg.pdf.pdftotext, "pdftotext");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[report]\ntop = 5\n\n[extract]\nfallback_year = 2023\n").unwrap();
        assert_eq!(cfg.report.top, 5);
        assert!(!cfg.report.details);
        assert_eq!(cfg.extract.fallback_year, Some(2023));
        assert_eq!(cfg.pdf, PdfSection::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.report.details = true;
        cfg.pdf.pdftotext = "/opt/poppler/bin/pdftotext".to_string();
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[report]\ntop = \"many\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
