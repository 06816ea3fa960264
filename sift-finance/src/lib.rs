//! sift-finance: category rules, merchant grouping, reports and export

pub mod category_rules;
pub mod export;
pub mod merchant;
pub mod report;

pub use category_rules::{Classification, categorize};
pub use export::{ExportError, write_csv, write_csv_file, write_json, write_json_file};
pub use merchant::{KeySource, MerchantGroup, MerchantGrouper, MerchantKey, MerchantReport, merchant_key};
pub use report::{AnalysisDocument, CategoryBreakdown, CategoryTotals, GroupSummary, Summary};
