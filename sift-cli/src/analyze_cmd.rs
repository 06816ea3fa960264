use anyhow::Result;
use rust_decimal::Decimal;
use sift_core::{Transaction, format_amount};
use sift_finance::{CategoryBreakdown, MerchantGrouper, MerchantReport, Summary, categorize, merchant_key};
use sift_ingest::{ExtractOptions, FormatDetector};
use std::path::PathBuf;

use crate::input::read_statement;

const RULE: &str = "--------------------------------------------------------------------------------";
const BANNER: &str = "================================================================================";

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub details: bool,
    pub top: usize,
    pub by_category: bool,
    pub extract: ExtractOptions,
    pub pdftotext: String,
}

pub fn run(files: &[PathBuf], opts: &AnalyzeOptions) -> Result<()> {
    let detector = FormatDetector::new()?;
    let mut all: Vec<Transaction> = Vec::new();
    let mut combined = Summary::default();

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("\n{BANNER}\nProcessing: {name}\n{BANNER}");

        let text = read_statement(path, &opts.pdftotext)?;
        let out = detector.extract(&text, opts.extract);
        let Some(format) = out.format else {
            println!("Unsupported bank statement format: {name}");
            continue;
        };
        println!("Detected format: {}", format.bank_name());
        if out.dropped_lines > 0 || out.duplicates_removed > 0 {
            println!(
                "Skipped {} unreadable line(s), {} duplicate(s)",
                out.dropped_lines, out.duplicates_removed
            );
        }

        println!("{}", render_transactions(&out.transactions, opts.details));
        let summary = Summary::of(&out.transactions);
        println!("{}", render_summary(&format!("Summary for {name}"), &summary));

        combined.merge(&summary);
        all.extend(out.transactions);
    }

    if files.len() > 1 {
        let heading = format!("COMBINED SUMMARY ({} files)", files.len());
        println!("\n{BANNER}\n{heading}\n{BANNER}");
        println!("{}", render_summary("All statements", &combined));
    }

    if all.is_empty() {
        return Ok(());
    }

    if opts.by_category {
        let breakdown = CategoryBreakdown::build(&all);
        for (category, txns) in breakdown.iter() {
            let total: Decimal = txns.iter().map(|t| t.amount).sum();
            println!("\n{BANNER}\n{}\n{BANNER}", category.title().to_uppercase());
            println!("Total Transactions: {}", txns.len());
            println!("Total Amount: {}", format_amount(total));
            println!("{}", render_merchants(&breakdown.merchants(category), opts.top, opts.details));
        }
    } else {
        println!("\nBreakdown by Merchant:");
        println!("{}", render_merchants(&MerchantGrouper::group(&all), opts.top, opts.details));
    }
    Ok(())
}

pub fn render_transactions(txns: &[Transaction], details: bool) -> String {
    if txns.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut lines = vec![format!("\nFound {} transactions:", txns.len()), RULE.to_string()];
    if details {
        lines.push(format!(
            "{:<14} {:<12} {:<24} {:<20} {}",
            "Date", "Amount", "Category", "Merchant", "Description"
        ));
    } else {
        lines.push(format!("{:<14} {:<12} {}", "Date", "Amount", "Description"));
    }
    lines.push(RULE.to_string());

    for txn in txns {
        let amount = format_amount(txn.amount);
        if details {
            let class = categorize(txn);
            lines.push(format!(
                "{:<14} {:<12} {:<24} {:<20} {}",
                txn.date,
                amount,
                format!("{} ({})", class.category, class.rule),
                truncate(&merchant_key(txn).key, 20),
                txn.description
            ));
        } else {
            lines.push(format!("{:<14} {:<12} {}", txn.date, amount, txn.description));
        }
    }
    lines.join("\n")
}

pub fn render_summary(label: &str, s: &Summary) -> String {
    [
        format!("\n{label}:"),
        format!("Total transactions: {}", s.total_transactions),
        format!("Debits: {} ({})", s.total_debits, format_amount(s.debit_amount)),
        format!("Credits: {} ({})", s.total_credits, format_amount(s.credit_amount)),
        format!("Net amount: {}", format_amount(s.total_amount)),
    ]
    .join("\n")
}

/// Ranked merchant table; with `details`, each group's transactions follow its row
pub fn render_merchants(report: &MerchantReport<'_>, top: usize, details: bool) -> String {
    let mut lines = vec![
        format!("{:<30} {:>8} {:>14} {:>14}", "Merchant", "Count", "Total", "Avg/Trans"),
        RULE.to_string(),
    ];
    for group in report.top(top) {
        lines.push(format!(
            "{:<30} {:>8} {:>14} {:>14}",
            truncate(&group.key, 30),
            group.count,
            format_amount(group.total),
            format_amount(group.average())
        ));
        if details {
            for txn in &group.transactions {
                lines.push(format!(
                    "    {:<14} {:>12}  {}",
                    txn.date,
                    format_amount(txn.amount),
                    txn.description
                ));
            }
        }
    }
    let hidden = report.len().saturating_sub(top);
    if hidden > 0 {
        lines.push(format!("... {hidden} more (raise --top to see them)"));
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
