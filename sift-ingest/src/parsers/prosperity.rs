//! Prosperity Bank statements (text)
//!
//! Deposits and debits repeat their headers on every page:
//!   DEPOSITS/OTHER CREDITS
//!   Date Description Amount
//!   12/01/2024 PAYROLL ACME INC 2,500.00
//!   OTHER DEBITS
//!   Date Description Amount
//!   12/02/2024 WALMART #123 -45.67

use crate::error::Result;
use crate::grammar::{DateToken, LineGrammar, Polarity};
use crate::parsers::Layout;
use crate::section::SectionGrammar;

const ROW: &str = r"^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.*?)\s+(?P<amount>\$?-?[\d,]+\.\d+)$";

pub fn detect(text: &str) -> bool {
    text.contains("STATEMENT SUMMARY") && text.contains("DEPOSITS/OTHER CREDITS")
}

pub fn layout() -> Result<Layout> {
    let sections = SectionGrammar::new()
        .header("deposits", "DEPOSITS/OTHER CREDITS Date Description Amount")?
        .header("debits", "OTHER DEBITS Date Description Amount")?
        .stop("DEPOSITS/OTHER CREDITS")?
        .stop("OTHER DEBITS")?
        .stop("CHECKS")?
        .stop("SERVICE CHARGE SUMMARY")?;

    Ok(Layout::new(sections)
        .rule("deposits", Polarity::Credit, LineGrammar::new(ROW, DateToken::FullNumeric)?)
        .rule("debits", Polarity::Debit, LineGrammar::new(ROW, DateToken::FullNumeric)?))
}
