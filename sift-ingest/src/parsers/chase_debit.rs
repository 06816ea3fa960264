//! Chase Debit (Checking) statements (text)
//!
//! Expected extracted-text section:
//!   TRANSACTION DETAIL
//!          DATE        DESCRIPTION                                     AMOUNT     BALANCE
//!          04/22       Discover     E-Payment 8148   Web ID: ...       -15.00      53.70
//!
//! Rows are MM/DD; the year comes from the "<Month D, YYYY> through ..." line.
//! The header repeats as "TRANSACTION DETAIL (continued)" on later pages.

use crate::error::Result;
use crate::grammar::{DateToken, LineGrammar, Polarity};
use crate::parsers::Layout;
use crate::section::SectionGrammar;

pub fn detect(text: &str) -> bool {
    text.contains("TRANSACTION DETAIL") && text.to_uppercase().contains("CHASE")
}

pub fn layout() -> Result<Layout> {
    let sections = SectionGrammar::new()
        .header("transaction-detail", "TRANSACTION DETAIL")?
        .stop("Ending Balance")?;

    // DATE DESCRIPTION AMOUNT BALANCE
    let row = LineGrammar::new(
        concat!(
            r"^(?P<date>\d{2}/\d{2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>-?[\d,]+\.\d+)\s+",
            r"(?P<balance>-?[\d,]+\.\d{2})$"
        ),
        DateToken::MonthSlashDay,
    )?;

    Ok(Layout::new(sections).rule("transaction-detail", Polarity::AsPrinted, row))
}
