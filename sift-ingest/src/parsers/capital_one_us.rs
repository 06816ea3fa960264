//! Capital One US credit card statements (text)
//!
//! Expected text rows after PDF-to-text:
//!   Trans Date     Post Date      Description                                         Amount
//!   Jul 20         Jul 22         H-E-B #455SAN MARCOSTX                                $5.82
//!   Jul 28         Jul 29         WALMART.COMWALMART.COMAR                            - $14.05
//!
//! Charges print positive and payments/credits carry a detached "- ", so the
//! sign convention is inverted relative to checking statements.

use crate::error::Result;
use crate::grammar::{DateToken, LineGrammar, Polarity, SignConvention};
use crate::parsers::Layout;
use crate::section::SectionGrammar;

pub fn detect(text: &str) -> bool {
    let compact: String = text.split_whitespace().collect();
    compact.contains("TransDatePostDateDescriptionAmount")
        && compact.to_uppercase().contains("CAPITALONE")
}

pub fn layout() -> Result<Layout> {
    let sections = SectionGrammar::new()
        .header("transactions", "Trans Date Post Date Description Amount")?
        .stop("Total Payments")?
        .stop("Total Transactions for This Period")?
        .stop("Total Fees for This Period")?
        .stop("Interest Charge Calculation")?;

    let row = LineGrammar::new(
        concat!(
            r"^(?P<date>[A-Za-z]{3}\s+\d{1,2})\s+",
            r"(?P<post>[A-Za-z]{3}\s+\d{1,2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<sign>-)?\s*(?P<amount>\$[\d,]+\.\d+)$"
        ),
        DateToken::MonthNameDay,
    )?
    .sign(SignConvention::Inverted);

    Ok(Layout::new(sections).rule("transactions", Polarity::AsPrinted, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{FormatParser, StatementFormat};
    use crate::period::PeriodScanner;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parses_basic_rows() {
        let text = r#"
Capital One
Jul 18, 2024 - Aug 17, 2024
Trans Date     Post Date      Description                                         Amount
Jul 20         Jul 22         H-E-B #455SAN MARCOSTX                                $5.82
Jul 28         Jul 29         WALMART.COMWALMART.COMAR                            - $14.05
Total Transactions for This Period                                                $5.82
"#;

        assert!(detect(text));
        let parser = FormatParser::new(StatementFormat::CapitalOneUs).unwrap();
        let year = PeriodScanner::new().unwrap().scan(text, None);
        let out = parser.parse(text, &year);
        assert_eq!(out.transactions.len(), 2);
        assert_eq!(out.transactions[0].amount, dec("-5.82"));
        assert_eq!(out.transactions[1].amount, dec("14.05"));
        assert_eq!(out.transactions[0].date, "Jul 20, 2024");
        assert!(out.transactions[0].description.contains("H-E-B"));
        assert_eq!(out.dropped_lines, 0);
    }

    #[test]
    fn test_statement_crossing_new_year() {
        let text = "Capital One\nDec 18, 2023 - Jan 17, 2024\n\
                    Trans Date Post Date Description Amount\n\
                    Dec 30 Dec 31 UBER *TRIP $23.10\n\
                    Jan 3 Jan 4 SHELL OIL 5744 $40.00\n";
        let parser = FormatParser::new(StatementFormat::CapitalOneUs).unwrap();
        let year = PeriodScanner::new().unwrap().scan(text, None);
        let out = parser.parse(text, &year);
        let dates: Vec<_> = out.transactions.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["Dec 30, 2023", "Jan 3, 2024"]);
    }
}
