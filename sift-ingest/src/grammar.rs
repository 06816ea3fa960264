//! Line grammars: one section line in, one transaction (or nothing) out.
//!
//! A grammar is a regex with named groups plus a few plain functions:
//!   `date`    date token (see [`DateToken`])
//!   `amount`  amount token, validated by [`sift_core::parse_amount`]
//!   `sign`    optional detached minus sign ("- $14.05")
//!   `desc`    description, unless the grammar supplies its own builder

use chrono::NaiveDate;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use sift_core::{Transaction, TxnType, parse_amount};

use crate::error::Result;
use crate::period::{StatementYear, parse_month};

/// How a section's printed amounts map onto signed amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Deposit/credit section: always positive
    Credit,
    /// Debit/withdrawal section: always negative
    Debit,
    /// Keep the sign as printed (after the format's sign convention)
    AsPrinted,
}

impl Polarity {
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            Polarity::Credit => amount.abs(),
            Polarity::Debit => -amount.abs(),
            Polarity::AsPrinted => amount,
        }
    }
}

/// What a printed sign means for a format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// `-` marks a debit
    Literal,
    /// Card statements: charges print positive, payments/credits negative
    Inverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    /// "Apr10" or "Apr 10", rendered "Apr 10, 2024" with the printed day
    MonthNameDay,
    /// "04/22", rendered "04/22/2024"
    MonthSlashDay,
    /// "12/02/2024", kept as printed
    FullNumeric,
}

impl DateToken {
    /// Resolve a token to `(rendered, calendar date)`
    pub fn resolve(self, token: &str, year: &StatementYear) -> Option<(String, NaiveDate)> {
        let token = token.trim();
        match self {
            DateToken::MonthNameDay => {
                let split = token.find(|c: char| c.is_ascii_digit())?;
                let month = parse_month(&token[..split])?;
                let day_token = token[split..].trim();
                let day: u32 = day_token.parse().ok()?;
                let year = year.year_for(month);
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                let rendered = format!("{} {}, {}", date.format("%b"), day_token, year);
                Some((rendered, date))
            }
            DateToken::MonthSlashDay => {
                let (m, d) = token.split_once('/')?;
                let month: u32 = m.parse().ok()?;
                let day: u32 = d.parse().ok()?;
                let date = NaiveDate::from_ymd_opt(year.year_for(month), month, day)?;
                Some((date.format("%m/%d/%Y").to_string(), date))
            }
            DateToken::FullNumeric => {
                let date = NaiveDate::parse_from_str(token, "%m/%d/%Y").ok()?;
                Some((date.format("%m/%d/%Y").to_string(), date))
            }
        }
    }
}

/// Result of running a grammar over one line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(Transaction),
    /// Matched, but the grammar deliberately leaves it to another section
    Skipped,
    Unparseable,
}

fn plain_description(caps: &Captures) -> String {
    caps.name("desc").map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

fn no_tag(_: &Captures) -> Option<TxnType> {
    None
}

fn never(_: &Captures) -> bool {
    false
}

#[derive(Debug, Clone)]
pub struct LineGrammar {
    pattern: Regex,
    date: DateToken,
    sign: SignConvention,
    describe: fn(&Captures) -> String,
    tag: fn(&Captures) -> Option<TxnType>,
    skip: fn(&Captures) -> bool,
}

impl LineGrammar {
    pub fn new(pattern: &str, date: DateToken) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            date,
            sign: SignConvention::Literal,
            describe: plain_description,
            tag: no_tag,
            skip: never,
        })
    }

    pub fn sign(mut self, sign: SignConvention) -> Self {
        self.sign = sign;
        self
    }

    pub fn describe(mut self, f: fn(&Captures) -> String) -> Self {
        self.describe = f;
        self
    }

    pub fn tag(mut self, f: fn(&Captures) -> Option<TxnType>) -> Self {
        self.tag = f;
        self
    }

    pub fn skip_when(mut self, f: fn(&Captures) -> bool) -> Self {
        self.skip = f;
        self
    }

    pub fn parse(&self, line: &str, polarity: Polarity, year: &StatementYear) -> LineOutcome {
        let line = line.trim();
        let Some(caps) = self.pattern.captures(line) else {
            return LineOutcome::Unparseable;
        };
        if (self.skip)(&caps) {
            return LineOutcome::Skipped;
        }

        let Some((date, posted_on)) = caps
            .name("date")
            .and_then(|m| self.date.resolve(m.as_str(), year))
        else {
            return LineOutcome::Unparseable;
        };
        let Some(mut amount) = caps.name("amount").and_then(|m| parse_amount(m.as_str())) else {
            return LineOutcome::Unparseable;
        };

        if caps.name("sign").is_some() {
            amount = -amount;
        }
        if self.sign == SignConvention::Inverted {
            amount = -amount;
        }
        let amount = polarity.apply(amount);

        let mut txn = Transaction::new(date, posted_on, amount, (self.describe)(&caps), line);
        if let Some(kind) = (self.tag)(&caps) {
            txn = txn.with_kind(kind);
        }
        LineOutcome::Parsed(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn full_date_grammar() -> LineGrammar {
        LineGrammar::new(
            r"^(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>.*?)\s+(?P<amount>\$?-?[\d,]+\.\d+)$",
            DateToken::FullNumeric,
        )
        .unwrap()
    }

    fn parsed(outcome: LineOutcome) -> Transaction {
        match outcome {
            LineOutcome::Parsed(txn) => txn,
            other => panic!("expected a transaction, got {other:?}"),
        }
    }

    #[test]
    fn test_debit_section_forces_negative() {
        let g = full_date_grammar();
        let year = StatementYear::fixed(2024);
        let printed_negative = parsed(g.parse("12/02/2024 WALMART #123 -45.67", Polarity::Debit, &year));
        let printed_positive = parsed(g.parse("12/02/2024 WALMART #123 45.67", Polarity::Debit, &year));
        assert_eq!(printed_negative.amount, dec("-45.67"));
        assert_eq!(printed_positive.amount, dec("-45.67"));
        assert_eq!(printed_negative.description, "WALMART #123");
        assert_eq!(printed_negative.date, "12/02/2024");
    }

    #[test]
    fn test_credit_section_forces_positive() {
        let g = full_date_grammar();
        let year = StatementYear::fixed(2024);
        let txn = parsed(g.parse("11/29/2024 REFUND -12.00", Polarity::Credit, &year));
        assert_eq!(txn.amount, dec("12.00"));
    }

    #[test]
    fn test_as_printed_keeps_literal_sign() {
        let g = full_date_grammar();
        let year = StatementYear::fixed(2024);
        let txn = parsed(g.parse("11/29/2024 ADJUSTMENT -3.10", Polarity::AsPrinted, &year));
        assert_eq!(txn.amount, dec("-3.10"));
        assert_eq!(txn.raw_line, "11/29/2024 ADJUSTMENT -3.10");
    }

    #[test]
    fn test_bad_precision_is_unparseable() {
        let g = full_date_grammar();
        let year = StatementYear::fixed(2024);
        assert_eq!(g.parse("11/29/2024 THING 3.105", Polarity::AsPrinted, &year), LineOutcome::Unparseable);
        assert_eq!(g.parse("Date Description Amount", Polarity::AsPrinted, &year), LineOutcome::Unparseable);
        assert_eq!(g.parse("02/30/2024 BAD DATE 1.00", Polarity::AsPrinted, &year), LineOutcome::Unparseable);
    }

    #[test]
    fn test_month_name_day_tokens() {
        let year = StatementYear::fixed(2024);
        let (rendered, date) = DateToken::MonthNameDay.resolve("Apr10", &year).unwrap();
        assert_eq!(rendered, "Apr 10, 2024");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
        let (rendered, _) = DateToken::MonthNameDay.resolve("Jul 5", &year).unwrap();
        assert_eq!(rendered, "Jul 5, 2024");
        let (rendered, date) = DateToken::MonthNameDay.resolve("Apr05", &year).unwrap();
        assert_eq!(rendered, "Apr 05, 2024");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
        assert!(DateToken::MonthNameDay.resolve("Xyz10", &year).is_none());
    }

    #[test]
    fn test_month_slash_day_gets_statement_year() {
        let year = StatementYear::fixed(2026);
        let (rendered, date) = DateToken::MonthSlashDay.resolve("04/22", &year).unwrap();
        assert_eq!(rendered, "04/22/2026");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 4, 22).unwrap());
    }

    #[test]
    fn test_detached_sign_and_inverted_convention() {
        let g = LineGrammar::new(
            r"^(?P<date>[A-Za-z]{3}\s+\d{1,2})\s+(?P<desc>.+?)\s+(?P<sign>-)?\s*(?P<amount>\$[\d,]+\.\d{2})$",
            DateToken::MonthNameDay,
        )
        .unwrap()
        .sign(SignConvention::Inverted);
        let year = StatementYear::fixed(2024);
        let charge = parsed(g.parse("Jul 20 H-E-B #455 $5.82", Polarity::AsPrinted, &year));
        let payment = parsed(g.parse("Jul 28 PAYMENT THANK YOU - $14.05", Polarity::AsPrinted, &year));
        assert_eq!(charge.amount, dec("-5.82"));
        assert_eq!(payment.amount, dec("14.05"));
    }

    #[test]
    fn test_skip_and_tag_hooks() {
        let g = full_date_grammar()
            .skip_when(|caps| caps["desc"].contains("IGNORE"))
            .tag(|_| Some(TxnType::Zelle));
        let year = StatementYear::fixed(2024);
        assert_eq!(g.parse("01/02/2024 IGNORE ME 1.00", Polarity::Debit, &year), LineOutcome::Skipped);
        let txn = parsed(g.parse("01/02/2024 PAY JOHN 1.00", Polarity::Debit, &year));
        assert_eq!(txn.kind, Some(TxnType::Zelle));
    }
}
