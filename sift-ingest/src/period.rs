//! Statement period detection and year inference.
//!
//! Most layouts print only month and day on transaction rows. The year comes
//! from the statement-period header, e.g.
//!   "April 1, 2024 to April 30, 2024"
//!   "December 14, 2023 through January 12, 2024"
//!   "Jul 18, 2024 - Aug 17, 2024"

use chrono::{Datelike, Local};
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Month number for a month name or abbreviation ("Jul", "july", "APR")
pub fn parse_month(name: &str) -> Option<u32> {
    let key: String = name.trim().chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPeriod {
    pub start_year: i32,
    pub start_month: Option<u32>,
    pub end_year: i32,
    pub end_month: Option<u32>,
}

/// Year resolver for month/day date tokens of one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementYear {
    period: Option<StatementPeriod>,
    fallback: i32,
}

impl StatementYear {
    pub fn new(period: Option<StatementPeriod>, fallback: i32) -> Self {
        Self { period, fallback }
    }

    /// Fixed year, no period information
    pub fn fixed(year: i32) -> Self {
        Self::new(None, year)
    }

    pub fn period(&self) -> Option<StatementPeriod> {
        self.period
    }

    /// Year for a row dated in `month`.
    ///
    /// Uses the period's start year. A period spanning a new year assigns
    /// months before the start month to the end year.
    pub fn year_for(&self, month: u32) -> i32 {
        match self.period {
            Some(p) => {
                let wraps = p.end_year > p.start_year;
                if wraps && p.start_month.is_some_and(|start| month < start) {
                    p.end_year
                } else {
                    p.start_year
                }
            }
            None => self.fallback,
        }
    }
}

/// Finds the statement-period header in a document
#[derive(Debug, Clone)]
pub struct PeriodScanner {
    re: Regex,
}

impl PeriodScanner {
    pub fn new() -> Result<Self> {
        let re = Regex::new(concat!(
            r"(?P<sm>[A-Za-z]+)\s*(?P<sd>\d{1,2})\s*,\s*(?P<sy>\d{4})\s*",
            r"(?:to|through|-|–)\s*",
            r"(?P<em>[A-Za-z]+)\s*(?P<ed>\d{1,2})\s*,\s*(?P<ey>\d{4})"
        ))?;
        Ok(Self { re })
    }

    /// First statement period in `text`, if any
    pub fn find(&self, text: &str) -> Option<StatementPeriod> {
        let caps = self.re.captures(text)?;
        let start_year: i32 = caps["sy"].parse().ok()?;
        let end_year: i32 = caps["ey"].parse().ok()?;
        Some(StatementPeriod {
            start_year,
            start_month: parse_month(&caps["sm"]),
            end_year,
            end_month: parse_month(&caps["em"]),
        })
    }

    /// Year resolver for `text`; `fallback` defaults to the current calendar year.
    pub fn scan(&self, text: &str, fallback: Option<i32>) -> StatementYear {
        let fallback = fallback.unwrap_or_else(|| Local::now().year());
        let period = self.find(text);
        match period {
            Some(p) => debug!(start_year = p.start_year, end_year = p.end_year, "Statement period found"),
            None => debug!(year = fallback, "No statement period, using fallback year"),
        }
        StatementYear::new(period, fallback)
    }
}
