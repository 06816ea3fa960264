//! Bank-specific statement layouts.
//!
//! Each layout module exposes a pure `detect(text)` predicate and a
//! `layout()` constructor describing its sections and line grammars.
//! [`StatementFormat`] is the closed set of supported layouts; its
//! `PRIORITY` order is the detection order.

pub mod capital_one_us;
pub mod chase_debit;
pub mod comerica;
pub mod prosperity;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use sift_core::Transaction;

use crate::error::{Error, Notice, Result};
use crate::grammar::{LineGrammar, LineOutcome, Polarity};
use crate::page::PAGE_BREAK;
use crate::period::StatementYear;
use crate::section::SectionGrammar;
use crate::types::Extraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementFormat {
    Comerica,
    Prosperity,
    ChaseDebit,
    CapitalOneUs,
}

impl StatementFormat {
    /// Detection order. Predicates are not mutually exclusive in general,
    /// so the first match wins.
    pub const PRIORITY: [StatementFormat; 4] = [
        StatementFormat::Comerica,
        StatementFormat::Prosperity,
        StatementFormat::ChaseDebit,
        StatementFormat::CapitalOneUs,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StatementFormat::Comerica => "comerica",
            StatementFormat::Prosperity => "prosperity",
            StatementFormat::ChaseDebit => "chase-debit",
            StatementFormat::CapitalOneUs => "capital-one-us",
        }
    }

    pub fn bank_name(&self) -> &'static str {
        match self {
            StatementFormat::Comerica => "Comerica Basic Business Checking",
            StatementFormat::Prosperity => "Prosperity Bank",
            StatementFormat::ChaseDebit => "Chase Checking",
            StatementFormat::CapitalOneUs => "Capital One (US) Credit Card",
        }
    }

    pub fn detect(&self, text: &str) -> bool {
        match self {
            StatementFormat::Comerica => comerica::detect(text),
            StatementFormat::Prosperity => prosperity::detect(text),
            StatementFormat::ChaseDebit => chase_debit::detect(text),
            StatementFormat::CapitalOneUs => capital_one_us::detect(text),
        }
    }

    pub fn layout(&self) -> Result<Layout> {
        match self {
            StatementFormat::Comerica => comerica::layout(),
            StatementFormat::Prosperity => prosperity::layout(),
            StatementFormat::ChaseDebit => chase_debit::layout(),
            StatementFormat::CapitalOneUs => capital_one_us::layout(),
        }
    }
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StatementFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StatementFormat::PRIORITY
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| Error::UnknownFormatId(s.to_string()))
    }
}

/// One section's sign rule and line grammar
#[derive(Debug, Clone)]
pub struct SectionRule {
    pub name: &'static str,
    pub polarity: Polarity,
    pub line: LineGrammar,
}

/// Sections plus the grammar for each of them, in extraction order
#[derive(Debug, Clone)]
pub struct Layout {
    sections: SectionGrammar,
    rules: Vec<SectionRule>,
}

impl Layout {
    pub fn new(sections: SectionGrammar) -> Self {
        Self {
            sections,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, name: &'static str, polarity: Polarity, line: LineGrammar) -> Self {
        self.rules.push(SectionRule {
            name,
            polarity,
            line,
        });
        self
    }

    pub fn rules(&self) -> &[SectionRule] {
        &self.rules
    }
}

/// A statement format bound to its compiled layout
#[derive(Debug, Clone)]
pub struct FormatParser {
    format: StatementFormat,
    layout: Layout,
}

impl FormatParser {
    pub fn new(format: StatementFormat) -> Result<Self> {
        Ok(Self {
            format,
            layout: format.layout()?,
        })
    }

    pub fn format(&self) -> StatementFormat {
        self.format
    }

    pub fn detect(&self, text: &str) -> bool {
        self.format.detect(text)
    }

    /// Run every section grammar over `text`.
    ///
    /// Returns raw transactions in section order; de-duplication and sorting
    /// happen in [`crate::pipeline::finalize`].
    pub fn parse(&self, text: &str, year: &StatementYear) -> Extraction {
        let mut out = Extraction::for_format(self.format);

        for rule in &self.layout.rules {
            let section = self.layout.sections.extract(text, rule.name);
            if section.is_empty() {
                debug!(format = %self.format, section = rule.name, "Section header not found");
                out.notices.push(Notice::EmptySection { section: rule.name });
                continue;
            }

            let before = out.transactions.len();
            for line in section.lines() {
                if line == PAGE_BREAK {
                    continue;
                }
                match rule.line.parse(line, rule.polarity, year) {
                    LineOutcome::Parsed(txn) => out.transactions.push(txn),
                    LineOutcome::Skipped => {}
                    LineOutcome::Unparseable => {
                        out.dropped_lines += 1;
                        out.notices.push(Notice::UnparseableLine {
                            section: rule.name,
                            line: line.to_string(),
                        });
                    }
                }
            }
            debug!(
                format = %self.format,
                section = rule.name,
                occurrences = section.occurrences,
                parsed = out.transactions.len() - before,
                "Section processed"
            );
        }

        out
    }

    /// Parse one section of `text` without de-duplication (diagnostics, tests)
    pub fn parse_section(&self, text: &str, name: &str, year: &StatementYear) -> Vec<Transaction> {
        let Some(rule) = self.layout.rules.iter().find(|r| r.name == name) else {
            return Vec::new();
        };
        self.layout
            .sections
            .extract(text, rule.name)
            .lines()
            .filter_map(|line| match rule.line.parse(line, rule.polarity, year) {
                LineOutcome::Parsed(txn) => Some(txn),
                _ => None,
            })
            .collect()
    }
}
