//! Section extraction: slicing a statement into labeled regions.
//!
//! A section starts right after an occurrence of its header and runs to the
//! nearest boundary: any known header, any stop marker, a page break (when
//! enabled) or the end of text. Headers may repeat ("(continued)" on a later
//! page); every occurrence contributes, in document order.

use regex::Regex;

use crate::error::Result;
use crate::page::page_break_offsets;

/// A literal phrase matched with flexible whitespace between its words.
///
/// Rendered PDF text drops and inserts spaces unpredictably, so
/// `Electronic withdrawals this statement period` also matches
/// `Electronicwithdrawalsthisstatementperiod`.
#[derive(Debug, Clone)]
pub struct Marker {
    re: Regex,
}

impl Marker {
    pub fn new(phrase: &'static str) -> Result<Self> {
        let pattern = phrase
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s*");
        Ok(Self {
            re: Regex::new(&pattern)?,
        })
    }

    /// `(start, end)` byte ranges of every occurrence
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        self.re.find_iter(text).map(|m| (m.start(), m.end())).collect()
    }
}

/// The text gathered for one named section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub text: String,
    /// Number of header occurrences that contributed
    pub occurrences: usize,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.occurrences == 0
    }

    /// Trimmed, non-blank lines of the section
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// Header/stop grammar of one statement layout
#[derive(Debug, Clone)]
pub struct SectionGrammar {
    headers: Vec<(&'static str, Marker)>,
    stops: Vec<Marker>,
    stop_at_page_break: bool,
}

impl SectionGrammar {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            stops: Vec::new(),
            stop_at_page_break: true,
        }
    }

    pub fn header(mut self, name: &'static str, phrase: &'static str) -> Result<Self> {
        self.headers.push((name, Marker::new(phrase)?));
        Ok(self)
    }

    pub fn stop(mut self, phrase: &'static str) -> Result<Self> {
        self.stops.push(Marker::new(phrase)?);
        Ok(self)
    }

    /// Let sections run across page breaks (layouts that do not repeat headers)
    pub fn spanning_pages(mut self) -> Self {
        self.stop_at_page_break = false;
        self
    }

    pub fn section_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.headers.iter().map(|(name, _)| *name)
    }

    /// Sorted start offsets of everything that can end a section
    fn boundaries(&self, text: &str) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .headers
            .iter()
            .map(|(_, m)| m)
            .chain(self.stops.iter())
            .flat_map(|m| m.find_all(text).into_iter().map(|(start, _)| start))
            .collect();
        if self.stop_at_page_break {
            out.extend(page_break_offsets(text));
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Gather the named section. An unknown name or a header that never
    /// occurs yields an empty section.
    pub fn extract(&self, text: &str, name: &'static str) -> Section {
        let Some((_, marker)) = self.headers.iter().find(|(n, _)| *n == name) else {
            return Section {
                name,
                text: String::new(),
                occurrences: 0,
            };
        };

        let boundaries = self.boundaries(text);
        let mut parts = Vec::new();
        for (_, start) in marker.find_all(text) {
            let idx = boundaries.partition_point(|&b| b < start);
            let end = boundaries.get(idx).copied().unwrap_or(text.len());
            parts.push(&text[start..end]);
        }

        Section {
            name,
            occurrences: parts.len(),
            text: parts.join("\n"),
        }
    }
}

impl Default for SectionGrammar {
    fn default() -> Self {
        Self::new()
    }
}
