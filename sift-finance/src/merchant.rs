//! Merchant grouping: buckets transactions under a normalized merchant key
//! and ranks the buckets by absolute total.

use rust_decimal::Decimal;
use sift_core::{Transaction, TxnType};
use std::collections::HashMap;

/// Which rule of the key chain produced a merchant key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// A known merchant family (ride share, fuel brand, ...)
    Family,
    /// Text before the first `*` of a card-processor description
    CardDelimiter,
    /// Label derived from the grammar-assigned type
    TypeLabel,
    /// First whitespace-delimited token of the description
    FirstWord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantKey {
    pub key: String,
    pub source: KeySource,
}

struct Family {
    label: &'static str,
    markers: &'static [&'static str],
}

/// Known families, checked in order against the lower-cased description
const FAMILIES: [Family; 5] = [
    Family { label: "Uber", markers: &["uber", "ubr*"] },
    Family { label: "Shell", markers: &["shell oil", "shell service"] },
    Family { label: "Government", markers: &[".gov"] },
    Family { label: "Bank Fees", markers: &["fee-", "servicecharge", "service charge"] },
    Family { label: "Checks", markers: &["check #"] },
];

type KeyRule = fn(&Transaction) -> Option<String>;

/// The key chain; the first rule that yields a key wins
const KEY_CHAIN: [(KeySource, KeyRule); 4] = [
    (KeySource::Family, family_key),
    (KeySource::CardDelimiter, card_delimiter_key),
    (KeySource::TypeLabel, type_label_key),
    (KeySource::FirstWord, first_word_key),
];

fn family_key(txn: &Transaction) -> Option<String> {
    let lower = txn.description.to_lowercase();
    FAMILIES
        .iter()
        .find(|f| f.markers.iter().any(|m| lower.contains(m)))
        .map(|f| f.label.to_string())
}

fn card_delimiter_key(txn: &Transaction) -> Option<String> {
    let (head, _) = txn.description.split_once('*')?;
    Some(head.trim().to_string())
}

fn type_label_key(txn: &Transaction) -> Option<String> {
    let label = match txn.kind? {
        TxnType::Deposit => "Paper Deposits".to_string(),
        TxnType::Transfer => "Transfers".to_string(),
        TxnType::WireTransfer => "Wire Transfer".to_string(),
        TxnType::Zelle => "Zelle".to_string(),
        TxnType::LenderPayment(lender) => format!("{} Payment", lender.name()),
        TxnType::Fee(_) => "Fees".to_string(),
        TxnType::OtherWithdrawal => return None,
    };
    Some(label)
}

fn first_word_key(txn: &Transaction) -> Option<String> {
    let key = txn
        .description
        .split_whitespace()
        .next()
        .unwrap_or(txn.description.as_str());
    Some(key.to_string())
}

/// Derive the merchant key for a transaction. Deterministic and total.
pub fn merchant_key(txn: &Transaction) -> MerchantKey {
    for (source, rule) in KEY_CHAIN {
        if let Some(key) = rule(txn) {
            return MerchantKey { key, source };
        }
    }
    // first_word_key always yields
    MerchantKey {
        key: txn.description.clone(),
        source: KeySource::FirstWord,
    }
}

/// One merchant bucket
#[derive(Debug, Clone)]
pub struct MerchantGroup<'a> {
    pub key: String,
    pub count: usize,
    pub total: Decimal,
    pub transactions: Vec<&'a Transaction>,
}

impl MerchantGroup<'_> {
    pub fn average(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        (self.total / Decimal::from(self.count)).round_dp(2)
    }
}

/// Merchant buckets in first-seen order
#[derive(Debug, Clone, Default)]
pub struct MerchantReport<'a> {
    groups: Vec<MerchantGroup<'a>>,
}

impl<'a> MerchantReport<'a> {
    pub fn groups(&self) -> &[MerchantGroup<'a>] {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&MerchantGroup<'a>> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum over all groups; equals the sum of the grouped transactions.
    pub fn total(&self) -> Decimal {
        self.groups.iter().map(|g| g.total).sum()
    }

    /// Groups by descending absolute total. Ties keep first-seen order.
    pub fn ranked(&self) -> Vec<&MerchantGroup<'a>> {
        let mut ranked: Vec<_> = self.groups.iter().collect();
        ranked.sort_by(|a, b| b.total.abs().cmp(&a.total.abs()));
        ranked
    }

    /// At most `n` highest-ranked groups
    pub fn top(&self, n: usize) -> Vec<&MerchantGroup<'a>> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Groups transactions by merchant key
pub struct MerchantGrouper;

impl MerchantGrouper {
    pub fn group<'a, I>(txns: I) -> MerchantReport<'a>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<MerchantGroup<'a>> = Vec::new();

        for txn in txns {
            let MerchantKey { key, .. } = merchant_key(txn);
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(MerchantGroup {
                    key,
                    count: 0,
                    total: Decimal::ZERO,
                    transactions: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.count += 1;
            group.total += txn.amount;
            group.transactions.push(txn);
        }

        MerchantReport { groups }
    }
}
