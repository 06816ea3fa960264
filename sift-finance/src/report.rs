//! Aggregate views over extracted transactions: debit/credit summary,
//! category breakdown and the serializable analysis document.

use rust_decimal::Decimal;
use serde::Serialize;
use sift_core::{Category, Transaction};
use sift_ingest::{Extraction, Notice, StatementFormat};
use std::collections::BTreeMap;

use crate::category_rules::categorize;
use crate::merchant::{MerchantGroup, MerchantGrouper, MerchantReport};

/// Debit/credit totals for a transaction list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_transactions: usize,
    /// Net of all amounts
    pub total_amount: Decimal,
    pub total_debits: usize,
    pub total_credits: usize,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
}

impl Summary {
    pub fn of<'a, I>(txns: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut s = Summary::default();
        for txn in txns {
            s.total_transactions += 1;
            s.total_amount += txn.amount;
            if txn.is_debit() {
                s.total_debits += 1;
                s.debit_amount += txn.amount;
            } else if txn.is_credit() {
                s.total_credits += 1;
                s.credit_amount += txn.amount;
            }
        }
        s
    }

    /// Fold another summary into this one (combined multi-file totals)
    pub fn merge(&mut self, other: &Summary) {
        self.total_transactions += other.total_transactions;
        self.total_amount += other.total_amount;
        self.total_debits += other.total_debits;
        self.total_credits += other.total_credits;
        self.debit_amount += other.debit_amount;
        self.credit_amount += other.credit_amount;
    }
}

/// Transactions bucketed by category, each bucket in input order
#[derive(Debug, Clone, Default)]
pub struct CategoryBreakdown<'a> {
    buckets: BTreeMap<Category, Vec<&'a Transaction>>,
}

impl<'a> CategoryBreakdown<'a> {
    pub fn build<I>(txns: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut buckets: BTreeMap<Category, Vec<&'a Transaction>> = BTreeMap::new();
        for txn in txns {
            buckets.entry(categorize(txn).category).or_default().push(txn);
        }
        Self { buckets }
    }

    pub fn get(&self, category: Category) -> &[&'a Transaction] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, category: Category) -> usize {
        self.get(category).len()
    }

    pub fn total(&self, category: Category) -> Decimal {
        self.get(category).iter().map(|t| t.amount).sum()
    }

    /// Sum of every category total
    pub fn grand_total(&self) -> Decimal {
        self.buckets.values().flatten().map(|t| t.amount).sum()
    }

    /// Non-empty categories in taxonomy order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a Transaction])> {
        self.buckets.iter().map(|(c, txns)| (*c, txns.as_slice()))
    }

    /// Merchant groups inside one category
    pub fn merchants(&self, category: Category) -> MerchantReport<'a> {
        MerchantGrouper::group(self.get(category).iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub merchant: String,
    pub count: usize,
    pub total: Decimal,
    pub average: Decimal,
}

impl From<&MerchantGroup<'_>> for GroupSummary {
    fn from(group: &MerchantGroup<'_>) -> Self {
        Self {
            merchant: group.key.clone(),
            count: group.count,
            total: group.total,
            average: group.average(),
        }
    }
}

/// JSON-facing analysis of one extraction
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDocument<'a> {
    pub format: Option<StatementFormat>,
    pub transactions: &'a [Transaction],
    pub summary: Summary,
    pub categories: BTreeMap<Category, CategoryTotals>,
    /// Ranked by descending absolute total
    pub merchants: Vec<GroupSummary>,
    pub dropped_lines: usize,
    pub duplicates_removed: usize,
    pub notices: &'a [Notice],
}

impl<'a> AnalysisDocument<'a> {
    pub fn new(extraction: &'a Extraction) -> Self {
        let txns = &extraction.transactions;
        let breakdown = CategoryBreakdown::build(txns);
        let categories = breakdown
            .iter()
            .map(|(c, bucket)| {
                let totals = CategoryTotals {
                    count: bucket.len(),
                    total: bucket.iter().map(|t| t.amount).sum(),
                };
                (c, totals)
            })
            .collect();
        let merchants = MerchantGrouper::group(txns)
            .ranked()
            .into_iter()
            .map(GroupSummary::from)
            .collect();

        Self {
            format: extraction.format,
            transactions: txns,
            summary: Summary::of(txns),
            categories,
            merchants,
            dropped_lines: extraction.dropped_lines,
            duplicates_removed: extraction.duplicates_removed,
            notices: &extraction.notices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sift_core::TxnType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn txn(amount: &str, description: &str) -> Transaction {
        Transaction::new(
            "12/02/2024",
            NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(),
            dec(amount),
            description,
            "",
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("2500.00", "PAYROLL ACME INC"),
            txn("-45.67", "WALMART #123"),
            txn("-18.20", "LYFT *1RIDE12-29"),
            txn("-300.00", "Check #1001"),
            txn("1000.00", "Paper Deposit Ref:1").with_kind(TxnType::Deposit),
            txn("0.00", "ADJUSTMENT"),
        ]
    }

    #[test]
    fn test_summary() {
        let txns = sample();
        let s = Summary::of(&txns);
        assert_eq!(s.total_transactions, 6);
        assert_eq!(s.total_debits, 3);
        assert_eq!(s.total_credits, 2);
        assert_eq!(s.debit_amount, dec("-363.87"));
        assert_eq!(s.credit_amount, dec("3500.00"));
        assert_eq!(s.total_amount, dec("3136.13"));
    }

    #[test]
    fn test_summary_merge() {
        let txns = sample();
        let (a, b) = txns.split_at(2);
        let mut merged = Summary::of(a);
        merged.merge(&Summary::of(b));
        assert_eq!(merged, Summary::of(&txns));
    }

    #[test]
    fn test_breakdown_buckets_and_conserves_totals() {
        let txns = sample();
        let breakdown = CategoryBreakdown::build(&txns);

        assert_eq!(breakdown.count(Category::Deposits), 1);
        assert_eq!(breakdown.count(Category::PaperDeposits), 1);
        assert_eq!(breakdown.count(Category::Checks), 1);
        assert_eq!(breakdown.count(Category::ElectronicWithdrawals), 2);
        assert_eq!(breakdown.count(Category::FeesAndServices), 1);
        assert_eq!(breakdown.count(Category::Transfers), 0);
        assert!(breakdown.get(Category::Transfers).is_empty());

        let per_category: Decimal = Category::ALL.iter().map(|c| breakdown.total(*c)).sum();
        let direct: Decimal = txns.iter().map(|t| t.amount).sum();
        assert_eq!(per_category, direct);
        assert_eq!(breakdown.grand_total(), direct);
        let counted: usize = breakdown.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(counted, txns.len());
    }

    #[test]
    fn test_breakdown_iterates_in_taxonomy_order() {
        let txns = sample();
        let breakdown = CategoryBreakdown::build(&txns);
        let order: Vec<_> = breakdown.iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![
                Category::Deposits,
                Category::PaperDeposits,
                Category::Checks,
                Category::ElectronicWithdrawals,
                Category::FeesAndServices,
            ]
        );
    }

    #[test]
    fn test_merchants_within_category() {
        let txns = sample();
        let breakdown = CategoryBreakdown::build(&txns);
        let merchants = breakdown.merchants(Category::ElectronicWithdrawals);
        let keys: Vec<_> = merchants.ranked().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["WALMART", "LYFT"]);
    }

    #[test]
    fn test_analysis_document_json_shape() {
        let extraction = Extraction {
            transactions: sample(),
            ..Extraction::for_format(StatementFormat::Prosperity)
        };
        let doc = AnalysisDocument::new(&extraction);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["format"], "prosperity");
        assert_eq!(json["summary"]["total_transactions"], 6);
        assert_eq!(json["categories"]["checks"]["count"], 1);
        assert_eq!(json["merchants"][0]["merchant"], "PAYROLL");
        assert_eq!(json["transactions"].as_array().unwrap().len(), 6);
        assert_eq!(json["transactions"][4]["type"], "deposit");
        assert!(json["transactions"][0].get("type").is_none());
    }

    #[test]
    fn test_analysis_of_unsupported_document() {
        let extraction = Extraction::unsupported();
        let doc = AnalysisDocument::new(&extraction);
        assert_eq!(doc.format, None);
        assert_eq!(doc.summary, Summary::default());
        assert!(doc.merchants.is_empty());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["notices"][0]["kind"], "unknown_format");
    }
}
