//! Deterministic category rules mapping statement transactions to the
//! activity taxonomy.
//!
//! Rules are an ordered table evaluated top to bottom; the first match wins.
//! Priority: grammar-assigned type > description keywords > amount sign.
//! Reordering the table changes classification outcomes.

use rust_decimal::Decimal;
use sift_core::{Category, Transaction, TxnType};
use tracing::warn;

/// Result of categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Name of the rule that fired
    pub rule: &'static str,
}

/// A transaction plus its lower-cased description
pub struct Subject<'a> {
    pub txn: &'a Transaction,
    pub description: String,
}

impl<'a> Subject<'a> {
    pub fn new(txn: &'a Transaction) -> Self {
        Self {
            txn,
            description: txn.description.to_lowercase(),
        }
    }

    fn untyped(&self) -> bool {
        self.txn.kind.is_none()
    }

    /// Plain substring test; rendered statement text often drops the spaces
    /// between words ("ONLINETRANSFER", "MONTHLYFEE")
    fn mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.description.contains(k))
    }
}

pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Subject) -> bool,
    pub category: Category,
}

/// The classification table, in precedence order
pub static RULES: [Rule; 12] = [
    // --- Grammar-assigned types (highest priority) ---
    Rule { name: "type-deposit", matches: is_type_deposit, category: Category::PaperDeposits },
    Rule { name: "type-transfer", matches: is_type_transfer, category: Category::Transfers },
    Rule { name: "type-electronic", matches: is_type_electronic, category: Category::ElectronicWithdrawals },
    Rule { name: "type-fee", matches: is_type_fee, category: Category::FeesAndServices },
    // --- Description keywords (untyped transactions only) ---
    Rule { name: "desc-paper-deposit", matches: mentions_paper_deposit, category: Category::PaperDeposits },
    Rule { name: "desc-transfer", matches: mentions_transfer, category: Category::Transfers },
    Rule { name: "desc-check", matches: mentions_check, category: Category::Checks },
    Rule { name: "desc-card", matches: mentions_card, category: Category::AtmDebitCard },
    Rule { name: "desc-fee", matches: mentions_fee, category: Category::FeesAndServices },
    // --- Amount sign ---
    Rule { name: "sign-credit", matches: is_credit, category: Category::Deposits },
    Rule { name: "sign-debit", matches: is_debit, category: Category::ElectronicWithdrawals },
    // Degenerate bucket for exactly-zero amounts
    Rule { name: "zero-amount", matches: always, category: Category::FeesAndServices },
];

fn is_type_deposit(s: &Subject) -> bool {
    s.txn.kind == Some(TxnType::Deposit)
}

fn is_type_transfer(s: &Subject) -> bool {
    s.txn.kind == Some(TxnType::Transfer)
}

fn is_type_electronic(s: &Subject) -> bool {
    matches!(
        s.txn.kind,
        Some(TxnType::WireTransfer | TxnType::Zelle | TxnType::LenderPayment(_))
    )
}

fn is_type_fee(s: &Subject) -> bool {
    matches!(s.txn.kind, Some(TxnType::Fee(_)))
}

fn mentions_paper_deposit(s: &Subject) -> bool {
    s.untyped() && s.mentions(&["paper deposit"])
}

fn mentions_transfer(s: &Subject) -> bool {
    s.untyped() && s.mentions(&["transfer", "webfundstransfer"])
}

fn mentions_check(s: &Subject) -> bool {
    s.untyped() && s.mentions(&["check"])
}

fn mentions_card(s: &Subject) -> bool {
    s.untyped() && s.mentions(&["atm", "debit", "pos", "purchase"])
}

fn mentions_fee(s: &Subject) -> bool {
    s.untyped() && s.mentions(&["fee", "service charge", "overdraft"])
}

fn is_credit(s: &Subject) -> bool {
    s.txn.amount > Decimal::ZERO
}

fn is_debit(s: &Subject) -> bool {
    s.txn.amount < Decimal::ZERO
}

fn always(_: &Subject) -> bool {
    true
}

/// Categorize one transaction. Total: every transaction gets a category.
pub fn categorize(txn: &Transaction) -> Classification {
    let subject = Subject::new(txn);
    let rule = RULES
        .iter()
        .find(|r| (r.matches)(&subject))
        .unwrap_or(&RULES[RULES.len() - 1]);

    if rule.name == "zero-amount" {
        warn!(
            date = %txn.date,
            description = %txn.description,
            "Zero-amount transaction has no defined category; filed under fees-and-services"
        );
    }

    Classification {
        category: rule.category,
        rule: rule.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sift_core::{FeeKind, Lender};
    use std::str::FromStr;

    fn txn(amount: &str, description: &str) -> Transaction {
        Transaction::new(
            "Apr 10, 2024",
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            Decimal::from_str(amount).unwrap(),
            description,
            "",
        )
    }

    fn cat(t: &Transaction) -> Category {
        categorize(t).category
    }

    #[test]
    fn test_type_tags_map_directly() {
        let deposit = txn("1000.00", "Paper Deposit Ref:0320146555").with_kind(TxnType::Deposit);
        assert_eq!(cat(&deposit), Category::PaperDeposits);

        let transfer = txn("190.00", "WebFundsTransferFromAccount X Ref:1").with_kind(TxnType::Transfer);
        assert_eq!(cat(&transfer), Category::Transfers);

        for kind in [
            TxnType::WireTransfer,
            TxnType::Zelle,
            TxnType::LenderPayment(Lender::Bridgecrest),
        ] {
            assert_eq!(cat(&txn("-10.00", "x").with_kind(kind)), Category::ElectronicWithdrawals);
        }

        for fee in [FeeKind::Overdraft, FeeKind::ReturnedItem, FeeKind::ServiceCharge, FeeKind::Other] {
            assert_eq!(cat(&txn("-26.00", "x").with_kind(TxnType::Fee(fee))), Category::FeesAndServices);
        }
    }

    #[test]
    fn test_type_beats_description() {
        // Description says "check", but the grammar said Zelle
        let t = txn("-50.00", "Check #1001").with_kind(TxnType::Zelle);
        assert_eq!(categorize(&t).rule, "type-electronic");
    }

    #[test]
    fn test_unmapped_type_skips_keywords_and_uses_sign() {
        let t = txn("-75.00", "DEBIT PURCHASE Ref:1").with_kind(TxnType::OtherWithdrawal);
        let c = categorize(&t);
        assert_eq!(c.category, Category::ElectronicWithdrawals);
        assert_eq!(c.rule, "sign-debit");
    }

    #[test]
    fn test_description_keywords_in_order() {
        assert_eq!(cat(&txn("50.00", "PAPER DEPOSIT BRANCH 12")), Category::PaperDeposits);
        assert_eq!(cat(&txn("-20.00", "ONLINE TRANSFER TO SAV")), Category::Transfers);
        assert_eq!(cat(&txn("-20.00", "WebFundsTransferToAccount")), Category::Transfers);
        assert_eq!(cat(&txn("-300.00", "Check #1001")), Category::Checks);
        assert_eq!(cat(&txn("-40.00", "ATM WITHDRAWAL 7TH ST")), Category::AtmDebitCard);
        assert_eq!(cat(&txn("-12.50", "POS PURCHASE HEB")), Category::AtmDebitCard);
        assert_eq!(cat(&txn("-35.00", "OVERDRAFT ITEM FEE")), Category::FeesAndServices);
        assert_eq!(cat(&txn("-5.00", "MONTHLY SERVICE CHARGE")), Category::FeesAndServices);
        // "transfer" outranks "fee"
        assert_eq!(cat(&txn("-5.00", "TRANSFER FEE")), Category::Transfers);
        // "check" outranks card keywords
        assert_eq!(cat(&txn("-5.00", "CHECKCARD PURCHASE")), Category::Checks);
    }

    #[test]
    fn test_keywords_match_inside_squeezed_words() {
        assert_eq!(cat(&txn("-20.00", "ONLINETRANSFER TO SAV")), Category::Transfers);
        assert_eq!(cat(&txn("-5.00", "MONTHLYFEE")), Category::FeesAndServices);
        assert_eq!(cat(&txn("-40.00", "PAYCHECK ADVANCE")), Category::Checks);
        // "pos" inside "deposit"
        let mobile = categorize(&txn("10.00", "MOBILE DEPOSIT"));
        assert_eq!(mobile.category, Category::AtmDebitCard);
        assert_eq!(mobile.rule, "desc-card");
        // "fee" inside "coffee"
        assert_eq!(cat(&txn("-4.50", "COFFEE SHOP")), Category::FeesAndServices);
    }

    #[test]
    fn test_sign_fallback() {
        assert_eq!(cat(&txn("2500.00", "PAYROLL ACME INC")), Category::Deposits);
        assert_eq!(cat(&txn("-45.67", "WALMART #123")), Category::ElectronicWithdrawals);
    }

    #[test]
    fn test_zero_amount_is_reported_not_dropped() {
        let c = categorize(&txn("0.00", "ADJUSTMENT"));
        assert_eq!(c.category, Category::FeesAndServices);
        assert_eq!(c.rule, "zero-amount");
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
