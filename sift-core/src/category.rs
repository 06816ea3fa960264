//! Fixed activity taxonomy every transaction is classified into

use serde::{Deserialize, Serialize};
use std::fmt;

/// Financial-activity categories, in report order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "deposits")]
    Deposits,
    #[serde(rename = "paper-deposits")]
    PaperDeposits,
    #[serde(rename = "transfers")]
    Transfers,
    #[serde(rename = "checks")]
    Checks,
    #[serde(rename = "atm-debit-card")]
    AtmDebitCard,
    #[serde(rename = "electronic-withdrawals")]
    ElectronicWithdrawals,
    #[serde(rename = "fees-and-services")]
    FeesAndServices,
}

impl Category {
    /// Every category, in the order reports list them
    pub const ALL: [Category; 7] = [
        Category::Deposits,
        Category::PaperDeposits,
        Category::Transfers,
        Category::Checks,
        Category::AtmDebitCard,
        Category::ElectronicWithdrawals,
        Category::FeesAndServices,
    ];

    /// Stable machine name (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Deposits => "deposits",
            Category::PaperDeposits => "paper-deposits",
            Category::Transfers => "transfers",
            Category::Checks => "checks",
            Category::AtmDebitCard => "atm-debit-card",
            Category::ElectronicWithdrawals => "electronic-withdrawals",
            Category::FeesAndServices => "fees-and-services",
        }
    }

    /// Heading used by text reports
    pub fn title(&self) -> &'static str {
        match self {
            Category::Deposits => "Deposits",
            Category::PaperDeposits => "Paper Deposits",
            Category::Transfers => "Transfers from Other Accounts",
            Category::Checks => "Checks",
            Category::AtmDebitCard => "ATM/Debit Card",
            Category::ElectronicWithdrawals => "Electronic Withdrawals",
            Category::FeesAndServices => "Fees and Services",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_report_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL.len(), 7);
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for cat in Category::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
        }
    }
}
