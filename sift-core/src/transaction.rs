//! Normalized transaction records produced by statement grammars

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One financial event read off a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date as rendered for the source format ("Apr 10, 2024", "12/02/2024")
    pub date: String,
    /// Calendar date `date` resolves to; drives chronological ordering
    pub posted_on: NaiveDate,
    /// Negative = debit, positive = credit (after section normalization)
    pub amount: Decimal,
    pub description: String,
    /// Grammar-assigned tag, only for formats whose sections imply one
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TxnType>,
    /// Source line, kept for detail views
    pub raw_line: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        posted_on: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
        raw_line: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            posted_on,
            amount,
            description: description.into().trim().to_string(),
            kind: None,
            raw_line: raw_line.into(),
        }
    }

    pub fn with_kind(mut self, kind: TxnType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Identity used for de-duplication: `(date, amount, description)`
    pub fn dedup_key(&self) -> (String, Decimal, String) {
        (self.date.clone(), self.amount.normalize(), self.description.clone())
    }

    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_credit(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

/// Auto-loan and card lenders recognized in withdrawal activity text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lender {
    WellsFargo,
    Toyota,
    Ally,
    GmFinancial,
    Ford,
    TdAuto,
    Bridgecrest,
}

impl Lender {
    pub const ALL: [Lender; 7] = [
        Lender::WellsFargo,
        Lender::Toyota,
        Lender::Ally,
        Lender::GmFinancial,
        Lender::Ford,
        Lender::TdAuto,
        Lender::Bridgecrest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Lender::WellsFargo => "Wells Fargo",
            Lender::Toyota => "Toyota",
            Lender::Ally => "Ally",
            Lender::GmFinancial => "GM Financial",
            Lender::Ford => "Ford",
            Lender::TdAuto => "TD Auto",
            Lender::Bridgecrest => "Bridgecrest",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Lender::WellsFargo => "wells_fargo",
            Lender::Toyota => "toyota",
            Lender::Ally => "ally",
            Lender::GmFinancial => "gm_financial",
            Lender::Ford => "ford",
            Lender::TdAuto => "td_auto",
            Lender::Bridgecrest => "bridgecrest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeKind {
    Overdraft,
    ReturnedItem,
    ServiceCharge,
    Other,
}

/// Transaction tag a grammar infers from section context and keywords.
///
/// Serialized as a flat snake_case string (`"wire_transfer"`,
/// `"toyota_payment"`, `"returned_item_fee"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TxnType {
    Deposit,
    Transfer,
    WireTransfer,
    Zelle,
    LenderPayment(Lender),
    OtherWithdrawal,
    Fee(FeeKind),
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Deposit => "deposit",
            TxnType::Transfer => "transfer",
            TxnType::WireTransfer => "wire_transfer",
            TxnType::Zelle => "zelle",
            TxnType::LenderPayment(lender) => match lender {
                Lender::WellsFargo => "wells_fargo_payment",
                Lender::Toyota => "toyota_payment",
                Lender::Ally => "ally_payment",
                Lender::GmFinancial => "gm_financial_payment",
                Lender::Ford => "ford_payment",
                Lender::TdAuto => "td_auto_payment",
                Lender::Bridgecrest => "bridgecrest_payment",
            },
            TxnType::OtherWithdrawal => "other_withdrawal",
            TxnType::Fee(FeeKind::Overdraft) => "overdraft_fee",
            TxnType::Fee(FeeKind::ReturnedItem) => "returned_item_fee",
            TxnType::Fee(FeeKind::ServiceCharge) => "service_charge",
            TxnType::Fee(FeeKind::Other) => "other_fee",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "deposit" => TxnType::Deposit,
            "transfer" => TxnType::Transfer,
            "wire_transfer" => TxnType::WireTransfer,
            "zelle" => TxnType::Zelle,
            "other_withdrawal" => TxnType::OtherWithdrawal,
            "overdraft_fee" => TxnType::Fee(FeeKind::Overdraft),
            "returned_item_fee" => TxnType::Fee(FeeKind::ReturnedItem),
            "service_charge" => TxnType::Fee(FeeKind::ServiceCharge),
            "other_fee" => TxnType::Fee(FeeKind::Other),
            other => {
                let lender = other
                    .strip_suffix("_payment")
                    .and_then(|slug| Lender::ALL.into_iter().find(|l| l.slug() == slug))
                    .ok_or_else(|| format!("unknown transaction type: {other}"))?;
                TxnType::LenderPayment(lender)
            }
        };
        Ok(kind)
    }
}

impl From<TxnType> for String {
    fn from(kind: TxnType) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for TxnType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_trims_description() {
        let txn = Transaction::new(
            "Apr 10, 2024",
            d(2024, 4, 10),
            Decimal::new(100000, 2),
            "  Paper Deposit Ref:0320146555 ",
            "Apr10 1,000.00 0320146555",
        );
        assert_eq!(txn.description, "Paper Deposit Ref:0320146555");
        assert!(txn.is_credit());
        assert!(!txn.is_debit());
        assert_eq!(txn.kind, None);
    }

    #[test]
    fn test_dedup_key_ignores_scale() {
        let a = Transaction::new("x", d(2024, 1, 1), Decimal::new(500, 2), "A", "");
        let b = Transaction::new("x", d(2024, 1, 1), Decimal::new(5, 0), "A", "");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_txn_type_string_round_trip() {
        let kinds = [
            TxnType::Deposit,
            TxnType::WireTransfer,
            TxnType::LenderPayment(Lender::GmFinancial),
            TxnType::Fee(FeeKind::ReturnedItem),
        ];
        for kind in kinds {
            assert_eq!(kind.as_str().parse::<TxnType>().unwrap(), kind);
        }
        assert!("mystery".parse::<TxnType>().is_err());
    }

    #[test]
    fn test_serialize_uses_type_field() {
        let txn = Transaction::new("Apr 17, 2024", d(2024, 4, 17), Decimal::new(-2600, 2), "Fee", "")
            .with_kind(TxnType::Fee(FeeKind::ReturnedItem));
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "returned_item_fee");

        let untyped = Transaction::new("Apr 17, 2024", d(2024, 4, 17), Decimal::ZERO, "x", "");
        let json = serde_json::to_value(&untyped).unwrap();
        assert!(json.get("type").is_none());
    }
}
