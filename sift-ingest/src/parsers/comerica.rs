//! Comerica Basic Business Checking statements (text)
//!
//! Rendered text loses most spaces inside headers, and rows glue the month
//! abbreviation to the day:
//!   Paper depositsthisstatementperiod
//!   Apr10 1,000.00 0320146555
//!   Transferfrom otheraccountsthisstatementperiod
//!   Apr18 190.00 WebFundsTransferFromAccount Xxxxxx6649 WB10409873
//!   Electronicwithdrawalsthisstatementperiod
//!   Apr12 -500.00 ZelleTransferToJohn 0412993311
//!   Feesandservice chargesthisstatementperiod
//!   Apr17 -26.00 Fee-ReturnedItem 0970314433

use regex::Captures;
use sift_core::{FeeKind, Lender, TxnType};

use crate::error::Result;
use crate::grammar::{DateToken, LineGrammar, Polarity};
use crate::parsers::Layout;
use crate::section::SectionGrammar;

const DATE: &str = r"(?P<date>[A-Z][a-z]{2}\s?\d{1,2})";
const AMOUNT: &str = r"(?P<amount>-?\$?[\d,]+\.\d+)";

/// Withdrawal activity keywords, checked in order
const WITHDRAWAL_TYPES: [(&str, TxnType); 9] = [
    ("Wire", TxnType::WireTransfer),
    ("Zelle", TxnType::Zelle),
    ("Wf", TxnType::LenderPayment(Lender::WellsFargo)),
    ("Toyota", TxnType::LenderPayment(Lender::Toyota)),
    ("Ally", TxnType::LenderPayment(Lender::Ally)),
    ("GMFinancial", TxnType::LenderPayment(Lender::GmFinancial)),
    ("FordMotor", TxnType::LenderPayment(Lender::Ford)),
    ("TdAutoFinance", TxnType::LenderPayment(Lender::TdAuto)),
    ("Bridgecrest", TxnType::LenderPayment(Lender::Bridgecrest)),
];

const FEE_TYPES: [(&str, FeeKind); 3] = [
    ("Fee-Overdraft", FeeKind::Overdraft),
    ("Fee-ReturnedItem", FeeKind::ReturnedItem),
    ("ServiceCharge", FeeKind::ServiceCharge),
];

pub fn detect(text: &str) -> bool {
    let compact = text.replace(' ', "");
    compact.contains("BasicBusinessChecking") && text.to_uppercase().contains("COMERICA")
}

pub fn layout() -> Result<Layout> {
    let sections = SectionGrammar::new()
        .header("deposits", "Paper deposits this statement period")?
        .header("transfers", "Transfer from other accounts this statement period")?
        .header("withdrawals", "Electronic withdrawals this statement period")?
        .header("fees", "Fees and service charges this statement period")?
        .stop("Transfer from")?
        .stop("Electronic withdrawals")?
        .stop("Fees and")?
        .stop("Lowest daily")?
        .spanning_pages();

    let deposits = LineGrammar::new(&format!(r"^{DATE}\s+{AMOUNT}\s+(?P<ref>\d+)$"), DateToken::MonthNameDay)?
        .describe(|caps| format!("Paper Deposit Ref:{}", &caps["ref"]))
        .tag(|_| Some(TxnType::Deposit));

    let transfers = LineGrammar::new(
        &format!(r"^{DATE}\s+{AMOUNT}\s+(?P<activity>.+?)\s+(?P<account>\S+)\s+(?P<ref>\S+)$"),
        DateToken::MonthNameDay,
    )?
    .describe(|caps| format!("{} {} Ref:{}", &caps["activity"], &caps["account"], &caps["ref"]))
    .tag(|_| Some(TxnType::Transfer));

    let withdrawals = LineGrammar::new(
        &format!(r"^{DATE}\s+{AMOUNT}\s+(?P<activity>.+?)\s+(?P<ref>\S+)$"),
        DateToken::MonthNameDay,
    )?
    .describe(activity_with_ref)
    .tag(withdrawal_type)
    .skip_when(is_fee_activity);

    let fees = LineGrammar::new(
        &format!(r"^{DATE}\s+{AMOUNT}\s+(?P<activity>.+?)\s+(?P<ref>\d+)$"),
        DateToken::MonthNameDay,
    )?
    .describe(activity_with_ref)
    .tag(fee_type);

    Ok(Layout::new(sections)
        .rule("deposits", Polarity::Credit, deposits)
        .rule("transfers", Polarity::Credit, transfers)
        .rule("withdrawals", Polarity::Debit, withdrawals)
        .rule("fees", Polarity::AsPrinted, fees))
}

fn activity_with_ref(caps: &Captures) -> String {
    format!("{} Ref:{}", &caps["activity"], &caps["ref"])
}

/// Fee rows also show up among withdrawals; they are read from the fees section.
fn is_fee_activity(caps: &Captures) -> bool {
    let activity = &caps["activity"];
    activity.contains("Fee-") || activity.contains("ServiceCharge")
}

fn withdrawal_type(caps: &Captures) -> Option<TxnType> {
    let activity = &caps["activity"];
    let kind = WITHDRAWAL_TYPES
        .iter()
        .find(|(keyword, _)| activity.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(TxnType::OtherWithdrawal);
    Some(kind)
}

fn fee_type(caps: &Captures) -> Option<TxnType> {
    let activity = &caps["activity"];
    let kind = FEE_TYPES
        .iter()
        .find(|(keyword, _)| activity.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(FeeKind::Other);
    Some(TxnType::Fee(kind))
}
