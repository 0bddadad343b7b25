//! Fixed chart of accounts used by the entry generator

use crate::types::AccountType;

pub const PURCHASES: &str = "Purchases";
pub const VAT_CREDIT: &str = "VAT Credit";
pub const SUPPLIERS: &str = "Suppliers";
pub const CUSTOMERS: &str = "Customers";
pub const SALES: &str = "Sales";
pub const VAT_DEBIT: &str = "VAT Debit";
pub const CASH: &str = "Cash";
pub const BANKS: &str = "Banks";
pub const CAPITAL: &str = "Capital";
/// Absorbs the gap between a document's declared total and net plus VAT
pub const UNRECONCILED_DIFFERENCES: &str = "Unreconciled Differences";

/// Account type of a chart account; unknown names are treated as assets
pub fn account_type(account: &str) -> AccountType {
    match account {
        PURCHASES => AccountType::Expense,
        SALES => AccountType::Income,
        SUPPLIERS | VAT_DEBIT => AccountType::Liability,
        CAPITAL => AccountType::Equity,
        _ => AccountType::Asset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryType;

    #[test]
    fn test_normal_balances() {
        assert_eq!(account_type(PURCHASES).normal_balance(), EntryType::Debit);
        assert_eq!(account_type(VAT_CREDIT).normal_balance(), EntryType::Debit);
        assert_eq!(account_type(CUSTOMERS).normal_balance(), EntryType::Debit);
        assert_eq!(account_type(SUPPLIERS).normal_balance(), EntryType::Credit);
        assert_eq!(account_type(VAT_DEBIT).normal_balance(), EntryType::Credit);
        assert_eq!(account_type(SALES).normal_balance(), EntryType::Credit);
    }
}
