//! Statement deriver: income statement, balance sheet and equity statement

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::ledger::accounts::*;
use crate::types::*;
use crate::utils::money;

pub const SALES_CONCEPT: &str = "Sales";
pub const COST_OF_SALES_CONCEPT: &str = "Cost of Sales";
pub const NET_RESULT_CONCEPT: &str = "Net Result";

/// Totals behind the income statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSummary {
    /// Credits to every account whose name contains "Sales"
    pub sales: BigDecimal,
    /// Debits to every account whose name contains "Purchases"
    pub cost_of_sales: BigDecimal,
    pub net_result: BigDecimal,
}

impl IncomeSummary {
    pub fn from_postings(postings: &[Posting]) -> Self {
        let sales: BigDecimal = postings
            .iter()
            .filter(|p| p.account.contains(SALES))
            .map(|p| &p.credit)
            .sum();
        let cost_of_sales: BigDecimal = postings
            .iter()
            .filter(|p| p.account.contains(PURCHASES))
            .map(|p| &p.debit)
            .sum();
        let net_result = &sales - &cost_of_sales;

        Self {
            sales,
            cost_of_sales,
            net_result,
        }
    }

    /// Sales, cost of sales and net result rows
    pub fn lines(&self) -> Vec<StatementLine> {
        vec![
            StatementLine::new(SALES_CONCEPT, self.sales.clone()),
            StatementLine::new(COST_OF_SALES_CONCEPT, self.cost_of_sales.clone()),
            StatementLine::new(NET_RESULT_CONCEPT, self.net_result.clone()),
        ]
    }
}

/// Three statement views, recomputed from postings on every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub income_statement: Vec<StatementLine>,
    pub balance_sheet: Vec<BalanceSheetLine>,
    pub equity_statement: Vec<StatementLine>,
}

impl FinancialStatements {
    pub fn derive(postings: &[Posting]) -> Self {
        let summary = IncomeSummary::from_postings(postings);
        Self {
            income_statement: summary.lines(),
            balance_sheet: balance_sheet(postings),
            equity_statement: equity_statement(&summary),
        }
    }
}

/// Minimal balance sheet.
///
/// Assets are the debits to customers, cash and banks; liabilities are the
/// credits to suppliers; equity is the difference.
pub fn balance_sheet(postings: &[Posting]) -> Vec<BalanceSheetLine> {
    let assets: BigDecimal = postings
        .iter()
        .filter(|p| matches!(p.account.as_str(), CUSTOMERS | CASH | BANKS))
        .map(|p| &p.debit)
        .sum();
    let liabilities: BigDecimal = postings
        .iter()
        .filter(|p| p.account == SUPPLIERS)
        .map(|p| &p.credit)
        .sum();
    let equity = &assets - &liabilities;

    vec![
        BalanceSheetLine {
            section: BalanceSection::Assets,
            concept: "Cash and Receivables".to_string(),
            amount: money::round2(&assets),
        },
        BalanceSheetLine {
            section: BalanceSection::Liabilities,
            concept: SUPPLIERS.to_string(),
            amount: money::round2(&liabilities),
        },
        BalanceSheetLine {
            section: BalanceSection::Equity,
            concept: "Equity".to_string(),
            amount: money::round2(&equity),
        },
    ]
}

/// Capital (always zero, no opening balances are tracked) plus the result
pub fn equity_statement(summary: &IncomeSummary) -> Vec<StatementLine> {
    vec![
        StatementLine::new(CAPITAL, money::zero()),
        StatementLine::new(NET_RESULT_CONCEPT, summary.net_result.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn posting(account: &str, debit: i64, credit: i64) -> Posting {
        Posting {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            account: account.to_string(),
            debit: BigDecimal::from(debit),
            credit: BigDecimal::from(credit),
            reference: String::new(),
        }
    }

    fn sample() -> Vec<Posting> {
        vec![
            posting(PURCHASES, 100, 0),
            posting(VAT_CREDIT, 21, 0),
            posting(SUPPLIERS, 0, 121),
            posting(CUSTOMERS, 242, 0),
            posting(SALES, 0, 200),
            posting(VAT_DEBIT, 0, 42),
        ]
    }

    #[test]
    fn test_income_statement() {
        let summary = IncomeSummary::from_postings(&sample());
        assert_eq!(summary.sales, BigDecimal::from(200));
        assert_eq!(summary.cost_of_sales, BigDecimal::from(100));
        assert_eq!(summary.net_result, BigDecimal::from(100));

        let lines = summary.lines();
        let concepts: Vec<&str> = lines.iter().map(|l| l.concept.as_str()).collect();
        assert_eq!(concepts, vec!["Sales", "Cost of Sales", "Net Result"]);
    }

    #[test]
    fn test_account_names_matched_by_substring() {
        let postings = vec![posting("Sales - Services", 0, 50), posting("Purchases Imports", 30, 0)];
        let summary = IncomeSummary::from_postings(&postings);
        assert_eq!(summary.sales, BigDecimal::from(50));
        assert_eq!(summary.cost_of_sales, BigDecimal::from(30));
    }

    #[test]
    fn test_balance_sheet() {
        let mut postings = sample();
        postings.push(posting(CASH, 10, 0));
        postings.push(posting(BANKS, 5, 0));

        let sheet = balance_sheet(&postings);

        assert_eq!(sheet[0].section, BalanceSection::Assets);
        assert_eq!(sheet[0].amount, BigDecimal::from(257));
        assert_eq!(sheet[1].amount, BigDecimal::from(121));
        assert_eq!(sheet[2].section, BalanceSection::Equity);
        assert_eq!(sheet[2].amount, BigDecimal::from(136));
    }

    #[test]
    fn test_equity_statement() {
        let statements = FinancialStatements::derive(&sample());
        assert_eq!(statements.equity_statement.len(), 2);
        assert_eq!(statements.equity_statement[0].concept, "Capital");
        assert_eq!(statements.equity_statement[0].amount, BigDecimal::from(0));
        assert_eq!(statements.equity_statement[1].amount, BigDecimal::from(100));
    }

    #[test]
    fn test_empty_postings_give_zero_rows() {
        let statements = FinancialStatements::derive(&[]);
        assert_eq!(statements.income_statement.len(), 3);
        assert!(statements
            .income_statement
            .iter()
            .all(|l| l.amount == BigDecimal::from(0)));
        assert_eq!(statements.balance_sheet.len(), 3);
    }
}
