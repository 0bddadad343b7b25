//! Income tax declaration with a flat tier table

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::IncomeTaxConfig;
use crate::ledger::IncomeSummary;
use crate::types::DeductibleExpense;
use crate::utils::money;

/// Annual income tax position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxDeclaration {
    pub fiscal_year: i32,
    pub taxable_sales: BigDecimal,
    pub cost_of_sales: BigDecimal,
    pub deductible_expenses: BigDecimal,
    pub taxable_income: BigDecimal,
    /// Rate in percent applied to the whole taxable income
    pub rate: BigDecimal,
    pub determined_tax: BigDecimal,
    /// Amount of each advance installment
    pub estimated_advances: BigDecimal,
}

/// Income tax calculator.
///
/// The tier rate applies to the entire taxable income once its ceiling is
/// reached; the table is not marginal.
#[derive(Debug, Clone)]
pub struct IncomeTaxCalculator {
    config: IncomeTaxConfig,
    fiscal_year: i32,
}

impl IncomeTaxCalculator {
    pub fn new(config: IncomeTaxConfig, fiscal_year: i32) -> Self {
        Self {
            config,
            fiscal_year,
        }
    }

    /// Taxable income is sales minus cost of sales and deductible expenses
    pub fn calculate(
        &self,
        summary: &IncomeSummary,
        expenses: &[DeductibleExpense],
    ) -> IncomeTaxDeclaration {
        let deductible: BigDecimal = expenses.iter().map(|e| &e.amount).sum();
        let taxable_income = &summary.sales - (&summary.cost_of_sales + &deductible);
        self.declaration(summary, deductible, taxable_income)
    }

    fn declaration(
        &self,
        summary: &IncomeSummary,
        deductible: BigDecimal,
        taxable_income: BigDecimal,
    ) -> IncomeTaxDeclaration {
        let rate = self
            .config
            .rate_for(&taxable_income)
            .cloned()
            .unwrap_or_else(money::zero);
        let tax = money::percent_of(&taxable_income, &rate);
        let installments = BigDecimal::from(self.config.advance_installments.max(1));
        let estimated_advances = money::round2(&(&tax / &installments));

        IncomeTaxDeclaration {
            fiscal_year: self.fiscal_year,
            taxable_sales: money::round2(&summary.sales),
            cost_of_sales: money::round2(&summary.cost_of_sales),
            deductible_expenses: money::round2(&deductible),
            taxable_income: money::round2(&taxable_income),
            rate,
            determined_tax: money::round2(&tax),
            estimated_advances,
        }
    }
}
