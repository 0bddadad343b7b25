//! VAT declaration from the purchases and sales VAT books

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::VatBookLine;
use crate::utils::money;

/// Monthly VAT position. No balance is carried over from earlier periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatDeclaration {
    /// `mm/yyyy`
    pub period: String,
    /// VAT paid on purchases
    pub vat_credit: BigDecimal,
    /// VAT charged on sales
    pub vat_debit: BigDecimal,
    /// Debit minus credit; negative when credit exceeds debit
    pub balance_due: BigDecimal,
}

/// VAT declaration calculator
#[derive(Debug, Clone, Copy)]
pub struct VatCalculator {
    period: NaiveDate,
}

impl VatCalculator {
    /// Calculator for the month containing `period`
    pub fn new(period: NaiveDate) -> Self {
        Self { period }
    }

    pub fn calculate(&self, purchases: &[VatBookLine], sales: &[VatBookLine]) -> VatDeclaration {
        let vat_credit: BigDecimal = purchases.iter().map(VatBookLine::vat_total).sum();
        let vat_debit: BigDecimal = sales.iter().map(VatBookLine::vat_total).sum();
        let balance_due = &vat_debit - &vat_credit;

        VatDeclaration {
            period: self.period.format("%m/%Y").to_string(),
            vat_credit: money::round2(&vat_credit),
            vat_debit: money::round2(&vat_debit),
            balance_due: money::round2(&balance_due),
        }
    }
}
