//! Gross-receipts tax declaration for a single jurisdiction

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::GrossReceiptsConfig;
use crate::types::VatBookLine;
use crate::utils::money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossReceiptsDeclaration {
    pub jurisdiction: String,
    /// Net taxed amount of every sale
    pub taxable_base: BigDecimal,
    /// Rate in percent
    pub rate: BigDecimal,
    pub determined_tax: BigDecimal,
}

/// Gross-receipts calculator; the fiscal-condition label selects the rate
#[derive(Debug, Clone)]
pub struct GrossReceiptsCalculator {
    config: GrossReceiptsConfig,
}

impl GrossReceiptsCalculator {
    pub fn new(config: GrossReceiptsConfig) -> Self {
        Self { config }
    }

    /// Rate applicable to a fiscal condition
    pub fn rate_for(&self, fiscal_condition: &str) -> &BigDecimal {
        if self.config.is_professional(fiscal_condition) {
            &self.config.professional_rate
        } else {
            &self.config.general_rate
        }
    }

    pub fn calculate(&self, sales: &[VatBookLine], fiscal_condition: &str) -> GrossReceiptsDeclaration {
        let taxable_base: BigDecimal = sales.iter().map(|line| &line.net_amount).sum();
        let rate = self.rate_for(fiscal_condition).clone();
        let tax = money::percent_of(&taxable_base, &rate);

        GrossReceiptsDeclaration {
            jurisdiction: self.config.jurisdiction.clone(),
            taxable_base: money::round2(&taxable_base),
            rate,
            determined_tax: money::round2(&tax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn sale(net: &str) -> VatBookLine {
        VatBookLine {
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            counterparty_tax_id: None,
            document_type: "FACTURA B".to_string(),
            net_amount: dec(net),
            vat_21: BigDecimal::from(0),
            vat_10_5: BigDecimal::from(0),
            total: dec(net),
        }
    }

    fn calculator() -> GrossReceiptsCalculator {
        GrossReceiptsCalculator::new(GrossReceiptsConfig::default())
    }

    #[test]
    fn test_general_rate() {
        let declaration = calculator().calculate(&[sale("200.00")], "Monotributista");
        assert_eq!(declaration.jurisdiction, "Tucumán");
        assert_eq!(declaration.taxable_base, dec("200"));
        assert_eq!(declaration.rate, dec("3.5"));
        assert_eq!(declaration.determined_tax, dec("7.00"));
    }

    #[test]
    fn test_professional_rate() {
        let declaration =
            calculator().calculate(&[sale("200.00")], "Responsable Inscripto Profesional");
        assert_eq!(declaration.rate, dec("1.75"));
        assert_eq!(declaration.determined_tax, dec("3.50"));
    }

    #[test]
    fn test_rounding_and_empty_book() {
        let declaration = calculator().calculate(&[sale("33.33"), sale("0.10")], "");
        assert_eq!(declaration.taxable_base, dec("33.43"));
        // 33.43 * 3.5% = 1.17005
        assert_eq!(declaration.determined_tax, dec("1.17"));

        let declaration = calculator().calculate(&[], "Monotributista");
        assert_eq!(declaration.determined_tax, BigDecimal::from(0));
    }
}
