//! Semicolon-separated text files for tax declarations
//!
//! Rendering only; writing the files is up to the caller.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::ResultBundle;
use crate::tax::*;
use crate::utils::money;

/// One rendered declaration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationFile {
    pub file_name: String,
    pub content: String,
}

fn amount(value: &BigDecimal) -> String {
    money::round2(value).to_string()
}

/// `period;credit;debit;balance`
pub fn render_vat(declarations: &[VatDeclaration]) -> String {
    declarations
        .iter()
        .map(|d| {
            format!(
                "{};{};{};{}\n",
                d.period,
                amount(&d.vat_credit),
                amount(&d.vat_debit),
                amount(&d.balance_due)
            )
        })
        .collect()
}

/// `year;sales;cost;expenses;taxable;tax;advances`
pub fn render_income_tax(declarations: &[IncomeTaxDeclaration]) -> String {
    declarations
        .iter()
        .map(|d| {
            format!(
                "{};{};{};{};{};{};{}\n",
                d.fiscal_year,
                amount(&d.taxable_sales),
                amount(&d.cost_of_sales),
                amount(&d.deductible_expenses),
                amount(&d.taxable_income),
                amount(&d.determined_tax),
                amount(&d.estimated_advances)
            )
        })
        .collect()
}

/// `jurisdiction;base;rate;tax`
pub fn render_gross_receipts(declarations: &[GrossReceiptsDeclaration]) -> String {
    declarations
        .iter()
        .map(|d| {
            format!(
                "{};{};{};{}\n",
                d.jurisdiction,
                amount(&d.taxable_base),
                amount(&d.rate),
                amount(&d.determined_tax)
            )
        })
        .collect()
}

/// `year;total;rate;tax`
pub fn render_personal_assets(declarations: &[PersonalAssetsDeclaration]) -> String {
    declarations
        .iter()
        .map(|d| {
            format!(
                "{};{};{};{}\n",
                d.fiscal_year,
                amount(&d.taxable_assets_total),
                amount(&d.rate),
                amount(&d.determined_tax)
            )
        })
        .collect()
}

/// All four declaration files of a bundle, named after the processing date
pub fn export_declarations(bundle: &ResultBundle, processing_date: NaiveDate) -> Vec<DeclarationFile> {
    let month = processing_date.format("%Y%m");
    let year = processing_date.format("%Y");

    vec![
        DeclarationFile {
            file_name: format!("vat_declaration_{}.txt", month),
            content: render_vat(&bundle.vat_declaration),
        },
        DeclarationFile {
            file_name: format!("income_tax_declaration_{}.txt", year),
            content: render_income_tax(&bundle.income_tax_declaration),
        },
        DeclarationFile {
            file_name: format!("gross_receipts_declaration_{}.txt", month),
            content: render_gross_receipts(&bundle.gross_receipts_declaration),
        },
        DeclarationFile {
            file_name: format!("personal_assets_declaration_{}.txt", year),
            content: render_personal_assets(&bundle.personal_assets_declaration),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, ProcessingContext};
    use crate::types::ExtractedDocument;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_render_vat_line() {
        let line = render_vat(&[VatDeclaration {
            period: "03/2025".to_string(),
            vat_credit: dec("21"),
            vat_debit: dec("42.5"),
            balance_due: dec("21.5"),
        }]);
        assert_eq!(line, "03/2025;21.00;42.50;21.50\n");
    }

    #[test]
    fn test_render_gross_receipts_rate_two_decimals() {
        let line = render_gross_receipts(&[GrossReceiptsDeclaration {
            jurisdiction: "Tucumán".to_string(),
            taxable_base: dec("200"),
            rate: dec("3.5"),
            determined_tax: dec("7"),
        }]);
        assert_eq!(line, "Tucumán;200.00;3.50;7.00\n");
    }

    #[test]
    fn test_export_all_files() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        let bundle = Engine::default().process_documents(
            &[ExtractedDocument::sale(200.0, 42.0, 0.0, 242.0).text("activo")],
            &ProcessingContext::new(date, "Monotributista"),
        );

        let files = export_declarations(&bundle, date);

        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "vat_declaration_202507.txt",
                "income_tax_declaration_2025.txt",
                "gross_receipts_declaration_202507.txt",
                "personal_assets_declaration_2025.txt",
            ]
        );
        assert_eq!(files[0].content, "07/2025;0.00;42.00;42.00\n");
        assert_eq!(
            files[1].content,
            "2025;200.00;0.00;0.00;200.00;50.00;10.00\n"
        );
        assert_eq!(files[2].content, "Tucumán;200.00;3.50;7.00\n");
        assert_eq!(files[3].content, "2025;242.00;0.50;1.21\n");
    }
}
