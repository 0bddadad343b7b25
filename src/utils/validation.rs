//! Validation utilities

use crate::types::*;

const TAX_ID_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Whether a CUIT/CUIL has eleven digits and a correct mod-11 check digit.
/// Separators such as dashes and dots are ignored.
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    let digits: Vec<u32> = tax_id.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }

    let sum: u32 = TAX_ID_WEIGHTS
        .iter()
        .zip(&digits[..10])
        .map(|(weight, digit)| weight * digit)
        .sum();
    let expected = match 11 - (sum % 11) {
        11 => 0,
        10 => 9,
        other => other,
    };

    expected == digits[10]
}

/// Validate a taxpayer id
pub fn validate_tax_id(tax_id: &str) -> EngineResult<()> {
    if tax_id.trim().is_empty() {
        return Err(EngineError::Validation("Tax ID cannot be empty".to_string()));
    }

    if !is_valid_tax_id(tax_id) {
        return Err(EngineError::Validation(format!(
            "Tax ID '{}' has an invalid check digit",
            tax_id
        )));
    }

    Ok(())
}

/// Validate a client name
pub fn validate_client_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::Validation(
            "Client name cannot be empty".to_string(),
        ));
    }

    if name.len() > 200 {
        return Err(EngineError::Validation(
            "Client name cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a fiscal-condition label
pub fn validate_fiscal_condition(label: &str) -> EngineResult<()> {
    if label.trim().is_empty() {
        return Err(EngineError::Validation(
            "Fiscal condition cannot be empty".to_string(),
        ));
    }

    if label.len() > 50 {
        return Err(EngineError::Validation(
            "Fiscal condition cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}
