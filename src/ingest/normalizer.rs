//! Record normalizer: canonical dates, amounts and labels

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::{ExtractedDocument, OperationKind};
use crate::utils::date_format::DATE_FORMAT;
use crate::utils::money;

/// Extracted document with every field resolved to a usable value
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    pub operation: OperationKind,
    /// Upper-cased document type label, empty when absent
    pub document_type: String,
    pub date: NaiveDate,
    pub issuer_tax_id: Option<String>,
    pub receiver_tax_id: Option<String>,
    pub net_amount: BigDecimal,
    pub vat_21: BigDecimal,
    pub vat_10_5: BigDecimal,
    pub total: BigDecimal,
    /// Free text, empty when absent
    pub text: String,
}

impl NormalizedDocument {
    /// VAT at both rates
    pub fn vat_total(&self) -> BigDecimal {
        &self.vat_21 + &self.vat_10_5
    }

    /// False when the VAT to book rounds to zero cents
    pub fn has_vat(&self) -> bool {
        money::round2(&self.vat_total()) != money::zero()
    }
}

/// Normalize one extracted document. Never fails: an absent or unparseable
/// date becomes `processing_date` and absent amounts become zero.
pub fn normalize(document: &ExtractedDocument, processing_date: NaiveDate) -> NormalizedDocument {
    NormalizedDocument {
        operation: parse_operation(document.operation.as_deref()),
        document_type: document
            .document_type
            .as_deref()
            .map(|t| t.trim().to_uppercase())
            .unwrap_or_default(),
        date: parse_date(document.date.as_deref(), processing_date),
        issuer_tax_id: clean_tax_id(document.issuer_tax_id.as_deref()),
        receiver_tax_id: clean_tax_id(document.receiver_tax_id.as_deref()),
        net_amount: money::from_f64(document.net_amount),
        vat_21: money::from_f64(document.vat_21),
        vat_10_5: money::from_f64(document.vat_10_5),
        total: money::from_f64(document.total),
        text: document.text.clone().unwrap_or_default(),
    }
}

/// Parse a `dd/mm/yyyy` date, falling back to `fallback`
pub fn parse_date(raw: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
        .unwrap_or(fallback)
}

/// Classify an operation label; absent means purchase
pub fn parse_operation(raw: Option<&str>) -> OperationKind {
    let Some(label) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return OperationKind::Purchase;
    };
    match label.to_lowercase().as_str() {
        "purchase" | "compra" => OperationKind::Purchase,
        "sale" | "venta" => OperationKind::Sale,
        _ => OperationKind::Other,
    }
}

fn clean_tax_id(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
