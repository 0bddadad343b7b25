//! Field extraction from the plain text of Argentine electronic invoices

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ExtractedDocument;

static DOCUMENT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FACTURA\s+([ABC])\b").expect("valid regex"));
static POINT_OF_SALE_AND_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:P\.?V\.?|PTO\.?\s*VTA\.?|PUNTO\s*DE\s*VENTA)\s*[:\-]?\s*(\d{4}).{0,4}?(?:NRO\.?|Nº|N°|NUMERO)\s*[:\-]?\s*(\d{8})",
    )
    .expect("valid regex")
});
static NUMBER_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:NRO\.?|Nº|N°)\s*[:\-]?\s*(\d{8})").expect("valid regex"));
static ISSUE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FECHA\s*[:\s]*(\d{2}/\d{2}/\d{4})").expect("valid regex"));
static TAX_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CUIT\s*(?:NRO|Nº|N°|:)?\s*([0-9\-.]{8,13})").expect("valid regex")
});
static VAT_INCLUDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"IVA\s*CONTENIDO\s*[:\s]*\$?\s*([0-9.,]+)").expect("valid regex")
});
static TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTOTAL\s*:?\s*\$?\s*([0-9.,]+)").expect("valid regex"));
static AUTHORIZATION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"C\.?A\.?E\.?\s*[:\s]*([0-9]{10,20})").expect("valid regex"));
static AUTHORIZATION_DUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"VENCIMIENTO\s*C\.?A\.?E\.?\s*[:\s]*(\d{2}/\d{2}/\d{4})").expect("valid regex")
});

/// Derive the extracted fields from raw invoice text.
///
/// Missing fields stay `None` or zero. All VAT found is attributed to the 21%
/// rate and the net amount is only derived when both total and VAT are found.
/// The operation is always a purchase.
pub fn parse_invoice_text(text: &str, type_hint: &str) -> ExtractedDocument {
    let upper = text.to_uppercase();

    let document_type = match capture(&DOCUMENT_LETTER, &upper) {
        Some(letter) => format!("FACTURA {}", letter),
        None if upper.contains("FACTURA") => "FACTURA".to_string(),
        None if !type_hint.trim().is_empty() => type_hint.trim().to_uppercase(),
        None => "FACTURA".to_string(),
    };

    let document_number = match POINT_OF_SALE_AND_NUMBER.captures(&upper) {
        Some(caps) => Some(format!("{}-{}", &caps[1], &caps[2])),
        None => capture(&NUMBER_ONLY, &upper),
    };

    let vat = capture(&VAT_INCLUDED, &upper)
        .map(|raw| parse_amount(&raw))
        .unwrap_or(0.0);
    let total = capture(&TOTAL, &upper)
        .map(|raw| parse_amount(&raw))
        .unwrap_or(0.0);
    let net = if total != 0.0 && vat != 0.0 {
        ((total - vat) * 100.0).round() / 100.0
    } else {
        0.0
    };

    tracing::debug!(
        document_type = %document_type,
        total,
        vat,
        "parsed invoice text"
    );

    ExtractedDocument {
        operation: Some("purchase".to_string()),
        document_type: Some(document_type),
        document_number,
        date: capture(&ISSUE_DATE, &upper),
        issuer_tax_id: capture(&TAX_ID, &upper)
            .map(|raw| raw.chars().filter(char::is_ascii_digit).collect()),
        receiver_tax_id: None,
        net_amount: Some(net),
        vat_21: Some(vat),
        vat_10_5: Some(0.0),
        total: Some(total),
        authorization_code: capture(&AUTHORIZATION_CODE, &upper),
        authorization_due_date: capture(&AUTHORIZATION_DUE, &upper),
        text: Some(text.to_string()),
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse an amount written either as `42.716,00` or `7,413.52`.
///
/// When both separators appear the later one is the decimal separator. A lone
/// comma is decimal; lone dots are thousands separators unless the last group
/// is not three digits long. Unparseable input yields zero.
pub fn parse_amount(raw: &str) -> f64 {
    let raw = raw.trim().trim_end_matches(['.', ',']);
    if raw.is_empty() {
        return 0.0;
    }

    let normalized = match (raw.rfind('.'), raw.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => raw.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => raw.replace(',', ""),
        (None, Some(_)) => raw.replace('.', "").replace(',', "."),
        (Some(dot), None) => {
            let decimals = raw.len() - dot - 1;
            if decimals == 3 {
                raw.replace('.', "")
            } else if raw.matches('.').count() == 1 {
                raw.to_string()
            } else {
                let (int_part, frac_part) = raw.split_at(dot);
                format!("{}{}", int_part.replace('.', ""), frac_part)
            }
        }
        (None, None) => raw.to_string(),
    };

    normalized.parse().unwrap_or(0.0)
}
