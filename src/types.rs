//! Core types and data structures for the bookkeeping engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::date_format;
use crate::utils::lenient;
use crate::utils::money;

/// Account classes used to decide the normal balance side of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Assets - customers, cash, banks, VAT credit
    Asset,
    /// Liabilities - suppliers, VAT debit
    Liability,
    /// Equity - capital and results
    Equity,
    /// Income - sales
    Income,
    /// Expenses - purchases
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    /// Assets and Expenses normally have debit balances,
    /// Liabilities, Equity, and Income normally have credit balances.
    pub fn normal_balance(&self) -> EntryType {
        match self {
            AccountType::Asset | AccountType::Expense => EntryType::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => EntryType::Credit,
        }
    }
}

/// Side of a posting in double-entry bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Debit,
    Credit,
}

/// Classification of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Invoice received from a supplier
    Purchase,
    /// Invoice issued to a customer
    Sale,
    /// Unrecognised label; the document produces no postings
    Other,
}

/// Fields extracted from one source document, as delivered by the extraction
/// collaborator. Every field is optional; the normalizer decides the defaults.
///
/// Field aliases accept the key names produced by the invoice text parser of
/// the legacy service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedDocument {
    /// `purchase` / `sale` label; absent means purchase
    #[serde(alias = "operacion")]
    pub operation: Option<String>,
    /// Document type label (e.g. `FACTURA A`)
    #[serde(alias = "tipo")]
    pub document_type: Option<String>,
    /// Point of sale and number, when the extractor found them
    #[serde(alias = "nro_comprobante")]
    pub document_number: Option<String>,
    /// Issue date as `dd/mm/yyyy`
    #[serde(alias = "fecha")]
    pub date: Option<String>,
    #[serde(alias = "cuit_emisor")]
    pub issuer_tax_id: Option<String>,
    #[serde(alias = "cuit_receptor")]
    pub receiver_tax_id: Option<String>,
    #[serde(alias = "importe_neto", deserialize_with = "lenient::amount")]
    pub net_amount: Option<f64>,
    #[serde(alias = "iva_21", deserialize_with = "lenient::amount")]
    pub vat_21: Option<f64>,
    #[serde(alias = "iva_105", deserialize_with = "lenient::amount")]
    pub vat_10_5: Option<f64>,
    #[serde(alias = "importe_total", deserialize_with = "lenient::amount")]
    pub total: Option<f64>,
    /// Electronic authorization code printed on the invoice
    #[serde(alias = "cae")]
    pub authorization_code: Option<String>,
    #[serde(alias = "vto_cae")]
    pub authorization_due_date: Option<String>,
    /// Raw document text, used by the registrable asset rules
    #[serde(alias = "texto_base")]
    pub text: Option<String>,
}

impl ExtractedDocument {
    /// Purchase invoice with the given amounts
    pub fn purchase(net: f64, vat_21: f64, vat_10_5: f64, total: f64) -> Self {
        Self::with_amounts("purchase", net, vat_21, vat_10_5, total)
    }

    /// Sale invoice with the given amounts
    pub fn sale(net: f64, vat_21: f64, vat_10_5: f64, total: f64) -> Self {
        Self::with_amounts("sale", net, vat_21, vat_10_5, total)
    }

    fn with_amounts(operation: &str, net: f64, vat_21: f64, vat_10_5: f64, total: f64) -> Self {
        Self {
            operation: Some(operation.to_string()),
            net_amount: Some(net),
            vat_21: Some(vat_21),
            vat_10_5: Some(vat_10_5),
            total: Some(total),
            ..Self::default()
        }
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn document_type(mut self, label: &str) -> Self {
        self.document_type = Some(label.to_string());
        self
    }

    pub fn issuer(mut self, tax_id: &str) -> Self {
        self.issuer_tax_id = Some(tax_id.to_string());
        self
    }

    pub fn receiver(mut self, tax_id: &str) -> Self {
        self.receiver_tax_id = Some(tax_id.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

/// Marker left in the batch for a document whose extraction failed.
///
/// Only the error message is required; any record carrying one is a
/// failure, whatever else it lacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub path: String,
    #[serde(alias = "tipo", default, deserialize_with = "lenient::text_or_empty")]
    pub document_type: String,
    #[serde(alias = "_error")]
    pub error: String,
}

/// Result of extracting one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Failed(ExtractionFailure),
    Extracted(ExtractedDocument),
}

impl From<ExtractedDocument> for ExtractionOutcome {
    fn from(document: ExtractedDocument) -> Self {
        ExtractionOutcome::Extracted(document)
    }
}

impl From<ExtractionFailure> for ExtractionOutcome {
    fn from(failure: ExtractionFailure) -> Self {
        ExtractionOutcome::Failed(failure)
    }
}

/// One debit-or-credit line of a journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub account: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub reference: String,
}

impl Posting {
    /// Create a debit posting, rounding the amount to cents
    pub fn debit(date: NaiveDate, account: &str, amount: &BigDecimal, reference: &str) -> Self {
        Self {
            date,
            account: account.to_string(),
            debit: money::round2(amount),
            credit: money::round2(&money::zero()),
            reference: reference.to_string(),
        }
    }

    /// Create a credit posting, rounding the amount to cents
    pub fn credit(date: NaiveDate, account: &str, amount: &BigDecimal, reference: &str) -> Self {
        Self {
            date,
            account: account.to_string(),
            debit: money::round2(&money::zero()),
            credit: money::round2(amount),
            reference: reference.to_string(),
        }
    }
}

/// Per-account aggregation of debits and credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    pub account: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    /// Side on which the account normally carries its balance
    pub normal_balance: EntryType,
    /// Balance expressed on the normal side (negative when reversed)
    pub balance: BigDecimal,
}

/// Row of the income statement or the equity statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub concept: String,
    pub amount: BigDecimal,
}

impl StatementLine {
    pub fn new(concept: &str, amount: BigDecimal) -> Self {
        Self {
            concept: concept.to_string(),
            amount: money::round2(&amount),
        }
    }
}

/// Section of the minimal balance sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSection {
    Assets,
    Liabilities,
    Equity,
}

/// Row of the minimal balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    pub section: BalanceSection,
    pub concept: String,
    pub amount: BigDecimal,
}

/// Line of the purchases or sales VAT book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatBookLine {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Supplier on the purchases book, customer on the sales book
    pub counterparty_tax_id: Option<String>,
    pub document_type: String,
    pub net_amount: BigDecimal,
    pub vat_21: BigDecimal,
    pub vat_10_5: BigDecimal,
    pub total: BigDecimal,
}

impl VatBookLine {
    /// VAT carried by this line at both rates
    pub fn vat_total(&self) -> BigDecimal {
        &self.vat_21 + &self.vat_10_5
    }
}

/// Purchase amount deductible for income tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductibleExpense {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub tax_id: Option<String>,
    pub amount: BigDecimal,
    pub document_type: String,
}

/// Asset detected in a document's text, subject to personal-assets tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrableAsset {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Document type label of the source document
    pub description: String,
    /// Label of the rule that matched
    pub kind: String,
    pub value: BigDecimal,
}

/// Opaque stored copy of a result bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub client_id: String,
    pub created_at: NaiveDateTime,
    pub content: serde_json::Value,
}

impl Snapshot {
    /// Wrap an already serialized bundle
    pub fn new(client_id: &str, created_at: NaiveDateTime, content: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.to_string(),
            created_at,
            content,
        }
    }
}

/// Errors raised by the fallible edges of the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Extraction error: {0}")]
    Extraction(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
