//! Processing engine: from extracted documents to the result bundle

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::ingest::normalize;
use crate::ledger::*;
use crate::tax::*;
use crate::types::*;

/// Per-invocation inputs that are not documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingContext {
    /// Substituted for missing dates and used for declaration periods
    pub processing_date: NaiveDate,
    /// Client classification driving the gross-receipts rate
    pub fiscal_condition: String,
}

impl ProcessingContext {
    pub fn new(processing_date: NaiveDate, fiscal_condition: &str) -> Self {
        Self {
            processing_date,
            fiscal_condition: fiscal_condition.to_string(),
        }
    }

    /// Context dated with the local calendar day
    pub fn today(fiscal_condition: &str) -> Self {
        Self::new(chrono::Local::now().date_naive(), fiscal_condition)
    }
}

/// Integrity signals for downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validations {
    pub debits_equal_credits: bool,
}

/// Everything one invocation produces. Field names are a stable contract for
/// renderers and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub postings: Vec<Posting>,
    pub trial_balance: Vec<TrialBalanceLine>,
    pub income_statement: Vec<StatementLine>,
    pub balance_sheet: Vec<BalanceSheetLine>,
    pub equity_statement: Vec<StatementLine>,
    pub vat_purchases_book: Vec<VatBookLine>,
    pub vat_sales_book: Vec<VatBookLine>,
    pub vat_declaration: Vec<VatDeclaration>,
    pub income_tax_declaration: Vec<IncomeTaxDeclaration>,
    pub gross_receipts_declaration: Vec<GrossReceiptsDeclaration>,
    pub personal_assets_declaration: Vec<PersonalAssetsDeclaration>,
    pub validations: Validations,
    pub extraction_errors: Vec<ExtractionFailure>,
}

impl ResultBundle {
    /// Serialize into an opaque snapshot for the persistence collaborator
    pub fn to_snapshot(&self, client_id: &str, created_at: NaiveDateTime) -> EngineResult<Snapshot> {
        let content = serde_json::to_value(self)?;
        Ok(Snapshot::new(client_id, created_at, content))
    }
}

/// The bookkeeping and tax engine.
///
/// Stateless between invocations; one instance can serve any number of
/// clients concurrently.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine after validating its configuration
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process documents that were all extracted successfully
    pub fn process_documents(
        &self,
        documents: &[ExtractedDocument],
        context: &ProcessingContext,
    ) -> ResultBundle {
        let outcomes: Vec<ExtractionOutcome> =
            documents.iter().cloned().map(ExtractionOutcome::from).collect();
        self.process(&outcomes, context)
    }

    /// Run the whole pipeline. Never fails: extraction failures are listed,
    /// bad fields are defaulted and an imbalance only clears the validation
    /// flag.
    pub fn process(&self, outcomes: &[ExtractionOutcome], context: &ProcessingContext) -> ResultBundle {
        let span = tracing::info_span!(
            "process",
            fiscal_condition = %context.fiscal_condition,
            processing_date = %context.processing_date
        );
        let _entered = span.enter();

        let mut documents = Vec::with_capacity(outcomes.len());
        let mut extraction_errors = Vec::new();
        for outcome in outcomes {
            match outcome {
                ExtractionOutcome::Extracted(document) => {
                    documents.push(normalize(document, context.processing_date))
                }
                ExtractionOutcome::Failed(failure) => {
                    tracing::warn!(
                        path = %failure.path,
                        error = %failure.error,
                        "skipping document that failed extraction"
                    );
                    extraction_errors.push(failure.clone());
                }
            }
        }

        let entries = EntryGenerator::new(&self.config.asset_rules).generate(&documents);
        tracing::debug!(
            documents = documents.len(),
            postings = entries.postings.len(),
            assets = entries.registrable_assets.len(),
            "entries generated"
        );

        let trial_balance = trial_balance(&entries.postings);
        let statements = FinancialStatements::derive(&entries.postings);
        let summary = IncomeSummary::from_postings(&entries.postings);

        let fiscal_year = context.processing_date.year();
        let vat = VatCalculator::new(context.processing_date)
            .calculate(&entries.purchases_book, &entries.sales_book);
        let income_tax = IncomeTaxCalculator::new(self.config.income_tax.clone(), fiscal_year)
            .calculate(&summary, &entries.deductible_expenses);
        let gross_receipts = GrossReceiptsCalculator::new(self.config.gross_receipts.clone())
            .calculate(&entries.sales_book, &context.fiscal_condition);
        let personal_assets =
            PersonalAssetsCalculator::new(self.config.personal_assets.clone(), fiscal_year)
                .calculate(&entries.registrable_assets);

        let check = check_balance(&entries.postings);

        tracing::info!(
            documents = documents.len(),
            failed = extraction_errors.len(),
            balanced = check.balanced,
            vat_due = %vat.balance_due,
            "documents processed"
        );

        ResultBundle {
            postings: entries.postings,
            trial_balance,
            income_statement: statements.income_statement,
            balance_sheet: statements.balance_sheet,
            equity_statement: statements.equity_statement,
            vat_purchases_book: entries.purchases_book,
            vat_sales_book: entries.sales_book,
            vat_declaration: vec![vat],
            income_tax_declaration: vec![income_tax],
            gross_receipts_declaration: vec![gross_receipts],
            personal_assets_declaration: vec![personal_assets],
            validations: Validations {
                debits_equal_credits: check.balanced,
            },
            extraction_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn context() -> ProcessingContext {
        ProcessingContext::new(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(), "Monotributista")
    }

    #[test]
    fn test_empty_batch() {
        let bundle = Engine::default().process(&[], &context());

        assert!(bundle.postings.is_empty());
        assert!(bundle.trial_balance.is_empty());
        assert!(bundle.vat_purchases_book.is_empty());
        assert!(bundle.vat_sales_book.is_empty());
        assert!(bundle.validations.debits_equal_credits);
        assert_eq!(bundle.vat_declaration.len(), 1);
        assert_eq!(bundle.vat_declaration[0].period, "09/2025");
        assert_eq!(bundle.vat_declaration[0].balance_due, BigDecimal::from(0));
        assert_eq!(bundle.income_tax_declaration[0].determined_tax, BigDecimal::from(0));
        assert_eq!(bundle.income_tax_declaration[0].fiscal_year, 2025);
        assert_eq!(bundle.gross_receipts_declaration[0].determined_tax, BigDecimal::from(0));
        assert_eq!(bundle.personal_assets_declaration[0].determined_tax, BigDecimal::from(0));
    }

    #[test]
    fn test_failed_extraction_recorded_not_booked() {
        let outcomes = vec![
            ExtractionOutcome::Failed(ExtractionFailure {
                path: "/data/a.pdf".to_string(),
                document_type: "factura".to_string(),
                error: "unreadable".to_string(),
            }),
            ExtractedDocument::purchase(100.0, 21.0, 0.0, 121.0).into(),
        ];

        let bundle = Engine::default().process(&outcomes, &context());

        assert_eq!(bundle.extraction_errors.len(), 1);
        assert_eq!(bundle.extraction_errors[0].path, "/data/a.pdf");
        assert_eq!(bundle.postings.len(), 3);
        assert!(bundle.validations.debits_equal_credits);
    }

    #[test]
    fn test_missing_date_uses_processing_date() {
        let bundle = Engine::default().process_documents(
            &[ExtractedDocument::sale(10.0, 0.0, 0.0, 10.0).date("not a date")],
            &context(),
        );
        assert!(bundle
            .postings
            .iter()
            .all(|p| p.date == context().processing_date));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.income_tax.tiers.clear();
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }
}
