//! Entry generator: postings, VAT books and tax accumulators per document

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AssetRule;
use crate::ingest::NormalizedDocument;
use crate::ledger::accounts::*;
use crate::types::*;
use crate::utils::money;

/// All postings generated for one source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingGroup {
    pub postings: Vec<Posting>,
}

impl PostingGroup {
    pub fn total_debits(&self) -> BigDecimal {
        self.postings.iter().map(|p| &p.debit).sum()
    }

    pub fn total_credits(&self) -> BigDecimal {
        self.postings.iter().map(|p| &p.credit).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }
}

/// Builder for a posting group that always balances.
///
/// Amounts are rounded to cents as they are added. If the two sides differ
/// when the group is built, the difference is booked on
/// [`UNRECONCILED_DIFFERENCES`].
#[derive(Debug)]
pub struct PostingGroupBuilder {
    date: NaiveDate,
    reference: String,
    postings: Vec<Posting>,
}

impl PostingGroupBuilder {
    pub fn new(date: NaiveDate, reference: String) -> Self {
        Self {
            date,
            reference,
            postings: Vec::new(),
        }
    }

    /// Add a debit posting
    pub fn debit(mut self, account: &str, amount: &BigDecimal) -> Self {
        self.postings
            .push(Posting::debit(self.date, account, amount, &self.reference));
        self
    }

    /// Add a credit posting
    pub fn credit(mut self, account: &str, amount: &BigDecimal) -> Self {
        self.postings
            .push(Posting::credit(self.date, account, amount, &self.reference));
        self
    }

    /// Add a debit posting only when `condition` holds
    pub fn debit_if(self, condition: bool, account: &str, amount: &BigDecimal) -> Self {
        if condition {
            self.debit(account, amount)
        } else {
            self
        }
    }

    /// Add a credit posting only when `condition` holds
    pub fn credit_if(self, condition: bool, account: &str, amount: &BigDecimal) -> Self {
        if condition {
            self.credit(account, amount)
        } else {
            self
        }
    }

    /// Build the group, balancing it if needed
    pub fn build(self) -> PostingGroup {
        let mut group = PostingGroup {
            postings: self.postings,
        };

        let difference = group.total_debits() - group.total_credits();
        if difference != money::zero() {
            tracing::warn!(
                reference = %self.reference,
                difference = %difference,
                "declared total differs from net plus VAT"
            );
            let posting = if difference > money::zero() {
                Posting::credit(self.date, UNRECONCILED_DIFFERENCES, &difference, &self.reference)
            } else {
                Posting::debit(
                    self.date,
                    UNRECONCILED_DIFFERENCES,
                    &difference.abs(),
                    &self.reference,
                )
            };
            group.postings.push(posting);
        }

        group
    }
}

/// Everything the entry generator produces for a batch of documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEntries {
    pub postings: Vec<Posting>,
    pub purchases_book: Vec<VatBookLine>,
    pub sales_book: Vec<VatBookLine>,
    pub deductible_expenses: Vec<DeductibleExpense>,
    pub registrable_assets: Vec<RegistrableAsset>,
}

/// Classifies documents and emits their postings and accumulator entries
#[derive(Debug, Clone, Copy)]
pub struct EntryGenerator<'a> {
    asset_rules: &'a [AssetRule],
}

impl<'a> EntryGenerator<'a> {
    pub fn new(asset_rules: &'a [AssetRule]) -> Self {
        Self { asset_rules }
    }

    /// Process documents in order
    pub fn generate(&self, documents: &[NormalizedDocument]) -> GeneratedEntries {
        let mut entries = GeneratedEntries::default();
        for document in documents {
            self.record(document, &mut entries);
        }
        entries
    }

    /// Append the postings and accumulator entries of one document
    pub fn record(&self, document: &NormalizedDocument, entries: &mut GeneratedEntries) {
        match document.operation {
            OperationKind::Purchase => {
                entries.postings.extend(purchase_group(document).postings);
                entries.purchases_book.push(book_line(
                    document,
                    document.issuer_tax_id.clone(),
                ));
                entries.deductible_expenses.push(DeductibleExpense {
                    date: document.date,
                    tax_id: document.issuer_tax_id.clone(),
                    amount: money::round2(&document.net_amount),
                    document_type: document.document_type.clone(),
                });
            }
            OperationKind::Sale => {
                entries.postings.extend(sale_group(document).postings);
                entries.sales_book.push(book_line(
                    document,
                    document.receiver_tax_id.clone(),
                ));
            }
            OperationKind::Other => {
                tracing::warn!(
                    document_type = %document.document_type,
                    date = %document.date,
                    "unrecognised operation, document not booked"
                );
            }
        }

        entries
            .registrable_assets
            .extend(self.detect_assets(document));
    }

    /// One entry per matching rule; rules are independent, so a document
    /// matching several rules is registered several times
    pub fn detect_assets(&self, document: &NormalizedDocument) -> Vec<RegistrableAsset> {
        if document.text.is_empty() {
            return Vec::new();
        }
        let text = document.text.to_lowercase();
        self.asset_rules
            .iter()
            .filter(|rule| rule.matches(&text))
            .map(|rule| RegistrableAsset {
                date: document.date,
                description: document.document_type.clone(),
                kind: rule.label.clone(),
                value: money::round2(&document.total),
            })
            .collect()
    }
}

/// Purchases and VAT credit against suppliers
pub fn purchase_group(document: &NormalizedDocument) -> PostingGroup {
    PostingGroupBuilder::new(
        document.date,
        reference(document.issuer_tax_id.as_deref()),
    )
    .debit(PURCHASES, &document.net_amount)
    .debit_if(document.has_vat(), VAT_CREDIT, &document.vat_total())
    .credit(SUPPLIERS, &document.total)
    .build()
}

/// Customers against sales and VAT debit
pub fn sale_group(document: &NormalizedDocument) -> PostingGroup {
    PostingGroupBuilder::new(
        document.date,
        reference(document.receiver_tax_id.as_deref()),
    )
    .debit(CUSTOMERS, &document.total)
    .credit(SALES, &document.net_amount)
    .credit_if(document.has_vat(), VAT_DEBIT, &document.vat_total())
    .build()
}

fn reference(tax_id: Option<&str>) -> String {
    format!("Tax ID {}", tax_id.unwrap_or("n/a"))
}

fn book_line(document: &NormalizedDocument, counterparty_tax_id: Option<String>) -> VatBookLine {
    VatBookLine {
        date: document.date,
        counterparty_tax_id,
        document_type: document.document_type.clone(),
        net_amount: money::round2(&document.net_amount),
        vat_21: money::round2(&document.vat_21),
        vat_10_5: money::round2(&document.vat_10_5),
        total: money::round2(&document.total),
    }
}
