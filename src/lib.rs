//! # Conta Core
//!
//! Bookkeeping and tax engine for one taxpayer at a time: turns the fields
//! extracted from invoices and receipts into double-entry postings, a trial
//! balance, basic financial statements and four tax declarations.
//!
//! ## Features
//!
//! - **Entry generation**: balanced posting groups for purchases and sales
//! - **VAT books**: purchases and sales books feeding the VAT declaration
//! - **Financial statements**: trial balance, income statement, balance sheet, equity statement
//! - **Declarations**: VAT, income tax, gross receipts and personal assets
//! - **Ingestion**: normalization of untrusted extractor output and an invoice text parser
//! - **Storage abstraction**: trait-based snapshot persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use conta_core::{Engine, ExtractedDocument, ProcessingContext};
//! use chrono::NaiveDate;
//!
//! let engine = Engine::default();
//! let context = ProcessingContext::new(
//!     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
//!     "Monotributista",
//! );
//! let bundle = engine.process_documents(
//!     &[ExtractedDocument::purchase(100.0, 21.0, 0.0, 121.0)],
//!     &context,
//! );
//! assert!(bundle.validations.debits_equal_credits);
//! ```

pub mod client;
pub mod config;
pub mod engine;
pub mod export;
pub mod ingest;
pub mod ledger;
pub mod logging;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use client::ClientProfile;
pub use config::*;
pub use engine::*;
pub use ingest::*;
pub use ledger::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
