//! Ingestion: turning extractor output into canonical documents

pub mod extractor;
pub mod normalizer;
pub mod text;

pub use extractor::*;
pub use normalizer::*;
pub use text::parse_invoice_text;
