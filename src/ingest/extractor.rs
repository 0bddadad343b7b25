//! Batch extraction over an arbitrary [`DocumentExtractor`]

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::text::parse_invoice_text;
use crate::traits::DocumentExtractor;
use crate::types::*;

/// Stored document waiting to be extracted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Type label given when the document was uploaded
    pub document_type: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, document_type: &str) -> Self {
        Self {
            path: path.into(),
            document_type: document_type.to_string(),
        }
    }
}

/// Extract every source document. A failing document does not abort the
/// batch; it is kept as an [`ExtractionFailure`] marker in its position.
pub fn extract_batch<E>(extractor: &E, sources: &[SourceDocument]) -> Vec<ExtractionOutcome>
where
    E: DocumentExtractor + ?Sized,
{
    sources
        .iter()
        .map(
            |source| match extractor.extract(&source.path, &source.document_type) {
                Ok(document) => ExtractionOutcome::Extracted(document),
                Err(error) => {
                    tracing::warn!(
                        path = %source.path.display(),
                        error = %error,
                        "document extraction failed"
                    );
                    ExtractionOutcome::Failed(ExtractionFailure {
                        path: source.path.display().to_string(),
                        document_type: source.document_type.clone(),
                        error: error.to_string(),
                    })
                }
            },
        )
        .collect()
}

/// Extractor for documents whose text is already available as UTF-8 files
/// (text layers exported from PDFs, OCR output)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl DocumentExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path, document_type: &str) -> EngineResult<ExtractedDocument> {
        let text = fs::read_to_string(path).map_err(|e| {
            EngineError::Extraction(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(parse_invoice_text(&text, document_type))
    }
}
