//! Client profile: the taxpayer the documents belong to

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::ProcessingContext;
use crate::types::*;
use crate::utils::validation::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    /// CUIT, digits only
    pub tax_id: String,
    /// e.g. "Monotributista", "Responsable Inscripto"
    pub fiscal_condition: String,
}

impl ClientProfile {
    /// Create a profile, rejecting an invalid tax id or empty labels
    pub fn new(name: &str, tax_id: &str, fiscal_condition: &str) -> EngineResult<Self> {
        validate_client_name(name)?;
        validate_tax_id(tax_id)?;
        validate_fiscal_condition(fiscal_condition)?;

        Ok(Self {
            name: name.trim().to_string(),
            tax_id: tax_id.chars().filter(char::is_ascii_digit).collect(),
            fiscal_condition: fiscal_condition.trim().to_string(),
        })
    }

    /// Processing context for this client on the given date
    pub fn context(&self, processing_date: NaiveDate) -> ProcessingContext {
        ProcessingContext::new(processing_date, &self.fiscal_condition)
    }
}
