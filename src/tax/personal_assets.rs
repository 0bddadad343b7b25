//! Personal-assets tax declaration over registrable assets

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::PersonalAssetsConfig;
use crate::types::RegistrableAsset;
use crate::utils::money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalAssetsDeclaration {
    pub fiscal_year: i32,
    pub taxable_assets_total: BigDecimal,
    /// Rate in percent
    pub rate: BigDecimal,
    pub determined_tax: BigDecimal,
}

/// Personal-assets calculator. No exemption threshold is applied.
#[derive(Debug, Clone)]
pub struct PersonalAssetsCalculator {
    config: PersonalAssetsConfig,
    fiscal_year: i32,
}

impl PersonalAssetsCalculator {
    pub fn new(config: PersonalAssetsConfig, fiscal_year: i32) -> Self {
        Self {
            config,
            fiscal_year,
        }
    }

    pub fn calculate(&self, assets: &[RegistrableAsset]) -> PersonalAssetsDeclaration {
        let total: BigDecimal = assets.iter().map(|asset| &asset.value).sum();
        let tax = money::percent_of(&total, &self.config.rate);

        PersonalAssetsDeclaration {
            fiscal_year: self.fiscal_year,
            taxable_assets_total: money::round2(&total),
            rate: self.config.rate.clone(),
            determined_tax: money::round2(&tax),
        }
    }
}
