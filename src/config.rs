//! Engine configuration: rate tables, keyword rules and jurisdiction
//!
//! Everything the calculators need is carried here explicitly and handed to
//! them by the engine. Defaults hold the statutory values.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{EngineError, EngineResult};

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub income_tax: IncomeTaxConfig,
    pub gross_receipts: GrossReceiptsConfig,
    pub personal_assets: PersonalAssetsConfig,
    /// Independent rules; every matching rule registers the document once
    pub asset_rules: Vec<AssetRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            income_tax: IncomeTaxConfig::default(),
            gross_receipts: GrossReceiptsConfig::default(),
            personal_assets: PersonalAssetsConfig::default(),
            asset_rules: AssetRule::standard_rules(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Check rate tables and rules for consistency
    pub fn validate(&self) -> EngineResult<()> {
        self.income_tax.validate()?;

        validate_rate("gross receipts general rate", &self.gross_receipts.general_rate)?;
        validate_rate(
            "gross receipts professional rate",
            &self.gross_receipts.professional_rate,
        )?;
        validate_rate("personal assets rate", &self.personal_assets.rate)?;

        if self.gross_receipts.jurisdiction.trim().is_empty() {
            return Err(EngineError::Config(
                "Gross receipts jurisdiction cannot be empty".to_string(),
            ));
        }

        for rule in &self.asset_rules {
            if rule.label.trim().is_empty() {
                return Err(EngineError::Config(
                    "Asset rule label cannot be empty".to_string(),
                ));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(EngineError::Config(format!(
                    "Asset rule '{}' has no keywords",
                    rule.label
                )));
            }
        }

        Ok(())
    }
}

fn validate_rate(name: &str, rate: &BigDecimal) -> EngineResult<()> {
    if *rate < BigDecimal::from(0) || *rate > BigDecimal::from(100) {
        return Err(EngineError::Config(format!(
            "{} must be between 0 and 100, got {}",
            name, rate
        )));
    }
    Ok(())
}

/// One tier of the flat income tax table.
///
/// The rate of the first tier whose ceiling is not exceeded applies to the
/// whole taxable income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxTier {
    /// Inclusive ceiling; `None` marks the open top tier
    pub up_to: Option<BigDecimal>,
    /// Rate in percent
    pub rate: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeTaxConfig {
    pub tiers: Vec<IncomeTaxTier>,
    /// Number of advance installments the determined tax is split into
    pub advance_installments: u32,
}

impl Default for IncomeTaxConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                IncomeTaxTier {
                    up_to: Some(BigDecimal::from(500_000)),
                    rate: BigDecimal::from(25),
                },
                IncomeTaxTier {
                    up_to: Some(BigDecimal::from(5_000_000)),
                    rate: BigDecimal::from(30),
                },
                IncomeTaxTier {
                    up_to: None,
                    rate: BigDecimal::from(35),
                },
            ],
            advance_installments: 5,
        }
    }
}

impl IncomeTaxConfig {
    /// Rate applied to the whole taxable income
    pub fn rate_for(&self, taxable_income: &BigDecimal) -> Option<&BigDecimal> {
        self.tiers
            .iter()
            .find(|tier| match &tier.up_to {
                Some(ceiling) => taxable_income <= ceiling,
                None => true,
            })
            .map(|tier| &tier.rate)
    }

    fn validate(&self) -> EngineResult<()> {
        if self.tiers.is_empty() {
            return Err(EngineError::Config(
                "Income tax table must have at least one tier".to_string(),
            ));
        }

        if self.advance_installments == 0 {
            return Err(EngineError::Config(
                "Advance installments must be at least 1".to_string(),
            ));
        }

        let last = self.tiers.len() - 1;
        let mut previous: Option<&BigDecimal> = None;
        for (index, tier) in self.tiers.iter().enumerate() {
            validate_rate("income tax rate", &tier.rate)?;
            match (&tier.up_to, index == last) {
                (None, false) => {
                    return Err(EngineError::Config(
                        "Only the last income tax tier may be open-ended".to_string(),
                    ))
                }
                (None, true) => {}
                (Some(_), true) => {
                    return Err(EngineError::Config(
                        "The last income tax tier must be open-ended".to_string(),
                    ))
                }
                (Some(ceiling), false) => {
                    if previous.is_some_and(|p| ceiling <= p) {
                        return Err(EngineError::Config(format!(
                            "Income tax ceilings must increase, got {} after {}",
                            ceiling,
                            previous.map(|p| p.to_string()).unwrap_or_default()
                        )));
                    }
                    previous = Some(ceiling);
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrossReceiptsConfig {
    pub jurisdiction: String,
    /// Rate in percent for the general regime
    pub general_rate: BigDecimal,
    /// Rate in percent for professional services
    pub professional_rate: BigDecimal,
    /// Case-insensitive substrings of the fiscal-condition label that select
    /// the professional rate
    pub professional_keywords: Vec<String>,
}

impl Default for GrossReceiptsConfig {
    fn default() -> Self {
        Self {
            jurisdiction: "Tucumán".to_string(),
            general_rate: BigDecimal::new(35.into(), 1),
            professional_rate: BigDecimal::new(175.into(), 2),
            professional_keywords: vec!["professional".to_string(), "profesional".to_string()],
        }
    }
}

impl GrossReceiptsConfig {
    /// Whether the fiscal-condition label selects the professional rate
    pub fn is_professional(&self, fiscal_condition: &str) -> bool {
        let label = fiscal_condition.to_lowercase();
        self.professional_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| label.contains(&k.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalAssetsConfig {
    /// Rate in percent, applied without exemption threshold
    pub rate: BigDecimal,
}

impl Default for PersonalAssetsConfig {
    fn default() -> Self {
        Self {
            rate: BigDecimal::new(5.into(), 1),
        }
    }
}

/// Substring rule detecting a registrable asset in a document's free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRule {
    pub label: String,
    /// Case-insensitive substrings; any one of them triggers the rule
    pub keywords: Vec<String>,
}

impl AssetRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// The vehicle, real estate and generic asset rules
    pub fn standard_rules() -> Vec<AssetRule> {
        vec![
            AssetRule::new("vehicle", &["vehicle", "vehículo", "vehiculo"]),
            AssetRule::new("real estate", &["real estate", "inmueble"]),
            AssetRule::new("asset", &["asset", "activo"]),
        ]
    }

    /// Whether the already lower-cased text triggers this rule
    pub fn matches(&self, lowercase_text: &str) -> bool {
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| lowercase_text.contains(&k.to_lowercase()))
    }
}
