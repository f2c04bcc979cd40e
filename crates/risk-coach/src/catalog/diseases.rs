use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::{BandBounds, RiskBands, RiskClass};

use super::{CatalogError, Table};

/// Static per-disease metadata driving every scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseConfig {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_family_weight")]
    pub family_weight: f64,
    #[serde(default)]
    pub lifestyle_factors: Vec<LifestyleFactor>,
    #[serde(default)]
    pub lab_markers: Vec<String>,
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_family_weight() -> f64 {
    0.30
}

impl DiseaseConfig {
    /// Configured cutoff for `key`, or `default` when the table omits it.
    pub fn threshold(&self, key: &str, default: f64) -> f64 {
        self.thresholds.get(key).copied().unwrap_or(default)
    }

    /// Heritability at or above this weight amplifies the family score.
    pub fn is_highly_heritable(&self) -> bool {
        self.family_weight >= 0.45
    }
}

/// Lifestyle tag a disease declares as relevant.
///
/// Unrecognized tags are kept so that configuration round-trips; they count
/// toward the normalization base but never contribute to a score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LifestyleFactor {
    Obesity,
    Sedentary,
    Smoking,
    Alcohol,
    HighSugar,
    HighFatDiet,
    HighSalt,
    Stress,
    AirPollution,
    AllergenExposure,
    IodineDeficiency,
    HormoneTherapy,
    Other(String),
}

impl LifestyleFactor {
    pub fn tag(&self) -> &str {
        match self {
            LifestyleFactor::Obesity => "obesity",
            LifestyleFactor::Sedentary => "sedentary",
            LifestyleFactor::Smoking => "smoking",
            LifestyleFactor::Alcohol => "alcohol",
            LifestyleFactor::HighSugar => "high_sugar",
            LifestyleFactor::HighFatDiet => "high_fat_diet",
            LifestyleFactor::HighSalt => "high_salt",
            LifestyleFactor::Stress => "stress",
            LifestyleFactor::AirPollution => "air_pollution",
            LifestyleFactor::AllergenExposure => "allergen_exposure",
            LifestyleFactor::IodineDeficiency => "iodine_deficiency",
            LifestyleFactor::HormoneTherapy => "hormone_therapy",
            LifestyleFactor::Other(tag) => tag,
        }
    }
}

impl From<String> for LifestyleFactor {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "obesity" => LifestyleFactor::Obesity,
            "sedentary" => LifestyleFactor::Sedentary,
            "smoking" => LifestyleFactor::Smoking,
            "alcohol" => LifestyleFactor::Alcohol,
            "high_sugar" => LifestyleFactor::HighSugar,
            "high_fat_diet" => LifestyleFactor::HighFatDiet,
            "high_salt" => LifestyleFactor::HighSalt,
            "stress" => LifestyleFactor::Stress,
            "air_pollution" => LifestyleFactor::AirPollution,
            "allergen_exposure" => LifestyleFactor::AllergenExposure,
            "iodine_deficiency" => LifestyleFactor::IodineDeficiency,
            "hormone_therapy" => LifestyleFactor::HormoneTherapy,
            _ => LifestyleFactor::Other(value),
        }
    }
}

impl From<LifestyleFactor> for String {
    fn from(value: LifestyleFactor) -> Self {
        match value {
            LifestyleFactor::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for LifestyleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Deserialize)]
struct DiseaseFile {
    diseases: Vec<DiseaseConfig>,
    #[serde(default)]
    risk_class_thresholds: Option<serde_json::Value>,
}

/// Parsed disease configuration file: the ordered disease table plus the
/// risk-class bands stored alongside it.
#[derive(Debug, Clone)]
pub struct DiseaseTable {
    pub diseases: Vec<DiseaseConfig>,
    pub bands: Table<RiskBands>,
}

impl DiseaseTable {
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, CatalogError> {
        let file: DiseaseFile =
            serde_json::from_str(raw).map_err(|source| CatalogError::Malformed {
                path: origin.to_string(),
                source,
            })?;

        validate_diseases(&file.diseases, origin)?;
        let bands = parse_bands(file.risk_class_thresholds, origin);

        Ok(Self {
            diseases: file.diseases,
            bands,
        })
    }
}

fn validate_diseases(diseases: &[DiseaseConfig], origin: &str) -> Result<(), CatalogError> {
    if diseases.is_empty() {
        return Err(CatalogError::EmptyDiseaseTable {
            path: origin.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for disease in diseases {
        if !seen.insert(disease.id.as_str()) {
            return Err(CatalogError::DuplicateDisease(disease.id.clone()));
        }
        if !(0.0..=1.0).contains(&disease.family_weight) {
            return Err(CatalogError::InvalidFamilyWeight {
                disease_id: disease.id.clone(),
                value: disease.family_weight,
            });
        }
    }
    Ok(())
}

fn parse_bands(raw: Option<serde_json::Value>, origin: &str) -> Table<RiskBands> {
    let Some(raw) = raw else {
        tracing::warn!(path = origin, "no risk_class_thresholds configured; using default bands");
        return Table::Fallback;
    };

    let parsed = serde_json::from_value::<BTreeMap<RiskClass, BandBounds>>(raw)
        .map_err(|err| err.to_string())
        .and_then(|table| RiskBands::from_bounds(&table).map_err(|err| err.to_string()));

    match parsed {
        Ok(bands) => Table::Configured(bands),
        Err(reason) => {
            tracing::warn!(path = origin, %reason, "invalid risk_class_thresholds; using default bands");
            Table::Fallback
        }
    }
}
