//! Static configuration tables consumed by the risk engine.
//!
//! The disease table is mandatory: without it there is nothing to score, so a
//! missing or corrupt file is reported as a [`CatalogError`]. Every other table
//! degrades to built-in guidance and records that through [`Table::Fallback`]
//! so callers can tell configured data from defaults.

mod diseases;
mod guidelines;
mod screening;

pub use diseases::{DiseaseConfig, DiseaseTable, LifestyleFactor};
pub use guidelines::{DiseasePrevention, GuidelineTable, RiskClassGuidance, RiskClassInfo};
pub use screening::{ScreeningTest, TestTable};

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::assessment::{RiskBands, RiskClass};
use crate::config::CatalogConfig;

pub const DISEASES_FILE: &str = "diseases_config.json";
pub const GUIDELINES_FILE: &str = "guidelines.json";
pub const TESTS_FILE: &str = "tests_map.json";

/// A table that either came from configuration or is replaced by built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum Table<T> {
    Configured(T),
    Fallback,
}

impl<T> Table<T> {
    pub fn configured(&self) -> Option<&T> {
        match self {
            Table::Configured(table) => Some(table),
            Table::Fallback => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Table::Fallback)
    }

    pub fn source(&self) -> TableSource {
        match self {
            Table::Configured(_) => TableSource::Configured,
            Table::Fallback => TableSource::Fallback,
        }
    }
}

impl<T: Clone + Default> Table<T> {
    pub fn or_default(&self) -> T {
        self.configured().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    Configured,
    Fallback,
}

/// Where each table in a loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSources {
    pub diseases: TableSource,
    pub risk_bands: TableSource,
    pub guidelines: TableSource,
    pub tests: TableSource,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("disease table {path} lists no diseases")]
    EmptyDiseaseTable { path: String },
    #[error("disease id '{0}' is configured more than once")]
    DuplicateDisease(String),
    #[error("disease '{disease_id}' has family_weight {value} outside [0, 1]")]
    InvalidFamilyWeight { disease_id: String, value: f64 },
}

/// Read-only bundle of every table the engine and advisors consult.
#[derive(Debug, Clone)]
pub struct Catalog {
    diseases: Vec<DiseaseConfig>,
    bands: Table<RiskBands>,
    guidelines: Table<GuidelineTable>,
    tests: Table<TestTable>,
}

impl Catalog {
    pub fn new(
        diseases: DiseaseTable,
        guidelines: Table<GuidelineTable>,
        tests: Table<TestTable>,
    ) -> Self {
        Self {
            diseases: diseases.diseases,
            bands: diseases.bands,
            guidelines,
            tests,
        }
    }

    /// Load every table from `config.data_dir`.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::load_from_dir(&config.data_dir)
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let disease_path = dir.join(DISEASES_FILE);
        let raw = std::fs::read_to_string(&disease_path).map_err(|source| CatalogError::Io {
            path: display(&disease_path),
            source,
        })?;
        let diseases = DiseaseTable::from_json_str(&raw, &display(&disease_path))?;

        let guidelines = load_optional::<GuidelineTable>(dir.join(GUIDELINES_FILE));
        let tests = load_optional::<TestTable>(dir.join(TESTS_FILE));

        let catalog = Self::new(diseases, guidelines, tests);
        info!(
            diseases = catalog.diseases.len(),
            sources = ?catalog.sources(),
            data_dir = %dir.display(),
            "risk catalog loaded"
        );
        Ok(catalog)
    }

    pub fn diseases(&self) -> &[DiseaseConfig] {
        &self.diseases
    }

    pub fn disease(&self, disease_id: &str) -> Option<&DiseaseConfig> {
        self.diseases.iter().find(|disease| disease.id == disease_id)
    }

    pub fn bands(&self) -> RiskBands {
        self.bands.or_default()
    }

    pub fn guidelines(&self) -> Option<&GuidelineTable> {
        self.guidelines.configured()
    }

    pub fn tests(&self) -> Option<&TestTable> {
        self.tests.configured()
    }

    pub fn sources(&self) -> CatalogSources {
        CatalogSources {
            diseases: TableSource::Configured,
            risk_bands: self.bands.source(),
            guidelines: self.guidelines.source(),
            tests: self.tests.source(),
        }
    }

    /// Label, color and band of every risk class, preferring configured text.
    pub fn risk_classes(&self) -> Vec<RiskClassInfo> {
        let bands = self.bands();
        RiskClass::ALL
            .iter()
            .map(|class| {
                let configured = self.guidelines().and_then(|table| table.risk_class(*class));
                let bounds = bands.bounds(*class);
                RiskClassInfo {
                    class: *class,
                    label: configured
                        .and_then(|info| info.label.clone())
                        .unwrap_or_else(|| class.label().to_string()),
                    description: configured.and_then(|info| info.description.clone()),
                    color: configured
                        .and_then(|info| info.color.clone())
                        .unwrap_or_else(|| class.color().to_string()),
                    min: bounds.min,
                    max: bounds.max,
                }
            })
            .collect()
    }
}

fn load_optional<T: DeserializeOwned>(path: PathBuf) -> Table<T> {
    let parsed = std::fs::read_to_string(&path)
        .map_err(|source| CatalogError::Io {
            path: display(&path),
            source,
        })
        .and_then(|raw| {
            serde_json::from_str::<T>(&raw).map_err(|source| CatalogError::Malformed {
                path: display(&path),
                source,
            })
        });

    match parsed {
        Ok(table) => Table::Configured(table),
        Err(err) => {
            warn!(error = %err, "using built-in fallback guidance");
            Table::Fallback
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
