use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::RiskClass;

/// Prevention guidance keyed by risk class and by disease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidelineTable {
    #[serde(default)]
    pub risk_classes: BTreeMap<RiskClass, RiskClassGuidance>,
    #[serde(default)]
    pub disease_specific_prevention: BTreeMap<String, DiseasePrevention>,
}

impl GuidelineTable {
    pub fn risk_class(&self, class: RiskClass) -> Option<&RiskClassGuidance> {
        self.risk_classes.get(&class)
    }

    pub fn disease(&self, disease_id: &str) -> Option<&DiseasePrevention> {
        self.disease_specific_prevention.get(disease_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskClassGuidance {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub consult: Option<String>,
}

/// Disease-specific prevention items grouped by category, most important first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseasePrevention {
    #[serde(default)]
    pub diet: Vec<String>,
    #[serde(default)]
    pub exercise: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

/// Display metadata for a risk class, resolved against the guideline table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskClassInfo {
    pub class: RiskClass,
    pub label: String,
    pub description: Option<String>,
    pub color: String,
    pub min: f64,
    pub max: f64,
}
