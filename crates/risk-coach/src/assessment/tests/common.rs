use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::assessment::{
    AssessmentContext, FamilyMember, Gender, Generation, LabValues, Lifestyle, PatientProfile,
    RiskEngine, UserData,
};
use crate::catalog::{Catalog, DiseaseConfig};
use crate::config::BUNDLED_DATA_DIR;

pub(super) fn catalog() -> Catalog {
    Catalog::load_from_dir(Path::new(BUNDLED_DATA_DIR)).expect("bundled catalog loads")
}

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(Arc::new(catalog()))
}

pub(super) fn disease(id: &str) -> DiseaseConfig {
    catalog()
        .disease(id)
        .cloned()
        .unwrap_or_else(|| panic!("disease {id} is bundled"))
}

pub(super) fn relative(role: &str, generation: Generation, issues: &[&str]) -> FamilyMember {
    FamilyMember {
        role: role.to_string(),
        generation,
        known_issues: issues.iter().map(|issue| issue.to_string()).collect(),
        age: None,
        gender: None,
    }
}

pub(super) fn patient(age: u32, gender: &str, height: f64, weight: f64) -> PatientProfile {
    PatientProfile {
        age: Some(age),
        gender: Some(Gender::from(gender.to_string())),
        height: Some(height),
        weight: Some(weight),
        ..PatientProfile::default()
    }
}

pub(super) fn labs(raw: Value) -> LabValues {
    serde_json::from_value(raw).expect("lab values deserialize")
}

pub(super) fn with_family(family: Vec<FamilyMember>) -> UserData {
    UserData {
        family,
        ..UserData::default()
    }
}

pub(super) fn with_lifestyle(lifestyle: Lifestyle) -> UserData {
    UserData {
        lifestyle: Some(lifestyle),
        ..UserData::default()
    }
}

pub(super) fn context(user: &UserData) -> AssessmentContext<'_> {
    AssessmentContext::from_user_data(user)
}

pub(super) fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
