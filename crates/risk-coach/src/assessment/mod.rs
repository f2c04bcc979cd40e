//! Risk assessment: input model, component scoring, probability composition,
//! classification and explanations.

mod classifier;
mod composer;
mod context;
mod domain;
mod engine;
mod explain;
mod labs;
mod scoring;

#[cfg(test)]
mod tests;

pub use classifier::{BandBounds, BandError, RiskBands, RiskClass};
pub use composer::{
    compose, is_age_sensitive, is_female_only, round_probability, ComponentWeights,
    AGE_SENSITIVE_DISEASES, FEMALE_ONLY_DISEASES,
};
pub use context::AssessmentContext;
pub use domain::{
    body_mass_index, AlcoholUse, BasicInfo, Diet, ExerciseLevel, FamilyMember, Gender, Generation,
    Lifestyle, PatientProfile, StressLevel, UserData,
};
pub use engine::{DiseaseRiskResult, RiskEngine};
pub use explain::MAX_REASONS;
pub use labs::{normalize_lab_key, LabPanel, LabValues};
pub use scoring::ComponentScores;
