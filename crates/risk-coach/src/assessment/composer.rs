use serde::Serialize;

use crate::catalog::DiseaseConfig;

use super::context::AssessmentContext;
use super::scoring::ComponentScores;

/// Conditions whose incidence rises sharply with age.
pub const AGE_SENSITIVE_DISEASES: [&str; 3] = ["type2_diabetes", "cad", "hypertension"];

/// Conditions that only apply to female patients.
pub const FEMALE_ONLY_DISEASES: [&str; 1] = ["pcos"];

const AGE_BOOST_AFTER: u32 = 45;
const MAX_PROBABILITY: f64 = 0.99;

pub fn is_age_sensitive(disease_id: &str) -> bool {
    AGE_SENSITIVE_DISEASES.contains(&disease_id)
}

pub fn is_female_only(disease_id: &str) -> bool {
    FEMALE_ONLY_DISEASES.contains(&disease_id)
}

/// Relative weight of each component in the composed probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentWeights {
    pub family: f64,
    pub lifestyle: f64,
    pub lab: f64,
}

impl ComponentWeights {
    pub const WITH_LABS: Self = Self {
        family: 0.40,
        lifestyle: 0.35,
        lab: 0.25,
    };

    /// Used when labs are missing so that users without a lab report are not penalized.
    pub const WITHOUT_LABS: Self = Self {
        family: 0.50,
        lifestyle: 0.40,
        lab: 0.10,
    };

    pub fn select(disease: &DiseaseConfig, ctx: &AssessmentContext<'_>) -> Self {
        if !ctx.labs.is_empty() && !disease.lab_markers.is_empty() {
            Self::WITH_LABS
        } else {
            Self::WITHOUT_LABS
        }
    }

    fn apply(&self, scores: &ComponentScores) -> f64 {
        scores.family * self.family + scores.lifestyle * self.lifestyle + scores.lab * self.lab
    }
}

/// Unrounded probability in `[0, 0.99]`.
pub fn compose(
    disease: &DiseaseConfig,
    scores: &ComponentScores,
    ctx: &AssessmentContext<'_>,
) -> f64 {
    let weights = ComponentWeights::select(disease, ctx);
    let mut probability = weights.apply(scores);

    if scores.family > 0.6 {
        probability = (probability + disease.family_weight * 0.15).min(1.0);
    }
    if scores.lab > 0.7 {
        probability = (probability + 0.12).min(1.0);
    }
    if is_female_only(&disease.id) && !ctx.basic.gender.is_female() {
        probability = 0.0;
    }
    if is_age_sensitive(&disease.id) && ctx.basic.age > AGE_BOOST_AFTER {
        probability = (probability + 0.08).min(1.0);
    }

    if probability.is_nan() {
        return 0.0;
    }
    probability.clamp(0.0, MAX_PROBABILITY)
}

/// Two-decimal rounding applied to emitted probabilities only.
pub fn round_probability(probability: f64) -> f64 {
    (probability * 100.0).round() / 100.0
}
