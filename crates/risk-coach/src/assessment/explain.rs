use crate::catalog::DiseaseConfig;

use super::composer::is_age_sensitive;
use super::context::AssessmentContext;
use super::labs::marker_label;
use super::scoring::{
    ComponentScores, FamilySignals, LabLevel, LabReading, LifestyleFinding, ScoreSignals,
};

pub const MAX_REASONS: usize = 5;

const URGENT_PROBABILITY: f64 = 0.75;
const AGE_REASON_AFTER: u32 = 50;

/// Ranked, human-readable reasons for one disease result.
pub(crate) fn explain(
    disease: &DiseaseConfig,
    ctx: &AssessmentContext<'_>,
    scores: &ComponentScores,
    signals: &ScoreSignals,
    probability: f64,
) -> Vec<String> {
    let family = family_reasons(&signals.family);
    let lifestyle: Vec<String> = signals.lifestyle.iter().map(lifestyle_reason).collect();
    let labs: Vec<String> = signals.labs.iter().filter_map(lab_reason).collect();

    let mut reasons = Vec::new();
    if probability >= URGENT_PROBABILITY && !labs.is_empty() {
        reasons.extend(labs.into_iter().take(2));
        reasons.extend(family.into_iter().take(1));
        reasons.extend(lifestyle.into_iter().take(1));
    } else {
        reasons.extend(family.into_iter().take(2));
        reasons.extend(lifestyle.into_iter().take(2));
        reasons.extend(labs.into_iter().take(2));
    }

    if reasons.is_empty() {
        if scores.family > 0.4 {
            reasons.push("Family history indicates predisposition".to_string());
        }
        if scores.lifestyle > 0.5 {
            reasons.push("Lifestyle factors increase risk".to_string());
        }
        if scores.lab > 0.5 {
            reasons.push("Biomarkers show concerning patterns".to_string());
        }
    }

    if is_age_sensitive(&disease.id) && ctx.basic.age > AGE_REASON_AFTER {
        reasons.push(format!(
            "Age ({}) increases risk for this condition",
            ctx.basic.age
        ));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// Closest relatives first: parents, siblings, children, then extended family.
fn family_reasons(signals: &FamilySignals) -> Vec<String> {
    let mut reasons = Vec::new();

    match signals.parents.as_slice() {
        [] => {}
        [single] => reasons.push(has_condition(single)),
        parents => reasons.push(format!("Both parents affected: {}", parents.join(" and "))),
    }
    match signals.siblings.as_slice() {
        [] => {}
        [single] => reasons.push(has_condition(single)),
        siblings => reasons.push(format!(
            "{} siblings affected by this condition",
            siblings.len()
        )),
    }
    match signals.children.as_slice() {
        [] => {}
        [single] => reasons.push(has_condition(single)),
        children => reasons.push(format!("{} children affected", children.len())),
    }
    match signals.extended.as_slice() {
        [] => {}
        [single] => reasons.push(has_condition(single)),
        [first, second] => reasons.push(format!("{first} and {second} have this condition")),
        relatives => reasons.push(format!(
            "{} relatives in previous generation affected",
            relatives.len()
        )),
    }

    reasons
}

fn has_condition(role: &str) -> String {
    format!("{role} has this condition")
}

fn lifestyle_reason(finding: &LifestyleFinding) -> String {
    match finding {
        LifestyleFinding::Obesity { bmi } => {
            format!("BMI of {bmi:.1} indicates obesity, increasing risk")
        }
        LifestyleFinding::Overweight { bmi } => {
            format!("BMI of {bmi:.1} indicates overweight status")
        }
        LifestyleFinding::Sedentary => {
            "Sedentary lifestyle with minimal physical activity".to_string()
        }
        LifestyleFinding::Smoking => "Current smoking significantly elevates risk".to_string(),
        LifestyleFinding::HeavyAlcohol => "Heavy alcohol consumption".to_string(),
        LifestyleFinding::HighSugarDiet => "High sugar intake and poor dietary habits".to_string(),
        LifestyleFinding::HighFatDiet => "High-fat diet with frequent fried foods".to_string(),
        LifestyleFinding::HighSaltDiet => "High sodium intake from processed foods".to_string(),
        LifestyleFinding::HighStress => "Chronic high stress levels".to_string(),
        LifestyleFinding::ShortSleep { hours } => {
            format!("Insufficient sleep ({hours} hours nightly)")
        }
    }
}

/// Describes where a value sits relative to its reference range. Wording stays
/// observational; a reading is never presented as a diagnosis.
fn lab_reason(reading: &LabReading) -> Option<String> {
    let level = reading.level.filter(|_| reading.contribution > 0.0)?;
    let (label, unit) = marker_label(&reading.marker);
    let tail = match (reading.marker.as_str(), level) {
        ("hba1c", LabLevel::Elevated) => ", suggesting higher diabetes risk",
        ("hba1c" | "fasting_glucose", LabLevel::Borderline) => ", a prediabetic pattern",
        ("fasting_glucose", LabLevel::Elevated) => ", above the fasting reference range",
        ("hdl", LabLevel::Low) => ", reducing cardiovascular protection",
        ("tsh", _) => ", suggesting thyroid dysfunction",
        ("hemoglobin", _) => ", indicating an anemia pattern",
        _ => "",
    };

    Some(format!(
        "{label} {} at {}{unit}{tail}",
        level.describe(),
        reading.value
    ))
}
