//! Family, lifestyle and lab component scorers.
//!
//! Each scorer returns its clamped score together with the readings that
//! produced it. Explanations are rendered from those readings so that every
//! reason shown to a user traces back to something that moved the score.

use serde::Serialize;

use crate::catalog::{DiseaseConfig, LifestyleFactor};

use super::context::AssessmentContext;
use super::domain::{Diet, ExerciseLevel, Generation, StressLevel};

pub(crate) const FAMILY_BASELINE: f64 = 0.10;
pub(crate) const LIFESTYLE_BASELINE: f64 = 0.20;
pub(crate) const LIFESTYLE_NOT_APPLICABLE: f64 = 0.15;
pub(crate) const LAB_BASELINE: f64 = 0.15;
pub(crate) const LAB_NOT_APPLICABLE: f64 = 0.10;

const SCORE_FLOOR: f64 = 0.10;
const SCORE_CEILING: f64 = 0.95;
const LIFESTYLE_CEILING: f64 = 0.90;

/// The three component scores computed for one disease.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub family: f64,
    pub lifestyle: f64,
    pub lab: f64,
}

/// Everything the explanation and consult layers need from scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ScoreSignals {
    pub family: FamilySignals,
    pub lifestyle: Vec<LifestyleFinding>,
    pub labs: Vec<LabReading>,
}

pub(crate) fn score_disease(
    disease: &DiseaseConfig,
    ctx: &AssessmentContext<'_>,
) -> (ComponentScores, ScoreSignals) {
    let (family, family_signals) = family_score(disease, ctx);
    let (lifestyle, findings) = lifestyle_score(disease, ctx);
    let (lab, readings) = lab_score(disease, ctx);

    (
        ComponentScores {
            family,
            lifestyle,
            lab,
        },
        ScoreSignals {
            family: family_signals,
            lifestyle: findings,
            labs: readings,
        },
    )
}

/// Display labels of affected relatives, grouped by generation tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FamilySignals {
    pub children: Vec<String>,
    pub siblings: Vec<String>,
    pub parents: Vec<String>,
    pub extended: Vec<String>,
}

impl FamilySignals {
    fn tier_mut(&mut self, generation: Generation) -> &mut Vec<String> {
        match generation {
            Generation::Children => &mut self.children,
            Generation::Siblings => &mut self.siblings,
            Generation::Parents => &mut self.parents,
            Generation::Extended => &mut self.extended,
        }
    }
}

fn tier_contribution(count: usize, per_member: f64, cap: f64) -> f64 {
    (count as f64 * per_member).min(cap)
}

pub(crate) fn family_score(
    disease: &DiseaseConfig,
    ctx: &AssessmentContext<'_>,
) -> (f64, FamilySignals) {
    let mut signals = FamilySignals::default();
    if ctx.family.is_empty() {
        return (FAMILY_BASELINE, signals);
    }

    for member in ctx.affected_relatives(&disease.id) {
        signals.tier_mut(member.generation).push(member.role_label());
    }

    let mut score = tier_contribution(signals.children.len(), 0.25, 0.50)
        + tier_contribution(signals.siblings.len(), 0.25, 0.50)
        + tier_contribution(signals.parents.len(), 0.30, 0.60)
        + tier_contribution(signals.extended.len(), 0.10, 0.30);

    if disease.is_highly_heritable() {
        score = (score * 1.4).min(1.0);
    }

    (clamp(score + 0.05, SCORE_FLOOR, SCORE_CEILING), signals)
}

/// A lifestyle habit that raised the score and is worth telling the user about.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LifestyleFinding {
    Obesity { bmi: f64 },
    Overweight { bmi: f64 },
    Sedentary,
    Smoking,
    HeavyAlcohol,
    HighSugarDiet,
    HighFatDiet,
    HighSaltDiet,
    HighStress,
    ShortSleep { hours: f64 },
}

pub(crate) fn lifestyle_score(
    disease: &DiseaseConfig,
    ctx: &AssessmentContext<'_>,
) -> (f64, Vec<LifestyleFinding>) {
    let mut findings = Vec::new();
    let Some(lifestyle) = ctx.lifestyle else {
        return (LIFESTYLE_BASELINE, findings);
    };
    if disease.lifestyle_factors.is_empty() {
        return (LIFESTYLE_NOT_APPLICABLE, findings);
    }

    let bmi = ctx.basic.bmi;
    let diet = lifestyle.diet();
    let mut total = 0.0;

    for factor in &disease.lifestyle_factors {
        total += match factor {
            LifestyleFactor::Obesity if bmi >= 30.0 => {
                findings.push(LifestyleFinding::Obesity { bmi });
                1.0
            }
            LifestyleFactor::Obesity if bmi >= 25.0 => {
                findings.push(LifestyleFinding::Overweight { bmi });
                0.5
            }
            LifestyleFactor::Sedentary if lifestyle.exercise().is_inactive() => {
                findings.push(LifestyleFinding::Sedentary);
                1.0
            }
            LifestyleFactor::Sedentary if lifestyle.exercise() == ExerciseLevel::Occasional => 0.5,
            LifestyleFactor::Smoking if lifestyle.smokes() => {
                findings.push(LifestyleFinding::Smoking);
                1.0
            }
            LifestyleFactor::Alcohol if lifestyle.alcohol().is_heavy() => {
                findings.push(LifestyleFinding::HeavyAlcohol);
                1.0
            }
            LifestyleFactor::Alcohol if lifestyle.alcohol().is_moderate() => 0.4,
            LifestyleFactor::HighSugar if diet == Diet::HighSugar => {
                findings.push(LifestyleFinding::HighSugarDiet);
                1.0
            }
            LifestyleFactor::HighFatDiet if diet == Diet::HighFat => {
                findings.push(LifestyleFinding::HighFatDiet);
                1.0
            }
            LifestyleFactor::HighSalt if diet == Diet::HighSalt => {
                findings.push(LifestyleFinding::HighSaltDiet);
                1.0
            }
            LifestyleFactor::Stress if lifestyle.stress().is_high() => {
                findings.push(LifestyleFinding::HighStress);
                1.0
            }
            LifestyleFactor::Stress if lifestyle.stress() == StressLevel::Moderate => 0.5,
            // No direct input exists for exposure factors; assume a modest default.
            LifestyleFactor::AirPollution | LifestyleFactor::AllergenExposure => 0.3,
            LifestyleFactor::IodineDeficiency | LifestyleFactor::HormoneTherapy => 0.2,
            _ => 0.0,
        };
    }

    let mut score = total / disease.lifestyle_factors.len() as f64;
    if lifestyle.sleep_deficit() {
        findings.push(LifestyleFinding::ShortSleep {
            hours: lifestyle.sleep_hours(),
        });
        score += 0.08;
    }

    (clamp(score, SCORE_FLOOR, LIFESTYLE_CEILING), findings)
}

/// How far a reading sits from its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabLevel {
    VeryHigh,
    High,
    Elevated,
    Borderline,
    Low,
    BorderlineLow,
}

impl LabLevel {
    pub fn describe(&self) -> &'static str {
        match self {
            LabLevel::VeryHigh => "very high",
            LabLevel::High => "high",
            LabLevel::Elevated => "elevated",
            LabLevel::Borderline => "borderline",
            LabLevel::Low => "low",
            LabLevel::BorderlineLow => "borderline low",
        }
    }
}

/// One evaluated marker. Readings with a zero contribution are kept so the
/// averaging base stays visible, but they never produce a reason.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabReading {
    pub marker: String,
    pub value: f64,
    pub contribution: f64,
    pub level: Option<LabLevel>,
}

pub(crate) fn lab_score(
    disease: &DiseaseConfig,
    ctx: &AssessmentContext<'_>,
) -> (f64, Vec<LabReading>) {
    if ctx.labs.is_empty() || disease.thresholds.is_empty() {
        return (LAB_BASELINE, Vec::new());
    }
    if disease.lab_markers.is_empty() {
        return (LAB_NOT_APPLICABLE, Vec::new());
    }

    let readings: Vec<LabReading> = disease
        .lab_markers
        .iter()
        .filter_map(|marker| {
            let value = ctx.labs.get(marker)?;
            let (contribution, level) = grade_marker(disease, marker, value);
            Some(LabReading {
                marker: marker.clone(),
                value,
                contribution,
                level,
            })
        })
        .collect();

    if readings.is_empty() {
        return (LAB_BASELINE, readings);
    }

    let average =
        readings.iter().map(|reading| reading.contribution).sum::<f64>() / readings.len() as f64;
    (clamp(average, SCORE_FLOOR, SCORE_CEILING), readings)
}

fn grade_marker(disease: &DiseaseConfig, marker: &str, value: f64) -> (f64, Option<LabLevel>) {
    use LabLevel::*;

    let t = |key: &str, default: f64| disease.threshold(key, default);
    let graded = match marker {
        "hba1c" => two_tier(
            value,
            (t("hba1c_diabetic", 6.5), 1.0, Elevated),
            (t("hba1c_prediabetic", 5.7), 0.6, Borderline),
        ),
        "fasting_glucose" => two_tier(
            value,
            (t("fasting_glucose_diabetic", 126.0), 1.0, Elevated),
            (t("fasting_glucose_prediabetic", 100.0), 0.6, Borderline),
        ),
        "ldl" => two_tier(
            value,
            (t("ldl_very_high", 190.0), 1.0, VeryHigh),
            (t("ldl_high", 130.0), 0.7, Elevated),
        ),
        "hdl" if value < t("hdl_low", 40.0) => Some((0.8, Low)),
        "hdl" if value < 50.0 => Some((0.4, BorderlineLow)),
        "hdl" => None,
        "triglycerides" => two_tier(
            value,
            (200.0, 1.0, VeryHigh),
            (t("triglycerides_high", 150.0), 0.6, Elevated),
        ),
        "systolic_bp" => two_tier(
            value,
            (140.0, 1.0, High),
            (t("systolic_elevated", 130.0), 0.6, Elevated),
        ),
        "diastolic_bp" => two_tier(
            value,
            (90.0, 1.0, High),
            (t("diastolic_elevated", 80.0), 0.6, Elevated),
        ),
        "tsh" => (value >= t("tsh_high", 4.5)).then_some((0.8, Elevated)),
        "hemoglobin" => (value < t("hemoglobin_low", 12.0)).then_some((0.7, Low)),
        other => generic_marker(disease, other, value),
    };

    match graded {
        Some((contribution, level)) => (contribution, Some(level)),
        None => (0.0, None),
    }
}

fn two_tier(
    value: f64,
    upper: (f64, f64, LabLevel),
    lower: (f64, f64, LabLevel),
) -> Option<(f64, LabLevel)> {
    if value >= upper.0 {
        Some((upper.1, upper.2))
    } else if value >= lower.0 {
        Some((lower.1, lower.2))
    } else {
        None
    }
}

fn generic_marker(disease: &DiseaseConfig, marker: &str, value: f64) -> Option<(f64, LabLevel)> {
    let high = disease.thresholds.get(&format!("{marker}_high"));
    let low = disease.thresholds.get(&format!("{marker}_low"));

    match (high, low) {
        (Some(high), _) if value >= *high => Some((0.6, LabLevel::Elevated)),
        (_, Some(low)) if value <= *low => Some((0.6, LabLevel::Low)),
        _ => None,
    }
}

pub(crate) fn clamp(value: f64, floor: f64, ceiling: f64) -> f64 {
    if value.is_nan() {
        return floor;
    }
    value.max(floor).min(ceiling)
}
