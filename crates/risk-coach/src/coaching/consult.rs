use std::fmt;

use serde::Serialize;

use crate::assessment::{AssessmentContext, RiskClass};

/// How soon the user should see a clinician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultLevel {
    None,
    Routine,
    Soon,
    Urgent,
}

impl ConsultLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultLevel::None => "none",
            ConsultLevel::Routine => "routine",
            ConsultLevel::Soon => "soon",
            ConsultLevel::Urgent => "urgent",
        }
    }

    pub fn timeframe(&self) -> &'static str {
        match self {
            ConsultLevel::None => "No immediate consultation needed",
            ConsultLevel::Routine => "Schedule within 3-6 months",
            ConsultLevel::Soon => "Schedule within 4-6 weeks",
            ConsultLevel::Urgent => "Schedule within 1-2 weeks",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConsultLevel::None => "Continue healthy habits and schedule routine annual checkup",
            ConsultLevel::Routine => {
                "Book a routine checkup to discuss screening and prevention strategies"
            }
            ConsultLevel::Soon => {
                "Consult your doctor soon to assess risk and develop prevention plan"
            }
            ConsultLevel::Urgent => {
                "Urgent consultation recommended: significant risk factors detected that require medical attention"
            }
        }
    }
}

impl fmt::Display for ConsultLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full consultation guidance for one disease result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultAdvice {
    pub level: ConsultLevel,
    pub timeframe: &'static str,
    pub message: &'static str,
    pub specialist: SpecialistReferral,
    pub what_to_discuss: Vec<&'static str>,
    pub preparation: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialistReferral {
    pub recommended: &'static str,
    pub also_consider: Option<&'static str>,
}

const MAX_DISCUSSION_POINTS: usize = 7;
const MAX_PREPARATION_ITEMS: usize = 7;

pub fn consult_advice(
    disease_id: &str,
    class: RiskClass,
    probability: f64,
    ctx: &AssessmentContext<'_>,
) -> ConsultAdvice {
    let level = escalate(disease_id, ctx, base_level(class, probability));

    ConsultAdvice {
        level,
        timeframe: level.timeframe(),
        message: level.message(),
        specialist: specialist(disease_id, class),
        what_to_discuss: discussion_points(disease_id, class),
        preparation: preparation(disease_id),
    }
}

pub fn base_level(class: RiskClass, probability: f64) -> ConsultLevel {
    if class == RiskClass::IV || probability >= 0.80 {
        ConsultLevel::Urgent
    } else if class == RiskClass::III || probability >= 0.60 {
        ConsultLevel::Soon
    } else if class == RiskClass::II || probability >= 0.35 {
        ConsultLevel::Routine
    } else {
        ConsultLevel::None
    }
}

/// Red flags jump straight to urgent; otherwise age and severe obesity lift
/// a routine referral to soon.
fn escalate(disease_id: &str, ctx: &AssessmentContext<'_>, current: ConsultLevel) -> ConsultLevel {
    if has_red_flag(disease_id, ctx) {
        return ConsultLevel::Urgent;
    }
    if current != ConsultLevel::Routine {
        return current;
    }
    if ctx.basic.age > 50 {
        return ConsultLevel::Soon;
    }
    if matches!(disease_id, "type2_diabetes" | "hypertension" | "pcos") && ctx.basic.bmi >= 35.0 {
        return ConsultLevel::Soon;
    }
    current
}

pub fn has_red_flag(disease_id: &str, ctx: &AssessmentContext<'_>) -> bool {
    let lab = |marker: &str| ctx.labs.value_or_zero(marker);

    match disease_id {
        "type2_diabetes" => lab("hba1c") >= 7.0 || lab("fasting_glucose") >= 140.0,
        "cad" => {
            let ldl = lab("ldl");
            ldl >= 190.0
                || lab("systolic_bp") >= 160.0
                || (ctx.lifestyle_or_default().smokes()
                    && ldl >= 150.0
                    && ctx.has_family_history("cad"))
        }
        "hypertension" => lab("systolic_bp") >= 160.0 || lab("diastolic_bp") >= 100.0,
        "breast_ovarian_cancer" => {
            let (first_degree, extended) = ctx.affected_by_degree(disease_id);
            first_degree >= 2 || (first_degree >= 1 && extended >= 2)
        }
        _ => false,
    }
}

struct SpecialistRule {
    primary: &'static str,
    alternative: &'static str,
    threshold: ReferralThreshold,
}

enum ReferralThreshold {
    AnyClass,
    ClassIIOrHigher,
    ClassIIIOrHigher,
}

fn specialist_rule(disease_id: &str) -> SpecialistRule {
    use ReferralThreshold::*;

    let (primary, alternative, threshold) = match disease_id {
        "type2_diabetes" => (
            "Endocrinologist or Diabetologist",
            "Primary Care Physician or General Practitioner",
            ClassIIIOrHigher,
        ),
        "cad" => ("Cardiologist", "Primary Care Physician", ClassIIOrHigher),
        "hypertension" => (
            "Cardiologist or Hypertension Specialist",
            "Primary Care Physician",
            ClassIIIOrHigher,
        ),
        "familial_hypercholesterolemia" => {
            ("Lipid Specialist or Cardiologist", "Endocrinologist", AnyClass)
        }
        "breast_ovarian_cancer" => ("Genetic Counselor + Oncologist", "OB/GYN", ClassIIOrHigher),
        "thalassemia" | "sickle_cell" => (
            "Hematologist + Genetic Counselor",
            "Primary Care Physician",
            AnyClass,
        ),
        "asthma" => ("Pulmonologist or Allergist", "Primary Care Physician", ClassIIIOrHigher),
        "hypothyroidism" => ("Endocrinologist", "Primary Care Physician", ClassIIIOrHigher),
        "pcos" => ("Endocrinologist or OB/GYN", "Primary Care Physician", ClassIIOrHigher),
        _ => (
            "Primary Care Physician",
            "Appropriate specialist based on symptoms",
            ClassIIIOrHigher,
        ),
    };

    SpecialistRule {
        primary,
        alternative,
        threshold,
    }
}

pub fn specialist(disease_id: &str, class: RiskClass) -> SpecialistReferral {
    let rule = specialist_rule(disease_id);
    let refer_to_primary = class.is_elevated()
        || matches!(
            rule.threshold,
            ReferralThreshold::AnyClass | ReferralThreshold::ClassIIOrHigher
        );

    let recommended = if refer_to_primary {
        rule.primary
    } else {
        rule.alternative
    };

    SpecialistReferral {
        recommended,
        also_consider: (recommended != rule.alternative).then_some(rule.alternative),
    }
}

pub fn discussion_points(disease_id: &str, class: RiskClass) -> Vec<&'static str> {
    let specific: &[&'static str] = match disease_id {
        "type2_diabetes" => &[
            "Blood sugar levels and HbA1c results",
            "Diet plan and carbohydrate management",
            "Exercise recommendations",
        ],
        "cad" => &[
            "Cholesterol levels and lipid profile",
            "Blood pressure management",
            "Cardiac risk assessment",
        ],
        "hypertension" => &[
            "Blood pressure readings and patterns",
            "Sodium reduction strategies",
            "Medication if BP consistently elevated",
        ],
        "breast_ovarian_cancer" => &[
            "Family cancer history in detail",
            "BRCA genetic testing options and implications",
            "Screening schedule (mammogram, MRI, ultrasound)",
        ],
        "familial_hypercholesterolemia" => &[
            "Cholesterol levels and genetic testing",
            "Need for statin therapy",
            "Family screening recommendations",
        ],
        _ => &[],
    };

    let mut points = Vec::with_capacity(MAX_DISCUSSION_POINTS + 1);
    if class.is_elevated() {
        points.push("Urgency of intervention given your risk level");
    }
    points.extend([
        "Your family medical history",
        "Current lifestyle and habits",
        "Risk assessment results and what they mean",
        "Recommended screening tests and frequency",
        "Prevention strategies specific to your risk level",
    ]);
    points.extend_from_slice(specific);
    points.truncate(MAX_DISCUSSION_POINTS);
    points
}

pub fn preparation(disease_id: &str) -> Vec<&'static str> {
    let additions: &[&'static str] = match disease_id {
        "type2_diabetes" => &[
            "Log blood sugar readings if you have them",
            "Keep food diary for 3-5 days before visit",
        ],
        "hypertension" => &[
            "Bring home blood pressure log if monitoring",
            "Note any headaches, dizziness, or chest discomfort",
        ],
        "breast_ovarian_cancer" => &[
            "Document all cancer cases in family with ages and types",
            "List any breast changes or concerns",
            "Bring previous mammogram reports if available",
        ],
        "cad" => &[
            "Note any chest pain, shortness of breath, or fatigue",
            "List all cardiac issues in immediate family",
        ],
        _ => &[],
    };

    let mut items = vec![
        "Gather all recent medical records and test results",
        "Create detailed family medical history (2 generations)",
        "List all current medications and supplements",
        "Note any symptoms or concerns you've experienced",
        "Prepare questions about prevention and screening",
    ];
    items.extend_from_slice(additions);
    items.truncate(MAX_PREPARATION_ITEMS);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{
        FamilyMember, Generation, LabValues, Lifestyle, PatientProfile, UserData,
    };
    use serde_json::json;

    fn user_with_labs(labs: serde_json::Value) -> UserData {
        UserData {
            lab_values: serde_json::from_value::<LabValues>(labs).expect("lab values"),
            ..UserData::default()
        }
    }

    #[test]
    fn base_level_follows_class_and_probability() {
        assert_eq!(base_level(RiskClass::I, 0.10), ConsultLevel::None);
        assert_eq!(base_level(RiskClass::I, 0.36), ConsultLevel::Routine);
        assert_eq!(base_level(RiskClass::II, 0.40), ConsultLevel::Routine);
        assert_eq!(base_level(RiskClass::III, 0.56), ConsultLevel::Soon);
        assert_eq!(base_level(RiskClass::III, 0.81), ConsultLevel::Urgent);
    }

    #[test]
    fn diabetic_lab_values_are_red_flags() {
        let user = user_with_labs(json!({ "fbs": "142" }));
        let ctx = AssessmentContext::from_user_data(&user);
        let advice = consult_advice("type2_diabetes", RiskClass::I, 0.12, &ctx);
        assert_eq!(advice.level, ConsultLevel::Urgent);
        assert_eq!(advice.timeframe, "Schedule within 1-2 weeks");
    }

    #[test]
    fn smoking_with_cad_family_history_is_urgent() {
        let mut user = user_with_labs(json!({ "ldl_cholesterol": 155 }));
        user.lifestyle = Some(Lifestyle {
            smoking: Some(true),
            ..Lifestyle::default()
        });
        user.family = vec![FamilyMember {
            role: "uncle".to_string(),
            generation: Generation::Extended,
            known_issues: vec!["cad".to_string()],
            age: None,
            gender: None,
        }];
        let ctx = AssessmentContext::from_user_data(&user);
        assert!(has_red_flag("cad", &ctx));
        assert!(!has_red_flag("hypertension", &ctx));
    }

    #[test]
    fn routine_is_bumped_for_older_patients() {
        let user = UserData {
            patient: Some(PatientProfile {
                age: Some(63),
                ..PatientProfile::default()
            }),
            ..UserData::default()
        };
        let ctx = AssessmentContext::from_user_data(&user);
        assert_eq!(
            consult_advice("asthma", RiskClass::II, 0.40, &ctx).level,
            ConsultLevel::Soon
        );
        assert_eq!(
            consult_advice("asthma", RiskClass::I, 0.20, &ctx).level,
            ConsultLevel::None
        );
    }

    #[test]
    fn specialist_depends_on_class_and_rule() {
        let low = specialist("type2_diabetes", RiskClass::I);
        assert_eq!(low.recommended, "Primary Care Physician or General Practitioner");
        assert_eq!(low.also_consider, None);

        let high = specialist("type2_diabetes", RiskClass::III);
        assert_eq!(high.recommended, "Endocrinologist or Diabetologist");
        assert_eq!(
            high.also_consider,
            Some("Primary Care Physician or General Practitioner")
        );

        assert_eq!(
            specialist("thalassemia", RiskClass::I).recommended,
            "Hematologist + Genetic Counselor"
        );
    }

    #[test]
    fn discussion_and_preparation_are_capped() {
        let points = discussion_points("breast_ovarian_cancer", RiskClass::IV);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], "Urgency of intervention given your risk level");

        let prep = preparation("breast_ovarian_cancer");
        assert_eq!(prep.len(), 7);
        assert_eq!(prep[5], "Document all cancer cases in family with ages and types");
    }
}
