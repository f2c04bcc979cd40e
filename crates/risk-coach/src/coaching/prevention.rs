use serde::Serialize;

use crate::assessment::{AssessmentContext, Diet, ExerciseLevel, RiskClass};
use crate::catalog::GuidelineTable;

pub const MAX_PREVENTION_ITEMS: usize = 5;

const FALLBACK_PREVENTION: [&str; 2] = ["Maintain healthy lifestyle", "Regular health checkups"];
const DEFAULT_URGENCY: &str = "Routine checkup";

/// Short prevention list shown beside each result.
///
/// Top disease-specific items per category (diet 2, exercise 1, lifestyle 2),
/// then two general items of the risk class for classes III and IV.
pub fn prevention_list(
    disease_id: &str,
    class: RiskClass,
    guidelines: Option<&GuidelineTable>,
) -> Vec<String> {
    let Some(guidelines) = guidelines else {
        return FALLBACK_PREVENTION.iter().map(|item| item.to_string()).collect();
    };

    let mut combined: Vec<&String> = Vec::new();
    if let Some(disease) = guidelines.disease(disease_id) {
        combined.extend(disease.diet.iter().take(2));
        combined.extend(disease.exercise.iter().take(1));
        combined.extend(disease.lifestyle.iter().take(2));
    }
    if class.is_elevated() {
        if let Some(general) = guidelines.risk_class(class) {
            combined.extend(general.prevention.iter().take(2));
        }
    }

    let mut items = dedupe(combined.into_iter().cloned());
    items.truncate(MAX_PREVENTION_ITEMS);
    items
}

/// Personalized prevention plan for one disease and risk class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreventionPlan {
    pub summary: String,
    pub diet: Vec<String>,
    pub exercise: Vec<String>,
    pub lifestyle: Vec<String>,
    pub monitoring: Vec<String>,
    pub urgency: String,
    pub risk_class_guidance: Vec<String>,
    pub timeline: Vec<TimelineStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStep {
    pub horizon: &'static str,
    pub action: &'static str,
}

pub fn prevention_plan(
    disease_id: &str,
    class: RiskClass,
    ctx: &AssessmentContext<'_>,
    guidelines: Option<&GuidelineTable>,
) -> PreventionPlan {
    let disease = guidelines.and_then(|table| table.disease(disease_id));
    let general = guidelines.and_then(|table| table.risk_class(class));
    let diet = disease.map(|d| d.diet.clone()).unwrap_or_default();
    let exercise = disease.map(|d| d.exercise.clone()).unwrap_or_default();
    let lifestyle = disease.map(|d| d.lifestyle.clone()).unwrap_or_default();

    PreventionPlan {
        summary: summary(disease_id, class).to_string(),
        diet: personalize_diet(diet, ctx),
        exercise: personalize_exercise(exercise, ctx),
        lifestyle: personalize_lifestyle(lifestyle, ctx),
        monitoring: monitoring(disease_id, class),
        urgency: general
            .and_then(|info| info.consult.clone())
            .unwrap_or_else(|| DEFAULT_URGENCY.to_string()),
        risk_class_guidance: general.map(|info| info.prevention.clone()).unwrap_or_default(),
        timeline: action_timeline(class),
    }
}

fn summary(disease_id: &str, class: RiskClass) -> &'static str {
    use RiskClass::*;

    match (disease_id, class) {
        ("type2_diabetes", I) => "Maintain healthy weight and balanced diet to keep diabetes risk low.",
        ("type2_diabetes", II) => "Focus on reducing sugar intake and increasing physical activity.",
        ("type2_diabetes", III) => "Immediate dietary changes and regular exercise essential to prevent diabetes.",
        ("type2_diabetes", IV) => "Aggressive lifestyle intervention required. Consult a doctor for a prevention plan.",
        ("cad", I) => "Continue heart-healthy habits with regular cardiovascular exercise.",
        ("cad", II) => "Reduce saturated fats and increase aerobic activity.",
        ("cad", III) => "Strict heart-healthy diet and exercise plan needed, ideally with medical guidance.",
        ("cad", IV) => "Urgent cardiology consultation required along with intensive lifestyle changes.",
        ("hypertension", I) => "Maintain low-sodium diet and regular exercise.",
        ("hypertension", II) => "DASH diet and stress management recommended.",
        ("hypertension", III) => "Aggressive sodium reduction and daily exercise essential.",
        ("hypertension", IV) => "Urgent blood pressure management needed. Seek medical consultation now.",
        ("breast_ovarian_cancer", I) => "Continue healthy lifestyle and routine self-examinations.",
        ("breast_ovarian_cancer", II) => "Consider genetic counseling and increased screening frequency.",
        ("breast_ovarian_cancer", III) => "Genetic testing strongly recommended. Discuss preventive options with a doctor.",
        ("breast_ovarian_cancer", IV) => "Urgent genetic counseling and comprehensive screening essential.",
        (_, I) => "Maintain current healthy habits with routine monitoring.",
        (_, II) => "Adopt preventive lifestyle changes and schedule appropriate screening.",
        (_, III) => "Significant lifestyle changes needed. Consult a healthcare provider soon.",
        (_, IV) => "Urgent medical consultation required for comprehensive risk management.",
    }
}

fn personalize_diet(base: Vec<String>, ctx: &AssessmentContext<'_>) -> Vec<String> {
    let mut items: Vec<String> = base.into_iter().take(5).collect();
    let diet = ctx.lifestyle_or_default().diet();

    if ctx.basic.bmi >= 25.0 {
        items.insert(0, "Focus on calorie control for weight management".to_string());
    }
    if matches!(diet, Diet::HighSugar | Diet::Poor) {
        items.insert(0, "Eliminate sugary drinks and desserts immediately".to_string());
    }
    if matches!(diet, Diet::HighFat | Diet::FastFood) {
        items.insert(0, "Replace fried foods with grilled or baked alternatives".to_string());
    }

    items.truncate(6);
    items
}

fn personalize_exercise(mut items: Vec<String>, ctx: &AssessmentContext<'_>) -> Vec<String> {
    let exercise = ctx.lifestyle_or_default().exercise();

    if matches!(exercise, ExerciseLevel::Sedentary | ExerciseLevel::None) {
        items.insert(
            0,
            "Start with 10-minute walks, gradually increase to 30 minutes daily".to_string(),
        );
        items.push("Begin with low-impact activities like walking or swimming".to_string());
    }
    if ctx.basic.bmi >= 30.0 {
        items.insert(
            0,
            "Focus on low-impact cardio to protect joints (swimming, cycling)".to_string(),
        );
    }
    if ctx.basic.age > 50 {
        items.push("Include balance and flexibility exercises".to_string());
    }

    items.truncate(5);
    items
}

fn personalize_lifestyle(mut items: Vec<String>, ctx: &AssessmentContext<'_>) -> Vec<String> {
    let lifestyle = ctx.lifestyle_or_default();

    if lifestyle.smokes() {
        items.insert(
            0,
            "PRIORITY: Quit smoking and seek cessation support immediately".to_string(),
        );
    }
    if lifestyle.stress().is_high() {
        items.insert(
            0,
            "Implement daily stress management (meditation, yoga, breathing exercises)"
                .to_string(),
        );
    }
    if lifestyle.sleep_deficit() {
        items.push(format!(
            "Increase sleep from {} to 7-8 hours nightly",
            lifestyle.sleep_hours()
        ));
    }
    if lifestyle.alcohol().is_heavy() {
        let at = items.len().min(1);
        items.insert(at, "Reduce alcohol consumption significantly".to_string());
    }

    items.truncate(6);
    items
}

fn monitoring(disease_id: &str, class: RiskClass) -> Vec<String> {
    let base: &[&str] = match disease_id {
        "type2_diabetes" => &[
            "Monitor blood sugar if at high risk",
            "Track weight weekly",
            "Keep food diary for 2 weeks",
            "Note any unusual thirst or fatigue",
        ],
        "cad" => &[
            "Monitor blood pressure weekly",
            "Track any chest discomfort or unusual fatigue",
            "Log exercise tolerance",
            "Note family history changes",
        ],
        "hypertension" => &[
            "Home blood pressure monitoring 2-3x weekly",
            "Track sodium intake",
            "Monitor headaches or dizziness",
            "Keep stress journal",
        ],
        "breast_ovarian_cancer" => &[
            "Monthly breast self-examination",
            "Track any breast changes or lumps",
            "Note family diagnoses",
            "Monitor menstrual irregularities",
        ],
        _ => &[
            "Regular self-monitoring of symptoms",
            "Track relevant health metrics",
            "Note any concerning changes",
            "Maintain health diary",
        ],
    };

    let mut items: Vec<String> = base.iter().map(|item| item.to_string()).collect();
    if class.is_elevated() {
        items.insert(0, "Weekly health metric tracking essential".to_string());
    }
    items.truncate(5);
    items
}

/// Ordered next steps for a risk class, nearest horizon first.
pub fn action_timeline(class: RiskClass) -> Vec<TimelineStep> {
    let steps: &[(&'static str, &'static str)] = match class {
        RiskClass::I => &[
            ("immediate", "Continue current habits"),
            ("this_month", "Schedule annual checkup if due"),
            ("this_quarter", "Review and maintain preventive measures"),
            ("this_year", "Annual comprehensive health screening"),
        ],
        RiskClass::II => &[
            ("immediate", "Begin lifestyle modifications today"),
            ("this_month", "Schedule screening tests"),
            ("this_quarter", "Follow up with healthcare provider"),
            ("this_year", "Comprehensive health assessment and monitoring"),
        ],
        RiskClass::III => &[
            ("immediate", "Start prevention plan immediately"),
            ("this_week", "Schedule doctor consultation"),
            ("this_month", "Complete recommended tests, begin interventions"),
            ("this_quarter", "Regular monitoring and follow-ups"),
        ],
        RiskClass::IV => &[
            ("immediate", "Contact healthcare provider urgently"),
            ("this_week", "Medical consultation and comprehensive testing"),
            ("this_month", "Aggressive treatment or prevention plan in place"),
            ("ongoing", "Frequent monitoring and professional oversight"),
        ],
    };

    steps
        .iter()
        .map(|&(horizon, action)| TimelineStep { horizon, action })
        .collect()
}

fn dedupe(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{Lifestyle, PatientProfile, StressLevel, UserData};
    use crate::catalog::{DiseasePrevention, RiskClassGuidance};

    fn guidelines() -> GuidelineTable {
        let mut table = GuidelineTable::default();
        table.disease_specific_prevention.insert(
            "cad".to_string(),
            DiseasePrevention {
                diet: vec!["Eat oats".into(), "Cut trans fats".into(), "Add nuts".into()],
                exercise: vec!["Walk daily".into(), "Swim".into()],
                lifestyle: vec!["Quit smoking".into(), "Sleep well".into()],
            },
        );
        table.risk_classes.insert(
            RiskClass::IV,
            RiskClassGuidance {
                prevention: vec!["Quit smoking".into(), "See a cardiologist".into()],
                consult: Some("Within 1-2 weeks".into()),
                ..RiskClassGuidance::default()
            },
        );
        table
    }

    #[test]
    fn list_takes_top_items_and_dedupes_general_guidance() {
        let table = guidelines();
        let low = prevention_list("cad", RiskClass::I, Some(&table));
        assert_eq!(
            low,
            vec!["Eat oats", "Cut trans fats", "Walk daily", "Quit smoking", "Sleep well"]
        );

        let high = prevention_list("cad", RiskClass::IV, Some(&table));
        assert_eq!(high.len(), 5);
        assert_eq!(high.iter().filter(|item| *item == "Quit smoking").count(), 1);
    }

    #[test]
    fn list_falls_back_without_guidelines() {
        assert_eq!(
            prevention_list("cad", RiskClass::III, None),
            vec!["Maintain healthy lifestyle", "Regular health checkups"]
        );
    }

    #[test]
    fn plan_personalizes_for_habits() {
        let user = UserData {
            patient: Some(PatientProfile {
                age: Some(58),
                height: Some(165.0),
                weight: Some(92.0),
                ..PatientProfile::default()
            }),
            lifestyle: Some(Lifestyle {
                smoking: Some(true),
                stress_level: Some(StressLevel::Severe),
                exercise: Some(ExerciseLevel::Sedentary),
                diet: Some(Diet::FastFood),
                sleep_hours: Some(5.0),
                ..Lifestyle::default()
            }),
            ..UserData::default()
        };
        let ctx = AssessmentContext::from_user_data(&user);
        let table = guidelines();
        let plan = prevention_plan("cad", RiskClass::IV, &ctx, Some(&table));

        assert_eq!(plan.diet[0], "Replace fried foods with grilled or baked alternatives");
        assert_eq!(plan.diet[1], "Focus on calorie control for weight management");
        assert!(plan.exercise[0].starts_with("Focus on low-impact cardio"));
        assert!(plan.exercise.len() <= 5);
        assert!(plan.lifestyle[0].starts_with("Implement daily stress management"));
        assert!(plan.lifestyle[1].starts_with("PRIORITY: Quit smoking"));
        assert!(plan
            .lifestyle
            .contains(&"Increase sleep from 5 to 7-8 hours nightly".to_string()));
        assert_eq!(plan.monitoring[0], "Weekly health metric tracking essential");
        assert_eq!(plan.urgency, "Within 1-2 weeks");
        assert_eq!(plan.timeline[0].action, "Contact healthcare provider urgently");
    }

    #[test]
    fn plan_uses_defaults_without_guidelines() {
        let user = UserData::default();
        let ctx = AssessmentContext::from_user_data(&user);
        let plan = prevention_plan("asthma", RiskClass::II, &ctx, None);

        assert_eq!(
            plan.summary,
            "Adopt preventive lifestyle changes and schedule appropriate screening."
        );
        assert!(plan.diet.is_empty());
        assert_eq!(plan.urgency, "Routine checkup");
        assert_eq!(plan.monitoring.len(), 4);
        assert_eq!(plan.timeline.len(), 4);
    }
}
