use serde_json::json;

use super::common::*;
use crate::assessment::explain::explain;
use crate::assessment::scoring::{score_disease, ScoreSignals};
use crate::assessment::{
    compose, ComponentScores, Diet, ExerciseLevel, Generation, Lifestyle, StressLevel, UserData,
};

fn reasons_for(disease_id: &str, user: &UserData) -> Vec<String> {
    let config = disease(disease_id);
    let ctx = context(user);
    let (scores, signals) = score_disease(&config, &ctx);
    let probability = compose(&config, &scores, &ctx);
    explain(&config, &ctx, &scores, &signals, probability)
}

#[test]
fn parents_are_listed_together() {
    let user = with_family(vec![
        relative("mother", Generation::Parents, &["cad"]),
        relative("father", Generation::Parents, &["cad"]),
        relative("maternal_grandfather", Generation::Extended, &["cad"]),
    ]);
    let reasons = reasons_for("cad", &user);
    assert_eq!(
        reasons,
        vec![
            "Both parents affected: Mother and Father",
            "Maternal Grandfather has this condition",
        ]
    );
}

#[test]
fn tiers_are_pluralized() {
    let user = with_family(vec![
        relative("brother", Generation::Siblings, &["asthma"]),
        relative("sister", Generation::Siblings, &["asthma"]),
        relative("maternal_aunt", Generation::Extended, &["asthma"]),
        relative("paternal_uncle", Generation::Extended, &["asthma"]),
        relative("son", Generation::Children, &["asthma"]),
        relative("daughter", Generation::Children, &["asthma"]),
    ]);
    let config = disease("asthma");
    let ctx = context(&user);
    let (scores, signals) = score_disease(&config, &ctx);

    // Low probability path takes only the two closest family reasons.
    let reasons = explain(&config, &ctx, &scores, &signals, 0.40);
    assert_eq!(
        reasons,
        vec!["2 siblings affected by this condition", "2 children affected"]
    );

    let three_extended = with_family(vec![
        relative("grandmother", Generation::Extended, &["asthma"]),
        relative("grandfather", Generation::Extended, &["asthma"]),
        relative("aunt", Generation::Extended, &["asthma"]),
    ]);
    assert_eq!(
        reasons_for("asthma", &three_extended),
        vec!["3 relatives in previous generation affected"]
    );

    let two_extended = with_family(vec![
        relative("maternal_aunt", Generation::Extended, &["asthma"]),
        relative("paternal_uncle", Generation::Extended, &["asthma"]),
    ]);
    assert_eq!(
        reasons_for("asthma", &two_extended),
        vec!["Maternal Aunt and Paternal Uncle have this condition"]
    );
}

#[test]
fn lifestyle_reasons_follow_declared_factors() {
    let user = UserData {
        patient: Some(patient(35, "female", 160.0, 70.0)),
        lifestyle: Some(Lifestyle {
            smoking: Some(true),
            diet: Some(Diet::HighFat),
            sleep_hours: Some(5.5),
            ..Lifestyle::default()
        }),
        ..UserData::default()
    };
    let reasons = reasons_for("cad", &user);
    assert_eq!(
        reasons,
        vec![
            "Current smoking significantly elevates risk",
            "High-fat diet with frequent fried foods",
        ]
    );

    let overweight = reasons_for("hypertension", &user);
    assert_eq!(
        overweight,
        vec![
            "BMI of 27.3 indicates overweight status",
            "Insufficient sleep (5.5 hours nightly)",
        ]
    );
}

#[test]
fn lab_reasons_are_observational() {
    let user = UserData {
        lab_values: labs(json!({ "hba1c": 7.2, "FBS": 150 })),
        ..UserData::default()
    };
    let reasons = reasons_for("type2_diabetes", &user);
    assert_eq!(
        reasons,
        vec![
            "HbA1c elevated at 7.2%, suggesting higher diabetes risk",
            "Fasting glucose elevated at 150 mg/dL, above the fasting reference range",
        ]
    );
    for reason in &reasons {
        let lower = reason.to_lowercase();
        assert!(!lower.contains("you have"), "{reason}");
        assert!(!lower.contains("diagnos"), "{reason}");
    }
}

#[test]
fn urgent_results_lead_with_lab_reasons() {
    let user = UserData {
        patient: Some(patient(60, "male", 170.0, 92.5)),
        lifestyle: Some(Lifestyle {
            diet: Some(Diet::HighSugar),
            exercise: Some(ExerciseLevel::Sedentary),
            stress_level: Some(StressLevel::High),
            ..Lifestyle::default()
        }),
        family: vec![
            relative("mother", Generation::Parents, &["type2_diabetes"]),
            relative("father", Generation::Parents, &["type2_diabetes"]),
            relative("brother", Generation::Siblings, &["type2_diabetes"]),
        ],
        lab_values: labs(json!({ "hba1c": 6.0, "fasting_glucose": 130 })),
    };
    let reasons = reasons_for("type2_diabetes", &user);

    assert_eq!(
        reasons,
        vec![
            "HbA1c borderline at 6%, a prediabetic pattern",
            "Fasting glucose elevated at 130 mg/dL, above the fasting reference range",
            "Both parents affected: Mother and Father",
            "High sugar intake and poor dietary habits",
            "Age (60) increases risk for this condition",
        ]
    );
}

#[test]
fn generic_reasons_fill_an_empty_list() {
    let config = disease("hypothyroidism");
    let user = UserData::default();
    let ctx = context(&user);
    let scores = ComponentScores {
        family: 0.45,
        lifestyle: 0.55,
        lab: 0.60,
    };

    let reasons = explain(&config, &ctx, &scores, &ScoreSignals::default(), 0.50);
    assert_eq!(
        reasons,
        vec![
            "Family history indicates predisposition",
            "Lifestyle factors increase risk",
            "Biomarkers show concerning patterns",
        ]
    );

    let quiet = ComponentScores {
        family: 0.10,
        lifestyle: 0.20,
        lab: 0.15,
    };
    assert!(explain(&config, &ctx, &quiet, &ScoreSignals::default(), 0.14).is_empty());
}

#[test]
fn age_reason_is_only_added_for_age_sensitive_diseases() {
    let user = UserData {
        patient: Some(patient(64, "female", 165.0, 60.0)),
        ..UserData::default()
    };
    assert_eq!(
        reasons_for("hypertension", &user),
        vec!["Age (64) increases risk for this condition"]
    );
    assert!(reasons_for("asthma", &user).is_empty());
}

#[test]
fn never_more_than_five_reasons() {
    let user = UserData {
        patient: Some(patient(66, "male", 170.0, 100.0)),
        lifestyle: Some(Lifestyle {
            smoking: Some(true),
            diet: Some(Diet::HighFat),
            exercise: Some(ExerciseLevel::None),
            stress_level: Some(StressLevel::Severe),
            sleep_hours: Some(4.0),
            ..Lifestyle::default()
        }),
        family: vec![
            relative("mother", Generation::Parents, &["cad"]),
            relative("brother", Generation::Siblings, &["cad"]),
            relative("son", Generation::Children, &["cad"]),
            relative("uncle", Generation::Extended, &["cad"]),
        ],
        lab_values: labs(json!({ "ldl": 210, "hdl": 30, "tg": 260, "sbp": 150 })),
    };
    let reasons = reasons_for("cad", &user);
    assert_eq!(reasons.len(), 5);
}
