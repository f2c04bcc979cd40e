use serde_json::json;

use super::common::*;
use crate::assessment::{
    compose, round_probability, ComponentScores, ComponentWeights, Generation, RiskClass, UserData,
};

fn scores(family: f64, lifestyle: f64, lab: f64) -> ComponentScores {
    ComponentScores {
        family,
        lifestyle,
        lab,
    }
}

#[test]
fn single_affected_parent_without_other_data_is_low_risk() {
    let user = with_family(vec![relative("mother", Generation::Parents, &["type2_diabetes"])]);
    let ctx = context(&user);
    let p = compose(&disease("type2_diabetes"), &scores(0.35, 0.20, 0.15), &ctx);

    approx(p, 0.35 * 0.50 + 0.20 * 0.40 + 0.15 * 0.10);
    assert_eq!(round_probability(p), 0.27);
    assert_eq!(engine().classify(p), RiskClass::I);
}

#[test]
fn strong_family_history_adds_heritability_boost() {
    let user = UserData::default();
    let ctx = context(&user);
    let p = compose(&disease("type2_diabetes"), &scores(0.65, 0.20, 0.15), &ctx);

    approx(p, 0.65 * 0.50 + 0.20 * 0.40 + 0.15 * 0.10 + 0.35 * 0.15);
    assert_eq!(engine().classify(p), RiskClass::II);
}

#[test]
fn abnormal_labs_use_full_weights_and_boost() {
    let user = UserData {
        lab_values: labs(json!({ "hba1c": 7.2, "fasting_glucose": 150 })),
        ..UserData::default()
    };
    let ctx = context(&user);
    let config = disease("type2_diabetes");

    assert_eq!(ComponentWeights::select(&config, &ctx), ComponentWeights::WITH_LABS);
    let p = compose(&config, &scores(0.10, 0.20, 0.95), &ctx);
    approx(p, 0.10 * 0.40 + 0.20 * 0.35 + 0.95 * 0.25 + 0.12);
}

#[test]
fn labs_do_not_shift_weights_for_diseases_without_markers() {
    let user = UserData {
        lab_values: labs(json!({ "ldl": 140 })),
        ..UserData::default()
    };
    let ctx = context(&user);
    assert_eq!(
        ComponentWeights::select(&disease("asthma"), &ctx),
        ComponentWeights::WITHOUT_LABS
    );
}

#[test]
fn female_only_conditions_are_gated_on_gender() {
    let config = disease("pcos");
    let high = scores(0.95, 0.90, 0.95);

    for gender in ["male", "M", "unknown", "non-binary"] {
        let user = UserData {
            patient: Some(patient(28, gender, 165.0, 80.0)),
            ..UserData::default()
        };
        assert_eq!(compose(&config, &high, &context(&user)), 0.0, "{gender}");
    }

    let missing = UserData::default();
    assert_eq!(compose(&config, &high, &context(&missing)), 0.0);

    for gender in ["F", "female", "Female", "woman"] {
        let user = UserData {
            patient: Some(patient(28, gender, 165.0, 80.0)),
            ..UserData::default()
        };
        assert!(compose(&config, &high, &context(&user)) > 0.5, "{gender}");
    }
}

#[test]
fn age_boost_applies_after_gender_gate_only_for_age_sensitive_diseases() {
    let older = UserData {
        patient: Some(patient(46, "male", 175.0, 70.0)),
        ..UserData::default()
    };
    let base = scores(0.10, 0.20, 0.15);
    let without_boost = 0.10 * 0.50 + 0.20 * 0.40 + 0.15 * 0.10;

    approx(
        compose(&disease("hypertension"), &base, &context(&older)),
        without_boost + 0.08,
    );
    approx(compose(&disease("asthma"), &base, &context(&older)), without_boost);
}

#[test]
fn probability_is_capped_below_one() {
    let user = UserData {
        patient: Some(patient(70, "female", 160.0, 100.0)),
        lab_values: labs(json!({ "hba1c": 9.0 })),
        ..UserData::default()
    };
    let p = compose(&disease("type2_diabetes"), &scores(0.95, 0.90, 0.95), &context(&user));
    assert_eq!(p, 0.99);
    assert_eq!(engine().classify(p), RiskClass::IV);
}
