use serde::Serialize;

use crate::assessment::{AssessmentContext, RiskClass};
use crate::catalog::{ScreeningTest, TestTable};

const FALLBACK_TEST: &str = "Consult doctor for appropriate screening";
const DEFAULT_NORMAL_RANGE: &str = "Consult report";
const BASE_PRIORITY: f64 = 5.0;

/// Screening tests chosen for one disease, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestPlan {
    pub names: Vec<String>,
    pub details: Vec<TestRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRecommendation {
    pub name: String,
    pub frequency: String,
    pub why: String,
    pub normal_range: String,
    pub priority: u32,
    pub preparation: Vec<&'static str>,
    pub cost: CostEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub estimated_cost: String,
    pub note: &'static str,
}

/// Maximum number of tests recommended for a class.
pub fn test_cap(class: RiskClass) -> usize {
    match class {
        RiskClass::I => 2,
        RiskClass::II => 3,
        RiskClass::III => 5,
        RiskClass::IV => 6,
    }
}

pub fn recommend_tests(
    disease_id: &str,
    class: RiskClass,
    ctx: &AssessmentContext<'_>,
    tests: Option<&TestTable>,
) -> TestPlan {
    let Some(tests) = tests else {
        return TestPlan {
            names: vec![FALLBACK_TEST.to_string()],
            details: Vec::new(),
        };
    };

    let mut ranked: Vec<TestRecommendation> = tests
        .for_disease(disease_id)
        .iter()
        .map(|test| (test, test_priority(test, disease_id, class, ctx)))
        .filter(|(_, priority)| *priority > 0)
        .map(|(test, priority)| recommendation(test, class, priority))
        .collect();

    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
    ranked.truncate(test_cap(class));

    TestPlan {
        names: ranked.iter().map(|test| test.name.clone()).collect(),
        details: ranked,
    }
}

fn recommendation(test: &ScreeningTest, class: RiskClass, priority: u32) -> TestRecommendation {
    TestRecommendation {
        name: test.name.clone(),
        frequency: adjust_frequency(&test.frequency, class).to_string(),
        why: test.why.clone(),
        normal_range: test
            .normal_range
            .clone()
            .unwrap_or_else(|| DEFAULT_NORMAL_RANGE.to_string()),
        priority,
        preparation: preparation_tips(&test.name),
        cost: cost_estimate(&test.name),
    }
}

fn class_multiplier(class: RiskClass) -> f64 {
    match class {
        RiskClass::I => 0.5,
        RiskClass::II => 1.0,
        RiskClass::III => 1.5,
        RiskClass::IV => 2.0,
    }
}

/// Integer priority of a test; higher is more important.
pub fn test_priority(
    test: &ScreeningTest,
    disease_id: &str,
    class: RiskClass,
    ctx: &AssessmentContext<'_>,
) -> u32 {
    let name = test.name.to_lowercase();
    let mut priority = BASE_PRIORITY * class_multiplier(class);

    match disease_id {
        "type2_diabetes" => {
            if contains_any(&name, &["hba1c", "glucose"]) {
                priority += 3.0;
            }
        }
        "cad" => {
            if contains_any(&name, &["lipid", "cholesterol"]) {
                priority += 3.0;
            }
            if contains_any(&name, &["ecg", "stress"]) {
                priority += 2.0;
            }
        }
        "hypertension" => {
            if contains_any(&name, &["blood pressure"]) {
                priority += 4.0;
            }
            if contains_any(&name, &["kidney", "creatinine"]) {
                priority += 2.0;
            }
        }
        "breast_ovarian_cancer" => {
            if contains_any(&name, &["brca", "genetic"]) {
                priority += 4.0;
            }
            if contains_any(&name, &["mammogram", "mri"]) {
                priority += 3.0;
            }
        }
        "familial_hypercholesterolemia" => {
            if contains_any(&name, &["genetic"]) {
                priority += 4.0;
            }
            if contains_any(&name, &["lipid", "apob"]) {
                priority += 3.0;
            }
        }
        _ => {}
    }

    let age = ctx.basic.age;
    if age > 40 && contains_any(&name, &["screening", "baseline"]) {
        priority += 1.0;
    }
    if age > 50 && contains_any(&name, &["calcium score", "mammogram", "colonoscopy"]) {
        priority += 2.0;
    }
    if ctx.basic.gender.is_female()
        && contains_any(&name, &["breast", "mammogram", "ovarian", "ca-125"])
    {
        priority += 2.0;
    }
    if ctx.has_family_history(disease_id) && contains_any(&name, &["genetic"]) {
        priority += 3.0;
    }

    priority.trunc() as u32
}

fn contains_any(name: &str, words: &[&str]) -> bool {
    words.iter().any(|word| name.contains(*word))
}

/// Display frequency adjusted for the class; unknown strings pass through.
pub fn adjust_frequency(base: &str, class: RiskClass) -> &str {
    let adjusted = match (class, base) {
        (RiskClass::I, "Every 3-6 months" | "Every 6-12 months") => "Annually",
        (RiskClass::I, "Annually") => "Every 1-2 years",
        (RiskClass::III, "Annually" | "Every 6-12 months") => "Every 6 months",
        (RiskClass::III, "Every 1-2 years") => "Annually",
        (RiskClass::IV, "Annually" | "Every 6-12 months") => "Every 3-6 months",
        (RiskClass::IV, "Every 1-2 years") => "Every 6 months",
        (RiskClass::IV, "Every 6 months") => "Every 3 months",
        _ => return base,
    };
    adjusted
}

pub fn preparation_tips(test_name: &str) -> Vec<&'static str> {
    let name = test_name.to_lowercase();
    let tips: &[&'static str] = if name.contains("fasting blood glucose") {
        &[
            "Fast for 8-12 hours before test",
            "Only water allowed during fasting",
            "Schedule for early morning",
            "Continue regular medications unless told otherwise",
        ]
    } else if name.contains("lipid profile") {
        &[
            "Fast for 9-12 hours before test",
            "Avoid alcohol 24 hours prior",
            "Maintain usual diet 2 weeks before",
            "Avoid heavy exercise night before",
        ]
    } else if name.contains("hba1c") {
        &[
            "No fasting required",
            "Can be done any time of day",
            "Recent illness may affect results",
        ]
    } else if name.contains("mammogram") {
        &[
            "Schedule week after period if premenopausal",
            "Avoid deodorant or powder on test day",
            "Wear two-piece outfit",
            "Bring previous mammogram images if available",
        ]
    } else if name.contains("genetic testing") {
        &[
            "Genetic counseling recommended before testing",
            "Understand implications for family members",
            "Check insurance coverage",
            "No special preparation needed for blood draw",
        ]
    } else {
        &["Follow standard pre-test instructions from your lab"]
    };
    tips.to_vec()
}

/// Rough price band in INR; unlisted tests point the user to a local lab.
pub fn cost_estimate(test_name: &str) -> CostEstimate {
    const PRICES: &[(&str, u32, u32)] = &[
        ("hba1c", 300, 800),
        ("fasting blood glucose", 100, 300),
        ("lipid profile", 400, 1200),
        ("complete blood count", 200, 500),
        ("tsh", 300, 700),
        ("mammogram", 1500, 4000),
        ("genetic testing", 5000, 50000),
        ("ecg", 150, 500),
        ("stress test", 2000, 5000),
    ];

    let name = test_name.to_lowercase();
    match PRICES.iter().find(|(key, _, _)| name.contains(*key)) {
        Some((_, min, max)) => CostEstimate {
            estimated_cost: format!("INR {min}-{max}"),
            note: "Approximate cost, varies by lab and location",
        },
        None => CostEstimate {
            estimated_cost: "Contact local lab".to_string(),
            note: "Cost varies significantly by location and facility",
        },
    }
}
