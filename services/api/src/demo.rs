use crate::infra::{catalog_config, load_engine};
use crate::report::render_results;
use clap::Args;
use risk_coach::assessment::{DiseaseRiskResult, UserData};
use risk_coach::config::AppConfig;
use risk_coach::error::AppError;
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of highest-risk conditions to print in detail
    #[arg(long, default_value_t = 3)]
    pub(crate) top: usize,
    /// Directory holding the disease, guideline and test tables
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

/// Questionnaire scored by the `demo` command.
pub(crate) fn sample_profile() -> Result<UserData, serde_json::Error> {
    serde_json::from_value(json!({
        "patient": {
            "age": 52,
            "gender": "female",
            "height": 160,
            "weight": 82,
            "known_issues": []
        },
        "lifestyle": {
            "smoking": false,
            "alcohol": "occasional",
            "exercise": "sedentary",
            "diet": "high_sugar",
            "stress_level": "moderate",
            "sleep_hours": 5.5
        },
        "family": [
            { "role": "mother", "generation": 1, "known_issues": ["type2_diabetes", "hypothyroidism"] },
            { "role": "father", "generation": 1, "known_issues": ["hypertension", "cad"] },
            { "role": "sister", "generation": 0, "known_issues": ["pcos"] },
            { "role": "maternal_grandmother", "generation": 2, "known_issues": ["type2_diabetes"] }
        ],
        "lab_values": {
            "HbA1c": 6.2,
            "FBS": 118,
            "LDL Cholesterol": 142,
            "HDL": 52,
            "TSH": 3.1
        }
    }))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = catalog_config(args.data_dir, AppConfig::load()?.catalog);
    let engine = load_engine(&config)?;
    let user = sample_profile()?;

    let results = engine.predict(&user);
    let shown = &results[..args.top.min(results.len())];

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Risk coach demo: sample questionnaire\n")?;
    render_results(&mut out, shown)?;
    if let Some(top) = shown.first() {
        render_plan(&mut out, top)?;
    }
    Ok(())
}

pub(crate) fn render_plan<W: Write>(out: &mut W, result: &DiseaseRiskResult) -> io::Result<()> {
    let plan = &result.prevention_plan;
    writeln!(out, "\nPrevention plan for {}", result.disease_name)?;
    writeln!(out, "{}", plan.summary)?;
    writeln!(out, "Urgency: {}", plan.urgency)?;

    for (heading, items) in [
        ("Diet", &plan.diet),
        ("Exercise", &plan.exercise),
        ("Lifestyle", &plan.lifestyle),
        ("Monitoring", &plan.monitoring),
    ] {
        if items.is_empty() {
            continue;
        }
        writeln!(out, "{heading}:")?;
        for item in items {
            writeln!(out, "  - {item}")?;
        }
    }

    writeln!(out, "Timeline:")?;
    for step in &plan.timeline {
        writeln!(out, "  - {}: {}", step.horizon, step.action)?;
    }

    let specialist = &result.consult_detail.specialist;
    writeln!(
        out,
        "See: {}{}",
        specialist.recommended,
        specialist
            .also_consider
            .map(|other| format!(" (or {other})"))
            .unwrap_or_default()
    )?;
    Ok(())
}
