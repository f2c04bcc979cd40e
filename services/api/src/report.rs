use crate::infra::{catalog_config, load_engine, read_user_data};
use clap::{Args, ValueEnum};
use risk_coach::assessment::DiseaseRiskResult;
use risk_coach::catalog::{Catalog, TableSource};
use risk_coach::config::AppConfig;
use risk_coach::error::AppError;
use risk_coach::export;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Questionnaire JSON with patient, lifestyle, family and lab_values sections
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Only report a single disease id
    #[arg(long)]
    pub(crate) disease: Option<String>,
    /// Directory holding the disease, guideline and test tables
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DiseasesArgs {
    /// Directory holding the disease, guideline and test tables
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        format,
        disease,
        data_dir,
    } = args;

    let config = catalog_config(data_dir, AppConfig::load()?.catalog);
    let engine = load_engine(&config)?;
    let user = read_user_data(&input)?;

    let results = match disease {
        Some(disease_id) => vec![engine
            .predict_disease(&user, &disease_id)
            .ok_or(AppError::UnknownDisease(disease_id))?],
        None => engine.predict(&user),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => render_results(&mut out, &results)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &results)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => export::write_results(&mut out, &results)?,
    }
    Ok(())
}

pub(crate) fn run_diseases(args: DiseasesArgs) -> Result<(), AppError> {
    let config = catalog_config(args.data_dir, AppConfig::load()?.catalog);
    let engine = load_engine(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_catalog(&mut out, engine.catalog())?;
    Ok(())
}

pub(crate) fn render_results<W: Write>(out: &mut W, results: &[DiseaseRiskResult]) -> io::Result<()> {
    writeln!(out, "Risk report ({} conditions)", results.len())?;
    for (rank, result) in results.iter().enumerate() {
        writeln!(out)?;
        writeln!(
            out,
            "{}. {} - {:.0}% (class {}, {})",
            rank + 1,
            result.disease_name,
            result.probability * 100.0,
            result.risk_class,
            result.risk_class.label()
        )?;
        writeln!(
            out,
            "   Consult: {} ({})",
            result.consult,
            result.consult_detail.timeframe
        )?;
        if !result.reasons.is_empty() {
            writeln!(out, "   Why:")?;
            for reason in &result.reasons {
                writeln!(out, "     - {reason}")?;
            }
        }
        writeln!(out, "   Tests: {}", result.recommended_tests.join(", "))?;
        writeln!(out, "   Prevention:")?;
        for item in &result.prevention {
            writeln!(out, "     - {item}")?;
        }
    }
    Ok(())
}

pub(crate) fn render_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "Configured conditions")?;
    for disease in catalog.diseases() {
        writeln!(
            out,
            "- {:<30} {:<32} {:<16} family weight {:.2}",
            disease.id, disease.name, disease.category, disease.family_weight
        )?;
    }

    let sources = catalog.sources();
    writeln!(out, "\nTable sources")?;
    for (table, source) in [
        ("diseases", sources.diseases),
        ("risk bands", sources.risk_bands),
        ("guidelines", sources.guidelines),
        ("screening tests", sources.tests),
    ] {
        let label = match source {
            TableSource::Configured => "configured",
            TableSource::Fallback => "built-in fallback",
        };
        writeln!(out, "- {table}: {label}")?;
    }
    Ok(())
}
