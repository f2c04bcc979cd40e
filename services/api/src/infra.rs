use metrics_exporter_prometheus::PrometheusHandle;
use risk_coach::assessment::{RiskEngine, UserData};
use risk_coach::config::CatalogConfig;
use risk_coach::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<RiskEngine>,
}

/// Catalog location from a `--data-dir` flag, falling back to the given config.
pub(crate) fn catalog_config(data_dir: Option<PathBuf>, fallback: CatalogConfig) -> CatalogConfig {
    match data_dir {
        Some(data_dir) => CatalogConfig { data_dir },
        None => fallback,
    }
}

pub(crate) fn load_engine(config: &CatalogConfig) -> Result<Arc<RiskEngine>, AppError> {
    Ok(Arc::new(RiskEngine::from_config(config)?))
}

pub(crate) fn read_user_data(path: &Path) -> Result<UserData, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
