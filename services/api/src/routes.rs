use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use risk_coach::assessment::{DiseaseRiskResult, UserData};
use risk_coach::catalog::{DiseaseConfig, RiskClassInfo};
use risk_coach::error::AppError;
use serde::Serialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct DiseaseOption {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictionResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) results: Vec<DiseaseRiskResult>,
}

pub(crate) fn risk_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/disease-info/list", get(disease_list_endpoint))
        .route("/api/disease-info/:disease_id", get(disease_detail_endpoint))
        .route("/api/risk-classes", get(risk_classes_endpoint))
        .route("/api/predict-risk", post(predict_risk_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "risk-coach" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({
            "status": "ready",
            "diseases": state.engine.catalog().diseases().len(),
            "tables": state.engine.catalog().sources(),
        })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn disease_list_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<DiseaseOption>> {
    let options = state
        .engine
        .catalog()
        .diseases()
        .iter()
        .map(|disease| DiseaseOption {
            id: disease.id.clone(),
            name: disease.name.clone(),
        })
        .collect();
    Json(options)
}

pub(crate) async fn disease_detail_endpoint(
    Extension(state): Extension<AppState>,
    Path(disease_id): Path<String>,
) -> Result<Json<DiseaseConfig>, AppError> {
    state
        .engine
        .catalog()
        .disease(&disease_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::UnknownDisease(disease_id))
}

pub(crate) async fn risk_classes_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<RiskClassInfo>> {
    Json(state.engine.catalog().risk_classes())
}

pub(crate) async fn predict_risk_endpoint(
    Extension(state): Extension<AppState>,
    Json(user): Json<UserData>,
) -> Json<PredictionResponse> {
    let results = state.engine.predict(&user);
    if let Some(top) = results.first() {
        info!(
            diseases = results.len(),
            top_disease = %top.disease_id,
            top_class = %top.risk_class,
            "risk prediction served"
        );
    }

    Json(PredictionResponse {
        generated_at: Utc::now(),
        results,
    })
}
