use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, CatalogError, DiseaseConfig};
use crate::coaching::{
    consult_advice, prevention_list, prevention_plan, recommend_tests, ConsultAdvice,
    ConsultLevel, PreventionPlan, TestRecommendation,
};
use crate::config::CatalogConfig;

use super::classifier::{RiskBands, RiskClass};
use super::composer::{compose, round_probability};
use super::context::AssessmentContext;
use super::domain::UserData;
use super::explain::explain;
use super::scoring::{score_disease, ComponentScores};

/// Scores every configured disease for a user. Holds only immutable tables,
/// so one engine can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    catalog: Arc<Catalog>,
    bands: RiskBands,
}

impl RiskEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let bands = catalog.bands();
        Self { catalog, bands }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(Arc::new(Catalog::load(config)?)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classify(&self, probability: f64) -> RiskClass {
        self.bands.classify(probability)
    }

    /// One result per configured disease, highest probability first. Ties keep
    /// configuration order.
    pub fn predict(&self, user: &UserData) -> Vec<DiseaseRiskResult> {
        let ctx = AssessmentContext::from_user_data(user);
        let mut results: Vec<DiseaseRiskResult> = self
            .catalog
            .diseases()
            .iter()
            .map(|disease| self.assess(disease, &ctx))
            .collect();

        results.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        results
    }

    /// Result for a single disease, or `None` when the id is not configured.
    pub fn predict_disease(&self, user: &UserData, disease_id: &str) -> Option<DiseaseRiskResult> {
        let disease = self.catalog.disease(disease_id)?;
        Some(self.assess(disease, &AssessmentContext::from_user_data(user)))
    }

    fn assess(&self, disease: &DiseaseConfig, ctx: &AssessmentContext<'_>) -> DiseaseRiskResult {
        let (components, signals) = score_disease(disease, ctx);
        let probability = compose(disease, &components, ctx);
        let risk_class = self.classify(probability);

        debug!(
            disease = %disease.id,
            family = components.family,
            lifestyle = components.lifestyle,
            lab = components.lab,
            probability,
            risk_class = %risk_class,
            "disease scored"
        );

        let reasons = explain(disease, ctx, &components, &signals, probability);
        let guidelines = self.catalog.guidelines();
        let tests = recommend_tests(&disease.id, risk_class, ctx, self.catalog.tests());
        let consult_detail = consult_advice(&disease.id, risk_class, probability, ctx);

        DiseaseRiskResult {
            disease_id: disease.id.clone(),
            disease_name: disease.name.clone(),
            probability: round_probability(probability),
            risk_class,
            components,
            reasons,
            prevention: prevention_list(&disease.id, risk_class, guidelines),
            prevention_plan: prevention_plan(&disease.id, risk_class, ctx, guidelines),
            recommended_tests: tests.names,
            recommended_tests_detail: tests.details,
            consult: consult_detail.level,
            consult_detail,
        }
    }
}

/// Per-disease engine output, created fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseRiskResult {
    pub disease_id: String,
    pub disease_name: String,
    pub probability: f64,
    pub risk_class: RiskClass,
    pub components: ComponentScores,
    pub reasons: Vec<String>,
    pub prevention: Vec<String>,
    pub prevention_plan: PreventionPlan,
    pub recommended_tests: Vec<String>,
    pub recommended_tests_detail: Vec<TestRecommendation>,
    pub consult: ConsultLevel,
    pub consult_detail: ConsultAdvice,
}
