//! Chronic disease risk scoring with explanations and coaching guidance.

pub mod assessment;
pub mod catalog;
pub mod coaching;
pub mod config;
pub mod error;
pub mod export;
pub mod telemetry;
