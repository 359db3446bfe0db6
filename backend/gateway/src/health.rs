//! Gateway Health API

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub provider: String,
    pub model: String,
    /// False when no API key was found at startup.
    pub configured: bool,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<Arc<GatewayState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: "paperforge".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        provider: state.provider_name.clone(),
        model: state.model.clone(),
        configured: state.is_configured(),
    })
}
