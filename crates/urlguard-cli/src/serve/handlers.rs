use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use urlguard_classifiers::models::UrlClassifier;
use urlguard_classifiers::scan::classify_request;

use super::error::ScanError;
use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
}

/// `POST /scan`. An empty body counts as a request without a URL.
pub async fn scan(State(state): State<AppState>, body: Bytes) -> Result<Json<ScanResponse>, ScanError> {
    let request: ScanRequest = if body.is_empty() {
        ScanRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ScanError::BadRequest(e.to_string()))?
    };

    let verdict = classify_request(request.url.as_deref(), state.model.as_ref())?;
    Ok(Json(ScanResponse {
        result: verdict.message().to_string(),
    }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model.name().to_string(),
    })
}
