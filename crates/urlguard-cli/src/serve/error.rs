//! HTTP error mapping.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use urlguard_classifiers::ClassifierError;

use super::handlers::ScanResponse;

#[derive(Debug)]
pub enum ScanError {
    /// The request body was not a JSON object with an optional string `url`.
    BadRequest(String),
    Classifier(ClassifierError),
}

impl From<ClassifierError> for ScanError {
    fn from(err: ClassifierError) -> Self {
        ScanError::Classifier(err)
    }
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ScanError::BadRequest(reason) => {
                log::debug!("Rejected scan request: {}", reason);
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
            ScanError::Classifier(ClassifierError::MissingInput) => (
                StatusCode::BAD_REQUEST,
                ClassifierError::MissingInput.to_string(),
            ),
            ScanError::Classifier(err) => {
                log::error!("Scan failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(ScanResponse {
            result: format!("Error: {}", message),
        });
        (status, body).into_response()
    }
}
