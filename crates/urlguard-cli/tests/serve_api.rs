//! Drives the axum router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use ndarray::Array2;
use serde_json::Value;
use tower::ServiceExt;
use urlguard_classifiers::config::{ForestConfig, SplitConfig};
use urlguard_classifiers::data_handling::LabeledUrls;
use urlguard_classifiers::features::FEATURE_NAMES;
use urlguard_classifiers::models::UrlClassifier;
use urlguard_classifiers::training::train;
use urlguard_classifiers::Result;
use urlguard_cli::serve::{create_router, AppState};

/// Always answers `class`.
struct Constant {
    class: usize,
    names: Vec<String>,
}

impl Constant {
    fn new(class: usize, names: &[&str]) -> Self {
        Self {
            class,
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UrlClassifier for Constant {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        Ok(vec![self.class; x.nrows()])
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        Ok(vec![self.class as f64; x.nrows()])
    }
}

fn state(model: impl UrlClassifier + 'static) -> AppState {
    AppState {
        model: Arc::new(model),
    }
}

async fn post_scan(state: AppState, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/scan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn http_url_gets_rule_verdict() {
    let (status, body) = post_scan(
        state(Constant::new(0, &FEATURE_NAMES)),
        r#"{"url": "http://example.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Suspicious (No HTTPS found)");
}

#[tokio::test]
async fn https_url_gets_model_verdict() {
    let (status, body) = post_scan(
        state(Constant::new(1, &FEATURE_NAMES)),
        r#"{"url": "https://example.com/login"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Suspicious");

    let (_, body) = post_scan(
        state(Constant::new(0, &FEATURE_NAMES)),
        r#"{"url": "https://example.com"}"#,
    )
    .await;
    assert_eq!(body["result"], "Safe");
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    for payload in [r#"{}"#, r#"{"url": ""}"#, r#"{"url": null}"#, ""] {
        let (status, body) = post_scan(state(Constant::new(0, &FEATURE_NAMES)), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert_eq!(body["result"], "Error: No URL provided");
    }
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, body) = post_scan(state(Constant::new(0, &FEATURE_NAMES)), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["result"].as_str().unwrap().starts_with("Error:"));
}

#[tokio::test]
async fn schema_mismatch_is_server_error() {
    let (status, body) = post_scan(
        state(Constant::new(0, &FEATURE_NAMES[..5])),
        r#"{"url": "https://example.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["result"].as_str().unwrap();
    assert!(message.starts_with("Error: Feature schema mismatch"));
}

#[tokio::test]
async fn trained_forest_serves_requests() {
    let mut urls = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        urls.push(format!("https://www.docs{}.org/guide", i));
        labels.push(0);
        urls.push(format!("https://192.0.2.{}/verify-account/login", i));
        labels.push(1);
    }
    let data = LabeledUrls::new(urls, labels).unwrap();
    let forest_config = ForestConfig {
        n_trees: 10,
        ..ForestConfig::default()
    };
    let trained = train(&data, &forest_config, &SplitConfig::default()).unwrap();

    let (status, body) = post_scan(
        state(trained.forest),
        r#"{"url": "https://www.example.com/about"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result = body["result"].as_str().unwrap();
    assert!(result == "Safe" || result == "Suspicious");
}

#[tokio::test]
async fn health_reports_model_name() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = create_router(state(Constant::new(0, &FEATURE_NAMES)))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "classifier");
}

#[tokio::test]
async fn cross_origin_scan_is_allowed() {
    let request = Request::builder()
        .method("POST")
        .uri("/scan")
        .header(header::ORIGIN, "https://extension.example")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"url": "https://example.com"}"#))
        .unwrap();
    let response = create_router(state(Constant::new(0, &FEATURE_NAMES)))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn preflight_is_answered() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/scan")
        .header(header::ORIGIN, "https://extension.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = create_router(state(Constant::new(0, &FEATURE_NAMES)))
        .oneshot(request)
        .await
        .unwrap();
    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}
