//! `urlguard serve`: the scan endpoint over HTTP.
//!
//! The model is loaded once before the listener binds and is shared
//! read-only between requests.
pub mod error;
pub mod handlers;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use urlguard_classifiers::io::load_model;
use urlguard_classifiers::models::UrlClassifier;

pub const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: DEFAULT_PORT,
            model: String::from("model.urlguard"),
        }
    }
}

impl ServeConfig {
    /// Build from command line values, falling back to the `PORT`
    /// environment variable and then the defaults.
    pub fn from_parts(host: Option<&str>, port: Option<u16>, model: Option<&str>) -> Result<Self> {
        let defaults = ServeConfig::default();
        Ok(ServeConfig {
            host: host.map(str::to_string).unwrap_or(defaults.host),
            port: resolve_port(port, env::var("PORT").ok().as_deref())?,
            model: model.map(str::to_string).unwrap_or(defaults.model),
        })
    }
}

/// `--port` wins over `PORT`, which wins over [`DEFAULT_PORT`].
pub fn resolve_port(cli: Option<u16>, env_port: Option<&str>) -> Result<u16> {
    if let Some(port) = cli {
        return Ok(port);
    }
    match env_port.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .with_context(|| format!("Invalid PORT value: {:?}", raw)),
        _ => Ok(DEFAULT_PORT),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn UrlClassifier>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/scan", post(handlers::scan))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: &ServeConfig) -> Result<()> {
    let artifact = load_model(&config.model)
        .with_context(|| format!("Failed to load model: {}", config.model))?;
    log::info!(
        "Loaded {}-tree model trained at {}",
        artifact.forest.n_trees(),
        artifact.trained_at
    );
    if let Some(metrics) = &artifact.metrics {
        log::info!("Model held-out accuracy: {:.4}", metrics.accuracy);
    }

    let state = AppState {
        model: Arc::new(artifact.forest),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
