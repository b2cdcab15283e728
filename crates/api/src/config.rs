use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Process configuration, read once from the environment at startup and
/// immutable thereafter.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the domain-specialist (draft) endpoint.
    pub medical_endpoint_url: String,
    /// Base URL of the refiner endpoint.
    pub refiner_endpoint_url: String,
    /// Bearer token accepted by both endpoints.
    pub api_token: String,
    pub host: String,
    pub port: u16,
    /// Comma-separated allow-list, or `*`.
    pub cors_origins: String,
    /// Upper bound on one model round-trip.
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            medical_endpoint_url: require("MEDICAL_ENDPOINT_URL")?,
            refiner_endpoint_url: require("REFINER_ENDPOINT_URL")?,
            api_token: require("HF_TOKEN")?,
            host: env_or("APP_HOST", "127.0.0.1"),
            port: env_or("APP_PORT", "8080")
                .parse()
                .context("APP_PORT must be a port number")?,
            cors_origins: env_or("CORS_ORIGINS", "*"),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "60")
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a number")?,
        })
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if self.cors_origins.trim() == "*" {
            layer.allow_origin(Any)
        } else {
            let origins: Vec<HeaderValue> = self
                .cors_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            layer.allow_origin(origins)
        }
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing required environment variable {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
