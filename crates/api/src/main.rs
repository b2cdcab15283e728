mod config;
mod error;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use error::ApiError;
use model::{EndpointClient, TextGenerator};
use pipeline::{AnswerQueryResponse, Pipelines, PrescriptionSummary};

struct AppState<G> {
    pipelines: Pipelines<G>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
struct SummarizeRequest {
    text: String,
    #[serde(default = "default_locale")]
    locale: String,
}

#[derive(Serialize)]
struct SummarizeResponse {
    summary: PrescriptionSummary,
}

#[derive(Deserialize)]
struct AnswerQueryRequest {
    query: String,
    #[serde(default = "default_locale")]
    locale: String,
    /// Optional structured context, either the summary record itself or
    /// wrapped under a `summary` key.
    #[serde(default)]
    prescription_summary: Option<Value>,
}

fn default_locale() -> String {
    "en-IN".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let medical = EndpointClient::new(
        config.medical_endpoint_url.clone(),
        config.api_token.clone(),
        timeout,
    )?;
    let refiner = EndpointClient::new(
        config.refiner_endpoint_url.clone(),
        config.api_token.clone(),
        timeout,
    )?;

    let state = Arc::new(AppState {
        pipelines: Pipelines::new(medical, refiner),
    });

    let app = router(state)
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn router<G: TextGenerator + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/summarize-prescription", post(summarize_prescription::<G>))
        .route("/answer-query", post(answer_query::<G>))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn summarize_prescription<G: TextGenerator>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let text = req.text.trim();
    if text.chars().count() < 5 {
        return Err(ApiError::unprocessable("text must be at least 5 characters"));
    }
    tracing::debug!(locale = %req.locale, "summarize-prescription request");

    let summary = state.pipelines.summarize(text).await?;
    Ok(Json(SummarizeResponse { summary }))
}

async fn answer_query<G: TextGenerator>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<AnswerQueryRequest>,
) -> Result<Json<AnswerQueryResponse>, ApiError> {
    let query = req.query.trim();
    if query.chars().count() < 3 {
        return Err(ApiError::unprocessable("query must be at least 3 characters"));
    }
    tracing::debug!(
        locale = %req.locale,
        has_prescription_context = req.prescription_summary.is_some(),
        "answer-query request"
    );

    let answer = state
        .pipelines
        .answer(query, req.prescription_summary.as_ref())
        .await?;
    Ok(Json(answer))
}
