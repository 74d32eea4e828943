use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use assist_core::{
    ask, AiConfig, AskError, AskRequest, JsonlCatalog, OpenAiProvider, Orchestrator,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde_json::json;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "assist_server")]
#[command(about = "HTTP front end for the product question assistant")]
struct Cli {
    /// JSONL product catalog to serve.
    #[arg(long, env = "ASSIST_PRODUCTS")]
    products: PathBuf,

    #[arg(long, env = "ASSIST_LISTEN", default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// API key for the external AI service. Without it every question is
    /// answered by the local chain.
    #[arg(long, env = "ASSIST_API_KEY")]
    api_key: Option<String>,

    #[arg(long, env = "ASSIST_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "ASSIST_MODEL")]
    model: Option<String>,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<JsonlCatalog>,
    orchestrator: Arc<Orchestrator<OpenAiProvider>>,
    api_key_hint: Option<String>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/assistant/ask", post(ask_handler))
        .route("/api/assistant/config-check", get(config_check_handler))
        .with_state(state)
}

async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Response {
    match ask(
        state.catalog.as_ref(),
        state.orchestrator.as_ref(),
        request.product_id,
        &request.question,
    )
    .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({ "answer": answer.text, "source": answer.source })),
        )
            .into_response(),
        Err(err) => {
            let status = match &err {
                AskError::EmptyQuestion | AskError::InvalidProductId(_) => StatusCode::BAD_REQUEST,
                AskError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                AskError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

/// Reports whether the external service is usable without revealing the key.
async fn config_check_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let configured = state.api_key_hint.is_some();
    let (length, prefix) = state
        .api_key_hint
        .as_deref()
        .map(|key| (key.len(), key.chars().take(4).collect::<String>()))
        .unwrap_or((0, String::new()));

    Json(json!({
        "api_key_configured": configured,
        "api_key_length": length,
        "api_key_prefix": prefix,
    }))
}

fn build_state(cli: &Cli) -> Result<AppState> {
    let catalog =
        JsonlCatalog::load(&cli.products).context("load product catalog")?;
    info!(products = catalog.len(), "catalog loaded");

    let mut config = AiConfig {
        api_key: cli.api_key.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..AiConfig::default()
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }

    let api_key_hint = config.api_key.clone();
    let provider = OpenAiProvider::new(config)?;

    Ok(AppState {
        catalog: Arc::new(catalog),
        orchestrator: Arc::new(Orchestrator::new(provider)),
        api_key_hint,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let state = build_state(&cli)?;
    let app = router(state);

    info!(listen = %cli.listen, "assistant service listening");
    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .context("bind listen address")?;
    axum::serve(listener, app).await.context("serve http")
}
