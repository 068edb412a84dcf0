//! TravelMate AI web server
//!
//! One embedded chat page plus a small JSON API over travelmate-core. The
//! session lives in memory behind a lock; one exchange runs at a time and
//! history disappears when the process stops.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use travelmate_core::{ChatSession, Config, Credentials, ModelParams, TravelMate, Turn};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const INDEX_HTML: &str = include_str!("../assets/index.html");

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone)]
struct AppState {
    assistant: Arc<TravelMate>,
    /// Environment-provided keys; request-supplied keys take precedence.
    env_credentials: Arc<Credentials>,
    session: Arc<RwLock<ChatSession>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env();
    tracing::info!("Starting TravelMate AI v{} (model {})", VERSION, config.model);
    if !config.credentials.is_complete() {
        tracing::warn!(
            "API keys incomplete in environment - clients must supply them in the page sidebar"
        );
    }

    let state = AppState {
        assistant: Arc::new(TravelMate::from_config(&config)),
        env_credentials: Arc::new(config.credentials.clone()),
        session: Arc::new(RwLock::new(ChatSession::new())),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/history", get(history_handler))
        .route("/api/clear", post(clear_handler))
        .route("/api/version", get(version_handler))
        .layer(
            tower::ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                    .allow_headers([axum::http::header::CONTENT_TYPE]),
            ),
        )
        .with_state(state);

    let addr: SocketAddr = std::env::var("TRAVELMATE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .map_err(|e| format!("Invalid TRAVELMATE_ADDR: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn version_handler() -> Json<serde_json::Value> {
    Json(json!({ "version": VERSION }))
}

#[derive(Debug, Deserialize)]
struct ChatApiRequest {
    query: String,
    #[serde(default)]
    exa_api_key: Option<String>,
    #[serde(default)]
    groq_api_key: Option<String>,
    #[serde(default)]
    openweather_api_key: Option<String>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    top_p: Option<f32>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

impl ChatApiRequest {
    /// Request keys win; blank or absent fields fall back to the environment
    fn credentials(&self, env: &Credentials) -> Credentials {
        fn pick(request_key: &Option<String>, env_key: &str) -> String {
            match request_key.as_deref().map(str::trim) {
                Some(key) if !key.is_empty() => key.to_string(),
                _ => env_key.to_string(),
            }
        }
        Credentials::new(
            pick(&self.exa_api_key, &env.exa_api_key),
            pick(&self.groq_api_key, &env.groq_api_key),
            pick(&self.openweather_api_key, &env.openweather_api_key),
        )
    }

    fn params(&self) -> ModelParams {
        let defaults = ModelParams::default();
        ModelParams {
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        }
        .clamped()
    }
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.into() })),
    )
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatApiRequest>,
) -> Result<Json<Turn>, ApiError> {
    let credentials = request.credentials(&state.env_credentials);
    let params = request.params();

    // The write lock holds for the whole exchange, serializing requests
    // against the single shared session.
    let mut session = state.session.write().await;
    state
        .assistant
        .run_exchange(&mut session, &request.query, &credentials, &params)
        .await
        .map(Json)
        .map_err(|err| bad_request(err.to_string()))
}

async fn history_handler(State(state): State<AppState>) -> Json<Vec<Turn>> {
    let session = state.session.read().await;
    Json(session.turns().to_vec())
}

async fn clear_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut session = state.session.write().await;
    session.clear();
    tracing::info!("chat history cleared");
    Json(json!({ "cleared": true }))
}
