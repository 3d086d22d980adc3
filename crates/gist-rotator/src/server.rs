//! HTTP server for the gist rotator
//!
//! Provides /health, /favicon.ico, and the catch-all rotation route: every
//! other path names a gist, and each GET returns that gist's next file.

use crate::rotation::{Rotation, RotationCache};
use crate::types::{HealthResponse, MessageResponse};
use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub const EMPTY_GIST_MESSAGE: &str = "This Gist doesn't have any files";
pub const NON_UNIFORM_MESSAGE: &str = "One or more of the files in this Gist aren't JSON";

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: RotationCache,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(cache: RotationCache) -> Self {
        Self {
            cache,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/favicon.ico", get(favicon))
        .route("/", get(missing_gist_id))
        .route("/{*path}", get(next_file))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Derive the gist identifier from a request path by dropping every `/`
pub fn parse_gist_id(path: &str) -> String {
    path.split('/').collect()
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: state.cache.stats(),
    })
}

/// Browsers ask for this on every page load; answering here keeps it from
/// being treated as a gist identifier.
async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn missing_gist_id() -> Response {
    bad_request()
}

/// Serve the next file of the gist named by the path
///
/// axum routes HEAD to GET handlers; only a real GET may advance the cursor.
async fn next_file(
    State(state): State<SharedState>,
    method: Method,
    Path(path): Path<String>,
) -> Response {
    if method != Method::GET {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")]).into_response();
    }

    let gist_id = parse_gist_id(&path);
    if gist_id.is_empty() {
        return bad_request();
    }

    match state.cache.next(&gist_id).await {
        Ok(Rotation::Content(content)) => {
            ([(header::CONTENT_TYPE, "application/json")], content).into_response()
        }
        Ok(Rotation::EmptyDocument) => message(EMPTY_GIST_MESSAGE),
        Ok(Rotation::NonUniformTypes) => message(NON_UNIFORM_MESSAGE),
        Err(e) => {
            warn!(gist_id = %gist_id, error = %e, "Rotation failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Failed to fetch gist".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn message(text: &str) -> Response {
    Json(MessageResponse {
        message: text.to_string(),
    })
    .into_response()
}

fn bad_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Missing gist id".to_string(),
        }),
    )
        .into_response()
}
