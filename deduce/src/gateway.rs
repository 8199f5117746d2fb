//! HTTP/JSON front end for the session manager.
//!
//! Every failure is answered with `{"error": "..."}`: unknown sessions are
//! 404, bad input is 400 and anything else is 500.

use crate::config::DeduceConfig;
use crate::error::{DeduceError, DeduceResult};
use crate::persistence::{self, SnapshotStore, SnapshotTask};
use crate::session::{parse_limit, SessionManager, SessionSummary};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

/// A [`DeduceError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(DeduceError);

impl From<DeduceError> for ApiError {
    fn from(e: DeduceError) -> Self {
        ApiError(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(DeduceError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DeduceError::NotFound(_) => StatusCode::NOT_FOUND,
            DeduceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("[Gateway] {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinesBody {
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}

pub fn router(manager: Arc<SessionManager>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/sessions", post(create_handler).get(list_handler))
        .route("/sessions/:id", delete(delete_handler))
        .route("/sessions/:id/lines", post(add_lines_handler).get(get_lines_handler))
        .route("/sessions/:id/search", post(search_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(manager)
}

/// Serves `manager` on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    manager: Arc<SessionManager>,
    shutdown: F,
) -> DeduceResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(manager).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| DeduceError::Server(e.to_string()))
}

/// Restores the snapshot, starts the periodic writer and serves until Ctrl+C.
/// The table is flushed once more before returning.
pub async fn start(config: DeduceConfig) -> DeduceResult<()> {
    config.validate()?;
    let manager = Arc::new(SessionManager::default());
    let store = SnapshotStore::new(&config.snapshot.path);
    persistence::restore(&manager, &store);

    let task = Arc::new(SnapshotTask::new(
        manager.clone(),
        store,
        config.snapshot.interval(),
    ));
    let writer = task.clone().start();

    let listener = TcpListener::bind(config.server.bind_addr.as_str())
        .await
        .map_err(|e| {
            DeduceError::Server(format!("cannot bind {}: {}", config.server.bind_addr, e))
        })?;
    info!("[Gateway] Listening on http://{}", config.server.bind_addr);

    let served = serve(listener, manager, shutdown_signal()).await;

    writer.abort();
    match task.flush().await {
        Ok(()) => info!("[Gateway] Final snapshot written"),
        Err(e) => error!("[Gateway] Final snapshot failed: {}", e),
    }
    served
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("[Gateway] Failed to install Ctrl+C handler: {}", err);
        std::future::pending::<()>().await;
    }
    info!("[Gateway] Ctrl+C received, shutting down...");
}

/// Ids that are not UUIDs cannot name a session.
fn session_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError(DeduceError::NotFound(raw.to_string())))
}

/// Runs a session operation off the async workers; searches can be long.
async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> DeduceResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError(DeduceError::Server(format!("session task failed: {}", e))))?
        .map_err(ApiError)
}

async fn health_handler(State(manager): State<Arc<SessionManager>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: manager.session_count(),
    })
}

async fn create_handler(
    State(manager): State<Arc<SessionManager>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(body) = body?;
    let limit = parse_limit(body.get("limit").unwrap_or(&Value::Null))?;
    let id = manager.create_session(limit)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn list_handler(State(manager): State<Arc<SessionManager>>) -> Json<Vec<SessionSummary>> {
    Json(manager.list_sessions())
}

async fn delete_handler(
    State(manager): State<Arc<SessionManager>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    manager.delete_session(&session_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_lines_handler(
    State(manager): State<Arc<SessionManager>>,
    Path(id): Path<String>,
    body: Result<Json<LinesBody>, JsonRejection>,
) -> ApiResult<Json<LinesBody>> {
    let id = session_id(&id)?;
    let Json(body) = body?;
    let lines = blocking(move || manager.add_lines(&id, &body.lines)).await?;
    Ok(Json(LinesBody { lines }))
}

async fn get_lines_handler(
    State(manager): State<Arc<SessionManager>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LinesBody>> {
    let lines = manager.get_lines(&session_id(&id)?)?;
    Ok(Json(LinesBody { lines }))
}

async fn search_handler(
    State(manager): State<Arc<SessionManager>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LinesBody>> {
    let id = session_id(&id)?;
    let lines = blocking(move || manager.run_search(&id)).await?;
    Ok(Json(LinesBody { lines }))
}
