//! REST API handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::types::{
    ErrorResponse, FilesQuery, ListSessionsResponse, SessionStatusResponse, SessionSummary,
    TerminalRequest, TerminalResponse,
};
use crate::error::WebDeskError;
use crate::listing::{self, FileEntry};
use crate::security::InputValidator;
use crate::session::{SessionId, SessionStore};
use crate::shell::{CommandResult, PathResolver, ShellEngine};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub engine: Arc<ShellEngine>,
    pub validator: Arc<InputValidator>,
}

impl AppState {
    /// Build state jailed to `root`.
    pub fn new(root: impl Into<PathBuf>) -> crate::Result<Self> {
        let root = root.into();
        let resolver = PathResolver::new(&root)
            .map_err(|e| WebDeskError::InvalidRoot(format!("{}: {}", root.display(), e)))?;
        Ok(Self::with_resolver(resolver))
    }

    /// Build state from an already-constructed resolver.
    pub fn with_resolver(resolver: PathResolver) -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            engine: Arc::new(ShellEngine::new(resolver)),
            validator: Arc::new(InputValidator::default()),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(err: WebDeskError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error(err.to_string())),
    )
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "webdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Execute one terminal command line.
///
/// The session is looked up by the ID carried in the request; a missing or
/// stale ID lazily creates a fresh session rooted at the web root. The
/// session's lock is held across the whole dispatch, so concurrent requests
/// against one session execute one at a time.
pub async fn execute_terminal(
    State(state): State<AppState>,
    Json(req): Json<TerminalRequest>,
) -> Result<Json<TerminalResponse>, ApiError> {
    if let Err(err) = state.validator.validate_command(&req.command) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(err.to_string())),
        ));
    }

    let requested = req.session_id.map(SessionId::from_raw);
    let (id, session) = state
        .store
        .get_or_create(requested, state.engine.resolver().root())
        .map_err(internal)?;

    let result = {
        let mut session = session.lock().await;
        state.engine.dispatch(&mut session, &req.command)
    };

    if result == CommandResult::Terminated {
        state.store.remove(&id).map_err(internal)?;
        tracing::info!(session = %id, "session ended");
    }

    Ok(Json(TerminalResponse::from_result(id, &result)))
}

/// List the contents of a root-relative directory.
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FilesQuery>,
) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let dir = query.dir.unwrap_or_default();

    if let Err(err) = state.validator.validate_listing_path(&dir) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(err.to_string())),
        ));
    }

    listing::list_directory(state.engine.resolver(), &dir)
        .map(Json)
        .map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::invalid_directory()),
            )
        })
}

/// List all sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ListSessionsResponse>, ApiError> {
    let ids = state.store.list_ids().map_err(internal)?;

    let mut sessions = Vec::with_capacity(ids.len());
    for id in ids {
        if let Ok(Some(handle)) = state.store.get(&id) {
            let session = handle.lock().await;
            sessions.push(SessionSummary {
                session_id: session.id.as_u64(),
                cwd: state.engine.resolver().display_from_root(session.cwd()),
                history_len: session.history().len(),
                idle_seconds: session.idle_duration().as_secs_f64(),
            });
        }
    }

    Ok(Json(ListSessionsResponse {
        count: sessions.len(),
        sessions,
    }))
}

/// Get session status.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<u64>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let id = SessionId::from_raw(session_id);

    let handle = state
        .store
        .get(&id)
        .map_err(internal)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::session_not_found(&id.to_string())),
            )
        })?;

    let session = handle.lock().await;
    let cwd = state.engine.resolver().display_from_root(session.cwd());
    Ok(Json(SessionStatusResponse::new(&session, cwd)))
}

/// Delete a session (the transport-level equivalent of `exit`).
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::from_raw(session_id);

    let removed = state.store.remove(&id).map_err(internal)?;
    if removed.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::session_not_found(&id.to_string())),
        ));
    }

    tracing::info!(session = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}
