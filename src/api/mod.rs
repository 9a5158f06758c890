//! API layer for webdesk.
//!
//! This module is the transport in front of the terminal engine and the
//! directory listing. It owns session identification: clients carry the
//! session ID returned by their first terminal call.
//!
//! ## Endpoints
//!
//! ### Health & Info
//! - `GET /health` - Health check
//! - `GET /api/v1/` - API information
//!
//! ### Terminal & Files
//! - `POST /api/v1/terminal` - Execute one command line in a session
//! - `GET /api/v1/files?dir=...` - List a root-relative directory
//!
//! ### Sessions
//! - `GET /api/v1/sessions` - List all sessions
//! - `GET /api/v1/sessions/{id}` - Get session status
//! - `DELETE /api/v1/sessions/{id}` - Drop a session (transport-level `exit`)
//!
//! ## Example
//!
//! ```no_run
//! use webdesk::api::{AppState, ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> webdesk::Result<()> {
//!     let state = AppState::new("/srv/www")?;
//!     let config = ServerConfig::new("127.0.0.1", 3000);
//!     serve(config, state).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router_with_limiter, create_router_with_state, serve, ServerConfig};
pub use types::{
    ErrorResponse, FilesQuery, ListSessionsResponse, ResultKind, SessionStatusResponse,
    TerminalRequest, TerminalResponse,
};
