//! # webdesk
//!
//! Backend for a browser-based "desktop OS" simulation.
//!
//! The desktop shell, dock, and app windows are pure frontend; this crate is
//! the part with real state: a virtual terminal whose working directory,
//! history, and file operations live server-side, jailed beneath a single
//! configured web root, plus a read-only directory listing sharing the same
//! jail.
//!
//! ## Features
//!
//! - **Path Confinement**: every client-supplied path is canonicalized and
//!   prefix-checked against the web root; `..` chains and symlinks cannot
//!   escape it
//! - **Session Management**: lazily created per-client sessions with
//!   serialized command execution
//! - **Typed Results**: screen-clear and edit signals are enum variants on
//!   the wire, not magic substrings
//!
//! ## Quick Start
//!
//! ```no_run
//! use webdesk::{PathResolver, Session, SessionId, ShellEngine};
//!
//! fn main() -> webdesk::Result<()> {
//!     // Initialize logging
//!     webdesk::logging::try_init().ok();
//!
//!     // Jail the shell to a web root
//!     let resolver = PathResolver::new("/srv/www")?;
//!     let engine = ShellEngine::new(resolver);
//!
//!     // One session per client terminal
//!     let mut session = Session::new(SessionId::new(), engine.resolver().root().to_path_buf());
//!     let result = engine.dispatch(&mut session, "ls");
//!     println!("{:?}", result);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod security;
pub mod session;
pub mod shell;

// Re-export commonly used types
pub use error::{Result, WebDeskError};
pub use listing::{EntryKind, FileEntry};
pub use session::{Session, SessionId, SessionStore};
pub use shell::{CommandResult, PathError, PathResolver, ShellEngine};
