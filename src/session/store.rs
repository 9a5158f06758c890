//! Session state and storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::SessionId;
use crate::error::WebDeskError;
use crate::Result;

/// Per-client terminal state.
///
/// The working directory is the invariant-bearing field: it is always an
/// absolute path to an existing directory inside the web root. It is only
/// ever replaced wholesale with an already-validated path, never edited in
/// place, so a failed command leaves it untouched.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier.
    pub id: SessionId,
    /// Current working directory.
    cwd: PathBuf,
    /// Raw command lines in submission order, failed attempts included.
    history: Vec<String>,
    /// Path captured by the most recent `edit` request.
    edit_file: Option<PathBuf>,
    /// Time when session was created.
    created_at: Instant,
    /// Time of last activity.
    last_activity: Instant,
}

impl Session {
    /// Create a new session rooted at `root`.
    pub fn new(id: SessionId, root: PathBuf) -> Self {
        let now = Instant::now();
        Self {
            id,
            cwd: root,
            history: Vec::new(),
            edit_file: None,
            created_at: now,
            last_activity: now,
        }
    }

    /// The current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Replace the working directory. Callers pass only paths the resolver
    /// has already validated against the root.
    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    /// Reset the working directory to the root if the stored one no longer
    /// names an existing directory (deleted out of band).
    pub fn ensure_valid_cwd(&mut self, root: &Path) {
        if !self.cwd.is_dir() {
            self.cwd = root.to_path_buf();
        }
    }

    /// Append a command line to the history.
    pub fn record_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    /// All recorded command lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The file the client last asked to edit, if any.
    pub fn edit_file(&self) -> Option<&Path> {
        self.edit_file.as_deref()
    }

    /// Remember an edit target for a future editor backend.
    pub fn set_edit_file(&mut self, path: PathBuf) {
        self.edit_file = Some(path);
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Get the session age.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Get the idle duration since last activity.
    pub fn idle_duration(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// Thread-safe storage for sessions.
///
/// Each session sits behind its own async mutex; holding that lock across a
/// whole command dispatch is what serializes execution per session. The
/// outer map lock is only taken for lookups and inserts, never across
/// filesystem work.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new session rooted at `root`.
    ///
    /// Returns the newly assigned session ID and its handle.
    pub fn create(&self, root: &Path) -> Result<(SessionId, Arc<Mutex<Session>>)> {
        let id = SessionId::new();
        let session = Arc::new(Mutex::new(Session::new(id, root.to_path_buf())));

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WebDeskError::LockPoisoned)?;

        sessions.insert(id, Arc::clone(&session));
        Ok((id, session))
    }

    /// Get a handle to the session with the given ID.
    pub fn get(&self, id: &SessionId) -> Result<Option<Arc<Mutex<Session>>>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| WebDeskError::LockPoisoned)?;
        Ok(sessions.get(id).cloned())
    }

    /// Get the session with the given ID, or lazily create a fresh one when
    /// the ID is absent, unknown, or stale (e.g. after `exit`).
    pub fn get_or_create(
        &self,
        id: Option<SessionId>,
        root: &Path,
    ) -> Result<(SessionId, Arc<Mutex<Session>>)> {
        if let Some(id) = id {
            if let Some(session) = self.get(&id)? {
                return Ok((id, session));
            }
        }
        self.create(root)
    }

    /// Check if a session exists.
    pub fn contains(&self, id: &SessionId) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| WebDeskError::LockPoisoned)?;
        Ok(sessions.contains_key(id))
    }

    /// Remove a session from the store.
    ///
    /// Returns the removed handle, or None if it didn't exist. An in-flight
    /// command holding the session's lock finishes against the detached
    /// handle; no new lookup will find it.
    pub fn remove(&self, id: &SessionId) -> Result<Option<Arc<Mutex<Session>>>> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WebDeskError::LockPoisoned)?;
        Ok(sessions.remove(id))
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// List all session IDs.
    pub fn list_ids(&self) -> Result<Vec<SessionId>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| WebDeskError::LockPoisoned)?;
        Ok(sessions.keys().copied().collect())
    }

    /// Remove sessions idle for longer than `max_idle`.
    ///
    /// Sessions whose lock is currently held are in-flight and skipped.
    /// Returns the number of sessions removed. TTL policy belongs to the
    /// caller; the store only provides the sweep.
    pub fn remove_idle(&self, max_idle: Duration) -> Result<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WebDeskError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.idle_duration() <= max_idle,
            Err(_) => true,
        });
        Ok(before - sessions.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
