//! The virtual terminal engine.
//!
//! This module implements the command dispatcher and the handlers behind the
//! browser terminal: a small verb set interpreted against the real
//! filesystem, confined beneath the configured web root. Verbs are matched
//! case-insensitively; paths stay case-sensitive.

mod resolver;
mod result;

use std::fs;
use std::path::Path;

pub use resolver::{PathError, PathResolver};
pub use result::CommandResult;

use crate::session::Session;

/// Usage text returned by `help`.
const HELP_TEXT: &str = "\
Available commands:
  ls                    List files
  cd <dir>              Change directory
  cat <file>            View file content
  rm <file/folder>      Delete file/folder
  touch <file>          Create new file
  mkdir <folder>        Create new folder
  rename <old> <new>    Rename file or folder
  edit <file>           Edit file content
  clear/cls             Clear screen
  history               Show command history
  pwd                   Show current directory
  help                  Show this help
  exit                  End session";

/// Interprets command lines against a session and the file store.
///
/// The engine is stateless between calls; everything per-client lives in the
/// [`Session`] passed to [`dispatch`](Self::dispatch). Callers must hold the
/// session's lock for the whole call so command execution stays serialized
/// per session.
#[derive(Debug, Clone)]
pub struct ShellEngine {
    resolver: PathResolver,
}

impl ShellEngine {
    /// Create an engine confined to the resolver's root.
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// The resolver this engine confines paths with.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Parse and execute one command line.
    ///
    /// Empty or whitespace-only input produces empty text and is not
    /// recorded. Every other line lands in the session history before its
    /// handler runs, so history reflects attempts, not successes.
    pub fn dispatch(&self, session: &mut Session, line: &str) -> CommandResult {
        let line = line.trim();
        if line.is_empty() {
            return CommandResult::Text(String::new());
        }

        session.record_history(line);
        // The stored cwd can go stale if its directory was removed out of
        // band; recover silently rather than failing the command.
        session.ensure_valid_cwd(self.resolver.root());
        session.touch();

        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let args = parts.collect::<Vec<_>>().join(" ");

        tracing::debug!(session = %session.id, verb = %verb, "dispatching command");

        match verb.as_str() {
            "ls" => self.list(session),
            "cd" => self.change_dir(session, &args),
            "cat" => self.read_file(session, &args),
            "rm" => self.remove(session, &args),
            "touch" => self.create_file(session, &args),
            "mkdir" => self.create_dir(session, &args),
            "rename" => self.rename(session, &args),
            "clear" | "cls" => CommandResult::ClearScreen,
            "edit" => self.edit(session, &args),
            "history" => CommandResult::Text(session.history().join("\n")),
            "pwd" => CommandResult::Text(self.resolver.display_from_root(session.cwd())),
            "help" => CommandResult::text(HELP_TEXT),
            "exit" => CommandResult::Terminated,
            _ => CommandResult::text("Unknown command. Type 'help' to see commands."),
        }
    }

    fn list(&self, session: &Session) -> CommandResult {
        let Ok(entries) = fs::read_dir(session.cwd()) else {
            return CommandResult::text("Current directory is invalid.");
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        CommandResult::Text(names.join("\n"))
    }

    fn change_dir(&self, session: &mut Session, args: &str) -> CommandResult {
        match self.resolver.resolve(session.cwd(), args) {
            Ok(target) if target.is_dir() => {
                session.set_cwd(target);
                CommandResult::Text(String::new())
            }
            _ => CommandResult::text("Directory not found."),
        }
    }

    fn read_file(&self, session: &Session, args: &str) -> CommandResult {
        match self.resolver.resolve(session.cwd(), args) {
            Ok(target) if target.is_file() => match fs::read(&target) {
                Ok(bytes) => CommandResult::Text(String::from_utf8_lossy(&bytes).into_owned()),
                Err(_) => CommandResult::text("File not found."),
            },
            _ => CommandResult::text("File not found."),
        }
    }

    fn remove(&self, session: &Session, args: &str) -> CommandResult {
        let Ok(target) = self.resolver.resolve(session.cwd(), args) else {
            return CommandResult::text("File or folder not found.");
        };
        if target.is_dir() {
            // Non-recursive by policy: a jail whose other verbs touch one
            // entry at a time should not delete trees.
            match fs::read_dir(&target).map(|mut entries| entries.next().is_some()) {
                Ok(true) => return CommandResult::text("Folder is not empty."),
                Ok(false) => {}
                Err(_) => return CommandResult::text("File or folder not found."),
            }
            match fs::remove_dir(&target) {
                Ok(()) => CommandResult::text("Deleted successfully."),
                Err(_) => CommandResult::text("File or folder not found."),
            }
        } else {
            match fs::remove_file(&target) {
                Ok(()) => CommandResult::text("Deleted successfully."),
                Err(_) => CommandResult::text("File or folder not found."),
            }
        }
    }

    fn create_file(&self, session: &Session, args: &str) -> CommandResult {
        let Ok(target) = self.resolver.build(session.cwd(), args) else {
            return CommandResult::text("Invalid path.");
        };
        if path_exists(&target) {
            return CommandResult::text("File already exists.");
        }
        match fs::write(&target, "") {
            Ok(()) => CommandResult::text("File created."),
            Err(_) => CommandResult::text("Invalid path."),
        }
    }

    fn create_dir(&self, session: &Session, args: &str) -> CommandResult {
        let Ok(target) = self.resolver.build(session.cwd(), args) else {
            return CommandResult::text("Invalid path.");
        };
        if path_exists(&target) {
            return CommandResult::text("Folder already exists.");
        }
        match fs::create_dir(&target) {
            Ok(()) => CommandResult::text("Folder created."),
            Err(_) => CommandResult::text("Invalid path."),
        }
    }

    fn rename(&self, session: &Session, args: &str) -> CommandResult {
        let parts: Vec<&str> = args.split_whitespace().collect();
        if parts.len() != 2 {
            return CommandResult::text("Usage: rename <old> <new>");
        }
        let Ok(from) = self.resolver.resolve(session.cwd(), parts[0]) else {
            return CommandResult::text("Source not found.");
        };
        let Ok(to) = self.resolver.build(session.cwd(), parts[1]) else {
            return CommandResult::text("Invalid path.");
        };
        match fs::rename(&from, &to) {
            Ok(()) => CommandResult::text("Renamed successfully."),
            Err(_) => CommandResult::text("Invalid path."),
        }
    }

    fn edit(&self, session: &mut Session, args: &str) -> CommandResult {
        match self.resolver.resolve(session.cwd(), args) {
            Ok(target) if target.is_file() => {
                session.set_edit_file(target);
                CommandResult::EditUnsupported
            }
            _ => CommandResult::text("File not found or invalid path."),
        }
    }
}

/// `Path::exists` traverses symlinks; a dangling link would read as absent
/// and then fail the create. Check the link itself.
fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
