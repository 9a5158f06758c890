//! Directory listing for the files endpoint.
//!
//! A stateless read-only view over the same jail the terminal lives in: the
//! requested directory is resolved against the root with the exact
//! confinement rule the shell uses, so the two surfaces can never disagree
//! about what is reachable.

use std::fs;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use crate::shell::{PathError, PathResolver};

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Entry name, no path components.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes; folders serialize as `"-"`.
    #[serde(serialize_with = "serialize_size")]
    pub size: Option<u64>,
    /// Modification time, `YYYY-MM-DD HH:MM:SS` in server-local time.
    pub modified: String,
}

/// Entry kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

fn serialize_size<S: Serializer>(size: &Option<u64>, ser: S) -> Result<S::Ok, S::Error> {
    match size {
        Some(bytes) => ser.serialize_u64(*bytes),
        None => ser.serialize_str("-"),
    }
}

/// List the direct children of a root-relative directory, sorted by name.
///
/// Self/parent entries never appear. Entries whose metadata cannot be read
/// (e.g. racing deletion) are skipped rather than failing the listing.
pub fn list_directory(resolver: &PathResolver, dir: &str) -> Result<Vec<FileEntry>, PathError> {
    let target = resolver.resolve(resolver.root(), dir)?;
    if !target.is_dir() {
        return Err(PathError::NotFound);
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(&target).map_err(|_| PathError::NotFound)? {
        let Ok(entry) = entry else { continue };
        let Ok(metadata) = entry.metadata() else { continue };

        let modified = metadata
            .modified()
            .map(format_timestamp)
            .unwrap_or_default();

        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: if metadata.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            },
            size: if metadata.is_dir() {
                None
            } else {
                Some(metadata.len())
            },
            modified,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
