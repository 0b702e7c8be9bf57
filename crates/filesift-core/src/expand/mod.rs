/// Path expansion — recursive directory enumeration into flat file lists.
///
/// Traversal is sequential and single-threaded: enumeration order matters for
/// deterministic output and directory listing is rarely the bottleneck (the
/// parallel work happens later, in signature classification).
///
/// Inaccessible subtrees are skipped, reported via `tracing`, and never abort
/// the expansion of their siblings.
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file found under a supplied directory, with metadata captured from the
/// traversal itself so downstream stages never need a second stat call.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
}

/// How a single input string was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
    /// Neither an existing file nor an existing directory; silently ignored
    /// by the pipeline.
    Missing,
}

/// Classify one input path without following it into anything.
pub fn classify_input(path: &Path) -> InputKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => InputKind::Directory,
        Ok(meta) if meta.is_file() => InputKind::File,
        Ok(_) => InputKind::Missing,
        Err(err) => {
            debug!("ignoring input {}: {err}", path.display());
            InputKind::Missing
        }
    }
}

/// Enumerate every file under `root` with an iterative depth-first walk.
///
/// Uses an explicit stack rather than recursion so arbitrarily deep trees
/// cannot overflow the call stack. A subtree whose listing fails (typically
/// access denied) is skipped; traversal continues with its siblings.
pub fn expand_directory(root: &Path) -> Vec<DiscoveredFile> {
    let mut files = Vec::new();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("skipping unreadable directory {}: {err}", dir.display());
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {err}", dir.display());
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(err) => {
                    warn!("cannot stat {}: {err}", entry.path().display());
                    continue;
                }
            };

            if file_type.is_dir() {
                stack.push(entry.path());
            } else if file_type.is_file() {
                // DirEntry::metadata is cheap here: on most platforms the
                // traversal already has the data in hand.
                let (size_bytes, created, modified) = match entry.metadata() {
                    Ok(meta) => (
                        meta.len(),
                        meta.created().ok().map(DateTime::<Local>::from),
                        meta.modified().ok().map(DateTime::<Local>::from),
                    ),
                    Err(err) => {
                        warn!("cannot read metadata for {}: {err}", entry.path().display());
                        (0, None, None)
                    }
                };
                files.push(DiscoveredFile {
                    path: entry.path(),
                    size_bytes,
                    created,
                    modified,
                });
            }
            // Symlinks and other special entries are neither files nor
            // directories here and are not ingested.
        }
    }

    files
}
