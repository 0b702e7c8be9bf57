/// One catalog entry per ingested file.
///
/// `directory`, `base_name`, and `extension` are derived from `path` and are
/// recomputed atomically whenever the path is assigned — the only way to set
/// a path is [`FileRecord::set_path`], so the derived fields can never drift.
use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::signature::FileSignature;
use super::size;

/// A single ingested file with columnar metadata for sorting and filtering.
///
/// Records are created by the ingestion pipeline (or directly in tests) and
/// are immutable once placed in a catalog, except for `signature` during
/// classification and `add_index` during catalog admission/renumbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full platform-normalized path; the unique key within a catalog
    /// (compared case-insensitively).
    path: String,
    /// Derived: the containing directory.
    directory: String,
    /// Derived: file name including extension.
    base_name: CompactString,
    /// Derived: lowercased extension without the leading dot.
    extension: CompactString,
    /// Logical file size in bytes.
    pub size_bytes: u64,
    /// Creation timestamp, when the filesystem provides one.
    pub created: Option<DateTime<Local>>,
    /// Last-modified timestamp, when the filesystem provides one.
    pub modified: Option<DateTime<Local>>,
    /// Header-sniffed classification; `Unknown` until the pipeline assigns it.
    pub signature: FileSignature,
    /// Insertion sequence number, assigned on first catalog admission and
    /// renumbered on explicit reorder. Preserved across sorts.
    pub add_index: Option<u64>,
}

impl FileRecord {
    /// Create a record for `path` with derived fields populated and every
    /// other field at its default.
    pub fn new(path: impl Into<String>) -> Self {
        let mut record = Self {
            path: String::new(),
            directory: String::new(),
            base_name: CompactString::default(),
            extension: CompactString::default(),
            size_bytes: 0,
            created: None,
            modified: None,
            signature: FileSignature::Unknown,
            add_index: None,
        };
        record.set_path(path);
        record
    }

    /// Assign a new path, recomputing `directory`, `base_name`, and
    /// `extension` in the same call.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        let p = Path::new(&self.path);
        self.directory = p
            .parent()
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.base_name = p
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();
        self.extension = p
            .extension()
            .map(|e| CompactString::new(e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    #[inline]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Lowercased extension without the leading dot ("" when the file has none).
    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Case-folded path used as the catalog's uniqueness key.
    pub fn path_key(&self) -> String {
        self.path.to_lowercase()
    }

    /// Human-readable size string (binary units, one decimal digit).
    pub fn display_size(&self) -> String {
        size::format_size(self.size_bytes)
    }

    /// `true` when the sniffed signature contradicts the file extension.
    ///
    /// Unknown signatures never count as a mismatch; extension comparison is
    /// case-insensitive and synonym-aware (`jpg`≡`jpeg`, `tif`≡`tiff`).
    pub fn is_mismatch(&self) -> bool {
        !self.signature.is_unknown() && !self.signature.matches_extension(&self.extension)
    }
}
