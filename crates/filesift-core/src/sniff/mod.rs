/// Signature sniffing — classify files by their leading magic bytes.
///
/// Only the first [`HEADER_LEN`] bytes of a file are ever read. Matching is
/// strictly ordered: the patterns in `sniff_header` are currently disjoint,
/// but the check order must be preserved as written because future pattern
/// additions could overlap.
///
/// Every failure mode (missing file, permission denial, zero-length file,
/// short read) degrades to [`FileSignature::Unknown`] — nothing in this
/// module returns an error to the caller.
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

use crate::model::FileSignature;

/// Number of header bytes read for classification.
///
/// The longest pattern (WEBP) needs bytes 8..12; 16 leaves headroom.
pub const HEADER_LEN: usize = 16;

/// Match a header buffer against the fixed magic-number table.
///
/// Buffers shorter than 2 bytes can match nothing and yield `Unknown`.
pub fn sniff_header(header: &[u8]) -> FileSignature {
    if header.len() < 2 {
        return FileSignature::Unknown;
    }

    // Keep this check order — see module docs.
    if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
        FileSignature::Jpg
    } else if header.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        FileSignature::Png
    } else if header.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
        FileSignature::Gif
    } else if header.starts_with(&[0x42, 0x4D]) {
        FileSignature::Bmp
    } else if header.starts_with(&[0x49, 0x49, 0x2A])
        || header.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        FileSignature::Tiff
    } else if header.len() >= 12
        && header[..4] == [0x52, 0x49, 0x46, 0x46]
        && header[8..12] == [0x57, 0x45, 0x42, 0x50]
    {
        FileSignature::Webp
    } else {
        FileSignature::Unknown
    }
}

/// Metadata and classification obtained from a single file-handle acquisition.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub size_bytes: u64,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub signature: FileSignature,
}

impl Inspection {
    /// The degraded result for a file that could not be opened at all.
    fn unreadable() -> Self {
        Self {
            size_bytes: 0,
            created: None,
            modified: None,
            signature: FileSignature::Unknown,
        }
    }
}

/// Single-touch inspection: one open handle serves both the metadata query
/// and the header read, so the file is never opened twice.
///
/// The handle is released on every exit path (it is a plain `File` drop).
pub fn inspect(path: &Path) -> Inspection {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            debug!("cannot open {} for inspection: {err}", path.display());
            return Inspection::unreadable();
        }
    };

    let (size_bytes, created, modified) = match file.metadata() {
        Ok(meta) => (
            meta.len(),
            meta.created().ok().map(DateTime::<Local>::from),
            meta.modified().ok().map(DateTime::<Local>::from),
        ),
        Err(_) => (0, None, None),
    };

    Inspection {
        size_bytes,
        created,
        modified,
        signature: read_and_sniff(&mut file),
    }
}

/// Header-only classification for files whose metadata is already known
/// (directory expansion attaches it during traversal).
pub fn sniff_file(path: &Path) -> FileSignature {
    match File::open(path) {
        Ok(mut file) => read_and_sniff(&mut file),
        Err(err) => {
            debug!("cannot open {} for sniffing: {err}", path.display());
            FileSignature::Unknown
        }
    }
}

/// Read up to `HEADER_LEN` bytes from the start of an open file and classify.
///
/// Short reads are retried until EOF so a slow pipe-backed source cannot
/// truncate the header; any read error yields `Unknown`.
fn read_and_sniff(file: &mut File) -> FileSignature {
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        match file.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(_) => return FileSignature::Unknown,
        }
    }
    sniff_header(&header[..filled])
}
