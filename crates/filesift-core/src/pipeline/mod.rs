/// Ingestion pipeline — orchestrates path expansion, parallel signature
/// classification, progress emission, and the capacity policy.
///
/// The pipeline fans classification out across a bounded worker pool sized
/// by the [`crate::planner`], but hands back a finished, input-ordered batch:
/// it never mutates a [`Catalog`] from worker threads. Individual I/O
/// failures degrade the affected record (signature stays `Unknown`) and an
/// inaccessible subtree is skipped; the only condition that rejects work is
/// the all-or-nothing capacity policy, reported via `ignored_count`.
pub mod progress;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::expand::{self, DiscoveredFile, InputKind};
use crate::model::FileRecord;
use crate::planner::{self, VolumeClassifier};
use crate::sniff;
use progress::{IngestProgress, PROGRESS_INTERVAL};

/// Result of one `process` batch, before catalog admission.
#[derive(Debug)]
pub struct IngestResult {
    /// Assembled records in emission order: direct files first (input
    /// order), then directory-expanded files (traversal order). Empty when
    /// the batch was rejected or cancelled.
    pub new_records: Vec<FileRecord>,
    /// Count of input path strings supplied, including ignored ones.
    pub total_input_paths: usize,
    /// Records discarded by the capacity policy (all of them or none).
    pub ignored_count: usize,
    /// The cancellation flag was observed set at a batch boundary.
    pub was_cancelled: bool,
}

impl IngestResult {
    fn cancelled(total_input_paths: usize) -> Self {
        Self {
            new_records: Vec::new(),
            total_input_paths,
            ignored_count: 0,
            was_cancelled: true,
        }
    }
}

/// Outcome of [`ingest_into`]: one `process` batch plus catalog admission.
#[derive(Debug)]
pub struct IngestReport {
    /// The records actually admitted to the catalog (with `add_index` set).
    pub new_records: Vec<FileRecord>,
    pub total_input_paths: usize,
    /// Records rejected at the catalog boundary because their path was
    /// already present. Counted, not treated as an error.
    pub duplicate_count: usize,
    pub ignored_count: usize,
    pub was_cancelled: bool,
}

impl IngestReport {
    /// Number of records admitted; always `new_records.len()`.
    pub fn success_count(&self) -> usize {
        self.new_records.len()
    }
}

/// Run one ingestion batch.
///
/// `inputs` may mix files, directories, and nonexistent paths (the latter
/// are silently ignored). `max_total`/`current_total` drive the capacity
/// policy: when `current_total + new > max_total` the entire batch is
/// discarded and reported through `ignored_count` — no partial admission.
///
/// Progress reports are sent on `progress` at least every
/// [`PROGRESS_INTERVAL`] completions and on the final item. `cancel` is
/// checked between batch boundaries (not per file).
pub fn process(
    inputs: &[PathBuf],
    max_total: usize,
    current_total: usize,
    classifier: &dyn VolumeClassifier,
    progress: Option<&Sender<IngestProgress>>,
    cancel: &AtomicBool,
) -> IngestResult {
    let total_input_paths = inputs.len();
    if cancel.load(Ordering::Relaxed) {
        return IngestResult::cancelled(total_input_paths);
    }

    // 1. Partition inputs; nonexistent paths drop out here.
    let mut direct_files: Vec<PathBuf> = Vec::new();
    let mut directories: Vec<PathBuf> = Vec::new();
    for input in inputs {
        match expand::classify_input(input) {
            InputKind::File => direct_files.push(input.clone()),
            InputKind::Directory => directories.push(input.clone()),
            InputKind::Missing => {}
        }
    }
    debug!(
        "partitioned {} inputs into {} files and {} directories",
        total_input_paths,
        direct_files.len(),
        directories.len()
    );

    // 2. Expand directories sequentially (enumeration order stays
    // deterministic; metadata is captured during the walk).
    let discovered: Vec<DiscoveredFile> = directories
        .iter()
        .flat_map(|dir| expand::expand_directory(dir))
        .collect();

    if cancel.load(Ordering::Relaxed) {
        return IngestResult::cancelled(total_input_paths);
    }

    let total = (direct_files.len() + discovered.len()) as u64;
    let completed = AtomicU64::new(0);
    // One shared counter across both classification phases. Sends go through
    // a high-water-mark lock: a worker that crossed a reporting threshold
    // later in counter order could otherwise reach the channel first, and
    // reported counts must never decrease.
    let last_reported = Mutex::new(0u64);
    let tick = || {
        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
        if done % PROGRESS_INTERVAL == 0 || done == total {
            if let Some(tx) = progress {
                let mut last = last_reported.lock();
                if done > *last {
                    *last = done;
                    let _ = tx.send(IngestProgress {
                        current: done,
                        total,
                    });
                }
            }
        }
    };

    // 3. Direct files: single-touch inspection on a pool sized for the
    // first file's volume. rayon's indexed collect writes each result into
    // its input-order slot, so emission order is stable no matter which
    // worker finishes first.
    let direct_records: Vec<FileRecord> = if direct_files.is_empty() {
        Vec::new()
    } else {
        let threads = planner::plan_for(classifier, &direct_files[0]);
        with_pool(threads, || {
            direct_files
                .par_iter()
                .map(|path| {
                    let ins = sniff::inspect(path);
                    let mut record = FileRecord::new(path.to_string_lossy().into_owned());
                    record.size_bytes = ins.size_bytes;
                    record.created = ins.created;
                    record.modified = ins.modified;
                    record.signature = ins.signature;
                    tick();
                    record
                })
                .collect()
        })
    };

    if cancel.load(Ordering::Relaxed) {
        return IngestResult::cancelled(total_input_paths);
    }

    // 4. Directory-expanded files already carry metadata; only the header
    // sniff remains. Pool sized for the first directory's volume.
    let expanded_records: Vec<FileRecord> = if discovered.is_empty() {
        Vec::new()
    } else {
        let threads = planner::plan_for(classifier, &directories[0]);
        with_pool(threads, || {
            discovered
                .par_iter()
                .map(|file| {
                    let mut record = FileRecord::new(file.path.to_string_lossy().into_owned());
                    record.size_bytes = file.size_bytes;
                    record.created = file.created;
                    record.modified = file.modified;
                    record.signature = sniff::sniff_file(&file.path);
                    tick();
                    record
                })
                .collect()
        })
    };

    // 5. Capacity policy — all or nothing.
    let new_count = direct_records.len() + expanded_records.len();
    if current_total + new_count > max_total {
        info!(
            "capacity policy: {current_total} existing + {new_count} new exceeds {max_total}; \
             rejecting the batch"
        );
        return IngestResult {
            new_records: Vec::new(),
            total_input_paths,
            ignored_count: new_count,
            was_cancelled: false,
        };
    }

    let mut new_records = direct_records;
    new_records.extend(expanded_records);
    IngestResult {
        new_records,
        total_input_paths,
        ignored_count: 0,
        was_cancelled: false,
    }
}

/// Run one batch and admit the results into `catalog`, counting duplicates
/// rejected at the catalog boundary.
pub fn ingest_into(
    catalog: &mut Catalog,
    inputs: &[PathBuf],
    max_total: usize,
    classifier: &dyn VolumeClassifier,
    progress: Option<&Sender<IngestProgress>>,
    cancel: &AtomicBool,
) -> IngestReport {
    let result = process(
        inputs,
        max_total,
        catalog.len(),
        classifier,
        progress,
        cancel,
    );

    let mut admitted = Vec::with_capacity(result.new_records.len());
    let mut duplicate_count = 0;
    for record in result.new_records {
        match catalog.add(record) {
            Ok(stored) => admitted.push(stored.clone()),
            Err(CatalogError::DuplicatePath { path }) => {
                debug!("duplicate path skipped: {path}");
                duplicate_count += 1;
            }
        }
    }

    IngestReport {
        new_records: admitted,
        total_input_paths: result.total_input_paths,
        duplicate_count,
        ignored_count: result.ignored_count,
        was_cancelled: result.was_cancelled,
    }
}

/// Run `op` on a dedicated pool of `threads` workers.
///
/// A pool-build failure (resource exhaustion) falls back to the shared
/// global pool rather than failing the batch.
fn with_pool<T: Send>(threads: usize, op: impl FnOnce() -> T + Send) -> T {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
    {
        Ok(pool) => pool.install(op),
        Err(err) => {
            warn!("could not build a {threads}-thread pool: {err}; using the shared pool");
            op()
        }
    }
}
