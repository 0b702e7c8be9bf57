/// FileSift Core — ingestion, classification, and catalog engine.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, TUI).
///
/// # Modules
///
/// - [`model`] — File records, signature tokens, and display formatting.
/// - [`expand`] — Recursive path expansion with permission-tolerant traversal.
/// - [`sniff`] — Magic-number header sniffing and single-touch inspection.
/// - [`planner`] — Storage-medium-adaptive concurrency planning.
/// - [`pipeline`] — Batch ingestion: expansion → classification → assembly.
/// - [`catalog`] — Ordered, deduplicated record collection and sort engine.
/// - [`platform`] — Platform-specific storage volume classification.
pub mod catalog;
pub mod expand;
pub mod model;
pub mod pipeline;
pub mod planner;
pub mod platform;
pub mod sniff;
