/// Concurrency planning — pick an I/O parallelism degree for a batch based
/// on the storage medium that backs it.
///
/// Too few workers leave a solid-state drive idle; too many thrash the heads
/// of a spinning disk or exhaust a file server's connection limit. The
/// planner maps a classified medium to a worker count; classification itself
/// lives behind the [`VolumeClassifier`] trait so tests can inject fixed
/// mediums and live code can use the platform query in [`crate::platform`].
///
/// Classification is best-effort: every detection failure degrades to a safe
/// default and never blocks ingestion.
use std::path::Path;

/// The kind of storage volume backing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMedium {
    /// Network share or mapped remote drive.
    Network,
    /// Removable media (USB stick, card reader).
    Removable,
    /// Fixed local disk; `solid_state` is `None` when the SSD-vs-HDD probe
    /// was unavailable or failed.
    Fixed { solid_state: Option<bool> },
    /// Volume could not be resolved at all.
    Unknown,
}

/// Resolves the storage medium for a representative path.
///
/// The live implementation is [`SystemClassifier`]; tests supply fakes that
/// return fixed mediums so the parallelism table can be verified
/// deterministically.
pub trait VolumeClassifier {
    fn classify(&self, path: &Path) -> StorageMedium;
}

/// Platform-backed classifier used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClassifier;

impl VolumeClassifier for SystemClassifier {
    fn classify(&self, path: &Path) -> StorageMedium {
        crate::platform::classify_volume(path)
    }
}

/// Map a storage medium to a recommended worker count.
///
/// | Medium                | Parallelism                  |
/// |-----------------------|------------------------------|
/// | network               | 2 (connection limits)        |
/// | removable             | 4                            |
/// | fixed, solid-state    | logical processor count      |
/// | fixed, spinning disk  | 4 (avoid seek-thrashing)     |
/// | fixed, undetermined   | 4 (assume spinning disk)     |
/// | unknown volume        | min(processor count, 8)      |
pub fn recommended_parallelism(medium: StorageMedium) -> usize {
    match medium {
        StorageMedium::Network => 2,
        StorageMedium::Removable => 4,
        StorageMedium::Fixed {
            solid_state: Some(true),
        } => num_cpus::get(),
        StorageMedium::Fixed { .. } => 4,
        StorageMedium::Unknown => num_cpus::get().min(8),
    }
}

/// Classify `path`'s volume and return the recommended worker count for it.
pub fn plan_for(classifier: &dyn VolumeClassifier, path: &Path) -> usize {
    recommended_parallelism(classifier.classify(path))
}
