/// Platform-specific functionality — storage volume classification.
///
/// On Windows the classification uses `GetDriveTypeW` plus a seek-penalty
/// IOCTL to tell solid-state from spinning disks. Other platforms fall back
/// to "fixed, undetermined", which the planner treats conservatively.

#[cfg(windows)]
pub mod volume;

#[cfg(windows)]
pub use volume::classify_volume;

#[cfg(not(windows))]
use crate::planner::StorageMedium;
#[cfg(not(windows))]
use std::path::Path;

/// Best-effort classification for non-Windows hosts.
///
/// Without a storage-management query we cannot distinguish media kinds, so
/// an existing path is reported as a fixed disk of undetermined type (the
/// planner's fail-safe branch) and anything unresolvable as `Unknown`.
#[cfg(not(windows))]
pub fn classify_volume(path: &Path) -> StorageMedium {
    if path.exists() {
        StorageMedium::Fixed { solid_state: None }
    } else {
        StorageMedium::Unknown
    }
}
