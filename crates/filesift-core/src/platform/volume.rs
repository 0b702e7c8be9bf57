/// Storage volume classification using the Windows API.
///
/// Resolves the volume that owns a path, classifies it as network /
/// removable / fixed, and for fixed volumes probes the seek-penalty storage
/// property to decide solid-state vs spinning disk.
///
/// Every stage degrades on failure: an unresolvable volume is `Unknown`, an
/// unanswered seek-penalty query leaves `solid_state` at `None`. Nothing
/// here returns an error — misclassification must never block ingestion.
use crate::planner::StorageMedium;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, GetDriveTypeW, GetVolumePathNameW, FILE_SHARE_READ, FILE_SHARE_WRITE,
    OPEN_EXISTING,
};
use windows::Win32::System::Ioctl::{
    PropertyStandardQuery, StorageDeviceSeekPenaltyProperty, DEVICE_SEEK_PENALTY_DESCRIPTOR,
    IOCTL_STORAGE_QUERY_PROPERTY, STORAGE_PROPERTY_QUERY,
};
use windows::Win32::System::IO::DeviceIoControl;

// Drive type constants from the Windows API.
const DRIVE_REMOVABLE_VAL: u32 = 2;
const DRIVE_FIXED_VAL: u32 = 3;
const DRIVE_REMOTE_VAL: u32 = 4;

/// Classify the volume that owns `path`.
pub fn classify_volume(path: &Path) -> StorageMedium {
    let root = match volume_root(path) {
        Some(root) => root,
        None => return StorageMedium::Unknown,
    };

    let root_wide: Vec<u16> = root.encode_utf16().chain(std::iter::once(0)).collect();
    let raw_type = unsafe { GetDriveTypeW(PCWSTR(root_wide.as_ptr())) };

    match raw_type {
        DRIVE_REMOTE_VAL => StorageMedium::Network,
        DRIVE_REMOVABLE_VAL => StorageMedium::Removable,
        DRIVE_FIXED_VAL => StorageMedium::Fixed {
            solid_state: probe_solid_state(&root),
        },
        _ => StorageMedium::Unknown,
    }
}

/// Resolve the volume mount point for a path, e.g. `C:\` for `C:\Users\x`.
fn volume_root(path: &Path) -> Option<String> {
    let path_wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let mut root_buf = [0u16; 261];

    let ok = unsafe { GetVolumePathNameW(PCWSTR(path_wide.as_ptr()), &mut root_buf) }.is_ok();
    if !ok {
        tracing::debug!("GetVolumePathNameW failed for {}", path.display());
        return None;
    }

    let len = root_buf.iter().position(|&c| c == 0).unwrap_or(0);
    if len == 0 {
        return None;
    }
    Some(String::from_utf16_lossy(&root_buf[..len]))
}

/// Query the seek-penalty storage property for a fixed volume.
///
/// `IncursSeekPenalty == false` is how Windows reports a solid-state medium.
/// Returns `None` when the raw volume cannot be opened or the device does
/// not answer the query (common for virtual disks and some USB bridges).
fn probe_solid_state(root: &str) -> Option<bool> {
    // Open the raw volume, e.g. `\\.\C:` — requires no access rights for
    // a property query, so this works without elevation.
    let device = format!("\\\\.\\{}", root.trim_end_matches('\\'));
    let device_wide: Vec<u16> = device.encode_utf16().chain(std::iter::once(0)).collect();

    let handle: HANDLE = unsafe {
        CreateFileW(
            PCWSTR(device_wide.as_ptr()),
            0,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )
    }
    .ok()?;

    let query = STORAGE_PROPERTY_QUERY {
        PropertyId: StorageDeviceSeekPenaltyProperty,
        QueryType: PropertyStandardQuery,
        ..Default::default()
    };
    let mut descriptor = DEVICE_SEEK_PENALTY_DESCRIPTOR::default();
    let mut returned = 0u32;

    let result = unsafe {
        DeviceIoControl(
            handle,
            IOCTL_STORAGE_QUERY_PROPERTY,
            Some(&query as *const STORAGE_PROPERTY_QUERY as *const std::ffi::c_void),
            std::mem::size_of::<STORAGE_PROPERTY_QUERY>() as u32,
            Some(&mut descriptor as *mut DEVICE_SEEK_PENALTY_DESCRIPTOR as *mut std::ffi::c_void),
            std::mem::size_of::<DEVICE_SEEK_PENALTY_DESCRIPTOR>() as u32,
            Some(&mut returned),
            None,
        )
    };

    let _ = unsafe { CloseHandle(handle) };

    match result {
        Ok(()) => Some(!descriptor.IncursSeekPenalty.as_bool()),
        Err(err) => {
            tracing::debug!("seek-penalty query failed for {device}: {err}");
            None
        }
    }
}
