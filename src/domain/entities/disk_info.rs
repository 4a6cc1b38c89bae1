//! Summary information about an opened device or image.

/// Default sector size assumed until a device reports otherwise.
pub const DEFAULT_SECTOR_SIZE: usize = 512;

#[derive(Debug, Clone)]
pub struct DiskInfo {
    pub device_path: String,
    /// Total size in bytes. `0` until `detect_size()` succeeds.
    pub total_size: u64,
    pub sector_size: usize,
}

impl DiskInfo {
    pub fn new(device_path: impl Into<String>) -> Self {
        DiskInfo {
            device_path: device_path.into(),
            total_size: 0,
            sector_size: DEFAULT_SECTOR_SIZE,
        }
    }
}
