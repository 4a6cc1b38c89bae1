//! Block device reader trait
//!
//! Defines the interface for reading raw data from a block device or disk
//! image. This abstraction keeps the domain platform-agnostic: the two
//! concrete backends (buffered file reads, memory-mapped reads) live in
//! `infrastructure::block_device`.

use bytes::Bytes;
use thiserror::Error;

use crate::domain::entities::DiskInfo;

/// Errors that can occur when reading from a block device.
#[derive(Error, Debug)]
pub enum BlockDeviceError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("short read at offset {offset}: requested {requested} bytes, got {got}")]
    ShortRead {
        offset: u64,
        requested: usize,
        got: usize,
    },

    #[error("offset {offset} exceeds device size {device_size}")]
    InvalidOffset { offset: u64, device_size: u64 },
}

/// Trait for reading raw bytes from a block device or image file.
///
/// Implementations target Linux block devices, Windows physical drives, or
/// plain disk-image files; the core depends only on this capability.
pub trait BlockDeviceReader: Send + Sync {
    /// Opens `path` for reading, assuming `sector_size` bytes per sector.
    fn open(path: &str, sector_size: usize) -> Result<Self, BlockDeviceError>
    where
        Self: Sized;

    /// Reads exactly `size` bytes at `offset`. A short underlying read is a
    /// hard error, never silently truncated.
    fn read_bytes(&self, offset: u64, size: usize) -> Result<Bytes, BlockDeviceError>;

    /// Reads sector `n`.
    fn read_sector(&self, n: u64) -> Result<Bytes, BlockDeviceError> {
        let sector_size = self.disk_info().sector_size;
        self.read_bytes(n * sector_size as u64, sector_size)
    }

    /// Reads `count` sectors starting at sector `start`.
    fn read_sectors(&self, start: u64, count: usize) -> Result<Bytes, BlockDeviceError> {
        let sector_size = self.disk_info().sector_size;
        self.read_bytes(start * sector_size as u64, count * sector_size)
    }

    /// Best-effort total-size probe. Returns `true` and updates
    /// `disk_info().total_size` on success; `false` if the platform probe
    /// is unavailable. Failure here is never fatal to a scan.
    fn detect_size(&mut self) -> bool;

    /// Static information about the opened device.
    fn disk_info(&self) -> &DiskInfo;
}
