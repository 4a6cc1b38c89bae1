//! Memory-mapped `BlockDeviceReader` backend.
//!
//! Preferred for large disk images opened from a regular filesystem: the
//! kernel handles page caching and reads never need an explicit seek.

use std::fs::OpenOptions;
use std::path::Path;

use bytes::Bytes;
use memmap2::Mmap;

use crate::domain::entities::DiskInfo;
use crate::domain::repositories::{BlockDeviceError, BlockDeviceReader};

pub struct MmapBlockDevice {
    mmap: Mmap,
    info: DiskInfo,
}

impl MmapBlockDevice {
    /// Zero-copy slice at `offset` for callers that don't need an owned
    /// buffer (the scan window itself is typically read this way).
    pub fn slice_at(&self, offset: u64, length: usize) -> Option<&[u8]> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(length)?;
        self.mmap.get(start..end)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}

impl BlockDeviceReader for MmapBlockDevice {
    fn open(path: &str, sector_size: usize) -> Result<Self, BlockDeviceError> {
        let path_obj = Path::new(path);
        if !path_obj.exists() {
            return Err(BlockDeviceError::DeviceNotFound(path.to_string()));
        }

        let file = OpenOptions::new().read(true).open(path_obj).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                BlockDeviceError::PermissionDenied(format!("{path} - try running with elevated privileges"))
            } else {
                BlockDeviceError::IoError(e)
            }
        })?;

        let mmap = unsafe { Mmap::map(&file) }.map_err(BlockDeviceError::IoError)?;

        let mut info = DiskInfo::new(path);
        info.sector_size = sector_size;
        info.total_size = mmap.len() as u64;

        Ok(MmapBlockDevice { mmap, info })
    }

    fn read_bytes(&self, offset: u64, size: usize) -> Result<Bytes, BlockDeviceError> {
        match self.slice_at(offset, size) {
            Some(slice) => Ok(Bytes::copy_from_slice(slice)),
            None => {
                let available = (self.mmap.len() as u64).saturating_sub(offset) as usize;
                Err(BlockDeviceError::ShortRead {
                    offset,
                    requested: size,
                    got: available.min(size),
                })
            }
        }
    }

    fn detect_size(&mut self) -> bool {
        // Already known from the mapping length at open time.
        true
    }

    fn disk_info(&self) -> &DiskInfo {
        &self.info
    }
}

unsafe impl Send for MmapBlockDevice {}
unsafe impl Sync for MmapBlockDevice {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn open_nonexistent_fails() {
        assert!(MmapBlockDevice::open("/nonexistent/file", 512).is_err());
    }

    #[test]
    fn reads_bytes_zero_copy() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Hello, memory-mapped world!").unwrap();
        file.flush().unwrap();

        let device = MmapBlockDevice::open(file.path().to_str().unwrap(), 512).unwrap();
        let data = device.read_bytes(0, 5).unwrap();
        assert_eq!(&data[..], b"Hello");
    }

    #[test]
    fn slice_at_returns_borrowed_view() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Zero-copy access!").unwrap();
        file.flush().unwrap();

        let device = MmapBlockDevice::open(file.path().to_str().unwrap(), 512).unwrap();
        let slice = device.slice_at(5, 4).unwrap();
        assert_eq!(slice, b"copy");
    }

    #[test]
    fn read_past_end_is_short_read() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"tiny").unwrap();
        file.flush().unwrap();

        let device = MmapBlockDevice::open(file.path().to_str().unwrap(), 512).unwrap();
        let err = device.read_bytes(0, 4096).unwrap_err();
        assert!(matches!(err, BlockDeviceError::ShortRead { .. }));
    }

    #[test]
    fn detect_size_reports_mapping_length() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![0u8; 1024]).unwrap();
        file.flush().unwrap();

        let mut device = MmapBlockDevice::open(file.path().to_str().unwrap(), 512).unwrap();
        assert!(device.detect_size());
        assert_eq!(device.disk_info().total_size, 1024);
    }
}
