//! Boot sector classification and dispatch to the FAT32/NTFS walkers.

use crate::domain::entities::{FileSystemKind, FsFileEntry};
use crate::domain::repositories::{FileSystemAnalyser, FileSystemError};

use super::{fat32, ntfs};

const FAT32_LABEL_OFFSET: usize = 0x52;
const FAT32_LABEL: &[u8] = b"FAT32";
const NTFS_LABEL_OFFSET: usize = 0x03;
const NTFS_LABEL: &[u8] = b"NTFS";

#[derive(Default)]
pub struct BootSectorAnalyser;

impl BootSectorAnalyser {
    pub fn new() -> Self {
        BootSectorAnalyser
    }
}

impl FileSystemAnalyser for BootSectorAnalyser {
    fn detect(&self, boot_sector: &[u8]) -> FileSystemKind {
        if boot_sector
            .get(FAT32_LABEL_OFFSET..FAT32_LABEL_OFFSET + FAT32_LABEL.len())
            .is_some_and(|s| s == FAT32_LABEL)
        {
            return FileSystemKind::Fat32;
        }
        if boot_sector
            .get(NTFS_LABEL_OFFSET..NTFS_LABEL_OFFSET + NTFS_LABEL.len())
            .is_some_and(|s| s == NTFS_LABEL)
        {
            return FileSystemKind::Ntfs;
        }
        FileSystemKind::Unknown
    }

    fn analyse_fat32(&self, buf: &[u8]) -> Result<Vec<FsFileEntry>, FileSystemError> {
        fat32::analyse(buf)
    }

    fn analyse_ntfs(&self, buf: &[u8]) -> Result<Vec<FsFileEntry>, FileSystemError> {
        ntfs::analyse(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_fat32_label() {
        let mut buf = vec![0u8; 512];
        buf[0x52..0x57].copy_from_slice(b"FAT32");
        assert_eq!(BootSectorAnalyser::new().detect(&buf), FileSystemKind::Fat32);
    }

    #[test]
    fn detects_ntfs_label() {
        let mut buf = vec![0u8; 512];
        buf[0x03..0x07].copy_from_slice(b"NTFS");
        assert_eq!(BootSectorAnalyser::new().detect(&buf), FileSystemKind::Ntfs);
    }

    #[test]
    fn unrecognised_sector_is_unknown() {
        let buf = vec![0u8; 512];
        assert_eq!(BootSectorAnalyser::new().detect(&buf), FileSystemKind::Unknown);
    }

    #[test]
    fn empty_buffer_is_unknown_not_a_panic() {
        assert_eq!(BootSectorAnalyser::new().detect(&[]), FileSystemKind::Unknown);
    }
}
