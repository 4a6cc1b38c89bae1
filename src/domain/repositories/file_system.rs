//! Filesystem analyser trait
//!
//! Defines the interface for recognising a boot sector and listing the
//! entries a structurally-intact FAT32 or NTFS volume would expose. This is
//! informational only: file recovery never depends on it, since carving
//! works straight off the byte stream regardless of filesystem health.

use thiserror::Error;

use crate::domain::entities::{FileSystemKind, FsFileEntry};

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("unknown filesystem")]
    UnknownFilesystem,

    #[error("invalid boot sector: {0}")]
    InvalidBootSector(String),
}

/// Trait for recognising and walking a FAT32/NTFS boot sector.
pub trait FileSystemAnalyser: Send + Sync {
    /// Classifies a 512-byte boot sector.
    fn detect(&self, boot_sector: &[u8]) -> FileSystemKind;

    /// Walks the FAT32 root directory starting from `buf`, which must
    /// contain the boot sector at offset 0.
    fn analyse_fat32(&self, buf: &[u8]) -> Result<Vec<FsFileEntry>, FileSystemError>;

    /// Scans `buf` for NTFS MFT record signatures.
    fn analyse_ntfs(&self, buf: &[u8]) -> Result<Vec<FsFileEntry>, FileSystemError>;
}
