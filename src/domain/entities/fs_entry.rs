//! Display-only entries surfaced by the filesystem analyser.

/// The filesystem kind recognised from a boot sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSystemKind {
    Fat32,
    Ntfs,
    Unknown,
}

/// One directory entry (FAT32) or MFT record hit (NTFS), for display only.
///
/// Never persisted; the carving pipeline does not depend on filesystem
/// structure to recover files.
#[derive(Debug, Clone)]
pub struct FsFileEntry {
    pub name: String,
    pub size: u64,
    pub creation_time: String,
    pub modification_time: String,
    pub deleted: bool,
}
