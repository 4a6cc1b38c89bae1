//! Domain entities
//!
//! Core business objects that represent the fundamental concepts
//! in the file recovery domain.

mod disk_info;
mod extent;
mod fs_entry;
mod metadata;
mod recovered_file;
mod scan_summary;
mod signature;

pub use disk_info::{DiskInfo, DEFAULT_SECTOR_SIZE};
pub use extent::Extent;
pub use fs_entry::{FileSystemKind, FsFileEntry};
pub use metadata::Metadata;
pub use recovered_file::{Category, RecoveredFile};
pub use scan_summary::{CategoryTotals, RecoveryReport};
pub use signature::{Hit, Signature};
