//! Filesystem recognition

mod analyser;
mod fat32;
mod ntfs;

pub use analyser::BootSectorAnalyser;
