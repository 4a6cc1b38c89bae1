//! The record produced once a carved extent has been written to disk.

use std::path::PathBuf;

/// Output classification used to pick a category subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Image,
    Document,
    Audio,
    Video,
    Archive,
    Unknown,
}

impl Category {
    /// Maps a file extension (without the leading dot) to its category.
    pub fn for_extension(extension: &str) -> Category {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "ico" => Category::Image,
            "pdf" | "docx" | "xlsx" | "pptx" => Category::Document,
            "mp3" | "wav" | "ogg" | "flac" => Category::Audio,
            "mp4" | "avi" | "mkv" | "mov" => Category::Video,
            "zip" | "rar" | "gz" | "tar" => Category::Archive,
            _ => Category::Unknown,
        }
    }

    /// Directory name this category is stored under.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "images",
            Category::Document => "documents",
            Category::Audio => "audio",
            Category::Video => "videos",
            Category::Archive => "archives",
            Category::Unknown => "others",
        }
    }
}

/// A file reconstructed from a scan buffer and persisted to disk.
#[derive(Debug, Clone)]
pub struct RecoveredFile {
    pub filename: String,
    pub extension: String,
    pub start: u64,
    pub end: u64,
    pub category: Category,
    pub recovered_at: String,
    pub output_path: PathBuf,
}

impl RecoveredFile {
    /// Size in bytes of the carved extent.
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Human-readable size, e.g. `"4.20 MB"`.
    pub fn size_human(&self) -> String {
        humansize::format_size(self.size(), humansize::DECIMAL)
    }
}
