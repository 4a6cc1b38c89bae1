//! Data transfer objects the CLI resolves once per invocation and hands
//! down into the pipeline.

use std::path::PathBuf;

/// Device-reader backend selected for a scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Buffered sequential reads through `std::fs::File`.
    Standard,
    /// Zero-copy reads through a memory-mapped view of the device.
    Mmap,
}

pub const DEFAULT_WINDOW_SIZE_MB: u64 = 1024;
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Every value the pipeline needs for one scan pass, resolved once from
/// CLI flags and immutable thereafter.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub device_path: String,
    pub output_dir: PathBuf,
    pub window_size: u64,
    pub max_file_size: u64,
    pub file_type_filter: Option<Vec<String>>,
    pub backend: Backend,
    pub emit_json_summary: bool,
}

impl ScanOptions {
    pub fn new(device_path: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        ScanOptions {
            device_path: device_path.into(),
            output_dir: output_dir.into(),
            window_size: DEFAULT_WINDOW_SIZE_MB * 1024 * 1024,
            max_file_size: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            file_type_filter: None,
            backend: Backend::Standard,
            emit_json_summary: false,
        }
    }

    /// True if `extension` should be skipped under the configured filter.
    pub fn is_excluded(&self, extension: &str) -> bool {
        match &self.file_type_filter {
            Some(allowed) => !allowed.iter().any(|e| e.eq_ignore_ascii_case(extension)),
            None => false,
        }
    }
}
