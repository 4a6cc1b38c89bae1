//! Rebuilds a carved extent into a uniquely named file on disk.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::domain::entities::{Category, Extent, Hit, RecoveredFile};
use crate::util::iso_timestamp;

#[derive(Error, Debug)]
pub enum RebuildError {
    #[error("output directory unwritable: {0}")]
    OutputDirUnwritable(std::io::Error),

    #[error("I/O error writing recovered file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Assigns sequential, collision-free output filenames and persists
/// carved extents.
///
/// The counter is process-wide monotonic state, shared across every hit in
/// a run; it is an `AtomicU64` so a host embedding this crate from more
/// than one thread still gets unique filenames.
pub struct Rebuilder {
    counter: AtomicU64,
}

impl Rebuilder {
    pub fn new() -> Self {
        Rebuilder {
            counter: AtomicU64::new(1),
        }
    }

    /// Writes `buf[extent.start..extent.end]` under `category_dir`,
    /// returning the resulting `RecoveredFile`.
    pub fn rebuild(
        &self,
        buf: &[u8],
        hit: &Hit,
        extent: Extent,
        category_dir: &Path,
    ) -> Result<RecoveredFile, RebuildError> {
        std::fs::create_dir_all(category_dir).map_err(RebuildError::OutputDirUnwritable)?;

        let counter = self.counter.fetch_add(1, Ordering::SeqCst);
        let filename = format!("recovered_{counter:05}.{}", hit.signature.extension);
        let final_path = category_dir.join(&filename);
        let temp_path = category_dir.join(format!("{filename}.part"));

        let slice = &buf[extent.start as usize..extent.end as usize];
        {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(slice)?;
            file.sync_all()?;
        }
        std::fs::rename(&temp_path, &final_path)?;

        Ok(RecoveredFile {
            filename,
            extension: hit.signature.extension.to_string(),
            start: extent.start,
            end: extent.end,
            category: Category::for_extension(hit.signature.extension),
            recovered_at: iso_timestamp(),
            output_path: path_to_absolute(&final_path),
        })
    }
}

impl Default for Rebuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn path_to_absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
