//! Category-based output layout, append-only recovery log, and the
//! end-of-run summary.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;

use crate::domain::entities::{Category, CategoryTotals, RecoveredFile, RecoveryReport};
use crate::util::iso_timestamp;

const CATEGORIES: &[Category] = &[
    Category::Image,
    Category::Document,
    Category::Audio,
    Category::Video,
    Category::Archive,
    Category::Unknown,
];

const LOG_FILE_NAME: &str = "recovery_log.txt";

#[derive(Error, Debug)]
pub enum OutputManagerError {
    #[error("output directory unwritable: {0}")]
    OutputDirUnwritable(#[from] std::io::Error),
}

struct Totals {
    by_category: BTreeMap<Category, CategoryTotals>,
    bytes_recovered: u64,
}

/// Owns the recovery log file and the in-memory registry of persisted
/// files for one run.
pub struct OutputManager {
    base_dir: PathBuf,
    log_file: Mutex<File>,
    totals: Mutex<Totals>,
    started_at: Instant,
}

impl OutputManager {
    /// Creates the category directories and opens a fresh recovery log
    /// under `base_dir`.
    pub fn setup(base_dir: impl Into<PathBuf>) -> Result<Self, OutputManagerError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        for category in CATEGORIES {
            std::fs::create_dir_all(base_dir.join(category.dir_name()))?;
        }

        let mut log_file = File::create(base_dir.join(LOG_FILE_NAME))?;
        writeln!(log_file, "=== FILE RECOVERY REPORT ===")?;
        writeln!(log_file, "Generated: {}", iso_timestamp())?;
        writeln!(log_file, "Base path: {}", base_dir.display())?;
        writeln!(log_file)?;
        log_file.flush()?;

        Ok(OutputManager {
            base_dir,
            log_file: Mutex::new(log_file),
            totals: Mutex::new(Totals {
                by_category: BTreeMap::new(),
                bytes_recovered: 0,
            }),
            started_at: Instant::now(),
        })
    }

    /// Absolute directory a file of the given extension should be written
    /// under. The directory already exists after `setup`.
    pub fn category_dir(&self, extension: &str) -> PathBuf {
        self.base_dir
            .join(Category::for_extension(extension).dir_name())
    }

    /// Appends one line to the recovery log and updates the running
    /// totals. Flushes immediately: the log always reflects every file
    /// fully written so far.
    pub fn register(&self, file: &RecoveredFile) -> Result<(), OutputManagerError> {
        {
            let mut log_file = self.log_file.lock();
            writeln!(
                log_file,
                "{} | {} | {} | {} | {}",
                file.filename,
                file.extension,
                file.size_human(),
                file.recovered_at,
                file.output_path.display(),
            )?;
            log_file.flush()?;
        }

        let mut totals = self.totals.lock();
        let entry = totals.by_category.entry(file.category).or_default();
        entry.count += 1;
        entry.bytes += file.size();
        totals.bytes_recovered += file.size();

        Ok(())
    }

    /// Produces the end-of-run report.
    pub fn summary(
        &self,
        device_path: &str,
        bytes_scanned: u64,
        warnings: Vec<String>,
    ) -> RecoveryReport {
        let totals = self.totals.lock();
        let files_recovered = totals.by_category.values().map(|t| t.count).sum();

        RecoveryReport {
            device_path: device_path.to_string(),
            output_dir: self.base_dir.display().to_string(),
            bytes_scanned,
            files_recovered,
            bytes_recovered: totals.bytes_recovered,
            by_category: totals.by_category.clone(),
            warnings,
            elapsed: self.elapsed(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
