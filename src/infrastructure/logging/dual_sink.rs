//! Console + file `LogSink` built on `tracing` and a plain mutex-guarded
//! file handle.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::domain::repositories::{LogLevel, LogSink};

const DEFAULT_LOG_FILE: &str = "file_rescue.log";

/// Mirrors every message to the `tracing` console subscriber and appends
/// it to a log file. The file handle is behind a `parking_lot::Mutex` so
/// the sink can be shared across the pipeline's call sites without extra
/// synchronisation at the call site.
pub struct DualLogSink {
    file: Mutex<File>,
    min_level: LogLevel,
}

impl DualLogSink {
    /// Opens (creating if needed) the log file at `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(DualLogSink {
            file: Mutex::new(file),
            min_level: LogLevel::Debug,
        })
    }

    /// Opens the default log file (`file_rescue.log`) in the current
    /// directory.
    pub fn open_default() -> std::io::Result<Self> {
        Self::open(default_log_path())
    }

    /// Suppresses messages below `level`.
    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl LogSink for DualLogSink {
    fn log(&self, tag: &str, message: &str, level: LogLevel) {
        if level < self.min_level {
            return;
        }

        match level {
            LogLevel::Debug => tracing::debug!(target: "filerescue", tag, "{message}"),
            LogLevel::Info => tracing::info!(target: "filerescue", tag, "{message}"),
            LogLevel::Warning => tracing::warn!(target: "filerescue", tag, "{message}"),
            LogLevel::Error => tracing::error!(target: "filerescue", tag, "{message}"),
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{timestamp}] [{}] [{tag}] {message}\n", level.as_str());
        let mut file = self.file.lock();
        // Logging must never abort a scan; a write failure here is swallowed.
        let _ = file.write_all(line.as_bytes());
        let _ = file.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn writes_one_line_per_call() {
        let temp = NamedTempFile::new().unwrap();
        let sink = DualLogSink::open(temp.path()).unwrap();
        sink.info("pipeline", "starting scan");
        sink.warning("pipeline", "short read near end of device");

        let contents = std::fs::read_to_string(temp.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("[INFO] [pipeline] starting scan"));
        assert!(contents.contains("[WARNING] [pipeline] short read near end of device"));
    }

    #[test]
    fn messages_below_min_level_are_suppressed() {
        let temp = NamedTempFile::new().unwrap();
        let mut sink = DualLogSink::open(temp.path()).unwrap();
        sink.set_level(LogLevel::Warning);
        sink.debug("pipeline", "verbose detail");
        sink.error("pipeline", "fatal");

        let contents = std::fs::read_to_string(temp.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("fatal"));
    }
}
