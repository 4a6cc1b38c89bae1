//! Orchestrates one scan pass: open, read, detect filesystem, scan for
//! signatures, rebuild and register each hit, summarise.

use crate::application::dto::ScanOptions;
use crate::domain::entities::{FileSystemKind, RecoveryReport};
use crate::domain::repositories::{BlockDeviceReader, FileSystemAnalyser, LogSink};
use crate::domain::services::{extract_metadata, resolve_extent, SignatureScanner};
use crate::infrastructure::carvers::Rebuilder;
use crate::infrastructure::file_systems::BootSectorAnalyser;
use crate::infrastructure::persistence::{OutputManager, OutputManagerError};

const BOOT_SECTOR_SIZE: usize = 512;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("device read failed: {0}")]
    Device(#[from] crate::domain::repositories::BlockDeviceError),

    #[error("could not prepare output directory: {0}")]
    Output(#[from] OutputManagerError),
}

/// Runs one scan pass against an already-opened device reader, returning
/// the end-of-run report.
pub fn run(
    reader: &mut dyn BlockDeviceReader,
    options: &ScanOptions,
    log: &dyn LogSink,
) -> Result<RecoveryReport, PipelineError> {
    let mut warnings = Vec::new();

    let size_known = reader.detect_size();
    let window_size = if size_known {
        options.window_size.min(reader.disk_info().total_size)
    } else {
        log.warning("pipeline", "device size detection failed; using configured window size");
        options.window_size
    };

    let window = reader.read_bytes(0, window_size as usize)?;
    log.info(
        "pipeline",
        &format!("read {} bytes from {}", window.len(), options.device_path),
    );

    detect_filesystem(&window, log);

    let output = OutputManager::setup(&options.output_dir)?;
    let scanner = SignatureScanner::new();
    let rebuilder = Rebuilder::new();

    let hits = scanner.scan(&window);
    log.info("pipeline", &format!("{} signature hit(s) found", hits.len()));

    for hit in &hits {
        if options.is_excluded(hit.signature.extension) {
            log.debug(
                "pipeline",
                &format!("skipping {} hit at offset {} (excluded by filter)", hit.signature.extension, hit.offset),
            );
            continue;
        }

        let extent = match resolve_extent(&window, hit, options.max_file_size) {
            Ok(extent) => extent,
            Err(err) => {
                warnings.push(format!("empty extent at offset {}: {err}", hit.offset));
                log.warning("pipeline", &format!("empty extent at offset {}", hit.offset));
                continue;
            }
        };

        let category_dir = output.category_dir(hit.signature.extension);
        let file = match rebuilder.rebuild(&window, hit, extent, &category_dir) {
            Ok(file) => file,
            Err(err) => {
                warnings.push(format!("failed to write file at offset {}: {err}", hit.offset));
                log.warning("pipeline", &format!("write failed at offset {}: {err}", hit.offset));
                continue;
            }
        };

        let _metadata = extract_metadata(
            &window[hit.offset as usize..extent.end as usize],
            hit.signature.extension,
        );

        if let Err(err) = output.register(&file) {
            warnings.push(format!("failed to log recovered file {}: {err}", file.filename));
            log.warning("pipeline", &format!("failed to register {}: {err}", file.filename));
        }
    }

    Ok(output.summary(&options.device_path, window.len() as u64, warnings))
}

fn detect_filesystem(window: &[u8], log: &dyn LogSink) {
    let boot_sector = &window[..window.len().min(BOOT_SECTOR_SIZE)];
    let analyser = BootSectorAnalyser::new();
    match analyser.detect(boot_sector) {
        FileSystemKind::Fat32 => log.info("pipeline", "detected FAT32 boot sector"),
        FileSystemKind::Ntfs => log.info("pipeline", "detected NTFS boot sector"),
        FileSystemKind::Unknown => log.debug("pipeline", "boot sector did not match a known filesystem"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DEFAULT_SECTOR_SIZE;
    use crate::domain::repositories::NullLogSink;
    use crate::infrastructure::block_device::FileBlockDevice;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_image() -> Vec<u8> {
        let mut data = vec![0u8; 256];
        data[0..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
        data[100..102].copy_from_slice(&[0xFF, 0xD9]);
        data
    }

    #[test]
    fn full_pass_recovers_a_jpeg() {
        let workdir = TempDir::new().unwrap();
        let device_path = workdir.path().join("image.bin");
        std::fs::File::create(&device_path)
            .unwrap()
            .write_all(&sample_image())
            .unwrap();

        let mut reader =
            FileBlockDevice::open(device_path.to_str().unwrap(), DEFAULT_SECTOR_SIZE).unwrap();
        let output_dir = workdir.path().join("out");
        let mut options = ScanOptions::new(device_path.to_str().unwrap(), &output_dir);
        options.window_size = 256;

        let report = run(&mut reader, &options, &NullLogSink).unwrap();

        assert_eq!(report.files_recovered, 1);
        assert!(output_dir.join("images").join("recovered_00001.jpg").exists());
    }

    #[test]
    fn file_type_filter_skips_excluded_extensions() {
        let workdir = TempDir::new().unwrap();
        let device_path = workdir.path().join("image.bin");
        std::fs::File::create(&device_path)
            .unwrap()
            .write_all(&sample_image())
            .unwrap();

        let mut reader =
            FileBlockDevice::open(device_path.to_str().unwrap(), DEFAULT_SECTOR_SIZE).unwrap();
        let output_dir = workdir.path().join("out");
        let mut options = ScanOptions::new(device_path.to_str().unwrap(), &output_dir);
        options.window_size = 256;
        options.file_type_filter = Some(vec!["png".to_string()]);

        let report = run(&mut reader, &options, &NullLogSink).unwrap();
        assert_eq!(report.files_recovered, 0);
    }
}
