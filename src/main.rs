//! filerescue - forensic file carving and recovery

use anyhow::{Context, Result};
use clap::Parser;

use filerescue::application::dto::{Backend, ScanOptions};
use filerescue::application::pipeline;
use filerescue::domain::entities::{Category, CategoryTotals, DEFAULT_SECTOR_SIZE};
use filerescue::domain::repositories::{BlockDeviceReader, FileSystemAnalyser, LogLevel, LogSink};
use filerescue::domain::services::CATALOG;
use filerescue::infrastructure::block_device::{FileBlockDevice, MmapBlockDevice};
use filerescue::infrastructure::file_systems::BootSectorAnalyser;
use filerescue::infrastructure::logging::DualLogSink;
use filerescue::presentation::cli::{Cli, Commands, ProgressReporter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let console_filter = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(console_filter))
        .init();

    let mut log_sink = DualLogSink::open_default().context("failed to open log file")?;
    log_sink.set_level(if cli.debug {
        LogLevel::Debug
    } else if cli.verbose {
        LogLevel::Info
    } else {
        LogLevel::Warning
    });

    match cli.command {
        Commands::Scan {
            device,
            output,
            types,
            window_size_mb,
            max_file_size_mb,
            mmap,
            json_summary,
        } => run_scan(
            &device,
            output,
            types,
            window_size_mb,
            max_file_size_mb,
            mmap,
            json_summary,
            &log_sink,
        ),
        Commands::ListSignatures => {
            list_signatures();
            Ok(())
        }
        Commands::Info { device } => show_device_info(&device, &log_sink),
        Commands::Review { output } => review(&output),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    device_path: &str,
    output_dir: std::path::PathBuf,
    types: Option<Vec<String>>,
    window_size_mb: u64,
    max_file_size_mb: u64,
    mmap: bool,
    json_summary: bool,
    log: &dyn LogSink,
) -> Result<()> {
    println!("Scanning: {device_path}");

    let mut options = ScanOptions::new(device_path, &output_dir);
    options.window_size = window_size_mb * 1024 * 1024;
    options.max_file_size = max_file_size_mb * 1024 * 1024;
    options.file_type_filter = types;
    options.backend = if mmap { Backend::Mmap } else { Backend::Standard };
    options.emit_json_summary = json_summary;

    let progress = ProgressReporter::for_scan();
    let report = match options.backend {
        Backend::Standard => {
            let mut reader = FileBlockDevice::open(device_path, DEFAULT_SECTOR_SIZE)
                .context("failed to open device (try running with elevated privileges)")?;
            pipeline::run(&mut reader, &options, log)?
        }
        Backend::Mmap => {
            let mut reader = MmapBlockDevice::open(device_path, DEFAULT_SECTOR_SIZE)
                .context("failed to memory-map device")?;
            pipeline::run(&mut reader, &options, log)?
        }
    };
    progress.finish("Scan complete");

    println!("\n{}", report.summary_text());

    if json_summary {
        let json_path = output_dir.join("scan_summary.json");
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&json_path, json)?;
        println!("JSON summary written to: {}", json_path.display());
    }

    Ok(())
}

fn list_signatures() {
    println!("Supported file signatures:\n");
    for sig in CATALOG {
        let header_hex: Vec<String> = sig.header_magic.iter().map(|b| format!("{b:02X}")).collect();
        print!("  {:<6} header: {}", sig.extension, header_hex.join(" "));
        if sig.has_trailer {
            let trailer_hex: Vec<String> =
                sig.trailer_magic.iter().map(|b| format!("{b:02X}")).collect();
            print!(" | trailer: {}", trailer_hex.join(" "));
        }
        println!();
    }
}

fn show_device_info(device_path: &str, log: &dyn LogSink) -> Result<()> {
    let mut reader = FileBlockDevice::open(device_path, DEFAULT_SECTOR_SIZE)
        .context("failed to open device")?;
    let size_known = reader.detect_size();
    let info = reader.disk_info();

    println!("Path:        {}", info.device_path);
    println!("Sector size: {} bytes", info.sector_size);
    if size_known {
        println!(
            "Total size:  {} ({} bytes)",
            humansize::format_size(info.total_size, humansize::DECIMAL),
            info.total_size
        );
    } else {
        println!("Total size:  unknown (size detection unsupported on this path)");
        log.warning("info", "size detection failed");
    }

    let boot_sector = reader.read_bytes(0, DEFAULT_SECTOR_SIZE)?;
    let analyser = BootSectorAnalyser::new();
    println!("Filesystem:  {:?}", analyser.detect(&boot_sector));

    Ok(())
}

fn review(output_dir: &std::path::Path) -> Result<()> {
    let mut by_category: std::collections::BTreeMap<Category, CategoryTotals> =
        std::collections::BTreeMap::new();
    let mut bytes_recovered = 0u64;
    let mut files_recovered = 0usize;

    for category in [
        Category::Image,
        Category::Document,
        Category::Audio,
        Category::Video,
        Category::Archive,
        Category::Unknown,
    ] {
        let dir = output_dir.join(category.dir_name());
        if !dir.is_dir() {
            continue;
        }
        let mut totals = CategoryTotals::default();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                totals.count += 1;
                totals.bytes += entry.metadata()?.len();
            }
        }
        bytes_recovered += totals.bytes;
        files_recovered += totals.count;
        by_category.insert(category, totals);
    }

    println!("Review of {}\n", output_dir.display());
    println!(
        "Recovered {} files ({})",
        files_recovered,
        humansize::format_size(bytes_recovered, humansize::DECIMAL)
    );
    for (category, totals) in &by_category {
        println!(
            "  {:<10} {:>5} files, {}",
            category.dir_name(),
            totals.count,
            humansize::format_size(totals.bytes, humansize::DECIMAL)
        );
    }

    Ok(())
}
