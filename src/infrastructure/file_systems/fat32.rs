//! FAT32 boot sector and root directory parsing.

use crate::domain::entities::FsFileEntry;
use crate::domain::repositories::FileSystemError;
use crate::domain::services::byte_window::{read_u16_le, read_u32_le};

const DIR_ENTRY_SIZE: usize = 32;
const ATTR_LONG_NAME: u8 = 0x0F;

struct Bpb {
    bytes_per_sector: u16,
    sectors_per_cluster: u8,
    reserved_sectors: u16,
    fat_count: u8,
    root_entries: u16,
    fat_size: u32,
}

fn parse_bpb(buf: &[u8]) -> Result<Bpb, FileSystemError> {
    let err = |e: std::fmt::Arguments| FileSystemError::InvalidBootSector(e.to_string());
    Ok(Bpb {
        bytes_per_sector: read_u16_le(buf, 0x0B)
            .map_err(|e| err(format_args!("bytes/sector: {e}")))?,
        sectors_per_cluster: *buf
            .get(0x0D)
            .ok_or_else(|| err(format_args!("sectors/cluster out of bounds")))?,
        reserved_sectors: read_u16_le(buf, 0x0E)
            .map_err(|e| err(format_args!("reserved sectors: {e}")))?,
        fat_count: *buf
            .get(0x10)
            .ok_or_else(|| err(format_args!("fat count out of bounds")))?,
        root_entries: read_u16_le(buf, 0x11)
            .map_err(|e| err(format_args!("root entries: {e}")))?,
        fat_size: read_u32_le(buf, 0x24).map_err(|e| err(format_args!("fat size: {e}")))?,
    })
}

/// Walks the FAT32 root directory inside `buf`, which must start with the
/// boot sector at offset 0.
pub fn analyse(buf: &[u8]) -> Result<Vec<FsFileEntry>, FileSystemError> {
    let bpb = parse_bpb(buf)?;
    let bps = bpb.bytes_per_sector as usize;

    let fat_start = bpb.reserved_sectors as usize * bps;
    let root_start = fat_start + bpb.fat_count as usize * bpb.fat_size as usize * bps;
    let root_size_bytes = bpb.root_entries as usize * DIR_ENTRY_SIZE;

    let mut entries = Vec::new();
    let mut offset = root_start;
    let root_end = (root_start + root_size_bytes).min(buf.len());

    while offset + DIR_ENTRY_SIZE <= root_end {
        let raw = &buf[offset..offset + DIR_ENTRY_SIZE];
        offset += DIR_ENTRY_SIZE;

        let first_byte = raw[0];
        if first_byte == 0x00 {
            break;
        }
        let attr = raw[0x0B];
        if attr == ATTR_LONG_NAME {
            continue;
        }

        let deleted = first_byte == 0xE5;
        if deleted && raw[1..].iter().all(|&b| b == 0) {
            continue;
        }

        let name_bytes = &raw[0..8];
        let ext_bytes = &raw[8..11];
        let name = String::from_utf8_lossy(name_bytes).trim_end().to_string();
        let ext = String::from_utf8_lossy(ext_bytes).trim_end().to_string();
        let full_name = if ext.is_empty() {
            name
        } else {
            format!("{name}.{ext}")
        };

        let size = read_u32_le(raw, 0x1C).unwrap_or(0) as u64;

        entries.push(FsFileEntry {
            name: full_name,
            size,
            creation_time: "unknown".to_string(),
            modification_time: "unknown".to_string(),
            deleted,
        });
    }

    Ok(entries)
}
