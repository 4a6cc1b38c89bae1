//! NTFS boot sector parsing and MFT record scanning.
//!
//! Real MFT record parsing (fixup array, attribute list,
//! `$STANDARD_INFORMATION`, `$FILE_NAME`) is not implemented here. This is
//! an intentional stub: every 1024-byte window that begins with the MFT
//! record signature is reported as a placeholder entry so the analyser has
//! something to show without claiming a fidelity it doesn't have.

use crate::domain::entities::FsFileEntry;
use crate::domain::repositories::FileSystemError;
use crate::domain::services::byte_window::read_u16_le;

const MFT_RECORD_SIZE: usize = 1024;
const MFT_RECORD_SIGNATURE: &[u8] = b"$FIL";

/// Boot sector fields used only to confirm the volume is structurally
/// sane before we bother scanning for MFT records.
pub struct NtfsBootSector {
    pub mft_start_cluster: u64,
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
}

pub fn parse_boot_sector(buf: &[u8]) -> Result<NtfsBootSector, FileSystemError> {
    use crate::domain::services::byte_window::read_u64_le;

    let mft_start_cluster =
        read_u64_le(buf, 0x30).map_err(|_| FileSystemError::InvalidBootSector("mft start cluster".into()))?;
    let bytes_per_sector =
        read_u16_le(buf, 0x0B).map_err(|_| FileSystemError::InvalidBootSector("bytes per sector".into()))?;
    let sectors_per_cluster = *buf
        .get(0x0D)
        .ok_or_else(|| FileSystemError::InvalidBootSector("sectors per cluster".into()))?;

    Ok(NtfsBootSector {
        mft_start_cluster,
        bytes_per_sector,
        sectors_per_cluster,
    })
}

/// Scans `buf` in 1024-byte windows, emitting a placeholder entry for each
/// one that begins with the MFT record signature.
pub fn analyse(buf: &[u8]) -> Result<Vec<FsFileEntry>, FileSystemError> {
    let _boot_sector = parse_boot_sector(buf)?;

    let mut entries = Vec::new();
    let mut offset = 0;
    while offset + MFT_RECORD_SIGNATURE.len() <= buf.len() {
        if &buf[offset..offset + MFT_RECORD_SIGNATURE.len()] == MFT_RECORD_SIGNATURE {
            entries.push(FsFileEntry {
                name: "<NTFS_Entry>".to_string(),
                size: 0,
                creation_time: "unknown".to_string(),
                modification_time: "unknown".to_string(),
                deleted: false,
            });
        }
        offset += MFT_RECORD_SIZE;
    }

    Ok(entries)
}
