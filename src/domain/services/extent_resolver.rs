//! Resolves how far a carved file extends past its header hit.

use thiserror::Error;

use crate::domain::entities::{Extent, Hit};
use crate::domain::services::byte_window::find_subsequence;

const PDF_MAGIC: &[u8] = &[0x25, 0x50, 0x44, 0x46];
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

const PDF_FALLBACK_SIZE: u64 = 1024 * 1024;
const ZIP_FALLBACK_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("resolved extent [{start}, {end}) is empty")]
pub struct EmptyExtent {
    pub start: u64,
    pub end: u64,
}

/// Resolves the extent claimed by `hit` inside `buf`, capped at
/// `max_file_size` bytes.
pub fn resolve_extent(buf: &[u8], hit: &Hit, max_file_size: u64) -> Result<Extent, EmptyExtent> {
    let start = hit.offset;
    let len = buf.len() as u64;
    let capped_end = start.saturating_add(max_file_size).min(len);

    let end = if hit.signature.has_trailer {
        let search_start = start as usize;
        let search_end = capped_end as usize;
        match find_subsequence(
            &buf[search_start..search_end],
            hit.signature.trailer_magic,
            0,
        ) {
            Some(rel) => start + rel as u64 + hit.signature.trailer_magic.len() as u64,
            None => capped_end,
        }
    } else {
        let header_start = start as usize;
        let matches_pdf = buf
            .get(header_start..header_start + PDF_MAGIC.len().min(buf.len() - header_start))
            .is_some_and(|b| b == PDF_MAGIC);
        let matches_zip = buf
            .get(header_start..header_start + ZIP_MAGIC.len().min(buf.len() - header_start))
            .is_some_and(|b| b == ZIP_MAGIC);

        if matches_pdf {
            start.saturating_add(PDF_FALLBACK_SIZE)
        } else if matches_zip {
            start.saturating_add(ZIP_FALLBACK_SIZE)
        } else {
            start.saturating_add(max_file_size)
        }
    };

    let end = end.min(len);
    if end <= start {
        return Err(EmptyExtent { start, end });
    }
    Ok(Extent { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Signature;

    fn hit_at(offset: u64, sig: Signature) -> Hit {
        Hit { offset, signature: sig }
    }

    #[test]
    fn trailer_found_ends_just_past_it() {
        let buf = [0xFFu8, 0xD8, 0xFF, 0x00, 0x00, 0xFF, 0xD9, 0xAA];
        let sig = Signature::with_trailer(&[0xFF, 0xD8, 0xFF], "jpg", &[0xFF, 0xD9]);
        let extent = resolve_extent(&buf, &hit_at(0, sig), 100).unwrap();
        assert_eq!(extent, Extent { start: 0, end: 7 });
    }

    #[test]
    fn trailer_missing_falls_back_to_cap() {
        let buf = vec![0xFFu8, 0xD8, 0xFF, 0x00, 0x00];
        let sig = Signature::with_trailer(&[0xFF, 0xD8, 0xFF], "jpg", &[0xFF, 0xD9]);
        let extent = resolve_extent(&buf, &hit_at(0, sig), 3).unwrap();
        assert_eq!(extent, Extent { start: 0, end: 3 });
    }

    #[test]
    fn pdf_header_only_uses_one_mib_fallback() {
        let buf = vec![0x25u8, 0x50, 0x44, 0x46, 0xAA, 0xAA];
        let sig = Signature::new(&[0x25, 0x50, 0x44, 0x46], "pdf");
        let extent = resolve_extent(&buf, &hit_at(0, sig), 10 * 1024 * 1024).unwrap();
        assert_eq!(extent.end, buf.len() as u64);
    }

    #[test]
    fn no_header_specific_rule_uses_max_file_size() {
        let buf = vec![0x47u8, 0x49, 0x46, 0x38, 0, 0, 0, 0, 0, 0];
        let sig = Signature::new(&[0x47, 0x49, 0x46, 0x38], "gif");
        let extent = resolve_extent(&buf, &hit_at(0, sig), 5).unwrap();
        assert_eq!(extent, Extent { start: 0, end: 5 });
    }

    #[test]
    fn empty_extent_when_hit_at_buffer_end() {
        let buf = vec![0x47u8, 0x49, 0x46, 0x38];
        let sig = Signature::new(&[0x47, 0x49, 0x46, 0x38], "gif");
        let err = resolve_extent(&buf, &hit_at(4, sig), 10).unwrap_err();
        assert_eq!(err.start, 4);
        assert_eq!(err.end, 4);
    }

    #[test]
    fn extent_never_exceeds_buffer_len() {
        let buf = vec![0xFFu8, 0xD8, 0xFF];
        let sig = Signature::with_trailer(&[0xFF, 0xD8, 0xFF], "jpg", &[0xFF, 0xD9]);
        let extent = resolve_extent(&buf, &hit_at(0, sig), 1_000_000).unwrap();
        assert!(extent.end <= buf.len() as u64);
    }
}
