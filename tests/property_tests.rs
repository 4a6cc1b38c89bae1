//! Property-based tests for the ∀-invariants the pipeline's components are
//! meant to hold for arbitrary input, not just the handful of fixed cases
//! covered elsewhere.

use filerescue::domain::entities::{Extent, Hit, Signature};
use filerescue::domain::services::byte_window::{find_subsequence, read_u32_le};
use filerescue::domain::services::{resolve_extent, SignatureScanner, CATALOG};
use filerescue::infrastructure::carvers::Rebuilder;
use proptest::prelude::*;
use tempfile::TempDir;

proptest! {
    #[test]
    fn find_subsequence_returns_the_first_match(
        buf in prop::collection::vec(any::<u8>(), 0..200),
        pattern in prop::collection::vec(any::<u8>(), 1..6),
    ) {
        if let Some(i) = find_subsequence(&buf, &pattern, 0) {
            prop_assert_eq!(&buf[i..i + pattern.len()], pattern.as_slice());
            prop_assert!(!buf[..i].windows(pattern.len()).any(|w| w == pattern.as_slice()));
        }
    }

    #[test]
    fn every_scan_hit_offset_points_at_its_own_header(
        buf in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let scanner = SignatureScanner::new();
        for hit in scanner.scan(&buf) {
            let start = hit.offset as usize;
            let magic = hit.signature.header_magic;
            prop_assert_eq!(&buf[start..start + magic.len()], magic);
        }
    }

    #[test]
    fn read_u32_le_rejects_exactly_the_out_of_bounds_offsets(
        buf in prop::collection::vec(any::<u8>(), 0..50),
        offset in 0usize..1000,
    ) {
        if offset + 4 > buf.len() {
            prop_assert!(read_u32_le(&buf, offset).is_err());
        } else {
            prop_assert!(read_u32_le(&buf, offset).is_ok());
        }
    }

    #[test]
    fn resolved_extents_stay_within_the_buffer_and_the_cap(
        buf in prop::collection::vec(any::<u8>(), 1..4096),
        offset_fraction in 0.0f64..1.0,
        sig in prop::sample::select(CATALOG.to_vec()),
        max_file_size in 5 * 1024 * 1024u64..10 * 1024 * 1024,
    ) {
        let offset = (offset_fraction * buf.len() as f64) as u64;
        let hit = Hit { offset, signature: sig };
        if let Ok(extent) = resolve_extent(&buf, &hit, max_file_size) {
            prop_assert_eq!(extent.start, hit.offset);
            prop_assert!(extent.start < extent.end);
            prop_assert!(extent.end <= buf.len() as u64);
            prop_assert!(extent.end - extent.start <= max_file_size);
        }
    }

    #[test]
    fn rebuilder_filenames_are_strictly_increasing(count in 1usize..20) {
        let dir = TempDir::new().unwrap();
        let rebuilder = Rebuilder::new();
        let buf = b"0123456789";
        let extent = Extent { start: 0, end: buf.len() as u64 };

        let mut names = Vec::new();
        for _ in 0..count {
            let hit = Hit { offset: 0, signature: Signature::new(b"xx", "bin") };
            let file = rebuilder.rebuild(buf, &hit, extent, dir.path()).unwrap();
            names.push(file.filename);
        }
        prop_assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
