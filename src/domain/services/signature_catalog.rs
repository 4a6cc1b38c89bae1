//! The static signature table and the scanner built on top of it.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::domain::entities::{Hit, Signature};

/// The full catalog of recognised header/trailer signatures, in the order
/// the original tool declared them.
pub const CATALOG: &[Signature] = &[
    Signature::with_trailer(&[0xFF, 0xD8, 0xFF], "jpg", &[0xFF, 0xD9]),
    Signature::with_trailer(
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        "png",
        &[0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82],
    ),
    Signature::new(&[0x47, 0x49, 0x46, 0x38], "gif"),
    Signature::new(&[0x42, 0x4D], "bmp"),
    Signature::new(&[0x00, 0x00, 0x01, 0x00], "ico"),
    Signature::new(&[0x25, 0x50, 0x44, 0x46], "pdf"),
    Signature::with_trailer(&[0x50, 0x4B, 0x03, 0x04], "zip", &[0x50, 0x4B, 0x05, 0x06]),
    Signature::with_trailer(&[0x50, 0x4B, 0x03, 0x04], "docx", &[0x50, 0x4B, 0x05, 0x06]),
    Signature::with_trailer(&[0x50, 0x4B, 0x03, 0x04], "xlsx", &[0x50, 0x4B, 0x05, 0x06]),
    Signature::with_trailer(&[0x50, 0x4B, 0x03, 0x04], "pptx", &[0x50, 0x4B, 0x05, 0x06]),
    Signature::with_trailer(
        &[0x00, 0x00, 0x00, 0x18],
        "mp4",
        &[0x66, 0x72, 0x65, 0x65],
    ),
    Signature::new(&[0x52, 0x49, 0x46, 0x46], "avi"),
    Signature::new(&[0xFF, 0xFB], "mp3"),
    Signature::with_trailer(
        &[0x52, 0x49, 0x46, 0x46],
        "wav",
        &[0x57, 0x41, 0x56, 0x45],
    ),
    Signature::new(&[0x1F, 0x8B, 0x08], "gz"),
];

/// Scans the catalog against `buf`, emitting every hit for every signature,
/// in offset order. Overlapping hits at the same offset (e.g. the four
/// ZIP-family signatures) are all emitted. Never fails: an empty catalog or
/// a buffer with no matches yields an empty result.
pub struct SignatureScanner {
    automaton: AhoCorasick,
    /// For each pattern id in `automaton`, the catalog entries sharing that
    /// exact header byte sequence.
    signatures_by_pattern: Vec<Vec<Signature>>,
}

impl SignatureScanner {
    pub fn new() -> Self {
        Self::with_catalog(CATALOG)
    }

    pub fn with_catalog(catalog: &[Signature]) -> Self {
        let mut patterns: Vec<&'static [u8]> = Vec::new();
        let mut signatures_by_pattern: Vec<Vec<Signature>> = Vec::new();

        for sig in catalog {
            if let Some(idx) = patterns.iter().position(|p| *p == sig.header_magic) {
                signatures_by_pattern[idx].push(sig.clone());
            } else {
                patterns.push(sig.header_magic);
                signatures_by_pattern.push(vec![sig.clone()]);
            }
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .expect("catalog patterns always build a valid automaton");

        SignatureScanner {
            automaton,
            signatures_by_pattern,
        }
    }

    pub fn scan(&self, buf: &[u8]) -> Vec<Hit> {
        let mut hits = Vec::new();
        for m in self.automaton.find_overlapping_iter(buf) {
            let offset = m.start() as u64;
            for sig in &self.signatures_by_pattern[m.pattern().as_usize()] {
                hits.push(Hit {
                    offset,
                    signature: sig.clone(),
                });
            }
        }
        hits.sort_by_key(|h| h.offset);
        hits
    }
}

impl Default for SignatureScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_empty_buffer() {
        let scanner = SignatureScanner::new();
        assert!(scanner.scan(&[]).is_empty());
    }

    #[test]
    fn finds_jpeg_header() {
        let scanner = SignatureScanner::new();
        let buf = [0xFFu8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let hits = scanner.scan(&buf);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].offset, 0);
        assert_eq!(hits[0].signature.extension, "jpg");
    }

    #[test]
    fn zip_header_yields_four_hits_at_same_offset() {
        let scanner = SignatureScanner::new();
        let buf = [0x50u8, 0x4B, 0x03, 0x04, 0x00, 0x00];
        let hits = scanner.scan(&buf);
        assert_eq!(hits.len(), 4);
        let mut exts: Vec<&str> = hits.iter().map(|h| h.signature.extension).collect();
        exts.sort_unstable();
        assert_eq!(exts, vec!["docx", "pptx", "xlsx", "zip"]);
        assert!(hits.iter().all(|h| h.offset == 0));
    }

    #[test]
    fn hits_are_ordered_by_offset() {
        let scanner = SignatureScanner::new();
        let mut buf = vec![0u8; 20];
        buf[10..13].copy_from_slice(&[0x47, 0x49, 0x46]);
        buf[10..14].copy_from_slice(&[0x47, 0x49, 0x46, 0x38]);
        buf[0..2].copy_from_slice(&[0x42, 0x4D]);
        let hits = scanner.scan(&buf);
        let offsets: Vec<u64> = hits.iter().map(|h| h.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn riff_header_matches_both_avi_and_wav() {
        let scanner = SignatureScanner::new();
        let buf = [0x52u8, 0x49, 0x46, 0x46];
        let hits = scanner.scan(&buf);
        let mut exts: Vec<&str> = hits.iter().map(|h| h.signature.extension).collect();
        exts.sort_unstable();
        assert_eq!(exts, vec!["avi", "wav"]);
    }

    #[test]
    fn every_hit_offset_matches_the_actual_bytes() {
        let scanner = SignatureScanner::new();
        let mut buf = vec![0xAAu8; 64];
        buf[30..33].copy_from_slice(&[0x25, 0x50, 0x44]);
        buf[30..34].copy_from_slice(&[0x25, 0x50, 0x44, 0x46]);
        for hit in scanner.scan(&buf) {
            let magic = hit.signature.header_magic;
            let start = hit.offset as usize;
            assert_eq!(&buf[start..start + magic.len()], magic);
        }
    }
}
