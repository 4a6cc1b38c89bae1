//! Per-format metadata extraction from a carved file's bytes.

use crate::domain::entities::Metadata;
use crate::domain::services::byte_window::{read_string, read_u32_be};

const SIXTY_FOUR_KIB: usize = 64 * 1024;

/// Extracts whatever fields this crate knows how to pull out of `data`,
/// dispatched by `extension`. Always succeeds; formats with no dedicated
/// extractor return an empty `Metadata`.
pub fn extract(data: &[u8], extension: &str) -> Metadata {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => extract_jpeg(data),
        "png" => extract_png(data),
        "pdf" => extract_pdf(data),
        "mp3" => extract_mp3(data),
        "docx" | "xlsx" | "pptx" => {
            let mut m = Metadata::new();
            m.insert("Format", "ZIP-Based Document");
            m
        }
        _ => Metadata::new(),
    }
}

fn extract_jpeg(data: &[u8]) -> Metadata {
    let mut m = Metadata::new();
    m.insert("Format", "JPEG");
    let has_exif = data.windows(2).any(|w| w == [0xFF, 0xE1]);
    m.insert("Has_EXIF", if has_exif { "Yes" } else { "No" });
    m
}

fn extract_png(data: &[u8]) -> Metadata {
    let mut m = Metadata::new();
    m.insert("Format", "PNG");

    let mut offset = 8usize;
    while offset + 8 <= data.len() {
        let length = match read_u32_be(data, offset) {
            Ok(v) => v as usize,
            Err(_) => break,
        };
        let chunk_type = match data.get(offset + 4..offset + 8) {
            Some(t) => t,
            None => break,
        };
        let data_start = offset + 8;
        let data_end = match data_start.checked_add(length) {
            Some(e) if e <= data.len() => e,
            _ => break,
        };

        if chunk_type == b"IEND" {
            break;
        }
        if chunk_type == b"tEXt" {
            let chunk_data = &data[data_start..data_end];
            if let Some(nul) = chunk_data.iter().position(|&b| b == 0) {
                let keyword = String::from_utf8_lossy(&chunk_data[..nul]).into_owned();
                let text = String::from_utf8_lossy(&chunk_data[nul + 1..]).into_owned();
                m.insert(keyword, text);
            }
        }

        // data + 4-byte CRC
        offset = match data_end.checked_add(4) {
            Some(next) => next,
            None => break,
        };
    }

    m
}

fn extract_pdf(data: &[u8]) -> Metadata {
    let mut m = Metadata::new();
    m.insert("Format", "PDF");
    if let Ok(version) = read_string(data, 0, 8.min(data.len())) {
        m.insert("Version", version);
    }

    let window_end = data.len().min(SIXTY_FOUR_KIB);
    let window = &data[..window_end];
    extract_pdf_literal(window, b"/Creator", "Creator", &mut m);
    extract_pdf_literal(window, b"/Author", "Author", &mut m);
    m
}

fn extract_pdf_literal(window: &[u8], marker: &[u8], key: &str, m: &mut Metadata) {
    let Some(marker_pos) = window
        .windows(marker.len())
        .position(|w| w == marker)
    else {
        return;
    };
    let after_marker = &window[marker_pos + marker.len()..];
    let Some(open) = after_marker.iter().position(|&b| b == b'(') else {
        return;
    };
    let rest = &after_marker[open + 1..];
    let Some(close) = rest.iter().position(|&b| b == b')') else {
        return;
    };
    m.insert(key, String::from_utf8_lossy(&rest[..close]).into_owned());
}

fn extract_mp3(data: &[u8]) -> Metadata {
    let mut m = Metadata::new();
    m.insert("Format", "MP3");

    if data.len() >= 5 && &data[0..3] == b"ID3" {
        m.insert("Has_ID3", "Yes");
        m.insert("Version", format!("{}.{}", data[3], data[4]));
    } else {
        m.insert("Has_ID3", "No");
    }

    if data.len() >= 128 {
        let trailer = &data[data.len() - 128..];
        if &trailer[0..3] == b"TAG" {
            m.insert("Title", ascii_field(&trailer[3..33]));
            m.insert("Artist", ascii_field(&trailer[33..63]));
            m.insert("Album", ascii_field(&trailer[63..93]));
            m.insert("Year", ascii_field(&trailer[93..97]));
        }
    }

    m
}

fn ascii_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_detects_exif() {
        let data = [0xFFu8, 0xD8, 0xFF, 0xE1, 0x00, 0x10];
        let m = extract_jpeg(&data);
        assert_eq!(m.get("Has_EXIF"), Some("Yes"));
    }

    #[test]
    fn jpeg_without_exif_marker() {
        let data = [0xFFu8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let m = extract_jpeg(&data);
        assert_eq!(m.get("Has_EXIF"), Some("No"));
    }

    #[test]
    fn png_extracts_text_chunk() {
        let mut data = vec![0x89u8, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let chunk_data = b"Author\0Jane Doe";
        data.extend_from_slice(&(chunk_data.len() as u32).to_be_bytes());
        data.extend_from_slice(b"tEXt");
        data.extend_from_slice(chunk_data);
        data.extend_from_slice(&[0u8; 4]); // crc
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(b"IEND");
        let m = extract_png(&data);
        assert_eq!(m.get("Author"), Some("Jane Doe"));
    }

    #[test]
    fn pdf_version_and_creator() {
        let mut data = b"%PDF-1.4\n".to_vec();
        data.extend_from_slice(b"/Creator (Microsoft Word) /Author (Alice)");
        let m = extract_pdf(&data);
        assert_eq!(m.get("Version"), Some("%PDF-1.4"));
        assert_eq!(m.get("Creator"), Some("Microsoft Word"));
        assert_eq!(m.get("Author"), Some("Alice"));
    }

    #[test]
    fn mp3_id3v2_header() {
        let data = [b'I', b'D', b'3', 3, 0, 0];
        let m = extract_mp3(&data);
        assert_eq!(m.get("Has_ID3"), Some("Yes"));
        assert_eq!(m.get("Version"), Some("3.0"));
    }

    #[test]
    fn mp3_id3v1_trailer() {
        let mut data = vec![0u8; 200];
        let tag_start = data.len() - 128;
        data[tag_start..tag_start + 3].copy_from_slice(b"TAG");
        data[tag_start + 3..tag_start + 13].copy_from_slice(b"My Title\0\0");
        let m = extract_mp3(&data);
        assert_eq!(m.get("Title"), Some("My Title"));
    }

    #[test]
    fn docx_reports_zip_based_document() {
        let m = extract(b"PK\x03\x04", "docx");
        assert_eq!(m.get("Format"), Some("ZIP-Based Document"));
    }

    #[test]
    fn unknown_extension_returns_empty_metadata() {
        let m = extract(b"whatever", "gif");
        assert!(m.is_empty());
    }
}
