//! File-type signatures and scan hits.

/// A known header/trailer byte sequence identifying a file format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Bytes that must appear at the start of the file.
    pub header_magic: &'static [u8],
    /// Short extension this signature is recovered under (e.g. `"jpg"`).
    pub extension: &'static str,
    /// Whether this format is terminated by a trailer signature.
    pub has_trailer: bool,
    /// Bytes that mark the end of the file. Empty unless `has_trailer`.
    pub trailer_magic: &'static [u8],
}

impl Signature {
    pub const fn new(header_magic: &'static [u8], extension: &'static str) -> Self {
        Signature {
            header_magic,
            extension,
            has_trailer: false,
            trailer_magic: &[],
        }
    }

    pub const fn with_trailer(
        header_magic: &'static [u8],
        extension: &'static str,
        trailer_magic: &'static [u8],
    ) -> Self {
        Signature {
            header_magic,
            extension,
            has_trailer: true,
            trailer_magic,
        }
    }
}

/// A confirmed occurrence of a signature's header at a given offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub offset: u64,
    pub signature: Signature,
}
