//! File system utility helpers (BOM-aware readers, etc.)
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;

use super::errors::{Result, ViewerError};

/// Read a metadata XML file as text.
///
/// Configuration dumps are usually UTF-8 with a BOM, but files saved by
/// older designers may be UTF-16. The BOM decides the encoding; without
/// one the content is treated as UTF-8.
pub fn read_xml_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ViewerError::io(path, e))?;
    Ok(decode_xml_bytes(&bytes))
}

/// Decode raw bytes, honouring (and stripping) a byte order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .unwrap_or(UTF_8);
    // decode_with_bom_removal для UTF-8 без BOM просто декодирует
    let (text, _) = encoding.decode_with_bom_removal(bytes);
    text.into_owned()
}
