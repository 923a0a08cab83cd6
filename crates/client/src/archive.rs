//! Subtitle archive unpacking.

use std::io::{Cursor, Read};
use subgrab_core::Error;
use zip::ZipArchive;

/// Extension selecting subtitle entries inside an archive.
///
/// Matched case-sensitively, as the site packages them.
const SUBTITLE_EXT: &str = ".srt";

/// Extract subtitle payloads from a ZIP-compatible archive held in memory.
///
/// Entries are visited in container order; those whose name ends with
/// `.srt` contribute their full decompressed content to the result, in
/// that same order. Other entries are silently skipped.
pub fn extract_subtitle_texts(archive_bytes: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes))
        .map_err(|e| Error::Archive(format!("not a valid archive: {}", e)))?;

    let mut payloads = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| Error::Archive(format!("failed to open entry {}: {}", index, e)))?;

        let name = entry.name().to_string();
        if !name.ends_with(SUBTITLE_EXT) {
            continue;
        }

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut data)
            .map_err(|e| Error::Archive(format!("failed to decompress {}: {}", name, e)))?;
        payloads.push(data);
    }

    Ok(payloads)
}
