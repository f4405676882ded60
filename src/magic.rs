//! Magic-number sniffing over a bounded byte prefix.
//!
//! The signature table is an ordered list: entries are checked in
//! declaration order and the first entry whose full pattern matches wins.
//! A pattern byte of `0x00` is a wildcard and matches any input byte.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::Result;
use crate::types::MediaType;

const MAGIC_NUMBERS: &[(&[u8], MediaType)] = &[
    (&[0xFF, 0xD8, 0xFF], MediaType::Jpeg),
    (
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        MediaType::Png,
    ),
    (&[0x25, 0x50, 0x44, 0x46], MediaType::Pdf),
    (&[0x47, 0x49, 0x46, 0x38, 0x39, 0x61], MediaType::Gif),
    (&[0x47, 0x49, 0x46, 0x38, 0x37, 0x61], MediaType::Gif),
    // RIFF....WEBP; bytes 4-7 are the RIFF chunk size and match anything
    (
        &[
            0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50,
        ],
        MediaType::WebP,
    ),
];

/// Longest pattern in the signature table; the sniffer never reads past it.
pub const MAGIC_MAX_LENGTH: usize = max_pattern_length(MAGIC_NUMBERS);

const fn max_pattern_length(table: &[(&[u8], MediaType)]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i].0.len() > max {
            max = table[i].0.len();
        }
        i += 1;
    }
    max
}

fn pattern_matches(pattern: &[u8], bytes: &[u8]) -> bool {
    pattern
        .iter()
        .zip(bytes)
        .all(|(&p, &b)| p == 0x00 || p == b)
}

/// Classifies the source by its leading bytes.
///
/// Reads at most [`MAGIC_MAX_LENGTH`] bytes and restores the stream
/// position before returning, so the caller can immediately re-read the
/// full payload. `Ok(None)` means no signature matched, including when
/// the source is shorter than every pattern.
pub fn probe_media_type<R: Read + Seek>(input: &mut R) -> Result<Option<MediaType>> {
    let start = input.stream_position()?;
    let outcome = sniff(input);
    input.seek(SeekFrom::Start(start))?;
    outcome
}

fn sniff<R: Read>(input: &mut R) -> Result<Option<MediaType>> {
    let mut buf = [0u8; MAGIC_MAX_LENGTH];
    let mut filled = 0;

    while filled < MAGIC_MAX_LENGTH {
        let read = input.read(&mut buf[filled..filled + 1])?;
        if read == 0 {
            // source exhausted before any full-length match
            return Ok(None);
        }
        filled += 1;

        for &(pattern, media_type) in MAGIC_NUMBERS {
            // only evaluate entries we have the full length for
            if pattern.len() == filled && pattern_matches(pattern, &buf[..filled]) {
                tracing::trace!(%media_type, bytes = filled, "signature matched");
                return Ok(Some(media_type));
            }
        }
    }

    Ok(None)
}

/// Classifies an in-memory payload. Empty input is simply no match.
#[must_use]
pub fn probe_media_type_bytes(data: &[u8]) -> Option<MediaType> {
    let mut cursor = Cursor::new(data);
    // reads from an in-memory cursor cannot fail
    probe_media_type(&mut cursor).ok().flatten()
}

/// Classifies a file by its content, not its extension.
pub fn probe_media_type_file<P: AsRef<Path>>(path: P) -> Result<Option<MediaType>> {
    let mut reader = BufReader::new(File::open(path)?);
    probe_media_type(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_length_covers_longest_pattern() {
        assert_eq!(MAGIC_MAX_LENGTH, 12);
    }

    #[test]
    fn test_wildcard_matches_any_byte() {
        assert!(pattern_matches(&[0x52, 0x00, 0x50], &[0x52, 0xAB, 0x50]));
        assert!(pattern_matches(&[0x52, 0x00, 0x50], &[0x52, 0x00, 0x50]));
        assert!(!pattern_matches(&[0x52, 0x00, 0x50], &[0x52, 0xAB, 0x51]));
    }

    #[test]
    fn test_gif_variants_share_one_type() {
        assert_eq!(probe_media_type_bytes(b"GIF89a"), Some(MediaType::Gif));
        assert_eq!(probe_media_type_bytes(b"GIF87a"), Some(MediaType::Gif));
        assert_eq!(probe_media_type_bytes(b"GIF88a"), None);
    }

    #[test]
    fn test_shorter_prefix_wins_before_longer_entries() {
        // JPEG fires after three bytes; no further entries are consulted
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(probe_media_type_bytes(&data), Some(MediaType::Jpeg));
    }
}
