use std::io::{Cursor, Read, Seek, SeekFrom};

use mediaprobe::{MAGIC_MAX_LENGTH, MediaType, probe_media_type, probe_media_type_bytes};
use proptest::prelude::*;

fn jpeg_prefix() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0");
    data
}

fn webp_prefix() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&1024u32.to_le_bytes());
    data.extend_from_slice(b"WEBP");
    data.extend_from_slice(b"VP8 ");
    data
}

#[test]
fn test_probe_jpeg() {
    assert_eq!(probe_media_type_bytes(&jpeg_prefix()), Some(MediaType::Jpeg));
}

#[test]
fn test_probe_png() {
    let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
    assert_eq!(probe_media_type_bytes(&data), Some(MediaType::Png));
}

#[test]
fn test_probe_gif() {
    assert_eq!(
        probe_media_type_bytes(b"GIF89a\x02\x00\x03\x00"),
        Some(MediaType::Gif)
    );
    assert_eq!(
        probe_media_type_bytes(b"GIF87a\x02\x00\x03\x00"),
        Some(MediaType::Gif)
    );
}

#[test]
fn test_probe_pdf() {
    assert_eq!(
        probe_media_type_bytes(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3"),
        Some(MediaType::Pdf)
    );
}

#[test]
fn test_probe_webp_ignores_chunk_size_bytes() {
    assert_eq!(probe_media_type_bytes(&webp_prefix()), Some(MediaType::WebP));
}

#[test]
fn test_probe_text_is_no_match() {
    assert_eq!(probe_media_type_bytes(b"hello there, plain text file"), None);
}

#[test]
fn test_probe_empty_is_no_match() {
    assert_eq!(probe_media_type_bytes(&[]), None);
}

#[test]
fn test_probe_truncated_signature_is_no_match() {
    // PNG signature cut short: no entry of that length matches
    assert_eq!(probe_media_type_bytes(&[0x89, 0x50, 0x4E, 0x47]), None);
}

#[test]
fn test_probe_restores_stream_position() {
    let data = jpeg_prefix();
    let mut cursor = Cursor::new(data.clone());

    let media_type = probe_media_type(&mut cursor).unwrap();
    assert_eq!(media_type, Some(MediaType::Jpeg));

    let mut replay = Vec::new();
    cursor.read_to_end(&mut replay).unwrap();
    assert_eq!(replay, data);
}

#[test]
fn test_probe_restores_non_zero_start_position() {
    let mut payload = vec![0u8; 4];
    payload.extend_from_slice(b"GIF89a");
    let mut cursor = Cursor::new(payload);
    cursor.seek(SeekFrom::Start(4)).unwrap();

    let media_type = probe_media_type(&mut cursor).unwrap();
    assert_eq!(media_type, Some(MediaType::Gif));
    assert_eq!(cursor.stream_position().unwrap(), 4);
}

#[test]
fn test_probe_file_by_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.bin");
    std::fs::write(&path, jpeg_prefix()).unwrap();

    let media_type = mediaprobe::probe_media_type_file(&path).unwrap();
    assert_eq!(media_type, Some(MediaType::Jpeg));
}

proptest! {
    #[test]
    fn prop_inputs_shorter_than_every_pattern_never_match(
        data in proptest::collection::vec(any::<u8>(), 0..3)
    ) {
        // the shortest table pattern is three bytes
        prop_assert_eq!(probe_media_type_bytes(&data), None);
    }

    #[test]
    fn prop_webp_wildcard_positions_accept_any_bytes(chunk_size in any::<[u8; 4]>()) {
        let mut data = Vec::new();
        data.extend_from_slice(b"RIFF");
        data.extend_from_slice(&chunk_size);
        data.extend_from_slice(b"WEBP");
        prop_assert_eq!(probe_media_type_bytes(&data), Some(MediaType::WebP));
    }

    #[test]
    fn prop_probing_preserves_arbitrary_streams(
        data in proptest::collection::vec(any::<u8>(), 0..(MAGIC_MAX_LENGTH * 4))
    ) {
        let mut cursor = Cursor::new(data.clone());
        probe_media_type(&mut cursor).unwrap();

        let mut replay = Vec::new();
        cursor.read_to_end(&mut replay).unwrap();
        prop_assert_eq!(replay, data);
    }
}
