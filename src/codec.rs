//! Codec registry seam for raster dimension probing.
//!
//! The dispatcher never inspects raster bytes itself; it looks up a
//! reader for the declared media type and delegates. Readers report the
//! dimensions recorded in the format header without decoding pixels.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::Result;
use crate::types::{MediaType, Size};

/// Maps a declared media type to a dimension reader, if one is
/// registered for it.
pub trait CodecRegistry {
    fn reader_for(&self, media_type: MediaType) -> Option<Box<dyn DimensionReader>>;
}

/// Reads the declared width and height from an encoded payload without
/// materializing pixels. Resource release happens on drop, on every
/// exit path.
pub trait DimensionReader {
    fn read_dimensions(&mut self, data: &[u8]) -> Result<Size>;
}

/// Default registry backed by the `image` crate's header readers.
///
/// PDF and SVG have no reader here: PDF has no registered codec, and
/// SVG is handled upstream by the document scanner.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCodecRegistry;

impl CodecRegistry for ImageCodecRegistry {
    fn reader_for(&self, media_type: MediaType) -> Option<Box<dyn DimensionReader>> {
        let format = match media_type {
            MediaType::Jpeg => ImageFormat::Jpeg,
            MediaType::Png => ImageFormat::Png,
            MediaType::Gif => ImageFormat::Gif,
            MediaType::WebP => ImageFormat::WebP,
            MediaType::Pdf | MediaType::Svg => return None,
        };
        Some(Box::new(ImageCodecReader { format }))
    }
}

struct ImageCodecReader {
    format: ImageFormat,
}

impl DimensionReader for ImageCodecReader {
    fn read_dimensions(&mut self, data: &[u8]) -> Result<Size> {
        let reader = ImageReader::with_format(Cursor::new(data), self.format);
        let (width, height) = reader.into_dimensions()?;
        Ok(Size::new(f64::from(width), f64::from(height)))
    }
}
