//! Dimension dispatch: routes a declared media type to the SVG scanner
//! or to a registered codec reader.

use std::io::{BufReader, Read};

use crate::codec::{CodecRegistry, ImageCodecRegistry};
use crate::error::{ProbeError, Result};
use crate::svg::SvgDocument;
use crate::types::{MediaType, Size};

/// Probes image dimensions for a declared media type.
///
/// Vector formats are sized by streaming the document header; raster
/// formats go through the codec registry. The prober itself never
/// inspects payload bytes.
pub struct ImageProber<R = ImageCodecRegistry> {
    registry: R,
}

impl ImageProber<ImageCodecRegistry> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ImageCodecRegistry,
        }
    }
}

impl Default for ImageProber<ImageCodecRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CodecRegistry> ImageProber<R> {
    #[must_use]
    pub fn with_registry(registry: R) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Probes the dimensions of an in-memory payload declared to be
    /// `media_type`.
    ///
    /// `Ok(None)` is possible only on the SVG path, when the document
    /// declares no usable size. A media type with no reader fails with
    /// [`ProbeError::UnsupportedFormat`].
    pub fn probe_size(&self, media_type: MediaType, data: &[u8]) -> Result<Option<Size>> {
        if media_type.is_vector() {
            tracing::debug!(%media_type, "probing size via svg header scan");
            return SvgDocument::from_bytes(data).size();
        }

        tracing::debug!(%media_type, "probing size via codec registry");
        match self.registry.reader_for(media_type) {
            Some(mut reader) => reader.read_dimensions(data).map(Some),
            None => Err(ProbeError::UnsupportedFormat(media_type)),
        }
    }

    /// Streaming variant of [`probe_size`](Self::probe_size).
    ///
    /// SVG input is scanned incrementally and only read up to the root
    /// tag; raster input is buffered to memory for the codec reader.
    pub fn probe_size_stream<S: Read>(
        &self,
        media_type: MediaType,
        input: &mut S,
    ) -> Result<Option<Size>> {
        if media_type.is_vector() {
            return SvgDocument::new(BufReader::new(input)).size();
        }

        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        self.probe_size(media_type, &data)
    }
}
