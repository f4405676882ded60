pub mod codec;
mod error;
pub mod magic;
pub mod probe;
pub mod svg;
mod types;

pub use codec::{CodecRegistry, DimensionReader, ImageCodecRegistry};
pub use error::{ProbeError, Result};
pub use magic::{
    MAGIC_MAX_LENGTH, probe_media_type, probe_media_type_bytes, probe_media_type_file,
};
pub use probe::ImageProber;
pub use svg::{SvgDocument, SvgHeader, ViewBox, parse_length, parse_view_box, resolve_size};
pub use types::{MediaType, Size};
