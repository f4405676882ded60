use crate::types::MediaType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid number {value:?}: {source}")]
    InvalidNumber {
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("Codec failure: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Unable to probe dimensions for media type {0}")]
    UnsupportedFormat(MediaType),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
