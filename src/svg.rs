//! Streaming SVG size extraction.
//!
//! Only the root `svg` start tag is ever inspected: the scanner walks
//! structural XML events until the first `svg` element, captures its
//! `width`, `height` and `viewBox` attributes verbatim, and stops
//! consuming input. The rest of the document is never read.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{ProbeError, Result};
use crate::types::Size;

/// Raw attribute values captured from the first `svg` start tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgHeader {
    pub width: Option<String>,
    pub height: Option<String>,
    pub view_box: Option<String>,
}

/// A parsed `viewBox` attribute: min-x, min-y and two extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// An SVG document read incrementally from an XML source.
///
/// The header is scanned once per instance; repeated [`size`](Self::size)
/// or [`header`](Self::header) calls reuse the captured attributes
/// without touching the source again.
pub struct SvgDocument<R: BufRead> {
    reader: Reader<R>,
    header: Option<SvgHeader>,
}

impl<'a> SvgDocument<&'a [u8]> {
    #[must_use]
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<R: BufRead> SvgDocument<R> {
    #[must_use]
    pub fn new(input: R) -> Self {
        Self {
            reader: Reader::from_reader(input),
            header: None,
        }
    }

    /// Returns the captured header attributes, scanning the source on
    /// the first call. A document with no `svg` tag yields an empty
    /// header, not an error.
    pub fn header(&mut self) -> Result<SvgHeader> {
        if self.header.is_none() {
            let header = self.scan_header()?;
            self.header = Some(header);
        }
        Ok(self.header.clone().unwrap_or_default())
    }

    /// Resolves the declared document size, scanning the header first
    /// if needed. `Ok(None)` means no usable width/height or viewBox.
    pub fn size(&mut self) -> Result<Option<Size>> {
        let header = self.header()?;
        resolve_size(&header)
    }

    fn scan_header(&mut self) -> Result<SvgHeader> {
        let mut header = SvgHeader::default();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(tag) | Event::Empty(tag) if tag.local_name().as_ref() == b"svg" => {
                    for attr in tag.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        let name = attr.key.local_name();
                        let value = || String::from_utf8_lossy(&attr.value).into_owned();
                        if name.as_ref().eq_ignore_ascii_case(b"height") {
                            header.height = Some(value());
                        } else if name.as_ref().eq_ignore_ascii_case(b"width") {
                            header.width = Some(value());
                        } else if name.as_ref().eq_ignore_ascii_case(b"viewbox") {
                            header.view_box = Some(value());
                        }
                    }
                    return Ok(header);
                }
                Event::Eof => return Ok(header),
                _ => {}
            }
            buf.clear();
        }
    }
}

/// Combines the captured attributes into a size.
///
/// Width and height attributes take precedence when both are positive;
/// otherwise the viewBox supplies `width = token3 - token1` and
/// `height = token4 - token2`. Anything short of two positive values
/// resolves to `None`.
pub fn resolve_size(header: &SvgHeader) -> Result<Option<Size>> {
    let mut height = match header.height.as_deref() {
        Some(value) => parse_length(value)?,
        None => 0.0,
    };
    let mut width = match header.width.as_deref() {
        Some(value) => parse_length(value)?,
        None => 0.0,
    };

    if height <= 0.0 || width <= 0.0 {
        if let Some(raw) = header.view_box.as_deref() {
            if let Some(view_box) = parse_view_box(raw)? {
                width = view_box.width - view_box.min_x;
                height = view_box.height - view_box.min_y;
            }
        }
    }

    if width > 0.0 && height > 0.0 {
        return Ok(Some(Size::new(width, height)));
    }

    Ok(None)
}

/// Parses a length such as `476`, `10.5` or `576px`, discarding any
/// trailing unit suffix. No unit conversion is performed.
pub fn parse_length(value: &str) -> Result<f64> {
    let unit_start =
        value.find(|c: char| !(c.is_ascii_digit() || c == '-' || c == '.' || c == ' '));
    let numeric = match unit_start {
        Some(pos) => &value[..pos],
        None => value,
    };
    numeric
        .trim()
        .parse::<f64>()
        .map_err(|source| ProbeError::InvalidNumber {
            value: value.to_string(),
            source,
        })
}

/// Parses a `viewBox` list of four numbers separated by whitespace
/// and/or commas. Fewer than four tokens is `Ok(None)`, not an error.
///
/// The split is limited to four tokens: the fourth absorbs the rest of
/// the string, so a stray fifth number surfaces as a parse failure
/// rather than being dropped.
pub fn parse_view_box(value: &str) -> Result<Option<ViewBox>> {
    let mut remaining = value;
    let mut tokens = [""; 4];

    for (i, slot) in tokens.iter_mut().enumerate() {
        remaining = remaining.trim_start_matches([' ', ',']);
        if remaining.is_empty() {
            return Ok(None);
        }
        if i == 3 {
            *slot = remaining;
        } else {
            let end = remaining.find([' ', ',']).unwrap_or(remaining.len());
            *slot = &remaining[..end];
            remaining = &remaining[end..];
        }
    }

    Ok(Some(ViewBox {
        min_x: parse_length(tokens[0])?,
        min_y: parse_length(tokens[1])?,
        width: parse_length(tokens[2])?,
        height: parse_length(tokens[3])?,
    }))
}
