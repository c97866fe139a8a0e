//! Tokenizer adapter: drives a [`NodeXform`] from `quick-xml` events.
//!
//! The transforms never see raw bytes. This module turns the tokenizer's
//! pull events into `open`/`text`/`close` notifications, delivered one at a
//! time in document order:
//!
//! - `Start` → `open`
//! - `Empty` → `open` followed by `close`
//! - `End` → `close`
//! - adjacent `Text`, `CData` and entity references → one `text`
//!
//! Delivery stops as soon as the transform reports
//! [`ParseStep::Completed`]; whatever follows the root element is not read.
use super::{Attributes, NodeXform, ParseStep};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesRef, BytesStart, Event};
use std::borrow::Cow;
use std::io::BufRead;
use tracing::{debug, trace};

/// Configuration for the tokenizer adapter.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::xform::ReaderOptions;
///
/// let options = ReaderOptions::new()
///     .with_check_end_names(true)
///     .with_buffer_capacity(4096);
/// assert!(options.check_end_names);
/// ```
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Reject documents whose close tags do not match their open tags.
    ///
    /// Off by default: the transforms tolerate mismatches on their own, and
    /// theme parts written by third-party tools are not always well-formed.
    pub check_end_names: bool,
    /// Initial capacity of the event buffer, in bytes
    pub buffer_capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            check_end_names: false,
            buffer_capacity: 1024,
        }
    }
}

impl ReaderOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether mismatched close tags are a tokenizer error.
    #[inline]
    pub fn with_check_end_names(mut self, check: bool) -> Self {
        self.check_end_names = check;
        self
    }

    /// Set the initial event buffer capacity.
    #[inline]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}

/// Parse a UTF-8 XML string with default options.
///
/// Returns `Ok(None)` when the document's first element is not a root the
/// transform accepts. If the document ends before the root closes, the
/// partially populated model is returned.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::xform::{Color, ColorXform, parse_str};
///
/// let mut xform = ColorXform::new("tabColor");
/// let color = parse_str(r#"<tabColor rgb="FF92D050"/>"#, &mut xform)?;
/// assert_eq!(color, Some(Color::Argb("FF92D050".to_string())));
/// # Ok::<(), loquat::ooxml::OoxmlError>(())
/// ```
pub fn parse_str<X: NodeXform>(xml: &str, xform: &mut X) -> Result<Option<X::Model>> {
    parse_str_with(xml, xform, &ReaderOptions::default())
}

/// Parse a UTF-8 XML string.
pub fn parse_str_with<X: NodeXform>(
    xml: &str,
    xform: &mut X,
    options: &ReaderOptions,
) -> Result<Option<X::Model>> {
    drive(Reader::from_str(xml), xform, options)
}

/// Parse UTF-8 XML from any buffered reader.
pub fn parse_reader<R: BufRead, X: NodeXform>(
    reader: R,
    xform: &mut X,
    options: &ReaderOptions,
) -> Result<Option<X::Model>> {
    drive(Reader::from_reader(reader), xform, options)
}

fn drive<R: BufRead, X: NodeXform>(
    mut reader: Reader<R>,
    xform: &mut X,
    options: &ReaderOptions,
) -> Result<Option<X::Model>> {
    reader.config_mut().check_end_names = options.check_end_names;

    let mut buf = Vec::with_capacity(options.buffer_capacity);
    // The tokenizer splits a text run at every reference; pieces are joined
    // here so the transform sees the whole run in one notification.
    let mut pending = String::new();
    let mut started = false;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        if !pending.is_empty()
            && !matches!(event, Event::Text(_) | Event::CData(_) | Event::GeneralRef(_))
        {
            xform.text(&pending);
            pending.clear();
        }

        let step = match event {
            Event::Start(e) => {
                let attrs = read_attributes(&e)?;
                let qname = e.name();
                Some(xform.open(std::str::from_utf8(qname.as_ref())?, &attrs))
            },
            Event::Empty(e) => {
                let attrs = read_attributes(&e)?;
                let qname = e.name();
                let name = std::str::from_utf8(qname.as_ref())?;
                match xform.open(name, &attrs) {
                    ParseStep::Rejected => Some(ParseStep::Rejected),
                    _ => Some(xform.close(name)),
                }
            },
            Event::End(e) => {
                let qname = e.name();
                Some(xform.close(std::str::from_utf8(qname.as_ref())?))
            },
            Event::Text(e) if started => {
                let raw = std::str::from_utf8(e.as_ref())?;
                pending.push_str(&unescape(raw)?);
                None
            },
            Event::CData(e) if started => {
                pending.push_str(std::str::from_utf8(e.as_ref())?);
                None
            },
            Event::GeneralRef(e) if started => {
                pending.push_str(&resolve_reference(&e)?);
                None
            },
            Event::Eof => {
                debug!("document ended before the root element closed");
                return Ok(xform.take_model());
            },
            _ => None,
        };

        match step {
            Some(ParseStep::Rejected) if !started => {
                trace!("first element rejected by the transform");
                return Ok(None);
            },
            Some(ParseStep::Completed) => return Ok(xform.take_model()),
            Some(_) => started = true,
            None => {},
        }
        buf.clear();
    }
}

fn read_attributes(e: &BytesStart<'_>) -> Result<Attributes> {
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        attrs.insert(key, value.into_owned());
    }
    Ok(attrs)
}

/// Resolve a character or predefined entity reference (`&#x263A;`, `&amp;`).
fn resolve_reference(e: &BytesRef<'_>) -> Result<String> {
    let name = std::str::from_utf8(e.as_ref())?;
    let mut entity = String::with_capacity(name.len() + 2);
    entity.push('&');
    entity.push_str(name);
    entity.push(';');
    unescape(&entity)
        .map(Cow::into_owned)
        .map_err(|err| OoxmlError::Encoding(format!("Unresolved reference &{};: {}", name, err)))
}
