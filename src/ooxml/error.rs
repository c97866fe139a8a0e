/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// Only the tokenizer adapter produces these. The node transforms themselves
/// never fail: irregular input degrades to partial or absent model fields.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Text could not be decoded or an entity could not be resolved
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// IO error from the underlying reader
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            // The tokenizer shares its IO error behind an `Arc`.
            quick_xml::Error::Io(io) => {
                OoxmlError::Io(std::io::Error::new(io.kind(), io.to_string()))
            },
            other => OoxmlError::Xml(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for OoxmlError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        OoxmlError::Encoding(err.to_string())
    }
}

impl From<std::str::Utf8Error> for OoxmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        OoxmlError::Encoding(err.to_string())
    }
}
