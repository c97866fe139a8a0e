//! Common utilities shared by the XML part readers.

pub mod bom;
pub mod number;
pub mod xml;

pub use bom::{BomKind, decode_xml_part, detect_bom};
pub use xml::escape_xml;
