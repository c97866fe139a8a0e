//! Loquat - Streaming transforms for Office Open XML theme parts
//!
//! This library reads and writes the DrawingML theme parts found in
//! spreadsheet and presentation packages (`xl/theme/theme1.xml`,
//! `ppt/theme/theme1.xml`). Parsing is push-based: a tokenizer feeds
//! open/text/close events into a tree of small transforms, and each
//! transform builds one piece of the model.
//!
//! # Features
//!
//! - **Push-event transforms**: One reusable transform per element kind, with
//!   composite transforms delegating to their children
//! - **Lossless capture**: Unmodeled subtrees (`a:fmtScheme`, `a:extLst`,
//!   object defaults) are kept as generic node trees and can be written back
//! - **Bidirectional colors**: SpreadsheetML color elements are read into a
//!   typed model and rendered back with the same attribute priority
//! - **Lenient input**: Malformed or truncated parts yield partial models
//!   instead of errors
//!
//! # Example - Reading a theme part
//!
//! ```rust
//! use loquat::ooxml::theme::{SchemeSlot, Theme};
//!
//! let xml = br#"<a:theme name="Office Theme">
//!   <a:themeElements>
//!     <a:clrScheme name="Office">
//!       <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
//!       <a:accent1><a:srgbClr val="4F81BD"/></a:accent1>
//!     </a:clrScheme>
//!     <a:fontScheme name="Office">
//!       <a:majorFont><a:latin typeface="Cambria"/></a:majorFont>
//!       <a:minorFont><a:latin typeface="Calibri"/></a:minorFont>
//!     </a:fontScheme>
//!   </a:themeElements>
//! </a:theme>"#;
//!
//! let theme = Theme::from_xml(xml)?;
//! assert_eq!(theme.color(SchemeSlot::Dk1).and_then(|c| c.rgb()), Some("000000"));
//! assert_eq!(theme.minor_font(), Some("Calibri"));
//! # Ok::<(), loquat::ooxml::OoxmlError>(())
//! ```
//!
//! # Example - Round-tripping a color
//!
//! ```rust
//! use loquat::ooxml::xform::{Color, ColorXform, RenderXform, XmlStreamWriter, parse_str};
//!
//! let mut xform = ColorXform::new("fgColor");
//! let color = parse_str(r#"<fgColor theme="4" tint="-0.25"/>"#, &mut xform)?.unwrap();
//! assert_eq!(color, Color::Theme { index: 4, tint: Some(-0.25) });
//!
//! let mut writer = XmlStreamWriter::new();
//! xform.render(&mut writer, Some(&color));
//! assert_eq!(writer.as_str(), r#"<fgColor theme="4" tint="-0.25"/>"#);
//! # Ok::<(), loquat::ooxml::OoxmlError>(())
//! ```

/// Shared helpers: BOM sniffing, XML escaping, lenient number parsing
pub mod common;

/// OOXML part transforms
///
/// This module provides the push-event transform framework and the theme
/// part transforms built on it.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::theme::Theme;
pub use ooxml::{OoxmlError, Result};
