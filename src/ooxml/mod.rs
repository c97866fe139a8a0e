//! Office Open XML (OOXML) part readers and writers.
//!
//! The module is organized into two layers:
//!
//! 1. **Transform layer** (`xform`): the push-event contract, the quick-xml
//!    reader adapter, the streaming writer, and the reusable leaf transforms
//!    (generic node capture and SpreadsheetML colors)
//! 2. **Theme parts** (`theme`): DrawingML theme, theme elements, color
//!    scheme and font scheme transforms
//!
//! # Example: Reading a theme part
//!
//! ```rust
//! use loquat::ooxml::theme::Theme;
//!
//! let theme = Theme::from_xml(br#"<a:theme name="Office Theme"><a:themeElements/></a:theme>"#)?;
//! assert_eq!(theme.name.as_deref(), Some("Office Theme"));
//! assert!(theme.theme_elements.is_some());
//! # Ok::<(), loquat::ooxml::OoxmlError>(())
//! ```
pub mod error;
pub mod theme;
pub mod xform;

// Re-export error types
pub use error::{OoxmlError, Result};
