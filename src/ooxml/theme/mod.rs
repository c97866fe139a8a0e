//! DrawingML theme parts (`/xl/theme/theme1.xml`, `/ppt/theme/theme1.xml`, ...).
//!
//! A theme is read by a tree of push transforms. [`ThemeXform`] handles the
//! `a:theme` root and hands `a:themeElements` to [`ThemeElementsXform`],
//! which in turn routes the color and font schemes to their own transforms.
//! Everything the model does not interpret is captured as an
//! [`XmlNode`](crate::ooxml::xform::XmlNode) tree.
//!
//! # Examples
//!
//! ```rust
//! use loquat::ooxml::theme::{SchemeSlot, ThemeElementsXform};
//! use loquat::ooxml::xform::parse_str;
//!
//! let xml = r#"<a:themeElements>
//!   <a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1></a:clrScheme>
//! </a:themeElements>"#;
//!
//! let elements = parse_str(xml, &mut ThemeElementsXform::new())?.unwrap();
//! let scheme = elements.clr_scheme.unwrap();
//! assert_eq!(scheme.get(SchemeSlot::Dk1).and_then(|c| c.rgb()), Some("000000"));
//! # Ok::<(), loquat::ooxml::OoxmlError>(())
//! ```

pub mod clr_scheme;
pub mod elements;
pub mod font_scheme;
pub mod style_sheet;

pub use clr_scheme::{
    ClrSchemeXform, ColorChoice, ColorChoiceKind, ColorScheme, ColorTransform, SchemeSlot,
};
pub use elements::{ThemeElements, ThemeElementsXform};
pub use font_scheme::{FontCollection, FontRole, FontScheme, FontSchemeXform, ScriptFont};
pub use style_sheet::{Theme, ThemeXform};

pub const THEME_TAG: &str = "a:theme";
pub const THEME_ELEMENTS_TAG: &str = "a:themeElements";
pub const CLR_SCHEME_TAG: &str = "a:clrScheme";
pub const FONT_SCHEME_TAG: &str = "a:fontScheme";
pub const FMT_SCHEME_TAG: &str = "a:fmtScheme";
pub const EXT_LST_TAG: &str = "a:extLst";
pub const OBJECT_DEFAULTS_TAG: &str = "a:objectDefaults";
pub const EXTRA_CLR_SCHEME_LST_TAG: &str = "a:extraClrSchemeLst";
pub const CUST_CLR_LST_TAG: &str = "a:custClrLst";
