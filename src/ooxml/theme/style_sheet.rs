/// Theme part root (`a:theme`, CT_OfficeStyleSheet).
///
/// Only `a:themeElements` is interpreted. Object defaults, extra color
/// schemes, custom colors and extensions are captured verbatim so the part
/// can be written back without loss.
use super::clr_scheme::{ColorChoice, SchemeSlot};
use super::elements::{ThemeElements, ThemeElementsXform};
use super::font_scheme::FontRole;
use super::{
    CUST_CLR_LST_TAG, EXT_LST_TAG, EXTRA_CLR_SCHEME_LST_TAG, OBJECT_DEFAULTS_TAG,
    THEME_ELEMENTS_TAG, THEME_TAG,
};
use crate::common::bom::decode_xml_part;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xform::{
    Attributes, NodeXform, ParseStep, ReaderOptions, XmlNode, XmlNodeXform, parse_reader,
    parse_str_with,
};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::{debug, trace};

/// A parsed theme part.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::theme::{SchemeSlot, Theme};
///
/// let xml = br#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
///   <a:themeElements>
///     <a:clrScheme name="Office"><a:accent1><a:srgbClr val="4F81BD"/></a:accent1></a:clrScheme>
///     <a:fontScheme name="Office"><a:majorFont><a:latin typeface="Cambria"/></a:majorFont></a:fontScheme>
///   </a:themeElements>
/// </a:theme>"#;
///
/// let theme = Theme::from_xml(xml)?;
/// assert_eq!(theme.name.as_deref(), Some("Office Theme"));
/// assert_eq!(theme.color(SchemeSlot::Accent1).and_then(|c| c.rgb()), Some("4F81BD"));
/// assert_eq!(theme.major_font(), Some("Cambria"));
/// # Ok::<(), loquat::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: Option<String>,
    pub theme_elements: Option<ThemeElements>,
    pub object_defaults: Option<XmlNode>,
    pub extra_clr_scheme_lst: Option<XmlNode>,
    pub cust_clr_lst: Option<XmlNode>,
    pub ext_lst: Option<XmlNode>,
}

impl Theme {
    /// Parse a theme part from its raw bytes (UTF-8, or UTF-16 with a BOM).
    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        Self::from_xml_with(bytes, &ReaderOptions::default())
    }

    /// Parse a theme part from its raw bytes with explicit reader options.
    pub fn from_xml_with(bytes: &[u8], options: &ReaderOptions) -> Result<Self> {
        let xml = decode_xml_part(bytes)?;
        parse_str_with(&xml, &mut ThemeXform::new(), options)?.ok_or_else(not_a_theme)
    }

    /// Parse a UTF-8 theme part from a buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, options: &ReaderOptions) -> Result<Self> {
        parse_reader(reader, &mut ThemeXform::new(), options)?.ok_or_else(not_a_theme)
    }

    /// The color defined for `slot` by the theme's color scheme.
    pub fn color(&self, slot: SchemeSlot) -> Option<&ColorChoice> {
        self.theme_elements
            .as_ref()?
            .clr_scheme
            .as_ref()?
            .get(slot)
    }

    /// The Latin typeface of the major (heading) font.
    pub fn major_font(&self) -> Option<&str> {
        self.theme_elements
            .as_ref()?
            .font_scheme
            .as_ref()?
            .major_font
            .typeface(FontRole::Latin)
    }

    /// The Latin typeface of the minor (body) font.
    pub fn minor_font(&self) -> Option<&str> {
        self.theme_elements
            .as_ref()?
            .font_scheme
            .as_ref()?
            .minor_font
            .typeface(FontRole::Latin)
    }
}

fn not_a_theme() -> OoxmlError {
    OoxmlError::InvalidFormat(format!("root element is not {}", THEME_TAG))
}

/// Captured children of `a:theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapturedChild {
    ObjectDefaults,
    ExtraClrSchemeLst,
    CustClrLst,
    ExtLst,
}

impl CapturedChild {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            OBJECT_DEFAULTS_TAG => Some(CapturedChild::ObjectDefaults),
            EXTRA_CLR_SCHEME_LST_TAG => Some(CapturedChild::ExtraClrSchemeLst),
            CUST_CLR_LST_TAG => Some(CapturedChild::CustClrLst),
            EXT_LST_TAG => Some(CapturedChild::ExtLst),
            _ => None,
        }
    }

    fn property(self) -> &'static str {
        match self {
            CapturedChild::ObjectDefaults => "objectDefaults",
            CapturedChild::ExtraClrSchemeLst => "extraClrSchemeLst",
            CapturedChild::CustClrLst => "custClrLst",
            CapturedChild::ExtLst => "extLst",
        }
    }
}

#[derive(Debug, Clone)]
enum Delegate {
    Idle,
    ThemeElements,
    Capture(CapturedChild, XmlNodeXform),
}

/// Transform for the `a:theme` root.
#[derive(Debug, Clone)]
pub struct ThemeXform {
    theme_elements: ThemeElementsXform,
    delegate: Delegate,
    model: Option<Theme>,
}

impl ThemeXform {
    pub fn new() -> Self {
        Self {
            theme_elements: ThemeElementsXform::new(),
            delegate: Delegate::Idle,
            model: None,
        }
    }

    fn finish_delegate(&mut self) {
        let delegate = std::mem::replace(&mut self.delegate, Delegate::Idle);
        match delegate {
            Delegate::Idle => {},
            Delegate::ThemeElements => {
                let elements = self.theme_elements.take_model();
                let Some(model) = self.model.as_mut() else {
                    trace!("a:themeElements outside a:theme dropped");
                    return;
                };
                debug!(property = "themeElements", "theme delegate completed");
                model.theme_elements = elements;
            },
            Delegate::Capture(child, mut capture) => {
                let node = capture.take_model();
                let Some(model) = self.model.as_mut() else {
                    trace!(property = child.property(), "capture outside a:theme dropped");
                    return;
                };
                debug!(property = child.property(), "theme delegate completed");
                match child {
                    CapturedChild::ObjectDefaults => model.object_defaults = node,
                    CapturedChild::ExtraClrSchemeLst => model.extra_clr_scheme_lst = node,
                    CapturedChild::CustClrLst => model.cust_clr_lst = node,
                    CapturedChild::ExtLst => model.ext_lst = node,
                }
            },
        }
    }
}

impl Default for ThemeXform {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeXform for ThemeXform {
    type Model = Theme;

    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep {
        match &mut self.delegate {
            Delegate::Idle => {},
            Delegate::ThemeElements => {
                self.theme_elements.open(name, attrs);
                return ParseStep::Accepted;
            },
            Delegate::Capture(_, capture) => {
                capture.open(name, attrs);
                return ParseStep::Accepted;
            },
        }

        if name == THEME_TAG {
            self.reset();
            self.model = Some(Theme {
                name: attrs.get("name").map(str::to_string),
                ..Theme::default()
            });
        } else if name == THEME_ELEMENTS_TAG {
            self.delegate = Delegate::ThemeElements;
            self.theme_elements.open(name, attrs);
        } else if let Some(child) = CapturedChild::from_tag(name) {
            let mut capture = XmlNodeXform::new(name);
            capture.open(name, attrs);
            self.delegate = Delegate::Capture(child, capture);
        } else {
            trace!(tag = name, "theme child ignored");
        }
        ParseStep::Accepted
    }

    fn text(&mut self, text: &str) {
        match &mut self.delegate {
            Delegate::Idle => {},
            Delegate::ThemeElements => self.theme_elements.text(text),
            Delegate::Capture(_, capture) => capture.text(text),
        }
    }

    fn close(&mut self, name: &str) -> ParseStep {
        let step = match &mut self.delegate {
            Delegate::Idle => {
                return if name == THEME_TAG {
                    ParseStep::Completed
                } else {
                    ParseStep::Accepted
                };
            },
            Delegate::ThemeElements => self.theme_elements.close(name),
            Delegate::Capture(_, capture) => capture.close(name),
        };

        if step.is_completed() {
            self.finish_delegate();
        }
        ParseStep::Accepted
    }

    fn model(&self) -> Option<&Theme> {
        self.model.as_ref()
    }

    /// Also lifts the partial model of a delegate that never completed.
    fn take_model(&mut self) -> Option<Theme> {
        if !matches!(self.delegate, Delegate::Idle) {
            self.finish_delegate();
        }
        self.model.take()
    }

    fn reset(&mut self) {
        self.theme_elements.reset();
        self.delegate = Delegate::Idle;
        self.model = None;
    }
}
