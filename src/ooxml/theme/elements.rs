/// Theme elements (`a:themeElements`, CT_BaseStyles).
///
/// Color and font schemes are modeled; the format scheme and the extension
/// list are captured verbatim.
use super::clr_scheme::{ClrSchemeXform, ColorScheme};
use super::font_scheme::{FontScheme, FontSchemeXform};
use super::{CLR_SCHEME_TAG, EXT_LST_TAG, FMT_SCHEME_TAG, FONT_SCHEME_TAG, THEME_ELEMENTS_TAG};
use crate::ooxml::xform::{Attributes, NodeXform, ParseStep, XmlNode, XmlNodeXform};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A parsed `a:themeElements`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeElements {
    pub clr_scheme: Option<ColorScheme>,
    pub font_scheme: Option<FontScheme>,
    /// Captured `a:fmtScheme` (fills, lines, effects, backgrounds)
    pub fmt_scheme: Option<XmlNode>,
    pub ext_lst: Option<XmlNode>,
}

/// Captured children of `a:themeElements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapturedElement {
    FmtScheme,
    ExtLst,
}

impl CapturedElement {
    fn property(self) -> &'static str {
        match self {
            CapturedElement::FmtScheme => "fmtScheme",
            CapturedElement::ExtLst => "extLst",
        }
    }
}

/// Which child transform currently receives the events.
#[derive(Debug, Clone)]
enum Delegate {
    Idle,
    ClrScheme,
    FontScheme,
    Capture(CapturedElement, XmlNodeXform),
}

/// A delegate's model on its way into a [`ThemeElements`] property.
enum Finished {
    ClrScheme(Option<ColorScheme>),
    FontScheme(Option<FontScheme>),
    Capture(CapturedElement, Option<XmlNode>),
}

/// Transform for `a:themeElements`.
#[derive(Debug, Clone)]
pub struct ThemeElementsXform {
    clr_scheme: ClrSchemeXform,
    font_scheme: FontSchemeXform,
    delegate: Delegate,
    model: Option<ThemeElements>,
}

impl ThemeElementsXform {
    pub fn new() -> Self {
        Self {
            clr_scheme: ClrSchemeXform::new(),
            font_scheme: FontSchemeXform::new(),
            delegate: Delegate::Idle,
            model: None,
        }
    }

    fn start_capture(&mut self, element: CapturedElement, name: &str, attrs: &Attributes) {
        let mut capture = XmlNodeXform::new(name);
        capture.open(name, attrs);
        self.delegate = Delegate::Capture(element, capture);
    }

    /// Move the active delegate's model into its property and go idle.
    ///
    /// A delegate started before `a:themeElements` opened has no property
    /// to fill; its model is dropped.
    fn finish_delegate(&mut self) {
        let delegate = std::mem::replace(&mut self.delegate, Delegate::Idle);
        let finished = match delegate {
            Delegate::Idle => return,
            Delegate::ClrScheme => Finished::ClrScheme(self.clr_scheme.take_model()),
            Delegate::FontScheme => Finished::FontScheme(self.font_scheme.take_model()),
            Delegate::Capture(element, mut capture) => {
                Finished::Capture(element, capture.take_model())
            },
        };

        let Some(model) = self.model.as_mut() else {
            trace!("delegate finished outside a:themeElements; model dropped");
            return;
        };
        match finished {
            Finished::ClrScheme(scheme) => {
                debug!(property = "clrScheme", "theme elements delegate completed");
                model.clr_scheme = scheme;
            },
            Finished::FontScheme(scheme) => {
                debug!(property = "fontScheme", "theme elements delegate completed");
                model.font_scheme = scheme;
            },
            Finished::Capture(element, node) => {
                debug!(property = element.property(), "theme elements delegate completed");
                match element {
                    CapturedElement::FmtScheme => model.fmt_scheme = node,
                    CapturedElement::ExtLst => model.ext_lst = node,
                }
            },
        }
    }
}

impl Default for ThemeElementsXform {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeXform for ThemeElementsXform {
    type Model = ThemeElements;

    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep {
        match &mut self.delegate {
            Delegate::Idle => {},
            Delegate::ClrScheme => {
                self.clr_scheme.open(name, attrs);
                return ParseStep::Accepted;
            },
            Delegate::FontScheme => {
                self.font_scheme.open(name, attrs);
                return ParseStep::Accepted;
            },
            Delegate::Capture(_, capture) => {
                capture.open(name, attrs);
                return ParseStep::Accepted;
            },
        }

        match name {
            THEME_ELEMENTS_TAG => {
                self.reset();
                self.model = Some(ThemeElements::default());
            },
            CLR_SCHEME_TAG => {
                self.delegate = Delegate::ClrScheme;
                self.clr_scheme.open(name, attrs);
            },
            FONT_SCHEME_TAG => {
                self.delegate = Delegate::FontScheme;
                self.font_scheme.open(name, attrs);
            },
            FMT_SCHEME_TAG => self.start_capture(CapturedElement::FmtScheme, name, attrs),
            EXT_LST_TAG => self.start_capture(CapturedElement::ExtLst, name, attrs),
            _ => trace!(tag = name, "theme elements child ignored"),
        }
        ParseStep::Accepted
    }

    fn text(&mut self, text: &str) {
        match &mut self.delegate {
            Delegate::Idle => {},
            Delegate::ClrScheme => self.clr_scheme.text(text),
            Delegate::FontScheme => self.font_scheme.text(text),
            Delegate::Capture(_, capture) => capture.text(text),
        }
    }

    fn close(&mut self, name: &str) -> ParseStep {
        let step = match &mut self.delegate {
            Delegate::Idle => {
                return if name == THEME_ELEMENTS_TAG {
                    ParseStep::Completed
                } else {
                    ParseStep::Accepted
                };
            },
            Delegate::ClrScheme => self.clr_scheme.close(name),
            Delegate::FontScheme => self.font_scheme.close(name),
            Delegate::Capture(_, capture) => capture.close(name),
        };

        if step.is_completed() {
            self.finish_delegate();
        }
        ParseStep::Accepted
    }

    fn model(&self) -> Option<&ThemeElements> {
        self.model.as_ref()
    }

    /// Also lifts the partial model of a delegate that never completed.
    fn take_model(&mut self) -> Option<ThemeElements> {
        if !matches!(self.delegate, Delegate::Idle) {
            self.finish_delegate();
        }
        self.model.take()
    }

    fn reset(&mut self) {
        self.clr_scheme.reset();
        self.font_scheme.reset();
        self.delegate = Delegate::Idle;
        self.model = None;
    }
}
