//! Spreadsheet color element (`CT_Color`).
//!
//! Used for `<color>`, `<fgColor>`, `<bgColor>`, `<tabColor>` and similar
//! elements in `styles.xml` and worksheets. This is the one transform with a
//! write path: the attribute priority below fixes both the wire format and
//! round-trip behavior.
use super::writer::XmlSink;
use super::{Attributes, NodeXform, ParseStep, RenderXform};
use crate::common::number::{format_float, format_int, parse_float_lenient, parse_int_lenient};
use serde::{Deserialize, Serialize};

/// A single color value.
///
/// Attribute priority, highest first: `rgb`, `theme` (+ `tint`), `indexed`,
/// `auto`. Exactly one representation is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    /// Explicit ARGB hex value, e.g. `FF4F81BD`
    Argb(String),
    /// Index into the theme color scheme, optionally lightened or darkened
    Theme { index: i32, tint: Option<f64> },
    /// Index into the legacy indexed palette
    Indexed(i32),
    /// Automatic (application-chosen) color
    Auto(bool),
    /// Color element present without any value; written as `auto="1"`
    Unspecified,
}

impl Color {
    /// Read a color from element attributes.
    ///
    /// Empty `rgb`, `theme`, `indexed` and `tint` values count as absent.
    /// `auto` counts whenever present; only `1` and `true` (any case) mean
    /// `true`. Returns `None` when no color attribute is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loquat::ooxml::xform::{Attributes, Color};
    ///
    /// let attrs: Attributes = [("theme", "4"), ("tint", "0.39997558519241921")]
    ///     .into_iter()
    ///     .collect();
    /// assert!(matches!(Color::from_attributes(&attrs), Some(Color::Theme { index: 4, tint: Some(_) })));
    /// ```
    pub fn from_attributes(attrs: &Attributes) -> Option<Color> {
        let present = |name: &str| attrs.get(name).filter(|value| !value.is_empty());

        if let Some(rgb) = present("rgb") {
            Some(Color::Argb(rgb.to_string()))
        } else if let Some(theme) = present("theme") {
            Some(Color::Theme {
                index: parse_int_lenient(theme),
                tint: present("tint").and_then(parse_float_lenient),
            })
        } else if let Some(indexed) = present("indexed") {
            Some(Color::Indexed(parse_int_lenient(indexed)))
        } else {
            attrs.get("auto").map(|auto| {
                Color::Auto(auto == "1" || auto.eq_ignore_ascii_case("true"))
            })
        }
    }
}

/// Transform for a color element with a configurable name.
#[derive(Debug, Clone)]
pub struct ColorXform {
    name: String,
    model: Option<Color>,
}

impl ColorXform {
    /// Create a transform for elements called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
        }
    }

    /// The element name this transform reads and writes.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for ColorXform {
    fn default() -> Self {
        Self::new("color")
    }
}

impl NodeXform for ColorXform {
    type Model = Color;

    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep {
        if name != self.name {
            return ParseStep::Rejected;
        }
        self.model = Color::from_attributes(attrs);
        ParseStep::Accepted
    }

    /// A color element has no children, so any close ends it.
    fn close(&mut self, _name: &str) -> ParseStep {
        ParseStep::Completed
    }

    fn model(&self) -> Option<&Color> {
        self.model.as_ref()
    }

    fn take_model(&mut self) -> Option<Color> {
        self.model.take()
    }

    fn reset(&mut self) {
        self.model = None;
    }
}

impl RenderXform for ColorXform {
    fn render<S: XmlSink + ?Sized>(&self, sink: &mut S, model: Option<&Color>) -> bool {
        let Some(color) = model else {
            return false;
        };

        sink.open_node(&self.name);
        match color {
            Color::Argb(argb) => sink.add_attribute("rgb", argb),
            Color::Theme { index, tint } => {
                sink.add_attribute("theme", &format_int(*index));
                if let Some(tint) = tint {
                    sink.add_attribute("tint", &format_float(*tint));
                }
            },
            Color::Indexed(indexed) => sink.add_attribute("indexed", &format_int(*indexed)),
            Color::Auto(auto) => sink.add_attribute("auto", if *auto { "1" } else { "0" }),
            Color::Unspecified => sink.add_attribute("auto", "1"),
        }
        sink.close_node();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xform::{XmlStreamWriter, parse_str};
    use proptest::prelude::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    fn render(color: &Color) -> String {
        let xform = ColorXform::default();
        let mut writer = XmlStreamWriter::new();
        assert!(xform.render(&mut writer, Some(color)));
        writer.into_string()
    }

    fn round_trip(color: &Color) -> Option<Color> {
        let xml = render(color);
        parse_str(&xml, &mut ColorXform::default()).unwrap()
    }

    #[test]
    fn test_render_priority() {
        assert_eq!(render(&Color::Argb("FF4F81BD".into())), r#"<color rgb="FF4F81BD"/>"#);
        assert_eq!(
            render(&Color::Theme { index: 1, tint: Some(-0.5) }),
            r#"<color theme="1" tint="-0.5"/>"#
        );
        assert_eq!(render(&Color::Theme { index: 0, tint: None }), r#"<color theme="0"/>"#);
        assert_eq!(render(&Color::Indexed(64)), r#"<color indexed="64"/>"#);
        assert_eq!(render(&Color::Auto(false)), r#"<color auto="0"/>"#);
        assert_eq!(render(&Color::Unspecified), r#"<color auto="1"/>"#);
    }

    #[test]
    fn test_render_none_writes_nothing() {
        let xform = ColorXform::new("fgColor");
        let mut writer = XmlStreamWriter::new();
        assert!(!xform.render(&mut writer, None));
        assert!(writer.as_str().is_empty());
    }

    #[test]
    fn test_parse_priority() {
        let color = Color::from_attributes(&attrs(&[("theme", "3"), ("rgb", "FF000000")]));
        assert_eq!(color, Some(Color::Argb("FF000000".into())));

        let color = Color::from_attributes(&attrs(&[("indexed", "8"), ("theme", "2")]));
        assert_eq!(color, Some(Color::Theme { index: 2, tint: None }));

        let color = Color::from_attributes(&attrs(&[("auto", "1"), ("indexed", "8")]));
        assert_eq!(color, Some(Color::Indexed(8)));
    }

    #[test]
    fn test_parse_auto_flag() {
        for (value, expected) in [("1", true), ("TRUE", true), ("true", true), ("0", false), ("False", false), ("", false)] {
            let color = Color::from_attributes(&attrs(&[("auto", value)]));
            assert_eq!(color, Some(Color::Auto(expected)), "auto={value:?}");
        }
    }

    #[test]
    fn test_parse_empty_values_count_as_absent() {
        assert_eq!(Color::from_attributes(&attrs(&[("rgb", "")])), None);
        assert_eq!(
            Color::from_attributes(&attrs(&[("theme", "5"), ("tint", "")])),
            Some(Color::Theme { index: 5, tint: None })
        );
        assert_eq!(Color::from_attributes(&Attributes::new()), None);
    }

    #[test]
    fn test_parse_malformed_numbers() {
        assert_eq!(
            Color::from_attributes(&attrs(&[("theme", "dark"), ("tint", "light")])),
            Some(Color::Theme { index: 0, tint: None })
        );
        assert_eq!(Color::from_attributes(&attrs(&[("indexed", "12abc")])), Some(Color::Indexed(12)));
    }

    #[test]
    fn test_open_clears_previous_model() {
        let mut xform = ColorXform::default();
        xform.open("color", &attrs(&[("rgb", "FFFF0000")]));
        assert_eq!(xform.close("color"), ParseStep::Completed);
        assert!(xform.model().is_some());

        xform.open("color", &Attributes::new());
        assert!(xform.model().is_none());
    }

    #[test]
    fn test_open_rejects_other_names() {
        let mut xform = ColorXform::new("tabColor");
        assert_eq!(xform.open("color", &attrs(&[("rgb", "FF00FF00")])), ParseStep::Rejected);
        assert!(xform.model().is_none());
    }

    #[test]
    fn test_unspecified_round_trips_to_auto() {
        assert_eq!(round_trip(&Color::Unspecified), Some(Color::Auto(true)));
    }

    #[test]
    fn test_round_trip_variants() {
        for color in [
            Color::Argb("FF1F497D".into()),
            Color::Theme { index: 4, tint: Some(0.799_981_688_894_314_3) },
            Color::Theme { index: 10, tint: None },
            Color::Indexed(81),
            Color::Auto(true),
            Color::Auto(false),
        ] {
            assert_eq!(round_trip(&color), Some(color.clone()));
        }
    }

    proptest! {
        #[test]
        fn prop_theme_color_round_trips(index in -1000i32..1000, tint in proptest::option::of(-1.0f64..1.0)) {
            let color = Color::Theme { index, tint };
            prop_assert_eq!(round_trip(&color), Some(color));
        }

        #[test]
        fn prop_argb_round_trips(argb in "[0-9A-F]{6,8}") {
            let color = Color::Argb(argb);
            prop_assert_eq!(round_trip(&color), Some(color));
        }
    }
}
