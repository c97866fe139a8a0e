/// DrawingML color scheme (`a:clrScheme`, CT_ColorScheme).
///
/// A color scheme has twelve fixed slots. Each slot holds one color choice
/// (`a:srgbClr`, `a:sysClr`, ...) followed by any number of color transforms
/// (`a:lumMod`, `a:tint`, ...), kept in document order.
use super::CLR_SCHEME_TAG;
use crate::ooxml::xform::{Attributes, NodeXform, ParseStep};
use phf::phf_map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use tracing::trace;

/// One of the twelve color scheme slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemeSlot {
    Dk1,
    Lt1,
    Dk2,
    Lt2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hlink,
    FolHlink,
}

static SLOT_TAGS: phf::Map<&'static str, SchemeSlot> = phf_map! {
    "a:dk1" => SchemeSlot::Dk1,
    "a:lt1" => SchemeSlot::Lt1,
    "a:dk2" => SchemeSlot::Dk2,
    "a:lt2" => SchemeSlot::Lt2,
    "a:accent1" => SchemeSlot::Accent1,
    "a:accent2" => SchemeSlot::Accent2,
    "a:accent3" => SchemeSlot::Accent3,
    "a:accent4" => SchemeSlot::Accent4,
    "a:accent5" => SchemeSlot::Accent5,
    "a:accent6" => SchemeSlot::Accent6,
    "a:hlink" => SchemeSlot::Hlink,
    "a:folHlink" => SchemeSlot::FolHlink,
};

impl SchemeSlot {
    /// All slots in schema order.
    pub const ALL: [SchemeSlot; 12] = [
        SchemeSlot::Dk1,
        SchemeSlot::Lt1,
        SchemeSlot::Dk2,
        SchemeSlot::Lt2,
        SchemeSlot::Accent1,
        SchemeSlot::Accent2,
        SchemeSlot::Accent3,
        SchemeSlot::Accent4,
        SchemeSlot::Accent5,
        SchemeSlot::Accent6,
        SchemeSlot::Hlink,
        SchemeSlot::FolHlink,
    ];

    /// Look up a slot by its prefixed element name (e.g. `a:accent1`).
    #[inline]
    pub fn from_tag(tag: &str) -> Option<Self> {
        SLOT_TAGS.get(tag).copied()
    }

    /// The unprefixed slot name (e.g. `accent1`).
    pub const fn name(self) -> &'static str {
        match self {
            SchemeSlot::Dk1 => "dk1",
            SchemeSlot::Lt1 => "lt1",
            SchemeSlot::Dk2 => "dk2",
            SchemeSlot::Lt2 => "lt2",
            SchemeSlot::Accent1 => "accent1",
            SchemeSlot::Accent2 => "accent2",
            SchemeSlot::Accent3 => "accent3",
            SchemeSlot::Accent4 => "accent4",
            SchemeSlot::Accent5 => "accent5",
            SchemeSlot::Accent6 => "accent6",
            SchemeSlot::Hlink => "hlink",
            SchemeSlot::FolHlink => "folHlink",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// The six ways a scheme color can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorChoiceKind {
    SysClr,
    SrgbClr,
    SchemeClr,
    PrstClr,
    ScrgbClr,
    HslClr,
}

static CHOICE_TAGS: phf::Map<&'static str, ColorChoiceKind> = phf_map! {
    "a:sysClr" => ColorChoiceKind::SysClr,
    "a:srgbClr" => ColorChoiceKind::SrgbClr,
    "a:schemeClr" => ColorChoiceKind::SchemeClr,
    "a:prstClr" => ColorChoiceKind::PrstClr,
    "a:scrgbClr" => ColorChoiceKind::ScrgbClr,
    "a:hslClr" => ColorChoiceKind::HslClr,
};

impl ColorChoiceKind {
    /// Look up a variant by its prefixed element name (e.g. `a:srgbClr`).
    #[inline]
    pub fn from_tag(tag: &str) -> Option<Self> {
        CHOICE_TAGS.get(tag).copied()
    }

    /// The unprefixed element name (e.g. `srgbClr`).
    pub const fn name(self) -> &'static str {
        match self {
            ColorChoiceKind::SysClr => "sysClr",
            ColorChoiceKind::SrgbClr => "srgbClr",
            ColorChoiceKind::SchemeClr => "schemeClr",
            ColorChoiceKind::PrstClr => "prstClr",
            ColorChoiceKind::ScrgbClr => "scrgbClr",
            ColorChoiceKind::HslClr => "hslClr",
        }
    }
}

/// A color modifier applied on top of a color choice, e.g. `a:lumMod val="75000"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTransform {
    /// Prefixed element name
    pub tag: String,
    pub attrs: Attributes,
}

/// The color held by one scheme slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChoice {
    pub kind: ColorChoiceKind,
    pub attrs: Attributes,
    /// Transforms in document order; often empty
    pub transforms: Vec<ColorTransform>,
}

impl ColorChoice {
    /// Create a choice without transforms.
    pub fn new(kind: ColorChoiceKind, attrs: Attributes) -> Self {
        Self {
            kind,
            attrs,
            transforms: Vec::new(),
        }
    }

    /// Best-known RGB hex value: `val` of an `srgbClr`, or the `lastClr`
    /// an application resolved for a `sysClr`.
    pub fn rgb(&self) -> Option<&str> {
        match self.kind {
            ColorChoiceKind::SrgbClr => self.attrs.get("val"),
            ColorChoiceKind::SysClr => self.attrs.get("lastClr"),
            _ => None,
        }
    }
}

/// A parsed `a:clrScheme`.
///
/// Serializes its colors as a map keyed by slot name (`dk1`, `accent1`, ...),
/// holding only the slots the scheme defines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: Option<String>,
    #[serde(serialize_with = "serialize_slots", deserialize_with = "deserialize_slots")]
    colors: [Option<ColorChoice>; 12],
}

fn serialize_slots<S: Serializer>(
    colors: &[Option<ColorChoice>; 12],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(
        SchemeSlot::ALL
            .into_iter()
            .zip(colors.iter())
            .filter_map(|(slot, choice)| choice.as_ref().map(|c| (slot, c))),
    )
}

fn deserialize_slots<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<[Option<ColorChoice>; 12], D::Error> {
    let map = HashMap::<SchemeSlot, ColorChoice>::deserialize(deserializer)?;
    let mut colors: [Option<ColorChoice>; 12] = Default::default();
    for (slot, choice) in map {
        colors[slot.index()] = Some(choice);
    }
    Ok(colors)
}

impl ColorScheme {
    /// Create an empty scheme.
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            colors: Default::default(),
        }
    }

    /// The color in `slot`, if the scheme defines it.
    #[inline]
    pub fn get(&self, slot: SchemeSlot) -> Option<&ColorChoice> {
        self.colors[slot.index()].as_ref()
    }

    /// Set the color of `slot`, returning the previous one.
    pub fn set(&mut self, slot: SchemeSlot, choice: ColorChoice) -> Option<ColorChoice> {
        self.colors[slot.index()].replace(choice)
    }

    fn get_mut(&mut self, slot: SchemeSlot) -> Option<&mut ColorChoice> {
        self.colors[slot.index()].as_mut()
    }

    /// Defined slots in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemeSlot, &ColorChoice)> {
        SchemeSlot::ALL
            .into_iter()
            .zip(self.colors.iter())
            .filter_map(|(slot, choice)| choice.as_ref().map(|c| (slot, c)))
    }

    /// Number of defined slots.
    pub fn len(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no slot is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClrState {
    /// Between slots
    Idle,
    /// Inside a slot, before its color choice
    Slot(SchemeSlot),
    /// Inside the color choice of a slot; nested elements are transforms.
    /// `depth` counts transform elements still open.
    Choice { slot: SchemeSlot, depth: usize },
}

/// Transform for `a:clrScheme`.
#[derive(Debug, Clone)]
pub struct ClrSchemeXform {
    model: Option<ColorScheme>,
    state: ClrState,
}

impl ClrSchemeXform {
    pub fn new() -> Self {
        Self {
            model: None,
            state: ClrState::Idle,
        }
    }
}

impl Default for ClrSchemeXform {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeXform for ClrSchemeXform {
    type Model = ColorScheme;

    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep {
        if name == CLR_SCHEME_TAG {
            self.reset();
            self.model = Some(ColorScheme::new(attrs.get("name").map(str::to_string)));
            return ParseStep::Accepted;
        }

        let Some(model) = self.model.as_mut() else {
            trace!(tag = name, "element outside a:clrScheme ignored");
            return ParseStep::Accepted;
        };

        match self.state {
            ClrState::Idle => match SchemeSlot::from_tag(name) {
                Some(slot) => self.state = ClrState::Slot(slot),
                None => trace!(tag = name, "unknown color scheme slot ignored"),
            },
            ClrState::Slot(slot) => match ColorChoiceKind::from_tag(name) {
                Some(kind) => {
                    model.set(slot, ColorChoice::new(kind, attrs.clone()));
                    self.state = ClrState::Choice { slot, depth: 0 };
                },
                None => trace!(tag = name, slot = slot.name(), "unknown color choice ignored"),
            },
            ClrState::Choice { slot, depth } => {
                if let Some(choice) = model.get_mut(slot) {
                    choice.transforms.push(ColorTransform {
                        tag: name.to_string(),
                        attrs: attrs.clone(),
                    });
                }
                self.state = ClrState::Choice {
                    slot,
                    depth: depth + 1,
                };
            },
        }
        ParseStep::Accepted
    }

    fn close(&mut self, name: &str) -> ParseStep {
        if name == CLR_SCHEME_TAG {
            return ParseStep::Completed;
        }

        match self.state {
            // A transform closed, even one named like a variant or a slot.
            ClrState::Choice { slot, depth } if depth > 0 => {
                self.state = ClrState::Choice {
                    slot,
                    depth: depth - 1,
                };
            },
            ClrState::Choice { slot, .. } => self.state = ClrState::Slot(slot),
            ClrState::Slot(_) | ClrState::Idle => {
                if SchemeSlot::from_tag(name).is_some() {
                    self.state = ClrState::Idle;
                }
            },
        }
        ParseStep::Accepted
    }

    fn model(&self) -> Option<&ColorScheme> {
        self.model.as_ref()
    }

    fn take_model(&mut self) -> Option<ColorScheme> {
        self.state = ClrState::Idle;
        self.model.take()
    }

    fn reset(&mut self) {
        self.model = None;
        self.state = ClrState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xform::parse_str;

    fn parse(xml: &str) -> ColorScheme {
        parse_str(xml, &mut ClrSchemeXform::new()).unwrap().unwrap()
    }

    #[test]
    fn test_srgb_slot() {
        let scheme = parse(
            r#"<a:clrScheme name="Office"><a:accent1><a:srgbClr val="4F81BD"/></a:accent1></a:clrScheme>"#,
        );
        assert_eq!(scheme.name.as_deref(), Some("Office"));

        let accent1 = scheme.get(SchemeSlot::Accent1).unwrap();
        let expected: Attributes = [("val", "4F81BD")].into_iter().collect();
        assert_eq!(
            *accent1,
            ColorChoice {
                kind: ColorChoiceKind::SrgbClr,
                attrs: expected,
                transforms: vec![],
            }
        );
        assert_eq!(accent1.rgb(), Some("4F81BD"));
        assert_eq!(scheme.len(), 1);
    }

    #[test]
    fn test_sys_color_and_transforms() {
        let scheme = parse(
            r#"<a:clrScheme name="Custom">
                <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
                <a:dk2>
                    <a:schemeClr val="tx2">
                        <a:lumMod val="75000"/>
                        <a:lumOff val="25000"/>
                    </a:schemeClr>
                </a:dk2>
            </a:clrScheme>"#,
        );

        let dk1 = scheme.get(SchemeSlot::Dk1).unwrap();
        assert_eq!(dk1.kind, ColorChoiceKind::SysClr);
        assert_eq!(dk1.rgb(), Some("000000"));

        let dk2 = scheme.get(SchemeSlot::Dk2).unwrap();
        assert_eq!(dk2.kind, ColorChoiceKind::SchemeClr);
        let tags: Vec<_> = dk2.transforms.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["a:lumMod", "a:lumOff"]);
        assert_eq!(dk2.transforms[0].attrs.get("val"), Some("75000"));
        assert_eq!(dk2.rgb(), None);
    }

    #[test]
    fn test_unknown_slot_is_not_recorded() {
        let scheme = parse(
            r#"<a:clrScheme><a:accent7><a:srgbClr val="FF0000"/></a:accent7><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1></a:clrScheme>"#,
        );
        assert_eq!(scheme.len(), 1);
        assert!(scheme.get(SchemeSlot::Lt1).unwrap().transforms.is_empty());
    }

    #[test]
    fn test_choice_outside_slot_is_ignored() {
        let scheme = parse(r#"<a:clrScheme><a:srgbClr val="FF0000"/></a:clrScheme>"#);
        assert!(scheme.is_empty());
    }

    #[test]
    fn test_transforms_do_not_leak_across_slots() {
        let scheme = parse(
            r#"<a:clrScheme>
                <a:accent1><a:srgbClr val="111111"><a:alpha val="50000"/></a:srgbClr></a:accent1>
                <a:accent2><a:srgbClr val="222222"/></a:accent2>
            </a:clrScheme>"#,
        );
        assert_eq!(scheme.get(SchemeSlot::Accent1).unwrap().transforms.len(), 1);
        assert!(scheme.get(SchemeSlot::Accent2).unwrap().transforms.is_empty());
    }

    #[test]
    fn test_nested_variant_and_slot_tags_are_transforms() {
        let scheme = parse(
            r#"<a:clrScheme>
                <a:accent1><a:srgbClr val="1"><a:srgbClr val="2"/><a:dk1/></a:srgbClr></a:accent1>
                <a:accent2><a:srgbClr val="3"/></a:accent2>
            </a:clrScheme>"#,
        );

        let accent1 = scheme.get(SchemeSlot::Accent1).unwrap();
        assert_eq!(accent1.kind, ColorChoiceKind::SrgbClr);
        assert_eq!(accent1.attrs.get("val"), Some("1"));
        let tags: Vec<_> = accent1.transforms.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["a:srgbClr", "a:dk1"]);
        assert_eq!(accent1.transforms[0].attrs.get("val"), Some("2"));

        assert!(scheme.get(SchemeSlot::Dk1).is_none());
        // The slot after the nested tags is routed normally.
        assert_eq!(scheme.get(SchemeSlot::Accent2).unwrap().rgb(), Some("3"));
        assert_eq!(scheme.len(), 2);
    }

    #[test]
    fn test_serializes_colors_by_slot_name() {
        let scheme = parse(
            r#"<a:clrScheme name="Office">
                <a:folHlink><a:srgbClr val="800080"/></a:folHlink>
                <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
            </a:clrScheme>"#,
        );

        let json = serde_json::to_value(&scheme).unwrap();
        let colors = json["colors"].as_object().unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["dk1"]["kind"], "sysClr");
        assert_eq!(colors["folHlink"]["kind"], "srgbClr");
        assert!(!colors.contains_key("accent1"));

        let back: ColorScheme = serde_json::from_value(json).unwrap();
        assert_eq!(back, scheme);
    }

    #[test]
    fn test_iter_in_schema_order() {
        let scheme = parse(
            r#"<a:clrScheme>
                <a:folHlink><a:srgbClr val="800080"/></a:folHlink>
                <a:dk1><a:srgbClr val="000000"/></a:dk1>
            </a:clrScheme>"#,
        );
        let slots: Vec<_> = scheme.iter().map(|(slot, _)| slot.name()).collect();
        assert_eq!(slots, vec!["dk1", "folHlink"]);
    }

    #[test]
    fn test_reopen_discards_previous_scheme() {
        let mut xform = ClrSchemeXform::new();
        let first = parse_str(
            r#"<a:clrScheme name="A"><a:dk1><a:srgbClr val="000000"/></a:dk1></a:clrScheme>"#,
            &mut xform,
        )
        .unwrap()
        .unwrap();
        assert_eq!(first.len(), 1);

        let second = parse_str(r#"<a:clrScheme name="B"/>"#, &mut xform).unwrap().unwrap();
        assert_eq!(second.name.as_deref(), Some("B"));
        assert!(second.is_empty());
    }

    #[test]
    fn test_tag_lookup() {
        assert_eq!(SchemeSlot::from_tag("a:folHlink"), Some(SchemeSlot::FolHlink));
        assert_eq!(SchemeSlot::from_tag("folHlink"), None);
        assert_eq!(ColorChoiceKind::from_tag("a:prstClr"), Some(ColorChoiceKind::PrstClr));
        for slot in SchemeSlot::ALL {
            assert_eq!(SchemeSlot::from_tag(&format!("a:{}", slot.name())), Some(slot));
        }
    }
}
