/// DrawingML font scheme (`a:fontScheme`, CT_FontScheme).
///
/// The scheme has a major (headings) and a minor (body) collection. Each
/// collection names fonts for three fixed roles and may add per-script
/// overrides through repeated `a:font` elements.
use super::FONT_SCHEME_TAG;
use crate::ooxml::xform::{Attributes, NodeXform, ParseStep};
use serde::{Deserialize, Serialize};
use tracing::trace;

const MAJOR_FONT_TAG: &str = "a:majorFont";
const MINOR_FONT_TAG: &str = "a:minorFont";
const FONT_TAG: &str = "a:font";

/// The fixed font roles of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Latin text (`a:latin`)
    Latin,
    /// East Asian text (`a:ea`)
    EastAsian,
    /// Complex script text (`a:cs`)
    ComplexScript,
}

impl FontRole {
    /// Look up a role by its prefixed element name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "a:latin" => Some(FontRole::Latin),
            "a:ea" => Some(FontRole::EastAsian),
            "a:cs" => Some(FontRole::ComplexScript),
            _ => None,
        }
    }
}

/// A per-script font override (`<a:font script="Jpan" typeface="..."/>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFont {
    pub script: Option<String>,
    pub typeface: Option<String>,
}

/// A major or minor font collection.
///
/// Role entries keep every attribute of their element (`typeface`, `panose`,
/// `pitchFamily`, `charset`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCollection {
    pub latin: Option<Attributes>,
    pub ea: Option<Attributes>,
    pub cs: Option<Attributes>,
    /// Per-script overrides in document order
    pub fonts: Vec<ScriptFont>,
}

impl FontCollection {
    /// Attributes of the font reference for `role`.
    pub fn role(&self, role: FontRole) -> Option<&Attributes> {
        match role {
            FontRole::Latin => self.latin.as_ref(),
            FontRole::EastAsian => self.ea.as_ref(),
            FontRole::ComplexScript => self.cs.as_ref(),
        }
    }

    fn role_mut(&mut self, role: FontRole) -> &mut Option<Attributes> {
        match role {
            FontRole::Latin => &mut self.latin,
            FontRole::EastAsian => &mut self.ea,
            FontRole::ComplexScript => &mut self.cs,
        }
    }

    /// Typeface of the font reference for `role`.
    #[inline]
    pub fn typeface(&self, role: FontRole) -> Option<&str> {
        self.role(role).and_then(|attrs| attrs.get("typeface"))
    }

    /// Typeface of the first override for `script` (e.g. `Jpan`, `Arab`).
    pub fn script_typeface(&self, script: &str) -> Option<&str> {
        self.fonts
            .iter()
            .find(|font| font.script.as_deref() == Some(script))
            .and_then(|font| font.typeface.as_deref())
    }
}

/// A parsed `a:fontScheme`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontScheme {
    pub name: Option<String>,
    pub major_font: FontCollection,
    pub minor_font: FontCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Major,
    Minor,
}

/// Transform for `a:fontScheme`.
#[derive(Debug, Clone, Default)]
pub struct FontSchemeXform {
    model: Option<FontScheme>,
    active: Option<Collection>,
}

impl FontSchemeXform {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_collection(&mut self) -> Option<&mut FontCollection> {
        let model = self.model.as_mut()?;
        match self.active? {
            Collection::Major => Some(&mut model.major_font),
            Collection::Minor => Some(&mut model.minor_font),
        }
    }
}

impl NodeXform for FontSchemeXform {
    type Model = FontScheme;

    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep {
        match name {
            FONT_SCHEME_TAG => {
                self.reset();
                self.model = Some(FontScheme {
                    name: attrs.get("name").map(str::to_string),
                    ..FontScheme::default()
                });
            },
            MAJOR_FONT_TAG | MINOR_FONT_TAG => {
                let collection = if name == MAJOR_FONT_TAG {
                    Collection::Major
                } else {
                    Collection::Minor
                };
                self.active = Some(collection);
                if let Some(target) = self.active_collection() {
                    *target = FontCollection::default();
                }
            },
            FONT_TAG => {
                if let Some(collection) = self.active_collection() {
                    collection.fonts.push(ScriptFont {
                        script: attrs.get("script").map(str::to_string),
                        typeface: attrs.get("typeface").map(str::to_string),
                    });
                }
            },
            _ => match FontRole::from_tag(name) {
                Some(role) => {
                    if let Some(collection) = self.active_collection() {
                        *collection.role_mut(role) = Some(attrs.clone());
                    }
                },
                None => trace!(tag = name, "font scheme element ignored"),
            },
        }
        ParseStep::Accepted
    }

    fn close(&mut self, name: &str) -> ParseStep {
        match name {
            FONT_SCHEME_TAG => ParseStep::Completed,
            MAJOR_FONT_TAG | MINOR_FONT_TAG => {
                self.active = None;
                ParseStep::Accepted
            },
            _ => ParseStep::Accepted,
        }
    }

    fn model(&self) -> Option<&FontScheme> {
        self.model.as_ref()
    }

    fn take_model(&mut self) -> Option<FontScheme> {
        self.active = None;
        self.model.take()
    }

    fn reset(&mut self) {
        self.model = None;
        self.active = None;
    }
}
