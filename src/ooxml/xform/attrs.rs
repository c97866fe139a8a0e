//! Ordered attribute maps.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Attributes of a single element, in document order.
///
/// Values are kept as the raw (unescaped) strings delivered by the tokenizer;
/// no type coercion happens here. Most DrawingML elements carry one or two
/// attributes, so the pairs live inline until a fifth one shows up.
///
/// # Examples
///
/// ```
/// use loquat::ooxml::xform::Attributes;
///
/// let attrs: Attributes = [("typeface", "Cambria"), ("panose", "02040503050406030204")]
///     .into_iter()
///     .collect();
/// assert_eq!(attrs.get("typeface"), Some("Cambria"));
/// assert_eq!(attrs.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(SmallVec<[(String, String); 4]>);

impl Attributes {
    /// Create an empty attribute map.
    #[inline]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Get the value of the attribute `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute `name` is present (even with an empty value).
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set an attribute, replacing an existing value in place so the
    /// original position is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}
