//! Lossless capture of XML subtrees whose semantics are not modeled.
//!
//! Theme parts carry large blocks (`a:fmtScheme`, `a:objectDefaults`,
//! extension lists) that this crate does not interpret. They are captured as
//! plain [`XmlNode`] trees so the surrounding system can write them back
//! unchanged.
use super::writer::XmlSink;
use super::{Attributes, NodeXform, ParseStep, RenderXform};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A captured element: prefixed tag, attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNode {
    /// Fully prefixed element name, e.g. `a:fmtScheme`
    pub tag: String,
    /// Attributes in document order
    pub attrs: Attributes,
    /// Child elements and text runs in document order
    pub children: Vec<XmlChild>,
}

/// A child of a captured element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
}

impl XmlNode {
    /// Create a node without children.
    pub fn new(tag: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children: Vec::new(),
        }
    }

    /// Child elements, skipping text runs.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) => None,
        })
    }

    /// Find the first element named `tag` in document order, including
    /// this node itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loquat::ooxml::xform::{Attributes, XmlChild, XmlNode};
    ///
    /// let mut defaults = XmlNode::new("a:objectDefaults", Attributes::new());
    /// defaults
    ///     .children
    ///     .push(XmlChild::Element(XmlNode::new("a:spDef", Attributes::new())));
    /// assert!(defaults.find("a:spDef").is_some());
    /// assert!(defaults.find("a:lnDef").is_none());
    /// ```
    pub fn find(&self, tag: &str) -> Option<&XmlNode> {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.tag == tag {
                return Some(node);
            }
            // Reverse so the leftmost child is visited first.
            pending.extend(node.elements().collect::<Vec<_>>().into_iter().rev());
        }
        None
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlChild::Text(text) => Some(text.as_str()),
                XmlChild::Element(_) => None,
            })
            .collect()
    }

    /// Append a text run, merging with a trailing text child.
    fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(XmlChild::Text(last)) => last.push_str(text),
            _ => self.children.push(XmlChild::Text(text.to_string())),
        }
    }

    /// Serialize this subtree into `sink`.
    ///
    /// Walks the tree with an explicit stack, so arbitrarily deep captures
    /// do not grow the call stack.
    pub fn write_to<S: XmlSink + ?Sized>(&self, sink: &mut S) {
        open_element(sink, self);
        let mut stack = vec![self.children.iter()];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                Some(XmlChild::Element(child)) => {
                    open_element(sink, child);
                    stack.push(child.children.iter());
                },
                Some(XmlChild::Text(text)) => sink.add_text(text),
                None => {
                    stack.pop();
                    sink.close_node();
                },
            }
        }
    }
}

fn open_element<S: XmlSink + ?Sized>(sink: &mut S, node: &XmlNode) {
    sink.open_node(&node.tag);
    for (name, value) in node.attrs.iter() {
        sink.add_attribute(name, value);
    }
}

#[inline]
fn is_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Generic subtree capture rooted at a fixed tag.
///
/// In-progress elements live on an explicit stack; an element is attached to
/// its parent when it closes. Close tags that do not match the innermost open
/// element are tolerated and leave the stack untouched.
#[derive(Debug, Clone)]
pub struct XmlNodeXform {
    root_tag: String,
    stack: Vec<XmlNode>,
    model: Option<XmlNode>,
}

impl XmlNodeXform {
    /// Create a capture that only accepts `root_tag` as its root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            root_tag: root_tag.into(),
            stack: Vec::new(),
            model: None,
        }
    }

    /// The expected root element name.
    #[inline]
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    /// Number of elements currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl NodeXform for XmlNodeXform {
    type Model = XmlNode;

    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep {
        if self.stack.is_empty() {
            if name != self.root_tag {
                trace!(expected = %self.root_tag, found = name, "capture root rejected");
                return ParseStep::Rejected;
            }
            self.model = None;
        }
        self.stack.push(XmlNode::new(name, attrs.clone()));
        ParseStep::Accepted
    }

    fn text(&mut self, text: &str) {
        if is_whitespace(text) {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.push_text(text);
        }
    }

    fn close(&mut self, name: &str) -> ParseStep {
        if self.stack.is_empty() {
            return ParseStep::Accepted;
        }

        let top_matches = self.stack.last().is_some_and(|top| top.tag == name);
        if top_matches {
            if let Some(node) = self.stack.pop() {
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(XmlChild::Element(node)),
                    None => self.model = Some(node),
                }
            }
        } else {
            trace!(
                open = self.stack.last().map(|node| node.tag.as_str()),
                close = name,
                "mismatched close tag left the capture stack untouched"
            );
        }

        if name == self.root_tag && self.stack.is_empty() {
            ParseStep::Completed
        } else {
            ParseStep::Accepted
        }
    }

    /// The captured tree. Only available once the root element closed; use
    /// [`NodeXform::take_model`] to recover a partially fed capture.
    fn model(&self) -> Option<&XmlNode> {
        self.model.as_ref()
    }

    fn take_model(&mut self) -> Option<XmlNode> {
        if let Some(model) = self.model.take() {
            return Some(model);
        }
        // Fold the unfinished elements into their parents.
        while let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(XmlChild::Element(node)),
                None => return Some(node),
            }
        }
        None
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.model = None;
    }
}

impl RenderXform for XmlNodeXform {
    fn render<S: XmlSink + ?Sized>(&self, sink: &mut S, model: Option<&XmlNode>) -> bool {
        match model {
            Some(node) => {
                node.write_to(sink);
                true
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xform::XmlStreamWriter;
    use proptest::prelude::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_rejects_foreign_root() {
        let mut xform = XmlNodeXform::new("a:fmtScheme");
        assert_eq!(xform.open("a:clrScheme", &Attributes::new()), ParseStep::Rejected);
        assert!(xform.model().is_none());
        assert_eq!(xform.depth(), 0);
    }

    #[test]
    fn test_empty_root() {
        let mut xform = XmlNodeXform::new("a:extLst");
        assert_eq!(xform.open("a:extLst", &Attributes::new()), ParseStep::Accepted);
        assert_eq!(xform.close("a:extLst"), ParseStep::Completed);

        let model = xform.model().unwrap();
        assert_eq!(model.tag, "a:extLst");
        assert!(model.children.is_empty());
    }

    #[test]
    fn test_nested_capture_keeps_order() {
        let mut xform = XmlNodeXform::new("a:objectDefaults");
        xform.open("a:objectDefaults", &Attributes::new());
        xform.open("a:spDef", &Attributes::new());
        xform.open("a:spPr", &Attributes::new());
        assert_eq!(xform.close("a:spPr"), ParseStep::Accepted);
        xform.open("a:bodyPr", &attrs(&[("rtlCol", "0"), ("anchor", "ctr")]));
        xform.close("a:bodyPr");
        xform.close("a:spDef");
        xform.open("a:lnDef", &Attributes::new());
        xform.close("a:lnDef");
        assert_eq!(xform.close("a:objectDefaults"), ParseStep::Completed);

        let model = xform.model().unwrap();
        let tags: Vec<_> = model.elements().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["a:spDef", "a:lnDef"]);

        let sp_def = model.find("a:spDef").unwrap();
        let inner: Vec<_> = sp_def.elements().map(|n| n.tag.as_str()).collect();
        assert_eq!(inner, vec!["a:spPr", "a:bodyPr"]);

        let body = model.find("a:bodyPr").unwrap();
        assert_eq!(body.attrs.get("anchor"), Some("ctr"));
        let names: Vec<_> = body.attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["rtlCol", "anchor"]);
    }

    #[test]
    fn test_whitespace_dropped_and_text_merged() {
        let mut xform = XmlNodeXform::new("x:root");
        xform.open("x:root", &Attributes::new());
        xform.text("\n  ");
        xform.open("x:a", &Attributes::new());
        xform.close("x:a");
        xform.text("\t\n");
        xform.text("Hello, ");
        xform.text("world");
        xform.close("x:root");

        let model = xform.model().unwrap();
        assert_eq!(model.children.len(), 2);
        assert_eq!(model.children[1], XmlChild::Text("Hello, world".to_string()));
        assert_eq!(model.text(), "Hello, world");
    }

    #[test]
    fn test_text_after_element_starts_new_run() {
        let mut xform = XmlNodeXform::new("r");
        xform.open("r", &Attributes::new());
        xform.text("a");
        xform.open("b", &Attributes::new());
        xform.close("b");
        xform.text("c");
        xform.close("r");

        let children = &xform.model().unwrap().children;
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], XmlChild::Text("a".to_string()));
        assert_eq!(children[2], XmlChild::Text("c".to_string()));
    }

    #[test]
    fn test_mismatched_close_is_tolerated() {
        let mut xform = XmlNodeXform::new("a:extLst");
        xform.open("a:extLst", &Attributes::new());
        xform.open("a:ext", &Attributes::new());
        assert_eq!(xform.close("a:bogus"), ParseStep::Accepted);
        assert_eq!(xform.depth(), 2);
        // Root name closing while children are still open does not complete.
        assert_eq!(xform.close("a:extLst"), ParseStep::Accepted);
        assert_eq!(xform.depth(), 2);
        xform.close("a:ext");
        assert_eq!(xform.close("a:extLst"), ParseStep::Completed);
        assert_eq!(xform.model().unwrap().elements().count(), 1);
    }

    #[test]
    fn test_same_name_nesting() {
        let mut xform = XmlNodeXform::new("a:extLst");
        xform.open("a:extLst", &Attributes::new());
        xform.open("a:extLst", &Attributes::new());
        assert_eq!(xform.close("a:extLst"), ParseStep::Accepted);
        assert_eq!(xform.close("a:extLst"), ParseStep::Completed);
        let model = xform.model().unwrap();
        assert_eq!(model.elements().next().unwrap().tag, "a:extLst");
    }

    #[test]
    fn test_partial_capture_folds_open_nodes() {
        let mut xform = XmlNodeXform::new("a:fmtScheme");
        xform.open("a:fmtScheme", &attrs(&[("name", "Office")]));
        xform.open("a:fillStyleLst", &Attributes::new());
        xform.open("a:solidFill", &Attributes::new());
        assert!(xform.model().is_none());

        let partial = xform.take_model().unwrap();
        assert_eq!(partial.tag, "a:fmtScheme");
        assert!(partial.find("a:solidFill").is_some());
        assert!(xform.take_model().is_none());
    }

    #[test]
    fn test_reopen_resets() {
        let mut xform = XmlNodeXform::new("a:extLst");
        xform.open("a:extLst", &Attributes::new());
        xform.open("a:ext", &Attributes::new());
        xform.close("a:ext");
        xform.close("a:extLst");

        xform.open("a:extLst", &Attributes::new());
        xform.close("a:extLst");
        assert!(xform.model().unwrap().children.is_empty());
    }

    #[test]
    fn test_render_replays_capture() {
        let mut xform = XmlNodeXform::new("a:extLst");
        xform.open("a:extLst", &Attributes::new());
        xform.open("a:ext", &attrs(&[("uri", "{05A4C25C-085E-4340-85A3-A5531E510DB2}")]));
        xform.open("thm15:themeFamily", &attrs(&[("name", "Office Theme")]));
        xform.close("thm15:themeFamily");
        xform.close("a:ext");
        xform.close("a:extLst");

        let mut writer = XmlStreamWriter::new();
        assert!(xform.render(&mut writer, xform.model()));
        assert_eq!(
            writer.as_str(),
            r#"<a:extLst><a:ext uri="{05A4C25C-085E-4340-85A3-A5531E510DB2}"><thm15:themeFamily name="Office Theme"/></a:ext></a:extLst>"#
        );

        let mut empty = XmlStreamWriter::new();
        assert!(!xform.render(&mut empty, None));
        assert!(empty.as_str().is_empty());
    }

    proptest! {
        #[test]
        fn prop_text_runs_merge_in_order(chunks in proptest::collection::vec("[a-z][a-z ]{0,5}", 1..8)) {
            let mut xform = XmlNodeXform::new("t");
            xform.open("t", &Attributes::new());
            for chunk in &chunks {
                xform.text(chunk);
            }
            xform.close("t");

            let model = xform.model().unwrap();
            prop_assert_eq!(model.children.len(), 1);
            prop_assert_eq!(model.text(), chunks.concat());
        }
    }
}
