//! Push-event node transforms.
//!
//! A node transform ("xform") consumes the `open`/`text`/`close` notifications
//! of one XML element and its descendants, in document order, and builds a
//! typed model for it. Composite transforms hand whole child subtrees to
//! delegates instead of recursing, so every notification costs O(1) and no
//! document tree is ever materialized up front.
//!
//! # Architecture
//!
//! - [`NodeXform`]: the read half, implemented by every transform
//! - [`RenderXform`]: the write half, for transforms with a serialization path
//! - [`reader`]: drives a transform from a `quick-xml` tokenizer
//! - [`writer`]: the output sink used by [`RenderXform`]
//! - [`node`]: lossless capture of unmodeled subtrees
//! - [`color`]: the spreadsheet color leaf (`<color rgb=".."/>` and friends)
//!
//! # Example
//!
//! ```rust
//! use loquat::ooxml::xform::{Attributes, NodeXform, ParseStep, XmlNodeXform};
//!
//! let mut xform = XmlNodeXform::new("a:extLst");
//! assert_eq!(xform.open("a:extLst", &Attributes::new()), ParseStep::Accepted);
//! assert_eq!(xform.close("a:extLst"), ParseStep::Completed);
//! assert!(xform.model().unwrap().children.is_empty());
//! ```
mod attrs;
pub mod color;
pub mod node;
pub mod reader;
pub mod writer;

pub use attrs::Attributes;
pub use color::{Color, ColorXform};
pub use node::{XmlChild, XmlNode, XmlNodeXform};
pub use reader::{ReaderOptions, parse_reader, parse_str, parse_str_with};
pub use writer::{XmlSink, XmlStreamWriter};

/// Outcome of delivering one notification to a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStep {
    /// The notification was consumed (or deliberately ignored); keep routing.
    Accepted,
    /// The opening tag is not a valid root for this transform.
    Rejected,
    /// The transform's own root element closed; its model is final.
    Completed,
}

impl ParseStep {
    /// Whether the transform finished with this notification.
    #[inline]
    pub fn is_completed(self) -> bool {
        self == ParseStep::Completed
    }

    /// Whether the transform refused the opening tag.
    #[inline]
    pub fn is_rejected(self) -> bool {
        self == ParseStep::Rejected
    }
}

/// The read half of a node transform.
///
/// A transform is reusable: opening its root element again discards the
/// previous model and all transient state. One instance serves a single
/// in-flight parse at a time.
pub trait NodeXform {
    /// The model built by this transform.
    type Model;

    /// An element opened. `name` keeps its namespace prefix verbatim.
    fn open(&mut self, name: &str, attrs: &Attributes) -> ParseStep;

    /// A run of character data. Ignored by transforms without text content.
    fn text(&mut self, _text: &str) {}

    /// An element closed. Returns [`ParseStep::Completed`] exactly when the
    /// transform's own root closed.
    fn close(&mut self, name: &str) -> ParseStep;

    /// The model built so far, if the root has been opened.
    fn model(&self) -> Option<&Self::Model>;

    /// Move the model out, leaving the transform empty.
    fn take_model(&mut self) -> Option<Self::Model>;

    /// Discard the model and all transient parser state.
    fn reset(&mut self);
}

/// The write half of a node transform.
pub trait RenderXform: NodeXform {
    /// Emit `model` into `sink`. Writes nothing and returns `false` when
    /// there is no model.
    fn render<S: XmlSink + ?Sized>(&self, sink: &mut S, model: Option<&Self::Model>) -> bool;
}
