use crate::document::Document;
use crate::error::Result;
use crate::node::NodeId;
use crate::value::AttrValue;

/// A path through the tree that may not exist yet.
///
/// `anchor` is the deepest committed node the path was resolved through and
/// `pending` holds the names below it that were not committed at the time.
/// A cursor with no pending names addresses `anchor` itself. Cursors are
/// plain values: resolving them never touches the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    anchor: NodeId,
    pending: Vec<String>,
}

impl Cursor {
    pub(crate) fn at(anchor: NodeId) -> Self {
        Self {
            anchor,
            pending: Vec::new(),
        }
    }

    pub(crate) fn descend(mut self, name: &str) -> Self {
        self.pending.push(name.to_string());
        self
    }

    pub fn anchor(&self) -> NodeId {
        self.anchor
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Whether the cursor addresses an already committed node
    pub fn is_committed(&self) -> bool {
        self.pending.is_empty()
    }

    /// The committed node addressed by this cursor, if any
    pub fn target(&self) -> Option<NodeId> {
        self.is_committed().then_some(self.anchor)
    }
}

/// Fluent builder borrowing a document for one access chain.
///
/// ```
/// use xmlchain::{attrs, Document};
///
/// # fn main() -> xmlchain::Result<()> {
/// let mut doc = Document::new("root");
/// doc.build().child("a").child("b").commit(attrs! { "x" => 1 })?;
/// assert_eq!(doc.to_xml()?, "<root>\n  <a>\n    <b x=\"1\"/>\n  </a>\n</root>");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Chain<'d> {
    document: &'d mut Document,
    cursor: Cursor,
}

impl<'d> Chain<'d> {
    pub(crate) fn new(document: &'d mut Document, cursor: Cursor) -> Self {
        Self { document, cursor }
    }

    #[must_use]
    pub fn child(mut self, name: &str) -> Self {
        self.cursor = self.document.child(&self.cursor, name);
        self
    }

    pub fn commit<I, K, V>(self, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.document.commit(&self.cursor, attributes)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn into_cursor(self) -> Cursor {
        self.cursor
    }
}
