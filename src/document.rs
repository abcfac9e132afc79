//! Arena-backed document tree
//!
//! A [`Document`] owns every committed node. Paths are described by
//! [`Cursor`]s and only become nodes when committed: committing attaches the
//! missing part of the path, reuses ancestors that already exist, and always
//! creates a fresh node for the invoked level.

use std::fmt;

use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::cursor::{Chain, Cursor};
use crate::error::{Error, Result};
use crate::markup::{strip_declaration, Element, FormatConfig, Formatter, XmlFormatter};
use crate::node::{Node, NodeId};
use crate::value::{AttrValue, Attributes};

/// Where a commit lands, computed before anything is mutated
#[derive(Debug)]
struct Plan {
    parent: NodeId,
    missing: Vec<String>,
    leaf: String,
    leaf_depth: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    config: BuilderConfig,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, BuilderConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: BuilderConfig) -> Self {
        Self::from_root(name, Attributes::new(), config)
    }

    /// Create a document whose root carries the given attributes.
    ///
    /// The root name and attribute keys are not checked; use
    /// [`Document::try_with_attributes`] to apply a [`BuilderConfig`].
    pub fn with_attributes<I, K, V>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        Self::from_root(name, collect_attributes(attributes), BuilderConfig::default())
    }

    /// Create a document with an attributed root, validated against `config`
    pub fn try_with_attributes<I, K, V>(
        name: impl Into<String>,
        attributes: I,
        config: BuilderConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let name = name.into();
        let attributes = collect_attributes(attributes);
        config.validate_name(&name)?;
        config.validate_attribute_count(attributes.len())?;
        for key in attributes.keys() {
            config.validate_name(key)?;
        }
        Ok(Self::from_root(name, attributes, config))
    }

    fn from_root(
        name: impl Into<String>,
        attributes: Attributes,
        config: BuilderConfig,
    ) -> Self {
        Self {
            nodes: vec![Node::new(name, attributes, None, 0)],
            config,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    // The arena is created with its root and never shrinks.
    #[allow(clippy::indexing_slicing)]
    pub fn root_node(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Number of committed nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All committed nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    pub fn root(&self) -> Cursor {
        Cursor::at(NodeId::ROOT)
    }

    /// Resolve `name` below `cursor`.
    ///
    /// Returns the most recently committed child with that name when the
    /// cursor addresses a committed node that has one; otherwise the cursor
    /// is extended with a pending segment. The document is never modified.
    pub fn child(&self, cursor: &Cursor, name: &str) -> Cursor {
        if let Some(existing) = cursor
            .target()
            .and_then(|id| self.node(id))
            .and_then(|node| node.child_by_name(name))
        {
            return Cursor::at(existing);
        }
        cursor.clone().descend(name)
    }

    /// Resolve a dotted path such as `"book.author"` from the root.
    ///
    /// An empty path addresses the root. Names containing `.` can only be
    /// reached through [`Document::child`].
    pub fn path(&self, path: &str) -> Cursor {
        if path.is_empty() {
            return self.root();
        }
        path.split('.')
            .fold(self.root(), |cursor, name| self.child(&cursor, name))
    }

    /// Start a fluent access chain at the root
    pub fn build(&mut self) -> Chain<'_> {
        let root = self.root();
        Chain::new(self, root)
    }

    /// Start a fluent access chain at a dotted path
    pub fn at(&mut self, path: &str) -> Chain<'_> {
        let cursor = self.path(path);
        Chain::new(self, cursor)
    }

    /// Commit `cursor` with the given attributes.
    ///
    /// Missing intermediate segments are attached once each, already
    /// committed ancestors are reused, and the invoked level is always a new
    /// node, so committing the same path twice yields two siblings.
    /// Committing the root cursor has no effect on the tree. On error the
    /// tree is left unchanged.
    pub fn commit<I, K, V>(&mut self, cursor: &Cursor, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let attributes = collect_attributes(attributes);
        self.validate_attributes(&attributes)?;

        let Some(plan) = self.plan(cursor)? else {
            warn!(
                "commit on root '{}' has no parent to attach to; ignoring",
                self.root_node().name()
            );
            return Ok(());
        };
        self.config.validate_depth(plan.leaf_depth)?;

        self.apply(plan, attributes)?;
        Ok(())
    }

    /// Commit a copy of `subtree` as a child of the node `cursor` addresses.
    ///
    /// The subtree root is committed like [`Document::commit`] with its own
    /// name and attributes, materializing `cursor` if needed; its
    /// descendants follow in order.
    pub fn graft(&mut self, cursor: &Cursor, subtree: &Self) -> Result<()> {
        for (_, node) in subtree.nodes() {
            self.config.validate_name(node.name())?;
            self.validate_attributes(node.attributes())?;
        }

        let source_root = subtree.root_node();
        let target = self.child(cursor, source_root.name());
        let Some(plan) = self.plan(&target)? else {
            return Ok(());
        };
        let height = subtree
            .nodes()
            .map(|(_, node)| node.depth())
            .max()
            .unwrap_or(0);
        self.config.validate_depth(plan.leaf_depth + height)?;

        let target = self.apply(plan, source_root.attributes().clone())?;

        let mut stack = vec![(NodeId::ROOT, target)];
        while let Some((source, dest)) = stack.pop() {
            let source_node = subtree
                .node(source)
                .ok_or_else(|| Error::unknown_node(source.index()))?;
            for &child in source_node.children() {
                let child_node = subtree
                    .node(child)
                    .ok_or_else(|| Error::unknown_node(child.index()))?;
                let copied =
                    self.attach(dest, child_node.name(), child_node.attributes().clone())?;
                stack.push((child, copied));
            }
        }

        debug!("grafted {} nodes under {}", subtree.node_count(), target);
        Ok(())
    }

    /// Convert the subtree at `id` into markup elements
    pub fn to_element(&self, id: NodeId) -> Result<Element> {
        let node = self.node(id).ok_or_else(|| Error::unknown_node(id.index()))?;

        let mut element = Element::new(node.name());
        for (key, value) in node.attributes() {
            element.set_attribute(key.as_str(), value.to_string());
        }
        for &child in node.children() {
            element.append_child(self.to_element(child)?);
        }
        Ok(element)
    }

    /// Serialize the subtree rooted at `id`
    pub fn node_to_xml(&self, id: NodeId, config: &FormatConfig) -> Result<String> {
        let element = self.to_element(id)?;
        let text = XmlFormatter.format(&element, config)?;
        debug!("serialized {} bytes from {}", text.len(), id);
        Ok(strip_declaration(&text).to_string())
    }

    pub fn to_xml_with(&self, config: &FormatConfig) -> Result<String> {
        self.node_to_xml(NodeId::ROOT, config)
    }

    /// Serialize the whole tree with two-space indentation
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&FormatConfig::default())
    }

    fn node_or_err(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or_else(|| Error::unknown_node(id.index()))
    }

    fn validate_attributes(&self, attributes: &Attributes) -> Result<()> {
        self.config.validate_attribute_count(attributes.len())?;
        for key in attributes.keys() {
            self.config.validate_name(key)?;
        }
        Ok(())
    }

    /// Work out where a commit attaches. `None` means the cursor addresses
    /// the root, which has nowhere to attach.
    fn plan(&self, cursor: &Cursor) -> Result<Option<Plan>> {
        let anchor = self.node_or_err(cursor.anchor())?;

        let Some((leaf, intermediates)) = cursor.pending().split_last() else {
            let Some(parent) = anchor.parent() else {
                return Ok(None);
            };
            self.config.validate_name(anchor.name())?;
            return Ok(Some(Plan {
                parent,
                missing: Vec::new(),
                leaf: anchor.name().to_string(),
                leaf_depth: anchor.depth(),
            }));
        };

        // Segments committed since the cursor was resolved are reused too.
        let mut parent = cursor.anchor();
        let mut reused = 0;
        for name in intermediates {
            match self.node_or_err(parent)?.child_by_name(name) {
                Some(existing) => {
                    parent = existing;
                    reused += 1;
                }
                None => break,
            }
        }

        let missing: Vec<String> = intermediates.iter().skip(reused).cloned().collect();
        for name in missing.iter().chain(std::iter::once(leaf)) {
            self.config.validate_name(name)?;
        }

        let leaf_depth = self.node_or_err(parent)?.depth() + missing.len() + 1;
        Ok(Some(Plan {
            parent,
            missing,
            leaf: leaf.clone(),
            leaf_depth,
        }))
    }

    fn apply(&mut self, plan: Plan, attributes: Attributes) -> Result<NodeId> {
        let mut parent = plan.parent;
        for name in &plan.missing {
            parent = self.attach(parent, name, Attributes::new())?;
        }
        self.attach(parent, &plan.leaf, attributes)
    }

    /// Append a new node under `parent`, updating the child list and the
    /// name lookup together.
    fn attach(&mut self, parent: NodeId, name: &str, attributes: Attributes) -> Result<NodeId> {
        let id = NodeId::new(self.nodes.len());
        let parent_node = self
            .nodes
            .get_mut(parent.index())
            .ok_or_else(|| Error::unknown_node(parent.index()))?;
        let depth = parent_node.depth() + 1;
        parent_node.push_child(id, name);

        self.nodes.push(Node::new(name, attributes, Some(parent), depth));
        debug!("attached <{}> {} under {}", name, id, parent);
        Ok(id)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

fn collect_attributes<I, K, V>(attributes: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttrValue>,
{
    attributes
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::error::ErrorKind;

    #[test]
    fn test_child_resolution_is_lazy() {
        let doc = Document::new("root");
        let cursor = doc.path("a.b");
        assert_eq!(cursor.anchor(), NodeId::ROOT);
        assert_eq!(cursor.pending(), ["a", "b"]);
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_child_resolution_finds_committed() {
        let mut doc = Document::new("root");
        doc.commit(&doc.path("a"), attrs!()).unwrap();

        let cursor = doc.path("a");
        assert!(cursor.is_committed());
        let id = cursor.target().unwrap();
        assert_eq!(doc.node(id).unwrap().name(), "a");
    }

    #[test]
    fn test_commit_attaches_missing_ancestors_once() {
        let mut doc = Document::new("root");
        doc.commit(&doc.path("a.b.c"), attrs! { "x" => 1 }).unwrap();
        doc.commit(&doc.path("a.b.c"), attrs! { "x" => 2 }).unwrap();

        let root = doc.root_node();
        assert_eq!(root.children().len(), 1);
        let a = doc.node(root.children()[0]).unwrap();
        assert_eq!(a.children().len(), 1);
        let b = doc.node(a.children()[0]).unwrap();
        assert_eq!(b.name(), "b");
        assert_eq!(b.children().len(), 2);
        assert_eq!(b.depth(), 2);
    }

    #[test]
    fn test_stale_cursor_reuses_ancestors() {
        let mut doc = Document::new("root");
        let cursor = doc.path("a.b");
        doc.commit(&cursor, attrs! { "n" => 1 }).unwrap();
        doc.commit(&cursor, attrs! { "n" => 2 }).unwrap();

        assert_eq!(doc.root_node().children().len(), 1);
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn test_committed_cursor_creates_sibling() {
        let mut doc = Document::new("root");
        doc.commit(&doc.path("a"), attrs! { "n" => 1 }).unwrap();
        let first = doc.path("a");
        doc.commit(&first, attrs! { "n" => 2 }).unwrap();

        let root = doc.root_node();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.child_by_name("a"), Some(root.children()[1]));
    }

    #[test]
    fn test_root_commit_is_noop() {
        let mut doc = Document::new("root");
        let before = doc.clone();
        doc.commit(&doc.root(), attrs! { "x" => 1 }).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_failed_commit_leaves_tree_unchanged() {
        let mut doc = Document::new("root");
        let before = doc.clone();
        let err = doc.commit(&doc.path("a.1b.c"), attrs!()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidName {
                name: "1b".to_string()
            }
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_unknown_anchor() {
        let mut big = Document::new("big");
        big.commit(&big.path("a.b"), attrs!()).unwrap();
        let foreign = big.path("a.b");

        let mut small = Document::new("small");
        let err = small.commit(&foreign, attrs!()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownNode { .. }));
    }

    #[test]
    fn test_graft_copies_subtree_in_order() {
        let mut part = Document::new("book");
        part.commit(&part.path("author"), attrs! { "name" => "A" }).unwrap();
        part.commit(&part.path("author"), attrs! { "name" => "B" }).unwrap();

        let mut doc = Document::new("books");
        doc.graft(&doc.path("shelf"), &part).unwrap();

        assert_eq!(
            doc.to_xml().unwrap(),
            "<books>\n  <shelf>\n    <book>\n      <author name=\"A\"/>\n      <author name=\"B\"/>\n    </book>\n  </shelf>\n</books>"
        );
    }

    #[test]
    fn test_graft_at_root() {
        let part = Document::with_attributes("item", attrs! { "id" => 7 });
        let mut doc = Document::new("list");
        doc.graft(&doc.root(), &part).unwrap();
        doc.graft(&doc.root(), &part).unwrap();
        assert_eq!(
            doc.to_xml().unwrap(),
            "<list>\n  <item id=\"7\"/>\n  <item id=\"7\"/>\n</list>"
        );
    }

    #[test]
    fn test_display_matches_to_xml() {
        let doc = Document::with_attributes("r", attrs! { "k" => "v" });
        assert_eq!(doc.to_string(), "<r k=\"v\"/>");
    }
}
