//! Labeled, ordered tree model.
//!
//! A [`Tree`] owns every node of a hierarchy in a flat arena. Nodes refer to
//! their children and to their parent through [`NodeId`] indices, so the
//! parent link is a plain back-reference that carries no ownership. Read
//! access goes through the borrowed [`Node`] view, which can be used as the
//! head of any subtree.
//!
//! # Building
//!
//! Trees are assembled once, either through the consuming builder methods or
//! incrementally through [`Tree::push_child`] and [`Tree::add_child`]:
//!
//! ```
//! # use sapling_core::tree::Tree;
//! let tree = Tree::new("LtExpr")
//!     .with_child(Tree::leaf("Name", "j"))
//!     .with_child(Tree::leaf("Literal", "10"));
//!
//! let head = tree.head();
//! assert!(!head.is_leaf());
//! assert_eq!(head.child_count(), 2);
//! assert_eq!(tree.get("Literal").and_then(|node| node.value()), Some("10"));
//! ```
//!
//! # Outline Format
//!
//! The [`Display`](fmt::Display) implementation writes the tree as an indented
//! outline, one node per line and one tab per level:
//!
//! ```text
//! LtExpr
//! 	Name = "j"
//! 	Literal = "10"
//! ```
//!
//! Values are always quoted. Names and value types are quoted only when they
//! would not read back unchanged, for example `"x = 1"` or `" padded"`.

use std::fmt::{self, Write as _};

use thiserror::Error;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by incremental tree construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    value: Option<String>,
    value_type: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(name: String) -> Self {
        Self {
            name,
            value: None,
            value_type: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A labeled, ordered tree.
///
/// The head node always exists and has [`Tree::HEAD`] as its id. A node on its
/// own is simply a single-node tree, so attaching a node and attaching a whole
/// subtree are the same operation.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
    depth: usize,
}

impl Tree {
    /// Id of the head node of every tree.
    pub const HEAD: NodeId = NodeId(0);

    /// Creates a tree consisting of a single head node.
    ///
    /// Empty names are accepted here; whether they may be rendered is decided
    /// by the renderer's validation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(name.into())],
            depth: 0,
        }
    }

    /// Creates a single-node tree carrying a value.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).with_value(value)
    }

    /// Appends `child` (with its whole subtree) as the last child of the head.
    pub fn with_child(mut self, child: Tree) -> Self {
        self.attach(Self::HEAD, child);
        self
    }

    /// Sets the value of the head node. Leaf status is unaffected.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.nodes[Self::HEAD.0].value = Some(value.into());
        self
    }

    /// Sets the value and its type annotation on the head node.
    pub fn with_typed_value(mut self, value: impl Into<String>, value_type: impl Into<String>) -> Self {
        let head = &mut self.nodes[Self::HEAD.0];
        head.value = Some(value.into());
        head.value_type = Some(value_type.into());
        self
    }

    /// Appends a new node named `name` under `parent` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `parent` is not part of this tree.
    pub fn push_child(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, TreeError> {
        self.add_child(parent, Tree::new(name))
    }

    /// Appends `child` (with its whole subtree) under `parent` and returns the
    /// id the child's head received in this tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `parent` is not part of this tree.
    pub fn add_child(&mut self, parent: NodeId, child: Tree) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        Ok(self.attach(parent, child))
    }

    /// Assigns a value, and optionally its type, to an existing node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `id` is not part of this tree.
    pub fn set_value(
        &mut self,
        id: NodeId,
        value: impl Into<String>,
        value_type: Option<String>,
    ) -> Result<(), TreeError> {
        self.check(id)?;
        let data = &mut self.nodes[id.0];
        data.value = Some(value.into());
        data.value_type = value_type;
        Ok(())
    }

    /// Returns a view of the head node.
    pub fn head(&self) -> Node<'_> {
        Node {
            tree: self,
            id: Self::HEAD,
        }
    }

    /// Returns a view of the node with the given id, if it exists.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Returns the number of nodes, head included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the deepest level observed below the head (0 for a lone head).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if a direct child of the head is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.head().contains(name)
    }

    /// Searches the whole tree below the head for the first node named `name`.
    ///
    /// See [`Node::get`] for the search order.
    pub fn get(&self, name: &str) -> Option<Node<'_>> {
        self.head().get(name)
    }

    /// Iterates over all nodes in pre-order, starting with the head.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> {
        let mut stack = vec![Self::HEAD];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
            Some(Node { tree: self, id })
        })
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    /// Moves every node of `child` into this arena, re-basing its indices.
    fn attach(&mut self, parent: NodeId, child: Tree) -> NodeId {
        let offset = self.nodes.len();
        let child_depth = child.depth;

        for (index, mut data) in child.nodes.into_iter().enumerate() {
            data.parent = if index == 0 {
                Some(parent)
            } else {
                data.parent.map(|id| NodeId(id.0 + offset))
            };
            for id in &mut data.children {
                id.0 += offset;
            }
            self.nodes.push(data);
        }

        let child_id = NodeId(offset);
        self.nodes[parent.0].children.push(child_id);

        let child_level = self.head_level(parent) + 1;
        self.depth = self.depth.max(child_level + child_depth);
        child_id
    }

    fn head_level(&self, id: NodeId) -> usize {
        let mut level = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            level += 1;
            current = self.nodes[parent.0].parent;
        }
        level
    }
}

impl PartialEq for Tree {
    /// Two trees are equal when they have the same shape, names, values and
    /// value types, independent of how their arenas are ordered.
    fn eq(&self, other: &Self) -> bool {
        self.head().same_subtree(other.head())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outline(f, self.head(), 0)
    }
}

fn write_outline(f: &mut fmt::Formatter<'_>, node: Node<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_char('\t')?;
    }
    if is_bare_token(node.name(), true) {
        f.write_str(node.name())?;
    } else {
        write_quoted(f, node.name())?;
    }
    if let Some(value_type) = node.value_type() {
        f.write_str(": ")?;
        if is_bare_token(value_type, false) {
            f.write_str(value_type)?;
        } else {
            write_quoted(f, value_type)?;
        }
    }
    if let Some(value) = node.value() {
        f.write_str(" = ")?;
        write_quoted(f, value)?;
    }
    f.write_char('\n')?;

    for child in node.children() {
        write_outline(f, child, level + 1)?;
    }
    Ok(())
}

/// Returns `true` if `text` reads back unchanged when written without quotes.
///
/// Names may contain inner spaces and quotes; types may not.
fn is_bare_token(text: &str, is_name: bool) -> bool {
    let (Some(first), Some(last)) = (text.chars().next(), text.chars().last()) else {
        return false;
    };
    !first.is_whitespace()
        && !last.is_whitespace()
        && first != '"'
        && text.chars().all(|c| {
            !matches!(c, ':' | '=' | '#' | '\\')
                && !c.is_control()
                && (is_name || !(c.is_whitespace() || c == '"'))
        })
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// A borrowed view of one node and, through it, of its subtree.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> Node<'t> {
    /// Returns the id of this node in its tree.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Returns the node label.
    pub fn name(self) -> &'t str {
        &self.data().name
    }

    /// Returns the node value, if one was set.
    pub fn value(self) -> Option<&'t str> {
        self.data().value.as_deref()
    }

    /// Returns the value type annotation, if one was set.
    pub fn value_type(self) -> Option<&'t str> {
        self.data().value_type.as_deref()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(self) -> bool {
        self.data().children.is_empty()
    }

    /// Returns the number of direct children.
    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    /// Iterates over the direct children in sibling order.
    pub fn children(self) -> impl ExactSizeIterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// Returns the parent node, or `None` for the head.
    pub fn parent(self) -> Option<Node<'t>> {
        self.data().parent.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    /// Returns the distance from the tree head (the head is level 0).
    pub fn level(self) -> usize {
        self.tree.head_level(self.id)
    }

    /// Returns `true` if a direct child is named `name`.
    pub fn contains(self, name: &str) -> bool {
        self.children().any(|child| child.name() == name)
    }

    /// Searches the subtree below this node for the first node named `name`.
    ///
    /// Children are visited in sibling order; each child is compared before
    /// its own children are searched. This node itself is not a candidate.
    pub fn get(self, name: &str) -> Option<Node<'t>> {
        for child in self.children() {
            if child.name() == name {
                return Some(child);
            }
            if let Some(found) = child.get(name) {
                return Some(found);
            }
        }
        None
    }

    /// Returns the compact `(name, parent name)` descriptor of this node.
    pub fn field(self) -> Field {
        Field::new(self.name(), self.parent().map(|parent| parent.name()))
    }

    fn data(self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    fn same_subtree(self, other: Node<'_>) -> bool {
        self.name() == other.name()
            && self.value() == other.value()
            && self.value_type() == other.value_type()
            && self.child_count() == other.child_count()
            && self
                .children()
                .zip(other.children())
                .all(|(a, b)| a.same_subtree(b))
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("value", &self.value())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Compact identity of a node: its name and the name of its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    parent: Option<String>,
}

impl Field {
    /// Creates a descriptor from a node name and an optional parent name.
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
        }
    }

    /// Returns the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent name, `None` for a head node.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}
