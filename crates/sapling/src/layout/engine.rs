//! The recursive traversal shared by every layout pass.

use log::trace;

use sapling_core::{
    geometry::Point,
    tree::{Node, Tree},
};

use super::{EqualSplitPolicy, LayoutSettings, Span, SplitPolicy, ValidationError};

/// Where one node of the tree is placed.
#[derive(Debug, Clone, Copy)]
pub struct NodePlacement<'t> {
    node: Node<'t>,
    level: usize,
    span: Span,
    anchor: Point,
    parent_anchor: Option<Point>,
}

impl<'t> NodePlacement<'t> {
    /// Returns the placed node.
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Returns the level of the node, 0 for the root of the traversal.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the span given to the node.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the middle of the span on the row of the node's level.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the anchor of the parent, `None` for the root.
    pub fn parent_anchor(&self) -> Option<Point> {
        self.parent_anchor
    }
}

/// Where the value of a leaf is placed: one row below the leaf itself.
#[derive(Debug, Clone, Copy)]
pub struct ValuePlacement<'t> {
    node: Node<'t>,
    value: &'t str,
    level: usize,
    anchor: Point,
    owner_anchor: Point,
}

impl<'t> ValuePlacement<'t> {
    /// Returns the leaf carrying the value.
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Returns the value text.
    pub fn value(&self) -> &'t str {
        self.value
    }

    /// Returns the level of the value row, one below the leaf.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the anchor of the value, straight below the leaf.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the anchor of the leaf carrying the value.
    pub fn owner_anchor(&self) -> Point {
        self.owner_anchor
    }
}

/// Receives the placements of one traversal.
///
/// Nodes are visited in pre-order, children in sibling order. The value of a
/// leaf is visited right after the leaf.
pub trait Visitor {
    /// Error type of the visitor; layout failures are converted into it.
    type Error: From<ValidationError>;

    /// Called once per node.
    fn visit_node(&mut self, placement: &NodePlacement<'_>) -> Result<(), Self::Error>;

    /// Called once per leaf that has a value.
    fn visit_value(&mut self, _placement: &ValuePlacement<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Assigns every node a span, a level and an anchor.
///
/// # Example
///
/// ```
/// # use sapling::layout::{LayoutEngine, LayoutRecorder, LayoutSettings, Span};
/// # use sapling::tree::Tree;
/// let tree = Tree::new("A")
///     .with_child(Tree::new("B"))
///     .with_child(Tree::new("C"));
///
/// let engine = LayoutEngine::new(LayoutSettings::default());
/// let mut recorder = LayoutRecorder::new();
/// engine.traverse(&tree, Span::new(0.0, 400.0)?, &mut recorder)?;
///
/// let middles: Vec<f32> = recorder.nodes().iter().map(|n| n.anchor().x()).collect();
/// assert_eq!(middles, [200.0, 100.0, 300.0]);
/// # Ok::<(), sapling::layout::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine<P = EqualSplitPolicy> {
    settings: LayoutSettings,
    policy: P,
}

impl LayoutEngine {
    /// Creates an engine dividing spans equally among children.
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            policy: EqualSplitPolicy,
        }
    }
}

impl<P: SplitPolicy> LayoutEngine<P> {
    /// Replaces the policy used to divide spans among children.
    pub fn with_policy<Q: SplitPolicy>(self, policy: Q) -> LayoutEngine<Q> {
        LayoutEngine {
            settings: self.settings,
            policy,
        }
    }

    /// Returns the layout settings.
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Walks `tree` from its head, which is placed at level 0 in `span`.
    ///
    /// # Errors
    ///
    /// Stops at the first error returned by the visitor or by the split
    /// policy.
    pub fn traverse<V: Visitor>(
        &self,
        tree: &Tree,
        span: Span,
        visitor: &mut V,
    ) -> Result<(), V::Error> {
        self.visit(tree.head(), 0, span, None, visitor)
    }

    fn visit<V: Visitor>(
        &self,
        node: Node<'_>,
        level: usize,
        span: Span,
        parent_anchor: Option<Point>,
        visitor: &mut V,
    ) -> Result<(), V::Error> {
        let anchor = Point::new(span.middle(), self.settings.row_y(level));
        trace!(
            node = node.name(),
            level,
            left = span.left(),
            right = span.right(),
            x = anchor.x(),
            y = anchor.y();
            "Placing node"
        );

        visitor.visit_node(&NodePlacement {
            node,
            level,
            span,
            anchor,
            parent_anchor,
        })?;

        if node.is_leaf() {
            if let Some(value) = node.value() {
                visitor.visit_value(&ValuePlacement {
                    node,
                    value,
                    level: level + 1,
                    anchor: Point::new(anchor.x(), self.settings.row_y(level + 1)),
                    owner_anchor: anchor,
                })?;
            }
            return Ok(());
        }

        let spans = self.policy.split(span, node)?;
        for (child, child_span) in node.children().zip(spans) {
            self.visit(child, level + 1, child_span, Some(anchor), visitor)?;
        }
        Ok(())
    }
}
