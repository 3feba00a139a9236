//! A visitor that keeps every placement for later inspection.

use sapling_core::{geometry::Point, tree::NodeId};

use super::{NodePlacement, Span, ValidationError, ValuePlacement, Visitor};

/// The placement of one node, detached from the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNode {
    id: NodeId,
    name: String,
    parent: Option<NodeId>,
    level: usize,
    span: Span,
    anchor: Point,
    parent_anchor: Option<Point>,
}

impl RecordedNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn parent_anchor(&self) -> Option<Point> {
        self.parent_anchor
    }
}

/// The placement of one leaf value, detached from the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedValue {
    id: NodeId,
    value: String,
    level: usize,
    anchor: Point,
    owner_anchor: Point,
}

impl RecordedValue {
    /// Returns the id of the leaf carrying the value.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn owner_anchor(&self) -> Point {
        self.owner_anchor
    }
}

/// Records the placements of a traversal without drawing anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutRecorder {
    nodes: Vec<RecordedNode>,
    values: Vec<RecordedValue>,
}

impl LayoutRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node placements in visiting order.
    pub fn nodes(&self) -> &[RecordedNode] {
        &self.nodes
    }

    /// Returns the value placements in visiting order.
    pub fn values(&self) -> &[RecordedValue] {
        &self.values
    }

    /// Returns the placement of the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&RecordedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl Visitor for LayoutRecorder {
    type Error = ValidationError;

    fn visit_node(&mut self, placement: &NodePlacement<'_>) -> Result<(), Self::Error> {
        let node = placement.node();
        self.nodes.push(RecordedNode {
            id: node.id(),
            name: node.name().to_string(),
            parent: node.parent().map(|parent| parent.id()),
            level: placement.level(),
            span: placement.span(),
            anchor: placement.anchor(),
            parent_anchor: placement.parent_anchor(),
        });
        Ok(())
    }

    fn visit_value(&mut self, placement: &ValuePlacement<'_>) -> Result<(), Self::Error> {
        self.values.push(RecordedValue {
            id: placement.node().id(),
            value: placement.value().to_string(),
            level: placement.level(),
            anchor: placement.anchor(),
            owner_anchor: placement.owner_anchor(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sapling_core::tree::Tree;

    use super::*;
    use crate::layout::{LayoutEngine, LayoutSettings};

    #[test]
    fn test_recorder_keeps_ids_and_parents() {
        let tree = Tree::new("A").with_child(Tree::leaf("B", "b"));
        let mut recorder = LayoutRecorder::new();
        LayoutEngine::new(LayoutSettings::default())
            .traverse(&tree, Span::new(0.0, 10.0).unwrap(), &mut recorder)
            .unwrap();

        let b = tree.get("B").unwrap();
        let recorded = recorder.node(b.id()).unwrap();
        assert_eq!(recorded.name(), "B");
        assert_eq!(recorded.parent(), Some(Tree::HEAD));
        assert_eq!(recorder.values()[0].id(), b.id());
        assert_eq!(recorder.values()[0].value(), "b");
        assert!(recorder.node(Tree::HEAD).unwrap().parent().is_none());
    }
}
