//! Horizontal spans and the policies that divide them among children.

use sapling_core::tree::Node;

use super::ValidationError;

/// The half-open horizontal interval `[left, right)` given to one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    left: f32,
    right: f32,
}

impl Span {
    /// Creates a span.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSpan`] unless both borders are finite
    /// and `right` is greater than `left`.
    pub fn new(left: f32, right: f32) -> Result<Self, ValidationError> {
        if !left.is_finite() || !right.is_finite() || right <= left {
            return Err(ValidationError::InvalidSpan { left, right });
        }
        Ok(Self { left, right })
    }

    /// Returns the left border.
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the right border.
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the width of the span.
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    /// Returns the horizontal anchor of the node placed in this span.
    pub fn middle(self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// Divides a node's span among its children.
pub trait SplitPolicy {
    /// Returns one span per child of `node`, in sibling order.
    ///
    /// # Errors
    ///
    /// Implementations return [`ValidationError::NoChildren`] for a leaf and
    /// [`ValidationError::InvalidSpan`] when a child span would be empty.
    fn split(&self, span: Span, node: Node<'_>) -> Result<Vec<Span>, ValidationError>;
}

/// Gives every child the same width, whatever the size of its subtree.
///
/// Wide subtrees may overlap their neighbours; this policy never widens a
/// span to make room.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualSplitPolicy;

impl SplitPolicy for EqualSplitPolicy {
    fn split(&self, span: Span, node: Node<'_>) -> Result<Vec<Span>, ValidationError> {
        let count = node.child_count();
        if count == 0 {
            return Err(ValidationError::NoChildren {
                id: node.id(),
                name: node.name().to_string(),
            });
        }

        let width = span.width() / count as f32;
        (0..count)
            .map(|i| {
                let left = span.left + i as f32 * width;
                // The last child ends exactly on the parent's border.
                let right = if i + 1 == count {
                    span.right
                } else {
                    span.left + (i + 1) as f32 * width
                };
                Span::new(left, right)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use sapling_core::tree::Tree;

    use super::*;

    fn span(left: f32, right: f32) -> Span {
        Span::new(left, right).unwrap()
    }

    #[test]
    fn test_span_middle_and_width() {
        let s = span(0.0, 400.0);
        assert_approx_eq!(f32, s.middle(), 200.0);
        assert_approx_eq!(f32, s.width(), 400.0);
    }

    #[test]
    fn test_span_rejects_empty_and_reversed() {
        assert!(Span::new(5.0, 5.0).is_err());
        assert!(Span::new(5.0, 1.0).is_err());
        assert!(Span::new(0.0, f32::INFINITY).is_err());
        assert!(Span::new(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_equal_split_two_children() {
        let tree = Tree::new("A")
            .with_child(Tree::new("B"))
            .with_child(Tree::new("C"));
        let spans = EqualSplitPolicy.split(span(0.0, 400.0), tree.head()).unwrap();

        assert_eq!(spans, [span(0.0, 200.0), span(200.0, 400.0)]);
        assert_approx_eq!(f32, spans[0].middle(), 100.0);
        assert_approx_eq!(f32, spans[1].middle(), 300.0);
    }

    #[test]
    fn test_equal_split_single_child_keeps_span() {
        let tree = Tree::new("A").with_child(Tree::new("B"));
        let spans = EqualSplitPolicy.split(span(10.0, 30.0), tree.head()).unwrap();
        assert_eq!(spans, [span(10.0, 30.0)]);
    }

    #[test]
    fn test_equal_split_last_child_reaches_border() {
        let tree = (0..7).fold(Tree::new("A"), |tree, i| tree.with_child(Tree::new(format!("c{i}"))));
        let parent = span(0.1, 841.89);
        let spans = EqualSplitPolicy.split(parent, tree.head()).unwrap();

        assert_eq!(spans.len(), 7);
        assert_eq!(spans.last().unwrap().right(), parent.right());
        assert_eq!(spans[0].left(), parent.left());
        for pair in spans.windows(2) {
            assert_eq!(pair[0].right(), pair[1].left());
        }
    }

    #[test]
    fn test_equal_split_leaf_is_rejected() {
        let tree = Tree::new("Leaf");
        let err = EqualSplitPolicy.split(span(0.0, 1.0), tree.head()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NoChildren {
                id: Tree::HEAD,
                name: "Leaf".to_string()
            }
        );
    }
}
