//! Checks that a tree and the layout inputs can be laid out.

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use sapling_core::tree::{NodeId, Tree};

/// A tree or layout input that cannot be laid out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid span [{left}, {right}): borders must be finite and right must exceed left")]
    InvalidSpan { left: f32, right: f32 },

    #[error("node `{name}` ({id}) has no children to divide its span among")]
    NoChildren { id: NodeId, name: String },

    #[error("node {id} at level {level} has an empty name")]
    EmptyName { id: NodeId, level: usize },

    #[error("invalid layout settings: {0}")]
    InvalidSettings(String),
}

/// What to do with nodes whose name is empty or only whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyNamePolicy {
    /// Fail validation with [`ValidationError::EmptyName`].
    #[default]
    Reject,
    /// Render the node with a blank label.
    Allow,
}

/// Checks `tree` before it is laid out.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for the first node in pre-order
/// with a blank name when `empty_names` is [`EmptyNamePolicy::Reject`].
pub fn validate(tree: &Tree, empty_names: EmptyNamePolicy) -> Result<(), ValidationError> {
    if empty_names == EmptyNamePolicy::Allow {
        return Ok(());
    }

    if let Some(node) = tree.iter().find(|node| node.name().trim().is_empty()) {
        debug!(node:% = node.id(); "Rejecting node with an empty name");
        return Err(ValidationError::EmptyName {
            id: node.id(),
            level: node.level(),
        });
    }
    Ok(())
}
