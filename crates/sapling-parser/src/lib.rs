//! # Sapling Parser
//!
//! Reads the Sapling outline format into a [`Tree`].
//!
//! An outline lists one node per line. Indentation gives the nesting, and a
//! node may carry a value, optionally with a type:
//!
//! ```text
//! # comment
//! WhileStmt
//! 	LtExpr
//! 		Name = j
//! 		Literal: int = "10"
//! ```
//!
//! This is the same format that [`Tree`]'s `Display` implementation writes.
//!
//! ## Usage
//!
//! ```
//! # use sapling_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let tree = parse("LtExpr\n\tName = j\n\tLiteral: int = 10\n")?;
//!
//!     assert_eq!(tree.head().child_count(), 2);
//!     assert_eq!(tree.get("Literal").and_then(|n| n.value_type()), Some("int"));
//!     Ok(())
//! }
//! ```

mod builder;
pub mod error;
mod outline;
#[cfg(test)]
mod parser_tests;
mod span;

pub use error::ParseError;
pub use span::Span;

use log::{debug, warn};
use sapling_core::tree::Tree;

use builder::OutlineBuilder;

/// Parse outline source text into a tree.
///
/// Every line is checked, so the returned [`ParseError`] lists all problems
/// in the source rather than only the first. Warnings (such as a value on a
/// node that has children) do not fail the parse and are logged instead.
///
/// # Errors
///
/// Returns a [`ParseError`] if any line is malformed, the indentation is
/// inconsistent, or the source contains no node or more than one root.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let (tree, warnings) = OutlineBuilder::new().build(source)?;

    for warning in &warnings {
        let span = warning.labels().first().map(|label| label.span());
        warn!(
            offset = span.map(|s| s.start());
            "{warning}"
        );
    }

    debug!(
        nodes = tree.node_count(),
        depth = tree.depth(),
        warnings = warnings.len();
        "Outline parsed"
    );
    Ok(tree)
}
