//! Recursive layout of trees on a page.
//!
//! Every node of a tree gets a horizontal [`Span`] of the page and a level.
//! The node is anchored at the middle of its span on the row of its level,
//! and its span is divided among its children, which sit one row lower.
//!
//! # Pipeline Position
//!
//! ```text
//! Tree
//!     ↓ validate
//! Tree (checked)
//!     ↓ layout (this module), once per pass
//! NodePlacement / ValuePlacement
//!     ↓ render passes
//! Backend
//! ```
//!
//! The placements depend only on the tree, the initial span and the
//! [`LayoutSettings`]. Every pass therefore sees the same anchors, whether it
//! draws text, shapes or connectors.
//!
//! # Submodules
//!
//! - [`cursor`] - Relative cursor moves and text centering for a backend
//! - [`geometry`] - Label boxes, value ellipses and connectors derived from placements
//!
//! # Re-exports
//!
//! - [`LayoutEngine`], [`Visitor`] - The traversal and its callbacks
//! - [`Span`], [`SplitPolicy`], [`EqualSplitPolicy`] - Horizontal subdivision
//! - [`LayoutSettings`] - Page geometry and spacing
//! - [`LayoutRecorder`] - Collects placements for inspection
//! - [`validate`], [`EmptyNamePolicy`], [`ValidationError`] - Checks run before layout

pub mod cursor;
mod engine;
pub mod geometry;
mod recorder;
mod settings;
mod span;
mod validate;

pub use engine::{LayoutEngine, NodePlacement, ValuePlacement, Visitor};
pub use recorder::{LayoutRecorder, RecordedNode, RecordedValue};
pub use settings::LayoutSettings;
pub use span::{EqualSplitPolicy, Span, SplitPolicy};
pub use validate::{EmptyNamePolicy, ValidationError, validate};
