//! Styling definitions shared by every drawing backend.
//!
//! - [`TextDefinition`] - Font family, size and color of labels, plus text measurement
//! - [`TextMeasurement`] - How label widths are measured
//! - [`StrokeDefinition`] - Color, width and dash pattern of connector lines and outlines
//! - [`apply_stroke!`](crate::apply_stroke!) - Applies a stroke to an SVG element

mod stroke;
mod text;

pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{TextDefinition, TextMeasurement};
