//! Stroke definitions for connector lines and shape outlines.
//!
//! A [`StrokeDefinition`] bundles the color, width and dash pattern of a line.
//! The [`apply_stroke!`](crate::apply_stroke!) macro copies all of them onto an
//! SVG element at once:
//!
//! ```
//! use sapling_core::draw::{StrokeDefinition, StrokeStyle};
//! use sapling_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::new(Color::new("gray").unwrap(), 1.5);
//! stroke.set_style(StrokeStyle::Dashed);
//!
//! let line = svg_element::Line::new().set("x1", 0).set("y1", 0);
//! let line = sapling_core::apply_stroke!(line, &stroke);
//! ```
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"10,5,2,5"` |

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Each variant maps to an SVG `stroke-dasharray` value:
/// - `Solid`: no dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `Custom(pattern)`: the pattern as given
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Comma or space separated dash and gap lengths, e.g. "10,5,2,5".
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern if is_dash_pattern(pattern) => Ok(Self::Custom(pattern.to_string())),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted, or a dash pattern such as `10,5`"
            )),
        }
    }
}

fn is_dash_pattern(s: &str) -> bool {
    let mut lengths = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .peekable();
    lengths.peek().is_some() && lengths.all(|part| part.parse::<f32>().is_ok_and(|v| v >= 0.0))
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke used for connectors and for the outlines of label and value shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Sets the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    /// Black, 1.0 wide, solid.
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Applies every attribute of a [`StrokeDefinition`] to an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_setters() {
        let mut stroke = StrokeDefinition::default();
        stroke.set_color(Color::new("red").unwrap());
        stroke.set_width(2.5);
        stroke.set_style(StrokeStyle::Dotted);

        assert_eq!(stroke.color(), Color::new("red").unwrap());
        assert_eq!(stroke.width(), 2.5);
        assert_eq!(*stroke.style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
        assert_eq!("dashed".parse::<StrokeStyle>(), Ok(StrokeStyle::Dashed));
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        assert_eq!(
            "10,5 2".parse::<StrokeStyle>(),
            Ok(StrokeStyle::Custom("10,5 2".to_string()))
        );
        assert!("wavy".parse::<StrokeStyle>().is_err());
        assert!("".parse::<StrokeStyle>().is_err());
        assert!("5,-1".parse::<StrokeStyle>().is_err());
    }

    #[test]
    fn test_stroke_style_svg_value() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value().as_deref(), Some("5,5"));
        assert_eq!(StrokeStyle::Dotted.to_svg_value().as_deref(), Some("2,3"));
        assert_eq!(
            StrokeStyle::Custom("4 2".to_string()).to_svg_value().as_deref(),
            Some("4 2")
        );
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let mut stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 3.0);
        stroke.set_style(StrokeStyle::Dashed);

        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke).to_string();

        let color = format!(r#"stroke="{}""#, stroke.color());
        assert!(line.contains(&color), "{line}");
        assert!(line.contains(r#"stroke-width="3""#), "{line}");
        assert!(line.contains(r#"stroke-dasharray="5,5""#), "{line}");
    }

    #[test]
    fn test_apply_stroke_solid_has_no_dasharray() {
        let stroke = StrokeDefinition::default();
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke).to_string();

        assert!(!line.contains("stroke-dasharray"), "{line}");
    }
}
