//! Shapes and connectors derived from placements.
//!
//! All functions here are pure: given an anchor and the measured size of the
//! text drawn there, they return page coordinates (y-up). Text sits on its
//! anchor as on a baseline, so a label occupies `y..y + height`.
//!
//! ```text
//!          parent label
//!     ┌─────────────────────┐
//!     │       LtExpr        │
//!     └──────────┬──────────┘  parent y - padding
//!               ╱
//!              ╱               connector
//!     ┌───────┴─┐              child y + height + padding
//!     │ Literal │
//!     └────┬────┘              child y - padding
//!          │                   value connector
//!        ╭─┴─╮
//!        │10 │                 value ellipse
//!        ╰───╯
//! ```

use sapling_core::geometry::{Bounds, Insets, Point, Size};

use super::LayoutSettings;

/// A straight connector between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    start: Point,
    end: Point,
}

impl Connector {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Returns the lower end, on the child or value side.
    pub fn start(self) -> Point {
        self.start
    }

    /// Returns the upper end, on the parent side.
    pub fn end(self) -> Point {
        self.end
    }

    /// Returns `true` if both ends share the same x coordinate.
    pub fn is_vertical(self) -> bool {
        self.start.x() == self.end.x()
    }
}

/// The ellipse drawn around a leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    center: Point,
    radius_x: f32,
    radius_y: f32,
}

impl Ellipse {
    pub fn center(self) -> Point {
        self.center
    }

    pub fn radius_x(self) -> f32 {
        self.radius_x
    }

    pub fn radius_y(self) -> f32 {
        self.radius_y
    }

    /// Returns the topmost point of the ellipse.
    pub fn top(self) -> Point {
        Point::new(self.center.x(), self.center.y() + self.radius_y)
    }
}

/// Returns the padded box around a label anchored at `anchor`.
pub fn label_bounds(anchor: Point, text: Size, padding: f32) -> Bounds {
    let min = Point::new(anchor.x() - text.width() / 2.0, anchor.y());
    Bounds::new_from_min(min, text).add_padding(Insets::uniform(padding))
}

/// Returns the connector from the top of a child's box up to the bottom of its
/// parent's box.
pub fn connector(anchor: Point, text_height: f32, parent_anchor: Point, padding: f32) -> Connector {
    Connector::new(
        Point::new(anchor.x(), anchor.y() + text_height + padding),
        Point::new(parent_anchor.x(), parent_anchor.y() - padding),
    )
}

/// Returns the ellipse around a value anchored at `anchor`.
///
/// The horizontal radius grows with the text but never drops below the
/// configured minimum; the vertical radius is fixed.
pub fn value_ellipse(anchor: Point, text: Size, settings: &LayoutSettings) -> Ellipse {
    let radius_x =
        (text.width() / 2.0 + settings.ellipse_padding()).max(settings.min_ellipse_radius());
    Ellipse {
        center: Point::new(anchor.x(), anchor.y() + text.height() / 2.0),
        radius_x,
        radius_y: settings.ellipse_radius_y(),
    }
}

/// Returns the vertical connector from a value ellipse up to its leaf's box.
pub fn value_connector(ellipse: Ellipse, owner_anchor: Point, padding: f32) -> Connector {
    let top = ellipse.top();
    Connector::new(top, Point::new(top.x(), owner_anchor.y() - padding))
}
