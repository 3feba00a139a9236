//! Absolute placement on top of relative cursor moves.
//!
//! Page description formats place text by moving a cursor relative to its
//! last position. [`CursorTracker`] remembers where the cursor is, so the
//! layout can keep working with absolute anchors: every move is computed as
//! the difference between the target and the tracked position, and every move
//! goes through [`CursorTracker::move_by`].
//!
//! # Centering
//!
//! Text starts at the cursor. To center it on an anchor, the tracker moves
//! left by half the text width, draws, and moves back:
//!
//! ```text
//!   anchor
//!     │
//!  ◄──┤ alignment_offset = -width / (2 * scale)
//!  Literal
//!  ──►│ restore
//! ```
//!
//! The move back leaves the cursor on the anchor, which the next absolute
//! move is computed from.

use log::trace;

use sapling_core::geometry::Point;

use crate::backend::{BackendError, Canvas};

/// Tracks the text cursor of a canvas during one pass.
///
/// The tracker starts at the page origin, matching a freshly opened text
/// block.
pub struct CursorTracker<'c, C: Canvas + ?Sized> {
    canvas: &'c mut C,
    position: Point,
    scale: f32,
}

impl<'c, C: Canvas + ?Sized> CursorTracker<'c, C> {
    /// Creates a tracker at the page origin.
    ///
    /// `scale` converts the canvas' text widths to page units; `1.0` when the
    /// canvas already measures in page units.
    pub fn new(canvas: &'c mut C, scale: f32) -> Self {
        Self {
            canvas,
            position: Point::default(),
            scale,
        }
    }

    /// Returns the tracked cursor position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the cursor by `(dx, dy)`.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> Result<(), BackendError> {
        self.canvas.move_cursor_by(dx, dy)?;
        self.position = self.position.add_point(Point::new(dx, dy));
        Ok(())
    }

    /// Moves the cursor to the absolute `target`.
    pub fn move_to(&mut self, target: Point) -> Result<(), BackendError> {
        let delta = target.sub_point(self.position);
        self.move_by(delta.x(), delta.y())
    }

    /// Returns the horizontal move that centers `text` on the cursor.
    ///
    /// The result is `-width / (2 * scale)`, negative meaning leftward.
    pub fn alignment_offset(&self, text: &str) -> f32 {
        -self.canvas.text_width(text) / (2.0 * self.scale)
    }

    /// Draws `text` horizontally centered on `at`.
    ///
    /// The cursor ends on `at`.
    pub fn centered_text_at(&mut self, at: Point, text: &str) -> Result<(), BackendError> {
        self.move_to(at)?;
        let offset = self.alignment_offset(text);
        trace!(text, x = at.x(), y = at.y(), offset; "Centered text");

        self.move_by(offset, 0.0)?;
        self.canvas.draw_text(text)?;
        self.move_by(-offset, 0.0)
    }
}
