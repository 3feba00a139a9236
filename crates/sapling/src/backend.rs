//! Drawing backends.
//!
//! The layout never draws anything itself. It hands coordinates to a
//! [`Canvas`], which offers the few primitives a page description format
//! needs: text measurement, relative cursor moves for text, and absolute
//! lines, rectangles and ellipses. A [`Backend`] is a canvas that also owns a
//! document and its lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! begin_page ─► begin_text ─► (move_cursor_by | draw_text)* ─► end_text
//!            ─► (draw_line | draw_rectangle | draw_ellipse)*
//!            ─► end_page ─► save ─► close
//! ```
//!
//! Text may only be drawn inside a text block and shapes only outside of one.
//! Coordinates are page coordinates with the origin in the bottom-left corner
//! (see [`sapling_core::geometry`]).
//!
//! # Implementations
//!
//! - [`svg::SvgBackend`] - Writes an SVG document
//! - [`recording::RecordingBackend`] - Records every call, for tests and tooling

pub mod recording;
pub mod svg;

use std::{io, path::Path};

use thiserror::Error;

use sapling_core::geometry::{Bounds, Point, Size};

/// A failure reported by a backend. Backend errors end the current render.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no page is open")]
    NoPage,

    #[error("a page is already open")]
    PageOpen,

    #[error("the document holds a single page")]
    SinglePage,

    #[error("cannot {0} inside a text block")]
    InsideTextBlock(&'static str),

    #[error("cannot {0} outside a text block")]
    OutsideTextBlock(&'static str),

    #[error("the document has no finished page")]
    NoDocument,

    #[error("the document is closed")]
    Closed,

    #[error("invalid style: {0}")]
    Style(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Failed(String),
}

/// The drawing primitives used by the render passes.
pub trait Canvas {
    /// Returns the width of `text` in page units before text scaling.
    fn text_width(&self, text: &str) -> f32;

    /// Returns the height of `text` in page units.
    fn text_height(&self, text: &str) -> f32;

    /// Returns the measured size of `text`.
    fn text_size(&self, text: &str) -> Size {
        Size::new(self.text_width(text), self.text_height(text))
    }

    /// Opens a text block and resets the text cursor to the page origin.
    fn begin_text(&mut self) -> Result<(), BackendError>;

    /// Closes the current text block.
    fn end_text(&mut self) -> Result<(), BackendError>;

    /// Moves the text cursor by `(dx, dy)`.
    fn move_cursor_by(&mut self, dx: f32, dy: f32) -> Result<(), BackendError>;

    /// Draws `text` with its baseline starting at the text cursor.
    fn draw_text(&mut self, text: &str) -> Result<(), BackendError>;

    /// Draws a straight line.
    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), BackendError>;

    /// Draws the outline of a rectangle.
    fn draw_rectangle(&mut self, bounds: Bounds) -> Result<(), BackendError>;

    /// Draws the outline of an axis-aligned ellipse.
    fn draw_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32)
    -> Result<(), BackendError>;
}

/// A canvas that owns a document.
pub trait Backend: Canvas {
    /// Adds a page of the given size and makes it the drawing target.
    fn begin_page(&mut self, size: Size) -> Result<(), BackendError>;

    /// Finishes the current page.
    fn end_page(&mut self) -> Result<(), BackendError>;

    /// Writes the finished document to `path`.
    fn save(&mut self, path: &Path) -> Result<(), BackendError>;

    /// Releases the document. Every operation after this fails.
    fn close(&mut self) -> Result<(), BackendError>;
}
