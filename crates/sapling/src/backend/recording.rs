//! A backend that records every call instead of drawing.
//!
//! [`RecordingBackend`] enforces the same lifecycle rules as a real backend,
//! tracks the text cursor so that recorded text carries its absolute
//! position, and measures text with a fixed width per character. A failure
//! can be injected for any kind of command to exercise error paths.
//!
//! ```
//! # use sapling::backend::{Backend, Canvas, recording::{DrawCommand, RecordingBackend}};
//! # use sapling::geometry::{Point, Size};
//! let mut backend = RecordingBackend::new();
//! backend.begin_page(Size::new(100.0, 100.0))?;
//! backend.begin_text()?;
//! backend.move_cursor_by(10.0, 20.0)?;
//! backend.draw_text("hi")?;
//! backend.end_text()?;
//!
//! assert!(backend.commands().contains(&DrawCommand::Text {
//!     text: "hi".to_string(),
//!     at: Point::new(10.0, 20.0),
//! }));
//! # Ok::<(), sapling::backend::BackendError>(())
//! ```

use std::path::{Path, PathBuf};

use log::debug;

use sapling_core::geometry::{Bounds, Point, Size};

use super::{Backend, BackendError, Canvas};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPage(Size),
    EndPage,
    BeginText,
    EndText,
    MoveCursor { dx: f32, dy: f32 },
    Text { text: String, at: Point },
    Line { from: Point, to: Point },
    Rectangle(Bounds),
    Ellipse { center: Point, radius_x: f32, radius_y: f32 },
    Save(PathBuf),
    Close,
}

impl DrawCommand {
    /// Returns the name of the backend operation that produced this command.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BeginPage(_) => "begin_page",
            Self::EndPage => "end_page",
            Self::BeginText => "begin_text",
            Self::EndText => "end_text",
            Self::MoveCursor { .. } => "move_cursor_by",
            Self::Text { .. } => "draw_text",
            Self::Line { .. } => "draw_line",
            Self::Rectangle(_) => "draw_rectangle",
            Self::Ellipse { .. } => "draw_ellipse",
            Self::Save(_) => "save",
            Self::Close => "close",
        }
    }

    /// Returns `true` for lines, rectangles and ellipses.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Self::Line { .. } | Self::Rectangle(_) | Self::Ellipse { .. }
        )
    }
}

/// Records backend calls in order.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    char_width: f32,
    line_height: f32,
    cursor: Point,
    page_open: bool,
    pages: usize,
    in_text: bool,
    closed: bool,
    close_calls: usize,
    fail_on: Option<&'static str>,
}

impl RecordingBackend {
    /// Creates a backend measuring 6 units per character and 12 per line.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            char_width: 6.0,
            line_height: 12.0,
            cursor: Point::default(),
            page_open: false,
            pages: 0,
            in_text: false,
            closed: false,
            close_calls: 0,
            fail_on: None,
        }
    }

    /// Sets the width measured for each character.
    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    /// Sets the height measured for each line of text.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Makes every operation of the given kind fail, e.g. `"save"`.
    ///
    /// See [`DrawCommand::kind`] for the names.
    pub fn with_failure(mut self, kind: &'static str) -> Self {
        self.fail_on = Some(kind);
        self
    }

    /// Returns the recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the text cursor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Returns how many times [`Backend::close`] was called.
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    /// Returns `true` once the backend was closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn record(&mut self, command: DrawCommand) -> Result<(), BackendError> {
        if self.fail_on == Some(command.kind()) {
            debug!(kind = command.kind(); "Injected backend failure");
            return Err(BackendError::Failed(format!(
                "injected failure in {}",
                command.kind()
            )));
        }
        self.commands.push(command);
        Ok(())
    }

    fn check_open(&self) -> Result<(), BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        if !self.page_open {
            return Err(BackendError::NoPage);
        }
        Ok(())
    }

    fn check_text(&self, operation: &'static str) -> Result<(), BackendError> {
        self.check_open()?;
        if !self.in_text {
            return Err(BackendError::OutsideTextBlock(operation));
        }
        Ok(())
    }

    fn check_shape(&self, operation: &'static str) -> Result<(), BackendError> {
        self.check_open()?;
        if self.in_text {
            return Err(BackendError::InsideTextBlock(operation));
        }
        Ok(())
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingBackend {
    fn text_width(&self, text: &str) -> f32 {
        let widest = text.lines().map(|line| line.chars().count()).max();
        widest.unwrap_or(0) as f32 * self.char_width
    }

    fn text_height(&self, text: &str) -> f32 {
        text.lines().count() as f32 * self.line_height
    }

    fn begin_text(&mut self) -> Result<(), BackendError> {
        self.check_shape("open a text block")?;
        self.record(DrawCommand::BeginText)?;
        self.in_text = true;
        self.cursor = Point::default();
        Ok(())
    }

    fn end_text(&mut self) -> Result<(), BackendError> {
        self.check_text("close a text block")?;
        self.record(DrawCommand::EndText)?;
        self.in_text = false;
        Ok(())
    }

    fn move_cursor_by(&mut self, dx: f32, dy: f32) -> Result<(), BackendError> {
        self.check_text("move the cursor")?;
        self.record(DrawCommand::MoveCursor { dx, dy })?;
        self.cursor = self.cursor.add_point(Point::new(dx, dy));
        Ok(())
    }

    fn draw_text(&mut self, text: &str) -> Result<(), BackendError> {
        self.check_text("draw text")?;
        self.record(DrawCommand::Text {
            text: text.to_string(),
            at: self.cursor,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), BackendError> {
        self.check_shape("draw a line")?;
        self.record(DrawCommand::Line { from, to })
    }

    fn draw_rectangle(&mut self, bounds: Bounds) -> Result<(), BackendError> {
        self.check_shape("draw a rectangle")?;
        self.record(DrawCommand::Rectangle(bounds))
    }

    fn draw_ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    ) -> Result<(), BackendError> {
        self.check_shape("draw an ellipse")?;
        self.record(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
        })
    }
}

impl Backend for RecordingBackend {
    fn begin_page(&mut self, size: Size) -> Result<(), BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        if self.page_open {
            return Err(BackendError::PageOpen);
        }
        self.record(DrawCommand::BeginPage(size))?;
        self.page_open = true;
        self.pages += 1;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), BackendError> {
        self.check_shape("finish a page")?;
        self.record(DrawCommand::EndPage)?;
        self.page_open = false;
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<(), BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        if self.page_open || self.pages == 0 {
            return Err(BackendError::NoDocument);
        }
        self.record(DrawCommand::Save(path.to_path_buf()))
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.close_calls += 1;
        if self.closed {
            return Err(BackendError::Closed);
        }
        self.closed = true;
        self.in_text = false;
        self.page_open = false;
        self.record(DrawCommand::Close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> RecordingBackend {
        let mut backend = RecordingBackend::new();
        backend.begin_page(Size::new(100.0, 100.0)).unwrap();
        backend
    }

    #[test]
    fn test_text_requires_text_block() {
        let mut backend = open();
        assert!(matches!(
            backend.draw_text("x"),
            Err(BackendError::OutsideTextBlock(_))
        ));
        assert!(matches!(
            backend.move_cursor_by(1.0, 1.0),
            Err(BackendError::OutsideTextBlock(_))
        ));
    }

    #[test]
    fn test_shapes_rejected_inside_text_block() {
        let mut backend = open();
        backend.begin_text().unwrap();

        let err = backend
            .draw_line(Point::default(), Point::new(1.0, 1.0))
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot draw a line inside a text block");
        assert!(backend.end_page().is_err());
    }

    #[test]
    fn test_drawing_without_page() {
        let mut backend = RecordingBackend::new();
        assert!(matches!(
            backend.draw_rectangle(Bounds::default()),
            Err(BackendError::NoPage)
        ));
        assert!(matches!(backend.begin_text(), Err(BackendError::NoPage)));
    }

    #[test]
    fn test_begin_text_resets_cursor() {
        let mut backend = open();
        backend.begin_text().unwrap();
        backend.move_cursor_by(5.0, 5.0).unwrap();
        backend.end_text().unwrap();
        backend.begin_text().unwrap();
        assert_eq!(backend.cursor(), Point::default());
    }

    #[test]
    fn test_text_metrics() {
        let backend = RecordingBackend::new()
            .with_char_width(2.0)
            .with_line_height(10.0);
        assert_eq!(backend.text_width("abc"), 6.0);
        assert_eq!(backend.text_width("a\nabcd"), 8.0);
        assert_eq!(backend.text_height("a\nabcd"), 20.0);
        assert_eq!(backend.text_size(""), Size::default());
    }

    #[test]
    fn test_injected_failure_is_not_recorded() {
        let mut backend = open().with_failure("draw_ellipse");
        let err = backend
            .draw_ellipse(Point::default(), 1.0, 1.0)
            .unwrap_err();

        assert_eq!(err.to_string(), "injected failure in draw_ellipse");
        assert_eq!(backend.commands().len(), 1);
    }

    #[test]
    fn test_save_needs_finished_page() {
        let mut backend = open();
        assert!(matches!(
            backend.save(Path::new("out.svg")),
            Err(BackendError::NoDocument)
        ));
        backend.end_page().unwrap();
        backend.save(Path::new("out.svg")).unwrap();
        assert_eq!(
            backend.commands().last(),
            Some(&DrawCommand::Save(PathBuf::from("out.svg")))
        );
    }

    #[test]
    fn test_close_twice() {
        let mut backend = open();
        backend.close().unwrap();
        assert!(matches!(backend.close(), Err(BackendError::Closed)));
        assert_eq!(backend.close_calls(), 2);
        assert!(backend.is_closed());
        assert!(matches!(
            backend.begin_page(Size::new(1.0, 1.0)),
            Err(BackendError::Closed)
        ));
    }
}
