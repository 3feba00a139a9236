//! Text styling and measurement for node labels and values.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Font family, font size and color used for labels
//! - [`TextMeasurement`] - Selects shaped or approximate width measurement
//!
//! # Measurement
//!
//! Layout needs the width of every label to center it and to size the shapes
//! around it. [`TextMeasurement::Shaped`] runs the text through cosmic-text
//! with the system fonts; [`TextMeasurement::Approximate`] uses a fixed
//! average glyph width and gives identical results on every machine.
//!
//! ```
//! # use sapling_core::draw::{TextDefinition, TextMeasurement};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14);
//!
//! let size = style.measure("WhileStmt", TextMeasurement::Approximate);
//! assert!(size.width() > 0.0);
//! assert_eq!(size.height(), style.line_height());
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};
use serde::Deserialize;

use crate::{color::Color, geometry::Size};

/// Points to pixels at the standard 96 DPI.
const POINTS_TO_PIXELS: f32 = 1.33;
/// Line height relative to the font size in pixels.
const LINE_HEIGHT_FACTOR: f32 = 1.15;
/// Average glyph advance relative to the font size in pixels.
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

/// Strategy used to measure text widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMeasurement {
    /// Shape the text with the installed fonts.
    #[default]
    Shaped,
    /// Estimate from the character count.
    Approximate,
}

/// Defines the visual style of label and value text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Helvetica"` |
/// | Font size | `12` |
/// | Text color | `None` (backend default, typically black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family, e.g. "Helvetica" or "monospace".
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` keeps the backend default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the text color, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the font size converted to pixels.
    pub fn font_size_px(&self) -> f32 {
        f32::from(self.font_size) * POINTS_TO_PIXELS
    }

    /// Returns the height of one line of text.
    pub fn line_height(&self) -> f32 {
        self.font_size_px() * LINE_HEIGHT_FACTOR
    }

    /// Measures `text` with this definition.
    ///
    /// Empty text measures as zero. Each line break adds one
    /// [`line_height`](Self::line_height) to the result.
    pub fn measure(&self, text: &str, mode: TextMeasurement) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        match mode {
            TextMeasurement::Shaped => TEXT_MANAGER
                .get_or_init(TextManager::new)
                .calculate_text_size(text, self),
            TextMeasurement::Approximate => self.approximate_size(text),
        }
    }

    fn approximate_size(&self, text: &str) -> Size {
        let glyph_width = self.font_size_px() * AVERAGE_GLYPH_WIDTH;
        let (lines, widest) = text.lines().fold((0usize, 0usize), |(lines, widest), line| {
            (lines + 1, widest.max(line.chars().count()))
        });
        Size::new(
            widest as f32 * glyph_width,
            lines.max(1) as f32 * self.line_height(),
        )
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 12,
            color: None,
        }
    }
}

/// Owns the font database shared by every shaped measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Shapes `text` and returns the extent of its layout runs.
    ///
    /// Falls back to the approximate size when shaping produces no runs, which
    /// happens on systems without any usable font.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let metrics = Metrics::new(text_def.font_size_px(), text_def.line_height());
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if total_height == 0.0 {
            debug!(text; "Shaping produced no layout runs, using approximate size");
            return text_def.approximate_size(text);
        }
        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
