//! Page geometry and spacing used by the layout.

use sapling_core::geometry::Size;

use super::ValidationError;

/// Geometry shared by every layout pass.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | Page size | A4 landscape, `841.89 x 595.28` |
/// | Level spacing | `60.0` |
/// | Label padding | `4.0` |
/// | Ellipse padding | `6.0` |
/// | Minimum ellipse radius | `12.0` |
/// | Ellipse vertical radius | `14.0` |
/// | Text scale | `1.0` |
///
/// # Example
///
/// ```
/// # use sapling::layout::LayoutSettings;
/// # use sapling::geometry::Size;
/// let settings = LayoutSettings::default()
///     .with_page_size(Size::new(400.0, 300.0))
///     .with_level_spacing(50.0);
///
/// assert_eq!(settings.row_y(0), 250.0);
/// assert_eq!(settings.row_y(1), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    page_size: Size,
    level_spacing: f32,
    padding: f32,
    ellipse_padding: f32,
    min_ellipse_radius: f32,
    ellipse_radius_y: f32,
    text_scale: f32,
}

impl LayoutSettings {
    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: Size) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the vertical distance between two levels.
    pub fn with_level_spacing(mut self, level_spacing: f32) -> Self {
        self.level_spacing = level_spacing;
        self
    }

    /// Sets the gap between a label and its box.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the horizontal gap between a value and its ellipse.
    pub fn with_ellipse_padding(mut self, ellipse_padding: f32) -> Self {
        self.ellipse_padding = ellipse_padding;
        self
    }

    /// Sets the smallest horizontal radius of a value ellipse.
    pub fn with_min_ellipse_radius(mut self, min_ellipse_radius: f32) -> Self {
        self.min_ellipse_radius = min_ellipse_radius;
        self
    }

    /// Sets the vertical radius of every value ellipse.
    pub fn with_ellipse_radius_y(mut self, ellipse_radius_y: f32) -> Self {
        self.ellipse_radius_y = ellipse_radius_y;
        self
    }

    /// Sets the scale between measured text widths and page units.
    pub fn with_text_scale(mut self, text_scale: f32) -> Self {
        self.text_scale = text_scale;
        self
    }

    /// Returns the page size.
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Returns the vertical distance between two levels.
    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    /// Returns the gap between a label and its box.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Returns the horizontal gap between a value and its ellipse.
    pub fn ellipse_padding(&self) -> f32 {
        self.ellipse_padding
    }

    /// Returns the smallest horizontal radius of a value ellipse.
    pub fn min_ellipse_radius(&self) -> f32 {
        self.min_ellipse_radius
    }

    /// Returns the vertical radius of every value ellipse.
    pub fn ellipse_radius_y(&self) -> f32 {
        self.ellipse_radius_y
    }

    /// Returns the scale between measured text widths and page units.
    pub fn text_scale(&self) -> f32 {
        self.text_scale
    }

    /// Returns the baseline of the row at `level`.
    ///
    /// Rows grow downward from the top of the page, one `level_spacing` each:
    /// `page_height - level_spacing * (level + 1)`.
    pub fn row_y(&self, level: usize) -> f32 {
        self.page_size.height() - self.level_spacing * (level as f32 + 1.0)
    }

    /// Returns how many rows have their baseline on the page.
    pub fn rows_on_page(&self) -> usize {
        (self.page_size.height() / self.level_spacing).floor() as usize
    }

    /// Checks that the settings describe a usable page.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSettings`] naming the first setting
    /// that is not finite or out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("page width", self.page_size.width()),
            ("page height", self.page_size.height()),
            ("level spacing", self.level_spacing),
            ("text scale", self.text_scale),
        ];
        let non_negative = [
            ("padding", self.padding),
            ("ellipse padding", self.ellipse_padding),
            ("minimum ellipse radius", self.min_ellipse_radius),
            ("ellipse vertical radius", self.ellipse_radius_y),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidSettings(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidSettings(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        self.check_value_clearance(0.0)
    }

    /// Checks that a value whose text is `text_height` tall leaves room for
    /// its connector.
    ///
    /// The connector runs down from the leaf box, `padding` below the leaf
    /// row, to the top of the ellipse, `text_height / 2 + ellipse_radius_y`
    /// above the value row. One `level_spacing` must cover both.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSettings`] if the connector would
    /// run upward.
    pub fn check_value_clearance(&self, text_height: f32) -> Result<(), ValidationError> {
        let needed = text_height / 2.0 + self.ellipse_radius_y + self.padding;
        if self.level_spacing < needed {
            return Err(ValidationError::InvalidSettings(format!(
                "level spacing {} leaves no room for value connectors, needs at least {needed}",
                self.level_spacing
            )));
        }
        Ok(())
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_size: Size::new(841.89, 595.28),
            level_spacing: 60.0,
            padding: 4.0,
            ellipse_padding: 6.0,
            min_ellipse_radius: 12.0,
            ellipse_radius_y: 14.0,
            text_scale: 1.0,
        }
    }
}
