//! Configuration types for Sapling tree rendering.
//!
//! This module provides configuration structures that control how trees are
//! laid out and styled. All types implement [`serde::Deserialize`] so they can
//! be loaded from external sources, and every field falls back to a default
//! when it is missing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Page geometry, spacing, and the empty name policy.
//! - [`StyleConfig`] - Fonts, colors, and strokes of the SVG output.
//!
//! # Example
//!
//! ```
//! # use sapling::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().svg_style().is_ok());
//! assert_eq!(config.layout().settings().level_spacing(), 60.0);
//! ```

use serde::Deserialize;

use sapling_core::{
    color::Color,
    draw::{StrokeDefinition, StrokeStyle, TextDefinition, TextMeasurement},
    geometry::Size,
};

use crate::{
    backend::svg::SvgStyle,
    layout::{EmptyNamePolicy, LayoutSettings},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Page geometry and spacing.
///
/// Missing fields take the values of [`LayoutSettings::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    page_width: f32,
    page_height: f32,
    level_spacing: f32,
    padding: f32,
    ellipse_padding: f32,
    min_ellipse_radius: f32,
    ellipse_radius_y: f32,
    text_scale: f32,
    empty_names: EmptyNamePolicy,
}

impl LayoutConfig {
    /// Returns the [`LayoutSettings`] described by this section.
    ///
    /// The settings are not validated here; rendering rejects invalid ones.
    pub fn settings(&self) -> LayoutSettings {
        LayoutSettings::default()
            .with_page_size(Size::new(self.page_width, self.page_height))
            .with_level_spacing(self.level_spacing)
            .with_padding(self.padding)
            .with_ellipse_padding(self.ellipse_padding)
            .with_min_ellipse_radius(self.min_ellipse_radius)
            .with_ellipse_radius_y(self.ellipse_radius_y)
            .with_text_scale(self.text_scale)
    }

    /// Returns how nodes with empty names are treated.
    pub fn empty_names(&self) -> EmptyNamePolicy {
        self.empty_names
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let settings = LayoutSettings::default();
        Self {
            page_width: settings.page_size().width(),
            page_height: settings.page_size().height(),
            level_spacing: settings.level_spacing(),
            padding: settings.padding(),
            ellipse_padding: settings.ellipse_padding(),
            min_ellipse_radius: settings.min_ellipse_radius(),
            ellipse_radius_y: settings.ellipse_radius_y(),
            text_scale: settings.text_scale(),
            empty_names: EmptyNamePolicy::default(),
        }
    }
}

/// Visual styling configuration for rendered trees.
///
/// Colors and strokes are kept as strings and parsed on access, so that a
/// bad value is reported with the name of the field it came from. Fields
/// that are not set fall back to [`SvgStyle::default`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    font_family: Option<String>,
    #[serde(default)]
    font_size: Option<u16>,
    #[serde(default)]
    text_color: Option<String>,
    #[serde(default)]
    line_color: Option<String>,
    #[serde(default)]
    line_width: Option<f32>,
    #[serde(default)]
    line_style: Option<String>,
    #[serde(default)]
    label_fill: Option<String>,
    #[serde(default)]
    value_fill: Option<String>,
    #[serde(default)]
    text_measurement: TextMeasurement,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed text [`Color`], or `None` for the backend default.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.text_color.as_deref(), "text")
    }

    /// Returns the parsed fill of label boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn label_fill(&self) -> Result<Option<Color>, String> {
        parse_color(self.label_fill.as_deref(), "label fill")
    }

    /// Returns the parsed fill of value ellipses.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn value_fill(&self) -> Result<Option<Color>, String> {
        parse_color(self.value_fill.as_deref(), "value fill")
    }

    /// Returns the text definition with the configured font and color.
    ///
    /// # Errors
    ///
    /// Returns an error if the text color is invalid or the font size is zero.
    pub fn text(&self) -> Result<TextDefinition, String> {
        let mut text = TextDefinition::default();
        if let Some(family) = &self.font_family {
            text.set_font_family(family);
        }
        if let Some(size) = self.font_size {
            if size == 0 {
                return Err("Invalid font size in config: must be positive".to_string());
            }
            text.set_font_size(size);
        }
        text.set_color(self.text_color()?);
        Ok(text)
    }

    /// Returns the stroke used for connectors and shape outlines.
    ///
    /// # Errors
    ///
    /// Returns an error if the line color, width, or style is invalid.
    pub fn stroke(&self) -> Result<StrokeDefinition, String> {
        let mut stroke = StrokeDefinition::default();
        if let Some(color) = parse_color(self.line_color.as_deref(), "line")? {
            stroke.set_color(color);
        }
        if let Some(width) = self.line_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(format!(
                    "Invalid line width in config: {width}, must be positive"
                ));
            }
            stroke.set_width(width);
        }
        if let Some(style) = &self.line_style {
            let style = style
                .parse::<StrokeStyle>()
                .map_err(|err| format!("Invalid line style in config: {err}"))?;
            stroke.set_style(style);
        }
        Ok(stroke)
    }

    /// Returns how text widths are measured.
    pub fn text_measurement(&self) -> TextMeasurement {
        self.text_measurement
    }

    /// Builds the complete [`SvgStyle`].
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn svg_style(&self) -> Result<SvgStyle, String> {
        Ok(SvgStyle::default()
            .with_text(self.text()?)
            .with_measurement(self.text_measurement)
            .with_stroke(self.stroke()?)
            .with_label_fill(self.label_fill()?)
            .with_value_fill(self.value_fill()?)
            .with_background(self.background_color()?))
    }
}

fn parse_color(color: Option<&str>, field: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} color in config: {err}"))
}
