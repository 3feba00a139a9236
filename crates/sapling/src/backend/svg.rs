//! SVG backend.
//!
//! [`SvgBackend`] builds a single-page SVG document with the `svg` crate.
//! Drawing calls use page coordinates (y-up); the backend flips them into
//! SVG's y-down space when it creates elements. Elements are grouped by
//! layer so that connectors lie beneath shapes and text lies on top, in
//! whatever order the passes draw them.
//!
//! ```
//! # use sapling::backend::{Backend, Canvas, svg::{SvgBackend, SvgStyle}};
//! # use sapling::geometry::{Point, Size};
//! let mut backend = SvgBackend::new(SvgStyle::default());
//! backend.begin_page(Size::new(200.0, 100.0))?;
//! backend.draw_line(Point::new(0.0, 0.0), Point::new(200.0, 100.0))?;
//! backend.end_page()?;
//!
//! let svg = backend.to_svg_string()?;
//! assert!(svg.contains(r#"viewBox="0 0 200 100""#));
//! # Ok::<(), sapling::backend::BackendError>(())
//! ```

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use sapling_core::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, TextDefinition, TextMeasurement},
    geometry::{Bounds, Point, Size},
};

use super::{Backend, BackendError, Canvas};

type SvgNode = Box<dyn svg::Node>;

/// Z-order of the elements on a page, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Connector,
    Shape,
    Text,
}

impl Layer {
    fn name(self) -> &'static str {
        match self {
            Self::Connector => "connector",
            Self::Shape => "shape",
            Self::Text => "text",
        }
    }
}

/// Visual style of the SVG output.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Text | [`TextDefinition::default`] |
/// | Measurement | [`TextMeasurement::Shaped`] |
/// | Stroke | black, 1.0, solid |
/// | Label fill | `None` (white) |
/// | Value fill | `None` (white) |
/// | Background | `None` (transparent) |
#[derive(Debug, Clone, Default)]
pub struct SvgStyle {
    text: TextDefinition,
    measurement: TextMeasurement,
    stroke: StrokeDefinition,
    label_fill: Option<Color>,
    value_fill: Option<Color>,
    background: Option<Color>,
}

impl SvgStyle {
    /// Sets the font used for labels and values.
    pub fn with_text(mut self, text: TextDefinition) -> Self {
        self.text = text;
        self
    }

    /// Sets how text is measured.
    pub fn with_measurement(mut self, measurement: TextMeasurement) -> Self {
        self.measurement = measurement;
        self
    }

    /// Sets the stroke of connectors and shape outlines.
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the fill of label boxes.
    pub fn with_label_fill(mut self, fill: Option<Color>) -> Self {
        self.label_fill = fill;
        self
    }

    /// Sets the fill of value ellipses.
    pub fn with_value_fill(mut self, fill: Option<Color>) -> Self {
        self.value_fill = fill;
        self
    }

    /// Sets the page background.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    pub fn measurement(&self) -> TextMeasurement {
        self.measurement
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// The page being drawn.
#[derive(Debug)]
struct Page {
    size: Size,
    cursor: Point,
    in_text: bool,
    items: Vec<(Layer, SvgNode)>,
}

impl Page {
    fn flip_y(&self, y: f32) -> f32 {
        self.size.height() - y
    }

    fn add(&mut self, layer: Layer, node: impl Into<SvgNode>) {
        self.items.push((layer, node.into()));
    }
}

/// Draws onto a single-page SVG document.
#[derive(Debug)]
pub struct SvgBackend {
    style: SvgStyle,
    page: Option<Page>,
    document: Option<Document>,
    closed: bool,
}

impl SvgBackend {
    /// Creates a backend with no page.
    pub fn new(style: SvgStyle) -> Self {
        Self {
            style,
            page: None,
            document: None,
            closed: false,
        }
    }

    /// Returns the style in use.
    pub fn style(&self) -> &SvgStyle {
        &self.style
    }

    /// Returns the finished document, once [`Backend::end_page`] was called.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Returns the finished document as SVG text.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NoDocument`] before the page is finished.
    pub fn to_svg_string(&self) -> Result<String, BackendError> {
        self.document
            .as_ref()
            .map(ToString::to_string)
            .ok_or(BackendError::NoDocument)
    }

    fn page(&mut self) -> Result<&mut Page, BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        self.page.as_mut().ok_or(BackendError::NoPage)
    }

    fn text_page(&mut self, operation: &'static str) -> Result<&mut Page, BackendError> {
        let page = self.page()?;
        if !page.in_text {
            return Err(BackendError::OutsideTextBlock(operation));
        }
        Ok(page)
    }

    fn shape_page(&mut self, operation: &'static str) -> Result<&mut Page, BackendError> {
        let page = self.page()?;
        if page.in_text {
            return Err(BackendError::InsideTextBlock(operation));
        }
        Ok(page)
    }

    fn measure(&self, text: &str) -> Size {
        self.style.text.measure(text, self.style.measurement)
    }

    fn fill(color: Option<Color>) -> String {
        color.map_or_else(|| "white".to_string(), |color| color.to_string())
    }
}

impl Canvas for SvgBackend {
    fn text_width(&self, text: &str) -> f32 {
        self.measure(text).width()
    }

    fn text_height(&self, text: &str) -> f32 {
        self.measure(text).height()
    }

    fn begin_text(&mut self) -> Result<(), BackendError> {
        let page = self.shape_page("open a text block")?;
        page.in_text = true;
        page.cursor = Point::default();
        Ok(())
    }

    fn end_text(&mut self) -> Result<(), BackendError> {
        let page = self.text_page("close a text block")?;
        page.in_text = false;
        Ok(())
    }

    fn move_cursor_by(&mut self, dx: f32, dy: f32) -> Result<(), BackendError> {
        let page = self.text_page("move the cursor")?;
        page.cursor = page.cursor.add_point(Point::new(dx, dy));
        Ok(())
    }

    fn draw_text(&mut self, text: &str) -> Result<(), BackendError> {
        let definition = self.style.text.clone();
        let page = self.text_page("draw text")?;
        if text.is_empty() {
            return Ok(());
        }

        let lines: Vec<&str> = text.lines().collect();
        let line_height = definition.line_height();
        let x = page.cursor.x();
        // The last line sits on the cursor's baseline, earlier lines above it.
        let first_baseline =
            page.flip_y(page.cursor.y()) - lines.len().saturating_sub(1) as f32 * line_height;

        let mut element = svg_element::Text::new("")
            .set("x", x)
            .set("y", first_baseline)
            .set("font-family", definition.font_family())
            .set("font-size", definition.font_size_px())
            .set("xml:space", "preserve");

        if let Some(color) = definition.color() {
            element = element
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (i, line) in lines.into_iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("dy", dy)
                .add(SvgText::new(line));
            element = element.add(tspan);
        }

        page.add(Layer::Text, element);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), BackendError> {
        let stroke = self.style.stroke.clone();
        let page = self.shape_page("draw a line")?;

        let line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", page.flip_y(from.y()))
            .set("x2", to.x())
            .set("y2", page.flip_y(to.y()));
        page.add(Layer::Connector, apply_stroke!(line, &stroke));
        Ok(())
    }

    fn draw_rectangle(&mut self, bounds: Bounds) -> Result<(), BackendError> {
        let stroke = self.style.stroke.clone();
        let fill = Self::fill(self.style.label_fill);
        let page = self.shape_page("draw a rectangle")?;

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", page.flip_y(bounds.max_y()))
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", fill);
        page.add(Layer::Shape, apply_stroke!(rect, &stroke));
        Ok(())
    }

    fn draw_ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    ) -> Result<(), BackendError> {
        let stroke = self.style.stroke.clone();
        let fill = Self::fill(self.style.value_fill);
        let page = self.shape_page("draw an ellipse")?;

        let ellipse = svg_element::Ellipse::new()
            .set("cx", center.x())
            .set("cy", page.flip_y(center.y()))
            .set("rx", radius_x)
            .set("ry", radius_y)
            .set("fill", fill);
        page.add(Layer::Shape, apply_stroke!(ellipse, &stroke));
        Ok(())
    }
}

impl Backend for SvgBackend {
    fn begin_page(&mut self, size: Size) -> Result<(), BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        if self.page.is_some() {
            return Err(BackendError::PageOpen);
        }
        if self.document.is_some() {
            return Err(BackendError::SinglePage);
        }

        debug!(width = size.width(), height = size.height(); "Beginning SVG page");
        self.page = Some(Page {
            size,
            cursor: Point::default(),
            in_text: false,
            items: Vec::new(),
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), BackendError> {
        self.shape_page("finish a page")?;
        let Some(mut page) = self.page.take() else {
            return Err(BackendError::NoPage);
        };

        let (width, height) = (page.size.width(), page.size.height());
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = self.style.background {
            let bg = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            doc = doc.add(bg);
        }

        // Stable sort keeps drawing order inside a layer.
        page.items.sort_by_key(|(layer, _)| *layer);
        let element_count = page.items.len();
        let mut current: Option<(Layer, svg_element::Group)> = None;
        for (layer, node) in page.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((layer, group.add(node)))
                }
                finished => {
                    if let Some((_, group)) = finished {
                        doc = doc.add(group);
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }
        if let Some((_, group)) = current {
            doc = doc.add(group);
        }

        debug!(elements = element_count; "SVG page finished");
        self.document = Some(doc);
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<(), BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        let Some(doc) = &self.document else {
            return Err(BackendError::NoDocument);
        };

        let file_name = path.display().to_string();
        info!(file_name; "Creating SVG file");
        let mut file = File::create(path).map_err(|err| {
            error!(file_name, err:err; "Failed to create SVG file");
            BackendError::Io(err)
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(file_name, err:err; "Failed to write SVG content");
            BackendError::Io(err)
        })?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), BackendError> {
        if self.closed {
            return Err(BackendError::Closed);
        }
        self.closed = true;
        self.page = None;
        debug!(finished = self.document.is_some(); "SVG backend closed");
        Ok(())
    }
}
