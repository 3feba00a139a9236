//! The three drawing passes.
//!
//! Each pass is a [`Visitor`] over the same traversal and draws one kind of
//! element: [`TextPass`] the labels and values, [`ShapePass`] the boxes and
//! ellipses around them, [`LinePass`] the connectors. Shapes and connectors
//! are computed from the placement and the measured text alone, so the passes
//! agree on every coordinate.

use crate::{
    SaplingError,
    backend::Canvas,
    layout::{
        LayoutSettings, NodePlacement, ValuePlacement, Visitor,
        cursor::CursorTracker,
        geometry::{connector, label_bounds, value_connector, value_ellipse},
    },
};

/// Draws node names and leaf values, centered on their anchors.
///
/// Must run inside a text block.
pub struct TextPass<'a, C: Canvas + ?Sized> {
    cursor: CursorTracker<'a, C>,
    drawn: usize,
}

impl<'a, C: Canvas + ?Sized> TextPass<'a, C> {
    pub fn new(canvas: &'a mut C, settings: &LayoutSettings) -> Self {
        Self {
            cursor: CursorTracker::new(canvas, settings.text_scale()),
            drawn: 0,
        }
    }

    /// Returns the number of texts drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl<C: Canvas + ?Sized> Visitor for TextPass<'_, C> {
    type Error = SaplingError;

    fn visit_node(&mut self, placement: &NodePlacement<'_>) -> Result<(), Self::Error> {
        self.cursor
            .centered_text_at(placement.anchor(), placement.node().name())?;
        self.drawn += 1;
        Ok(())
    }

    fn visit_value(&mut self, placement: &ValuePlacement<'_>) -> Result<(), Self::Error> {
        self.cursor
            .centered_text_at(placement.anchor(), placement.value())?;
        self.drawn += 1;
        Ok(())
    }
}

/// Draws a padded box around every label and an ellipse around every value.
pub struct ShapePass<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    settings: &'a LayoutSettings,
    drawn: usize,
}

impl<'a, C: Canvas + ?Sized> ShapePass<'a, C> {
    pub fn new(canvas: &'a mut C, settings: &'a LayoutSettings) -> Self {
        Self {
            canvas,
            settings,
            drawn: 0,
        }
    }

    /// Returns the number of shapes drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl<C: Canvas + ?Sized> Visitor for ShapePass<'_, C> {
    type Error = SaplingError;

    fn visit_node(&mut self, placement: &NodePlacement<'_>) -> Result<(), Self::Error> {
        let text = self.canvas.text_size(placement.node().name());
        let bounds = label_bounds(placement.anchor(), text, self.settings.padding());
        self.canvas.draw_rectangle(bounds)?;
        self.drawn += 1;
        Ok(())
    }

    fn visit_value(&mut self, placement: &ValuePlacement<'_>) -> Result<(), Self::Error> {
        let text = self.canvas.text_size(placement.value());
        let ellipse = value_ellipse(placement.anchor(), text, self.settings);
        self.canvas
            .draw_ellipse(ellipse.center(), ellipse.radius_x(), ellipse.radius_y())?;
        self.drawn += 1;
        Ok(())
    }
}

/// Draws the connectors between parents and children, and between leaves and
/// their values.
pub struct LinePass<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    settings: &'a LayoutSettings,
    drawn: usize,
}

impl<'a, C: Canvas + ?Sized> LinePass<'a, C> {
    pub fn new(canvas: &'a mut C, settings: &'a LayoutSettings) -> Self {
        Self {
            canvas,
            settings,
            drawn: 0,
        }
    }

    /// Returns the number of connectors drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl<C: Canvas + ?Sized> Visitor for LinePass<'_, C> {
    type Error = SaplingError;

    fn visit_node(&mut self, placement: &NodePlacement<'_>) -> Result<(), Self::Error> {
        // The root has no connector.
        let Some(parent_anchor) = placement.parent_anchor() else {
            return Ok(());
        };

        let height = self.canvas.text_height(placement.node().name());
        let line = connector(
            placement.anchor(),
            height,
            parent_anchor,
            self.settings.padding(),
        );
        self.canvas.draw_line(line.start(), line.end())?;
        self.drawn += 1;
        Ok(())
    }

    fn visit_value(&mut self, placement: &ValuePlacement<'_>) -> Result<(), Self::Error> {
        let text = self.canvas.text_size(placement.value());
        let ellipse = value_ellipse(placement.anchor(), text, self.settings);
        let line = value_connector(ellipse, placement.owner_anchor(), self.settings.padding());
        self.canvas.draw_line(line.start(), line.end())?;
        self.drawn += 1;
        Ok(())
    }
}
