//! Drives the layout passes against a backend.
//!
//! # Pipeline Position
//!
//! ```text
//! Tree
//!     ↓ validate
//!     ↓ begin_page
//!     ↓ text pass (inside a text block)
//!     ↓ shape pass
//!     ↓ line pass
//!     ↓ end_page, save
//! Document
//! ```
//!
//! The backend is held by a [`DocumentSession`] for the whole render, so it
//! is closed exactly once whether the render succeeds or fails.

mod passes;
mod session;

pub use passes::{LinePass, ShapePass, TextPass};
pub use session::DocumentSession;

use std::path::Path;

use log::{debug, info, warn};

use sapling_core::tree::Tree;

use crate::{
    SaplingError,
    backend::{Backend, Canvas},
    layout::{EmptyNamePolicy, LayoutEngine, Span, ValidationError, validate},
};

/// Renders trees with a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    engine: LayoutEngine,
    empty_names: EmptyNamePolicy,
}

impl Renderer {
    pub fn new(engine: LayoutEngine, empty_names: EmptyNamePolicy) -> Self {
        Self {
            engine,
            empty_names,
        }
    }

    /// Returns the layout engine.
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Returns the span the root is placed in: the full page width.
    pub fn page_span(&self) -> Result<Span, SaplingError> {
        let width = self.engine.settings().page_size().width();
        Ok(Span::new(0.0, width)?)
    }

    /// Draws `tree` onto one page of `backend`, saves it to `output` if given,
    /// and closes the backend.
    ///
    /// # Errors
    ///
    /// Returns [`SaplingError::Validation`] before anything is drawn if the
    /// tree or the settings are invalid, and [`SaplingError::Backend`] if any
    /// backend call fails. The backend is closed in every case.
    pub fn render<B: Backend + ?Sized>(
        &self,
        tree: &Tree,
        backend: &mut B,
        output: Option<&Path>,
    ) -> Result<(), SaplingError> {
        let settings = self.engine.settings();
        let mut session = DocumentSession::new(backend);

        settings.validate()?;
        validate(tree, self.empty_names)?;
        let span = self.page_span()?;
        let backend = session.backend();
        self.check_value_clearance(tree, &*backend)?;
        self.check_page_depth(tree);

        info!(nodes = tree.node_count(), depth = tree.depth(); "Rendering tree");
        backend.begin_page(settings.page_size())?;

        backend.begin_text()?;
        let mut text_pass = TextPass::new(&mut *backend, settings);
        self.engine.traverse(tree, span, &mut text_pass)?;
        let texts = text_pass.drawn();
        backend.end_text()?;

        let mut shape_pass = ShapePass::new(&mut *backend, settings);
        self.engine.traverse(tree, span, &mut shape_pass)?;
        let shapes = shape_pass.drawn();

        let mut line_pass = LinePass::new(&mut *backend, settings);
        self.engine.traverse(tree, span, &mut line_pass)?;
        let lines = line_pass.drawn();
        debug!(texts, shapes, lines; "Passes complete");

        backend.end_page()?;
        if let Some(path) = output {
            backend.save(path)?;
        }
        session.finish()?;

        info!("Tree rendered");
        Ok(())
    }

    /// Checks the tallest value against the row spacing, as measured by `canvas`.
    fn check_value_clearance<C: Canvas + ?Sized>(
        &self,
        tree: &Tree,
        canvas: &C,
    ) -> Result<(), ValidationError> {
        let tallest = tree
            .iter()
            .filter(|node| node.is_leaf())
            .filter_map(|node| node.value())
            .map(|value| canvas.text_height(value))
            .fold(0.0, f32::max);
        self.engine.settings().check_value_clearance(tallest)
    }

    /// Warns when the lowest row falls below the bottom of the page.
    fn check_page_depth(&self, tree: &Tree) {
        let rows = tree
            .iter()
            .map(|node| {
                let value_row = usize::from(node.is_leaf() && node.value().is_some());
                node.level() + value_row + 1
            })
            .max()
            .unwrap_or(1);

        let available = self.engine.settings().rows_on_page();
        if rows > available {
            warn!(
                rows,
                available,
                level_spacing = self.engine.settings().level_spacing();
                "Tree is deeper than the page, lower rows are cut off"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use sapling_core::geometry::Size;

    use super::*;
    use crate::{
        backend::{
            BackendError,
            recording::{DrawCommand, RecordingBackend},
        },
        layout::LayoutSettings,
    };

    fn renderer() -> Renderer {
        let settings = LayoutSettings::default().with_page_size(Size::new(400.0, 300.0));
        Renderer::new(LayoutEngine::new(settings), EmptyNamePolicy::Reject)
    }

    fn scenario() -> Tree {
        Tree::new("A")
            .with_child(Tree::new("B"))
            .with_child(Tree::leaf("C", "10"))
    }

    fn kinds(backend: &RecordingBackend) -> Vec<&'static str> {
        backend.commands().iter().map(DrawCommand::kind).collect()
    }

    #[test]
    fn test_render_order() {
        let mut backend = RecordingBackend::new();
        renderer()
            .render(&scenario(), &mut backend, Some(Path::new("tree.svg")))
            .unwrap();

        let kinds = kinds(&backend);
        assert_eq!(kinds.first(), Some(&"begin_page"));
        assert_eq!(kinds[1], "begin_text");

        let end_text = kinds.iter().position(|k| *k == "end_text").unwrap();
        assert!(kinds[..end_text].iter().all(|k| !k.starts_with("draw_") || *k == "draw_text"));
        assert!(kinds[end_text..].iter().all(|k| *k != "draw_text"));
        assert_eq!(kinds[kinds.len() - 3..], ["end_page", "save", "close"]);
        assert_eq!(backend.close_calls(), 1);
    }

    #[test]
    fn test_render_counts() {
        let mut backend = RecordingBackend::new();
        renderer().render(&scenario(), &mut backend, None).unwrap();

        let count = |kind: &str| kinds(&backend).iter().filter(|k| **k == kind).count();
        assert_eq!(count("draw_text"), 4);
        assert_eq!(count("draw_rectangle"), 3);
        assert_eq!(count("draw_ellipse"), 1);
        assert_eq!(count("draw_line"), 3);
        assert_eq!(count("save"), 0);
    }

    #[test]
    fn test_single_root_renders_one_of_each() {
        let mut backend = RecordingBackend::new();
        renderer()
            .render(&Tree::new("Alone"), &mut backend, None)
            .unwrap();

        let kinds = kinds(&backend);
        assert_eq!(kinds.iter().filter(|k| **k == "draw_text").count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == "draw_rectangle").count(), 1);
        assert!(!kinds.contains(&"draw_line"));
        assert!(!kinds.contains(&"draw_ellipse"));
    }

    #[test]
    fn test_validation_error_draws_nothing_but_closes() {
        let mut backend = RecordingBackend::new();
        let tree = Tree::new("A").with_child(Tree::new(""));
        let err = renderer().render(&tree, &mut backend, None).unwrap_err();

        assert!(matches!(
            err,
            SaplingError::Validation(ValidationError::EmptyName { level: 1, .. })
        ));
        assert_eq!(kinds(&backend), ["close"]);
    }

    #[test]
    fn test_empty_names_allowed() {
        let mut backend = RecordingBackend::new();
        let tree = Tree::new("A").with_child(Tree::new(""));
        let renderer = Renderer::new(renderer().engine().clone(), EmptyNamePolicy::Allow);

        renderer.render(&tree, &mut backend, None).unwrap();
        let empty = backend.commands().iter().any(|command| {
            matches!(command, DrawCommand::Text { text, .. } if text.is_empty())
        });
        assert!(empty);
    }

    #[test]
    fn test_backend_failure_still_closes() {
        for kind in ["begin_page", "draw_text", "draw_ellipse", "draw_line", "save"] {
            let mut backend = RecordingBackend::new().with_failure(kind);
            let err = renderer()
                .render(&scenario(), &mut backend, Some(Path::new("tree.svg")))
                .unwrap_err();

            assert!(
                matches!(err, SaplingError::Backend(BackendError::Failed(_))),
                "{kind}: {err:?}"
            );
            assert_eq!(backend.close_calls(), 1, "{kind}");
        }
    }

    #[test]
    fn test_failed_close_is_reported() {
        let mut backend = RecordingBackend::new().with_failure("close");
        let err = renderer()
            .render(&scenario(), &mut backend, None)
            .unwrap_err();

        assert!(matches!(err, SaplingError::Backend(_)));
        assert_eq!(backend.close_calls(), 1);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = LayoutSettings::default().with_level_spacing(-5.0);
        let renderer = Renderer::new(LayoutEngine::new(settings), EmptyNamePolicy::Reject);
        let mut backend = RecordingBackend::new();

        let err = renderer.render(&scenario(), &mut backend, None).unwrap_err();
        assert!(matches!(
            err,
            SaplingError::Validation(ValidationError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_tall_value_needs_more_spacing() {
        // A one line value is 12 high: 6 + 14 + 4 fits in 24 but not in 23.
        let tree = Tree::new("A").with_child(Tree::leaf("B", "1"));
        let tight = |spacing| {
            let settings = LayoutSettings::default().with_level_spacing(spacing);
            Renderer::new(LayoutEngine::new(settings), EmptyNamePolicy::Reject)
        };

        let mut backend = RecordingBackend::new();
        let err = tight(23.0).render(&tree, &mut backend, None).unwrap_err();
        assert!(matches!(
            err,
            SaplingError::Validation(ValidationError::InvalidSettings(_))
        ));
        assert_eq!(kinds(&backend), ["close"]);

        let mut backend = RecordingBackend::new();
        tight(24.0).render(&tree, &mut backend, None).unwrap();

        let mut backend = RecordingBackend::new();
        let multi_line = Tree::new("A").with_child(Tree::leaf("B", "1\n2"));
        assert!(tight(24.0).render(&multi_line, &mut backend, None).is_err());

        let mut backend = RecordingBackend::new();
        let no_values = Tree::new("A").with_child(Tree::new("B"));
        tight(23.0).render(&no_values, &mut backend, None).unwrap();
    }

    #[test]
    fn test_deep_tree_still_renders() {
        let deep = (0..12).fold(Tree::new("Leaf"), |tree, i| {
            Tree::new(format!("Level{i}")).with_child(tree)
        });
        let mut backend = RecordingBackend::new();
        renderer().render(&deep, &mut backend, None).unwrap();
        assert_eq!(backend.close_calls(), 1);
    }
}
