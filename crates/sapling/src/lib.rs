//! Sapling - Recursive layout and rendering of labeled trees.
//!
//! A tree is laid out top-down: the root is centered across the page, each
//! child receives an equal share of its parent's horizontal span, and every
//! level sits on its own row. Labels are drawn in boxes, leaf values in
//! ellipses one row below their leaf, and connectors join each node to its
//! parent. Drawing goes through the [`backend::Backend`] contract, so the same
//! layout can be recorded, inspected, or written out as SVG.

pub mod backend;
pub mod config;
pub mod layout;
pub mod render;

mod error;

pub use sapling_core::{color, draw, geometry, tree};

pub use error::SaplingError;

use std::path::Path;

use log::{debug, info, trace};

use backend::{Backend, svg::SvgBackend};
use config::AppConfig;
use layout::{LayoutEngine, LayoutRecorder, validate};
use render::Renderer;
use tree::Tree;

/// Entry point for parsing, laying out, and rendering trees.
///
/// # Examples
///
/// ```rust
/// use sapling::{TreeRenderer, config::AppConfig};
///
/// let source = "WhileStmt\n\tLtExpr\n\t\tName = j\n\t\tLiteral = 10\n";
///
/// let renderer = TreeRenderer::new(AppConfig::default());
///
/// // Parse source to a tree
/// let tree = renderer.parse(source)
///     .expect("Failed to parse");
///
/// // Render the tree to SVG
/// let svg = renderer.render_svg(&tree)
///     .expect("Failed to render");
/// assert!(svg.contains("WhileStmt"));
///
/// // Or use default config
/// let renderer = TreeRenderer::default();
/// ```
#[derive(Debug, Default)]
pub struct TreeRenderer {
    config: AppConfig,
}

impl TreeRenderer {
    /// Creates a renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses outline text into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`SaplingError::Parse`] carrying every diagnostic found in
    /// `source`, together with the source for error reporting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sapling::TreeRenderer;
    ///
    /// let tree = TreeRenderer::default()
    ///     .parse("Root\n\tChild = 1\n")
    ///     .expect("Failed to parse tree");
    /// assert_eq!(tree.node_count(), 2);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Tree, SaplingError> {
        info!("Parsing tree");
        let tree = sapling_parser::parse(source)
            .map_err(|err| SaplingError::new_parse_error(err, source))?;

        debug!(nodes = tree.node_count(), depth = tree.depth(); "Tree parsed successfully");
        trace!(tree:%; "Parsed tree");
        Ok(tree)
    }

    /// Computes the placement of every node and value without drawing.
    ///
    /// # Errors
    ///
    /// Returns [`SaplingError::Validation`] if the tree or the configured
    /// layout is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sapling::{TreeRenderer, tree::Tree};
    ///
    /// let tree = Tree::new("A").with_child(Tree::new("B"));
    /// let layout = TreeRenderer::default().layout(&tree).unwrap();
    /// assert_eq!(layout.nodes().len(), 2);
    /// ```
    pub fn layout(&self, tree: &Tree) -> Result<LayoutRecorder, SaplingError> {
        let renderer = self.renderer();
        renderer.engine().settings().validate()?;
        validate(tree, self.config.layout().empty_names())?;

        let mut recorder = LayoutRecorder::new();
        renderer
            .engine()
            .traverse(tree, renderer.page_span()?, &mut recorder)?;
        Ok(recorder)
    }

    /// Renders a tree to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`SaplingError::Config`] for an invalid style, and
    /// [`SaplingError::Validation`] or [`SaplingError::Backend`] if rendering
    /// fails.
    pub fn render_svg(&self, tree: &Tree) -> Result<String, SaplingError> {
        let mut backend = self.svg_backend()?;
        self.renderer().render(tree, &mut backend, None)?;

        let svg = backend.to_svg_string()?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Renders a tree to an SVG file at `path`.
    ///
    /// # Errors
    ///
    /// As [`render_svg`](Self::render_svg), plus [`SaplingError::Backend`]
    /// if the file cannot be written.
    pub fn render_to_file(&self, tree: &Tree, path: impl AsRef<Path>) -> Result<(), SaplingError> {
        let mut backend = self.svg_backend()?;
        self.renderer().render(tree, &mut backend, Some(path.as_ref()))
    }

    /// Renders a tree onto any backend, saving to `output` if given.
    ///
    /// The backend is closed when this returns, whether it succeeds or not.
    ///
    /// # Errors
    ///
    /// Returns [`SaplingError::Validation`] or [`SaplingError::Backend`].
    pub fn draw<B: Backend + ?Sized>(
        &self,
        tree: &Tree,
        backend: &mut B,
        output: Option<&Path>,
    ) -> Result<(), SaplingError> {
        self.renderer().render(tree, backend, output)
    }

    fn renderer(&self) -> Renderer {
        let layout = self.config.layout();
        Renderer::new(LayoutEngine::new(layout.settings()), layout.empty_names())
    }

    fn svg_backend(&self) -> Result<SvgBackend, SaplingError> {
        let style = self.config.style().svg_style().map_err(SaplingError::Config)?;
        Ok(SvgBackend::new(style))
    }
}
