//! CLI logic for the Sapling tree renderer.
//!
//! This module contains the core CLI logic: load the configuration, read an
//! outline file, and write the rendered tree as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use sapling::{SaplingError, TreeRenderer};

/// Run the Sapling CLI application
///
/// This function reads the input outline, lays out the tree, and writes the
/// resulting SVG to the output file.
///
/// # Errors
///
/// Returns `SaplingError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), SaplingError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let renderer = TreeRenderer::new(app_config);
    let tree = renderer.parse(&source)?;
    renderer.render_to_file(&tree, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
