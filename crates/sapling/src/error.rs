//! Error types for Sapling operations.
//!
//! This module provides the main error type [`SaplingError`] which wraps
//! the error conditions that can occur while reading, laying out and
//! rendering a tree.

use std::io;

use thiserror::Error;

use sapling_parser::error::ParseError;

use crate::{backend::BackendError, layout::ValidationError};

/// The main error type for Sapling operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans. This provides detailed error information that can be used for rich
/// error reporting.
///
/// Neither validation nor backend failures are transient: layout is a pure
/// function of the tree and the page geometry, so callers should not retry.
#[derive(Debug, Error)]
pub enum SaplingError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SaplingError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
