//! Diagnostics reported while reading an outline.
//!
//! Every problem found in the source becomes a [`Diagnostic`] carrying an
//! [`ErrorCode`], a message, labeled [`Span`](crate::Span)s and optional help
//! text. The parser keeps going after an error, so one [`ParseError`] can hold
//! the diagnostics of every broken line at once.
//!
//! # Example
//!
//! ```
//! # use sapling_parser::error::{Diagnostic, ErrorCode};
//! # use sapling_parser::Span;
//! let diag = Diagnostic::error("inconsistent indentation")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(12..14), "does not match any enclosing level")
//!     .with_secondary_label(Span::new(4..8), "parent indented here")
//!     .with_help("indent with the same characters as the enclosing lines");
//!
//! assert_eq!(diag.to_string(), "error[E200]: inconsistent indentation");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
