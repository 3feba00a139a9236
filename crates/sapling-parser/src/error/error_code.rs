//! Error codes for outline diagnostics.
//!
//! Codes are grouped by what went wrong:
//! - `E0xx` - Malformed string values
//! - `E1xx` - Malformed node entries
//! - `E2xx` - Broken outline structure

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Value Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A quoted value was opened but never closed on the same line.
    E001,

    /// Invalid escape sequence.
    ///
    /// Valid escapes are: `\n`, `\t`, `\r`, `\\`, `\"`, `\'`.
    E002,

    // =========================================================================
    // Entry Errors (E1xx)
    // =========================================================================
    /// Missing node name.
    ///
    /// A line starts with `:` or `=` instead of a node name.
    E100,

    /// Unexpected input.
    ///
    /// Something other than a type, a value or a comment follows the name.
    E101,

    // =========================================================================
    // Structure Errors (E2xx)
    // =========================================================================
    /// Inconsistent indentation.
    ///
    /// A dedent does not return to an enclosing level, or tabs and spaces are
    /// mixed between a parent and its children.
    E200,

    /// Multiple roots.
    ///
    /// A second node appears at the indentation of the root.
    E201,

    /// Empty outline.
    ///
    /// The source contains no node at all.
    E202,

    /// Indented root.
    ///
    /// The first node of the outline is indented.
    E203,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "invalid escape sequence",
            ErrorCode::E100 => "missing node name",
            ErrorCode::E101 => "unexpected input",
            ErrorCode::E200 => "inconsistent indentation",
            ErrorCode::E201 => "multiple roots",
            ErrorCode::E202 => "empty outline",
            ErrorCode::E203 => "indented root",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated string literal");
        assert_eq!(ErrorCode::E200.description(), "inconsistent indentation");
        assert_eq!(ErrorCode::E202.description(), "empty outline");
    }
}
