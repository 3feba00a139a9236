//! Parser for a single outline entry.
//!
//! An entry is the text of one line after its indentation:
//!
//! ```text
//! name [: type] [= value] [# comment]
//! ```
//!
//! A name or type that contains one of `:`, `=`, `#` or surrounding spaces is
//! written as a quoted string, with the same escapes as a quoted value.
//!
//! The value is either bare (everything up to a `#` or the end of the line,
//! trimmed) or a double-quoted string with escapes. Nesting is not handled
//! here; see [`builder`](crate::builder).

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, eof, opt, preceded, repeat, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, one_of, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// Rich diagnostic information for entry errors.
///
/// Attached to winnow errors via `.context()`; the error span runs from
/// `start` to the position where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EntryDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<EntryDiagnostic>>;

/// A parsed entry. Spans are relative to the start of the entry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub name: String,
    pub name_span: Span,
    pub value_type: Option<String>,
    pub value: Option<String>,
}

fn inline_space(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., [' ', '\t']).void().parse_next(input)
}

/// Parse the node name: a quoted string, or everything up to `:`, `=`, `#`
/// or the end.
fn name(input: &mut Input<'_>) -> IResult<(String, Span)> {
    alt((quoted_name, bare_name)).parse_next(input)
}

fn quoted_name(input: &mut Input<'_>) -> IResult<(String, Span)> {
    let start = input.current_token_start();
    let name = quoted_value.parse_next(input)?;
    let end = input.current_token_start();
    inline_space(input)?;
    Ok((name, Span::new(start..end)))
}

fn bare_name(input: &mut Input<'_>) -> IResult<(String, Span)> {
    let start = input.current_token_start();
    let raw: &str = take_while(0.., |c: char| !matches!(c, ':' | '=' | '#')).parse_next(input)?;
    let trimmed = raw.trim_end();

    if trimmed.is_empty() {
        return Err(ErrMode::Cut(ContextError::new().add_context(
            input,
            &input.checkpoint(),
            EntryDiagnostic {
                code: ErrorCode::E100,
                message: "missing node name",
                help: Some("start the line with the node name, e.g. `Literal = 10`"),
                start,
            },
        )));
    }

    Ok((trimmed.to_string(), Span::new(start..start + trimmed.len())))
}

/// Parse `: type`.
fn value_type(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();
    preceded(
        (':', inline_space),
        cut_err(alt((
            quoted_value,
            take_while(1.., |c: char| {
                !c.is_whitespace() && !matches!(c, ':' | '=' | '#' | '"')
            })
            .map(str::to_string),
        )))
        .context(EntryDiagnostic {
            code: ErrorCode::E101,
            message: "missing value type",
            help: Some("write the type after `:`, e.g. `Literal: int = 10`"),
            start,
        }),
    )
    .parse_next(input)
}

/// Parse an escape sequence inside a quoted value.
fn string_escape(input: &mut Input<'_>) -> IResult<char> {
    let escape_start = input.current_token_start();
    preceded(
        '\\',
        cut_err(one_of(['n', 't', 'r', '\\', '"', '\'']).map(|c| match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            other => other,
        }))
        .context(EntryDiagnostic {
            code: ErrorCode::E002,
            message: "invalid escape sequence",
            help: Some("valid escapes: `\\n`, `\\t`, `\\r`, `\\\\`, `\\\"`, `\\'`"),
            start: escape_start,
        }),
    )
    .parse_next(input)
}

/// Parse a double-quoted value.
fn quoted_value(input: &mut Input<'_>) -> IResult<String> {
    let string_content = repeat(0.., alt((string_escape, none_of(['"', '\\'])))).fold(
        String::new,
        |mut acc, ch| {
            acc.push(ch);
            acc
        },
    );

    let start = input.current_token_start();
    preceded(
        '"',
        cut_err(terminated(string_content, '"')).context(EntryDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"`"),
            start,
        }),
    )
    .parse_next(input)
}

/// Parse a bare value: everything up to `#` or the end, trimmed.
fn bare_value(input: &mut Input<'_>) -> IResult<String> {
    take_while(1.., |c: char| c != '#')
        .map(str::trim_end)
        .verify(|value: &str| !value.is_empty())
        .map(str::to_string)
        .parse_next(input)
}

/// Parse `= value`.
fn value(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();
    preceded(
        ('=', inline_space),
        cut_err(alt((quoted_value, bare_value))).context(EntryDiagnostic {
            code: ErrorCode::E101,
            message: "missing value",
            help: Some("write the value after `=`, or quote it to keep it empty: `= \"\"`"),
            start,
        }),
    )
    .parse_next(input)
}

fn comment(input: &mut Input<'_>) -> IResult<()> {
    preceded('#', take_while(0.., |_: char| true)).void().parse_next(input)
}

fn end_of_entry(input: &mut Input<'_>) -> IResult<()> {
    let start = input.current_token_start();
    cut_err(eof)
        .void()
        .context(EntryDiagnostic {
            code: ErrorCode::E101,
            message: "unexpected input",
            help: Some("only `: type`, `= value` and a `# comment` may follow the node name"),
            start,
        })
        .parse_next(input)
}

fn entry(input: &mut Input<'_>) -> IResult<Entry> {
    let (name, name_span) = name(input)?;
    let value_type = opt(value_type).parse_next(input)?;
    inline_space(input)?;
    let value = opt(value).parse_next(input)?;
    inline_space(input)?;
    opt(comment).parse_next(input)?;
    end_of_entry(input)?;

    Ok(Entry {
        name,
        name_span,
        value_type,
        value,
    })
}

/// Parse the text of one line (indentation already removed).
///
/// Errors are returned as a [`Diagnostic`] whose spans are relative to the
/// start of `text`.
pub(crate) fn parse_entry(text: &str) -> Result<Entry> {
    let mut input = LocatingSlice::new(text);
    entry(&mut input).map_err(|err| {
        let error_pos = input.current_token_start();
        convert_err_mode(err, error_pos, text.len())
    })
}

/// Convert an ErrMode and error position to a Diagnostic.
///
/// An empty span is widened to the rest of the line so that the report always
/// points at something.
fn convert_err_mode(
    err: ErrMode<ContextError<EntryDiagnostic>>,
    error_pos: usize,
    line_len: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let widen = |start: usize, end: usize| {
        if end > start {
            Span::new(start..end)
        } else {
            Span::new(start..line_len.max(start))
        }
    };

    if let Some(EntryDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(widen(*start, error_pos), code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    Diagnostic::error("unexpected input")
        .with_code(ErrorCode::E101)
        .with_label(widen(error_pos, error_pos), ErrorCode::E101.description())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(text: &str) -> Entry {
        match parse_entry(text) {
            Ok(entry) => entry,
            Err(diag) => panic!("failed to parse `{text}`: {diag}"),
        }
    }

    fn err(text: &str) -> Diagnostic {
        match parse_entry(text) {
            Ok(entry) => panic!("`{text}` should fail, got {entry:?}"),
            Err(diag) => diag,
        }
    }

    #[test]
    fn test_name_only() {
        let entry = ok("WhileStmt");
        assert_eq!(entry.name, "WhileStmt");
        assert_eq!(entry.name_span, Span::new(0..9));
        assert!(entry.value.is_none());
        assert!(entry.value_type.is_none());
    }

    #[test]
    fn test_name_with_inner_spaces_and_trailing_space() {
        let entry = ok("Method Call   ");
        assert_eq!(entry.name, "Method Call");
        assert_eq!(entry.name_span, Span::new(0..11));
    }

    #[test]
    fn test_bare_value() {
        let entry = ok("Name = j");
        assert_eq!(entry.name, "Name");
        assert_eq!(entry.value.as_deref(), Some("j"));
    }

    #[test]
    fn test_bare_value_stops_at_comment() {
        let entry = ok("Literal = 10 # loop bound");
        assert_eq!(entry.value.as_deref(), Some("10"));
    }

    #[test]
    fn test_typed_quoted_value() {
        let entry = ok("Literal: int = \"10\"");
        assert_eq!(entry.name, "Literal");
        assert_eq!(entry.value_type.as_deref(), Some("int"));
        assert_eq!(entry.value.as_deref(), Some("10"));
    }

    #[test]
    fn test_quoted_value_escapes() {
        let entry = ok(r#"Str = "a\"b\\c\nd\te\'""#);
        assert_eq!(entry.value.as_deref(), Some("a\"b\\c\nd\te'"));
    }

    #[test]
    fn test_quoted_value_keeps_hash_and_empty() {
        assert_eq!(ok(r##"Str = "# not a comment""##).value.as_deref(), Some("# not a comment"));
        assert_eq!(ok(r#"Str = """#).value.as_deref(), Some(""));
    }

    #[test]
    fn test_quoted_name() {
        let entry = ok(r#""x = 1" = "2""#);
        assert_eq!(entry.name, "x = 1");
        assert_eq!(entry.name_span, Span::new(0..7));
        assert_eq!(entry.value.as_deref(), Some("2"));

        assert_eq!(ok(r##""#tag""##).name, "#tag");
        assert_eq!(ok(r#"" lead""#).name, " lead");
        assert_eq!(ok(r#""""#).name, "");
    }

    #[test]
    fn test_quoted_name_with_type() {
        let entry = ok(r#""a: b" : "unsigned int" = "1""#);
        assert_eq!(entry.name, "a: b");
        assert_eq!(entry.value_type.as_deref(), Some("unsigned int"));
        assert_eq!(entry.value.as_deref(), Some("1"));
    }

    #[test]
    fn test_unterminated_quoted_name() {
        let diag = err(r#""open = 1"#);
        assert_eq!(diag.code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_comment_after_name() {
        let entry = ok("ExprStmt   # statement");
        assert_eq!(entry.name, "ExprStmt");
        assert!(entry.value.is_none());
    }

    #[test]
    fn test_unterminated_string() {
        let diag = err("Name = \"open");
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.labels()[0].span(), Span::new(7..12));
    }

    #[test]
    fn test_invalid_escape() {
        let diag = err(r#"Name = "bad\q""#);
        assert_eq!(diag.code(), Some(ErrorCode::E002));
        assert_eq!(diag.labels()[0].span().start(), 11);
    }

    #[test]
    fn test_missing_name() {
        let diag = err("= 10");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.labels()[0].span(), Span::new(0..4));
        assert!(diag.help().is_some());
    }

    #[test]
    fn test_missing_type() {
        let diag = err("Literal: = 10");
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.message(), "missing value type");
    }

    #[test]
    fn test_missing_value() {
        let diag = err("Literal =   # nothing");
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.message(), "missing value");
    }

    #[test]
    fn test_trailing_input() {
        let diag = err("Literal: int extra = 10");
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.message(), "unexpected input");
        assert_eq!(diag.labels()[0].span().start(), 13);
    }

    #[test]
    fn test_text_after_quoted_value() {
        let diag = err(r#"Name = "j" k"#);
        assert_eq!(diag.message(), "unexpected input");
    }
}
