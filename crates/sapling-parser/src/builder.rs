//! Turns the lines of an outline into a [`Tree`].
//!
//! Nesting follows the indentation of each line, the way Python blocks do:
//! a deeper indent opens a child of the previous node, an equal indent adds a
//! sibling, and a dedent must land exactly on an enclosing level. A child's
//! indentation has to extend its parent's indentation character for
//! character, so tabs and spaces may be mixed only consistently.

use log::trace;
use sapling_core::tree::{NodeId, Tree};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    outline::{self, Entry},
    span::Span,
};

/// One open nesting level.
#[derive(Debug, Clone, Copy)]
struct Level<'a> {
    indent: &'a str,
    id: NodeId,
    name_span: Span,
}

/// Where a line attaches, or why it cannot.
enum Placement {
    Root,
    Under(NodeId),
    Rejected,
}

/// Builds a tree from outline source, collecting diagnostics as it goes.
pub(crate) struct OutlineBuilder<'a> {
    tree: Option<Tree>,
    stack: Vec<Level<'a>>,
    /// Nodes given a value, checked for leaf status once the tree is complete.
    valued: Vec<(NodeId, Span)>,
    diagnostics: DiagnosticCollector,
}

impl<'a> OutlineBuilder<'a> {
    pub fn new() -> Self {
        Self {
            tree: None,
            stack: Vec::new(),
            valued: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Consumes every line of `source`.
    pub fn build(mut self, source: &'a str) -> Result<(Tree, Vec<Diagnostic>), ParseError> {
        let mut offset = 0;
        for raw_line in source.split_inclusive('\n') {
            let line = raw_line
                .strip_suffix('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .unwrap_or(raw_line);
            self.line(line, offset);
            offset += raw_line.len();
        }
        self.finish(source)
    }

    fn line(&mut self, line: &'a str, offset: usize) {
        let content = line.trim_start_matches([' ', '\t']);
        if content.trim().is_empty() || content.starts_with('#') {
            return;
        }

        let indent = &line[..line.len() - content.len()];
        let content_offset = offset + indent.len();
        let indent_span = Span::new(offset..content_offset);

        let entry = outline::parse_entry(content).map_err(|diag| diag.shifted(content_offset));
        let name_span = match &entry {
            Ok(entry) => entry.name_span.shift(content_offset),
            Err(_) => Span::new(content_offset..offset + line.len()),
        };

        let placement = self.place(indent, indent_span, name_span);
        let entry = match entry {
            Ok(entry) => entry,
            Err(diag) => {
                self.diagnostics.emit(diag);
                // Keep a placeholder so that the lines below still nest correctly.
                Entry {
                    name: String::new(),
                    name_span,
                    value_type: None,
                    value: None,
                }
            }
        };

        let id = match placement {
            Placement::Root => {
                self.tree = Some(Tree::new(entry.name.as_str()));
                Tree::HEAD
            }
            Placement::Under(parent) => {
                let Some(tree) = self.tree.as_mut() else {
                    return;
                };
                match tree.push_child(parent, entry.name.as_str()) {
                    Ok(id) => id,
                    Err(err) => {
                        self.diagnostics.emit(
                            Diagnostic::error(err.to_string())
                                .with_label(name_span, "while adding this node"),
                        );
                        return;
                    }
                }
            }
            Placement::Rejected => return,
        };

        trace!(name = entry.name.as_str(), level = self.stack.len(); "Outline node");
        self.stack.push(Level {
            indent,
            id,
            name_span,
        });

        if let Some(value) = entry.value {
            self.set_value(id, value, entry.value_type, name_span);
        } else if entry.value_type.is_some() {
            self.diagnostics.emit(
                Diagnostic::error("value type without a value")
                    .with_code(ErrorCode::E101)
                    .with_label(name_span, "this node has a type but no value")
                    .with_help("add `= value` after the type"),
            );
        }
    }

    fn set_value(&mut self, id: NodeId, value: String, value_type: Option<String>, span: Span) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        match tree.set_value(id, value, value_type) {
            Ok(()) => self.valued.push((id, span)),
            Err(err) => self.diagnostics.emit(
                Diagnostic::error(err.to_string()).with_label(span, "while setting this value"),
            ),
        }
    }

    /// Finds the parent of a line indented by `indent`, popping closed levels.
    fn place(&mut self, indent: &'a str, indent_span: Span, name_span: Span) -> Placement {
        let Some(root) = self.stack.first().copied() else {
            if !indent.is_empty() {
                self.diagnostics.emit(
                    Diagnostic::error("indented root")
                        .with_code(ErrorCode::E203)
                        .with_label(indent_span, ErrorCode::E203.description())
                        .with_help("remove the indentation before the first node"),
                );
            }
            return Placement::Root;
        };

        let mut dedented = false;
        while let Some(top) = self.stack.last().copied() {
            if indent == top.indent {
                if self.stack.len() == 1 {
                    break;
                }
                self.stack.pop();
                return match self.stack.last() {
                    Some(parent) => Placement::Under(parent.id),
                    None => Placement::Rejected,
                };
            }

            if indent.len() > top.indent.len() && indent.starts_with(top.indent) {
                if dedented {
                    break;
                }
                return Placement::Under(top.id);
            }

            if top.indent.starts_with(indent) && self.stack.len() > 1 {
                self.stack.pop();
                dedented = true;
                continue;
            }
            break;
        }

        if root.indent.starts_with(indent) {
            self.diagnostics.emit(
                Diagnostic::error("multiple roots")
                    .with_code(ErrorCode::E201)
                    .with_label(name_span, "second node at root level")
                    .with_secondary_label(root.name_span, "root defined here")
                    .with_help("indent this node to place it below the root"),
            );
        } else {
            let mut diag = Diagnostic::error("inconsistent indentation")
                .with_code(ErrorCode::E200)
                .with_label(indent_span, "does not match any enclosing level");
            if let Some(top) = self.stack.last() {
                diag = diag.with_secondary_label(top.name_span, "nearest enclosing node");
            }
            self.diagnostics.emit(
                diag.with_help("indent with the same characters as the enclosing lines"),
            );
        }
        Placement::Rejected
    }

    fn finish(mut self, source: &str) -> Result<(Tree, Vec<Diagnostic>), ParseError> {
        match &self.tree {
            None => self.diagnostics.emit(
                Diagnostic::error("empty outline")
                    .with_code(ErrorCode::E202)
                    .with_label(Span::new(0..source.len()), "no node found")
                    .with_help("write at least one line with a node name"),
            ),
            Some(tree) => {
                for &(id, span) in &self.valued {
                    if tree.node(id).is_some_and(|node| !node.is_leaf()) {
                        self.diagnostics.emit(
                            Diagnostic::warning("value on a node with children is not rendered")
                                .with_label(span, "this node has children")
                                .with_help("move the value to a leaf node"),
                        );
                    }
                }
            }
        }

        let warnings = self.diagnostics.finish()?;
        match self.tree {
            Some(tree) => Ok((tree, warnings)),
            None => Err(ParseError::new(warnings)),
        }
    }
}
