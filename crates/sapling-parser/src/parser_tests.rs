//! Tests for the complete outline pipeline, from source text to tree.

use sapling_core::tree::Tree;

use crate::{error::ErrorCode, parse};

/// Helper to parse a source string and assert success
fn assert_parses(source: &str) -> Tree {
    match parse(source) {
        Ok(tree) => tree,
        Err(err) => panic!("Expected parsing to succeed, but got error: {err}"),
    }
}

/// Helper to parse a source string and return the codes of all diagnostics
fn error_codes(source: &str) -> Vec<ErrorCode> {
    match parse(source) {
        Ok(tree) => panic!("Expected parsing to fail, but got:\n{tree}"),
        Err(err) => err.diagnostics().iter().filter_map(|d| d.code()).collect(),
    }
}

const WHILE_LOOP: &str = "\
# while (j < 10) print(j * j++);
WhileStmt
\tLtExpr
\t\tName = j
\t\tLiteral: int = \"10\"
\tExprStmt
\t\tMethodCall
\t\t\tName = print
\t\t\tMulExpr
\t\t\t\tName = j
\t\t\t\tPostIncExpr
\t\t\t\t\tName = j
";

#[test]
fn test_while_loop_outline() {
    let tree = assert_parses(WHILE_LOOP);

    assert_eq!(tree.head().name(), "WhileStmt");
    assert!(tree.contains("LtExpr"));
    assert!(tree.contains("ExprStmt"));
    assert_eq!(tree.depth(), 5);
    assert_eq!(tree.node_count(), 11);

    let literal = tree.get("Literal").unwrap();
    assert_eq!(literal.value(), Some("10"));
    assert_eq!(literal.value_type(), Some("int"));
    assert!(literal.is_leaf());

    let post_inc = tree.get("PostIncExpr").unwrap();
    assert_eq!(post_inc.children().next().unwrap().value(), Some("j"));
}

#[test]
fn test_matches_builder_tree() {
    let parsed = assert_parses("LtExpr\n  Name = j\n  Literal = 10\n");
    let built = Tree::new("LtExpr")
        .with_child(Tree::leaf("Name", "j"))
        .with_child(Tree::leaf("Literal", "10"));

    assert_eq!(parsed, built);
}

#[test]
fn test_display_output_parses_back() {
    let tree = Tree::new("Root")
        .with_child(Tree::new("Str").with_typed_value("say \"hi\"\n\tthere", "string"))
        .with_child(Tree::new("Inner").with_child(Tree::leaf("Leaf", "# not a comment")));

    let reparsed = assert_parses(&tree.to_string());
    assert_eq!(reparsed, tree);
}

#[test]
fn test_names_with_separators_parse_back() {
    let tree = Tree::new("x = 1")
        .with_child(Tree::new("#tag"))
        .with_child(Tree::leaf("a: b", "c"))
        .with_child(Tree::new(" lead"))
        .with_child(Tree::new("say \"hi\" "));

    let source = tree.to_string();
    assert_eq!(assert_parses(&source), tree, "{source}");
}

#[test]
fn test_single_root_without_trailing_newline() {
    let tree = assert_parses("Lonely");
    assert!(tree.head().is_leaf());
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_space_indentation() {
    let tree = assert_parses("A\n    B\n        C\n    D = 4\n");
    assert_eq!(tree.get("C").unwrap().level(), 2);
    assert_eq!(tree.get("D").unwrap().value(), Some("4"));
}

#[test]
fn test_value_on_inner_node_is_a_warning_only() {
    let tree = assert_parses("A = 1\n\tB\n");
    assert_eq!(tree.head().value(), Some("1"));
}

#[test]
fn test_error_codes_across_file() {
    let source = "\
Root
\tGood = 1
\tBad = \"unterminated
\t: int = 3
\tAlso = \"\\x\"
Second
";
    assert_eq!(
        error_codes(source),
        [
            ErrorCode::E001,
            ErrorCode::E100,
            ErrorCode::E002,
            ErrorCode::E201
        ]
    );
}

#[test]
fn test_structure_errors() {
    assert_eq!(error_codes(""), [ErrorCode::E202]);
    assert_eq!(error_codes("\t Root\n"), [ErrorCode::E203]);
    assert_eq!(error_codes("A\n  B\n C\n"), [ErrorCode::E200]);
}

#[test]
fn test_error_display_counts_diagnostics() {
    let err = parse("A\nB\nC\n").unwrap_err();
    assert_eq!(err.to_string(), "error[E201]: multiple roots (+1 more)");
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Any printable name, including `:`, `=`, `#`, quotes and edge spaces.
    fn name_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z_][A-Za-z0-9_ ]{0,12}[A-Za-z0-9_]?".prop_map(|s| s.trim_end().to_string()),
            "[ -~]{0,12}",
        ]
    }

    /// Values may contain anything printable, including quotes and escapes.
    fn value_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[ -~\t\n]{0,16}")
    }

    fn value_type_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop_oneof!["[a-z]{1,6}", "[ -~]{0,8}"])
    }

    fn tree_strategy() -> impl Strategy<Value = Tree> {
        let leaf = (name_strategy(), value_strategy(), value_type_strategy()).prop_map(
            |(name, value, value_type)| match (value, value_type) {
                (Some(value), Some(value_type)) => {
                    Tree::new(name).with_typed_value(value, value_type)
                }
                (Some(value), None) => Tree::leaf(name, value),
                (None, _) => Tree::new(name),
            },
        );
        leaf.prop_recursive(4, 32, 4, |inner| {
            (name_strategy(), prop::collection::vec(inner, 1..4)).prop_map(|(name, children)| {
                children
                    .into_iter()
                    .fold(Tree::new(name), |tree, child| tree.with_child(child))
            })
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Writing a tree as an outline and reading it back yields the same tree.
    fn check_outline_reads_back(tree: &Tree) -> Result<(), TestCaseError> {
        let source = tree.to_string();
        let reparsed = parse(&source);

        let reparsed = match reparsed {
            Ok(reparsed) => reparsed,
            Err(err) => return Err(TestCaseError::fail(format!("{err}\n{source}"))),
        };
        prop_assert_eq!(&reparsed, tree, "outline:\n{}", source);
        prop_assert_eq!(reparsed.depth(), tree.depth());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn outline_reads_back(tree in tree_strategy()) {
            check_outline_reads_back(&tree)?;
        }
    }
}
