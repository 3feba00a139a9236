//! Integration tests for the TreeRenderer API
//!
//! These tests drive the public API from source text to SVG output.

use float_cmp::assert_approx_eq;
use sapling::{
    SaplingError, TreeRenderer,
    backend::recording::{DrawCommand, RecordingBackend},
    config::AppConfig,
    tree::Tree,
};

const WHILE_LOOP: &str = "\
WhileStmt
\tLtExpr
\t\tName = j
\t\tLiteral: int = \"10\"
\tBlock
\t\tAssign
\t\t\tName = j
\t\t\tAddExpr
\t\t\t\tName = j
\t\t\t\tLiteral: int = \"1\"
";

fn approximate() -> TreeRenderer {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        text_measurement = "approximate"
        "#,
    )
    .expect("valid config");
    TreeRenderer::new(config)
}

#[test]
fn test_renderer_api_exists() {
    let _renderer = TreeRenderer::default();
}

#[test]
fn test_parse_while_loop() {
    let renderer = TreeRenderer::default();
    let tree = renderer.parse(WHILE_LOOP).expect("Failed to parse tree");

    assert_eq!(tree.head().name(), "WhileStmt");
    assert_eq!(tree.node_count(), 10);
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.get("Literal").and_then(|node| node.value()), Some("10"));
}

#[test]
fn test_parse_invalid_outline_returns_error() {
    let renderer = TreeRenderer::default();
    let result = renderer.parse("Root\n\tChild = \"unterminated\n");

    match result {
        Err(SaplingError::Parse { src, .. }) => assert!(src.contains("unterminated")),
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_render_while_loop() {
    let renderer = approximate();
    let tree = renderer.parse(WHILE_LOOP).expect("Failed to parse tree");
    let svg = renderer.render_svg(&tree).expect("Failed to render tree");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("WhileStmt"));
    assert!(svg.contains("AddExpr"));
    assert_eq!(svg.matches("<ellipse").count(), 5);
    assert_eq!(svg.matches("<rect").count(), 10);
}

#[test]
fn test_layout_places_children_in_equal_shares() {
    let tree = Tree::new("A")
        .with_child(Tree::new("B"))
        .with_child(Tree::new("C"))
        .with_child(Tree::leaf("D", "4"));
    let layout = TreeRenderer::default().layout(&tree).unwrap();

    let width = 841.89_f32;
    let nodes = layout.nodes();
    assert_eq!(nodes.len(), 4);
    assert_approx_eq!(f32, nodes[0].anchor().x(), width / 2.0, epsilon = 0.001);
    for (index, node) in nodes[1..].iter().enumerate() {
        let share = width / 3.0;
        assert_approx_eq!(
            f32,
            node.anchor().x(),
            share * index as f32 + share / 2.0,
            epsilon = 0.001
        );
        assert_eq!(node.level(), 1);
    }

    let values = layout.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].level(), 2);
    assert_approx_eq!(f32, values[0].anchor().x(), nodes[3].anchor().x());
}

#[test]
fn test_layout_rejects_empty_names() {
    let tree = Tree::new("A").with_child(Tree::new("   "));
    let result = TreeRenderer::default().layout(&tree);
    assert!(matches!(result, Err(SaplingError::Validation(_))));
}

#[test]
fn test_draw_closes_custom_backend() {
    let tree = Tree::new("Root").with_child(Tree::leaf("Leaf", "v"));
    let mut backend = RecordingBackend::new();
    TreeRenderer::default()
        .draw(&tree, &mut backend, None)
        .expect("Failed to draw tree");

    assert_eq!(backend.close_calls(), 1);
    assert_eq!(backend.commands().last(), Some(&DrawCommand::Close));
}

#[test]
fn test_render_to_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tree.svg");

    let renderer = approximate();
    let tree = renderer.parse(WHILE_LOOP).expect("Failed to parse tree");
    renderer
        .render_to_file(&tree, &path)
        .expect("Failed to write tree");

    let written = std::fs::read_to_string(&path).expect("Failed to read output");
    assert!(written.contains("<svg"));
    assert!(written.contains("LtExpr"));
}

#[test]
fn test_render_to_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("tree.svg");

    let renderer = approximate();
    let result = renderer.render_to_file(&Tree::new("Root"), &path);
    assert!(matches!(result, Err(SaplingError::Backend(_))));
}

#[test]
fn test_invalid_style_is_config_error() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        label_fill = "definitely not a color"
        "#,
    )
    .expect("valid toml");

    let result = TreeRenderer::new(config).render_svg(&Tree::new("Root"));
    assert!(matches!(result, Err(SaplingError::Config(_))));
}

#[test]
fn test_renderer_reusability() {
    let renderer = approximate();

    let tree1 = renderer.parse("First\n\tA\n").expect("Failed to parse tree1");
    let svg1 = renderer.render_svg(&tree1).expect("Failed to render tree1");

    let tree2 = renderer.parse("Second = 2\n").expect("Failed to parse tree2");
    let svg2 = renderer.render_svg(&tree2).expect("Failed to render tree2");

    assert!(svg1.contains("First"), "First SVG should contain its root");
    assert!(svg2.contains("Second"), "Second SVG should contain its root");
    assert!(!svg2.contains("First"));
}
