//! Shared tree-sitter helpers for walking Python parse trees.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{AnalyzerError, Result};

/// Build a parser configured for Python
pub fn python_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| AnalyzerError::tree_sitter(format!("Failed to set language: {e}")))?;
    Ok(parser)
}

/// Parse Python source, surfacing syntax errors instead of swallowing them.
///
/// Tree-sitter always produces a tree; a file counts as unparseable when
/// the tree contains error or missing nodes.
pub fn parse_source(parser: &mut Parser, source: &str, path: &Path) -> Result<Tree> {
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalyzerError::tree_sitter(format!("Failed to parse {}", path.display())))?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(root).unwrap_or(1);
        return Err(AnalyzerError::parse(
            path,
            format!("invalid syntax at line {line}"),
        ));
    }

    Ok(tree)
}

/// Line (1-based) of the first error or missing node in the tree
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    None
}

/// Source text covered by a node
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Collect every `function_definition` in the tree, pre-order, which is
/// source order. Nested functions and methods are independent entries;
/// class definitions themselves are not collected.
pub fn function_nodes(root: Node) -> Vec<Node> {
    let mut nodes = Vec::new();
    collect_functions(root, &mut nodes);
    nodes
}

fn collect_functions<'tree>(node: Node<'tree>, out: &mut Vec<Node<'tree>>) {
    if node.kind() == "function_definition" {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_functions(child, out);
    }
}

/// Unwrap a `type` wrapper node to the annotation expression inside it
pub fn annotation_expr(node: Node) -> Node {
    if node.kind() == "type" {
        if let Some(inner) = node.named_child(0) {
            return inner;
        }
    }
    node
}

/// True when the definition carries the `async` qualifier
pub fn is_async(func: Node) -> bool {
    func.child(0).is_some_and(|c| c.kind() == "async")
}
