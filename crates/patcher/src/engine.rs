//! Signature rewriting.
//!
//! A patch replaces exactly the definition header of one function, from
//! the first byte of its `def` (or `async`) keyword through the
//! header-terminating `:` token, with a single rebuilt header line.
//! Every byte outside that span, including same-line bodies, trailing
//! comments, and the newline after the colon, is preserved verbatim.
//!
//! Span boundaries come from the parser's reported token positions: the
//! `:` child of the `function_definition` node. Colons inside default
//! values, nested calls, or annotation subscripts belong to other nodes
//! and can never be mistaken for the terminator.

use std::path::{Path, PathBuf};

use tree_sitter::Node;

use hintscan_analyzer::ast::{
    annotation_expr, function_nodes, is_async, node_text, parse_source, python_parser,
};
use hintscan_analyzer::{is_valid_annotation, AnnotationPolicy, FunctionDescriptor};

use crate::error::Result;
use crate::provider::{HintMap, RETURN_KEY};

const RECEIVER_NAMES: &[&str] = &["self", "cls"];

/// A proposed source-level change that adds type hints to one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub file_path: PathBuf,
    /// Full file text before the change
    pub original_source: String,
    /// Full file text after the change
    pub patched_source: String,
}

impl Patch {
    /// True when the patch changes nothing (the function could not be
    /// located at its recorded name and line)
    pub fn is_noop(&self) -> bool {
        self.original_source == self.patched_source
    }
}

/// Build a patch inserting `hints` into the signature of `func`.
///
/// The function is re-located in `original_source` by name AND declared
/// line number; duplicate names at other lines never collide. When no
/// definition matches, the result is a no-op patch, a deliberate safety
/// fallback the caller detects by structural comparison, not an error.
///
/// Hint values are spliced in as opaque text; their syntax is the
/// inference collaborator's responsibility.
pub fn build_patch(
    func: &FunctionDescriptor,
    hints: &HintMap,
    original_source: &str,
    policy: AnnotationPolicy,
) -> Result<Patch> {
    let mut parser = python_parser()?;
    let tree = parse_source(&mut parser, original_source, &func.path)?;

    let target = function_nodes(tree.root_node()).into_iter().find(|node| {
        node.start_position().row + 1 == func.line
            && node
                .child_by_field_name("name")
                .is_some_and(|n| node_text(n, original_source) == func.name)
    });

    let Some(node) = target else {
        log::debug!(
            "No definition named '{}' at {}; emitting no-op patch",
            func.name,
            func.location()
        );
        return Ok(noop(func, original_source));
    };

    let Some(colon) = header_colon(node) else {
        return Ok(noop(func, original_source));
    };

    let header = rebuild_header(node, original_source, hints, policy);
    let patched_source = format!(
        "{}{}{}",
        &original_source[..node.start_byte()],
        header,
        &original_source[colon.end_byte()..]
    );

    Ok(Patch {
        file_path: func.path.clone(),
        original_source: original_source.to_string(),
        patched_source,
    })
}

/// Apply several hint sets to one file, one patch at a time.
///
/// Patches to the same file must each be rebuilt against the previous
/// patch's output or earlier edits are lost. Jobs are applied in
/// descending line order so collapsing a multi-line header never shifts
/// the line of a definition that is still waiting to be patched.
pub fn apply_hints(
    original_source: &str,
    file_path: &Path,
    jobs: &[(FunctionDescriptor, HintMap)],
    policy: AnnotationPolicy,
) -> Result<Patch> {
    let mut order: Vec<usize> = (0..jobs.len()).collect();
    order.sort_by(|&a, &b| jobs[b].0.line.cmp(&jobs[a].0.line));

    let mut current = original_source.to_string();
    for idx in order {
        let (func, hints) = &jobs[idx];
        current = build_patch(func, hints, &current, policy)?.patched_source;
    }

    Ok(Patch {
        file_path: file_path.to_path_buf(),
        original_source: original_source.to_string(),
        patched_source: current,
    })
}

fn noop(func: &FunctionDescriptor, source: &str) -> Patch {
    Patch {
        file_path: func.path.clone(),
        original_source: source.to_string(),
        patched_source: source.to_string(),
    }
}

/// The `:` token closing the definition header
fn header_colon<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let colon = node.children(&mut cursor).find(|c| c.kind() == ":");
    colon
}

/// Collapse a verbatim slice that spans lines into a single line.
///
/// Only whitespace runs containing a newline are rewritten (to one
/// space); all other whitespace passes through byte-exact, so spacing
/// inside string literals survives the collapse.
fn flatten(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for ch in text.chars() {
        if ch.is_whitespace() {
            run.push(ch);
            continue;
        }
        if !run.is_empty() {
            if run.contains('\n') {
                out.push(' ');
            } else {
                out.push_str(&run);
            }
            run.clear();
        }
        out.push(ch);
    }
    if !run.is_empty() {
        if run.contains('\n') {
            out.push(' ');
        } else {
            out.push_str(&run);
        }
    }
    out
}

fn rebuild_header(
    node: Node,
    source: &str,
    hints: &HintMap,
    policy: AnnotationPolicy,
) -> String {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();

    let mut parts: Vec<String> = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut first = true;
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            parts.push(rebuild_param(param, source, hints, policy, first));
            first = false;
        }
    }

    let return_clause = hints
        .get(RETURN_KEY)
        .cloned()
        .or_else(|| {
            node.child_by_field_name("return_type")
                .map(|r| flatten(node_text(r, source)))
        })
        .map(|r| format!(" -> {r}"))
        .unwrap_or_default();

    let prefix = if is_async(node) { "async def" } else { "def" };
    format!("{prefix} {name}({}){return_clause}:", parts.join(", "))
}

/// Rebuild one parameter, left to right:
/// receiver passthrough, hint override, kept valid annotation, bare.
/// Defaults and splats are preserved verbatim.
fn rebuild_param(
    param: Node,
    source: &str,
    hints: &HintMap,
    policy: AnnotationPolicy,
    first: bool,
) -> String {
    let existing = |type_node: Option<Node>| -> Option<String> {
        type_node
            .filter(|t| is_valid_annotation(annotation_expr(*t), source, policy))
            .map(|t| flatten(node_text(t, source)))
    };

    match param.kind() {
        "identifier" => {
            let name = node_text(param, source);
            if first && RECEIVER_NAMES.contains(&name) {
                return name.to_string();
            }
            match hints.get(name) {
                Some(hint) => format!("{name}: {hint}"),
                None => name.to_string(),
            }
        }
        "typed_parameter" => {
            let Some(pattern) = param.named_child(0) else {
                return flatten(node_text(param, source));
            };
            // Typed splats (`*args: int`) pass through untouched
            if pattern.kind() != "identifier" {
                return flatten(node_text(param, source));
            }
            let name = node_text(pattern, source);
            if first && RECEIVER_NAMES.contains(&name) {
                return name.to_string();
            }
            let annotation = hints
                .get(name)
                .cloned()
                .or_else(|| existing(param.child_by_field_name("type")));
            match annotation {
                Some(ann) => format!("{name}: {ann}"),
                None => name.to_string(),
            }
        }
        "default_parameter" | "typed_default_parameter" => {
            let name = param
                .child_by_field_name("name")
                .map(|n| node_text(n, source))
                .unwrap_or_default();
            if first && RECEIVER_NAMES.contains(&name) {
                return name.to_string();
            }
            let value = param
                .child_by_field_name("value")
                .map(|v| flatten(node_text(v, source)))
                .unwrap_or_default();
            let annotation = hints
                .get(name)
                .cloned()
                .or_else(|| existing(param.child_by_field_name("type")));
            match annotation {
                Some(ann) => format!("{name}: {ann} = {value}"),
                None => format!("{name}={value}"),
            }
        }
        // *args / **kwargs and the bare `/` and `*` separators
        _ => flatten(node_text(param, source)),
    }
}
