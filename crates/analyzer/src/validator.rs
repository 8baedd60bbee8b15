//! Annotation validity checks.
//!
//! Two policies exist because the tool this replaces shipped two
//! incompatible validators. `BareName` is the canonical policy: it only
//! ever rejects a bare lowercase identifier that is not a known type name
//! (a probable typo such as `foat` or `stirng`), and accepts any compound
//! annotation without looking inside it. `Recursive` walks the whole
//! expression and rejects any embedded identifier outside the allow-list,
//! catching typos nested inside generics (`list[Dictt]`) at the cost of
//! rejecting user types the allow-list does not cover.

use tree_sitter::Node;

use crate::allowlist::KNOWN_TYPE_NAMES;
use crate::ast::node_text;

/// Which validity policy to apply to annotation expressions.
///
/// An explicit configuration value: the extractor and the patch engine
/// must be handed the same policy or health metrics and patch output
/// disagree about which annotations count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationPolicy {
    /// Only reject unknown bare lowercase identifiers (canonical)
    #[default]
    BareName,
    /// Reject unknown bare lowercase identifiers anywhere in the expression
    Recursive,
}

/// Check whether an annotation expression is acceptable under `policy`.
///
/// `node` is the annotation expression (a `type` wrapper is unwrapped by
/// the caller). An absent annotation is always missing; that decision is
/// made before this function is reached.
pub fn is_valid_annotation(node: Node, source: &str, policy: AnnotationPolicy) -> bool {
    match policy {
        AnnotationPolicy::BareName => match node.kind() {
            "identifier" => is_known_name(node_text(node, source)),
            // Subscripts (list[X]), attributes (mod.Type), unions (X | Y),
            // forward-reference strings: accepted without inspection.
            _ => true,
        },
        AnnotationPolicy::Recursive => accept_recursive(node, source),
    }
}

fn is_known_name(name: &str) -> bool {
    // Capitalized names are trusted as user classes / typing constructs.
    if name.chars().next().is_some_and(char::is_uppercase) {
        return true;
    }
    KNOWN_TYPE_NAMES.contains(name)
}

fn accept_recursive(node: Node, source: &str) -> bool {
    match node.kind() {
        // Membership only: capitalization is not trusted here, so user
        // classes must be added to the allow-list to pass.
        "identifier" => KNOWN_TYPE_NAMES.contains(node_text(node, source)),
        // Forward references are opaque text, never descended into.
        "string" | "concatenated_string" => true,
        // The attribute name in `mod.Type` is not a bare identifier;
        // only the object side is.
        "attribute" => node
            .child_by_field_name("object")
            .map(|obj| accept_recursive(obj, source))
            .unwrap_or(true),
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if !accept_recursive(child, source) {
                    return false;
                }
            }
            true
        }
    }
}
