use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::ast::{annotation_expr, function_nodes, node_text, parse_source, python_parser};
use crate::error::Result;
use crate::types::FunctionDescriptor;
use crate::validator::{is_valid_annotation, AnnotationPolicy};

/// Conventional receiver names, exempt from annotation requirements in
/// first position.
const RECEIVER_NAMES: &[&str] = &["self", "cls"];

/// Extracts per-function annotation status from Python source files
pub struct SignatureExtractor {
    parser: Parser,
    policy: AnnotationPolicy,
}

impl SignatureExtractor {
    pub fn new(policy: AnnotationPolicy) -> Result<Self> {
        Ok(Self {
            parser: python_parser()?,
            policy,
        })
    }

    pub fn policy(&self) -> AnnotationPolicy {
        self.policy
    }

    /// Parse a file and return a descriptor for every function/method in it
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<FunctionDescriptor>> {
        let source = std::fs::read_to_string(path)?;
        self.parse_source(&source, path)
    }

    /// Parse in-memory source, reporting locations against `path`.
    ///
    /// Descriptors come back in source order; nested functions and class
    /// methods are independent entries at their own line numbers.
    pub fn parse_source(&mut self, source: &str, path: &Path) -> Result<Vec<FunctionDescriptor>> {
        let tree = parse_source(&mut self.parser, source, path)?;

        let mut descriptors = Vec::new();
        for func in function_nodes(tree.root_node()) {
            let Some(name_node) = func.child_by_field_name("name") else {
                continue;
            };
            let name = node_text(name_node, source).to_string();
            let line = func.start_position().row + 1;

            let missing_params = self.missing_params(func, source);

            let has_return_annotation = func
                .child_by_field_name("return_type")
                .is_some_and(|ret| is_valid_annotation(annotation_expr(ret), source, self.policy));

            descriptors.push(FunctionDescriptor {
                name,
                path: path.to_path_buf(),
                line,
                has_return_annotation,
                missing_params,
            });
        }

        log::debug!(
            "Extracted {} function(s) from {}",
            descriptors.len(),
            path.display()
        );
        Ok(descriptors)
    }

    /// Parameter names lacking an acceptable annotation, in signature order
    fn missing_params(&self, func: Node, source: &str) -> Vec<String> {
        let Some(params) = func.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut missing = Vec::new();
        let mut first = true;
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            let (name_node, type_node) = match param.kind() {
                "identifier" => (Some(param), None),
                "typed_parameter" => (param.named_child(0), param.child_by_field_name("type")),
                "default_parameter" => (param.child_by_field_name("name"), None),
                "typed_default_parameter" => (
                    param.child_by_field_name("name"),
                    param.child_by_field_name("type"),
                ),
                // *args / **kwargs are never counted as missing
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    first = false;
                    continue;
                }
                // bare `/` and `*` separators are not parameters
                _ => continue,
            };

            let Some(name_node) = name_node else {
                first = false;
                continue;
            };
            // Typed splats (`*args: int`) show up as patterns under
            // typed_parameter; they stay exempt like their bare forms.
            if name_node.kind() != "identifier" {
                first = false;
                continue;
            }

            let name = node_text(name_node, source);
            let is_receiver = first && RECEIVER_NAMES.contains(&name);
            first = false;
            if is_receiver {
                continue;
            }

            let annotated_ok = type_node
                .is_some_and(|t| is_valid_annotation(annotation_expr(t), source, self.policy));
            if !annotated_ok {
                missing.push(name.to_string());
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn extract(source: &str) -> Vec<FunctionDescriptor> {
        let mut extractor = SignatureExtractor::new(AnnotationPolicy::BareName).unwrap();
        extractor
            .parse_source(source, &PathBuf::from("test.py"))
            .unwrap()
    }

    #[test]
    fn reports_missing_params_and_return() {
        let descriptors = extract("def add(a, b: int):\n    return a + b\n");
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "add");
        assert_eq!(descriptors[0].line, 1);
        assert_eq!(descriptors[0].missing_params, vec!["a"]);
        assert!(!descriptors[0].has_return_annotation);
    }

    #[test]
    fn fully_annotated_function_is_clean() {
        let descriptors = extract("def add(a: int, b: int) -> int:\n    return a + b\n");
        assert!(descriptors[0].missing_params.is_empty());
        assert!(descriptors[0].has_return_annotation);
        assert!(!descriptors[0].needs_hints());
    }

    #[test]
    fn receiver_only_methods_never_miss_params() {
        let source = "class C:\n    def a(self):\n        pass\n    def b(cls):\n        pass\n    @staticmethod\n    def c(self: int) -> None:\n        pass\n";
        for desc in extract(source) {
            assert!(desc.missing_params.is_empty(), "{}", desc.name);
        }
    }

    #[test]
    fn receiver_exemption_is_first_position_only() {
        let descriptors = extract("def f(a, self):\n    pass\n");
        assert_eq!(descriptors[0].missing_params, vec!["a", "self"]);
    }

    #[test]
    fn typo_annotation_counts_as_missing() {
        let descriptors = extract("def f(x: foat) -> float:\n    return x\n");
        assert_eq!(descriptors[0].missing_params, vec!["x"]);
        assert!(descriptors[0].has_return_annotation);
    }

    #[test]
    fn invalid_return_annotation_counts_as_absent() {
        let descriptors = extract("def f() -> stirng:\n    return ''\n");
        assert!(!descriptors[0].has_return_annotation);
    }

    #[test]
    fn splats_and_separators_are_exempt() {
        let descriptors = extract("def f(a: int, *args, b: int = 0, **kwargs) -> None:\n    pass\n");
        assert!(descriptors[0].missing_params.is_empty());
    }

    #[test]
    fn defaults_without_annotation_are_missing() {
        let descriptors = extract("def f(a=1, b: int = 2):\n    pass\n");
        assert_eq!(descriptors[0].missing_params, vec!["a"]);
    }

    #[test]
    fn nested_and_async_functions_are_independent_descriptors() {
        let source = "async def outer(x):\n    def inner(y):\n        pass\n";
        let descriptors = extract(source);
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["outer", "inner"]);
        assert_eq!(descriptors[0].line, 1);
        assert_eq!(descriptors[1].line, 2);
    }

    #[test]
    fn decorated_function_reports_the_def_line() {
        let descriptors = extract("@cached\ndef f(x: int) -> int:\n    return x\n");
        assert_eq!(descriptors[0].line, 2);
    }

    #[test]
    fn parse_error_is_surfaced() {
        let mut extractor = SignatureExtractor::new(AnnotationPolicy::BareName).unwrap();
        let result = extractor.parse_source("def broken(:\n", &PathBuf::from("bad.py"));
        assert!(result.is_err());
    }
}
