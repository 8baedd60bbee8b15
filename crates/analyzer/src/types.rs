use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata about a single function or method found during extraction.
///
/// Immutable once produced: the scan aggregation and the patch engine
/// both consume descriptors, neither mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Function name as written at the definition
    pub name: String,
    /// File the function was found in
    pub path: PathBuf,
    /// 1-based line number of the `def` keyword
    pub line: usize,
    /// True when a return annotation is present and acceptable
    pub has_return_annotation: bool,
    /// Parameter names lacking an acceptable annotation, in signature order
    pub missing_params: Vec<String>,
}

impl FunctionDescriptor {
    /// True when the function needs type-hint work under normal policy
    pub fn needs_hints(&self) -> bool {
        !self.missing_params.is_empty() || !self.has_return_annotation
    }

    /// `file.py:42` style location for reports and logs
    pub fn location(&self) -> String {
        format!("{}:{}", self.path.display(), self.line)
    }
}
