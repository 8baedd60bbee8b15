//! Contracts for the external collaborators the patch pipeline consumes.
//!
//! Hint inference (in practice an LLM call) and patch verification (a type
//! checker, a test runner) live outside this crate. Both are modeled as
//! traits so inference failure is a value the caller must handle, not an
//! exception buried in control flow.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use thiserror::Error;

use hintscan_analyzer::FunctionDescriptor;

/// Key used for the return-type entry of a [`HintMap`]
pub const RETURN_KEY: &str = "return";

/// Inferred annotations: parameter name (or [`RETURN_KEY`]) to type text.
///
/// Values are opaque: the patch engine splices them in verbatim and never
/// validates their syntax. A malformed hint ends up in the file as-is.
pub type HintMap = HashMap<String, String>;

/// The collaborator could not produce hints for a function.
///
/// A normal, representable outcome; callers report the function as
/// skipped and continue with the next one.
#[derive(Error, Debug, Clone)]
#[error("could not infer hints for '{function}'")]
pub struct NotInferable {
    pub function: String,
}

impl NotInferable {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }
}

/// Supplies inferred type hints for a function, optionally aware of
/// whole-project context
pub trait HintProvider {
    fn infer(
        &self,
        func: &FunctionDescriptor,
        project_context: Option<&str>,
    ) -> std::result::Result<HintMap, NotInferable>;
}

/// Opaque pass/fail oracles for patched files
pub trait Verifier {
    /// Static type-check of a source file
    fn check_types(&self, source_file: &Path) -> io::Result<bool>;

    /// Execute a test file
    fn run_tests(&self, test_file: &Path) -> io::Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct StaticHints(HintMap);

    impl HintProvider for StaticHints {
        fn infer(
            &self,
            func: &FunctionDescriptor,
            _project_context: Option<&str>,
        ) -> std::result::Result<HintMap, NotInferable> {
            if self.0.is_empty() {
                Err(NotInferable::new(func.name.clone()))
            } else {
                Ok(self.0.clone())
            }
        }
    }

    struct AlwaysPasses;

    impl Verifier for AlwaysPasses {
        fn check_types(&self, _source_file: &Path) -> io::Result<bool> {
            Ok(true)
        }
        fn run_tests(&self, _test_file: &Path) -> io::Result<bool> {
            Ok(true)
        }
    }

    fn descriptor() -> FunctionDescriptor {
        FunctionDescriptor {
            name: "f".to_string(),
            path: PathBuf::from("test.py"),
            line: 1,
            has_return_annotation: false,
            missing_params: vec!["a".to_string()],
        }
    }

    #[test]
    fn inference_failure_is_a_value() {
        let provider = StaticHints(HintMap::new());
        let err = provider.infer(&descriptor(), None).unwrap_err();
        assert_eq!(err.function, "f");
    }

    #[test]
    fn verifier_oracles_return_pass_fail() {
        let verifier = AlwaysPasses;
        assert!(verifier.check_types(Path::new("a.py")).unwrap());
        assert!(verifier.run_tests(Path::new("test_a.py")).unwrap());
    }
}
