//! Hints-file backed inference.
//!
//! The external inference collaborator (an LLM pipeline, a human, another
//! tool) serializes its output as a JSON array of entries; this module
//! adapts that file to the [`HintProvider`] contract:
//!
//! ```json
//! [
//!   {
//!     "file": "src/app.py",
//!     "line": 12,
//!     "function": "load_config",
//!     "hints": { "path": "str", "return": "dict[str, Any]" }
//!   }
//! ]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use hintscan_patcher::{FunctionDescriptor, HintMap, HintProvider, NotInferable};

/// One function's worth of inferred hints
#[derive(Debug, Clone, Deserialize)]
pub struct HintEntry {
    pub file: PathBuf,
    pub line: usize,
    pub function: String,
    pub hints: HintMap,
}

/// [`HintProvider`] backed by a JSON hints file
pub struct FileHintProvider {
    entries: Vec<HintEntry>,
}

impl FileHintProvider {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hints file {}", path.display()))?;
        let entries: Vec<HintEntry> = serde_json::from_str(&text)
            .with_context(|| format!("Invalid hints file {}", path.display()))?;
        Ok(Self { entries })
    }

    #[cfg(test)]
    fn from_entries(entries: Vec<HintEntry>) -> Self {
        Self { entries }
    }
}

/// Entry paths may be relative to the scan root; match on suffix
fn paths_match(entry: &Path, actual: &Path) -> bool {
    actual == entry || actual.ends_with(entry)
}

impl HintProvider for FileHintProvider {
    fn infer(
        &self,
        func: &FunctionDescriptor,
        _project_context: Option<&str>,
    ) -> Result<HintMap, NotInferable> {
        self.entries
            .iter()
            .find(|e| {
                e.line == func.line
                    && e.function == func.name
                    && paths_match(&e.file, &func.path)
            })
            .map(|e| e.hints.clone())
            .ok_or_else(|| NotInferable::new(func.name.clone()))
    }
}
