use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use hintscan_analyzer::{AnnotationPolicy, FunctionDescriptor, SignatureExtractor};

use crate::error::Result;
use crate::walker::collect_python_files;

/// A file the scan could not parse; recorded, never fatal to the batch
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregated result of scanning a codebase
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Files parsed successfully (skipped files are not counted)
    pub files_scanned: usize,
    /// All discovered functions, file order then source order
    pub functions: Vec<FunctionDescriptor>,
    /// When set, `at_risk` widens to every function so existing hints
    /// can be re-inferred and overwritten
    pub force: bool,
    /// Files that failed to parse, with the reason
    pub skipped: Vec<SkippedFile>,
}

impl ScanResult {
    /// Functions that need type-hint work.
    ///
    /// Under force mode every discovered function is returned; otherwise
    /// only those with a missing parameter or no acceptable return
    /// annotation.
    pub fn at_risk(&self) -> Vec<&FunctionDescriptor> {
        self.functions
            .iter()
            .filter(|f| self.force || f.needs_hints())
            .collect()
    }

    /// Count of functions genuinely missing hints, force mode ignored
    pub fn missing_count(&self) -> usize {
        self.functions.iter().filter(|f| f.needs_hints()).count()
    }

    /// Percentage of functions with acceptable annotations, truncated.
    ///
    /// 100 when no functions exist. Always measured against the
    /// normal-policy missing count: force mode widens `at_risk`, not the
    /// health metric.
    pub fn health_score(&self) -> u32 {
        let total = self.functions.len();
        if total == 0 {
            return 100;
        }
        ((total - self.missing_count()) * 100 / total) as u32
    }
}

/// Orchestrate a full scan: collect files, parse each, aggregate.
///
/// A file that fails to parse is skipped and recorded; the scan always
/// continues with the next file.
pub fn scan(
    root: &Path,
    exclude_dirs: &HashSet<String>,
    force: bool,
    policy: AnnotationPolicy,
) -> Result<ScanResult> {
    let files = collect_python_files(root, exclude_dirs);
    let mut extractor = SignatureExtractor::new(policy)?;

    let mut result = ScanResult {
        files_scanned: 0,
        functions: Vec::new(),
        force,
        skipped: Vec::new(),
    };

    for file in files {
        match extractor.parse_file(&file) {
            Ok(descriptors) => {
                result.files_scanned += 1;
                result.functions.extend(descriptors);
            }
            Err(err) => {
                log::warn!("Skipping {}: {err}", file.display());
                result.skipped.push(SkippedFile {
                    path: file,
                    reason: err.to_string(),
                });
            }
        }
    }

    log::info!(
        "Scanned {} file(s), {} function(s), {} skipped",
        result.files_scanned,
        result.functions.len(),
        result.skipped.len()
    );
    Ok(result)
}
