//! # hintscan scanner
//!
//! Codebase walking and scan aggregation: discover Python files under a
//! root (honoring an exclusion set), extract a [`FunctionDescriptor`] for
//! every function, and expose the at-risk subset plus an integer health
//! score.
//!
//! One bad file never aborts a scan: parse failures are recorded in
//! [`ScanResult::skipped`] and the batch continues.

mod error;
mod scan;
mod walker;

pub use error::{Result, ScanError};
pub use scan::{scan, ScanResult, SkippedFile};
pub use walker::{collect_python_files, exclusion_set, is_python_file, DEFAULT_EXCLUDE_DIRS};

pub use hintscan_analyzer::{AnnotationPolicy, FunctionDescriptor};
