//! # hintscan analyzer
//!
//! Static analysis of Python function signatures: which parameters and
//! return positions carry an acceptable type annotation, and which are
//! missing one or carry a probable typo.
//!
//! ## Pipeline position
//!
//! ```text
//! Source file
//!     │
//!     ├──> Tree-sitter parsing → position-annotated AST
//!     │
//!     ├──> Signature extraction (functions, methods, nested defs)
//!     │    └─> Annotation validation per parameter / return
//!     │
//!     └──> FunctionDescriptor[] consumed by the scanner and patcher
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hintscan_analyzer::{AnnotationPolicy, SignatureExtractor};
//! use std::path::Path;
//!
//! let mut extractor = SignatureExtractor::new(AnnotationPolicy::BareName).unwrap();
//! let descriptors = extractor
//!     .parse_source("def add(a, b: int):\n    return a + b\n", Path::new("math.py"))
//!     .unwrap();
//!
//! assert_eq!(descriptors[0].missing_params, vec!["a".to_string()]);
//! assert!(!descriptors[0].has_return_annotation);
//! ```

mod allowlist;
pub mod ast;
mod error;
mod extractor;
mod types;
mod validator;

pub use allowlist::KNOWN_TYPE_NAMES;
pub use error::{AnalyzerError, Result};
pub use extractor::SignatureExtractor;
pub use types::FunctionDescriptor;
pub use validator::{is_valid_annotation, AnnotationPolicy};
