//! # hintscan patcher
//!
//! The source-patch engine: given a [`FunctionDescriptor`] and a
//! [`HintMap`] of inferred annotations, rewrite exactly that function's
//! definition header in the original file text, leaving every other byte
//! untouched, multi-line signatures included.
//!
//! The engine is pure: it takes and returns in-memory text and never
//! writes to disk. Persisting `patched_source` is the caller's job, as is
//! awaiting the (potentially slow, potentially failing) inference
//! collaborator modeled by [`HintProvider`].

mod engine;
mod error;
mod provider;

pub use engine::{apply_hints, build_patch, Patch};
pub use error::{PatchError, Result};
pub use provider::{HintMap, HintProvider, NotInferable, Verifier, RETURN_KEY};

pub use hintscan_analyzer::{AnnotationPolicy, FunctionDescriptor};
