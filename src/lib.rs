//! # metabolite-annotation
//!
//! A library for annotating metabolite masses with the nearest mass + adduct pair.
//!
//! Each observed mass `s` is explained by a candidate mass `m` from M and an
//! adduct `a` from A with `m + a` as close to `s` as the search can find and
//! `m + a > 0`. Masses are scaled to integers up front so the search never
//! compares floating-point values.
//!
//! ## Features
//!
//! - **Sorted index**: M and A are deduplicated and sorted once per run
//! - **Bisecting search**: halving jumps along one axis at a time instead of an O(|M|·|A|) scan
//! - **Memoization**: each distinct target is searched once per run
//! - **Recoverable failures**: a search that walks off an array fails for that target only
//!
//! ## Example
//!
//! ```rust
//! use metabolite_annotation::{build_index, nearest_sum, MatchResult};
//!
//! let (m, a) = build_index(&[1, 3], &[1, 0]);
//! let result = nearest_sum(1, &m, &a).unwrap();
//!
//! assert_eq!(result, MatchResult::Pair { m_index: 0, a_index: 1 });
//! // Positions are reported 1-based in the original arrays
//! assert_eq!(m.original_index(0).unwrap() + 1, 1);
//! assert_eq!(a.original_index(1).unwrap() + 1, 2);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sorted views and shared value types
//! - [`matching`]: Nearest-sum search, result cache and batch engine
//! - [`parsing`]: Problem-file and answer-file parsers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::sorted_view::{build_index, SortedView};
pub use crate::core::types::*;
pub use crate::matching::cache::ResultCache;
pub use crate::matching::engine::{AnnotationEngine, Annotations, EngineConfig};
pub use crate::matching::search::{nearest_sum, MatchResult, SearchError};
