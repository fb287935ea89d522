//! Nearest-sum matching engine.
//!
//! This module provides the core matching functionality:
//!
//! - [`nearest_sum`]: Find the best (M, A) pair for one target
//! - [`ResultCache`]: Per-run memo of formatted answers keyed by target value
//! - [`AnnotationEngine`]: Annotates a whole target array, searching each distinct value once
//!
//! ## Search
//!
//! M is sorted ascending and A descending, so moving forward on M raises the
//! sum and moving forward on A lowers it. The search follows the sign of the
//! delta between the current sum and the target:
//!
//! 1. **Evaluate**: record the pair if its sum is positive and its delta is the best so far
//! 2. **Stop**: on an exact match, or when either pointer reaches the end of its array
//! 3. **Step**: jump along the axis that corrects the delta, halving the jump each time,
//!    until the zero crossing is bracketed
//!
//! The search is a heuristic and can miss the true minimum.
//!
//! ## Example
//!
//! ```rust
//! use metabolite_annotation::AnnotationEngine;
//!
//! let engine = AnnotationEngine::new(&[1, 3], &[1, 0]);
//! let answers = engine.annotate(&[1]);
//! assert_eq!(answers.lines, vec!["1 2"]);
//! ```

pub mod cache;
pub mod engine;
pub mod search;

pub use cache::ResultCache;
pub use engine::{AnnotationEngine, Annotations, EngineConfig};
pub use search::{nearest_sum, MatchResult, SearchError};
