//! Core data types for nearest-sum annotation.
//!
//! - [`SortedView`]: A deduplicated, sorted factor array with a map back to original positions
//! - [`build_index`]: Builds the M view (ascending) and the A view (descending) for one run
//! - [`TargetValue`], [`Axis`], [`SortOrder`], [`NoPairReason`]: Shared value types
//!
//! All values are scaled integers. Callers convert decimal masses before they
//! reach this module (see [`crate::utils::validation::scale_value`]).

pub mod sorted_view;
pub mod types;

pub use sorted_view::{build_index, SortedView};
pub use types::{Axis, NoPairReason, SortOrder, TargetValue};
