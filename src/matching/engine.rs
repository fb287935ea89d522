use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::sorted_view::{build_index, SortedView};
use crate::core::types::TargetValue;
use crate::matching::cache::ResultCache;
use crate::matching::search::{
    nearest_sum_with_ceiling, MatchResult, SearchError, DEFAULT_DELTA_CEILING,
};

/// Written in place of a pair when a target has no answer
pub const DEFAULT_MISSING_MARKER: &str = "NA";

/// Problem-file values are multiplied by this before truncation to `i32`
pub const DEFAULT_SCALE: f64 = 1e6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the annotation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pairs whose absolute delta is not below this are never reported
    pub delta_ceiling: u64,
    /// Output line for targets without a pair
    pub missing_marker: String,
    /// Scale applied to decimal inputs when parsing problem files
    pub scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delta_ceiling: DEFAULT_DELTA_CEILING,
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
            scale: DEFAULT_SCALE,
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Answers for one target array, in target order
#[derive(Debug, Clone, Serialize)]
pub struct Annotations {
    pub lines: Vec<String>,
    /// Number of distinct target values searched
    pub distinct_targets: usize,
    /// Targets answered from the cache
    pub cache_hits: usize,
    /// Distinct targets with no valid pair
    pub no_pair_count: usize,
    /// Distinct targets whose search failed
    pub error_count: usize,
}

impl Annotations {
    /// Answer lines joined with newlines (no trailing newline)
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Annotates targets against one pair of factor arrays.
///
/// The sorted views are built once in the constructor and only read afterwards.
pub struct AnnotationEngine {
    m_view: SortedView,
    a_view: SortedView,
    config: EngineConfig,
}

impl AnnotationEngine {
    /// Create an engine with default configuration
    pub fn new(m: &[i32], a: &[i32]) -> Self {
        Self::with_config(m, a, EngineConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(m: &[i32], a: &[i32], config: EngineConfig) -> Self {
        let (m_view, a_view) = build_index(m, a);

        debug!(
            "Dups M: {:.4} of {}, dups A: {:.4} of {}",
            m_view.duplicate_fraction(),
            m.len(),
            a_view.duplicate_fraction(),
            a.len()
        );

        Self {
            m_view,
            a_view,
            config,
        }
    }

    pub fn m_view(&self) -> &SortedView {
        &self.m_view
    }

    pub fn a_view(&self) -> &SortedView {
        &self.a_view
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the search for a single target without caching
    ///
    /// # Errors
    ///
    /// Returns `SearchError::IndexOutOfRange` if the search walks off a view.
    pub fn query(&self, target: TargetValue) -> Result<MatchResult, SearchError> {
        nearest_sum_with_ceiling(target, &self.m_view, &self.a_view, self.config.delta_ceiling)
    }

    /// Format a result as 1-based positions in the original arrays
    #[must_use]
    pub fn format(&self, result: MatchResult) -> String {
        let positions = result.pair().and_then(|(i, j)| {
            Some((
                self.m_view.original_index(i)?,
                self.a_view.original_index(j)?,
            ))
        });

        match positions {
            Some((m_pos, a_pos)) => format!("{} {}", m_pos + 1, a_pos + 1),
            None => self.config.missing_marker.clone(),
        }
    }

    /// Annotate every target, searching each distinct value once
    pub fn annotate(&self, targets: &[TargetValue]) -> Annotations {
        let mut cache = ResultCache::with_capacity(targets.len());
        let mut lines = Vec::with_capacity(targets.len());
        let mut no_pair_count = 0;
        let mut error_count = 0;

        for &target in targets {
            let answer = cache.get_or_insert_with(target, || match self.query(target) {
                Ok(result) => {
                    if !result.is_pair() {
                        no_pair_count += 1;
                    }
                    self.format(result)
                }
                Err(e) => {
                    warn!(target_value = target, error = %e, "Search failed, reporting no pair");
                    error_count += 1;
                    self.config.missing_marker.clone()
                }
            });
            lines.push(answer.to_string());
        }

        if !targets.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let dup_fraction = (targets.len() - cache.len()) as f64 / targets.len() as f64;
            debug!("Dups S: {dup_fraction:.4} of {}", targets.len());
        }

        Annotations {
            lines,
            distinct_targets: cache.len(),
            cache_hits: cache.hits(),
            no_pair_count,
            error_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_two_by_two() {
        let engine = AnnotationEngine::new(&[1, 3], &[1, 0]);
        let result = engine.annotate(&[1]);
        assert_eq!(result.lines, vec!["1 2"]);
        assert_eq!(result.to_text(), "1 2");
    }

    #[test]
    fn test_positions_refer_to_original_arrays() {
        // M view [1, 3, 9] comes from positions 3, 1, 0 of the input
        let engine = AnnotationEngine::new(&[9, 3, 9, 1], &[0]);
        assert_eq!(engine.m_view().values(), &[1, 3, 9]);
        let result = engine.annotate(&[1]);
        assert_eq!(result.lines, vec!["4 1"]);
    }

    #[test]
    fn test_repeated_targets_use_cache() {
        let engine = AnnotationEngine::new(&[1, 3], &[1, 0]);
        let result = engine.annotate(&[1, 4, 1, 1, 4]);
        assert_eq!(result.lines.len(), 5);
        assert_eq!(result.distinct_targets, 2);
        assert_eq!(result.cache_hits, 3);
        assert_eq!(result.lines[0], result.lines[2]);
        assert_eq!(result.lines[1], result.lines[4]);
    }

    #[test]
    fn test_empty_factor_array_gives_marker() {
        let engine = AnnotationEngine::new(&[], &[1, 2]);
        let result = engine.annotate(&[1, 2, 3]);
        assert_eq!(result.lines, vec!["NA", "NA", "NA"]);
        assert_eq!(result.no_pair_count, 3);
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_search_error_does_not_stop_batch() {
        let engine = AnnotationEngine::new(&[0, 3], &[0, -4]);
        // Target 0 walks A below index 0; target 3 is an exact 3 + 0
        let result = engine.annotate(&[0, 3, 0]);
        assert_eq!(result.lines, vec!["NA", "2 1", "NA"]);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.cache_hits, 1);
    }

    #[test]
    fn test_custom_missing_marker() {
        let config = EngineConfig {
            missing_marker: "-".to_string(),
            ..EngineConfig::default()
        };
        let engine = AnnotationEngine::with_config(&[1], &[-3], config);
        assert_eq!(engine.annotate(&[5]).lines, vec!["-"]);
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{"missing_marker": "none"}"#).unwrap();
        assert_eq!(config.missing_marker, "none");
        assert_eq!(config.delta_ceiling, DEFAULT_DELTA_CEILING);
        assert!((config.scale - DEFAULT_SCALE).abs() < f64::EPSILON);

        assert!(EngineConfig::from_json("{not json").is_err());
    }
}
