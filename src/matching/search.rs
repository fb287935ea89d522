//! Nearest-sum search over a pair of sorted views.
//!
//! For a target `s`, the search walks M (ascending) and A (descending) looking
//! for the pair minimizing `|m + a - s|` with `m + a > 0`. It alternates between
//! axes based on the sign of the current delta, and along the chosen axis takes
//! halving jumps until it brackets the zero crossing.
//!
//! The walk is greedy: it never backtracks on the axis it is not advancing, so
//! it can miss the global optimum. Its answers are pinned by the reference
//! answer files and must not change.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::core::sorted_view::SortedView;
use crate::core::types::{Axis, NoPairReason, SortOrder, TargetValue};

/// Candidates must have an absolute delta strictly below this value
pub const DEFAULT_DELTA_CEILING: u64 = 1_000_000_000;

/// Below this remaining distance the search moves one position at a time
const SINGLE_STEP_THRESHOLD: usize = 3;

/// Outcome of a single nearest-sum query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Indices into the M view and the A view
    Pair { m_index: usize, a_index: usize },
    NoValidPair(NoPairReason),
}

impl MatchResult {
    #[must_use]
    pub fn pair(&self) -> Option<(usize, usize)> {
        match self {
            Self::Pair { m_index, a_index } => Some((*m_index, *a_index)),
            Self::NoValidPair(_) => None,
        }
    }

    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.pair().is_some()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(
        "index {index} out of range for {axis} (length {len}) while searching target {target} (i={i}, j={j})"
    )]
    IndexOutOfRange {
        target: TargetValue,
        axis: Axis,
        index: isize,
        len: usize,
        i: usize,
        j: usize,
    },
}

/// Find the best pair for `target` using the default delta ceiling
///
/// # Errors
///
/// Returns `SearchError::IndexOutOfRange` if the stepping walk leaves either
/// view. The error only concerns this target.
pub fn nearest_sum(
    target: TargetValue,
    m: &SortedView,
    a: &SortedView,
) -> Result<MatchResult, SearchError> {
    nearest_sum_with_ceiling(target, m, a, DEFAULT_DELTA_CEILING)
}

/// Find the best pair for `target`, only accepting deltas below `ceiling`
///
/// # Errors
///
/// Returns `SearchError::IndexOutOfRange` if the stepping walk leaves either view.
pub fn nearest_sum_with_ceiling(
    target: TargetValue,
    m: &SortedView,
    a: &SortedView,
    ceiling: u64,
) -> Result<MatchResult, SearchError> {
    debug_assert_eq!(m.order(), SortOrder::Ascending);
    debug_assert_eq!(a.order(), SortOrder::Descending);

    if m.is_empty() || a.is_empty() {
        return Ok(MatchResult::NoValidPair(NoPairReason::InputEmpty));
    }

    Search::new(target, m.values(), a.values(), ceiling).run()
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    delta: u64,
    i: usize,
    j: usize,
}

/// Walk state for one target
struct Search<'a> {
    target: TargetValue,
    m: &'a [i32],
    a: &'a [i32],
    ceiling: u64,
    i: usize,
    j: usize,
    best: Option<Candidate>,
}

impl<'a> Search<'a> {
    fn new(target: TargetValue, m: &'a [i32], a: &'a [i32], ceiling: u64) -> Self {
        Self {
            target,
            m,
            a,
            ceiling,
            i: 0,
            j: 0,
            best: None,
        }
    }

    fn run(mut self) -> Result<MatchResult, SearchError> {
        let mut visited: HashSet<(usize, usize)> = HashSet::new();

        loop {
            if !visited.insert((self.i, self.j)) {
                // The walk is deterministic, so a repeated position would repeat forever
                debug!(
                    target_value = self.target,
                    i = self.i,
                    j = self.j,
                    "search revisited a position, stopping"
                );
                return Ok(self.finish());
            }

            let sigma = self.sum_at(Axis::M, index_of(self.i))?;
            let delta = sigma - i64::from(self.target);

            if self.offer(self.i, self.j, sigma) && delta == 0 {
                return Ok(pair(self.i, self.j));
            }

            if self.i + 1 == self.m.len() || self.j + 1 == self.a.len() {
                return Ok(self.finish());
            }

            let exact = if delta < 0 {
                self.step_m(delta)?
            } else {
                self.step_a(delta)?
            };

            if let Some(result) = exact {
                return Ok(result);
            }
        }
    }

    /// Advance `i` toward larger sums until the delta sign flips
    fn step_m(&mut self, mut delta: i64) -> Result<Option<MatchResult>, SearchError> {
        let last = index_of(self.m.len() - 1);
        let mut remaining = self.m.len() - (self.i + 1);
        let mut pos = index_of(self.i);

        loop {
            remaining = remaining.div_ceil(2);
            let step = if remaining < SINGLE_STEP_THRESHOLD {
                1
            } else {
                index_of(remaining)
            };
            pos = if delta < 0 { pos + step } else { pos - step };

            if pos == last {
                self.i = self.m.len() - 1;
                return Ok(None);
            }

            let here = self.sum_at(Axis::M, pos)?;
            delta = here - i64::from(self.target);
            let at = to_index(pos);
            if delta == 0 && here > 0 {
                return Ok(Some(pair(at, self.j)));
            }

            // At index 0 there is nothing behind to bracket against
            if at == 0 {
                continue;
            }
            let before = at - 1;
            let back = self.sum_at(Axis::M, pos - 1)?;
            let delta_back = back - i64::from(self.target);
            if delta_back == 0 && back > 0 {
                return Ok(Some(pair(before, self.j)));
            }
            if delta >= 0 && delta_back <= 0 {
                self.offer(before, self.j, back);
                self.i = at;
                return Ok(None);
            }
        }
    }

    /// Advance `j` toward smaller sums until the delta sign flips
    fn step_a(&mut self, mut delta: i64) -> Result<Option<MatchResult>, SearchError> {
        let last = index_of(self.a.len() - 1);
        let mut remaining = self.a.len() - (self.j + 1);
        let mut pos = index_of(self.j);

        loop {
            remaining = remaining.div_ceil(2);
            pos = if remaining < SINGLE_STEP_THRESHOLD {
                if delta > 0 {
                    pos + 1
                } else {
                    pos - 1
                }
            } else if delta >= 0 {
                pos + index_of(remaining)
            } else {
                pos - index_of(remaining)
            };

            if pos == last {
                self.j = self.a.len() - 1;
                return Ok(None);
            }

            let here = self.sum_at(Axis::A, pos)?;
            delta = here - i64::from(self.target);
            let at = to_index(pos);
            if delta == 0 && here > 0 {
                return Ok(Some(pair(self.i, at)));
            }

            if at == 0 {
                continue;
            }
            let before = at - 1;
            let back = self.sum_at(Axis::A, pos - 1)?;
            let delta_back = back - i64::from(self.target);
            if delta_back == 0 && back > 0 {
                return Ok(Some(pair(self.i, before)));
            }
            if delta <= 0 && delta_back >= 0 {
                self.offer(self.i, before, back);
                self.j = at;
                return Ok(None);
            }
        }
    }

    /// Sum with `index` on `axis` and the current pointer on the other axis
    fn sum_at(&self, axis: Axis, index: isize) -> Result<i64, SearchError> {
        let values = match axis {
            Axis::M => self.m,
            Axis::A => self.a,
        };
        let value = usize::try_from(index)
            .ok()
            .and_then(|k| values.get(k))
            .ok_or(SearchError::IndexOutOfRange {
                target: self.target,
                axis,
                index,
                len: values.len(),
                i: self.i,
                j: self.j,
            })?;

        let other = match axis {
            Axis::M => self.a[self.j],
            Axis::A => self.m[self.i],
        };
        Ok(i64::from(*value) + i64::from(other))
    }

    /// Record `(i, j)` if it has a positive sum and beats the best delta so far
    fn offer(&mut self, i: usize, j: usize, sigma: i64) -> bool {
        let delta = (sigma - i64::from(self.target)).unsigned_abs();
        let bound = self.best.map_or(self.ceiling, |b| b.delta);
        if sigma > 0 && delta < bound {
            self.best = Some(Candidate { delta, i, j });
            true
        } else {
            false
        }
    }

    fn finish(&self) -> MatchResult {
        match self.best {
            Some(c) => pair(c.i, c.j),
            None => MatchResult::NoValidPair(NoPairReason::NoPositivePair),
        }
    }
}

fn pair(m_index: usize, a_index: usize) -> MatchResult {
    MatchResult::Pair { m_index, a_index }
}

// Views never exceed isize::MAX elements (a Vec cannot), so these conversions hold.
#[allow(clippy::cast_possible_wrap)]
fn index_of(k: usize) -> isize {
    k as isize
}

#[allow(clippy::cast_sign_loss)]
fn to_index(pos: isize) -> usize {
    pos as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sorted_view::build_index;

    fn search(target: i32, m: &[i32], a: &[i32]) -> Result<MatchResult, SearchError> {
        let (mv, av) = build_index(m, a);
        nearest_sum(target, &mv, &av)
    }

    fn sum_of(result: MatchResult, m: &[i32], a: &[i32]) -> Option<i64> {
        let (mv, av) = build_index(m, a);
        result
            .pair()
            .map(|(i, j)| i64::from(mv.values()[i]) + i64::from(av.values()[j]))
    }

    /// Small deterministic generator so tests need no RNG crate
    struct Lcg(u64);

    impl Lcg {
        fn next_in(&mut self, lo: i32, hi: i32) -> i32 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let span = u64::try_from(hi - lo + 1).unwrap();
            lo + i32::try_from((self.0 >> 33) % span).unwrap()
        }
    }

    #[test]
    fn test_two_by_two_exact() {
        // M [1, 3], A [1, 0]: 1 + 0 == 1
        let result = search(1, &[1, 3], &[1, 0]).unwrap();
        assert_eq!(
            result,
            MatchResult::Pair {
                m_index: 0,
                a_index: 1
            }
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            search(5, &[], &[1, 2]).unwrap(),
            MatchResult::NoValidPair(NoPairReason::InputEmpty)
        );
        assert_eq!(
            search(5, &[1, 2], &[]).unwrap(),
            MatchResult::NoValidPair(NoPairReason::InputEmpty)
        );
    }

    #[test]
    fn test_single_elements() {
        assert_eq!(
            search(0, &[5], &[-2]).unwrap(),
            MatchResult::Pair {
                m_index: 0,
                a_index: 0
            }
        );
        assert_eq!(
            search(4, &[1], &[-3]).unwrap(),
            MatchResult::NoValidPair(NoPairReason::NoPositivePair)
        );
    }

    #[test]
    fn test_non_positive_sums_rejected() {
        // -5 + 5 is one away from the target but not positive
        let result = search(1, &[-5, 3], &[5, 0]).unwrap();
        assert_eq!(
            result,
            MatchResult::Pair {
                m_index: 1,
                a_index: 0
            }
        );
        assert_eq!(
            search(0, &[-1, 3], &[1]).unwrap(),
            MatchResult::NoValidPair(NoPairReason::NoPositivePair)
        );
    }

    #[test]
    fn test_exact_match_found_through_bisection() {
        let m: Vec<i32> = (0..100).map(|k| k * 10).collect();
        let a = [3, 2, 1, 0];
        let result = search(573, &m, &a).unwrap();
        assert_eq!(sum_of(result, &m, &a), Some(573));
    }

    #[test]
    fn test_stops_when_a_pointer_reaches_the_end() {
        // A has a single value so only the first pair is ever evaluated
        let m = [100, 200, 300];
        let result = search(240, &m, &[0]).unwrap();
        assert_eq!(sum_of(result, &m, &[0]), Some(100));
    }

    #[test]
    fn test_greedy_walk_can_miss_closer_pair() {
        // 200 + 1 is closer to 240, but the walk jumps straight to the end of M
        let m = [100, 200, 300];
        let a = [1, 0];
        let result = search(240, &m, &a).unwrap();
        assert_eq!(sum_of(result, &m, &a), Some(301));
    }

    #[test]
    fn test_delta_ceiling_excludes_far_pairs() {
        let (mv, av) = build_index(&[10], &[0]);
        assert_eq!(
            nearest_sum_with_ceiling(100, &mv, &av, 50).unwrap(),
            MatchResult::NoValidPair(NoPairReason::NoPositivePair)
        );
        assert!(nearest_sum_with_ceiling(100, &mv, &av, 91)
            .unwrap()
            .is_pair());
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let result = search(i32::MAX, &[i32::MAX, i32::MAX - 1], &[1, 0]).unwrap();
        assert!(result.is_pair());
    }

    #[test]
    fn test_index_out_of_range_is_an_error() {
        // Zero target with a zero first sum steps A below index 0
        let err = search(0, &[0, 3], &[0, -4]).unwrap_err();
        assert_eq!(
            err,
            SearchError::IndexOutOfRange {
                target: 0,
                axis: Axis::A,
                index: -1,
                len: 2,
                i: 0,
                j: 0,
            }
        );
    }

    #[test]
    fn test_stepping_past_the_end_is_an_error() {
        // Target above every sum; the halving jumps on M overshoot the last index
        let m = [
            2, 12, 20, 33, 42, 43, 48, 51, 67, 68, 144, 164, 173, 176, 179, 187, 196, 214, 227,
            230, 258, 273, 275, 289, 292, 307, 323, 330, 341, 345, 348, 355, 358, 373,
        ];
        let err = search(379, &m, &[-6, -9]).unwrap_err();
        assert!(matches!(
            err,
            SearchError::IndexOutOfRange {
                target: 379,
                axis: Axis::M,
                index: 34,
                len: 34,
                ..
            }
        ));

        // Other targets against the same arrays still resolve
        let result = search(300, &m, &[-6, -9]).unwrap();
        assert_eq!(result.pair(), Some((25, 0)));
    }

    #[test]
    fn test_stepping_back_onto_first_position_skips_bracket() {
        // A view [100, 10, 9, ..., -23]: the A walk goes 0 -> 17 -> 8 -> 3 -> 0,
        // finds nothing behind index 0, then steps to 1 and brackets there.
        let a: Vec<i32> = std::iter::once(100).chain((-23..=10).rev()).collect();
        assert_eq!(a.len(), 35);

        let result = search(50, &[0, 1000], &a).unwrap();
        assert_eq!(
            result,
            MatchResult::Pair {
                m_index: 0,
                a_index: 1
            }
        );
        assert_eq!(sum_of(result, &[0, 1000], &a), Some(10));
    }

    #[test]
    fn test_revisited_position_ends_search() {
        // The walk comes back to a pointer pair it already evaluated
        let m = [29, 40, 20, 42, 17, 58, 52, -21, -24, 48, -3, 2, -8, 27, 36];
        let a = [7, -2, -4, -14, -16, -3, -17, -28, -30];

        let result = search(-19, &m, &a).unwrap();
        assert_eq!(result, MatchResult::NoValidPair(NoPairReason::NoPositivePair));
    }

    #[test]
    fn test_returned_pairs_have_positive_sum() {
        let mut rng = Lcg(7);
        for _ in 0..2_000 {
            let m: Vec<i32> = (0..rng.next_in(1, 12)).map(|_| rng.next_in(-20, 60)).collect();
            let a: Vec<i32> = (0..rng.next_in(1, 12)).map(|_| rng.next_in(-20, 20)).collect();
            let target = rng.next_in(-10, 80);
            if let Ok(result) = search(target, &m, &a) {
                if let Some(sum) = sum_of(result, &m, &a) {
                    assert!(sum > 0, "sum {sum} for target {target}, M={m:?} A={a:?}");
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = Lcg(11);
        let m: Vec<i32> = (0..500).map(|_| rng.next_in(0, 100_000)).collect();
        let a: Vec<i32> = (0..50).map(|_| rng.next_in(-500, 500)).collect();
        let (mv, av) = build_index(&m, &a);
        for target in [1, 50, 4_999, 77_777, 100_500] {
            assert_eq!(
                nearest_sum(target, &mv, &av),
                nearest_sum(target, &mv, &av)
            );
        }
    }
}
