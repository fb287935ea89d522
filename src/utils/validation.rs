//! Centralized validation and helper functions.

/// Maximum number of values allowed on one line of a problem file (DOS protection)
pub const MAX_VALUES_PER_LINE: usize = 10_000_000;

/// Check if adding another value would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new value.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_value_limit(count: usize) -> Option<String> {
    if count >= MAX_VALUES_PER_LINE {
        Some(format!(
            "Too many values: adding another would exceed maximum of {MAX_VALUES_PER_LINE}"
        ))
    } else {
        None
    }
}

/// Scale a decimal value to an integer, truncating toward zero.
///
/// Returns None if the scaled value is not finite or does not fit in `i32`.
///
/// # Examples
///
/// ```
/// use metabolite_annotation::utils::validation::scale_value;
///
/// assert_eq!(scale_value(1.5, 1e6), Some(1_500_000));
/// assert_eq!(scale_value(-0.0000019, 1e6), Some(-1));
/// assert_eq!(scale_value(5000.0, 1e6), None);
/// ```
#[must_use]
pub fn scale_value(value: f64, scale: f64) -> Option<i32> {
    let scaled = (value * scale).trunc();
    if scaled.is_finite() && scaled >= f64::from(i32::MIN) && scaled <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)] // Range checked above
        Some(scaled as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value_limit() {
        assert!(check_value_limit(0).is_none());
        assert!(check_value_limit(MAX_VALUES_PER_LINE - 1).is_none());
        assert!(check_value_limit(MAX_VALUES_PER_LINE).is_some());
    }

    #[test]
    fn test_scale_value_bounds() {
        assert_eq!(scale_value(2147.483647, 1e6), Some(i32::MAX));
        assert_eq!(scale_value(-2147.483648, 1e6), Some(i32::MIN));
        assert_eq!(scale_value(f64::NAN, 1e6), None);
        assert_eq!(scale_value(f64::INFINITY, 1.0), None);
    }

    #[test]
    fn test_scale_value_matches_float_product() {
        // 2.01 * 1e6 is slightly below 2_010_000 in binary floating point
        assert_eq!(scale_value(2.01, 1e6), Some(2_009_999));
        assert_eq!(scale_value(0.1, 1e6), Some(100_000));
    }
}
