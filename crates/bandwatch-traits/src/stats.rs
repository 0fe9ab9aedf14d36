//! Windowed statistics over price arrays.
//!
//! The moving averages used by the models are all built on trailing window
//! sums computed from a single cumulative sum, so every window costs one pass
//! over the prices regardless of its length.

use ndarray::{Array1, Axis};

/// Trailing window sums with an expanding warm-up.
///
/// Element `i` is the sum of `values[max(0, i + 1 - window) ..= i]`, i.e. the
/// sum over the trailing `window` values, or over every value seen so far
/// while fewer than `window` are available.
///
/// A zero window yields all zeros.
///
/// # Examples
///
/// ```
/// use bandwatch_traits::stats::window_sums;
/// use ndarray::array;
///
/// let sums = window_sums(&array![1.0, 2.0, 3.0, 4.0], 2);
/// assert_eq!(sums.to_vec(), vec![1.0, 3.0, 5.0, 7.0]);
/// ```
pub fn window_sums(values: &Array1<f64>, window: usize) -> Array1<f64> {
    if window == 0 {
        return Array1::zeros(values.len());
    }

    let mut cumulative = values.clone();
    cumulative.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);

    Array1::from_shape_fn(values.len(), |i| {
        if i >= window {
            cumulative[i] - cumulative[i - window]
        } else {
            cumulative[i]
        }
    })
}

/// Number of observations behind [`window_sums`] at index `i`.
#[must_use]
pub fn window_count(i: usize, window: usize) -> usize {
    (i + 1).min(window)
}

/// Moving average whose warm-up period is an expanding mean.
///
/// For `i < window - 1` the value is the mean of all values up to `i`; from
/// `window - 1` onward it is the mean of the trailing `window` values.
///
/// # Examples
///
/// ```
/// use bandwatch_traits::stats::expanding_window_mean;
/// use ndarray::array;
///
/// let ma = expanding_window_mean(&array![2.0, 4.0, 6.0, 8.0], 3);
/// assert_eq!(ma.to_vec(), vec![2.0, 3.0, 4.0, 6.0]);
/// ```
pub fn expanding_window_mean(values: &Array1<f64>, window: usize) -> Array1<f64> {
    let sums = window_sums(values, window);
    Array1::from_shape_fn(values.len(), |i| {
        sums[i] / window_count(i, window).max(1) as f64
    })
}

/// Strict rolling mean: undefined until `window` values are available.
pub fn rolling_mean(values: &Array1<f64>, window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let sums = window_sums(values, window);
    (0..values.len())
        .map(|i| (i + 1 >= window).then(|| sums[i] / window as f64))
        .collect()
}

/// Fractional change against the value `lag` observations earlier.
///
/// Undefined for the first `lag` observations.
pub fn pct_change(values: &Array1<f64>, lag: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            (i >= lag).then(|| {
                let base = values[i - lag];
                (values[i] - base) / base
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_window_sums_expanding_then_trailing() {
        let values = array![10.0, 10.0, 10.0, 10.0, 20.0];
        let sums = window_sums(&values, 3);
        assert_eq!(sums.to_vec(), vec![10.0, 20.0, 30.0, 30.0, 40.0]);
    }

    #[test]
    fn test_window_sums_window_longer_than_series() {
        let values = array![1.0, 2.0, 3.0];
        let sums = window_sums(&values, 10);
        assert_eq!(sums.to_vec(), vec![1.0, 3.0, 6.0]);
    }

    #[test]
    fn test_window_sums_zero_window() {
        let values = array![1.0, 2.0];
        assert_eq!(window_sums(&values, 0).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_window_count() {
        assert_eq!(window_count(0, 5), 1);
        assert_eq!(window_count(3, 5), 4);
        assert_eq!(window_count(4, 5), 5);
        assert_eq!(window_count(40, 5), 5);
    }

    #[test]
    fn test_expanding_window_mean_matches_trailing_mean() {
        let values: Array1<f64> = (1..=50).map(|x| f64::from(x) * 1.37).collect();
        let window = 7;
        let ma = expanding_window_mean(&values, window);

        for i in 0..values.len() {
            let start = (i + 1).saturating_sub(window);
            let slice = &values.as_slice().unwrap()[start..=i];
            let expected = slice.iter().sum::<f64>() / slice.len() as f64;
            assert_relative_eq!(ma[i], expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rolling_mean_undefined_during_warm_up() {
        let values = array![1.0, 2.0, 3.0, 4.0];
        let ma = rolling_mean(&values, 3);
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_relative_eq!(ma[2].unwrap(), 2.0);
        assert_relative_eq!(ma[3].unwrap(), 3.0);
    }

    #[test]
    fn test_pct_change() {
        let values = array![100.0, 110.0, 99.0];
        let change = pct_change(&values, 1);
        assert_eq!(change[0], None);
        assert_relative_eq!(change[1].unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(change[2].unwrap(), -0.1, epsilon = 1e-12);

        let change = pct_change(&values, 5);
        assert!(change.iter().all(Option::is_none));
    }
}
