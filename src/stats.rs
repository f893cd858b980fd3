// Summary statistics of the raw samples.
// All the functions return `f64::NAN` for empty input.

/// Arithmetic mean of the `values`.
///
/// # Examples
///
/// ```
/// use normhist::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population [variance] of the `values`.
///
/// [variance]: https://en.wikipedia.org/wiki/Variance
///
/// # Examples
///
/// ```
/// use normhist::stats::variance;
///
/// assert_eq!(variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 4.0);
/// ```
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().fold(0.0, |acc, x| acc + (x - m).powi(2)) / values.len() as f64
}

/// Standard deviation, square root of the [`variance`].
pub fn stdev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Smallest of the `values`.
#[inline]
pub fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest of the `values`.
#[inline]
pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::{max, mean, min, stdev, variance};
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(mean ; "empty mean")]
    #[test_case(variance ; "empty variance")]
    #[test_case(stdev ; "empty stdev")]
    #[test_case(min ; "empty min")]
    #[test_case(max ; "empty max")]
    fn empty(f: fn(&[f64]) -> f64) {
        assert!(f(&[]).is_nan());
    }

    #[test]
    fn single() {
        assert_eq!(mean(&[3.5]), 3.5);
        assert_eq!(variance(&[3.5]), 0.0);
        assert_eq!(min(&[3.5]), 3.5);
        assert_eq!(max(&[3.5]), 3.5);
    }

    #[test]
    fn summary() {
        let values = [-1.5, 0.5, 2.0, 3.0, -4.0];
        assert_relative_eq!(mean(&values), 0.0);
        assert_relative_eq!(variance(&values), 6.3);
        assert_relative_eq!(stdev(&values), 6.3_f64.sqrt());
        assert_eq!(min(&values), -4.0);
        assert_eq!(max(&values), 3.0);
    }
}
