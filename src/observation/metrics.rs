//! Column metrics
//!
//! Pure numeric functions over non-empty sequences. Every function fails with
//! `DTE_INSUFFICIENT_DATA` on an empty input rather than returning a sentinel.

use crate::engine::errors::{EngineError, EngineResult};

/// Running mean and second moment (Welford).
///
/// Avoids `sum(x²) - sum(x)²/n`, which cancels catastrophically for values of
/// large magnitude.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn of(values: &[f64]) -> Self {
        Self::of_scaled_by(values, 1.0)
    }

    fn of_scaled_by(values: &[f64], scale: f64) -> Self {
        let mut m = Moments::default();
        for &x in values {
            m.count += 1;
            let x = x / scale;
            let delta = x - m.mean;
            m.mean += delta / m.count as f64;
            m.m2 += delta * (x - m.mean);
        }
        m
    }

    /// Moments of `values / 2^k`, with `2^k` the power of two at or below
    /// `max |x|`.
    ///
    /// Dividing by a power of two is exact, so scale-free statistics come out
    /// identical to the unscaled ones when those stay finite, and stay finite
    /// for reals near the top of the f64 range.
    fn scaled(values: &[f64]) -> Self {
        let max = values.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        if max == 0.0 || !max.is_finite() {
            return Self::of(values);
        }
        let exponent = (max.log2().floor() as i32).clamp(-1022, 1023);
        Self::of_scaled_by(values, 2f64.powi(exponent))
    }

    /// Population variance
    fn variance(&self) -> f64 {
        self.m2 / self.count as f64
    }
}

/// Rejects a scale-free statistic that could not be represented.
fn finite(statistic: &'static str, value: f64) -> EngineResult<f64> {
    if !value.is_finite() {
        return Err(EngineError::degenerate_input(statistic, "result is not finite"));
    }
    Ok(value)
}

fn non_empty<'a>(values: &'a [f64], statistic: &str) -> EngineResult<&'a [f64]> {
    if values.is_empty() {
        return Err(EngineError::insufficient_data(statistic));
    }
    Ok(values)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> EngineResult<f64> {
    Ok(Moments::of(non_empty(values, "mean")?).mean)
}

/// Population variance, single pass.
pub fn variance(values: &[f64]) -> EngineResult<f64> {
    Ok(Moments::of(non_empty(values, "variance")?).variance())
}

/// `stddev / |mean|`.
///
/// # Errors
///
/// `DTE_DEGENERATE_INPUT` if the mean is zero or the ratio is not finite.
pub fn coefficient_of_variation(values: &[f64]) -> EngineResult<f64> {
    let m = Moments::scaled(non_empty(values, "coefficient_of_variation")?);
    if m.mean == 0.0 {
        return Err(EngineError::degenerate_input("coefficient_of_variation", "mean is zero"));
    }
    finite("coefficient_of_variation", m.variance().sqrt() / m.mean.abs())
}

/// `variance / mean²`, the squared coefficient of variation.
///
/// # Errors
///
/// `DTE_DEGENERATE_INPUT` if the mean is zero or the ratio is not finite,
/// as when the mean is negligible against the spread.
pub fn variance_ratio(values: &[f64]) -> EngineResult<f64> {
    let m = Moments::scaled(non_empty(values, "variance_ratio")?);
    if m.mean == 0.0 {
        return Err(EngineError::degenerate_input("variance_ratio", "mean is zero"));
    }
    finite("variance_ratio", m.variance() / (m.mean * m.mean))
}

fn direction(a: f64, b: f64) -> i8 {
    match b.partial_cmp(&a) {
        Some(std::cmp::Ordering::Greater) => 1,
        Some(std::cmp::Ordering::Less) => -1,
        _ => 0,
    }
}

/// Counts positions `i` where the direction of `x[i] - x[i-1]` differs from
/// the direction of `x[i-1] - x[i-2]` and both are non-zero.
///
/// Fewer than three values cannot reverse and yield zero.
pub fn direction_reversal_count(values: &[f64]) -> EngineResult<u64> {
    let values = non_empty(values, "direction_reversal_count")?;
    let mut reversals = 0;
    for window in values.windows(3) {
        let previous = direction(window[0], window[1]);
        let current = direction(window[1], window[2]);
        if previous != 0 && current != 0 && previous != current {
            reversals += 1;
        }
    }
    Ok(reversals)
}

/// Shannon entropy in bits of a categorical frequency distribution.
///
/// Zero counts contribute nothing (`0·log2(0) = 0`).
pub fn shannon_entropy(counts: &[u64]) -> EngineResult<f64> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return Err(EngineError::insufficient_data("shannon_entropy"));
    }
    let total = total as f64;
    let mut entropy = 0.0;
    for &count in counts.iter().filter(|&&c| c > 0) {
        let p = count as f64 / total;
        entropy -= p * p.log2();
    }
    Ok(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::EngineErrorCode;

    #[test]
    fn test_empty_input_is_insufficient() {
        for result in [mean(&[]), variance(&[]), variance_ratio(&[]), coefficient_of_variation(&[])] {
            assert_eq!(result.unwrap_err().code(), EngineErrorCode::InsufficientData);
        }
        assert!(direction_reversal_count(&[]).is_err());
        assert!(shannon_entropy(&[]).is_err());
        assert!(shannon_entropy(&[0, 0]).is_err());
    }

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values).unwrap(), 5.0);
        assert_eq!(variance(&values).unwrap(), 4.0);
    }

    #[test]
    fn test_variance_stable_for_large_magnitudes() {
        let base = 1e9;
        let values = [base + 4.0, base + 7.0, base + 13.0, base + 16.0];
        // Naive sum-of-squares loses this entirely in f64
        assert!((variance(&values).unwrap() - 22.5).abs() < 1e-6);
    }

    #[test]
    fn test_variance_ratio_near_f64_max() {
        let mut values = vec![1e160; 29];
        values.push(1e163);
        let ratio = variance_ratio(&values).unwrap();
        assert!((ratio - 27.3337).abs() < 1e-3, "ratio {}", ratio);

        // scaling by a power of two leaves small inputs bit-identical
        let mut scaled: Vec<f64> = (0..29).map(|i| 100.0 + i as f64 * 0.3).collect();
        scaled.push(10_000.0);
        let unscaled = Moments::of(&scaled);
        assert_eq!(
            variance_ratio(&scaled).unwrap(),
            unscaled.variance() / (unscaled.mean * unscaled.mean)
        );
    }

    #[test]
    fn test_non_finite_ratio_is_degenerate() {
        // mean is ~1e-161 of the spread; the ratio overflows
        let err = variance_ratio(&[-1e160, 1e160, 1.0]).unwrap_err();
        assert_eq!(err.code(), EngineErrorCode::DegenerateInput);
        let err = coefficient_of_variation(&[-1.0, 1.0, 1e-310]).unwrap_err();
        assert_eq!(err.code(), EngineErrorCode::DegenerateInput);
    }

    #[test]
    fn test_zero_mean_is_degenerate() {
        let values = [-1.0, 1.0];
        assert_eq!(
            variance_ratio(&values).unwrap_err().code(),
            EngineErrorCode::DegenerateInput
        );
        assert_eq!(
            coefficient_of_variation(&values).unwrap_err().code(),
            EngineErrorCode::DegenerateInput
        );
    }

    #[test]
    fn test_variance_ratio_exact() {
        // mean 1, population variance 4
        assert_eq!(variance_ratio(&[0.0, 0.0, 0.0, 0.0, 5.0]).unwrap(), 4.0);
        assert_eq!(coefficient_of_variation(&[0.0, 0.0, 0.0, 0.0, 5.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_direction_reversals() {
        assert_eq!(direction_reversal_count(&[1.0]).unwrap(), 0);
        assert_eq!(direction_reversal_count(&[1.0, 2.0]).unwrap(), 0);
        assert_eq!(direction_reversal_count(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 0);
        assert_eq!(direction_reversal_count(&[1.0, 3.0, 2.0]).unwrap(), 1);
        assert_eq!(direction_reversal_count(&[1.0, 3.0, 2.0, 4.0]).unwrap(), 2);
    }

    #[test]
    fn test_flat_steps_do_not_reverse() {
        // a zero step on either side suppresses the comparison
        assert_eq!(direction_reversal_count(&[1.0, 2.0, 2.0, 1.0]).unwrap(), 0);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(shannon_entropy(&[5]).unwrap(), 0.0);
        assert_eq!(shannon_entropy(&[1, 1]).unwrap(), 1.0);
        assert_eq!(shannon_entropy(&[3, 0, 3]).unwrap(), 1.0);
        assert_eq!(shannon_entropy(&[1; 16]).unwrap(), 4.0);
    }
}
