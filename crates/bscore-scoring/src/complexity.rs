//! Complexity coefficients: how much score one unit of candidate complexity
//! is worth.
//!
//! Both follow from treating the complexity penalty as the log-prior of a
//! candidate and the score as the log-likelihood of the data under a noise
//! model. A candidate drawn from an alphabet of `n` symbols costs `ln(n)`
//! nats per symbol; the coefficient converts that cost into score units.

/// Coefficient for continuous targets with Gaussian noise of standard
/// deviation `stdev`: `ln(n) / (2·stdev²)`.
///
/// Returns `0.0` when `stdev` is not positive (`NaN` included) or the
/// alphabet is empty.
///
/// ```
/// # use bscore_scoring::complexity::contin_complexity_coef;
/// assert_eq!(contin_complexity_coef(10, 0.0), 0.0);
/// assert!(contin_complexity_coef(10, 0.5) > contin_complexity_coef(10, 1.0));
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn contin_complexity_coef(alphabet_size: usize, stdev: f64) -> f64 {
    if alphabet_size == 0 || stdev.is_nan() || stdev <= 0.0 {
        return 0.0;
    }
    (alphabet_size as f64).ln() / (2.0 * stdev * stdev)
}

/// Coefficient for boolean targets where each output is flipped with
/// probability `p`: `-ln(n) / ln(p / (1 - p))`.
///
/// Returns `0.0` unless `0 < p < 0.5`, and for an empty alphabet.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn discrete_complexity_coef(alphabet_size: usize, p: f64) -> f64 {
    if alphabet_size == 0 || p.is_nan() || p <= 0.0 || p >= 0.5 {
        return 0.0;
    }
    -(alphabet_size as f64).ln() / (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contin_value() {
        let coef = contin_complexity_coef(4, 1.0);
        assert!((coef - 4.0_f64.ln() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_discrete_is_positive_and_grows_with_noise() {
        let low = discrete_complexity_coef(8, 0.01);
        let high = discrete_complexity_coef(8, 0.3);
        assert!(low > 0.0);
        assert!(high > low);
        assert_eq!(discrete_complexity_coef(8, 0.5), 0.0);
        assert_eq!(discrete_complexity_coef(8, 0.0), 0.0);
    }

    #[test]
    fn test_degenerate_inputs_give_zero() {
        assert_eq!(contin_complexity_coef(10, f64::NAN), 0.0);
        assert_eq!(contin_complexity_coef(10, -1.0), 0.0);
        assert_eq!(contin_complexity_coef(0, 1.0), 0.0);
        assert_eq!(discrete_complexity_coef(8, f64::NAN), 0.0);
        assert_eq!(discrete_complexity_coef(0, 0.1), 0.0);
    }
}
