//! Shannon entropy and conditional entropy of weighted discrete samples.

use std::collections::BTreeMap;

/// Shannon entropy, in bits, of a distribution given by unnormalized weights.
///
/// Zero-weight entries are skipped; an empty or zero-weight input has zero entropy.
///
/// # Examples
///
/// ```
/// # use bscore_stats::entropy::entropy;
/// assert!((entropy([1.0, 1.0]) - 1.0).abs() < 1e-12);
/// assert!((entropy([3.0, 3.0, 3.0, 3.0]) - 2.0).abs() < 1e-12);
/// assert_eq!(entropy([5.0]), 0.0);
/// ```
#[must_use]
pub fn entropy<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let weights = weights.into_iter().filter(|w| *w > 0.0).collect::<Vec<_>>();
    let total = weights.iter().sum::<f64>();
    if total <= 0.0 {
        return 0.0;
    }
    -weights
        .iter()
        .map(|w| {
            let p = w / total;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Conditional entropy `H(Y | X) = H(X, Y) - H(X)` of weighted `(x, y)` samples.
///
/// `x` is typically the tuple of selected feature values of a row and `y`
/// its output. Lower is better: zero means `x` determines `y`.
///
/// # Examples
///
/// ```
/// # use bscore_stats::entropy::conditional_entropy;
/// // y == x: fully determined
/// let determined = [(0, 0, 1.0), (1, 1, 1.0), (0, 0, 1.0)];
/// assert!(conditional_entropy(determined).abs() < 1e-12);
///
/// // y independent of a constant x: H(Y | X) = H(Y) = 1 bit
/// let independent = [(0, 0, 1.0), (0, 1, 1.0)];
/// assert!((conditional_entropy(independent) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn conditional_entropy<X, Y, I>(samples: I) -> f64
where
    X: Ord + Clone,
    Y: Ord,
    I: IntoIterator<Item = (X, Y, f64)>,
{
    let mut joint: BTreeMap<(X, Y), f64> = BTreeMap::new();
    let mut marginal: BTreeMap<X, f64> = BTreeMap::new();
    for (x, y, w) in samples {
        *marginal.entry(x.clone()).or_default() += w;
        *joint.entry((x, y)).or_default() += w;
    }
    entropy(joint.into_values()) - entropy(marginal.into_values())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_are_multiplicities() {
        let weighted = [(0, 'a', 2.0), (0, 'b', 2.0), (1, 'a', 4.0)];
        let expanded = [
            (0, 'a', 1.0),
            (0, 'a', 1.0),
            (0, 'b', 1.0),
            (0, 'b', 1.0),
            (1, 'a', 1.0),
            (1, 'a', 1.0),
            (1, 'a', 1.0),
            (1, 'a', 1.0),
        ];
        let a = conditional_entropy(weighted);
        let b = conditional_entropy(expanded);
        assert!((a - b).abs() < 1e-12);
        // half of the mass has one bit of uncertainty
        assert!((a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(entropy(std::iter::empty()), 0.0);
        assert_eq!(conditional_entropy(Vec::<(u8, u8, f64)>::new()), 0.0);
    }
}
