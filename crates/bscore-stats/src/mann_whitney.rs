//! Mann-Whitney U rank-sum statistic over weighted samples.

use std::collections::BTreeMap;

use crate::histogram::Histogram;

/// Standardized Mann-Whitney U of `second` against `first`.
///
/// Bin weights act as multiplicities (fractional weights are allowed). Tied
/// values share their average rank, and the variance carries the usual tie
/// correction. The result is positive when `second` tends to take larger
/// values than `first`, negative when smaller, and zero when either sample is
/// empty or all values are tied.
///
/// # Examples
///
/// ```
/// # use bscore_stats::{histogram::Histogram, mann_whitney::standardized_mann_whitney_u};
/// let low: Histogram = [(1.0, 1.0), (2.0, 1.0), (3.0, 1.0)].into_iter().collect();
/// let high: Histogram = [(4.0, 1.0), (5.0, 1.0), (6.0, 1.0)].into_iter().collect();
/// assert!(standardized_mann_whitney_u(&low, &high) > 0.0);
/// assert!(standardized_mann_whitney_u(&high, &low) < 0.0);
/// assert_eq!(standardized_mann_whitney_u(&low, &low), 0.0);
/// ```
#[must_use]
pub fn standardized_mann_whitney_u(first: &Histogram, second: &Histogram) -> f64 {
    let n1 = first.total_weight();
    let n2 = second.total_weight();
    if n1 <= 0.0 || n2 <= 0.0 {
        return 0.0;
    }

    // Merge both samples by value, keeping per-sample weights.
    let mut merged: BTreeMap<u64, (f64, f64, f64)> = BTreeMap::new();
    for (x, w) in first.iter() {
        merged.entry(order_key(x)).or_insert((x, 0.0, 0.0)).1 += w;
    }
    for (x, w) in second.iter() {
        merged.entry(order_key(x)).or_insert((x, 0.0, 0.0)).2 += w;
    }

    let mut rank_base = 0.0;
    let mut rank_sum_second = 0.0;
    let mut tie_term = 0.0;
    for &(_, c1, c2) in merged.values() {
        let c = c1 + c2;
        let average_rank = rank_base + (c + 1.0) / 2.0;
        rank_sum_second += c2 * average_rank;
        rank_base += c;
        tie_term += c * c * c - c;
    }

    let u = rank_sum_second - n2 * (n2 + 1.0) / 2.0;
    let mean = n1 * n2 / 2.0;
    let n = n1 + n2;
    let variance = if n > 1.0 {
        n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)))
    } else {
        0.0
    };
    if variance <= 0.0 {
        return 0.0;
    }
    (u - mean) / variance.sqrt()
}

/// Maps an `f64` to a `u64` whose natural order matches [`f64::total_cmp`].
fn order_key(x: f64) -> u64 {
    let bits = (x + 0.0).to_bits();
    if bits >> 63 == 1 { !bits } else { bits | (1 << 63) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sample(values: &[f64]) -> Histogram {
        values.iter().map(|&v| (v, 1.0)).collect()
    }

    #[test]
    fn test_order_key_is_monotone() {
        let values = [-10.0, -1.5, -0.0, 0.0, 1e-300, 2.0, f64::INFINITY];
        let keys = values.iter().map(|&v| order_key(v)).collect::<Vec<_>>();
        assert!(keys.is_sorted());
        assert_eq!(order_key(-0.0), order_key(0.0));
    }

    #[test]
    fn test_complete_separation_value() {
        // n1 = n2 = 3, no ties: U = 9, mean 4.5, var = 9 * 7 / 12
        let low = unit_sample(&[1.0, 2.0, 3.0]);
        let high = unit_sample(&[4.0, 5.0, 6.0]);
        let expected = 4.5 / (9.0_f64 * 7.0 / 12.0).sqrt();
        assert!((standardized_mann_whitney_u(&low, &high) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_antisymmetric() {
        let a = unit_sample(&[1.0, 3.0, 3.0, 8.0]);
        let b = unit_sample(&[2.0, 3.0, 9.0]);
        let ab = standardized_mann_whitney_u(&a, &b);
        let ba = standardized_mann_whitney_u(&b, &a);
        assert!((ab + ba).abs() < 1e-12);
    }

    #[test]
    fn test_all_tied_is_zero() {
        let a = unit_sample(&[1.0, 1.0]);
        let b = unit_sample(&[1.0]);
        assert_eq!(standardized_mann_whitney_u(&a, &b), 0.0);
        assert_eq!(standardized_mann_whitney_u(&a, &Histogram::new()), 0.0);
    }
}
