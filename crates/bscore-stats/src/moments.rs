//! Weighted central moments of a [`Histogram`].

use crate::histogram::Histogram;

/// First three weighted moments of a distribution.
///
/// Moments are population moments: each bin contributes in proportion to
/// its weight, normalized by the total weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedMoments {
    pub total_weight: f64,
    pub mean: f64,
    pub variance: f64,
    /// Third standardized moment, `m3 / m2^1.5`. Zero when the variance is zero.
    pub skewness: f64,
}

impl WeightedMoments {
    /// Returns `None` for an empty (or zero-weight) histogram.
    #[must_use]
    pub fn new(histogram: &Histogram) -> Option<Self> {
        let total_weight = histogram.total_weight();
        if histogram.is_empty() || total_weight <= 0.0 {
            return None;
        }
        let mean = histogram.iter().map(|(x, w)| x * w).sum::<f64>() / total_weight;
        let (m2, m3) = histogram.iter().fold((0.0, 0.0), |(m2, m3), (x, w)| {
            let d = x - mean;
            (m2 + w * d * d, m3 + w * d * d * d)
        });
        let variance = m2 / total_weight;
        let m3 = m3 / total_weight;
        let skewness = if variance > 0.0 {
            m3 / variance.powf(1.5)
        } else {
            0.0
        };
        Some(Self {
            total_weight,
            mean,
            variance,
            skewness,
        })
    }
}

/// Weighted skewness of a histogram; zero for empty or single-spike distributions.
///
/// # Examples
///
/// ```
/// # use bscore_stats::{histogram::Histogram, moments::weighted_skewness};
/// let symmetric: Histogram = [(-1.0, 1.0), (0.0, 2.0), (1.0, 1.0)].into_iter().collect();
/// assert!(weighted_skewness(&symmetric).abs() < 1e-12);
///
/// let right_tailed: Histogram = [(0.0, 8.0), (1.0, 1.0), (10.0, 1.0)].into_iter().collect();
/// assert!(weighted_skewness(&right_tailed) > 0.0);
/// ```
#[must_use]
pub fn weighted_skewness(histogram: &Histogram) -> f64 {
    WeightedMoments::new(histogram).map_or(0.0, |m| m.skewness)
}
