//! Kullback-Leibler divergence of a sub-distribution from a reference.

use crate::histogram::Histogram;

/// Plug-in KLD estimator against a fixed reference distribution.
///
/// The reference is set once (typically the full output column of a
/// dataset) and then compared against many sample distributions. For a
/// sample `Q` and reference `P`, both normalized to probabilities, the
/// estimator computes
///
/// ```text
/// D(Q ‖ P) = Σₓ q(x) · ln(q(x) / p(x))
/// ```
///
/// over the reference support. Sample mass on values the reference never
/// saw is ignored; a sample drawn from rows of the reference dataset never
/// has any.
///
/// # Examples
///
/// ```
/// # use bscore_stats::{histogram::Histogram, kld::KldEstimator};
/// let reference: Histogram = [(0.0, 5.0), (1.0, 5.0)].into_iter().collect();
/// let estimator = KldEstimator::new(reference.clone());
/// assert!(estimator.divergence(&reference).abs() < 1e-12);
///
/// let skewed: Histogram = [(0.0, 9.0), (1.0, 1.0)].into_iter().collect();
/// assert!(estimator.divergence(&skewed) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct KldEstimator {
    reference: Histogram,
}

impl KldEstimator {
    #[must_use]
    pub fn new(reference: Histogram) -> Self {
        Self { reference }
    }

    #[must_use]
    pub fn reference(&self) -> &Histogram {
        &self.reference
    }

    /// Scalar divergence; equal to the sum of [`Self::decompose`].
    #[must_use]
    pub fn divergence(&self, sample: &Histogram) -> f64 {
        self.components(sample).sum()
    }

    /// Per-bin contributions, one per reference bin in ascending value order.
    ///
    /// Bins the sample does not populate contribute zero, so the length is
    /// the same for every sample.
    #[must_use]
    pub fn decompose(&self, sample: &Histogram) -> Vec<f64> {
        self.components(sample).collect()
    }

    fn components<'a>(&'a self, sample: &'a Histogram) -> impl Iterator<Item = f64> + 'a {
        let p_total = self.reference.total_weight();
        let q_total = sample.total_weight();
        self.reference.iter().map(move |(x, p_weight)| {
            let q_weight = sample.get(x);
            if q_weight <= 0.0 || q_total <= 0.0 || p_weight <= 0.0 {
                return 0.0;
            }
            let q = q_weight / q_total;
            let p = p_weight / p_total;
            q * (q / p).ln()
        })
    }
}
