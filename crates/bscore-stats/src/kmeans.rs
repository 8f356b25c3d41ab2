//! One-dimensional k-means (Lloyd's algorithm) over sorted values.
//!
//! In one dimension every cluster is a contiguous run of the sorted values,
//! so a clustering is fully described by `K - 1` boundaries ("edges"). Each
//! iteration assigns values to runs by the current edges (a value equal to an
//! edge belongs to the lower cluster), recomputes the run means as centroids,
//! and moves each edge to the midpoint of its neighbouring centroids. The
//! loop stops once an iteration reproduces the previous assignment.
//!
//! Convergence depends entirely on the seeds. Poor seeds (duplicates, or all
//! drawn from one natural cluster) settle into a local optimum or leave a
//! cluster starved, which is reported as [`KMeansError::UndersizedCluster`].

use std::ops::Range;

use arrayvec::ArrayVec;

use crate::descriptive::DescriptiveStats;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum KMeansError {
    #[display("need at least {required} values, got {actual}")]
    TooFewValues { required: usize, actual: usize },
    #[display("value {value} is not finite")]
    NonFinite { value: f64 },
    #[display("cluster {cluster} has {size} members, fewer than {min_size}")]
    UndersizedCluster {
        cluster: usize,
        size: usize,
        min_size: usize,
    },
}

/// Result of a 1-D k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering<const K: usize> {
    /// Index range of each cluster into the sorted input.
    pub segments: [Range<usize>; K],
    /// Mean of each cluster.
    pub centroids: [f64; K],
    /// Boundaries between consecutive clusters (`K - 1` entries).
    pub edges: ArrayVec<f64, K>,
    pub iterations: usize,
    /// `false` when `max_iterations` was reached before the assignment settled.
    pub converged: bool,
}

impl<const K: usize> Clustering<K> {
    /// Population variance of each cluster.
    #[must_use]
    pub fn variances(&self, sorted_values: &[f64]) -> [f64; K] {
        std::array::from_fn(|i| {
            DescriptiveStats::from_sorted(&sorted_values[self.segments[i].clone()])
                .map_or(0.0, |s| s.variance)
        })
    }
}

/// Runs Lloyd's algorithm on `sorted_values` starting from `seeds`.
///
/// Seeds are sorted before use. Every cluster must keep at least
/// `min_cluster_size` members in every iteration. Non-finite values are
/// rejected before anything else is checked.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order or `K == 0`.
///
/// # Examples
///
/// ```
/// # use bscore_stats::kmeans::lloyd_1d;
/// let values = [0.0, 0.1, 0.2, 5.0, 5.1, 5.2, 9.0, 9.1, 9.2];
/// let clustering = lloyd_1d(&values, [0.0, 5.0, 9.0], 3, 100).unwrap();
/// assert!(clustering.converged);
/// assert_eq!(clustering.segments, [0..3, 3..6, 6..9]);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn lloyd_1d<const K: usize>(
    sorted_values: &[f64],
    mut seeds: [f64; K],
    min_cluster_size: usize,
    max_iterations: usize,
) -> Result<Clustering<K>, KMeansError> {
    assert!(K > 0, "at least one cluster is required");
    if let Some(&value) = sorted_values
        .iter()
        .chain(&seeds)
        .find(|v| !v.is_finite())
    {
        return Err(KMeansError::NonFinite { value });
    }
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    if sorted_values.len() < K {
        return Err(KMeansError::TooFewValues {
            required: K,
            actual: sorted_values.len(),
        });
    }

    seeds.sort_by(f64::total_cmp);
    let mut centroids = seeds;
    let mut edges = midpoints(&centroids);
    let mut previous: Option<[usize; K]> = None;

    for iteration in 1..=max_iterations {
        let ends = assign(sorted_values, &edges);
        let segments = segments_from_ends(&ends);
        for (cluster, segment) in segments.iter().enumerate() {
            if segment.len() < min_cluster_size {
                return Err(KMeansError::UndersizedCluster {
                    cluster,
                    size: segment.len(),
                    min_size: min_cluster_size,
                });
            }
        }

        for (centroid, segment) in centroids.iter_mut().zip(&segments) {
            if !segment.is_empty() {
                *centroid =
                    sorted_values[segment.clone()].iter().sum::<f64>() / segment.len() as f64;
            }
        }

        if previous == Some(ends) {
            return Ok(Clustering {
                segments,
                centroids,
                edges,
                iterations: iteration,
                converged: true,
            });
        }
        previous = Some(ends);
        edges = midpoints(&centroids);
    }

    let ends = previous.unwrap_or_else(|| assign(sorted_values, &edges));
    Ok(Clustering {
        segments: segments_from_ends(&ends),
        centroids,
        edges,
        iterations: max_iterations,
        converged: false,
    })
}

fn midpoints<const K: usize>(centroids: &[f64; K]) -> ArrayVec<f64, K> {
    centroids.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

/// Exclusive end index of each cluster.
fn assign<const K: usize>(sorted_values: &[f64], edges: &[f64]) -> [usize; K] {
    let mut ends = [sorted_values.len(); K];
    let mut floor = 0;
    for (end, edge) in ends.iter_mut().zip(edges) {
        floor = floor.max(sorted_values.partition_point(|v| v <= edge));
        *end = floor;
    }
    ends
}

fn segments_from_ends<const K: usize>(ends: &[usize; K]) -> [Range<usize>; K] {
    std::array::from_fn(|i| {
        let start = if i == 0 { 0 } else { ends[i - 1] };
        start..ends[i]
    })
}
