//! Cluster-tightness scoring of numeric candidates. Experimental.
//!
//! The candidate projects every row to one number. The projection is split
//! into three clusters with one-dimensional k-means, and the candidate scores
//! higher the tighter those clusters are relative to the spread of the whole
//! projection:
//!
//! ```text
//! score = range / sqrt(Σ variance(cluster))
//! ```
//!
//! The cluster count is fixed and k-means is seeded from the first three
//! projected rows, so results depend on row order and convergence is
//! fragile. Use it for exploration only.

use bscore_stats::kmeans::lloyd_1d;
use bscore_table::{BehavioralScore, Table};

use crate::{
    program::{Program, row_cases},
    scorer::{BehavioralScorer, ScorerError, VERY_BEST_SCORE},
};

const CLUSTERS: usize = 3;
const MIN_CLUSTER_SIZE: usize = 4;
const MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone)]
pub struct ClusterScorer {
    table: Table,
}

impl ClusterScorer {
    pub const EXPERIMENTAL: bool = true;

    pub fn new(table: Table) -> Result<Self, ScorerError> {
        if table.len() <= CLUSTERS {
            return Err(ScorerError::TooFewRows {
                required: CLUSTERS + 1,
                actual: table.len(),
            });
        }
        tracing::warn!(
            rows = table.len(),
            clusters = CLUSTERS,
            "cluster scorer is experimental"
        );
        Ok(Self { table })
    }

    fn tightness(&self, program: &dyn Program) -> f64 {
        let values = row_cases(&self.table)
            .map(|case| program.evaluate(case).as_contin().unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        if values.iter().any(|v| !v.is_finite()) {
            return f64::NEG_INFINITY;
        }

        let seeds: [f64; CLUSTERS] = std::array::from_fn(|i| values[i]);
        let mut sorted = values;
        sorted.sort_by(f64::total_cmp);

        let clustering = match lloyd_1d(&sorted, seeds, MIN_CLUSTER_SIZE, MAX_ITERATIONS) {
            Ok(clustering) => clustering,
            Err(err) => {
                tracing::trace!(%err, "cluster scorer rejected projection");
                return f64::NEG_INFINITY;
            }
        };
        if !clustering.converged {
            tracing::debug!(iterations = clustering.iterations, "k-means did not converge");
        }

        let width = clustering.variances(&sorted).iter().sum::<f64>().sqrt();
        let range = sorted[sorted.len() - 1] - sorted[0];
        range / width
    }
}

impl BehavioralScorer for ClusterScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        BehavioralScore::from(vec![self.tightness(program)])
    }

    fn best_possible_score(&self) -> BehavioralScore {
        BehavioralScore::from(vec![VERY_BEST_SCORE])
    }

    fn min_improvement(&self) -> f64 {
        0.1
    }
}
