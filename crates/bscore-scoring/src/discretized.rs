//! Scoring numeric candidates by the class their output falls in.

use bscore_table::{BehavioralScore, Table};
use serde::{Deserialize, Serialize};

use crate::{
    continuous::numeric_targets,
    program::{Program, row_cases},
    scorer::{BehavioralScorer, ScorerError},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscretizedParams {
    /// Class boundaries; sorted by the scorer.
    pub thresholds: Vec<f64>,
    /// Weight misclassifications inversely to class frequency.
    pub weighted_accuracy: bool,
}

/// Scores a numeric candidate by whether its output lands in the same class
/// as the target.
///
/// `k` thresholds split the real line into `k + 1` classes: class `0` below
/// the first threshold, class `k` at or above the last, and class `i` for
/// `thresholds[i - 1] <= v < thresholds[i]`. A row scores `0` when the
/// classes match and `-weight[target class]` otherwise. A `NaN` or
/// non-numeric prediction matches no class.
///
/// With weighted accuracy, class `c` weighs `n / ((k + 1) · count(c))`, so
/// every populated class contributes the same total weight. Classes no row
/// falls in keep weight `1`.
#[derive(Debug, Clone)]
pub struct DiscretizedScorer {
    table: Table,
    thresholds: Vec<f64>,
    classes: Vec<usize>,
    weights: Vec<f64>,
}

impl DiscretizedScorer {
    #[expect(clippy::cast_precision_loss)]
    pub fn new(table: Table, params: DiscretizedParams) -> Result<Self, ScorerError> {
        let DiscretizedParams {
            mut thresholds,
            weighted_accuracy,
        } = params;
        if thresholds.is_empty() {
            return Err(ScorerError::EmptyThresholds);
        }
        if let Some(&value) = thresholds.iter().find(|t| !t.is_finite()) {
            return Err(ScorerError::NonFiniteThreshold { value });
        }
        thresholds.sort_by(f64::total_cmp);

        let target = numeric_targets(&table)?;
        let classes = target
            .iter()
            .map(|v| class_index(&thresholds, *v))
            .collect::<Vec<_>>();

        let class_count = thresholds.len() + 1;
        let mut weights = vec![1.0; class_count];
        if weighted_accuracy {
            let mut counts = vec![0_usize; class_count];
            for class in &classes {
                counts[*class] += 1;
            }
            for (weight, count) in weights.iter_mut().zip(counts) {
                if count > 0 {
                    *weight = classes.len() as f64 / (class_count * count) as f64;
                }
            }
        }

        Ok(Self {
            table,
            thresholds,
            classes,
            weights,
        })
    }

    /// Sorted class boundaries.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Misclassification weight of each class.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn class_index(&self, value: f64) -> usize {
        class_index(&self.thresholds, value)
    }
}

/// Binary search over non-empty sorted thresholds.
fn class_index(thresholds: &[f64], value: f64) -> usize {
    let k = thresholds.len();
    if value < thresholds[0] {
        return 0;
    }
    if value >= thresholds[k - 1] {
        return k;
    }
    // invariant: thresholds[lo - 1] <= value < thresholds[hi - 1]
    let (mut lo, mut hi) = (1, k);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if value < thresholds[mid - 1] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

impl BehavioralScorer for DiscretizedScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        row_cases(&self.table)
            .zip(&self.classes)
            .map(|(case, target_class)| {
                let predicted = program
                    .evaluate(case)
                    .as_contin()
                    .filter(|v| !v.is_nan())
                    .map(|v| self.class_index(v));
                if predicted == Some(*target_class) {
                    0.0
                } else {
                    -self.weights[*target_class]
                }
            })
            .collect()
    }

    fn best_possible_score(&self) -> BehavioralScore {
        BehavioralScore::zeros(self.classes.len())
    }

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        Some(self.classes.iter().map(|c| -self.weights[*c]).collect())
    }

    fn min_improvement(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use bscore_table::{Row, Value};

    use super::*;
    use crate::program::{Constant, OutputColumn};

    fn table(targets: &[f64]) -> Table {
        let rows = targets.iter().map(|_| Row::new(vec![])).collect();
        Table::new(rows, targets.iter().copied().map(Value::Contin).collect()).unwrap()
    }

    fn params(thresholds: &[f64], weighted_accuracy: bool) -> DiscretizedParams {
        DiscretizedParams {
            thresholds: thresholds.to_vec(),
            weighted_accuracy,
        }
    }

    #[test]
    fn test_class_index_two_thresholds() {
        let scorer = DiscretizedScorer::new(table(&[0.0]), params(&[1.0, 0.0], false)).unwrap();
        assert_eq!(scorer.thresholds(), &[0.0, 1.0]);
        assert_eq!(scorer.class_index(-1.0), 0);
        assert_eq!(scorer.class_index(0.0), 1);
        assert_eq!(scorer.class_index(0.5), 1);
        assert_eq!(scorer.class_index(1.0), 2);
        assert_eq!(scorer.class_index(2.0), 2);
    }

    #[test]
    fn test_class_index_is_monotone() {
        let thresholds = [-3.0, -1.0, 0.0, 0.5, 2.0, 7.0, 7.5];
        let scorer = DiscretizedScorer::new(table(&[0.0]), params(&thresholds, false)).unwrap();
        let mut previous = 0;
        for i in -100..=100 {
            let class = scorer.class_index(f64::from(i) / 10.0);
            assert!(class >= previous);
            previous = class;
        }
        assert_eq!(previous, thresholds.len());
        for (i, t) in thresholds.iter().enumerate() {
            assert_eq!(scorer.class_index(*t), i + 1);
        }
    }

    #[test]
    fn test_weighted_accuracy() {
        // classes: [0, 0, 0, 1]
        let scorer = DiscretizedScorer::new(
            table(&[-1.0, -2.0, -3.0, 5.0]),
            params(&[0.0, 10.0], true),
        )
        .unwrap();
        let w = scorer.weights();
        assert!((w[0] - 4.0 / 9.0).abs() < 1e-12);
        assert!((w[1] - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(w[2], 1.0);

        let candidate: OutputColumn =
            [-1.0, 1.0, -1.0, 20.0].into_iter().map(Value::Contin).collect();
        let score = scorer.score(&candidate);
        assert_eq!(score[0], 0.0);
        assert!((score[1] + 4.0 / 9.0).abs() < 1e-12);
        assert!((score[3] + 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unweighted_counts_mismatches() {
        let scorer =
            DiscretizedScorer::new(table(&[0.5, 0.5, 3.0]), params(&[0.0, 1.0], false)).unwrap();
        let score = scorer.score(&Constant(Value::Contin(0.7)));
        assert_eq!(score.as_slice(), &[0.0, 0.0, -1.0]);
        assert_eq!(scorer.min_improvement(), 0.0);
    }

    #[test]
    fn test_nan_prediction_matches_no_class() {
        let scorer = DiscretizedScorer::new(
            table(&[-1.0, 0.5, 1.5, 5.0]),
            params(&[0.0, 1.0, 2.0], false),
        )
        .unwrap();
        let score = scorer.score(&Constant(Value::Contin(f64::NAN)));
        assert_eq!(score.as_slice(), &[-1.0; 4]);
        assert_eq!(scorer.score(&Constant(Value::Bool(true))).as_slice(), &[-1.0; 4]);
    }

    #[test]
    fn test_infinite_prediction_lands_in_outer_class() {
        let scorer = DiscretizedScorer::new(
            table(&[-1.0, 0.5, 1.5, 5.0]),
            params(&[0.0, 1.0, 2.0], false),
        )
        .unwrap();
        let low = scorer.score(&Constant(Value::Contin(f64::NEG_INFINITY)));
        assert_eq!(low.as_slice(), &[0.0, -1.0, -1.0, -1.0]);
        let high = scorer.score(&Constant(Value::Contin(f64::INFINITY)));
        assert_eq!(high.as_slice(), &[-1.0, -1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_rejects_nan_target() {
        assert!(matches!(
            DiscretizedScorer::new(table(&[0.0, f64::NAN]), params(&[0.0], false)),
            Err(ScorerError::TargetType { index: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_thresholds() {
        assert_eq!(
            DiscretizedScorer::new(table(&[0.0]), params(&[], false)).unwrap_err(),
            ScorerError::EmptyThresholds
        );
        assert!(matches!(
            DiscretizedScorer::new(table(&[0.0]), params(&[f64::NAN], false)),
            Err(ScorerError::NonFiniteThreshold { .. })
        ));
    }
}
