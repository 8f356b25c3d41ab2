//! Boolean scoring over a compressed table.
//!
//! Rows with identical inputs are merged into groups, each holding the
//! (weighted) number of `true` and `false` outcomes. A candidate predicts one
//! value per group, and every case in the group with the opposite outcome
//! counts against it. Groups holding both outcomes can never be fully right;
//! the best a candidate can do there is follow the majority.
//!
//! # Boosting
//!
//! Boosting rounds add scores of successive candidates, so they need every
//! optimum to sit at zero. In boosting mode the per-group best is subtracted
//! from every score, and the best possible score is reported as all zeros.

use bscore_table::{BehavioralScore, CompressedTable, Counter, Value};
use serde::{Deserialize, Serialize};

use crate::{
    complexity::discrete_complexity_coef,
    program::{Program, ScoredCandidate, group_cases},
    scorer::{BehavioralScorer, ScorerError},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruthTableParams {
    pub boosting: bool,
}

#[derive(Debug, Clone)]
pub struct CompressedTruthTableScorer {
    table: CompressedTable,
    boosting: bool,
    baseline: BehavioralScore,
    complexity_coef: f64,
}

const TRUE: Value = Value::Bool(true);
const FALSE: Value = Value::Bool(false);

impl CompressedTruthTableScorer {
    pub fn new(table: CompressedTable, params: &TruthTableParams) -> Result<Self, ScorerError> {
        for (index, group) in table.iter().enumerate() {
            if let Some((value, _)) = group.counter.iter().find(|(v, _)| !v.is_bool()) {
                return Err(ScorerError::TargetType {
                    index,
                    value: value.to_string(),
                    expected: "boolean",
                });
            }
        }
        let baseline = table
            .iter()
            .map(|group| -f64::min(group.counter.get(&TRUE), group.counter.get(&FALSE)))
            .collect::<BehavioralScore>();
        tracing::info!(
            groups = table.len(),
            best = baseline.sum(),
            boosting = params.boosting,
            "truth table best possible score"
        );
        Ok(Self {
            table,
            boosting: params.boosting,
            baseline,
            complexity_coef: 0.0,
        })
    }

    fn score_predictions<I>(&self, predictions: I) -> BehavioralScore
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        let score = predictions
            .into_iter()
            .zip(&self.table)
            .map(|(prediction, group)| -wrong_count(&group.counter, prediction))
            .collect::<BehavioralScore>();
        if self.boosting {
            score - &self.baseline
        } else {
            score
        }
    }
}

/// Cases of a group contradicting `prediction`; all of them if there is no
/// boolean prediction.
fn wrong_count(counter: &Counter, prediction: Option<bool>) -> f64 {
    match prediction {
        Some(true) => counter.get(&FALSE),
        Some(false) => counter.get(&TRUE),
        None => counter.total_count(),
    }
}

fn imbalance(counter: &Counter) -> f64 {
    (counter.get(&TRUE) - counter.get(&FALSE)).abs()
}

impl BehavioralScorer for CompressedTruthTableScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        self.score_predictions(
            group_cases(&self.table).map(|case| program.evaluate(case).as_bool()),
        )
    }

    fn score_ensemble(&self, ensemble: &[ScoredCandidate<'_>]) -> BehavioralScore {
        let mut votes = vec![0.0; self.table.len()];
        for member in ensemble {
            for (vote, case) in votes.iter_mut().zip(group_cases(&self.table)) {
                *vote += if member.program.evaluate(case) == TRUE {
                    member.weight
                } else {
                    -member.weight
                };
            }
        }
        self.score_predictions(votes.into_iter().map(|v| Some(v > 0.0)))
    }

    fn best_possible_score(&self) -> BehavioralScore {
        if self.boosting {
            BehavioralScore::zeros(self.table.len())
        } else {
            self.baseline.clone()
        }
    }

    /// Getting the majority wrong in every group.
    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        Some(self.table.iter().map(|g| -imbalance(&g.counter)).collect())
    }

    /// Half the smallest non-zero gain from flipping one group's prediction.
    fn min_improvement(&self) -> f64 {
        let smallest = self
            .table
            .iter()
            .map(|g| imbalance(&g.counter))
            .filter(|w| *w > 0.0)
            .fold(f64::INFINITY, f64::min);
        if smallest.is_finite() {
            0.5 * smallest
        } else {
            0.5
        }
    }

    fn complexity_coef(&self) -> f64 {
        self.complexity_coef
    }

    fn set_complexity_coef(&mut self, alphabet_size: usize, noise: f64) {
        self.complexity_coef = discrete_complexity_coef(alphabet_size, noise);
        tracing::info!(
            noise,
            alphabet_size,
            complexity_coef = self.complexity_coef,
            "truth table complexity calibrated"
        );
    }
}

#[cfg(test)]
mod tests {
    use bscore_table::{Row, Table};

    use super::*;
    use crate::program::{Constant, InputColumn};

    /// One input `x`; the `x = false` group holds `{true: 3, false: 7}` and
    /// the `x = true` group holds `{true: 2}`.
    fn mixed_table() -> CompressedTable {
        let mut rows = vec![];
        let mut outputs = vec![];
        for (x, y, n) in [(false, true, 3), (false, false, 7), (true, true, 2)] {
            for _ in 0..n {
                rows.push(Row::new(vec![Value::Bool(x)]));
                outputs.push(Value::Bool(y));
            }
        }
        Table::new(rows, outputs).unwrap().compress()
    }

    #[test]
    fn test_best_and_worst_of_mixed_group() {
        let scorer =
            CompressedTruthTableScorer::new(mixed_table(), &TruthTableParams::default()).unwrap();
        assert_eq!(scorer.best_possible_score().as_slice(), &[-3.0, -0.0]);
        assert_eq!(scorer.worst_possible_score().unwrap().as_slice(), &[-4.0, -2.0]);
        assert_eq!(scorer.min_improvement(), 1.0);
    }

    #[test]
    fn test_majority_prediction_reaches_best() {
        let scorer =
            CompressedTruthTableScorer::new(mixed_table(), &TruthTableParams::default()).unwrap();
        // predicting x itself: false on the mixed group, true on the pure one
        let score = scorer.score(&InputColumn(0));
        assert_eq!(score, scorer.best_possible_score());
        let score = scorer.score(&Constant(Value::Bool(true)));
        assert_eq!(score.as_slice(), &[-7.0, 0.0]);
    }

    #[test]
    fn test_boosting_offsets_to_zero() {
        let params = TruthTableParams { boosting: true };
        let scorer = CompressedTruthTableScorer::new(mixed_table(), &params).unwrap();
        assert_eq!(scorer.best_possible_score().sum(), 0.0);
        assert_eq!(scorer.score(&InputColumn(0)).sum(), 0.0);
        assert_eq!(scorer.score(&Constant(Value::Bool(true))).as_slice(), &[-4.0, 0.0]);
    }

    #[test]
    fn test_single_member_ensemble() {
        let scorer =
            CompressedTruthTableScorer::new(mixed_table(), &TruthTableParams::default()).unwrap();
        let candidate = Constant(Value::Bool(true));
        let ensemble = [ScoredCandidate::new(&candidate, 1.0)];
        assert_eq!(scorer.score_ensemble(&ensemble), scorer.score(&candidate));
    }

    #[test]
    fn test_min_improvement_without_imbalance() {
        let table = Table::new(
            vec![Row::new(vec![]), Row::new(vec![])],
            vec![Value::Bool(true), Value::Bool(false)],
        )
        .unwrap()
        .compress();
        let scorer = CompressedTruthTableScorer::new(table, &TruthTableParams::default()).unwrap();
        assert_eq!(scorer.min_improvement(), 0.5);
    }

    #[test]
    fn test_rejects_enum_outcomes() {
        let table = Table::new(vec![Row::new(vec![])], vec![Value::from("a")])
            .unwrap()
            .compress();
        assert!(CompressedTruthTableScorer::new(table, &TruthTableParams::default()).is_err());
    }
}
