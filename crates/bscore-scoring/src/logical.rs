//! Row-by-row scoring of boolean candidates.

use bscore_table::{BehavioralScore, Table, Value};

use crate::{
    complexity::discrete_complexity_coef,
    program::{Program, ScoredCandidate, row_cases},
    scorer::{BehavioralScorer, ScorerError},
};

/// Scores a boolean candidate against a boolean target column.
///
/// Each row scores `0` when the prediction matches the target and `-1`
/// otherwise, so the sum of a score is minus the Hamming distance between
/// prediction and target. Row weights are ignored.
///
/// # Example
///
/// ```
/// use bscore_scoring::{BehavioralScorer, logical::LogicalScorer, program::InputColumn};
/// use bscore_table::Table;
///
/// let scorer = LogicalScorer::new(Table::truth_table(2, |x| x[0] && x[1])).unwrap();
/// let score = scorer.score(&InputColumn(0));
/// assert_eq!(score.as_slice(), &[0.0, 0.0, -1.0, 0.0]);
/// assert_eq!(scorer.error_rate(&score), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct LogicalScorer {
    table: Table,
    target: Vec<bool>,
    complexity_coef: f64,
}

impl LogicalScorer {
    pub fn new(table: Table) -> Result<Self, ScorerError> {
        let target = table
            .outputs()
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.as_bool().ok_or_else(|| ScorerError::TargetType {
                    index,
                    value: value.to_string(),
                    expected: "boolean",
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            table,
            target,
            complexity_coef: 0.0,
        })
    }

    /// Fraction of rows predicted wrongly, from a score of this scorer.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn error_rate(&self, score: &BehavioralScore) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        -score.sum() / self.target.len() as f64
    }

    fn score_predictions<I>(&self, predictions: I) -> BehavioralScore
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        predictions
            .into_iter()
            .zip(&self.target)
            .map(|(prediction, target)| {
                if prediction == Some(*target) {
                    0.0
                } else {
                    -1.0
                }
            })
            .collect()
    }
}

impl BehavioralScorer for LogicalScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        self.score_predictions(row_cases(&self.table).map(|case| program.evaluate(case).as_bool()))
    }

    /// Weighted vote: each member adds `+weight` for `true` and `-weight`
    /// otherwise; a strictly positive total predicts `true`.
    fn score_ensemble(&self, ensemble: &[ScoredCandidate<'_>]) -> BehavioralScore {
        let mut votes = vec![0.0; self.table.len()];
        for member in ensemble {
            for (vote, case) in votes.iter_mut().zip(row_cases(&self.table)) {
                let prediction = member.program.evaluate(case);
                *vote += if prediction == Value::Bool(true) {
                    member.weight
                } else {
                    -member.weight
                };
            }
        }
        self.score_predictions(votes.into_iter().map(|v| Some(v > 0.0)))
    }

    fn best_possible_score(&self) -> BehavioralScore {
        BehavioralScore::zeros(self.target.len())
    }

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        Some(BehavioralScore::filled(self.target.len(), -1.0))
    }

    fn min_improvement(&self) -> f64 {
        0.5
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
            "logical scorer complexity calibrated"
        );
    }
}
