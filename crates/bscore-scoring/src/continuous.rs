//! Row-by-row scoring of numeric candidates.

use bscore_table::{BehavioralScore, Table};
use serde::{Deserialize, Serialize};

use crate::{
    complexity::contin_complexity_coef,
    program::{Program, row_cases},
    scorer::{BehavioralScorer, ScorerError},
};

/// Per-row error between a prediction and its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    #[default]
    Squared,
    Absolute,
}

impl ErrorFunction {
    #[must_use]
    pub fn error(self, prediction: f64, target: f64) -> f64 {
        let diff = prediction - target;
        match self {
            ErrorFunction::Squared => diff * diff,
            ErrorFunction::Absolute => diff.abs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousParams {
    pub error_function: ErrorFunction,
    /// Negative values are relative thresholds.
    pub min_improvement: f64,
}

impl Default for ContinuousParams {
    fn default() -> Self {
        Self {
            error_function: ErrorFunction::Squared,
            min_improvement: -1.0e-4,
        }
    }
}

/// Scores a numeric candidate by its negated per-row error.
///
/// Targets must be finite continuous values. A prediction that is not a
/// continuous value (a boolean included), or whose error is `NaN`, scores
/// negative infinity on that row.
///
/// # Example
///
/// ```
/// use bscore_scoring::{
///     BehavioralScorer,
///     continuous::{ContinuousParams, ContinuousScorer},
///     program::InputColumn,
/// };
/// use bscore_table::{Row, Table, Value};
///
/// let rows = (0..3).map(|x| Row::new(vec![Value::Contin(f64::from(x))])).collect();
/// let outputs = vec![0.0, 1.0, 4.0].into_iter().map(Value::Contin).collect();
/// let table = Table::new(rows, outputs).unwrap();
/// let scorer = ContinuousScorer::new(table, ContinuousParams::default()).unwrap();
/// assert_eq!(scorer.score(&InputColumn(0)).as_slice(), &[0.0, 0.0, -4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ContinuousScorer {
    table: Table,
    target: Vec<f64>,
    params: ContinuousParams,
    complexity_coef: f64,
}

impl ContinuousScorer {
    pub fn new(table: Table, params: ContinuousParams) -> Result<Self, ScorerError> {
        let target = numeric_targets(&table)?;
        Ok(Self {
            table,
            target,
            params,
            complexity_coef: 0.0,
        })
    }

    #[must_use]
    pub fn params(&self) -> &ContinuousParams {
        &self.params
    }
}

/// Output column as finite numbers.
pub(crate) fn numeric_targets(table: &Table) -> Result<Vec<f64>, ScorerError> {
    table
        .outputs()
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_contin()
                .filter(|x| x.is_finite())
                .ok_or_else(|| ScorerError::TargetType {
                    index,
                    value: value.to_string(),
                    expected: "finite numeric",
                })
        })
        .collect()
}

impl BehavioralScorer for ContinuousScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        row_cases(&self.table)
            .zip(&self.target)
            .map(|(case, target)| {
                let error = program
                    .evaluate(case)
                    .as_contin()
                    .map(|prediction| self.params.error_function.error(prediction, *target));
                match error {
                    Some(error) if !error.is_nan() => -error,
                    _ => f64::NEG_INFINITY,
                }
            })
            .collect()
    }

    fn best_possible_score(&self) -> BehavioralScore {
        BehavioralScore::zeros(self.target.len())
    }

    fn min_improvement(&self) -> f64 {
        self.params.min_improvement
    }

    fn complexity_coef(&self) -> f64 {
        self.complexity_coef
    }

    fn set_complexity_coef(&mut self, alphabet_size: usize, noise: f64) {
        self.complexity_coef = contin_complexity_coef(alphabet_size, noise);
        tracing::info!(
            noise,
            alphabet_size,
            complexity_coef = self.complexity_coef,
            "continuous scorer complexity calibrated"
        );
    }
}
