//! Scoring predicates by how interesting a sub-population they select.
//!
//! A boolean candidate selects the rows where it outputs the configured
//! polarity. The scorer compares the distribution of the numeric target over
//! the selected rows against its distribution over the whole dataset. The
//! more the selection departs from the baseline, the better:
//!
//! | component | value |
//! |-----------|-------|
//! | KLD | `D(selected ‖ baseline)`, scalar or one entry per baseline bin |
//! | skewness | `skew(selected) - skew(baseline)`, optionally absolute |
//! | Mann-Whitney | `|U|`, standardized U of selected against baseline |
//! | skew × U | `U · (skew(selected) - skew(baseline))` |
//!
//! Each component is present only when its weight is positive and is scaled
//! by that weight. A final component penalizes selections whose size falls
//! outside the configured activation range.
//!
//! A selection holding fewer than two distinct target values has no shape to
//! compare; it scores a single [`VERY_WORST_SCORE`] component. Targets must be
//! finite continuous values.

use bscore_stats::{
    histogram::Histogram, kld::KldEstimator, mann_whitney::standardized_mann_whitney_u,
    moments::weighted_skewness,
};
use bscore_table::{BehavioralScore, CompressedTable, Value};
use serde::{Deserialize, Serialize};

use crate::{
    complexity::contin_complexity_coef,
    program::{Program, group_cases},
    scorer::{BehavioralScorer, ScorerError, VERY_BEST_SCORE, VERY_WORST_SCORE},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestingParams {
    pub kld_weight: f64,
    pub skewness_weight: f64,
    pub mann_whitney_weight: f64,
    pub skew_u_weight: f64,
    /// Lower bound of the selected fraction before the activation penalty applies.
    pub min_activation: f64,
    /// Upper bound of the selected fraction before the activation penalty applies.
    pub max_activation: f64,
    pub penalty_exponent: f64,
    /// Output value that selects a row.
    pub polarity: bool,
    pub abs_skewness: bool,
    pub decompose_kld: bool,
}

impl Default for InterestingParams {
    fn default() -> Self {
        Self {
            kld_weight: 1.0,
            skewness_weight: 1.0,
            mann_whitney_weight: 1.0,
            skew_u_weight: 1.0,
            min_activation: 0.0,
            max_activation: 1.0,
            penalty_exponent: 1.0,
            polarity: true,
            abs_skewness: false,
            decompose_kld: false,
        }
    }
}

impl InterestingParams {
    fn validate(&self) -> Result<(), ScorerError> {
        for (name, value) in [
            ("kld", self.kld_weight),
            ("skewness", self.skewness_weight),
            ("mann-whitney", self.mann_whitney_weight),
            ("skew-u", self.skew_u_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScorerError::InvalidWeight { name, value });
            }
        }
        let (min, max) = (self.min_activation, self.max_activation);
        if !(0.0 <= min && min < max && max <= 1.0) {
            return Err(ScorerError::InvalidActivation { min, max });
        }
        if self.penalty_exponent.is_nan() || self.penalty_exponent <= 0.0 {
            return Err(ScorerError::InvalidExponent {
                exponent: self.penalty_exponent,
            });
        }
        Ok(())
    }

    fn uses_skewness(&self) -> bool {
        self.skewness_weight > 0.0 || self.skew_u_weight > 0.0
    }

    fn uses_mann_whitney(&self) -> bool {
        self.mann_whitney_weight > 0.0 || self.skew_u_weight > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct InterestingPredicateScorer {
    table: CompressedTable,
    params: InterestingParams,
    baseline: Histogram,
    kld: Option<KldEstimator>,
    baseline_skewness: f64,
    complexity_coef: f64,
}

impl InterestingPredicateScorer {
    pub fn new(table: CompressedTable, params: InterestingParams) -> Result<Self, ScorerError> {
        params.validate()?;

        let mut baseline = Histogram::new();
        for (index, group) in table.iter().enumerate() {
            for (value, count) in group.counter.iter() {
                let Some(x) = value.as_contin().filter(|x| x.is_finite()) else {
                    return Err(ScorerError::TargetType {
                        index,
                        value: value.to_string(),
                        expected: "finite numeric",
                    });
                };
                if count > 0.0 {
                    baseline.add(x, count);
                }
            }
        }

        let kld = (params.kld_weight > 0.0).then(|| KldEstimator::new(baseline.clone()));
        let baseline_skewness = if params.uses_skewness() {
            weighted_skewness(&baseline)
        } else {
            0.0
        };
        tracing::debug!(
            bins = baseline.len(),
            baseline_skewness,
            "interesting predicate baseline"
        );

        Ok(Self {
            table,
            params,
            baseline,
            kld,
            baseline_skewness,
            complexity_coef: 0.0,
        })
    }

    #[must_use]
    pub fn params(&self) -> &InterestingParams {
        &self.params
    }

    /// Distribution of the target over the whole dataset.
    #[must_use]
    pub fn baseline(&self) -> &Histogram {
        &self.baseline
    }

    /// `ln((1 - d)^exponent)` where `d` is the relative distance of
    /// `activation` outside `[min_activation, max_activation]`.
    ///
    /// Zero inside the range. A bound at `0` or `1` can't be crossed and
    /// contributes no distance.
    #[must_use]
    pub fn activation_penalty(&self, activation: f64) -> f64 {
        let InterestingParams {
            min_activation: min,
            max_activation: max,
            penalty_exponent,
            ..
        } = self.params;
        let below = if min > 0.0 {
            (min - activation).max(0.0) / min
        } else {
            0.0
        };
        let above = if max < 1.0 {
            (activation - max).max(0.0) / (1.0 - max)
        } else {
            0.0
        };
        let distance = below.max(above);
        (1.0 - distance).powf(penalty_exponent).ln()
    }

    /// Target distribution of the selected rows and the selected fraction.
    fn select(&self, program: &dyn Program) -> (Histogram, f64) {
        let polarity = Value::Bool(self.params.polarity);
        let mut selected = Histogram::new();
        let mut total = 0.0;
        let mut active = 0.0;
        for (case, group) in group_cases(&self.table).zip(&self.table) {
            let count = group.counter.total_count();
            total += count;
            if program.evaluate(case) != polarity {
                continue;
            }
            active += count;
            for (value, count) in group.counter.iter() {
                if let Some(x) = value.as_contin()
                    && count > 0.0
                {
                    selected.add(x, count);
                }
            }
        }
        let activation = if total > 0.0 { active / total } else { 0.0 };
        tracing::trace!(total, active, bins = selected.len(), "interesting predicate selection");
        (selected, activation)
    }
}

impl BehavioralScorer for InterestingPredicateScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        let (selected, activation) = self.select(program);
        if selected.len() <= 1 {
            return BehavioralScore::from(vec![VERY_WORST_SCORE]);
        }

        let params = &self.params;
        let mut score = BehavioralScore::new();

        if let Some(kld) = &self.kld {
            if params.decompose_kld {
                for component in kld.decompose(&selected) {
                    score.push(params.kld_weight * component);
                }
            } else {
                let divergence = kld.divergence(&selected);
                tracing::trace!(divergence, "interesting predicate kld");
                score.push(params.kld_weight * divergence);
            }
        }

        let mut skew_shift = 0.0;
        if params.uses_skewness() {
            skew_shift = weighted_skewness(&selected) - self.baseline_skewness;
            tracing::trace!(skew_shift, "interesting predicate skewness");
            if params.skewness_weight > 0.0 {
                let shift = if params.abs_skewness {
                    skew_shift.abs()
                } else {
                    skew_shift
                };
                score.push(params.skewness_weight * shift);
            }
        }

        let mut u = 0.0;
        if params.uses_mann_whitney() {
            u = standardized_mann_whitney_u(&self.baseline, &selected);
            tracing::trace!(u, "interesting predicate mann-whitney");
            if params.mann_whitney_weight > 0.0 {
                score.push(params.mann_whitney_weight * u.abs());
            }
        }

        if params.skew_u_weight > 0.0 {
            score.push(params.skew_u_weight * u * skew_shift);
        }

        let penalty = self.activation_penalty(activation);
        tracing::debug!(activation, penalty, "interesting predicate activation");
        score.push(penalty);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        BehavioralScore::from(vec![VERY_BEST_SCORE])
    }

    fn min_improvement(&self) -> f64 {
        0.0
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
            "interesting predicate complexity calibrated"
        );
    }
}

#[cfg(test)]
mod tests {
    use bscore_table::{Row, Table};
    use rand::SeedableRng;
    use rand_distr::{Distribution, Exp};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::program::{Constant, FnProgram, InputColumn};

    /// Input: row index. Target: exponential draws rounded to one decimal.
    fn dataset() -> CompressedTable {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let exp = Exp::new(1.0).unwrap();
        let (rows, outputs) = (0..200)
            .map(|i| {
                let y: f64 = exp.sample(&mut rng);
                (
                    Row::new(vec![Value::Contin(f64::from(i))]),
                    Value::Contin((y * 10.0).round() / 10.0),
                )
            })
            .unzip();
        Table::new(rows, outputs).unwrap().compress()
    }

    fn target_above(threshold: f64, table: &CompressedTable) -> FnProgram {
        // selects the rows whose (single) target exceeds the threshold
        let targets = table
            .iter()
            .map(|g| g.counter.iter().next().and_then(|(v, _)| v.as_contin()).unwrap_or(0.0))
            .collect::<Vec<_>>();
        FnProgram::new("target above", move |x| {
            let index = x[0].as_contin().unwrap_or(0.0) as usize;
            Value::Bool(targets[index] > threshold)
        })
    }

    #[test]
    fn test_whole_dataset_selection_is_neutral() {
        let scorer =
            InterestingPredicateScorer::new(dataset(), InterestingParams::default()).unwrap();
        let score = scorer.score(&Constant(Value::Bool(true)));
        // kld, skewness, |U|, U × skew, activation
        assert_eq!(score.len(), 5);
        assert!(score[0].abs() < 1e-12);
        assert!(score[1].abs() < 1e-12);
        assert!(score[2].abs() < 1e-12);
        assert_eq!(score[4], 0.0);
    }

    #[test]
    fn test_single_value_selection_is_degenerate() {
        let table = Table::new(
            (0..4).map(|i| Row::new(vec![Value::Bool(i < 2)])).collect(),
            [1.0, 1.0, 2.0, 3.0].into_iter().map(Value::Contin).collect(),
        )
        .unwrap()
        .compress();
        for params in [
            InterestingParams::default(),
            InterestingParams {
                kld_weight: 0.0,
                skewness_weight: 0.0,
                mann_whitney_weight: 0.0,
                skew_u_weight: 0.0,
                ..InterestingParams::default()
            },
        ] {
            let scorer = InterestingPredicateScorer::new(table.clone(), params).unwrap();
            assert_eq!(scorer.score(&InputColumn(0)).as_slice(), &[VERY_WORST_SCORE]);
            assert_eq!(
                scorer.score(&Constant(Value::Bool(false))).as_slice(),
                &[VERY_WORST_SCORE]
            );
        }
    }

    #[test]
    fn test_tail_selection_beats_neutral() {
        let table = dataset();
        let params = InterestingParams {
            skewness_weight: 0.0,
            skew_u_weight: 0.0,
            ..InterestingParams::default()
        };
        let scorer = InterestingPredicateScorer::new(table.clone(), params).unwrap();
        let neutral = scorer.score(&Constant(Value::Bool(true)));
        let tail = scorer.score(&target_above(1.0, &table));
        assert!(tail[0] > neutral[0] + 0.1);
        assert!(tail[1] > 1.0);
    }

    #[test]
    fn test_decomposed_kld_sums_to_scalar() {
        let table = dataset();
        let scalar = InterestingPredicateScorer::new(
            table.clone(),
            InterestingParams {
                skewness_weight: 0.0,
                mann_whitney_weight: 0.0,
                skew_u_weight: 0.0,
                ..InterestingParams::default()
            },
        )
        .unwrap();
        let decomposed = InterestingPredicateScorer::new(
            table.clone(),
            InterestingParams {
                decompose_kld: true,
                ..scalar.params().clone()
            },
        )
        .unwrap();
        let candidate = target_above(0.5, &table);
        let a = scalar.score(&candidate);
        let b = decomposed.score(&candidate);
        assert_eq!(b.len(), scalar.baseline().len() + 1);
        let kld_sum = b.iter().take(b.len() - 1).sum::<f64>();
        assert!((a[0] - kld_sum).abs() < 1e-9);
    }

    #[test]
    fn test_activation_penalty() {
        let params = InterestingParams {
            min_activation: 0.2,
            max_activation: 0.6,
            penalty_exponent: 2.0,
            ..InterestingParams::default()
        };
        let scorer = InterestingPredicateScorer::new(dataset(), params).unwrap();
        for inside in [0.2, 0.3, 0.45, 0.6] {
            assert_eq!(scorer.activation_penalty(inside), 0.0);
        }
        let below = [0.15, 0.1, 0.05].map(|a| scorer.activation_penalty(a));
        let above = [0.7, 0.8, 0.9].map(|a| scorer.activation_penalty(a));
        for side in [below, above] {
            assert!(side[0] < 0.0);
            assert!(side[1] < side[0]);
            assert!(side[2] < side[1]);
        }
    }

    #[test]
    fn test_validation() {
        let cases = [
            InterestingParams {
                kld_weight: -1.0,
                ..InterestingParams::default()
            },
            InterestingParams {
                min_activation: 0.5,
                max_activation: 0.5,
                ..InterestingParams::default()
            },
            InterestingParams {
                max_activation: 1.5,
                ..InterestingParams::default()
            },
            InterestingParams {
                penalty_exponent: 0.0,
                ..InterestingParams::default()
            },
        ];
        for params in cases {
            assert!(InterestingPredicateScorer::new(dataset(), params).is_err());
        }
    }

    #[test]
    fn test_rejects_non_finite_targets() {
        for bad in [Value::Contin(f64::NAN), Value::Contin(f64::NEG_INFINITY), Value::Bool(true)] {
            let table = Table::new(
                (0..3).map(|i| Row::new(vec![Value::Contin(f64::from(i))])).collect(),
                vec![Value::Contin(1.0), bad, Value::Contin(2.0)],
            )
            .unwrap()
            .compress();
            assert!(matches!(
                InterestingPredicateScorer::new(table, InterestingParams::default()),
                Err(ScorerError::TargetType { index: 1, .. })
            ));
        }
    }

    #[test]
    fn test_best_is_sentinel() {
        let scorer =
            InterestingPredicateScorer::new(dataset(), InterestingParams::default()).unwrap();
        assert_eq!(scorer.best_possible_score().as_slice(), &[VERY_BEST_SCORE]);
        assert_eq!(scorer.min_improvement(), 0.0);
    }
}
