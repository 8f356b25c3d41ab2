//! Scoring ordered decision lists over a compressed table.
//!
//! A decision list is a cascade `if p₀ then c₀ elif p₁ then c₁ ... else d`.
//! All three modes start from the multi-class group score of
//! [`EnumTableScorer`] and differ in how rules are credited:
//!
//! - **Filter**: the list is scored as a whole, and a group the first
//!   predicate fires on is additionally punished when any of its cases
//!   disagrees with the first consequent.
//! - **Graded**: the rule deciding a group (or the default) scales the group
//!   score by `grading^depth`, so mistakes of early rules count the most.
//! - **Effective**: rules are visited in order, each scoring the groups it
//!   fires on that no earlier rule claimed. The weight decays by `grading`
//!   only after a rule that fires and gets at least one case right. The
//!   per-rule [`EffectiveBreakdown`] shows what each rule contributed.
//!
//! Candidates that are not decision lists are scored as plain multi-class
//! predictions.

use bscore_table::{BehavioralScore, CompressedTable};
use serde::{Deserialize, Serialize};

use crate::{
    enum_table::{EnumTableScorer, group_score},
    program::{Case, DecisionList, Program, group_cases},
    scorer::{BehavioralScorer, ScorerError},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionListMode {
    Filter,
    #[default]
    Graded,
    Effective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionListParams {
    pub mode: DecisionListMode,
    /// Per-depth weight decay, in `(0, 1]`. Unused by the filter mode.
    pub grading: f64,
    /// Punishment per case of a wrongly guarded group. Filter mode only.
    pub punishment: f64,
}

impl Default for DecisionListParams {
    fn default() -> Self {
        Self {
            mode: DecisionListMode::default(),
            grading: 0.9,
            punishment: 1.0,
        }
    }
}

/// What one rule of a list contributed in effective mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBreakdown {
    /// Groups this rule claimed, in group order.
    pub claimed: Vec<usize>,
    /// Weight applied to the claimed groups.
    pub weight: f64,
    /// Weighted sum of the claimed groups' scores.
    pub contribution: f64,
    /// Fired on some group and got at least one case right.
    pub effective: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveBreakdown {
    /// One entry per rule, in list order.
    pub rules: Vec<RuleBreakdown>,
    /// Groups no rule claimed, scored by the default consequent.
    pub default: RuleBreakdown,
    pub score: BehavioralScore,
}

#[derive(Debug, Clone)]
pub struct DecisionListScorer {
    inner: EnumTableScorer,
    params: DecisionListParams,
}

impl DecisionListScorer {
    pub fn new(table: CompressedTable, params: DecisionListParams) -> Result<Self, ScorerError> {
        let DecisionListParams {
            grading,
            punishment,
            ..
        } = params;
        if !(grading > 0.0 && grading <= 1.0) {
            return Err(ScorerError::InvalidGrading { grading });
        }
        if !punishment.is_finite() || punishment < 0.0 {
            return Err(ScorerError::InvalidPunishment { punishment });
        }
        Ok(Self {
            inner: EnumTableScorer::new(table),
            params,
        })
    }

    #[must_use]
    pub fn params(&self) -> &DecisionListParams {
        &self.params
    }

    fn table(&self) -> &CompressedTable {
        self.inner.table()
    }

    fn score_filter(&self, list: &DecisionList) -> BehavioralScore {
        let first = list.rules.first();
        group_cases(self.table())
            .zip(self.table())
            .map(|(case, group)| {
                let counter = &group.counter;
                let mut score = group_score(counter, &list.evaluate(case));
                if let Some(rule) = first
                    && rule.fires(case)
                {
                    let total = counter.total_count();
                    if counter.get(&rule.consequent) < total {
                        score -= self.params.punishment * total;
                    }
                }
                score
            })
            .collect()
    }

    fn score_graded(&self, list: &DecisionList) -> BehavioralScore {
        group_cases(self.table())
            .zip(self.table())
            .map(|(case, group)| {
                let (depth, consequent) = match list.firing_rule(case) {
                    Some(depth) => (depth, &list.rules[depth].consequent),
                    None => (list.rules.len(), &list.default),
                };
                self.depth_weight(depth) * group_score(&group.counter, consequent)
            })
            .collect()
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn depth_weight(&self, depth: usize) -> f64 {
        self.params.grading.powi(depth as i32)
    }

    /// Scores `list` rule by rule, reporting what each rule contributed.
    #[must_use]
    pub fn effective_breakdown(&self, list: &DecisionList) -> EffectiveBreakdown {
        let table = self.table();
        let cases = group_cases(table).collect::<Vec<Case<'_>>>();
        let mut score = vec![0.0; table.len()];
        let mut claimed = vec![false; table.len()];
        let mut weight = 1.0;
        let mut rules = Vec::with_capacity(list.rules.len());

        for rule in &list.rules {
            let mut breakdown = RuleBreakdown {
                claimed: vec![],
                weight,
                contribution: 0.0,
                effective: false,
            };
            for (index, group) in table.iter().enumerate() {
                if claimed[index] || !rule.fires(cases[index]) {
                    continue;
                }
                let right = group.counter.get(&rule.consequent);
                breakdown.effective |= right > 0.0;
                let contribution = weight * (right - group.counter.total_count());
                score[index] += contribution;
                breakdown.contribution += contribution;
                breakdown.claimed.push(index);
                claimed[index] = true;
            }
            if breakdown.effective {
                weight *= self.params.grading;
            }
            rules.push(breakdown);
        }

        let mut default = RuleBreakdown {
            claimed: vec![],
            weight,
            contribution: 0.0,
            effective: false,
        };
        for (index, group) in table.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let right = group.counter.get(&list.default);
            default.effective |= right > 0.0;
            let contribution = weight * (right - group.counter.total_count());
            score[index] += contribution;
            default.contribution += contribution;
            default.claimed.push(index);
        }

        EffectiveBreakdown {
            rules,
            default,
            score: score.into(),
        }
    }

    /// Predicate complexities scaled by `grading^depth` in graded mode.
    fn graded_complexity(&self, list: &DecisionList) -> f64 {
        list.rules
            .iter()
            .enumerate()
            .map(|(depth, rule)| self.depth_weight(depth) * rule.complexity)
            .sum()
    }
}

impl BehavioralScorer for DecisionListScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        self.inner.score(program)
    }

    fn score_decision_list(&self, list: &DecisionList) -> BehavioralScore {
        match self.params.mode {
            DecisionListMode::Filter => self.score_filter(list),
            DecisionListMode::Graded => self.score_graded(list),
            DecisionListMode::Effective => self.effective_breakdown(list).score,
        }
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.inner.best_possible_score()
    }

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        let factor = match self.params.mode {
            DecisionListMode::Filter => 1.0 + self.params.punishment,
            DecisionListMode::Graded | DecisionListMode::Effective => 1.0,
        };
        self.inner
            .worst_possible_score()
            .map(|worst| worst.scale(factor))
    }

    fn min_improvement(&self) -> f64 {
        match self.params.mode {
            DecisionListMode::Filter => 0.5,
            DecisionListMode::Graded | DecisionListMode::Effective => -0.05,
        }
    }

    fn decision_list_complexity(&self, list: &DecisionList) -> f64 {
        match self.params.mode {
            DecisionListMode::Graded => self.graded_complexity(list),
            DecisionListMode::Filter | DecisionListMode::Effective => list.complexity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bscore_table::{Row, Table, Value};

    use super::*;
    use crate::program::{Constant, FnProgram, Rule};

    /// Groups (by input `x`): 0 → {a: 4}, 1 → {b: 2, c: 1}, 2 → {c: 3}.
    fn table() -> CompressedTable {
        let data = [(0.0, "a", 4), (1.0, "b", 2), (1.0, "c", 1), (2.0, "c", 3)];
        let mut rows = vec![];
        let mut outputs = vec![];
        for (x, y, n) in data {
            for _ in 0..n {
                rows.push(Row::new(vec![Value::Contin(x)]));
                outputs.push(Value::from(y));
            }
        }
        Table::new(rows, outputs).unwrap().compress()
    }

    fn x_equals(v: f64) -> FnProgram {
        FnProgram::new(format!("x == {v}"), move |x| Value::Bool(x[0] == Value::Contin(v)))
            .with_complexity(3.0)
    }

    fn x_at_least(v: f64) -> FnProgram {
        FnProgram::new(format!("x >= {v}"), move |x| {
            Value::Bool(x[0].as_contin().is_some_and(|x| x >= v))
        })
        .with_complexity(3.0)
    }

    fn scorer(mode: DecisionListMode, grading: f64) -> DecisionListScorer {
        let params = DecisionListParams {
            mode,
            grading,
            punishment: 1.0,
        };
        DecisionListScorer::new(table(), params).unwrap()
    }

    #[test]
    fn test_plain_program_falls_back_to_enum_scoring() {
        let scorer = scorer(DecisionListMode::Graded, 0.5);
        let enum_scorer = EnumTableScorer::new(table());
        let constant = Constant(Value::from("c"));
        assert_eq!(scorer.score(&constant), enum_scorer.score(&constant));
        assert_eq!(scorer.score(&constant).as_slice(), &[-4.0, -2.0, 0.0]);
    }

    #[test]
    fn test_filter_punishes_wrong_guard() {
        let scorer = scorer(DecisionListMode::Filter, 1.0);
        // the guard fires on the mixed group, whose cases are not all "b"
        let list = DecisionList::new(
            vec![Rule::new(x_equals(1.0), "b"), Rule::new(x_equals(0.0), "a")],
            "c",
        );
        assert_eq!(scorer.score_decision_list(&list).as_slice(), &[0.0, -4.0, 0.0]);

        let clean_guard = DecisionList::new(vec![Rule::new(x_equals(0.0), "a")], "b");
        assert_eq!(
            scorer.score_decision_list(&clean_guard).as_slice(),
            &[0.0, -1.0, -3.0]
        );
    }

    #[test]
    fn test_graded_scales_by_depth() {
        let scorer = scorer(DecisionListMode::Graded, 0.5);
        let list = DecisionList::new(
            vec![Rule::new(x_equals(2.0), "a"), Rule::new(x_equals(1.0), "b")],
            "c",
        );
        // depth 0 decides x=2 (wrong: -3), depth 1 decides x=1 (-1 * 0.5),
        // the default decides x=0 (-4 * 0.25)
        assert_eq!(scorer.score_decision_list(&list).as_slice(), &[-1.0, -0.5, -3.0]);
        assert_eq!(scorer.decision_list_complexity(&list), 3.0 + 0.5 * 3.0);
        assert_eq!(scorer.min_improvement(), -0.05);
    }

    #[test]
    fn test_grading_of_one_matches_enum_scoring() {
        let scorer = scorer(DecisionListMode::Graded, 1.0);
        let list = DecisionList::new(vec![Rule::new(x_at_least(1.0), "c")], "a");
        let as_program = EnumTableScorer::new(table()).score(&list);
        assert_eq!(scorer.score_decision_list(&list), as_program);
    }

    #[test]
    fn test_effective_decays_only_after_effective_rules() {
        let scorer = scorer(DecisionListMode::Effective, 0.5);
        let list = DecisionList::new(
            vec![
                // fires on x = 1 and x = 2, never right
                Rule::new(x_at_least(1.0), "a"),
                // everything it fires on is already claimed
                Rule::new(x_equals(2.0), "c"),
            ],
            "a",
        );
        let breakdown = scorer.effective_breakdown(&list);
        assert_eq!(breakdown.rules[0].claimed, vec![1, 2]);
        assert!(!breakdown.rules[0].effective);
        assert_eq!(breakdown.rules[0].contribution, -6.0);
        assert!(breakdown.rules[1].claimed.is_empty());
        assert_eq!(breakdown.default.claimed, vec![0]);
        assert_eq!(breakdown.default.weight, 1.0);
        assert_eq!(breakdown.score.as_slice(), &[0.0, -3.0, -3.0]);
        assert_eq!(scorer.score_decision_list(&list), breakdown.score);

        let effective_first = DecisionList::new(vec![Rule::new(x_equals(1.0), "b")], "c");
        let breakdown = scorer.effective_breakdown(&effective_first);
        assert!(breakdown.rules[0].effective);
        assert_eq!(breakdown.default.weight, 0.5);
        assert_eq!(breakdown.score.as_slice(), &[-2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_validation() {
        let bad_grading = DecisionListParams {
            grading: 0.0,
            ..DecisionListParams::default()
        };
        assert!(matches!(
            DecisionListScorer::new(table(), bad_grading),
            Err(ScorerError::InvalidGrading { .. })
        ));
        let bad_punishment = DecisionListParams {
            punishment: -1.0,
            ..DecisionListParams::default()
        };
        assert!(matches!(
            DecisionListScorer::new(table(), bad_punishment),
            Err(ScorerError::InvalidPunishment { .. })
        ));
    }

    #[test]
    fn test_filter_worst_includes_punishment() {
        let scorer = scorer(DecisionListMode::Filter, 1.0);
        assert_eq!(
            scorer.worst_possible_score().unwrap().as_slice(),
            &[-8.0, -6.0, -6.0]
        );
    }
}
