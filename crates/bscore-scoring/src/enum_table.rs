//! Multi-class scoring over a compressed table.

use bscore_table::{BehavioralScore, CompressedTable, Counter, Value};

use crate::{
    program::{Program, group_cases},
    scorer::BehavioralScorer,
};

/// Scores a candidate predicting one label per group.
///
/// A group scores minus the number of its cases whose outcome differs from
/// the prediction, i.e. `count(prediction) - total`.
///
/// # Example
///
/// ```
/// use bscore_scoring::{BehavioralScorer, enum_table::EnumTableScorer, program::Constant};
/// use bscore_table::{Row, Table, Value};
///
/// let rows = vec![Row::new(vec![]); 3];
/// let outputs = vec![Value::from("a"), Value::from("b"), Value::from("a")];
/// let scorer = EnumTableScorer::new(Table::new(rows, outputs).unwrap().compress());
///
/// assert_eq!(scorer.score(&Constant(Value::from("a"))).as_slice(), &[-1.0]);
/// assert_eq!(scorer.best_possible_score().as_slice(), &[-1.0]);
/// assert_eq!(scorer.worst_possible_score().unwrap().as_slice(), &[-3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct EnumTableScorer {
    table: CompressedTable,
}

impl EnumTableScorer {
    #[must_use]
    pub fn new(table: CompressedTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &CompressedTable {
        &self.table
    }
}

/// Score of one group when every case in it is predicted as `prediction`.
pub(crate) fn group_score(counter: &Counter, prediction: &Value) -> f64 {
    counter.get(prediction) - counter.total_count()
}

impl BehavioralScorer for EnumTableScorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        group_cases(&self.table)
            .zip(&self.table)
            .map(|(case, group)| group_score(&group.counter, &program.evaluate(case)))
            .collect()
    }

    /// Predicting the most frequent label of every group.
    fn best_possible_score(&self) -> BehavioralScore {
        self.table
            .iter()
            .map(|g| g.counter.max_count() - g.counter.total_count())
            .collect()
    }

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        Some(self.table.iter().map(|g| -g.counter.total_count()).collect())
    }

    fn min_improvement(&self) -> f64 {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use bscore_table::{Row, Table};

    use super::*;
    use crate::program::{FnProgram, InputColumn};

    fn weather() -> CompressedTable {
        let data = [
            ("sunny", "play", 2.0),
            ("sunny", "stay", 1.0),
            ("rainy", "stay", 3.0),
            ("windy", "play", 0.5),
            ("windy", "stay", 0.5),
        ];
        let (rows, outputs) = data
            .into_iter()
            .map(|(sky, act, w)| {
                (
                    Row::new(vec![Value::from(sky)]).with_weight(w),
                    Value::from(act),
                )
            })
            .unzip();
        Table::new(rows, outputs).unwrap().compress()
    }

    #[test]
    fn test_best_follows_majority() {
        let scorer = EnumTableScorer::new(weather());
        // groups in label order: rainy, sunny, windy
        assert_eq!(scorer.best_possible_score().as_slice(), &[0.0, -1.0, -0.5]);
        let rule = FnProgram::new("sunny plays", |x| {
            Value::from(if x[0] == Value::from("sunny") { "play" } else { "stay" })
        });
        assert_eq!(scorer.score(&rule), scorer.best_possible_score());
    }

    #[test]
    fn test_foreign_label_gets_nothing_right() {
        let scorer = EnumTableScorer::new(weather());
        let score = scorer.score(&InputColumn(0));
        assert_eq!(score, scorer.worst_possible_score().unwrap());
    }
}
