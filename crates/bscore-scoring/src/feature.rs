//! Scoring input features by how much they tell about the output.

use bscore_stats::entropy::conditional_entropy;
use bscore_table::{Table, Value};

/// Scores a set of input columns by `-H(Y | X_S)`: zero when the selected
/// columns determine the output, more negative the less they tell.
///
/// Row weights act as multiplicities.
///
/// # Example
///
/// ```
/// use bscore_scoring::feature::ConditionalEntropyScorer;
/// use bscore_table::Table;
///
/// let table = Table::truth_table(3, |x| x[0] ^ x[1]);
/// let scorer = ConditionalEntropyScorer::new(&table);
/// assert_eq!(scorer.score(&[0, 1]), 0.0);
/// assert!((scorer.score(&[2]) + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConditionalEntropyScorer<'a> {
    table: &'a Table,
}

impl<'a> ConditionalEntropyScorer<'a> {
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// # Panics
    ///
    /// Panics if a feature index is not a column of the table.
    #[must_use]
    pub fn score(&self, features: &[usize]) -> f64 {
        let samples = self.table.iter().map(|(row, output)| {
            let x = features
                .iter()
                .map(|i| row.inputs[*i].clone())
                .collect::<Vec<Value>>();
            (x, output, row.weight)
        });
        -conditional_entropy(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_features_never_hurt() {
        let table = Table::truth_table(4, |x| (x[0] && x[1]) || x[3]);
        let scorer = ConditionalEntropyScorer::new(&table);
        let single = scorer.score(&[3]);
        let pair = scorer.score(&[0, 3]);
        let all = scorer.score(&[0, 1, 3]);
        assert!(single < 0.0);
        assert!(pair >= single);
        assert!(all.abs() < 1e-12);
        assert!(scorer.score(&[2]) < single);
    }
}
