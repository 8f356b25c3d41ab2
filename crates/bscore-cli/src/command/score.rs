use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use bscore_scoring::{BehavioralScorer, program::InputColumn, scorer::WithSink, sink::TracingSink};
use bscore_table::{BehavioralScore, Table};
use serde::Serialize;

use super::ScorerSource;
use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    #[clap(flatten)]
    source: ScorerSource,
    /// Input column to score, by name or position
    #[arg(long)]
    feature: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    feature: String,
    total: f64,
    score: BehavioralScore,
    best_possible: BehavioralScore,
    worst_possible: Option<BehavioralScore>,
    min_improvement: f64,
    complexity_coef: f64,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg {
        source,
        feature,
        output,
    } = arg;
    let (table, scorer) = source.load()?;
    let column = resolve_column(&table, feature)?;
    let scorer = WithSink::new(scorer, Arc::new(TracingSink));

    let score = scorer.score(&InputColumn(column));
    let report = ScoreReport {
        feature: table.columns()[column].clone(),
        total: score.sum(),
        score,
        best_possible: scorer.best_possible_score(),
        worst_possible: scorer.worst_possible_score(),
        min_improvement: scorer.min_improvement(),
        complexity_coef: scorer.complexity_coef(),
    };
    Output::save_json(&report, output.as_deref())
}

/// Column position from a column name or a numeric index.
fn resolve_column(table: &Table, feature: &str) -> anyhow::Result<usize> {
    if let Some(index) = table.column_index(feature) {
        return Ok(index);
    }
    let index = feature
        .parse::<usize>()
        .with_context(|| format!("Unknown feature: {feature}"))?;
    anyhow::ensure!(
        index < table.arity(),
        "Feature index {index} out of range (dataset has {} columns)",
        table.arity()
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_column() {
        let table = Table::truth_table(2, |x| x[0]);
        assert_eq!(resolve_column(&table, "x1").unwrap(), 1);
        assert_eq!(resolve_column(&table, "0").unwrap(), 0);
        assert!(resolve_column(&table, "2").is_err());
        assert!(resolve_column(&table, "temperature").is_err());
    }
}
