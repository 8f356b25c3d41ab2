use std::{path::PathBuf, thread};

use bscore_scoring::{
    BehavioralScorer, Scorer, feature::ConditionalEntropyScorer, program::InputColumn,
};
use bscore_stats::descriptive::DescriptiveStats;
use bscore_table::Table;
use serde::Serialize;

use super::ScorerSource;
use crate::util::Output;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum RankBy {
    #[default]
    Score,
    Entropy,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RankFeaturesArg {
    #[clap(flatten)]
    source: ScorerSource,
    /// Ranking key
    #[arg(long, default_value = "score")]
    by: RankBy,
    /// Keep only the best N features
    #[arg(long)]
    top: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct FeatureRank {
    feature: String,
    column: usize,
    /// Sum of the behavioral score of the column used as a candidate.
    total: f64,
    /// `-H(output | column)`
    entropy_score: f64,
}

pub(crate) fn run(arg: &RankFeaturesArg) -> anyhow::Result<()> {
    let RankFeaturesArg {
        source,
        by,
        top,
        output,
    } = arg;
    let (table, scorer) = source.load()?;

    let mut ranks = rank_columns(&table, &scorer);
    match by {
        RankBy::Score => ranks.sort_by(|a, b| b.total.total_cmp(&a.total)),
        RankBy::Entropy => ranks.sort_by(|a, b| b.entropy_score.total_cmp(&a.entropy_score)),
    }
    if let Some(stats) = DescriptiveStats::new(ranks.iter().map(|r| r.total)) {
        tracing::info!(
            features = ranks.len(),
            best = stats.max,
            mean = stats.mean,
            worst = stats.min,
            "scored input columns"
        );
    }
    if let Some(top) = top {
        ranks.truncate(*top);
    }

    Output::save_json(&ranks, output.as_deref())
}

fn rank_columns(table: &Table, scorer: &Scorer) -> Vec<FeatureRank> {
    let entropy_scorer = ConditionalEntropyScorer::new(table);
    let mut ranks = table
        .columns()
        .iter()
        .enumerate()
        .map(|(column, feature)| FeatureRank {
            feature: feature.clone(),
            column,
            total: f64::NAN,
            entropy_score: f64::NAN,
        })
        .collect::<Vec<_>>();

    let workers = thread::available_parallelism().map_or(1, usize::from);
    let chunk_size = ranks.len().div_ceil(workers).max(1);
    thread::scope(|s| {
        for chunk in ranks.chunks_mut(chunk_size) {
            s.spawn(move || {
                for rank in chunk {
                    rank.total = scorer.score(&InputColumn(rank.column)).sum();
                    rank.entropy_score = entropy_scorer.score(&[rank.column]);
                }
            });
        }
    });
    ranks
}
