use std::path::PathBuf;

use anyhow::Context;
use bscore_scoring::{BehavioralScorer, Scorer};
use bscore_table::Table;
use clap::{Parser, Subcommand};

use self::{rank_features::RankFeaturesArg, score::ScoreArg};
use crate::{config::ScorerConfig, dataset, util};

mod rank_features;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Score one input column as a candidate
    Score(#[clap(flatten)] ScoreArg),
    /// Score every input column and rank them
    RankFeatures(#[clap(flatten)] RankFeaturesArg),
}

/// Options shared by all subcommands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScorerSource {
    /// Dataset JSON file
    #[arg(long)]
    dataset: PathBuf,
    /// Scorer configuration JSON file
    #[arg(long)]
    config: PathBuf,
    /// Candidate alphabet size used to calibrate the complexity coefficient
    #[arg(long, requires = "noise")]
    alphabet_size: Option<usize>,
    /// Noise level of the data (stdev for numeric targets, flip probability for boolean ones)
    #[arg(long, requires = "alphabet_size")]
    noise: Option<f64>,
}

impl ScorerSource {
    fn load(&self) -> anyhow::Result<(Table, Scorer)> {
        let table = dataset::read_table(&self.dataset)?;
        let config: ScorerConfig = util::read_json_file("scorer config", &self.config)?;
        let mut scorer = config
            .build(table.clone())
            .with_context(|| format!("Invalid scorer config: {}", self.config.display()))?;
        if let (Some(alphabet_size), Some(noise)) = (self.alphabet_size, self.noise) {
            scorer.set_complexity_coef(alphabet_size, noise);
        }
        Ok((table, scorer))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Score(arg) => score::run(&arg)?,
        Mode::RankFeatures(arg) => rank_features::run(&arg)?,
    }
    Ok(())
}
