//! Scorer configuration file.
//!
//! A JSON object tagged by `kind`; the remaining fields are the parameters of
//! that scorer, each with a default:
//!
//! ```json
//! { "kind": "discretized", "thresholds": [0.0, 1.0], "weighted_accuracy": true }
//! ```

use bscore_scoring::{
    ClusterScorer, CompressedTruthTableScorer, ContinuousScorer, DecisionListScorer,
    DiscretizedScorer, EnumTableScorer, InterestingPredicateScorer, LogicalScorer, Scorer,
    ScorerError,
    continuous::ContinuousParams,
    decision_list::DecisionListParams,
    discretized::DiscretizedParams,
    interesting::InterestingParams,
    truth_table::TruthTableParams,
};
use bscore_table::Table;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorerConfig {
    Logical,
    Continuous(ContinuousParams),
    Discretized(DiscretizedParams),
    TruthTable(TruthTableParams),
    EnumTable,
    DecisionList(DecisionListParams),
    Interesting(InterestingParams),
    Cluster,
}

impl ScorerConfig {
    pub fn build(self, table: Table) -> Result<Scorer, ScorerError> {
        let scorer = match self {
            ScorerConfig::Logical => LogicalScorer::new(table)?.into(),
            ScorerConfig::Continuous(params) => ContinuousScorer::new(table, params)?.into(),
            ScorerConfig::Discretized(params) => DiscretizedScorer::new(table, params)?.into(),
            ScorerConfig::TruthTable(params) => {
                CompressedTruthTableScorer::new(table.compress(), &params)?.into()
            }
            ScorerConfig::EnumTable => EnumTableScorer::new(table.compress()).into(),
            ScorerConfig::DecisionList(params) => {
                DecisionListScorer::new(table.compress(), params)?.into()
            }
            ScorerConfig::Interesting(params) => {
                InterestingPredicateScorer::new(table.compress(), params)?.into()
            }
            ScorerConfig::Cluster => ClusterScorer::new(table)?.into(),
        };
        Ok(scorer)
    }
}
