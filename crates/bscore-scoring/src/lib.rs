//! Behavioral scoring of candidate programs.
//!
//! A genetic-programming search proposes candidate programs and needs to
//! rank them. This crate turns a candidate into a [`BehavioralScore`]: a
//! vector of per-case penalties describing how the candidate fits a fixed
//! dataset. The search sums the vector into a scalar fitness, and queries the
//! scorer once per run for calibration values: the best and worst attainable
//! scores, the smallest score delta worth acting on, and the complexity
//! coefficient trading candidate size against accuracy.
//!
//! # Architecture
//!
//! - [`Program`] is the only view of a candidate the scorers have: a function
//!   from one case to a [`Value`]. Interpreting candidates is the caller's
//!   business.
//! - [`BehavioralScorer`] is the scoring capability. Each variant implements
//!   it, and [`Scorer`] is the closed union of all variants.
//! - Scorers are built once per run, validate their configuration at
//!   construction, and never fail afterwards. They are `Send + Sync`, so one
//!   instance serves all evaluation threads.
//!
//! # Scorers
//!
//! | scorer | data | per-case penalty |
//! |--------|------|------------------|
//! | [`LogicalScorer`] | table, boolean target | `-1` per wrong row |
//! | [`ContinuousScorer`] | table, numeric target | negated squared or absolute error |
//! | [`DiscretizedScorer`] | table, numeric target | class weight per misclassified row |
//! | [`CompressedTruthTableScorer`] | compressed, boolean | cases with the opposite outcome |
//! | [`EnumTableScorer`] | compressed, labels | cases with another label |
//! | [`DecisionListScorer`] | compressed, labels | filter, graded or effective rule credit |
//! | [`InterestingPredicateScorer`] | compressed, numeric | distribution shift of the selected rows |
//! | [`ClusterScorer`] | table | cluster tightness of the projection (experimental) |
//!
//! # Example
//!
//! ```
//! use bscore_scoring::{BehavioralScorer, LogicalScorer, Scorer, program::FnProgram};
//! use bscore_table::{Table, Value};
//!
//! let scorer: Scorer = LogicalScorer::new(Table::truth_table(2, |x| x[0] || x[1]))
//!     .unwrap()
//!     .into();
//! let or = FnProgram::new("or", |x| {
//!     Value::Bool(x.iter().any(|v| v.as_bool() == Some(true)))
//! });
//! let first = FnProgram::new("x0", |x| x[0].clone());
//!
//! assert_eq!(scorer.score(&or), scorer.best_possible_score());
//! assert_eq!(scorer.score(&first).sum(), -1.0);
//! ```
//!
//! [`BehavioralScore`]: bscore_table::BehavioralScore
//! [`Value`]: bscore_table::Value

pub use self::{
    cluster::ClusterScorer,
    continuous::ContinuousScorer,
    decision_list::DecisionListScorer,
    discretized::DiscretizedScorer,
    enum_table::EnumTableScorer,
    interesting::InterestingPredicateScorer,
    logical::LogicalScorer,
    program::Program,
    scorer::{BehavioralScorer, Scorer, ScorerError},
    truth_table::CompressedTruthTableScorer,
};

pub mod cluster;
pub mod complexity;
pub mod continuous;
pub mod decision_list;
pub mod discretized;
pub mod enum_table;
pub mod feature;
pub mod interesting;
pub mod logical;
pub mod program;
pub mod scorer;
pub mod sink;
pub mod truth_table;
