//! The scorer capability and the closed set of scorer variants.

use std::{fmt, sync::Arc};

use bscore_table::BehavioralScore;

use crate::{
    cluster::ClusterScorer,
    continuous::ContinuousScorer,
    decision_list::DecisionListScorer,
    discretized::DiscretizedScorer,
    enum_table::EnumTableScorer,
    interesting::InterestingPredicateScorer,
    logical::LogicalScorer,
    program::{DecisionList, Program, ScoredCandidate},
    sink::ScoreSink,
    truth_table::CompressedTruthTableScorer,
};

/// Largest representable score; marks an unreachable optimum.
pub const VERY_BEST_SCORE: f64 = f64::MAX;
/// Smallest representable score; marks a degenerate candidate.
pub const VERY_WORST_SCORE: f64 = f64::MIN;

/// Construction errors of the scorers.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ScorerError {
    #[display("at least one threshold is required")]
    EmptyThresholds,
    #[display("threshold {value} is not finite")]
    NonFiniteThreshold { value: f64 },
    #[display("grading must be in (0, 1], got {grading}")]
    InvalidGrading { grading: f64 },
    #[display("punishment must be finite and non-negative, got {punishment}")]
    InvalidPunishment { punishment: f64 },
    #[display("activation bounds must satisfy 0 <= min < max <= 1, got [{min}, {max}]")]
    InvalidActivation { min: f64, max: f64 },
    #[display("{name} weight must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[display("penalty exponent must be positive, got {exponent}")]
    InvalidExponent { exponent: f64 },
    #[display("target {index} is {value}, expected a {expected} value")]
    TargetType {
        index: usize,
        value: String,
        expected: &'static str,
    },
    #[display("need at least {required} rows, got {actual}")]
    TooFewRows { required: usize, actual: usize },
}

/// Scores candidates against a fixed dataset.
///
/// Implementations are built once per search run and are immutable while
/// scoring, so one instance can be shared by all evaluation threads. Scoring
/// never fails: candidates producing values of the wrong type score as
/// wrong predictions.
///
/// The minimum improvement follows one convention across scorers: a
/// non-negative value is an absolute score delta, a negative value is a
/// relative one (`-0.05` means 5%).
pub trait BehavioralScorer: fmt::Debug + Send + Sync {
    fn score(&self, program: &dyn Program) -> BehavioralScore;

    /// Scores a weighted ensemble.
    ///
    /// The default scores every member and sums the weighted scores, members
    /// visited in the given order. Shorter scores are padded with zeros.
    fn score_ensemble(&self, ensemble: &[ScoredCandidate<'_>]) -> BehavioralScore {
        let mut total = Vec::<f64>::new();
        for member in ensemble {
            let score = self.score(member.program);
            if total.len() < score.len() {
                total.resize(score.len(), 0.0);
            }
            for (t, s) in total.iter_mut().zip(score.iter()) {
                *t += member.weight * s;
            }
        }
        total.into()
    }

    /// Scores an ordered decision list. The default scores it as a program.
    fn score_decision_list(&self, list: &DecisionList) -> BehavioralScore {
        self.score(list)
    }

    fn best_possible_score(&self) -> BehavioralScore;

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        None
    }

    fn min_improvement(&self) -> f64;

    /// Weight of one unit of candidate complexity against one unit of score.
    fn complexity_coef(&self) -> f64 {
        0.0
    }

    /// Calibrates [`Self::complexity_coef`] from the size of the candidate
    /// language and the noise level of the data.
    fn set_complexity_coef(&mut self, _alphabet_size: usize, _noise: f64) {}

    fn candidate_complexity(&self, program: &dyn Program) -> f64 {
        program.complexity()
    }

    fn decision_list_complexity(&self, list: &DecisionList) -> f64 {
        list.complexity()
    }
}

/// Every scorer variant behind one type.
#[derive(Debug, derive_more::From)]
pub enum Scorer {
    Logical(LogicalScorer),
    Continuous(ContinuousScorer),
    Discretized(DiscretizedScorer),
    TruthTable(CompressedTruthTableScorer),
    EnumTable(EnumTableScorer),
    DecisionList(DecisionListScorer),
    Interesting(InterestingPredicateScorer),
    Cluster(ClusterScorer),
}

macro_rules! dispatch {
    ($scorer:expr, $inner:ident => $body:expr) => {
        match $scorer {
            Scorer::Logical($inner) => $body,
            Scorer::Continuous($inner) => $body,
            Scorer::Discretized($inner) => $body,
            Scorer::TruthTable($inner) => $body,
            Scorer::EnumTable($inner) => $body,
            Scorer::DecisionList($inner) => $body,
            Scorer::Interesting($inner) => $body,
            Scorer::Cluster($inner) => $body,
        }
    };
}

impl BehavioralScorer for Scorer {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        dispatch!(self, s => s.score(program))
    }

    fn score_ensemble(&self, ensemble: &[ScoredCandidate<'_>]) -> BehavioralScore {
        dispatch!(self, s => s.score_ensemble(ensemble))
    }

    fn score_decision_list(&self, list: &DecisionList) -> BehavioralScore {
        dispatch!(self, s => s.score_decision_list(list))
    }

    fn best_possible_score(&self) -> BehavioralScore {
        dispatch!(self, s => s.best_possible_score())
    }

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        dispatch!(self, s => s.worst_possible_score())
    }

    fn min_improvement(&self) -> f64 {
        dispatch!(self, s => s.min_improvement())
    }

    fn complexity_coef(&self) -> f64 {
        dispatch!(self, s => s.complexity_coef())
    }

    fn set_complexity_coef(&mut self, alphabet_size: usize, noise: f64) {
        dispatch!(self, s => s.set_complexity_coef(alphabet_size, noise));
    }

    fn candidate_complexity(&self, program: &dyn Program) -> f64 {
        dispatch!(self, s => s.candidate_complexity(program))
    }

    fn decision_list_complexity(&self, list: &DecisionList) -> f64 {
        dispatch!(self, s => s.decision_list_complexity(list))
    }
}

/// A scorer that reports every scored candidate to a [`ScoreSink`].
///
/// The sink only observes; scores are returned unchanged.
#[derive(Debug)]
pub struct WithSink<S> {
    inner: S,
    sink: Arc<dyn ScoreSink>,
}

impl<S> WithSink<S> {
    pub fn new(inner: S, sink: Arc<dyn ScoreSink>) -> Self {
        Self { inner, sink }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: BehavioralScorer> BehavioralScorer for WithSink<S> {
    fn score(&self, program: &dyn Program) -> BehavioralScore {
        let score = self.inner.score(program);
        self.sink.record(&format!("{program:?}"), &score);
        score
    }

    fn score_ensemble(&self, ensemble: &[ScoredCandidate<'_>]) -> BehavioralScore {
        let score = self.inner.score_ensemble(ensemble);
        self.sink.record(&format!("ensemble of {}", ensemble.len()), &score);
        score
    }

    fn score_decision_list(&self, list: &DecisionList) -> BehavioralScore {
        let score = self.inner.score_decision_list(list);
        self.sink.record(&format!("{list:?}"), &score);
        score
    }

    fn best_possible_score(&self) -> BehavioralScore {
        self.inner.best_possible_score()
    }

    fn worst_possible_score(&self) -> Option<BehavioralScore> {
        self.inner.worst_possible_score()
    }

    fn min_improvement(&self) -> f64 {
        self.inner.min_improvement()
    }

    fn complexity_coef(&self) -> f64 {
        self.inner.complexity_coef()
    }

    fn set_complexity_coef(&mut self, alphabet_size: usize, noise: f64) {
        self.inner.set_complexity_coef(alphabet_size, noise);
    }

    fn candidate_complexity(&self, program: &dyn Program) -> f64 {
        self.inner.candidate_complexity(program)
    }

    fn decision_list_complexity(&self, list: &DecisionList) -> f64 {
        self.inner.decision_list_complexity(list)
    }
}
