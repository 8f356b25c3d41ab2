//! Candidate programs as seen by the scorers.
//!
//! Scorers never interpret candidates themselves. They hand each row (or
//! each group of a compressed table) to [`Program::evaluate`] and compare the
//! returned [`Value`] against the data. Two evaluation styles share this one
//! contract:
//!
//! - [`FnProgram`] computes its output from the row inputs, like a tree
//!   interpreter walking an expression per row.
//! - [`OutputColumn`] returns outputs computed ahead of time for every case
//!   position, like a batch interpreter that ran the candidate over the whole
//!   table at once.
//!
//! [`InputColumn`] and [`Constant`] are trivial programs used for
//! feature-as-candidate scoring and as decision-list defaults.

use std::{fmt, sync::Arc};

use bscore_table::{CompressedTable, Table, Value};

/// One case handed to a program: its position and its inputs.
///
/// For a [`Table`] the index is the row position; for a [`CompressedTable`]
/// it is the group position.
#[derive(Debug, Clone, Copy)]
pub struct Case<'a> {
    pub index: usize,
    pub inputs: &'a [Value],
}

impl<'a> Case<'a> {
    #[must_use]
    pub fn new(index: usize, inputs: &'a [Value]) -> Self {
        Self { index, inputs }
    }
}

/// Cases of every row of a table, in row order.
pub(crate) fn row_cases(table: &Table) -> impl Iterator<Item = Case<'_>> {
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| Case::new(index, &row.inputs))
}

/// Cases of every group of a compressed table, in group order.
pub(crate) fn group_cases(table: &CompressedTable) -> impl Iterator<Item = Case<'_>> {
    table
        .iter()
        .enumerate()
        .map(|(index, group)| Case::new(index, &group.inputs))
}

/// A candidate under evaluation.
pub trait Program: fmt::Debug + Send + Sync {
    /// Output of the program on one case.
    fn evaluate(&self, case: Case<'_>) -> Value;

    /// Structural complexity of the program.
    fn complexity(&self) -> f64 {
        0.0
    }
}

type ProgramFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named program computed from the row inputs.
///
/// # Example
///
/// ```
/// use bscore_scoring::program::{Case, FnProgram, Program};
/// use bscore_table::Value;
///
/// let and = FnProgram::new("and", |x| {
///     Value::Bool(x.iter().all(|v| v.as_bool() == Some(true)))
/// });
/// let inputs = [Value::Bool(true), Value::Bool(false)];
/// assert_eq!(and.evaluate(Case::new(0, &inputs)), Value::Bool(false));
/// ```
#[derive(Clone)]
pub struct FnProgram {
    name: String,
    complexity: f64,
    f: Arc<ProgramFn>,
}

impl FnProgram {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            complexity: 0.0,
            f: Arc::new(f),
        }
    }

    #[must_use]
    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity = complexity;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FnProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnProgram").field(&self.name).finish()
    }
}

impl Program for FnProgram {
    fn evaluate(&self, case: Case<'_>) -> Value {
        (self.f)(case.inputs)
    }

    fn complexity(&self) -> f64 {
        self.complexity
    }
}

/// Outputs precomputed for every case position.
///
/// # Panics
///
/// Evaluating a case whose index is outside the column panics.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    values: Vec<Value>,
    complexity: f64,
}

impl OutputColumn {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            complexity: 0.0,
        }
    }

    #[must_use]
    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.complexity = complexity;
        self
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl FromIterator<Value> for OutputColumn {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Program for OutputColumn {
    fn evaluate(&self, case: Case<'_>) -> Value {
        self.values[case.index].clone()
    }

    fn complexity(&self) -> f64 {
        self.complexity
    }
}

/// Projects one input column; scores a feature as if it were a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputColumn(pub usize);

impl Program for InputColumn {
    fn evaluate(&self, case: Case<'_>) -> Value {
        case.inputs[self.0].clone()
    }

    fn complexity(&self) -> f64 {
        1.0
    }
}

/// A program returning the same value for every case.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant(pub Value);

impl Program for Constant {
    fn evaluate(&self, _case: Case<'_>) -> Value {
        self.0.clone()
    }

    fn complexity(&self) -> f64 {
        1.0
    }
}

/// A member of an ensemble: a borrowed candidate and its vote weight.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub program: &'a dyn Program,
    pub weight: f64,
}

impl<'a> ScoredCandidate<'a> {
    #[must_use]
    pub fn new(program: &'a dyn Program, weight: f64) -> Self {
        Self { program, weight }
    }
}

/// One `if predicate then consequent` clause of a [`DecisionList`].
#[derive(Debug)]
pub struct Rule {
    pub predicate: Box<dyn Program>,
    pub consequent: Value,
    pub complexity: f64,
}

impl Rule {
    /// Creates a rule whose complexity is that of its predicate.
    pub fn new(predicate: impl Program + 'static, consequent: impl Into<Value>) -> Self {
        let complexity = predicate.complexity();
        Self {
            predicate: Box::new(predicate),
            consequent: consequent.into(),
            complexity,
        }
    }

    /// Whether the predicate fires on `case`. Non-boolean outputs never fire.
    #[must_use]
    pub fn fires(&self, case: Case<'_>) -> bool {
        self.predicate.evaluate(case) == Value::Bool(true)
    }
}

/// An ordered cascade of rules terminated by a default consequent.
///
/// As a [`Program`] it returns the consequent of the first firing rule, or
/// the default when none fires.
///
/// # Example
///
/// ```
/// use bscore_scoring::program::{Case, DecisionList, InputColumn, Program, Rule};
/// use bscore_table::Value;
///
/// let list = DecisionList::new(vec![Rule::new(InputColumn(0), "hot")], "cold");
/// let on = [Value::Bool(true)];
/// let off = [Value::Bool(false)];
/// assert_eq!(list.evaluate(Case::new(0, &on)), Value::from("hot"));
/// assert_eq!(list.evaluate(Case::new(1, &off)), Value::from("cold"));
/// ```
#[derive(Debug)]
pub struct DecisionList {
    pub rules: Vec<Rule>,
    pub default: Value,
}

impl DecisionList {
    pub fn new(rules: Vec<Rule>, default: impl Into<Value>) -> Self {
        Self {
            rules,
            default: default.into(),
        }
    }

    /// Position of the first rule firing on `case`.
    #[must_use]
    pub fn firing_rule(&self, case: Case<'_>) -> Option<usize> {
        self.rules.iter().position(|rule| rule.fires(case))
    }
}

impl Program for DecisionList {
    fn evaluate(&self, case: Case<'_>) -> Value {
        match self.firing_rule(case) {
            Some(index) => self.rules[index].consequent.clone(),
            None => self.default.clone(),
        }
    }

    fn complexity(&self) -> f64 {
        self.rules.iter().map(|rule| rule.complexity).sum()
    }
}
