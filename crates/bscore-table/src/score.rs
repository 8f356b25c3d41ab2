use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Per-case penalties describing how a candidate fits the data.
///
/// Higher (less negative) is better. Entries are aligned by position, so
/// element-wise arithmetic requires equal lengths.
///
/// # Example
///
/// ```
/// use bscore_table::BehavioralScore;
///
/// let mut score = BehavioralScore::from(vec![-1.0, 0.0, -2.0]);
/// score -= &BehavioralScore::from(vec![-1.0, -1.0, -1.0]);
/// assert_eq!(score.as_slice(), &[0.0, 1.0, -1.0]);
/// assert_eq!(score.sum(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehavioralScore(Vec<f64>);

impl BehavioralScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }

    #[must_use]
    pub fn filled(len: usize, value: f64) -> Self {
        Self(vec![value; len])
    }

    /// Scalar fitness: the sum of all entries.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Multiplies every entry by `factor`.
    #[must_use]
    pub fn scale(mut self, factor: f64) -> Self {
        for x in &mut self.0 {
            *x *= factor;
        }
        self
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for BehavioralScore {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for BehavioralScore {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for BehavioralScore {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl SubAssign<&BehavioralScore> for BehavioralScore {
    fn sub_assign(&mut self, rhs: &BehavioralScore) {
        assert_eq!(self.len(), rhs.len(), "score length mismatch");
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a -= b;
        }
    }
}

impl Sub<&BehavioralScore> for BehavioralScore {
    type Output = BehavioralScore;

    fn sub(mut self, rhs: &BehavioralScore) -> BehavioralScore {
        self -= rhs;
        self
    }
}

impl AddAssign<&BehavioralScore> for BehavioralScore {
    fn add_assign(&mut self, rhs: &BehavioralScore) {
        assert_eq!(self.len(), rhs.len(), "score length mismatch");
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a += b;
        }
    }
}

impl Add<&BehavioralScore> for BehavioralScore {
    type Output = BehavioralScore;

    fn add(mut self, rhs: &BehavioralScore) -> BehavioralScore {
        self += rhs;
        self
    }
}
