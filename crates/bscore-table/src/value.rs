use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// A typed value: a table cell, or the output of a candidate program on a row.
///
/// Values are totally ordered so they can key ordered maps: booleans sort
/// before continuous values, which sort before enum labels. Continuous values
/// compare with [`f64::total_cmp`], so `NaN` equals itself and sorts last,
/// and `-0.0` sorts before `0.0`.
///
/// In JSON a value is a bare boolean, number or string.
///
/// # Example
///
/// ```
/// use bscore_table::Value;
///
/// let values: Vec<Value> = serde_json::from_str(r#"[true, 1.5, "red"]"#).unwrap();
/// assert_eq!(values, vec![Value::Bool(true), Value::Contin(1.5), Value::from("red")]);
/// assert!(values[0] < values[1] && values[1] < values[2]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, derive_more::IsVariant, derive_more::From)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Contin(f64),
    Enum(String),
}

impl Value {
    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the continuous payload, if this is a continuous value.
    ///
    /// Booleans are not numbers here: a boolean where a number is expected
    /// is a type mismatch.
    #[must_use]
    pub fn as_contin(&self) -> Option<f64> {
        match self {
            Value::Contin(x) => Some(*x),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Value::Enum(label) => Some(label),
            _ => None,
        }
    }

    /// The opposite boolean outcome; `None` for non-boolean values.
    #[must_use]
    pub fn negate(&self) -> Option<Value> {
        self.as_bool().map(|b| Value::Bool(!b))
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Contin(_) => 1,
            Value::Enum(_) => 2,
        }
    }
}

impl From<&str> for Value {
    fn from(label: &str) -> Self {
        Value::Enum(label.to_owned())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Contin(a), Value::Contin(b)) => a.total_cmp(b),
            (Value::Enum(a), Value::Enum(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Contin(x) => write!(f, "{x}"),
            Value::Enum(label) => write!(f, "{label}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_across_variants() {
        let mut values = vec![
            Value::from("b"),
            Value::Contin(2.0),
            Value::Bool(true),
            Value::from("a"),
            Value::Contin(-1.0),
            Value::Bool(false),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Bool(false),
                Value::Bool(true),
                Value::Contin(-1.0),
                Value::Contin(2.0),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_nan_equals_itself() {
        assert_eq!(Value::Contin(f64::NAN), Value::Contin(f64::NAN));
    }

    #[test]
    fn test_readings() {
        assert_eq!(Value::Bool(true).as_contin(), None);
        assert_eq!(Value::Contin(1.0).as_contin(), Some(1.0));
        assert_eq!(Value::from("x").as_contin(), None);
        assert_eq!(Value::Contin(1.0).as_bool(), None);
        assert_eq!(Value::Bool(false).negate(), Some(Value::Bool(true)));
        assert!(Value::from("x").negate().is_none());
        assert!(Value::Contin(0.5).is_contin());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&vec![Value::Bool(false), Value::Contin(0.25)]).unwrap();
        assert_eq!(json, "[false,0.25]");
    }
}
