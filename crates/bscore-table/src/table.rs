use serde::{Deserialize, Serialize};

use crate::{TableError, Value, compressed::CompressedTable};

/// One input assignment of a table, with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub inputs: Vec<Value>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

const fn default_weight() -> f64 {
    1.0
}

impl Row {
    /// Creates a row with weight `1.0`.
    #[must_use]
    pub fn new(inputs: Vec<Value>) -> Self {
        Self {
            inputs,
            weight: default_weight(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// An ordered set of rows with a parallel output (target) column.
///
/// Construction checks that every row has the same number of inputs, that
/// weights are finite and non-negative, and that there is exactly one output
/// per row.
///
/// # Example
///
/// ```
/// use bscore_table::{Row, Table, Value};
///
/// let rows = vec![
///     Row::new(vec![Value::Contin(0.0)]),
///     Row::new(vec![Value::Contin(1.0)]),
/// ];
/// let table = Table::new(rows, vec![Value::Contin(0.0), Value::Contin(2.0)]).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.arity(), 1);
///
/// let err = Table::new(vec![Row::new(vec![])], vec![]).unwrap_err();
/// assert!(err.to_string().contains("output column"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
    outputs: Vec<Value>,
}

impl Table {
    pub fn new(rows: Vec<Row>, outputs: Vec<Value>) -> Result<Self, TableError> {
        if rows.len() != outputs.len() {
            return Err(TableError::SizeMismatch {
                rows: rows.len(),
                outputs: outputs.len(),
            });
        }
        let arity = rows.first().map_or(0, |r| r.inputs.len());
        for (index, row) in rows.iter().enumerate() {
            if row.inputs.len() != arity {
                return Err(TableError::ArityMismatch {
                    row: index,
                    expected: arity,
                    actual: row.inputs.len(),
                });
            }
            if !row.weight.is_finite() || row.weight < 0.0 {
                return Err(TableError::InvalidWeight {
                    row: index,
                    weight: row.weight,
                });
            }
        }
        let columns = (0..arity).map(|i| format!("x{i}")).collect();
        Ok(Self {
            columns,
            rows,
            outputs,
        })
    }

    /// Replaces the default `x0, x1, ...` column names.
    pub fn with_columns(mut self, columns: Vec<String>) -> Result<Self, TableError> {
        if columns.len() != self.arity() {
            return Err(TableError::ColumnCountMismatch {
                arity: self.arity(),
                names: columns.len(),
            });
        }
        self.columns = columns;
        Ok(self)
    }

    /// Builds the complete truth table of a boolean function of `arity` inputs.
    ///
    /// Rows enumerate all `2^arity` assignments, the first input varying
    /// slowest.
    ///
    /// ```
    /// # use bscore_table::{Table, Value};
    /// let xor = Table::truth_table(2, |x| x[0] != x[1]);
    /// assert_eq!(xor.len(), 4);
    /// assert_eq!(xor.outputs()[1], Value::Bool(true));
    /// ```
    #[must_use]
    pub fn truth_table<F>(arity: usize, target: F) -> Self
    where
        F: Fn(&[bool]) -> bool,
    {
        let size = 1_usize << arity;
        let mut rows = Vec::with_capacity(size);
        let mut outputs = Vec::with_capacity(size);
        for index in 0..size {
            let bits = (0..arity)
                .map(|i| (index >> (arity - 1 - i)) & 1 == 1)
                .collect::<Vec<_>>();
            outputs.push(Value::Bool(target(&bits)));
            rows.push(Row::new(bits.into_iter().map(Value::Bool).collect()));
        }
        Self {
            columns: (0..arity).map(|i| format!("x{i}")).collect(),
            rows,
            outputs,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of input columns.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn outputs(&self) -> &[Value] {
        &self.outputs
    }

    /// Iterates rows together with their outputs.
    pub fn iter(&self) -> impl Iterator<Item = (&Row, &Value)> {
        self.rows.iter().zip(&self.outputs)
    }

    /// Sum of row weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).sum()
    }

    /// Groups rows with identical inputs, accumulating row weights per output.
    #[must_use]
    pub fn compress(&self) -> CompressedTable {
        self.iter()
            .map(|(row, output)| (row.inputs.clone(), output.clone(), row.weight))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contin_row(values: &[f64]) -> Row {
        Row::new(values.iter().copied().map(Value::Contin).collect())
    }

    #[test]
    fn test_arity_mismatch() {
        let rows = vec![contin_row(&[1.0, 2.0]), contin_row(&[1.0])];
        let err = Table::new(rows, vec![Value::Bool(true), Value::Bool(false)]).unwrap_err();
        assert!(matches!(
            err,
            TableError::ArityMismatch {
                row: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let rows = vec![contin_row(&[1.0]).with_weight(-2.0)];
        let err = Table::new(rows, vec![Value::Bool(true)]).unwrap_err();
        assert!(matches!(err, TableError::InvalidWeight { row: 0, .. }));
    }

    #[test]
    fn test_columns() {
        let table = Table::new(vec![contin_row(&[1.0, 2.0])], vec![Value::Contin(3.0)])
            .unwrap()
            .with_columns(vec!["a".to_owned(), "b".to_owned()])
            .unwrap();
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("c"), None);
        assert!(table.clone().with_columns(vec![]).is_err());
    }

    #[test]
    fn test_truth_table_enumerates_assignments() {
        let and = Table::truth_table(3, |x| x.iter().all(|b| *b));
        assert_eq!(and.len(), 8);
        assert_eq!(and.arity(), 3);
        let trues = and.outputs().iter().filter(|v| **v == Value::Bool(true)).count();
        assert_eq!(trues, 1);
        assert_eq!(and.rows()[7].inputs, vec![Value::Bool(true); 3]);
        assert_eq!(and.rows()[4].inputs[0], Value::Bool(true));
        assert_eq!(and.rows()[4].inputs[2], Value::Bool(false));
    }

    #[test]
    fn test_compress_preserves_weight() {
        let rows = vec![
            contin_row(&[1.0]),
            contin_row(&[1.0]).with_weight(0.5),
            contin_row(&[2.0]),
        ];
        let outputs = vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)];
        let table = Table::new(rows, outputs).unwrap();
        let compressed = table.compress();
        assert_eq!(compressed.len(), 2);
        assert!((compressed.total_count() - table.total_weight()).abs() < 1e-12);
    }
}
