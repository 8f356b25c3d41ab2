//! Data model for behavioral scoring.
//!
//! A [`Table`] holds input rows with a parallel output column. Scorers that
//! only care about how often each output occurs for a given input work on the
//! [`CompressedTable`] form, where identical input rows are merged and their
//! weights accumulated into a [`Counter`] per group. Every scorer reports its
//! result as a [`BehavioralScore`].
//!
//! # Example
//!
//! ```
//! use bscore_table::{Table, Value};
//!
//! // 3-input majority function
//! let table = Table::truth_table(3, |x| x.iter().filter(|b| **b).count() >= 2);
//! let compressed = table.compress();
//! assert_eq!(compressed.len(), 8);
//! assert_eq!(compressed.total_count(), 8.0);
//!
//! let trues = compressed
//!     .iter()
//!     .map(|group| group.counter.get(&Value::Bool(true)))
//!     .sum::<f64>();
//! assert_eq!(trues, 4.0);
//! ```

pub use self::{compressed::*, score::*, table::*, value::*};

mod compressed;
mod score;
mod table;
mod value;

/// Errors raised when a table is built from inconsistent parts.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("table has {rows} rows but the output column has {outputs} entries")]
    SizeMismatch { rows: usize, outputs: usize },
    #[display("row {row} has {actual} inputs, expected {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("row {row} has invalid weight {weight}")]
    InvalidWeight { row: usize, weight: f64 },
    #[display("{names} column names given for {arity} input columns")]
    ColumnCountMismatch { arity: usize, names: usize },
}
