//! On-disk dataset format.
//!
//! ```json
//! {
//!   "columns": ["temperature", "windy"],
//!   "rows": [
//!     { "inputs": [21.5, false] },
//!     { "inputs": [14.0, true], "weight": 2.0 }
//!   ],
//!   "outputs": ["play", "stay"]
//! }
//! ```
//!
//! `columns` is optional; unnamed columns are called `x0`, `x1`, ...

use std::path::Path;

use anyhow::Context;
use bscore_table::{Row, Table, Value};
use serde::{Deserialize, Serialize};

use crate::util;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub outputs: Vec<Value>,
}

impl DatasetFile {
    pub fn into_table(self) -> anyhow::Result<Table> {
        let table = Table::new(self.rows, self.outputs).context("Invalid dataset")?;
        if self.columns.is_empty() {
            return Ok(table);
        }
        table
            .with_columns(self.columns)
            .context("Invalid dataset column names")
    }
}

pub fn read_table(path: &Path) -> anyhow::Result<Table> {
    let dataset: DatasetFile = util::read_json_file("dataset", path)?;
    let table = dataset.into_table()?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.arity(),
        "loaded dataset"
    );
    Ok(table)
}
