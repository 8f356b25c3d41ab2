use std::collections::{BTreeMap, btree_map};

use crate::Value;

/// Accumulated (possibly fractional) count per distinct output value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    counts: BTreeMap<Value, f64>,
}

impl Counter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is negative or not finite.
    pub fn add(&mut self, value: Value, count: f64) {
        assert!(
            count.is_finite() && count >= 0.0,
            "count must be finite and non-negative: {count}"
        );
        *self.counts.entry(value).or_default() += count;
    }

    /// Count of `value`, `0.0` if it never occurred.
    #[must_use]
    pub fn get(&self, value: &Value) -> f64 {
        self.counts.get(value).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn total_count(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Largest count of any single value, `0.0` when empty.
    #[must_use]
    pub fn max_count(&self) -> f64 {
        self.counts.values().copied().fold(0.0, f64::max)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(value, count)` pairs in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, f64)> {
        self.counts.iter().map(|(v, c)| (v, *c))
    }
}

impl FromIterator<(Value, f64)> for Counter {
    fn from_iter<T: IntoIterator<Item = (Value, f64)>>(iter: T) -> Self {
        let mut counter = Self::new();
        for (value, count) in iter {
            counter.add(value, count);
        }
        counter
    }
}

/// One group of a [`CompressedTable`]: a distinct input assignment and the
/// outputs observed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedRow {
    pub inputs: Vec<Value>,
    pub counter: Counter,
}

/// Rows grouped by identical inputs.
///
/// Groups are kept in input order, so positions are reproducible between
/// runs and can be used to align per-group scores.
///
/// # Example
///
/// ```
/// use bscore_table::{CompressedTable, Value};
///
/// let rows = [
///     (vec![Value::Bool(true)], Value::Bool(true), 1.0),
///     (vec![Value::Bool(false)], Value::Bool(false), 2.0),
///     (vec![Value::Bool(true)], Value::Bool(false), 0.5),
/// ];
/// let table: CompressedTable = rows.into_iter().collect();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.total_count(), 3.5);
/// // `false < true`, so the `false` group comes first
/// assert_eq!(table.get(1).unwrap().counter.get(&Value::Bool(false)), 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressedTable {
    rows: Vec<CompressedRow>,
}

impl CompressedTable {
    /// Builds a compressed table directly from groups.
    ///
    /// Groups with equal inputs are merged.
    #[must_use]
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (Vec<Value>, Counter)>,
    {
        let mut merged: BTreeMap<Vec<Value>, Counter> = BTreeMap::new();
        for (inputs, counter) in groups {
            match merged.entry(inputs) {
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(counter);
                }
                btree_map::Entry::Occupied(mut entry) => {
                    for (value, count) in counter.iter() {
                        entry.get_mut().add(value.clone(), count);
                    }
                }
            }
        }
        Self::from_map(merged)
    }

    fn from_map(map: BTreeMap<Vec<Value>, Counter>) -> Self {
        let rows = map
            .into_iter()
            .map(|(inputs, counter)| CompressedRow { inputs, counter })
            .collect();
        Self { rows }
    }

    /// Number of distinct input assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts; equals the weighted row count before compression.
    #[must_use]
    pub fn total_count(&self) -> f64 {
        self.rows.iter().map(|r| r.counter.total_count()).sum()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CompressedRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompressedRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn rows(&self) -> &[CompressedRow] {
        &self.rows
    }
}

impl FromIterator<(Vec<Value>, Value, f64)> for CompressedTable {
    fn from_iter<T: IntoIterator<Item = (Vec<Value>, Value, f64)>>(iter: T) -> Self {
        let mut map: BTreeMap<Vec<Value>, Counter> = BTreeMap::new();
        for (inputs, output, weight) in iter {
            map.entry(inputs).or_default().add(output, weight);
        }
        Self::from_map(map)
    }
}

impl<'a> IntoIterator for &'a CompressedTable {
    type Item = &'a CompressedRow;
    type IntoIter = std::slice::Iter<'a, CompressedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates() {
        let counter: Counter = [
            (Value::from("a"), 1.0),
            (Value::from("b"), 2.5),
            (Value::from("a"), 3.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(counter.len(), 2);
        assert_eq!(counter.get(&Value::from("a")), 4.0);
        assert_eq!(counter.get(&Value::from("z")), 0.0);
        assert_eq!(counter.total_count(), 6.5);
        assert_eq!(counter.max_count(), 4.0);
        assert_eq!(Counter::new().max_count(), 0.0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_counter_rejects_negative() {
        Counter::new().add(Value::Bool(true), -1.0);
    }

    #[test]
    fn test_from_groups_merges() {
        let group = |t, f| -> Counter {
            [(Value::Bool(true), t), (Value::Bool(false), f)]
                .into_iter()
                .collect()
        };
        let table = CompressedTable::from_groups([
            (vec![Value::Contin(1.0)], group(1.0, 2.0)),
            (vec![Value::Contin(0.0)], group(3.0, 0.0)),
            (vec![Value::Contin(1.0)], group(1.0, 1.0)),
        ]);
        assert_eq!(table.len(), 2);
        let second = table.get(1).unwrap();
        assert_eq!(second.inputs, vec![Value::Contin(1.0)]);
        assert_eq!(second.counter.get(&Value::Bool(true)), 2.0);
        assert_eq!(second.counter.get(&Value::Bool(false)), 3.0);
        assert_eq!(table.total_count(), 8.0);
    }
}
