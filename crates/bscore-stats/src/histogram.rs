use std::{cmp::Ordering, collections::BTreeMap};

/// A weighted frequency distribution over distinct real values.
///
/// Unlike a binned histogram, every distinct value gets its own bin, and bins
/// accumulate (possibly fractional) weights rather than integer counts. This is
/// the shape of a compressed table's output column: the same output value may
/// be seen many times, with row weights summed into its count.
///
/// Bins iterate in ascending value order. Values are ordered with
/// [`f64::total_cmp`]; `-0.0` is folded into `0.0` on insertion.
///
/// # Examples
///
/// ```
/// # use bscore_stats::histogram::Histogram;
/// let histogram: Histogram = [(1.0, 2.0), (3.0, 1.0), (1.0, 1.0)].into_iter().collect();
/// assert_eq!(histogram.len(), 2);
/// assert_eq!(histogram.get(1.0), 3.0);
/// assert_eq!(histogram.total_weight(), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    bins: BTreeMap<BinKey, f64>,
    total_weight: f64,
}

#[derive(Debug, Clone, Copy)]
struct BinKey(f64);

impl BinKey {
    fn new(value: f64) -> Self {
        // fold -0.0 into 0.0
        Self(value + 0.0)
    }
}

impl PartialEq for BinKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for BinKey {}

impl PartialOrd for BinKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Histogram {
    /// Creates an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` occurrences of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `weight` is negative or not finite.
    pub fn add(&mut self, value: f64, weight: f64) {
        assert!(
            weight.is_finite() && weight >= 0.0,
            "histogram weights must be finite and non-negative, got {weight}"
        );
        *self.bins.entry(BinKey::new(value)).or_default() += weight;
        self.total_weight += weight;
    }

    /// Returns the accumulated weight of `value` (zero when absent).
    #[must_use]
    pub fn get(&self, value: f64) -> f64 {
        self.bins.get(&BinKey::new(value)).copied().unwrap_or(0.0)
    }

    /// Returns the relative frequency of `value`, or zero for an empty histogram.
    #[must_use]
    pub fn probability(&self, value: f64) -> f64 {
        if self.total_weight > 0.0 {
            self.get(value) / self.total_weight
        } else {
            0.0
        }
    }

    /// Sum of all bin weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Iterates `(value, weight)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bins.iter().map(|(k, w)| (k.0, *w))
    }

    /// Smallest and largest values, or `None` when empty.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        let (min, _) = self.bins.first_key_value()?;
        let (max, _) = self.bins.last_key_value()?;
        Some((min.0, max.0))
    }
}

impl FromIterator<(f64, f64)> for Histogram {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        let mut histogram = Self::new();
        for (value, weight) in iter {
            histogram.add(value, weight);
        }
        histogram
    }
}

impl Extend<(f64, f64)> for Histogram {
    fn extend<T: IntoIterator<Item = (f64, f64)>>(&mut self, iter: T) {
        for (value, weight) in iter {
            self.add(value, weight);
        }
    }
}
