/// Summary of a sample of `f64` values.
///
/// Variance is the population variance (divided by `n`). The median of an
/// even-sized sample is the mean of the two middle values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Summarizes unsorted values; `None` for an empty sample.
    ///
    /// ```
    /// # use bscore_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!((stats.min, stats.max), (1.0, 5.0));
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Summarizes values already sorted in ascending order.
    ///
    /// Used per segment of a sorted projection, where sorting again would be
    /// wasted work.
    ///
    /// # Panics
    ///
    /// Panics if `sorted` is not in ascending order.
    ///
    /// ```
    /// # use bscore_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[1.0, 1.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(stats.median, 2.0);
    /// assert_eq!(stats.variance, 1.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        assert!(
            sorted.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted[mid - 1], sorted[mid])
        } else {
            sorted[mid]
        };
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
