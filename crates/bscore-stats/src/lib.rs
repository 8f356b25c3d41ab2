//! Statistical accumulators for behavioral scoring.
//!
//! This crate provides the numeric building blocks the scorers are made of:
//!
//! - **Descriptive statistics**: min, max, mean, median, population variance
//! - **Histograms**: weighted frequency distributions over distinct values
//! - **Weighted moments**: mean, variance and skewness of a histogram
//! - **KLD**: divergence of a sample distribution from a fixed reference
//! - **Mann-Whitney U**: standardized rank-sum statistic between two samples
//! - **Entropy**: Shannon and conditional entropy of discrete samples
//! - **1-D k-means**: Lloyd's algorithm over sorted values
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`histogram`]: Weighted value histograms
//! - [`moments`]: Weighted central moments and skewness
//! - [`kld`]: Kullback-Leibler divergence estimator
//! - [`mann_whitney`]: Mann-Whitney U test statistic
//! - [`entropy`]: Entropy and conditional entropy
//! - [`kmeans`]: One-dimensional k-means clustering
//!
//! # Examples
//!
//! ## Comparing a selected sub-distribution against its baseline
//!
//! ```
//! use bscore_stats::{
//!     histogram::Histogram, kld::KldEstimator, mann_whitney::standardized_mann_whitney_u,
//!     moments::weighted_skewness,
//! };
//!
//! let baseline: Histogram = [(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)].into_iter().collect();
//! let selected: Histogram = [(2.0, 1.0), (3.0, 3.0)].into_iter().collect();
//!
//! let kld = KldEstimator::new(baseline.clone());
//! assert!(kld.divergence(&selected) > 0.0);
//! assert!(standardized_mann_whitney_u(&baseline, &selected) > 0.0);
//! assert!(weighted_skewness(&selected) < weighted_skewness(&baseline) + 1e-12);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use bscore_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
pub mod entropy;
pub mod histogram;
pub mod kld;
pub mod kmeans;
pub mod mann_whitney;
pub mod moments;
