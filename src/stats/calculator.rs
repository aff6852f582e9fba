//! Statistics Calculator Module
//! Descriptive statistics over the derived abstract word counts.

use crate::data::CleanRecord;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Descriptive statistics for a set of word counts.
#[derive(Debug, Clone, Serialize)]
pub struct WordCountStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub p05: f64,
    pub p95: f64,
    pub max: usize,
    /// Records whose abstract is empty (word count 0).
    pub empty: usize,
}

impl Default for WordCountStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
            max: 0,
            empty: 0,
        }
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarise `abstract_word_count` across cleaned records.
    pub fn word_count_stats(records: &[CleanRecord]) -> WordCountStats {
        let counts: Vec<usize> = records.iter().map(|r| r.abstract_word_count).collect();
        Self::compute_descriptive_stats(&counts)
    }

    pub fn compute_descriptive_stats(counts: &[usize]) -> WordCountStats {
        let n = counts.len();
        if n == 0 {
            return WordCountStats::default();
        }

        let mut sorted: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = sorted.iter().mean();
        // Sample standard deviation; a single value has no spread.
        let std = if n > 1 { sorted.iter().std_dev() } else { 0.0 };

        WordCountStats {
            count: n,
            mean,
            median: Self::percentile(&sorted, 50.0),
            std,
            p05: Self::percentile(&sorted, 5.0),
            p95: Self::percentile(&sorted, 95.0),
            max: sorted[n - 1] as usize,
            empty: counts.iter().filter(|&&c| c == 0).count(),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_nan() {
        let stats = StatsCalculator::compute_descriptive_stats(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
    }

    #[test]
    fn test_single_value() {
        let stats = StatsCalculator::compute_descriptive_stats(&[7]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.max, 7);
    }

    #[test]
    fn test_descriptive_stats() {
        let stats = StatsCalculator::compute_descriptive_stats(&[0, 10, 20, 30, 40]);

        assert_eq!(stats.count, 5);
        assert!((stats.mean - 20.0).abs() < 1e-9);
        assert!((stats.median - 20.0).abs() < 1e-9);
        // sample std of 0,10,20,30,40
        assert!((stats.std - 250f64.sqrt()).abs() < 1e-9);
        assert!((stats.p05 - 2.0).abs() < 1e-9);
        assert!((stats.p95 - 38.0).abs() < 1e-9);
        assert_eq!(stats.max, 40);
        assert_eq!(stats.empty, 1);
    }

    #[test]
    fn test_percentile_interpolates_even_median() {
        let stats = StatsCalculator::compute_descriptive_stats(&[4, 1, 3, 2]);
        assert!((stats.median - 2.5).abs() < 1e-9);
    }
}
