//! Summary Statistics
//!
//! All statistics are pure functions of the sample slice. Two conventions are
//! fixed because reported numbers depend on them:
//! - the median is the element at index `n / 2` of the ascending sort, so an
//!   even-sized set reports its upper middle value rather than the averaged pair
//! - the standard deviation divides by `n` (population), not `n - 1`

use thiserror::Error;

/// Summary statistics for one sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Upper median (index `n / 2` of the sorted samples)
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Number of samples
    pub sample_count: usize,
}

/// Errors from statistics over samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Statistics are undefined for an empty set
    #[error("cannot compute statistics over an empty sample set")]
    EmptySamples,
}

fn non_empty(samples: &[f64]) -> Result<&[f64], StatsError> {
    if samples.is_empty() {
        Err(StatsError::EmptySamples)
    } else {
        Ok(samples)
    }
}

/// Smallest sample
pub fn compute_min(samples: &[f64]) -> Result<f64, StatsError> {
    non_empty(samples)?
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .ok_or(StatsError::EmptySamples)
}

/// Largest sample
pub fn compute_max(samples: &[f64]) -> Result<f64, StatsError> {
    non_empty(samples)?
        .iter()
        .copied()
        .max_by(f64::total_cmp)
        .ok_or(StatsError::EmptySamples)
}

/// Arithmetic mean
pub fn compute_mean(samples: &[f64]) -> Result<f64, StatsError> {
    let samples = non_empty(samples)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Upper median: the element at index `n / 2` after sorting ascending
///
/// ```
/// # use chronos_stats::compute_median;
/// assert_eq!(compute_median(&[40.0, 10.0, 30.0, 20.0]).unwrap(), 30.0);
/// ```
pub fn compute_median(samples: &[f64]) -> Result<f64, StatsError> {
    let samples = non_empty(samples)?;
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted[sorted.len() / 2])
}

/// Population standard deviation: `sqrt(sum((x - mean)^2) / n)`
pub fn compute_std_dev(samples: &[f64]) -> Result<f64, StatsError> {
    let mean = compute_mean(samples)?;
    Ok(std_dev_around(samples, mean))
}

fn std_dev_around(samples: &[f64], mean: f64) -> f64 {
    let variance =
        samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

/// Compute every statistic from one sorted copy of the samples
pub fn compute_summary(samples: &[f64]) -> Result<SummaryStatistics, StatsError> {
    let samples = non_empty(samples)?;

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    Ok(SummaryStatistics {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median: sorted[n / 2],
        std_dev: std_dev_around(samples, mean),
        sample_count: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples).unwrap();

        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
        // population: sqrt(10 / 5)
        assert!((summary.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_upper_median_for_even_count() {
        let samples = vec![10.0, 20.0, 30.0, 40.0];
        assert_eq!(compute_median(&samples).unwrap(), 30.0);
        assert_eq!(compute_summary(&samples).unwrap().median, 30.0);
    }

    #[test]
    fn test_median_ignores_input_order() {
        let samples = vec![300.0, 100.0, 200.0];
        assert_eq!(compute_median(&samples).unwrap(), 200.0);
    }

    #[test]
    fn test_population_std_dev() {
        let samples = vec![100.0, 200.0, 300.0];
        let std_dev = compute_std_dev(&samples).unwrap();

        // sqrt(20000 / 3), not sqrt(20000 / 2)
        assert!((std_dev - (20_000.0_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert!((std_dev - 100.0).abs() > 1.0);
    }

    #[test]
    fn test_single_sample() {
        let summary = compute_summary(&[42.0]).unwrap();
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.max, 42.0);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_individual_functions_agree_with_summary() {
        let samples = vec![7.0, 3.5, 9.25, 1.0, 4.0, 4.0];
        let summary = compute_summary(&samples).unwrap();

        assert_eq!(compute_min(&samples).unwrap(), summary.min);
        assert_eq!(compute_max(&samples).unwrap(), summary.max);
        assert_eq!(compute_mean(&samples).unwrap(), summary.mean);
        assert_eq!(compute_median(&samples).unwrap(), summary.median);
        assert!((compute_std_dev(&samples).unwrap() - summary.std_dev).abs() < 1e-12);
    }

    #[test]
    fn test_empty_samples() {
        let samples: Vec<f64> = Vec::new();
        assert_eq!(compute_summary(&samples), Err(StatsError::EmptySamples));
        assert_eq!(compute_median(&samples), Err(StatsError::EmptySamples));
        assert_eq!(compute_mean(&samples), Err(StatsError::EmptySamples));
        assert_eq!(compute_min(&samples), Err(StatsError::EmptySamples));
        assert_eq!(compute_max(&samples), Err(StatsError::EmptySamples));
        assert_eq!(compute_std_dev(&samples), Err(StatsError::EmptySamples));
    }
}
