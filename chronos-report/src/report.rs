//! Report Data Structures

use chronos_core::{Duration, Scale};
use chronos_stats::{SummaryStatistics, compute_median, compute_summary};
use std::fmt;
use thiserror::Error;

/// Errors from building results out of invalid parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A testcase must carry at least one sample
    #[error("testcase `{0}` has no samples")]
    EmptySamples(String),
    /// A group must carry at least one testcase
    #[error("testcase group has no results")]
    EmptyGroup,
}

/// Samples collected for one named unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct TestcaseResult {
    name: String,
    samples: Vec<Duration>,
}

impl TestcaseResult {
    /// Build a result from a non-empty sample set.
    ///
    /// # Panics
    /// If `samples` is empty.
    pub fn new(name: impl Into<String>, samples: Vec<Duration>) -> Self {
        match Self::try_new(name, samples) {
            Ok(result) => result,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build a result, rejecting an empty sample set
    pub fn try_new(name: impl Into<String>, samples: Vec<Duration>) -> Result<Self, ReportError> {
        let name = name.into();
        if samples.is_empty() {
            return Err(ReportError::EmptySamples(name));
        }
        Ok(Self { name, samples })
    }

    /// Unit name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples in execution order
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    /// All statistics at once
    pub fn summary(&self) -> SummaryStatistics {
        compute_summary(&self.nanos()).expect("TestcaseResult always holds at least one sample")
    }

    /// Fastest sample
    pub fn min(&self) -> Duration {
        Duration::from_nanos(self.summary().min)
    }

    /// Slowest sample
    pub fn max(&self) -> Duration {
        Duration::from_nanos(self.summary().max)
    }

    /// Arithmetic mean
    pub fn mean(&self) -> Duration {
        self.samples.iter().sum::<Duration>() / self.samples.len() as f64
    }

    /// Upper median of the samples
    pub fn median(&self) -> Duration {
        Duration::from_nanos(self.summary().median)
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> Duration {
        Duration::from_nanos(self.summary().std_dev)
    }

    fn nanos(&self) -> Vec<f64> {
        self.samples.iter().map(Duration::nanoseconds).collect()
    }
}

impl fmt::Display for TestcaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.mean())
    }
}

/// Results of several units run against one shared input
#[derive(Debug, Clone, PartialEq)]
pub struct TestcaseGroupResult<I> {
    input: I,
    results: Vec<TestcaseResult>,
}

impl<I> TestcaseGroupResult<I> {
    /// Group `results`, keeping their order.
    ///
    /// # Panics
    /// If `results` is empty.
    pub fn new(input: I, results: Vec<TestcaseResult>) -> Self {
        match Self::try_new(input, results) {
            Ok(group) => group,
            Err(err) => panic!("{err}"),
        }
    }

    /// Group `results`, rejecting an empty list
    pub fn try_new(input: I, results: Vec<TestcaseResult>) -> Result<Self, ReportError> {
        if results.is_empty() {
            return Err(ReportError::EmptyGroup);
        }
        Ok(Self { input, results })
    }

    /// The shared input
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Results in submission order
    pub fn results(&self) -> &[TestcaseResult] {
        &self.results
    }

    /// Take the group apart
    pub fn into_parts(self) -> (I, Vec<TestcaseResult>) {
        (self.input, self.results)
    }

    /// Upper median of the units' means
    pub fn median_mean(&self) -> Duration {
        let means: Vec<f64> = self
            .results
            .iter()
            .map(|r| r.mean().nanoseconds())
            .collect();
        Duration::from_nanos(
            compute_median(&means).expect("TestcaseGroupResult always holds at least one result"),
        )
    }

    /// The one display scale shared by every line of this group's report
    pub fn scale(&self) -> Scale {
        Scale::of(self.median_mean())
    }
}

impl<I: fmt::Display> fmt::Display for TestcaseGroupResult<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::human::format_group(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nanos(values: &[f64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_nanos).collect()
    }

    #[test]
    fn test_statistics_from_samples() {
        let result = TestcaseResult::new("sum", nanos(&[30.0, 10.0, 40.0, 20.0]));

        assert_eq!(result.min().nanoseconds(), 10.0);
        assert_eq!(result.max().nanoseconds(), 40.0);
        assert_eq!(result.mean().nanoseconds(), 25.0);
        // upper median, not the averaged pair
        assert_eq!(result.median().nanoseconds(), 30.0);
        assert!((result.std_dev().nanoseconds() - 125.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_samples_keep_execution_order() {
        let result = TestcaseResult::new("order", nanos(&[3.0, 1.0, 2.0]));
        let order: Vec<f64> = result.samples().iter().map(|d| d.nanoseconds()).collect();
        assert_eq!(order, vec![3.0, 1.0, 2.0]);
        assert_eq!(result.summary().sample_count, 3);
    }

    #[test]
    fn test_empty_samples_rejected() {
        let err = TestcaseResult::try_new("empty", Vec::new()).unwrap_err();
        assert_eq!(err, ReportError::EmptySamples("empty".to_string()));
    }

    #[test]
    #[should_panic(expected = "testcase `empty` has no samples")]
    fn test_empty_samples_panic() {
        TestcaseResult::new("empty", Vec::new());
    }

    #[test]
    fn test_result_display() {
        let result = TestcaseResult::new("push", nanos(&[1000.0, 2000.0, 3000.0]));
        assert_eq!(result.to_string(), "push: 2.000us");
    }

    #[test]
    fn test_group_median_of_means() {
        let group = TestcaseGroupResult::new(
            42,
            vec![
                TestcaseResult::new("A", nanos(&[100.0, 200.0, 300.0])),
                TestcaseResult::new("B", nanos(&[1000.0, 2000.0, 3000.0])),
            ],
        );

        assert_eq!(group.median_mean().nanoseconds(), 2000.0);
        assert_eq!(group.scale(), Scale::Microseconds);
        assert_eq!(*group.input(), 42);
        assert_eq!(group.results()[0].name(), "A");
        assert_eq!(group.results()[1].name(), "B");
    }

    #[test]
    fn test_group_scale_selection() {
        let ms = TestcaseGroupResult::new(
            "ms",
            vec![TestcaseResult::new("x", nanos(&[1_500_000.0]))],
        );
        assert_eq!(ms.scale(), Scale::Milliseconds);

        let ns = TestcaseGroupResult::new("ns", vec![TestcaseResult::new("x", nanos(&[500.0]))]);
        assert_eq!(ns.scale(), Scale::Nanoseconds);
    }

    #[test]
    fn test_empty_group_rejected() {
        let err = TestcaseGroupResult::try_new(1, Vec::new()).unwrap_err();
        assert_eq!(err, ReportError::EmptyGroup);
    }

    #[test]
    fn test_into_parts() {
        let group = TestcaseGroupResult::new(
            "input".to_string(),
            vec![TestcaseResult::new("only", nanos(&[5.0]))],
        );
        let (input, results) = group.into_parts();
        assert_eq!(input, "input");
        assert_eq!(results.len(), 1);
    }
}
