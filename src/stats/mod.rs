//! Two-sample statistical tests comparing feature distributions.

mod ks;

pub use ks::KolmogorovSmirnov;

use crate::error::Result;

/// Outcome of a two-sample test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// Test statistic.
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Trait for two-sided, two-sample distribution comparisons.
pub trait TwoSampleTest {
    /// Compares the distributions of `a` and `b`.
    fn test(&self, a: &[f64], b: &[f64]) -> Result<TestResult>;
}
