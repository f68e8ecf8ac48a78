//! Two-sample Kolmogorov-Smirnov test.

use crate::config::StatsConfig;
use crate::error::{AnteroError, Result};
use crate::stats::{TestResult, TwoSampleTest};

/// Two-sided two-sample Kolmogorov-Smirnov test.
///
/// The statistic is the largest distance between the two empirical CDFs.
/// The p-value is exact when `n1 * n2` is at most `exact_limit` and
/// follows the asymptotic Kolmogorov distribution otherwise.
#[derive(Debug, Clone, Default)]
pub struct KolmogorovSmirnov {
    config: StatsConfig,
}

impl KolmogorovSmirnov {
    /// Creates a test with the given configuration.
    pub fn new(config: StatsConfig) -> Self {
        Self { config }
    }

    /// Largest absolute difference between the empirical CDFs.
    pub fn statistic(a: &[f64], b: &[f64]) -> f64 {
        let a = sorted(a);
        let b = sorted(b);
        let (n1, n2) = (a.len() as f64, b.len() as f64);

        let (mut i, mut j) = (0, 0);
        let mut d: f64 = 0.0;
        while i < a.len() && j < b.len() {
            let x = a[i].min(b[j]);
            while i < a.len() && a[i] <= x {
                i += 1;
            }
            while j < b.len() && b[j] <= x {
                j += 1;
            }
            d = d.max((i as f64 / n1 - j as f64 / n2).abs());
        }
        d
    }
}

impl TwoSampleTest for KolmogorovSmirnov {
    fn test(&self, a: &[f64], b: &[f64]) -> Result<TestResult> {
        if a.is_empty() || b.is_empty() {
            return Err(AnteroError::EmptyInput(
                "two-sample test needs at least one value per sample".to_string(),
            ));
        }

        let statistic = Self::statistic(a, b);
        let p_value = if a.len().saturating_mul(b.len()) <= self.config.exact_limit {
            exact_p_value(statistic, a.len(), b.len())
        } else {
            asymptotic_p_value(statistic, a.len(), b.len())
        };

        Ok(TestResult {
            statistic,
            p_value: p_value.clamp(0.0, 1.0),
        })
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(|x, y| x.total_cmp(y));
    values
}

/// P(D >= d) by counting the lattice paths that stay strictly inside the band.
fn exact_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    let (m, n) = if n1 > n2 { (n2, n1) } else { (n1, n2) };
    let (md, nd) = (m as f64, n as f64);
    // Lattice points have CDF gaps that are multiples of 1/(m*n).
    let q = (0.5 + (d * md * nd - 1e-7).floor()) / (md * nd);

    let mut u: Vec<f64> = (0..=n)
        .map(|j| if j as f64 / nd > q { 0.0 } else { 1.0 })
        .collect();

    for i in 1..=m {
        let w = i as f64 / (i + n) as f64;
        u[0] = if i as f64 / md > q { 0.0 } else { w * u[0] };
        for j in 1..=n {
            u[j] = if (i as f64 / md - j as f64 / nd).abs() > q {
                0.0
            } else {
                w * u[j] + u[j - 1]
            };
        }
    }

    1.0 - u[n]
}

/// Asymptotic Kolmogorov distribution with a small-sample correction.
fn asymptotic_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    let (n1, n2) = (n1 as f64, n2 as f64);
    let en = n1 * n2 / (n1 + n2);
    let sqrt_en = en.sqrt();
    let lambda = (sqrt_en + 0.12 + 0.11 / sqrt_en) * d;
    kolmogorov_survival(lambda)
}

/// Q(λ) = 2 Σ (-1)^(k-1) exp(-2 k² λ²).
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda < 1e-3 {
        return 1.0;
    }

    let a = -2.0 * lambda * lambda;
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = sign * (a * kf * kf).exp();
        sum += term;
        if term.abs() < 1e-12 * sum.abs() || term.abs() < 1e-300 {
            return (2.0 * sum).clamp(0.0, 1.0);
        }
        sign = -sign;
    }
    // Series did not converge; only happens for tiny λ.
    1.0
}
