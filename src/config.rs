//! Configuration for the topology measures and statistical tests.

use crate::error::{AnteroError, Result};
use crate::{DEFAULT_ALPHA, DEFAULT_NEIGHBOR_RADIUS};
use serde::{Deserialize, Serialize};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SOM topology measure configuration.
    pub measures: MeasureConfig,

    /// Two-sample test configuration.
    pub stats: StatsConfig,
}

impl Config {
    /// Checks every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.measures.validate()
    }
}

/// Self-Organizing Map topology measure configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// Maximum grid-index distance of the neighbors averaged in the u-matrix.
    /// Default: 1.0 (immediate neighbors).
    pub umatrix_radius: f64,

    /// Grid-index distance above which two best matching units count
    /// as non-adjacent in the topographic error.
    /// Default: 1.0.
    pub neighbor_radius: f64,

    /// Significance level for the embedding accuracy.
    /// Default: 0.05.
    pub alpha: f64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            umatrix_radius: DEFAULT_NEIGHBOR_RADIUS,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl MeasureConfig {
    /// Checks radii are finite and positive and `alpha` lies in `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        for (name, radius) in [
            ("umatrix_radius", self.umatrix_radius),
            ("neighbor_radius", self.neighbor_radius),
        ] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(AnteroError::Config(format!(
                    "{} must be finite and positive, got {}",
                    name, radius
                )));
            }
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnteroError::Config(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }

        Ok(())
    }
}

/// Two-sample test configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Largest `n1 * n2` sample size product for which the
    /// Kolmogorov-Smirnov p-value is computed exactly.
    /// Larger samples use the asymptotic distribution; zero always does.
    /// Default: 10,000.
    pub exact_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { exact_limit: 10_000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.measures.umatrix_radius, 1.0);
        assert_eq!(config.measures.neighbor_radius, 1.0);
        assert_eq!(config.measures.alpha, 0.05);
        assert_eq!(config.stats.exact_limit, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let mut config = MeasureConfig::default();
        config.alpha = 1.0;
        assert!(matches!(config.validate(), Err(AnteroError::Config(_))));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let config = MeasureConfig {
            neighbor_radius: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MeasureConfig {
            umatrix_radius: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
