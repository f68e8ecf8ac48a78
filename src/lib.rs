//! # Antero - Categorical Encoding and SOM Diagnostics
//!
//! Antero provides two families of numerical utilities for preprocessing
//! and diagnosing machine-learning data.
//!
//! ## Overview
//!
//! Categorical encoders convert label data to and from one-hot rows. They
//! share one protocol and differ in how they treat missing values:
//!
//! - [`OneHotEncoder`] assumes no missing values and exact membership
//! - [`NanHotEncoder`] maps nulls and unseen values to all-zero rows
//! - [`CatHotEncoder`] works on [`Categorical`] data with `-1` as the missing code
//!
//! Topology measures evaluate how well a Self-Organizing Map's grid of
//! weight vectors represents a data distribution:
//!
//! - **U-matrix**: mean neighbor distance per unit
//! - **Topographic error**: fraction of samples with non-adjacent best matching units
//! - **Embedding accuracy**: fraction of features distributed like the data
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use antero::{CategoricalEncoder, Config, LabeledSeries, NanHotEncoder, TopologyMeasures, WeightGrid};
//!
//! // Encode labels with missing values
//! let mut encoder = NanHotEncoder::new();
//! encoder.fit(&LabeledSeries::from_values(["a", "b", "c"]));
//! let frame = encoder.transform(&LabeledSeries::new(vec![None, Some("b")]))?;
//!
//! // Evaluate a trained map
//! let measures = TopologyMeasures::new(&Config::default())?;
//! let report = measures.evaluate(&weights, data.view())?;
//! ```
//!
//! ## Architecture
//!
//! - [`categorical`] - Category sets, labeled containers and encoders
//! - [`som`] - Weight grids and topology measures
//! - [`stats`] - Two-sample distribution tests
//! - [`config`] - Measure and test configuration
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod categorical;
pub mod config;
pub mod error;
pub mod som;
pub mod stats;

// Re-export commonly used types
pub use categorical::{
    ordinal_categorical, CatHotEncoder, Categorical, CategoricalEncoder, CategorySet, IsNull,
    LabeledFrame, LabeledSeries, NanHotEncoder, OneHotEncoder, MISSING_CODE,
};
pub use config::{Config, MeasureConfig, StatsConfig};
pub use error::{AnteroError, Result};
pub use som::{
    embedding_accuracy, topographic_error, umatrix, SelfOrganizingMap, TopologyMeasures,
    TopologyReport, WeightGrid,
};
pub use stats::{KolmogorovSmirnov, TestResult, TwoSampleTest};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default neighbor radius of the u-matrix and topographic error.
pub const DEFAULT_NEIGHBOR_RADIUS: f64 = 1.0;

/// Default significance level of the embedding accuracy.
pub const DEFAULT_ALPHA: f64 = 0.05;
