//! Topology quality measures of a trained Self-Organizing Map.
//!
//! - **U-matrix**: mean feature-space distance of every unit to its grid neighbors
//! - **Topographic error**: fraction of samples whose two best matching units are not adjacent
//! - **Embedding accuracy**: fraction of features whose weight distribution matches the data

use crate::config::{Config, MeasureConfig};
use crate::error::{AnteroError, Result};
use crate::som::map::UnitGrid;
use crate::som::geometry::distance;
use crate::som::SelfOrganizingMap;
use crate::stats::{KolmogorovSmirnov, TwoSampleTest};
use log::{debug, info, trace};
use ndarray::{ArrayD, ArrayView2, IxDyn};
use rayon::prelude::*;

/// Computes the u-matrix of a map.
///
/// Each entry is the mean Euclidean distance between a unit's weights and
/// the weights of the units within grid-index distance `(0, radius]`.
/// Units without such neighbors get NaN. The result has the map's shape.
pub fn umatrix<S>(som: &S, radius: f64) -> Result<ArrayD<f64>>
where
    S: SelfOrganizingMap + ?Sized,
{
    let grid = UnitGrid::new(som.weights())?;

    let distances: Vec<f64> = (0..grid.n_units())
        .into_par_iter()
        .map(|i| {
            let (sum, count) = (0..grid.n_units())
                .filter(|&j| {
                    let d = grid.index_distance(i, j);
                    d > 0.0 && d <= radius
                })
                .fold((0.0, 0usize), |(sum, count), j| {
                    (sum + distance(grid.unit(i), grid.unit(j)), count + 1)
                });

            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect();

    debug!(
        "Computed u-matrix over {} units with radius {}",
        grid.n_units(),
        radius
    );
    Ok(ArrayD::from_shape_vec(IxDyn(grid.map_shape()), distances)?)
}

/// Finds the best and second best matching unit of every sample.
///
/// Returns grid coordinates as `(bmu, second_bmu)` pairs. Ties go to the
/// unit that comes first in row-major grid order.
pub fn best_matching_units<S>(
    som: &S,
    data: ArrayView2<'_, f64>,
) -> Result<Vec<(Vec<usize>, Vec<usize>)>>
where
    S: SelfOrganizingMap + ?Sized,
{
    let grid = UnitGrid::new(som.weights())?;
    check_features(&grid, data)?;

    (0..data.nrows())
        .into_par_iter()
        .map(|s| {
            let (b1, b2) = grid.best_two(data.row(s))?;
            Ok((grid.coords(b1).to_vec(), grid.coords(b2).to_vec()))
        })
        .collect()
}

/// Measures the topographic error of a map.
///
/// A sample errs when the grid-index distance between its best and second
/// best matching unit exceeds `neighbor_radius`; the result is the
/// fraction of erring samples.
pub fn topographic_error<S>(
    som: &S,
    data: ArrayView2<'_, f64>,
    neighbor_radius: f64,
) -> Result<f64>
where
    S: SelfOrganizingMap + ?Sized,
{
    if data.nrows() == 0 {
        return Err(AnteroError::EmptyInput(
            "topographic error needs at least one sample".to_string(),
        ));
    }

    let grid = UnitGrid::new(som.weights())?;
    check_features(&grid, data)?;

    let errors = (0..data.nrows())
        .into_par_iter()
        .map(|s| {
            let (b1, b2) = grid.best_two(data.row(s))?;
            Ok(usize::from(grid.index_distance(b1, b2) > neighbor_radius))
        })
        .collect::<Result<Vec<usize>>>()?
        .into_iter()
        .sum::<usize>();

    let error = errors as f64 / data.nrows() as f64;
    debug!(
        "Topographic error {:.4} ({} of {} samples)",
        error,
        errors,
        data.nrows()
    );
    Ok(error)
}

/// Measures the embedding accuracy of a map with the Kolmogorov-Smirnov test.
///
/// See [`embedding_accuracy_with`].
pub fn embedding_accuracy<S>(som: &S, data: ArrayView2<'_, f64>, alpha: f64) -> Result<f64>
where
    S: SelfOrganizingMap + ?Sized,
{
    embedding_accuracy_with(som, data, alpha, &KolmogorovSmirnov::default())
}

/// Measures the embedding accuracy of a map.
///
/// Each feature's data values are compared with that feature's values
/// across all units; the result is the fraction of features whose
/// p-value exceeds `alpha`.
pub fn embedding_accuracy_with<S, T>(
    som: &S,
    data: ArrayView2<'_, f64>,
    alpha: f64,
    test: &T,
) -> Result<f64>
where
    S: SelfOrganizingMap + ?Sized,
    T: TwoSampleTest + ?Sized,
{
    let grid = UnitGrid::new(som.weights())?;
    check_features(&grid, data)?;

    let mut similar = 0;
    for f in 0..grid.n_features() {
        let samples = data.column(f).to_vec();
        let weights = grid.feature(f).to_vec();
        let result = test.test(&samples, &weights)?;
        trace!(
            "Feature {}: statistic {:.4}, p-value {:.4}",
            f,
            result.statistic,
            result.p_value
        );
        if result.p_value > alpha {
            similar += 1;
        }
    }

    let accuracy = similar as f64 / grid.n_features() as f64;
    debug!(
        "Embedding accuracy {:.4} ({} of {} features)",
        accuracy,
        similar,
        grid.n_features()
    );
    Ok(accuracy)
}

fn check_features(grid: &UnitGrid, data: ArrayView2<'_, f64>) -> Result<()> {
    if data.ncols() != grid.n_features() {
        return Err(AnteroError::Som(format!(
            "Data dimension {} does not match weight dimension {}",
            data.ncols(),
            grid.n_features()
        )));
    }
    Ok(())
}

/// All three measures of one map.
#[derive(Debug, Clone)]
pub struct TopologyReport {
    /// Mean neighbor distance per unit.
    pub umatrix: ArrayD<f64>,
    /// Fraction of samples with non-adjacent best matching units.
    pub topographic_error: f64,
    /// Fraction of features distributed like the data.
    pub embedding_accuracy: f64,
}

/// Evaluates the topology measures under one configuration.
#[derive(Debug, Clone, Default)]
pub struct TopologyMeasures {
    config: MeasureConfig,
    test: KolmogorovSmirnov,
}

impl TopologyMeasures {
    /// Creates an evaluator after validating `config`.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.measures.clone(),
            test: KolmogorovSmirnov::new(config.stats.clone()),
        })
    }

    /// The measure configuration.
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// U-matrix with the configured radius.
    pub fn umatrix<S: SelfOrganizingMap + ?Sized>(&self, som: &S) -> Result<ArrayD<f64>> {
        umatrix(som, self.config.umatrix_radius)
    }

    /// Topographic error with the configured neighbor radius.
    pub fn topographic_error<S: SelfOrganizingMap + ?Sized>(
        &self,
        som: &S,
        data: ArrayView2<'_, f64>,
    ) -> Result<f64> {
        topographic_error(som, data, self.config.neighbor_radius)
    }

    /// Embedding accuracy at the configured significance level.
    pub fn embedding_accuracy<S: SelfOrganizingMap + ?Sized>(
        &self,
        som: &S,
        data: ArrayView2<'_, f64>,
    ) -> Result<f64> {
        embedding_accuracy_with(som, data, self.config.alpha, &self.test)
    }

    /// Computes all three measures.
    pub fn evaluate<S: SelfOrganizingMap + ?Sized>(
        &self,
        som: &S,
        data: ArrayView2<'_, f64>,
    ) -> Result<TopologyReport> {
        let report = TopologyReport {
            umatrix: self.umatrix(som)?,
            topographic_error: self.topographic_error(som, data)?,
            embedding_accuracy: self.embedding_accuracy(som, data)?,
        };

        info!(
            "Topology of {:?} map over {} samples: topographic error {:.4}, embedding accuracy {:.4}",
            report.umatrix.shape(),
            data.nrows(),
            report.topographic_error,
            report.embedding_accuracy
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::som::WeightGrid;
    use crate::stats::TestResult;
    use ndarray::{array, Array2};

    /// A 1-D map whose weights equal their grid index.
    fn line_map(n: usize) -> WeightGrid {
        let weights = Array2::from_shape_fn((n, 1), |(i, _)| i as f64).into_dyn();
        WeightGrid::new(weights).unwrap()
    }

    #[test]
    fn test_umatrix_line() {
        let u = umatrix(&line_map(4), 1.0).unwrap();
        assert_eq!(u.shape(), &[4]);
        assert!(u.iter().all(|&d| (d - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_umatrix_means_neighbor_distances() {
        // 2x2 map with one outlier unit.
        let weights = array![[[0.0], [0.0]], [[0.0], [3.0]]].into_dyn();
        let u = umatrix(&weights, 1.0).unwrap();

        assert_eq!(u.shape(), &[2, 2]);
        assert!((u[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((u[[0, 1]] - 1.5).abs() < 1e-12);
        assert!((u[[1, 0]] - 1.5).abs() < 1e-12);
        assert!((u[[1, 1]] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_umatrix_radius_includes_diagonals() {
        let weights = array![[[0.0], [0.0]], [[0.0], [3.0]]].into_dyn();
        let u = umatrix(&weights, 1.5).unwrap();
        assert!((u[[0, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_umatrix_without_neighbors_is_nan() {
        let u = umatrix(&line_map(1), 1.0).unwrap();
        assert_eq!(u.shape(), &[1]);
        assert!(u[[0]].is_nan());

        let u = umatrix(&line_map(3), 0.5).unwrap();
        assert!(u.iter().all(|d| d.is_nan()));
    }

    #[test]
    fn test_topographic_error_adjacent() {
        let data = array![[0.2], [1.4], [2.6]];
        let error = topographic_error(&line_map(4), data.view(), 1.0).unwrap();
        assert_eq!(error, 0.0);
    }

    #[test]
    fn test_topographic_error_folded_map() {
        // Units 0 and 2 share weights, so their samples' BMUs are two cells apart.
        let weights = array![[0.0], [5.0], [0.1]].into_dyn();
        let data = array![[0.0], [0.05]];
        let error = topographic_error(&weights, data.view(), 1.0).unwrap();
        assert_eq!(error, 1.0);

        let data = array![[0.0], [5.0]];
        let error = topographic_error(&weights, data.view(), 1.0).unwrap();
        assert_eq!(error, 0.5);
    }

    #[test]
    fn test_topographic_error_rejects_bad_input() {
        let map = line_map(4);
        assert!(matches!(
            topographic_error(&map, Array2::<f64>::zeros((0, 1)).view(), 1.0),
            Err(AnteroError::EmptyInput(_))
        ));
        assert!(matches!(
            topographic_error(&map, Array2::<f64>::zeros((2, 3)).view(), 1.0),
            Err(AnteroError::Som(_))
        ));
        assert!(topographic_error(&line_map(1), array![[0.0]].view(), 1.0).is_err());
    }

    #[test]
    fn test_best_matching_units_coordinates() {
        let weights = array![[[0.0], [1.0]], [[2.0], [3.0]]].into_dyn();
        let bmus = best_matching_units(&weights, array![[2.9]].view()).unwrap();
        assert_eq!(bmus, vec![(vec![1, 1], vec![1, 0])]);
    }

    #[test]
    fn test_embedding_accuracy_identical_distribution() {
        let map = line_map(10);
        let data = Array2::from_shape_fn((10, 1), |(i, _)| i as f64);
        let accuracy = embedding_accuracy(&map, data.view(), 0.05).unwrap();
        assert_eq!(accuracy, 1.0);
    }

    #[test]
    fn test_embedding_accuracy_shifted_feature() {
        // Feature 0 matches the weights, feature 1 is far away.
        let weights = Array2::from_shape_fn((10, 2), |(i, _)| i as f64).into_dyn();
        let data = Array2::from_shape_fn((10, 2), |(i, f)| i as f64 + 100.0 * f as f64);
        let accuracy = embedding_accuracy(&weights, data.view(), 0.05).unwrap();
        assert_eq!(accuracy, 0.5);
    }

    struct FixedTest(f64);

    impl TwoSampleTest for FixedTest {
        fn test(&self, _a: &[f64], _b: &[f64]) -> Result<TestResult> {
            Ok(TestResult {
                statistic: 0.0,
                p_value: self.0,
            })
        }
    }

    #[test]
    fn test_embedding_accuracy_with_custom_test() {
        let map = line_map(5);
        let data = array![[1.0], [2.0]];
        assert_eq!(
            embedding_accuracy_with(&map, data.view(), 0.05, &FixedTest(0.5)).unwrap(),
            1.0
        );
        assert_eq!(
            embedding_accuracy_with(&map, data.view(), 0.05, &FixedTest(0.01)).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_measures_evaluate() {
        let measures = TopologyMeasures::new(&Config::default()).unwrap();
        let data = array![[0.2], [1.4], [2.6]];
        let report = measures.evaluate(&line_map(4), data.view()).unwrap();

        assert_eq!(report.umatrix.shape(), &[4]);
        assert_eq!(report.topographic_error, 0.0);
        assert!((0.0..=1.0).contains(&report.embedding_accuracy));
    }

    #[test]
    fn test_measures_reject_invalid_config() {
        let mut config = Config::default();
        config.measures.alpha = 2.0;
        assert!(TopologyMeasures::new(&config).is_err());
    }
}
