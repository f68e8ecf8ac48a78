//! Weight grids read by the topology measures.

use crate::error::{AnteroError, Result};
use crate::som::geometry::{distance_squared, grid_distance, unravel_index};
use crate::som::SelfOrganizingMap;
use ndarray::{Array2, ArrayD, ArrayView1, ArrayViewD, IxDyn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Weights of a Self-Organizing Map.
///
/// The array has shape `map_shape + (n_features,)`: every cell of an
/// arbitrary-dimensional grid holds a feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightGrid {
    weights: ArrayD<f64>,
}

impl WeightGrid {
    /// Wraps a weight array after checking its shape.
    pub fn new(weights: ArrayD<f64>) -> Result<Self> {
        check_shape(weights.shape())?;
        Ok(Self { weights })
    }

    /// Creates a grid with zero weights.
    pub fn zeros(map_shape: &[usize], n_features: usize) -> Result<Self> {
        Self::new(ArrayD::zeros(IxDyn(&grid_shape(map_shape, n_features))))
    }

    /// Creates a grid with weights drawn uniformly from `[0, 1)`.
    pub fn random(map_shape: &[usize], n_features: usize, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let weights = ArrayD::from_shape_simple_fn(
            IxDyn(&grid_shape(map_shape, n_features)),
            || rng.gen::<f64>(),
        );
        Self::new(weights)
    }

    /// Shape of the grid, without the feature axis.
    #[inline]
    pub fn map_shape(&self) -> &[usize] {
        let shape = self.weights.shape();
        &shape[..shape.len() - 1]
    }

    /// Weight vector dimensionality.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.shape()[self.weights.ndim() - 1]
    }

    /// Total number of units.
    #[inline]
    pub fn n_units(&self) -> usize {
        self.map_shape().iter().product()
    }
}

impl SelfOrganizingMap for WeightGrid {
    fn weights(&self) -> ArrayViewD<'_, f64> {
        self.weights.view()
    }
}

impl SelfOrganizingMap for ArrayD<f64> {
    fn weights(&self) -> ArrayViewD<'_, f64> {
        self.view()
    }
}

fn grid_shape(map_shape: &[usize], n_features: usize) -> Vec<usize> {
    let mut shape = map_shape.to_vec();
    shape.push(n_features);
    shape
}

fn check_shape(shape: &[usize]) -> Result<()> {
    if shape.len() < 2 {
        return Err(AnteroError::Som(format!(
            "Weights need a map axis and a feature axis, got shape {:?}",
            shape
        )));
    }
    if shape.contains(&0) {
        return Err(AnteroError::Som(format!(
            "Weights have an empty axis: {:?}",
            shape
        )));
    }
    Ok(())
}

/// Flattened units of a weight grid together with their grid coordinates.
#[derive(Debug)]
pub(crate) struct UnitGrid {
    map_shape: Vec<usize>,
    units: Array2<f64>,
    coords: Vec<Vec<usize>>,
}

impl UnitGrid {
    /// Flattens `weights` into one row per unit, in row-major grid order.
    pub(crate) fn new(weights: ArrayViewD<'_, f64>) -> Result<Self> {
        check_shape(weights.shape())?;

        let (&n_features, map_shape) = weights
            .shape()
            .split_last()
            .ok_or_else(|| AnteroError::Som("Weights have no axes".to_string()))?;
        let map_shape = map_shape.to_vec();
        let n_units: usize = map_shape.iter().product();

        let values = weights.iter().copied().collect();
        let units = Array2::from_shape_vec((n_units, n_features), values)?;
        let coords = (0..n_units).map(|i| unravel_index(i, &map_shape)).collect();

        Ok(Self {
            map_shape,
            units,
            coords,
        })
    }

    #[inline]
    pub(crate) fn map_shape(&self) -> &[usize] {
        &self.map_shape
    }

    #[inline]
    pub(crate) fn n_units(&self) -> usize {
        self.units.nrows()
    }

    #[inline]
    pub(crate) fn n_features(&self) -> usize {
        self.units.ncols()
    }

    /// Weight vector of unit `i`.
    #[inline]
    pub(crate) fn unit(&self, i: usize) -> ArrayView1<'_, f64> {
        self.units.row(i)
    }

    /// All values of feature `f` across units.
    pub(crate) fn feature(&self, f: usize) -> ArrayView1<'_, f64> {
        self.units.column(f)
    }

    /// Grid coordinates of unit `i`.
    #[inline]
    pub(crate) fn coords(&self, i: usize) -> &[usize] {
        &self.coords[i]
    }

    /// Grid-index distance between units `i` and `j`.
    #[inline]
    pub(crate) fn index_distance(&self, i: usize, j: usize) -> f64 {
        grid_distance(&self.coords[i], &self.coords[j])
    }

    /// The two units closest to `x`, best first.
    ///
    /// Ties go to the unit with the lower row-major index.
    pub(crate) fn best_two(&self, x: ArrayView1<'_, f64>) -> Result<(usize, usize)> {
        let mut first: Option<(f64, usize)> = None;
        let mut second: Option<(f64, usize)> = None;

        for i in 0..self.n_units() {
            let d = distance_squared(self.unit(i), x);
            match first {
                Some((best, _)) if d.total_cmp(&best).is_lt() => {
                    second = first;
                    first = Some((d, i));
                }
                None => first = Some((d, i)),
                _ => {
                    if second.map_or(true, |(runner_up, _)| d.total_cmp(&runner_up).is_lt()) {
                        second = Some((d, i));
                    }
                }
            }
        }

        match (first, second) {
            (Some((_, b1)), Some((_, b2))) => Ok((b1, b2)),
            _ => Err(AnteroError::Som(
                "Need at least two units to rank matching units".to_string(),
            )),
        }
    }
}
