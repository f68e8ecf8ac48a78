//! Self-Organizing Map (SOM) topology measures.
//!
//! The measures only read a map's weight grid, exposed through the
//! [`SelfOrganizingMap`] trait; training the map is left to the caller.
//!
//! - **Grid**: weight storage and grid-index geometry (map.rs, geometry.rs)
//! - **Measures**: u-matrix, topographic error and embedding accuracy (measures.rs)

mod geometry;
mod map;
pub mod measures;

pub use geometry::{distance, distance_squared, grid_distance, unravel_index};
pub use map::WeightGrid;
pub use measures::{
    best_matching_units, embedding_accuracy, embedding_accuracy_with, topographic_error, umatrix,
    TopologyMeasures, TopologyReport,
};

use ndarray::ArrayViewD;

/// A trained map as seen by the topology measures.
pub trait SelfOrganizingMap {
    /// Weight grid of shape `map_shape + (n_features,)`.
    fn weights(&self) -> ArrayViewD<'_, f64>;
}
