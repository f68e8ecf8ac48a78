//! Distances between units, in feature space and in grid-index space.

use ndarray::ArrayView1;

/// Euclidean distance between two feature vectors.
pub fn distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance (faster, avoids sqrt).
#[inline]
pub fn distance_squared(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Feature dimensions must match");

    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Euclidean distance between two grid coordinates.
pub fn grid_distance(a: &[usize], b: &[usize]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Converts a row-major flat index to grid coordinates.
pub fn unravel_index(mut index: usize, map_shape: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; map_shape.len()];
    for (c, &dim) in coords.iter_mut().zip(map_shape).rev() {
        *c = index % dim;
        index /= dim;
    }
    coords
}
