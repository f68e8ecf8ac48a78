//! Plain one-hot encoder without missing-value handling.

use crate::categorical::numeric::{argmax_last_axis, one_hot};
use crate::categorical::{describe, fitted, CategoricalEncoder, CategorySet};
use crate::error::Result;
use log::debug;
use ndarray::{ArrayD, ArrayViewD};
use std::fmt;

/// One-hot encoder over arrays of any shape.
///
/// Does not handle unseen categories: they transform to the first category.
/// Does not invert all-zero rows: they invert to the first category.
/// Does not handle missing values; filter them out before fitting.
///
/// ```rust
/// use antero::{CategoricalEncoder, OneHotEncoder};
/// use ndarray::array;
///
/// let mut oh = OneHotEncoder::new();
/// oh.fit(&array!["a", "b", "c", "d"].into_dyn());
/// let encoded = oh.transform(&array!["a", "c", "d", "a"].into_dyn()).unwrap();
/// assert_eq!(encoded.shape(), &[4, 4]);
///
/// let inverted = oh.inverse(array![[0u8, 1, 0, 0]].into_dyn().view()).unwrap();
/// assert_eq!(inverted, array!["b"].into_dyn());
/// ```
#[derive(Debug, Clone)]
pub struct OneHotEncoder<T> {
    categories: Option<CategorySet<T>>,
}

impl<T> OneHotEncoder<T> {
    /// Creates an unfitted encoder.
    pub fn new() -> Self {
        Self { categories: None }
    }

    /// Returns true once `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }
}

impl<T> Default for OneHotEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> CategoricalEncoder for OneHotEncoder<T> {
    type Category = T;
    type Samples = ArrayD<T>;
    type Labels = ArrayD<usize>;
    type Encoded = ArrayD<u8>;
    type Inverted = ArrayD<T>;

    fn fit(&mut self, samples: &ArrayD<T>) -> &mut Self {
        let categories = CategorySet::from_samples(samples.iter());
        debug!("Fitted one-hot encoder with {} categories", categories.len());
        self.categories = Some(categories);
        self
    }

    fn categories(&self) -> Result<&CategorySet<T>> {
        fitted(&self.categories)
    }

    fn transform_to_labels(&self, samples: &ArrayD<T>) -> Result<ArrayD<usize>> {
        let categories = self.categories()?;
        Ok(samples.map(|v| categories.label_or_first(v)))
    }

    fn transform_from_labels(&self, labels: &ArrayD<usize>) -> Result<ArrayD<u8>> {
        one_hot(labels.iter().copied(), labels.shape(), self.n_categories()?)
    }

    fn inverse_to_labels(&self, encoded: ArrayViewD<'_, u8>) -> Result<ArrayD<usize>> {
        argmax_last_axis(encoded)
    }

    fn inverse_from_labels(&self, labels: &ArrayD<usize>) -> Result<ArrayD<T>> {
        let categories = self.categories()?;
        let values = labels
            .iter()
            .map(|&label| categories.category(label).cloned())
            .collect::<Result<Vec<T>>>()?;
        Ok(ArrayD::from_shape_vec(labels.raw_dim(), values)?)
    }
}

impl<T: fmt::Debug> fmt::Display for OneHotEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, "OneHotEncoder", &self.categories)
    }
}
