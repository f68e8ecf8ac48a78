//! Categorical encoders converting labels to and from one-hot rows.
//!
//! Three encoders share one protocol ([`CategoricalEncoder`]) and differ
//! in their missing-value policy:
//!
//! - [`OneHotEncoder`]: no missing values; unseen categories and all-zero
//!   rows default to the first category
//! - [`NanHotEncoder`]: null samples and unseen categories map to a NaN
//!   label and an all-zero row
//! - [`CatHotEncoder`]: works on [`Categorical`] data, where code `-1`
//!   marks a missing category

mod cathot;
mod container;
mod nanhot;
mod null;
mod numeric;
mod onehot;
mod ordinal;
mod set;

pub use cathot::CatHotEncoder;
pub use container::{Categorical, LabeledFrame, LabeledSeries};
pub use nanhot::NanHotEncoder;
pub use null::IsNull;
pub use onehot::OneHotEncoder;
pub use ordinal::ordinal_categorical;
pub use set::CategorySet;

use crate::error::{AnteroError, Result};
use ndarray::ArrayViewD;

/// Code of an entry without a category in [`Categorical`] data.
pub const MISSING_CODE: i64 = -1;

/// The transform/inverse protocol shared by the encoders.
///
/// `transform` is `transform_from_labels(transform_to_labels(samples))`
/// and `inverse` is `inverse_from_labels(inverse_to_labels(encoded))`
/// unless an encoder overrides them.
pub trait CategoricalEncoder {
    /// Category value type.
    type Category;
    /// Input accepted by `fit` and `transform`.
    type Samples;
    /// Label codes.
    type Labels;
    /// One-hot output of `transform`.
    type Encoded;
    /// Output of `inverse`.
    type Inverted;

    /// Fits the category set, replacing any previous one.
    fn fit(&mut self, samples: &Self::Samples) -> &mut Self;

    /// The fitted categories.
    fn categories(&self) -> Result<&CategorySet<Self::Category>>;

    /// Number of fitted categories.
    fn n_categories(&self) -> Result<usize> {
        Ok(self.categories()?.len())
    }

    /// Converts samples to label codes.
    fn transform_to_labels(&self, samples: &Self::Samples) -> Result<Self::Labels>;

    /// Converts label codes to one-hot rows.
    fn transform_from_labels(&self, labels: &Self::Labels) -> Result<Self::Encoded>;

    /// Converts one-hot rows to label codes.
    fn inverse_to_labels(&self, encoded: ArrayViewD<'_, u8>) -> Result<Self::Labels>;

    /// Converts label codes to categories.
    fn inverse_from_labels(&self, labels: &Self::Labels) -> Result<Self::Inverted>;

    /// Converts samples to one-hot rows.
    fn transform(&self, samples: &Self::Samples) -> Result<Self::Encoded> {
        self.transform_from_labels(&self.transform_to_labels(samples)?)
    }

    /// Converts one-hot rows back to categories.
    fn inverse(&self, encoded: ArrayViewD<'_, u8>) -> Result<Self::Inverted> {
        self.inverse_from_labels(&self.inverse_to_labels(encoded)?)
    }
}

/// Reads an encoder's optional category set.
pub(crate) fn fitted<T>(categories: &Option<CategorySet<T>>) -> Result<&CategorySet<T>> {
    categories
        .as_ref()
        .ok_or(AnteroError::NotFitted("call fit before using the categories"))
}

/// Writes `name` followed by the categories, or a note when unfitted.
pub(crate) fn describe<T: std::fmt::Debug>(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    categories: &Option<CategorySet<T>>,
) -> std::fmt::Result {
    match categories {
        Some(set) => write!(f, "{} with categories:\n{:?}", name, set.values()),
        None => write!(f, "{} (not fitted)", name),
    }
}
