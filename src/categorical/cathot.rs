//! One-hot encoder built around [`Categorical`] data and its `-1` code.

use crate::categorical::numeric::{expect_rows, expect_vector, masked_argmax, masked_one_hot};
use crate::categorical::{
    describe, fitted, Categorical, CategoricalEncoder, CategorySet, LabeledFrame, MISSING_CODE,
};
use crate::error::{AnteroError, Result};
use log::debug;
use ndarray::{ArrayD, ArrayViewD};
use std::fmt;

/// One-hot encoder for [`Categorical`] data.
///
/// Code `-1` marks a missing category: it transforms to an all-zero row
/// and all-zero rows invert to it. Values outside the fitted categories
/// are re-coded to `-1` before encoding. Only accepts one-dimensional data.
///
/// Label conversion is the job of [`Categorical::codes`] and
/// [`Categorical::from_codes`]; `transform_to_labels` and
/// `inverse_from_labels` are unsupported.
///
/// ```rust
/// use antero::{CatHotEncoder, Categorical, CategoricalEncoder};
///
/// let s = Categorical::new(&[None, Some("c"), Some("d"), Some("a"), Some("b"), Some("c")]);
/// let mut ch = CatHotEncoder::new();
/// ch.fit(&s);
///
/// let frame = ch.transform(&s).unwrap();
/// assert_eq!(frame.row(0).unwrap().sum(), 0);
///
/// let inverted = ch.inverse(frame.as_encoded()).unwrap();
/// assert_eq!(inverted, s);
/// ```
#[derive(Debug, Clone)]
pub struct CatHotEncoder<T> {
    categories: Option<CategorySet<T>>,
}

impl<T> CatHotEncoder<T> {
    /// Creates an unfitted encoder.
    pub fn new() -> Self {
        Self { categories: None }
    }

    /// Returns true once `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }
}

impl<T> Default for CatHotEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> CategoricalEncoder for CatHotEncoder<T> {
    type Category = T;
    type Samples = Categorical<T>;
    type Labels = ArrayD<i64>;
    type Encoded = LabeledFrame<T>;
    type Inverted = Categorical<T>;

    /// Takes the category dictionary of `samples` as is.
    fn fit(&mut self, samples: &Categorical<T>) -> &mut Self {
        let categories = samples.categories().clone();
        debug!("Fitted categorical encoder with {} categories", categories.len());
        self.categories = Some(categories);
        self
    }

    fn categories(&self) -> Result<&CategorySet<T>> {
        fitted(&self.categories)
    }

    fn transform_to_labels(&self, _samples: &Categorical<T>) -> Result<ArrayD<i64>> {
        Err(AnteroError::Unsupported {
            operation: "transform_to_labels",
            alternative: "Categorical::set_categories followed by Categorical::codes",
        })
    }

    fn transform_from_labels(&self, labels: &ArrayD<i64>) -> Result<LabeledFrame<T>> {
        let categories = self.categories()?;
        let labels = expect_vector(labels)?;

        let known: Vec<bool> = labels.iter().map(|&c| c != MISSING_CODE).collect();
        let codes = labels
            .iter()
            .filter(|&&c| c != MISSING_CODE)
            .map(|&c| usize::try_from(c).map_err(|_| AnteroError::InvalidCode(c)))
            .collect::<Result<Vec<usize>>>()?;

        let encoded = masked_one_hot(&known, &codes, categories.len())?;
        LabeledFrame::new(categories.values().to_vec(), encoded)
    }

    fn inverse_to_labels(&self, encoded: ArrayViewD<'_, u8>) -> Result<ArrayD<i64>> {
        let rows = expect_rows(encoded)?;
        Ok(masked_argmax(rows, |label| label as i64, MISSING_CODE).into_dyn())
    }

    fn inverse_from_labels(&self, _labels: &ArrayD<i64>) -> Result<Categorical<T>> {
        Err(AnteroError::Unsupported {
            operation: "inverse_from_labels",
            alternative: "Categorical::from_codes",
        })
    }

    /// Re-codes `samples` against the fitted categories, then encodes the codes.
    fn transform(&self, samples: &Categorical<T>) -> Result<LabeledFrame<T>> {
        let recoded = samples.set_categories(self.categories()?);
        self.transform_from_labels(&recoded.codes().clone().into_dyn())
    }

    fn inverse(&self, encoded: ArrayViewD<'_, u8>) -> Result<Categorical<T>> {
        let codes = expect_vector(&self.inverse_to_labels(encoded)?)?.to_owned();
        Categorical::from_codes(codes, self.categories()?.clone())
    }
}

impl<T: fmt::Debug> fmt::Display for CatHotEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, "CatHotEncoder", &self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, IxDyn};

    fn samples() -> Categorical<&'static str> {
        Categorical::new(&[None, Some("c"), Some("d"), Some("a"), Some("b"), Some("c"), Some("c")])
    }

    fn fitted_encoder() -> CatHotEncoder<&'static str> {
        let mut ch = CatHotEncoder::new();
        ch.fit(&samples());
        ch
    }

    #[test]
    fn test_fit_takes_scheme_categories() {
        let scheme = CategorySet::from_unique(vec!["z", "a"]).unwrap();
        let data = Categorical::from_codes(array![0, 1, -1], scheme).unwrap();

        let mut ch = CatHotEncoder::new();
        ch.fit(&data);
        assert_eq!(ch.categories().unwrap().values(), &["z", "a"]);

        let frame = ch.transform(&data).unwrap();
        assert_eq!(frame.columns(), &["z", "a"]);
        assert_eq!(frame.data(), &array![[1u8, 0], [0, 1], [0, 0]]);
    }

    #[test]
    fn test_transform() {
        let ch = fitted_encoder();
        let frame = ch.transform(&samples()).unwrap();

        assert_eq!(frame.columns(), &["a", "b", "c", "d"]);
        assert_eq!(frame.row(0).unwrap().to_vec(), vec![0, 0, 0, 0]);
        assert_eq!(frame.row(1).unwrap().to_vec(), vec![0, 0, 1, 0]);
        assert_eq!(frame.row(3).unwrap().to_vec(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_transform_recodes_unknown_categories() {
        let ch = fitted_encoder();
        let other = Categorical::new(&[Some("x"), Some("b")]);
        let frame = ch.transform(&other).unwrap();
        assert_eq!(frame.data(), &array![[0u8, 0, 0, 0], [0, 1, 0, 0]]);
    }

    #[test]
    fn test_missing_code_round_trip() {
        let ch = fitted_encoder();
        let frame = ch.transform_from_labels(&array![-1i64, 2].into_dyn()).unwrap();
        let codes = ch.inverse_to_labels(frame.as_encoded()).unwrap();
        assert_eq!(codes, array![-1i64, 2].into_dyn());
    }

    #[test]
    fn test_round_trip() {
        let ch = fitted_encoder();
        let frame = ch.transform(&samples()).unwrap();
        let inverted = ch.inverse(frame.as_encoded()).unwrap();
        assert_eq!(inverted, samples());
        assert_eq!(inverted.get(0), None);
    }

    #[test]
    fn test_unsupported_label_paths() {
        let ch = fitted_encoder();
        assert!(matches!(
            ch.transform_to_labels(&samples()),
            Err(AnteroError::Unsupported { operation: "transform_to_labels", .. })
        ));

        let err = ch.inverse_from_labels(&array![0i64].into_dyn()).unwrap_err();
        assert!(err.to_string().contains("Categorical::from_codes"));
    }

    #[test]
    fn test_rejects_invalid_codes() {
        let ch = fitted_encoder();
        assert!(matches!(
            ch.transform_from_labels(&array![-2i64].into_dyn()),
            Err(AnteroError::InvalidCode(-2))
        ));
        assert!(ch
            .transform_from_labels(&ArrayD::<i64>::zeros(IxDyn(&[1, 1])))
            .is_err());
    }

    #[test]
    fn test_not_fitted() {
        let ch = CatHotEncoder::<&str>::new();
        assert!(matches!(ch.transform(&samples()), Err(AnteroError::NotFitted(_))));
    }
}
