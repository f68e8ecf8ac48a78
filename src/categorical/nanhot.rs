//! One-hot encoder treating null samples and unseen categories as missing.

use crate::categorical::numeric::{
    expect_rows, expect_vector, float_code, mask_assign, masked_argmax, masked_one_hot,
};
use crate::categorical::{
    describe, fitted, CategoricalEncoder, CategorySet, IsNull, LabeledFrame, LabeledSeries,
};
use crate::error::Result;
use log::debug;
use ndarray::{Array1, ArrayD, ArrayViewD, Ix1};
use std::fmt;

/// One-hot encoder that handles missing values.
///
/// Null samples and samples outside the fitted categories get a NaN label
/// and an all-zero row; all-zero rows invert to null. Only accepts
/// one-dimensional samples.
///
/// ```rust
/// use antero::{CategoricalEncoder, LabeledSeries, NanHotEncoder};
///
/// let mut nh = NanHotEncoder::new();
/// nh.fit(&LabeledSeries::from_values(["a", "b", "c", "d"]));
///
/// let samples = LabeledSeries::new(vec![None, Some("c"), Some("d"), Some("a")]);
/// let frame = nh.transform(&samples).unwrap();
/// assert_eq!(frame.columns(), &["a", "b", "c", "d"]);
///
/// let inverted = nh.inverse(frame.as_encoded()).unwrap();
/// assert_eq!(inverted, samples);
/// ```
#[derive(Debug, Clone)]
pub struct NanHotEncoder<T> {
    categories: Option<CategorySet<T>>,
}

impl<T> NanHotEncoder<T> {
    /// Creates an unfitted encoder.
    pub fn new() -> Self {
        Self { categories: None }
    }

    /// Returns true once `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }
}

impl<T> Default for NanHotEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + IsNull> CategoricalEncoder for NanHotEncoder<T> {
    type Category = T;
    type Samples = LabeledSeries<T>;
    type Labels = ArrayD<f64>;
    type Encoded = LabeledFrame<T>;
    type Inverted = LabeledSeries<T>;

    /// Fits on the non-null samples; nulls and NaN values never become
    /// categories.
    fn fit(&mut self, samples: &LabeledSeries<T>) -> &mut Self {
        let categories =
            CategorySet::from_samples(samples.iter().flatten().filter(|v| !v.is_null()));
        debug!(
            "Fitted NaN-aware encoder with {} categories ({} nulls skipped)",
            categories.len(),
            samples.null_count()
        );
        self.categories = Some(categories);
        self
    }

    fn categories(&self) -> Result<&CategorySet<T>> {
        fitted(&self.categories)
    }

    fn transform_to_labels(&self, samples: &LabeledSeries<T>) -> Result<ArrayD<f64>> {
        let categories = self.categories()?;

        let known: Vec<bool> = samples
            .iter()
            .map(|v| v.map_or(false, |v| !v.is_null() && categories.contains(v)))
            .collect();
        let labels: Array1<f64> = samples
            .iter()
            .flatten()
            .filter(|v| !v.is_null())
            .filter_map(|v| categories.position(v))
            .map(|label| label as f64)
            .collect();

        Ok(mask_assign(Ix1(samples.len()), &known, labels.view(), f64::NAN).into_dyn())
    }

    fn transform_from_labels(&self, labels: &ArrayD<f64>) -> Result<LabeledFrame<T>> {
        let categories = self.categories()?;
        let labels = expect_vector(labels)?;

        let known: Vec<bool> = labels.iter().map(|l| !l.is_nan()).collect();
        let codes = labels
            .iter()
            .filter(|l| !l.is_nan())
            .map(|&l| float_code(l))
            .collect::<Result<Vec<usize>>>()?;

        let encoded = masked_one_hot(&known, &codes, categories.len())?;
        LabeledFrame::new(categories.values().to_vec(), encoded)
    }

    fn inverse_to_labels(&self, encoded: ArrayViewD<'_, u8>) -> Result<ArrayD<f64>> {
        let rows = expect_rows(encoded)?;
        Ok(masked_argmax(rows, |label| label as f64, f64::NAN).into_dyn())
    }

    /// Replaces non-null labels by their category; null labels stay null.
    fn inverse_from_labels(&self, labels: &ArrayD<f64>) -> Result<LabeledSeries<T>> {
        let categories = self.categories()?;
        labels
            .iter()
            .map(|&label| {
                if label.is_nan() {
                    return Ok(None);
                }
                categories.category(float_code(label)?).cloned().map(Some)
            })
            .collect::<Result<Vec<Option<T>>>>()
            .map(LabeledSeries::new)
    }
}

impl<T: fmt::Debug> fmt::Display for NanHotEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, "NanHotEncoder", &self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorical::OneHotEncoder;
    use crate::error::AnteroError;
    use ndarray::{array, Array2, IxDyn};
    use ordered_float::OrderedFloat;

    fn fitted_encoder() -> NanHotEncoder<&'static str> {
        let mut nh = NanHotEncoder::new();
        nh.fit(&LabeledSeries::from_values(["a", "b", "c", "d"]));
        nh
    }

    #[test]
    fn test_fit_skips_nulls() {
        let mut nh = NanHotEncoder::new();
        nh.fit(&LabeledSeries::new(vec![Some(2), None, Some(1), None]));
        assert_eq!(nh.categories().unwrap().values(), &[1, 2]);
    }

    #[test]
    fn test_nan_floats_are_missing() {
        let series = |xs: &[f64]| -> LabeledSeries<OrderedFloat<f64>> {
            xs.iter().map(|&x| Some(OrderedFloat(x))).collect()
        };

        let mut nh = NanHotEncoder::new();
        nh.fit(&series(&[1.0, f64::NAN, 2.0]));
        assert_eq!(
            nh.categories().unwrap().values(),
            &[OrderedFloat(1.0), OrderedFloat(2.0)]
        );

        let frame = nh.transform(&series(&[f64::NAN, 2.0])).unwrap();
        assert_eq!(frame.data(), &array![[0u8, 0], [0, 1]]);

        let inverted = nh.inverse(frame.as_encoded()).unwrap();
        assert_eq!(inverted.is_null(), vec![true, false]);
        assert_eq!(inverted.get(1), Some(&OrderedFloat(2.0)));
    }

    #[test]
    fn test_not_fitted() {
        let nh: NanHotEncoder<&str> = NanHotEncoder::new();
        assert!(matches!(nh.categories(), Err(AnteroError::NotFitted(_))));
        assert!(matches!(
            nh.transform(&LabeledSeries::from_values(["a"])),
            Err(AnteroError::NotFitted(_))
        ));
        assert!(matches!(
            nh.inverse(Array2::<u8>::zeros((1, 1)).into_dyn().view()),
            Err(AnteroError::NotFitted(_))
        ));
    }

    #[test]
    fn test_transform_with_null() {
        let nh = fitted_encoder();
        let frame = nh
            .transform(&LabeledSeries::new(vec![None, Some("c"), Some("d"), Some("a")]))
            .unwrap();

        assert_eq!(frame.columns(), &["a", "b", "c", "d"]);
        assert_eq!(
            frame.data(),
            &array![[0u8, 0, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1], [1, 0, 0, 0]]
        );
    }

    #[test]
    fn test_unseen_is_missing() {
        let nh = fitted_encoder();
        let labels = nh
            .transform_to_labels(&LabeledSeries::from_values(["z", "b"]))
            .unwrap();
        assert!(labels[[0]].is_nan());
        assert_eq!(labels[[1]], 1.0);
    }

    #[test]
    fn test_all_null_round_trip() {
        let nh = fitted_encoder();
        let frame = nh.transform(&LabeledSeries::new(vec![None; 3])).unwrap();
        assert_eq!(frame.data(), &Array2::<u8>::zeros((3, 4)));

        let inverted = nh.inverse(frame.as_encoded()).unwrap();
        assert_eq!(inverted.null_count(), 3);
    }

    #[test]
    fn test_disagrees_with_base_on_zero_rows() {
        let zeros = ArrayD::<u8>::zeros(IxDyn(&[2, 4]));

        let mut oh = OneHotEncoder::new();
        oh.fit(&array!["a", "b", "c", "d"].into_dyn());
        assert_eq!(oh.inverse(zeros.view()).unwrap(), array!["a", "a"].into_dyn());

        let nh = fitted_encoder();
        assert_eq!(nh.inverse(zeros.view()).unwrap(), LabeledSeries::new(vec![None, None]));
    }

    #[test]
    fn test_inverse_to_labels_fills_nan() {
        let nh = fitted_encoder();
        let encoded = array![[0u8, 0, 0, 0], [0, 0, 1, 0]].into_dyn();
        let labels = nh.inverse_to_labels(encoded.view()).unwrap();
        assert!(labels[[0]].is_nan());
        assert_eq!(labels[[1]], 2.0);
    }

    #[test]
    fn test_rejects_multidimensional_labels() {
        let nh = fitted_encoder();
        let labels = ArrayD::<f64>::zeros(IxDyn(&[2, 2]));
        assert!(matches!(
            nh.transform_from_labels(&labels),
            Err(AnteroError::Shape(_))
        ));

        let encoded = ArrayD::<u8>::zeros(IxDyn(&[2, 2, 4]));
        assert!(nh.inverse_to_labels(encoded.view()).is_err());
    }

    #[test]
    fn test_rejects_fractional_label() {
        let nh = fitted_encoder();
        let err = nh
            .transform_from_labels(&array![0.5].into_dyn())
            .unwrap_err();
        assert!(matches!(err, AnteroError::InvalidLabel(_)));
    }

    #[test]
    fn test_inverse_from_labels() {
        let nh = fitted_encoder();
        let series = nh
            .inverse_from_labels(&array![3.0, f64::NAN, 0.0].into_dyn())
            .unwrap();
        assert_eq!(series, LabeledSeries::new(vec![Some("d"), None, Some("a")]));
    }

    #[test]
    fn test_display() {
        assert!(fitted_encoder().to_string().starts_with("NanHotEncoder with categories:"));
    }
}
