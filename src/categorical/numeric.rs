//! Numeric core shared by all encoders: identity-row lookup, argmax
//! inversion and masked scatter.

use crate::error::{AnteroError, Result};
use ndarray::{
    Array, Array1, Array2, ArrayD, ArrayView, ArrayView1, ArrayView2, ArrayViewD, Axis, Ix1, Ix2,
    IxDyn, RemoveAxis,
};

/// Builds an array of `shape` filled with `fill`, then writes the outer-axis
/// slices of `values`, in order, at the positions where `mask` is true.
pub(crate) fn mask_assign<A, D>(
    shape: D,
    mask: &[bool],
    values: ArrayView<'_, A, D>,
    fill: A,
) -> Array<A, D>
where
    A: Clone,
    D: RemoveAxis,
{
    debug_assert_eq!(mask.len(), shape[0]);
    debug_assert_eq!(
        mask.iter().filter(|&&m| m).count(),
        values.len_of(Axis(0))
    );

    let mut array = Array::from_elem(shape, fill);
    let targets = mask.iter().enumerate().filter_map(|(i, &m)| m.then_some(i));
    for (i, value) in targets.zip(values.outer_iter()) {
        array.index_axis_mut(Axis(0), i).assign(&value);
    }
    array
}

/// One-hot encodes `labels` as rows of the identity matrix.
///
/// The result has shape `outer_shape + (n_categories,)`; labels fill the
/// rows in row-major order.
pub(crate) fn one_hot<I>(
    labels: I,
    outer_shape: &[usize],
    n_categories: usize,
) -> Result<ArrayD<u8>>
where
    I: IntoIterator<Item = usize>,
{
    let mut shape = outer_shape.to_vec();
    shape.push(n_categories);
    let last = Axis(shape.len() - 1);

    let mut encoded = ArrayD::<u8>::zeros(IxDyn(&shape));
    for (mut row, label) in encoded.lanes_mut(last).into_iter().zip(labels) {
        let cell = row
            .get_mut(label)
            .ok_or(AnteroError::LabelOutOfRange { label, n_categories })?;
        *cell = 1;
    }
    Ok(encoded)
}

/// Index of the first maximum; 0 for an all-zero or empty row.
pub(crate) fn argmax(row: ArrayView1<'_, u8>) -> usize {
    let mut best = 0;
    let mut best_value = None;
    for (i, &v) in row.iter().enumerate() {
        if best_value.map_or(true, |b| v > b) {
            best = i;
            best_value = Some(v);
        }
    }
    best
}

/// Argmax over the last axis of `encoded`.
pub(crate) fn argmax_last_axis(encoded: ArrayViewD<'_, u8>) -> Result<ArrayD<usize>> {
    if encoded.ndim() == 0 {
        return Err(AnteroError::Shape(
            "Encoded data needs a category axis.".to_string(),
        ));
    }
    let last = Axis(encoded.ndim() - 1);
    Ok(encoded.map_axis(last, argmax))
}

/// One-hot rows for the `known` positions, all-zero rows elsewhere.
///
/// `codes` holds the labels of the known positions, in order.
pub(crate) fn masked_one_hot(
    known: &[bool],
    codes: &[usize],
    n_categories: usize,
) -> Result<Array2<u8>> {
    let encoded = one_hot(codes.iter().copied(), &[codes.len()], n_categories)?
        .into_dimensionality::<Ix2>()?;
    Ok(mask_assign(
        Ix2(known.len(), n_categories),
        known,
        encoded.view(),
        0,
    ))
}

/// Inverts one-hot rows, writing `fill` for rows that sum to zero.
pub(crate) fn masked_argmax<A, F>(rows: ArrayView2<'_, u8>, to_label: F, fill: A) -> Array1<A>
where
    A: Clone,
    F: Fn(usize) -> A,
{
    let known: Vec<bool> = rows
        .outer_iter()
        .map(|row| row.iter().any(|&v| v != 0))
        .collect();
    let inverted: Array1<A> = rows
        .outer_iter()
        .zip(&known)
        .filter(|(_, &k)| k)
        .map(|(row, _)| to_label(argmax(row)))
        .collect();

    mask_assign(Ix1(known.len()), &known, inverted.view(), fill)
}

/// Views labels as a vector, rejecting any other dimensionality.
pub(crate) fn expect_vector<A>(labels: &ArrayD<A>) -> Result<ArrayView1<'_, A>> {
    if labels.ndim() != 1 {
        return Err(AnteroError::Shape(format!(
            "Encoder only accepts 1-dimensional data, got {} dimensions.",
            labels.ndim()
        )));
    }
    Ok(labels.view().into_dimensionality::<Ix1>()?)
}

/// Views one-hot data as a matrix of rows, rejecting any other dimensionality.
pub(crate) fn expect_rows(encoded: ArrayViewD<'_, u8>) -> Result<ArrayView2<'_, u8>> {
    if encoded.ndim() != 2 {
        return Err(AnteroError::Shape(format!(
            "Encoder only accepts one-hot rows of 1-dimensional data, got {} dimensions.",
            encoded.ndim()
        )));
    }
    Ok(encoded.into_dimensionality::<Ix2>()?)
}

/// Converts a floating-point label to a code.
pub(crate) fn float_code(label: f64) -> Result<usize> {
    if label.is_finite() && label >= 0.0 && label.fract() == 0.0 {
        Ok(label as usize)
    } else {
        Err(AnteroError::InvalidLabel(label))
    }
}
