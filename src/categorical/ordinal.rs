//! Equal-width binning of ordinal data into categories.

use crate::categorical::{Categorical, CategorySet, MISSING_CODE};
use crate::error::{AnteroError, Result};
use ndarray::{Array1, ArrayView1};

/// Bins `y` into `n_categories` equal-width categories.
///
/// The maximum falls into the last bin. Categories are named by their bin
/// centers, rounded to one decimal beyond the bin width's magnitude; NaN
/// values get code `-1`.
pub fn ordinal_categorical(
    y: ArrayView1<'_, f64>,
    n_categories: usize,
) -> Result<Categorical<String>> {
    if n_categories == 0 {
        return Err(AnteroError::Config(
            "number of categories must be positive".to_string(),
        ));
    }

    let finite = y.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return Err(AnteroError::EmptyInput("no finite values to bin".to_string()));
    }
    if min == max {
        return Err(AnteroError::EmptyInput(
            "values span a zero-width range".to_string(),
        ));
    }

    let width = (max - min) / n_categories as f64;
    let last = n_categories as i64 - 1;
    let codes: Array1<i64> = y
        .iter()
        .map(|&v| {
            if v.is_finite() {
                (((v - min) / width).floor() as i64).min(last)
            } else {
                MISSING_CODE
            }
        })
        .collect();

    let decimals = 1 - width.log10().trunc() as i32;
    let names = (0..n_categories)
        .map(|i| bin_name((i as f64 + 0.5) * width + min, decimals))
        .collect();

    Categorical::from_codes(codes, CategorySet::from_unique(names)?)
}

/// Rounds half to even at `decimals` places and prints the shortest form.
fn bin_name(center: f64, decimals: i32) -> String {
    let rounded = if decimals >= 0 {
        let scale = 10f64.powi(decimals);
        (center * scale).round_ties_even() / scale
    } else {
        let scale = 10f64.powi(-decimals);
        (center / scale).round_ties_even() * scale
    };
    // -0.0 prints as "-0"
    format!("{}", rounded + 0.0)
}
