//! Labeled containers returned and accepted by the masked encoders.

use crate::categorical::{CategorySet, MISSING_CODE};
use crate::error::{AnteroError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewD, Axis};

/// A one-dimensional sequence of nullable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledSeries<T> {
    values: Vec<Option<T>>,
}

impl<T> LabeledSeries<T> {
    /// Creates a series from nullable values.
    pub fn new(values: Vec<Option<T>>) -> Self {
        Self { values }
    }

    /// Creates a series without null entries.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        values.into_iter().map(Some).collect()
    }

    /// Number of entries, null ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the value at `i`; `None` when null or out of bounds.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.values.get(i).and_then(Option::as_ref)
    }

    /// The nullable values.
    #[inline]
    pub fn values(&self) -> &[Option<T>] {
        &self.values
    }

    /// Iterates over the nullable values.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.values.iter().map(Option::as_ref)
    }

    /// Null mask: true where the entry is missing.
    pub fn is_null(&self) -> Vec<bool> {
        self.values.iter().map(Option::is_none).collect()
    }

    /// Number of null entries.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

impl<T> FromIterator<Option<T>> for LabeledSeries<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A one-hot matrix whose columns are labeled with category values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledFrame<T> {
    columns: Vec<T>,
    data: Array2<u8>,
}

impl<T> LabeledFrame<T> {
    /// Creates a frame; the number of labels must equal the column count.
    pub fn new(columns: Vec<T>, data: Array2<u8>) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(AnteroError::Shape(format!(
                "{} column labels for {} columns",
                columns.len(),
                data.ncols()
            )));
        }
        Ok(Self { columns, data })
    }

    /// Column labels.
    #[inline]
    pub fn columns(&self) -> &[T] {
        &self.columns
    }

    /// The encoded matrix.
    #[inline]
    pub fn data(&self) -> &Array2<u8> {
        &self.data
    }

    /// The encoded matrix as a dynamic-dimensional view, ready for `inverse`.
    pub fn as_encoded(&self) -> ArrayViewD<'_, u8> {
        self.data.view().into_dyn()
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Row `i` of the matrix.
    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, u8>> {
        (i < self.nrows()).then(|| self.data.row(i))
    }

    /// The column labeled `label`.
    pub fn column(&self, label: &T) -> Option<ArrayView1<'_, u8>>
    where
        T: PartialEq,
    {
        self.columns
            .iter()
            .position(|c| c == label)
            .map(|j| self.data.index_axis(Axis(1), j))
    }
}

/// Values stored as integer codes into a category dictionary.
///
/// Code `-1` marks an entry without a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorical<T> {
    categories: CategorySet<T>,
    codes: Array1<i64>,
}

impl<T: Ord + Clone> Categorical<T> {
    /// Builds a categorical from nullable values.
    ///
    /// Categories are the unique non-null values in ascending order.
    pub fn new(values: &[Option<T>]) -> Self {
        let categories = CategorySet::from_samples(values.iter().flatten());
        let codes = values
            .iter()
            .map(|v| match v {
                Some(v) => categories.position(v).map_or(MISSING_CODE, |c| c as i64),
                None => MISSING_CODE,
            })
            .collect();

        Self { categories, codes }
    }

    /// Builds a categorical from codes into `categories`.
    pub fn from_codes(codes: Array1<i64>, categories: CategorySet<T>) -> Result<Self> {
        let n = categories.len() as i64;
        if let Some(&bad) = codes.iter().find(|&&c| c < MISSING_CODE || c >= n) {
            return Err(AnteroError::InvalidCode(bad));
        }

        Ok(Self { categories, codes })
    }

    /// Re-codes the values against another category dictionary.
    ///
    /// Values absent from `categories` get code `-1`.
    pub fn set_categories(&self, categories: &CategorySet<T>) -> Self {
        let codes = self
            .iter()
            .map(|v| {
                v.and_then(|v| categories.position(v))
                    .map_or(MISSING_CODE, |c| c as i64)
            })
            .collect();

        Self {
            categories: categories.clone(),
            codes,
        }
    }

    /// The values as nullable clones.
    pub fn values(&self) -> Vec<Option<T>> {
        self.iter().map(|v| v.cloned()).collect()
    }
}

impl<T> Categorical<T> {
    /// The category dictionary.
    #[inline]
    pub fn categories(&self) -> &CategorySet<T> {
        &self.categories
    }

    /// The integer codes.
    #[inline]
    pub fn codes(&self) -> &Array1<i64> {
        &self.codes
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Gets the value at `i`; `None` for code `-1` or out of bounds.
    pub fn get(&self, i: usize) -> Option<&T> {
        let code = *self.codes.get(i)?;
        usize::try_from(code)
            .ok()
            .and_then(|c| self.categories.values().get(c))
    }

    /// Iterates over the values.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.codes.iter().map(|&code| {
            usize::try_from(code)
                .ok()
                .and_then(|c| self.categories.values().get(c))
        })
    }
}
