//! The fitted, ordered collection of unique category values.

use crate::error::{AnteroError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// An ordered sequence of unique categories.
///
/// The position of a category is its label code. A set is immutable once
/// built; re-fitting an encoder replaces it entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet<T> {
    values: Vec<T>,
    index: BTreeMap<T, usize>,
}

impl<T: Ord + Clone> CategorySet<T> {
    /// Builds the set of unique values in `samples`, in ascending order.
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut values: Vec<T> = samples.into_iter().cloned().collect();
        values.sort();
        values.dedup();

        let index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        Self { values, index }
    }

    /// Builds a set from already-unique values, keeping their order.
    pub fn from_unique(values: Vec<T>) -> Result<Self>
    where
        T: fmt::Debug,
    {
        let mut index = BTreeMap::new();
        for (i, v) in values.iter().enumerate() {
            if index.insert(v.clone(), i).is_some() {
                return Err(AnteroError::DuplicateCategory(format!("{:?}", v)));
            }
        }

        Ok(Self { values, index })
    }

    /// Returns the label code of `value`, if it is a category.
    #[inline]
    pub fn position(&self, value: &T) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Returns true if `value` is a category.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the label code of `value`, defaulting to 0 for unseen values.
    #[inline]
    pub fn label_or_first(&self, value: &T) -> usize {
        self.position(value).unwrap_or(0)
    }
}

impl<T> CategorySet<T> {
    /// Number of categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no categories.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The categories in label order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Looks up the category for a label code.
    pub fn category(&self, label: usize) -> Result<&T> {
        self.values.get(label).ok_or(AnteroError::LabelOutOfRange {
            label,
            n_categories: self.values.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples_sorted_unique() {
        let set = CategorySet::from_samples(&["c", "a", "b", "a", "c"]);
        assert_eq!(set.values(), &["a", "b", "c"]);
        assert_eq!(set.position(&"b"), Some(1));
        assert_eq!(set.position(&"z"), None);
    }

    #[test]
    fn test_from_unique_keeps_order() {
        let set = CategorySet::from_unique(vec!["z", "a"]).unwrap();
        assert_eq!(set.position(&"z"), Some(0));
        assert_eq!(set.position(&"a"), Some(1));
    }

    #[test]
    fn test_from_unique_rejects_duplicates() {
        let err = CategorySet::from_unique(vec![1, 2, 1]).unwrap_err();
        assert!(matches!(err, AnteroError::DuplicateCategory(_)));
    }

    #[test]
    fn test_label_or_first() {
        let set = CategorySet::from_samples(&[10, 20, 30]);
        assert_eq!(set.label_or_first(&30), 2);
        assert_eq!(set.label_or_first(&99), 0);
    }

    #[test]
    fn test_category_out_of_range() {
        let set = CategorySet::from_samples(&[1, 2]);
        assert_eq!(*set.category(1).unwrap(), 2);
        assert!(matches!(
            set.category(2),
            Err(AnteroError::LabelOutOfRange { label: 2, n_categories: 2 })
        ));
    }
}
