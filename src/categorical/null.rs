//! Null test for category values.

use ordered_float::OrderedFloat;

/// Values that can stand for a missing sample on their own.
///
/// Float categories are NaN-valued nulls even when wrapped in `Some`, so
/// the NaN-aware encoder skips them on fit and encodes them as missing.
pub trait IsNull {
    /// Whether the value is a null. Defaults to `false`.
    fn is_null(&self) -> bool {
        false
    }
}

impl<T: IsNull + ?Sized> IsNull for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

macro_rules! never_null {
    ($($t:ty),* $(,)?) => {
        $(impl IsNull for $t {})*
    };
}

never_null!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

macro_rules! nan_null {
    ($($t:ty),*) => {
        $(
            impl IsNull for $t {
                fn is_null(&self) -> bool {
                    self.is_nan()
                }
            }

            impl IsNull for OrderedFloat<$t> {
                fn is_null(&self) -> bool {
                    self.0.is_nan()
                }
            }
        )*
    };
}

nan_null!(f32, f64);
