//! Zero-dimensional figure: the nearest candidate alone.
use num_traits::Float;

use super::{Scan, Weight};

/// Full weight on the nearest candidate, or `None` if there are no candidates.
#[inline]
pub(crate) fn anchor<T: Float>(scan: &Scan<'_, T>) -> Option<[Weight<T>; 1]> {
    if scan.len() == 0 {
        return None;
    }

    Some([Weight {
        coef: T::one(),
        rank: 0,
    }])
}
