//! Segment search for curve topologies.
//!
//! The query is projected onto the line through the two corners; the
//! weights are the normalized distances of that projection from the
//! opposite corner, so both are non-negative exactly when the projection
//! falls inside the segment.
use num_traits::Float;

use super::{tolerance, Scan, Weight};
use crate::geometry::{dot, sub};

/// Pair the anchor with the nearest following candidate whose segment
/// brackets the projection of the query.
pub(crate) fn extend<T: Float>(scan: &Scan<'_, T>, prev: &[Weight<T>; 1]) -> Option<[Weight<T>; 2]> {
    let tol = tolerance::<T>();
    let ra = prev[0].rank;
    let a = scan.point(ra);
    let q = &scan.query;

    for rb in ra + 1..scan.len() {
        let b = scan.point(rb);
        let (wa, wb) = weights(a, b, q);

        if wa >= -tol && wb >= -tol {
            return Some([Weight { coef: wa, rank: ra }, Weight { coef: wb, rank: rb }]);
        }
    }

    None
}

/// 1D barycentric weights of the projection of `q` onto segment ab.
///
/// A zero-length segment produces NaN weights, which never pass the
/// tolerance check.
#[inline]
fn weights<T: Float>(a: &[T; 3], b: &[T; 3], q: &[T; 3]) -> (T, T) {
    let ab = sub(b, a);
    let abab = dot(&ab, &ab);
    let wa = dot(&sub(b, q), &ab) / abab;
    let wb = dot(&sub(q, a), &ab) / abab;

    (wa, wb)
}
