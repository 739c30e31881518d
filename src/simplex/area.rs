//! Triangle search for surface topologies.
//!
//! The query is projected onto the plane of the triangle, and each weight
//! is the area of the sub-triangle opposite a corner divided by the full
//! area. The sub-triangle's own normal is dotted with the triangle normal
//! so that a projection outside an edge yields a negative weight.
use num_traits::Float;

use super::{tolerance, Scan, Weight};
use crate::geometry::{area, dot, sub};

/// Add a third corner to segment AB: the nearest following candidate
/// that forms a non-degenerate triangle containing the projected query.
pub(crate) fn extend<T: Float>(scan: &Scan<'_, T>, prev: &[Weight<T>; 2]) -> Option<[Weight<T>; 3]> {
    let tol = tolerance::<T>();
    let (ra, rb) = (prev[0].rank, prev[1].rank);
    let a = scan.point(ra);
    let b = scan.point(rb);

    // Scale reference for collinearity. This is A.B rather than |AB|^2,
    // which makes the threshold depend on where the points sit relative
    // to the origin.
    let scale = dot(a, b);

    for rc in rb + 1..scan.len() {
        let c = scan.point(rc);
        let (abc, dir) = area(a, b, c);
        if abc <= tol * scale {
            continue;
        }

        let [wa, wb, wc] = weights(a, b, c, abc, &dir, &scan.query);
        if wa >= -tol && wb >= -tol && wc >= -tol {
            return Some([
                Weight { coef: wa, rank: ra },
                Weight { coef: wb, rank: rb },
                Weight { coef: wc, rank: rc },
            ]);
        }
    }

    None
}

/// Signed-area barycentric weights of `q` projected onto the plane of abc.
///
/// `abc` and `dir` are the area and unit normal of the triangle. A zero
/// area produces NaN weights.
#[inline]
fn weights<T: Float>(a: &[T; 3], b: &[T; 3], c: &[T; 3], abc: T, dir: &[T; 3], q: &[T; 3]) -> [T; 3] {
    // Drop the component of AQ along the normal
    let h = dot(dir, &sub(q, a));
    let p = [q[0] - dir[0] * h, q[1] - dir[1] * h, q[2] - dir[2] * h];

    let signed = |u: &[T; 3], v: &[T; 3]| {
        let (sub_area, sub_dir) = area(u, v, &p);
        sub_area / abc * dot(&sub_dir, dir)
    };

    [signed(b, c), signed(c, a), signed(a, b)]
}
