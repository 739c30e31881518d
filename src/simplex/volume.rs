//! Tetrahedron search for volume topologies.
use num_traits::Float;

use super::{tolerance, Scan, Weight};
use crate::geometry::{dist_squared, volume};

/// Add a fourth corner to triangle ABC: the nearest following candidate
/// that forms a non-degenerate tetrahedron containing the query.
///
/// Weights are the signed volumes of the tetrahedra made by substituting
/// the query for each corner in turn, over the full signed volume.
pub(crate) fn extend<T: Float>(scan: &Scan<'_, T>, prev: &[Weight<T>; 3]) -> Option<[Weight<T>; 4]> {
    let tol = tolerance::<T>();
    let (ra, rb, rc) = (prev[0].rank, prev[1].rank, prev[2].rank);
    let a = scan.point(ra);
    let b = scan.point(rb);
    let c = scan.point(rc);
    let q = &scan.query;

    // Coplanarity is judged against the cube of edge AB
    let ab2 = dist_squared(a, b);
    let ab3 = ab2 * ab2.sqrt();

    for rd in rc + 1..scan.len() {
        let d = scan.point(rd);
        let abcd = volume(a, b, c, d);
        if abcd.abs() <= tol * ab3 {
            continue;
        }

        let wa = volume(q, b, c, d) / abcd;
        let wb = volume(a, q, c, d) / abcd;
        let wc = volume(a, b, q, d) / abcd;
        let wd = volume(a, b, c, q) / abcd;

        if wa >= -tol && wb >= -tol && wc >= -tol && wd >= -tol {
            return Some([
                Weight { coef: wa, rank: ra },
                Weight { coef: wb, rank: rb },
                Weight { coef: wc, rank: rc },
                Weight { coef: wd, rank: rd },
            ]);
        }
    }

    None
}
