//! Nearest-neighbor search over a sample set by linear scan.
//! See individual modules for more detailed documentation.

pub mod candidates;

pub use candidates::{find, find_k, CandidateList, MAX_CANDIDATES};

use num_traits::Float;

use crate::geometry::dist_squared;
use crate::samples::SampleSet;

/// Index of the sample closest to `query`, or `None` for an empty set.
///
/// On a tie, the sample that appears first in the set wins.
pub fn closest<T: Float>(query: &[T; 3], samples: &SampleSet<T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, sample) in samples.iter().enumerate() {
        let d = dist_squared(query, &sample.coordinate);
        match best {
            Some((_, near)) if d >= near || d.is_nan() => {}
            _ => best = Some((i, d)),
        }
    }

    best.map(|(i, _)| i)
}
