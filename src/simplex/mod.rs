//! Interpolation figures built from the nearest candidates: a point, a
//! segment, a triangle, or a tetrahedron, depending on the topology.
//!
//! Construction always starts from the nearest candidate (rank 0) and adds
//! one corner per dimension, scanning the remaining candidates in order of
//! increasing distance. A corner is accepted only when every barycentric
//! weight of the query is non-negative within [`TOLERANCE`], so the figure
//! brackets the query instead of extrapolating from it. Each stage fixes
//! the corners found so far and only searches for the next one.
//!
//! | Topology | Corners | Stages                    |
//! |----------|---------|---------------------------|
//! | Point    | 1       | point                     |
//! | Line     | 2       | point, line               |
//! | Area     | 3       | point, line, area         |
//! | Volume   | 4       | point, line, area, volume |
//!
//! Only the weights of the final stage are kept.

pub mod area;
pub mod line;
pub mod point;
pub mod volume;

use num_traits::Float;
use tracing::{debug, trace};

use crate::error::{QueryError, Result};
use crate::nearest::CandidateList;
use crate::samples::{SampleSet, Topology};

/// Lower bound on accepted weights and relative degeneracy threshold.
pub const TOLERANCE: f64 = 1e-6;

/// Tolerance in the working precision.
#[inline]
pub(crate) fn tolerance<T: Float>() -> T {
    T::from(TOLERANCE).unwrap_or_else(T::epsilon)
}

/// One corner of an interpolation figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weight<T> {
    /// Barycentric coefficient
    pub coef: T,
    /// Rank in the candidate list (not a sample-set index)
    pub rank: usize,
}

/// Weighted corners of the figure that brackets a query point,
/// stored inline with room for a tetrahedron.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSimplex<T> {
    weights: [Weight<T>; 4],
    len: usize,
}

impl<T: Float> WeightedSimplex<T> {
    fn from_slice(weights: &[Weight<T>]) -> Self {
        let mut store = [Weight {
            coef: T::zero(),
            rank: 0,
        }; 4];
        store[..weights.len()].copy_from_slice(weights);
        Self {
            weights: store,
            len: weights.len(),
        }
    }

    /// Number of corners, 1 through 4
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Weight<T>] {
        &self.weights[..self.len]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Weight<T>> {
        self.as_slice().iter()
    }

    /// Sum of the coefficients, which is one for a successful build
    /// up to round-off.
    pub fn sum(&self) -> T {
        self.iter().fold(T::zero(), |acc, w| acc + w.coef)
    }
}

/// Read-only view of one query's inputs, shared by the stage functions.
pub(crate) struct Scan<'s, T> {
    pub query: [T; 3],
    samples: &'s SampleSet<T>,
    candidates: &'s CandidateList<T>,
}

impl<'s, T: Float> Scan<'s, T> {
    /// Number of candidates available to the scan
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Coordinates of the candidate at `rank`
    #[inline]
    pub fn point(&self, rank: usize) -> &'s [T; 3] {
        self.samples.coordinate(self.candidates.sample_index(rank))
    }
}

/// Find the smallest valid figure for `topology` among `candidates`.
///
/// # Errors
/// * `OutOfBounds` if the candidates are exhausted without finding a
///   non-degenerate figure that contains the query
pub fn build<T: Float>(
    topology: Topology,
    query: &[T; 3],
    samples: &SampleSet<T>,
    candidates: &CandidateList<T>,
) -> Result<WeightedSimplex<T>> {
    let scan = Scan {
        query: *query,
        samples,
        candidates,
    };
    let out_of_bounds = || {
        debug!(
            db = samples.label(),
            %topology,
            candidates = candidates.len(),
            "no bracketing figure among candidates"
        );
        QueryError::out_of_bounds(samples.label(), topology)
    };

    let a = point::anchor(&scan).ok_or_else(out_of_bounds)?;
    let simplex = match topology {
        Topology::Point => WeightedSimplex::from_slice(&a),
        Topology::Line => {
            let ab = line::extend(&scan, &a).ok_or_else(out_of_bounds)?;
            WeightedSimplex::from_slice(&ab)
        }
        Topology::Area => {
            let ab = line::extend(&scan, &a).ok_or_else(out_of_bounds)?;
            let abc = area::extend(&scan, &ab).ok_or_else(out_of_bounds)?;
            WeightedSimplex::from_slice(&abc)
        }
        Topology::Volume => {
            let ab = line::extend(&scan, &a).ok_or_else(out_of_bounds)?;
            let abc = area::extend(&scan, &ab).ok_or_else(out_of_bounds)?;
            let abcd = volume::extend(&scan, &abc).ok_or_else(out_of_bounds)?;
            WeightedSimplex::from_slice(&abcd)
        }
    };

    trace!(
        ranks = ?simplex.iter().map(|w| w.rank).collect::<Vec<_>>(),
        "interpolation figure found"
    );
    Ok(simplex)
}
