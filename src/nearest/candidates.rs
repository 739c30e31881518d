//! Bounded, distance-ordered list of the samples closest to a query point.
use num_traits::Float;

use crate::geometry::dist_squared;
use crate::samples::SampleSet;

/// Maximum number of candidate samples considered for one query.
pub const MAX_CANDIDATES: usize = 100;

/// The K closest samples to a query point, sorted by ascending squared
/// distance. Rank 0 is the nearest sample.
///
/// Operation Complexity
/// * O(N log K) comparisons plus O(N K) shifting in the worst case
///   for a scan over N samples.
///
/// Memory Complexity
/// * O(K) for the two parallel arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateList<T> {
    /// Squared distance to the query, size K
    dist2: Vec<T>,

    /// Index into the sample set, size K
    indices: Vec<usize>,
}

impl<T: Float> CandidateList<T> {
    /// Number of valid candidates.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Squared distance from the query to the candidate at `rank`.
    #[inline]
    pub fn distance_squared(&self, rank: usize) -> T {
        self.dist2[rank]
    }

    /// Sample-set index of the candidate at `rank`.
    #[inline]
    pub fn sample_index(&self, rank: usize) -> usize {
        self.indices[rank]
    }

    /// Iterate over `(squared distance, sample index)` in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (T, usize)> + '_ {
        self.dist2.iter().copied().zip(self.indices.iter().copied())
    }
}

/// Collect the `min(MAX_CANDIDATES, samples.len())` samples nearest to `query`.
pub fn find<T: Float>(query: &[T; 3], samples: &SampleSet<T>) -> CandidateList<T> {
    find_k(query, samples, MAX_CANDIDATES)
}

/// Collect the `min(k, samples.len())` samples nearest to `query`.
///
/// A sample whose distance equals one already stored is inserted ahead of
/// it, pushing the earlier sample toward higher rank (and out of the list
/// once it is full). Samples at a NaN distance are never inserted.
pub fn find_k<T: Float>(query: &[T; 3], samples: &SampleSet<T>, k: usize) -> CandidateList<T> {
    let size = k.min(samples.len());
    let mut dist2 = vec![T::infinity(); size];
    let mut slots: Vec<Option<usize>> = vec![None; size];

    for (i, sample) in samples.iter().enumerate() {
        // Only relative order matters, so skip the square root
        let d = dist_squared(query, &sample.coordinate);

        // First stored distance that is >= d
        let pos = dist2.partition_point(|&x| x < d);
        if pos < size && d <= dist2[pos] {
            // Shift the tail down by one; the last entry falls off
            dist2[pos..].rotate_right(1);
            slots[pos..].rotate_right(1);
            dist2[pos] = d;
            slots[pos] = Some(i);
        }
    }

    // Valid entries are contiguous at the front
    let n = slots.iter().take_while(|s| s.is_some()).count();
    dist2.truncate(n);
    let indices = slots.into_iter().map_while(|s| s).collect();

    CandidateList { dist2, indices }
}
