//! Point queries against scattered 3D samples carrying named scalar values.
//!
//! A sample set declares a topology (point, line, area, or volume), which fixes how many
//! neighboring samples are blended at a query location: 1, 2, 3, or 4. Interpolation
//! finds the nearest samples by linear scan, then grows the smallest figure (segment,
//! triangle, tetrahedron) anchored at the nearest sample that brackets the query
//! without extrapolating, and blends values with its barycentric weights.
//!
//! # Performance Scalings
//! All searches are linear scans; there is no spatial index. Up to 100 candidates
//! are kept per query, and the figure search visits them in order of distance, so it
//! usually terminates after the first few.
//!
//! | Method         | RAM          | Query Cost                        |
//! |----------------|--------------|-----------------------------------|
//! | nearest        | O(1)         | O(N)                              |
//! | linear, point  | O(1)         | O(1)                              |
//! | linear, line   | O(K)         | O(N log K) + O(K)                 |
//! | linear, area   | O(K)         | O(N log K) + O(K^2) worst case    |
//! | linear, volume | O(K)         | O(N log K) + O(K^3) worst case    |
//!
//! # Example: Surface Interpolation
//! ```rust
//! use scatterpn::{QueryEngine, QueryError, SampleSet, Topology};
//!
//! // Three samples on a horizontal surface, with two values each
//! let coords = [[0.0_f64, 0.0, -1.0], [2.0, 0.0, -1.0], [0.0, 2.0, -1.0]];
//! let vals: [&[f64]; 3] = [&[1.0, 3.0], &[2.0, 3.0], &[3.0, 3.0]];
//! let db = SampleSet::from_rows("surface", &["Vp", "Vs"], Topology::Area, &coords, &vals).unwrap();
//!
//! let mut engine = QueryEngine::new(&db);
//! engine.set_values(&["vp"]).unwrap();
//!
//! // Inside the triangle; the query is projected onto its plane
//! let out = engine.query_alloc([0.5, 0.5, 0.0]).unwrap();
//! assert!((out[0] - 1.75).abs() < 1e-12);
//!
//! // Outside it, there is no figure to interpolate with
//! let err = engine.query_alloc([3.0, 3.0, -1.0]).unwrap_err();
//! assert!(matches!(err, QueryError::OutOfBounds { .. }));
//! ```
pub mod error;
pub use error::{QueryError, Result, TransformError};

pub mod geometry;

pub mod samples;
pub use samples::{Sample, SampleSet, Topology};

pub mod selection;
pub use selection::ValueSelection;

pub mod nearest;
pub use nearest::{CandidateList, MAX_CANDIDATES};

pub mod simplex;
pub use simplex::{Weight, WeightedSimplex, TOLERANCE};

pub mod transform;
pub use transform::{Cartesian, CoordTransform, Identity, UnitConversion};

pub mod config;
pub use config::{QueryConfig, QueryMode};

pub mod query;
pub use query::QueryEngine;

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
