//! Point queries against a sample set.
//!
//! ```rust
//! use scatterpn::{QueryEngine, QueryMode, SampleSet, Topology};
//!
//! // Four samples at the corners of a tetrahedron
//! let coords = [
//!     [0.0_f64, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ];
//! let vals: [&[f64]; 4] = [&[1.0, 10.0], &[2.0, 20.0], &[3.0, 30.0], &[4.0, 40.0]];
//! let db = SampleSet::from_rows("block", &["a", "b"], Topology::Volume, &coords, &vals).unwrap();
//!
//! let mut engine = QueryEngine::new(&db);
//! engine.set_values(&["b", "a"]).unwrap();
//!
//! // Storage for output
//! let mut out = [0.0; 2];
//!
//! // Blend over the enclosing tetrahedron
//! engine.query([0.25, 0.25, 0.25], &mut out).unwrap();
//! assert!((out[0] - 25.0).abs() < 1e-12);
//!
//! // Closest sample only
//! engine.set_mode(QueryMode::Nearest);
//! engine.query([0.9, 0.0, 0.1], &mut out).unwrap();
//! assert_eq!(out, [20.0, 2.0]);
//! ```
use num_traits::Float;
use tracing::{debug, trace};

use crate::config::{QueryConfig, QueryMode};
use crate::error::{QueryError, Result};
use crate::nearest::{self, CandidateList};
use crate::samples::{SampleSet, Topology};
use crate::selection::ValueSelection;
use crate::simplex::{self, WeightedSimplex};
use crate::transform::{CoordTransform, Identity};

/// Blend the selected columns of the simplex corners into `out`.
///
/// `out` must have one entry per selected value.
#[inline]
pub fn interpolate<T: Float>(
    simplex: &WeightedSimplex<T>,
    candidates: &CandidateList<T>,
    samples: &SampleSet<T>,
    selection: &ValueSelection,
    out: &mut [T],
) {
    for (o, &col) in out.iter_mut().zip(selection.columns()) {
        *o = simplex.iter().fold(T::zero(), |acc, w| {
            acc + w.coef * samples.values(candidates.sample_index(w.rank))[col]
        });
    }
}

/// Evaluates point queries against a shared, read-only sample set.
///
/// The engine owns its configuration (mode and value selection); the
/// sample set is borrowed, so many engines can query one set at once.
/// Reconfiguring requires `&mut self` and so cannot race a query on the
/// same engine.
///
/// Operation Complexity
/// * O(N log K) for the candidate scan over N samples
/// * O(K) to O(K^3) worst case for the simplex search, usually a handful
///   of candidates
/// * O(N) for nearest-sample queries
pub struct QueryEngine<'a, T, C = Identity> {
    samples: &'a SampleSet<T>,
    transform: C,
    mode: QueryMode,
    selection: Option<ValueSelection>,
}

impl<'a, T: Float> QueryEngine<'a, T, Identity> {
    /// Query points are taken to be in the sample set's coordinate system.
    pub fn new(samples: &'a SampleSet<T>) -> Self {
        Self::with_transform(samples, Identity)
    }

    /// Build an engine and apply `config`.
    ///
    /// # Errors
    /// * If the configured value names cannot be resolved
    pub fn from_config(samples: &'a SampleSet<T>, config: &QueryConfig) -> Result<Self> {
        let mut engine = Self::new(samples);
        engine.configure(config)?;
        Ok(engine)
    }
}

impl<'a, T: Float, C: CoordTransform<T>> QueryEngine<'a, T, C> {
    /// Query points are mapped through `transform` before the search.
    pub fn with_transform(samples: &'a SampleSet<T>, transform: C) -> Self {
        Self {
            samples,
            transform,
            mode: QueryMode::default(),
            selection: None,
        }
    }

    /// Apply mode and value names from a configuration.
    ///
    /// # Errors
    /// * If the configured value names cannot be resolved; the engine
    ///   is left unchanged
    pub fn configure(&mut self, config: &QueryConfig) -> Result<()> {
        let selection = ValueSelection::new(config.values.as_slice(), self.samples)?;
        self.set_mode(config.mode);
        self.selection = Some(selection);
        Ok(())
    }

    pub fn samples(&self) -> &'a SampleSet<T> {
        self.samples
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: QueryMode) {
        debug!(db = self.samples.label(), %mode, "query mode set");
        self.mode = mode;
    }

    /// Select the values returned by subsequent queries, in order.
    ///
    /// # Errors
    /// * If `names` is empty or names a value the set does not carry;
    ///   the previous selection is kept
    pub fn set_values<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.selection = Some(ValueSelection::new(names, self.samples)?);
        Ok(())
    }

    /// Current value selection, if any
    pub fn selection(&self) -> Option<&ValueSelection> {
        self.selection.as_ref()
    }

    /// Evaluate the selected values at `point`.
    ///
    /// `out` is written only if the query succeeds.
    ///
    /// # Errors
    ///   * `InvalidConfiguration` if no values are selected, if `out` does
    ///     not have one entry per selected value, or if the set is empty
    ///   * `Transform` if the point cannot be mapped into the set's
    ///     coordinate system
    ///   * `OutOfBounds` if no interpolation figure brackets the point
    pub fn query(&self, point: [T; 3], out: &mut [T]) -> Result<()> {
        let selection = self.checked_selection(out.len())?;
        let q = self.transform.transform(point)?;
        let samples = self.samples;

        match self.mode {
            QueryMode::Nearest => {
                let i = nearest::closest(&q, samples).ok_or_else(|| self.empty())?;
                trace!(sample = i, "nearest sample");
                selection.gather(samples.values(i), out);
            }
            // No spatial variation to blend across
            QueryMode::Linear if samples.topology() == Topology::Point => {
                selection.gather(samples.values(0), out);
            }
            QueryMode::Linear => {
                let candidates = nearest::find(&q, samples);
                let simplex = simplex::build(samples.topology(), &q, samples, &candidates)?;
                interpolate(&simplex, &candidates, samples, selection, out);
            }
        }

        Ok(())
    }

    /// Evaluate the selected values at `point`, allocating for the output.
    ///
    /// # Errors
    ///   * Same as [`QueryEngine::query`]
    pub fn query_alloc(&self, point: [T; 3]) -> Result<Vec<T>> {
        let n = self
            .selection
            .as_ref()
            .map(ValueSelection::len)
            .unwrap_or_default();
        let mut out = vec![T::zero(); n];
        self.query(point, &mut out)?;
        Ok(out)
    }

    /// Evaluate a list of points into `out`, one row of selected values
    /// per point.
    ///
    /// Either every row is written or, on the first failing point,
    /// none are.
    ///
    /// # Errors
    ///   * `InvalidConfiguration` if `out` is not `points.len()` rows long
    ///   * Any error of [`QueryEngine::query`] for any point
    pub fn query_many(&self, points: &[[T; 3]], out: &mut [T]) -> Result<()> {
        let width = self.selected()?.len();
        if out.len() != points.len() * width {
            return Err(QueryError::config(
                self.samples.label(),
                format!(
                    "output of size {} cannot hold {} rows of {} values",
                    out.len(),
                    points.len(),
                    width
                ),
            ));
        }

        let mut rows = vec![T::zero(); out.len()];
        for (p, row) in points.iter().zip(rows.chunks_exact_mut(width)) {
            self.query(*p, row)?;
        }
        out.copy_from_slice(&rows);

        Ok(())
    }

    fn selected(&self) -> Result<&ValueSelection> {
        self.selection.as_ref().ok_or_else(|| {
            QueryError::config(
                self.samples.label(),
                "values to be returned have not been set; call set_values() before query()",
            )
        })
    }

    fn checked_selection(&self, size: usize) -> Result<&ValueSelection> {
        let selection = self.selected()?;
        let width = selection.len();
        if size != width {
            return Err(QueryError::config(
                self.samples.label(),
                format!(
                    "number of values to be returned ({width}) does not match size of array provided ({size})"
                ),
            ));
        }
        if self.samples.is_empty() {
            return Err(self.empty());
        }

        Ok(selection)
    }

    fn empty(&self) -> QueryError {
        QueryError::config(self.samples.label(), "sample set is empty")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::TransformError;
    use crate::testing::*;
    use crate::transform::{Cartesian, UnitConversion};
    use crate::utils::*;

    /// Five scattered samples with two named values each
    fn five_point_volume() -> SampleSet<f64> {
        let data = [
            [0.6, 0.1, 0.2, 6.6, 3.4],
            [1.0, 1.1, 1.2, 5.5, 6.7],
            [4.7, 9.5, 8.7, 2.3, 4.1],
            [3.4, 0.7, 9.8, 5.7, 2.0],
            [3.4, 9.8, 5.7, 6.3, 6.7],
        ];
        let coords: Vec<[f64; 3]> = data.iter().map(|r| [r[0], r[1], r[2]]).collect();
        let vals: Vec<&[f64]> = data.iter().map(|r| &r[3..]).collect();
        SampleSet::from_rows("five", &["One", "Two"], Topology::Volume, &coords, &vals).unwrap()
    }

    fn assert_rel(actual: &[f64], expected: &[f64], rtol: f64) {
        assert_eq!(actual.len(), expected.len());
        actual
            .iter()
            .zip(expected)
            .for_each(|(a, e)| assert!((a / e - 1.0).abs() < rtol, "{a} != {e}"));
    }

    #[test]
    fn test_volume_at_first_sample_reordered_names() {
        let db = five_point_volume();

        for mode in [QueryMode::Linear, QueryMode::Nearest] {
            let mut engine = QueryEngine::new(&db);
            engine.set_mode(mode);
            engine.set_values(&["two", "one"]).unwrap();

            let mut out = [0.0; 2];
            engine.query([0.6, 0.1, 0.2], &mut out).unwrap();
            assert_rel(&out, &[3.4, 6.6], 1e-6);
        }
    }

    /// Every sample of the scattered set is reproduced at its own location
    #[test]
    fn test_volume_at_every_sample() {
        let db = five_point_volume();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["ONE", "two"]).unwrap();

        for (i, s) in db.iter().enumerate() {
            let out = engine.query_alloc(s.coordinate).unwrap();
            assert_rel(&out, db.values(i), 1e-6);
        }
    }

    #[test]
    fn test_single_point_database() {
        let db = SampleSet::from_rows(
            "one point",
            &["one", "two"],
            Topology::Point,
            &[[1.0, 2.0, 3.0]],
            &[&[0.5, 0.25]],
        )
        .unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["one", "two"]).unwrap();

        for q in [[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-1e6, 4e3, 7.0]] {
            for mode in [QueryMode::Linear, QueryMode::Nearest] {
                engine.set_mode(mode);
                assert_eq!(engine.query_alloc(q).unwrap(), vec![0.5, 0.25]);
            }
        }
    }

    /// Point topology in linear mode always reads the first sample
    #[test]
    fn test_point_topology_reads_first_sample() {
        let db = SampleSet::from_rows(
            "points",
            &["v"],
            Topology::Point,
            &[[0.0, 0.0, 0.0], [5.0, 5.0, 5.0]],
            &[&[1.0], &[2.0]],
        )
        .unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["v"]).unwrap();

        assert_eq!(engine.query_alloc([5.0, 5.0, 5.0]).unwrap(), vec![1.0]);
        engine.set_mode(QueryMode::Nearest);
        assert_eq!(engine.query_alloc([5.0, 5.0, 5.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let mut rng = rng_fixed_seed();
        let db = random_cloud(&mut rng, 150, Topology::Area);
        let mut engine = QueryEngine::new(&db);
        engine.set_mode(QueryMode::Nearest);
        engine.set_values(&["index"]).unwrap();

        for _ in 0..100 {
            let q = random_point(&mut rng);
            let out = engine.query_alloc(q).unwrap();
            let i = out[0] as usize;
            let best = crate::geometry::dist_squared(&q, db.coordinate(i));
            assert!(db
                .iter()
                .all(|s| crate::geometry::dist_squared(&q, &s.coordinate) >= best));
        }
    }

    /// Linear fields are reproduced inside a surface lattice
    #[test]
    fn test_linear_area_field() {
        let mut rng = rng_fixed_seed();
        let xs = linspace(-1.0, 1.0, 5);
        let coords = grid(&xs, &xs, &[2.0]);
        let vals: Vec<Vec<f64>> = coords
            .iter()
            .map(|c| vec![3.0 * c[0] - c[1], c[0] * c[0]])
            .collect();
        let rows: Vec<&[f64]> = vals.iter().map(|v| &v[..]).collect();
        let db = SampleSet::from_rows("plane", &["lin", "quad"], Topology::Area, &coords, &rows)
            .unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["lin"]).unwrap();

        for _ in 0..100 {
            let q = random_point(&mut rng);
            let q = [q[0], q[1], 2.0];
            let out = engine.query_alloc(q).unwrap();
            assert!((out[0] - (3.0 * q[0] - q[1])).abs() < 1e-9);
        }
    }

    #[test]
    fn test_linear_line_between_samples() {
        let db = SampleSet::from_rows(
            "profile",
            &["depth", "vs"],
            Topology::Line,
            &[[0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 0.0, -3.0]],
            &[&[0.0, 1.0], &[1.0, 2.0], &[3.0, 6.0]],
        )
        .unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["vs"]).unwrap();

        let out = engine.query_alloc([0.0, 0.0, -2.5]).unwrap();
        assert!((out[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_area_with_two_locations_out_of_bounds() {
        let db = SampleSet::from_rows(
            "thin",
            &["v"],
            Topology::Area,
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            &[&[1.0], &[2.0], &[3.0]],
        )
        .unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["v"]).unwrap();

        let mut out = [-7.0];
        let err = engine.query([0.5, 0.0, 0.0], &mut out).unwrap_err();
        assert!(matches!(err, QueryError::OutOfBounds { topology: Topology::Area, .. }));
        // No partial results
        assert_eq!(out, [-7.0]);

        // Nearest mode still answers
        engine.set_mode(QueryMode::Nearest);
        engine.query([0.1, 0.0, 0.0], &mut out).unwrap();
        assert_eq!(out, [1.0]);
    }

    #[test]
    fn test_values_not_set() {
        let db = five_point_volume();
        let engine = QueryEngine::new(&db);
        let mut out = [0.0; 2];
        let errs = [
            engine.query([0.0; 3], &mut out).unwrap_err(),
            engine.query_alloc([0.0; 3]).unwrap_err(),
            engine.query_many(&[[0.0; 3]], &mut out).unwrap_err(),
        ];
        for err in errs {
            match err {
                QueryError::InvalidConfiguration { message, .. } => {
                    assert!(message.contains("have not been set"));
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
        assert_eq!(out, [0.0; 2]);
    }

    #[test]
    fn test_output_size_mismatch() {
        let db = five_point_volume();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["one", "two"]).unwrap();

        let mut out = [0.0; 3];
        let err = engine.query([0.6, 0.1, 0.2], &mut out).unwrap_err();
        match err {
            QueryError::InvalidConfiguration { message, .. } => {
                assert!(message.contains("(2)"));
                assert!(message.contains("(3)"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_failed_reselection_keeps_previous() {
        let db = five_point_volume();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["two"]).unwrap();
        assert!(engine.set_values(&["three"]).is_err());
        assert_eq!(engine.selection().unwrap().columns(), &[1]);

        // Reconfiguring changes the output arity
        engine.set_values(&["one", "two", "one"]).unwrap();
        assert_eq!(engine.query_alloc([0.6, 0.1, 0.2]).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_sample_set() {
        let db = SampleSet::<f64>::new("empty", vec!["v".into()], Topology::Volume, vec![]).unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["v"]).unwrap();

        for mode in [QueryMode::Linear, QueryMode::Nearest] {
            engine.set_mode(mode);
            let err = engine.query_alloc([0.0; 3]).unwrap_err();
            assert!(matches!(err, QueryError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_repeated_query_is_identical() {
        let mut rng = rng_fixed_seed();
        let db = random_cloud(&mut rng, 80, Topology::Volume);
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["x", "index"]).unwrap();

        for _ in 0..20 {
            let q = random_point(&mut rng);
            let first = engine.query_alloc(q);
            let second = engine.query_alloc(q);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_unit_conversion_transform() {
        // Samples in meters, queries in kilometers
        let db = SampleSet::from_rows(
            "meters",
            &["v"],
            Topology::Line,
            &[[0.0, 0.0, 0.0], [1000.0, 0.0, 0.0]],
            &[&[0.0], &[10.0]],
        )
        .unwrap();
        let km = UnitConversion::new(Cartesian::new(1000.0), Cartesian::meters()).unwrap();
        let mut engine = QueryEngine::with_transform(&db, km);
        engine.set_values(&["v"]).unwrap();

        let out = engine.query_alloc([0.25, 0.0, 0.0]).unwrap();
        assert!((out[0] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_transform_failure_propagates() {
        let db = five_point_volume();
        let failing = |_: [f64; 3]| -> core::result::Result<[f64; 3], TransformError> {
            Err(TransformError::Incompatible("geographic to cartesian".into()))
        };
        let mut engine = QueryEngine::with_transform(&db, failing);
        engine.set_values(&["one"]).unwrap();

        let mut out = [1.5];
        let err = engine.query([0.0; 3], &mut out).unwrap_err();
        assert!(matches!(err, QueryError::Transform(TransformError::Incompatible(_))));
        assert_eq!(out, [1.5]);
    }

    #[test]
    fn test_from_config() {
        let db = five_point_volume();
        let config: QueryConfig = toml::from_str(
            r#"
            mode = "nearest"
            values = ["Two", "ONE"]
            "#,
        )
        .unwrap();
        let engine = QueryEngine::from_config(&db, &config).unwrap();
        assert_eq!(engine.mode(), QueryMode::Nearest);
        assert_eq!(engine.query_alloc([1.0, 2.0, 3.0]).unwrap(), vec![6.7, 5.5]);

        let bad = QueryConfig {
            mode: QueryMode::Linear,
            values: vec!["three".into()],
        };
        assert!(QueryEngine::from_config(&db, &bad).is_err());
    }

    #[test]
    fn test_query_many() {
        let db = five_point_volume();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["two", "one"]).unwrap();

        let points: Vec<[f64; 3]> = db.iter().map(|s| s.coordinate).collect();
        let mut out = vec![0.0; 2 * points.len()];
        engine.query_many(&points, &mut out).unwrap();
        for (i, row) in out.chunks_exact(2).enumerate() {
            assert_rel(row, &[db.values(i)[1], db.values(i)[0]], 1e-6);
        }

        // Wrong output size
        let mut short = vec![0.0; 3];
        assert!(engine.query_many(&points, &mut short).is_err());

        // One bad point leaves the output untouched
        let mut out = vec![-1.0; 4];
        let far = [[0.6, 0.1, 0.2], [1e3, 1e3, 1e3]];
        assert!(engine.query_many(&far, &mut out).is_err());
        assert!(out.iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_single_precision() {
        let db = SampleSet::from_rows(
            "f32",
            &["v"],
            Topology::Area,
            &[[0.0_f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            &[&[0.0_f32], &[1.0], &[2.0], &[3.0]],
        )
        .unwrap();
        let mut engine = QueryEngine::new(&db);
        engine.set_values(&["v"]).unwrap();

        let out = engine.query_alloc([0.2, 0.1, 0.0]).unwrap();
        assert!((out[0] - 0.4).abs() < 1e-5);
    }
}
