//! Scattered sample storage: coordinates, named values, and the declared
//! topology shared by the whole set.
//!
//! Loading and parsing sample files is left to the caller; a [`SampleSet`]
//! is built from already-decoded samples and is immutable afterwards, so
//! one set can be shared by reference across any number of query engines.
use core::fmt;
use core::str::FromStr;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Declared dimensionality of a sample set, which determines how many
/// neighboring samples are blended for interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// An isolated point
    Point,
    /// Ordered 1D samples along a curve
    Line,
    /// 2D samples on a surface
    Area,
    /// 3D samples in a volume
    Volume,
}

impl Topology {
    /// Spatial dimension of the figure used for interpolation.
    pub fn dimension(&self) -> usize {
        match self {
            Topology::Point => 0,
            Topology::Line => 1,
            Topology::Area => 2,
            Topology::Volume => 3,
        }
    }

    /// Number of corners of the interpolation figure.
    pub fn corners(&self) -> usize {
        self.dimension() + 1
    }

    pub(crate) fn interpolation_name(&self) -> &'static str {
        match self {
            Topology::Point => "point",
            Topology::Line => "linear",
            Topology::Area => "areal",
            Topology::Volume => "volumetric",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Topology::Point => "point",
            Topology::Line => "line",
            Topology::Area => "area",
            Topology::Volume => "volume",
        };
        f.write_str(s)
    }
}

impl FromStr for Topology {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        [
            Topology::Point,
            Topology::Line,
            Topology::Area,
            Topology::Volume,
        ]
        .into_iter()
        .find(|t| tag.eq_ignore_ascii_case(&t.to_string()))
        .ok_or_else(|| QueryError::UnsupportedTopology(tag.to_owned()))
    }
}

/// One sample: a location and its values, ordered like the set's names.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<T> {
    pub coordinate: [T; 3],
    pub values: Vec<T>,
}

impl<T> Sample<T> {
    pub fn new(coordinate: [T; 3], values: Vec<T>) -> Self {
        Self { coordinate, values }
    }
}

/// An ordered, read-only collection of samples sharing one set of value
/// names and one topology.
#[derive(Clone, Debug)]
pub struct SampleSet<T> {
    label: String,
    names: Vec<String>,
    topology: Topology,
    samples: Vec<Sample<T>>,
}

impl<T: Float> SampleSet<T> {
    /// Assemble a sample set.
    ///
    /// The topology is trusted; the dimensionality of the coordinates is not
    /// checked against it.
    ///
    /// # Errors
    /// * If any sample does not carry exactly one value per name
    pub fn new(
        label: impl Into<String>,
        names: Vec<String>,
        topology: Topology,
        samples: Vec<Sample<T>>,
    ) -> Result<Self> {
        let label = label.into();
        if let Some(i) = samples.iter().position(|s| s.values.len() != names.len()) {
            return Err(QueryError::config(
                &label,
                format!(
                    "sample {i} has {} values, expected {} ({})",
                    samples[i].values.len(),
                    names.len(),
                    names.join(", ")
                ),
            ));
        }

        Ok(Self {
            label,
            names,
            topology,
            samples,
        })
    }

    /// Convenience constructor from parallel coordinate and value rows.
    ///
    /// # Errors
    /// * If the number of coordinates and value rows differ
    /// * If any value row does not match the number of names
    pub fn from_rows(
        label: impl Into<String>,
        names: &[&str],
        topology: Topology,
        coordinates: &[[T; 3]],
        values: &[&[T]],
    ) -> Result<Self> {
        let label = label.into();
        if coordinates.len() != values.len() {
            return Err(QueryError::config(
                &label,
                format!(
                    "{} coordinates but {} value rows",
                    coordinates.len(),
                    values.len()
                ),
            ));
        }
        let samples = coordinates
            .iter()
            .zip(values)
            .map(|(&c, v)| Sample::new(c, v.to_vec()))
            .collect();
        let names = names.iter().map(|&n| n.to_owned()).collect();
        Self::new(label, names, topology, samples)
    }
}

impl<T> SampleSet<T> {
    /// Name used to identify the set in diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Names of the values carried by every sample.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn num_values(&self) -> usize {
        self.names.len()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample(&self, index: usize) -> &Sample<T> {
        &self.samples[index]
    }

    #[inline]
    pub fn coordinate(&self, index: usize) -> &[T; 3] {
        &self.samples[index].coordinate
    }

    #[inline]
    pub fn values(&self, index: usize) -> &[T] {
        &self.samples[index].values
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Sample<T>> {
        self.samples.iter()
    }
}
