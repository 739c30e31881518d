//! Conversion of query points into the coordinate system of a sample set.
//!
//! Geodetic and projected systems are handled by external libraries; any
//! of them can be plugged in by implementing [`CoordTransform`] or by
//! passing a closure. Two simple transforms are provided here: the
//! identity, and a rescaling between Cartesian frames with different
//! length units.
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Maps a point from the caller's coordinate system into the sample set's.
pub trait CoordTransform<T> {
    /// # Errors
    /// * If the coordinate systems are incompatible or not initialized
    fn transform(&self, point: [T; 3]) -> Result<[T; 3], TransformError>;
}

/// Query points are already in the sample set's coordinate system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Copy> CoordTransform<T> for Identity {
    #[inline]
    fn transform(&self, point: [T; 3]) -> Result<[T; 3], TransformError> {
        Ok(point)
    }
}

impl<T, F> CoordTransform<T> for F
where
    F: Fn([T; 3]) -> Result<[T; 3], TransformError>,
{
    #[inline]
    fn transform(&self, point: [T; 3]) -> Result<[T; 3], TransformError> {
        self(point)
    }
}

/// A Cartesian coordinate system whose unit length is `to_meters` meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cartesian<T> {
    pub to_meters: T,
}

impl<T: Float> Cartesian<T> {
    pub fn new(to_meters: T) -> Self {
        Self { to_meters }
    }

    /// Coordinates in meters
    pub fn meters() -> Self {
        Self::new(T::one())
    }

    fn check(&self, role: &str) -> Result<(), TransformError> {
        let f = self.to_meters;
        if f.is_finite() && f > T::zero() {
            Ok(())
        } else {
            Err(TransformError::Uninitialized(format!(
                "{role} cartesian frame has no valid length scale"
            )))
        }
    }
}

/// Rescales points from one Cartesian frame to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitConversion<T> {
    scale: T,
}

impl<T: Float> UnitConversion<T> {
    /// # Errors
    /// * If either frame has a non-positive or non-finite length scale
    pub fn new(source: Cartesian<T>, target: Cartesian<T>) -> Result<Self, TransformError> {
        source.check("source")?;
        target.check("target")?;
        Ok(Self {
            scale: source.to_meters / target.to_meters,
        })
    }

    /// Multiplier applied to each coordinate
    pub fn scale(&self) -> T {
        self.scale
    }
}

impl<T: Float> CoordTransform<T> for UnitConversion<T> {
    #[inline]
    fn transform(&self, point: [T; 3]) -> Result<[T; 3], TransformError> {
        let s = self.scale;
        Ok([point[0] * s, point[1] * s, point[2] * s])
    }
}
