//! Serializable query configuration.
//!
//! ```toml
//! mode = "linear"
//! values = ["vp", "vs", "density"]
//! ```
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// How a query turns nearby samples into values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Values of the single closest sample
    Nearest,
    /// Blend over the point, segment, triangle, or tetrahedron
    /// that matches the sample set's topology
    #[default]
    Linear,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Nearest => f.write_str("nearest"),
            QueryMode::Linear => f.write_str("linear"),
        }
    }
}

impl FromStr for QueryMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            m if m.eq_ignore_ascii_case("nearest") => Ok(QueryMode::Nearest),
            m if m.eq_ignore_ascii_case("linear") => Ok(QueryMode::Linear),
            m => Err(QueryError::UnsupportedMode(m.to_owned())),
        }
    }
}

/// Query settings: the mode and the names of the values to return.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub mode: QueryMode,
    pub values: Vec<String>,
}
