//! Resolution of requested value names to columns of a sample set.
use num_traits::Float;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::samples::SampleSet;

/// Column indices of the values returned by a query, in request order.
///
/// Built once per configuration and reused across queries. A selection is
/// tied to the sample set it was resolved against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueSelection {
    columns: Vec<usize>,
}

impl ValueSelection {
    /// Look up each requested name among the set's value names, ignoring
    /// ASCII case.
    ///
    /// # Errors
    /// * If no names are requested
    /// * If any name is not present; the message lists the available names
    pub fn new<T: Float, S: AsRef<str>>(names: &[S], samples: &SampleSet<T>) -> Result<Self> {
        if names.is_empty() {
            return Err(QueryError::config(
                samples.label(),
                "number of values for query must be positive",
            ));
        }

        let available = samples.names();
        let columns = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                available
                    .iter()
                    .position(|v| v.eq_ignore_ascii_case(name))
                    .ok_or_else(|| {
                        QueryError::config(
                            samples.label(),
                            format!(
                                "could not find value {name}; available values are: {}",
                                available.join(", ")
                            ),
                        )
                    })
            })
            .collect::<Result<Vec<usize>>>()?;

        debug!(db = samples.label(), ?columns, "value selection resolved");
        Ok(Self { columns })
    }

    /// Selected column indices
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Number of selected values
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Copy the selected entries of one sample's `values` into `out`.
    #[inline]
    pub fn gather<T: Copy>(&self, values: &[T], out: &mut [T]) {
        for (o, &c) in out.iter_mut().zip(&self.columns) {
            *o = values[c];
        }
    }
}
