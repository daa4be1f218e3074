//! Graph-subsystem error type.

use thiserror::Error;

use mmg_core::{CoreError, Mode};

use crate::validate::ValidationReport;

/// Errors produced by `mmg-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Structural corruption.  Nothing downstream may consume the graph.
    #[error("{mode} graph failed validation: {invalid_vertices} invalid vertices")]
    Validation {
        mode:             Mode,
        invalid_vertices: usize,
        report:           Box<ValidationReport>,
    },

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
