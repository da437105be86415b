use thiserror::Error;

use crate::layer::{LayerHandle, LayerSpec};

/// Failures raised by a layout host or its geometry kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Unknown layer handle {0:?}")]
    UnknownLayer(LayerHandle),

    #[error("Non-rectilinear geometry is not supported: edge ({x1}, {y1}) -> ({x2}, {y2})")]
    NonManhattan { x1: i64, y1: i64, x2: i64, y2: i64 },

    #[error("Geometry engine failure: {0}")]
    Engine(String),
}

/// Errors returned by the grid and patch operations.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Layer {0} not found")]
    MissingLayer(LayerSpec),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Non-fatal conditions reported alongside a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An operation completed but produced no shapes.
    EmptyResult {
        operation: &'static str,
        detail: String,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::EmptyResult { operation, detail } => {
                write!(f, "{operation} produced no shapes: {detail}")
            }
        }
    }
}

impl Warning {
    /// Build an empty-result warning and log it.
    pub(crate) fn empty(operation: &'static str, detail: String) -> Self {
        log::warn!("{operation}: {detail}");
        Warning::EmptyResult { operation, detail }
    }
}
