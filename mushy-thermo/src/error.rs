use thiserror::Error;

use mushy_core::{CaseError, DimensionError, Dimensions, FieldError};

/// Errors raised while loading the two-phase transport properties.
///
/// All of these are startup-time and fatal: a wrong or missing property would
/// silently corrupt every subsequent time step, so nothing here is retried or
/// defaulted on the strict construction path.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A phase subsection is absent. Fatal on construction and on reload.
    #[error("transport properties: missing phase subsection `{phase}`")]
    MissingPhase { phase: String },

    /// A property key is absent on initial construction. On reload the same
    /// key is substituted with a dimensioned zero instead.
    #[error("transport properties: phase `{phase}` is missing entry `{key}`")]
    MissingProperty { phase: String, key: &'static str },

    /// A configuration entry declares a dimension vector that disagrees with
    /// the property's expected dimensions. Never coerced.
    #[error(
        "transport properties: entry `{key}` in phase `{phase}` declares \
         dimensions {declared}, expected {expected}"
    )]
    WrongDimensions {
        phase: String,
        key: &'static str,
        declared: Dimensions,
        expected: Dimensions,
    },

    #[error(transparent)]
    Case(#[from] CaseError),
}

/// Errors raised while deriving the initial reference state.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Case(#[from] CaseError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Dimensions(#[from] DimensionError),

    /// The configured reference cell does not exist on this mesh.
    #[error("reference cell {cell} out of range: mesh has {n_cells} cells")]
    ReferenceCellOutOfRange { cell: usize, n_cells: usize },
}
