//! Foundational types for the mushy solidification solver: run-time
//! dimensional analysis, dimensioned fields over a finite-volume mesh, and
//! on-disk case access.

mod dimensions;
mod error;
mod scalar;

pub mod case;
pub mod field;
pub mod mesh;

pub use case::Case;
pub use dimensions::Dimensions;
pub use error::{CaseError, DimensionError, FieldError};
pub use field::{BoundaryCondition, SurfaceScalarField, VolScalarField, VolVectorField};
pub use mesh::{CellZone, Mesh};
pub use scalar::{DimensionedScalar, DimensionedVector};
