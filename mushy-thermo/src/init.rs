//! One-shot derivation of the initial reference state.
//!
//! Runs once per solver start (and is idempotently re-runnable): reads the
//! primary fields from the case, builds the property store, derives the
//! mixture density, hydrostatic head, buoyancy density, and dynamic pressure,
//! and pins the pressure level when the boundary conditions leave it
//! undetermined. The derivation order `rho → gh → rhok → p` is fixed: the
//! later fields are pure functions of the earlier ones, and recomputing out
//! of order yields stale results.

use tracing::info;

use mushy_core::{
    Case, CaseError, FieldError, Mesh, SurfaceScalarField, VolScalarField, VolVectorField,
};

use crate::buoyancy::buoyancy_density;
use crate::diagnostics::log_mesh_summary;
use crate::error::InitError;
use crate::head::hydrostatic_head;
use crate::mixture::TwoPhaseMixture;
use crate::properties::SolidificationProperties;
use crate::reference::{ReferenceCell, ReferenceConfig, apply_reference, select_reference};

/// The complete field state after initialization.
///
/// The solver's time-stepping loop owns and mutates these from here on; this
/// crate only derives them.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverState {
    pub p_rgh: VolScalarField,
    pub u: VolVectorField,
    pub t: VolScalarField,
    pub c: VolScalarField,
    pub rho: VolScalarField,
    pub rhok: VolScalarField,
    pub gh: VolScalarField,
    pub ghf: SurfaceScalarField,
    pub p: VolScalarField,
    /// The active reference cell, if the pressure level had to be pinned.
    pub reference: Option<ReferenceCell>,
}

impl SolverState {
    /// Persists every auto-write field into the case's time directory.
    /// `ghf` is face data and is not written.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] on the first field that fails to write.
    pub fn checkpoint(&self, case: &Case) -> Result<(), CaseError> {
        case.write(&self.p_rgh)?;
        case.write_vector(&self.u)?;
        case.write(&self.t)?;
        case.write(&self.c)?;
        case.write(&self.rho)?;
        case.write(&self.rhok)?;
        case.write(&self.gh)?;
        case.write(&self.p)?;
        Ok(())
    }
}

fn check_extent(name: &str, len: usize, n_cells: usize) -> Result<(), FieldError> {
    if len == n_cells {
        Ok(())
    } else {
        Err(FieldError::SizeMismatch {
            context: name.to_string(),
            lhs: len,
            rhs: n_cells,
        })
    }
}

/// Reads the primary fields, constructs the property store, and derives the
/// initial reference state.
///
/// # Errors
///
/// Returns [`InitError`] when a must-read field is absent (reported with the
/// field name), the property dictionary is invalid, any derivation step is
/// dimensionally inconsistent, or the configured reference cell does not
/// exist. All failures here are startup-time and fatal.
pub fn initialize(
    case: &Case,
    mesh: &mut Mesh,
    mixture: &impl TwoPhaseMixture,
) -> Result<(SolidificationProperties, SolverState), InitError> {
    info!("reading field p_rgh");
    let p_rgh = case.must_read("p_rgh")?;
    check_extent(p_rgh.name(), p_rgh.len(), mesh.n_cells())?;

    info!("reading field U");
    let u = case.must_read_vector("U")?;
    check_extent(u.name(), u.len(), mesh.n_cells())?;

    let props = SolidificationProperties::new(case, mixture)?;

    info!("reading field T");
    let t = case.must_read("T")?;
    check_extent(t.name(), t.len(), mesh.n_cells())?;

    info!("reading field C");
    let c = case.must_read("C")?;
    check_extent(c.name(), c.len(), mesh.n_cells())?;

    // Mixture density for the shrinkage force.
    let rho = props.rho(mesh);

    let g = case.gravity()?;
    let h_ref = case.h_ref()?;
    let (gh, ghf) = hydrostatic_head(mesh, &g, &h_ref)?;

    // Kinematic density for the buoyancy force.
    let rhok = buoyancy_density(&props, &t, &c)?;

    let mut p = p_rgh.try_add(&rhok.try_mul(&gh)?)?.with_name("p");

    let config = ReferenceConfig::from_case(case)?;
    let reference = select_reference(&p_rgh, config, mesh.n_cells())?;
    if let Some(reference) = &reference {
        apply_reference(&mut p, reference)?;
    }

    mesh.set_flux_required(p_rgh.name());

    log_mesh_summary(mesh);

    Ok((
        props,
        SolverState {
            p_rgh,
            u,
            t,
            c,
            rho,
            rhok,
            gh,
            ghf,
            p,
            reference,
        },
    ))
}
