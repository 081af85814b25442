//! Hydrostatic head fields.

use mushy_core::{
    DimensionError, DimensionedScalar, DimensionedVector, Dimensions, Mesh, SurfaceScalarField,
    VolScalarField,
};

/// Computes the hydrostatic head `gh` at cell centres and `ghf` at face
/// centres: `g · x − ghRef` with `ghRef = −|g|·hRef`.
///
/// Purely geometric: depends only on the mesh, the gravitational
/// acceleration, and the reference height, never on the flow solution.
/// Recomputing it after any change to `T`, `C`, `U`, or `p_rgh` yields the
/// same fields.
///
/// # Errors
///
/// Returns [`DimensionError::Mismatch`] when `g` is not an acceleration or
/// `hRef` is not a length.
pub fn hydrostatic_head(
    mesh: &Mesh,
    g: &DimensionedVector,
    h_ref: &DimensionedScalar,
) -> Result<(VolScalarField, SurfaceScalarField), DimensionError> {
    g.dims().check_same(Dimensions::ACCELERATION, g.name())?;
    h_ref.dims().check_same(Dimensions::LENGTH, h_ref.name())?;

    let gh_ref = -g.magnitude() * h_ref.value();
    let gv = g.value();
    let dims = g.dims() * h_ref.dims();

    let gh = VolScalarField::new(
        "gh",
        dims,
        mesh.cell_centres().iter().map(|c| gv.dot(*c) - gh_ref).collect(),
    );
    let ghf = SurfaceScalarField::new(
        "ghf",
        dims,
        mesh.face_centres().iter().map(|f| gv.dot(*f) - gh_ref).collect(),
    );

    Ok((gh, ghf))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use glam::DVec3;

    fn column_mesh() -> Mesh {
        let cells = (0..4).map(|i| DVec3::new(0.0, 0.1 * f64::from(i), 0.0)).collect();
        let faces = (0..5)
            .map(|i| DVec3::new(0.0, 0.1 * f64::from(i) - 0.05, 0.0))
            .collect();
        Mesh::new(cells, faces)
    }

    fn gravity() -> DimensionedVector {
        DimensionedVector::new("g", Dimensions::ACCELERATION, DVec3::new(0.0, -9.81, 0.0))
    }

    #[test]
    fn head_measures_height_from_reference_level() {
        let mesh = column_mesh();
        let h_ref = DimensionedScalar::new("hRef", Dimensions::LENGTH, 0.2);

        let (gh, ghf) = hydrostatic_head(&mesh, &gravity(), &h_ref).unwrap();

        assert_eq!(gh.dims(), Dimensions::SPECIFIC_ENERGY);
        // gh = -9.81*(y - hRef): zero at the reference height.
        assert_relative_eq!(gh[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(gh[0], 9.81 * 0.2, epsilon = 1e-12);
        assert_relative_eq!(gh[3], -9.81 * 0.1, epsilon = 1e-12);
        assert_eq!(ghf.len(), mesh.n_faces());
        assert_relative_eq!(ghf.values()[0], 9.81 * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn head_is_a_pure_function_of_geometry() {
        let mesh = column_mesh();
        let h_ref = DimensionedScalar::new("hRef", Dimensions::LENGTH, 0.0);

        let first = hydrostatic_head(&mesh, &gravity(), &h_ref).unwrap();
        let second = hydrostatic_head(&mesh, &gravity(), &h_ref).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_wrongly_dimensioned_gravity() {
        let mesh = column_mesh();
        let g = DimensionedVector::new("g", Dimensions::LENGTH, DVec3::new(0.0, -9.81, 0.0));
        let h_ref = DimensionedScalar::zero("hRef", Dimensions::LENGTH);

        assert!(hydrostatic_head(&mesh, &g, &h_ref).is_err());
    }
}
