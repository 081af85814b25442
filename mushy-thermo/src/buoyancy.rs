//! Linearized buoyancy density.

use mushy_core::{Dimensions, FieldError, VolScalarField};

use crate::properties::SolidificationProperties;

/// Computes the kinematic density used in the buoyancy force term:
///
/// ```text
/// rhok = rho2 * (1 − betaT*(T − TRef) − betaC*(C − CRef))
/// ```
///
/// a Boussinesq-style linearization about the liquid reference state. At the
/// reference temperature and concentration the result equals `rho2`
/// everywhere. Distinct from the mixture density used elsewhere.
///
/// Every additive step is dimension-checked; a mismatch aborts the
/// derivation rather than producing a field with undefined units.
///
/// # Errors
///
/// Returns [`FieldError`] when `T` or `C` carry unexpected dimensions or
/// extents.
pub fn buoyancy_density(
    props: &SolidificationProperties,
    t: &VolScalarField,
    c: &VolScalarField,
) -> Result<VolScalarField, FieldError> {
    let t_dev = t.try_sub_scalar(&props.t_ref())?;
    let c_dev = c.try_sub_scalar(&props.c_ref())?;

    let expansion = t_dev
        .mul_scalar(&props.beta_t())
        .try_add(&c_dev.mul_scalar(&props.beta_c()))?;

    let unity = VolScalarField::uniform("one", Dimensions::DIMENSIONLESS, 1.0, t.len());
    Ok(unity
        .try_sub(&expansion)?
        .mul_scalar(&props.rho2())
        .with_name("rhok"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use serde_json::json;
    use tempfile::tempdir;

    use mushy_core::Case;

    use crate::mixture::SolidLiquid;

    fn props() -> (tempfile::TempDir, SolidificationProperties) {
        let dict = json!({
            "solid": {
                "rho": 2700.0, "Cp": 900.0, "kappa": 180.0,
                "mu": 1.0, "D": 1.0e-12, "DAS": 5.0e-5,
            },
            "liquid": {
                "rho": 2400.0, "Cp": 1100.0, "kappa": 90.0,
                "mu": 1.3e-3, "D": 3.0e-9,
                "betaT": 1.0e-4, "betaC": -2.0e-2, "TRef": 900.0, "CRef": 0.04,
            },
        });

        let dir = tempdir().unwrap();
        let case = Case::new(dir.path(), "0");
        std::fs::create_dir_all(case.constant_dir()).unwrap();
        std::fs::write(
            case.constant_dir().join("transport_properties.json"),
            serde_json::to_vec(&dict).unwrap(),
        )
        .unwrap();

        let mixture = SolidLiquid::uniform("solid", "liquid", 0.0, 3);
        let props = SolidificationProperties::new(&case, &mixture).unwrap();
        (dir, props)
    }

    #[test]
    fn equals_rho2_at_reference_state() {
        let (_dir, props) = props();
        let t = VolScalarField::uniform("T", Dimensions::TEMPERATURE, 900.0, 3);
        let c = VolScalarField::uniform("C", Dimensions::DIMENSIONLESS, 0.04, 3);

        let rhok = buoyancy_density(&props, &t, &c).unwrap();
        assert_eq!(rhok.name(), "rhok");
        assert_eq!(rhok.dims(), Dimensions::DENSITY);
        for v in rhok.values() {
            assert_relative_eq!(*v, 2400.0);
        }
    }

    #[test]
    fn responds_linearly_to_deviations() {
        let (_dir, props) = props();
        let t = VolScalarField::new("T", Dimensions::TEMPERATURE, vec![900.0, 910.0, 890.0]);
        let c = VolScalarField::new("C", Dimensions::DIMENSIONLESS, vec![0.04, 0.04, 0.05]);

        let rhok = buoyancy_density(&props, &t, &c).unwrap();
        assert_relative_eq!(rhok[0], 2400.0);
        // Warmer liquid is lighter.
        assert_relative_eq!(rhok[1], 2400.0 * (1.0 - 1.0e-4 * 10.0));
        // Cooler and solute-enriched: both terms increase the density.
        assert_relative_eq!(rhok[2], 2400.0 * (1.0 + 1.0e-4 * 10.0 + 2.0e-2 * 0.01));
    }

    #[test]
    fn wrongly_dimensioned_temperature_is_fatal() {
        let (_dir, props) = props();
        let t = VolScalarField::uniform("T", Dimensions::DIMENSIONLESS, 900.0, 3);
        let c = VolScalarField::uniform("C", Dimensions::DIMENSIONLESS, 0.04, 3);

        assert!(matches!(
            buoyancy_density(&props, &t, &c).unwrap_err(),
            FieldError::Dimensions(_)
        ));
    }
}
