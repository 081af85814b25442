//! Reference-cell pressure normalization.
//!
//! A reduced-pressure formulation with no value-fixing boundary patch leaves
//! the absolute pressure level undetermined. A single reference cell pins it:
//! the whole field is shifted uniformly so the cell reads the target value.

use serde::{Deserialize, Serialize};

use mushy_core::{Case, CaseError, DimensionError, DimensionedScalar, VolScalarField, case};

use crate::error::InitError;

/// Reference-cell policy, overridable from `system/controls.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub p_ref_cell: usize,
    pub p_ref_value: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            p_ref_cell: 0,
            p_ref_value: 0.0,
        }
    }
}

impl ReferenceConfig {
    /// Reads overrides from the case's solution controls, falling back to
    /// cell 0 and value 0.0 when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] when the controls file exists but cannot be read.
    pub fn from_case(case: &Case) -> Result<Self, CaseError> {
        let read = case::read_json_optional(&case.system_dir().join("controls.json"))?;
        Ok(read.unwrap_or_default())
    }
}

/// The single cell pinning the absolute pressure level. At most one is
/// active per solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCell {
    pub cell: usize,
    pub value: f64,
}

/// Chooses the reference cell for a pressure solve.
///
/// Returns `None` when a boundary patch already fixes the level of `p_rgh`,
/// in which case the pressure field must be left exactly as computed.
///
/// # Errors
///
/// Returns [`InitError::ReferenceCellOutOfRange`] when the configured cell
/// does not exist on this mesh.
pub fn select_reference(
    p_rgh: &VolScalarField,
    config: ReferenceConfig,
    n_cells: usize,
) -> Result<Option<ReferenceCell>, InitError> {
    if !p_rgh.need_reference() {
        return Ok(None);
    }
    if config.p_ref_cell >= n_cells {
        return Err(InitError::ReferenceCellOutOfRange {
            cell: config.p_ref_cell,
            n_cells,
        });
    }
    Ok(Some(ReferenceCell {
        cell: config.p_ref_cell,
        value: config.p_ref_value,
    }))
}

/// Shifts the whole pressure field by `target − p[cell]`, pinning its
/// absolute level while preserving the relative spatial structure.
///
/// # Errors
///
/// Propagates a dimension mismatch from the underlying shift.
pub fn apply_reference(
    p: &mut VolScalarField,
    reference: &ReferenceCell,
) -> Result<(), DimensionError> {
    let delta = DimensionedScalar::new(
        p.name().to_string(),
        p.dims(),
        reference.value - p[reference.cell],
    );
    p.shift(&delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use approx::assert_relative_eq;
    use tempfile::tempdir;

    use mushy_core::{BoundaryCondition, Dimensions};

    fn free_p_rgh(n: usize) -> VolScalarField {
        VolScalarField::uniform("p_rgh", Dimensions::PRESSURE, 0.0, n).with_boundary(
            BTreeMap::from([("walls".to_string(), BoundaryCondition::ZeroGradient)]),
        )
    }

    #[test]
    fn defaults_to_cell_zero_and_value_zero() {
        let config = ReferenceConfig::default();
        assert_eq!(config.p_ref_cell, 0);
        assert_relative_eq!(config.p_ref_value, 0.0);
    }

    #[test]
    fn controls_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let case = Case::new(dir.path(), "0");
        std::fs::create_dir_all(case.system_dir()).unwrap();
        std::fs::write(
            case.system_dir().join("controls.json"),
            br#"{ "p_ref_cell": 7, "p_ref_value": 101325.0 }"#,
        )
        .unwrap();

        let config = ReferenceConfig::from_case(&case).unwrap();
        assert_eq!(config.p_ref_cell, 7);
        assert_relative_eq!(config.p_ref_value, 101325.0);
    }

    #[test]
    fn no_reference_when_boundary_fixes_the_level() {
        let p_rgh = VolScalarField::uniform("p_rgh", Dimensions::PRESSURE, 0.0, 4).with_boundary(
            BTreeMap::from([(
                "outlet".to_string(),
                BoundaryCondition::FixedValue { value: 0.0 },
            )]),
        );
        let selected = select_reference(&p_rgh, ReferenceConfig::default(), 4).unwrap();
        assert!(selected.is_none());
    }

    #[test]
    fn out_of_range_cell_is_fatal() {
        let config = ReferenceConfig {
            p_ref_cell: 10,
            p_ref_value: 0.0,
        };
        assert!(matches!(
            select_reference(&free_p_rgh(4), config, 4).unwrap_err(),
            InitError::ReferenceCellOutOfRange { cell: 10, n_cells: 4 }
        ));
    }

    #[test]
    fn normalization_is_a_uniform_shift() {
        let old = vec![3.5, -1.0, 12.25, 0.0];
        let mut p = VolScalarField::new("p", Dimensions::PRESSURE, old.clone());
        let reference = select_reference(&free_p_rgh(4), ReferenceConfig::default(), 4)
            .unwrap()
            .unwrap();

        apply_reference(&mut p, &reference).unwrap();

        let v0 = old[0];
        for (new, orig) in p.values().iter().zip(&old) {
            assert_relative_eq!(*new, orig - v0);
        }
        assert_relative_eq!(p[reference.cell], reference.value);
    }
}
