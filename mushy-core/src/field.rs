//! Volumetric and surface fields over a finite-volume mesh.
//!
//! A field stores one value per control volume (or per face) together with
//! its physical dimension vector and, for volumetric fields, the boundary
//! metadata read from the case. Field arithmetic checks dimensions and sizes
//! on every additive combination; there is no unchecked path.

use std::collections::BTreeMap;
use std::ops::Index;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::error::{DimensionError, FieldError};
use crate::scalar::DimensionedScalar;

/// Boundary metadata attached to a volumetric field, one entry per patch.
///
/// Only the condition *kind* matters here: a field with at least one
/// value-fixing patch has its absolute level anchored by the boundary and
/// needs no reference cell. Evaluation of boundary values belongs to the
/// surrounding solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryCondition {
    FixedValue { value: f64 },
    ZeroGradient,
}

impl BoundaryCondition {
    /// Whether this condition pins the field's absolute level.
    #[must_use]
    pub fn fixes_value(&self) -> bool {
        matches!(self, BoundaryCondition::FixedValue { .. })
    }
}

/// A scalar field with one value per control volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolScalarField {
    name: String,
    dims: Dimensions,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    boundary: BTreeMap<String, BoundaryCondition>,
    values: Vec<f64>,
}

impl VolScalarField {
    #[must_use]
    pub fn new(name: impl Into<String>, dims: Dimensions, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            dims,
            boundary: BTreeMap::new(),
            values,
        }
    }

    /// A field holding the same value in every control volume.
    #[must_use]
    pub fn uniform(name: impl Into<String>, dims: Dimensions, value: f64, n_cells: usize) -> Self {
        Self::new(name, dims, vec![value; n_cells])
    }

    /// Attaches boundary metadata, replacing any existing entries.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BTreeMap<String, BoundaryCondition>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Renames the field, keeping values and dimensions.
    ///
    /// Derived fields are built by composition and then given their solver
    /// name, e.g. `p_rgh + rhok*gh` renamed to `p`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    #[must_use]
    pub fn boundary(&self) -> &BTreeMap<String, BoundaryCondition> {
        &self.boundary
    }

    /// True when no boundary patch fixes the field's value, so the field is
    /// determined only up to an additive constant and a reference cell must
    /// pin its absolute level.
    #[must_use]
    pub fn need_reference(&self) -> bool {
        !self.boundary.values().any(BoundaryCondition::fixes_value)
    }

    fn check_size(&self, rhs: &Self, op: &str) -> Result<(), FieldError> {
        if self.values.len() == rhs.values.len() {
            Ok(())
        } else {
            Err(FieldError::SizeMismatch {
                context: format!("{} {op} {}", self.name, rhs.name),
                lhs: self.values.len(),
                rhs: rhs.values.len(),
            })
        }
    }

    fn zip_with(&self, rhs: &Self, dims: Dimensions, op: impl Fn(f64, f64) -> f64) -> Self {
        let values = self
            .values
            .iter()
            .zip(&rhs.values)
            .map(|(a, b)| op(*a, *b))
            .collect();
        Self {
            name: self.name.clone(),
            dims,
            boundary: BTreeMap::new(),
            values,
        }
    }

    /// Cell-wise sum of two fields of identical dimensions and size.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] on a dimension or size mismatch.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.check_size(rhs, "+")?;
        self.dims
            .check_same(rhs.dims, format!("{} + {}", self.name, rhs.name))?;
        Ok(self.zip_with(rhs, self.dims, |a, b| a + b))
    }

    /// Cell-wise difference of two fields of identical dimensions and size.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] on a dimension or size mismatch.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.check_size(rhs, "-")?;
        self.dims
            .check_same(rhs.dims, format!("{} - {}", self.name, rhs.name))?;
        Ok(self.zip_with(rhs, self.dims, |a, b| a - b))
    }

    /// Cell-wise product; the dimension vectors compose.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::SizeMismatch`] when the cell counts differ.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.check_size(rhs, "*")?;
        Ok(self.zip_with(rhs, self.dims * rhs.dims, |a, b| a * b))
    }

    /// Subtracts a uniform dimensioned scalar from every cell.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::Mismatch`] when the scalar's dimensions
    /// differ from the field's.
    pub fn try_sub_scalar(&self, rhs: &DimensionedScalar) -> Result<Self, DimensionError> {
        self.dims
            .check_same(rhs.dims(), format!("{} - {}", self.name, rhs.name()))?;
        let mut out = self.clone();
        out.boundary.clear();
        for v in &mut out.values {
            *v -= rhs.value();
        }
        Ok(out)
    }

    /// Multiplies every cell by a dimensioned scalar; dimensions compose.
    #[must_use]
    pub fn mul_scalar(&self, rhs: &DimensionedScalar) -> Self {
        let values = self.values.iter().map(|v| v * rhs.value()).collect();
        Self {
            name: self.name.clone(),
            dims: self.dims * rhs.dims(),
            boundary: BTreeMap::new(),
            values,
        }
    }

    /// Shifts the whole field by a uniform dimensioned scalar, preserving its
    /// relative spatial structure. This is the reference-cell normalization
    /// primitive; it is never a local edit.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::Mismatch`] when the scalar's dimensions
    /// differ from the field's.
    pub fn shift(&mut self, delta: &DimensionedScalar) -> Result<(), DimensionError> {
        self.dims
            .check_same(delta.dims(), format!("{} + {}", self.name, delta.name()))?;
        for v in &mut self.values {
            *v += delta.value();
        }
        Ok(())
    }
}

impl Index<usize> for VolScalarField {
    type Output = f64;

    fn index(&self, cell: usize) -> &f64 {
        &self.values[cell]
    }
}

/// A vector field with one value per control volume, such as the velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolVectorField {
    name: String,
    dims: Dimensions,
    values: Vec<DVec3>,
}

impl VolVectorField {
    #[must_use]
    pub fn new(name: impl Into<String>, dims: Dimensions, values: Vec<DVec3>) -> Self {
        Self {
            name: name.into(),
            dims,
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[DVec3] {
        &self.values
    }
}

/// A scalar field with one value per mesh face, such as the face-interpolated
/// hydrostatic head `ghf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceScalarField {
    name: String,
    dims: Dimensions,
    values: Vec<f64>,
}

impl SurfaceScalarField {
    #[must_use]
    pub fn new(name: impl Into<String>, dims: Dimensions, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            dims,
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn patch(name: &str, bc: BoundaryCondition) -> BTreeMap<String, BoundaryCondition> {
        BTreeMap::from([(name.to_string(), bc)])
    }

    #[test]
    fn add_checks_dimensions() {
        let t = VolScalarField::uniform("T", Dimensions::TEMPERATURE, 900.0, 4);
        let c = VolScalarField::uniform("C", Dimensions::DIMENSIONLESS, 0.05, 4);
        let err = t.try_add(&c).unwrap_err();
        assert!(matches!(err, FieldError::Dimensions(_)));
    }

    #[test]
    fn add_checks_sizes() {
        let a = VolScalarField::uniform("a", Dimensions::PRESSURE, 1.0, 4);
        let b = VolScalarField::uniform("b", Dimensions::PRESSURE, 1.0, 5);
        let err = a.try_add(&b).unwrap_err();
        assert_eq!(
            err,
            FieldError::SizeMismatch {
                context: "a + b".into(),
                lhs: 4,
                rhs: 5,
            }
        );
    }

    #[test]
    fn mul_composes_dimensions() {
        let rhok = VolScalarField::uniform("rhok", Dimensions::DENSITY, 7000.0, 3);
        let gh = VolScalarField::new(
            "gh",
            Dimensions::SPECIFIC_ENERGY,
            vec![0.0, -4.905, -9.81],
        );
        let prod = rhok.try_mul(&gh).unwrap();
        assert_eq!(prod.dims(), Dimensions::PRESSURE);
        assert_relative_eq!(prod[1], -34335.0);
    }

    #[test]
    fn shift_is_uniform() {
        let mut p = VolScalarField::new("p", Dimensions::PRESSURE, vec![3.0, 5.0, -2.0]);
        let delta = DimensionedScalar::new("p", Dimensions::PRESSURE, -3.0);
        p.shift(&delta).unwrap();
        assert_eq!(p.values(), &[0.0, 2.0, -5.0]);
    }

    #[test]
    fn shift_rejects_wrong_dimensions() {
        let mut p = VolScalarField::uniform("p", Dimensions::PRESSURE, 0.0, 2);
        let delta = DimensionedScalar::new("dT", Dimensions::TEMPERATURE, 1.0);
        assert!(p.shift(&delta).is_err());
    }

    #[test]
    fn need_reference_without_value_fixing_patch() {
        let p_rgh = VolScalarField::uniform("p_rgh", Dimensions::PRESSURE, 0.0, 4)
            .with_boundary(patch("walls", BoundaryCondition::ZeroGradient));
        assert!(p_rgh.need_reference());
    }

    #[test]
    fn no_reference_needed_with_fixed_value_patch() {
        let p_rgh = VolScalarField::uniform("p_rgh", Dimensions::PRESSURE, 0.0, 4)
            .with_boundary(patch("outlet", BoundaryCondition::FixedValue { value: 0.0 }));
        assert!(!p_rgh.need_reference());
    }

    #[test]
    fn boundary_survives_serde() {
        let field = VolScalarField::uniform("p_rgh", Dimensions::PRESSURE, 1.5, 2)
            .with_boundary(patch("top", BoundaryCondition::FixedValue { value: 0.0 }));
        let json = serde_json::to_string(&field).unwrap();
        let back: VolScalarField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
        assert!(!back.need_reference());
    }
}
