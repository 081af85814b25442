use std::ops::{Div, Mul};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::error::DimensionError;

/// A named scalar quantity with an attached physical dimension vector.
///
/// This is the currency of the property store: each material property is a
/// `DimensionedScalar`, and every additive combination is checked against the
/// dimension vectors of both operands.
///
/// # Example
///
/// ```
/// use mushy_core::{DimensionedScalar, Dimensions};
///
/// let rho = DimensionedScalar::new("rho", Dimensions::DENSITY, 6930.0);
/// let cp = DimensionedScalar::new("Cp", Dimensions::SPECIFIC_HEAT, 790.0);
///
/// // Multiplicative composition is always legal.
/// let rho_cp = &rho * &cp;
/// assert_eq!(rho_cp.dims(), Dimensions::new(1, -1, -2, -1, 0));
///
/// // Additive combination across dimensions is not.
/// assert!(rho.try_add(&cp).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionedScalar {
    name: String,
    dims: Dimensions,
    value: f64,
}

impl DimensionedScalar {
    #[must_use]
    pub fn new(name: impl Into<String>, dims: Dimensions, value: f64) -> Self {
        Self {
            name: name.into(),
            dims,
            value,
        }
    }

    /// The dimensioned zero used as the default when a property key is
    /// absent on reload.
    #[must_use]
    pub fn zero(name: impl Into<String>, dims: Dimensions) -> Self {
        Self::new(name, dims, 0.0)
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
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Adds another scalar of identical dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::Mismatch`] when the dimension vectors differ.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, DimensionError> {
        self.dims
            .check_same(rhs.dims, format!("{} + {}", self.name, rhs.name))?;
        Ok(Self::new(self.name.clone(), self.dims, self.value + rhs.value))
    }

    /// Subtracts another scalar of identical dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::Mismatch`] when the dimension vectors differ.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, DimensionError> {
        self.dims
            .check_same(rhs.dims, format!("{} - {}", self.name, rhs.name))?;
        Ok(Self::new(self.name.clone(), self.dims, self.value - rhs.value))
    }
}

impl Mul for &DimensionedScalar {
    type Output = DimensionedScalar;

    fn mul(self, rhs: Self) -> DimensionedScalar {
        DimensionedScalar::new(
            format!("{}*{}", self.name, rhs.name),
            self.dims * rhs.dims,
            self.value * rhs.value,
        )
    }
}

impl Div for &DimensionedScalar {
    type Output = DimensionedScalar;

    fn div(self, rhs: Self) -> DimensionedScalar {
        DimensionedScalar::new(
            format!("{}/{}", self.name, rhs.name),
            self.dims / rhs.dims,
            self.value / rhs.value,
        )
    }
}

/// A named vector quantity with an attached dimension vector, such as the
/// gravitational acceleration read from `constant/g.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionedVector {
    name: String,
    dims: Dimensions,
    value: DVec3,
}

impl DimensionedVector {
    #[must_use]
    pub fn new(name: impl Into<String>, dims: Dimensions, value: DVec3) -> Self {
        Self {
            name: name.into(),
            dims,
            value,
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
    pub fn value(&self) -> DVec3 {
        self.value
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.value.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn add_same_dimensions() {
        let a = DimensionedScalar::new("TRef", Dimensions::TEMPERATURE, 900.0);
        let b = DimensionedScalar::new("dT", Dimensions::TEMPERATURE, 15.0);
        let sum = a.try_add(&b).unwrap();
        assert_relative_eq!(sum.value(), 915.0);
        assert_eq!(sum.dims(), Dimensions::TEMPERATURE);
    }

    #[test]
    fn add_incompatible_dimensions_fails() {
        let rho = DimensionedScalar::new("rho", Dimensions::DENSITY, 6930.0);
        let cp = DimensionedScalar::new("Cp", Dimensions::SPECIFIC_HEAT, 790.0);
        let err = rho.try_add(&cp).unwrap_err();
        assert_eq!(
            err,
            DimensionError::Mismatch {
                context: "rho + Cp".into(),
                lhs: Dimensions::DENSITY,
                rhs: Dimensions::SPECIFIC_HEAT,
            }
        );
    }

    #[test]
    fn multiplication_composes_dimensions() {
        let mu = DimensionedScalar::new("mu", Dimensions::DYNAMIC_VISCOSITY, 1.4e-3);
        let rho = DimensionedScalar::new("rho", Dimensions::DENSITY, 7000.0);
        let nu = &mu / &rho;
        assert_eq!(nu.dims(), Dimensions::DIFFUSIVITY);
        assert_relative_eq!(nu.value(), 2.0e-7);
    }

    #[test]
    fn zero_default_carries_dimensions() {
        let das = DimensionedScalar::zero("DAS", Dimensions::LENGTH);
        assert_eq!(das.value(), 0.0);
        assert_eq!(das.dims(), Dimensions::LENGTH);
    }

    #[test]
    fn vector_magnitude() {
        let g = DimensionedVector::new(
            "g",
            Dimensions::ACCELERATION,
            DVec3::new(0.0, -9.81, 0.0),
        );
        assert_relative_eq!(g.magnitude(), 9.81);
    }
}
