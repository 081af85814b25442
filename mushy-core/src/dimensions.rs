use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

use crate::error::DimensionError;

/// A physical dimension vector with exponents for mass, length, time,
/// temperature, and amount of substance.
///
/// Every dimensioned quantity in the solver carries one of these, and all
/// additive arithmetic is checked against it at run time. Multiplicative
/// composition always succeeds and adds or subtracts exponents; addition
/// between unequal dimensions is an error, never a coercion.
///
/// Serializes as a plain five-element array, so `[1, -3, 0, 0, 0]` in a
/// configuration file is kg/m³.
///
/// # Example
///
/// ```
/// use mushy_core::Dimensions;
///
/// let rho = Dimensions::DENSITY;
/// let v = Dimensions::new(0, 3, 0, 0, 0);
/// assert_eq!(rho * v, Dimensions::MASS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions([i8; 5]);

impl Dimensions {
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0);
    pub const MASS: Self = Self::new(1, 0, 0, 0, 0);
    pub const LENGTH: Self = Self::new(0, 1, 0, 0, 0);
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0);
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 1, 0);
    pub const AMOUNT: Self = Self::new(0, 0, 0, 0, 1);

    /// kg/m³
    pub const DENSITY: Self = Self::new(1, -3, 0, 0, 0);
    /// J/(kg·K)
    pub const SPECIFIC_HEAT: Self = Self::new(0, 2, -2, -1, 0);
    /// W/(m·K)
    pub const THERMAL_CONDUCTIVITY: Self = Self::new(1, 1, -3, -1, 0);
    /// Pa·s
    pub const DYNAMIC_VISCOSITY: Self = Self::new(1, -1, -1, 0, 0);
    /// m²/s
    pub const DIFFUSIVITY: Self = Self::new(0, 2, -1, 0, 0);
    /// 1/K
    pub const PER_TEMPERATURE: Self = Self::new(0, 0, 0, -1, 0);
    /// Pa
    pub const PRESSURE: Self = Self::new(1, -1, -2, 0, 0);
    /// m/s²
    pub const ACCELERATION: Self = Self::new(0, 1, -2, 0, 0);
    /// m²/s², the dimensions of the hydrostatic head `gh`.
    pub const SPECIFIC_ENERGY: Self = Self::new(0, 2, -2, 0, 0);

    #[must_use]
    pub const fn new(mass: i8, length: i8, time: i8, temperature: i8, amount: i8) -> Self {
        Self([mass, length, time, temperature, amount])
    }

    /// Returns the five exponents in `[mass, length, time, temperature, amount]` order.
    #[must_use]
    pub const fn exponents(self) -> [i8; 5] {
        self.0
    }

    #[must_use]
    pub fn recip(self) -> Self {
        Self(self.0.map(|e| -e))
    }

    /// Checks that two dimension vectors are identical, as required before
    /// any additive combination.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::Mismatch`] carrying `context` (typically the
    /// offending expression) when the vectors differ.
    pub fn check_same(self, other: Self, context: impl Into<String>) -> Result<(), DimensionError> {
        if self == other {
            Ok(())
        } else {
            Err(DimensionError::Mismatch {
                context: context.into(),
                lhs: self,
                rhs: other,
            })
        }
    }
}

impl Mul for Dimensions {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (e, r) in out.iter_mut().zip(rhs.0) {
            *e += r;
        }
        Self(out)
    }
}

impl Div for Dimensions {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (e, r) in out.iter_mut().zip(rhs.0) {
            *e -= r;
        }
        Self(out)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m, l, t, th, n] = self.0;
        write!(f, "[{m} {l} {t} {th} {n}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_adds_exponents() {
        let gh = Dimensions::ACCELERATION * Dimensions::LENGTH;
        assert_eq!(gh, Dimensions::SPECIFIC_ENERGY);
    }

    #[test]
    fn division_subtracts_exponents() {
        let nu = Dimensions::DYNAMIC_VISCOSITY / Dimensions::DENSITY;
        assert_eq!(nu, Dimensions::DIFFUSIVITY);
    }

    #[test]
    fn recip_negates() {
        assert_eq!(Dimensions::TEMPERATURE.recip(), Dimensions::PER_TEMPERATURE);
    }

    #[test]
    fn mismatch_is_an_error() {
        let err = Dimensions::DENSITY
            .check_same(Dimensions::SPECIFIC_HEAT, "rho + Cp")
            .unwrap_err();
        assert!(err.to_string().contains("rho + Cp"));
    }

    #[test]
    fn serde_round_trip_as_array() {
        let json = serde_json::to_string(&Dimensions::DENSITY).unwrap();
        assert_eq!(json, "[1,-3,0,0,0]");
        let back: Dimensions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Dimensions::DENSITY);
    }

    #[test]
    fn display_matches_dictionary_form() {
        assert_eq!(Dimensions::DENSITY.to_string(), "[1 -3 0 0 0]");
    }
}
