use mushy_core::{Dimensions, VolScalarField};

/// Capability trait for two-phase mixture identity.
///
/// Anything that can name its two phases and expose the phase-1 volume
/// fraction can drive the property store. The store takes this by reference
/// at construction and copies what it needs; there is no base-class state.
pub trait TwoPhaseMixture {
    /// Name of the first (solid) phase.
    fn phase1_name(&self) -> &str;

    /// Name of the second (liquid) phase.
    fn phase2_name(&self) -> &str;

    /// Volume fraction of the first phase.
    fn phase_fraction(&self) -> &VolScalarField;
}

/// A plain solid/liquid mixture: two explicit phase names and the solid
/// fraction field.
#[derive(Debug, Clone)]
pub struct SolidLiquid {
    phase1: String,
    phase2: String,
    alpha1: VolScalarField,
}

impl SolidLiquid {
    #[must_use]
    pub fn new(
        phase1: impl Into<String>,
        phase2: impl Into<String>,
        alpha1: VolScalarField,
    ) -> Self {
        Self {
            phase1: phase1.into(),
            phase2: phase2.into(),
            alpha1,
        }
    }

    /// A mixture with a uniform phase-1 fraction, named `alpha.<phase1>`.
    #[must_use]
    pub fn uniform(
        phase1: impl Into<String>,
        phase2: impl Into<String>,
        fraction: f64,
        n_cells: usize,
    ) -> Self {
        let phase1 = phase1.into();
        let alpha1 = VolScalarField::uniform(
            format!("alpha.{phase1}"),
            Dimensions::DIMENSIONLESS,
            fraction,
            n_cells,
        );
        Self {
            phase1,
            phase2: phase2.into(),
            alpha1,
        }
    }
}

impl TwoPhaseMixture for SolidLiquid {
    fn phase1_name(&self) -> &str {
        &self.phase1
    }

    fn phase2_name(&self) -> &str {
        &self.phase2
    }

    fn phase_fraction(&self) -> &VolScalarField {
        &self.alpha1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_mixture_names_its_fraction() {
        let mix = SolidLiquid::uniform("solid", "liquid", 0.0, 8);
        assert_eq!(mix.phase1_name(), "solid");
        assert_eq!(mix.phase2_name(), "liquid");
        assert_eq!(mix.phase_fraction().name(), "alpha.solid");
        assert_eq!(mix.phase_fraction().len(), 8);
    }
}
