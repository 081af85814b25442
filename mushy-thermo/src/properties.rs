//! The two-phase property store.
//!
//! Material properties for the solid and liquid phases are read from the
//! case's `constant/transport_properties.json`, a two-section dictionary
//! keyed by phase name. Each property has a fixed expected dimension vector;
//! an entry may declare its own, which must then agree exactly.
//!
//! Construction is strict: every declared key of each phase must be present.
//! [`SolidificationProperties::read`] is deliberately lenient instead,
//! substituting a correctly-dimensioned zero for any absent key. The
//! asymmetry mirrors restart behavior the solver relies on: a restart may
//! relax properties, first startup may not.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::info;

use mushy_core::{Case, DimensionedScalar, Dimensions, Mesh, VolScalarField, case};

use crate::error::ConfigError;
use crate::mixture::TwoPhaseMixture;

const DICT_FILE: &str = "transport_properties.json";

/// A raw dictionary entry: a bare number takes the property's expected
/// dimensions, an object may declare its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PropertyEntry {
    Bare(f64),
    Dimensioned { dims: Dimensions, value: f64 },
}

type PhaseDict = BTreeMap<String, PropertyEntry>;
type TransportDict = BTreeMap<String, PhaseDict>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadMode {
    /// Initial construction: every declared key must be present.
    Strict,
    /// Reload: an absent key becomes a dimensioned zero.
    Lenient,
}

fn lookup(
    dict: &TransportDict,
    phase: &str,
    key: &'static str,
    dims: Dimensions,
    mode: ReadMode,
) -> Result<DimensionedScalar, ConfigError> {
    let phase_dict = dict.get(phase).ok_or_else(|| ConfigError::MissingPhase {
        phase: phase.to_string(),
    })?;
    match phase_dict.get(key) {
        None => match mode {
            ReadMode::Strict => Err(ConfigError::MissingProperty {
                phase: phase.to_string(),
                key,
            }),
            ReadMode::Lenient => Ok(DimensionedScalar::zero(key, dims)),
        },
        Some(PropertyEntry::Bare(value)) => Ok(DimensionedScalar::new(key, dims, *value)),
        Some(PropertyEntry::Dimensioned { dims: declared, value }) => {
            if *declared == dims {
                Ok(DimensionedScalar::new(key, dims, *value))
            } else {
                Err(ConfigError::WrongDimensions {
                    phase: phase.to_string(),
                    key,
                    declared: *declared,
                    expected: dims,
                })
            }
        }
    }
}

/// The full set of dimensioned property values, replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq)]
struct PropertySet {
    rho1: DimensionedScalar,
    rho2: DimensionedScalar,
    cp1: DimensionedScalar,
    cp2: DimensionedScalar,
    kappa1: DimensionedScalar,
    kappa2: DimensionedScalar,
    mu1: DimensionedScalar,
    mu2: DimensionedScalar,
    d1: DimensionedScalar,
    d2: DimensionedScalar,
    das: DimensionedScalar,
    beta_t: DimensionedScalar,
    beta_c: DimensionedScalar,
    t_ref: DimensionedScalar,
    c_ref: DimensionedScalar,
}

impl PropertySet {
    fn from_dict(
        dict: &TransportDict,
        phase1: &str,
        phase2: &str,
        mode: ReadMode,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            rho1: lookup(dict, phase1, "rho", Dimensions::DENSITY, mode)?,
            rho2: lookup(dict, phase2, "rho", Dimensions::DENSITY, mode)?,
            cp1: lookup(dict, phase1, "Cp", Dimensions::SPECIFIC_HEAT, mode)?,
            cp2: lookup(dict, phase2, "Cp", Dimensions::SPECIFIC_HEAT, mode)?,
            kappa1: lookup(dict, phase1, "kappa", Dimensions::THERMAL_CONDUCTIVITY, mode)?,
            kappa2: lookup(dict, phase2, "kappa", Dimensions::THERMAL_CONDUCTIVITY, mode)?,
            mu1: lookup(dict, phase1, "mu", Dimensions::DYNAMIC_VISCOSITY, mode)?,
            mu2: lookup(dict, phase2, "mu", Dimensions::DYNAMIC_VISCOSITY, mode)?,
            d1: lookup(dict, phase1, "D", Dimensions::DIFFUSIVITY, mode)?,
            d2: lookup(dict, phase2, "D", Dimensions::DIFFUSIVITY, mode)?,
            das: lookup(dict, phase1, "DAS", Dimensions::LENGTH, mode)?,
            beta_t: lookup(dict, phase2, "betaT", Dimensions::PER_TEMPERATURE, mode)?,
            beta_c: lookup(dict, phase2, "betaC", Dimensions::DIMENSIONLESS, mode)?,
            t_ref: lookup(dict, phase2, "TRef", Dimensions::TEMPERATURE, mode)?,
            c_ref: lookup(dict, phase2, "CRef", Dimensions::DIMENSIONLESS, mode)?,
        })
    }
}

/// Dimensioned material properties for the two phases of a solidifying
/// mixture.
///
/// Owns the property values exclusively; they are immutable between reloads
/// and replaced wholesale by [`read`](Self::read). Accessors return clones of
/// the stored scalars, so a caller holding one across a reload keeps a
/// consistent value.
#[derive(Debug)]
pub struct SolidificationProperties {
    phase1_name: String,
    phase2_name: String,
    source: PathBuf,
    props: RwLock<PropertySet>,
}

impl SolidificationProperties {
    /// Loads the properties for both phases from the case's transport
    /// property dictionary. Strict: a missing phase subsection or property
    /// key fails construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the dictionary is absent or malformed,
    /// a phase subsection or key is missing, or a declared dimension vector
    /// disagrees with the expected one.
    pub fn new(case: &Case, mixture: &impl TwoPhaseMixture) -> Result<Self, ConfigError> {
        let source = case.constant_dir().join(DICT_FILE);
        info!(path = %source.display(), "reading transport properties");

        let dict: TransportDict = case::read_json(&source)?;
        let props = PropertySet::from_dict(
            &dict,
            mixture.phase1_name(),
            mixture.phase2_name(),
            ReadMode::Strict,
        )?;

        Ok(Self {
            phase1_name: mixture.phase1_name().to_string(),
            phase2_name: mixture.phase2_name().to_string(),
            source,
            props: RwLock::new(props),
        })
    }

    /// Re-reads every property from the same configuration source.
    ///
    /// Lenient: an absent key becomes a correctly-dimensioned zero. The
    /// replacement set is built completely before being swapped in under the
    /// write lock, so concurrent readers observe either the old values or
    /// the new ones, never a mixture. Returns `true` on every successful
    /// re-read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the dictionary cannot be read at all, a
    /// phase subsection is missing, or a declared dimension vector disagrees
    /// with the expected one.
    pub fn read(&self) -> Result<bool, ConfigError> {
        let dict: TransportDict = case::read_json(&self.source)?;
        let props = PropertySet::from_dict(
            &dict,
            &self.phase1_name,
            &self.phase2_name,
            ReadMode::Lenient,
        )?;
        *self.props.write() = props;
        Ok(true)
    }

    #[must_use]
    pub fn phase1_name(&self) -> &str {
        &self.phase1_name
    }

    #[must_use]
    pub fn phase2_name(&self) -> &str {
        &self.phase2_name
    }

    /// The mixture density before phase-fraction weighting: the phase-1
    /// density broadcast over the mesh.
    #[must_use]
    pub fn rho(&self, mesh: &Mesh) -> VolScalarField {
        let rho1 = self.rho1();
        VolScalarField::uniform("rho", rho1.dims(), rho1.value(), mesh.n_cells())
    }

    #[must_use]
    pub fn rho1(&self) -> DimensionedScalar {
        self.props.read().rho1.clone()
    }

    #[must_use]
    pub fn rho2(&self) -> DimensionedScalar {
        self.props.read().rho2.clone()
    }

    #[must_use]
    pub fn cp1(&self) -> DimensionedScalar {
        self.props.read().cp1.clone()
    }

    #[must_use]
    pub fn cp2(&self) -> DimensionedScalar {
        self.props.read().cp2.clone()
    }

    #[must_use]
    pub fn kappa1(&self) -> DimensionedScalar {
        self.props.read().kappa1.clone()
    }

    #[must_use]
    pub fn kappa2(&self) -> DimensionedScalar {
        self.props.read().kappa2.clone()
    }

    #[must_use]
    pub fn mu1(&self) -> DimensionedScalar {
        self.props.read().mu1.clone()
    }

    #[must_use]
    pub fn mu2(&self) -> DimensionedScalar {
        self.props.read().mu2.clone()
    }

    #[must_use]
    pub fn d1(&self) -> DimensionedScalar {
        self.props.read().d1.clone()
    }

    #[must_use]
    pub fn d2(&self) -> DimensionedScalar {
        self.props.read().d2.clone()
    }

    /// Dendrite arm spacing of the solid phase.
    #[must_use]
    pub fn das(&self) -> DimensionedScalar {
        self.props.read().das.clone()
    }

    /// Thermal expansion coefficient of the liquid phase.
    #[must_use]
    pub fn beta_t(&self) -> DimensionedScalar {
        self.props.read().beta_t.clone()
    }

    /// Solutal expansion coefficient of the liquid phase.
    #[must_use]
    pub fn beta_c(&self) -> DimensionedScalar {
        self.props.read().beta_c.clone()
    }

    /// Reference temperature of the buoyancy linearization.
    #[must_use]
    pub fn t_ref(&self) -> DimensionedScalar {
        self.props.read().t_ref.clone()
    }

    /// Reference concentration of the buoyancy linearization.
    #[must_use]
    pub fn c_ref(&self) -> DimensionedScalar {
        self.props.read().c_ref.clone()
    }
}
