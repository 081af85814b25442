//! Shared builders for the startup-flow integration tests: a small vertical
//! column case on disk and its matching mesh.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use glam::DVec3;
use serde_json::json;

use mushy_core::{
    BoundaryCondition, Case, CellZone, DimensionedScalar, DimensionedVector, Dimensions, Mesh,
    VolScalarField, VolVectorField,
};

pub const SOLID_RHO: f64 = 2700.0;
pub const LIQUID_RHO: f64 = 2400.0;
pub const BETA_T: f64 = 1.0e-4;
pub const BETA_C: f64 = -2.0e-2;
pub const T_REF: f64 = 900.0;
pub const C_REF: f64 = 0.04;
pub const GRAVITY: f64 = 9.81;
pub const CELL_SPACING: f64 = 0.1;

/// The transport property dictionary every test case starts from.
#[must_use]
pub fn transport_dict() -> serde_json::Value {
    json!({
        "solid": {
            "rho": SOLID_RHO,
            "Cp": 900.0,
            "kappa": 180.0,
            "mu": 1.0,
            "D": 1.0e-12,
            "DAS": 5.0e-5,
        },
        "liquid": {
            "rho": LIQUID_RHO,
            "Cp": 1100.0,
            "kappa": 90.0,
            "mu": 1.3e-3,
            "D": 3.0e-9,
            "betaT": BETA_T,
            "betaC": BETA_C,
            "TRef": T_REF,
            "CRef": C_REF,
        },
    })
}

/// A vertical column of `n` cells with centres at `y = i * CELL_SPACING`
/// and a face below and above each cell.
#[must_use]
pub fn column_mesh(n: usize) -> Mesh {
    let cells = (0..n)
        .map(|i| DVec3::new(0.0, CELL_SPACING * i as f64, 0.0))
        .collect();
    let faces = (0..=n)
        .map(|i| DVec3::new(0.0, CELL_SPACING * (i as f64 - 0.5), 0.0))
        .collect();
    Mesh::new(cells, faces)
        .with_patches(vec![
            "bottom".to_string(),
            "top".to_string(),
            "sides".to_string(),
        ])
        .with_cell_zones(vec![CellZone::new("chill", vec![0])])
}

/// Writes a complete startup case into a directory.
#[derive(Debug, Clone)]
pub struct CaseBuilder {
    n_cells: usize,
    p_rgh: Vec<f64>,
    p_rgh_boundary: BTreeMap<String, BoundaryCondition>,
    t: Vec<f64>,
    c: Vec<f64>,
    h_ref: Option<f64>,
    controls: Option<serde_json::Value>,
    skipped: Vec<&'static str>,
}

impl CaseBuilder {
    #[must_use]
    pub fn new(n_cells: usize) -> Self {
        Self {
            n_cells,
            p_rgh: vec![0.0; n_cells],
            p_rgh_boundary: BTreeMap::from([
                ("bottom".to_string(), BoundaryCondition::ZeroGradient),
                ("top".to_string(), BoundaryCondition::ZeroGradient),
                ("sides".to_string(), BoundaryCondition::ZeroGradient),
            ]),
            t: vec![T_REF; n_cells],
            c: vec![C_REF; n_cells],
            h_ref: None,
            controls: None,
            skipped: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_p_rgh(mut self, values: Vec<f64>) -> Self {
        self.p_rgh = values;
        self
    }

    /// Replaces the top patch with a value-fixing outlet, so `p_rgh` needs
    /// no reference cell.
    #[must_use]
    pub fn with_fixed_outlet(mut self, value: f64) -> Self {
        self.p_rgh_boundary
            .insert("top".to_string(), BoundaryCondition::FixedValue { value });
        self
    }

    #[must_use]
    pub fn with_t(mut self, values: Vec<f64>) -> Self {
        self.t = values;
        self
    }

    #[must_use]
    pub fn with_c(mut self, values: Vec<f64>) -> Self {
        self.c = values;
        self
    }

    #[must_use]
    pub fn with_h_ref(mut self, h_ref: f64) -> Self {
        self.h_ref = Some(h_ref);
        self
    }

    #[must_use]
    pub fn with_controls(mut self, p_ref_cell: usize, p_ref_value: f64) -> Self {
        self.controls = Some(json!({
            "p_ref_cell": p_ref_cell,
            "p_ref_value": p_ref_value,
        }));
        self
    }

    /// Omits a primary field file, to exercise the must-read failure path.
    #[must_use]
    pub fn without_field(mut self, name: &'static str) -> Self {
        self.skipped.push(name);
        self
    }

    /// Writes the case and returns a handle opened at time `0`.
    ///
    /// # Panics
    ///
    /// Panics on any io failure; these builders only run under test.
    #[must_use]
    pub fn write(self, root: &Path) -> Case {
        let case = Case::new(root, "0");

        fs::create_dir_all(case.constant_dir()).unwrap();
        fs::write(
            case.constant_dir().join("transport_properties.json"),
            serde_json::to_vec_pretty(&transport_dict()).unwrap(),
        )
        .unwrap();

        let g = DimensionedVector::new(
            "g",
            Dimensions::ACCELERATION,
            DVec3::new(0.0, -GRAVITY, 0.0),
        );
        fs::write(
            case.constant_dir().join("g.json"),
            serde_json::to_vec_pretty(&g).unwrap(),
        )
        .unwrap();

        if let Some(h_ref) = self.h_ref {
            let h_ref = DimensionedScalar::new("hRef", Dimensions::LENGTH, h_ref);
            fs::write(
                case.constant_dir().join("h_ref.json"),
                serde_json::to_vec_pretty(&h_ref).unwrap(),
            )
            .unwrap();
        }

        if let Some(controls) = &self.controls {
            fs::create_dir_all(case.system_dir()).unwrap();
            fs::write(
                case.system_dir().join("controls.json"),
                serde_json::to_vec_pretty(controls).unwrap(),
            )
            .unwrap();
        }

        if !self.skipped.contains(&"p_rgh") {
            let p_rgh = VolScalarField::new("p_rgh", Dimensions::PRESSURE, self.p_rgh)
                .with_boundary(self.p_rgh_boundary);
            case.write(&p_rgh).unwrap();
        }
        if !self.skipped.contains(&"U") {
            let u = VolVectorField::new(
                "U",
                Dimensions::LENGTH / Dimensions::TIME,
                vec![DVec3::ZERO; self.n_cells],
            );
            case.write_vector(&u).unwrap();
        }
        if !self.skipped.contains(&"T") {
            let t = VolScalarField::new("T", Dimensions::TEMPERATURE, self.t);
            case.write(&t).unwrap();
        }
        if !self.skipped.contains(&"C") {
            let c = VolScalarField::new("C", Dimensions::DIMENSIONLESS, self.c);
            case.write(&c).unwrap();
        }

        case
    }
}
