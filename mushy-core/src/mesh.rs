//! Minimal finite-volume mesh model.
//!
//! Only what the reference-state derivation needs: cell and face centres for
//! the hydrostatic head, named cell zones and boundary patches for operator
//! diagnostics, and the flux-required flag consumed by the pressure-correction
//! loop. Mesh generation and connectivity live outside this crate.

use std::collections::BTreeSet;

use glam::DVec3;

/// A named set of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellZone {
    pub name: String,
    pub cells: Vec<usize>,
}

impl CellZone {
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// The computational grid as seen by the reference-state initializer.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    cell_centres: Vec<DVec3>,
    face_centres: Vec<DVec3>,
    cell_zones: Vec<CellZone>,
    patches: Vec<String>,
    flux_required: BTreeSet<String>,
}

impl Mesh {
    #[must_use]
    pub fn new(cell_centres: Vec<DVec3>, face_centres: Vec<DVec3>) -> Self {
        Self {
            cell_centres,
            face_centres,
            cell_zones: Vec::new(),
            patches: Vec::new(),
            flux_required: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_cell_zones(mut self, zones: Vec<CellZone>) -> Self {
        self.cell_zones = zones;
        self
    }

    #[must_use]
    pub fn with_patches(mut self, patches: Vec<String>) -> Self {
        self.patches = patches;
        self
    }

    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.cell_centres.len()
    }

    #[must_use]
    pub fn n_faces(&self) -> usize {
        self.face_centres.len()
    }

    #[must_use]
    pub fn cell_centres(&self) -> &[DVec3] {
        &self.cell_centres
    }

    #[must_use]
    pub fn face_centres(&self) -> &[DVec3] {
        &self.face_centres
    }

    #[must_use]
    pub fn cell_zones(&self) -> &[CellZone] {
        &self.cell_zones
    }

    #[must_use]
    pub fn find_zone(&self, name: &str) -> Option<&CellZone> {
        self.cell_zones.iter().find(|z| z.name == name)
    }

    #[must_use]
    pub fn patches(&self) -> &[String] {
        &self.patches
    }

    /// Marks a field as requiring flux-consistency enforcement downstream.
    pub fn set_flux_required(&mut self, field: &str) {
        self.flux_required.insert(field.to_string());
    }

    #[must_use]
    pub fn flux_required(&self, field: &str) -> bool {
        self.flux_required.contains(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_are_found_by_name() {
        let mesh = Mesh::new(vec![DVec3::ZERO; 6], vec![])
            .with_cell_zones(vec![CellZone::new("stator", vec![0, 1, 2])]);
        assert_eq!(mesh.find_zone("stator").unwrap().cells.len(), 3);
        assert!(mesh.find_zone("rotor").is_none());
    }

    #[test]
    fn flux_required_flag() {
        let mut mesh = Mesh::new(vec![DVec3::ZERO; 2], vec![]);
        assert!(!mesh.flux_required("p_rgh"));
        mesh.set_flux_required("p_rgh");
        assert!(mesh.flux_required("p_rgh"));
    }
}
