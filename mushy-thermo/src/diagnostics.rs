//! Operator-facing mesh diagnostics. Logging only, no state; a missing zone
//! or patch name is never an error here.

use tracing::info;

use mushy_core::Mesh;

/// Enumerates cell zones (with cell counts) and boundary patches.
pub fn log_mesh_summary(mesh: &Mesh) {
    info!("detected cell zones:");
    for zone in mesh.cell_zones() {
        info!("  - {} ({} cells)", zone.name, zone.cells.len());
    }

    info!("detected boundary patches:");
    for patch in mesh.patches() {
        info!("  - {patch}");
    }

    if let Some(zone) = mesh.find_zone("stator") {
        info!("creating mask for zone stator with {} cells", zone.cells.len());
    }

    info!("finished zone/patch detection");
}
