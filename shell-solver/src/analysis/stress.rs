//! Element stress recovery from a static displacement field

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::DOFS_PER_NODE;
use crate::error::ShellResult;
use crate::math::{shell_centroid_stress, shell_transformation_matrix, Vec18};
use crate::model::Model;
use crate::results::AnalysisResult;

/// Fibre at which centroid stresses are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressSurface {
    /// Mid-surface (membrane stresses only)
    #[default]
    Middle,
    /// z = +h/2 in the element frame
    Top,
    /// z = -h/2 in the element frame
    Bottom,
}

impl StressSurface {
    /// Fibre offset for a shell of the given thickness
    pub fn offset(self, thickness: f64) -> f64 {
        match self {
            StressSurface::Middle => 0.0,
            StressSurface::Top => thickness / 2.0,
            StressSurface::Bottom => -thickness / 2.0,
        }
    }
}

/// Compute centroid σx, σy, τxy for every element and store them in `result`
pub fn recover_stresses(
    model: &Model,
    result: &mut AnalysisResult,
    surface: StressSurface,
) -> ShellResult<()> {
    for element in &model.elements {
        let material = model.material(&element.material)?;
        let section = model.section(&element.section)?;
        let geometry = element.geometry();

        let d_global = Vec18::from_fn(|i, _| {
            let node = element.nodes[i / DOFS_PER_NODE];
            result.displacements[node * DOFS_PER_NODE + i % DOFS_PER_NODE]
        });
        let d_local = shell_transformation_matrix(geometry) * d_global;

        let z = surface.offset(section.thickness);
        let [sx, sy, txy] = shell_centroid_stress(material.e, material.nu, geometry, &d_local, z);
        result.add_stress(element.id, sx, sy, txy);
    }

    debug!("recovered {:?} stresses for {} elements", surface, model.elements.len());
    Ok(())
}
