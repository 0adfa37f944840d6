//! Self-weight loads

use serde::{Deserialize, Serialize};

use super::LoadApplication;
use crate::error::ShellResult;
use crate::math::Vec as FEVec;
use crate::model::Model;

/// Standard gravity
pub const GRAVITY: f64 = 9.80665;

/// Unit reconciliation between density and force units in self-weight
pub const SELF_WEIGHT_UNIT_FACTOR: f64 = 1e-6;

/// Gravity acting on every element as a body force
///
/// The components are multipliers of standard gravity along the global axes,
/// so `GravityLoad::new(0.0, 0.0, -1.0)` is ordinary downward self-weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityLoad {
    #[serde(default)]
    pub gx: f64,
    #[serde(default)]
    pub gy: f64,
    #[serde(default)]
    pub gz: f64,
}

impl GravityLoad {
    pub fn new(gx: f64, gy: f64, gz: f64) -> Self {
        Self { gx, gy, gz }
    }

    /// Downward (-Z) self-weight
    pub fn downward() -> Self {
        Self::new(0.0, 0.0, -1.0)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.gx, self.gy, self.gz]
    }
}

impl LoadApplication for GravityLoad {
    fn apply_to(&self, model: &Model, f: &mut FEVec) -> ShellResult<()> {
        let g = self.as_array();
        for element in &model.elements {
            let material = model.material(&element.material)?;
            let section = model.section(&element.section)?;

            // Lumped equally onto the three corners
            let weight = element.area() / 3.0
                * section.thickness
                * material.rho
                * GRAVITY
                * SELF_WEIGHT_UNIT_FACTOR;

            for &node in &element.nodes {
                for (axis, component) in g.iter().enumerate() {
                    f[node * 6 + axis] += weight * component;
                }
            }
        }
        Ok(())
    }
}
