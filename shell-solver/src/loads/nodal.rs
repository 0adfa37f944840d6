//! Nodal loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

use super::LoadApplication;
use crate::error::{ShellError, ShellResult};
use crate::math::Vec as FEVec;
use crate::model::Model;

/// A load applied directly to a node, in global axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    /// Loaded node id
    pub node: usize,
    /// Force in X direction
    #[serde(default)]
    pub fx: f64,
    /// Force in Y direction
    #[serde(default)]
    pub fy: f64,
    /// Force in Z direction
    #[serde(default)]
    pub fz: f64,
    /// Moment about X axis
    #[serde(default)]
    pub mx: f64,
    /// Moment about Y axis
    #[serde(default)]
    pub my: f64,
    /// Moment about Z axis
    #[serde(default)]
    pub mz: f64,
}

impl NodalLoad {
    /// Create a new nodal load with all components
    pub fn new(node: usize, components: [f64; 6]) -> Self {
        Self {
            node,
            fx: components[0],
            fy: components[1],
            fz: components[2],
            mx: components[3],
            my: components[4],
            mz: components[5],
        }
    }

    /// Create a force-only nodal load
    pub fn force(node: usize, fx: f64, fy: f64, fz: f64) -> Self {
        Self::new(node, [fx, fy, fz, 0.0, 0.0, 0.0])
    }

    /// Create a moment-only nodal load
    pub fn moment(node: usize, mx: f64, my: f64, mz: f64) -> Self {
        Self::new(node, [0.0, 0.0, 0.0, mx, my, mz])
    }

    /// Create a load in Z direction
    pub fn fz(node: usize, value: f64) -> Self {
        Self::force(node, 0.0, 0.0, value)
    }

    /// Get the load as an array [FX, FY, FZ, MX, MY, MZ]
    pub fn as_array(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }
}

impl LoadApplication for NodalLoad {
    fn apply_to(&self, model: &Model, f: &mut FEVec) -> ShellResult<()> {
        if self.node >= model.nodes.len() {
            return Err(ShellError::InvalidInput(format!(
                "nodal load references missing node {}",
                self.node
            )));
        }
        let base = self.node * 6;
        for (i, value) in self.as_array().iter().enumerate() {
            f[base + i] += value;
        }
        Ok(())
    }
}
