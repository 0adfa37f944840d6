//! Load types
//!
//! Each variant knows how to add itself into the global load vector, so the
//! assembler never inspects load kinds.

mod gravity;
mod nodal;

use serde::{Deserialize, Serialize};

use crate::error::ShellResult;
use crate::math::Vec as FEVec;
use crate::model::Model;

pub use gravity::{GravityLoad, GRAVITY, SELF_WEIGHT_UNIT_FACTOR};
pub use nodal::NodalLoad;

/// Contribution of one load to the global load vector
pub trait LoadApplication {
    /// Accumulate this load into `f` (length 6 × node count)
    fn apply_to(&self, model: &Model, f: &mut FEVec) -> ShellResult<()>;
}

/// A load acting on the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    /// Force/moment applied directly at a node
    Nodal(NodalLoad),
    /// Self-weight body force on every element
    Gravity(GravityLoad),
}

impl LoadApplication for Load {
    fn apply_to(&self, model: &Model, f: &mut FEVec) -> ShellResult<()> {
        match self {
            Load::Nodal(load) => load.apply_to(model, f),
            Load::Gravity(load) => load.apply_to(model, f),
        }
    }
}

impl From<NodalLoad> for Load {
    fn from(load: NodalLoad) -> Self {
        Load::Nodal(load)
    }
}

impl From<GravityLoad> for Load {
    fn from(load: GravityLoad) -> Self {
        Load::Gravity(load)
    }
}
