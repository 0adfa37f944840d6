//! Shell section properties

use serde::{Deserialize, Serialize};

/// Uniform-thickness shell section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Shell thickness
    pub thickness: f64,
}

impl Section {
    /// Create a section with the given thickness
    pub fn new(thickness: f64) -> Self {
        Self { thickness }
    }

    /// Bending inertia per unit width, h³/12
    pub fn inertia(&self) -> f64 {
        self.thickness.powi(3) / 12.0
    }
}
