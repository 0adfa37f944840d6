//! Material properties

use serde::{Deserialize, Serialize};

/// Tonnes per cubic metre to tonnes per cubic millimetre
const T_PER_M3_TO_T_PER_MM3: f64 = 1e-9;

/// Isotropic linear-elastic material
///
/// Units are whatever the model uses consistently; the reference scenario
/// works in N and mm (E in N/mm²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus)
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Mass density
    pub rho: f64,
}

impl Material {
    /// Create a new material from E, nu and density
    pub fn new(e: f64, nu: f64, rho: f64) -> Self {
        Self { e, nu, rho }
    }

    /// Shear modulus G = E / (2 (1 + nu))
    pub fn shear_modulus(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }

    /// Structural steel in N/mm² with density in t/m³
    ///
    /// This is the density unit self-weight expects. Modal analysis needs
    /// [`Material::steel_modal`].
    pub fn steel() -> Self {
        Self {
            e: 205_000.0,
            nu: 0.3,
            rho: 7.85,
        }
    }

    /// Aluminium alloy in N/mm² with density in t/m³
    pub fn aluminum() -> Self {
        Self {
            e: 70_000.0,
            nu: 0.33,
            rho: 2.7,
        }
    }

    /// Structural steel with density in t/mm³, the mass unit consistent
    /// with N, mm and s. Natural frequencies then come out in Hz.
    pub fn steel_modal() -> Self {
        Self::steel().with_density_per_mm3()
    }

    /// Aluminium alloy with density in t/mm³
    pub fn aluminum_modal() -> Self {
        Self::aluminum().with_density_per_mm3()
    }

    /// Convert a t/m³ density to t/mm³
    pub fn with_density_per_mm3(self) -> Self {
        Self {
            rho: self.rho * T_PER_M3_TO_T_PER_MM3,
            ..self
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
