//! Result types for shell analysis

use std::collections::BTreeMap;
use std::f64::consts::PI;

use nalgebra::{Complex, DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisType;
use crate::elements::DOFS_PER_NODE;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Get rotation magnitude
    pub fn rotation_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2) + self.rz.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node (zero on unrestrained components)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }

    /// Get total moment magnitude
    pub fn moment_magnitude(&self) -> f64 {
        (self.mx.powi(2) + self.my.powi(2) + self.mz.powi(2)).sqrt()
    }
}

/// Derived in-plane stress state of one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementStress {
    /// Normal stress in local x
    pub sx: f64,
    /// Normal stress in local y
    pub sy: f64,
    /// In-plane shear stress
    pub txy: f64,
    /// Maximum principal stress
    pub p1: f64,
    /// Minimum principal stress
    pub p2: f64,
    /// Von Mises equivalent stress
    pub von_mises: f64,
    /// Mean of the principal stresses
    pub avg_principal: f64,
    /// Maximum in-plane shear stress (Mohr radius)
    pub max_shear: f64,
}

impl ElementStress {
    /// Create from stress components
    pub fn from_components(sx: f64, sy: f64, txy: f64) -> Self {
        let center = (sx + sy) / 2.0;
        let radius = ((sx - sy).powi(2) / 4.0 + txy.powi(2)).sqrt();
        let p1 = center + radius;
        let p2 = center - radius;

        Self {
            sx,
            sy,
            txy,
            p1,
            p2,
            von_mises: (p1 * p1 + p2 * p2 - p1 * p2).sqrt(),
            avg_principal: (p1 + p2) / 2.0,
            max_shear: radius,
        }
    }
}

/// Output of one analysis run
///
/// Addressed by global DOF (`node * 6 + local_dof`), mode index and element id.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub analysis_type: AnalysisType,
    /// Global displacement vector (zero for modal runs)
    pub displacements: DVector<f64>,
    /// Support reactions by node id
    pub reactions: BTreeMap<usize, Reactions>,
    /// λ = ω² per mode, in solver order
    pub eigenvalues: Option<DVector<Complex<f64>>>,
    /// Mode shapes, one column per mode
    pub eigenvectors: Option<DMatrix<Complex<f64>>>,
    /// Derived stresses by element id
    pub stresses: BTreeMap<usize, ElementStress>,
}

impl AnalysisResult {
    /// Empty result sized for `n_dofs`
    pub fn new(analysis_type: AnalysisType, n_dofs: usize) -> Self {
        Self {
            analysis_type,
            displacements: DVector::zeros(n_dofs),
            reactions: BTreeMap::new(),
            eigenvalues: None,
            eigenvectors: None,
            stresses: BTreeMap::new(),
        }
    }

    /// Global DOF index of `local_dof` at `node`
    pub fn dof_index(node: usize, local_dof: usize) -> usize {
        node * DOFS_PER_NODE + local_dof
    }

    /// Number of nodes covered by the displacement vector
    pub fn n_nodes(&self) -> usize {
        self.displacements.len() / DOFS_PER_NODE
    }

    /// Displacements of one node, if it exists
    pub fn node_displacement(&self, node: usize) -> Option<NodeDisplacement> {
        if node >= self.n_nodes() {
            return None;
        }
        let base = node * DOFS_PER_NODE;
        let mut arr = [0.0; 6];
        arr.copy_from_slice(&self.displacements.as_slice()[base..base + DOFS_PER_NODE]);
        Some(NodeDisplacement::from_array(arr))
    }

    /// Reactions at a supported node
    pub fn node_reactions(&self, node: usize) -> Option<&Reactions> {
        self.reactions.get(&node)
    }

    /// Component-wise sum of all support reactions
    pub fn total_reaction(&self) -> Reactions {
        let mut total = [0.0; 6];
        for r in self.reactions.values() {
            for (sum, value) in total.iter_mut().zip([r.fx, r.fy, r.fz, r.mx, r.my, r.mz]) {
                *sum += value;
            }
        }
        Reactions::from_array(total)
    }

    /// Node with the largest translation and its magnitude
    pub fn max_displacement(&self) -> Option<(usize, f64)> {
        (0..self.n_nodes())
            .filter_map(|n| self.node_displacement(n).map(|d| (n, d.translation_magnitude())))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Number of computed modes
    pub fn n_modes(&self) -> usize {
        self.eigenvalues.as_ref().map_or(0, |v| v.len())
    }

    /// Eigenvalue λ = ω² of one mode
    pub fn eigenvalue(&self, mode: usize) -> Option<Complex<f64>> {
        self.eigenvalues.as_ref().and_then(|v| v.get(mode).copied())
    }

    /// Mode shape of one mode (unit length)
    pub fn mode_shape(&self, mode: usize) -> Option<DVector<Complex<f64>>> {
        let vectors = self.eigenvectors.as_ref()?;
        (mode < vectors.ncols()).then(|| vectors.column(mode).into_owned())
    }

    /// Natural angular frequencies ω = sqrt(Re λ), in solver order
    pub fn angular_frequencies(&self) -> Vec<f64> {
        self.eigenvalues
            .as_ref()
            .map(|values| values.iter().map(|l| l.re.max(0.0).sqrt()).collect())
            .unwrap_or_default()
    }

    /// Natural frequencies f = ω / 2π, in solver order
    pub fn natural_frequencies(&self) -> Vec<f64> {
        self.angular_frequencies()
            .into_iter()
            .map(|omega| omega / (2.0 * PI))
            .collect()
    }

    /// Store derived stresses for an element
    pub fn add_stress(&mut self, element: usize, sx: f64, sy: f64, txy: f64) {
        self.stresses
            .insert(element, ElementStress::from_components(sx, sy, txy));
    }

    /// Derived stresses of one element
    pub fn element_stress(&self, element: usize) -> Option<&ElementStress> {
        self.stresses.get(&element)
    }

    /// Plain-data summary for reporting
    pub fn summary(&self) -> AnalysisSummary {
        let (max_disp_node, max_displacement) = self.max_displacement().unwrap_or((0, 0.0));
        let max_von_mises = self
            .stresses
            .iter()
            .max_by(|a, b| a.1.von_mises.total_cmp(&b.1.von_mises))
            .map(|(&id, s)| (id, s.von_mises));

        AnalysisSummary {
            analysis_type: self.analysis_type,
            total_dofs: self.displacements.len(),
            max_displacement,
            max_disp_node,
            displacements: (0..self.n_nodes())
                .filter_map(|n| self.node_displacement(n))
                .collect(),
            reactions: self.reactions.clone(),
            total_reaction: self.total_reaction(),
            eigenvalues: self
                .eigenvalues
                .as_ref()
                .map(|v| v.iter().map(|l| [l.re, l.im]).collect())
                .unwrap_or_default(),
            frequencies: self.natural_frequencies(),
            stresses: self.stresses.clone(),
            max_von_mises,
        }
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub analysis_type: AnalysisType,
    /// Total DOFs
    pub total_dofs: usize,
    /// Maximum translation
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: usize,
    /// Displacements per node, by id
    pub displacements: Vec<NodeDisplacement>,
    pub reactions: BTreeMap<usize, Reactions>,
    pub total_reaction: Reactions,
    /// Eigenvalues as `[re, im]`
    pub eigenvalues: Vec<[f64; 2]>,
    /// Natural frequencies per mode
    pub frequencies: Vec<f64>,
    pub stresses: BTreeMap<usize, ElementStress>,
    /// Element with the largest von Mises stress
    pub max_von_mises: Option<(usize, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniaxial_stress() {
        let s = ElementStress::from_components(100.0, 0.0, 0.0);
        assert_relative_eq!(s.p1, 100.0);
        assert_relative_eq!(s.p2, 0.0);
        assert_relative_eq!(s.von_mises, 100.0);
        assert_relative_eq!(s.max_shear, 50.0);
        assert_relative_eq!(s.avg_principal, 50.0);
    }

    #[test]
    fn test_pure_shear() {
        let s = ElementStress::from_components(0.0, 0.0, 40.0);
        assert_relative_eq!(s.p1, 40.0);
        assert_relative_eq!(s.p2, -40.0);
        assert_relative_eq!(s.von_mises, 40.0 * 3.0_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(s.max_shear, 40.0);
    }

    #[test]
    fn test_von_mises_matches_component_form() {
        let (sx, sy, txy) = (120.0, -35.0, 22.5);
        let s = ElementStress::from_components(sx, sy, txy);
        let expected = (sx * sx - sx * sy + sy * sy + 3.0 * txy * txy).sqrt();
        assert_relative_eq!(s.von_mises, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_node_addressing() {
        let mut result = AnalysisResult::new(AnalysisType::Static, 12);
        result.displacements[AnalysisResult::dof_index(1, 2)] = -3.0;
        result.displacements[AnalysisResult::dof_index(1, 0)] = 4.0;

        let d = result.node_displacement(1).unwrap();
        assert_eq!(d.dz, -3.0);
        assert_relative_eq!(d.translation_magnitude(), 5.0);
        assert!(result.node_displacement(2).is_none());
        assert_eq!(result.max_displacement(), Some((1, 5.0)));
    }

    #[test]
    fn test_frequencies_from_eigenvalues() {
        let mut result = AnalysisResult::new(AnalysisType::Modal, 6);
        let omega = 2.0 * PI * 5.0;
        result.eigenvalues = Some(DVector::from_vec(vec![
            Complex::new(omega * omega, 0.0),
            Complex::new(-1e-9, 0.0),
        ]));

        let f = result.natural_frequencies();
        assert_relative_eq!(f[0], 5.0, max_relative = 1e-12);
        assert_eq!(f[1], 0.0);
        assert_eq!(result.n_modes(), 2);
        assert!(result.mode_shape(0).is_none());
    }

    #[test]
    fn test_summary_serializes() {
        let mut result = AnalysisResult::new(AnalysisType::Static, 6);
        result.add_stress(3, 10.0, 5.0, 1.0);
        let json = serde_json::to_string(&result.summary()).unwrap();
        assert!(json.contains("\"max_von_mises\":[3,"));
    }
}
