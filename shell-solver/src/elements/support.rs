//! Support conditions

use serde::{Deserialize, Serialize};

/// Restraint flags at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Supported node id
    pub node: usize,
    /// Restrained in X translation
    #[serde(default)]
    pub dx: bool,
    /// Restrained in Y translation
    #[serde(default)]
    pub dy: bool,
    /// Restrained in Z translation
    #[serde(default)]
    pub dz: bool,
    /// Restrained in X rotation
    #[serde(default)]
    pub rx: bool,
    /// Restrained in Y rotation
    #[serde(default)]
    pub ry: bool,
    /// Restrained in Z rotation
    #[serde(default)]
    pub rz: bool,
}

impl Support {
    /// Create a support with no restraints
    pub fn free(node: usize) -> Self {
        Self {
            node,
            ..Default::default()
        }
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed(node: usize) -> Self {
        Self::with_restraints(node, [true; 6])
    }

    /// Create a pinned support (translations restrained, rotations free)
    pub fn pinned(node: usize) -> Self {
        Self::with_restraints(node, [true, true, true, false, false, false])
    }

    /// Create a support from a `[DX, DY, DZ, RX, RY, RZ]` flag array
    pub fn with_restraints(node: usize, flags: [bool; 6]) -> Self {
        Self {
            node,
            dx: flags[0],
            dy: flags[1],
            dz: flags[2],
            rx: flags[3],
            ry: flags[4],
            rz: flags[5],
        }
    }

    /// Restraint flags as `[DX, DY, DZ, RX, RY, RZ]`
    pub fn restraints(&self) -> [bool; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }

    /// Get list of restrained local DOF indices (0-5)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.restraints()
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then_some(i))
            .collect()
    }

    /// Global DOF indices restrained by this support
    pub fn restrained_global_dofs(&self) -> impl Iterator<Item = usize> + '_ {
        let base = self.node * 6;
        self.restrained_dofs().into_iter().map(move |d| base + d)
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.restraints().iter().any(|&r| r)
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restraints().iter().filter(|&&r| r).count()
    }
}
