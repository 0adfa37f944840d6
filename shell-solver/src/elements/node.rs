//! Node - a point in 3D space carrying six DOFs

use serde::{Deserialize, Serialize};

/// Number of DOFs per node: DX, DY, DZ, RX, RY, RZ
pub const DOFS_PER_NODE: usize = 6;

/// A 3D node in the finite element model
///
/// The id doubles as the node's block index in the global DOF vector,
/// so global DOF `k` of this node is `id * 6 + k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node id (0-based, equals the node's position in the model)
    pub id: usize,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(id: usize, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// First global DOF index of this node
    pub fn dof_offset(&self) -> usize {
        self.id * DOFS_PER_NODE
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(4, 1.0, 2.0, 3.0);
        assert_eq!(node.coords(), [1.0, 2.0, 3.0]);
        assert_eq!(node.dof_offset(), 24);
    }

    #[test]
    fn test_node_distance() {
        let n1 = Node::new(0, 0.0, 0.0, 0.0);
        let n2 = Node::new(1, 3.0, 4.0, 0.0);
        assert!((n1.distance_to(&n2) - 5.0).abs() < 1e-10);
    }
}
