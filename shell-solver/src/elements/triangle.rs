//! Triangular shell element - 3 nodes, 6 DOFs per node
//!
//! Connectivity and property references are supplied by the caller; the local
//! frame, local node coordinates and area are derived once when the element is
//! added to a [`Model`](crate::model::Model).

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::DOFS_PER_NODE;
use crate::error::{ShellError, ShellResult};

/// Area below this fraction of the squared longest edge is treated as zero
const DEGENERATE_AREA_RATIO: f64 = 1e-12;

/// Relative tolerance between the two independent area computations
const AREA_AGREEMENT_TOL: f64 = 1e-9;

/// Geometry derived from the element's node positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriGeometry {
    /// Row `i` is node `i` expressed in the element frame (z ≈ 0)
    pub local_coordinates: Matrix3<f64>,
    /// Columns are the local axes ex, ey, ez in global coordinates
    pub rotation: Matrix3<f64>,
    /// Element area
    pub area: f64,
}

impl Default for TriGeometry {
    fn default() -> Self {
        Self {
            local_coordinates: Matrix3::zeros(),
            rotation: Matrix3::identity(),
            area: 0.0,
        }
    }
}

impl TriGeometry {
    /// Derive the element frame from three global node positions
    ///
    /// ex points from node 0 to node 1, ez is normal to the plane following
    /// the node order, and ey = ez × ex.
    pub fn from_coords(element: usize, coords: &[[f64; 3]; 3]) -> ShellResult<Self> {
        let p0 = Vector3::from(coords[0]);
        let p1 = Vector3::from(coords[1]);
        let p2 = Vector3::from(coords[2]);

        let e01 = p1 - p0;
        let e02 = p2 - p0;
        let e12 = p2 - p1;
        let normal = e01.cross(&e02);
        let area = 0.5 * normal.norm();

        let longest = e01.norm_squared().max(e02.norm_squared()).max(e12.norm_squared());
        // NaN coordinates fail this comparison as well
        if !(area > DEGENERATE_AREA_RATIO * longest) {
            return Err(ShellError::DegenerateGeometry { element, area });
        }

        let ex = e01.normalize();
        let ez = normal.normalize();
        let ey = ez.cross(&ex);
        let rotation = Matrix3::from_columns(&[ex, ey, ez]);

        let mut local_coordinates = Matrix3::zeros();
        for (i, p) in [p0, p1, p2].iter().enumerate() {
            let local = rotation.transpose() * (p - p0);
            local_coordinates.set_row(i, &local.transpose());
        }

        let geometry = Self {
            local_coordinates,
            rotation,
            area,
        };

        let local_area = geometry.local_area();
        if ((local_area - area) / area).abs() > AREA_AGREEMENT_TOL {
            return Err(ShellError::DegenerateGeometry {
                element,
                area: local_area,
            });
        }

        Ok(geometry)
    }

    /// Local x coordinates of the three nodes
    pub fn xs(&self) -> [f64; 3] {
        [
            self.local_coordinates[(0, 0)],
            self.local_coordinates[(1, 0)],
            self.local_coordinates[(2, 0)],
        ]
    }

    /// Local y coordinates of the three nodes
    pub fn ys(&self) -> [f64; 3] {
        [
            self.local_coordinates[(0, 1)],
            self.local_coordinates[(1, 1)],
            self.local_coordinates[(2, 1)],
        ]
    }

    /// Area from the in-plane local coordinates (shoelace formula)
    pub fn local_area(&self) -> f64 {
        let [x1, x2, x3] = self.xs();
        let [y1, y2, y3] = self.ys();
        0.5 * ((x2 - x1) * (y3 - y1) - (x3 - x1) * (y2 - y1))
    }

    /// Direction cosine matrix mapping global vectors into the element frame
    pub fn direction_cosines(&self) -> Matrix3<f64> {
        self.rotation.transpose()
    }
}

/// A 3-node flat shell element (CST membrane + DKT bending)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriElement {
    /// Element id
    pub id: usize,
    /// Node ids; the order defines the local axis sense
    pub nodes: [usize; 3],
    /// Material name
    pub material: String,
    /// Section name
    pub section: String,

    /// Derived geometry, populated by the model
    #[serde(skip)]
    pub(crate) geometry: TriGeometry,
}

impl TriElement {
    /// Create a new triangle element
    pub fn new(id: usize, nodes: [usize; 3], material: &str, section: &str) -> Self {
        Self {
            id,
            nodes,
            material: material.to_string(),
            section: section.to_string(),
            geometry: TriGeometry::default(),
        }
    }

    /// Derived geometry (zero area until the element belongs to a model)
    pub fn geometry(&self) -> &TriGeometry {
        &self.geometry
    }

    /// Element area
    pub fn area(&self) -> f64 {
        self.geometry.area
    }

    /// Global DOF index for local node `i`, local DOF `k`
    pub fn global_dof(&self, i: usize, k: usize) -> usize {
        self.nodes[i] * DOFS_PER_NODE + k
    }
}
