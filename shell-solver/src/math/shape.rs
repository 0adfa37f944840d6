//! Shape functions for the flat triangular shell
//!
//! - Membrane: linear (CST) functions with constant gradients
//! - Bending: Discrete Kirchhoff Triangle interpolation of the normal
//!   rotations βx, βy from the nodal (w, θx, θy) DOFs
//!
//! References:
//! - Batoz, Bathe & Ho, "A study of three-node triangular plate bending
//!   elements", IJNME 15 (1980)

/// Constant gradients of the three linear (area coordinate) functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CstGradients {
    /// dNi/dx
    pub dn_dx: [f64; 3],
    /// dNi/dy
    pub dn_dy: [f64; 3],
}

impl CstGradients {
    /// Gradients from local in-plane node coordinates
    pub fn new(xs: &[f64; 3], ys: &[f64; 3]) -> Self {
        let [x1, x2, x3] = *xs;
        let [y1, y2, y3] = *ys;
        let two_a = (x2 - x1) * (y3 - y1) - (x3 - x1) * (y2 - y1);

        Self {
            dn_dx: [(y2 - y3) / two_a, (y3 - y1) / two_a, (y1 - y2) / two_a],
            dn_dy: [(x3 - x2) / two_a, (x1 - x3) / two_a, (x2 - x1) / two_a],
        }
    }
}

/// Linear membrane shape functions at area coordinates `l`
#[inline]
pub fn linear_shape(l: &[f64; 3]) -> [f64; 3] {
    *l
}

/// Quadratic 6-node triangle functions and their natural derivatives at (ξ, η)
///
/// Ordering: corners 1, 2, 3 then midsides 4 (edge 2-3), 5 (edge 3-1),
/// 6 (edge 1-2).
#[derive(Debug, Clone, Copy)]
struct Quadratic6 {
    n: [f64; 6],
    dn_dxi: [f64; 6],
    dn_deta: [f64; 6],
}

impl Quadratic6 {
    fn at(xi: f64, eta: f64) -> Self {
        let l1 = 1.0 - xi - eta;
        Self {
            n: [
                l1 * (2.0 * l1 - 1.0),
                xi * (2.0 * xi - 1.0),
                eta * (2.0 * eta - 1.0),
                4.0 * xi * eta,
                4.0 * eta * l1,
                4.0 * xi * l1,
            ],
            dn_dxi: [
                1.0 - 4.0 * l1,
                4.0 * xi - 1.0,
                0.0,
                4.0 * eta,
                -4.0 * eta,
                4.0 * (l1 - xi),
            ],
            dn_deta: [
                1.0 - 4.0 * l1,
                0.0,
                4.0 * eta - 1.0,
                4.0 * xi,
                4.0 * (l1 - eta),
                -4.0 * xi,
            ],
        }
    }
}

/// Per-edge geometric coefficients of the DKT element
///
/// Index 0, 1, 2 refers to edges 2-3, 3-1 and 1-2 (midside nodes 4, 5, 6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DktCoefficients {
    pub a: [f64; 3],
    pub b: [f64; 3],
    pub c: [f64; 3],
    pub d: [f64; 3],
    pub e: [f64; 3],
    x31: f64,
    x12: f64,
    y31: f64,
    y12: f64,
    det_j: f64,
}

impl DktCoefficients {
    /// Coefficients from local in-plane node coordinates
    pub fn new(xs: &[f64; 3], ys: &[f64; 3]) -> Self {
        let edges = [(1, 2), (2, 0), (0, 1)];
        let mut coeffs = Self {
            a: [0.0; 3],
            b: [0.0; 3],
            c: [0.0; 3],
            d: [0.0; 3],
            e: [0.0; 3],
            x31: xs[2] - xs[0],
            x12: xs[0] - xs[1],
            y31: ys[2] - ys[0],
            y12: ys[0] - ys[1],
            det_j: 0.0,
        };
        coeffs.det_j = coeffs.x31 * coeffs.y12 - coeffs.x12 * coeffs.y31;

        for (k, &(i, j)) in edges.iter().enumerate() {
            let xij = xs[i] - xs[j];
            let yij = ys[i] - ys[j];
            let l2 = xij * xij + yij * yij;

            coeffs.a[k] = -xij / l2;
            coeffs.b[k] = 0.75 * xij * yij / l2;
            coeffs.c[k] = (0.25 * xij * xij - 0.5 * yij * yij) / l2;
            coeffs.d[k] = -yij / l2;
            coeffs.e[k] = (0.25 * yij * yij - 0.5 * xij * xij) / l2;
        }

        coeffs
    }

    /// Jacobian determinant of the map from (ξ, η), equal to twice the area
    pub fn det_j(&self) -> f64 {
        self.det_j
    }

    /// Combine quadratic function values into (Hx, Hy)
    fn combine(&self, n: &[f64; 6]) -> ([f64; 9], [f64; 9]) {
        let (a, b, c, d, e) = (&self.a, &self.b, &self.c, &self.d, &self.e);
        let (n4, n5, n6) = (n[3], n[4], n[5]);

        let hx = [
            1.5 * (a[2] * n6 - a[1] * n5),
            b[1] * n5 + b[2] * n6,
            n[0] - c[1] * n5 - c[2] * n6,
            1.5 * (a[0] * n4 - a[2] * n6),
            b[2] * n6 + b[0] * n4,
            n[1] - c[2] * n6 - c[0] * n4,
            1.5 * (a[1] * n5 - a[0] * n4),
            b[0] * n4 + b[1] * n5,
            n[2] - c[0] * n4 - c[1] * n5,
        ];

        let hy = [
            1.5 * (d[2] * n6 - d[1] * n5),
            -n[0] + e[1] * n5 + e[2] * n6,
            -hx[1],
            1.5 * (d[0] * n4 - d[2] * n6),
            -n[1] + e[2] * n6 + e[0] * n4,
            -hx[4],
            1.5 * (d[1] * n5 - d[0] * n4),
            -n[2] + e[0] * n4 + e[1] * n5,
            -hx[7],
        ];

        (hx, hy)
    }
}

/// DKT interpolation evaluated at one point
///
/// βx = Hx · u and βy = Hy · u with u = (w1, θx1, θy1, w2, ..., θy3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DktShape {
    pub hx: [f64; 9],
    pub hy: [f64; 9],
    pub dhx_dx: [f64; 9],
    pub dhx_dy: [f64; 9],
    pub dhy_dx: [f64; 9],
    pub dhy_dy: [f64; 9],
}

impl DktShape {
    /// Evaluate Hx, Hy and their local x/y derivatives at (ξ, η)
    pub fn evaluate(coeffs: &DktCoefficients, xi: f64, eta: f64) -> Self {
        let q = Quadratic6::at(xi, eta);

        let (hx, hy) = coeffs.combine(&q.n);
        let (dhx_dxi, dhy_dxi) = coeffs.combine(&q.dn_dxi);
        let (dhx_deta, dhy_deta) = coeffs.combine(&q.dn_deta);

        // ∂/∂x = (y31 ∂/∂ξ + y12 ∂/∂η) / detJ
        // ∂/∂y = -(x31 ∂/∂ξ + x12 ∂/∂η) / detJ
        let inv = 1.0 / coeffs.det_j;
        let mut shape = Self {
            hx,
            hy,
            dhx_dx: [0.0; 9],
            dhx_dy: [0.0; 9],
            dhy_dx: [0.0; 9],
            dhy_dy: [0.0; 9],
        };
        for i in 0..9 {
            shape.dhx_dx[i] = (coeffs.y31 * dhx_dxi[i] + coeffs.y12 * dhx_deta[i]) * inv;
            shape.dhx_dy[i] = -(coeffs.x31 * dhx_dxi[i] + coeffs.x12 * dhx_deta[i]) * inv;
            shape.dhy_dx[i] = (coeffs.y31 * dhy_dxi[i] + coeffs.y12 * dhy_deta[i]) * inv;
            shape.dhy_dy[i] = -(coeffs.x31 * dhy_dxi[i] + coeffs.x12 * dhy_deta[i]) * inv;
        }
        shape
    }

    /// Curvature-displacement matrix rows: βx,x ; βy,y ; βx,y + βy,x
    pub fn bending_b_matrix(&self) -> [[f64; 9]; 3] {
        let mut b = [[0.0; 9]; 3];
        for i in 0..9 {
            b[0][i] = self.dhx_dx[i];
            b[1][i] = self.dhy_dy[i];
            b[2][i] = self.dhx_dy[i] + self.dhy_dx[i];
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const XS: [f64; 3] = [0.0, 3.0, 0.8];
    const YS: [f64; 3] = [0.0, 0.0, 2.5];

    #[test]
    fn test_cst_gradients_reproduce_linear_field() {
        // u = 2x + 3y  =>  du/dx = 2, du/dy = 3
        let g = CstGradients::new(&XS, &YS);
        let u: Vec<f64> = (0..3).map(|i| 2.0 * XS[i] + 3.0 * YS[i]).collect();
        let dudx: f64 = (0..3).map(|i| g.dn_dx[i] * u[i]).sum();
        let dudy: f64 = (0..3).map(|i| g.dn_dy[i] * u[i]).sum();
        assert_relative_eq!(dudx, 2.0, epsilon = 1e-12);
        assert_relative_eq!(dudy, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quadratic_partition_of_unity() {
        let q = Quadratic6::at(0.2, 0.3);
        assert_relative_eq!(q.n.iter().sum::<f64>(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(q.dn_dxi.iter().sum::<f64>(), 0.0, epsilon = 1e-14);
        assert_relative_eq!(q.dn_deta.iter().sum::<f64>(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_dkt_reproduces_rigid_rotation() {
        // θy = 1 everywhere with w = -x gives βx ≡ 1, βy ≡ 0
        let coeffs = DktCoefficients::new(&XS, &YS);
        let mut u = [0.0; 9];
        for i in 0..3 {
            u[3 * i] = -XS[i];
            u[3 * i + 2] = 1.0;
        }

        for &(xi, eta) in &[(0.2, 0.3), (0.6, 0.1), (1.0 / 3.0, 1.0 / 3.0)] {
            let s = DktShape::evaluate(&coeffs, xi, eta);
            let bx: f64 = (0..9).map(|i| s.hx[i] * u[i]).sum();
            let by: f64 = (0..9).map(|i| s.hy[i] * u[i]).sum();
            assert_relative_eq!(bx, 1.0, epsilon = 1e-12);
            assert_relative_eq!(by, 0.0, epsilon = 1e-12);

            // Rigid rotation produces no curvature
            let b = s.bending_b_matrix();
            for row in &b {
                let k: f64 = (0..9).map(|i| row[i] * u[i]).sum();
                assert!(k.abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_dkt_constant_curvature() {
        // w = -x²/2  =>  βx = -w,x = x, so βx,x = 1
        let coeffs = DktCoefficients::new(&XS, &YS);
        let mut u = [0.0; 9];
        for i in 0..3 {
            u[3 * i] = -0.5 * XS[i] * XS[i];
            u[3 * i + 2] = XS[i]; // θy = -w,x
        }

        let s = DktShape::evaluate(&coeffs, 0.25, 0.4);
        let b = s.bending_b_matrix();
        let kxx: f64 = (0..9).map(|i| b[0][i] * u[i]).sum();
        let kyy: f64 = (0..9).map(|i| b[1][i] * u[i]).sum();
        let kxy: f64 = (0..9).map(|i| b[2][i] * u[i]).sum();
        assert_relative_eq!(kxx, 1.0, epsilon = 1e-10);
        assert!(kyy.abs() < 1e-10);
        assert!(kxy.abs() < 1e-10);
    }

    #[test]
    fn test_det_j_is_twice_area() {
        let coeffs = DktCoefficients::new(&XS, &YS);
        assert_relative_eq!(coeffs.det_j(), 2.0 * 0.5 * 3.0 * 2.5, epsilon = 1e-12);
    }
}
