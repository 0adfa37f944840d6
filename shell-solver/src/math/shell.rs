//! Flat triangular shell element matrices
//!
//! The element superposes:
//! - Membrane (in-plane) stiffness from the constant strain triangle
//! - Bending (out-of-plane) stiffness from the Discrete Kirchhoff Triangle,
//!   integrated with the 3-point rule
//! - Drilling DOF stabilization on RZ
//!
//! 3 nodes with 6 DOFs each: DX, DY, DZ, RX, RY, RZ (18×18 matrices).
//! All matrices here are in the element's local frame unless noted.

use nalgebra::SMatrix;

use super::gauss::{gauss_tri_3, gauss_tri_7};
use super::shape::{linear_shape, CstGradients, DktCoefficients, DktShape};
use super::{Mat18, Mat3, Mat6, Mat9, Vec18};
use crate::elements::{Section, TriGeometry};

/// Ratio of the drilling diagonal to the largest other diagonal of a node
pub const DRILLING_RATIO: f64 = 1e-3;

/// Local DOF positions of the membrane (u, v) terms in the 18-DOF layout
const MEMBRANE_MAP: [usize; 6] = [0, 1, 6, 7, 12, 13];

/// Local DOF positions of the bending (w, θx, θy) terms in the 18-DOF layout
const BENDING_MAP: [usize; 9] = [2, 3, 4, 8, 9, 10, 14, 15, 16];

/// Isotropic plane stress matrix shape `[[1, ν, 0], [ν, 1, 0], [0, 0, (1-ν)/2]]`
#[rustfmt::skip]
fn plane_stress_shape(nu: f64) -> Mat3 {
    Mat3::new(
        1.0, nu,  0.0,
        nu,  1.0, 0.0,
        0.0, 0.0, (1.0 - nu) / 2.0,
    )
}

/// Membrane constitutive matrix [Dm] for isotropic plane stress
pub fn membrane_constitutive_matrix(e: f64, nu: f64) -> Mat3 {
    plane_stress_shape(nu) * (e / (1.0 - nu * nu))
}

/// Bending constitutive matrix [Db] = E h³ / (12 (1 - ν²)) · shape
pub fn bending_constitutive_matrix(e: f64, nu: f64, t: f64) -> Mat3 {
    plane_stress_shape(nu) * (e * t.powi(3) / (12.0 * (1.0 - nu * nu)))
}

/// Membrane strain-displacement matrix [Bm]
///
/// Rows: εx, εy, γxy. Columns: u1, v1, u2, v2, u3, v3.
pub fn membrane_b_matrix(grad: &CstGradients) -> SMatrix<f64, 3, 6> {
    let mut b = SMatrix::<f64, 3, 6>::zeros();
    for i in 0..3 {
        b[(0, 2 * i)] = grad.dn_dx[i];
        b[(1, 2 * i + 1)] = grad.dn_dy[i];
        b[(2, 2 * i)] = grad.dn_dy[i];
        b[(2, 2 * i + 1)] = grad.dn_dx[i];
    }
    b
}

/// Bending curvature-displacement matrix [Bb] at (ξ, η)
///
/// Columns: w1, θx1, θy1, w2, θx2, θy2, w3, θx3, θy3.
pub fn bending_b_matrix(coeffs: &DktCoefficients, xi: f64, eta: f64) -> SMatrix<f64, 3, 9> {
    let rows = DktShape::evaluate(coeffs, xi, eta).bending_b_matrix();
    SMatrix::<f64, 3, 9>::from_fn(|r, c| rows[r][c])
}

/// CST membrane stiffness Kme = Bmᵀ Dm Bm h A (6×6)
pub fn membrane_stiffness(e: f64, nu: f64, t: f64, geometry: &TriGeometry) -> Mat6 {
    let dm = membrane_constitutive_matrix(e, nu);
    let grad = CstGradients::new(&geometry.xs(), &geometry.ys());
    let bm = membrane_b_matrix(&grad);

    bm.transpose() * dm * bm * (t * geometry.area)
}

/// DKT bending stiffness Kbe = Σ Bbᵀ Db Bb detJ w ½ (9×9)
pub fn bending_stiffness(e: f64, nu: f64, t: f64, geometry: &TriGeometry) -> Mat9 {
    let db = bending_constitutive_matrix(e, nu, t);
    let coeffs = DktCoefficients::new(&geometry.xs(), &geometry.ys());
    let det_j = coeffs.det_j();

    let mut k = Mat9::zeros();
    for gp in gauss_tri_3() {
        let bb = bending_b_matrix(&coeffs, gp.xi(), gp.eta());
        k += bb.transpose() * db * bb * (det_j * gp.weight * 0.5);
    }
    k
}

/// Interleave membrane (u, v) and bending (w, θx, θy) blocks into 18×18
pub fn expand_to_18(km: &Mat6, kb: &Mat9) -> Mat18 {
    let mut k = Mat18::zeros();

    for (i, &mi) in MEMBRANE_MAP.iter().enumerate() {
        for (j, &mj) in MEMBRANE_MAP.iter().enumerate() {
            k[(mi, mj)] = km[(i, j)];
        }
    }

    for (i, &bi) in BENDING_MAP.iter().enumerate() {
        for (j, &bj) in BENDING_MAP.iter().enumerate() {
            k[(bi, bj)] += kb[(i, j)];
        }
    }

    k
}

/// Set each node's RZ diagonal to `DRILLING_RATIO` × the largest of its
/// other five diagonal entries
pub fn stabilize_drilling(k: &mut Mat18) {
    for node in 0..3 {
        let base = node * 6;
        let max_diag = (0..5)
            .map(|d| k[(base + d, base + d)])
            .fold(f64::NEG_INFINITY, f64::max);
        k[(base + 5, base + 5)] = DRILLING_RATIO * max_diag;
    }
}

/// Local 18×18 shell stiffness matrix
pub fn shell_local_stiffness(e: f64, nu: f64, t: f64, geometry: &TriGeometry) -> Mat18 {
    let km = membrane_stiffness(e, nu, t, geometry);
    let kb = bending_stiffness(e, nu, t, geometry);

    let mut k = expand_to_18(&km, &kb);
    stabilize_drilling(&mut k);
    k
}

/// Local 18×18 consistent mass matrix, 7-point rule
///
/// Translational inertia ρh ∫ NᵢNⱼ acts on u, v and w alike; rotary inertia
/// ρh³/12 ∫ (HxᵀHx + HyᵀHy) acts on (w, θx, θy). Membrane-bending coupling
/// is zero.
pub fn shell_local_mass(rho: f64, section: &Section, geometry: &TriGeometry) -> Mat18 {
    let coeffs = DktCoefficients::new(&geometry.xs(), &geometry.ys());
    let det_j = coeffs.det_j();
    let rho_h = rho * section.thickness;
    let rho_i = rho * section.inertia();

    let mut m = Mat18::zeros();
    for gp in gauss_tri_7() {
        let scale = det_j * gp.weight * 0.5;
        let n = linear_shape(&gp.coords);

        for i in 0..3 {
            for j in 0..3 {
                let mij = rho_h * n[i] * n[j] * scale;
                for d in 0..3 {
                    m[(6 * i + d, 6 * j + d)] += mij;
                }
            }
        }

        let shape = DktShape::evaluate(&coeffs, gp.xi(), gp.eta());
        for (i, &bi) in BENDING_MAP.iter().enumerate() {
            for (j, &bj) in BENDING_MAP.iter().enumerate() {
                let rot = shape.hx[i] * shape.hx[j] + shape.hy[i] * shape.hy[j];
                m[(bi, bj)] += rho_i * rot * scale;
            }
        }
    }

    stabilize_drilling(&mut m);
    m
}

/// Compute the 18×18 transformation matrix from global to local DOFs
///
/// Six diagonal 3×3 blocks of direction cosines (rows are the local axes),
/// one per translational and rotational triad of each node.
pub fn shell_transformation_matrix(geometry: &TriGeometry) -> Mat18 {
    let dir_cos = geometry.direction_cosines();
    let mut t = Mat18::zeros();

    for block in 0..6 {
        let offset = block * 3;
        t.fixed_view_mut::<3, 3>(offset, offset).copy_from(&dir_cos);
    }

    t
}

/// Rotate a local element matrix to global axes: Tᵀ · K · T
pub fn to_global(local: &Mat18, t: &Mat18) -> Mat18 {
    t.transpose() * local * t
}

/// In-plane stresses at the element centroid at fibre offset `z`
///
/// σ = Dm (Bm·d_m + z·Bb·d_b), from the local displacement vector.
/// Returns `[σx, σy, τxy]`.
pub fn shell_centroid_stress(
    e: f64,
    nu: f64,
    geometry: &TriGeometry,
    d_local: &Vec18,
    z: f64,
) -> [f64; 3] {
    let dm = membrane_constitutive_matrix(e, nu);
    let bm = membrane_b_matrix(&CstGradients::new(&geometry.xs(), &geometry.ys()));
    let coeffs = DktCoefficients::new(&geometry.xs(), &geometry.ys());
    let bb = bending_b_matrix(&coeffs, 1.0 / 3.0, 1.0 / 3.0);

    let d_m = SMatrix::<f64, 6, 1>::from_fn(|i, _| d_local[MEMBRANE_MAP[i]]);
    let d_b = SMatrix::<f64, 9, 1>::from_fn(|i, _| d_local[BENDING_MAP[i]]);

    let strain = bm * d_m + bb * d_b * z;
    let stress = dm * strain;
    [stress[0], stress[1], stress[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, SymmetricEigen};

    fn skew_geometry() -> TriGeometry {
        let coords = [[0.0, 0.0, 0.0], [1200.0, 100.0, 50.0], [300.0, 900.0, -40.0]];
        TriGeometry::from_coords(0, &coords).unwrap()
    }

    fn reference_geometry() -> TriGeometry {
        let coords = [[0.0, 0.0, 0.0], [1000.0, 0.0, 0.0], [0.0, 1000.0, 0.0]];
        TriGeometry::from_coords(0, &coords).unwrap()
    }

    #[test]
    fn test_membrane_constitutive_isotropic() {
        let dm = membrane_constitutive_matrix(205_000.0, 0.3);
        assert_relative_eq!(dm[(0, 1)], dm[(1, 0)], epsilon = 1e-9);
        assert_relative_eq!(dm[(0, 0)], 205_000.0 / 0.91, max_relative = 1e-12);
        assert_relative_eq!(dm[(2, 2)], 205_000.0 / 0.91 * 0.35, max_relative = 1e-12);
    }

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = shell_local_stiffness(205_000.0, 0.3, 10.0, &skew_geometry());
        for i in 0..18 {
            for j in 0..18 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], max_relative = 1e-9, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_drilling_rule_is_exact() {
        let k = shell_local_stiffness(205_000.0, 0.3, 10.0, &skew_geometry());
        let m = shell_local_mass(7.85e-9, &Section::new(10.0), &skew_geometry());
        for mat in [&k, &m] {
            for node in 0..3 {
                let base = node * 6;
                let max_other = (0..5)
                    .map(|d| mat[(base + d, base + d)])
                    .fold(f64::NEG_INFINITY, f64::max);
                assert_eq!(mat[(base + 5, base + 5)], DRILLING_RATIO * max_other);
            }
        }
    }

    #[test]
    fn test_membrane_has_three_rigid_modes() {
        let km = membrane_stiffness(205_000.0, 0.3, 10.0, &reference_geometry());
        let eig = SymmetricEigen::new(DMatrix::from_fn(6, 6, |i, j| km[(i, j)]));
        let max = eig.eigenvalues.amax();
        let zeros = eig.eigenvalues.iter().filter(|v| v.abs() < 1e-10 * max).count();
        assert_eq!(zeros, 3);
    }

    #[test]
    fn test_bending_has_three_rigid_modes() {
        let kb = bending_stiffness(205_000.0, 0.3, 10.0, &skew_geometry());
        let eig = SymmetricEigen::new(DMatrix::from_fn(9, 9, |i, j| kb[(i, j)]));
        let max = eig.eigenvalues.amax();
        let zeros = eig.eigenvalues.iter().filter(|v| v.abs() < 1e-9 * max).count();
        assert_eq!(zeros, 3);
        assert!(eig.eigenvalues.iter().all(|&v| v > -1e-9 * max));
    }

    #[test]
    fn test_rotary_mass_follows_section_inertia() {
        let g = reference_geometry();
        let thin = shell_local_mass(7.85e-9, &Section::new(5.0), &g);
        let thick = shell_local_mass(7.85e-9, &Section::new(10.0), &g);

        // θx and θy terms carry only ρ h³/12
        for dof in [3, 4, 9, 10, 15, 16] {
            assert_relative_eq!(thick[(dof, dof)], 8.0 * thin[(dof, dof)], max_relative = 1e-12);
        }
        // In-plane translations scale with h
        assert_relative_eq!(thick[(0, 0)], 2.0 * thin[(0, 0)], max_relative = 1e-12);
    }

    #[test]
    fn test_translational_mass_equals_element_mass() {
        let rho = 7.85e-9;
        let t = 10.0;
        let g = reference_geometry();
        let m = shell_local_mass(rho, &Section::new(t), &g);

        // Summing the u-u block gives the total mass ρ h A
        let mut total = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                total += m[(6 * i, 6 * j)];
            }
        }
        assert_relative_eq!(total, rho * t * g.area, max_relative = 1e-9);
    }

    #[test]
    fn test_mass_symmetry() {
        let m = shell_local_mass(7.85e-9, &Section::new(10.0), &skew_geometry());
        assert_relative_eq!(m, m.transpose(), max_relative = 1e-9, epsilon = 1e-18);
    }

    #[test]
    fn test_transformation_matrix_horizontal() {
        let t = shell_transformation_matrix(&reference_geometry());
        assert_relative_eq!(t, Mat18::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_transformation_matrix_vertical() {
        // Triangle in the XZ plane: local x = X, local y = Z, local z = -Y
        let coords = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let g = TriGeometry::from_coords(0, &coords).unwrap();
        let t = shell_transformation_matrix(&g);

        assert_relative_eq!(t[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(1, 2)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(2, 1)], -1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(17, 16)], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_stretch_stress() {
        // u = εx, uniform strain 1e-4 in local x
        let g = reference_geometry();
        let mut d = Vec18::zeros();
        let xs = g.xs();
        for i in 0..3 {
            d[6 * i] = 1e-4 * xs[i];
        }
        let s = shell_centroid_stress(205_000.0, 0.3, &g, &d, 0.0);
        assert_relative_eq!(s[0], 205_000.0 / 0.91 * 1e-4, max_relative = 1e-9);
        assert_relative_eq!(s[1], 0.3 * 205_000.0 / 0.91 * 1e-4, max_relative = 1e-9);
        assert!(s[2].abs() < 1e-9);
    }
}
