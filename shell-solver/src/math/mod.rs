//! Mathematical utilities for FEA calculations

pub mod eigen;
pub mod gauss;
pub mod shape;
pub mod shell;

use nalgebra::linalg::LU;
use nalgebra::{DMatrix, DVector, Dyn, Matrix3, Matrix6, SMatrix, SVector, Vector3};

use crate::error::{ShellError, ShellResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;

/// 9x9 matrix for DKT bending terms (w, θx, θy per node)
pub type Mat9 = SMatrix<f64, 9, 9>;
/// 18x18 matrix for triangle shell stiffness/mass
pub type Mat18 = SMatrix<f64, 18, 18>;
/// 18-element vector for triangle shell forces/displacements
pub type Vec18 = SVector<f64, 18>;

// Re-export element functions
pub use eigen::{eigen_decompose, EigenDecomposition};
pub use shell::{
    shell_centroid_stress, shell_local_mass, shell_local_stiffness, shell_transformation_matrix,
    to_global, DRILLING_RATIO,
};

/// LU factorisation that reports the first DOF with a vanishing pivot
///
/// A row that is entirely zero, a zero pivot, or a pivot smaller than
/// `pivot_tolerance` times the largest entry of its original column is
/// reported as [`ShellError::SingularSystem`]. Partial pivoting only swaps
/// rows, so pivot `i` belongs to DOF (column) `i`. Scaling per column keeps
/// penalty terms on restrained DOFs from masking a mechanism elsewhere.
pub fn factorize(a: &Mat, pivot_tolerance: f64) -> ShellResult<LU<f64, Dyn, Dyn>> {
    if let Some(row) = (0..a.nrows()).find(|&i| a.row(i).iter().all(|&v| v == 0.0)) {
        return Err(ShellError::singular_at(row));
    }

    let lu = a.clone().lu();
    let pivots = lu.u().diagonal();

    for (dof, pivot) in pivots.iter().enumerate() {
        let scale = a.column(dof).amax();
        if !pivot.is_finite() || pivot.abs() <= pivot_tolerance * scale {
            return Err(ShellError::singular_at(dof));
        }
    }

    Ok(lu)
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec, pivot_tolerance: f64) -> ShellResult<Vec> {
    let lu = factorize(a, pivot_tolerance)?;
    let x = lu.solve(b).ok_or_else(|| ShellError::singular_at(0))?;
    check_finite(&x)?;
    Ok(x)
}

/// Reject solutions carrying NaN or infinity, naming the first bad DOF
pub fn check_finite(x: &Vec) -> ShellResult<()> {
    match x.iter().position(|v| !v.is_finite()) {
        Some(dof) => Err(ShellError::singular_at(dof)),
        None => Ok(()),
    }
}

/// Largest absolute deviation from symmetry, relative to the largest entry
pub fn asymmetry(a: &Mat) -> f64 {
    let scale = a.amax();
    if scale == 0.0 {
        return 0.0;
    }
    (a - a.transpose()).amax() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_linear_system() {
        let a = Mat::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = Vec::from_vec(vec![1.0, 2.0]);
        let x = solve_linear_system(&a, &b, 1e-12).unwrap();
        assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_row_reports_dof() {
        let mut a = Mat::identity(8, 8);
        a[(5, 5)] = 0.0;
        let b = Vec::zeros(8);
        match solve_linear_system(&a, &b, 1e-12) {
            Err(ShellError::SingularSystem { dof, node, local_dof }) => {
                assert_eq!(dof, 5);
                assert_eq!(node, 0);
                assert_eq!(local_dof, 5);
            }
            other => panic!("expected singular system, got {other:?}"),
        }
    }

    #[test]
    fn test_rank_deficient_matrix_rejected() {
        // Second column is twice the first
        let a = Mat::from_row_slice(3, 3, &[1.0, 2.0, 0.0, 2.0, 4.0, 0.0, 0.0, 0.0, 1.0]);
        let b = Vec::from_vec(vec![1.0, 1.0, 1.0]);
        assert!(matches!(
            solve_linear_system(&a, &b, 1e-12),
            Err(ShellError::SingularSystem { dof: 1, .. })
        ));
    }

    #[test]
    fn test_asymmetry() {
        let a = Mat::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        assert_eq!(asymmetry(&a), 0.0);
        let b = Mat::from_row_slice(2, 2, &[2.0, 1.0, 0.0, 2.0]);
        assert_relative_eq!(asymmetry(&b), 0.5, epsilon = 1e-12);
    }
}
