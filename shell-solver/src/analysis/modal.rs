//! Modal analysis: generalized eigenproblem K x = λ M x
//!
//! The problem is reduced to the standard form A = K⁻¹M, whose eigenvalues
//! are μ = 1/λ. A is not symmetric, so the decomposition is the general real
//! Schur path and eigenpairs come back complex; physically they are real and
//! any imaginary part is rounding noise.

use log::{info, warn};
use nalgebra::{Complex, DVector};

use super::assembly::{
    apply_boundary_conditions, assemble_mass, assemble_stiffness, check_problem_size,
};
use super::{AnalysisOptions, AnalysisStage, AnalysisType, EigenStrictness};
use crate::error::{ShellError, ShellResult};
use crate::formulation::{DktShell, ElementFormulation};
use crate::math::{self, eigen_decompose};
use crate::model::Model;
use crate::results::AnalysisResult;

/// Run a modal analysis with default options and the DKT shell
pub fn solve_modal(model: &Model) -> ShellResult<AnalysisResult> {
    solve_modal_with(model, &AnalysisOptions::modal(), &DktShell)
}

/// Run a modal analysis
///
/// Every DOF yields one mode; modes are left in solver order.
pub fn solve_modal_with(
    model: &Model,
    options: &AnalysisOptions,
    formulation: &impl ElementFormulation,
) -> ShellResult<AnalysisResult> {
    let mut stage = AnalysisStage::Idle;
    let n_dofs = check_problem_size(model, options)?;

    stage.advance(AnalysisStage::AssembleK);
    let mut k = assemble_stiffness(model, formulation)?;

    stage.advance(AnalysisStage::ApplyBc);
    apply_boundary_conditions(&mut k, &model.restrained_dofs(), options.penalty);

    stage.advance(AnalysisStage::AssembleM);
    let m = assemble_mass(model, formulation)?;

    stage.advance(AnalysisStage::Solve);
    let lu = math::factorize(&k, options.pivot_tolerance)?;
    let a = lu.solve(&m).ok_or_else(|| ShellError::singular_at(0))?;
    if let Some(index) = a.iter().position(|v| !v.is_finite()) {
        // Column-major storage: the row is the offending DOF
        return Err(ShellError::singular_at(index % n_dofs));
    }

    stage.advance(AnalysisStage::Eigen);
    let decomposition = eigen_decompose(a, options.max_eigen_iterations)?;
    let eigenvalues = decomposition.eigenvalues.map(reciprocal);
    screen_eigenvalues(&eigenvalues, options)?;

    let mut result = AnalysisResult::new(AnalysisType::Modal, n_dofs);
    result.eigenvalues = Some(eigenvalues);
    result.eigenvectors = Some(decomposition.eigenvectors);

    stage.advance(AnalysisStage::Done);
    let lowest = result
        .natural_frequencies()
        .into_iter()
        .filter(|f| *f > 0.0)
        .fold(f64::INFINITY, f64::min);
    info!("modal analysis: {} modes, lowest frequency {:.6e}", result.n_modes(), lowest);

    Ok(result)
}

/// λ = 1/μ; a vanishing μ maps to an infinite eigenvalue
fn reciprocal(mu: Complex<f64>) -> Complex<f64> {
    if mu.norm() == 0.0 {
        Complex::new(f64::INFINITY, 0.0)
    } else {
        mu.inv()
    }
}

/// Check eigenvalues for non-negligible imaginary parts and negative real parts
fn screen_eigenvalues(values: &DVector<Complex<f64>>, options: &AnalysisOptions) -> ShellResult<()> {
    let scale = values
        .iter()
        .filter(|l| l.re.is_finite())
        .fold(0.0_f64, |acc, l| acc.max(l.re.abs()));

    for (mode, lambda) in values.iter().enumerate() {
        if lambda.im.abs() > options.imag_tolerance * lambda.re.abs() {
            match options.eigen_strictness {
                EigenStrictness::Warn => warn!(
                    "mode {}: eigenvalue {:.6e} + {:.6e}i has a significant imaginary part",
                    mode, lambda.re, lambda.im
                ),
                EigenStrictness::Fail => {
                    return Err(ShellError::UnsupportedEigenResult {
                        mode,
                        re: lambda.re,
                        im: lambda.im,
                    })
                }
            }
        }
        if lambda.re < -f64::EPSILON.sqrt() * scale {
            warn!("mode {}: negative eigenvalue {:.6e}", mode, lambda.re);
        }
    }

    Ok(())
}
