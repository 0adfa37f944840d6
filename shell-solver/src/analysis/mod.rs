//! Analysis types, options and the static/modal pipelines

pub mod assembly;
pub mod linear;
pub mod modal;
pub mod stress;

use log::debug;
use serde::{Deserialize, Serialize};

pub use linear::{solve_static, solve_static_with};
pub use modal::{solve_modal, solve_modal_with};

/// Type of structural analysis to perform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Linear static analysis
    #[default]
    Static,
    /// Modal (eigenvalue) analysis for natural frequencies
    Modal,
}

/// How to treat eigenvalues whose imaginary part is not negligible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EigenStrictness {
    /// Log a warning and keep the mode
    #[default]
    Warn,
    /// Fail with `UnsupportedEigenResult`
    Fail,
}

/// Pipeline stage, logged as the analysis progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Idle,
    AssembleK,
    ApplyBc,
    AssembleF,
    AssembleM,
    Solve,
    Eigen,
    Done,
}

impl AnalysisStage {
    pub(crate) fn advance(&mut self, next: AnalysisStage) {
        debug!("stage {:?} -> {:?}", self, next);
        *self = next;
    }
}

/// Options for structural analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Type of analysis
    pub analysis_type: AnalysisType,
    /// Diagonal value written on restrained DOFs
    pub penalty: f64,
    /// Smallest accepted LU pivot relative to its column
    pub pivot_tolerance: f64,
    /// Largest accepted |Im λ| / |Re λ|
    pub imag_tolerance: f64,
    /// Reaction to eigenvalues above `imag_tolerance`
    pub eigen_strictness: EigenStrictness,
    /// Schur iteration limit (0 = iterate until convergence)
    pub max_eigen_iterations: usize,
    /// Largest dense system accepted
    pub max_dofs: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            analysis_type: AnalysisType::Static,
            penalty: 1e10,
            pivot_tolerance: 1e-12,
            imag_tolerance: 1e-6,
            eigen_strictness: EigenStrictness::Warn,
            max_eigen_iterations: 0,
            max_dofs: 6000,
        }
    }
}

impl AnalysisOptions {
    /// Create options for linear static analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Create options for modal analysis
    pub fn modal() -> Self {
        Self {
            analysis_type: AnalysisType::Modal,
            ..Self::default()
        }
    }

    /// Set the boundary condition penalty
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the relative pivot tolerance used for singularity detection
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Set the accepted imaginary-to-real eigenvalue ratio
    pub fn with_imag_tolerance(mut self, tol: f64) -> Self {
        self.imag_tolerance = tol;
        self
    }

    /// Choose between warning and failing on complex eigenvalues
    pub fn with_eigen_strictness(mut self, strictness: EigenStrictness) -> Self {
        self.eigen_strictness = strictness;
        self
    }

    /// Set maximum Schur iterations
    pub fn with_max_eigen_iterations(mut self, max_iter: usize) -> Self {
        self.max_eigen_iterations = max_iter;
        self
    }

    /// Set the dense problem size limit
    pub fn with_max_dofs(mut self, max_dofs: usize) -> Self {
        self.max_dofs = max_dofs;
        self
    }
}
