//! Error types for the shell solver

use thiserror::Error;

/// Main error type for model construction and analysis
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Element {element} is degenerate (area = {area:e}); nodes are collinear or coincident")]
    DegenerateGeometry { element: usize, area: f64 },

    #[error("Element {element} references node {node}, but the model only has {node_count} nodes")]
    InvalidConnectivity {
        element: usize,
        node: usize,
        node_count: usize,
    },

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Duplicate id {0} already exists")]
    DuplicateId(usize),

    #[error(
        "Singular stiffness matrix at DOF {dof} (node {node}, local DOF {local_dof}) - \
         model may have an unrestrained rigid-body mode"
    )]
    SingularSystem {
        dof: usize,
        node: usize,
        local_dof: usize,
    },

    #[error("Eigenvalue of mode {mode} is not real: {re:e} + {im:e}i")]
    UnsupportedEigenResult { mode: usize, re: f64, im: f64 },

    #[error("Eigenvalue iteration failed to converge after {0} iterations")]
    ConvergenceFailed(usize),

    #[error("Model has {dofs} DOFs, above the dense solver limit of {limit}")]
    ModelTooLarge { dofs: usize, limit: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShellError {
    /// Build a `SingularSystem` error from a global DOF index
    pub fn singular_at(dof: usize) -> Self {
        Self::SingularSystem {
            dof,
            node: dof / 6,
            local_dof: dof % 6,
        }
    }
}

/// Result type for shell solver operations
pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_at_splits_dof() {
        match ShellError::singular_at(20) {
            ShellError::SingularSystem { dof, node, local_dof } => {
                assert_eq!(dof, 20);
                assert_eq!(node, 3);
                assert_eq!(local_dof, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
