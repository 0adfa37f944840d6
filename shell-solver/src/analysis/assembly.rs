//! Global matrix and load vector assembly

use log::debug;

use super::AnalysisOptions;
use crate::elements::{TriElement, DOFS_PER_NODE};
use crate::error::{ShellError, ShellResult};
use crate::formulation::ElementFormulation;
use crate::loads::LoadApplication;
use crate::math::{Mat, Mat18, Vec as FEVec};
use crate::model::Model;

/// Reject models that have nothing to solve or are too large for dense storage
pub fn check_problem_size(model: &Model, options: &AnalysisOptions) -> ShellResult<usize> {
    let n_dofs = model.n_dofs();
    if n_dofs == 0 {
        return Err(ShellError::InvalidInput("model has no nodes".to_string()));
    }
    if n_dofs > options.max_dofs {
        return Err(ShellError::ModelTooLarge {
            dofs: n_dofs,
            limit: options.max_dofs,
        });
    }
    Ok(n_dofs)
}

/// Build the global stiffness matrix (before boundary conditions)
pub fn assemble_stiffness(model: &Model, formulation: &impl ElementFormulation) -> ShellResult<Mat> {
    let mut k = Mat::zeros(model.n_dofs(), model.n_dofs());

    for element in &model.elements {
        let material = model.material(&element.material)?;
        let section = model.section(&element.section)?;
        let ke = formulation.global_stiffness(element, material, section);
        scatter(&mut k, element, &ke);
    }

    debug!("assembled stiffness: {} elements, {} dofs", model.elements.len(), k.nrows());
    Ok(k)
}

/// Build the global consistent mass matrix (before boundary conditions)
pub fn assemble_mass(model: &Model, formulation: &impl ElementFormulation) -> ShellResult<Mat> {
    let mut m = Mat::zeros(model.n_dofs(), model.n_dofs());

    for element in &model.elements {
        let material = model.material(&element.material)?;
        let section = model.section(&element.section)?;
        let me = formulation.global_mass(element, material, section);
        scatter(&mut m, element, &me);
    }

    debug!("assembled mass: {} elements, {} dofs", model.elements.len(), m.nrows());
    Ok(m)
}

/// Add an 18×18 element matrix into the global matrix
pub fn scatter(global: &mut Mat, element: &TriElement, ke: &Mat18) {
    for a in 0..3 {
        for b in 0..3 {
            for i in 0..DOFS_PER_NODE {
                let row = element.global_dof(a, i);
                for j in 0..DOFS_PER_NODE {
                    let col = element.global_dof(b, j);
                    global[(row, col)] += ke[(a * DOFS_PER_NODE + i, b * DOFS_PER_NODE + j)];
                }
            }
        }
    }
}

/// Penalty boundary conditions: zero row and column, then set the diagonal
pub fn apply_boundary_conditions(k: &mut Mat, restrained: &[usize], penalty: f64) {
    for &dof in restrained {
        k.row_mut(dof).fill(0.0);
        k.column_mut(dof).fill(0.0);
        k[(dof, dof)] = penalty;
    }
    debug!("applied {} restraints (penalty {:e})", restrained.len(), penalty);
}

/// Accumulate every load of the model into one global load vector
pub fn assemble_load_vector(model: &Model) -> ShellResult<FEVec> {
    let mut f = FEVec::zeros(model.n_dofs());
    for load in &model.loads {
        load.apply_to(model, &mut f)?;
    }
    debug!("assembled load vector from {} loads", model.loads.len());
    Ok(f)
}
