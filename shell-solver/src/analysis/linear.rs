//! Linear static analysis: K d = f with penalty supports

use std::collections::BTreeMap;

use log::{debug, info};

use super::assembly::{
    apply_boundary_conditions, assemble_load_vector, assemble_stiffness, check_problem_size,
};
use super::{AnalysisOptions, AnalysisStage, AnalysisType};
use crate::elements::DOFS_PER_NODE;
use crate::error::ShellResult;
use crate::formulation::{DktShell, ElementFormulation};
use crate::math::{self, Mat, Vec as FEVec};
use crate::model::Model;
use crate::results::{AnalysisResult, Reactions};

/// Run a linear static analysis with default options and the DKT shell
pub fn solve_static(model: &Model) -> ShellResult<AnalysisResult> {
    solve_static_with(model, &AnalysisOptions::linear(), &DktShell)
}

/// Run a linear static analysis
///
/// Nothing is returned unless every stage succeeds.
pub fn solve_static_with(
    model: &Model,
    options: &AnalysisOptions,
    formulation: &impl ElementFormulation,
) -> ShellResult<AnalysisResult> {
    let mut stage = AnalysisStage::Idle;
    let n_dofs = check_problem_size(model, options)?;

    stage.advance(AnalysisStage::AssembleK);
    let k_free = assemble_stiffness(model, formulation)?;

    stage.advance(AnalysisStage::ApplyBc);
    let restrained = model.restrained_dofs();
    let mut k = k_free.clone();
    apply_boundary_conditions(&mut k, &restrained, options.penalty);

    stage.advance(AnalysisStage::AssembleF);
    let f = assemble_load_vector(model)?;

    stage.advance(AnalysisStage::Solve);
    let d = math::solve_linear_system(&k, &f, options.pivot_tolerance)?;

    let mut result = AnalysisResult::new(AnalysisType::Static, n_dofs);
    result.reactions = compute_reactions(model, &k_free, &d, &f);
    result.displacements = d;

    stage.advance(AnalysisStage::Done);
    if let Some((node, max)) = result.max_displacement() {
        info!(
            "static analysis: {} dofs, {} restrained, max displacement {:.6e} at node {}",
            n_dofs,
            restrained.len(),
            max,
            node
        );
    }

    Ok(result)
}

/// Support reactions R = K₀·d − f, reported on restrained components only
///
/// `k_free` is the stiffness before boundary conditions were applied.
pub fn compute_reactions(
    model: &Model,
    k_free: &Mat,
    d: &FEVec,
    f: &FEVec,
) -> BTreeMap<usize, Reactions> {
    let residual = k_free * d - f;
    let mut reactions = BTreeMap::new();

    for support in &model.supports {
        if !support.is_supported() {
            continue;
        }
        let base = support.node * DOFS_PER_NODE;
        let mut arr = [0.0; 6];
        for local in support.restrained_dofs() {
            arr[local] = residual[base + local];
        }
        reactions.insert(support.node, Reactions::from_array(arr));
    }

    debug!("computed reactions at {} supports", reactions.len());
    reactions
}
