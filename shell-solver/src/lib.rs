//! Shell Solver - static and modal analysis of thin triangular shells
//!
//! This library assembles flat three-node shell elements into a dense global
//! system and solves it:
//! - Membrane stiffness from the constant strain triangle (CST)
//! - Bending stiffness from the Discrete Kirchhoff Triangle (DKT)
//! - Drilling rotation stabilization, penalty supports
//! - Linear static analysis with support reactions and stress recovery
//! - Modal analysis (generalized eigenproblem with consistent mass)
//!
//! ## Example
//! ```rust
//! use shell_solver::prelude::*;
//!
//! let mut model = Model::new();
//! model.add_material("steel", Material::steel());
//! model.add_section("plate", Section::new(10.0));
//!
//! model.add_node(Node::new(0, 0.0, 0.0, 0.0)).unwrap();
//! model.add_node(Node::new(1, 1000.0, 0.0, 0.0)).unwrap();
//! model.add_node(Node::new(2, 0.0, 1000.0, 0.0)).unwrap();
//! model.add_element(TriElement::new(0, [0, 1, 2], "steel", "plate")).unwrap();
//!
//! model.add_support(Support::fixed(0)).unwrap();
//! model.add_support(Support::with_restraints(2, [true, false, false, false, false, false])).unwrap();
//! model.add_load(NodalLoad::fz(1, -1000.0)).unwrap();
//!
//! let result = solve_static(&model).unwrap();
//! assert!(result.node_displacement(1).unwrap().dz < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod formulation;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::stress::{recover_stresses, StressSurface};
    pub use crate::analysis::{
        solve_modal, solve_modal_with, solve_static, solve_static_with, AnalysisOptions,
        AnalysisType, EigenStrictness,
    };
    pub use crate::elements::{Material, Node, Section, Support, TriElement};
    pub use crate::error::{ShellError, ShellResult};
    pub use crate::formulation::{DktShell, ElementFormulation};
    pub use crate::loads::{GravityLoad, Load, NodalLoad};
    pub use crate::model::{Model, ModelDefinition};
    pub use crate::results::{AnalysisResult, ElementStress, NodeDisplacement, Reactions};
}
