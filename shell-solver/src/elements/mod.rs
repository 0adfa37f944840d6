//! Structural entities: nodes, materials, sections, supports and elements

mod material;
mod node;
mod section;
mod support;
mod triangle;

pub use material::Material;
pub use node::{Node, DOFS_PER_NODE};
pub use section::Section;
pub use support::Support;
pub use triangle::{TriElement, TriGeometry};
