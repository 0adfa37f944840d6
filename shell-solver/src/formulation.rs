//! Element formulation seam shared by the static and modal pipelines

use crate::elements::{Material, Section, TriElement};
use crate::math::{self, Mat18};

/// Produces the element matrices for one triangle
///
/// Local matrices are expressed in the element frame; the transformation maps
/// global DOFs to local ones (`d_local = T · d_global`).
pub trait ElementFormulation {
    fn local_stiffness(&self, element: &TriElement, material: &Material, section: &Section) -> Mat18;

    fn local_mass(&self, element: &TriElement, material: &Material, section: &Section) -> Mat18;

    fn transformation(&self, element: &TriElement) -> Mat18;

    /// Element stiffness in global axes
    fn global_stiffness(&self, element: &TriElement, material: &Material, section: &Section) -> Mat18 {
        let t = self.transformation(element);
        math::to_global(&self.local_stiffness(element, material, section), &t)
    }

    /// Element mass in global axes
    fn global_mass(&self, element: &TriElement, material: &Material, section: &Section) -> Mat18 {
        let t = self.transformation(element);
        math::to_global(&self.local_mass(element, material, section), &t)
    }
}

/// Flat shell: CST membrane, DKT bending, drilling stabilization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DktShell;

impl ElementFormulation for DktShell {
    fn local_stiffness(&self, element: &TriElement, material: &Material, section: &Section) -> Mat18 {
        math::shell_local_stiffness(material.e, material.nu, section.thickness, element.geometry())
    }

    fn local_mass(&self, element: &TriElement, material: &Material, section: &Section) -> Mat18 {
        math::shell_local_mass(material.rho, section, element.geometry())
    }

    fn transformation(&self, element: &TriElement) -> Mat18 {
        math::shell_transformation_matrix(element.geometry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::TriGeometry;
    use approx::assert_relative_eq;

    fn tilted_element() -> TriElement {
        let coords = [[0.0, 0.0, 0.0], [800.0, 0.0, 600.0], [0.0, 1000.0, 0.0]];
        let mut element = TriElement::new(0, [0, 1, 2], "steel", "plate");
        element.geometry = TriGeometry::from_coords(0, &coords).unwrap();
        element
    }

    #[test]
    fn test_global_matrices_symmetric() {
        let element = tilted_element();
        let material = Material::steel();
        let section = Section::new(10.0);

        let k = DktShell.global_stiffness(&element, &material, &section);
        let m = DktShell.global_mass(&element, &material, &section);
        assert_relative_eq!(k, k.transpose(), max_relative = 1e-9, epsilon = 1e-6);
        assert_relative_eq!(m, m.transpose(), max_relative = 1e-9, epsilon = 1e-15);
    }

    #[test]
    fn test_rotation_preserves_trace() {
        let element = tilted_element();
        let material = Material::steel();
        let section = Section::new(10.0);

        let local = DktShell.local_stiffness(&element, &material, &section);
        let global = DktShell.global_stiffness(&element, &material, &section);
        assert_relative_eq!(local.trace(), global.trace(), max_relative = 1e-10);
    }
}
