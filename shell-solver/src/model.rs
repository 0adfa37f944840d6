//! Shell Model - nodes, triangles, supports and loads
//!
//! Element geometry is derived once, when the element is added, so every
//! element held by a [`Model`] is known to be non-degenerate and to reference
//! existing nodes, materials and sections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::elements::{Material, Node, Section, Support, TriElement, TriGeometry, DOFS_PER_NODE};
use crate::error::{ShellError, ShellResult};
use crate::loads::Load;

/// The thin shell finite element model
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Nodes, indexed by id
    pub nodes: Vec<Node>,
    /// Triangular shell elements
    pub elements: Vec<TriElement>,
    /// Support conditions, at most one per node
    pub supports: Vec<Support>,
    /// Applied loads, accumulated into one load vector
    pub loads: Vec<Load>,
    /// Materials by name
    pub materials: HashMap<String, Material>,
    /// Sections by name
    pub sections: HashMap<String, Section>,
}

/// Plain-data description of a model, as read from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub nodes: Vec<Node>,
    pub materials: HashMap<String, Material>,
    pub sections: HashMap<String, Section>,
    pub elements: Vec<TriElement>,
    #[serde(default)]
    pub supports: Vec<Support>,
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl Model {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate a model from its plain-data definition
    pub fn from_definition(definition: ModelDefinition) -> ShellResult<Self> {
        let mut model = Self::new();

        for (name, material) in definition.materials {
            model.add_material(&name, material);
        }
        for (name, section) in definition.sections {
            model.add_section(&name, section);
        }
        for node in definition.nodes {
            model.add_node(node)?;
        }
        for element in definition.elements {
            model.add_element(element)?;
        }
        for support in definition.supports {
            model.add_support(support)?;
        }
        for load in definition.loads {
            model.add_load(load)?;
        }

        Ok(model)
    }

    /// Parse a JSON model definition and build the model
    pub fn from_json(json: &str) -> ShellResult<Self> {
        let definition: ModelDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    /// Plain-data copy of this model
    pub fn to_definition(&self) -> ModelDefinition {
        ModelDefinition {
            nodes: self.nodes.clone(),
            materials: self.materials.clone(),
            sections: self.sections.clone(),
            elements: self.elements.clone(),
            supports: self.supports.clone(),
            loads: self.loads.clone(),
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a material to the model, replacing any material with the same name
    pub fn add_material(&mut self, name: &str, material: Material) {
        self.materials.insert(name.to_string(), material);
    }

    /// Add a section to the model, replacing any section with the same name
    pub fn add_section(&mut self, name: &str, section: Section) {
        self.sections.insert(name.to_string(), section);
    }

    /// Add a node; its id must equal the current node count
    pub fn add_node(&mut self, node: Node) -> ShellResult<()> {
        if node.id < self.nodes.len() {
            return Err(ShellError::DuplicateId(node.id));
        }
        if node.id != self.nodes.len() {
            return Err(ShellError::InvalidInput(format!(
                "node id {} does not match its position {}",
                node.id,
                self.nodes.len()
            )));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Add a triangle and derive its local frame, local coordinates and area
    pub fn add_element(&mut self, mut element: TriElement) -> ShellResult<()> {
        if self.elements.iter().any(|e| e.id == element.id) {
            return Err(ShellError::DuplicateId(element.id));
        }
        self.material(&element.material)?;
        self.section(&element.section)?;

        let mut coords = [[0.0; 3]; 3];
        for (slot, &node) in coords.iter_mut().zip(&element.nodes) {
            let node = self.nodes.get(node).ok_or(ShellError::InvalidConnectivity {
                element: element.id,
                node,
                node_count: self.nodes.len(),
            })?;
            *slot = node.coords();
        }

        element.geometry = TriGeometry::from_coords(element.id, &coords)?;
        self.elements.push(element);
        Ok(())
    }

    /// Add a support, replacing an earlier support at the same node
    pub fn add_support(&mut self, support: Support) -> ShellResult<()> {
        self.check_node(support.node, "support")?;
        match self.supports.iter_mut().find(|s| s.node == support.node) {
            Some(existing) => *existing = support,
            None => self.supports.push(support),
        }
        Ok(())
    }

    /// Add a load; nodal loads must reference an existing node
    pub fn add_load(&mut self, load: impl Into<Load>) -> ShellResult<()> {
        let load = load.into();
        if let Load::Nodal(nodal) = &load {
            self.check_node(nodal.node, "nodal load")?;
        }
        self.loads.push(load);
        Ok(())
    }

    fn check_node(&self, node: usize, what: &str) -> ShellResult<()> {
        if node >= self.nodes.len() {
            return Err(ShellError::InvalidInput(format!(
                "{} references missing node {} (model has {} nodes)",
                what,
                node,
                self.nodes.len()
            )));
        }
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    /// Look up a material by name
    pub fn material(&self, name: &str) -> ShellResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| ShellError::MaterialNotFound(name.to_string()))
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> ShellResult<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| ShellError::SectionNotFound(name.to_string()))
    }

    /// Look up an element by id
    pub fn element(&self, id: usize) -> Option<&TriElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Total number of global DOFs (6 per node)
    pub fn n_dofs(&self) -> usize {
        self.nodes.len() * DOFS_PER_NODE
    }

    /// Global DOF indices restrained by any support, ascending
    pub fn restrained_dofs(&self) -> Vec<usize> {
        let mut dofs: Vec<usize> = self
            .supports
            .iter()
            .flat_map(|s| s.restrained_global_dofs())
            .collect();
        dofs.sort_unstable();
        dofs.dedup();
        dofs
    }

    /// Sum of element areas
    pub fn total_area(&self) -> f64 {
        self.elements.iter().map(TriElement::area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{GravityLoad, NodalLoad};
    use approx::assert_relative_eq;

    fn single_triangle() -> Model {
        let mut model = Model::new();
        model.add_material("steel", Material::steel());
        model.add_section("plate", Section::new(10.0));
        model.add_node(Node::new(0, 0.0, 0.0, 0.0)).unwrap();
        model.add_node(Node::new(1, 1000.0, 0.0, 0.0)).unwrap();
        model.add_node(Node::new(2, 0.0, 1000.0, 0.0)).unwrap();
        model
    }

    #[test]
    fn test_element_geometry_derived_on_add() {
        let mut model = single_triangle();
        model
            .add_element(TriElement::new(0, [0, 1, 2], "steel", "plate"))
            .unwrap();

        assert_eq!(model.n_dofs(), 18);
        let element = model.element(0).unwrap();
        assert_relative_eq!(element.area(), 500_000.0, max_relative = 1e-12);
        assert_relative_eq!(element.geometry().local_area(), element.area(), max_relative = 1e-9);
    }

    #[test]
    fn test_out_of_range_node_rejected() {
        let mut model = single_triangle();
        let result = model.add_element(TriElement::new(4, [0, 1, 9], "steel", "plate"));
        match result {
            Err(ShellError::InvalidConnectivity {
                element,
                node,
                node_count,
            }) => {
                assert_eq!((element, node, node_count), (4, 9, 3));
            }
            other => panic!("expected invalid connectivity, got {other:?}"),
        }
        assert!(model.elements.is_empty());
    }

    #[test]
    fn test_collinear_element_rejected() {
        let mut model = single_triangle();
        model.add_node(Node::new(3, 2000.0, 0.0, 0.0)).unwrap();
        assert!(matches!(
            model.add_element(TriElement::new(0, [0, 1, 3], "steel", "plate")),
            Err(ShellError::DegenerateGeometry { element: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_references_rejected() {
        let mut model = single_triangle();
        assert!(matches!(
            model.add_element(TriElement::new(0, [0, 1, 2], "timber", "plate")),
            Err(ShellError::MaterialNotFound(_))
        ));
        assert!(matches!(
            model.add_element(TriElement::new(0, [0, 1, 2], "steel", "thick")),
            Err(ShellError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut model = single_triangle();
        model
            .add_element(TriElement::new(0, [0, 1, 2], "steel", "plate"))
            .unwrap();
        assert!(matches!(
            model.add_element(TriElement::new(0, [0, 2, 1], "steel", "plate")),
            Err(ShellError::DuplicateId(0))
        ));
        assert!(matches!(
            model.add_node(Node::new(1, 5.0, 5.0, 0.0)),
            Err(ShellError::DuplicateId(1))
        ));
        assert!(matches!(
            model.add_node(Node::new(7, 5.0, 5.0, 0.0)),
            Err(ShellError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_support_and_load_validation() {
        let mut model = single_triangle();
        assert!(model.add_support(Support::fixed(5)).is_err());
        assert!(model.add_load(NodalLoad::fz(3, -1.0)).is_err());

        model.add_support(Support::pinned(0)).unwrap();
        model.add_support(Support::fixed(0)).unwrap();
        assert_eq!(model.supports.len(), 1);
        assert_eq!(model.restrained_dofs(), vec![0, 1, 2, 3, 4, 5]);

        model.add_load(GravityLoad::downward()).unwrap();
        assert_eq!(model.loads.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "nodes": [
                {"id": 0, "x": 0.0, "y": 0.0, "z": 0.0},
                {"id": 1, "x": 1000.0, "y": 0.0, "z": 0.0},
                {"id": 2, "x": 0.0, "y": 1000.0, "z": 0.0}
            ],
            "materials": {"steel": {"e": 205000.0, "nu": 0.3, "rho": 7.85}},
            "sections": {"plate": {"thickness": 10.0}},
            "elements": [
                {"id": 0, "nodes": [0, 1, 2], "material": "steel", "section": "plate"}
            ],
            "supports": [
                {"node": 0, "dx": true, "dy": true, "dz": true, "rx": true, "ry": true, "rz": true}
            ],
            "loads": [
                {"type": "nodal", "node": 1, "fz": -1000.0},
                {"type": "gravity", "gz": -1.0}
            ]
        }"#;

        let model = Model::from_json(json).unwrap();
        assert_eq!(model.nodes.len(), 3);
        assert_eq!(model.loads.len(), 2);
        assert_relative_eq!(model.total_area(), 500_000.0, max_relative = 1e-12);

        let round_trip = serde_json::to_string(&model.to_definition()).unwrap();
        let again = Model::from_json(&round_trip).unwrap();
        assert_eq!(again.elements.len(), 1);
    }

    #[test]
    fn test_malformed_json_reports_serialization_error() {
        assert!(matches!(
            Model::from_json("{\"nodes\": 3}"),
            Err(ShellError::Serialization(_))
        ));
    }
}
