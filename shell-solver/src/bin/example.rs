//! Shell Solver Example - single steel triangle under a tip load

use anyhow::Result;

use shell_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    println!("=== Shell Solver Example: Loaded Triangle ===\n");

    let mut model = Model::new();
    model.add_material("Steel", Material::steel());
    model.add_section("t10", Section::new(10.0));

    //     N2
    //     |\
    //     | \
    //     |  \
    //     N0--N1  <- Fz = -1000 N
    //
    // Dimensions in mm, E in N/mm²
    model.add_node(Node::new(0, 0.0, 0.0, 0.0))?;
    model.add_node(Node::new(1, 1000.0, 0.0, 0.0))?;
    model.add_node(Node::new(2, 0.0, 1000.0, 0.0))?;
    model.add_element(TriElement::new(0, [0, 1, 2], "Steel", "t10"))?;

    // N0 clamped; DX at N2 stops the in-plane spin about N0
    model.add_support(Support::fixed(0))?;
    model.add_support(Support::with_restraints(2, [true, false, false, false, false, false]))?;
    model.add_load(NodalLoad::fz(1, -1000.0))?;

    println!("Running linear static analysis...\n");
    let mut result = solve_static(&model)?;
    recover_stresses(&model, &mut result, StressSurface::Top)?;

    println!("Node Displacements:");
    for node in &model.nodes {
        let d = result
            .node_displacement(node.id)
            .unwrap_or(NodeDisplacement::from_array([0.0; 6]));
        println!(
            "  N{}: DX={:.4e}mm, DY={:.4e}mm, DZ={:.4}mm, RX={:.6}rad, RY={:.6}rad",
            node.id, d.dx, d.dy, d.dz, d.rx, d.ry
        );
    }

    println!("\nSupport Reactions:");
    for (node, r) in &result.reactions {
        println!(
            "  N{}: FZ={:.2}N, MX={:.2}N·mm, MY={:.2}N·mm",
            node, r.fz, r.mx, r.my
        );
    }

    println!("\nTop Surface Stresses:");
    for (element, s) in &result.stresses {
        println!(
            "  E{}: sx={:.3}, sy={:.3}, txy={:.3}, von Mises={:.3} N/mm²",
            element, s.sx, s.sy, s.txy, s.von_mises
        );
    }

    println!("\nRunning modal analysis...\n");
    // Mass needs density in t/mm³ for frequencies in Hz
    model.add_material("Steel", Material::steel_modal());
    let modal = solve_modal(&model)?;
    let mut frequencies: Vec<f64> = modal
        .natural_frequencies()
        .into_iter()
        .filter(|f| *f > 0.0)
        .collect();
    frequencies.sort_by(f64::total_cmp);

    println!("Lowest natural frequencies:");
    for (i, f) in frequencies.iter().take(3).enumerate() {
        println!("  Mode {}: {:.4} Hz", i + 1, f);
    }

    println!("\n=== Analysis Complete ===");
    Ok(())
}
