//! Shell Solver CLI - reads a JSON analysis request, prints a JSON summary
//!
//! Usage: `shell-solve <request.json>` (use `-` to read stdin)

use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use shell_solver::prelude::*;

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    model: ModelDefinition,
    #[serde(default)]
    options: AnalysisOptions,
    #[serde(default)]
    stress_surface: Option<StressSurface>,
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

fn run(request: AnalysisRequest) -> Result<AnalysisResult> {
    let model = Model::from_definition(request.model).context("invalid model")?;
    log::info!(
        "model: {} nodes, {} elements, {} supports, {} loads",
        model.nodes.len(),
        model.elements.len(),
        model.supports.len(),
        model.loads.len()
    );

    let result = match request.options.analysis_type {
        AnalysisType::Static => {
            let mut result = solve_static_with(&model, &request.options, &DktShell)
                .context("static analysis failed")?;
            let surface = request.stress_surface.unwrap_or_default();
            recover_stresses(&model, &mut result, surface).context("stress recovery failed")?;
            result
        }
        AnalysisType::Modal => {
            solve_modal_with(&model, &request.options, &DktShell).context("modal analysis failed")?
        }
    };

    Ok(result)
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: shell-solve <request.json | ->");
    };

    let input = read_input(&path)?;
    let request: AnalysisRequest =
        serde_json::from_str(&input).context("failed to parse analysis request")?;
    let result = run(request)?;

    println!("{}", serde_json::to_string_pretty(&result.summary())?);
    Ok(())
}
