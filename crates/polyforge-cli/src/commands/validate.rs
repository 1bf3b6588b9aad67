//! `polyforge validate`: check a request without writing anything.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::ValidateArgs,
    commands::{
        build_service,
        generate::{describe, node_json},
        load_project,
    },
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Parse the request, apply config defaults and run every graph and node
/// check the generator would.
#[instrument(skip_all, fields(request = %args.request.display()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = load_project(&args.request, &config)?;
    let service = build_service(&config, config.output.directory.clone())?;
    let nodes = service.validate(&project)?;

    if output.is_json() {
        let nodes: Vec<_> = nodes.iter().map(node_json).collect();
        return output.json(&json!({
            "project": project.name,
            "valid": true,
            "nodes": nodes,
        }));
    }

    output.success(&format!(
        "'{}' is valid ({} nodes, {} edges)",
        project.name,
        nodes.len(),
        project.graph.edges.len()
    ))?;
    for node in &nodes {
        output.print(&format!("  {}", describe(node)))?;
    }
    Ok(())
}
