//! Implementation of the `polyforge generate` command.
//!
//! Responsibility: load the request, enforce the existing-directory policy,
//! run the generation service and clean up after a failed run. No generation
//! logic lives here.

use serde_json::json;
use tracing::{info, instrument, warn};

use polyforge_core::domain::{LanguageNode, Project};

use crate::{
    cli::GenerateArgs,
    commands::{build_service, load_project},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `polyforge generate` command.
///
/// 1. Load the request and apply git defaults
/// 2. `--dry-run`: validate and print the plan, write nothing
/// 3. Refuse an existing project directory unless `--force`
/// 4. Generate; on failure remove the partial project unless `--keep-partial`
#[instrument(skip_all, fields(request = %args.request.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = load_project(&args.request, &config)?;
    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let service = build_service(&config, output_root)?;
    let project_directory = service.project_directory(&project);

    if args.dry_run {
        let nodes = service.validate(&project)?;
        return print_plan(&project, &nodes, &project_directory.display().to_string(), &output);
    }

    if service.project_exists(&project) {
        if !args.force {
            return Err(CliError::ProjectExists {
                path: project_directory,
            });
        }
        warn!(path = %project_directory.display(), "Replacing existing project directory");
        service.remove_project(&project)?;
    }

    output.header(&format!("Generating '{}'...", project.name))?;

    let report = match service.generate(&project) {
        Ok(report) => report,
        Err(err) => {
            if args.keep_partial {
                output.warning(&format!(
                    "Partial output kept at {}",
                    project_directory.display()
                ))?;
            } else if let Err(cleanup) = service.remove_project(&project) {
                warn!(error = %cleanup, "Could not remove partial output");
            }
            return Err(err.into());
        }
    };

    info!(run_id = %report.run_id, files = report.files_written, "Project generated");

    if output.is_json() {
        return output.json(&json!({
            "runId": report.run_id,
            "projectDirectory": report.project_directory,
            "nodes": report.nodes,
            "filesWritten": report.files_written,
        }));
    }

    output.success(&format!(
        "Project '{}' generated at {} ({} files)",
        project.name,
        report.project_directory.display(),
        report.files_written,
    ))?;
    for node in &report.nodes {
        output.print(&format!("  {node}/"))?;
    }

    Ok(())
}

fn print_plan(
    project: &Project,
    nodes: &[LanguageNode],
    project_directory: &str,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        let nodes: Vec<_> = nodes.iter().map(node_json).collect();
        return output.json(&json!({
            "project": project.name,
            "projectDirectory": project_directory,
            "nodes": nodes,
        }));
    }

    output.info(&format!(
        "Dry run: would generate '{}' at {}",
        project.name, project_directory
    ))?;
    for node in nodes {
        output.info(&format!("  {}", describe(node)))?;
    }
    Ok(())
}

/// One-line summary: `orders (javascript) rest:8080 grpc`.
pub(crate) fn describe(node: &LanguageNode) -> String {
    let mut line = format!("{} ({})", node.name(), node.language());
    for protocol in node.protocols() {
        line.push(' ');
        line.push_str(protocol.as_str());
    }
    if let Some(port) = node.rest_server_port() {
        line.push_str(&format!(" port={port}"));
    }
    line
}

pub(crate) fn node_json(node: &LanguageNode) -> serde_json::Value {
    json!({
        "id": node.id(),
        "name": node.name(),
        "language": node.language(),
        "protocols": node.protocols(),
        "restServerPort": node.rest_server_port(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyforge_core::domain::{
        GrpcConfig, Language, Node, ProjectGraph, ProjectMetadata, RestConfig,
    };

    fn resolved(node: Node) -> LanguageNode {
        let project = Project::new("shop", ProjectGraph::new().with_node(node.clone()))
            .with_metadata(ProjectMetadata::default().with_git_platform_user_name("octo"));
        LanguageNode::resolve(&project, &node).unwrap()
    }

    #[test]
    fn describe_lists_protocols_and_port() {
        let node = resolved(
            Node::new("svc1", Language::Go)
                .with_name("orders")
                .with_rest(RestConfig::builtin_server(8080))
                .with_grpc(GrpcConfig::builtin_server(9090, None)),
        );
        assert_eq!(describe(&node), "orders (go) rest grpc port=8080");
    }

    #[test]
    fn node_json_uses_camel_case() {
        let node = resolved(Node::new("svc1", Language::Ruby));
        let value = node_json(&node);

        assert_eq!(value["language"], "ruby");
        assert_eq!(value["restServerPort"], serde_json::Value::Null);
    }
}
