//! Simple variable substitution renderer.

use std::path::Path;

use polyforge_core::{
    application::ports::TemplateRenderer,
    domain::{
        DomainValidator as validator, ProjectStructure, RelativePath, RenderContext, Template,
        TemplateContent, TemplateNode,
    },
    error::ForgeResult,
};
use tracing::instrument;

/// Renderer using `{{VARIABLE}}` substitution on paths and contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);

        for node in &template.tree.nodes {
            let path = render_path(node.path(), context)?;
            match node {
                TemplateNode::File(spec) => {
                    let content = render_content(&spec.content, context);
                    structure.add_file(path, content, spec.permissions);
                }
                TemplateNode::Directory(_) => structure.add_directory(path),
            }
        }

        // Rendered paths may collide even when the raw ones do not
        validator::validate_project_structure(&structure)?;

        Ok(structure)
    }
}

fn render_path(path: &RelativePath, context: &RenderContext) -> ForgeResult<RelativePath> {
    Ok(RelativePath::try_new(context.render(path.as_str()))?)
}

fn render_content(content: &TemplateContent, context: &RenderContext) -> String {
    match content {
        TemplateContent::Literal(source) => source.as_str().to_string(),
        TemplateContent::Parameterized(source) => context.render(source.as_str()),
    }
}
