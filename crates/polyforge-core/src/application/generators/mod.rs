//! Per-language generators.
//!
//! Every language implements [`LanguageGenerator`]. The shared contract lives
//! in the provided [`LanguageGenerator::generate`]; a language only supplies
//! its identity, the way it writes a route stub, and optionally extra
//! template variables.
//!
//! Dispatch is an exhaustive `match` in [`generator_for`]: adding a
//! `Language` variant does not compile until a generator is wired here.

mod go;
mod java;
mod javascript;
mod python;
mod ruby;
mod rust;
mod typescript;

pub use go::GoGenerator;
pub use java::JavaGenerator;
pub use javascript::JavaScriptGenerator;
pub use python::PythonGenerator;
pub use ruby::RubyGenerator;
pub use rust::RustGenerator;
pub use typescript::TypeScriptGenerator;

use tracing::debug;

use crate::application::integrations::IntegrationCopiers;
use crate::application::ports::GenerationPorts;
use crate::domain::{
    ApiOperation, DomainError, Language, LanguageNode, NodeContext, OpenApiDocument, Protocol,
    ProtocolTemplate, RenderContext, RestServer, capabilities,
};
use crate::error::ForgeResult;

/// The generator for `language`.
pub fn generator_for(language: Language) -> &'static dyn LanguageGenerator {
    match language {
        Language::Go => &GoGenerator,
        Language::Python => &PythonGenerator,
        Language::Java => &JavaGenerator,
        Language::Rust => &RustGenerator,
        Language::JavaScript => &JavaScriptGenerator,
        Language::TypeScript => &TypeScriptGenerator,
        Language::Ruby => &RubyGenerator,
    }
}

/// Name of the source template for a protocol/template pair, e.g.
/// `javascript/rest-openapi` or `go/grpc-builtin`.
pub fn source_template_name(root: &str, protocol: Protocol, template: ProtocolTemplate) -> String {
    format!("{root}/{protocol}-{template}")
}

/// `{param}` names in an OpenAPI path that are usable as identifiers.
fn path_params(path: &str) -> Vec<&str> {
    path.split('/')
        .filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        .filter(|p| {
            !p.is_empty()
                && !p.starts_with(|c: char| c.is_ascii_digit())
                && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
        .collect()
}

/// Contract every language generator fulfils.
pub trait LanguageGenerator: Send + Sync {
    fn language(&self) -> Language;

    /// Register one OpenAPI operation in the language's idiom.
    fn route_stub(&self, operation: &ApiOperation) -> String;

    /// Language-specific template variables (module paths, packages).
    fn extra_variables(&self, _ctx: &NodeContext) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn template_root(&self) -> &'static str {
        self.language().template_root()
    }

    /// Generate one node: protocol scaffolding, then integration artifacts.
    ///
    /// Fail-fast: the first error is returned and nothing written so far is
    /// removed.
    fn generate(
        &self,
        node: &LanguageNode,
        ctx: &NodeContext,
        ports: &GenerationPorts<'_>,
    ) -> ForgeResult<()> {
        let language = self.language();
        let root = self.template_root();
        let base = self.render_context(node, ctx);

        if let Some(rest) = node.rest_config() {
            capabilities::check_support(language, Protocol::Rest, rest.template)?;
            if let Some(server) = &rest.server {
                match rest.template {
                    ProtocolTemplate::OpenApi => {
                        self.scaffold_openapi(node, ctx, server, &base, ports)?;
                    }
                    ProtocolTemplate::Builtin => {
                        ports.render_template(
                            &source_template_name(root, Protocol::Rest, rest.template),
                            &base,
                            &ctx.node_directory,
                        )?;
                    }
                }
            }
        }

        if let Some(grpc) = node.grpc_config() {
            capabilities::check_support(language, Protocol::Grpc, grpc.template)?;
            if let Some(server) = &grpc.server {
                let context = base.clone().with_variable("GRPC_PORT", server.port.to_string());
                ports.render_template(
                    &source_template_name(root, Protocol::Grpc, grpc.template),
                    &context,
                    &ctx.node_directory,
                )?;
                if let Some(proto) = server.proto_content.as_deref().filter(|p| !p.trim().is_empty()) {
                    let path = ctx
                        .node_directory
                        .join("api")
                        .join(format!("{}.proto", ctx.node_name));
                    ports.write_file(&path, proto)?;
                }
            }
        }

        if let Some(ws) = node.ws_config() {
            capabilities::check_support(language, Protocol::Ws, ws.template)?;
            if let Some(server) = &ws.server {
                let context = base.clone().with_variable("WS_PORT", server.port.to_string());
                ports.render_template(
                    &source_template_name(root, Protocol::Ws, ws.template),
                    &context,
                    &ctx.node_directory,
                )?;
            }
        }

        IntegrationCopiers::build(ctx, root, node.is_rest_server(), node.rest_server_port())
            .run_all(ports)
    }

    /// Render `<root>/rest-openapi` with route stubs and write the document.
    fn scaffold_openapi(
        &self,
        node: &LanguageNode,
        ctx: &NodeContext,
        server: &RestServer,
        base: &RenderContext,
        ports: &GenerationPorts<'_>,
    ) -> ForgeResult<()> {
        if server.openapi_content.trim().is_empty() {
            return Err(DomainError::MissingOpenApiContent {
                node: node.name().to_string(),
            }
            .into());
        }

        let document = OpenApiDocument::parse(&server.openapi_content)?;
        debug!(
            node = node.name(),
            operations = document.operations.len(),
            "Scaffolding OpenAPI server"
        );

        let routes = document
            .operations
            .iter()
            .map(|op| self.route_stub(op))
            .collect::<Vec<_>>()
            .join("\n\n");

        let context = base
            .clone()
            .with_variable("ROUTES", routes)
            .with_variable("API_TITLE", &document.title)
            .with_variable("API_VERSION", &document.version);

        ports.render_template(
            &source_template_name(self.template_root(), Protocol::Rest, ProtocolTemplate::OpenApi),
            &context,
            &ctx.node_directory,
        )?;
        ports.write_file(&ctx.node_directory.join("openapi.yaml"), &server.openapi_content)
    }

    /// Variables shared by every source template of this node.
    fn render_context(&self, node: &LanguageNode, ctx: &NodeContext) -> RenderContext {
        let port = node.rest_server_port().map(|p| p.to_string()).unwrap_or_default();
        let mut context = RenderContext::new(&ctx.project_name)
            .with_node_name(&ctx.node_name)
            .with_variable("GIT_PLATFORM_USER_NAME", &ctx.git_platform_user_name)
            .with_variable("GIT_REPOSITORY_NAME", &ctx.git_repository_name)
            .with_variable("PORT", port);
        for (key, value) in self.extra_variables(ctx) {
            context = context.with_variable(key, value);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HttpMethod;

    pub(super) fn operation(method: HttpMethod, path: &str, handler: &str) -> ApiOperation {
        ApiOperation {
            method,
            path: path.into(),
            handler: handler.into(),
            summary: None,
        }
    }

    #[test]
    fn dispatch_covers_every_language() {
        for language in Language::ALL {
            assert_eq!(generator_for(language).language(), language);
        }
    }

    #[test]
    fn source_template_names_are_namespaced() {
        assert_eq!(
            source_template_name("javascript", Protocol::Rest, ProtocolTemplate::OpenApi),
            "javascript/rest-openapi"
        );
        assert_eq!(
            source_template_name("go", Protocol::Grpc, ProtocolTemplate::Builtin),
            "go/grpc-builtin"
        );
    }

    #[test]
    fn path_params_skip_invalid_identifiers() {
        assert_eq!(path_params("/pets/{petId}/toys/{toy_id}"), vec!["petId", "toy_id"]);
        assert!(path_params("/files/{file-name}").is_empty());
        assert!(path_params("/health").is_empty());
    }

    #[test]
    fn every_generator_mentions_path_and_handler() {
        let op = operation(HttpMethod::Post, "/orders/{orderId}", "updateOrder");
        for language in Language::ALL {
            let stub = generator_for(language).route_stub(&op);
            assert!(stub.contains("orders"), "{language}: {stub}");
            assert!(stub.contains("updateOrder") || stub.contains("update_order"), "{language}: {stub}");
        }
    }
}
