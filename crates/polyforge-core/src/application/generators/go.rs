use super::LanguageGenerator;
use crate::domain::{ApiOperation, Language, NodeContext};

/// Go services on `net/http` with 1.22 method-aware patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoGenerator;

impl LanguageGenerator for GoGenerator {
    fn language(&self) -> Language {
        Language::Go
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        format!(
            "\t// {handler}\n\
             \tmux.HandleFunc(\"{method} {path}\", func(w http.ResponseWriter, r *http.Request) {{\n\
             \t\thttp.Error(w, \"{handler} not implemented\", http.StatusNotImplemented)\n\
             \t}})",
            handler = operation.handler,
            method = operation.method.upper(),
            path = operation.path,
        )
    }

    fn extra_variables(&self, ctx: &NodeContext) -> Vec<(&'static str, String)> {
        vec![(
            "MODULE_PATH",
            format!(
                "github.com/{}/{}/{}",
                ctx.git_platform_user_name, ctx.git_repository_name, ctx.node_name
            ),
        )]
    }
}
