use super::LanguageGenerator;
use crate::domain::entities::common::to_camel_case;
use crate::domain::{ApiOperation, Language, NodeContext};

/// Spring Boot services.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaGenerator;

/// `com.<user>.<node>` reduced to what a Java package allows.
fn package(ctx: &NodeContext) -> String {
    let segment = |s: &str| {
        let cleaned: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match cleaned.chars().next() {
            None => "app".to_string(),
            Some(c) if c.is_ascii_digit() => format!("_{cleaned}"),
            Some(_) => cleaned,
        }
    };
    format!(
        "com.{}.{}",
        segment(&ctx.git_platform_user_name),
        segment(&ctx.node_name)
    )
}

impl LanguageGenerator for JavaGenerator {
    fn language(&self) -> Language {
        Language::Java
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        format!(
            "    @RequestMapping(value = \"{path}\", method = RequestMethod.{method})\n    \
             public ResponseEntity<String> {handler}() {{\n        \
             return ResponseEntity.status(HttpStatus.NOT_IMPLEMENTED).body(\"{handler} not implemented\");\n    \
             }}",
            path = operation.path,
            method = operation.method.upper(),
            handler = to_camel_case(&operation.handler),
        )
    }

    fn extra_variables(&self, ctx: &NodeContext) -> Vec<(&'static str, String)> {
        let package = package(ctx);
        let package_path = package.replace('.', "/");
        vec![("PACKAGE", package), ("PACKAGE_PATH", package_path)]
    }
}
