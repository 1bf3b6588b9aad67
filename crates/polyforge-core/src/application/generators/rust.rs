use super::LanguageGenerator;
use crate::domain::{ApiOperation, HttpMethod, Language};

/// axum services.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustGenerator;

impl LanguageGenerator for RustGenerator {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        // axum has no `trace` shortcut
        let method = match operation.method {
            HttpMethod::Trace => "on(MethodFilter::TRACE, ".to_string(),
            other => format!("{other}("),
        };
        format!(
            "        .route(\"{}\", {method}|| async {{ (StatusCode::NOT_IMPLEMENTED, \"{} not implemented\") }}))",
            operation.path, operation.handler
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::tests::operation;

    #[test]
    fn stub_chains_a_route() {
        let stub = RustGenerator.route_stub(&operation(HttpMethod::Get, "/pets/{petId}", "showPetById"));
        assert_eq!(
            stub,
            "        .route(\"/pets/{petId}\", get(|| async { (StatusCode::NOT_IMPLEMENTED, \"showPetById not implemented\") }))"
        );
    }

    #[test]
    fn trace_uses_method_filter() {
        let stub = RustGenerator.route_stub(&operation(HttpMethod::Trace, "/debug", "traceDebug"));
        assert!(stub.contains("on(MethodFilter::TRACE, || async"));
    }
}
