use super::LanguageGenerator;
use crate::domain::{ApiOperation, Language};

/// Express services.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptGenerator;

impl LanguageGenerator for JavaScriptGenerator {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        express_stub(operation, "req, res")
    }
}

/// One Express route answering 501; `params` is the handler signature.
pub(super) fn express_stub(operation: &ApiOperation, params: &str) -> String {
    format!(
        "// {handler}\n\
         app.{method}('{path}', ({params}) => {{\n  \
         res.status(501).json({{ error: '{handler} not implemented' }});\n\
         }});",
        handler = operation.handler,
        method = operation.method,
        path = operation.colon_path(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::tests::operation;
    use crate::domain::HttpMethod;

    #[test]
    fn stub_uses_colon_parameters() {
        let stub = JavaScriptGenerator.route_stub(&operation(HttpMethod::Get, "/pets/{petId}", "showPetById"));

        assert_eq!(
            stub,
            "// showPetById\n\
             app.get('/pets/:petId', (req, res) => {\n  \
             res.status(501).json({ error: 'showPetById not implemented' });\n\
             });"
        );
    }
}
