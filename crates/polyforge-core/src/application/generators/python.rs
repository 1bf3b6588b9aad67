use super::{LanguageGenerator, path_params};
use crate::domain::entities::common::to_snake_case;
use crate::domain::{ApiOperation, Language};

/// FastAPI services.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonGenerator;

impl LanguageGenerator for PythonGenerator {
    fn language(&self) -> Language {
        Language::Python
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        let function = to_snake_case(&operation.handler);
        let params = path_params(&operation.path)
            .iter()
            .map(|p| format!("{p}: str"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "@app.{method}(\"{path}\")\n\
             async def {function}({params}):\n    \
             raise HTTPException(status_code=501, detail=\"{function} not implemented\")",
            method = operation.method,
            path = operation.path,
        )
    }
}
