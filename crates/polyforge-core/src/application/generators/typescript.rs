use super::LanguageGenerator;
use super::javascript::express_stub;
use crate::domain::{ApiOperation, Language};

/// Express services written in TypeScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptGenerator;

impl LanguageGenerator for TypeScriptGenerator {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        express_stub(operation, "req: Request, res: Response")
    }
}
