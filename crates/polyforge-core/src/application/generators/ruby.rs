use super::LanguageGenerator;
use crate::domain::{ApiOperation, HttpMethod, Language};

/// Sinatra services.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyGenerator;

impl LanguageGenerator for RubyGenerator {
    fn language(&self) -> Language {
        Language::Ruby
    }

    fn route_stub(&self, operation: &ApiOperation) -> String {
        let path = operation.colon_path();
        if operation.method == HttpMethod::Trace {
            return format!(
                "# TRACE {path} ({}) has no Sinatra route helper",
                operation.handler
            );
        }
        format!(
            "# {handler}\n\
             {method} '{path}' do\n  \
             halt 501, {{ error: '{handler} not implemented' }}.to_json\n\
             end",
            handler = operation.handler,
            method = operation.method,
        )
    }
}
