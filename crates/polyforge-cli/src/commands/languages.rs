//! Implementation of the `polyforge languages` command.

use polyforge_core::domain::{Language, capabilities};

use crate::{
    cli::{LanguagesArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: LanguagesArgs, output: OutputManager) -> CliResult<()> {
    let matrix = capabilities::support_matrix();

    if args.format == ListFormat::Json || output.is_json() {
        return output.json(&matrix);
    }

    output.header("Supported languages:")?;
    for language in Language::ALL {
        let protocols: Vec<String> = matrix
            .iter()
            .filter(|entry| entry.language == language)
            .map(|entry| {
                let templates: Vec<_> = entry.templates.iter().map(|t| t.as_str()).collect();
                format!("{} ({})", entry.protocol.display_name(), templates.join(", "))
            })
            .collect();

        output.print(&format!(
            "  {:<12} {}",
            language.as_str(),
            protocols.join("; ")
        ))?;
    }

    Ok(())
}
