use serde::Serialize;
use sift_config::SiftConfig;
use sift_core::flatten::flatten;
use sift_schema::ProtocolValidator;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::document;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValidateResponse {
    valid: bool,
    label: String,
    extraction_fields: usize,
    reports: usize,
}

/// Handle `sift validate`.
///
/// Prints the `{path, message}` list and fails when the document is invalid.
pub fn handle(args: &ValidateArgs, config: &SiftConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let defaults = args.with_defaults.then_some(&config.defaults);
    let document = document::load(&args.file, defaults)?;

    let validator = ProtocolValidator::new()?;
    match validator.validate(&document) {
        Ok(protocol) => output(
            &ValidateResponse {
                valid: true,
                label: protocol.label(),
                extraction_fields: flatten(&protocol.category).len(),
                reports: protocol.reports().len(),
            },
            flags.format,
        ),
        Err(errors) => {
            output(&errors, flags.format)?;
            Err(errors.into())
        }
    }
}
