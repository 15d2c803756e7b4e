use anyhow::Context;
use sift_config::SiftConfig;

use crate::cli::OutputFormat;

/// Load layered configuration, picking up a workspace `.env` first.
pub fn load_config() -> anyhow::Result<SiftConfig> {
    SiftConfig::load_with_dotenv().context("failed to load sift configuration")
}

/// The output format used when `--format` is not given.
pub fn default_format(config: &SiftConfig) -> anyhow::Result<OutputFormat> {
    OutputFormat::from_config(&config.general.output)
}
