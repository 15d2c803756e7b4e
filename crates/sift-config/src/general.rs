//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const OUTPUT_FORMATS: &[&str] = &["json", "raw"];

fn default_output() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default output format when `--format` is not given: `json` (pretty)
    /// or `raw` (single line).
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if OUTPUT_FORMATS.contains(&self.output.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                "general.output",
                format!("expected one of {}", OUTPUT_FORMATS.join(", ")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.output, "json");
        config.validate().unwrap();
    }

    #[test]
    fn unknown_output_is_rejected() {
        let config = GeneralConfig {
            output: "yaml".into(),
        };
        assert!(config.validate().is_err());
    }
}
