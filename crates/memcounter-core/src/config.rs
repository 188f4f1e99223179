use crate::error::{MemoryError, Result};
use crate::memory::format::DEFAULT_PRECISION;
use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Diagnostics settings applied when counters are reported or logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    /// Fractional digits used when rendering byte counts.
    #[serde(default = "ReportConfig::default_precision")]
    pub precision: usize,

    /// Emit a warning when a deallocation drives usage below zero.
    #[serde(default = "ReportConfig::default_true")]
    pub warn_on_negative: bool,

    /// Report outstanding bytes when a context is dropped.
    #[serde(default = "ReportConfig::default_true")]
    pub warn_on_leak: bool,
}

impl ReportConfig {
    pub const MAX_PRECISION: usize = 6;

    fn default_precision() -> usize {
        DEFAULT_PRECISION
    }

    fn default_true() -> bool {
        true
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision > Self::MAX_PRECISION {
            return Err(MemoryError::Config(format!(
                "precision must be at most {}, got {}",
                Self::MAX_PRECISION,
                self.precision
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse report config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {:?}", path.as_ref()))
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize report config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            warn_on_negative: true,
            warn_on_leak: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.precision, 2);
        assert!(config.warn_on_negative);
        assert!(config.warn_on_leak);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = ReportConfig::from_toml_str("precision = 3").unwrap();
        assert_eq!(config.precision, 3);
        assert!(config.warn_on_negative);

        let empty = ReportConfig::from_toml_str("").unwrap();
        assert_eq!(empty, ReportConfig::default());
    }

    #[test]
    fn rejects_excessive_precision() {
        let config = ReportConfig {
            precision: 12,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MemoryError::Config(_))));
        assert!(ReportConfig::from_toml_str("precision = 12").is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ReportConfig::from_toml_str("precision = \"two\"").is_err());
    }
}
