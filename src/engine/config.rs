use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LayoutError, Result};
use crate::layout::FeatureFlags;
use crate::logging::{LogLevel, Logger};

/// Configuration knobs for a [`super::ResponsiveLayout`].
#[derive(Clone)]
pub struct LayoutConfig {
    /// Optional pipeline phases.
    pub flags: FeatureFlags,
    /// Optional structured logger. When set, every run is audited through it.
    pub logger: Option<Logger>,
    /// Level used for per-stage audit lines.
    pub audit_level: LogLevel,
    /// Target field used when emitting audit lines.
    pub audit_target: String,
    /// Emit a metrics snapshot after every run when a logger is configured.
    pub emit_metrics: bool,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            flags: FeatureFlags::default(),
            logger: None,
            audit_level: LogLevel::Debug,
            audit_target: "rowpack::layout.audit".to_string(),
            emit_metrics: true,
            metrics_target: "rowpack::layout.metrics".to_string(),
        }
    }
}

impl fmt::Debug for LayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutConfig")
            .field("flags", &self.flags)
            .field("logger", &self.logger.is_some())
            .field("audit_level", &self.audit_level)
            .field("audit_target", &self.audit_target)
            .field("emit_metrics", &self.emit_metrics)
            .field("metrics_target", &self.metrics_target)
            .finish()
    }
}

/// Serializable subset of [`LayoutConfig`]; loggers are attached in code.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    flags: FeatureFlags,
    audit_level: LogLevel,
    audit_target: String,
    emit_metrics: bool,
    metrics_target: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = LayoutConfig::default();
        Self {
            flags: defaults.flags,
            audit_level: defaults.audit_level,
            audit_target: defaults.audit_target,
            emit_metrics: defaults.emit_metrics,
            metrics_target: defaults.metrics_target,
        }
    }
}

impl LayoutConfig {
    /// Parse a JSON document; absent keys keep their defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_json::from_str(source).map_err(|err| LayoutError::Config(err.to_string()))?;
        Ok(Self {
            flags: file.flags,
            logger: None,
            audit_level: file.audit_level,
            audit_target: file.audit_target,
            emit_metrics: file.emit_metrics,
            metrics_target: file.metrics_target,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json(
            r#"{"flags": {"balance_rows": false}, "audit_level": "info"}"#,
        )
        .unwrap();
        assert!(!config.flags.balance_rows);
        assert!(config.flags.pull_up_children);
        assert_eq!(config.audit_level, LogLevel::Info);
        assert_eq!(config.metrics_target, "rowpack::layout.metrics");
        assert!(config.logger.is_none());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = LayoutConfig::from_json(r#"{"flags": 3}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));

        let err = LayoutConfig::from_json(r#"{"colour": "blue"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LayoutConfig::from_path("/nonexistent/rowpack.json").unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }
}
