use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::error::Result;

/// Tunable policy knobs of the controller core.
///
/// Every field has a default mirroring the constants the forwarding plane was
/// originally provisioned with, so a controller built from `ControllerConfig::default()`
/// behaves sensibly without any config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Bandwidth units reserved for a flow admitted implicitly from an observed packet.
    pub default_bandwidth: i64,

    /// Lifetime of an implicitly admitted flow before the controller tears it down.
    pub default_duration_secs: u64,

    /// Routing cost assigned to a freshly discovered link.
    pub link_weight: i64,

    /// Bandwidth units provisioned on a freshly discovered link (per direction).
    pub link_capacity: i64,

    /// Soft idle timeout stamped on every installed forwarding rule.
    pub rule_idle_timeout_secs: u32,

    /// Hard absolute timeout stamped on every installed forwarding rule. Bounds the
    /// worst-case rule lifetime even if the controller's own teardown never fires.
    pub rule_hard_timeout_secs: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_bandwidth: 100,
            default_duration_secs: 300,
            link_weight: 1,
            link_capacity: 1000,
            rule_idle_timeout_secs: 60,
            rule_hard_timeout_secs: 300,
        }
    }
}

impl ControllerConfig {
    /// Loads the config from a JSON file. Missing fields fall back to the defaults.
    ///
    /// Errors are automatically converted into `crate::error::Error` variants:
    /// - `Error::IoError` if the file cannot be read.
    /// - `Error::DeserializationError` if the JSON is malformed.
    pub fn from_file(file_path: &str) -> Result<Self> {
        let data = fs::read_to_string(file_path)?;

        let config: ControllerConfig = serde_json::from_str(&data)?;

        Ok(config)
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_secs(self.default_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_provisioning_constants() {
        let config = ControllerConfig::default();

        assert_eq!(config.link_weight, 1);
        assert_eq!(config.link_capacity, 1000);
        assert_eq!(config.rule_idle_timeout_secs, 60);
        assert_eq!(config.rule_hard_timeout_secs, 300);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ControllerConfig = serde_json::from_str(r#"{ "default_bandwidth": 250 }"#).unwrap();

        assert_eq!(config.default_bandwidth, 250);
        assert_eq!(config.link_capacity, 1000);
        assert_eq!(config.default_duration(), Duration::from_secs(300));
    }
}
