//! Consensus configuration
//!
//! Sources are layered: defaults, then an optional TOML file, then
//! environment variables. Callers may override individual fields afterwards
//! (the CLI does so for its flags).

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConsensusError, ConsensusResult};

/// Environment variable overriding [`ConsensusConfig::cycle_policy`].
pub const CYCLE_POLICY_ENV: &str = "CONSENSUS_CYCLE_POLICY";

/// What to do when cluster order can only be completed by the
/// discovery-order fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Keep the fallback order and log a warning.
    #[default]
    Append,
    /// Fail with [`ConsensusError::UnresolvableOrder`].
    Reject,
}

impl std::fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for CyclePolicy {
    type Err = ConsensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "reject" => Ok(Self::Reject),
            other => Err(ConsensusError::config(format!(
                "unknown cycle policy '{}' (expected 'append' or 'reject')",
                other
            ))),
        }
    }
}

/// Consensus engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Handling of cyclic cluster precedence.
    pub cycle_policy: CyclePolicy,
}

impl ConsensusConfig {
    /// Load configuration from a TOML file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> ConsensusResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsensusError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> ConsensusResult<Self> {
        toml::from_str(content).map_err(|e| ConsensusError::config(e.to_string()))
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> ConsensusResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this configuration.
    pub fn with_env_overrides(self) -> ConsensusResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConsensusResult<Self> {
        if let Some(value) = lookup(CYCLE_POLICY_ENV) {
            self.cycle_policy = value.parse()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_appends() {
        assert_eq!(ConsensusConfig::default().cycle_policy, CyclePolicy::Append);
    }

    #[test]
    fn test_cycle_policy_parse() {
        assert_eq!("append".parse::<CyclePolicy>().unwrap(), CyclePolicy::Append);
        assert_eq!(" REJECT ".parse::<CyclePolicy>().unwrap(), CyclePolicy::Reject);
        let err = "panic".parse::<CyclePolicy>().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_cycle_policy_display_matches_serde() {
        for policy in [CyclePolicy::Append, CyclePolicy::Reject] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy));
        }
    }

    #[test]
    fn test_from_toml() {
        let config = ConsensusConfig::from_toml("cycle_policy = \"reject\"").unwrap();
        assert_eq!(config.cycle_policy, CyclePolicy::Reject);

        let empty = ConsensusConfig::from_toml("").unwrap();
        assert_eq!(empty, ConsensusConfig::default());

        assert!(ConsensusConfig::from_toml("cycle_policy = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cycle_policy = \"reject\"").unwrap();
        let config = ConsensusConfig::load(file.path()).unwrap();
        assert_eq!(config.cycle_policy, CyclePolicy::Reject);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConsensusConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.to_string().starts_with("Configuration error: cannot read"));
    }

    #[test]
    fn test_env_override() {
        let config = ConsensusConfig::default()
            .with_overrides_from(|key| (key == CYCLE_POLICY_ENV).then(|| "reject".to_string()))
            .unwrap();
        assert_eq!(config.cycle_policy, CyclePolicy::Reject);

        let untouched = ConsensusConfig {
            cycle_policy: CyclePolicy::Reject,
        }
        .with_overrides_from(|_| None)
        .unwrap();
        assert_eq!(untouched.cycle_policy, CyclePolicy::Reject);

        assert!(ConsensusConfig::default()
            .with_overrides_from(|_| Some("bogus".to_string()))
            .is_err());
    }
}
