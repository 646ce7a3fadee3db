//! Table configuration.
//! 表配置。
//!
//! Tables never read the environment. Callers build a `TableConfig` (by hand
//! or from a JSON file) and pass it to `AtomTable::from_config` or
//! `SharedAtomTable::from_config`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub mod defaults {
    /// Slots reserved up front in both directions of a table.
    pub const INITIAL_CAPACITY: usize = 1024;
}

/// Sizing options for atom tables.
/// 原子表的容量选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Number of labels to reserve room for.
    pub initial_capacity: usize,
    /// Shard count of the concurrent table's map. `None` keeps the map's
    /// own default. Ignored by the single-writer table.
    pub shard_amount: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            initial_capacity: defaults::INITIAL_CAPACITY,
            shard_amount: None,
        }
    }
}

impl TableConfig {
    pub fn with_capacity(initial_capacity: usize) -> Self {
        TableConfig {
            initial_capacity,
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    /// 读取、解析并校验 JSON 配置文件。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.shard_amount {
            Some(n) if n <= 1 || !n.is_power_of_two() => Err(ConfigError::InvalidShardAmount(n)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_amount_must_be_power_of_two() {
        let mut config = TableConfig::default();
        assert!(config.validate().is_ok());

        config.shard_amount = Some(16);
        assert!(config.validate().is_ok());

        for bad in [0, 1, 3, 24] {
            config.shard_amount = Some(bad);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidShardAmount(n)) if n == bad
            ));
        }
    }
}
