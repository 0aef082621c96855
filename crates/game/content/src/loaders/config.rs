//! Arena configuration loader.

use std::path::Path;

use arena_core::ArenaConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for arena configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config from a TOML file.
    ///
    /// Missing sections and fields take their defaults.
    pub fn load(path: &Path) -> LoadResult<ArenaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate config from TOML text.
    pub fn parse(content: &str) -> LoadResult<ArenaConfig> {
        let config: ArenaConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid arena config: {}", e))?;

        Ok(config)
    }

    /// Configuration bundled with the crate.
    pub fn embedded() -> LoadResult<ArenaConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("[movement]\nmove_speed = 6.0\n").unwrap();
        assert_eq!(config.movement.move_speed, 6.0);
        assert_eq!(config.ai, ArenaConfig::default().ai);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[ai]\nsearch_interval_min_secs = 2.0\nsearch_interval_max_secs = 1.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("Invalid arena config"));
    }

    #[test]
    fn embedded_config_is_valid() {
        assert!(ConfigLoader::embedded().is_ok());
    }
}
