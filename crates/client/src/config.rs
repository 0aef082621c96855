//! Client configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use arena_content::{AbilityLoader, AbilitySpec, ConfigLoader, TreeLoader, TreeSet};
use arena_core::ArenaConfig;

/// Where content comes from and how long the demo runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Arena tuning (TOML). Embedded defaults when unset.
    pub config_path: Option<PathBuf>,
    /// Ability catalog (RON). Embedded catalog when unset.
    pub abilities_path: Option<PathBuf>,
    /// Decision trees (RON). Embedded trees when unset.
    pub trees_path: Option<PathBuf>,
    pub ticks: u32,
    pub tick: Duration,
    /// Sleep between ticks instead of running flat out.
    pub realtime: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            abilities_path: None,
            trees_path: None,
            ticks: 60,
            tick: Duration::from_millis(100),
            realtime: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_CONFIG` - Arena tuning TOML path
    /// - `ARENA_ABILITIES` - Ability catalog RON path
    /// - `ARENA_TREES` - Decision tree RON path
    /// - `ARENA_TICKS` - Number of ticks to simulate (default: 60)
    /// - `ARENA_TICK_MS` - Tick length in milliseconds (default: 100)
    /// - `ARENA_REALTIME` - Pace ticks in wall-clock time (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.config_path = env::var_os("ARENA_CONFIG").map(PathBuf::from);
        config.abilities_path = env::var_os("ARENA_ABILITIES").map(PathBuf::from);
        config.trees_path = env::var_os("ARENA_TREES").map(PathBuf::from);

        if let Some(ticks) = read_env::<u32>("ARENA_TICKS") {
            config.ticks = ticks;
        }
        if let Some(ms) = read_env::<u64>("ARENA_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }
        if let Some(realtime) = read_env_bool("ARENA_REALTIME") {
            config.realtime = realtime;
        }

        config
    }

    pub fn arena_config(&self) -> Result<ArenaConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path),
            None => ConfigLoader::embedded(),
        }
    }

    pub fn abilities(&self) -> Result<Vec<AbilitySpec>> {
        match &self.abilities_path {
            Some(path) => AbilityLoader::load(path),
            None => AbilityLoader::embedded(),
        }
    }

    pub fn trees(&self) -> Result<TreeSet> {
        match &self.trees_path {
            Some(path) => TreeLoader::load(path),
            None => TreeLoader::embedded(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_embedded_content() {
        let config = ClientConfig::default();
        assert!(config.arena_config().is_ok());
        assert_eq!(config.abilities().unwrap().len(), 3);
        assert!(config.trees().unwrap().contains_key("brute"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let config = ClientConfig {
            trees_path: Some(PathBuf::from("/nonexistent/trees.ron")),
            ..ClientConfig::default()
        };
        assert!(config.trees().is_err());
    }
}
