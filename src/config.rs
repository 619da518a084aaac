use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::DemoKind;
use crate::error::{PatternError, Result};
use crate::patterns::strategy::EvictionPolicy;

/// Largest cache the demo will agree to run with.
pub const MAX_CACHE_CAPACITY: usize = 1 << 20;

/// Settings read from an optional TOML file. Missing keys keep their
/// defaults.
///
/// ```toml
/// demos = ["strategy", "state"]
///
/// [cache]
/// max_capacity = 3
/// initial_policy = "lru"
///
/// [command]
/// presses = 4
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub demos: Vec<DemoKind>,
    pub cache: CacheSettings,
    pub command: CommandSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    pub max_capacity: usize,
    pub initial_policy: EvictionPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandSettings {
    pub presses: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            demos: DemoKind::ALL.to_vec(),
            cache: CacheSettings::default(),
            command: CommandSettings::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: 2,
            initial_policy: EvictionPolicy::Lfu,
        }
    }
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self { presses: 10 }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|err| PatternError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading catalog config");
        let content = fs::read_to_string(path).map_err(|err| {
            PatternError::config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.demos.is_empty() {
            return Err(PatternError::config("demos must list at least one demo"));
        }
        if self.cache.max_capacity == 0 {
            return Err(PatternError::config("cache.max_capacity must be at least 1"));
        }
        if self.cache.max_capacity > MAX_CACHE_CAPACITY {
            return Err(PatternError::config(format!(
                "cache.max_capacity must be at most {MAX_CACHE_CAPACITY}, got {}",
                self.cache.max_capacity
            )));
        }
        if self.command.presses == 0 {
            return Err(PatternError::config("command.presses must be at least 1"));
        }
        Ok(())
    }
}
