//! Configuration management
//!
//! Settings are read from `docverify.toml` in the data directory. A missing
//! file means defaults; a malformed file is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::{FixedScorer, JsonFileStore, MemoryStore, RandomScorer};
use crate::core::ports::PhaseScorer;
use crate::core::services::Workflow;
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Scoring settings
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which store adapter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file in the data directory (default)
    #[default]
    File,
    /// In-process only
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(format!("Unknown backend: {s}. Use 'file' or 'memory'")),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend
    #[serde(default)]
    pub backend: StorageBackend,
    /// Store file, relative to the data directory unless absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved store file path
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.path
            .as_deref()
            .map_or_else(paths::default_store_file, paths::resolve)
    }
}

/// Which scoring strategy to use by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// Pseudo-random placeholder (default)
    #[default]
    Random,
    /// Always `fixed_score`
    Fixed,
}

/// Scoring settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Strategy
    #[serde(default)]
    pub strategy: ScoringStrategy,
    /// Score used by the fixed strategy
    #[serde(default = "default_fixed_score")]
    pub fixed_score: u8,
}

const fn default_fixed_score() -> u8 {
    90
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::default(),
            fixed_score: default_fixed_score(),
        }
    }
}

impl ScoringConfig {
    /// Build the configured scorer
    #[must_use]
    pub fn scorer(&self) -> Box<dyn PhaseScorer> {
        match self.strategy {
            ScoringStrategy::Random => Box::new(RandomScorer),
            ScoringStrategy::Fixed => Box::new(FixedScorer(self.fixed_score)),
        }
    }
}

impl AppConfig {
    /// Load from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&paths::config_file())
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Build the workflow this configuration describes
    #[must_use]
    pub fn workflow(&self) -> Workflow {
        let scorer = self.scoring.scorer();
        match self.storage.backend {
            StorageBackend::File => {
                let path = self.storage.store_path();
                log::debug!("using file store at {}", path.display());
                Workflow::new(Arc::new(JsonFileStore::open(path)), scorer)
            },
            StorageBackend::Memory => Workflow::new(Arc::new(MemoryStore::new()), scorer),
        }
    }
}

/// Default configuration file contents written by `init`
#[must_use]
pub fn default_config_toml() -> String {
    format!(
        r#"# docverify configuration

[server]
host = "{host}"
port = {port}

[storage]
# "file" keeps requests in store.json next to this file; "memory" forgets them on exit
backend = "file"
# path = "store.json"

[scoring]
# "random" scores attempts between 70 and 99; "fixed" always uses fixed_score
strategy = "random"
fixed_score = {score}
"#,
        host = default_host(),
        port = default_port(),
        score = default_fixed_score()
    )
}
