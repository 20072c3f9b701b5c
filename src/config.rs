//! Pipeline configuration file support
//!
//! Handles parsing of `tripgraph.toml` configuration files and environment
//! variable overrides. Defaults mirror a local single-instance Neo4j setup;
//! credentials and the import root are deployment facts and belong in the
//! config file or the environment, never in code.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::zones::ZoneSet;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = "tripgraph.toml";

/// Environment variable for the Bolt URI
pub const ENV_NEO4J_URI: &str = "TRIPGRAPH_NEO4J_URI";

/// Environment variable for the store username
pub const ENV_NEO4J_USER: &str = "TRIPGRAPH_NEO4J_USER";

/// Environment variable for the store password
pub const ENV_NEO4J_PASSWORD: &str = "TRIPGRAPH_NEO4J_PASSWORD";

/// Environment variable for the store's bulk-import directory
pub const ENV_IMPORT_DIR: &str = "TRIPGRAPH_IMPORT_DIR";

/// Error type for configuration handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Unknown zone set: {0}. Built-in sets: bronx.")]
    UnknownZoneSet(String),
}

/// Result type for configuration handling
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the load treats data already in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Wipe all existing graph data before loading (default)
    #[default]
    Replace,
    /// Keep existing data and add the new batch
    Append,
}

impl std::str::FromStr for LoadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(LoadMode::Replace),
            "append" => Ok(LoadMode::Append),
            _ => Err(format!("Unknown load mode: {}. Use 'replace' or 'append'.", s)),
        }
    }
}

impl std::fmt::Display for LoadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadMode::Replace => write!(f, "replace"),
            LoadMode::Append => write!(f, "append"),
        }
    }
}

/// Graph store connection section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jSection {
    /// Bolt URI
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Username
    #[serde(default = "default_user")]
    pub user: String,

    /// Password
    #[serde(default)]
    pub password: String,

    /// The store's bulk-import directory (staged files land here)
    #[serde(default = "default_import_dir")]
    pub import_dir: PathBuf,
}

fn default_uri() -> String {
    "neo4j://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_import_dir() -> PathBuf {
    PathBuf::from("/var/lib/neo4j/import")
}

impl Default for Neo4jSection {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            import_dir: default_import_dir(),
        }
    }
}

/// Load behavior section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    /// Load mode
    #[serde(default)]
    pub mode: LoadMode,

    /// Maximum number of full-pipeline attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed sleep between attempts, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_max_attempts() -> u32 {
    10
}

fn default_retry_delay_secs() -> u64 {
    10
}

impl Default for LoadSection {
    fn default() -> Self {
        Self {
            mode: LoadMode::default(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

/// Filter section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSection {
    /// Named built-in zone set
    #[serde(default = "default_zone_set")]
    pub zone_set: String,

    /// Explicit zone id list; overrides `zone_set` when present
    #[serde(default)]
    pub zones: Option<Vec<i64>>,

    /// Trips must be strictly longer than this distance
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,

    /// Trips must cost strictly more than this fare
    #[serde(default = "default_min_fare")]
    pub min_fare: f64,
}

fn default_zone_set() -> String {
    "bronx".to_string()
}

fn default_min_distance() -> f64 {
    crate::filter::MIN_TRIP_DISTANCE
}

fn default_min_fare() -> f64 {
    crate::filter::MIN_FARE_AMOUNT
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            zone_set: default_zone_set(),
            zones: None,
            min_distance: default_min_distance(),
            min_fare: default_min_fare(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `tripgraph.toml` configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    /// Graph store connection
    #[serde(default)]
    pub neo4j: Neo4jSection,

    /// Load behavior
    #[serde(default)]
    pub load: LoadSection,

    /// Record filtering
    #[serde(default)]
    pub filter: FilterSection,
}

impl PipelineConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `tripgraph.toml` in the directory; falls back to defaults
    /// if not found. Environment overrides apply either way.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::Io(e.to_string()))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }

    /// Convert configuration to a TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(uri) = std::env::var(ENV_NEO4J_URI) {
            self.neo4j.uri = uri;
        }

        if let Ok(user) = std::env::var(ENV_NEO4J_USER) {
            self.neo4j.user = user;
        }

        if let Ok(password) = std::env::var(ENV_NEO4J_PASSWORD) {
            self.neo4j.password = password;
        }

        if let Ok(dir) = std::env::var(ENV_IMPORT_DIR) {
            self.neo4j.import_dir = PathBuf::from(dir);
        }
    }

    /// Resolve the configured zone allow-set: an explicit id list wins,
    /// otherwise the named built-in set.
    pub fn zone_set(&self) -> ConfigResult<ZoneSet> {
        if let Some(zones) = &self.filter.zones {
            return Ok(ZoneSet::new("custom", zones.iter().copied()));
        }
        ZoneSet::named(&self.filter.zone_set)
            .ok_or_else(|| ConfigError::UnknownZoneSet(self.filter.zone_set.clone()))
    }

    /// Fixed sleep between pipeline attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.load.retry_delay_secs)
    }

    /// Check if a configuration file exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# tripgraph configuration
# Connection, load behavior and filtering for the trip graph pipeline.

[neo4j]
# Bolt URI of the graph store
uri = "neo4j://localhost:7687"
user = "neo4j"
password = ""

# The store's bulk-import directory. Staged CSV files are written here and
# the store resolves them against this root during LOAD CSV.
import_dir = "/var/lib/neo4j/import"

[load]
# "replace" wipes all existing graph data before loading; "append" keeps it.
mode = "replace"

# Full-pipeline retry budget and fixed backoff between attempts.
max_attempts = 10
retry_delay_secs = 10

[filter]
# Named built-in zone set defining the region of interest.
zone_set = "bronx"

# Or pin an explicit id list instead (overrides zone_set):
# zones = [3, 18, 20]

# Trips must be strictly longer / more expensive than these thresholds.
min_distance = 0.1
min_fare = 2.5
"#
}
