//! Configuration System
//!
//! Loads configuration from a TOML file with environment variable overrides.
//! Every field has a default, so an empty file (or no file) is valid.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::wallet::{WalletConfig, LEDGER_FILE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the stake ledger lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Keep stakes across restarts. When false the ledger is memory only.
    #[serde(default = "default_persist_stakes")]
    pub persist_stakes: bool,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("touchgrass").to_string_lossy().to_string())
        .unwrap_or_else(|| "./touchgrass_data".to_string())
}

fn default_persist_stakes() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persist_stakes: default_persist_stakes(),
        }
    }
}

impl StorageConfig {
    /// Ledger file path, or `None` for an in-memory ledger
    pub fn ledger_path(&self) -> Option<PathBuf> {
        self.persist_stakes
            .then(|| PathBuf::from(&self.data_dir).join(LEDGER_FILE))
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8091".to_string(),
                "http://127.0.0.1:8091".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Mock data and wallet simulation
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the generated dataset
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_starting_balance")]
    pub starting_balance: f64,

    /// Delay of stake and payout transactions; balance reads take half
    #[serde(default = "default_wallet_latency")]
    pub wallet_latency_ms: u64,

    #[serde(default = "default_connect_delay")]
    pub connect_delay_ms: u64,
}

fn default_seed() -> u64 {
    42
}

fn default_starting_balance() -> f64 {
    100.0
}

fn default_wallet_latency() -> u64 {
    1000
}

fn default_connect_delay() -> u64 {
    2000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            starting_balance: default_starting_balance(),
            wallet_latency_ms: default_wallet_latency(),
            connect_delay_ms: default_connect_delay(),
        }
    }
}

impl SimulationConfig {
    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig {
            starting_balance: self.starting_balance,
            read_latency: Duration::from_millis(self.wallet_latency_ms / 2),
            transaction_latency: Duration::from_millis(self.wallet_latency_ms),
        }
    }

    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    /// No delays anywhere, for tests and scripted demos
    pub fn instant() -> Self {
        Self {
            wallet_latency_ms: 0,
            connect_delay_ms: 0,
            ..Default::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber. `RUST_LOG` wins over the
    /// configured level; `extra` adds directives such as `tower_http=debug`.
    pub fn init(&self, extra: &str) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let mut directives = format!("touchgrass={}", self.level);
            if !extra.is_empty() {
                directives.push(',');
                directives.push_str(extra);
            }
            EnvFilter::new(directives)
        });

        let registry = tracing_subscriber::registry().with(filter);
        if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the first default location that exists, else from the environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("touchgrass").join("config.toml")),
            Some(PathBuf::from("/etc/touchgrass/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = var("TOUCHGRASS_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(host) = var("TOUCHGRASS_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("TOUCHGRASS_API_PORT").and_then(|p| p.parse().ok()) {
            self.api.port = port;
        }

        if let Some(seed) = var("TOUCHGRASS_SEED").and_then(|s| s.parse().ok()) {
            self.simulation.seed = seed;
        }
        if let Some(latency) = var("TOUCHGRASS_LATENCY_MS").and_then(|s| s.parse().ok()) {
            self.simulation.wallet_latency_ms = latency;
        }

        if let Some(level) = var("TOUCHGRASS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("TOUCHGRASS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Contents of a default config file
pub fn generate_default_config() -> String {
    r#"# Touch Grass Configuration
#
# Environment variables override these settings:
# - TOUCHGRASS_DATA_DIR
# - TOUCHGRASS_API_HOST
# - TOUCHGRASS_API_PORT
# - TOUCHGRASS_SEED
# - TOUCHGRASS_LATENCY_MS
# - TOUCHGRASS_LOG_LEVEL
# - TOUCHGRASS_LOG_FORMAT

[storage]
# Directory holding the stake ledger
data_dir = "~/.local/share/touchgrass"

# Keep open stakes across restarts
persist_stakes = true

[api]
host = "0.0.0.0"
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:8091", "http://127.0.0.1:8091"]

[simulation]
# Seed for the generated users, challenges and activity feed
seed = 42

# Token balance of the staking wallet
starting_balance = 100.0

# Simulated transaction latency (ms); balance reads take half
wallet_latency_ms = 1000

# Simulated wallet connection delay (ms)
connect_delay_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.simulation.connect_delay_ms, 2000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.addr(), "0.0.0.0:8090");
        assert!(config.storage.persist_stakes);
        assert_eq!(config.simulation.starting_balance, 100.0);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TOUCHGRASS_API_PORT", "9999"),
            ("TOUCHGRASS_SEED", "7"),
            ("TOUCHGRASS_LATENCY_MS", "0"),
            ("TOUCHGRASS_LOG_FORMAT", "json"),
            ("TOUCHGRASS_API_HOST", "127.0.0.1"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.addr(), "127.0.0.1:9999");
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.wallet_config().transaction_latency, Duration::ZERO);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "TOUCHGRASS_API_PORT").then(|| "nope".to_string()));
        assert_eq!(config.api.port, 8090);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\npersist_stakes = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.storage.ledger_path().is_none());

        std::fs::write(&path, "[api\nport = ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
