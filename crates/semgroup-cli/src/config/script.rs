use semgroup_types::{SemgroupError, SemgroupResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::network::NetworkConfig;
use crate::artifacts::DEFAULT_ARTIFACTS_URL;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Contents of `semgroup.toml`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub deployments: PathBuf,
    pub artifacts_dir: PathBuf,
    /// Where missing circuit artifacts are downloaded from.
    pub artifacts_url: String,
    pub networks: BTreeMap<String, NetworkConfig>,
    pub logging: LoggingConfig,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            deployments: PathBuf::from("./deployed-contracts.json"),
            artifacts_dir: PathBuf::from("./snark-artifacts"),
            artifacts_url: DEFAULT_ARTIFACTS_URL.to_string(),
            networks: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

/// A network selected by name with its connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedNetwork {
    pub name: String,
    pub config: NetworkConfig,
}

impl ScriptConfig {
    pub fn load(path: impl AsRef<Path>) -> SemgroupResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| SemgroupError::Config(format!("Failed to read config: {}", e)))?;
            Self::from_toml(&contents)?
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> SemgroupResult<Self> {
        toml::from_str(contents)
            .map_err(|e| SemgroupError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SemgroupResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SemgroupError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| SemgroupError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("SEMGROUP_DEPLOYMENTS") {
            self.deployments = PathBuf::from(path);
        }

        if let Ok(dir) = std::env::var("SEMGROUP_ARTIFACTS_DIR") {
            self.artifacts_dir = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("SEMGROUP_ARTIFACTS_URL") {
            self.artifacts_url = url;
        }

        if let Ok(level) = std::env::var("SEMGROUP_LOG_LEVEL") {
            self.logging.level = level;
        }

        if std::env::var("SEMGROUP_LOG_JSON").is_ok() {
            self.logging.json = true;
        }
    }

    pub fn validate(&self) -> SemgroupResult<()> {
        if !self.artifacts_url.starts_with("http://") && !self.artifacts_url.starts_with("https://") {
            return Err(SemgroupError::Config(format!(
                "artifacts_url must be an http(s) URL, got '{}'",
                self.artifacts_url
            )));
        }

        for (name, network) in &self.networks {
            if network.rpc_url.trim().is_empty() {
                return Err(SemgroupError::Config(format!(
                    "Network '{}' has an empty rpc_url",
                    name
                )));
            }
            if network.chain_id == 0 {
                return Err(SemgroupError::Config(format!(
                    "Network '{}' has chain_id 0",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Looks `name` up in the configured networks, then in the presets.
    ///
    /// A missing name is the one error the procedure raises on its own.
    pub fn resolve_network(&self, name: Option<&str>) -> SemgroupResult<ResolvedNetwork> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| SemgroupError::Config("Please, define a supported network".into()))?;

        let config = self
            .networks
            .get(name)
            .cloned()
            .or_else(|| NetworkConfig::builtin(name))
            .ok_or_else(|| {
                SemgroupError::Config(format!("Network '{}' is not supported", name))
            })?;

        Ok(ResolvedNetwork {
            name: name.to_string(),
            config,
        })
    }
}
