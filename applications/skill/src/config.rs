/// Skill configuration
use crate::error::{Result, SkillError};
use pco_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of environment overrides, e.g. `PCO_SKILL_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "PCO_SKILL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_planning_center")]
    pub planning_center: PlanningCenterSettings,

    #[serde(default)]
    pub skill: SkillSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanningCenterSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SkillSettings {
    /// When set, requests for any other skill are rejected
    #[serde(default)]
    pub application_id: Option<String>,
}

impl SkillConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` if given, otherwise `config.toml` when it exists, then
    /// applies `PCO_SKILL_<SECTION>__<KEY>` environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(PathBuf::from(path)));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| SkillError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SkillError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.planning_center.api_base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SkillError::Config(format!(
                "Planning Center API URL must be http(s): {}",
                base_url
            )));
        }

        if self.planning_center.timeout_secs == 0 {
            return Err(SkillError::Config(
                "Planning Center timeout must be at least one second".to_string(),
            ));
        }

        if self.storage.database_url.is_empty() {
            return Err(SkillError::Config(
                "Database URL is required (set PCO_SKILL_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if matches!(&self.skill.application_id, Some(id) if id.trim().is_empty()) {
            return Err(SkillError::Config(
                "Application id must not be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Client settings for the Planning Center API
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.planning_center.api_base_url.clone())
            .with_timeout(Duration::from_secs(self.planning_center.timeout_secs))
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/pco-skill.db".to_string()
}

fn default_planning_center() -> PlanningCenterSettings {
    PlanningCenterSettings {
        api_base_url: default_api_base_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            planning_center: default_planning_center(),
            skill: SkillSettings::default(),
        }
    }
}
