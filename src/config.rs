use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Connection details and respondent identity for one platform environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub host: String,
    pub api_token: String,
    pub user_id: String,
    pub user_name: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub current_environment: Option<String>,
    pub environments: HashMap<String, EnvironmentConfig>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    25
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("grc-cli")
        } else {
            // Home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".grc-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config with {} environments",
            config.environments.len()
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn add_environment(&mut self, name: String, environment: EnvironmentConfig) -> Result<()> {
        info!("Adding environment: {}", name);
        self.environments.insert(name.clone(), environment);

        // First environment becomes the current one
        if self.current_environment.is_none() {
            self.current_environment = Some(name.clone());
            info!("Set {} as current environment", name);
        }

        self.save()
    }

    /// The active environment, with `GRC_HOST`/`GRC_TOKEN`/`GRC_USER_ID`/
    /// `GRC_USER_NAME` (and a `.env` file) overriding individual fields.
    pub fn current_environment(&self) -> Result<EnvironmentConfig> {
        dotenvy::dotenv().ok();

        let mut environment = self
            .current_environment
            .as_ref()
            .and_then(|name| self.environments.get(name))
            .cloned()
            .unwrap_or_else(|| EnvironmentConfig {
                host: String::new(),
                api_token: String::new(),
                user_id: String::new(),
                user_name: String::new(),
            });

        if let Ok(host) = std::env::var("GRC_HOST") {
            environment.host = host;
        }
        if let Ok(token) = std::env::var("GRC_TOKEN") {
            environment.api_token = token;
        }
        if let Ok(user_id) = std::env::var("GRC_USER_ID") {
            environment.user_id = user_id;
        }
        if let Ok(user_name) = std::env::var("GRC_USER_NAME") {
            environment.user_name = user_name;
        }

        if environment.host.is_empty() {
            anyhow::bail!(
                "No environment configured. Run 'grc-cli env add' or set GRC_HOST/GRC_TOKEN"
            );
        }

        Ok(environment)
    }

    pub fn get_current_environment_name(&self) -> Option<&String> {
        self.current_environment.as_ref()
    }

    pub fn set_current_environment(&mut self, name: String) -> Result<()> {
        if !self.environments.contains_key(&name) {
            anyhow::bail!("Environment '{}' not found", name);
        }

        info!("Setting current environment to: {}", name);
        self.current_environment = Some(name);
        self.save()
    }

    pub fn list_environments(&self) -> Vec<&String> {
        self.environments.keys().collect()
    }

    pub fn remove_environment(&mut self, name: &str) -> Result<()> {
        if !self.environments.contains_key(name) {
            anyhow::bail!("Environment '{}' not found", name);
        }

        info!("Removing environment: {}", name);
        self.environments.remove(name);

        if self.current_environment.as_deref() == Some(name) {
            warn!("Removed current environment, clearing current selection");
            self.current_environment = None;
        }

        self.save()
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }
}
