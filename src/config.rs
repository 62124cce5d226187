use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_label_id")]
    pub label_id: String,
    /// Size of the single thread-list page requested from the service
    #[serde(default = "default_list_max_results")]
    pub list_max_results: u32,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            label_id: default_label_id(),
            list_max_results: default_list_max_results(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TraversalDirection {
    /// Last listed summary first
    #[default]
    Descending,
    /// Listing order
    Ascending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Hard cap on the number of threads visited
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,
    #[serde(default)]
    pub direction: TraversalDirection,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_threads: default_max_threads(),
            direction: TraversalDirection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default = "default_buy_trigger")]
    pub buy_trigger: String,
    #[serde(default = "default_hold_trigger")]
    pub hold_trigger: String,
    /// Keep only threads whose snippet mentions a trigger
    #[serde(default)]
    pub filter_by_trigger: bool,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            buy_trigger: default_buy_trigger(),
            hold_trigger: default_hold_trigger(),
            filter_by_trigger: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Create or truncate the output file
    #[default]
    Overwrite,
    /// Create or append to the output file
    Append,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub mode: WriteMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            mode: WriteMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,
    #[serde(default = "default_token_cache")]
    pub token_cache: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials: default_credentials(),
            token_cache: default_token_cache(),
        }
    }
}

fn default_user_id() -> String {
    "me".to_string()
}

fn default_label_id() -> String {
    "Label_10".to_string()
}

fn default_list_max_results() -> u32 {
    1000
}

fn default_max_threads() -> usize {
    350
}

fn default_buy_trigger() -> String {
    "買進".to_string()
}

fn default_hold_trigger() -> String {
    "持有".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("mail.csv")
}

fn default_credentials() -> PathBuf {
    PathBuf::from("client_secret.json")
}

fn default_token_cache() -> PathBuf {
    PathBuf::from(".credentials/stock-mail-tracker.json")
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TrackerError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| TrackerError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                TrackerError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TrackerError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| TrackerError::ConfigError(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.mail.user_id.is_empty() {
            return Err(TrackerError::ConfigError(
                "mail.user_id cannot be empty".to_string(),
            ));
        }
        if self.mail.label_id.is_empty() {
            return Err(TrackerError::ConfigError(
                "mail.label_id cannot be empty".to_string(),
            ));
        }
        if self.mail.list_max_results == 0 {
            return Err(TrackerError::ConfigError(
                "mail.list_max_results must be at least 1".to_string(),
            ));
        }

        if self.traversal.max_threads == 0 {
            return Err(TrackerError::ConfigError(
                "traversal.max_threads must be at least 1".to_string(),
            ));
        }

        let buy = &self.classification.buy_trigger;
        let hold = &self.classification.hold_trigger;
        if buy.is_empty() || hold.is_empty() {
            return Err(TrackerError::ConfigError(
                "classification triggers cannot be empty".to_string(),
            ));
        }
        if buy == hold {
            return Err(TrackerError::ConfigError(format!(
                "classification.buy_trigger and classification.hold_trigger must differ (both '{}')",
                buy
            )));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(TrackerError::ConfigError(
                "output.path cannot be empty".to_string(),
            ));
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Create an example configuration file
    pub async fn create_example(path: &Path) -> Result<()> {
        let config = Self::default();
        config.save(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.mail.user_id, "me");
        assert_eq!(config.mail.label_id, "Label_10");
        assert_eq!(config.mail.list_max_results, 1000);

        assert_eq!(config.traversal.max_threads, 350);
        assert_eq!(config.traversal.direction, TraversalDirection::Descending);

        assert_eq!(config.classification.buy_trigger, "買進");
        assert_eq!(config.classification.hold_trigger, "持有");
        assert!(!config.classification.filter_by_trigger);

        assert_eq!(config.output.path, PathBuf::from("mail.csv"));
        assert_eq!(config.output.mode, WriteMode::Overwrite);

        assert_eq!(config.auth.credentials, PathBuf::from("client_secret.json"));
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_limits() {
        let mut config = Config::default();
        config.mail.list_max_results = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("list_max_results"));

        let mut config = Config::default();
        config.traversal.max_threads = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_threads"));
    }

    #[test]
    fn test_config_validation_triggers() {
        let mut config = Config::default();
        config.classification.hold_trigger = String::new();
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("triggers cannot be empty"));

        let mut config = Config::default();
        config.classification.hold_trigger = config.classification.buy_trigger.clone();
        assert!(config.validate().unwrap_err().to_string().contains("must differ"));
    }

    #[test]
    fn test_config_validation_empty_label() {
        let mut config = Config::default();
        config.mail.label_id = String::new();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_config_load_save_roundtrip() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = Config::default();
        config.traversal.direction = TraversalDirection::Ascending;
        config.output.mode = WriteMode::Append;
        config.save(path).await.unwrap();

        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.traversal.direction, TraversalDirection::Ascending);
        assert_eq!(loaded.output.mode, WriteMode::Append);
        assert_eq!(loaded.classification.buy_trigger, "買進");
        assert_eq!(loaded.mail.label_id, config.mail.label_id);
    }

    #[tokio::test]
    async fn test_config_load_nonexistent_returns_default() {
        let path = Path::new("/tmp/nonexistent-stock-mail-config-12345.toml");
        let config = Config::load(path).await.unwrap();
        assert_eq!(config.traversal.max_threads, 350);
    }

    #[tokio::test]
    async fn test_config_load_invalid_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        tokio::fs::write(temp_file.path(), "this is not valid toml {[}]")
            .await
            .unwrap();

        let result = Config::load(temp_file.path()).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn test_config_partial_with_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let partial_config = r#"
[mail]
label_id = "Label_42"

[traversal]
max_threads = 10
direction = "ascending"

[output]
mode = "append"
"#;
        tokio::fs::write(temp_file.path(), partial_config).await.unwrap();

        let config = Config::load(temp_file.path()).await.unwrap();

        assert_eq!(config.mail.label_id, "Label_42");
        assert_eq!(config.traversal.max_threads, 10);
        assert_eq!(config.traversal.direction, TraversalDirection::Ascending);
        assert_eq!(config.output.mode, WriteMode::Append);

        assert_eq!(config.mail.list_max_results, 1000);
        assert_eq!(config.output.path, PathBuf::from("mail.csv"));
        assert_eq!(config.classification.hold_trigger, "持有");
    }

    #[tokio::test]
    async fn test_config_create_example() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        Config::create_example(path).await.unwrap();
        assert!(path.exists());

        let config = Config::load(path).await.unwrap();
        assert_eq!(config.mail.list_max_results, 1000);
    }
}
