use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches one configuration value.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn source(&self) -> String {
        self.config_content_provider.describe()
    }

    /// Returns the cached configuration, reading it on first use. A missing
    /// source yields `TConfig::default()` without caching it.
    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.config.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.read_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.write_content(&serialized)?;

        let mut current = self.config.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        port: u16,
        name: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                port: 5050,
                name: "starter".to_string(),
            }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.port == 0 {
                return Err("port must not be 0".to_string());
            }
            Ok(())
        }
    }

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let manager: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(get_temp_file_path());
        assert_eq!(manager.get_config().unwrap(), TestConfig::default());
    }

    #[test]
    fn test_partial_file_is_filled_with_defaults() {
        let path = get_temp_file_path();
        std::fs::write(&path, "port: 8080\n").unwrap();

        let manager: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(&path);
        let config = manager.get_config().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.name, "starter");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "port: 0\n").unwrap();

        let manager: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(&path);
        assert!(matches!(manager.get_config(), Err(ConfigError::Invalid(_))));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "port: [not, a, number]\n").unwrap();

        let manager: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(&path);
        assert!(matches!(manager.get_config(), Err(ConfigError::Deserialize(_))));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_set_config_writes_file_and_updates_cache() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(&path);

        let config = TestConfig {
            port: 9000,
            name: "custom".to_string(),
        };
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded: ConfigManager<_, TestConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(reloaded.get_config().unwrap(), config);

        let _ = std::fs::remove_file(path);
    }
}
