use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::status::StatusMode;
use crate::types::DeviceId;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "sacdm.toml";

/// Application configuration, loaded from TOML with per-section defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub window: WindowConfig,
    pub api: ApiConfig,
    pub mqtt: MqttConfig,
    pub plot: PlotConfig,
    pub status: StatusConfig,
    pub device: DeviceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
}

/// Baseline backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,
}

/// Reading feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub broker: String,
    pub port: u16,
    pub client_id: String,
    pub topic: String,
    pub keep_alive: u16,
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub plot_height: f32,
    pub max_readings: usize,
    pub colors: PlotColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotColors {
    pub value: [u8; 3],
    pub mean: [u8; 3],
    pub upper_band: [u8; 3],
    pub lower_band: [u8; 3],
    pub text: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub mode: StatusMode,
    pub sigma: f64,
    pub window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// 0 starts with no device selected.
    pub initial_id: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            api: ApiConfig::default(),
            mqtt: MqttConfig::default(),
            plot: PlotConfig::default(),
            status: StatusConfig::default(),
            device: DeviceConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 560.0,
            title: "SAC-DM Device Monitor".to_string(),
            resizable: true,
            vsync: true,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            poll_interval_ms: 5000,
            timeout_secs: 10,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: "localhost".to_string(),
            port: 1883,
            client_id: "sacdm-viewer".to_string(),
            topic: "sacdm".to_string(),
            keep_alive: 5,
            channel_capacity: 5000,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_height: 300.0,
            max_readings: 120,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            value: [0, 143, 251],
            mean: [0, 227, 150],
            upper_band: [254, 176, 25],
            lower_band: [255, 69, 96],
            text: [224, 224, 224],
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            mode: StatusMode::Unknown,
            sigma: 3.0,
            window: 10,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { initial_id: 1 }
    }
}

impl ApiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DeviceConfig {
    pub fn initial_device(&self) -> Option<DeviceId> {
        DeviceId::new(self.initial_id)
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// Loads `path`, or writes the defaults there when it does not exist yet.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from_file(path);
        }

        let config = AppConfig::default();
        config.save_to_file(path)?;
        Ok(config)
    }

    /// Config file location: `SACDM_CONFIG` or [`DEFAULT_CONFIG_PATH`].
    pub fn config_path() -> PathBuf {
        env::var("SACDM_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Applies environment overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("SACDM_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(host) = env::var("MQTT_HOST") {
            self.mqtt.broker = host;
        }
        if let Some(port) = env::var("MQTT_PORT").ok().and_then(|p| p.parse().ok()) {
            self.mqtt.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.api.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError("Poll interval must be positive".to_string()));
        }

        if self.plot.max_readings == 0 {
            return Err(ConfigError::ValidationError("Reading window must hold at least one reading".to_string()));
        }

        if self.mqtt.channel_capacity == 0 {
            return Err(ConfigError::ValidationError("Reading channel capacity must be positive".to_string()));
        }

        if self.status.sigma <= 0.0 {
            return Err(ConfigError::ValidationError("Status sigma must be positive".to_string()));
        }

        if self.status.window == 0 {
            return Err(ConfigError::ValidationError("Status window must be positive".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.poll_interval(), Duration::from_millis(5000));
        assert_eq!(config.status.mode, StatusMode::Unknown);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [api]
            base_url = "http://10.0.0.5:8000"

            [status]
            mode = "placeholder_failure"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.api.poll_interval_ms, 5000);
        assert_eq!(config.status.mode, StatusMode::PlaceholderFailure);
        assert_eq!(config.mqtt.topic, "sacdm");
    }

    #[test]
    fn test_initial_device_zero_is_none() {
        let device = DeviceConfig { initial_id: 0 };
        assert!(device.initial_device().is_none());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let mut config = AppConfig::default();
        config.api.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_status() {
        let mut config = AppConfig::default();
        config.status.sigma = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.status.window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sacdm.toml");

        let created = AppConfig::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, created.api.base_url);
        assert_eq!(loaded.plot.max_readings, created.plot.max_readings);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "this is not valid { toml").unwrap();

        assert!(matches!(AppConfig::load_from_file(&path), Err(ConfigError::ParseError(_))));
    }
}
