use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::live::SimulationConfig;
use crate::planner::PlanningConfig;
use crate::reports::report_log::DEFAULT_VISIBILITY_WINDOW_MS;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },
    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub planner: PlannerSettings,
    pub simulation: SimulationSettings,
    pub reports: ReportSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerSettings {
    pub average_speed_kmh: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        let defaults = PlanningConfig::default();
        Self {
            average_speed_kmh: defaults.average_speed_kmh,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub jitter_degrees: f64,
    pub seed: Option<u64>, // semilla fija para demos reproducibles
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            jitter_degrees: SimulationConfig::default().jitter_degrees,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSettings {
    pub visibility_window_ms: i64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            visibility_window_ms: DEFAULT_VISIBILITY_WINDOW_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga `.env`, luego el archivo TOML (opcional) y por último las variables de entorno
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();

        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file_or_default(Path::new(&path))?;
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rechaza valores que harían que las estimaciones no tengan sentido
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.planner.average_speed_kmh;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(invalid_setting(
                "planner.average_speed_kmh",
                format!("must be a positive number, got {}", speed),
            ));
        }

        let jitter = self.simulation.jitter_degrees;
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(invalid_setting(
                "simulation.jitter_degrees",
                format!("must be zero or positive, got {}", jitter),
            ));
        }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
        if let Some(seed) = lookup("SIMULATION_SEED") {
            self.simulation.seed = Some(parse_env("SIMULATION_SEED", &seed)?);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }

    pub fn planning(&self) -> PlanningConfig {
        PlanningConfig {
            average_speed_kmh: self.planner.average_speed_kmh,
        }
    }

    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig {
            jitter_degrees: self.simulation.jitter_degrees,
        }
    }
}

fn invalid_setting(key: &str, reason: String) -> ConfigError {
    ConfigError::InvalidSetting {
        key: key.to_string(),
        reason,
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.planner.average_speed_kmh, 30.0);
        assert_eq!(config.simulation.jitter_degrees, 0.0005);
        assert_eq!(config.reports.visibility_window_ms, 3_600_000);
        assert!(config.server.workers >= 1);
    }

    #[test]
    fn test_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nport = 9090\n\n[planner]\naverage_speed_kmh = 25.0\n",
        )
        .unwrap();

        let config = AppConfig::from_file_or_default(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.planning().average_speed_kmh, 25.0);
        assert_eq!(config.data.dir, PathBuf::from("data"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(
            AppConfig::from_file_or_default(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_non_positive_speed_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for speed in ["0.0", "-30.0", "nan", "inf"] {
            fs::write(&path, format!("[planner]\naverage_speed_kmh = {}\n", speed)).unwrap();
            match AppConfig::from_file_or_default(&path) {
                Err(ConfigError::InvalidSetting { key, .. }) => {
                    assert_eq!(key, "planner.average_speed_kmh")
                }
                other => panic!("expected InvalidSetting for {}, got {:?}", speed, other),
            }
        }
    }

    #[test]
    fn test_negative_jitter_is_rejected() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.simulation.jitter_degrees = -0.001;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { ref key, .. }) if key == "simulation.jitter_degrees"
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("DATA_DIR", "/srv/transit"),
            ("SIMULATION_SEED", "42"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 3000));
        assert_eq!(config.data.dir, PathBuf::from("/srv/transit"));
        assert_eq!(config.simulation.seed, Some(42));
    }

    #[test]
    fn test_invalid_port() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidEnv { ref key, .. }) if key == "PORT"));
    }
}
