//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `classroom.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use classroom_adapter_virtual::SimulatorConfig;
use classroom_app::monitor::MonitorConfig;
use classroom_domain::mode::Mode;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Monitor loop timing and start-up mode.
    pub monitor: MonitorSection,
    /// Sensor simulator tuning.
    pub simulator: SimulatorSection,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Monitor loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Seconds between two successful ticks.
    pub tick_interval_secs: u64,
    /// Seconds to wait after a failed tick.
    pub retry_delay_secs: u64,
    /// Mode the classroom starts in.
    pub initial_mode: Mode,
}

/// Simulator configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulatorSection {
    /// Chance that a sample reports someone in the room.
    pub occupancy_probability: f64,
}

impl Config {
    /// Load configuration from `classroom.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("classroom.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CLASSROOM_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("CLASSROOM_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("CLASSROOM_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("CLASSROOM_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("CLASSROOM_TICK_SECS") {
            if let Ok(secs) = val.parse() {
                self.monitor.tick_interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("CLASSROOM_MODE") {
            if let Ok(mode) = val.parse() {
                self.monitor.initial_mode = mode;
            }
        }
        if let Ok(val) = std::env::var("CLASSROOM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.monitor.tick_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "tick interval must be at least one second".to_string(),
            ));
        }
        let p = self.simulator.occupancy_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Validation(format!(
                "occupancy probability must be within 0..=1, got {p}"
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Directory that must exist before the database file can be created.
    ///
    /// `None` for in-memory databases and for files in the working directory.
    #[must_use]
    pub fn database_dir(&self) -> Option<PathBuf> {
        let url = self.database.url.as_str();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        PathBuf::from(path)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(PathBuf::from)
    }

    /// Timing for the monitor loop.
    #[must_use]
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            tick_interval: Duration::from_secs(self.monitor.tick_interval_secs),
            retry_delay: Duration::from_secs(self.monitor.retry_delay_secs),
        }
    }

    /// Settings for the sensor simulator.
    #[must_use]
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            occupancy_probability: self.simulator.occupancy_probability,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/sensor_data.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "classroomd=info,classroom=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for MonitorSection {
    fn default() -> Self {
        let defaults = MonitorConfig::default();
        Self {
            tick_interval_secs: defaults.tick_interval.as_secs(),
            retry_delay_secs: defaults.retry_delay.as_secs(),
            initial_mode: Mode::Auto,
        }
    }
}

impl Default for SimulatorSection {
    fn default() -> Self {
        Self {
            occupancy_probability: SimulatorConfig::default().occupancy_probability,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
