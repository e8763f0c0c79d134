//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `armplug.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use chrono::Weekday;
use serde::Deserialize;

use armplug_domain::config::ControllerConfig;
use armplug_domain::error::{ArmPlugError, ValidationError};
use armplug_domain::id::{BooleanId, ButtonId, SwitchId};
use armplug_domain::schedule::Timespec;
use armplug_domain::time_window::{HappyHours, WindowPolicy};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Event feed settings.
    pub events: EventsConfig,
    /// Trigger entities, schedule and tariff windows.
    pub controller: ControllerSection,
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

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// In-process event feed configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Events buffered before publishers wait on the controller.
    pub capacity: usize,
}

/// Controller settings, as written in the file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerSection {
    pub button_id: u32,
    pub button_name: String,
    pub trigger_id: u32,
    pub trigger_name: String,
    pub switch_id: u32,
    /// Six-field cron expression of the fire job.
    pub timespec: String,
    /// Provenance tag marking the controller's own job.
    pub origin: String,
    pub toggle_event: String,
    pub fire_event: String,
    /// Days on which a toggle powers on immediately, e.g. `["Sat", "Sun"]`.
    pub weekend_days: Vec<Weekday>,
    /// First hour of the low-tariff window (inclusive).
    pub happy_hour_start: u32,
    /// Last hour of the low-tariff window (inclusive).
    pub happy_hour_end: u32,
}

impl Config {
    /// Load configuration from `armplug.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("armplug.toml")?;
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
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ARMPLUG_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("ARMPLUG_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("ARMPLUG_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("ARMPLUG_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "event capacity must be non-zero".to_string(),
            ));
        }
        self.controller_config().map(drop)
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the validated controller configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Controller`] when an hour is out of range, the
    /// timespec does not parse, a name or the origin is empty, or the toggle
    /// and fire events are the same.
    pub fn controller_config(&self) -> Result<ControllerConfig, ConfigError> {
        let section = &self.controller;
        let window = WindowPolicy::new(
            section.weekend_days.clone(),
            HappyHours::new(section.happy_hour_start, section.happy_hour_end)?,
        );
        ControllerConfig::builder()
            .button(ButtonId::new(section.button_id), section.button_name.trim())
            .trigger(BooleanId::new(section.trigger_id), section.trigger_name.trim())
            .switch(SwitchId::new(section.switch_id))
            .timespec(Timespec::parse(&section.timespec)?)
            .origin(section.origin.trim())
            .events(section.toggle_event.trim(), section.fire_event.trim())
            .window(window)
            .build()
            .map_err(ConfigError::from)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "armplugd=info,armplug_app=info,armplug_adapter_virtual=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

impl Default for ControllerSection {
    fn default() -> Self {
        let defaults = ControllerConfig::default();
        let happy_hours = defaults.window.happy_hours();
        Self {
            button_id: defaults.button_id.get(),
            button_name: defaults.button_name,
            trigger_id: defaults.trigger_id.get(),
            trigger_name: defaults.trigger_name,
            switch_id: defaults.switch_id.get(),
            timespec: defaults.timespec.to_string(),
            origin: defaults.origin,
            toggle_event: defaults.toggle_event,
            fire_event: defaults.fire_event,
            weekend_days: defaults.window.weekend_days().to_vec(),
            happy_hour_start: happy_hours.start_hour(),
            happy_hour_end: happy_hours.end_hour(),
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
    /// Invalid controller settings.
    #[error("invalid controller configuration: {0}")]
    Controller(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl From<ArmPlugError> for ConfigError {
    fn from(err: ArmPlugError) -> Self {
        match err {
            ArmPlugError::Validation(err) => Self::Controller(err),
            other => Self::Validation(other.to_string()),
        }
    }
}
