//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the client
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{AttendanceError, AttendanceResult};

use super::types::{AttendanceConfig, ClientConfig, EndpointConfig, LocationConfig};

/// Loads and validates client configuration.
///
/// # File Format
///
/// ```text
/// schedule:
///   work_start: "08:00"
///   work_end: "17:00"
///   late_threshold_minutes: 15
/// endpoint:
///   url: "https://script.google.com/macros/s/<deployment>/exec"
///   timeout_secs: 30
/// location:
///   watch_interval_secs: 60
/// ```
///
/// Only `endpoint.url` is required.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::from_yaml_str(
///     "endpoint:\n  url: https://example.com/exec\n",
///     "inline",
/// )?;
/// assert_eq!(loader.schedule().late_threshold_minutes, 15);
/// # Ok::<(), attendance_engine::error::AttendanceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or a required field is missing
    /// - The schedule does not start before it ends
    pub fn load<P: AsRef<Path>>(path: P) -> AttendanceResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AttendanceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> AttendanceResult<Self> {
        let config: ClientConfig =
            serde_yaml::from_str(content).map_err(|e| AttendanceError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Wraps an already built configuration after validating it.
    pub fn from_config(config: ClientConfig) -> AttendanceResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn validate(config: &ClientConfig) -> AttendanceResult<()> {
        let schedule = &config.schedule;
        if schedule.work_start >= schedule.work_end {
            return Err(AttendanceError::InvalidConfig {
                message: format!(
                    "work_start ({}) must be before work_end ({})",
                    schedule.work_start.format("%H:%M"),
                    schedule.work_end.format("%H:%M")
                ),
            });
        }

        if config.endpoint.url.trim().is_empty() {
            return Err(AttendanceError::InvalidConfig {
                message: "endpoint.url must not be empty".to_string(),
            });
        }

        if config.endpoint.timeout_secs == 0 {
            return Err(AttendanceError::InvalidConfig {
                message: "endpoint.timeout_secs must be positive".to_string(),
            });
        }

        if config.location.watch_interval_secs == 0 {
            return Err(AttendanceError::InvalidConfig {
                message: "location.watch_interval_secs must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Replaces the endpoint URL, e.g. from a command-line override.
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> AttendanceResult<Self> {
        self.config.endpoint.url = url.into();
        Self::validate(&self.config)?;
        Ok(self)
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the working schedule.
    pub fn schedule(&self) -> &AttendanceConfig {
        &self.config.schedule
    }

    /// Returns the endpoint settings.
    pub fn endpoint(&self) -> &EndpointConfig {
        &self.config.endpoint
    }

    /// Returns the location tracking settings.
    pub fn location(&self) -> &LocationConfig {
        &self.config.location
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ClientConfig {
        self.config
    }
}
