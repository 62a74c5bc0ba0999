//! Configuration module for the bakery operations system.
//!
//! This module provides structures and utilities for managing the service
//! configuration. It supports loading configuration from TOML files with
//! environment-variable resolution and validates that all required values
//! are properly set before the engine is built.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this shop instance.
	pub shop: ShopConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for the baking task sync.
	#[serde(default)]
	pub tasks: TasksConfig,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to a shop instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShopConfig {
	/// Unique identifier for this shop instance.
	pub id: String,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the baking task sync.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TasksConfig {
	/// Interval in seconds between board syncs.
	#[serde(default = "default_sync_interval_seconds")]
	pub sync_interval_seconds: u64,
}

impl Default for TasksConfig {
	fn default() -> Self {
		Self {
			sync_interval_seconds: default_sync_interval_seconds(),
		}
	}
}

/// Returns the default task sync interval in seconds.
fn default_sync_interval_seconds() -> u64 {
	60
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
	/// Request timeout in seconds.
	#[serde(default = "default_api_timeout")]
	pub timeout_seconds: u64,
	/// Maximum request size in bytes.
	#[serde(default = "default_max_request_size")]
	pub max_request_size: usize,
}

/// Returns the default API host.
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
fn default_api_port() -> u16 {
	3000
}

/// Returns the default API timeout in seconds.
fn default_api_timeout() -> u64 {
	30
}

/// Returns the default maximum request size in bytes.
fn default_max_request_size() -> usize {
	1024 * 1024 // 1MB
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		raw.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.shop.id.is_empty() {
			return Err(ConfigError::Validation("Shop ID cannot be empty".into()));
		}

		// Validate storage config
		if self.storage.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one storage implementation must be configured".into(),
			));
		}
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Storage primary implementation cannot be empty".into(),
			));
		}
		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary storage '{}' not found in implementations",
				self.storage.primary
			)));
		}

		// Validate task sync interval
		if self.tasks.sync_interval_seconds == 0 {
			return Err(ConfigError::Validation(
				"Task sync_interval_seconds must be greater than 0".into(),
			));
		}
		if self.tasks.sync_interval_seconds > 3600 {
			return Err(ConfigError::Validation(
				"Task sync_interval_seconds cannot exceed 3600 (1 hour)".into(),
			));
		}

		// Validate API config if enabled
		if let Some(ref api) = self.api {
			if api.enabled && api.max_request_size == 0 {
				return Err(ConfigError::Validation(
					"API max_request_size must be greater than 0".into(),
				));
			}
		}

		Ok(())
	}
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// Environment variables are resolved and the configuration is automatically
/// validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BASE_CONFIG: &str = r#"
[shop]
id = "sweet-layers"

[storage]
primary = "memory"
[storage.implementations.memory]
"#;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("TEST_SHOP_HOST", "localhost");
		std::env::set_var("TEST_SHOP_PORT", "5432");

		let input = "host = \"${TEST_SHOP_HOST}:${TEST_SHOP_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "host = \"localhost:5432\"");

		std::env::remove_var("TEST_SHOP_HOST");
		std::env::remove_var("TEST_SHOP_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("MISSING_VAR"));
	}

	#[test]
	fn test_minimal_config_parses_with_defaults() {
		let config: Config = BASE_CONFIG.parse().unwrap();
		assert_eq!(config.shop.id, "sweet-layers");
		assert_eq!(config.tasks.sync_interval_seconds, 60);
		assert!(config.api.is_none());
	}

	#[test]
	fn test_config_with_env_vars() {
		std::env::set_var("TEST_SHOP_ID", "test-shop");

		let config_str = r#"
[shop]
id = "${TEST_SHOP_ID}"

[storage]
primary = "memory"
[storage.implementations.memory]
"#;

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.shop.id, "test-shop");

		std::env::remove_var("TEST_SHOP_ID");
	}

	#[test]
	fn test_unknown_primary_storage_rejected() {
		let config_str = r#"
[shop]
id = "sweet-layers"

[storage]
primary = "redis"
[storage.implementations.memory]
"#;

		let result = Config::from_str(config_str);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("Primary storage 'redis' not found"));
	}

	#[test]
	fn test_sync_interval_bounds() {
		let config_str = format!("{}\n[tasks]\nsync_interval_seconds = 0\n", BASE_CONFIG);
		assert!(Config::from_str(&config_str).is_err());

		let config_str = format!("{}\n[tasks]\nsync_interval_seconds = 7200\n", BASE_CONFIG);
		assert!(Config::from_str(&config_str).is_err());

		let config_str = format!("{}\n[tasks]\nsync_interval_seconds = 120\n", BASE_CONFIG);
		let config = Config::from_str(&config_str).unwrap();
		assert_eq!(config.tasks.sync_interval_seconds, 120);
	}

	#[test]
	fn test_api_defaults() {
		let config_str = format!("{}\n[api]\nenabled = true\n", BASE_CONFIG);
		let config = Config::from_str(&config_str).unwrap();

		let api = config.api.unwrap();
		assert!(api.enabled);
		assert_eq!(api.host, "127.0.0.1");
		assert_eq!(api.port, 3000);
		assert_eq!(api.timeout_seconds, 30);
		assert_eq!(api.max_request_size, 1024 * 1024);
	}
}
