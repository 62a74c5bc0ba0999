//! Main entry point for the bakery operations service.
//!
//! This binary wires the workflow engine onto a configured storage
//! backend and runs it next to the HTTP API server that the shop pages
//! talk to.

use bakery_config::Config;
use bakery_core::ShopEngine;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

// Import implementations from individual crates
use bakery_storage::implementations::file::create_storage as create_file_storage;
use bakery_storage::implementations::memory::create_storage as create_memory_storage;
use bakery_storage::StorageFactory;

/// Command-line arguments for the service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the engine with the configured storage backend
/// 5. Runs the engine, and the API server when enabled, until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started bakery service");

	// Load configuration
	let config = Config::from_file(args.config.to_str().unwrap()).await?;
	tracing::info!("Loaded configuration [{}]", config.shop.id);

	let engine = Arc::new(build_engine(config.clone())?);

	// Check if API server should be started
	let api_enabled = config.api.as_ref().is_some_and(|api| api.enabled);

	if api_enabled {
		let api_config = config.api.as_ref().unwrap().clone();
		let api_engine = Arc::clone(&engine);

		// Run the engine loop and the API server concurrently
		tokio::select! {
			result = engine.run() => {
				tracing::info!("Engine finished");
				result?;
			}
			result = server::start_server(api_config, api_engine) => {
				tracing::info!("API server finished");
				result?;
			}
		}
	} else {
		tracing::info!("Starting engine only");
		engine.run().await?;
	}

	tracing::info!("Stopped bakery service");
	Ok(())
}

/// Returns the factory map of available storage backends.
fn storage_factories() -> HashMap<String, StorageFactory> {
	let mut factories: HashMap<String, StorageFactory> = HashMap::new();
	factories.insert("memory".to_string(), create_memory_storage);
	factories.insert("file".to_string(), create_file_storage);
	factories
}

/// Builds the engine with the storage backend named in the configuration.
fn build_engine(config: Config) -> Result<ShopEngine, Box<dyn std::error::Error>> {
	let factories = storage_factories();
	let factory = factories.get(&config.storage.primary).ok_or_else(|| {
		format!(
			"Unknown storage backend '{}', available: {:?}",
			config.storage.primary,
			factories.keys().collect::<Vec<_>>()
		)
	})?;

	let backend_config = config
		.storage
		.implementations
		.get(&config.storage.primary)
		.cloned()
		.unwrap_or_else(|| toml::Value::Table(toml::map::Map::new()));

	let backend = factory(&backend_config)?;

	// Validate the configuration using the backend's schema
	backend
		.config_schema()
		.validate(&backend_config)
		.map_err(|e| {
			format!(
				"Invalid configuration for storage backend '{}': {}",
				config.storage.primary, e
			)
		})?;
	tracing::info!(component = "storage", implementation = %config.storage.primary, "Loaded");

	Ok(ShopEngine::new(config, backend))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_config(primary: &str) -> Config {
		format!(
			r#"
[shop]
id = "test-shop"

[storage]
primary = "{}"
[storage.implementations.memory]
[storage.implementations.file]
storage_path = "./data/test-storage"
"#,
			primary
		)
		.parse()
		.unwrap()
	}

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("config.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_build_engine_with_memory_backend() {
		let engine = build_engine(test_config("memory")).unwrap();
		assert_eq!(engine.config().shop.id, "test-shop");
	}

	#[test]
	fn test_build_engine_with_file_backend() {
		let engine = build_engine(test_config("file")).unwrap();
		assert_eq!(engine.config().storage.primary, "file");
	}

	#[test]
	fn test_storage_factories_creation() {
		let factories = storage_factories();

		assert_eq!(factories.len(), 2);
		assert!(factories.contains_key("memory"));
		assert!(factories.contains_key("file"));
	}
}
