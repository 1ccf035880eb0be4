//! Configuration Loader - File Loading and Validation
//!
//! Handles loading the TOML file, validating exchange and process
//! settings, and providing clear error messages for misconfiguration.
//! Batch parameters are validated by the planner.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Upper bound on transport retries.
const MAX_RETRIES_LIMIT: u32 = 10;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    path = %path.display(),
    base_url = %config.exchange.base_url,
    dry_run = config.bot.dry_run,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate exchange and process settings.
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.exchange.base_url.trim().is_empty(),
    "exchange.base_url must not be empty"
  );
  anyhow::ensure!(
    config.exchange.base_url.starts_with("http://")
      || config.exchange.base_url.starts_with("https://"),
    "exchange.base_url must be an http(s) URL, got {}",
    config.exchange.base_url
  );
  anyhow::ensure!(
    config.exchange.timeout_ms > 0,
    "exchange.timeout_ms must be positive"
  );
  anyhow::ensure!(
    config.exchange.max_retries <= MAX_RETRIES_LIMIT,
    "exchange.max_retries must be at most {}, got {}",
    MAX_RETRIES_LIMIT,
    config.exchange.max_retries
  );
  anyhow::ensure!(
    config.exchange.recv_window_ms > 0 && config.exchange.recv_window_ms <= 60_000,
    "exchange.recv_window_ms must be in (0, 60000], got {}",
    config.exchange.recv_window_ms
  );

  Ok(())
}
