//! Configuration Module - TOML-based Placer Configuration
//!
//! Loads and validates configuration from a TOML file. Every section is
//! optional and falls back to defaults; API credentials never live here
//! (see `BinanceAuth::from_env`).

pub mod loader;

use serde::Deserialize;

use crate::domain::batch::BatchParameters;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Process-level settings.
  pub bot: BotConfig,
  /// Exchange endpoint and transport settings.
  pub exchange: ExchangeConfig,
  /// Default batch; command-line flags override individual fields.
  pub batch: BatchParameters,
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
  /// Human-readable name, logged at startup.
  pub name: String,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  pub log_level: String,
  /// Plan and log, but send nothing to the exchange.
  pub dry_run: bool,
  /// Emit JSON log lines instead of human-readable ones.
  pub json_logs: bool,
}

impl Default for BotConfig {
  fn default() -> Self {
    Self {
      name: "order-scatter".to_string(),
      log_level: default_log_level(),
      dry_run: false,
      json_logs: false,
    }
  }
}

/// Exchange REST settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
  /// REST base URL. Defaults to the spot testnet.
  pub base_url: String,
  /// Request timeout in milliseconds.
  pub timeout_ms: u64,
  /// Retries on 429/5xx/transport failures.
  pub max_retries: u32,
  /// First retry delay; doubles per attempt.
  pub retry_base_delay_ms: u64,
  /// `recvWindow` for signed requests.
  pub recv_window_ms: u64,
}

impl Default for ExchangeConfig {
  fn default() -> Self {
    Self {
      base_url: "https://testnet.binance.vision".to_string(),
      timeout_ms: 10_000,
      max_retries: 3,
      retry_base_delay_ms: 200,
      recv_window_ms: 5_000,
    }
  }
}

fn default_log_level() -> String {
  "info".to_string()
}
