//! Order Scatter - Entry Point
//!
//! Places one batch of randomized limit orders and prints the report.
//!
//! Wiring sequence:
//! 1. Parse flags, load optional config.toml + validate
//! 2. Init tracing (stderr; JSON if configured)
//! 3. Merge flags over the `[batch]` defaults and validate the batch
//! 4. Pick the exchange: dry run, or Binance with env credentials
//! 5. Plan the whole batch, then submit it order by order
//! 6. Print the per-order report; exit non-zero if any order failed

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn};

use order_scatter::adapters::binance::{BinanceAuth, BinanceClient, BinanceClientConfig, BinanceExchange};
use order_scatter::adapters::{DryRunExchange, RngSource};
use order_scatter::config::{self, AppConfig, BotConfig};
use order_scatter::domain::batch::{BatchParameters, Side};
use order_scatter::ports::exchange::ExchangeClient;
use order_scatter::usecases::place_batch;

/// Place a batch of randomized limit orders across a price range
#[derive(Parser, Debug)]
#[command(name = "order-scatter")]
#[command(version)]
struct Args {
    /// Market pair
    #[arg(long, env = "SCATTER_SYMBOL")]
    symbol: Option<String>,

    /// Quote-currency volume per order (e.g. USDT)
    #[arg(long)]
    volume: Option<Decimal>,

    /// Quote-currency range within which each order's volume is randomly
    /// moved up or down
    #[arg(long, visible_alias = "amountDif")]
    amount_dif: Option<Decimal>,

    /// Number of orders
    #[arg(long)]
    number: Option<usize>,

    /// SELL or BUY
    #[arg(long)]
    side: Option<Side>,

    /// One end of the price range
    #[arg(long, visible_alias = "priceMin", allow_negative_numbers = true)]
    price_min: Option<Decimal>,

    /// Other end of the price range
    #[arg(long, visible_alias = "priceMax", allow_negative_numbers = true)]
    price_max: Option<Decimal>,

    /// TOML config file
    #[arg(long, env = "SCATTER_CONFIG")]
    config: Option<PathBuf>,

    /// Plan and log orders without sending them
    #[arg(long)]
    dry_run: bool,

    /// Seed for a reproducible plan
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Overlay the flags that were given on top of `defaults`.
    fn batch_parameters(&self, defaults: BatchParameters) -> BatchParameters {
        BatchParameters {
            symbol: self.symbol.clone().unwrap_or(defaults.symbol),
            side: self.side.unwrap_or(defaults.side),
            target_volume: self.volume.unwrap_or(defaults.target_volume),
            volume_jitter: self.amount_dif.unwrap_or(defaults.volume_jitter),
            order_count: self.number.unwrap_or(defaults.order_count),
            price_min: self.price_min.unwrap_or(defaults.price_min),
            price_max: self.price_max.unwrap_or(defaults.price_max),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // ── 1. Configuration ────────────────────────────────────
    let config = match &args.config {
        Some(path) => config::loader::load_config(path).context("Failed to load configuration")?,
        None => AppConfig::default(),
    };

    // ── 2. Logging ──────────────────────────────────────────
    init_tracing(&config.bot);

    // ── 3. Batch parameters ─────────────────────────────────
    let params = args.batch_parameters(config.batch.clone());
    params.validate().context("Invalid batch parameters")?;
    let dry_run = args.dry_run || config.bot.dry_run;

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        dry_run,
        symbol = %params.symbol,
        side = %params.side,
        target_volume = %params.target_volume,
        volume_jitter = %params.volume_jitter,
        orders = params.order_count,
        price_min = %params.price_min,
        price_max = %params.price_max,
        "Starting order scatter"
    );

    // ── 4. Exchange ─────────────────────────────────────────
    let exchange: Arc<dyn ExchangeClient> = if dry_run {
        warn!("Dry-run mode - orders are planned but NOT sent");
        Arc::new(DryRunExchange::new())
    } else {
        let auth = Arc::new(
            BinanceAuth::from_env().context("Failed to load Binance credentials from env")?,
        );
        let client = Arc::new(
            BinanceClient::new(Some(auth), BinanceClientConfig::from(&config.exchange))
                .context("Failed to create Binance client")?,
        );
        let exchange = BinanceExchange::new(client).with_price_band(params.price_bounds());
        log_market_context(&exchange, &params).await;
        Arc::new(exchange)
    };

    // ── 5. Plan + submit ────────────────────────────────────
    let random = args
        .seed
        .map_or_else(RngSource::from_os_rng, RngSource::seeded);
    let report = place_batch(&params, random, exchange)
        .await
        .context("Failed to plan batch")?;

    // ── 6. Report ───────────────────────────────────────────
    println!("{report}");

    Ok(if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Structured logging to stderr; stdout carries the report.
fn init_tracing(bot: &BotConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&bot.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if bot.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Log where the price range sits relative to the market average.
async fn log_market_context(exchange: &BinanceExchange, params: &BatchParameters) {
    match exchange.average_price(&params.symbol).await {
        Ok(avg) if !avg.is_zero() => {
            let (low, high) = params.price_bounds();
            let mid = (low + high) / Decimal::TWO;
            let offset_pct = ((mid - avg) / avg * Decimal::ONE_HUNDRED).round_dp(3);
            info!(
                symbol = %params.symbol,
                average_price = %avg,
                range_mid = %mid,
                offset_pct = %offset_pct,
                "Market average price"
            );
        }
        Ok(_) => warn!(symbol = %params.symbol, "Exchange reported a zero average price"),
        Err(e) => warn!(symbol = %params.symbol, error = %e, "Failed to fetch average price"),
    }
}
