//! Core batch domain types.
//!
//! Defines the parameters of a randomized order batch, the order specs a
//! batch expands into, and the per-order submission outcome.
//! These types are the inner ring: no I/O, no randomness.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exchange-assigned order identifier.
pub type OrderId = String;

/// Smallest notional the planner will ever sample.
///
/// Keeps quantity strictly positive when the jitter is larger than the
/// target volume.
pub const NOTIONAL_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 8);

/// Largest batch accepted in one run.
pub const MAX_ORDER_COUNT: usize = 10_000;

// ────────────────────────────────────────────
// Side
// ────────────────────────────────────────────

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Sell,
    Buy,
}

impl Side {
    /// Wire representation (`"SELL"` / `"BUY"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sell => "SELL",
            Self::Buy => "BUY",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a side string is neither `SELL` nor `BUY`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown side `{0}`, expected SELL or BUY")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SELL" => Ok(Self::Sell),
            "BUY" => Ok(Self::Buy),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

// ────────────────────────────────────────────
// Batch parameters
// ────────────────────────────────────────────

/// Fatal misconfiguration detected before any order is planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("symbol must not be empty")]
    EmptySymbol,
    #[error("order count must be at least 1")]
    ZeroOrderCount,
    #[error("order count {0} exceeds the maximum of {max}", max = MAX_ORDER_COUNT)]
    TooManyOrders(usize),
    #[error("target volume must be positive, got {0}")]
    NonPositiveTargetVolume(Decimal),
    #[error("volume jitter must not be negative, got {0}")]
    NegativeJitter(Decimal),
    #[error("target volume {0} plus jitter {1} is out of decimal range")]
    VolumeOverflow(Decimal, Decimal),
    #[error("price interval is [0, 0], quantity cannot be derived")]
    ZeroPriceInterval,
    #[error("price bounds must be positive, got lower bound {0}")]
    NonPositivePrice(Decimal),
}

/// Input of one randomized batch.
///
/// `price_min` and `price_max` may be given in either order; the planner
/// samples from the interval between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParameters {
    /// Market pair, e.g. `ETHUSDT`.
    pub symbol: String,
    /// Sell or buy.
    pub side: Side,
    /// Quote-currency notional per order.
    pub target_volume: Decimal,
    /// Maximum deviation from `target_volume`, in quote currency.
    pub volume_jitter: Decimal,
    /// Number of orders in the batch.
    pub order_count: usize,
    /// One end of the price interval.
    pub price_min: Decimal,
    /// Other end of the price interval.
    pub price_max: Decimal,
}

impl Default for BatchParameters {
    /// 2 × 100 USDT sells of ETH around 1908.
    fn default() -> Self {
        Self {
            symbol: "ETHUSDT".to_string(),
            side: Side::Sell,
            target_volume: Decimal::ONE_HUNDRED,
            volume_jitter: Decimal::ONE,
            order_count: 2,
            price_min: Decimal::from(1903),
            price_max: Decimal::from(1913),
        }
    }
}

impl BatchParameters {
    /// Check every rule a plan depends on.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigurationError::EmptySymbol);
        }
        if self.order_count < 1 {
            return Err(ConfigurationError::ZeroOrderCount);
        }
        if self.order_count > MAX_ORDER_COUNT {
            return Err(ConfigurationError::TooManyOrders(self.order_count));
        }
        if self.target_volume <= Decimal::ZERO {
            return Err(ConfigurationError::NonPositiveTargetVolume(
                self.target_volume,
            ));
        }
        if self.volume_jitter < Decimal::ZERO {
            return Err(ConfigurationError::NegativeJitter(self.volume_jitter));
        }
        if self.target_volume.checked_add(self.volume_jitter).is_none() {
            return Err(ConfigurationError::VolumeOverflow(
                self.target_volume,
                self.volume_jitter,
            ));
        }

        let (low, high) = self.price_bounds();
        if low.is_zero() && high.is_zero() {
            return Err(ConfigurationError::ZeroPriceInterval);
        }
        if low <= Decimal::ZERO {
            return Err(ConfigurationError::NonPositivePrice(low));
        }
        Ok(())
    }

    /// Normalized price interval `(low, high)`.
    pub fn price_bounds(&self) -> (Decimal, Decimal) {
        (
            self.price_min.min(self.price_max),
            self.price_min.max(self.price_max),
        )
    }

    /// Notional interval `(low, high)` with the lower end clamped to
    /// [`NOTIONAL_EPSILON`]. Saturates at the decimal range; `validate`
    /// rejects parameters that would need it.
    pub fn notional_bounds(&self) -> (Decimal, Decimal) {
        let high = self.target_volume.saturating_add(self.volume_jitter);
        let low = self
            .target_volume
            .saturating_sub(self.volume_jitter)
            .max(NOTIONAL_EPSILON)
            .min(high);
        (low, high)
    }
}

// ────────────────────────────────────────────
// Planned orders and outcomes
// ────────────────────────────────────────────

/// One concrete limit order of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub symbol: String,
    pub side: Side,
    /// Limit price in quote currency.
    pub price: Decimal,
    /// Base-asset quantity.
    pub quantity: Decimal,
}

impl OrderSpec {
    /// Quote-currency value of the order (price × quantity).
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// Terminal state of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Accepted by the exchange under the given id.
    Success(OrderId),
    /// Rejected or not delivered.
    Failure(String),
}

/// An order spec paired with what happened when it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub order_spec: OrderSpec,
    pub outcome: Outcome,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }
}
