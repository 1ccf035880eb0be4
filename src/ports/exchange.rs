//! Exchange Port - Limit Order Placement Interface
//!
//! The single capability the order submitter needs from an exchange:
//! place one limit order and learn its id, or learn why it was refused.
//!
//! Key design decisions:
//! - One order per call; exchanges offer no atomic multi-order primitive
//! - Rejections and transport failures share one error type so the
//!   submitter can record either as a per-order failure

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::batch::{OrderId, Side};

/// Rejection or transport failure for a single order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("exchange error {code}: {message}")]
pub struct ExchangeError {
  /// Exchange error code (negative for exchange-side rejections).
  pub code: i64,
  /// Human-readable reason.
  pub message: String,
}

impl ExchangeError {
  /// Code used when the request never got an exchange answer.
  pub const TRANSPORT: i64 = -1001;
  /// Code used when signing credentials are missing.
  pub const UNAUTHORIZED: i64 = -2015;
  /// Code used when an order fails the symbol's lot or price filters locally.
  pub const FILTER_FAILURE: i64 = -1013;

  pub fn new(code: i64, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
    }
  }

  /// Connectivity, timeout, or undecodable response.
  pub fn transport(message: impl Into<String>) -> Self {
    Self::new(Self::TRANSPORT, message)
  }
}

/// Trait for exchange order placement.
///
/// Implementors own authentication, transport and any symbol-specific
/// formatting. A timeout inside the implementation surfaces as an
/// `ExchangeError` for that one order.
#[async_trait]
pub trait ExchangeClient: Send + Sync + 'static {
  /// Place a single limit order.
  ///
  /// Returns the exchange-assigned order id. An implementation that can
  /// only confirm the order by its own client order id returns that
  /// instead, so ids in one batch may differ in format.
  ///
  /// # Errors
  /// Returns `ExchangeError` if the order is rejected or cannot be delivered.
  async fn place_limit_order(
    &self,
    symbol: &str,
    side: Side,
    price: Decimal,
    quantity: Decimal,
  ) -> Result<OrderId, ExchangeError>;
}
