//! Dry-run Exchange
//!
//! Accepts every order without touching the network and hands back
//! synthetic ids. Used with `--dry-run` to inspect a plan.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::batch::{OrderId, Side};
use crate::ports::exchange::{ExchangeClient, ExchangeError};

/// `ExchangeClient` that places nothing.
#[derive(Debug, Default)]
pub struct DryRunExchange {
    next_id: AtomicU64,
}

impl DryRunExchange {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExchangeClient for DryRunExchange {
    async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        info!(
            symbol,
            side = %side,
            price = %price,
            quantity = %quantity,
            "Dry run: order not sent"
        );
        Ok(format!("dry-{id}"))
    }
}
