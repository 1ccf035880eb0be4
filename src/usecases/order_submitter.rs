//! Order Submitter - Sequential Batch Submission
//!
//! Submits a planned batch one order at a time, in plan order:
//! - awaits each placement before issuing the next
//! - records a failure and moves on when an order is rejected
//! - never retries; a failed submission is terminal for that order

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::batch::{OrderSpec, Outcome, SubmissionResult};
use crate::ports::exchange::ExchangeClient;

/// Places every order of a plan through the exchange port.
pub struct OrderSubmitter<E: ExchangeClient + ?Sized> {
  /// Exchange port.
  exchange: Arc<E>,
}

impl<E: ExchangeClient + ?Sized> OrderSubmitter<E> {
  pub fn new(exchange: Arc<E>) -> Self {
    Self { exchange }
  }

  /// Submit one order and capture its outcome.
  async fn submit_one(&self, index: usize, spec: OrderSpec) -> SubmissionResult {
    let placement = self
      .exchange
      .place_limit_order(&spec.symbol, spec.side, spec.price, spec.quantity)
      .await;

    let outcome = match placement {
      Ok(order_id) => {
        info!(
          index,
          order_id = %order_id,
          price = %spec.price,
          quantity = %spec.quantity,
          "Order placed"
        );
        Outcome::Success(order_id)
      }
      Err(e) => {
        warn!(
          index,
          code = e.code,
          error = %e.message,
          price = %spec.price,
          quantity = %spec.quantity,
          "Order failed, continuing with batch"
        );
        Outcome::Failure(e.message)
      }
    };

    SubmissionResult {
      order_spec: spec,
      outcome,
    }
  }

  /// Submit the whole plan.
  ///
  /// Returns one result per order spec, in the same order.
  #[instrument(skip_all, fields(orders = plan.len()))]
  pub async fn submit_all(&self, plan: Vec<OrderSpec>) -> Vec<SubmissionResult> {
    let mut results = Vec::with_capacity(plan.len());

    for (index, spec) in plan.into_iter().enumerate() {
      results.push(self.submit_one(index, spec).await);
    }

    let placed = results.iter().filter(|r| r.is_success()).count();
    info!(
      placed,
      failed = results.len() - placed,
      "Batch submission finished"
    );

    results
  }
}
