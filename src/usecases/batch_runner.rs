//! Batch Runner - Plan then Submit
//!
//! The produced surface of the crate: takes fully populated batch
//! parameters, plans the whole batch, and only then submits it.

use std::sync::Arc;

use tracing::info;

use super::batch_planner::{BatchPlanner, PlanError};
use super::order_submitter::OrderSubmitter;
use crate::domain::batch::BatchParameters;
use crate::domain::report::BatchReport;
use crate::ports::exchange::ExchangeClient;
use crate::ports::random::RandomSource;

/// Plan a batch with `random` and submit it through `exchange`.
///
/// # Errors
/// Returns `PlanError` if planning fails; nothing is submitted in that case.
/// Per-order exchange failures are part of the returned report.
pub async fn place_batch<R, E>(
  params: &BatchParameters,
  random: R,
  exchange: Arc<E>,
) -> Result<BatchReport, PlanError>
where
  R: RandomSource,
  E: ExchangeClient + ?Sized,
{
  let plan = BatchPlanner::new(random).plan(params)?;

  let results = OrderSubmitter::new(exchange).submit_all(plan).await;
  let report = BatchReport::new(results);

  info!(
    placed = report.placed(),
    failed = report.failed(),
    requested_quantity = %report.requested_quantity(),
    placed_quantity = %report.placed_quantity(),
    "Batch complete"
  );

  Ok(report)
}
