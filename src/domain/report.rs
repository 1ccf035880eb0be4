//! Batch report.
//!
//! Summarises the ordered submission results of one batch: how many orders
//! landed, how much base quantity was requested versus placed, and a
//! per-order table preserving plan order.

use std::fmt;

use rust_decimal::Decimal;

use super::batch::{Outcome, SubmissionResult};

/// Summary over the full, ordered result list of a batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    results: Vec<SubmissionResult>,
}

impl BatchReport {
    pub fn new(results: Vec<SubmissionResult>) -> Self {
        Self { results }
    }

    /// Results in submission order.
    pub fn results(&self) -> &[SubmissionResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<SubmissionResult> {
        self.results
    }

    pub fn placed(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.placed()
    }

    /// Base quantity over every planned order.
    pub fn requested_quantity(&self) -> Decimal {
        self.results.iter().map(|r| r.order_spec.quantity).sum()
    }

    /// Base quantity over accepted orders only.
    pub fn placed_quantity(&self) -> Decimal {
        self.results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.order_spec.quantity)
            .sum()
    }

    pub fn requested_notional(&self) -> Decimal {
        self.results.iter().map(|r| r.order_spec.notional()).sum()
    }

    pub fn placed_notional(&self) -> Decimal {
        self.results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.order_spec.notional())
            .sum()
    }

    /// True when every planned order was accepted.
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(SubmissionResult::is_success)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4}  {:<4}  {:>16}  {:>20}  {:>14}  outcome",
            "#", "side", "price", "quantity", "notional"
        )?;
        for (index, result) in self.results.iter().enumerate() {
            let spec = &result.order_spec;
            let outcome = match &result.outcome {
                Outcome::Success(order_id) => format!("placed {order_id}"),
                Outcome::Failure(reason) => format!("FAILED {reason}"),
            };
            writeln!(
                f,
                "{:>4}  {:<4}  {:>16}  {:>20}  {:>14}  {}",
                index,
                spec.side,
                spec.price.round_dp(8).normalize(),
                spec.quantity.round_dp(8).normalize(),
                spec.notional().round_dp(4).normalize(),
                outcome
            )?;
        }
        write!(
            f,
            "placed {}/{} orders, base quantity {} of {} requested",
            self.placed(),
            self.results.len(),
            self.placed_quantity().round_dp(8).normalize(),
            self.requested_quantity().round_dp(8).normalize(),
        )
    }
}
