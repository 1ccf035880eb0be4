//! Random Source Port - Injected Uniform Sampling
//!
//! The batch planner draws every price and notional through this trait
//! so tests can substitute a fixed sequence for a real generator.

use rust_decimal::Decimal;
use thiserror::Error;

/// The source could not produce a value. Fatal to planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("random source failed: {0}")]
pub struct RandomSourceError(pub String);

/// Uniform sampler over closed decimal intervals.
pub trait RandomSource {
  /// Draw a value uniformly from `[low, high]`.
  ///
  /// `low == high` returns `low` without consuming randomness.
  ///
  /// # Errors
  /// Returns `RandomSourceError` if no value can be produced.
  fn uniform(&mut self, low: Decimal, high: Decimal) -> Result<Decimal, RandomSourceError>;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
  fn uniform(&mut self, low: Decimal, high: Decimal) -> Result<Decimal, RandomSourceError> {
    (**self).uniform(low, high)
  }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
  fn uniform(&mut self, low: Decimal, high: Decimal) -> Result<Decimal, RandomSourceError> {
    (**self).uniform(low, high)
  }
}
