//! Batch Planner - Randomized Order Generation
//!
//! Expands `BatchParameters` into exactly `order_count` order specs:
//! - price drawn uniformly from the normalized price interval
//! - notional drawn uniformly from target ± jitter (lower end clamped)
//! - quantity = notional / price
//!
//! Either a complete plan is returned or nothing is; a failed draw
//! aborts the whole batch before any order is submitted.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::batch::{BatchParameters, ConfigurationError, OrderSpec};
use crate::ports::random::{RandomSource, RandomSourceError};

/// Why a plan could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
  #[error("invalid batch configuration: {0}")]
  Configuration(#[from] ConfigurationError),
  #[error(transparent)]
  RandomSource(#[from] RandomSourceError),
  #[error("quantity overflow for notional {notional} at price {price}")]
  QuantityOverflow { notional: Decimal, price: Decimal },
}

/// Turns batch parameters into a concrete list of limit orders.
pub struct BatchPlanner<R: RandomSource> {
  /// Injected sampler.
  random: R,
}

impl<R: RandomSource> BatchPlanner<R> {
  pub fn new(random: R) -> Self {
    Self { random }
  }

  /// Plan one batch.
  ///
  /// Draws are independent: each order gets its own price and notional.
  ///
  /// # Errors
  /// Returns `PlanError::Configuration` for invalid parameters and
  /// `PlanError::RandomSource` if the sampler fails. No partial plan is
  /// ever returned.
  #[instrument(skip(self, params), fields(symbol = %params.symbol, side = %params.side, count = params.order_count))]
  pub fn plan(&mut self, params: &BatchParameters) -> Result<Vec<OrderSpec>, PlanError> {
    params.validate()?;

    let (price_low, price_high) = params.price_bounds();
    let (notional_low, notional_high) = params.notional_bounds();

    let mut plan = Vec::new();
    for index in 0..params.order_count {
      let price = self.random.uniform(price_low, price_high)?;
      let notional = self.random.uniform(notional_low, notional_high)?;

      let quantity = notional
        .checked_div(price)
        .ok_or(PlanError::QuantityOverflow { notional, price })?;

      debug!(
        index,
        price = %price,
        notional = %notional,
        quantity = %quantity,
        "Order planned"
      );

      plan.push(OrderSpec {
        symbol: params.symbol.clone(),
        side: params.side,
        price,
        quantity,
      });
    }

    info!(
      orders = plan.len(),
      price_low = %price_low,
      price_high = %price_high,
      notional_low = %notional_low,
      notional_high = %notional_high,
      "Batch planned"
    );

    Ok(plan)
  }

  /// Give back the sampler.
  pub fn into_inner(self) -> R {
    self.random
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::batch::Side;
  use rust_decimal_macros::dec;

  /// Returns `low + fraction × (high − low)` for each fraction in turn.
  struct Fractions {
    fractions: Vec<Decimal>,
    next: usize,
  }

  impl Fractions {
    fn new(fractions: Vec<Decimal>) -> Self {
      Self { fractions, next: 0 }
    }
  }

  impl RandomSource for Fractions {
    fn uniform(&mut self, low: Decimal, high: Decimal) -> Result<Decimal, RandomSourceError> {
      let fraction = self
        .fractions
        .get(self.next)
        .copied()
        .ok_or_else(|| RandomSourceError("sequence exhausted".to_string()))?;
      self.next += 1;
      Ok(low + (high - low) * fraction)
    }
  }

  fn params() -> BatchParameters {
    BatchParameters {
      symbol: "ETHUSDT".to_string(),
      side: Side::Sell,
      target_volume: dec!(100),
      volume_jitter: dec!(1),
      order_count: 2,
      price_min: dec!(1913),
      price_max: dec!(1903),
    }
  }

  #[test]
  fn test_plan_uses_draws_in_order() {
    // price, notional, price, notional
    let source = Fractions::new(vec![dec!(0), dec!(1), dec!(1), dec!(0)]);
    let mut planner = BatchPlanner::new(source);

    let plan = planner.plan(&params()).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].price, dec!(1903));
    assert_eq!(plan[0].quantity, dec!(101) / dec!(1903));
    assert_eq!(plan[1].price, dec!(1913));
    assert_eq!(plan[1].quantity, dec!(99) / dec!(1913));
    assert!(plan.iter().all(|o| o.side == Side::Sell && o.symbol == "ETHUSDT"));
  }

  #[test]
  fn test_single_order_fixed_price_no_jitter() {
    let p = BatchParameters {
      order_count: 1,
      price_min: dec!(2000),
      price_max: dec!(2000),
      target_volume: dec!(50),
      volume_jitter: Decimal::ZERO,
      ..params()
    };
    let mut planner = BatchPlanner::new(Fractions::new(vec![dec!(0.3), dec!(0.7)]));

    let plan = planner.plan(&p).unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].price, dec!(2000));
    assert_eq!(plan[0].quantity, dec!(0.025));
  }

  #[test]
  fn test_random_failure_aborts_whole_plan() {
    // Enough draws for the first order only.
    let mut planner = BatchPlanner::new(Fractions::new(vec![dec!(0.5), dec!(0.5)]));

    let err = planner.plan(&params()).unwrap_err();

    assert!(matches!(err, PlanError::RandomSource(_)));
  }

  #[test]
  fn test_invalid_parameters_draw_nothing() {
    let p = BatchParameters {
      order_count: 0,
      ..params()
    };
    let mut planner = BatchPlanner::new(Fractions::new(vec![]));

    let err = planner.plan(&p).unwrap_err();

    assert_eq!(err, PlanError::Configuration(ConfigurationError::ZeroOrderCount));
    assert_eq!(planner.into_inner().next, 0);
  }

  #[test]
  fn test_zero_price_interval_is_configuration_error() {
    let p = BatchParameters {
      price_min: Decimal::ZERO,
      price_max: Decimal::ZERO,
      ..params()
    };
    let mut planner = BatchPlanner::new(Fractions::new(vec![dec!(0.5); 4]));

    assert_eq!(
      planner.plan(&p).unwrap_err(),
      PlanError::Configuration(ConfigurationError::ZeroPriceInterval)
    );
  }

  #[test]
  fn test_volume_out_of_decimal_range_is_configuration_error() {
    let p = BatchParameters {
      target_volume: Decimal::MAX,
      volume_jitter: Decimal::ONE,
      order_count: 1,
      price_min: dec!(1),
      price_max: dec!(2),
      ..params()
    };
    let mut planner = BatchPlanner::new(Fractions::new(vec![dec!(0.5); 2]));

    assert_eq!(
      planner.plan(&p).unwrap_err(),
      PlanError::Configuration(ConfigurationError::VolumeOverflow(Decimal::MAX, Decimal::ONE))
    );
    assert_eq!(planner.into_inner().next, 0);
  }

  #[test]
  fn test_oversized_batch_is_configuration_error() {
    let p = BatchParameters {
      order_count: usize::MAX,
      ..params()
    };
    let mut planner = BatchPlanner::new(Fractions::new(vec![]));

    assert_eq!(
      planner.plan(&p).unwrap_err(),
      PlanError::Configuration(ConfigurationError::TooManyOrders(usize::MAX))
    );
  }

  #[test]
  fn test_huge_jitter_keeps_quantity_positive() {
    let p = BatchParameters {
      target_volume: dec!(1),
      volume_jitter: dec!(10),
      ..params()
    };
    let mut planner = BatchPlanner::new(Fractions::new(vec![dec!(0.5), dec!(0), dec!(0.5), dec!(0)]));

    let plan = planner.plan(&p).unwrap();

    assert!(plan.iter().all(|o| o.quantity > Decimal::ZERO));
  }
}
