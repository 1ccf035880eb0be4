//! Property-Based Tests - Batch Planner Invariants
//!
//! Uses `proptest` to verify that every generated plan respects the
//! count, price-range and notional-range guarantees across random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use order_scatter::adapters::RngSource;
use order_scatter::domain::batch::{BatchParameters, Side, NOTIONAL_EPSILON};
use order_scatter::usecases::BatchPlanner;

/// Relative tolerance for price × quantity against the sampled notional.
const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

fn params(
    target_cents: u32,
    jitter_cents: u32,
    count: usize,
    a_cents: u32,
    b_cents: u32,
) -> BatchParameters {
    BatchParameters {
        symbol: "ETHUSDT".to_string(),
        side: Side::Buy,
        target_volume: Decimal::new(i64::from(target_cents), 2),
        volume_jitter: Decimal::new(i64::from(jitter_cents), 2),
        order_count: count,
        price_min: Decimal::new(i64::from(a_cents), 2),
        price_max: Decimal::new(i64::from(b_cents), 2),
    }
}

proptest! {
    /// The plan always has exactly `order_count` orders.
    #[test]
    fn plan_has_exact_count(
        count in 1usize..50,
        seed in any::<u64>(),
    ) {
        let p = params(10_000, 100, count, 190_300, 191_300);
        let plan = BatchPlanner::new(RngSource::seeded(seed)).plan(&p).unwrap();
        prop_assert_eq!(plan.len(), count);
    }

    /// Prices stay inside the normalized interval, whichever bound is larger.
    #[test]
    fn prices_within_normalized_range(
        a in 1u32..10_000_000,
        b in 1u32..10_000_000,
        seed in any::<u64>(),
    ) {
        let p = params(10_000, 100, 8, a, b);
        let (low, high) = p.price_bounds();
        let plan = BatchPlanner::new(RngSource::seeded(seed)).plan(&p).unwrap();
        for order in &plan {
            prop_assert!(order.price >= low && order.price <= high,
                "price {} outside [{}, {}]", order.price, low, high);
        }
    }

    /// Notional stays within target ± jitter, clamped below at epsilon,
    /// and quantity is always positive.
    #[test]
    fn notional_within_jittered_range(
        target in 1u32..1_000_000,
        jitter in 0u32..2_000_000,
        seed in any::<u64>(),
    ) {
        let p = params(target, jitter, 8, 100_000, 300_000);
        let (low, high) = p.notional_bounds();
        prop_assert!(low >= NOTIONAL_EPSILON);

        let plan = BatchPlanner::new(RngSource::seeded(seed)).plan(&p).unwrap();
        for order in &plan {
            prop_assert!(order.quantity > Decimal::ZERO);
            let notional = order.notional();
            let slack = high * TOLERANCE;
            prop_assert!(notional >= low - slack && notional <= high + slack,
                "notional {} outside [{}, {}]", notional, low, high);
        }
    }

    /// A zero-width interval pins every price.
    #[test]
    fn degenerate_price_interval_pins_price(
        price in 1u32..10_000_000,
        seed in any::<u64>(),
    ) {
        let p = params(5_000, 50, 6, price, price);
        let plan = BatchPlanner::new(RngSource::seeded(seed)).plan(&p).unwrap();
        let expected = Decimal::new(i64::from(price), 2);
        prop_assert!(plan.iter().all(|o| o.price == expected));
    }

    /// No jitter means every order carries exactly the target notional.
    #[test]
    fn zero_jitter_gives_target_notional(
        target in 1u32..1_000_000,
        seed in any::<u64>(),
    ) {
        let p = params(target, 0, 6, 190_300, 191_300);
        let expected = p.target_volume;
        let plan = BatchPlanner::new(RngSource::seeded(seed)).plan(&p).unwrap();
        for order in &plan {
            let diff = (order.notional() - expected).abs();
            prop_assert!(diff <= expected * TOLERANCE,
                "notional {} differs from target {}", order.notional(), expected);
        }
    }
}
