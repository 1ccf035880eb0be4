//! RNG-backed Random Source
//!
//! Implements the `RandomSource` port on top of any `rand::Rng`.
//! Production uses an OS-seeded `StdRng`; `--seed` and tests use a
//! fixed seed for reproducible plans.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::ports::random::{RandomSource, RandomSourceError};

/// Uniform decimal sampler driven by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Seed from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Fixed seed, for reproducible plans.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: Decimal, high: Decimal) -> Result<Decimal, RandomSourceError> {
        if low > high {
            return Err(RandomSourceError(format!(
                "empty interval [{low}, {high}]"
            )));
        }
        if low == high {
            return Ok(low);
        }

        let unit: f64 = self.rng.random_range(0.0..=1.0);
        let fraction = Decimal::from_f64(unit).ok_or_else(|| {
            RandomSourceError(format!("cannot represent {unit} as a decimal"))
        })?;

        let value = (high - low)
            .checked_mul(fraction)
            .and_then(|offset| low.checked_add(offset))
            .ok_or_else(|| {
                RandomSourceError(format!("overflow sampling [{low}, {high}]"))
            })?;

        // The f64 → Decimal conversion may land a hair outside the bounds.
        Ok(value.clamp(low, high))
    }
}
