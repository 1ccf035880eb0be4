//! Symbol Filters - Price Tick and Lot Step Formatting
//!
//! Binance rejects prices off the tick grid and quantities off the lot
//! grid. The planner samples continuous values, so the adapter snaps
//! them to the symbol's grids right before sending.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{SymbolFilter, SymbolInfo};

/// Price/quantity grids of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolFilters {
    /// PRICE_FILTER.tickSize
    pub tick_size: Decimal,
    /// LOT_SIZE.stepSize
    pub step_size: Decimal,
    /// baseAssetPrecision
    pub quantity_precision: u32,
}

impl Default for SymbolFilters {
    /// Used for any filter the exchange does not report.
    fn default() -> Self {
        Self {
            tick_size: dec!(0.01),
            step_size: dec!(0.000001),
            quantity_precision: 8,
        }
    }
}

impl SymbolFilters {
    pub fn from_symbol_info(info: &SymbolInfo) -> Self {
        let mut filters = Self::default();
        if let Some(precision) = info.base_asset_precision {
            filters.quantity_precision = precision;
        }
        for filter in &info.filters {
            match filter {
                SymbolFilter::Price { tick_size } if !tick_size.is_zero() => {
                    filters.tick_size = *tick_size;
                }
                SymbolFilter::LotSize { step_size } if !step_size.is_zero() => {
                    filters.step_size = *step_size;
                }
                _ => {}
            }
        }
        filters
    }

    /// Round a price to the nearest tick.
    ///
    /// Returns `None` if the snapped price is not positive.
    pub fn snap_price(&self, price: Decimal) -> Option<Decimal> {
        let snapped = ((price / self.tick_size).round() * self.tick_size).normalize();
        (snapped > Decimal::ZERO).then_some(snapped)
    }

    /// Round a price to the nearest tick that lies inside `[low, high]`.
    ///
    /// Returns `None` if no positive tick falls inside the interval.
    pub fn snap_price_within(&self, price: Decimal, low: Decimal, high: Decimal) -> Option<Decimal> {
        let lowest = (low / self.tick_size).ceil() * self.tick_size;
        let highest = (high / self.tick_size).floor() * self.tick_size;
        if lowest > highest {
            return None;
        }
        self.snap_price(price.clamp(lowest, highest))
    }

    /// Round a quantity down to the lot step.
    ///
    /// Rounds down so the sent notional never exceeds the planned one.
    /// Returns `None` if the snapped quantity is zero.
    pub fn snap_quantity(&self, quantity: Decimal) -> Option<Decimal> {
        let snapped = ((quantity / self.step_size).floor() * self.step_size)
            .round_dp(self.quantity_precision)
            .normalize();
        (snapped > Decimal::ZERO).then_some(snapped)
    }
}
