//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the capabilities the usecases layer consumes from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ExchangeClient`: Limit order placement on a spot exchange
//! - `RandomSource`: Uniform sampling for the batch planner

pub mod exchange;
pub mod random;

pub use exchange::{ExchangeClient, ExchangeError};
pub use random::{RandomSource, RandomSourceError};
