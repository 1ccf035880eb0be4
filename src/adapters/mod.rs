//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies.
//!
//! Adapter categories:
//! - `binance`: Binance spot REST API client, signing, order placement
//! - `dry_run`: Network-free exchange for inspecting plans
//! - `random`: `rand`-backed uniform sampler

pub mod binance;
pub mod dry_run;
pub mod random;

pub use dry_run::DryRunExchange;
pub use random::RngSource;
