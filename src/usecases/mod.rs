//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain types with port interfaces.
//!
//! Use cases:
//! - `BatchPlanner`: Randomized expansion of parameters into orders
//! - `OrderSubmitter`: Sequential submission with per-order failure isolation
//! - `place_batch`: Plan, then submit, then summarise

pub mod batch_planner;
pub mod batch_runner;
pub mod order_submitter;

pub use batch_planner::{BatchPlanner, PlanError};
pub use batch_runner::place_batch;
pub use order_submitter::OrderSubmitter;
