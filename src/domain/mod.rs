//! Domain layer - Batch model and reporting.
//!
//! Pure types for the order-batch placer: parameters, planned orders,
//! submission outcomes and the batch summary.
//! No I/O and no randomness here (hexagonal architecture inner ring).

pub mod batch;
pub mod report;

// Re-export core types for convenience
pub use batch::{
    BatchParameters, ConfigurationError, OrderId, OrderSpec, Outcome, Side,
    SubmissionResult, MAX_ORDER_COUNT, NOTIONAL_EPSILON,
};
pub use report::BatchReport;
