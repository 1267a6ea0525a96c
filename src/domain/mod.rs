// Domain types and value objects
mod matrix;
mod modes;
mod stock;

// Re-export commonly used types to the world
pub use matrix::StageMatrix;
pub use modes::{AllocationMode, WeightMode};
pub use stock::{Stock, all_weights_zero, normalize_code, parse_codes};

/// Planned lot counts, indexed `(stage, stock)`.
pub type LotMatrix = StageMatrix<u64>;
