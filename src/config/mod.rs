//! Configuration module for the lot planner.

// Can all be private now because we have a public re-export.
mod debug;
mod persistence;
mod types;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::{ALLOCATION_DECIMALS, LOT_SIZE, MAX_LOTS_PER_CELL, MAX_STAGES, MIN_STAGES};
pub use debug::DF;
pub use persistence::PERSISTENCE;
pub use types::{Price, non_negative};
