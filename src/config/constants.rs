// Top Level Constants

/// Shares per board lot. Fixed by the exchange, never user-editable.
pub const LOT_SIZE: u64 = 100;

/// Decimal places kept when splitting 100% into equal shares.
pub const ALLOCATION_DECIMALS: u32 = 6;

/// Minimum number of accumulation stages (stage 0 is always present on top of these).
pub const MIN_STAGES: usize = 1;

/// Upper bound on accumulation stages; larger counts are clamped.
pub const MAX_STAGES: usize = 100;

/// Most lots a single `(stage, stock)` cell can hold. Summing every stage of a
/// stock and multiplying by `LOT_SIZE` still fits in a `u64`.
pub const MAX_LOTS_PER_CELL: u64 = u64::MAX / LOT_SIZE / (MAX_STAGES as u64 + 1);

pub mod plan {
    use crate::domain::AllocationMode;

    pub const TOTAL_CAPITAL: f64 = 60_000_000.0;
    pub const DURATION_DAYS: u32 = 90;
    pub const STAGES_COUNT: usize = 3;
    pub const ALLOCATION_MODE: AllocationMode = AllocationMode::Equal;
    pub const STAGE0_LOTS_PER_STOCK: u64 = 1;
}

pub mod ladder {
    /// Default per-stage discount (in %) used when suggesting stage prices.
    pub const STEP_PCT: f64 = 15.0;
}
