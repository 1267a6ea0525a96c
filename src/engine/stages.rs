use crate::{
    config::{ALLOCATION_DECIMALS, MIN_STAGES},
    domain::AllocationMode,
    utils::equal_share,
};

/// Splits total capital across stages 1..N.
pub struct StageAllocator;

impl StageAllocator {
    /// Every stage gets `round(100/N, 6)`. No remainder fix-up, so the sum may
    /// drift from 100 by rounding (3 stages -> 99.999999).
    pub fn equal(stages_count: usize) -> Vec<f64> {
        let share = equal_share(stages_count.max(MIN_STAGES), ALLOCATION_DECIMALS);
        vec![share; stages_count]
    }

    /// Stage percentages for the given mode. Custom mode keeps `current` when it
    /// already has one entry per stage, otherwise starts again from equal shares.
    pub fn allocate(stages_count: usize, mode: AllocationMode, current: &[f64]) -> Vec<f64> {
        match mode {
            AllocationMode::Equal => Self::equal(stages_count),
            AllocationMode::Custom if current.len() == stages_count => current.to_vec(),
            AllocationMode::Custom => Self::equal(stages_count),
        }
    }

    /// Capital earmarked for one stage.
    pub fn stage_budget(total_capital: f64, stage_pct: f64) -> f64 {
        total_capital * (stage_pct / 100.0)
    }
}
