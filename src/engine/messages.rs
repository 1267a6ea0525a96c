use crate::domain::AllocationMode;

/// A single user edit. Every edit is applied synchronously and followed by the
/// recomputation it needs before control returns.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEdit {
    SetTotalCapital(f64),
    SetDurationDays(u32),
    /// Clamped to at least one stage.
    SetStagesCount(i64),
    SetAllocationMode(AllocationMode),
    /// `stage` is 1-based. Switches the plan to custom mode.
    SetStageAllocation { stage: usize, pct: f64 },
    SetStage0Lots(u64),
    AddStock(String),
    /// Refused when it would leave the plan without stocks.
    RemoveStock(usize),
    MoveStock { from: usize, to: usize },
    ResetStocks,
    SetStockCode { index: usize, code: String },
    SetWeight { index: usize, weight: f64 },
    SetPrice { stage: usize, stock: usize, price: f64 },
    /// Full resync of every derived value.
    Generate,
}
