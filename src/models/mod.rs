mod rows;
mod summary;

pub use {
    rows::{PlanRow, plan_rows},
    summary::{PlanSummary, StageSummary, StockSummary},
};
