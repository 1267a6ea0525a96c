use crate::{
    config::LOT_SIZE,
    engine::{PlanEngine, StageAllocator, spend_for},
};

#[derive(Debug, Clone, PartialEq)]
pub struct StageSummary {
    /// 1-based stage number.
    pub stage: usize,
    pub allocation_pct: f64,
    /// `capital * pct / 100`
    pub allocated: f64,
    /// What the lots of this stage actually cost, sweep lots included.
    pub used: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockSummary {
    pub index: usize,
    pub code: String,
    pub weight: f64,
    pub total_lots: u64,
    pub total_shares: u64,
    pub total_invest: f64,
    /// Rounded average cost per share; 0 without shares.
    pub avg_price: f64,
    pub extra_lots: u64,
}

/// Read-only figures derived from a finished plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub total_capital: f64,
    pub stage0_invest: f64,
    pub stages: Vec<StageSummary>,
    pub stocks: Vec<StockSummary>,
    pub total_invested: f64,
    /// Negative when the plan overspends.
    pub remaining: f64,
    pub weight_sum: f64,
    pub allocation_sum: f64,
}

impl PlanSummary {
    pub fn from_engine(engine: &PlanEngine) -> Self {
        let state = engine.state();
        let prices = engine.prices();
        let lots = engine.lots();
        let stock_count = state.stocks.len();
        let spend = |stage, stock| spend_for(lots, prices, LOT_SIZE, stage, stock);

        let stage0_invest = (0..stock_count).map(|stock| spend(0, stock)).sum();

        let stages = state
            .stage_list()
            .map(|stage| {
                let pct = state.stage_allocations.get(stage - 1).copied().unwrap_or(0.0);
                StageSummary {
                    stage,
                    allocation_pct: pct,
                    allocated: StageAllocator::stage_budget(state.total_capital, pct),
                    used: (0..stock_count).map(|stock| spend(stage, stock)).sum(),
                }
            })
            .collect();

        let stocks = state
            .stocks
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let total_lots = (0..=state.stages_count)
                    .map(|s| lots.value(s, index))
                    .fold(0u64, u64::saturating_add);
                let total_shares = total_lots.saturating_mul(LOT_SIZE);
                let total_invest: f64 = (0..=state.stages_count).map(|s| spend(s, index)).sum();
                let avg_price = if total_shares > 0 {
                    (total_invest / total_shares as f64).round()
                } else {
                    0.0
                };
                StockSummary {
                    index,
                    code: entry.display_code(index),
                    weight: entry.weight,
                    total_lots,
                    total_shares,
                    total_invest,
                    avg_price,
                    extra_lots: engine.extra_lots().get(index).copied().unwrap_or(0),
                }
            })
            .collect();

        let total_invested = engine.total_invested();
        Self {
            total_capital: state.total_capital,
            stage0_invest,
            stages,
            stocks,
            total_invested,
            remaining: state.total_capital - total_invested,
            weight_sum: state.weight_sum(),
            allocation_sum: state.stage_allocation_sum(),
        }
    }
}
