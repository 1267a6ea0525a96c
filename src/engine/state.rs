use crate::{
    config::{LOT_SIZE, MAX_STAGES, MIN_STAGES, constants::plan},
    domain::{AllocationMode, Stock},
    engine::{lots::LotPlanner, prices::PriceBook, sweep::ResidualSweeper},
};

/// Every input of the plan. The lot matrix is derived from this and never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanState {
    pub total_capital: f64,
    /// Informational only; no effect on lots.
    pub duration_days: u32,
    pub stages_count: usize,
    pub allocation_mode: AllocationMode,
    pub stage0_lots_per_stock: u64,
    pub stocks: Vec<Stock>,
    /// Percent of capital per stage; index 0 is stage 1.
    pub stage_allocations: Vec<f64>,
    pub prices: PriceBook,
}

impl Default for PlanState {
    fn default() -> Self {
        Self {
            total_capital: plan::TOTAL_CAPITAL,
            duration_days: plan::DURATION_DAYS,
            stages_count: plan::STAGES_COUNT,
            allocation_mode: plan::ALLOCATION_MODE,
            stage0_lots_per_stock: plan::STAGE0_LOTS_PER_STOCK,
            stocks: vec![Stock::blank()],
            stage_allocations: Vec::new(),
            prices: PriceBook::default(),
        }
    }
}

impl PlanState {
    /// Replaces the stock list with zero-weight stocks and starts a fresh price book.
    pub fn replace_stocks(&mut self, codes: &[String]) {
        self.stocks = codes.iter().map(|code| Stock::new(code, 0.0)).collect();
        self.prices = PriceBook::new(self.stages_count, self.stocks.len());
    }

    /// Clamps a requested stage count into `MIN_STAGES..=MAX_STAGES`.
    pub fn clamp_stages(stages: i64) -> usize {
        usize::try_from(stages).map_or(MIN_STAGES, |s| s.clamp(MIN_STAGES, MAX_STAGES))
    }

    pub fn lot_planner(&self) -> LotPlanner<'_> {
        LotPlanner {
            total_capital: self.total_capital,
            stage_allocations: &self.stage_allocations,
            stocks: &self.stocks,
            stages_count: self.stages_count,
            stage0_lots: self.stage0_lots_per_stock,
            lot_size: LOT_SIZE,
        }
    }

    pub fn sweeper(&self) -> ResidualSweeper<'_> {
        ResidualSweeper {
            total_capital: self.total_capital,
            stocks: &self.stocks,
            stages_count: self.stages_count,
            lot_size: LOT_SIZE,
        }
    }

    /// `1..=stages_count`
    pub fn stage_list(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.stages_count
    }

    pub fn weight_sum(&self) -> f64 {
        self.stocks.iter().map(|s| s.weight).sum()
    }

    pub fn stage_allocation_sum(&self) -> f64 {
        self.stage_allocations.iter().sum()
    }
}
