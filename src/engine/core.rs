use crate::{
    config::{DF, LOT_SIZE, non_negative},
    domain::{AllocationMode, LotMatrix, Stock, WeightMode, normalize_code},
    engine::{
        messages::PlanEdit,
        prices::{PriceBook, PriceResolver},
        stages::StageAllocator,
        state::PlanState,
        sweep::SweepOutcome,
        weights::WeightNormalizer,
    },
};

/// Owns the plan inputs and the lot matrix derived from them.
///
/// Every mutation goes through a method here and ends in `recompute`, which
/// rebuilds the lot matrix from scratch (plan, then sweep). Calling it twice with
/// no input change yields the same matrix.
#[derive(Debug, Clone)]
pub struct PlanEngine {
    state: PlanState,
    weight_mode: WeightMode,
    outcome: SweepOutcome,
}

impl Default for PlanEngine {
    fn default() -> Self {
        Self::new(PlanState::default())
    }
}

impl PlanEngine {
    pub fn new(state: PlanState) -> Self {
        Self::start(state, false)
    }

    /// Brings a freshly loaded state into a consistent shape: weights, stage
    /// allocations, matrix sizes, base-price propagation, then lots.
    /// `force_equalize` is set when the stock list came from outside.
    pub fn start(mut state: PlanState, force_equalize: bool) -> Self {
        let weight_mode = WeightNormalizer::initial_mode(&state.stocks);
        state.stages_count = PlanState::clamp_stages(state.stages_count as i64);
        let mut engine = Self {
            state,
            weight_mode,
            outcome: SweepOutcome::default(),
        };
        engine.equalize_if_needed(force_equalize);
        engine.recalc_allocations();
        engine.ensure_matrix_size();
        engine.state.prices.propagate_all();
        engine.recompute();
        engine
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    pub fn weight_mode(&self) -> WeightMode {
        self.weight_mode
    }

    /// Final lot matrix (planned lots plus the residual sweep).
    pub fn lots(&self) -> &LotMatrix {
        &self.outcome.lots
    }

    /// Lots the sweep added per stock (all in the last stage).
    pub fn extra_lots(&self) -> &[u64] {
        &self.outcome.extra_lots
    }

    pub fn prices(&self) -> &PriceBook {
        &self.state.prices
    }

    pub fn apply(&mut self, edit: PlanEdit) {
        match edit {
            PlanEdit::SetTotalCapital(capital) => self.set_total_capital(capital),
            PlanEdit::SetDurationDays(days) => self.state.duration_days = days,
            PlanEdit::SetStagesCount(count) => self.set_stages_count(count),
            PlanEdit::SetAllocationMode(mode) => self.set_allocation_mode(mode),
            PlanEdit::SetStageAllocation { stage, pct } => self.set_stage_allocation(stage, pct),
            PlanEdit::SetStage0Lots(lots) => self.set_stage0_lots(lots),
            PlanEdit::AddStock(code) => self.add_stock(&code),
            PlanEdit::RemoveStock(index) => {
                self.remove_stock(index);
            }
            PlanEdit::MoveStock { from, to } => {
                self.move_stock(from, to);
            }
            PlanEdit::ResetStocks => self.reset_stocks(),
            PlanEdit::SetStockCode { index, code } => self.set_stock_code(index, &code),
            PlanEdit::SetWeight { index, weight } => self.set_weight(index, weight),
            PlanEdit::SetPrice { stage, stock, price } => self.set_price(stage, stock, price),
            PlanEdit::Generate => self.generate_plan(),
        }
    }

    pub fn set_total_capital(&mut self, capital: f64) {
        self.state.total_capital = non_negative(capital);
        self.recompute();
    }

    pub fn set_stages_count(&mut self, count: i64) {
        self.state.stages_count = PlanState::clamp_stages(count);
        self.recalc_allocations();
        self.ensure_matrix_size();
        self.state.prices.propagate_all();
        self.recompute();
    }

    pub fn set_allocation_mode(&mut self, mode: AllocationMode) {
        self.state.allocation_mode = mode;
        self.recalc_allocations();
        self.recompute();
    }

    /// Edits one stage percentage (1-based stage). Unknown stages are ignored.
    pub fn set_stage_allocation(&mut self, stage: usize, pct: f64) {
        if stage == 0 || stage > self.state.stages_count {
            return;
        }
        if self.state.allocation_mode == AllocationMode::Equal {
            log::info!("Stage allocation edited, switching to custom allocation mode");
            self.state.allocation_mode = AllocationMode::Custom;
        }
        self.recalc_allocations();
        self.state.stage_allocations[stage - 1] = non_negative(pct);
        self.recompute();
    }

    pub fn set_stage0_lots(&mut self, lots: u64) {
        self.state.stage0_lots_per_stock = lots;
        self.recompute();
    }

    pub fn add_stock(&mut self, code: &str) {
        self.state.stocks.push(Stock::new(code, 0.0));
        self.ensure_matrix_size();
        self.equalize_if_needed(true);
        self.state.prices.propagate_all();
        self.recompute();
    }

    /// Returns `false` when the index is unknown or only one stock is left.
    pub fn remove_stock(&mut self, index: usize) -> bool {
        if self.state.stocks.len() <= 1 || index >= self.state.stocks.len() {
            return false;
        }
        self.state.stocks.remove(index);
        self.state.prices.remove_stock(index);
        self.equalize_if_needed(false);
        self.recompute();
        true
    }

    /// Reorders one stock; prices and manual flags move with it.
    pub fn move_stock(&mut self, from: usize, to: usize) -> bool {
        let len = self.state.stocks.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let stock = self.state.stocks.remove(from);
        self.state.stocks.insert(to, stock);
        self.state.prices.move_stock(from, to);
        self.equalize_if_needed(false);
        self.recompute();
        true
    }

    /// Back to a single blank stock with a fresh price book.
    pub fn reset_stocks(&mut self) {
        self.state.stocks = vec![Stock::blank()];
        self.state.prices = PriceBook::new(self.state.stages_count, 1);
        self.equalize_if_needed(true);
        self.state.prices.propagate_all();
        self.recompute();
    }

    pub fn set_stock_code(&mut self, index: usize, code: &str) {
        if let Some(stock) = self.state.stocks.get_mut(index) {
            stock.code = normalize_code(code);
        }
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) {
        let Some(stock) = self.state.stocks.get_mut(index) else {
            return;
        };
        stock.weight = non_negative(weight);
        self.weight_mode = WeightNormalizer::on_weight_edited(&mut self.state.stocks);
        self.recompute();
    }

    pub fn set_price(&mut self, stage: usize, stock: usize, price: f64) {
        if self.state.prices.set_price(stage, stock, price) {
            self.recompute();
        }
    }

    /// Fills every non-manual stage price with a ladder below the base price:
    /// stage `s` gets `round(base * (1 - step_pct * s / 100))`. Filled cells become manual.
    pub fn suggest_ladder(&mut self, step_pct: f64) {
        let step = non_negative(step_pct);
        for stock in 0..self.state.stocks.len() {
            let base = self.state.prices.base_price(stock);
            if !base.is_set() {
                continue;
            }
            for stage in self.state.stage_list() {
                if self.state.prices.is_manual(stage, stock) {
                    continue;
                }
                let suggested = (base.value() * (1.0 - step * stage as f64 / 100.0)).round();
                self.state.prices.set_price(stage, stock, suggested.max(0.0));
            }
        }
        self.recompute();
    }

    /// Full resync of every derived value.
    pub fn generate_plan(&mut self) {
        self.equalize_if_needed(false);
        self.recalc_allocations();
        self.ensure_matrix_size();
        self.state.prices.propagate_all();
        self.recompute();
    }

    pub fn total_invested(&self) -> f64 {
        super::lots::total_invested(&self.outcome.lots, &self.state.prices, LOT_SIZE)
    }

    /// `total_capital - total_invested`; negative when the plan overspends.
    pub fn remaining_capital(&self) -> f64 {
        self.state.total_capital - self.total_invested()
    }

    /// Resolved price used for lots and spend of one cell.
    pub fn resolved_price(&self, stage: usize, stock: usize) -> f64 {
        self.state.prices.resolve(stage, stock).value()
    }

    fn equalize_if_needed(&mut self, force: bool) {
        self.weight_mode =
            WeightNormalizer::normalize_if_needed(&mut self.state.stocks, self.weight_mode, force);
    }

    fn recalc_allocations(&mut self) {
        self.state.stage_allocations = StageAllocator::allocate(
            self.state.stages_count,
            self.state.allocation_mode,
            &self.state.stage_allocations,
        );
    }

    fn ensure_matrix_size(&mut self) {
        self.state
            .prices
            .resize(self.state.stages_count, self.state.stocks.len());
    }

    fn recompute(&mut self) {
        let planned = self.state.lot_planner().plan(&self.state.prices);
        self.outcome = self.state.sweeper().sweep(planned, &self.state.prices);
        if DF.log_recalc {
            log::debug!(
                "Recalc: {} stage(s) x {} stock(s), {} extra lot(s), {:.0} unspent",
                self.state.stages_count,
                self.state.stocks.len(),
                self.outcome.extra_lots.iter().fold(0u64, |acc, &n| acc.saturating_add(n)),
                self.outcome.remaining
            );
        }
    }
}
