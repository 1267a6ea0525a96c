use crate::{
    config::MAX_LOTS_PER_CELL,
    domain::{LotMatrix, Stock},
    engine::prices::PriceResolver,
};

/// Turns capital, stage percentages, stock weights and resolved prices into
/// whole board lots per `(stage, stock)`.
///
/// Stage 0 is not budget driven: every stock gets `stage0_lots` lots.
#[derive(Debug, Clone, Copy)]
pub struct LotPlanner<'a> {
    pub total_capital: f64,
    /// Percent of capital per stage; index 0 is stage 1.
    pub stage_allocations: &'a [f64],
    pub stocks: &'a [Stock],
    pub stages_count: usize,
    pub stage0_lots: u64,
    pub lot_size: u64,
}

impl LotPlanner<'_> {
    /// `capital * stage% * weight%`. Stage 0 and unknown cells have no budget.
    pub fn budget_for(&self, stage: usize, stock: usize) -> f64 {
        if stage == 0 {
            return 0.0;
        }
        let stage_pct = self.stage_allocations.get(stage - 1).copied().unwrap_or(0.0);
        let stock_pct = self.stocks.get(stock).map_or(0.0, |s| s.weight);
        self.total_capital * (stage_pct / 100.0) * (stock_pct / 100.0)
    }

    /// Lots for a single cell. Usable on its own when only one input changed.
    pub fn lots_for(&self, stage: usize, stock: usize, prices: &impl PriceResolver) -> u64 {
        if stage == 0 {
            return self.stage0_lots.min(MAX_LOTS_PER_CELL);
        }
        let price = prices.resolve(stage, stock);
        if !price.is_set() {
            return 0;
        }
        let lot_cost = price.lot_cost(self.lot_size);
        if lot_cost <= 0.0 {
            return 0;
        }
        floor_lots(self.budget_for(stage, stock) / lot_cost)
    }

    /// The full `(stages_count + 1) x stocks` lot matrix.
    pub fn plan(&self, prices: &impl PriceResolver) -> LotMatrix {
        LotMatrix::from_fn(self.stages_count + 1, self.stocks.len(), |stage, stock| {
            self.lots_for(stage, stock, prices)
        })
    }
}

/// Floor to whole lots; negative or non-finite results clamp to 0, huge ones
/// to `MAX_LOTS_PER_CELL`.
fn floor_lots(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        0
    } else {
        (raw.floor() as u64).min(MAX_LOTS_PER_CELL)
    }
}

/// Money spent on one cell: `lots * lot_size * resolved price`.
pub fn spend_for(
    lots: &LotMatrix,
    prices: &impl PriceResolver,
    lot_size: u64,
    stage: usize,
    stock: usize,
) -> f64 {
    let count = lots.value(stage, stock);
    count as f64 * prices.resolve(stage, stock).lot_cost(lot_size)
}

/// Everything the lot matrix spends, stage 0 included.
pub fn total_invested(lots: &LotMatrix, prices: &impl PriceResolver, lot_size: u64) -> f64 {
    lots.cells()
        .map(|(stage, stock, _)| spend_for(lots, prices, lot_size, stage, stock))
        .sum()
}
