use crate::{
    config::LOT_SIZE,
    engine::{PlanEngine, PriceResolver, spend_for},
    utils::discount_pct,
};

/// One `(stage, stock)` cell of the finished plan, flattened for export and reports.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRow {
    pub stage: usize,
    pub stock: usize,
    pub code: String,
    /// Resolved price (stage price, else base price, else 0).
    pub price: f64,
    pub lot_size: u64,
    pub lots: u64,
    pub shares: u64,
    pub spend: f64,
    /// Whole-percent discount of this stage price against the base price.
    pub discount_pct: f64,
    pub manual: bool,
}

/// Stage-major, stock-minor, stage 0 first.
pub fn plan_rows(engine: &PlanEngine) -> Vec<PlanRow> {
    let state = engine.state();
    let prices = engine.prices();
    let lots = engine.lots();

    let mut rows = Vec::with_capacity((state.stages_count + 1) * state.stocks.len());
    for stage in 0..=state.stages_count {
        for (stock, entry) in state.stocks.iter().enumerate() {
            let price = prices.resolve(stage, stock).value();
            let count = lots.value(stage, stock);
            rows.push(PlanRow {
                stage,
                stock,
                code: entry.display_code(stock),
                price,
                lot_size: LOT_SIZE,
                lots: count,
                shares: count.saturating_mul(LOT_SIZE),
                spend: spend_for(lots, prices, LOT_SIZE, stage, stock),
                discount_pct: if stage == 0 {
                    0.0
                } else {
                    discount_pct(price, prices.base_price(stock).value())
                },
                manual: prices.is_manual(stage, stock),
            });
        }
    }
    rows
}
