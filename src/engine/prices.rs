use crate::{
    config::{DF, Price},
    domain::StageMatrix,
};

/// Resolves the effective price of a `(stage, stock)` cell.
///
/// Stage 0 is the base price. Any later stage uses its own price when set and
/// otherwise falls back to the base price; unset everywhere means 0.
pub trait PriceResolver {
    /// The price stored for the cell, without fallback.
    fn stage_price(&self, stage: usize, stock: usize) -> Price;

    fn resolve(&self, stage: usize, stock: usize) -> Price {
        let base = self.stage_price(0, stock);
        if stage == 0 {
            base
        } else {
            self.stage_price(stage, stock).or(base)
        }
    }

    /// First positive resolved price scanning from `last_stage` down to stage 0.
    fn last_known_price(&self, last_stage: usize, stock: usize) -> Price {
        (0..=last_stage)
            .rev()
            .map(|stage| self.resolve(stage, stock))
            .find(|price| price.is_set())
            .unwrap_or(Price::UNSET)
    }
}

/// Stage prices plus the per-cell manual flags that stop base-price propagation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceBook {
    prices: StageMatrix<Price>,
    manual: StageMatrix<bool>,
}

impl PriceBook {
    pub fn new(stages_count: usize, stocks: usize) -> Self {
        Self {
            prices: StageMatrix::filled(stages_count + 1, stocks, Price::UNSET),
            manual: StageMatrix::filled(stages_count + 1, stocks, false),
        }
    }

    /// Rebuilds a book from restored (possibly ragged) matrices. Call `resize` afterwards.
    pub fn from_parts(prices: StageMatrix<Price>, manual: StageMatrix<bool>) -> Self {
        Self { prices, manual }
    }

    pub fn prices(&self) -> &StageMatrix<Price> {
        &self.prices
    }

    pub fn manual(&self) -> &StageMatrix<bool> {
        &self.manual
    }

    pub fn is_manual(&self, stage: usize, stock: usize) -> bool {
        self.manual.value(stage, stock)
    }

    pub fn base_price(&self, stock: usize) -> Price {
        self.stage_price(0, stock)
    }

    /// Resizes to `(stages_count + 1) x stocks` keeping cells by position.
    /// New base cells start unset, new stage cells start at the base price.
    pub fn resize(&mut self, stages_count: usize, stocks: usize) {
        let rows = stages_count + 1;
        let current = &self.prices;
        let prices = current.resized(rows, stocks, |stage, stock| {
            if stage == 0 {
                Price::UNSET
            } else {
                current.value(0, stock)
            }
        });
        let manual = self.manual.resized(rows, stocks, |_, _| false);
        self.prices = prices;
        self.manual = manual;
    }

    /// Edits a price. A base edit re-propagates to every non-manual stage of that
    /// stock; a stage edit flags the cell manual for good. Returns `false` when the
    /// cell does not exist.
    pub fn set_price(&mut self, stage: usize, stock: usize, price: f64) -> bool {
        if !self.prices.set(stage, stock, Price::new(price)) {
            return false;
        }
        if stage == 0 {
            self.propagate_stock(stock);
        } else {
            self.manual.set(stage, stock, true);
        }
        true
    }

    /// Copies the base price into every non-manual stage cell of one stock.
    pub fn propagate_stock(&mut self, stock: usize) {
        let base = self.base_price(stock);
        for stage in 1..self.prices.stage_rows() {
            if !self.is_manual(stage, stock) {
                self.prices.set(stage, stock, base);
            }
        }
        if DF.log_propagation {
            log::debug!("Propagated base price {} for stock #{}", base, stock);
        }
    }

    pub fn propagate_all(&mut self) {
        for stock in 0..self.prices.stock_count() {
            self.propagate_stock(stock);
        }
    }

    pub fn remove_stock(&mut self, index: usize) {
        self.prices.remove_stock(index);
        self.manual.remove_stock(index);
    }

    pub fn move_stock(&mut self, from: usize, to: usize) {
        self.prices.move_stock(from, to);
        self.manual.move_stock(from, to);
    }
}

impl PriceResolver for PriceBook {
    fn stage_price(&self, stage: usize, stock: usize) -> Price {
        self.prices.value(stage, stock)
    }
}
