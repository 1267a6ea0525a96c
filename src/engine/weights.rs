use crate::{
    config::{ALLOCATION_DECIMALS, DF},
    domain::{Stock, WeightMode, all_weights_zero},
    utils::{equal_share, round_to},
};

/// Keeps stock weights summing to 100 while the plan is in auto mode.
pub struct WeightNormalizer;

impl WeightNormalizer {
    /// `n` equal weights. The first `n - 1` are `round(100/n, 6)`; the last one
    /// absorbs the rounding error so the total is exactly 100.
    pub fn equal_weights(n: usize) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }
        let equal = equal_share(n, ALLOCATION_DECIMALS);
        let mut acc = 0.0;
        (0..n)
            .map(|i| {
                if i < n - 1 {
                    acc += equal;
                    equal
                } else {
                    round_to(100.0 - acc, ALLOCATION_DECIMALS)
                }
            })
            .collect()
    }

    pub fn equalize(stocks: &mut [Stock]) {
        let weights = Self::equal_weights(stocks.len());
        for (stock, weight) in stocks.iter_mut().zip(weights) {
            stock.weight = weight;
        }
    }

    /// Automatic trigger (stock added/removed/reordered, reset).
    /// Equalises when forced, when already in auto mode, or when every weight is zero.
    /// Returns the mode the plan is in afterwards.
    pub fn normalize_if_needed(stocks: &mut [Stock], mode: WeightMode, force: bool) -> WeightMode {
        if !force && mode == WeightMode::Manual && !all_weights_zero(stocks) {
            return mode;
        }
        if stocks.is_empty() {
            return mode;
        }
        Self::equalize(stocks);
        if DF.log_weights {
            log::debug!("Weights equalised across {} stocks (force: {})", stocks.len(), force);
        }
        WeightMode::Auto
    }

    /// User edited a weight field. Zeroing every weight re-enters auto mode
    /// (and equalises); anything else leaves the weights alone in manual mode.
    pub fn on_weight_edited(stocks: &mut [Stock]) -> WeightMode {
        if all_weights_zero(stocks) {
            Self::normalize_if_needed(stocks, WeightMode::Auto, true)
        } else {
            if DF.log_weights {
                log::debug!("Manual weight edit, auto weights off");
            }
            WeightMode::Manual
        }
    }

    /// Initial mode for a freshly loaded stock list.
    pub fn initial_mode(stocks: &[Stock]) -> WeightMode {
        if all_weights_zero(stocks) {
            WeightMode::Auto
        } else {
            WeightMode::Manual
        }
    }
}
