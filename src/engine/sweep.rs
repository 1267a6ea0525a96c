use {
    crate::{
        config::{DF, MAX_LOTS_PER_CELL},
        domain::{LotMatrix, Stock},
        engine::{lots::total_invested, prices::PriceResolver},
    },
    itertools::Itertools,
    std::cmp::Ordering,
};

/// Greedy top-up: spends capital left after planning on extra whole lots,
/// heaviest weight first (ties: lower stock index first), always in the last stage.
#[derive(Debug, Clone, Copy)]
pub struct ResidualSweeper<'a> {
    pub total_capital: f64,
    pub stocks: &'a [Stock],
    pub stages_count: usize,
    pub lot_size: u64,
}

/// Lot matrix after the sweep, plus what the sweep did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepOutcome {
    pub lots: LotMatrix,
    /// Extra lots per stock (all placed in the last stage).
    pub extra_lots: Vec<u64>,
    /// Capital still unspent. Negative when planned lots already overspend.
    pub remaining: f64,
}

impl ResidualSweeper<'_> {
    /// Stock indices by descending weight, then ascending index.
    pub fn priority_order(stocks: &[Stock]) -> Vec<usize> {
        (0..stocks.len())
            .sorted_by(|&a, &b| {
                stocks[b]
                    .weight
                    .partial_cmp(&stocks[a].weight)
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            })
            .collect()
    }

    /// Each round buys one lot of the first stock (in priority order) whose lot
    /// still fits in the remaining capital, then restarts from the top. Since
    /// `remaining` only shrinks, a stock that no longer fits never fits again, so
    /// the rounds collapse into one pass where each stock takes as many lots as fit.
    ///
    /// With whole-number lot costs this matches the round-by-round loop exactly.
    /// With fractional costs the single subtraction per stock carries less float
    /// error than repeated per-lot subtraction, so a lot that fits only to the
    /// last ulp may be bought here where the loop would skip it.
    pub fn sweep(&self, mut lots: LotMatrix, prices: &impl PriceResolver) -> SweepOutcome {
        let mut remaining = self.total_capital - total_invested(&lots, prices, self.lot_size);
        let mut extra_lots = vec![0; self.stocks.len()];
        let target_stage = self.stages_count;

        for stock in Self::priority_order(self.stocks) {
            if remaining <= 0.0 {
                break;
            }
            let price = prices.last_known_price(target_stage, stock);
            if !price.is_set() {
                continue;
            }
            let lot_cost = price.lot_cost(self.lot_size);
            if lot_cost > remaining {
                continue;
            }
            let current = lots.value(target_stage, stock);
            let mut count =
                ((remaining / lot_cost).floor() as u64).min(MAX_LOTS_PER_CELL.saturating_sub(current));
            while count > 0 && count as f64 * lot_cost > remaining {
                count -= 1;
            }
            if count == 0 {
                continue;
            }

            if !lots.set(target_stage, stock, current.saturating_add(count)) {
                continue;
            }
            remaining -= count as f64 * lot_cost;
            extra_lots[stock] += count;

            if DF.log_sweep {
                log::debug!(
                    "Sweep: +{} lot(s) of #{} @ {} in stage {}, {} left",
                    count,
                    stock,
                    price,
                    target_stage,
                    remaining
                );
            }
        }

        SweepOutcome {
            lots,
            extra_lots,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{lots::LotPlanner, prices::PriceBook};
    use pretty_assertions::assert_eq;

    /// One lot per round, restarting from the top of the priority list.
    fn sweep_one_lot_at_a_time(
        sweeper: &ResidualSweeper<'_>,
        mut lots: LotMatrix,
        prices: &PriceBook,
    ) -> (LotMatrix, f64) {
        let mut remaining = sweeper.total_capital - total_invested(&lots, prices, sweeper.lot_size);
        let order = ResidualSweeper::priority_order(sweeper.stocks);
        let mut found = true;
        while found && remaining > 0.0 {
            found = false;
            for &stock in &order {
                let price = prices.last_known_price(sweeper.stages_count, stock);
                if price.is_set() && price.lot_cost(sweeper.lot_size) <= remaining {
                    let v = lots.value(sweeper.stages_count, stock);
                    lots.set(sweeper.stages_count, stock, v + 1);
                    remaining -= price.lot_cost(sweeper.lot_size);
                    found = true;
                    break;
                }
            }
        }
        (lots, remaining)
    }

    fn plan_and_sweep(
        capital: f64,
        weights: &[f64],
        base_prices: &[f64],
        allocations: &[f64],
        stage0_lots: u64,
    ) -> (SweepOutcome, (LotMatrix, f64)) {
        let stocks: Vec<Stock> = weights.iter().map(|&w| Stock::new("S", w)).collect();
        let stages_count = allocations.len();
        let mut book = PriceBook::new(stages_count, stocks.len());
        for (i, &p) in base_prices.iter().enumerate() {
            book.set_price(0, i, p);
        }
        let planner = LotPlanner {
            total_capital: capital,
            stage_allocations: allocations,
            stocks: &stocks,
            stages_count,
            stage0_lots,
            lot_size: 100,
        };
        let sweeper = ResidualSweeper {
            total_capital: capital,
            stocks: &stocks,
            stages_count,
            lot_size: 100,
        };
        let planned = planner.plan(&book);
        let reference = sweep_one_lot_at_a_time(&sweeper, planned.clone(), &book);
        (sweeper.sweep(planned, &book), reference)
    }

    #[test]
    fn priority_is_weight_then_index() {
        let stocks = [
            Stock::new("A", 20.0),
            Stock::new("B", 40.0),
            Stock::new("C", 20.0),
            Stock::new("D", 40.0),
        ];
        assert_eq!(ResidualSweeper::priority_order(&stocks), vec![1, 3, 0, 2]);
    }

    #[test]
    fn skips_unaffordable_heavyweight_and_tops_up_next() {
        // 40/60, lot costs 90k / 130k, capital 1M: planned 4 + 4 lots = 880k.
        let (outcome, _) = plan_and_sweep(1_000_000.0, &[40.0, 60.0], &[900.0, 1300.0], &[100.0], 0);
        assert_eq!(outcome.lots.row(1), &[5, 4]);
        assert_eq!(outcome.extra_lots, vec![1, 0]);
        assert_eq!(outcome.remaining, 30_000.0);
    }

    #[test]
    fn tie_goes_to_lower_index() {
        let (outcome, _) = plan_and_sweep(1_000_000.0, &[50.0, 50.0], &[900.0, 1300.0], &[100.0], 0);
        assert_eq!(outcome.lots.row(1), &[6, 3]);
        assert_eq!(outcome.remaining, 70_000.0);
    }

    #[test]
    fn extra_lots_land_in_last_stage_only() {
        let (outcome, _) =
            plan_and_sweep(1_000_000.0, &[40.0, 60.0], &[900.0, 1300.0], &[50.0, 50.0], 0);
        // Stage budgets 200k/300k: 2 + 2 lots per stage = 2 * 440k spent, 120k left.
        assert_eq!(outcome.lots.row(1), &[2, 2]);
        assert_eq!(outcome.lots.row(2), &[3, 2]);
        assert_eq!(outcome.remaining, 30_000.0);
    }

    #[test]
    fn overspent_plan_is_left_untouched() {
        // Stage 0 tracker lot (100k) on top of a fully spent stage 1.
        let (outcome, _) = plan_and_sweep(1_000_000.0, &[100.0], &[1000.0], &[100.0], 1);
        assert_eq!(outcome.lots.row(1), &[10]);
        assert_eq!(outcome.extra_lots, vec![0]);
        assert_eq!(outcome.remaining, -100_000.0);
    }

    #[test]
    fn single_stock_fills_up_to_capital() {
        let (outcome, _) = plan_and_sweep(1_050_000.0, &[50.0], &[1000.0], &[100.0], 1);
        // 100k stage 0 + 5 lots (500k) planned, 450k left -> 4 more lots.
        assert_eq!(outcome.lots.row(1), &[9]);
        assert_eq!(outcome.remaining, 50_000.0);
    }

    #[test]
    fn unpriced_stocks_are_never_bought() {
        let (outcome, _) = plan_and_sweep(500_000.0, &[80.0, 20.0], &[0.0, 1000.0], &[100.0], 0);
        assert_eq!(outcome.lots.row(1), &[0, 5]);
        assert_eq!(outcome.remaining, 0.0);
    }

    #[test]
    fn fractional_lot_costs_spend_the_exact_leftover() {
        // Lot costs 49.8 and 35.7: seven of the first leave exactly one of the second.
        let stocks = [Stock::new("A", 60.0), Stock::new("B", 40.0)];
        let mut book = PriceBook::new(1, 2);
        book.set_price(0, 0, 0.498);
        book.set_price(0, 1, 0.357);
        let sweeper = ResidualSweeper {
            total_capital: 384.3,
            stocks: &stocks,
            stages_count: 1,
            lot_size: 100,
        };
        let outcome = sweeper.sweep(LotMatrix::filled(2, 2, 0), &book);
        assert_eq!(outcome.lots.row(1), &[7, 1]);
        assert_eq!(outcome.extra_lots, vec![7, 1]);
        assert!(outcome.remaining >= 0.0 && outcome.remaining < 1e-9);
    }

    #[test]
    fn huge_capital_stops_at_the_cell_limit() {
        let stocks = [Stock::new("A", 100.0)];
        let mut book = PriceBook::new(1, 1);
        book.set_price(0, 0, 1.0);
        let sweeper = ResidualSweeper {
            total_capital: 1e22,
            stocks: &stocks,
            stages_count: 1,
            lot_size: 100,
        };
        let start = LotMatrix::filled(2, 1, MAX_LOTS_PER_CELL - 3);
        let outcome = sweeper.sweep(start, &book);
        assert_eq!(outcome.lots.row(1), &[MAX_LOTS_PER_CELL]);
        assert_eq!(outcome.extra_lots, vec![3]);
        assert!(outcome.remaining > 0.0);
    }

    #[test]
    fn matches_one_lot_at_a_time_reference() {
        let cases: &[(f64, &[f64], &[f64], &[f64], u64)] = &[
            (60_000_000.0, &[25.0, 50.0, 15.0, 10.0], &[7500.0, 1200.0, 900.0, 580.0], &[33.333333; 3], 1),
            (3_333_333.0, &[33.333333, 33.333333, 33.333334], &[123.0, 4567.0, 89.0], &[40.0, 35.0], 2),
            (10_000_000.0, &[70.0, 30.0], &[1000.0, 1000.0], &[50.0, 50.0], 0),
        ];
        for &(capital, weights, prices, allocations, stage0) in cases {
            let (outcome, (reference_lots, reference_remaining)) =
                plan_and_sweep(capital, weights, prices, allocations, stage0);
            assert_eq!(outcome.lots, reference_lots);
            assert!((outcome.remaining - reference_remaining).abs() < 1e-6);
        }
    }
}
