use {
    lot_planner::{
        PlanEdit, PlanEngine, PlanState,
        config::MAX_LOTS_PER_CELL,
        data::to_csv,
        domain::WeightMode,
        engine::PriceResolver,
        models::{PlanSummary, plan_rows},
    },
    pretty_assertions::assert_eq,
};

fn engine_for(codes: &[&str], capital: f64, stages: usize, stage0_lots: u64) -> PlanEngine {
    let mut state = PlanState::default();
    state.total_capital = capital;
    state.stages_count = stages;
    state.stage0_lots_per_stock = stage0_lots;
    state.replace_stocks(&codes.iter().map(|c| c.to_string()).collect::<Vec<_>>());
    PlanEngine::start(state, true)
}

#[test]
fn weighted_split_across_two_equal_stages() {
    let mut engine = engine_for(&["AAA", "BBB"], 10_000_000.0, 2, 1);
    engine.apply(PlanEdit::SetWeight { index: 0, weight: 70.0 });
    engine.apply(PlanEdit::SetWeight { index: 1, weight: 30.0 });
    engine.apply(PlanEdit::SetPrice { stage: 0, stock: 0, price: 1000.0 });
    engine.apply(PlanEdit::SetPrice { stage: 0, stock: 1, price: 1000.0 });

    assert_eq!(engine.weight_mode(), WeightMode::Manual);
    assert_eq!(engine.state().stage_allocations, vec![50.0, 50.0]);
    assert_eq!(engine.lots().row(0), &[1, 1]);
    assert_eq!(engine.lots().row(1), &[35, 15]);
    assert_eq!(engine.lots().row(2), &[35, 15]);
    // Stage 0 pushes the plan over capital, so nothing is swept.
    assert_eq!(engine.extra_lots(), &[0, 0]);
    assert_eq!(engine.remaining_capital(), -200_000.0);
}

#[test]
fn single_stock_single_stage() {
    let mut engine = engine_for(&["AAA"], 1_000_000.0, 1, 1);
    engine.set_price(0, 0, 1000.0);
    assert_eq!(engine.lots().row(1), &[10]);
    assert_eq!(engine.remaining_capital(), -100_000.0);

    // Without the stage 0 purchase the stage budget uses all capital.
    engine.set_stage0_lots(0);
    assert_eq!(engine.lots().row(1), &[10]);
    assert_eq!(engine.remaining_capital(), 0.0);

    // Half a lot of leftover budget stays unspent.
    engine.set_total_capital(1_050_000.0);
    assert_eq!(engine.lots().row(1), &[10]);
    engine.set_stages_count(2);
    // 50/50 stages: 5 lots each; the last 50k cannot buy another lot.
    assert_eq!(engine.lots().row(1), &[5]);
    assert_eq!(engine.lots().row(2), &[5]);
    assert_eq!(engine.remaining_capital(), 50_000.0);
}

#[test]
fn sweep_tops_up_heaviest_affordable_stock_in_last_stage() {
    let mut engine = engine_for(&["AAA", "BBB"], 1_000_000.0, 1, 0);
    engine.set_weight(0, 40.0);
    engine.set_weight(1, 60.0);
    engine.set_price(0, 0, 900.0);
    engine.set_price(0, 1, 1300.0);

    // Planned: 4 x 90k + 4 x 130k = 880k. BBB's lot no longer fits, AAA's does.
    assert_eq!(engine.lots().row(1), &[5, 4]);
    assert_eq!(engine.extra_lots(), &[1, 0]);
    assert_eq!(engine.remaining_capital(), 30_000.0);
}

#[test]
fn unset_stage_price_falls_back_to_base() {
    let mut engine = engine_for(&["AAA"], 10_000_000.0, 2, 0);
    engine.set_price(0, 0, 2000.0);
    let before = engine.lots().clone();

    engine.set_price(1, 0, 0.0);
    assert!(engine.prices().is_manual(1, 0));
    assert_eq!(engine.prices().stage_price(1, 0).value(), 0.0);
    assert_eq!(engine.resolved_price(1, 0), 2000.0);
    assert_eq!(engine.lots(), &before);

    let summary = PlanSummary::from_engine(&engine);
    assert_eq!(summary.stages[0].used, summary.stages[1].used);
}

#[test]
fn base_price_edits_skip_manual_cells() {
    let mut engine = engine_for(&["AAA", "BBB"], 10_000_000.0, 3, 1);
    engine.set_price(0, 0, 1000.0);
    engine.set_price(2, 0, 850.0);
    engine.set_price(0, 0, 1100.0);

    let prices = engine.prices();
    assert_eq!(prices.stage_price(1, 0).value(), 1100.0);
    assert_eq!(prices.stage_price(2, 0).value(), 850.0);
    assert_eq!(prices.stage_price(3, 0).value(), 1100.0);
    // Other stocks are untouched.
    assert_eq!(prices.stage_price(1, 1).value(), 0.0);
}

#[test]
fn full_recompute_is_idempotent() {
    let mut engine = engine_for(&["BREN", "CDIA", "PTRO"], 60_000_000.0, 3, 1);
    for (i, price) in [7500.0, 1200.0, 5800.0].into_iter().enumerate() {
        engine.set_price(0, i, price);
    }
    engine.suggest_ladder(10.0);
    let lots = engine.lots().clone();
    let state = engine.state().clone();

    engine.apply(PlanEdit::Generate);
    engine.apply(PlanEdit::Generate);
    assert_eq!(engine.lots(), &lots);
    assert_eq!(engine.state(), &state);
}

#[test]
fn reorder_and_remove_keep_cells_attached_to_their_stock() {
    let mut engine = engine_for(&["AAA", "BBB", "CCC"], 30_000_000.0, 2, 1);
    engine.set_price(0, 0, 100.0);
    engine.set_price(0, 1, 200.0);
    engine.set_price(0, 2, 300.0);
    engine.set_price(2, 2, 250.0);

    engine.apply(PlanEdit::MoveStock { from: 2, to: 0 });
    assert_eq!(engine.state().stocks[0].code, "CCC");
    assert_eq!(engine.prices().stage_price(2, 0).value(), 250.0);
    assert!(engine.prices().is_manual(2, 0));

    engine.apply(PlanEdit::RemoveStock(1));
    let codes: Vec<&str> = engine.state().stocks.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["CCC", "BBB"]);
    assert_eq!(engine.prices().base_price(1).value(), 200.0);
    assert_eq!(engine.state().stocks[0].weight, 50.0);
}

#[test]
fn oversized_lot_counts_are_clamped_for_rows_and_summary() {
    let mut engine = engine_for(&["AAA"], 60_000_000.0, 3, 0);
    engine.set_price(0, 0, 1000.0);
    engine.set_stage0_lots(u64::MAX / 10);

    let rows = plan_rows(&engine);
    assert_eq!(rows[0].lots, MAX_LOTS_PER_CELL);
    assert_eq!(rows[0].shares, MAX_LOTS_PER_CELL * 100);
    assert!(to_csv(&rows).contains(&(MAX_LOTS_PER_CELL * 100).to_string()));

    engine.set_stage0_lots(0);
    engine.set_total_capital(1e22);
    engine.set_price(0, 0, 1.0);
    assert!(engine.lots().cells().all(|(_, _, &lots)| lots <= MAX_LOTS_PER_CELL));
    assert_eq!(engine.lots().row(3), &[MAX_LOTS_PER_CELL]);

    let summary = PlanSummary::from_engine(&engine);
    let stock = &summary.stocks[0];
    assert_eq!(stock.total_lots, 3 * MAX_LOTS_PER_CELL);
    assert_eq!(stock.total_shares, stock.total_lots * 100);
    assert_eq!(plan_rows(&engine).len(), 4);
}

#[test]
fn huge_stage_counts_are_capped() {
    let mut engine = engine_for(&["AAA"], 1_000_000.0, 3, 0);
    engine.apply(PlanEdit::SetStagesCount(1_000_000_000_000));
    assert_eq!(engine.state().stages_count, lot_planner::config::MAX_STAGES);
    assert_eq!(engine.lots().stage_rows(), lot_planner::config::MAX_STAGES + 1);
}
