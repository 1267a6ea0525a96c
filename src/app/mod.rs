mod args;
mod report;
mod session;

pub use {
    args::{PriceArg, StockRef, WeightArg},
    report::{render_plan_table, render_report, render_stock_table, render_summary_table},
    session::PlannerSession,
};
