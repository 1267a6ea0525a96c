// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate
pub use app::PlannerSession;
pub use config::PERSISTENCE;
pub use data::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore};
pub use domain::{AllocationMode, Stock};
pub use engine::{PlanEdit, PlanEngine, PlanState};

use {
    anyhow::{Context, Result},
    app::{PriceArg, WeightArg, render_report},
    clap::Parser,
    config::constants::ladder,
    domain::parse_codes,
    std::path::PathBuf,
    utils::CurrencyStyle,
};

// CLI argument parsing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Staged lot accumulation planner", long_about = None)]
pub struct Cli {
    /// Snapshot file the plan is restored from and saved to
    #[arg(long, default_value = PERSISTENCE.snapshot.path)]
    pub state: PathBuf,

    /// Comma-separated stock codes replacing the stock list (repeatable)
    #[arg(long)]
    pub codes: Vec<String>,

    /// Reset to a single blank stock
    #[arg(long, default_value_t = false)]
    pub reset: bool,

    #[arg(long)]
    pub capital: Option<f64>,

    #[arg(long)]
    pub duration_days: Option<u32>,

    #[arg(long, allow_negative_numbers = true)]
    pub stages: Option<i64>,

    #[arg(long, value_enum)]
    pub mode: Option<AllocationMode>,

    /// Custom stage percentages, e.g. `20,30,50` (switches to custom mode)
    #[arg(long, value_delimiter = ',')]
    pub allocations: Vec<f64>,

    #[arg(long)]
    pub stage0_lots: Option<u64>,

    /// Append a stock (repeatable)
    #[arg(long = "add")]
    pub add: Vec<String>,

    /// `STOCK=WEIGHT`, STOCK is a code or 1-based position (repeatable)
    #[arg(long = "weight")]
    pub weights: Vec<WeightArg>,

    /// `STAGE:STOCK=PRICE`, stage 0 is the base price (repeatable)
    #[arg(long = "price")]
    pub prices: Vec<PriceArg>,

    /// Fill derived stage prices with a ladder `STEP_PCT` apart (default 15)
    #[arg(long, num_args = 0..=1)]
    pub ladder: Option<Option<f64>>,

    /// Write the plan as CSV
    #[arg(long, num_args = 0..=1, default_missing_value = PERSISTENCE.export.filename)]
    pub export: Option<PathBuf>,

    /// Do not write the snapshot file
    #[arg(long, default_value_t = false)]
    pub no_save: bool,

    /// Print amounts as `Rp 1000000` instead of `Rp 1.000.000`
    #[arg(long, default_value_t = false)]
    pub plain_currency: bool,
}

impl Cli {
    /// Scalar and list edits in the order they are applied.
    fn plan_edits(&self) -> Vec<PlanEdit> {
        let mut edits = Vec::new();
        if self.reset {
            edits.push(PlanEdit::ResetStocks);
        }
        if let Some(capital) = self.capital {
            edits.push(PlanEdit::SetTotalCapital(capital));
        }
        if let Some(days) = self.duration_days {
            edits.push(PlanEdit::SetDurationDays(days));
        }
        if let Some(stages) = self.stages {
            edits.push(PlanEdit::SetStagesCount(stages));
        }
        if let Some(mode) = self.mode {
            edits.push(PlanEdit::SetAllocationMode(mode));
        }
        if !self.allocations.is_empty() {
            edits.push(PlanEdit::SetStagesCount(self.allocations.len() as i64));
            edits.extend(
                self.allocations
                    .iter()
                    .enumerate()
                    .map(|(i, &pct)| PlanEdit::SetStageAllocation { stage: i + 1, pct }),
            );
        }
        if let Some(lots) = self.stage0_lots {
            edits.push(PlanEdit::SetStage0Lots(lots));
        }
        edits.extend(self.add.iter().cloned().map(PlanEdit::AddStock));
        edits
    }
}

/// Main application entry point.
pub fn run_app(args: Cli) -> Result<()> {
    let store = JsonFileStore::new(&args.state);
    let codes = parse_codes(&args.codes);
    let mut session = PlannerSession::open(store, &codes, !args.no_save);

    session.apply_batch(args.plan_edits());

    // Stock references resolve against the list as it stands after the edits above.
    let mut cell_edits = Vec::new();
    for w in &args.weights {
        let index = w
            .stock
            .resolve(&session.engine().state().stocks)
            .with_context(|| format!("--weight: unknown stock {}", w.stock))?;
        cell_edits.push(PlanEdit::SetWeight {
            index,
            weight: w.weight,
        });
    }
    for p in &args.prices {
        let stock = p
            .stock
            .resolve(&session.engine().state().stocks)
            .with_context(|| format!("--price: unknown stock {}", p.stock))?;
        if p.stage > session.engine().state().stages_count {
            anyhow::bail!(
                "--price: stage {} is beyond the last stage ({})",
                p.stage,
                session.engine().state().stages_count
            );
        }
        cell_edits.push(PlanEdit::SetPrice {
            stage: p.stage,
            stock,
            price: p.price,
        });
    }
    session.apply_batch(cell_edits);

    if let Some(step) = args.ladder {
        session.suggest_ladder(step.unwrap_or(ladder::STEP_PCT));
    }
    session.apply(PlanEdit::Generate);

    let state = session.engine().state();
    log::info!(
        "Plan: {} stock(s), {} stage(s), {} allocation, {} day(s)",
        state.stocks.len(),
        state.stages_count,
        state.allocation_mode,
        state.duration_days
    );

    let style = if args.plain_currency {
        CurrencyStyle::Plain
    } else {
        CurrencyStyle::Locale
    };
    let rows = session.rows();
    let summary = session.summary();
    println!("{}", render_report(&rows, &summary, session.restored_at(), style));

    if let Some(path) = &args.export {
        data::write_csv(path, &rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "lot-planner",
            "--codes",
            "bren,cdia",
            "--codes",
            "ptro",
            "--allocations",
            "20,30,50",
            "--weight",
            "BREN=50",
            "--price",
            "0:2=1200",
            "--mode",
            "custom",
            "--export",
        ])
        .unwrap();

        assert_eq!(parse_codes(&cli.codes), vec!["BREN", "CDIA", "PTRO"]);
        assert_eq!(cli.allocations, vec![20.0, 30.0, 50.0]);
        assert_eq!(cli.weights.len(), 1);
        assert_eq!(cli.prices[0].stage, 0);
        assert_eq!(cli.mode, Some(AllocationMode::Custom));
        assert_eq!(cli.export, Some(PathBuf::from("trader-plan.csv")));
        assert_eq!(cli.state, PathBuf::from(".trader-plan.json"));
    }

    #[test]
    fn ladder_step_is_optional() {
        let bare = Cli::try_parse_from(["lot-planner", "--ladder"]).unwrap();
        assert_eq!(bare.ladder, Some(None));
        let stepped = Cli::try_parse_from(["lot-planner", "--ladder", "10"]).unwrap();
        assert_eq!(stepped.ladder, Some(Some(10.0)));
        let none = Cli::try_parse_from(["lot-planner"]).unwrap();
        assert_eq!(none.ladder, None);
    }

    #[test]
    fn allocations_become_stage_edits() {
        let cli = Cli::try_parse_from(["lot-planner", "--allocations", "40,60", "--add", "x"]).unwrap();
        assert_eq!(
            cli.plan_edits(),
            vec![
                PlanEdit::SetStagesCount(2),
                PlanEdit::SetStageAllocation { stage: 1, pct: 40.0 },
                PlanEdit::SetStageAllocation { stage: 2, pct: 60.0 },
                PlanEdit::AddStock("x".to_string()),
            ]
        );
    }
}
