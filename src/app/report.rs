use {
    crate::{
        models::{PlanRow, PlanSummary},
        utils::{CurrencyStyle, epoch_ms_to_local_string, format_currency},
    },
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled)]
struct CellLine {
    #[tabled(rename = "Stage")]
    stage: usize,
    #[tabled(rename = "Stock")]
    code: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Disc %")]
    discount: String,
    #[tabled(rename = "Lots")]
    lots: u64,
    #[tabled(rename = "Shares")]
    shares: u64,
    #[tabled(rename = "Spend")]
    spend: String,
}

#[derive(Tabled)]
struct StockLine {
    #[tabled(rename = "Stock")]
    code: String,
    #[tabled(rename = "Weight %")]
    weight: String,
    #[tabled(rename = "Lots")]
    lots: u64,
    #[tabled(rename = "Sweep")]
    extra: u64,
    #[tabled(rename = "Invest")]
    invest: String,
    #[tabled(rename = "Avg Price")]
    avg_price: String,
}

#[derive(Tabled)]
struct SummaryLine {
    #[tabled(rename = "Item")]
    label: String,
    #[tabled(rename = "Alloc %")]
    pct: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Per-cell lot table. Manual stage prices are marked with `*`.
pub fn render_plan_table(rows: &[PlanRow], style: CurrencyStyle) -> String {
    let lines = rows.iter().map(|row| CellLine {
        stage: row.stage,
        code: row.code.clone(),
        price: format!(
            "{}{}",
            format_currency(row.price, style),
            if row.manual { " *" } else { "" }
        ),
        discount: if row.stage == 0 {
            "-".to_string()
        } else {
            format!("{}", row.discount_pct)
        },
        lots: row.lots,
        shares: row.shares,
        spend: format_currency(row.spend, style),
    });
    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_stock_table(summary: &PlanSummary, style: CurrencyStyle) -> String {
    let lines = summary.stocks.iter().map(|s| StockLine {
        code: s.code.clone(),
        weight: format!("{:.2}", s.weight),
        lots: s.total_lots,
        extra: s.extra_lots,
        invest: format_currency(s.total_invest, style),
        avg_price: format_currency(s.avg_price, style),
    });
    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_summary_table(summary: &PlanSummary, style: CurrencyStyle) -> String {
    let money = |v: f64| format_currency(v, style);
    let mut lines = vec![SummaryLine {
        label: "Stage 0".to_string(),
        pct: "-".to_string(),
        budget: "-".to_string(),
        used: money(summary.stage0_invest),
    }];
    lines.extend(summary.stages.iter().map(|s| SummaryLine {
        label: format!("Stage {}", s.stage),
        pct: format!("{:.2}", s.allocation_pct),
        budget: money(s.allocated),
        used: money(s.used),
    }));
    lines.push(SummaryLine {
        label: "Total".to_string(),
        pct: format!("{:.2}", summary.allocation_sum),
        budget: money(summary.total_capital),
        used: money(summary.total_invested),
    });
    lines.push(SummaryLine {
        label: "Remaining".to_string(),
        pct: String::new(),
        budget: String::new(),
        used: money(summary.remaining),
    });
    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table.to_string()
}

/// Full terminal report: lot table, per-stock totals, stage budgets.
pub fn render_report(
    rows: &[PlanRow],
    summary: &PlanSummary,
    restored_at: Option<i64>,
    style: CurrencyStyle,
) -> String {
    let mut out = String::new();
    if let Some(stamp) = restored_at {
        out.push_str(&format!("Restored plan saved at {}\n", epoch_ms_to_local_string(stamp)));
    }
    out.push_str(&render_plan_table(rows, style));
    out.push('\n');
    out.push_str(&render_stock_table(summary, style));
    out.push('\n');
    out.push_str(&render_summary_table(summary, style));
    if (summary.weight_sum - 100.0).abs() > 0.01 {
        out.push_str(&format!("\nWeights sum to {:.2}%, not 100%", summary.weight_sum));
    }
    out
}
