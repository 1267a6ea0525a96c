use {
    crate::{config::PERSISTENCE, models::PlanRow},
    anyhow::{Context, Result},
    std::{fs, path::Path},
};

const CSV_HEADER: &str = "Stage,Stock,Price,LotSize,Lots,Shares,Spend";

/// Renders rows as CSV, header first, CRLF between lines.
pub fn to_csv(rows: &[PlanRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(rows.iter().map(|row| {
        format!(
            "{},{},{},{},{},{},{}",
            row.stage,
            csv_field(&row.code),
            row.price,
            row.lot_size,
            row.lots,
            row.shares,
            row.spend
        )
    }));
    lines.join(PERSISTENCE.export.line_ending)
}

/// Quotes a field only when it would break the row.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_csv(path: &Path, rows: &[PlanRow]) -> Result<()> {
    fs::write(path, to_csv(rows))
        .with_context(|| format!("Failed to write plan export to {}", path.display()))?;
    log::info!("Exported {} row(s) to {}", rows.len(), path.display());
    Ok(())
}
