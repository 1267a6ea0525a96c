use {
    crate::{
        config::{DF, Price, non_negative},
        domain::{AllocationMode, StageMatrix, Stock},
        engine::{PlanEngine, PlanState, PriceBook},
    },
    serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned},
    serde_json::Value,
};

/// Persisted mirror of a plan. Every field is optional on the way in: a missing or
/// wrongly typed field reads as `None` and the in-memory value is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub total_capital: Option<f64>,
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub stages_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub allocation_mode: Option<AllocationMode>,
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub stage0_lots_per_stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub stocks: Option<Vec<Stock>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub stage_allocations: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plan_prices: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plan_prices_manual: Option<Vec<Vec<Option<bool>>>>,
    /// Written for readers of the file; lots are always recomputed on load.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub planned_lots: Option<Vec<Vec<u64>>>,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<i64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Accepts integers and finite floats (truncated).
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    }))
}

impl Snapshot {
    /// Parses a stored blob. Anything that is not a JSON object yields `None`.
    pub fn parse(raw: &str) -> Option<Snapshot> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring unreadable plan snapshot: {}", e);
                return None;
            }
        };
        if !value.is_object() {
            log::warn!("Ignoring plan snapshot that is not a JSON object");
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub fn capture(engine: &PlanEngine, saved_at: i64) -> Snapshot {
        let state = engine.state();
        let book = engine.prices();
        Snapshot {
            total_capital: Some(state.total_capital),
            duration_days: Some(i64::from(state.duration_days)),
            stages_count: Some(state.stages_count as i64),
            allocation_mode: Some(state.allocation_mode),
            stage0_lots_per_stock: i64::try_from(state.stage0_lots_per_stock).ok(),
            stocks: Some(state.stocks.clone()),
            stage_allocations: Some(state.stage_allocations.clone()),
            plan_prices: Some(
                book.prices()
                    .rows()
                    .iter()
                    .map(|row| row.iter().map(|p| Some(p.value())).collect())
                    .collect(),
            ),
            plan_prices_manual: Some(
                book.manual()
                    .rows()
                    .iter()
                    .map(|row| row.iter().map(|&m| Some(m)).collect())
                    .collect(),
            ),
            planned_lots: Some(engine.lots().rows().to_vec()),
            saved_at: Some(saved_at),
        }
    }

    /// Overlays every present field onto `state`. Matrices may come back ragged or
    /// mis-sized; the engine resizes them on start.
    pub fn apply_to(self, mut state: PlanState) -> PlanState {
        if let Some(capital) = self.total_capital {
            state.total_capital = non_negative(capital);
        }
        if let Some(days) = self.duration_days {
            state.duration_days = u32::try_from(days.max(0)).unwrap_or(u32::MAX);
        }
        if let Some(count) = self.stages_count {
            state.stages_count = PlanState::clamp_stages(count);
        }
        if let Some(mode) = self.allocation_mode {
            state.allocation_mode = mode;
        }
        if let Some(lots) = self.stage0_lots_per_stock {
            state.stage0_lots_per_stock = u64::try_from(lots).unwrap_or(0);
        }
        if let Some(stocks) = self.stocks.filter(|s| !s.is_empty()) {
            state.stocks = stocks
                .into_iter()
                .map(|s| Stock::new(&s.code, non_negative(s.weight)))
                .collect();
        }
        if let Some(allocations) = self.stage_allocations {
            state.stage_allocations = allocations.into_iter().map(non_negative).collect();
        }

        let prices = match self.plan_prices {
            Some(rows) => StageMatrix::from_rows(
                rows.into_iter()
                    .map(|row| row.into_iter().map(|p| Price::new(p.unwrap_or(0.0))).collect())
                    .collect(),
            ),
            None => state.prices.prices().clone(),
        };
        let manual = match self.plan_prices_manual {
            Some(rows) => StageMatrix::from_rows(
                rows.into_iter()
                    .map(|row| row.into_iter().map(|m| m.unwrap_or(false)).collect())
                    .collect(),
            ),
            None => state.prices.manual().clone(),
        };
        state.prices = PriceBook::from_parts(prices, manual);

        if DF.log_snapshot {
            log::info!(
                "Restored plan: {} stock(s), {} stage(s), capital {}",
                state.stocks.len(),
                state.stages_count,
                state.total_capital
            );
        }
        state
    }
}
