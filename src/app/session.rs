use crate::{
    data::{Snapshot, SnapshotStore},
    engine::{PlanEdit, PlanEngine, PlanState},
    models::{PlanRow, PlanSummary, plan_rows},
    utils::now_timestamp_ms,
};

/// A plan bound to the store it is mirrored into.
///
/// The engine is the source of truth; saving is best-effort and a failed save
/// never touches the in-memory plan.
pub struct PlannerSession<S: SnapshotStore> {
    engine: PlanEngine,
    store: S,
    autosave: bool,
    restored_at: Option<i64>,
}

impl<S: SnapshotStore> PlannerSession<S> {
    /// Restores the last snapshot, then replaces the stock list with `codes` when
    /// any were supplied (weights re-equalised, price matrices reset) and saves.
    pub fn open(store: S, codes: &[String], autosave: bool) -> Self {
        let snapshot = store.load();
        let restored_at = snapshot.as_ref().and_then(|s| s.saved_at);
        let mut state = match snapshot {
            Some(snapshot) => snapshot.apply_to(PlanState::default()),
            None => PlanState::default(),
        };

        let codes_applied = !codes.is_empty();
        if codes_applied {
            log::info!("Starting with {} stock code(s) from the command line", codes.len());
            state.replace_stocks(codes);
        }

        let session = Self {
            engine: PlanEngine::start(state, codes_applied),
            store,
            autosave,
            restored_at,
        };
        if codes_applied {
            session.persist();
        }
        session
    }

    pub fn engine(&self) -> &PlanEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `savedAt` of the snapshot this session was restored from.
    pub fn restored_at(&self) -> Option<i64> {
        self.restored_at
    }

    pub fn apply(&mut self, edit: PlanEdit) {
        self.engine.apply(edit);
        self.persist();
    }

    /// Applies edits in order and saves once at the end.
    pub fn apply_batch(&mut self, edits: impl IntoIterator<Item = PlanEdit>) {
        for edit in edits {
            self.engine.apply(edit);
        }
        self.persist();
    }

    pub fn suggest_ladder(&mut self, step_pct: f64) {
        self.engine.suggest_ladder(step_pct);
        self.persist();
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from_engine(&self.engine)
    }

    pub fn rows(&self) -> Vec<PlanRow> {
        plan_rows(&self.engine)
    }

    /// Returns whether a snapshot was written. Failures are logged and swallowed.
    pub fn persist(&self) -> bool {
        if !self.autosave {
            return false;
        }
        let snapshot = Snapshot::capture(&self.engine, now_timestamp_ms());
        match self.store.save(&snapshot) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Plan snapshot not saved: {}", e);
                false
            }
        }
    }
}
