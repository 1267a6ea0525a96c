//! File persistence and export configuration

/// Configuration for Plan Snapshot Persistence
pub struct SnapshotPersistenceConfig {
    /// Default path of the JSON snapshot file
    pub path: &'static str,
    /// Storage key the snapshot was historically saved under
    pub key: &'static str,
}

/// Configuration for Tabular Export
pub struct ExportConfig {
    /// Suggested file name for CSV exports
    pub filename: &'static str,
    pub line_ending: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub snapshot: SnapshotPersistenceConfig,
    pub export: ExportConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    snapshot: SnapshotPersistenceConfig {
        path: ".trader-plan.json",
        key: "tp-generator-plan-v1",
    },
    export: ExportConfig {
        filename: "trader-plan.csv",
        line_ending: "\r\n",
    },
};
