mod export;
mod snapshot;
mod store;

pub use {
    export::{to_csv, write_csv},
    snapshot::Snapshot,
    store::{JsonFileStore, MemoryStore, SnapshotError, SnapshotStore},
};
