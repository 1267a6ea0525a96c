//! Debugging feature flags.

pub struct LogFlags {
    /// Log every full recomputation of the lot matrix.
    pub log_recalc: bool,

    /// Log each lot the residual sweep adds.
    pub log_sweep: bool,

    /// Base price propagation into non-manual stage prices
    pub log_propagation: bool,

    pub log_snapshot: bool,

    /// Auto/Manual weight transitions and equalisation
    pub log_weights: bool,
}

pub const DF: LogFlags = LogFlags {
    log_snapshot: true,
    log_weights: true,

    log_recalc: false,
    log_sweep: false,
    log_propagation: false,
};
