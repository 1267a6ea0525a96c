mod core;
mod lots;
mod messages;
mod prices;
mod stages;
mod state;
mod sweep;
mod weights;

pub use core::PlanEngine;
pub use lots::{LotPlanner, spend_for, total_invested};
pub use messages::PlanEdit;
pub use prices::{PriceBook, PriceResolver};
pub use stages::StageAllocator;
pub use state::PlanState;
pub use sweep::{ResidualSweeper, SweepOutcome};
pub use weights::WeightNormalizer;
