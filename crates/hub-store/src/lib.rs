pub mod action;
pub mod confirm;
pub mod reducer;
pub mod seed;
pub mod state;
pub mod store;

pub use action::{Action, MissionAdvance, SimulationTick, UnitDrift};
pub use confirm::{DeleteTarget, PendingDeletion};
pub use reducer::{apply, reduce, wrap_heading, Outcome, ReduceContext, Summary, MAX_PROGRESS};
pub use seed::seed_state;
pub use state::State;
pub use store::{Store, StoreHandle};
