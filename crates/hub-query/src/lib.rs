pub mod filter;
pub mod labels;
pub mod stats;

pub use filter::{IntelligenceFilter, MissionFilter, UnitFilter, VerifiedFilter};
pub use labels::{assigned_unit_labels, assigned_units_summary, unit_label};
pub use stats::{DashboardStats, UnitStatusBreakdown};
