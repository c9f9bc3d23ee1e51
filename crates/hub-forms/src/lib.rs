pub mod fields;
pub mod intel;
pub mod mission;
pub mod session;
pub mod unit;

pub use fields::{compose_timestamp, split_timestamp, FieldErrors};
pub use intel::IntelligenceForm;
pub use mission::MissionForm;
pub use session::{FormSession, FormStatus, PendingSubmit, SubmitError};
pub use unit::UnitForm;
