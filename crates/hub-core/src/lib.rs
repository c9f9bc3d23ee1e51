pub mod domain;
pub mod error;
pub mod ids;
pub mod patch;
pub mod time;

pub use domain::{
    Alert, Domain, EquipmentStatus, GeoPoint, IntelligenceReport, Level, Mission, MissionStatus,
    MissionType, Personnel, Position, ReportType, Unit, UnitStatus, UnitType,
};
pub use error::{ErrorCode, HubError, HubResult};
pub use ids::{AlertId, IdAllocator, MissionId, ReportId, UnitId};
pub use patch::{MissionDraft, MissionPatch, ReportDraft, ReportPatch, UnitDraft, UnitPatch};
pub use time::{now_epoch_millis, EpochMillis};
