use hub_core::{
    AlertId, EpochMillis, MissionDraft, MissionId, MissionPatch, ReportDraft, ReportId,
    ReportPatch, UnitDraft, UnitId, UnitPatch,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    CreateUnit(UnitDraft),
    UpdateUnit { id: UnitId, patch: UnitPatch },
    DeleteUnit(UnitId),
    CreateMission(MissionDraft),
    UpdateMission { id: MissionId, patch: MissionPatch },
    DeleteMission(MissionId),
    CreateReport(ReportDraft),
    UpdateReport { id: ReportId, patch: ReportPatch },
    DeleteReport(ReportId),
    ToggleReportVerified(ReportId),
    SetLoading(bool),
    SetError(Option<String>),
    AddAlert { message: String },
    RemoveAlert(AlertId),
    SimulationTick(SimulationTick),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateUnit(_) => "create_unit",
            Self::UpdateUnit { .. } => "update_unit",
            Self::DeleteUnit(_) => "delete_unit",
            Self::CreateMission(_) => "create_mission",
            Self::UpdateMission { .. } => "update_mission",
            Self::DeleteMission(_) => "delete_mission",
            Self::CreateReport(_) => "create_report",
            Self::UpdateReport { .. } => "update_report",
            Self::DeleteReport(_) => "delete_report",
            Self::ToggleReportVerified(_) => "toggle_report_verified",
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
            Self::AddAlert { .. } => "add_alert",
            Self::RemoveAlert(_) => "remove_alert",
            Self::SimulationTick(_) => "simulation_tick",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationTick {
    pub issued_at_ms: EpochMillis,
    pub units: Vec<UnitDrift>,
    pub missions: Vec<MissionAdvance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitDrift {
    pub id: UnitId,
    pub speed_delta: f64,
    pub heading_delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionAdvance {
    pub id: MissionId,
    pub progress_delta: f64,
}
