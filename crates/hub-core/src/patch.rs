use crate::domain::{
    Domain, EquipmentStatus, GeoPoint, IntelligenceReport, Level, Mission, MissionStatus,
    MissionType, Personnel, Position, ReportType, Unit, UnitStatus, UnitType,
};
use crate::ids::{MissionId, ReportId, UnitId};
use crate::time::EpochMillis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDraft {
    pub callsign: String,
    pub unit_name: String,
    pub unit_type: UnitType,
    pub domain: Domain,
    pub status: UnitStatus,
    pub position: Position,
    pub heading_deg: f64,
    pub speed: f64,
    pub personnel: Personnel,
    pub equipment_status: EquipmentStatus,
    pub last_report_at_ms: EpochMillis,
}

impl UnitDraft {
    pub fn into_unit(self, id: UnitId) -> Unit {
        Unit {
            id,
            callsign: self.callsign,
            unit_name: self.unit_name,
            unit_type: self.unit_type,
            domain: self.domain,
            status: self.status,
            position: self.position,
            heading_deg: self.heading_deg,
            speed: self.speed,
            personnel: self.personnel,
            equipment_status: self.equipment_status,
            last_report_at_ms: self.last_report_at_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDraft {
    pub name: String,
    pub mission_type: MissionType,
    pub status: MissionStatus,
    pub priority: Level,
    pub start_at_ms: EpochMillis,
    pub end_at_ms: EpochMillis,
    pub assigned_units: Vec<UnitId>,
    pub progress: f64,
    pub description: String,
}

impl MissionDraft {
    pub fn into_mission(self, id: MissionId) -> Mission {
        Mission {
            id,
            name: self.name,
            mission_type: self.mission_type,
            status: self.status,
            priority: self.priority,
            start_at_ms: self.start_at_ms,
            end_at_ms: self.end_at_ms,
            assigned_units: self.assigned_units,
            progress: self.progress,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub title: String,
    pub report_type: ReportType,
    pub severity: Level,
    pub location: GeoPoint,
    pub description: String,
    pub verified: bool,
}

impl ReportDraft {
    pub fn into_report(self, id: ReportId, timestamp_ms: EpochMillis) -> IntelligenceReport {
        IntelligenceReport {
            id,
            title: self.title,
            report_type: self.report_type,
            severity: self.severity,
            timestamp_ms,
            location: self.location,
            description: self.description,
            verified: self.verified,
        }
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPatch {
    pub callsign: Option<String>,
    pub unit_name: Option<String>,
    pub unit_type: Option<UnitType>,
    pub domain: Option<Domain>,
    pub status: Option<UnitStatus>,
    pub position: Option<Position>,
    pub heading_deg: Option<f64>,
    pub speed: Option<f64>,
    pub personnel: Option<Personnel>,
    pub equipment_status: Option<EquipmentStatus>,
    pub last_report_at_ms: Option<EpochMillis>,
}

impl UnitPatch {
    pub fn apply_to(self, unit: &mut Unit) {
        merge(&mut unit.callsign, self.callsign);
        merge(&mut unit.unit_name, self.unit_name);
        merge(&mut unit.unit_type, self.unit_type);
        merge(&mut unit.domain, self.domain);
        merge(&mut unit.status, self.status);
        merge(&mut unit.position, self.position);
        merge(&mut unit.heading_deg, self.heading_deg);
        merge(&mut unit.speed, self.speed);
        merge(&mut unit.personnel, self.personnel);
        merge(&mut unit.equipment_status, self.equipment_status);
        merge(&mut unit.last_report_at_ms, self.last_report_at_ms);
    }
}

impl From<UnitDraft> for UnitPatch {
    fn from(draft: UnitDraft) -> Self {
        Self {
            callsign: Some(draft.callsign),
            unit_name: Some(draft.unit_name),
            unit_type: Some(draft.unit_type),
            domain: Some(draft.domain),
            status: Some(draft.status),
            position: Some(draft.position),
            heading_deg: Some(draft.heading_deg),
            speed: Some(draft.speed),
            personnel: Some(draft.personnel),
            equipment_status: Some(draft.equipment_status),
            last_report_at_ms: Some(draft.last_report_at_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionPatch {
    pub name: Option<String>,
    pub mission_type: Option<MissionType>,
    pub status: Option<MissionStatus>,
    pub priority: Option<Level>,
    pub start_at_ms: Option<EpochMillis>,
    pub end_at_ms: Option<EpochMillis>,
    pub assigned_units: Option<Vec<UnitId>>,
    pub progress: Option<f64>,
    pub description: Option<String>,
}

impl MissionPatch {
    pub fn apply_to(self, mission: &mut Mission) {
        merge(&mut mission.name, self.name);
        merge(&mut mission.mission_type, self.mission_type);
        merge(&mut mission.status, self.status);
        merge(&mut mission.priority, self.priority);
        merge(&mut mission.start_at_ms, self.start_at_ms);
        merge(&mut mission.end_at_ms, self.end_at_ms);
        merge(&mut mission.assigned_units, self.assigned_units);
        merge(&mut mission.progress, self.progress);
        merge(&mut mission.description, self.description);
    }
}

impl From<MissionDraft> for MissionPatch {
    fn from(draft: MissionDraft) -> Self {
        Self {
            name: Some(draft.name),
            mission_type: Some(draft.mission_type),
            status: Some(draft.status),
            priority: Some(draft.priority),
            start_at_ms: Some(draft.start_at_ms),
            end_at_ms: Some(draft.end_at_ms),
            assigned_units: Some(draft.assigned_units),
            progress: Some(draft.progress),
            description: Some(draft.description),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPatch {
    pub title: Option<String>,
    pub report_type: Option<ReportType>,
    pub severity: Option<Level>,
    pub location: Option<GeoPoint>,
    pub description: Option<String>,
    pub verified: Option<bool>,
}

impl ReportPatch {
    pub fn apply_to(self, report: &mut IntelligenceReport) {
        merge(&mut report.title, self.title);
        merge(&mut report.report_type, self.report_type);
        merge(&mut report.severity, self.severity);
        merge(&mut report.location, self.location);
        merge(&mut report.description, self.description);
        merge(&mut report.verified, self.verified);
    }
}

impl From<ReportDraft> for ReportPatch {
    fn from(draft: ReportDraft) -> Self {
        Self {
            title: Some(draft.title),
            report_type: Some(draft.report_type),
            severity: Some(draft.severity),
            location: Some(draft.location),
            description: Some(draft.description),
            verified: Some(draft.verified),
        }
    }
}
