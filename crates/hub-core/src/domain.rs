use crate::ids::{AlertId, MissionId, ReportId, UnitId};
use crate::time::EpochMillis;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Land,
    Air,
    Sea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    Operational,
    Maintenance,
    Offline,
}

impl UnitStatus {
    pub const ALL: [Self; 3] = [Self::Operational, Self::Maintenance, Self::Offline];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[default]
    Infantry,
    Armor,
    Aviation,
    Artillery,
    Engineering,
    Medical,
    Logistics,
    #[serde(rename = "Special Forces")]
    SpecialForces,
}

impl UnitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Infantry => "Infantry",
            Self::Armor => "Armor",
            Self::Aviation => "Aviation",
            Self::Artillery => "Artillery",
            Self::Engineering => "Engineering",
            Self::Medical => "Medical",
            Self::Logistics => "Logistics",
            Self::SpecialForces => "Special Forces",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    #[default]
    FullyOperational,
    Partial,
    MaintenanceRequired,
    NonOperational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionType {
    Reconnaissance,
    Security,
    Logistics,
    Combat,
    Training,
    Medical,
    Engineering,
    Intelligence,
}

impl MissionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reconnaissance => "Reconnaissance",
            Self::Security => "Security",
            Self::Logistics => "Logistics",
            Self::Combat => "Combat",
            Self::Training => "Training",
            Self::Medical => "Medical",
            Self::Engineering => "Engineering",
            Self::Intelligence => "Intelligence",
        }
    }
}

impl fmt::Display for MissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Threat,
    Info,
    Environmental,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personnel {
    pub current: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceReport {
    pub id: ReportId,
    pub title: String,
    pub report_type: ReportType,
    pub severity: Level,
    pub timestamp_ms: EpochMillis,
    pub location: GeoPoint,
    pub description: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub timestamp_ms: EpochMillis,
}
