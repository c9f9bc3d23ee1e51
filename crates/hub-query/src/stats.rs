use hub_core::{Level, MissionStatus, ReportType, UnitStatus};
use hub_store::State;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnitStatusBreakdown {
    pub operational: usize,
    pub maintenance: usize,
    pub offline: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub operational_units: usize,
    pub active_missions: usize,
    pub high_severity_reports: usize,
    pub total_personnel: u64,
    pub unit_status: UnitStatusBreakdown,
    pub verified_reports: usize,
    pub threat_reports: usize,
    pub mean_mission_progress: Option<f64>,
}

impl DashboardStats {
    pub fn from_state(state: &State) -> Self {
        let mut unit_status = UnitStatusBreakdown::default();
        for unit in &state.units {
            match unit.status {
                UnitStatus::Operational => unit_status.operational += 1,
                UnitStatus::Maintenance => unit_status.maintenance += 1,
                UnitStatus::Offline => unit_status.offline += 1,
            }
        }

        let mean_mission_progress = if state.missions.is_empty() {
            None
        } else {
            let total: f64 = state.missions.iter().map(|mission| mission.progress).sum();
            Some(total / state.missions.len() as f64)
        };

        Self {
            operational_units: unit_status.operational,
            active_missions: state
                .missions
                .iter()
                .filter(|mission| mission.status == MissionStatus::Active)
                .count(),
            high_severity_reports: state
                .intelligence
                .iter()
                .filter(|report| report.severity == Level::High)
                .count(),
            total_personnel: state
                .units
                .iter()
                .map(|unit| u64::from(unit.personnel.current))
                .sum(),
            unit_status,
            verified_reports: state
                .intelligence
                .iter()
                .filter(|report| report.verified)
                .count(),
            threat_reports: state
                .intelligence
                .iter()
                .filter(|report| report.report_type == ReportType::Threat)
                .count(),
            mean_mission_progress,
        }
    }
}
