use hub_core::{
    Alert, IdAllocator, IntelligenceReport, Mission, MissionId, ReportId, Unit, UnitId,
};
use serde::Serialize;

/// One immutable snapshot of the session.
///
/// Units and missions keep insertion order. Intelligence reports and alerts
/// are newest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct State {
    pub units: Vec<Unit>,
    pub missions: Vec<Mission>,
    pub intelligence: Vec<IntelligenceReport>,
    pub alerts: Vec<Alert>,
    pub loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub(crate) ids: IdAllocator,
}

impl State {
    pub fn new(
        units: Vec<Unit>,
        missions: Vec<Mission>,
        intelligence: Vec<IntelligenceReport>,
    ) -> Self {
        let highest = units
            .iter()
            .map(|unit| unit.id.as_raw())
            .chain(missions.iter().map(|mission| mission.id.as_raw()))
            .chain(intelligence.iter().map(|report| report.id.as_raw()))
            .max()
            .unwrap_or(0);
        Self {
            units,
            missions,
            intelligence,
            alerts: Vec::new(),
            loading: false,
            error: None,
            ids: IdAllocator::starting_after(highest),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|mission| mission.id == id)
    }

    pub fn report(&self, id: ReportId) -> Option<&IntelligenceReport> {
        self.intelligence.iter().find(|report| report.id == id)
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|unit| unit.id).collect()
    }
}
