use hub_core::{
    Domain, IntelligenceReport, Level, Mission, MissionStatus, ReportType, Unit, UnitStatus,
};
use serde::{Deserialize, Serialize};

/// Case-insensitive substring match against any of `fields`. An empty term
/// matches everything.
fn matches_search(term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_option<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFilter {
    pub search: String,
    pub status: Option<UnitStatus>,
    pub domain: Option<Domain>,
}

impl UnitFilter {
    pub fn matches(&self, unit: &Unit) -> bool {
        matches_search(&self.search, &[unit.unit_name.as_str(), unit.callsign.as_str()])
            && matches_option(self.status, unit.status)
            && matches_option(self.domain, unit.domain)
    }

    pub fn apply<'a>(&self, units: &'a [Unit]) -> Vec<&'a Unit> {
        units.iter().filter(|unit| self.matches(unit)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionFilter {
    pub search: String,
    pub status: Option<MissionStatus>,
    pub priority: Option<Level>,
}

impl MissionFilter {
    pub fn matches(&self, mission: &Mission) -> bool {
        matches_search(&self.search, &[mission.name.as_str(), mission.mission_type.as_str()])
            && matches_option(self.status, mission.status)
            && matches_option(self.priority, mission.priority)
    }

    pub fn apply<'a>(&self, missions: &'a [Mission]) -> Vec<&'a Mission> {
        missions
            .iter()
            .filter(|mission| self.matches(mission))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifiedFilter {
    #[default]
    All,
    Verified,
    Unverified,
}

impl VerifiedFilter {
    pub fn matches(self, verified: bool) -> bool {
        match self {
            Self::All => true,
            Self::Verified => verified,
            Self::Unverified => !verified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceFilter {
    pub search: String,
    pub report_type: Option<ReportType>,
    pub severity: Option<Level>,
    pub verified: VerifiedFilter,
}

impl IntelligenceFilter {
    pub fn matches(&self, report: &IntelligenceReport) -> bool {
        matches_search(&self.search, &[report.title.as_str(), report.description.as_str()])
            && matches_option(self.report_type, report.report_type)
            && matches_option(self.severity, report.severity)
            && self.verified.matches(report.verified)
    }

    pub fn apply<'a>(&self, reports: &'a [IntelligenceReport]) -> Vec<&'a IntelligenceReport> {
        reports
            .iter()
            .filter(|report| self.matches(report))
            .collect()
    }
}
