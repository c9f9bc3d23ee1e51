use hub_core::{GeoPoint, IntelligenceReport, Level, ReportDraft, ReportType};
use serde::{Deserialize, Serialize};

use crate::fields::{check_latitude, check_longitude, require_text, FieldErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceForm {
    pub title: String,
    pub report_type: ReportType,
    pub severity: Level,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    pub verified: bool,
}

impl Default for IntelligenceForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            report_type: ReportType::Info,
            severity: Level::Medium,
            latitude: "0".into(),
            longitude: "0".into(),
            description: String::new(),
            verified: false,
        }
    }
}

impl IntelligenceForm {
    pub fn from_report(report: &IntelligenceReport) -> Self {
        Self {
            title: report.title.clone(),
            report_type: report.report_type,
            severity: report.severity,
            latitude: report.location.lat.to_string(),
            longitude: report.location.lng.to_string(),
            description: report.description.clone(),
            verified: report.verified,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        self.build().err().unwrap_or_default()
    }

    pub fn build(&self) -> Result<ReportDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title, "Title is required");
        require_text(&mut errors, "description", &self.description, "Description is required");
        let lat = check_latitude(&mut errors, "latitude", &self.latitude);
        let lng = check_longitude(&mut errors, "longitude", &self.longitude);

        let (Some(lat), Some(lng)) = (lat, lng) else {
            return Err(errors);
        };
        errors.into_result(ReportDraft {
            title: self.title.trim().to_owned(),
            report_type: self.report_type,
            severity: self.severity,
            location: GeoPoint { lat, lng },
            description: self.description.trim().to_owned(),
            verified: self.verified,
        })
    }
}
