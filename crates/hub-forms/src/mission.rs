use chrono::{Days, NaiveDate, Utc};
use hub_core::{Level, Mission, MissionDraft, MissionStatus, MissionType, UnitId};
use serde::{Deserialize, Serialize};

use crate::fields::{compose_timestamp, parse_number, require_text, split_timestamp, FieldErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionForm {
    pub name: String,
    pub mission_type: MissionType,
    pub status: MissionStatus,
    pub priority: Level,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub assigned_units: Vec<UnitId>,
    pub progress: String,
    pub description: String,
}

impl Default for MissionForm {
    fn default() -> Self {
        Self::starting_on(Utc::now().date_naive())
    }
}

impl MissionForm {
    /// Blank form for a mission running from 08:00 on `day` to 18:00 the
    /// following day.
    pub fn starting_on(day: NaiveDate) -> Self {
        let next_day = day.checked_add_days(Days::new(1)).unwrap_or(day);
        Self {
            name: String::new(),
            mission_type: MissionType::Reconnaissance,
            status: MissionStatus::Active,
            priority: Level::Medium,
            start_date: day.format("%Y-%m-%d").to_string(),
            start_time: "08:00".into(),
            end_date: next_day.format("%Y-%m-%d").to_string(),
            end_time: "18:00".into(),
            assigned_units: Vec::new(),
            progress: "0".into(),
            description: String::new(),
        }
    }

    pub fn from_mission(mission: &Mission) -> Self {
        let (start_date, start_time) = split_timestamp(mission.start_at_ms);
        let (end_date, end_time) = split_timestamp(mission.end_at_ms);
        Self {
            name: mission.name.clone(),
            mission_type: mission.mission_type,
            status: mission.status,
            priority: mission.priority,
            start_date,
            start_time,
            end_date,
            end_time,
            assigned_units: mission.assigned_units.clone(),
            progress: mission.progress.to_string(),
            description: mission.description.clone(),
        }
    }

    pub fn toggle_unit(&mut self, id: UnitId) {
        if let Some(index) = self.assigned_units.iter().position(|unit| *unit == id) {
            self.assigned_units.remove(index);
        } else {
            self.assigned_units.push(id);
        }
    }

    pub fn validate(&self, known_units: &[UnitId]) -> FieldErrors {
        match self.build(known_units) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        }
    }

    /// Every assigned id must appear in `known_units`.
    pub fn build(&self, known_units: &[UnitId]) -> Result<MissionDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Mission name is required");
        require_text(
            &mut errors,
            "description",
            &self.description,
            "Mission description is required",
        );

        let mut assigned_units: Vec<UnitId> = Vec::with_capacity(self.assigned_units.len());
        for id in &self.assigned_units {
            if !assigned_units.contains(id) {
                assigned_units.push(*id);
            }
        }
        if assigned_units.is_empty() {
            errors.insert("assigned_units", "At least one unit must be assigned");
        } else if let Some(unknown) = assigned_units.iter().find(|id| !known_units.contains(id)) {
            errors.insert("assigned_units", format!("Unit {unknown} does not exist"));
        }

        let start = compose_timestamp(&self.start_date, &self.start_time);
        if start.is_none() {
            errors.insert("start_date", "Start date/time is invalid");
        }
        let end = compose_timestamp(&self.end_date, &self.end_time);
        if end.is_none() {
            errors.insert("end_date", "End date/time is invalid");
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.insert("end_date", "End date/time must be after start date/time");
            }
        }

        let progress = parse_number(&mut errors, "progress", "Progress", &self.progress)
            .filter(|progress| (0.0..=100.0).contains(progress));
        if progress.is_none() {
            errors.insert("progress", "Progress must be between 0 and 100");
        }

        let (Some(start_at_ms), Some(end_at_ms), Some(progress)) = (start, end, progress) else {
            return Err(errors);
        };
        errors.into_result(MissionDraft {
            name: self.name.trim().to_owned(),
            mission_type: self.mission_type,
            status: self.status,
            priority: self.priority,
            start_at_ms,
            end_at_ms,
            assigned_units,
            progress,
            description: self.description.trim().to_owned(),
        })
    }
}
