use hub_core::{
    Domain, EpochMillis, EquipmentStatus, Personnel, Position, Unit, UnitDraft, UnitStatus,
    UnitType,
};
use serde::{Deserialize, Serialize};

use crate::fields::{
    check_latitude, check_longitude, parse_count, parse_number, require_text, FieldErrors,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitForm {
    pub callsign: String,
    pub unit_name: String,
    pub unit_type: UnitType,
    pub domain: Domain,
    pub status: UnitStatus,
    pub equipment_status: EquipmentStatus,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub heading: String,
    pub speed: String,
    pub current_personnel: String,
    pub max_personnel: String,
}

impl Default for UnitForm {
    fn default() -> Self {
        Self {
            callsign: String::new(),
            unit_name: String::new(),
            unit_type: UnitType::default(),
            domain: Domain::Land,
            status: UnitStatus::Operational,
            equipment_status: EquipmentStatus::default(),
            latitude: "0".into(),
            longitude: "0".into(),
            altitude: "0".into(),
            heading: "0".into(),
            speed: "0".into(),
            current_personnel: "1".into(),
            max_personnel: "1".into(),
        }
    }
}

impl UnitForm {
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            callsign: unit.callsign.clone(),
            unit_name: unit.unit_name.clone(),
            unit_type: unit.unit_type,
            domain: unit.domain,
            status: unit.status,
            equipment_status: unit.equipment_status,
            latitude: unit.position.latitude.to_string(),
            longitude: unit.position.longitude.to_string(),
            altitude: unit.position.altitude_m.to_string(),
            heading: unit.heading_deg.to_string(),
            speed: unit.speed.to_string(),
            current_personnel: unit.personnel.current.to_string(),
            max_personnel: unit.personnel.max.to_string(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        match self.build(0) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        }
    }

    /// Validates and converts the inputs. `reported_at_ms` becomes the
    /// unit's last report time.
    pub fn build(&self, reported_at_ms: EpochMillis) -> Result<UnitDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "callsign", &self.callsign, "Callsign is required");
        require_text(&mut errors, "unit_name", &self.unit_name, "Unit name is required");

        let latitude = check_latitude(&mut errors, "latitude", &self.latitude);
        let longitude = check_longitude(&mut errors, "longitude", &self.longitude);
        let altitude = parse_number(&mut errors, "altitude", "Altitude", &self.altitude);

        let heading = parse_number(&mut errors, "heading", "Heading", &self.heading)
            .filter(|heading| (0.0..360.0).contains(heading));
        if heading.is_none() && !errors.contains("heading") {
            errors.insert("heading", "Heading must be between 0 and 359 degrees");
        }

        let speed = parse_number(&mut errors, "speed", "Speed", &self.speed);
        if speed.is_some_and(|speed| speed < 0.0) {
            errors.insert("speed", "Speed cannot be negative");
        }

        let max = parse_count(&mut errors, "max_personnel", "Max personnel", &self.max_personnel);
        if max == Some(0) {
            errors.insert("max_personnel", "Max personnel must be at least 1");
        }
        let current = parse_count(
            &mut errors,
            "current_personnel",
            "Current personnel",
            &self.current_personnel,
        );
        if let (Some(current), Some(max)) = (current, max) {
            if current > max {
                errors.insert(
                    "current_personnel",
                    "Current personnel cannot exceed max personnel",
                );
            }
        }

        let (
            Some(latitude),
            Some(longitude),
            Some(altitude_m),
            Some(heading_deg),
            Some(speed),
            Some(current),
            Some(max),
        ) = (latitude, longitude, altitude, heading, speed, current, max)
        else {
            return Err(errors);
        };

        errors.into_result(UnitDraft {
            callsign: self.callsign.trim().to_owned(),
            unit_name: self.unit_name.trim().to_owned(),
            unit_type: self.unit_type,
            domain: self.domain,
            status: self.status,
            position: Position {
                latitude,
                longitude,
                altitude_m,
            },
            heading_deg,
            speed,
            personnel: Personnel { current, max },
            equipment_status: self.equipment_status,
            last_report_at_ms: reported_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UnitForm {
        UnitForm {
            callsign: " DELTA-2 ".into(),
            unit_name: "Delta Recon Team".into(),
            latitude: "34.05".into(),
            longitude: "-118.24".into(),
            altitude: "120".into(),
            heading: "359.5".into(),
            speed: "12".into(),
            current_personnel: "8".into(),
            max_personnel: "10".into(),
            ..UnitForm::default()
        }
    }

    #[test]
    fn builds_a_trimmed_draft() {
        let draft = filled().build(1_000).unwrap();
        assert_eq!(draft.callsign, "DELTA-2");
        assert_eq!(draft.position.latitude, 34.05);
        assert_eq!(draft.heading_deg, 359.5);
        assert_eq!(draft.personnel, Personnel { current: 8, max: 10 });
        assert_eq!(draft.last_report_at_ms, 1_000);
    }

    #[test]
    fn blank_form_needs_identity() {
        let errors = UnitForm::default().validate();
        assert_eq!(errors.get("callsign"), Some("Callsign is required"));
        assert_eq!(errors.get("unit_name"), Some("Unit name is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn range_violations_are_reported_per_field() {
        let form = UnitForm {
            latitude: "91".into(),
            longitude: "-180.5".into(),
            heading: "360".into(),
            speed: "-1".into(),
            current_personnel: "11".into(),
            ..filled()
        };
        let errors = form.validate();
        assert_eq!(errors.get("latitude"), Some("Latitude must be between -90 and 90"));
        assert_eq!(errors.get("longitude"), Some("Longitude must be between -180 and 180"));
        assert_eq!(errors.get("heading"), Some("Heading must be between 0 and 359 degrees"));
        assert_eq!(errors.get("speed"), Some("Speed cannot be negative"));
        assert_eq!(
            errors.get("current_personnel"),
            Some("Current personnel cannot exceed max personnel")
        );
    }

    #[test]
    fn personnel_counts_must_be_whole_and_positive() {
        let zero = UnitForm {
            max_personnel: "0".into(),
            current_personnel: "0".into(),
            ..filled()
        };
        assert_eq!(
            zero.validate().get("max_personnel"),
            Some("Max personnel must be at least 1")
        );

        let negative = UnitForm {
            current_personnel: "-3".into(),
            ..filled()
        };
        assert_eq!(
            negative.validate().get("current_personnel"),
            Some("Current personnel must be a whole number")
        );
    }

    #[test]
    fn edit_prefill_round_trips() {
        let draft = filled().build(5).unwrap();
        let unit = draft.clone().into_unit(hub_core::UnitId::from_raw(9));
        assert_eq!(UnitForm::from_unit(&unit).build(5).unwrap(), draft);
    }
}
