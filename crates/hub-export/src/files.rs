use chrono::{NaiveDate, Utc};
use hub_core::Unit;
use hub_notify::{Notice, NotificationSink};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::settings::Settings;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn settings_file_name(date: NaiveDate) -> String {
    format!("tactical_hub_settings_{}.json", date.format("%Y-%m-%d"))
}

pub fn units_file_name(date: NaiveDate) -> String {
    format!("units_export_{}.json", date.format("%Y-%m-%d"))
}

pub fn write_settings(settings: &Settings, dir: &Path, date: NaiveDate) -> ExportResult<PathBuf> {
    let path = dir.join(settings_file_name(date));
    write_json(&path, settings)?;
    Ok(path)
}

/// Missing keys fall back to their defaults and unknown keys are ignored,
/// but the file itself must hold a JSON object.
pub fn read_settings(path: &Path) -> ExportResult<Settings> {
    let object: serde_json::Map<String, serde_json::Value> = read_json(path)?;
    Ok(serde_json::from_value(serde_json::Value::Object(object))?)
}

/// Writes the given units, typically the currently filtered list. Export is
/// one-way; there is no unit import.
pub fn export_units(
    units: &[&Unit],
    dir: &Path,
    date: NaiveDate,
    sink: &dyn NotificationSink,
) -> ExportResult<PathBuf> {
    let path = dir.join(units_file_name(date));
    match write_json(&path, &units) {
        Ok(()) => {
            tracing::info!(path = %path.display(), units = units.len(), "units exported");
            sink.notify(Notice::success("Units data exported successfully"));
            Ok(path)
        }
        Err(err) => {
            tracing::warn!(error = %err, "unit export failed");
            sink.notify(Notice::error(format!("Failed to export units: {err}")));
            Err(err)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ExportResult<()> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    fs::write(path, body).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ExportResult<T> {
    let body = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::{
        Domain, EquipmentStatus, Personnel, Position, UnitId, UnitStatus, UnitType,
    };
    use hub_notify::{NoticeBoard, Severity};
    use std::time::Duration;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
    }

    fn unit(id: u64, callsign: &str) -> Unit {
        Unit {
            id: UnitId::from_raw(id),
            callsign: callsign.to_string(),
            unit_name: format!("{callsign} team"),
            unit_type: UnitType::SpecialForces,
            domain: Domain::Land,
            status: UnitStatus::Operational,
            position: Position {
                latitude: 1.0,
                longitude: 2.0,
                altitude_m: 3.0,
            },
            heading_deg: 90.0,
            speed: 4.5,
            personnel: Personnel { current: 4, max: 6 },
            equipment_status: EquipmentStatus::Partial,
            last_report_at_ms: 1_737_964_800_000,
        }
    }

    #[test]
    fn file_names_carry_the_date() {
        assert_eq!(settings_file_name(date()), "tactical_hub_settings_2025-01-27.json");
        assert_eq!(units_file_name(date()), "units_export_2025-01-27.json");
    }

    #[test]
    fn exports_only_the_given_units() {
        let dir = tempfile::tempdir().unwrap();
        let board = NoticeBoard::new(Duration::from_secs(60));
        let first = unit(1, "ALPHA-6");
        let second = unit(2, "BRAVO-7");

        let path = export_units(&[&second], dir.path(), date(), &board).unwrap();
        assert_eq!(path, dir.path().join("units_export_2025-01-27.json"));

        let written: Vec<Unit> = read_json(&path).unwrap();
        assert_eq!(written, vec![second]);
        assert_ne!(written[0], first);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Special Forces\""));
        assert!(raw.contains("\"OPERATIONAL\""));

        let notices = board.active(0);
        assert_eq!(notices[0].severity, Severity::Success);
        assert_eq!(notices[0].message, "Units data exported successfully");
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let board = NoticeBoard::new(Duration::from_secs(60));
        let missing = dir.path().join("nope");

        let err = export_units(&[], &missing, date(), &board).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert_eq!(board.active(0)[0].severity, Severity::Error);
    }
}
