use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use hub_core::EpochMillis;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

pub(crate) fn require_text(errors: &mut FieldErrors, field: &'static str, raw: &str, message: &str) {
    if raw.trim().is_empty() {
        errors.insert(field, message);
    }
}

pub(crate) fn parse_number(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            errors.insert(field, format!("{label} must be a number"));
            None
        }
    }
}

pub(crate) fn parse_count(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.insert(field, format!("{label} must be a whole number"));
            None
        }
    }
}

pub(crate) fn check_latitude(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<f64> {
    let value = parse_number(errors, field, "Latitude", raw)?;
    if !(-90.0..=90.0).contains(&value) {
        errors.insert(field, "Latitude must be between -90 and 90");
        return None;
    }
    Some(value)
}

pub(crate) fn check_longitude(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
) -> Option<f64> {
    let value = parse_number(errors, field, "Longitude", raw)?;
    if !(-180.0..=180.0).contains(&value) {
        errors.insert(field, "Longitude must be between -180 and 180");
        return None;
    }
    Some(value)
}

/// Joins a `YYYY-MM-DD` date and an `HH:MM[:SS]` time, read as UTC.
pub fn compose_timestamp(date: &str, time: &str) -> Option<EpochMillis> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = time.trim();
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    let millis = NaiveDateTime::new(date, time).and_utc().timestamp_millis();
    EpochMillis::try_from(millis).ok()
}

pub fn split_timestamp(timestamp_ms: EpochMillis) -> (String, String) {
    let datetime = i64::try_from(timestamp_ms)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .unwrap_or_default();
    (
        datetime.format("%Y-%m-%d").to_string(),
        datetime.format("%H:%M:%S").to_string(),
    )
}
