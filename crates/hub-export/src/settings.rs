use chrono::NaiveDate;
use hub_notify::{Notice, NotificationSink};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ExportResult;
use crate::files::{read_settings, write_settings};

pub const RESET_PROMPT: &str = "Are you sure you want to reset all settings to default values?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub system_name: String,
    pub time_zone: String,
    pub language: String,
    pub auto_refresh: bool,
    /// Seconds.
    pub refresh_interval: u32,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            system_name: "Tactical Command Hub".into(),
            time_zone: "UTC".into(),
            language: "English".into(),
            auto_refresh: true,
            refresh_interval: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub theme: String,
    pub animations: bool,
    pub compact_mode: bool,
    pub show_tooltips: bool,
    pub high_contrast: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
            animations: true,
            compact_mode: false,
            show_tooltips: true,
            high_contrast: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enable_notifications: bool,
    pub sound_alerts: bool,
    pub email_notifications: bool,
    pub high_priority_only: bool,
    /// Seconds a notice stays on screen.
    pub notification_timeout: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_notifications: true,
            sound_alerts: true,
            email_notifications: false,
            high_priority_only: false,
            notification_timeout: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    /// Minutes.
    pub session_timeout: u32,
    #[serde(rename = "requireMFA")]
    pub require_mfa: bool,
    pub password_complexity: String,
    pub login_attempts: u32,
    pub encrypt_data: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            session_timeout: 30,
            require_mfa: false,
            password_complexity: "high".into(),
            login_attempts: 3,
            encrypt_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupSettings {
    pub auto_backup: bool,
    /// Hours.
    pub backup_interval: u32,
    pub retention_days: u32,
    pub include_intelligence: bool,
    pub include_missions: bool,
    pub include_units: bool,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            auto_backup: true,
            backup_interval: 24,
            retention_days: 30,
            include_intelligence: true,
            include_missions: true,
            include_units: true,
        }
    }
}

/// Operator preferences. Stored and exported as a whole; nothing in the
/// entity store reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub display: DisplaySettings,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub backup: BackupSettings,
}

/// The settings page: current values plus the notices its actions raise.
pub struct SettingsState {
    current: Settings,
    sink: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for SettingsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsState")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SettingsState {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_settings(Settings::default(), sink)
    }

    pub fn with_settings(current: Settings, sink: Arc<dyn NotificationSink>) -> Self {
        Self { current, sink }
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    pub fn update(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.current);
    }

    pub fn save(&self) {
        tracing::info!(system = %self.current.general.system_name, "settings saved");
        self.sink.notify(Notice::success("Settings saved successfully"));
    }

    pub fn export(&self, dir: &Path, date: NaiveDate) -> ExportResult<PathBuf> {
        match write_settings(&self.current, dir, date) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "settings exported");
                self.sink.notify(Notice::success("Settings exported successfully"));
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(error = %err, "settings export failed");
                self.sink
                    .notify(Notice::error(format!("Failed to export settings: {err}")));
                Err(err)
            }
        }
    }

    /// Replaces the settings wholesale. A failed import leaves the current
    /// settings untouched.
    pub fn import(&mut self, path: &Path) -> ExportResult<()> {
        match read_settings(path) {
            Ok(settings) => {
                self.current = settings;
                tracing::info!(path = %path.display(), "settings imported");
                self.sink.notify(Notice::success("Settings imported successfully"));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "settings import rejected");
                self.sink
                    .notify(Notice::error("Failed to import settings: Invalid file format"));
                Err(err)
            }
        }
    }

    /// Resetting asks first; nothing changes until the returned handle is
    /// confirmed.
    pub fn request_reset(&mut self) -> PendingReset<'_> {
        PendingReset { state: self }
    }
}

#[must_use = "a reset only happens when confirmed"]
pub struct PendingReset<'a> {
    state: &'a mut SettingsState,
}

impl PendingReset<'_> {
    pub fn prompt(&self) -> &'static str {
        RESET_PROMPT
    }

    pub fn confirm(self) {
        self.state.current = Settings::default();
        self.state
            .sink
            .notify(Notice::success("Settings reset to defaults"));
    }

    pub fn cancel(self) {
        tracing::debug!("settings reset cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use hub_notify::{NoticeBoard, Severity};
    use std::fs;
    use std::time::Duration;

    fn state() -> (SettingsState, Arc<NoticeBoard>) {
        let board = Arc::new(NoticeBoard::new(Duration::from_secs(60)));
        (SettingsState::new(board.clone()), board)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
    }

    fn last_message(board: &NoticeBoard) -> (Severity, String) {
        let notice = board.active(0).remove(0);
        (notice.severity, notice.message)
    }

    #[test]
    fn export_then_import_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let (mut settings, board) = state();
        settings.update(|s| {
            s.display.theme = "light".into();
            s.security.require_mfa = true;
            s.backup.retention_days = 90;
        });
        let exported = settings.current().clone();

        let path = settings.export(dir.path(), date()).unwrap();
        assert_eq!(path.file_name().unwrap(), "tactical_hub_settings_2025-01-27.json");

        let (mut fresh, _) = state();
        fresh.import(&path).unwrap();
        assert_eq!(fresh.current(), &exported);
        assert_eq!(
            last_message(&board),
            (Severity::Success, "Settings exported successfully".to_string())
        );
    }

    #[test]
    fn wire_keys_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["general"]["systemName"], "Tactical Command Hub");
        assert_eq!(json["security"]["requireMFA"], false);
        assert_eq!(json["backup"]["includeIntelligence"], true);
        assert_eq!(json["notifications"]["notificationTimeout"], 5);
    }

    #[test]
    fn invalid_file_keeps_previous_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"general\": ").unwrap();

        let (mut settings, board) = state();
        settings.update(|s| s.general.language = "French".into());
        let before = settings.current().clone();

        let err = settings.import(&path).unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
        assert_eq!(settings.current(), &before);
        assert_eq!(
            last_message(&board),
            (
                Severity::Error,
                "Failed to import settings: Invalid file format".to_string()
            )
        );
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.json");
        fs::write(&path, "[{\"callsign\": \"ALPHA-6\"}]").unwrap();

        let (mut settings, _) = state();
        assert!(settings.import(&path).is_err());
        assert!(settings.import(&dir.path().join("missing.json")).is_err());
        assert_eq!(settings.current(), &Settings::default());
    }

    #[test]
    fn older_exports_fill_in_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tactical_hub_settings_2024-06-01.json");
        fs::write(
            &path,
            r#"{
                "general": { "systemName": "Forward Ops", "legacyMode": true },
                "security": { "sessionTimeout": 15 },
                "audit": { "retainLogs": true }
            }"#,
        )
        .unwrap();

        let (mut settings, board) = state();
        settings.import(&path).unwrap();

        let imported = settings.current();
        assert_eq!(imported.general.system_name, "Forward Ops");
        assert_eq!(imported.general.time_zone, "UTC");
        assert_eq!(imported.security.session_timeout, 15);
        assert_eq!(imported.security.login_attempts, 3);
        assert_eq!(imported.display, DisplaySettings::default());
        assert_eq!(imported.backup, BackupSettings::default());
        assert_eq!(
            last_message(&board),
            (Severity::Success, "Settings imported successfully".to_string())
        );
    }

    #[test]
    fn reset_needs_confirmation() {
        let (mut settings, board) = state();
        settings.update(|s| s.display.compact_mode = true);

        let pending = settings.request_reset();
        assert_eq!(pending.prompt(), RESET_PROMPT);
        pending.cancel();
        assert!(settings.current().display.compact_mode);

        settings.request_reset().confirm();
        assert_eq!(settings.current(), &Settings::default());
        assert_eq!(
            last_message(&board),
            (Severity::Success, "Settings reset to defaults".to_string())
        );
    }

    #[test]
    fn save_announces_success() {
        let (settings, board) = state();
        settings.save();
        assert_eq!(
            last_message(&board),
            (Severity::Success, "Settings saved successfully".to_string())
        );
    }
}
