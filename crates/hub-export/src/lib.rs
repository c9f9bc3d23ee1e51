pub mod error;
pub mod files;
pub mod settings;

pub use error::{ExportError, ExportResult};
pub use files::{
    export_units, read_settings, settings_file_name, today, units_file_name, write_settings,
};
pub use settings::{
    BackupSettings, DisplaySettings, GeneralSettings, NotificationSettings, PendingReset,
    SecuritySettings, Settings, SettingsState, RESET_PROMPT,
};
