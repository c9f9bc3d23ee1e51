use hub_config::HubConfig;
use hub_export::{export_units, today, ExportResult, SettingsState};
use hub_forms::FormSession;
use hub_notify::{BroadcastSink, FanoutSink, Notice, NoticeBoard, NotificationSink, TracingSink};
use hub_query::{DashboardStats, UnitFilter};
use hub_store::{DeleteTarget, PendingDeletion, StoreHandle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

pub const LIVE_NOTICE_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct Notices {
    board: Arc<NoticeBoard>,
    live: BroadcastSink,
    sink: Arc<dyn NotificationSink>,
}

impl Notices {
    pub fn new(timeout: Duration) -> Self {
        let board = Arc::new(NoticeBoard::new(timeout));
        let live = BroadcastSink::new(LIVE_NOTICE_CAPACITY);
        let sink: Arc<dyn NotificationSink> = Arc::new(
            FanoutSink::new()
                .with(Arc::new(TracingSink))
                .with(board.clone())
                .with(Arc::new(live.clone())),
        );
        Self { board, live, sink }
    }

    pub fn sink(&self) -> Arc<dyn NotificationSink> {
        self.sink.clone()
    }
}

pub struct HubSession {
    store: StoreHandle,
    notices: Notices,
    settings: SettingsState,
    submit_delay: Duration,
    export_dir: PathBuf,
}

impl HubSession {
    pub fn new(store: StoreHandle, notices: Notices, config: &HubConfig) -> Self {
        Self {
            store,
            settings: SettingsState::new(notices.sink()),
            notices,
            submit_delay: config.submit_delay(),
            export_dir: config.export_dir.clone(),
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_state(&self.store.snapshot())
    }

    pub fn open_form(&self) -> FormSession {
        FormSession::new(self.store.clone(), self.submit_delay)
    }

    pub fn request_delete(&self, target: DeleteTarget) -> PendingDeletion {
        self.store.request_delete(target)
    }

    pub fn active_notices(&self) -> Vec<Notice> {
        self.notices.board.active(hub_core::now_epoch_millis())
    }

    /// Live feed of every notice raised after subscribing.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.live.subscribe()
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsState {
        &mut self.settings
    }

    pub fn export_settings(&self) -> ExportResult<PathBuf> {
        self.settings.export(&self.export_dir, today())
    }

    pub fn export_units(&self, filter: &UnitFilter) -> ExportResult<PathBuf> {
        let snapshot = self.store.snapshot();
        let units = filter.apply(&snapshot.units);
        export_units(&units, &self.export_dir, today(), self.notices.sink.as_ref())
    }
}
