use hub_core::{now_epoch_millis, EpochMillis};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeId(Uuid);

impl NoticeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub severity: Severity,
    pub issued_at_ms: EpochMillis,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: NoticeId::new(),
            message: message.into(),
            severity,
            issued_at_ms: now_epoch_millis(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn issued_at(mut self, issued_at_ms: EpochMillis) -> Self {
        self.issued_at_ms = issued_at_ms;
        self
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<S> NotificationSink for Arc<S>
where
    S: NotificationSink + ?Sized,
{
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Error => tracing::warn!(notice_id = %notice.id, "{}", notice.message),
            Severity::Info | Severity::Success => tracing::info!(
                notice_id = %notice.id,
                severity = notice.severity.as_str(),
                "{}",
                notice.message
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<Notice>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl NotificationSink for BroadcastSink {
    fn notify(&self, notice: Notice) {
        // No subscribers just means nobody is looking.
        let _ = self.sender.send(notice);
    }
}

#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl NotificationSink for FanoutSink {
    fn notify(&self, notice: Notice) {
        for sink in &self.sinks {
            sink.notify(notice.clone());
        }
    }
}

/// Active notices, newest first, dismissed once older than the timeout.
///
/// Expiry is judged against the latest instant the board has seen: the
/// newest notice it was handed or the last `active` call.
#[derive(Debug)]
pub struct NoticeBoard {
    timeout_ms: u64,
    inner: Mutex<Board>,
}

#[derive(Debug, Default)]
struct Board {
    notices: VecDeque<Notice>,
    observed_ms: EpochMillis,
}

impl Board {
    fn advance(&mut self, now_ms: EpochMillis, timeout_ms: u64) {
        self.observed_ms = self.observed_ms.max(now_ms);
        let observed_ms = self.observed_ms;
        self.notices.retain(|notice| !is_expired(notice, timeout_ms, observed_ms));
    }
}

impl NoticeBoard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            inner: Mutex::new(Board::default()),
        }
    }

    pub fn active(&self, now_ms: EpochMillis) -> Vec<Notice> {
        let mut board = self.lock();
        board.advance(now_ms, self.timeout_ms);
        board.notices.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: NoticeId) -> bool {
        let mut board = self.lock();
        let before = board.notices.len();
        board.notices.retain(|notice| notice.id != id);
        board.notices.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().notices.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for NoticeBoard {
    fn notify(&self, notice: Notice) {
        let mut board = self.lock();
        let issued_at_ms = notice.issued_at_ms;
        board.notices.push_front(notice);
        board.advance(issued_at_ms, self.timeout_ms);
    }
}

fn is_expired(notice: &Notice, timeout_ms: u64, now_ms: EpochMillis) -> bool {
    notice.issued_at_ms.saturating_add(timeout_ms) <= now_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_dismisses_after_timeout() {
        let board = NoticeBoard::new(Duration::from_secs(5));
        board.notify(Notice::success("Unit ALPHA-6 updated").issued_at(1_000));
        board.notify(Notice::error("Connection degraded").issued_at(4_000));

        let active = board.active(5_999);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "Connection degraded");

        let active = board.active(6_000);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Error);

        assert!(board.active(9_000).is_empty());
        assert!(board.is_empty());
    }

    #[test]
    fn new_notices_push_out_expired_ones() {
        let board = NoticeBoard::new(Duration::from_millis(5));
        for issued_at in 0..10_000 {
            board.notify(Notice::info("Unit BRAVO-7 updated").issued_at(issued_at));
        }
        assert_eq!(board.len(), 5);

        board.notify(Notice::success("Unit CHARLIE-1 added successfully").issued_at(1_000_000));
        assert_eq!(board.len(), 1);
        assert!(!board.is_empty());
        assert_eq!(board.active(1_000_004)[0].message, "Unit CHARLIE-1 added successfully");
        assert!(board.active(1_000_005).is_empty());
        assert!(board.is_empty());
    }

    #[test]
    fn late_stale_notice_is_not_kept() {
        let board = NoticeBoard::new(Duration::from_secs(5));
        board.notify(Notice::info("Settings saved successfully").issued_at(60_000));
        board.notify(Notice::info("Weather Alert").issued_at(1_000));
        assert_eq!(board.len(), 1);
        assert_eq!(board.active(0)[0].message, "Settings saved successfully");
    }

    #[test]
    fn board_dismiss_by_id() {
        let board = NoticeBoard::new(Duration::from_secs(5));
        let notice = Notice::info("Settings saved successfully");
        let id = notice.id;
        board.notify(notice);
        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert_eq!(board.len(), 0);
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_is_silent() {
        let sink = BroadcastSink::new(8);
        sink.notify(Notice::info("nobody listening"));

        let mut receiver = sink.subscribe();
        sink.notify(Notice::success("Intelligence report added"));
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.message, "Intelligence report added");
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let first = Arc::new(NoticeBoard::new(Duration::from_secs(60)));
        let second = Arc::new(NoticeBoard::new(Duration::from_secs(60)));
        let fanout = FanoutSink::new()
            .with(first.clone())
            .with(second.clone())
            .with(Arc::new(TracingSink));
        fanout.notify(Notice::success("Mission \"Checkpoint Alpha\" updated"));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }
}
