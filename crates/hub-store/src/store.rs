use hub_core::{ErrorCode, HubError, HubResult};
use hub_notify::{Notice, NotificationSink};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::action::Action;
use crate::confirm::{DeleteTarget, PendingDeletion};
use crate::reducer::{reduce, ReduceContext};
use crate::state::State;

/// Owns the reducer task. Views talk to it through [`StoreHandle`].
pub struct Store {
    handle: StoreHandle,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Arc<State>>,
}

#[derive(Debug, Clone)]
pub struct StoreHandle {
    actions: mpsc::UnboundedSender<Action>,
    snapshots: watch::Receiver<Arc<State>>,
}

impl Store {
    pub fn spawn(initial: State, sink: Arc<dyn NotificationSink>) -> Self {
        let initial = Arc::new(initial);
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(initial.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        record_sizes(&initial);
        let task = tokio::spawn(run(initial, actions_rx, shutdown_rx, snapshots_tx, sink));

        Self {
            handle: StoreHandle {
                actions: actions_tx,
                snapshots: snapshots_rx,
            },
            shutdown: shutdown_tx,
            task,
        }
    }

    pub fn handle(&self) -> StoreHandle {
        self.handle.clone()
    }

    /// Stops accepting actions, reduces whatever is already queued and
    /// returns the final snapshot.
    pub async fn shutdown(self) -> HubResult<Arc<State>> {
        let _ = self.shutdown.send(());
        self.task
            .await
            .map_err(|err| HubError::new(ErrorCode::Internal, format!("store task failed: {err}")))
    }
}

impl StoreHandle {
    pub fn dispatch(&self, action: Action) -> HubResult<()> {
        self.actions
            .send(action)
            .map_err(|_| HubError::unavailable("entity store is closed"))
    }

    pub fn snapshot(&self) -> Arc<State> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<State>> {
        self.snapshots.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.actions.is_closed()
    }

    pub async fn closed(&self) {
        self.actions.closed().await;
    }

    /// Destructive actions go through an explicit confirmation step.
    pub fn request_delete(&self, target: DeleteTarget) -> PendingDeletion {
        PendingDeletion::new(target, self.clone())
    }
}

async fn run(
    mut state: Arc<State>,
    mut actions: mpsc::UnboundedReceiver<Action>,
    mut shutdown: oneshot::Receiver<()>,
    snapshots: watch::Sender<Arc<State>>,
    sink: Arc<dyn NotificationSink>,
) -> Arc<State> {
    loop {
        tokio::select! {
            biased;
            action = actions.recv() => match action {
                Some(action) => state = step(state, action, &snapshots, sink.as_ref()),
                None => break,
            },
            _ = &mut shutdown => {
                actions.close();
                while let Some(action) = actions.recv().await {
                    state = step(state, action, &snapshots, sink.as_ref());
                }
                break;
            }
        }
    }
    tracing::debug!(
        units = state.units.len(),
        missions = state.missions.len(),
        reports = state.intelligence.len(),
        "entity store closed"
    );
    state
}

fn step(
    state: Arc<State>,
    action: Action,
    snapshots: &watch::Sender<Arc<State>>,
    sink: &dyn NotificationSink,
) -> Arc<State> {
    let kind = action.kind();
    metrics::counter!("hub_store_actions_total", "kind" => kind).increment(1);

    let outcome = reduce(&state, action, &ReduceContext::now());
    let changed = outcome.next.is_some();
    let state = match outcome.next {
        Some(next) => {
            let next = Arc::new(next);
            record_sizes(&next);
            snapshots.send_replace(next.clone());
            next
        }
        None => state,
    };
    tracing::debug!(kind, changed, "action reduced");

    if let Some(summary) = outcome.summary {
        metrics::counter!("hub_store_notices_total", "severity" => summary.severity.as_str())
            .increment(1);
        sink.notify(Notice::new(summary.severity, summary.message));
    }
    state
}

fn record_sizes(state: &State) {
    metrics::gauge!("hub_store_units").set(state.units.len() as f64);
    metrics::gauge!("hub_store_missions").set(state.missions.len() as f64);
    metrics::gauge!("hub_store_reports").set(state.intelligence.len() as f64);
}
