use hub_query::DashboardStats;
use hub_store::State;
use std::sync::Arc;
use tokio::sync::watch;

pub async fn run(mut snapshots: watch::Receiver<Arc<State>>) -> Option<DashboardStats> {
    let mut last = None;
    while snapshots.changed().await.is_ok() {
        let stats = DashboardStats::from_state(&snapshots.borrow_and_update());
        if last.as_ref() != Some(&stats) {
            tracing::debug!(
                operational_units = stats.operational_units,
                active_missions = stats.active_missions,
                high_severity_reports = stats.high_severity_reports,
                total_personnel = stats.total_personnel,
                mean_mission_progress = stats.mean_mission_progress,
                "dashboard updated"
            );
        }
        last = Some(stats);
    }
    last
}
