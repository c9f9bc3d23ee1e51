use hub_config::HubConfig;
use hub_observability::{init, log_shutdown, log_startup, ObservabilityConfig};
use hub_runtime::{monitor, HubSession, Notices};
use hub_sim::TickerConfig;
use hub_store::{seed_state, Store};

#[tokio::main]
async fn main() {
    let config = HubConfig::from_env("hub-runtime");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);
    log_startup(&handle, &obs_config.environment);

    let notices = Notices::new(config.notice_timeout());
    let store = Store::spawn(seed_state(), notices.sink());
    let session = HubSession::new(store.handle(), notices, &config);
    let monitor = tokio::spawn(monitor::run(session.store().subscribe()));

    let ticker = config.simulation_enabled.then(|| {
        hub_sim::spawn(
            store.handle(),
            TickerConfig::new(config.tick_interval(), config.sim_seed),
        )
    });

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c, shutting down");
    }

    if let Some(ticker) = ticker {
        ticker.shutdown().await;
    }
    drop(session);
    match store.shutdown().await {
        Ok(state) => tracing::info!(
            units = state.units.len(),
            missions = state.missions.len(),
            reports = state.intelligence.len(),
            "entity store drained"
        ),
        Err(err) => tracing::error!(error = %err, "entity store did not shut down cleanly"),
    }
    if let Err(err) = monitor.await {
        tracing::warn!(error = %err, "snapshot monitor failed");
    }

    log_shutdown(&handle);
}
