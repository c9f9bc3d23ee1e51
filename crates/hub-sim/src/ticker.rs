use hub_core::{now_epoch_millis, EpochMillis};
use hub_store::{Action, MissionAdvance, SimulationTick, State, StoreHandle, UnitDrift};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct TickerConfig {
    pub interval: Duration,
    /// Speed moves by up to this much either way per tick.
    pub speed_jitter: f64,
    /// Heading moves by up to this many degrees either way per tick.
    pub heading_jitter_deg: f64,
    /// Upper bound (exclusive) of the progress step per tick.
    pub progress_step: f64,
    /// Fixed seed for reproducible runs; entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            speed_jitter: 1.0,
            heading_jitter_deg: 5.0,
            progress_step: 2.0,
            seed: None,
        }
    }
}

impl TickerConfig {
    pub fn new(interval: Duration, seed: Option<u64>) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            seed,
            ..Self::default()
        }
    }
}

pub fn generate_tick<R: Rng + ?Sized>(
    state: &State,
    config: &TickerConfig,
    rng: &mut R,
    now_ms: EpochMillis,
) -> SimulationTick {
    let units = state
        .units
        .iter()
        .map(|unit| UnitDrift {
            id: unit.id,
            speed_delta: symmetric(rng, config.speed_jitter),
            heading_delta: symmetric(rng, config.heading_jitter_deg),
        })
        .collect();
    let missions = state
        .missions
        .iter()
        .map(|mission| MissionAdvance {
            id: mission.id,
            progress_delta: if config.progress_step > 0.0 {
                rng.gen_range(0.0..config.progress_step)
            } else {
                0.0
            },
        })
        .collect();
    SimulationTick {
        issued_at_ms: now_ms,
        units,
        missions,
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    if spread > 0.0 {
        rng.gen_range(-spread..=spread)
    } else {
        0.0
    }
}

#[derive(Debug)]
pub struct TickerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<u64>,
}

impl TickerHandle {
    pub async fn shutdown(self) -> u64 {
        let _ = self.shutdown.send(());
        wait(self.task).await
    }

    /// Waits for the ticker to stop on its own, which happens once the store
    /// closes.
    pub async fn stopped(self) -> u64 {
        let Self { shutdown, task } = self;
        let ticks = wait(task).await;
        drop(shutdown);
        ticks
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

async fn wait(task: JoinHandle<u64>) -> u64 {
    match task.await {
        Ok(ticks) => ticks,
        Err(err) => {
            tracing::warn!(error = %err, "simulation ticker task failed");
            0
        }
    }
}

/// Starts the ticker on the current runtime. The first tick fires one full
/// interval after spawning.
pub fn spawn(store: StoreHandle, config: TickerConfig) -> TickerHandle {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(run(store, config, shutdown_rx));
    TickerHandle {
        shutdown: shutdown_tx,
        task,
    }
}

async fn run(store: StoreHandle, config: TickerConfig, mut shutdown: oneshot::Receiver<()>) -> u64 {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let period = config.interval.max(Duration::from_millis(1));
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        interval_ms = period.as_millis() as u64,
        seeded = config.seed.is_some(),
        "simulation ticker started"
    );

    let mut ticks = 0u64;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = store.closed() => {
                tracing::debug!("entity store closed, ticker stopping");
                break;
            }
            _ = interval.tick() => {
                let tick = generate_tick(&store.snapshot(), &config, &mut rng, now_epoch_millis());
                let units = tick.units.len();
                let missions = tick.missions.len();
                if store.dispatch(Action::SimulationTick(tick)).is_err() {
                    break;
                }
                ticks += 1;
                metrics::counter!("hub_sim_ticks_total").increment(1);
                tracing::trace!(tick = ticks, units, missions, "simulation tick dispatched");
            }
        }
    }

    tracing::info!(ticks, "simulation ticker stopped");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_notify::TracingSink;
    use hub_store::{apply, seed_state, ReduceContext, Store};
    use std::sync::Arc;

    #[test]
    fn deltas_stay_within_configured_bounds() {
        let state = seed_state();
        let config = TickerConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let tick = generate_tick(&state, &config, &mut rng, 1);
            assert_eq!(tick.units.len(), state.units.len());
            assert_eq!(tick.missions.len(), state.missions.len());
            for drift in &tick.units {
                assert!((-1.0..=1.0).contains(&drift.speed_delta));
                assert!((-5.0..=5.0).contains(&drift.heading_delta));
            }
            for advance in &tick.missions {
                assert!((0.0..2.0).contains(&advance.progress_delta));
            }
        }
    }

    #[test]
    fn repeated_ticks_keep_telemetry_in_range() {
        let mut state = seed_state();
        let config = TickerConfig::default();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let ctx = ReduceContext::at(1);

        for step in 0..1_000u64 {
            let tick = generate_tick(&state, &config, &mut rng, step);
            state = apply(&state, Action::SimulationTick(tick), &ctx);
            for unit in &state.units {
                assert!(unit.speed >= 0.0);
                assert!((0.0..360.0).contains(&unit.heading_deg));
                assert_eq!(unit.last_report_at_ms, step);
            }
            for mission in &state.missions {
                assert!((0.0..=100.0).contains(&mission.progress));
            }
        }
        assert!(state.missions.iter().all(|mission| mission.progress == 100.0));
    }

    #[test]
    fn same_seed_same_drift() {
        let state = seed_state();
        let config = TickerConfig::default();
        let first = generate_tick(&state, &config, &mut StdRng::seed_from_u64(3), 9);
        let second = generate_tick(&state, &config, &mut StdRng::seed_from_u64(3), 9);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_spread_produces_no_drift() {
        let config = TickerConfig {
            speed_jitter: 0.0,
            heading_jitter_deg: 0.0,
            progress_step: 0.0,
            ..TickerConfig::default()
        };
        let tick = generate_tick(&seed_state(), &config, &mut StdRng::seed_from_u64(1), 0);
        assert!(tick.units.iter().all(|d| d.speed_delta == 0.0 && d.heading_delta == 0.0));
        assert!(tick.missions.iter().all(|m| m.progress_delta == 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn dispatches_once_per_interval_until_shutdown() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let ticker = spawn(
            store.handle(),
            TickerConfig::new(Duration::from_secs(5), Some(11)),
        );

        tokio::time::sleep(Duration::from_millis(16_000)).await;
        assert_eq!(ticker.shutdown().await, 3);

        let before = seed_state();
        let after = store.shutdown().await.unwrap();
        assert!(
            after
                .units
                .iter()
                .zip(&before.units)
                .any(|(now, then)| now.heading_deg != then.heading_deg)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_the_store_closes() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let ticker = spawn(store.handle(), TickerConfig::new(Duration::from_secs(5), Some(2)));

        store.shutdown().await.unwrap();
        assert_eq!(ticker.stopped().await, 0);
    }
}
