use hub_core::{now_epoch_millis, AlertId, EpochMillis, MissionId, ReportId, UnitId};
use hub_notify::Severity;

use crate::action::{Action, SimulationTick};
use crate::state::State;

pub const MAX_PROGRESS: f64 = 100.0;
const FULL_TURN_DEG: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceContext {
    pub now_ms: EpochMillis,
}

impl ReduceContext {
    pub fn at(now_ms: EpochMillis) -> Self {
        Self { now_ms }
    }

    pub fn now() -> Self {
        Self::at(now_epoch_millis())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub severity: Severity,
    pub message: String,
}

impl Summary {
    fn success(message: String) -> Self {
        Self {
            severity: Severity::Success,
            message,
        }
    }
}

/// Result of reducing one action. `next` is `None` when the action changed
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub next: Option<State>,
    pub summary: Option<Summary>,
}

impl Outcome {
    fn unchanged() -> Self {
        Self {
            next: None,
            summary: None,
        }
    }

    fn quiet(next: State) -> Self {
        Self {
            next: Some(next),
            summary: None,
        }
    }

    fn announced(next: State, summary: Summary) -> Self {
        Self {
            next: Some(next),
            summary: Some(summary),
        }
    }
}

/// Applies `action` and returns the next snapshot, or a clone of `state` for
/// no-op actions.
pub fn apply(state: &State, action: Action, ctx: &ReduceContext) -> State {
    reduce(state, action, ctx)
        .next
        .unwrap_or_else(|| state.clone())
}

pub fn reduce(state: &State, action: Action, ctx: &ReduceContext) -> Outcome {
    match action {
        Action::CreateUnit(draft) => {
            let mut next = state.clone();
            let id = UnitId::from_raw(next.ids.next(ctx.now_ms));
            let message = format!("Unit {} added successfully", draft.callsign);
            next.units.push(draft.into_unit(id));
            Outcome::announced(next, Summary::success(message))
        }
        Action::UpdateUnit { id, patch } => {
            let Some(index) = state.units.iter().position(|unit| unit.id == id) else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let unit = &mut next.units[index];
            patch.apply_to(unit);
            let message = format!("Unit {} updated", unit.callsign);
            Outcome::announced(next, Summary::success(message))
        }
        Action::DeleteUnit(id) => {
            let Some(index) = state.units.iter().position(|unit| unit.id == id) else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let removed = next.units.remove(index);
            let message = format!("Unit {} removed", removed.callsign);
            Outcome::announced(next, Summary::success(message))
        }
        Action::CreateMission(draft) => {
            let mut next = state.clone();
            let id = MissionId::from_raw(next.ids.next(ctx.now_ms));
            let message = format!("Mission \"{}\" created", draft.name);
            next.missions.push(draft.into_mission(id));
            Outcome::announced(next, Summary::success(message))
        }
        Action::UpdateMission { id, patch } => {
            let Some(index) = state.missions.iter().position(|mission| mission.id == id) else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let mission = &mut next.missions[index];
            patch.apply_to(mission);
            let message = format!("Mission \"{}\" updated", mission.name);
            Outcome::announced(next, Summary::success(message))
        }
        Action::DeleteMission(id) => {
            let Some(index) = state.missions.iter().position(|mission| mission.id == id) else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let removed = next.missions.remove(index);
            let message = format!("Mission \"{}\" deleted", removed.name);
            Outcome::announced(next, Summary::success(message))
        }
        Action::CreateReport(draft) => {
            let mut next = state.clone();
            let id = ReportId::from_raw(next.ids.next(ctx.now_ms));
            let message = format!("Intelligence report \"{}\" added", draft.title);
            next.intelligence.insert(0, draft.into_report(id, ctx.now_ms));
            Outcome::announced(next, Summary::success(message))
        }
        Action::UpdateReport { id, patch } => {
            let Some(index) = state.intelligence.iter().position(|report| report.id == id)
            else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let report = &mut next.intelligence[index];
            patch.apply_to(report);
            let message = format!("Intelligence report \"{}\" updated", report.title);
            Outcome::announced(next, Summary::success(message))
        }
        Action::DeleteReport(id) => {
            let Some(index) = state.intelligence.iter().position(|report| report.id == id)
            else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let removed = next.intelligence.remove(index);
            let message = format!("Intelligence report \"{}\" deleted", removed.title);
            Outcome::announced(next, Summary::success(message))
        }
        Action::ToggleReportVerified(id) => {
            let Some(index) = state.intelligence.iter().position(|report| report.id == id)
            else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            let report = &mut next.intelligence[index];
            report.verified = !report.verified;
            let verdict = if report.verified {
                "verified"
            } else {
                "unverified"
            };
            let message = format!("Intelligence report \"{}\" marked {verdict}", report.title);
            Outcome::announced(next, Summary::success(message))
        }
        Action::SetLoading(loading) => {
            if state.loading == loading {
                return Outcome::unchanged();
            }
            let mut next = state.clone();
            next.loading = loading;
            Outcome::quiet(next)
        }
        Action::SetError(error) => {
            let mut next = state.clone();
            next.error = error;
            next.loading = false;
            Outcome::quiet(next)
        }
        Action::AddAlert { message } => {
            let mut next = state.clone();
            let id = AlertId::from_raw(next.ids.next(ctx.now_ms));
            next.alerts.insert(
                0,
                hub_core::Alert {
                    id,
                    message: message.clone(),
                    timestamp_ms: ctx.now_ms,
                },
            );
            Outcome::announced(
                next,
                Summary {
                    severity: Severity::Error,
                    message,
                },
            )
        }
        Action::RemoveAlert(id) => {
            let Some(index) = state.alerts.iter().position(|alert| alert.id == id) else {
                return Outcome::unchanged();
            };
            let mut next = state.clone();
            next.alerts.remove(index);
            Outcome::quiet(next)
        }
        Action::SimulationTick(tick) => Outcome::quiet(apply_tick(state, &tick)),
    }
}

fn apply_tick(state: &State, tick: &SimulationTick) -> State {
    let mut next = state.clone();
    for drift in &tick.units {
        let Some(unit) = next.units.iter_mut().find(|unit| unit.id == drift.id) else {
            continue;
        };
        unit.speed = (unit.speed + finite_or_zero(drift.speed_delta)).max(0.0);
        unit.heading_deg = wrap_heading(unit.heading_deg + finite_or_zero(drift.heading_delta));
        unit.last_report_at_ms = tick.issued_at_ms;
    }
    for advance in &tick.missions {
        let Some(mission) = next
            .missions
            .iter_mut()
            .find(|mission| mission.id == advance.id)
        else {
            continue;
        };
        mission.progress =
            (mission.progress + finite_or_zero(advance.progress_delta)).clamp(0.0, MAX_PROGRESS);
    }
    next
}

/// Wraps any heading into `[0, 360)`.
pub fn wrap_heading(heading_deg: f64) -> f64 {
    let wrapped = heading_deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if wrapped >= FULL_TURN_DEG || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
