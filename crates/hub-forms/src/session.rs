use hub_core::{now_epoch_millis, MissionId, ReportId, UnitId};
use hub_store::{Action, StoreHandle};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::fields::FieldErrors;
use crate::intel::IntelligenceForm;
use crate::mission::MissionForm;
use crate::unit::UnitForm;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Pending,
    Failed(FieldErrors),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error("a submission is already pending")]
    Busy,
}

/// One open form view. Submissions wait `delay` before committing to the
/// store; if the view is gone by then the commit still lands but the
/// status update is dropped.
#[derive(Debug)]
pub struct FormSession {
    store: StoreHandle,
    delay: Duration,
    status_tx: watch::Sender<FormStatus>,
    status_rx: watch::Receiver<FormStatus>,
}

#[must_use = "dropping a PendingSubmit detaches it; the commit still happens"]
#[derive(Debug)]
pub struct PendingSubmit {
    task: JoinHandle<bool>,
    status: watch::Sender<FormStatus>,
}

impl FormSession {
    pub fn new(store: StoreHandle, delay: Duration) -> Self {
        let (status_tx, status_rx) = watch::channel(FormStatus::Idle);
        Self {
            store,
            delay,
            status_tx,
            status_rx,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<FormStatus> {
        self.status_rx.clone()
    }

    /// Creates a unit, or updates `editing` with every field of the form.
    pub fn submit_unit(
        &self,
        form: &UnitForm,
        editing: Option<UnitId>,
    ) -> Result<PendingSubmit, SubmitError> {
        self.ensure_idle()?;
        let draft = self.checked(form.build(now_epoch_millis()))?;
        let action = match editing {
            Some(id) => Action::UpdateUnit {
                id,
                patch: draft.into(),
            },
            None => Action::CreateUnit(draft),
        };
        Ok(self.submit(action))
    }

    /// Assigned units are checked against the current snapshot. When
    /// editing, units the mission already references are also accepted.
    pub fn submit_mission(
        &self,
        form: &MissionForm,
        editing: Option<MissionId>,
    ) -> Result<PendingSubmit, SubmitError> {
        self.ensure_idle()?;
        let snapshot = self.store.snapshot();
        let mut known = snapshot.unit_ids();
        if let Some(mission) = editing.and_then(|id| snapshot.mission(id)) {
            known.extend(mission.assigned_units.iter().copied());
        }
        let draft = self.checked(form.build(&known))?;
        let action = match editing {
            Some(id) => Action::UpdateMission {
                id,
                patch: draft.into(),
            },
            None => Action::CreateMission(draft),
        };
        Ok(self.submit(action))
    }

    pub fn submit_report(
        &self,
        form: &IntelligenceForm,
        editing: Option<ReportId>,
    ) -> Result<PendingSubmit, SubmitError> {
        self.ensure_idle()?;
        let draft = self.checked(form.build())?;
        let action = match editing {
            Some(id) => Action::UpdateReport {
                id,
                patch: draft.into(),
            },
            None => Action::CreateReport(draft),
        };
        Ok(self.submit(action))
    }

    fn ensure_idle(&self) -> Result<(), SubmitError> {
        match *self.status_rx.borrow() {
            FormStatus::Pending => Err(SubmitError::Busy),
            _ => Ok(()),
        }
    }

    fn checked<T>(&self, built: Result<T, FieldErrors>) -> Result<T, SubmitError> {
        built.map_err(|errors| {
            self.status_tx.send_replace(FormStatus::Failed(errors.clone()));
            SubmitError::Invalid(errors)
        })
    }

    fn submit(&self, action: Action) -> PendingSubmit {
        self.status_tx.send_replace(FormStatus::Pending);
        let status = self.status_tx.clone();
        let store = self.store.clone();
        let delay = self.delay;
        let kind = action.kind();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = store.dispatch(action);
            let next = match &outcome {
                Ok(()) => FormStatus::Idle,
                Err(err) => {
                    tracing::warn!(action = kind, error = %err, "form submission rejected");
                    let mut errors = FieldErrors::new();
                    errors.insert("form", err.message.clone());
                    FormStatus::Failed(errors)
                }
            };
            if status.send(next).is_err() {
                tracing::debug!(action = kind, "form view closed before submission finished");
            }
            outcome.is_ok()
        });

        PendingSubmit {
            task,
            status: self.status_tx.clone(),
        }
    }
}

impl PendingSubmit {
    pub fn cancel(self) {
        self.task.abort();
        self.status.send_if_modified(|status| {
            if *status == FormStatus::Pending {
                *status = FormStatus::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Waits for the delayed commit. `true` when the store accepted it.
    pub async fn committed(self) -> bool {
        self.task.await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_notify::TracingSink;
    use hub_store::{seed_state, Store};
    use std::sync::Arc;

    const DELAY: Duration = Duration::from_millis(1_000);

    fn unit_form() -> UnitForm {
        UnitForm {
            callsign: "DELTA-2".into(),
            unit_name: "Delta Recon Team".into(),
            ..UnitForm::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn submission_moves_through_pending_to_idle() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let session = FormSession::new(store.handle(), DELAY);
        assert_eq!(session.status(), FormStatus::Idle);

        let pending = session.submit_unit(&unit_form(), None).unwrap();
        assert_eq!(session.status(), FormStatus::Pending);
        assert_eq!(
            session.submit_unit(&unit_form(), None).unwrap_err(),
            SubmitError::Busy
        );

        assert!(pending.committed().await);
        assert_eq!(session.status(), FormStatus::Idle);

        let mut snapshots = store.handle().subscribe();
        snapshots
            .wait_for(|state| state.units.len() == 4)
            .await
            .unwrap();
        let state = store.shutdown().await.unwrap();
        assert_eq!(state.units[3].callsign, "DELTA-2");
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_fails_without_dispatching() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let session = FormSession::new(store.handle(), DELAY);

        let err = session
            .submit_unit(&UnitForm::default(), None)
            .unwrap_err();
        let SubmitError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.contains("callsign"));
        assert_eq!(session.status(), FormStatus::Failed(errors));

        let state = store.shutdown().await.unwrap();
        assert_eq!(state.units.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_view_still_commits() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let session = FormSession::new(store.handle(), DELAY);
        let pending = session.submit_unit(&unit_form(), None).unwrap();
        drop(session);

        assert!(pending.committed().await);
        let mut snapshots = store.handle().subscribe();
        snapshots
            .wait_for(|state| state.units.len() == 4)
            .await
            .unwrap();
        store.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_delay_skips_the_commit() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let session = FormSession::new(store.handle(), DELAY);
        let pending = session.submit_unit(&unit_form(), None).unwrap();

        pending.cancel();
        assert_eq!(session.status(), FormStatus::Idle);
        tokio::time::sleep(DELAY * 2).await;

        let state = store.shutdown().await.unwrap();
        assert_eq!(state.units.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn editing_a_mission_keeps_existing_assignments() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let handle = store.handle();
        let mission = handle.snapshot().missions[0].clone();
        let session = FormSession::new(handle.clone(), DELAY);

        let mut form = MissionForm::from_mission(&mission);
        form.progress = "80".into();
        let pending = session.submit_mission(&form, Some(mission.id)).unwrap();
        assert!(pending.committed().await);

        let mut snapshots = handle.subscribe();
        let state = snapshots
            .wait_for(|state| state.missions[0].progress == 80.0)
            .await
            .unwrap()
            .clone();
        assert_eq!(state.missions[0].assigned_units, mission.assigned_units);
        drop(snapshots);
        store.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn closed_store_reports_a_form_error() {
        let store = Store::spawn(seed_state(), Arc::new(TracingSink));
        let session = FormSession::new(store.handle(), DELAY);
        store.shutdown().await.unwrap();

        let pending = session.submit_report(
            &IntelligenceForm {
                title: "Checkpoint".into(),
                description: "Observed".into(),
                ..IntelligenceForm::default()
            },
            None,
        );
        assert!(!pending.unwrap().committed().await);
        assert!(matches!(session.status(), FormStatus::Failed(errors) if errors.contains("form")));
    }
}
