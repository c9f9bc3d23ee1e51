use hub_core::{HubResult, MissionId, ReportId, UnitId};

use crate::action::Action;
use crate::store::StoreHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Unit(UnitId),
    Mission(MissionId),
    Report(ReportId),
}

impl DeleteTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Unit(_) => "Are you sure you want to delete this unit?",
            Self::Mission(_) => "Are you sure you want to delete this mission?",
            Self::Report(_) => "Are you sure you want to delete this intelligence report?",
        }
    }

    fn into_action(self) -> Action {
        match self {
            Self::Unit(id) => Action::DeleteUnit(id),
            Self::Mission(id) => Action::DeleteMission(id),
            Self::Report(id) => Action::DeleteReport(id),
        }
    }
}

/// A delete that has been asked for but not yet confirmed. Nothing is
/// dispatched unless [`PendingDeletion::confirm`] is called.
#[must_use = "a deletion only happens once it is confirmed"]
#[derive(Debug)]
pub struct PendingDeletion {
    target: DeleteTarget,
    store: StoreHandle,
}

impl PendingDeletion {
    pub(crate) fn new(target: DeleteTarget, store: StoreHandle) -> Self {
        Self { target, store }
    }

    pub fn target(&self) -> DeleteTarget {
        self.target
    }

    pub fn prompt(&self) -> &'static str {
        self.target.prompt()
    }

    pub fn confirm(self) -> HubResult<()> {
        self.store.dispatch(self.target.into_action())
    }

    pub fn cancel(self) {
        tracing::debug!(delete_target = ?self.target, "deletion cancelled");
    }
}
