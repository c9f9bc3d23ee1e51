use hub_core::{Mission, Unit, UnitId};

/// Callsign of the unit with `id`, or `Unit {id}` when it no longer exists.
/// Deleting a unit does not cascade into missions, so dangling ids are
/// expected here.
pub fn unit_label(units: &[Unit], id: UnitId) -> String {
    units
        .iter()
        .find(|unit| unit.id == id)
        .map(|unit| unit.callsign.clone())
        .unwrap_or_else(|| format!("Unit {id}"))
}

pub fn assigned_unit_labels(mission: &Mission, units: &[Unit]) -> Vec<String> {
    mission
        .assigned_units
        .iter()
        .map(|id| unit_label(units, *id))
        .collect()
}

pub fn assigned_units_summary(mission: &Mission, units: &[Unit]) -> String {
    assigned_unit_labels(mission, units).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_store::{apply, seed_state, Action, ReduceContext};

    #[test]
    fn labels_follow_assignment_order() {
        let state = seed_state();
        assert_eq!(
            assigned_units_summary(&state.missions[0], &state.units),
            "ALPHA-6, CHARLIE-1"
        );
    }

    #[test]
    fn deleted_unit_falls_back_to_id_label() {
        let state = seed_state();
        let state = apply(
            &state,
            Action::DeleteUnit(UnitId::from_raw(3)),
            &ReduceContext::at(0),
        );
        assert_eq!(
            assigned_unit_labels(&state.missions[0], &state.units),
            vec!["ALPHA-6".to_string(), "Unit 3".to_string()]
        );
        assert_eq!(state.missions[0].assigned_units.len(), 2);
    }
}
