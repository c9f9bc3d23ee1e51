use hub_core::{
    Domain, EquipmentStatus, GeoPoint, IntelligenceReport, Level, Mission, MissionId,
    MissionStatus, MissionType, Personnel, Position, ReportId, ReportType, Unit, UnitId,
    UnitStatus, UnitType,
};

use crate::state::State;

pub fn seed_state() -> State {
    State::new(seed_units(), seed_missions(), seed_intelligence())
}

fn seed_units() -> Vec<Unit> {
    vec![
        Unit {
            id: UnitId::from_raw(1),
            callsign: "ALPHA-6".to_string(),
            unit_name: "Alpha Company".to_string(),
            unit_type: UnitType::Infantry,
            domain: Domain::Land,
            status: UnitStatus::Operational,
            position: Position {
                latitude: 34.0522,
                longitude: -118.2437,
                altitude_m: 100.0,
            },
            heading_deg: 90.0,
            speed: 5.5,
            personnel: Personnel {
                current: 118,
                max: 120,
            },
            equipment_status: EquipmentStatus::FullyOperational,
            last_report_at_ms: 1_737_988_200_000,
        },
        Unit {
            id: UnitId::from_raw(2),
            callsign: "BRAVO-7".to_string(),
            unit_name: "Bravo Company".to_string(),
            unit_type: UnitType::Armor,
            domain: Domain::Land,
            status: UnitStatus::Maintenance,
            position: Position {
                latitude: 34.0622,
                longitude: -118.2537,
                altitude_m: 105.0,
            },
            heading_deg: 135.0,
            speed: 0.0,
            personnel: Personnel {
                current: 76,
                max: 80,
            },
            equipment_status: EquipmentStatus::Partial,
            last_report_at_ms: 1_737_985_500_000,
        },
        Unit {
            id: UnitId::from_raw(3),
            callsign: "CHARLIE-1".to_string(),
            unit_name: "Charlie Squadron".to_string(),
            unit_type: UnitType::Aviation,
            domain: Domain::Air,
            status: UnitStatus::Operational,
            position: Position {
                latitude: 34.0722,
                longitude: -118.2337,
                altitude_m: 1500.0,
            },
            heading_deg: 270.0,
            speed: 150.0,
            personnel: Personnel { current: 6, max: 6 },
            equipment_status: EquipmentStatus::FullyOperational,
            last_report_at_ms: 1_737_988_500_000,
        },
    ]
}

fn seed_missions() -> Vec<Mission> {
    vec![
        Mission {
            id: MissionId::from_raw(1),
            name: "Operation Thunder Strike".to_string(),
            mission_type: MissionType::Reconnaissance,
            status: MissionStatus::Active,
            priority: Level::High,
            start_at_ms: 1_737_964_800_000,
            end_at_ms: 1_738_000_800_000,
            assigned_units: vec![UnitId::from_raw(1), UnitId::from_raw(3)],
            progress: 65.0,
            description: "Conduct aerial reconnaissance of suspected enemy positions".to_string(),
        },
        Mission {
            id: MissionId::from_raw(2),
            name: "Checkpoint Alpha".to_string(),
            mission_type: MissionType::Security,
            status: MissionStatus::Active,
            priority: Level::Medium,
            start_at_ms: 1_737_957_600_000,
            end_at_ms: 1_738_044_000_000,
            assigned_units: vec![UnitId::from_raw(1)],
            progress: 45.0,
            description: "Maintain security checkpoint at strategic location".to_string(),
        },
        Mission {
            id: MissionId::from_raw(3),
            name: "Equipment Maintenance".to_string(),
            mission_type: MissionType::Logistics,
            status: MissionStatus::InProgress,
            priority: Level::Low,
            start_at_ms: 1_737_972_000_000,
            end_at_ms: 1_737_993_600_000,
            assigned_units: vec![UnitId::from_raw(2)],
            progress: 30.0,
            description: "Scheduled maintenance of armored vehicles".to_string(),
        },
    ]
}

fn seed_intelligence() -> Vec<IntelligenceReport> {
    vec![
        IntelligenceReport {
            id: ReportId::from_raw(1),
            title: "Enemy Movement Detected".to_string(),
            report_type: ReportType::Threat,
            severity: Level::High,
            timestamp_ms: 1_737_987_600_000,
            location: GeoPoint {
                lat: 34.0823,
                lng: -118.2523,
            },
            description: "Multiple hostile vehicles observed moving southeast".to_string(),
            verified: true,
        },
        IntelligenceReport {
            id: ReportId::from_raw(2),
            title: "Civilian Activity".to_string(),
            report_type: ReportType::Info,
            severity: Level::Low,
            timestamp_ms: 1_737_986_100_000,
            location: GeoPoint {
                lat: 34.0423,
                lng: -118.2323,
            },
            description: "Increased civilian traffic in area delta".to_string(),
            verified: false,
        },
        IntelligenceReport {
            id: ReportId::from_raw(3),
            title: "Weather Alert".to_string(),
            report_type: ReportType::Environmental,
            severity: Level::Medium,
            timestamp_ms: 1_737_981_000_000,
            location: GeoPoint {
                lat: 34.0622,
                lng: -118.2437,
            },
            description: "Incoming storm system, visibility will be reduced".to_string(),
            verified: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_respects_entity_invariants() {
        let state = seed_state();
        let unit_ids: HashSet<_> = state.units.iter().map(|unit| unit.id).collect();
        assert_eq!(unit_ids.len(), state.units.len());

        for unit in &state.units {
            assert!(unit.personnel.max >= 1);
            assert!(unit.personnel.current <= unit.personnel.max);
            assert!((0.0..360.0).contains(&unit.heading_deg));
        }
        for mission in &state.missions {
            assert!(mission.start_at_ms < mission.end_at_ms);
            assert!(!mission.assigned_units.is_empty());
            assert!(mission
                .assigned_units
                .iter()
                .all(|id| unit_ids.contains(id)));
        }
        let stamps: Vec<_> = state
            .intelligence
            .iter()
            .map(|report| report.timestamp_ms)
            .collect();
        assert!(stamps.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn allocator_starts_above_seed_ids() {
        let state = seed_state();
        assert_eq!(state.ids.last_issued(), 3);
    }
}
