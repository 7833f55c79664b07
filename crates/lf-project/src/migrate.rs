//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// v0 files measured hour of day in half-hour steps (0..48).
fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    for f in &mut scenario.forcing {
        f.hod /= 2.0;
    }
    scenario.version = 1;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ForcingDef, LeafDef, SolverDef};

    fn scenario(version: u32, hod: f64) -> Scenario {
        Scenario {
            version,
            name: "m".to_string(),
            leaf: LeafDef::default(),
            solver: SolverDef::default(),
            constants: None,
            forcing: vec![ForcingDef {
                id: "t0".to_string(),
                air_temperature_c: 25.0,
                par: 1500.0,
                vpd_kpa: 1.5,
                wind_speed_mps: 2.5,
                pressure_pa: 101_325.0,
                co2: 400.0,
                doy: 180.0,
                hod,
                latitude: -23.575,
                longitude: 152.525,
                lai: 3.0,
                net_radiation: None,
            }],
        }
    }

    #[test]
    fn v0_half_hours_become_hours() {
        let migrated = migrate_to_latest(scenario(0, 22.0)).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.forcing[0].hod, 11.0);
    }

    #[test]
    fn latest_is_untouched() {
        let s = scenario(LATEST_VERSION, 11.0);
        assert_eq!(migrate_to_latest(s.clone()).unwrap(), s);
    }
}
