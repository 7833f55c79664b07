//! Scenario validation logic.

use crate::schema::{ForcingDef, GsModelDef, LeafDef, Scenario, SolverDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    validate_leaf(&scenario.leaf)?;
    validate_solver(&scenario.solver)?;

    let mut ids = HashSet::new();
    for forcing in &scenario.forcing {
        if !ids.insert(&forcing.id) {
            return Err(ValidationError::DuplicateId {
                id: forcing.id.clone(),
                context: "forcing".to_string(),
            });
        }
        validate_forcing(forcing)?;
    }

    Ok(())
}

fn validate_leaf(leaf: &LeafDef) -> Result<(), ValidationError> {
    if !(leaf.g1 > 0.0) {
        return Err(invalid("leaf.g1", leaf.g1, "must be > 0"));
    }
    if !(leaf.g0 >= 0.0) {
        return Err(invalid("leaf.g0", leaf.g0, "must be >= 0"));
    }
    if !(leaf.leaf_width_m > 0.0) {
        return Err(invalid("leaf.leaf_width_m", leaf.leaf_width_m, "must be > 0"));
    }
    if !(0.0..=1.0).contains(&leaf.sw_abs) {
        return Err(invalid("leaf.sw_abs", leaf.sw_abs, "must be within [0, 1]"));
    }
    if leaf.iter_max == 0 {
        return Err(invalid("leaf.iter_max", leaf.iter_max, "must be > 0"));
    }
    if leaf.gs_model == GsModelDef::Leuning && !(leaf.d0 > 0.0) {
        return Err(invalid("leaf.d0", leaf.d0, "Leuning closure needs d0 > 0"));
    }
    if let Some(alpha) = leaf.alpha {
        if !(alpha > 0.0) {
            return Err(invalid("leaf.alpha", alpha, "must be > 0"));
        }
    }
    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if solver.max_iterations == Some(0) {
        return Err(invalid("solver.max_iterations", 0, "must be > 0"));
    }
    if !(solver.temperature_tol_c > 0.0) {
        return Err(invalid(
            "solver.temperature_tol_c",
            solver.temperature_tol_c,
            "must be > 0",
        ));
    }
    if !(solver.zero_tol >= 0.0) {
        return Err(invalid("solver.zero_tol", solver.zero_tol, "must be >= 0"));
    }
    if !solver.par_threshold.is_finite() {
        return Err(invalid(
            "solver.par_threshold",
            solver.par_threshold,
            "must be finite",
        ));
    }
    Ok(())
}

fn validate_forcing(f: &ForcingDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("forcing[{}].{}", f.id, name);

    let finite = [
        ("air_temperature_c", f.air_temperature_c),
        ("par", f.par),
        ("vpd_kpa", f.vpd_kpa),
        ("wind_speed_mps", f.wind_speed_mps),
        ("co2", f.co2),
        ("longitude", f.longitude),
    ];
    for (name, v) in finite {
        if !v.is_finite() {
            return Err(invalid(field(name), v, "must be finite"));
        }
    }
    if let Some(rnet) = f.net_radiation {
        if !rnet.is_finite() {
            return Err(invalid(field("net_radiation"), rnet, "must be finite"));
        }
    }

    if !(f.pressure_pa > 0.0) {
        return Err(invalid(field("pressure_pa"), f.pressure_pa, "must be > 0"));
    }
    if !(f.lai >= 0.0) {
        return Err(invalid(field("lai"), f.lai, "must be >= 0"));
    }
    if !(1.0..=366.0).contains(&f.doy) {
        return Err(invalid(field("doy"), f.doy, "must be within [1, 366]"));
    }
    if !(0.0..24.0).contains(&f.hod) {
        return Err(invalid(field("hod"), f.hod, "must be within [0, 24)"));
    }
    if !(-90.0..=90.0).contains(&f.latitude) {
        return Err(invalid(
            field("latitude"),
            f.latitude,
            "must be within [-90, 90]",
        ));
    }
    Ok(())
}
