//! Compile scenario definitions into solver runtime types.

use lf_core::PhysicalConstants;
use lf_core::units::{degc, kpa, m, mps, pa};
use lf_models::{FarquharC3, GsModel, LeafParams, PenmanMonteith, SpencerSolarGeometry};
use lf_project::schema::{ForcingDef, GsModelDef, LeafDef, Scenario, SolverDef};
use lf_solver::{CoupledSolver, Forcing, SolverConfig};

use crate::error::AppResult;

/// Everything needed to solve a scenario with the reference models.
pub struct ScenarioRuntime {
    pub name: String,
    pub params: LeafParams,
    pub constants: PhysicalConstants,
    pub config: SolverConfig,
    pub forcing: Vec<(String, Forcing)>,
    demand: FarquharC3,
    energy: PenmanMonteith,
    solar: SpencerSolarGeometry,
}

impl ScenarioRuntime {
    /// Build a solver borrowing this runtime's models.
    pub fn solver(&self) -> AppResult<CoupledSolver<'_>> {
        let solver = CoupledSolver::new(
            self.params.clone(),
            &self.demand,
            &self.energy,
            &self.solar,
            self.constants,
        )?
        .with_config(self.config)?;
        Ok(solver)
    }
}

pub fn compile_scenario(scenario: &Scenario) -> AppResult<ScenarioRuntime> {
    let params = compile_leaf(&scenario.leaf);
    params.validate()?;

    let constants = scenario.constants.unwrap_or_default();
    let config = compile_solver_config(&scenario.solver, &scenario.leaf);
    config.validate()?;

    let forcing = scenario
        .forcing
        .iter()
        .map(|f| (f.id.clone(), compile_forcing(f)))
        .collect();

    Ok(ScenarioRuntime {
        name: scenario.name.clone(),
        demand: FarquharC3::new(constants),
        energy: PenmanMonteith::new(params.leaf_width, params.sw_abs, constants),
        solar: SpencerSolarGeometry,
        params,
        constants,
        config,
        forcing,
    })
}

pub fn compile_leaf(leaf: &LeafDef) -> LeafParams {
    LeafParams {
        g0: leaf.g0,
        g1: leaf.g1,
        d0: leaf.d0,
        gamma: leaf.gamma,
        vcmax25: leaf.vcmax25,
        jmax25: leaf.jmax25,
        rd25: leaf.rd25,
        eaj: leaf.eaj,
        eav: leaf.eav,
        delta_sj: leaf.delta_sj,
        delta_sv: leaf.delta_sv,
        hdv: leaf.hdv,
        hdj: leaf.hdj,
        q10: leaf.q10,
        leaf_width: m(leaf.leaf_width_m),
        sw_abs: leaf.sw_abs,
        gs_model: match leaf.gs_model {
            GsModelDef::Medlyn => GsModel::Medlyn,
            GsModelDef::Leuning => GsModel::Leuning,
        },
        alpha: leaf.alpha,
        iter_max: leaf.iter_max,
    }
}

pub fn compile_solver_config(solver: &SolverDef, leaf: &LeafDef) -> SolverConfig {
    SolverConfig {
        max_iterations: solver.max_iterations.unwrap_or(leaf.iter_max),
        temperature_tol: solver.temperature_tol_c,
        zero_tol: solver.zero_tol,
        par_threshold: solver.par_threshold,
    }
}

pub fn compile_forcing(f: &ForcingDef) -> Forcing {
    Forcing {
        air_temperature: degc(f.air_temperature_c),
        par: f.par,
        vpd: kpa(f.vpd_kpa),
        wind_speed: mps(f.wind_speed_mps),
        pressure: pa(f.pressure_pa),
        co2: f.co2,
        doy: f.doy,
        hod: f.hod,
        latitude: f.latitude,
        longitude: f.longitude,
        lai: f.lai,
        net_radiation: f.net_radiation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::units::{as_degc, as_kpa};

    #[test]
    fn solver_iterations_fall_back_to_leaf() {
        let leaf = LeafDef {
            iter_max: 42,
            ..LeafDef::default()
        };
        let cfg = compile_solver_config(&SolverDef::default(), &leaf);
        assert_eq!(cfg.max_iterations, 42);

        let solver = SolverDef {
            max_iterations: Some(7),
            ..SolverDef::default()
        };
        assert_eq!(compile_solver_config(&solver, &leaf).max_iterations, 7);
    }

    #[test]
    fn default_leaf_matches_runtime_defaults() {
        assert_eq!(compile_leaf(&LeafDef::default()), LeafParams::default());
    }

    #[test]
    fn forcing_units_carry_through() {
        let def = ForcingDef {
            id: "t".to_string(),
            air_temperature_c: 21.5,
            par: 900.0,
            vpd_kpa: 1.2,
            wind_speed_mps: 2.0,
            pressure_pa: 99_000.0,
            co2: 420.0,
            doy: 10.0,
            hod: 9.5,
            latitude: -33.6,
            longitude: 150.7,
            lai: 2.0,
            net_radiation: Some(300.0),
        };
        let f = compile_forcing(&def);
        assert!((as_degc(f.air_temperature) - 21.5).abs() < 1e-9);
        assert!((as_kpa(f.vpd) - 1.2).abs() < 1e-12);
        assert_eq!(f.net_radiation, Some(300.0));
        f.validate().unwrap();
    }

    #[test]
    fn runtime_builds_a_solver() {
        let scenario = Scenario {
            version: lf_project::LATEST_VERSION,
            name: "cli".to_string(),
            leaf: LeafDef::default(),
            solver: SolverDef::default(),
            constants: None,
            forcing: vec![],
        };
        let runtime = compile_scenario(&scenario).unwrap();
        let solver = runtime.solver().unwrap();
        assert_eq!(solver.config().max_iterations, 100);
        assert_eq!(solver.constants(), &PhysicalConstants::default());
    }
}
