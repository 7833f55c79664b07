//! Integration tests for the coupled solver using stub collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use lf_core::PhysicalConstants;
use lf_core::units::{degc, kpa};
use lf_models::{
    AirState, Assimilation, DemandInputs, DemandModel, EnergyBalanceModel, LatentFlux,
    LeafConductances, LeafParams, ModelResult,
};
use lf_solver::{CanopyFluxes, CoupledSolver, Forcing, SolverConfig, SolverError};
use proptest::prelude::*;

/// Demand model returning fixed values and counting calls.
struct ConstantDemand {
    an: f64,
    gsc: f64,
    calls: AtomicUsize,
}

impl ConstantDemand {
    fn new(an: f64, gsc: f64) -> Self {
        Self {
            an,
            gsc,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DemandModel for ConstantDemand {
    fn name(&self) -> &str {
        "constant"
    }

    fn assimilation(&self, _inputs: DemandInputs, _params: &LeafParams) -> ModelResult<Assimilation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Assimilation {
            an: self.an,
            gsc: self.gsc,
            ci: 0.7 * 400.0,
        })
    }
}

/// Stomata open only when the leaf is warmer than 25 degC air, so leaf
/// temperature flips either side of the air temperature every pass.
struct SwitchingDemand {
    calls: AtomicUsize,
}

impl DemandModel for SwitchingDemand {
    fn name(&self) -> &str {
        "switching"
    }

    fn assimilation(&self, inputs: DemandInputs, _params: &LeafParams) -> ModelResult<Assimilation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tleaf = inputs.tleaf_k - 273.15;
        let gsc = if tleaf > 25.0 { 0.5 } else { 0.0 };
        Ok(Assimilation {
            an: 5.0,
            gsc,
            ci: 300.0,
        })
    }
}

/// Energy balance with fixed radiation and boundary layer, and latent heat
/// proportional to the stomatal conductance it is handed.
struct LinearBalance;

impl EnergyBalanceModel for LinearBalance {
    fn name(&self) -> &str {
        "linear"
    }

    fn net_radiation(&self, _air: &AirState, _tleaf_k: f64) -> ModelResult<f64> {
        Ok(400.0)
    }

    fn conductances(
        &self,
        _air: &AirState,
        _tleaf: f64,
        gsc: f64,
        _cmolar: f64,
    ) -> ModelResult<LeafConductances> {
        Ok(LeafConductances {
            grn: 0.1,
            gh: 4.2,
            gbh: 2.0,
            gw: gsc * 1.57,
        })
    }

    fn latent_heat(
        &self,
        _air: &AirState,
        _tleaf: f64,
        g: &LeafConductances,
        _rnet: f64,
    ) -> ModelResult<LatentFlux> {
        let et = 0.02 * g.gw;
        Ok(LatentFlux {
            et,
            le_et: et * 40_000.0,
        })
    }
}

fn overhead(_: f64, _: f64, _: f64, _: f64) -> f64 {
    1.0
}

fn below_horizon(_: f64, _: f64, _: f64, _: f64) -> f64 {
    -0.3
}

fn solver<'a>(demand: &'a dyn DemandModel) -> CoupledSolver<'a> {
    CoupledSolver::new(
        LeafParams::default(),
        demand,
        &LinearBalance,
        &overhead,
        PhysicalConstants::default(),
    )
    .unwrap()
}

#[test]
fn dim_light_returns_zero_fluxes_without_calling_demand() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let forcing = Forcing {
        par: 20.0,
        ..Forcing::default()
    };
    let sol = solver(&demand).solve_detailed(&forcing).unwrap();
    assert_eq!(sol.canopy, CanopyFluxes::ZERO);
    assert!(!sol.sun_up);
    assert_eq!(sol.iterations, 0);
    assert_eq!(demand.calls(), 0);
}

#[test]
fn sun_below_horizon_returns_zero_fluxes() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let solver = CoupledSolver::new(
        LeafParams::default(),
        &demand,
        &LinearBalance,
        &below_horizon,
        PhysicalConstants::default(),
    )
    .unwrap();
    let sol = solver.solve_detailed(&Forcing::default()).unwrap();
    assert!(sol.solar_elevation < 0.0);
    assert_eq!(sol.canopy, CanopyFluxes::ZERO);
    assert_eq!(demand.calls(), 0);
}

#[test]
fn horizon_counts_as_dark() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let horizon = |_: f64, _: f64, _: f64, _: f64| 0.0;
    let solver = CoupledSolver::new(
        LeafParams::default(),
        &demand,
        &LinearBalance,
        &horizon,
        PhysicalConstants::default(),
    )
    .unwrap();
    let fluxes = solver.solve(&Forcing::default()).unwrap();
    assert_eq!(fluxes, CanopyFluxes::ZERO);
}

#[test]
fn canopy_fluxes_scale_leaf_values_by_lai() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let forcing = Forcing {
        lai: 2.0,
        ..Forcing::default()
    };
    let sol = solver(&demand).solve_detailed(&forcing).unwrap();

    assert!(sol.sun_up);
    assert_eq!(sol.canopy.an, 20.0);
    assert!((sol.canopy.gsw - 0.3 * 1.57 * 2.0).abs() < 1e-12);
    assert!((sol.canopy.et - sol.et * 2.0).abs() < 1e-15);
    assert!((sol.et - 0.02 * 0.3 * 1.57).abs() < 1e-12);
}

#[test]
fn zero_lai_gives_zero_canopy_fluxes() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let forcing = Forcing {
        lai: 0.0,
        ..Forcing::default()
    };
    let sol = solver(&demand).solve_detailed(&forcing).unwrap();
    assert!(sol.sun_up);
    assert_eq!(sol.canopy.an, 0.0);
    assert_eq!(sol.canopy.gsw, 0.0);
    assert_eq!(sol.canopy.et, 0.0);
    assert_eq!(sol.an, 10.0);
}

#[test]
fn constant_models_converge_on_second_iteration() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let sol = solver(&demand).solve_detailed(&Forcing::default()).unwrap();
    assert_eq!(sol.iterations, 2);
    assert_eq!(demand.calls(), 2);
    assert!(sol.last_delta < 0.02);
}

#[test]
fn closed_stomata_leave_surface_vpd_at_air_vpd() {
    // Respiring leaf: no uptake and no transpiration
    let demand = ConstantDemand::new(-1.0, 0.0);
    let forcing = Forcing {
        vpd: kpa(2.2),
        ..Forcing::default()
    };
    let sol = solver(&demand).solve_detailed(&forcing).unwrap();
    assert_eq!(sol.et, 0.0);
    assert!((sol.surface_vpd - 2.2).abs() < 1e-12);
    assert_eq!(sol.surface_co2, forcing.co2);
    assert!(sol.leaf_temperature > 25.0);
}

#[test]
fn oscillating_leaf_reports_non_convergence() {
    let demand = SwitchingDemand {
        calls: AtomicUsize::new(0),
    };
    let solver = solver(&demand)
        .with_config(SolverConfig {
            max_iterations: 12,
            ..SolverConfig::default()
        })
        .unwrap();

    let err = solver.solve(&Forcing::default()).unwrap_err();
    match err {
        SolverError::NonConvergence {
            iterations,
            last_delta,
        } => {
            assert_eq!(iterations, 12);
            assert!(last_delta > 1.0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(demand.calls.load(Ordering::SeqCst), 12);
}

#[test]
fn non_convergence_is_repeatable() {
    let demand = SwitchingDemand {
        calls: AtomicUsize::new(0),
    };
    let solver = solver(&demand);
    let a = solver.solve(&Forcing::default()).unwrap_err();
    let b = solver.solve(&Forcing::default()).unwrap_err();
    assert_eq!(a.to_string(), b.to_string());
    assert_eq!(demand.calls.load(Ordering::SeqCst), 200);
}

#[test]
fn repeated_solves_are_identical() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let solver = solver(&demand);
    let forcing = Forcing {
        air_temperature: degc(31.0),
        ..Forcing::default()
    };
    let a = solver.solve_detailed(&forcing).unwrap();
    let b = solver.solve_detailed(&forcing).unwrap();
    assert_eq!(a, b);
}

#[test]
fn supplied_net_radiation_is_used() {
    let demand = ConstantDemand::new(10.0, 0.0);
    let forcing = Forcing {
        net_radiation: Some(0.0),
        ..Forcing::default()
    };
    let sol = solver(&demand).solve_detailed(&forcing).unwrap();
    assert!((sol.leaf_temperature - 25.0).abs() < 1e-9);
}

#[test]
fn invalid_forcing_is_rejected_before_solving() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let solver = solver(&demand);

    let nan_air = Forcing {
        air_temperature: degc(f64::NAN),
        ..Forcing::default()
    };
    assert!(matches!(
        solver.solve(&nan_air),
        Err(SolverError::InvalidForcing { .. })
    ));

    let negative_lai = Forcing {
        lai: -1.0,
        ..Forcing::default()
    };
    assert!(matches!(
        solver.solve(&negative_lai),
        Err(SolverError::InvalidForcing { .. })
    ));
    assert_eq!(demand.calls(), 0);
}

#[test]
fn concurrent_solves_share_one_solver() {
    let demand = ConstantDemand::new(10.0, 0.3);
    let solver = solver(&demand);
    let expected = solver.solve(&Forcing::default()).unwrap();

    let results: Vec<CanopyFluxes> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| solver.solve(&Forcing::default()).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for r in results {
        assert_eq!(r, expected);
    }
}

proptest! {
    #[test]
    fn darkness_gate_holds_for_any_low_par(par in 0.0f64..=20.0, lai in 0.0f64..10.0) {
        let demand = ConstantDemand::new(10.0, 0.3);
        let forcing = Forcing { par, lai, ..Forcing::default() };
        let fluxes = solver(&demand).solve(&forcing).unwrap();
        prop_assert_eq!(fluxes, CanopyFluxes::ZERO);
    }

    #[test]
    fn canopy_assimilation_is_linear_in_lai(lai in 0.0f64..10.0) {
        let demand = ConstantDemand::new(10.0, 0.3);
        let forcing = Forcing { lai, ..Forcing::default() };
        let fluxes = solver(&demand).solve(&forcing).unwrap();
        prop_assert!((fluxes.an - 10.0 * lai).abs() < 1e-9);
    }
}
