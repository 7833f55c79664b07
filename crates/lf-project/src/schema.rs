//! Scenario schema definitions.
//!
//! Plain serde records in file units (degC, kPa, m s-1, Pa, m). The CLI turns
//! them into the runtime types of lf-models and lf-solver.

use lf_core::PhysicalConstants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub leaf: LeafDef,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<PhysicalConstants>,
    #[serde(default)]
    pub forcing: Vec<ForcingDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GsModelDef {
    #[default]
    Medlyn,
    Leuning,
}

/// Leaf physiology and geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeafDef {
    pub gs_model: GsModelDef,
    /// Residual stomatal conductance, water-vapour basis (mol m-2 s-1)
    pub g0: f64,
    pub g1: f64,
    /// Leuning VPD sensitivity (kPa)
    pub d0: f64,
    /// Leuning CO2 compensation point (umol mol-1)
    pub gamma: f64,
    pub vcmax25: f64,
    pub jmax25: f64,
    pub rd25: f64,
    pub eaj: f64,
    pub eav: f64,
    pub delta_sj: f64,
    pub delta_sv: f64,
    pub hdv: f64,
    pub hdj: f64,
    pub q10: f64,
    pub leaf_width_m: f64,
    pub sw_abs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    pub iter_max: usize,
}

impl Default for LeafDef {
    fn default() -> Self {
        Self {
            gs_model: GsModelDef::Medlyn,
            g0: 0.001,
            g1: 4.0,
            d0: 1.5,
            gamma: 0.0,
            vcmax25: 30.0,
            jmax25: 60.0,
            rd25: 2.0,
            eaj: 30_000.0,
            eav: 60_000.0,
            delta_sj: 650.0,
            delta_sv: 650.0,
            hdv: 200_000.0,
            hdj: 200_000.0,
            q10: 2.0,
            leaf_width_m: 0.02,
            sw_abs: 0.5,
            alpha: None,
            iter_max: 100,
        }
    }
}

/// Solver settings. `max_iterations` falls back to `leaf.iter_max`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    pub temperature_tol_c: f64,
    pub zero_tol: f64,
    pub par_threshold: f64,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            max_iterations: None,
            temperature_tol_c: 0.02,
            zero_tol: 1e-12,
            par_threshold: 20.0,
        }
    }
}

fn default_pressure_pa() -> f64 {
    101_325.0
}

fn default_co2() -> f64 {
    400.0
}

/// One timestep of atmospheric forcing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForcingDef {
    pub id: String,
    pub air_temperature_c: f64,
    pub par: f64,
    pub vpd_kpa: f64,
    pub wind_speed_mps: f64,
    #[serde(default = "default_pressure_pa")]
    pub pressure_pa: f64,
    #[serde(default = "default_co2")]
    pub co2: f64,
    pub doy: f64,
    pub hod: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub lai: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_radiation: Option<f64>,
}
