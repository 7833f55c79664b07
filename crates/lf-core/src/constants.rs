//! Physical constants and fixed unit-conversion ratios.
//!
//! The table is passed into the solver and the reference models rather than
//! read from globals, so a caller can swap in alternative values.

/// Read-only table of physical constants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicalConstants {
    /// Offset from degrees Celsius to Kelvin
    pub deg_to_kelvin: f64,
    /// Specific heat of air at constant pressure (J kg-1 K-1)
    pub cp_air: f64,
    /// Specific gas constant for dry air (J kg-1 K-1)
    pub r_dry_air: f64,
    /// Universal gas constant (J mol-1 K-1)
    pub r_gas: f64,
    /// Molar mass of air (kg mol-1)
    pub air_molar_mass: f64,
    /// Molar mass of water (kg mol-1)
    pub h2o_molar_mass: f64,
    /// Latent heat of vaporisation at 0 degC (J kg-1)
    pub h2o_lv0: f64,
    /// Stefan-Boltzmann constant (W m-2 K-4)
    pub sigma: f64,
    /// Molecular diffusivity of heat in air (m2 s-1)
    pub heat_diffusivity: f64,
    /// Boundary-layer conductance: heat basis to CO2 basis
    pub gbh_to_gbc: f64,
    /// Boundary-layer conductance: heat basis to water-vapour basis
    pub gbh_to_gbw: f64,
    /// Stomatal conductance: CO2 basis to water-vapour basis
    pub gsc_to_gsw: f64,
    /// Pascal to kilopascal
    pub pa_to_kpa: f64,
    /// Photon flux to energy, umol J-1 in the PAR waveband
    pub umol_per_joule: f64,
    /// Fraction of shortwave radiation that is PAR
    pub par_fraction: f64,
}

impl PhysicalConstants {
    /// Stomatal conductance: water-vapour basis to CO2 basis.
    #[inline]
    pub fn gsw_to_gsc(&self) -> f64 {
        1.0 / self.gsc_to_gsw
    }

    /// Kilopascal to pascal.
    #[inline]
    pub fn kpa_to_pa(&self) -> f64 {
        1.0 / self.pa_to_kpa
    }

    /// Molar specific heat of air (J mol-1 K-1).
    #[inline]
    pub fn cp_molar(&self) -> f64 {
        self.cp_air * self.air_molar_mass
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            deg_to_kelvin: 273.15,
            cp_air: 1010.0,
            r_dry_air: 287.058,
            r_gas: 8.314,
            air_molar_mass: 29.0e-3,
            h2o_molar_mass: 18.0e-3,
            h2o_lv0: 2.501e6,
            sigma: 5.6704e-8,
            heat_diffusivity: 21.5e-6,
            gbh_to_gbc: 1.0 / 1.32,
            gbh_to_gbw: 1.075,
            gsc_to_gsw: 1.57,
            pa_to_kpa: 0.001,
            umol_per_joule: 4.57,
            par_fraction: 0.5,
        }
    }
}
