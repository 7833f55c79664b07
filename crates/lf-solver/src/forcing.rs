//! Atmospheric forcing for one timestep.

use crate::error::{SolverError, SolverResult};
use lf_core::PhysicalConstants;
use lf_core::units::{
    Pressure, Temperature, Velocity, as_degc, as_kpa, as_mps, as_pa, degc, kpa, mps, pa,
};
use lf_models::AirState;

/// Forcing for a single leaf solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Forcing {
    pub air_temperature: Temperature,
    /// Incident PAR (umol m-2 s-1)
    pub par: f64,
    /// Air vapour pressure deficit
    pub vpd: Pressure,
    pub wind_speed: Velocity,
    pub pressure: Pressure,
    /// Ambient CO2 (umol mol-1)
    pub co2: f64,
    /// Day of year
    pub doy: f64,
    /// Hour of day, decimal local standard time
    pub hod: f64,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    /// Leaf-area index (m2 m-2)
    pub lai: f64,
    /// Net radiation (W m-2) overriding the energy-balance model
    pub net_radiation: Option<f64>,
}

impl Default for Forcing {
    /// Clear, mid-morning conditions in subtropical eastern Australia.
    fn default() -> Self {
        Self {
            air_temperature: degc(25.0),
            par: 1500.0,
            vpd: kpa(1.5),
            wind_speed: mps(2.5),
            pressure: pa(101_325.0),
            co2: 400.0,
            doy: 180.0,
            hod: 11.0,
            latitude: -23.575,
            longitude: 152.525,
            lai: 3.0,
            net_radiation: None,
        }
    }
}

impl Forcing {
    /// Check the solver preconditions: every value finite, pressure > 0 and
    /// LAI >= 0.
    pub fn validate(&self) -> SolverResult<()> {
        let values = [
            (self.air_temperature.value, "air temperature"),
            (self.par, "par"),
            (self.vpd.value, "vpd"),
            (self.wind_speed.value, "wind speed"),
            (self.pressure.value, "pressure"),
            (self.co2, "co2"),
            (self.doy, "day of year"),
            (self.hod, "hour of day"),
            (self.latitude, "latitude"),
            (self.longitude, "longitude"),
            (self.lai, "lai"),
        ];
        for (v, what) in values {
            if !v.is_finite() {
                return Err(SolverError::InvalidForcing { what });
            }
        }
        if let Some(rnet) = self.net_radiation {
            if !rnet.is_finite() {
                return Err(SolverError::InvalidForcing {
                    what: "net radiation",
                });
            }
        }
        if self.pressure.value <= 0.0 {
            return Err(SolverError::InvalidForcing {
                what: "pressure must be > 0",
            });
        }
        if self.lai < 0.0 {
            return Err(SolverError::InvalidForcing {
                what: "lai must be >= 0",
            });
        }
        Ok(())
    }

    /// Air-side state in the working units of the leaf models.
    pub fn air_state(&self, constants: &PhysicalConstants) -> AirState {
        let tair = as_degc(self.air_temperature);
        AirState {
            tair,
            tair_k: tair + constants.deg_to_kelvin,
            vpd: as_kpa(self.vpd),
            pressure: as_pa(self.pressure),
            wind: as_mps(self.wind_speed),
            par: self.par,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        Forcing::default().validate().unwrap();
    }

    #[test]
    fn rejects_nan() {
        let f = Forcing {
            par: f64::NAN,
            ..Forcing::default()
        };
        assert!(matches!(
            f.validate(),
            Err(SolverError::InvalidForcing { what: "par" })
        ));
    }

    #[test]
    fn rejects_zero_pressure() {
        let f = Forcing {
            pressure: pa(0.0),
            ..Forcing::default()
        };
        assert!(f.validate().is_err());
    }

    #[test]
    fn rejects_negative_lai_but_accepts_zero() {
        let neg = Forcing {
            lai: -0.1,
            ..Forcing::default()
        };
        assert!(neg.validate().is_err());
        let zero = Forcing {
            lai: 0.0,
            ..Forcing::default()
        };
        zero.validate().unwrap();
    }

    #[test]
    fn rejects_non_finite_net_radiation() {
        let f = Forcing {
            net_radiation: Some(f64::INFINITY),
            ..Forcing::default()
        };
        assert!(f.validate().is_err());
    }

    #[test]
    fn air_state_uses_working_units() {
        let air = Forcing::default().air_state(&PhysicalConstants::default());
        assert!((air.tair - 25.0).abs() < 1e-9);
        assert!((air.tair_k - 298.15).abs() < 1e-9);
        assert!((air.vpd - 1.5).abs() < 1e-12);
        assert!((air.pressure - 101_325.0).abs() < 1e-9);
        assert!((air.wind - 2.5).abs() < 1e-12);
    }
}
