//! Leaf biochemical and structural parameters.

use crate::error::{ModelError, ModelResult};
use lf_core::units::{Length, as_m, m};

/// Stomatal conductance closure coupling gs to assimilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsModel {
    /// Medlyn et al. (2011) optimal stomatal behaviour
    Medlyn,
    /// Leuning (1995) hyperbolic humidity response
    Leuning,
}

/// Parameter set for one leaf.
///
/// Set once when the solver is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafParams {
    /// Residual stomatal conductance to water vapour (mol m-2 s-1)
    pub g0: f64,
    /// Stomatal slope (Medlyn: kPa^0.5, Leuning: dimensionless)
    pub g1: f64,
    /// Leuning humidity sensitivity (kPa)
    pub d0: f64,
    /// CO2 compensation point used by the Leuning closure (umol mol-1)
    pub gamma: f64,
    /// Maximum carboxylation rate at 25 degC (umol m-2 s-1)
    pub vcmax25: f64,
    /// Maximum electron transport rate at 25 degC (umol m-2 s-1)
    pub jmax25: f64,
    /// Day respiration at 25 degC (umol m-2 s-1)
    pub rd25: f64,
    /// Activation energy of Jmax (J mol-1)
    pub eaj: f64,
    /// Activation energy of Vcmax (J mol-1)
    pub eav: f64,
    /// Entropy term of Jmax (J mol-1 K-1)
    pub delta_sj: f64,
    /// Entropy term of Vcmax (J mol-1 K-1)
    pub delta_sv: f64,
    /// Deactivation energy of Vcmax (J mol-1)
    pub hdv: f64,
    /// Deactivation energy of Jmax (J mol-1)
    pub hdj: f64,
    /// Respiration Q10
    pub q10: f64,
    /// Characteristic leaf width
    pub leaf_width: Length,
    /// Leaf absorptance of shortwave radiation [0, 1]
    pub sw_abs: f64,
    pub gs_model: GsModel,
    /// Quantum yield of electron transport; model default when `None`
    pub alpha: Option<f64>,
    /// Maximum number of coupling iterations per solve
    pub iter_max: usize,
}

impl Default for LeafParams {
    fn default() -> Self {
        let vcmax25 = 30.0;
        Self {
            g0: 0.001,
            g1: 4.0,
            d0: 1.5,
            gamma: 0.0,
            vcmax25,
            jmax25: vcmax25 * 2.0,
            rd25: 2.0,
            eaj: 30_000.0,
            eav: 60_000.0,
            delta_sj: 650.0,
            delta_sv: 650.0,
            hdv: 200_000.0,
            hdj: 200_000.0,
            q10: 2.0,
            leaf_width: m(0.02),
            sw_abs: 0.5,
            gs_model: GsModel::Medlyn,
            alpha: None,
            iter_max: 100,
        }
    }
}

impl LeafParams {
    /// Check that the parameter set can drive the reference models.
    pub fn validate(&self) -> ModelResult<()> {
        let finite = [
            (self.g0, "g0"),
            (self.g1, "g1"),
            (self.d0, "d0"),
            (self.gamma, "gamma"),
            (self.vcmax25, "vcmax25"),
            (self.jmax25, "jmax25"),
            (self.rd25, "rd25"),
            (self.eaj, "eaj"),
            (self.eav, "eav"),
            (self.delta_sj, "delta_sj"),
            (self.delta_sv, "delta_sv"),
            (self.hdv, "hdv"),
            (self.hdj, "hdj"),
            (self.q10, "q10"),
            (as_m(self.leaf_width), "leaf_width"),
            (self.sw_abs, "sw_abs"),
        ];
        for (v, what) in finite {
            if !v.is_finite() {
                return Err(ModelError::InvalidArg { what });
            }
        }

        if self.g0 < 0.0 {
            return Err(ModelError::InvalidArg { what: "g0 must be >= 0" });
        }
        if self.g1 <= 0.0 {
            return Err(ModelError::InvalidArg { what: "g1 must be > 0" });
        }
        if as_m(self.leaf_width) <= 0.0 {
            return Err(ModelError::InvalidArg {
                what: "leaf_width must be > 0",
            });
        }
        if !(0.0..=1.0).contains(&self.sw_abs) {
            return Err(ModelError::InvalidArg {
                what: "sw_abs must be within [0, 1]",
            });
        }
        if self.gs_model == GsModel::Leuning && self.d0 <= 0.0 {
            return Err(ModelError::InvalidArg {
                what: "d0 must be > 0 for the Leuning closure",
            });
        }
        if let Some(alpha) = self.alpha {
            if !alpha.is_finite() || alpha <= 0.0 {
                return Err(ModelError::InvalidArg {
                    what: "alpha must be > 0",
                });
            }
        }
        if self.iter_max == 0 {
            return Err(ModelError::InvalidArg {
                what: "iter_max must be > 0",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LeafParams::default().validate().unwrap();
    }

    #[test]
    fn jmax_defaults_to_twice_vcmax() {
        let p = LeafParams::default();
        assert_eq!(p.jmax25, 2.0 * p.vcmax25);
    }

    #[test]
    fn leuning_requires_d0() {
        let p = LeafParams {
            gs_model: GsModel::Leuning,
            d0: 0.0,
            ..LeafParams::default()
        };
        assert!(matches!(p.validate(), Err(ModelError::InvalidArg { .. })));
    }

    #[test]
    fn rejects_bad_absorptance() {
        let p = LeafParams {
            sw_abs: 1.2,
            ..LeafParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_zero_iteration_cap() {
        let p = LeafParams {
            iter_max: 0,
            ..LeafParams::default()
        };
        assert!(p.validate().is_err());
    }
}
