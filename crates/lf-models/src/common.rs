//! Common utilities shared by the leaf sub-models.

use crate::error::{ModelError, ModelResult};
use lf_core::numeric::ensure_finite;

/// Reference temperature for the 25 degC rate constants (K)
pub const T_REF_K: f64 = 298.15;

/// Coefficient magnitude below which a quadratic is solved as linear
pub const EPSILON_QUADRATIC: f64 = 1e-12;

/// Ensure a value is finite, returning ModelError if not.
pub fn check_finite(value: f64, what: &'static str) -> ModelResult<()> {
    ensure_finite(value, what).map_err(|_| ModelError::NonPhysical { what })?;
    Ok(())
}

/// Which root of a quadratic to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Root {
    Large,
    Small,
}

/// Solve `a x^2 + b x + c = 0` and return the requested root.
///
/// Falls back to the linear solution when `a` vanishes. A negative
/// discriminant has no physical meaning for the leaf models and is an error.
pub fn quadratic(a: f64, b: f64, c: f64, root: Root) -> ModelResult<f64> {
    if a.abs() < EPSILON_QUADRATIC {
        if b.abs() < EPSILON_QUADRATIC {
            return Err(ModelError::NonPhysical {
                what: "degenerate quadratic",
            });
        }
        return Ok(-c / b);
    }

    let d = b * b - 4.0 * a * c;
    if d < 0.0 {
        return Err(ModelError::NonPhysical {
            what: "negative discriminant",
        });
    }

    let x = match root {
        Root::Large => (-b + d.sqrt()) / (2.0 * a),
        Root::Small => (-b - d.sqrt()) / (2.0 * a),
    };
    check_finite(x, "quadratic root")?;
    Ok(x)
}

/// Arrhenius temperature response normalised to 25 degC.
///
/// * `k25` - rate at 25 degC
/// * `ea` - activation energy (J mol-1)
/// * `tk` - temperature (K)
/// * `r_gas` - universal gas constant (J mol-1 K-1)
pub fn arrhenius(k25: f64, ea: f64, tk: f64, r_gas: f64) -> f64 {
    k25 * ((tk - T_REF_K) * ea / (T_REF_K * r_gas * tk)).exp()
}

/// Peaked Arrhenius response with high-temperature deactivation.
///
/// Equals `k25` at 25 degC and falls away above the optimum set by
/// `delta_s` (J mol-1 K-1) and `hd` (J mol-1).
pub fn peaked_arrhenius(k25: f64, ea: f64, tk: f64, delta_s: f64, hd: f64, r_gas: f64) -> f64 {
    let base = arrhenius(k25, ea, tk, r_gas);
    let at_ref = 1.0 + ((T_REF_K * delta_s - hd) / (T_REF_K * r_gas)).exp();
    let at_t = 1.0 + ((tk * delta_s - hd) / (tk * r_gas)).exp();
    base * at_ref / at_t
}

/// Saturation vapour pressure over water (Pa), Tetens form.
pub fn saturation_vapour_pressure(tc: f64) -> f64 {
    613.75 * (17.502 * tc / (240.97 + tc)).exp()
}
