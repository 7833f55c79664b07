use crate::LfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute tolerance used when a flux or conductance is tested against zero.
///
/// Values whose magnitude is at or below this bound are treated as exactly zero.
pub const ZERO_TOL: Real = 1e-12;

/// Zero test with an explicit absolute bound.
///
/// A relative tolerance is meaningless against zero, so only `abs` applies.
#[inline]
pub fn is_near_zero(v: Real, abs: Real) -> bool {
    v.abs() <= abs
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, LfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LfError::NonFinite { what, value: v })
    }
}
