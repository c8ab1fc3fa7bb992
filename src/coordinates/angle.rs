//! # Angle helpers
//!
//! Range reduction and unit conversion shared by every coordinate routine.
//!
//! Right ascension is carried in decimal hours and every other angle in
//! decimal degrees at the public interface; radians are used only inside
//! calculations. The wrapping helpers here work for negative input, unlike
//! the `%` operator, and never return the upper bound of their range.
//!
//! ```rust
//! use radiosky::coordinates::angle::{modulo, wrap_degrees};
//!
//! assert_eq!(modulo(-90.0, 360.0), 270.0);
//! assert_eq!(wrap_degrees(720.0), 0.0);
//! ```

use crate::constants::{DEG_PER_HOUR, TAU, ZERO_CELSIUS_K};
use std::f64::consts::PI;

/// Floored modulo: the result has the sign of `b`
///
/// `modulo(a, b) = a - b * floor(a / b)`
pub fn modulo(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

/// Reduce `a` into the half-open range `[0, b)`
///
/// A tiny negative `a` makes the floored modulo round up to exactly `b`;
/// that case is folded back to zero.
pub fn wrap(a: f64, b: f64) -> f64 {
    let r = modulo(a, b);
    if r >= b {
        0.0
    } else {
        r
    }
}

/// Reduce an angle in degrees into `[0, 360)`
pub fn wrap_degrees(deg: f64) -> f64 {
    wrap(deg, 360.0)
}

/// Reduce a right ascension in decimal hours into `[0, 24)`
pub fn wrap_hours(hours: f64) -> f64 {
    wrap(hours, 24.0)
}

/// Reduce an angle in degrees into `(-180, 180]`
pub fn wrap_degrees_signed(deg: f64) -> f64 {
    let r = wrap_degrees(deg);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Normalise an angle in radians into the range +/- pi
pub fn wrap_pi(angle: f64) -> f64 {
    let result = angle % TAU;
    if result > PI {
        result - TAU
    } else if result < -PI {
        result + TAU
    } else {
        result
    }
}

/// Right ascension hours to degrees
pub fn hours_to_degrees(hours: f64) -> f64 {
    hours * DEG_PER_HOUR
}

/// Degrees to right ascension hours
pub fn degrees_to_hours(deg: f64) -> f64 {
    deg / DEG_PER_HOUR
}

/// Clamp a sine or cosine value into `[-1, 1]` before an inverse trig call
///
/// Rounding in spherical-trig products can push a value just past unity,
/// which `asin`/`acos` would turn into NaN.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Celsius to Kelvin
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + ZERO_CELSIUS_K
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_modulo_negative_operand() {
        assert_eq!(modulo(-30.0, 360.0), 330.0);
        assert_eq!(modulo(390.0, 360.0), 30.0);
        assert_eq!(modulo(-25.0, 24.0), 23.0);
        assert_eq!(modulo(0.0, 24.0), 0.0);
    }

    #[test]
    fn test_wrap_never_returns_upper_bound() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-1e-18), 0.0);
        assert_eq!(wrap_hours(-1e-18), 0.0);
        assert!(wrap_degrees(-1e-10) < 360.0);
        assert_abs_diff_eq!(wrap_hours(-1.5), 22.5, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_degrees_signed() {
        assert_eq!(wrap_degrees_signed(180.0), 180.0);
        assert_eq!(wrap_degrees_signed(190.0), -170.0);
        assert_eq!(wrap_degrees_signed(-190.0), 170.0);
        assert_eq!(wrap_degrees_signed(-180.0), 180.0);
    }

    #[test]
    fn test_wrap_pi() {
        assert_abs_diff_eq!(wrap_pi(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pi(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pi(0.5), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_hour_degree_conversion() {
        assert_eq!(hours_to_degrees(6.0), 90.0);
        assert_eq!(degrees_to_hours(270.0), 18.0);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.0000000000000002), 1.0);
        assert_eq!(clamp_unit(-1.5), -1.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }
}
