//! Earth position and velocity from a series ephemeris
//!
//! Heliocentric and barycentric position and velocity of the Earth,
//! referred to the BCRS axes, from the simplified VSOP2000 series. The
//! fit is valid from 1900 to 2100; outside that span the result is still
//! computed but flagged with [`EphemerisStatus::OutsideValidRange`].
//!
//! Maximum position error over the fitted span is about 4.6 km
//! heliocentric and 4.6 km barycentric; velocity errors are below
//! 1.4 mm/s.
//!
//! ```rust
//! use radiosky::ephemeris::{earth_pv, EphemerisStatus};
//!
//! let state = earth_pv(2_451_545.0, 0.0);
//! assert_eq!(state.status, EphemerisStatus::Nominal);
//! let r = state.heliocentric.position.magnitude();
//! assert!((r - 0.983).abs() < 0.001);
//! ```

mod coefficients;
pub mod series;

use crate::constants::{J2000, JULIAN_YEAR_DAYS, MJD_OFFSET};
use crate::coordinates::cartesian::Cartesian3;
use coefficients::{BARYCENTRE_TO_SUN, SUN_TO_EARTH};
use lazy_static::lazy_static;
use log::warn;
use nalgebra::Matrix3;

/// Half-width of the fitted span in Julian years either side of J2000
const VALID_SPAN_YEARS: f64 = 100.0;

lazy_static! {
    /// Ecliptic (VSOP2000 frame) to BCRS rotation
    static ref ECLIPTIC_TO_BCRS: Matrix3<f64> = Matrix3::new(
        1.0,
        0.000000211284,
        -0.000000091603,
        -0.000000230286,
        0.917482137087,
        -0.397776982902,
        0.0,
        0.397776982902,
        0.917482137087,
    );
}

/// Position (AU) and velocity (AU/day) pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionVelocity {
    pub position: Cartesian3,
    pub velocity: Cartesian3,
}

/// Whether the requested date lies inside the fitted span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EphemerisStatus {
    /// Between 1900 and 2100
    Nominal,
    /// Outside 1900-2100; accuracy degrades
    OutsideValidRange,
}

/// Earth state from [`earth_pv`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthState {
    /// Relative to the Sun
    pub heliocentric: PositionVelocity,
    /// Relative to the solar system barycentre
    pub barycentric: PositionVelocity,
    pub status: EphemerisStatus,
}

/// Earth position and velocity at TDB date `date1 + date2`
///
/// The Julian date may be split between the two arguments however is
/// convenient; the best precision comes from putting the epoch in
/// `date1` and the fraction in `date2`. TT can be passed in place of TDB.
pub fn earth_pv(date1: f64, date2: f64) -> EarthState {
    // Julian years since J2000
    let t = ((date1 - J2000) + date2) / JULIAN_YEAR_DAYS;

    let status = if t.abs() <= VALID_SPAN_YEARS {
        EphemerisStatus::Nominal
    } else {
        warn!(
            "Earth ephemeris requested {:.1} years from J2000, outside the 1900-2100 fit",
            t
        );
        EphemerisStatus::OutsideValidRange
    };

    let mut helio_p = [0.0; 3];
    let mut helio_v = [0.0; 3];
    let mut bary_p = [0.0; 3];
    let mut bary_v = [0.0; 3];

    for axis in 0..3 {
        let (p, v) = series::sum_axis(&SUN_TO_EARTH, axis, t);
        helio_p[axis] = p;
        helio_v[axis] = v / JULIAN_YEAR_DAYS;

        // SSB to Earth is SSB to Sun plus Sun to Earth
        let (sp, sv) = series::sum_axis(&BARYCENTRE_TO_SUN, axis, t);
        bary_p[axis] = p + sp;
        bary_v[axis] = (v + sv) / JULIAN_YEAR_DAYS;
    }

    let to_bcrs = |c: [f64; 3]| Cartesian3::new(c[0], c[1], c[2]).rotate(&ECLIPTIC_TO_BCRS);

    EarthState {
        heliocentric: PositionVelocity {
            position: to_bcrs(helio_p),
            velocity: to_bcrs(helio_v),
        },
        barycentric: PositionVelocity {
            position: to_bcrs(bary_p),
            velocity: to_bcrs(bary_v),
        },
        status,
    }
}

/// [`earth_pv`] for a modified Julian date
pub fn earth_pv_mjd(mjd: f64) -> EarthState {
    earth_pv(MJD_OFFSET, mjd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec(actual: Cartesian3, expected: [f64; 3], epsilon: f64) {
        assert_abs_diff_eq!(actual.x, expected[0], epsilon = epsilon);
        assert_abs_diff_eq!(actual.y, expected[1], epsilon = epsilon);
        assert_abs_diff_eq!(actual.z, expected[2], epsilon = epsilon);
    }

    #[test]
    fn test_reference_epoch_2005() {
        // TDB 2005-02-10 12:36:01, the reference case published with the series
        let state = earth_pv(2_400_000.5, 53_411.525_011_61);
        assert_eq!(state.status, EphemerisStatus::Nominal);

        assert_vec(
            state.heliocentric.position,
            [-0.7757238809297706813, 0.5598052241363340596, 0.2426998466481686993],
            1e-12,
        );
        assert_vec(
            state.heliocentric.velocity,
            [-0.1091891824147313846e-1, -0.1247187268440845008e-1, -0.5407569418065039061e-2],
            1e-14,
        );
        assert_vec(
            state.barycentric.position,
            [-0.7714104440491111971, 0.5598412061824171323, 0.2425996277722452400],
            1e-12,
        );
        assert_vec(
            state.barycentric.velocity,
            [-0.1091874268116823295e-1, -0.1246525461732861538e-1, -0.5404773180966231279e-2],
            1e-14,
        );
    }

    #[test]
    fn test_mjd_matches_split_date() {
        let a = earth_pv_mjd(53_411.525_011_61);
        let b = earth_pv(2_400_000.5, 53_411.525_011_61);
        assert_eq!(a, b);
    }

    #[test]
    fn test_j2000_orbit_size() {
        let state = earth_pv(J2000, 0.0);
        // Early January, near perihelion
        assert_abs_diff_eq!(state.heliocentric.position.magnitude(), 0.9833, epsilon = 1e-3);
        assert_abs_diff_eq!(state.heliocentric.velocity.magnitude(), 0.017495, epsilon = 1e-4);
        // The barycentre sits within about 0.01 AU of the Sun
        let offset = state.barycentric.position - state.heliocentric.position;
        assert!(offset.magnitude() < 0.01);
    }

    #[test]
    fn test_status_flips_outside_fit() {
        assert_eq!(earth_pv(J2000, 36_525.0 * 0.99).status, EphemerisStatus::Nominal);
        assert_eq!(
            earth_pv(J2000, 36_525.0 * 1.01).status,
            EphemerisStatus::OutsideValidRange
        );
        assert_eq!(
            earth_pv(J2000, -36_525.0 * 1.5).status,
            EphemerisStatus::OutsideValidRange
        );
        // Still a finite, plausible answer
        let far = earth_pv(J2000, -36_525.0 * 1.5);
        let r = far.heliocentric.position.magnitude();
        assert!(r > 0.97 && r < 1.03, "r = {}", r);
    }

    #[test]
    fn test_velocity_is_derivative_of_position() {
        let h = 0.01;
        let mid = earth_pv(J2000, 1234.5);
        let before = earth_pv(J2000, 1234.5 - h);
        let after = earth_pv(J2000, 1234.5 + h);
        let numeric =
            (after.barycentric.position - before.barycentric.position) * (1.0 / (2.0 * h));
        let diff = numeric - mid.barycentric.velocity;
        assert!(diff.magnitude() < 1e-9, "diff {:?}", diff);
    }
}
