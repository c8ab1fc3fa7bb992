//! Precession of equatorial coordinates between epochs
//!
//! A rigorous IAU precession model is not needed for pointing a dish, so
//! this uses the small-angle rotation matrix parameterised by tropical
//! centuries since B1950. It is adequate over a few centuries.

use crate::constants::{RAD2DEG, TROPICAL_CENTURY_DAYS};
use crate::coordinates::angle::{clamp_unit, degrees_to_hours};
use crate::coordinates::RaDec;
use crate::time::jd_b1950;
use nalgebra::Matrix3;

/// Rotation matrix taking a unit vector from epoch `jd_from` to `jd_to`
pub fn precession_matrix(jd_from: f64, jd_to: f64) -> Matrix3<f64> {
    // Tropical centuries since B1950.0, and between the two epochs
    let t0 = (jd_from - jd_b1950()) / TROPICAL_CENTURY_DAYS;
    let t = (jd_to - jd_from) / TROPICAL_CENTURY_DAYS;
    let t2 = t * t;
    let t3 = t2 * t;

    let xx = 1.0 - ((29696.0 + 26.0 * t0) * t2 - 13.0 * t3) * 1e-8;
    let yx = ((2234941.0 + 1355.0 * t0) * t - 676.0 * t2 + 221.0 * t3) * 1e-8;
    let zx = ((971690.0 - 414.0 * t0) * t + 207.0 * t2 + 96.0 * t3) * 1e-8;
    let yy = 1.0 - ((24975.0 + 30.0 * t0) * t2 - 15.0 * t3) * 1e-8;
    let zy = -((10858.0 + 2.0 * t0) * t2) * 1e-8;
    let zz = 1.0 - ((4721.0 - 4.0 * t0) * t2) * 1e-8;

    // Row-major
    Matrix3::new(
        xx, -yx, -zx, //
        yx, yy, zy, //
        zx, zy, zz,
    )
}

/// Precess a RA/Dec between two epochs given as Julian dates
///
/// Right ascension comes back in `[0, 24)` hours.
pub fn precess(rd: RaDec, jd_from: f64, jd_to: f64) -> RaDec {
    let v = rd.to_unit_vector().rotate(&precession_matrix(jd_from, jd_to));

    // atan(y/x) needs its quadrant restored from the signs of x and y
    let mut ra_deg = (v.y / v.x).atan() * RAD2DEG;
    if v.x < 0.0 {
        ra_deg += 180.0;
    } else if v.y < 0.0 && v.x > 0.0 {
        ra_deg += 360.0;
    }
    let dec_deg = clamp_unit(v.z).asin() * RAD2DEG;

    RaDec::new(degrees_to_hours(ra_deg), dec_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::jd_j2000;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_same_epoch_is_identity() {
        let rd = RaDec::new(5.5, -20.0);
        let out = precess(rd, jd_j2000(), jd_j2000());
        assert_abs_diff_eq!(out.ra, rd.ra, epsilon = 1e-12);
        assert_abs_diff_eq!(out.dec, rd.dec, epsilon = 1e-12);
    }

    #[test]
    fn test_b1950_to_j2000_vega() {
        // Vega, B1950: 18h35m14.66s +38°44'09.7"
        // Rigorously precessed (Lieske 1977) to J2000 with no proper motion
        // applied: 18h36m55.41s +38°46'46.85"
        let b1950 = RaDec::new(
            18.0 + 35.0 / 60.0 + 14.66 / 3600.0,
            38.0 + 44.0 / 60.0 + 9.7 / 3600.0,
        );
        let j2000 = precess(b1950, jd_b1950(), jd_j2000());

        let expected_ra = 18.0 + 36.0 / 60.0 + 55.41 / 3600.0;
        let expected_dec = 38.0 + 46.0 / 60.0 + 46.85 / 3600.0;
        // Half a second of time, one arcsecond
        assert_abs_diff_eq!(j2000.ra, expected_ra, epsilon = 0.5 / 3600.0);
        assert_abs_diff_eq!(j2000.dec, expected_dec, epsilon = 1.0 / 3600.0);
    }

    #[test]
    fn test_forward_and_back() {
        let rd = RaDec::new(23.9, 10.0);
        let later = jd_j2000() + 36525.0 * 0.25;
        let there = precess(rd, jd_j2000(), later);
        let back = precess(there, later, jd_j2000());
        // The t^2 terms are evaluated at different t0 going each way, so the
        // two matrices are not exact inverses
        assert_abs_diff_eq!(back.dec, rd.dec, epsilon = 2e-4);
        let dra = (back.ra - rd.ra + 12.0).rem_euclid(24.0) - 12.0;
        assert_abs_diff_eq!(dra, 0.0, epsilon = 2e-4 / 15.0);
    }

    #[test]
    fn test_ra_stays_in_range_near_zero_hours() {
        for ra in [0.0, 0.001, 23.999, 12.0, 6.0, 18.0] {
            let out = precess(RaDec::new(ra, 5.0), jd_j2000(), jd_j2000() + 9000.0);
            assert!((0.0..24.0).contains(&out.ra), "ra {} -> {}", ra, out.ra);
        }
    }
}
