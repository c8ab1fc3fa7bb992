//! Equatorial (J2000) <-> Galactic coordinates
//!
//! Closed-form spherical trigonometry about the J2000 North Galactic Pole.

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::coordinates::angle::{clamp_unit, wrap_degrees, wrap_hours};
use crate::coordinates::{Galactic, RaDec};
use std::f64::consts::PI;

/// NGP right ascension, J2000, degrees
const NGP_RA_DEG: f64 = 192.859_481_3;
/// NGP declination, J2000, degrees
const NGP_DEC_DEG: f64 = 27.128_251_1;
/// Galactic longitude of the ascending node of the galactic plane on the equator
const ASCENDING_NODE_L_DEG: f64 = 32.931_92;
/// Galactic longitude of the North Celestial Pole
const NCP_L_DEG: f64 = ASCENDING_NODE_L_DEG + 90.0;

/// The North Galactic Pole in J2000 equatorial coordinates
pub fn north_galactic_pole_j2000() -> RaDec {
    RaDec::from_degrees(NGP_RA_DEG, NGP_DEC_DEG)
}

/// J2000 equatorial to Galactic; longitude in `[0, 360)`
pub fn equatorial_to_galactic(rd: RaDec) -> Galactic {
    let ra = rd.ra_degrees() * DEG2RAD;
    let dec = rd.dec * DEG2RAD;
    let ngp_ra = NGP_RA_DEG * DEG2RAD;
    let ngp_dec = NGP_DEC_DEG * DEG2RAD;

    let b = clamp_unit(ngp_dec.sin() * dec.sin() + ngp_dec.cos() * dec.cos() * (ra - ngp_ra).cos())
        .asin();
    let l = (dec.sin() - b.sin() * ngp_dec.sin())
        .atan2(dec.cos() * ngp_dec.cos() * (ra - ngp_ra).sin());

    Galactic::new(wrap_degrees(l * RAD2DEG + ASCENDING_NODE_L_DEG), b * RAD2DEG)
}

/// Galactic to J2000 equatorial; right ascension in `[0, 24)`
pub fn galactic_to_equatorial(g: Galactic) -> RaDec {
    let l = g.l * DEG2RAD;
    let b = g.b * DEG2RAD;
    let ngp_ra = NGP_RA_DEG * DEG2RAD;
    let ngp_dec = NGP_DEC_DEG * DEG2RAD;
    let ncp_l = NCP_L_DEG * DEG2RAD;

    let dec = clamp_unit(b.sin() * ngp_dec.sin() + b.cos() * ngp_dec.cos() * (l - ncp_l).cos())
        .asin();

    let y = (l - ncp_l).sin();
    let x = (l - ncp_l).cos() * ngp_dec.sin() - b.tan() * ngp_dec.cos();
    let ra = y.atan2(x) + (ngp_ra - PI);

    RaDec {
        ra: wrap_hours(ra * RAD2DEG / 15.0),
        dec: dec * RAD2DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pole_maps_to_b90() {
        let g = equatorial_to_galactic(north_galactic_pole_j2000());
        assert_abs_diff_eq!(g.b, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_galactic_centre() {
        // Sgr A* direction, 17h45.6m -28°56'
        let g = equatorial_to_galactic(RaDec::new(17.76, -28.94));
        let dl = wrap_degrees(g.l + 180.0) - 180.0;
        assert!(dl.abs() < 0.1, "l = {}", g.l);
        assert!(g.b.abs() < 0.1, "b = {}", g.b);
    }

    #[test]
    fn test_equinox_direction() {
        let g = equatorial_to_galactic(RaDec::new(0.0, 0.0));
        assert_abs_diff_eq!(g.l, 96.337, epsilon = 1e-3);
        assert_abs_diff_eq!(g.b, -60.189, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip_random() {
        let mut rng = StdRng::seed_from_u64(1420);
        for _ in 0..500 {
            let rd = RaDec::new(rng.gen_range(0.0..24.0), rng.gen_range(-85.0..85.0));
            let back = galactic_to_equatorial(equatorial_to_galactic(rd));
            assert_abs_diff_eq!(back.dec, rd.dec, epsilon = 1e-9);
            let dra = (back.ra - rd.ra + 12.0).rem_euclid(24.0) - 12.0;
            assert!(dra.abs() < 1e-9, "ra {} -> {}", rd.ra, back.ra);
        }
    }

    #[test]
    fn test_output_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let g = Galactic::new(rng.gen_range(0.0..360.0), rng.gen_range(-89.0..89.0));
            let rd = galactic_to_equatorial(g);
            assert!((0.0..24.0).contains(&rd.ra));
            let g2 = equatorial_to_galactic(rd);
            assert!((0.0..360.0).contains(&g2.l));
        }
    }
}
