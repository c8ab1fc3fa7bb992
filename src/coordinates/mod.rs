//! Coordinate value types
//!
//! Right ascension is in decimal hours, every other angle in decimal
//! degrees. The epoch of an equatorial coordinate is not stored; each
//! function documents whether it takes or returns J2000 or "Jnow"
//! (the equinox of date).

pub mod angle;
pub mod cartesian;

use crate::constants::DEG2RAD;
use angle::{degrees_to_hours, hours_to_degrees, wrap_degrees, wrap_hours};
use cartesian::Cartesian3;
use serde::{Deserialize, Serialize};

/// Equatorial coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RaDec {
    /// Right ascension in decimal hours, `[0, 24)`
    pub ra: f64,
    /// Declination in decimal degrees, `[-90, 90]`
    pub dec: f64,
}

impl RaDec {
    /// Right ascension is wrapped into `[0, 24)`
    pub fn new(ra: f64, dec: f64) -> Self {
        RaDec {
            ra: wrap_hours(ra),
            dec,
        }
    }

    /// Create from right ascension and declination both in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(degrees_to_hours(ra_deg), dec_deg)
    }

    /// Right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        hours_to_degrees(self.ra)
    }

    /// Unit vector pointing at this position
    pub fn to_unit_vector(&self) -> Cartesian3 {
        Cartesian3::from_spherical(self.ra_degrees() * DEG2RAD, self.dec * DEG2RAD, 1.0)
    }

    /// Direction of a vector; its length is ignored
    pub fn from_cartesian(cart: &Cartesian3) -> Self {
        let (lon, lat, _) = cart.to_spherical();
        Self::from_degrees(lon.to_degrees(), lat.to_degrees())
    }
}

/// Horizontal coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AzAlt {
    /// Azimuth in degrees clockwise from North, `[0, 360)`
    pub az: f64,
    /// Altitude above the horizon in degrees, `[-90, 90]`
    pub alt: f64,
}

impl AzAlt {
    pub fn new(az: f64, alt: f64) -> Self {
        AzAlt { az, alt }
    }
}

/// Galactic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Galactic {
    /// Galactic longitude in degrees, `[0, 360)`
    pub l: f64,
    /// Galactic latitude in degrees, `[-90, 90]`
    pub b: f64,
}

impl Galactic {
    /// Longitude is wrapped into `[0, 360)`
    pub fn new(l: f64, b: f64) -> Self {
        Galactic {
            l: wrap_degrees(l),
            b,
        }
    }
}

/// Ecliptic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ecliptic {
    /// Ecliptic longitude in degrees
    pub lon: f64,
    /// Ecliptic latitude in degrees
    pub lat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ra_is_wrapped() {
        assert_eq!(RaDec::new(25.0, 10.0).ra, 1.0);
        assert_eq!(RaDec::new(-1.0, 10.0).ra, 23.0);
        assert_eq!(RaDec::from_degrees(90.0, 0.0).ra, 6.0);
    }

    #[test]
    fn test_unit_vector_roundtrip() {
        let rd = RaDec::new(18.5, -42.25);
        let v = rd.to_unit_vector();
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-12);

        let back = RaDec::from_cartesian(&(v * 7.0));
        assert_relative_eq!(back.ra, rd.ra, epsilon = 1e-10);
        assert_relative_eq!(back.dec, rd.dec, epsilon = 1e-10);
    }

    #[test]
    fn test_galactic_longitude_wrapped() {
        assert_eq!(Galactic::new(-10.0, 5.0).l, 350.0);
    }
}
