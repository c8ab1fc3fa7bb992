//! Radiosky: positional astronomy for radio telescopes
//!
//! This crate provides the time, coordinate and ephemeris calculations a
//! small radio (or optical) telescope needs to point at a source and to
//! correct what it measures:
//!
//! - Julian dates, sidereal time and precession
//! - equatorial, horizontal, galactic and ecliptic coordinates, plus the
//!   XY85 and XY30 mount projections
//! - Sun and Moon positions, sunrise and sunset
//! - optical and radio atmospheric refraction
//! - the Earth's heliocentric and barycentric position and velocity
//! - Doppler and LSRK velocity corrections, thermal noise power
//!
//! Right ascension is in decimal hours and every other angle in decimal
//! degrees. Longitude is East positive and azimuth runs clockwise from
//! North.
//!
//! ```rust
//! use radiosky::framelib::ra_dec_to_az_alt;
//! use radiosky::time::utc_datetime;
//! use radiosky::RaDec;
//!
//! let dt = utc_datetime(2024, 3, 1, 22, 0, 0).unwrap();
//! let cas_a = RaDec::new(23.391, 58.808);
//! let aa = ra_dec_to_az_alt(cas_a, 53.24, -2.31, &dt, true);
//! assert!(aa.alt > 0.0);
//! ```

use thiserror::Error;

pub mod almanac;
pub mod constants;
pub mod coordinates;
pub mod ephemeris;
pub mod framelib;
pub mod observer;
pub mod planetlib;
pub mod radio;
pub mod refraction;
pub mod time;

// Re-export commonly used types
pub use almanac::SunriseSunset;
pub use coordinates::{AzAlt, Ecliptic, Galactic, RaDec};
pub use ephemeris::{EarthState, EphemerisStatus};
pub use observer::{Atmosphere, GeographicPosition, Observer};
pub use refraction::RefractionModel;

/// Main error type for the radiosky library
#[derive(Debug, Error)]
pub enum RadioskyError {
    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] observer::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for radiosky operations
pub type Result<T> = std::result::Result<T, RadioskyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: RadioskyError = time::TimeError::OutOfRange(f64::INFINITY).into();
        assert!(err.to_string().starts_with("Time error"));

        let err: RadioskyError = observer::ConfigError::Invalid("latitude".into()).into();
        assert!(matches!(err, RadioskyError::Config(_)));
    }
}
