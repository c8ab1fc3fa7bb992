//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Days in a Julian year
pub const JULIAN_YEAR_DAYS: f64 = 365.25;
/// Days in a tropical century (used by the B1950-based precession model)
pub const TROPICAL_CENTURY_DAYS: f64 = 36_524.219_878;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Offset between Julian date and modified Julian date
pub const MJD_OFFSET: f64 = 2_400_000.5;
/// Julian date of the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Degrees of rotation per hour of right ascension
pub const DEG_PER_HOUR: f64 = 360.0 / 24.0;

// Physics
/// Speed of light in m/s
pub const C: f64 = 299_792_458.0;
/// Boltzmann constant in J/K
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Mass of a hydrogen atom in kg (taken equal to the proton mass)
pub const HYDROGEN_MASS: f64 = 1.674e-27;

// Earth constants
/// Equatorial rotation speed of the Earth's surface in km/s
/// (circumference over one sidereal day)
pub const EARTH_ROTATION_SPEED_KMS: f64 = 0.4655;
/// Zero-Celsius in Kelvin
pub const ZERO_CELSIUS_K: f64 = 273.15;

// Derived constants
/// AU per day to km per second
pub const AUDAY_TO_KMS: f64 = AU_KM / DAY_S;

// Spectral lines
/// Neutral hydrogen 21cm line frequency in Hz
pub const HYDROGEN_LINE_HZ: f64 = 1_420_405_751.768;
/// Strongest hydroxyl line frequency in Hz
pub const HYDROXYL_LINE_HZ: f64 = 1_612_231_000.0;
/// Deuterium line frequency in Hz
pub const DEUTERIUM_LINE_HZ: f64 = 327_384_000.0;
