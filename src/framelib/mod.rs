//! Reference frame transformations
//!
//! Every transform here is a pure function of its inputs. Arguments and
//! results use the value types in [`crate::coordinates`].

pub mod ecliptic;
pub mod galactic;
pub mod horizontal;
pub mod precession;
pub mod projection;

pub use ecliptic::{ecliptic_to_equatorial, mean_obliquity};
pub use galactic::{equatorial_to_galactic, galactic_to_equatorial, north_galactic_pole_j2000};
pub use horizontal::{
    az_alt_to_ra_dec, local_sidereal_time, lst_and_ra_to_longitude, ra_dec_to_az_alt,
};
pub use precession::precess;
pub use projection::{az_alt_to_xy30, az_alt_to_xy85, xy30_to_az_alt, xy85_to_az_alt};
