//! Sky information tool
//!
//! Prints time, Sun and Moon positions, sunrise and sunset, and (for a
//! target) pointing, refraction and LSRK velocity correction for an
//! observer.
//!
//! Usage:
//!   cargo run --bin sky_info -- --lat 53.24 --lon -2.31 --ra 23.391 --dec 58.808
//!   cargo run --bin sky_info -- --observer site.json --time 2024-03-01T22:00:00Z

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use log::info;
use radiosky::almanac::{sunrise, SunriseSunset};
use radiosky::framelib::{
    az_alt_to_xy30, az_alt_to_xy85, equatorial_to_galactic, local_sidereal_time, precess,
    ra_dec_to_az_alt,
};
use radiosky::planetlib::Body;
use radiosky::radio::observer_velocity_lsrk;
use radiosky::time::{jd_j2000, julian_date_from_datetime, modified_julian_date};
use radiosky::{GeographicPosition, Observer, RaDec};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sky information tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints sky positions, sunrise/sunset and Doppler corrections for an observer",
    long_about = None
)]
struct Args {
    /// Observer description in JSON (overrides --lat/--lon/--height)
    #[arg(short, long)]
    observer: Option<PathBuf>,

    /// Latitude in degrees, North positive
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in degrees, East positive
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,

    /// Height above sea level in metres
    #[arg(long, default_value_t = 0.0)]
    height: f64,

    /// UTC time in RFC 3339 format, defaults to now
    #[arg(short, long)]
    time: Option<DateTime<Utc>>,

    /// Target right ascension in hours, J2000
    #[arg(long, requires = "dec")]
    ra: Option<f64>,

    /// Target declination in degrees, J2000
    #[arg(long, requires = "ra", allow_negative_numbers = true)]
    dec: Option<f64>,

    /// Print the observer configuration as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    dump_config: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<22} {}", format!("{}:", name), value);
}

fn load_observer(args: &Args) -> Result<Observer> {
    match &args.observer {
        Some(path) => {
            info!("Loading observer from {}", path.display());
            Ok(Observer::from_json_file(path)?)
        }
        None => {
            let observer = Observer::at(GeographicPosition::new(args.lat, args.lon, args.height));
            observer.validate()?;
            Ok(observer)
        }
    }
}

fn display_time(dt: &DateTime<Utc>, longitude: f64) {
    print_section_header("Time");
    print_named_value("UTC", dt.to_rfc3339());
    print_named_value("Julian date", format!("{:.6}", julian_date_from_datetime(dt)));
    print_named_value("Modified Julian date", format!("{:.6}", modified_julian_date(dt)));
    print_named_value("GMST (deg)", format!("{:.4}", local_sidereal_time(dt, 0.0)));
    print_named_value("LST (deg)", format!("{:.4}", local_sidereal_time(dt, longitude)));
}

fn display_bodies(observer: &Observer, dt: &DateTime<Utc>) {
    let pos = &observer.position;
    print_section_header("Sun and Moon");
    for body in [Body::Sun, Body::Moon] {
        let (aa, rd) = body.position(pos.latitude, pos.longitude, dt);
        print_named_value(
            body.name(),
            format!(
                "RA {:.4}h Dec {:+.4}°  Az {:.3}° Alt {:+.3}° (apparent {:+.3}°)",
                rd.ra,
                rd.dec,
                aa.az,
                aa.alt,
                observer.apparent_altitude(aa.alt)
            ),
        );
    }

    match sunrise(dt.date_naive(), pos.latitude, pos.longitude) {
        Ok(SunriseSunset::RiseAndSet { rise, set }) => {
            print_named_value("Sunrise", rise.format("%H:%M:%S UTC"));
            print_named_value("Sunset", set.format("%H:%M:%S UTC"));
        }
        Ok(SunriseSunset::PolarDay) => print_named_value("Sunrise", "Sun up all day"),
        Ok(SunriseSunset::PolarNight) => print_named_value("Sunrise", "Sun down all day"),
        Err(e) => print_named_value("Sunrise", format!("unavailable ({})", e)),
    }
}

fn display_target(observer: &Observer, dt: &DateTime<Utc>, rd: RaDec) {
    let pos = &observer.position;
    let aa = ra_dec_to_az_alt(rd, pos.latitude, pos.longitude, dt, true);
    let jnow = precess(rd, jd_j2000(), julian_date_from_datetime(dt));
    let galactic = equatorial_to_galactic(rd);
    let (x85, y85) = az_alt_to_xy85(aa);
    let (x30, y30) = az_alt_to_xy30(aa);

    print_section_header("Target");
    print_named_value("J2000", format!("RA {:.4}h Dec {:+.4}°", rd.ra, rd.dec));
    print_named_value("Jnow", format!("RA {:.4}h Dec {:+.4}°", jnow.ra, jnow.dec));
    print_named_value("Galactic", format!("l {:.4}° b {:+.4}°", galactic.l, galactic.b));
    print_named_value("Horizontal", format!("Az {:.3}° Alt {:+.3}°", aa.az, aa.alt));
    print_named_value(
        format!("Refraction ({:?})", observer.refraction).as_str(),
        format!("{:.5}°", observer.refraction_correction(aa.alt)),
    );
    print_named_value("XY85", format!("X {:+.3}° Y {:+.3}°", x85, y85));
    print_named_value("XY30", format!("X {:+.3}° Y {:+.3}°", x30, y30));
    print_named_value(
        "Observer v (LSRK)",
        format!(
            "{:+.3} km/s",
            observer_velocity_lsrk(rd, pos.latitude, pos.longitude, dt)
        ),
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let observer = load_observer(&args)?;
    if args.dump_config {
        println!("{}", observer.to_json_string()?);
        return Ok(());
    }

    let dt = args.time.unwrap_or_else(Utc::now);
    info!(
        "Observer at {:.4}, {:.4}, {} m",
        observer.position.latitude, observer.position.longitude, observer.position.height
    );

    display_time(&dt, observer.position.longitude);
    display_bodies(&observer, &dt);

    if let (Some(ra), Some(dec)) = (args.ra, args.dec) {
        display_target(&observer, &dt, RaDec::new(ra, dec));
    }

    Ok(())
}
