//! # Target visibility over one night
//!
//! Altitude of a list of targets, seen from an [`Observatory`], over the 24 hours
//! centred on 0h UTC of a given date and sampled every 3 minutes. Each sample is
//! tagged with the sky condition derived from the altitude of the Sun, and with the
//! angular distance between the target and the Moon:
//!
//! | Sun altitude      | condition  |
//! |-------------------|------------|
//! | ≥ 0°              | day        |
//! | between −18° and 0° | twilight |
//! | ≤ −18°            | night      |
//!
//! The horizontal coordinates come from the local sidereal time (GMST plus the
//! site longitude) and the usual spherical transform. Precession, nutation and
//! refraction are neglected: the tables are meant for planning, not pointing.
//!
//! ```rust
//! use rvcurve::visibility::{night_tracks, Observatory, Target};
//!
//! let site = Observatory::from_code("esolasilla").unwrap();
//! let target = Target::new("HD20010", 49.982, -28.857);
//! let tracks = night_tracks(2459215.5, &[target], site);
//! assert_eq!(tracks[0].samples.len(), 480);
//! ```

pub mod observatories;
pub mod targets;

use std::{fmt, io::Write};

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use serde::Serialize;
use tracing::debug;

use crate::{
    constants::{Degree, JulianDays, JD2000, RADEG},
    conversion::{angular_distance, principal_angle},
    rv_errors::RvError,
    time::{gmst, jd_to_mjd},
};

pub use observatories::{valid_codes, Observatory};
pub use targets::{parse_targets, Target};

/// Sampling step of the tracks: 3 minutes.
pub const JD_BIN_SIZE: f64 = 1.0 / 24.0 / 20.0;

/// Sun altitude separating twilight from night (astronomical twilight).
pub const TWILIGHT_LIMIT: Degree = -18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyCondition {
    Day,
    Twilight,
    Night,
}

impl SkyCondition {
    pub fn from_sun_altitude(sun_altitude: Degree) -> Self {
        if sun_altitude >= 0.0 {
            SkyCondition::Day
        } else if sun_altitude > TWILIGHT_LIMIT {
            SkyCondition::Twilight
        } else {
            SkyCondition::Night
        }
    }
}

impl fmt::Display for SkyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkyCondition::Day => "day",
            SkyCondition::Twilight => "twilight",
            SkyCondition::Night => "night",
        };
        write!(f, "{s}")
    }
}

/// Low-precision apparent position of the Sun, `(ra, dec)` in degrees.
///
/// Astronomical Almanac formula, good to about 0.01° between 1950 and 2050.
pub fn sun_position(jd: JulianDays) -> (Degree, Degree) {
    let n = jd - JD2000;
    let mean_longitude = 280.460 + 0.9856474 * n;
    let mean_anomaly = (357.528 + 0.9856003 * n) * RADEG;

    let ecliptic_longitude = (mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
        * RADEG;
    let obliquity = (23.439 - 0.0000004 * n) * RADEG;

    let ra = (obliquity.cos() * ecliptic_longitude.sin()).atan2(ecliptic_longitude.cos());
    let dec = (obliquity.sin() * ecliptic_longitude.sin()).asin();

    (principal_angle(ra) / RADEG, dec / RADEG)
}

/// Low-precision geocentric position of the Moon, `(ra, dec)` in degrees.
///
/// Truncated series of the Astronomical Almanac, a few tenths of a degree over
/// 1950-2050. Topocentric parallax (up to 1°) is ignored.
pub fn moon_position(jd: JulianDays) -> (Degree, Degree) {
    let n = jd - JD2000;
    let t = n / 36525.0;
    let s = |deg: f64| (deg * RADEG).sin();

    let longitude = 218.32 + 481267.881 * t + 6.29 * s(135.0 + 477198.87 * t)
        - 1.27 * s(259.3 - 413335.36 * t)
        + 0.66 * s(235.7 + 890534.22 * t)
        + 0.21 * s(269.9 + 954397.74 * t)
        - 0.19 * s(357.5 + 35999.05 * t)
        - 0.11 * s(186.5 + 966404.03 * t);
    let latitude = 5.13 * s(93.3 + 483202.02 * t) + 0.28 * s(228.2 + 960400.89 * t)
        - 0.28 * s(318.3 + 6003.15 * t)
        - 0.17 * s(217.6 - 407332.21 * t);

    let (lambda, beta) = (longitude * RADEG, latitude * RADEG);
    let obliquity = (23.439 - 0.0000004 * n) * RADEG;

    let ra = (lambda.sin() * obliquity.cos() - beta.tan() * obliquity.sin()).atan2(lambda.cos());
    let dec = (beta.sin() * obliquity.cos() + beta.cos() * obliquity.sin() * lambda.sin()).asin();

    (principal_angle(ra) / RADEG, dec / RADEG)
}

/// Local mean sidereal time of a site, radians in [0, 2π).
pub fn local_sidereal_time(jd: JulianDays, longitude: Degree) -> f64 {
    principal_angle(gmst(jd_to_mjd(jd)) + longitude * RADEG)
}

/// Altitude in degrees of an equatorial position seen from a site at a given date.
pub fn altitude(jd: JulianDays, ra: Degree, dec: Degree, site: &Observatory) -> Degree {
    let hour_angle = local_sidereal_time(jd, site.longitude) - ra * RADEG;
    let (dec, lat) = (dec * RADEG, site.latitude * RADEG);

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * hour_angle.cos();
    sin_alt.clamp(-1.0, 1.0).asin() / RADEG
}

/// Plane-parallel airmass `sec z`, only defined above the horizon.
pub fn airmass(altitude: Degree) -> Option<f64> {
    (altitude > 0.0).then(|| 1.0 / (altitude * RADEG).sin())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilitySample {
    pub jd: JulianDays,
    pub altitude: Degree,
    pub airmass: Option<f64>,
    pub sun_altitude: Degree,
    pub sky: SkyCondition,
    pub moon_distance: Degree,
}

/// Altitude of one target over the night.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTrack {
    pub target: Target,
    pub samples: Vec<VisibilitySample>,
}

impl VisibilityTrack {
    /// Highest sample, if any.
    pub fn culmination(&self) -> Option<&VisibilitySample> {
        self.samples
            .iter()
            .max_by(|a, b| a.altitude.total_cmp(&b.altitude))
    }

    /// Time spent above `min_altitude` during the night proper, in hours.
    pub fn hours_observable(&self, min_altitude: Degree) -> f64 {
        let count = self
            .samples
            .iter()
            .filter(|s| s.sky == SkyCondition::Night && s.altitude >= min_altitude)
            .count();
        count as f64 * JD_BIN_SIZE * 24.0
    }
}

/// Julian dates of the sampling grid: `[jd − 0.5, jd + 0.5)` every [`JD_BIN_SIZE`].
pub fn night_grid(jd: JulianDays) -> Vec<JulianDays> {
    let start = jd - 0.5;
    let count = (1.0 / JD_BIN_SIZE).round() as usize;
    (0..count).map(|i| start + i as f64 * JD_BIN_SIZE).collect()
}

/// Visibility tracks of every target around `jd` (0h UTC of the night's date).
pub fn night_tracks(jd: JulianDays, targets: &[Target], site: &Observatory) -> Vec<VisibilityTrack> {
    let grid = night_grid(jd);
    let sun: Vec<Degree> = grid
        .iter()
        .map(|&t| {
            let (ra, dec) = sun_position(t);
            altitude(t, ra, dec, site)
        })
        .collect();
    let moon: Vec<(Degree, Degree)> = grid.iter().map(|&t| moon_position(t)).collect();

    debug!(site = site.code, targets = targets.len(), samples = grid.len(), "visibility grid");

    targets
        .iter()
        .map(|target| VisibilityTrack {
            target: target.clone(),
            samples: grid
                .iter()
                .zip(sun.iter())
                .zip(moon.iter())
                .map(|((&t, &sun_altitude), &(moon_ra, moon_dec))| {
                    let alt = altitude(t, target.ra, target.dec, site);
                    VisibilitySample {
                        jd: t,
                        altitude: alt,
                        airmass: airmass(alt),
                        sun_altitude,
                        sky: SkyCondition::from_sun_altitude(sun_altitude),
                        moon_distance: angular_distance(target.ra, target.dec, moon_ra, moon_dec),
                    }
                })
                .collect(),
        })
        .collect()
}

#[derive(Serialize)]
struct CsvRow<'a> {
    target: &'a str,
    jd: JulianDays,
    altitude: Degree,
    airmass: Option<f64>,
    sun_altitude: Degree,
    sky: SkyCondition,
    moon_distance: Degree,
}

/// Write every sample of every track as CSV.
pub fn write_tracks_csv<W: Write>(tracks: &[VisibilityTrack], writer: W) -> Result<(), RvError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for track in tracks {
        for s in &track.samples {
            wtr.serialize(CsvRow {
                target: &track.target.name,
                jd: s.jd,
                altitude: s.altitude,
                airmass: s.airmass,
                sun_altitude: s.sun_altitude,
                sky: s.sky,
                moon_distance: s.moon_distance,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// One line per target: culmination, hours observable above 30° and closest approach of the Moon.
pub fn summary_table(tracks: &[VisibilityTrack]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#",
        "Target",
        "Max alt [deg]",
        "at JD",
        "Night hours > 30 deg",
        "Min Moon dist [deg]",
    ]);

    for (n, track) in tracks.iter().enumerate() {
        let (max_alt, at_jd) = track
            .culmination()
            .map(|s| (format!("{:.1}", s.altitude), format!("{:.4}", s.jd)))
            .unwrap_or_default();
        let moon_min = track
            .samples
            .iter()
            .map(|s| s.moon_distance)
            .min_by(f64::total_cmp)
            .map(|d| format!("{d:.0}"))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(format!("[{:2}]", n + 1)),
            Cell::new(&track.target.name),
            Cell::new(max_alt).set_alignment(CellAlignment::Right),
            Cell::new(at_jd).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", track.hours_observable(30.0)))
                .set_alignment(CellAlignment::Right),
            Cell::new(moon_min).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
