//! Angle helpers: principal values, sexagesimal formatting and angular separation.

use crate::constants::{Degree, DPI, RADEG};

/// Return the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Split a non-negative quantity into (units, minutes, seconds), rounded to the millisecond.
///
/// When `wrap` is given, the integer part is taken modulo `wrap` so that a value rounding
/// up to the full circle comes back to zero.
fn split_sexagesimal(value: f64, wrap: Option<u64>) -> (u64, u64, f64) {
    let mut ms = (value * 3_600_000.0).round() as u64;
    if let Some(w) = wrap {
        ms %= w * 3_600_000;
    }
    (ms / 3_600_000, (ms / 60_000) % 60, (ms % 60_000) as f64 / 1000.0)
}

/// Format a right ascension as `hh mm ss.sss`.
///
/// Arguments
/// ---------
/// * `ra`: right ascension in degrees, any value (reduced to [0°, 360°)).
///
/// Return
/// ------
/// * The sexagesimal string, e.g. `"03 19 55.680"` for 49.982°.
pub fn ra_to_hms(ra: Degree) -> String {
    let (h, m, s) = split_sexagesimal(ra.rem_euclid(360.0) / 15.0, Some(24));
    format!("{h:02} {m:02} {s:06.3}")
}

/// Format a declination as `±dd mm ss.sss`.
///
/// Arguments
/// ---------
/// * `dec`: declination in degrees.
///
/// Return
/// ------
/// * The sexagesimal string with an explicit sign, e.g. `"-28 51 25.200"` for −28.857°.
pub fn dec_to_dms(dec: Degree) -> String {
    let sign = if dec < 0.0 { '-' } else { '+' };
    let (d, m, s) = split_sexagesimal(dec.abs(), None);
    format!("{sign}{d:02} {m:02} {s:06.3}")
}

/// Great-circle distance between two equatorial positions, all in degrees.
pub fn angular_distance(ra1: Degree, dec1: Degree, ra2: Degree, dec2: Degree) -> Degree {
    let (ra1, dec1, ra2, dec2) = (ra1 * RADEG, dec1 * RADEG, ra2 * RADEG, dec2 * RADEG);
    let cos_d = dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * (ra1 - ra2).cos();
    cos_d.clamp(-1.0, 1.0).acos() / RADEG
}
