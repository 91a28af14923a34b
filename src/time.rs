//! # Calendar dates, Julian dates and sidereal time
//!
//! Observation dates are written `YYYY-MM-DD HH:MM:SS` (UTC), the ISO form
//! `YYYY-MM-DDTHH:MM:SS` and a bare `YYYY-MM-DD` (midnight) are accepted as well.
//! Calendar arithmetic is delegated to [`hifitime`].
//!
//! [`JulianDate`] optionally carries a *reduced* date, `JD − 2 400 000`, the
//! usual convention of RV tables. Reduction returns a new value.

use std::{fmt, str::FromStr};

use hifitime::{Epoch, TimeScale, Unit};
use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{eof, map, map_res, opt},
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};
use tracing::warn;

use crate::{
    constants::{JulianDays, DPI, JDTOMJD, JD_REDUCTION, T2000},
    rv_errors::RvError,
};

type Gregorian = (i32, u8, u8, u8, u8, f64);

fn parse_day(input: &str) -> IResult<&str, (i32, u8, u8)> {
    map(
        (
            map_res(digit1, str::parse::<i32>),
            char('-'),
            map_res(digit1, str::parse::<u8>),
            char('-'),
            map_res(digit1, str::parse::<u8>),
        ),
        |(year, _, month, _, day)| (year, month, day),
    )
    .parse(input)
}

fn parse_clock(input: &str) -> IResult<&str, (u8, u8, f64)> {
    map(
        (
            map_res(digit1, str::parse::<u8>),
            char(':'),
            map_res(digit1, str::parse::<u8>),
            char(':'),
            double,
        ),
        |(hour, _, minute, _, second)| (hour, minute, second),
    )
    .parse(input)
}

fn parse_gregorian(input: &str) -> IResult<&str, Gregorian> {
    map(
        (
            parse_day,
            opt(preceded(alt((char(' '), char('T'))), parse_clock)),
            eof,
        ),
        |((y, mo, d), clock, _)| {
            let (h, mi, s) = clock.unwrap_or((0, 0, 0.0));
            (y, mo, d, h, mi, s)
        },
    )
    .parse(input)
}

/// Parse a UTC calendar date into an [`Epoch`].
///
/// Errors
/// ------
/// * [`RvError::InvalidDate`] if the string does not follow one of the accepted
///   forms or names a day that does not exist.
pub fn parse_epoch(date: &str) -> Result<Epoch, RvError> {
    let invalid = || RvError::InvalidDate(date.to_string());

    let (_, (year, month, day, hour, minute, second)) =
        parse_gregorian(date.trim()).map_err(|_| invalid())?;
    if !(0.0..61.0).contains(&second) {
        return Err(invalid());
    }

    let whole = second.trunc();
    let nanos = ((second - whole) * 1e9).round() as u32;

    Epoch::maybe_from_gregorian(
        year,
        month,
        day,
        hour,
        minute,
        whole as u8,
        nanos,
        TimeScale::UTC,
    )
    .map_err(|_| invalid())
}

/// Current UTC epoch.
pub fn now() -> Result<Epoch, RvError> {
    Ok(Epoch::now()?)
}

/// A Julian date, possibly reduced by 2 400 000 days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    pub jd: JulianDays,
    pub reduced: bool,
}

impl JulianDate {
    pub fn new(jd: JulianDays, reduced: bool) -> Self {
        JulianDate { jd, reduced }
    }

    pub fn from_epoch(epoch: Epoch, reduced: bool) -> Self {
        JulianDate::new(epoch.to_jde_utc_days(), false).with_reduction(reduced)
    }

    /// Parse a calendar date, see [`parse_epoch`] for the accepted forms.
    pub fn parse(date: &str, reduced: bool) -> Result<Self, RvError> {
        Ok(JulianDate::from_epoch(parse_epoch(date)?, reduced))
    }

    /// The reduced form of this date. A date already reduced is returned as is.
    pub fn reduce(self) -> Self {
        if self.reduced {
            self
        } else {
            JulianDate::new(self.jd - JD_REDUCTION, true)
        }
    }

    fn with_reduction(self, reduced: bool) -> Self {
        if reduced {
            self.reduce()
        } else {
            self
        }
    }

    /// Julian date without reduction.
    pub fn full_jd(&self) -> JulianDays {
        if self.reduced {
            let jd = self.jd + JD_REDUCTION;
            if jd > 3_000_000.0 {
                warn!(jd, "reduced julian date above 3 000 000 once restored, is it already a full JD?");
            }
            jd
        } else {
            self.jd
        }
    }

    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_jde_utc(self.full_jd())
    }

    /// Calendar form `YYYY-MM-DD HH:MM:SS` (UTC), rounded to the second.
    pub fn to_date_string(&self) -> String {
        let rounded = self.to_epoch() + 0.5 * Unit::Second;
        let (y, mo, d, h, mi, s, _) = rounded.to_gregorian_utc();
        format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}")
    }
}

impl FromStr for JulianDate {
    type Err = RvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JulianDate::parse(s, false)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.jd)
    }
}

/// Convert observation date strings to Julian dates (reduced when asked).
pub fn strtimes_to_jd<S: AsRef<str>>(
    obs_times: &[S],
    reduced: bool,
) -> Result<Vec<JulianDays>, RvError> {
    obs_times
        .iter()
        .map(|t| JulianDate::parse(t.as_ref(), reduced).map(|jd| jd.jd))
        .collect()
}

/// Julian date → Modified Julian Date.
pub fn jd_to_mjd(jd: JulianDays) -> f64 {
    jd - JDTOMJD
}

/// Greenwich Mean Sidereal Time in radians, in [0, 2π).
///
/// IAU 1982 polynomial for GMST at 0h UT1 plus the rotation accumulated over
/// the fraction of the day.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date, UT1 (UTC is close enough for visibility tables).
pub fn gmst(tjm: f64) -> f64 {
    // GMST at 0h UT1, seconds
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // sidereal / solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;
    let h = tjm.fract() * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}
