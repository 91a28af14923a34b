//! # Parameter ingestion
//!
//! Reads the `key = value` text format describing an orbit:
//!
//! ```text
//! # HD 4747 orbit
//! name = HD 4747
//! k1 = 0.7554
//! period = 12115.7
//! eccentricity = 0.7334
//! tau = 2450403.1
//! omega = 264.5
//! mean_val = 0.0
//! m_star = 0.82
//! m_true = 63.1
//! ```
//!
//! Keys are trimmed and lower-cased. Values of the keys listed in
//! [`NUMERIC_PARAM_KEYS`] are converted to `f64`; every other value is kept
//! verbatim as text. A numeric key whose value does not parse also stays text,
//! and is reported when an [`crate::rv_model::RvModel`] is built from the map.
//!
//! The same module reads observation lists (one date per line) used to mark
//! measurements on a phase curve.

use std::{collections::BTreeMap, fmt, fs, path::Path};

use nom::{
    bytes::complete::take_till1, character::complete::char, combinator::rest,
    sequence::separated_pair, IResult, Parser,
};
use tracing::{debug, warn};

use crate::{
    constants::{ParamKey, NUMERIC_PARAM_KEYS},
    rv_errors::RvError,
};

/// A parameter value after ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Parameters keyed by their lower-cased name.
pub type ParamMap = BTreeMap<ParamKey, ParamValue>;

fn parse_key_value(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_till1(|c: char| c == '='), char('='), rest).parse(input)
}

fn parse_line(line: &str, line_number: usize) -> Result<(String, ParamValue), RvError> {
    let malformed = |reason: &str| RvError::ParseError {
        line: line_number,
        reason: reason.to_string(),
    };

    let (_, (key, value)) =
        parse_key_value(line).map_err(|_| malformed("expected a single 'key = value' pair"))?;

    if value.contains('=') {
        return Err(malformed("more than one '=' separator"));
    }

    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return Err(malformed("empty key"));
    }
    let value = value.trim();

    let param = if NUMERIC_PARAM_KEYS.contains(&key.as_str()) {
        match value.parse::<f64>() {
            Ok(v) => ParamValue::Number(v),
            Err(_) => {
                warn!(key = %key, value, line = line_number, "numeric parameter kept as text");
                ParamValue::Text(value.to_string())
            }
        }
    } else {
        ParamValue::Text(value.to_string())
    };

    Ok((key, param))
}

/// Parse the content of a parameter file.
///
/// Arguments
/// ---------
/// * `content`: the text of the file.
///
/// Return
/// ------
/// * The parameter map. A key given twice keeps its last value.
///
/// Errors
/// ------
/// * [`RvError::ParseError`] with the 1-based line number when a non-comment line does
///   not hold exactly one `=`.
pub fn parse_params(content: &str) -> Result<ParamMap, RvError> {
    let mut params = ParamMap::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = parse_line(line, idx + 1)?;
        params.insert(key, value);
    }

    debug!(count = params.len(), "parameters parsed");
    Ok(params)
}

/// Read and parse a parameter file, see [`parse_params`].
pub fn parse_paramfile<P: AsRef<Path>>(path: P) -> Result<ParamMap, RvError> {
    let content = fs::read_to_string(path)?;
    parse_params(&content)
}

/// Parse an observation list: one date string per non-empty, non-comment line.
pub fn parse_obslist_str(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read an observation list file, see [`parse_obslist_str`].
pub fn parse_obslist<P: AsRef<Path>>(path: P) -> Result<Vec<String>, RvError> {
    Ok(parse_obslist_str(&fs::read_to_string(path)?))
}

/// Combine dates given on the command line with the dates of an observation list file.
///
/// Return
/// ------
/// * `None` when no date is given at all.
pub fn join_times<P: AsRef<Path>>(
    obs_times: &[String],
    obs_list: Option<P>,
) -> Result<Option<Vec<String>>, RvError> {
    let mut times = obs_times.to_vec();
    if let Some(path) = obs_list {
        times.extend(parse_obslist(path)?);
    }
    debug!(?times, "observation times");

    Ok(if times.is_empty() { None } else { Some(times) })
}
