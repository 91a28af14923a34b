//! Companion semi-amplitude from the host semi-amplitude and the mass ratio.
//!
//! Host and companion move in antiphase around the barycentre, so the
//! companion amplitude carries the opposite sign:
//!
//! ```text
//! k₂ = −k₁ · (m_host · 1047.56) / m_companion
//! ```
//!
//! with `m_host` in solar masses and `m_companion` in Jupiter masses.
//!
//! No inclination correction is applied. A minimum mass (`msini`) and a true
//! mass (`m_true`) give the same result for the same number; correcting
//! `msini` for the inclination is left to the caller.

use tracing::debug;

use crate::{
    constants::SUN_JUPITER_MASS,
    parameters::{ParamMap, ParamValue},
    rv_errors::RvError,
};

/// Semi-amplitude of the companion.
///
/// Arguments
/// ---------
/// * `k_host`: RV semi-amplitude of the host.
/// * `m_host`: host mass in solar masses.
/// * `m_companion`: companion mass in Jupiter masses.
///
/// Errors
/// ------
/// * [`RvError::DivisionError`] if `m_companion` is zero.
pub fn companion_amplitude(k_host: f64, m_host: f64, m_companion: f64) -> Result<f64, RvError> {
    if m_companion == 0.0 {
        return Err(RvError::DivisionError("companion mass is zero".into()));
    }
    let m_host = m_host * SUN_JUPITER_MASS;
    Ok(-k_host * m_host / m_companion)
}

fn numeric(params: &ParamMap, key: &str) -> Result<Option<f64>, RvError> {
    match params.get(key) {
        None => Ok(None),
        Some(ParamValue::Number(v)) => Ok(Some(*v)),
        Some(ParamValue::Text(s)) => Err(RvError::UnconvertedParameter {
            key: key.to_string(),
            value: s.clone(),
        }),
    }
}

/// Return a copy of `params` holding a `k2` entry.
///
/// An existing `k2` is kept. Otherwise it is derived from `k1`, `m_star` and the
/// companion mass, `m_true` taking precedence over `msini`. Without any
/// companion mass the map is returned unchanged.
///
/// Errors
/// ------
/// * [`RvError::MissingParameter`] when a companion mass is given without `k1` or `m_star`.
/// * [`RvError::UnconvertedParameter`] when one of the involved values is text.
/// * [`RvError::DivisionError`] for a zero companion mass.
pub fn with_companion_amplitude(params: &ParamMap) -> Result<ParamMap, RvError> {
    let mut params = params.clone();
    if params.contains_key("k2") {
        return Ok(params);
    }

    let m_companion = match numeric(&params, "m_true")? {
        Some(m) => m,
        None => match numeric(&params, "msini")? {
            Some(m) => m,
            None => {
                debug!("no companion mass, k2 not derived");
                return Ok(params);
            }
        },
    };

    let k_host =
        numeric(&params, "k1")?.ok_or_else(|| RvError::MissingParameter("k1".into()))?;
    let m_host =
        numeric(&params, "m_star")?.ok_or_else(|| RvError::MissingParameter("m_star".into()))?;

    let k2 = companion_amplitude(k_host, m_host, m_companion)?;
    debug!(k2, "companion semi-amplitude derived");
    params.insert("k2".into(), ParamValue::Number(k2));

    Ok(params)
}

#[cfg(test)]
mod companion_test {
    use approx::assert_relative_eq;

    use super::*;

    fn params(entries: &[(&str, ParamValue)]) -> ParamMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_jupiter_mass_cancels_conversion() {
        assert_eq!(companion_amplitude(10.0, 1.0, 1047.56).unwrap(), -10.0);
    }

    #[test]
    fn test_companion_amplitude() {
        assert_relative_eq!(companion_amplitude(0.1, 1.0, 10.0).unwrap(), -10.4756);
        assert_relative_eq!(companion_amplitude(-0.1, 1.2, 5.0).unwrap(), 25.14144);
    }

    #[test]
    fn test_zero_companion_mass() {
        assert_eq!(
            companion_amplitude(1.0, 1.0, 0.0),
            Err(RvError::DivisionError("companion mass is zero".into()))
        );
    }

    #[test]
    fn test_true_mass_preferred() {
        let p = params(&[
            ("k1", 0.1.into()),
            ("m_star", 1.0.into()),
            ("msini", 5.0.into()),
            ("m_true", 10.0.into()),
        ]);
        let out = with_companion_amplitude(&p).unwrap();
        assert_relative_eq!(out["k2"].as_f64().unwrap(), -10.4756);
    }

    #[test]
    fn test_msini_fallback_same_as_true_mass() {
        let with_msini = params(&[("k1", 0.1.into()), ("m_star", 1.0.into()), ("msini", 10.0.into())]);
        let with_true = params(&[("k1", 0.1.into()), ("m_star", 1.0.into()), ("m_true", 10.0.into())]);

        assert_eq!(
            with_companion_amplitude(&with_msini).unwrap()["k2"],
            with_companion_amplitude(&with_true).unwrap()["k2"]
        );
    }

    #[test]
    fn test_existing_k2_kept() {
        let p = params(&[("k1", 0.1.into()), ("m_star", 1.0.into()), ("m_true", 10.0.into()), ("k2", 3.0.into())]);
        assert_eq!(with_companion_amplitude(&p).unwrap()["k2"], ParamValue::Number(3.0));
    }

    #[test]
    fn test_no_companion_mass() {
        let p = params(&[("k1", 0.1.into())]);
        assert!(!with_companion_amplitude(&p).unwrap().contains_key("k2"));
    }

    #[test]
    fn test_missing_host_mass() {
        let p = params(&[("k1", 0.1.into()), ("msini", 10.0.into())]);
        assert_eq!(
            with_companion_amplitude(&p),
            Err(RvError::MissingParameter("m_star".into()))
        );
    }
}
