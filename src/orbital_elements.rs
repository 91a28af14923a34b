//! # Orbital elements of a spectroscopic orbit
//!
//! [`OrbitalElements`] holds the six quantities needed to evaluate a radial-velocity
//! curve, plus the auxiliary parameters of the source file (masses, `k2`, star name, ...).
//!
//! ## Units
//!
//! - `semi_amplitude`, `gamma`: any velocity unit, the same for both.
//! - `period`, `tau`: any time unit, the same as the evaluation times (usually days / JD).
//! - `omega`: **degrees**. It is converted to radians only when evaluated.
//!
//! ## Parameter vocabulary
//!
//! | key            | field            |
//! |----------------|------------------|
//! | `k1`           | `semi_amplitude` |
//! | `period`       | `period`         |
//! | `eccentricity` | `eccentricity`   |
//! | `tau`          | `tau`            |
//! | `mean_val`     | `gamma`          |
//! | `omega`        | `omega`          |
//!
//! Any other key lands in `extra_params` untouched.

use std::fmt;

use itertools::Itertools;

use crate::{
    constants::{Degree, RADEG},
    parameters::{ParamMap, ParamValue},
    rv_errors::RvError,
};

const FIELD_KEYS: [&str; 6] = ["k1", "period", "eccentricity", "tau", "mean_val", "omega"];

/// Elements of a spectroscopic orbit. All fields default to `0.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrbitalElements {
    pub semi_amplitude: f64,
    pub period: f64,
    pub eccentricity: f64,
    pub tau: f64,
    pub gamma: f64,
    pub omega: Degree,
    pub extra_params: ParamMap,
}

fn field(params: &ParamMap, key: &str) -> Result<f64, RvError> {
    match params.get(key) {
        None => Err(RvError::MissingParameter(key.to_string())),
        Some(ParamValue::Number(v)) => Ok(*v),
        Some(ParamValue::Text(s)) => Err(RvError::UnconvertedParameter {
            key: key.to_string(),
            value: s.clone(),
        }),
    }
}

impl OrbitalElements {
    pub fn new(
        semi_amplitude: f64,
        period: f64,
        eccentricity: f64,
        tau: f64,
        gamma: f64,
        omega: Degree,
    ) -> Self {
        OrbitalElements {
            semi_amplitude,
            period,
            eccentricity,
            tau,
            gamma,
            omega,
            extra_params: ParamMap::new(),
        }
    }

    /// Build the elements from a parameter map.
    ///
    /// Every fixed key must be present; the `0.0` defaults only apply to [`OrbitalElements::new`]
    /// and [`Default`].
    ///
    /// Errors
    /// ------
    /// * [`RvError::MissingParameter`] if one of the fixed keys is absent.
    /// * [`RvError::UnconvertedParameter`] if one of the fixed keys holds text.
    pub fn from_params(params: &ParamMap) -> Result<Self, RvError> {
        let extra_params = params
            .iter()
            .filter(|(k, _)| !FIELD_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(OrbitalElements {
            semi_amplitude: field(params, "k1")?,
            period: field(params, "period")?,
            eccentricity: field(params, "eccentricity")?,
            tau: field(params, "tau")?,
            gamma: field(params, "mean_val")?,
            omega: field(params, "omega")?,
            extra_params,
        })
    }

    /// The fixed fields under their parameter-file keys, followed by the extra parameters.
    pub fn param_dict(&self) -> ParamMap {
        let mut params = self.extra_params.clone();
        params.insert("k1".into(), self.semi_amplitude.into());
        params.insert("period".into(), self.period.into());
        params.insert("eccentricity".into(), self.eccentricity.into());
        params.insert("tau".into(), self.tau.into());
        params.insert("mean_val".into(), self.gamma.into());
        params.insert("omega".into(), self.omega.into());
        params
    }

    /// Numeric value of an extra parameter.
    ///
    /// Errors
    /// ------
    /// * [`RvError::MissingParameter`] if absent, [`RvError::UnconvertedParameter`] if text.
    pub fn extra(&self, key: &str) -> Result<f64, RvError> {
        match self.extra_params.get(key) {
            None => Err(RvError::MissingParameter(key.to_string())),
            Some(ParamValue::Number(v)) => Ok(*v),
            Some(ParamValue::Text(s)) => Err(RvError::UnconvertedParameter {
                key: key.to_string(),
                value: s.clone(),
            }),
        }
    }

    pub fn omega_rad(&self) -> f64 {
        self.omega * RADEG
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RV(semi_amp={}, period={}, ecc={}, tau={}, omega={}, gamma={}, params={{{}}})",
            self.semi_amplitude,
            self.period,
            self.eccentricity,
            self.tau,
            self.omega,
            self.gamma,
            self.extra_params
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .join(", ")
        )
    }
}

#[cfg(test)]
mod orbital_elements_test {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let elem = OrbitalElements::default();
        assert_eq!(elem, OrbitalElements::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_params_and_back() {
        let mut params = ParamMap::new();
        params.insert("k1".into(), 0.7554.into());
        params.insert("period".into(), 12115.7.into());
        params.insert("eccentricity".into(), 0.7334.into());
        params.insert("tau".into(), 2450403.1.into());
        params.insert("mean_val".into(), 1.5.into());
        params.insert("omega".into(), 264.5.into());
        params.insert("name".into(), "HD 4747".into());
        params.insert("m_star".into(), 0.82.into());

        let elem = OrbitalElements::from_params(&params).unwrap();
        assert_eq!(elem.semi_amplitude, 0.7554);
        assert_eq!(elem.gamma, 1.5);
        assert_eq!(elem.omega, 264.5);
        assert_eq!(elem.extra_params.len(), 2);
        assert_eq!(elem.extra("m_star").unwrap(), 0.82);

        assert_eq!(elem.param_dict(), params);
        assert_eq!(OrbitalElements::from_params(&elem.param_dict()).unwrap(), elem);
    }

    fn circular_params() -> ParamMap {
        OrbitalElements::new(5.0, 100.0, 0.0, 10.0, 2.0, 45.0).param_dict()
    }

    #[test]
    fn test_unconverted_field() {
        let mut params = circular_params();
        params.insert("period".into(), "12115,7".into());
        assert_eq!(
            OrbitalElements::from_params(&params),
            Err(RvError::UnconvertedParameter {
                key: "period".into(),
                value: "12115,7".into()
            })
        );
    }

    #[test]
    fn test_misspelled_field() {
        let mut params = circular_params();
        params.remove("eccentricity");
        params.insert("eccentricty".into(), 0.6.into());
        assert_eq!(
            OrbitalElements::from_params(&params),
            Err(RvError::MissingParameter("eccentricity".into()))
        );
    }

    #[test]
    fn test_empty_map() {
        assert_eq!(
            OrbitalElements::from_params(&ParamMap::new()),
            Err(RvError::MissingParameter("k1".into()))
        );
    }

    #[test]
    fn test_extra_lookup() {
        let elem = OrbitalElements::default();
        assert_eq!(elem.extra("k2"), Err(RvError::MissingParameter("k2".into())));
    }

    #[test]
    fn test_display() {
        let mut elem = OrbitalElements::new(1.0, 2.0, 0.1, 3.0, 4.0, 90.0);
        elem.extra_params.insert("name".into(), "HD 1".into());
        assert_eq!(
            elem.to_string(),
            "RV(semi_amp=1, period=2, ecc=0.1, tau=3, omega=90, gamma=4, params={name: HD 1})"
        );
    }
}
