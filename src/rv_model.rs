//! # Radial-velocity model
//!
//! [`RvModel`] ties a set of [`OrbitalElements`] to a [`KeplerSolver`] and evaluates
//! the radial velocity of the star either at absolute times or at orbital phases.
//!
//! ```text
//! times ──► mean_anomaly ──► KeplerSolver ──► radial_velocity ──► RV
//!   ▲
//! phase·P + τ
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rvcurve::{orbital_elements::OrbitalElements, rv_model::RvModel};
//!
//! let model = RvModel::new(OrbitalElements::new(10.0, 50.0, 0.2, 0.0, 1.5, 90.0));
//! let curve = model.rv_full_phase(0.0, 100).unwrap();
//! assert_eq!(curve.len(), 100);
//! assert!((curve[0] - curve[99]).abs() < 1e-6);
//! ```

use std::{fmt, path::Path};

use crate::{
    companion::with_companion_amplitude,
    kepler::KeplerSolver,
    kinematics::{mean_anomaly, radial_velocity},
    orbital_elements::OrbitalElements,
    parameters::{parse_paramfile, ParamMap},
    rv_errors::RvError,
};

/// Radial-velocity curve of one body of a binary system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RvModel {
    elements: OrbitalElements,
    solver: KeplerSolver,
}

impl RvModel {
    pub fn new(elements: OrbitalElements) -> Self {
        RvModel {
            elements,
            solver: KeplerSolver::default(),
        }
    }

    /// Replace the Kepler solver configuration.
    pub fn with_solver(mut self, solver: KeplerSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Build a model from a parameter map.
    ///
    /// When the map has no `k2` but carries a companion mass (`m_true` or `msini`),
    /// the companion semi-amplitude is derived and stored with the extra parameters.
    ///
    /// Errors
    /// ------
    /// * [`RvError::MissingParameter`] for an absent fixed key.
    /// * [`RvError::UnconvertedParameter`] for a fixed key holding text.
    /// * Errors of [`with_companion_amplitude`].
    pub fn from_params(params: &ParamMap) -> Result<Self, RvError> {
        let params = with_companion_amplitude(params)?;
        Ok(RvModel::new(OrbitalElements::from_params(&params)?))
    }

    /// Build a model from a `key = value` parameter file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RvError> {
        RvModel::from_params(&parse_paramfile(path)?)
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn solver(&self) -> &KeplerSolver {
        &self.solver
    }

    pub fn param_dict(&self) -> ParamMap {
        self.elements.param_dict()
    }

    fn check_period(&self) -> Result<(), RvError> {
        let period = self.elements.period;
        if period.is_finite() && period > 0.0 {
            Ok(())
        } else {
            Err(RvError::InvalidInput(format!(
                "period must be strictly positive, got {period}"
            )))
        }
    }

    /// Radial velocity at absolute times.
    ///
    /// Arguments
    /// ---------
    /// * `times`: epochs in the unit and origin of `tau` and `period`.
    ///
    /// Return
    /// ------
    /// * One velocity per time, in the unit of `semi_amplitude`.
    ///
    /// Errors
    /// ------
    /// * [`RvError::InvalidInput`] for a non-positive period, an empty buffer or an
    ///   eccentricity outside [0, 1).
    /// * [`RvError::ConvergenceError`] from the Kepler solver.
    pub fn rv_at_times(&self, times: &[f64]) -> Result<Vec<f64>, RvError> {
        self.check_period()?;
        let elem = &self.elements;

        let ma = mean_anomaly(times, elem.tau, elem.period);
        let nu = self.solver.true_anomaly(&ma, elem.eccentricity)?;

        Ok(radial_velocity(
            elem.gamma,
            elem.semi_amplitude,
            &nu,
            elem.omega_rad(),
            elem.eccentricity,
        ))
    }

    pub fn rv_at_time(&self, time: f64) -> Result<f64, RvError> {
        Ok(self.rv_at_times(&[time])?[0])
    }

    /// Radial velocity at orbital phases, `t = phase·period + tau`.
    pub fn rv_at_phase(&self, phase: &[f64]) -> Result<Vec<f64>, RvError> {
        let times: Vec<f64> = phase
            .iter()
            .map(|p| p * self.elements.period + self.elements.tau)
            .collect();
        self.rv_at_times(&times)
    }

    pub fn rv_at_phase_scalar(&self, phase: f64) -> Result<f64, RvError> {
        Ok(self.rv_at_phase(&[phase])?[0])
    }

    /// Radial velocity over one full orbit, see [`full_phase`].
    pub fn rv_full_phase(&self, center: f64, points: usize) -> Result<Vec<f64>, RvError> {
        self.rv_at_phase(&full_phase(center, points))
    }

    /// Largest deviation from the systemic velocity,
    /// `max(|k(1 + e·cos ω)|, |k(1 − e·cos ω)|)`.
    pub fn max_amplitude(&self) -> f64 {
        let elem = &self.elements;
        let ecc_term = elem.eccentricity * elem.omega_rad().cos();
        let amp_1 = elem.semi_amplitude * (1.0 + ecc_term);
        let amp_2 = elem.semi_amplitude * (1.0 - ecc_term);
        amp_1.abs().max(amp_2.abs())
    }

    /// Fold absolute times into orbital phases in [0, 1), phase 0 at periastron.
    pub fn phase_of_times(&self, times: &[f64]) -> Result<Vec<f64>, RvError> {
        self.check_period()?;
        Ok(times
            .iter()
            .map(|t| ((t - self.elements.tau) / self.elements.period).rem_euclid(1.0))
            .collect())
    }

    /// Model of the companion: same orbit, semi-amplitude taken from the `k2` parameter.
    ///
    /// Errors
    /// ------
    /// * [`RvError::MissingParameter`] / [`RvError::UnconvertedParameter`] if `k2` is
    ///   absent or not numeric.
    pub fn companion(&self) -> Result<RvModel, RvError> {
        let k2 = self.elements.extra("k2")?;
        Ok(RvModel {
            elements: OrbitalElements {
                semi_amplitude: k2,
                ..self.elements.clone()
            },
            solver: self.solver,
        })
    }

    /// Same model with the systemic velocity set to zero.
    pub fn without_systemic(&self) -> RvModel {
        RvModel {
            elements: OrbitalElements {
                gamma: 0.0,
                ..self.elements.clone()
            },
            solver: self.solver,
        }
    }
}

impl fmt::Display for RvModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements)
    }
}

/// `points` phases evenly spaced on the closed interval [0, 1], shifted by `center`.
///
/// Both ends are included so that a plotted curve closes on itself.
pub fn full_phase(center: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![center],
        n => {
            let step = 1.0 / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    let phase = if i == n - 1 { 1.0 } else { i as f64 * step };
                    phase + center
                })
                .collect()
        }
    }
}
