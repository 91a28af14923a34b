//! # Kepler equation solver
//!
//! Converts mean anomalies into true anomalies for an elliptic orbit by solving
//! Kepler's equation
//!
//! ```text
//! E − e·sin(E) − M = 0
//! ```
//!
//! with a Newton-Raphson iteration started at `E₀ = M`. The whole buffer of mean
//! anomalies is updated at once and the iteration stops when the L1 norm of the
//! update falls below the configured tolerance.
//!
//! The eccentric anomaly is then mapped to the true anomaly with the half-angle
//! form
//!
//! ```text
//! ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))
//! ```
//!
//! which stays well conditioned near the apsides.
//!
//! ## Example
//!
//! ```rust
//! use rvcurve::kepler::KeplerSolver;
//!
//! let solver = KeplerSolver::default();
//! let nu = solver.true_anomaly(&[0.0, 1.0, 3.0], 0.3).unwrap();
//! assert_eq!(nu.len(), 3);
//! ```

use nalgebra::DVector;
use tracing::debug;

use crate::{
    constants::{DEFAULT_KEPLER_MAX_ITERATIONS, DEFAULT_KEPLER_TOLERANCE},
    rv_errors::RvError,
};

/// Newton-Raphson configuration for Kepler's equation.
///
/// Fields
/// ------
/// * `tolerance`: threshold on the L1 norm of the eccentric-anomaly update.
/// * `max_iterations`: number of Newton steps after which the solve fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            tolerance: DEFAULT_KEPLER_TOLERANCE,
            max_iterations: DEFAULT_KEPLER_MAX_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        KeplerSolver {
            tolerance,
            max_iterations,
        }
    }

    /// Solve Kepler's equation for every mean anomaly of the buffer.
    ///
    /// Arguments
    /// ---------
    /// * `mean_anomaly`: mean anomalies in radians (not required to be wrapped).
    /// * `eccentricity`: orbital eccentricity, in [0, 1).
    ///
    /// Return
    /// ------
    /// * The eccentric anomalies, in the same order as the input.
    ///
    /// Errors
    /// ------
    /// * [`RvError::InvalidInput`] for an empty buffer or an eccentricity outside [0, 1).
    /// * [`RvError::ConvergenceError`] when `max_iterations` Newton steps were not enough.
    pub fn eccentric_anomaly(
        &self,
        mean_anomaly: &[f64],
        eccentricity: f64,
    ) -> Result<Vec<f64>, RvError> {
        check_eccentricity(eccentricity)?;
        if mean_anomaly.is_empty() {
            return Err(RvError::InvalidInput("an empty array was given".into()));
        }

        let ma = DVector::from_column_slice(mean_anomaly);
        let mut ea = ma.clone();
        let mut iteration = 0;

        // The loop body always runs once: E₀ = M can already be an exact root.
        loop {
            let ea0 = ea;
            ea = ea0.zip_map(&ma, |e_k, m| {
                let f = e_k - eccentricity * e_k.sin() - m;
                let df = 1.0 - eccentricity * e_k.cos();
                e_k - f / df
            });

            let step = (&ea - &ea0).lp_norm(1);

            iteration += 1;
            if iteration >= self.max_iterations {
                return Err(RvError::ConvergenceError {
                    iterations: iteration,
                    last_step: step,
                });
            }

            // NaN never satisfies the test, so a diverging buffer ends on the cap.
            if step <= self.tolerance {
                break;
            }
        }

        debug!(
            iterations = iteration,
            samples = mean_anomaly.len(),
            eccentricity,
            "Kepler equation converged"
        );

        Ok(ea.as_slice().to_vec())
    }

    /// Compute the true anomaly for every mean anomaly of the buffer.
    ///
    /// The result lies in (−π, π]. See [`KeplerSolver::eccentric_anomaly`] for the errors.
    pub fn true_anomaly(&self, mean_anomaly: &[f64], eccentricity: f64) -> Result<Vec<f64>, RvError> {
        let ea = self.eccentric_anomaly(mean_anomaly, eccentricity)?;

        let sqrt_plus = (1.0 + eccentricity).sqrt();
        let sqrt_minus = (1.0 - eccentricity).sqrt();

        Ok(ea
            .into_iter()
            .map(|e_k| {
                let half = e_k / 2.0;
                2.0 * (sqrt_plus * half.sin()).atan2(sqrt_minus * half.cos())
            })
            .collect())
    }

    /// Scalar convenience over [`KeplerSolver::true_anomaly`].
    pub fn true_anomaly_scalar(&self, mean_anomaly: f64, eccentricity: f64) -> Result<f64, RvError> {
        let nu = self.true_anomaly(&[mean_anomaly], eccentricity)?;
        Ok(nu[0])
    }
}

/// True anomaly of a buffer of mean anomalies, with the default tolerance and
/// an explicit iteration cap.
pub fn true_anomaly(
    mean_anomaly: &[f64],
    eccentricity: f64,
    max_iterations: usize,
) -> Result<Vec<f64>, RvError> {
    KeplerSolver {
        max_iterations,
        ..KeplerSolver::default()
    }
    .true_anomaly(mean_anomaly, eccentricity)
}

fn check_eccentricity(eccentricity: f64) -> Result<(), RvError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(RvError::InvalidInput(format!(
            "eccentricity must lie in [0, 1), got {eccentricity}"
        )))
    }
}
