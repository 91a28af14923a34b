//! Orbital kinematics: mean anomaly from time and the radial-velocity equation.

use crate::constants::DPI;

/// Mean anomaly `M = 2π·(t − t0)/P` for each time.
///
/// The result is not wrapped into [0, 2π); the trigonometric functions used
/// downstream are periodic.
///
/// Arguments
/// ---------
/// * `times`: epochs of evaluation, same unit and origin as `t0`.
/// * `t0`: time of periastron passage.
/// * `period`: orbital period.
pub fn mean_anomaly(times: &[f64], t0: f64, period: f64) -> Vec<f64> {
    times.iter().map(|t| DPI * (t - t0) / period).collect()
}

/// Radial velocity `γ + k·(cos(ν + ω) + e·cos ω)` for each true anomaly.
///
/// Arguments
/// ---------
/// * `gamma`: systemic velocity.
/// * `k`: semi-amplitude, same unit as `gamma`.
/// * `true_anomaly`: true anomalies in radians.
/// * `omega`: argument of periastron in **radians**.
/// * `eccentricity`: orbital eccentricity.
pub fn radial_velocity(
    gamma: f64,
    k: f64,
    true_anomaly: &[f64],
    omega: f64,
    eccentricity: f64,
) -> Vec<f64> {
    let ecc_term = eccentricity * omega.cos();
    true_anomaly
        .iter()
        .map(|nu| gamma + k * ((nu + omega).cos() + ecc_term))
        .collect()
}
