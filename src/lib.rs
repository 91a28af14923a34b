//! # rvcurve
//!
//! Radial-velocity curves of a star perturbed by an orbiting companion, from its
//! Keplerian elements, and visibility tables of targets from an observing site.
//!
//! ## Pipeline
//!
//! 1. [`parameters`] reads a `key = value` parameter file into a [`parameters::ParamMap`].
//! 2. [`rv_model::RvModel`] is built from that map ([`companion`] fills in `k2`).
//! 3. Evaluation goes through [`kinematics::mean_anomaly`], the
//!    [`kepler::KeplerSolver`] and [`kinematics::radial_velocity`].
//! 4. [`report::PhaseCurve`] samples the curve for display or CSV export.
//!
//! ```rust
//! use rvcurve::{parameters::parse_params, rv_model::RvModel};
//!
//! let params = parse_params(
//!     "k1 = 0.5\nperiod = 365.25\neccentricity = 0.1\ntau = 2450000.0\nomega = 30\nmean_val = 2.0\n",
//! )
//! .unwrap();
//! let model = RvModel::from_params(&params).unwrap();
//! let rv = model.rv_at_times(&[2450100.0, 2450200.0]).unwrap();
//! assert_eq!(rv.len(), 2);
//! ```

pub mod companion;
pub mod constants;
pub mod conversion;
pub mod kepler;
pub mod kinematics;
pub mod logger;
pub mod orbital_elements;
pub mod parameters;
pub mod report;
pub mod rv_errors;
pub mod rv_model;
pub mod time;
pub mod visibility;
