//! # Constants and type definitions for rvcurve
//!
//! Physical constants, unit conversions and the solver defaults shared by the
//! radial-velocity core and the visibility tables.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Solar mass expressed in Jupiter masses
pub const SUN_JUPITER_MASS: f64 = 1047.56;

/// Offset subtracted from a Julian date to obtain a reduced Julian date (JD − 2 400 000)
pub const JD_REDUCTION: f64 = 2_400_000.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00)
pub const T2000: f64 = 51544.5;

/// Julian date of J2000.0
pub const JD2000: f64 = 2451545.0;

// -------------------------------------------------------------------------------------------------
// Kepler solver defaults
// -------------------------------------------------------------------------------------------------

/// L1-norm threshold on the eccentric anomaly update between two Newton steps
pub const DEFAULT_KEPLER_TOLERANCE: f64 = 1e-5;

/// Iteration cap of the Newton-Raphson loop
pub const DEFAULT_KEPLER_MAX_ITERATIONS: usize = 10_000;

// -------------------------------------------------------------------------------------------------
// Parameter file vocabulary
// -------------------------------------------------------------------------------------------------

/// Keys of a parameter file that are converted to floating point on ingestion.
pub const NUMERIC_PARAM_KEYS: [&str; 10] = [
    "mean_val",
    "k1",
    "k2",
    "omega",
    "eccentricity",
    "tau",
    "period",
    "m_star",
    "msini",
    "m_true",
];

/// Type alias for a parameter name
pub type ParamKey = String;

/// Angle in degrees
pub type Degree = f64;

/// Julian date in days
pub type JulianDays = f64;
