//! # Phase-curve reporting
//!
//! Turns an [`RvModel`] into the data a plotting front-end needs: the sampled
//! phase curve of the host (and optionally of the companion) together with the
//! phases of past observations. The curve can be written as CSV or rendered as
//! a terminal table with [`comfy_table`].
//!
//! Only the `phase` display mode exists; asking for `time` fails with
//! [`RvError::NotImplemented`] before anything is computed.

use std::{fmt, io::Write, str::FromStr};

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;
use serde::Serialize;

use crate::{rv_errors::RvError, rv_model::full_phase, rv_model::RvModel};

/// How a curve is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Phase,
    Time,
}

impl FromStr for DisplayMode {
    type Err = RvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phase" => Ok(DisplayMode::Phase),
            "time" => Ok(DisplayMode::Time),
            other => Err(RvError::InvalidInput(format!(
                "unknown display mode '{other}', expected 'phase' or 'time'"
            ))),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Phase => write!(f, "phase"),
            DisplayMode::Time => write!(f, "time"),
        }
    }
}

/// One sample of the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveRow {
    pub phase: f64,
    pub rv_host: f64,
    pub rv_companion: Option<f64>,
}

/// A past measurement placed on the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationMark {
    pub jd: f64,
    pub phase: f64,
    pub rv_host: f64,
}

/// Sampled phase curve of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseCurve {
    pub description: String,
    pub rows: Vec<CurveRow>,
    pub observations: Vec<ObservationMark>,
    pub max_amplitude: f64,
}

/// Options of [`PhaseCurve::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurveOptions {
    pub mode: DisplayMode,
    pub center: f64,
    pub points: usize,
    pub companion: bool,
}

impl Default for CurveOptions {
    fn default() -> Self {
        CurveOptions {
            mode: DisplayMode::Phase,
            center: 0.0,
            points: 100,
            companion: false,
        }
    }
}

impl PhaseCurve {
    /// Sample the curve of `model`.
    ///
    /// Arguments
    /// ---------
    /// * `model`: the host model.
    /// * `options`: display mode, phase offset, number of samples, companion curve.
    /// * `obs_jd`: Julian dates of past observations, in the time frame of `tau`.
    ///
    /// Errors
    /// ------
    /// * [`RvError::NotImplemented`] for [`DisplayMode::Time`].
    /// * [`RvError::MissingParameter`] when the companion curve is asked without `k2`.
    /// * Any evaluation error of the model.
    pub fn build(model: &RvModel, options: &CurveOptions, obs_jd: &[f64]) -> Result<Self, RvError> {
        if options.mode == DisplayMode::Time {
            return Err(RvError::NotImplemented(options.mode.to_string()));
        }

        let phases = full_phase(options.center, options.points);
        let rv_host = model.rv_at_phase(&phases)?;
        let rv_companion = if options.companion {
            Some(model.companion()?.rv_at_phase(&phases)?)
        } else {
            None
        };

        let rows = phases
            .iter()
            .zip(rv_host.iter())
            .enumerate()
            .map(|(i, (phase, rv))| CurveRow {
                phase: *phase,
                rv_host: *rv,
                rv_companion: rv_companion.as_ref().map(|c| c[i]),
            })
            .collect();

        let observations = if obs_jd.is_empty() {
            Vec::new()
        } else {
            let obs_phase = model.phase_of_times(obs_jd)?;
            let obs_rv = model.rv_at_times(obs_jd)?;
            obs_jd
                .iter()
                .zip(obs_phase)
                .zip(obs_rv)
                .map(|((jd, phase), rv_host)| ObservationMark {
                    jd: *jd,
                    phase,
                    rv_host,
                })
                .collect()
        };

        Ok(PhaseCurve {
            description: model.to_string(),
            rows,
            observations,
            max_amplitude: model.max_amplitude(),
        })
    }

    /// Write the curve samples as CSV (`phase,rv_host,rv_companion`).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), RvError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the observation marks as CSV (`jd,phase,rv_host`).
    pub fn write_observations_csv<W: Write>(&self, writer: W) -> Result<(), RvError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for obs in &self.observations {
            wtr.serialize(obs)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Extrema of the host curve, `(min, max)`.
    pub fn host_range(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| r.rv_host)
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
    }

    /// Summary table: curve extrema and observation marks.
    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Quantity", "Phase", "RV"]);

        let right = |v: String| Cell::new(v).set_alignment(CellAlignment::Right);

        if let Some((min, max)) = self.host_range() {
            let phase_of = |value: f64| {
                self.rows
                    .iter()
                    .find(|r| r.rv_host == value)
                    .map(|r| format!("{:.4}", r.phase))
                    .unwrap_or_default()
            };
            table.add_row(vec![
                Cell::new("RV min"),
                right(phase_of(min)),
                right(format!("{min:.4}")),
            ]);
            table.add_row(vec![
                Cell::new("RV max"),
                right(phase_of(max)),
                right(format!("{max:.4}")),
            ]);
        }
        table.add_row(vec![
            Cell::new("max amplitude"),
            Cell::new(""),
            right(format!("{:.4}", self.max_amplitude)),
        ]);

        for obs in &self.observations {
            table.add_row(vec![
                Cell::new(format!("obs JD {:.5}", obs.jd)),
                right(format!("{:.4}", obs.phase)),
                right(format!("{:.4}", obs.rv_host)),
            ]);
        }

        table
    }
}

impl fmt::Display for PhaseCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;
        write!(f, "{}", self.summary_table())
    }
}
