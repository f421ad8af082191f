//! # End-of-run state
//!
//! Orbital elements at the end of a long integration oscillate on secular timescales, so a
//! single last sample is rarely representative. [`Trajectory::final_state`] reduces every
//! element over the **last hundredth** of the run (at least one timestep) and recomputes
//! the Kozai–Lidov constant from the reduced `e` and `i`.
//!
//! ```rust,no_run
//! use ninetraj::result_file::LoadOptions;
//! use ninetraj::trajectory::{load_trajectory, Reduction, TimeUnit};
//!
//! # fn run() -> Result<(), ninetraj::nine_errors::NineError> {
//! let trajectory = load_trajectory("run/planets.bel", &LoadOptions::default())?;
//! let last = trajectory.final_state(TimeUnit::Kiloyears, Reduction::Median)?;
//! println!("{last}");
//! # Ok(()) }
//! ```
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use nalgebra::DMatrix;
use serde::Serialize;

use crate::constants::{AstronomicalUnit, BodyName, Degree};
use crate::kozai::theta;
use crate::nine_errors::NineError;
use crate::result_file::RecordKind;

use super::{Quantity, TimeUnit, Trajectory};

/// How the samples of the final window are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    #[default]
    Mean,
    Median,
    /// Value of the last timestep only.
    Last,
}

impl Reduction {
    fn apply(&self, window: &[f64]) -> f64 {
        match self {
            Reduction::Mean => window.iter().sum::<f64>() / window.len() as f64,
            Reduction::Median => {
                let sorted = window.iter().copied().sorted_by(f64::total_cmp).collect_vec();
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    0.5 * (sorted[mid - 1] + sorted[mid])
                } else {
                    sorted[mid]
                }
            }
            Reduction::Last => window[window.len() - 1],
        }
    }
}

impl FromStr for Reduction {
    type Err = NineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Reduction::Mean),
            "median" => Ok(Reduction::Median),
            "last" => Ok(Reduction::Last),
            other => Err(NineError::InvalidLoadOption(format!(
                "unknown reduction '{other}' (expected mean, median or last)"
            ))),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reduction::Mean => "mean",
            Reduction::Median => "median",
            Reduction::Last => "last",
        })
    }
}

/// Reduced elements of one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalBodyState {
    pub name: BodyName,
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub argument_of_periapsis: Degree,
    /// Θ of the reduced `e` and `i` (not the reduction of the Θ series).
    pub kozai_theta: f64,
}

/// Reduced elements of every body at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalState {
    /// Last time of the run in `unit`, truncated toward zero.
    pub time: f64,
    pub unit: TimeUnit,
    pub reduction: Reduction,
    /// Number of trailing timesteps reduced.
    pub window: usize,
    pub bodies: Vec<FinalBodyState>,
}

impl fmt::Display for FinalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "t = {} {} ({} of the last {} timestep(s))",
            self.time, self.unit, self.reduction, self.window
        )?;
        let width = self
            .bodies
            .iter()
            .map(|b| b.name.chars().count())
            .max()
            .unwrap_or(0);
        for body in &self.bodies {
            writeln!(
                f,
                "{:<width$}  a = {:>10.6} AU  e = {:.6}  i = {:>10.5}°  ω = {:>10.5}°  Θ = {:.6}",
                body.name,
                body.semi_major_axis,
                body.eccentricity,
                body.inclination,
                body.argument_of_periapsis,
                body.kozai_theta,
            )?;
        }
        Ok(())
    }
}

impl Trajectory {
    /// Number of trailing timesteps reduced by [`Trajectory::final_state`].
    pub fn final_window(&self) -> usize {
        (self.timestep_count() / 100).max(1)
    }

    /// Reduce the orbital elements of every body over the final window.
    ///
    /// Arguments
    /// ---------
    /// * `unit`: unit of the reported final time
    /// * `reduction`: how the samples of the window are combined
    ///
    /// Return
    /// ------
    /// * The [`FinalState`], bodies in trajectory order
    /// * [`NineError::UnsupportedKind`] for a coordinates trajectory
    pub fn final_state(&self, unit: TimeUnit, reduction: Reduction) -> Result<FinalState, NineError> {
        if self.kind() != RecordKind::Elements {
            return Err(NineError::UnsupportedKind(format!(
                "{} (final state needs orbital elements)",
                self.kind()
            )));
        }

        let window = self.final_window();
        let start = self.timestep_count() - window;
        let reduce = |matrix: &DMatrix<f64>, body: usize| -> f64 {
            let samples = matrix.view((body, start), (1, window)).iter().copied().collect_vec();
            reduction.apply(&samples)
        };

        let a = self.quantity(Quantity::SemiMajorAxis)?;
        let e = self.quantity(Quantity::Eccentricity)?;
        let i = self.quantity(Quantity::Inclination)?;
        let o = self.quantity(Quantity::ArgumentOfPeriapsis)?;

        let bodies = self
            .body_names()
            .iter()
            .enumerate()
            .map(|(n, name)| {
                let eccentricity = reduce(e, n);
                let inclination = reduce(i, n);
                FinalBodyState {
                    name: name.clone(),
                    semi_major_axis: reduce(a, n),
                    eccentricity,
                    inclination,
                    argument_of_periapsis: reduce(o, n),
                    kozai_theta: theta(eccentricity, inclination),
                }
            })
            .collect();

        let last_day = self.time_days()[self.timestep_count() - 1];
        Ok(FinalState {
            time: unit.from_days(last_day).trunc(),
            unit,
            reduction,
            window,
            bodies,
        })
    }
}
