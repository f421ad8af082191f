//! # ninetraj
//!
//! Reader for the plain-text result files of the **nine** N-body integrator.
//!
//! A result file lists one record per body per timestep under a column-label header,
//! without declaring how many bodies or timesteps it holds. This crate recovers that
//! structure from the record stream and turns the file into dense per-body time series:
//!
//! * [`result_file`] – record kinds (`.bel` orbital elements, `.bco` coordinates), header
//!   canonicalization and structure inference.
//! * [`trajectory`] – two-pass materialization into `(body, timestep)` matrices, time-axis
//!   views and end-of-run reductions.
//! * [`kozai`] – the Kozai–Lidov constant `Θ = (1 − e²)·cos²(i)`.
//! * [`conversion`] – Jovian/solar mass conversions and Fortran number parsing.
//!
//! ```rust,no_run
//! use ninetraj::{load_trajectory, LoadOptions, Quantity, TimeUnit};
//!
//! # fn run() -> Result<(), ninetraj::NineError> {
//! let trajectory = load_trajectory("run/planets.bel", &LoadOptions::default())?;
//! let e = trajectory.quantity(Quantity::Eccentricity)?;
//! let t = trajectory.time(TimeUnit::Kiloyears);
//! println!("e of {} at {} kyr: {}", trajectory.body_names()[1], t[0], e[(1, 0)]);
//! # Ok(()) }
//! ```
pub mod constants;
pub mod conversion;
pub mod kozai;
pub mod nine_errors;
pub mod result_file;
pub mod trajectory;

pub use nine_errors::NineError;
pub use result_file::{
    inspect_structure, HeaderDescriptor, LoadOptions, RecordKind, ResultFile, StructureSummary,
    TimeAxisCheck,
};
pub use trajectory::{
    load_trajectory, materialize, FinalState, Quantity, Reduction, TimeUnit, Trajectory,
};
