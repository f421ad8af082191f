//! # Result files of the integrator
//!
//! The integrator writes one plain-text table per record kind, selected by the file suffix:
//!
//! * **`.bel`** – orbital elements. Numeric columns `0, 2, 3, 4, 5` hold
//!   time (days), semi-major axis (AU), eccentricity, inclination (deg) and argument of
//!   periapsis (deg).
//! * **`.bco`** – barycentric coordinates. Numeric columns `0, 2, 3, 4` hold
//!   time (days) and the `x`, `y`, `z` position components.
//!
//! Every file starts with a column-label header, followed by one record per body per
//! timestep. The last field of a record names the body it belongs to.
//!
//! Modules
//! -----------------
//! * [`header`] – Header canonicalization into [`HeaderDescriptor`].
//! * [`structure`] – Forward-scan inference of body and record counts ([`StructureSummary`]).
//! * [`bulk_reader`] – Selected-column numeric read into a dense [`NumericTable`](bulk_reader::NumericTable).
//!
//! Entry points
//! -----------------
//! [`ResultFile`] binds a path to its [`RecordKind`]. The kind is resolved from the suffix
//! when the handle is created, so an unsupported suffix fails with
//! [`NineError::UnsupportedKind`] before the file is ever opened.
//!
//! ```rust,no_run
//! use ninetraj::result_file::{LoadOptions, ResultFile};
//!
//! # fn run() -> Result<(), ninetraj::nine_errors::NineError> {
//! let file = ResultFile::open("run/planets.bel")?;
//! let structure = file.structure()?;
//! println!("{}", structure.report(file.file_name()));
//!
//! let trajectory = file.load(&LoadOptions::default())?;
//! assert_eq!(trajectory.body_count(), structure.body_count());
//! # Ok(()) }
//! ```
pub mod bulk_reader;
pub mod header;
pub mod structure;

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::nine_errors::NineError;
use crate::trajectory::{materialize, Quantity, Trajectory};

pub use header::HeaderDescriptor;
pub use structure::{inspect_structure, StructureSummary};

/// Record layout of a result file, selected by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// `.bel`: orbital elements.
    Elements,
    /// `.bco`: positional coordinates.
    Coordinates,
}

impl RecordKind {
    /// Suffix token of the kind (`"bel"` or `"bco"`).
    pub fn token(&self) -> &'static str {
        match self {
            RecordKind::Elements => "bel",
            RecordKind::Coordinates => "bco",
        }
    }

    /// 0-based numeric field positions read for this kind, time column first.
    pub fn columns(&self) -> &'static [usize] {
        match self {
            RecordKind::Elements => &[0, 2, 3, 4, 5],
            RecordKind::Coordinates => &[0, 2, 3, 4],
        }
    }

    /// Quantities read from the file, in the order of [`RecordKind::columns`] after the time.
    pub fn raw_quantities(&self) -> &'static [Quantity] {
        match self {
            RecordKind::Elements => &[
                Quantity::SemiMajorAxis,
                Quantity::Eccentricity,
                Quantity::Inclination,
                Quantity::ArgumentOfPeriapsis,
            ],
            RecordKind::Coordinates => &[Quantity::X, Quantity::Y, Quantity::Z],
        }
    }

    /// Every quantity a materialized trajectory of this kind holds, derived ones included.
    pub fn quantities(&self) -> &'static [Quantity] {
        match self {
            RecordKind::Elements => &[
                Quantity::SemiMajorAxis,
                Quantity::Eccentricity,
                Quantity::Inclination,
                Quantity::ArgumentOfPeriapsis,
                Quantity::KozaiTheta,
            ],
            RecordKind::Coordinates => &[Quantity::X, Quantity::Y, Quantity::Z],
        }
    }
}

impl FromStr for RecordKind {
    type Err = NineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "bel" => Ok(RecordKind::Elements),
            "bco" => Ok(RecordKind::Coordinates),
            other => Err(NineError::UnsupportedKind(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Whether the per-timestep time axis is checked during materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeAxisCheck {
    /// Take the time of each timestep from the first body's record, unchecked.
    #[default]
    Trust,
    /// Require every body of a timestep to carry the first body's time, within
    /// [`LoadOptions::time_axis_tolerance`].
    Verify,
}

/// Options of a single materialization call.
///
/// Options are passed per call and never stored in a handle, so two loads of the same
/// file with different options cannot influence each other.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Emit the structure report as an `info!` event before the numeric pass.
    pub narrate: bool,

    /// Time-axis consistency policy.
    pub time_axis: TimeAxisCheck,

    /// Absolute tolerance, in days, used by [`TimeAxisCheck::Verify`].
    pub time_axis_tolerance: f64,
}

impl LoadOptions {
    /// Equivalent to [`LoadOptions::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`LoadOptionsBuilder`] starting from the default options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ninetraj::result_file::{LoadOptions, TimeAxisCheck};
    ///
    /// let options = LoadOptions::builder()
    ///     .narrate(true)
    ///     .time_axis(TimeAxisCheck::Verify)
    ///     .time_axis_tolerance(1e-6)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(options.time_axis, TimeAxisCheck::Verify);
    /// ```
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::new()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            narrate: false,
            time_axis: TimeAxisCheck::Trust,
            time_axis_tolerance: 0.0,
        }
    }
}

impl fmt::Display for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "narrate={}, time_axis={:?}, time_axis_tolerance={} d",
            self.narrate, self.time_axis, self.time_axis_tolerance
        )
    }
}

/// Builder for [`LoadOptions`], with validation.
#[derive(Debug, Clone)]
pub struct LoadOptionsBuilder {
    options: LoadOptions,
}

impl Default for LoadOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: LoadOptions::default(),
        }
    }

    pub fn narrate(mut self, v: bool) -> Self {
        self.options.narrate = v;
        self
    }
    pub fn time_axis(mut self, v: TimeAxisCheck) -> Self {
        self.options.time_axis = v;
        self
    }
    pub fn time_axis_tolerance(mut self, v: f64) -> Self {
        self.options.time_axis_tolerance = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `time_axis_tolerance` must be finite and `>= 0.0` (NaN is rejected).
    ///
    /// Returns
    /// -----------------
    /// * `Ok(LoadOptions)` if every value is valid.
    /// * `Err(NineError::InvalidLoadOption)` otherwise.
    pub fn build(self) -> Result<LoadOptions, NineError> {
        let tol = self.options.time_axis_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(NineError::InvalidLoadOption(format!(
                "time_axis_tolerance must be finite and >= 0, got {tol}"
            )));
        }
        Ok(self.options)
    }
}

/// A result file on disk together with its record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFile {
    path: Utf8PathBuf,
    kind: RecordKind,
}

impl ResultFile {
    /// Bind a path, resolving the record kind from its suffix.
    ///
    /// No I/O is performed: a missing file is only reported by [`ResultFile::structure`]
    /// or [`ResultFile::load`].
    ///
    /// Return
    /// ------
    /// * [`NineError::UnsupportedKind`] if the suffix is neither `bel` nor `bco` (an empty
    ///   token when the path has no suffix).
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, NineError> {
        let path = path.as_ref();
        let kind = path.extension().unwrap_or_default().parse()?;
        Ok(ResultFile {
            path: path.to_path_buf(),
            kind,
        })
    }

    /// Bind a path with an explicit kind, whatever its suffix.
    pub fn with_kind(path: impl AsRef<Utf8Path>, kind: RecordKind) -> Self {
        ResultFile {
            path: path.as_ref().to_path_buf(),
            kind,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// File name used in reports (the full path when it has none).
    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }

    fn reader(&self) -> Result<BufReader<File>, NineError> {
        Ok(BufReader::new(File::open(&self.path)?))
    }

    /// Infer the structure of the file (first pass only).
    pub fn structure(&self) -> Result<StructureSummary, NineError> {
        inspect_structure(self.reader()?)
    }

    /// Materialize the full trajectory (structure pass, rewind, numeric pass).
    pub fn load(&self, options: &LoadOptions) -> Result<Trajectory, NineError> {
        materialize(self.reader()?, self.kind, options)
    }
}
