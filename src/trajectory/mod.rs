//! # Trajectory materialization
//!
//! Turns a result file into dense per-body time series. [`materialize`] runs two passes
//! over one rewindable stream:
//!
//! 1. **structure** – [`inspect_structure`] recovers the body count, the body names and the
//!    record count, consuming the stream forward only;
//! 2. **numbers** – after a rewind, [`read_numeric_table`] reads the numeric columns of the
//!    record kind for the `body_count × timestep_count` complete records, and the rows are
//!    redistributed into matrices.
//!
//! Data Model
//! -----------------
//! Every quantity is a [`DMatrix`] of shape `(body_count, timestep_count)`: row `n` is body
//! `n` (in first-appearance order), column `t` is timestep `t`. The source record of cell
//! `[n][t]` is the record at position `t·body_count + n`.
//!
//! * **Elements** (`.bel`): `a`, `e`, `i` (deg), `ω` (deg) and the derived Kozai–Lidov
//!   constant `Θ = (1 − e²)·cos²(i)`, computed for every cell.
//! * **Coordinates** (`.bco`): `x`, `y`, `z`.
//!
//! The time axis is stored once, in days, taken from the first body's record of each
//! timestep. [`Trajectory::time`] gives the same axis in years, kiloyears or megayears.
//!
//! A [`Trajectory`] is immutable: [`Trajectory::without_bodies`] and
//! [`Trajectory::truncated`] return new trajectories.
pub mod final_state;

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Seek};
use std::str::FromStr;

use ahash::RandomState;
use camino::Utf8Path;
use itertools::Itertools;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::{debug, info};

use crate::constants::{BodyName, Day, DAYS_PER_YEAR, KYR_PER_MYR, YEARS_PER_KYR};
use crate::kozai::theta;
use crate::nine_errors::NineError;
use crate::result_file::bulk_reader::read_numeric_table;
use crate::result_file::{
    inspect_structure, HeaderDescriptor, LoadOptions, RecordKind, ResultFile, TimeAxisCheck,
};

pub use final_state::{FinalState, Reduction};

/// A per-body, per-timestep quantity of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantity {
    #[serde(rename = "a")]
    SemiMajorAxis,
    #[serde(rename = "e")]
    Eccentricity,
    #[serde(rename = "i")]
    Inclination,
    #[serde(rename = "omega")]
    ArgumentOfPeriapsis,
    #[serde(rename = "theta")]
    KozaiTheta,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "z")]
    Z,
}

impl Quantity {
    /// Short symbol, as used in column labels and on the command line.
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::SemiMajorAxis => "a",
            Quantity::Eccentricity => "e",
            Quantity::Inclination => "i",
            Quantity::ArgumentOfPeriapsis => "omega",
            Quantity::KozaiTheta => "theta",
            Quantity::X => "x",
            Quantity::Y => "y",
            Quantity::Z => "z",
        }
    }
}

impl FromStr for Quantity {
    type Err = NineError;

    /// Accepts the short symbols plus the LaTeX-style keys `\omega` and `\Theta`,
    /// and `o` / `h` for ω and Θ.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Quantity::SemiMajorAxis),
            "e" => Ok(Quantity::Eccentricity),
            "i" => Ok(Quantity::Inclination),
            "o" | "omega" | r"\omega" => Ok(Quantity::ArgumentOfPeriapsis),
            "h" | "theta" | r"\Theta" => Ok(Quantity::KozaiTheta),
            "x" => Ok(Quantity::X),
            "y" => Ok(Quantity::Y),
            "z" => Ok(Quantity::Z),
            other => Err(NineError::UnknownQuantity(other.to_string())),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unit of a time axis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TimeUnit {
    #[serde(rename = "dy")]
    Days,
    #[serde(rename = "yr")]
    Years,
    #[default]
    #[serde(rename = "kyr")]
    Kiloyears,
    #[serde(rename = "Myr")]
    Megayears,
}

impl TimeUnit {
    pub fn token(&self) -> &'static str {
        match self {
            TimeUnit::Days => "dy",
            TimeUnit::Years => "yr",
            TimeUnit::Kiloyears => "kyr",
            TimeUnit::Megayears => "Myr",
        }
    }

    /// Number of days in one unit.
    pub fn days(&self) -> Day {
        match self {
            TimeUnit::Days => 1.0,
            TimeUnit::Years => DAYS_PER_YEAR,
            TimeUnit::Kiloyears => DAYS_PER_YEAR * YEARS_PER_KYR,
            TimeUnit::Megayears => DAYS_PER_YEAR * YEARS_PER_KYR * KYR_PER_MYR,
        }
    }

    /// Convert a duration in days into this unit.
    #[inline]
    pub fn from_days(&self, days: Day) -> f64 {
        match self {
            TimeUnit::Days => days,
            TimeUnit::Years => days / DAYS_PER_YEAR,
            TimeUnit::Kiloyears => days / DAYS_PER_YEAR / YEARS_PER_KYR,
            TimeUnit::Megayears => days / DAYS_PER_YEAR / YEARS_PER_KYR / KYR_PER_MYR,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = NineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dy" => Ok(TimeUnit::Days),
            "yr" => Ok(TimeUnit::Years),
            "kyr" => Ok(TimeUnit::Kiloyears),
            "Myr" => Ok(TimeUnit::Megayears),
            other => Err(NineError::UnknownTimeUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

type QuantityMap = HashMap<Quantity, DMatrix<f64>, RandomState>;

/// Fully materialized result file.
///
/// Invariants
/// -----------------
/// * `body_count() ≥ 1` and `timestep_count() ≥ 1`.
/// * Every matrix has shape `(body_count(), timestep_count())`.
/// * The quantity set is exactly [`RecordKind::quantities`] of [`Trajectory::kind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    kind: RecordKind,
    header: HeaderDescriptor,
    body_names: Vec<BodyName>,
    time_days: DVector<f64>,
    quantities: QuantityMap,
    records_dropped: usize,
    well_formed: bool,
}

impl Trajectory {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn header(&self) -> &HeaderDescriptor {
        &self.header
    }

    pub fn body_count(&self) -> usize {
        self.body_names.len()
    }

    pub fn timestep_count(&self) -> usize {
        self.time_days.len()
    }

    pub fn body_names(&self) -> &[BodyName] {
        &self.body_names
    }

    /// Records of a trailing partial timestep that were not materialized.
    pub fn records_dropped(&self) -> usize {
        self.records_dropped
    }

    /// Whether the source records cycled through the bodies in a stable order.
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// Time axis in days, one value per timestep.
    pub fn time_days(&self) -> &DVector<f64> {
        &self.time_days
    }

    /// Time axis in the requested unit.
    pub fn time(&self, unit: TimeUnit) -> DVector<f64> {
        self.time_days.map(|d| unit.from_days(d))
    }

    /// Matrix `(body_count, timestep_count)` of a quantity.
    ///
    /// Return
    /// ------
    /// * [`NineError::UnknownQuantity`] if the quantity does not exist for this record kind
    ///   (e.g. `x` on an elements trajectory).
    pub fn quantity(&self, quantity: Quantity) -> Result<&DMatrix<f64>, NineError> {
        self.quantities.get(&quantity).ok_or_else(|| {
            NineError::UnknownQuantity(format!(
                "{quantity} is not available for a '{}' trajectory",
                self.kind
            ))
        })
    }

    /// Same as [`Trajectory::quantity`], by symbol or alias (`"e"`, `"o"`, `"\\Theta"`, ...).
    pub fn get(&self, key: &str) -> Result<&DMatrix<f64>, NineError> {
        self.quantity(key.parse()?)
    }

    /// Row index of a body by name.
    pub fn body_index(&self, name: &str) -> Result<usize, NineError> {
        self.body_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| NineError::BodyNotFound(name.to_string()))
    }

    fn check_body(&self, body: usize) -> Result<(), NineError> {
        if body < self.body_count() {
            Ok(())
        } else {
            Err(NineError::BodyNotFound(format!(
                "index {body} (trajectory has {} bodies)",
                self.body_count()
            )))
        }
    }

    /// Time series of one quantity for one body.
    pub fn body_series(&self, quantity: Quantity, body: usize) -> Result<DVector<f64>, NineError> {
        self.check_body(body)?;
        Ok(self.quantity(quantity)?.row(body).transpose())
    }

    /// Copy of the trajectory without the given body rows.
    ///
    /// Arguments
    /// ---------
    /// * `ignored`: body indices to drop; duplicates are allowed
    ///
    /// Return
    /// ------
    /// * [`NineError::BodyNotFound`] for an index out of range
    /// * [`NineError::EmptySelection`] if no body would remain
    pub fn without_bodies(&self, ignored: &[usize]) -> Result<Trajectory, NineError> {
        for &body in ignored {
            self.check_body(body)?;
        }
        let kept = (0..self.body_count())
            .filter(|n| !ignored.contains(n))
            .collect_vec();
        if kept.is_empty() {
            return Err(NineError::EmptySelection(
                "every body of the trajectory is ignored".into(),
            ));
        }

        let quantities = self
            .quantities
            .iter()
            .map(|(q, m)| (*q, m.select_rows(kept.iter())))
            .collect();

        Ok(Trajectory {
            kind: self.kind,
            header: self.header.clone(),
            body_names: kept.iter().map(|&n| self.body_names[n].clone()).collect(),
            time_days: self.time_days.clone(),
            quantities,
            records_dropped: self.records_dropped,
            well_formed: self.well_formed,
        })
    }

    /// Copy of the trajectory keeping the first `floor(timestep_count · fraction)` timesteps.
    ///
    /// Return
    /// ------
    /// * [`NineError::NumericDomain`] unless `0 < fraction ≤ 1`
    /// * [`NineError::EmptySelection`] if the fraction keeps no timestep
    pub fn truncated(&self, fraction: f64) -> Result<Trajectory, NineError> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(NineError::NumericDomain(format!(
                "truncation fraction must be in (0, 1], got {fraction}"
            )));
        }
        let keep = (self.timestep_count() as f64 * fraction).floor() as usize;
        if keep == 0 {
            return Err(NineError::EmptySelection(format!(
                "a fraction of {fraction} keeps none of the {} timesteps",
                self.timestep_count()
            )));
        }

        let quantities = self
            .quantities
            .iter()
            .map(|(q, m)| (*q, m.columns(0, keep).into_owned()))
            .collect();

        Ok(Trajectory {
            kind: self.kind,
            header: self.header.clone(),
            body_names: self.body_names.clone(),
            time_days: self.time_days.rows(0, keep).into_owned(),
            quantities,
            records_dropped: self.records_dropped,
            well_formed: self.well_formed,
        })
    }
}

/// Materialize a trajectory from a rewindable result-file stream.
///
/// Arguments
/// -----------------
/// * `reader` – buffered stream positioned at the header line; rewound once between passes.
/// * `kind` – record layout of the stream.
/// * `options` – per-call [`LoadOptions`].
///
/// Return
/// ----------
/// * The materialized [`Trajectory`]. A trailing partial timestep is not materialized;
///   its size is reported by [`Trajectory::records_dropped`].
/// * Any error of [`inspect_structure`] or [`read_numeric_table`], or
///   [`NineError::TimeAxisMismatch`] under [`TimeAxisCheck::Verify`].
pub fn materialize<R: BufRead + Seek>(
    mut reader: R,
    kind: RecordKind,
    options: &LoadOptions,
) -> Result<Trajectory, NineError> {
    let summary = inspect_structure(&mut reader)?;
    if options.narrate {
        info!("\n{summary}");
    }

    let body_count = summary.body_count();
    let timestep_count = summary.timestep_count();
    let record_count = body_count * timestep_count;

    reader.rewind()?;
    let table = read_numeric_table(&mut reader, kind.columns(), record_count)?;
    if table.rows() < record_count {
        return Err(NineError::IoError(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!(
                "expected {record_count} records on the second pass, found {}",
                table.rows()
            ),
        )));
    }
    debug!(kind = %kind, body_count, timestep_count, "numeric pass done");

    let time_days = DVector::from_fn(timestep_count, |t, _| table.get(t * body_count, 0));

    if options.time_axis == TimeAxisCheck::Verify {
        let tolerance = options.time_axis_tolerance;
        for t in 0..timestep_count {
            for n in 1..body_count {
                let delta = (table.get(t * body_count + n, 0) - time_days[t]).abs();
                if delta.is_nan() || delta > tolerance {
                    return Err(NineError::TimeAxisMismatch { timestep: t, body: n });
                }
            }
        }
    }

    let mut quantities: QuantityMap =
        HashMap::with_capacity_and_hasher(kind.quantities().len(), RandomState::new());
    for (column, quantity) in kind.raw_quantities().iter().enumerate() {
        let matrix = DMatrix::from_fn(body_count, timestep_count, |n, t| {
            table.get(t * body_count + n, column + 1)
        });
        quantities.insert(*quantity, matrix);
    }

    if kind == RecordKind::Elements {
        let kozai = quantities[&Quantity::Eccentricity]
            .zip_map(&quantities[&Quantity::Inclination], theta);
        quantities.insert(Quantity::KozaiTheta, kozai);
    }

    Ok(Trajectory {
        kind,
        header: summary.header().clone(),
        body_names: summary.body_names().to_vec(),
        time_days,
        quantities,
        records_dropped: summary.records_dropped(),
        well_formed: summary.is_well_formed(),
    })
}

/// Open and materialize a result file, the kind coming from its suffix.
pub fn load_trajectory(
    path: impl AsRef<Utf8Path>,
    options: &LoadOptions,
) -> Result<Trajectory, NineError> {
    ResultFile::open(path)?.load(options)
}

#[cfg(test)]
mod trajectory_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::{BufReader, Cursor, Read, SeekFrom};

    const BEL: &str = "  time [days]  mass [Msun]  a [AU]  e  i [deg]  omega [deg]  name
  0.000000E+00  1.0E+00  0.0  0.0  0.0  0.0  A
  0.000000E+00  9.5E-04  5.20  0.048  1.30  273.9  B
  0.000000E+00  2.8E-04  9.58  0.056  2.49  339.4  C
  3.652425E+05  1.0E+00  0.0  0.10  0.0  0.0  A
  3.652425E+05  9.5E-04  5.21  0.500  60.0  274.0  B
  3.652425E+05  2.8E-04  9.57  0.057  2.48  339.5  C
";

    const BCO: &str = "  time [days]  mass [Msun]  x [AU]  y [AU]  z [AU]  name
  0.0  1.0  0.01  -0.02  0.001  Sun
  0.0  9.5E-04  5.2  0.0  0.1  Jupiter
  10.0  1.0  0.011  -0.021  0.0011  Sun
  10.0  9.5E-04  5.19  0.3  0.11  Jupiter
";

    /// Serves `first` until the first seek, then `second`: a file rewritten between passes.
    struct RewrittenFile {
        current: Cursor<Vec<u8>>,
        second: Option<Vec<u8>>,
    }

    impl RewrittenFile {
        fn new(first: &str, second: &str) -> Self {
            RewrittenFile {
                current: Cursor::new(first.as_bytes().to_vec()),
                second: Some(second.as_bytes().to_vec()),
            }
        }
    }

    impl Read for RewrittenFile {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.current.read(buf)
        }
    }

    impl Seek for RewrittenFile {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            if let Some(second) = self.second.take() {
                self.current = Cursor::new(second);
            }
            self.current.seek(pos)
        }
    }

    fn load(text: &str, kind: RecordKind) -> Result<Trajectory, NineError> {
        materialize(Cursor::new(text.as_bytes()), kind, &LoadOptions::default())
    }

    #[test]
    fn test_elements_layout() {
        let traj = load(BEL, RecordKind::Elements).unwrap();
        assert_eq!(traj.body_count(), 3);
        assert_eq!(traj.timestep_count(), 2);
        assert_eq!(traj.body_names(), &["A", "B", "C"]);
        assert_eq!(traj.records_dropped(), 0);
        assert!(traj.is_well_formed());

        for q in RecordKind::Elements.quantities() {
            assert_eq!(traj.quantity(*q).unwrap().shape(), (3, 2));
        }
        let e = traj.quantity(Quantity::Eccentricity).unwrap();
        assert_eq!(e[(0, 1)], 0.10);
        assert_eq!(e[(1, 1)], 0.500);
        assert_eq!(traj.quantity(Quantity::SemiMajorAxis).unwrap()[(2, 0)], 9.58);
        assert_eq!(
            traj.quantity(Quantity::ArgumentOfPeriapsis).unwrap()[(1, 0)],
            273.9
        );
        assert_eq!(traj.time_days().as_slice(), &[0.0, 365_242.5]);
    }

    #[test]
    fn test_theta_is_computed_for_every_cell() {
        let traj = load(BEL, RecordKind::Elements).unwrap();
        let h = traj.quantity(Quantity::KozaiTheta).unwrap();
        let e = traj.quantity(Quantity::Eccentricity).unwrap();
        let i = traj.quantity(Quantity::Inclination).unwrap();
        for n in 0..3 {
            for t in 0..2 {
                assert_abs_diff_eq!(h[(n, t)], theta(e[(n, t)], i[(n, t)]), epsilon = 1e-15);
            }
        }
        assert_abs_diff_eq!(h[(1, 1)], 0.1875, epsilon = 1e-9);
        assert_abs_diff_eq!(h[(0, 0)], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_coordinates_layout() {
        let traj = load(BCO, RecordKind::Coordinates).unwrap();
        assert_eq!(traj.body_count(), 2);
        assert_eq!(traj.timestep_count(), 2);
        assert_eq!(traj.quantity(Quantity::Y).unwrap()[(1, 1)], 0.3);
        assert_eq!(traj.quantity(Quantity::Z).unwrap()[(0, 0)], 0.001);
        assert!(matches!(
            traj.quantity(Quantity::KozaiTheta),
            Err(NineError::UnknownQuantity(_))
        ));
        assert!(matches!(
            traj.get("e"),
            Err(NineError::UnknownQuantity(_))
        ));
    }

    #[test]
    fn test_partial_timestep_is_dropped() {
        let text = format!("{BEL}  7.30485E+05  1.0  0.0  0.2  0.0  0.0  A\n");
        let traj = load(&text, RecordKind::Elements).unwrap();
        assert_eq!(traj.timestep_count(), 2);
        assert_eq!(traj.records_dropped(), 1);
    }

    #[test]
    fn test_time_views() {
        let traj = load(BEL, RecordKind::Elements).unwrap();
        assert_abs_diff_eq!(traj.time(TimeUnit::Years)[1], 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(traj.time(TimeUnit::Kiloyears)[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(traj.time(TimeUnit::Megayears)[1], 1e-3, epsilon = 1e-15);
        assert_eq!(traj.time(TimeUnit::Days), *traj.time_days());
    }

    #[test]
    fn test_time_axis_verification() {
        let skewed = BEL.replacen("3.652425E+05  2.8E-04", "3.652430E+05  2.8E-04", 1);
        assert!(load(&skewed, RecordKind::Elements).is_ok());

        let verify = LoadOptions::builder()
            .time_axis(TimeAxisCheck::Verify)
            .build()
            .unwrap();
        let result = materialize(Cursor::new(skewed.as_bytes()), RecordKind::Elements, &verify);
        assert_eq!(
            result,
            Err(NineError::TimeAxisMismatch {
                timestep: 1,
                body: 2
            })
        );

        let lenient = LoadOptions::builder()
            .time_axis(TimeAxisCheck::Verify)
            .time_axis_tolerance(1.0)
            .build()
            .unwrap();
        assert!(materialize(Cursor::new(skewed.as_bytes()), RecordKind::Elements, &lenient).is_ok());
        assert!(materialize(Cursor::new(BEL.as_bytes()), RecordKind::Elements, &verify).is_ok());
    }

    #[test]
    fn test_file_shrinking_between_passes_fails() {
        let shrunk: String = BEL.lines().take(5).map(|line| format!("{line}\n")).collect();
        let reader = BufReader::new(RewrittenFile::new(BEL, &shrunk));

        let result = materialize(reader, RecordKind::Elements, &LoadOptions::default());
        match result {
            Err(NineError::IoError(err)) => {
                assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
                assert!(err.to_string().contains("expected 6 records"));
            }
            other => panic!("expected an UnexpectedEof error, got {other:?}"),
        }

        let unchanged = BufReader::new(RewrittenFile::new(BEL, BEL));
        assert!(materialize(unchanged, RecordKind::Elements, &LoadOptions::default()).is_ok());
    }

    #[test]
    fn test_coordinates_file_read_as_elements_fails() {
        // a .bco record has no sixth field
        let text = "time  mass  x  y  name\n  0.0  1.0  0.1  0.2  Sun\n";
        assert!(matches!(
            load(text, RecordKind::Elements),
            Err(NineError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_quantity_and_unit_tokens() {
        assert_eq!("o".parse::<Quantity>(), Ok(Quantity::ArgumentOfPeriapsis));
        assert_eq!(r"\omega".parse::<Quantity>(), Ok(Quantity::ArgumentOfPeriapsis));
        assert_eq!("h".parse::<Quantity>(), Ok(Quantity::KozaiTheta));
        assert_eq!(r"\Theta".parse::<Quantity>(), Ok(Quantity::KozaiTheta));
        assert_eq!(
            "q".parse::<Quantity>(),
            Err(NineError::UnknownQuantity("q".into()))
        );
        assert_eq!(Quantity::ArgumentOfPeriapsis.to_string(), "omega");

        assert_eq!("Myr".parse::<TimeUnit>(), Ok(TimeUnit::Megayears));
        assert_eq!(
            "myr".parse::<TimeUnit>(),
            Err(NineError::UnknownTimeUnit("myr".into()))
        );
        assert_eq!(TimeUnit::default(), TimeUnit::Kiloyears);
        assert_abs_diff_eq!(TimeUnit::Kiloyears.days(), 365_242.5, epsilon = 1e-9);
    }

    #[test]
    fn test_body_lookup_and_series() {
        let traj = load(BEL, RecordKind::Elements).unwrap();
        assert_eq!(traj.body_index("C"), Ok(2));
        assert_eq!(
            traj.body_index("D"),
            Err(NineError::BodyNotFound("D".into()))
        );
        let series = traj.body_series(Quantity::Inclination, 1).unwrap();
        assert_eq!(series.as_slice(), &[1.30, 60.0]);
        assert!(matches!(
            traj.body_series(Quantity::Inclination, 3),
            Err(NineError::BodyNotFound(_))
        ));
    }

    #[test]
    fn test_without_bodies_is_a_copy() {
        let traj = load(BEL, RecordKind::Elements).unwrap();
        let planets = traj.without_bodies(&[0]).unwrap();
        assert_eq!(planets.body_names(), &["B", "C"]);
        assert_eq!(planets.quantity(Quantity::Eccentricity).unwrap().shape(), (2, 2));
        assert_eq!(planets.quantity(Quantity::Eccentricity).unwrap()[(0, 1)], 0.5);
        assert_eq!(traj.body_count(), 3);

        assert!(matches!(
            traj.without_bodies(&[0, 1, 2]),
            Err(NineError::EmptySelection(_))
        ));
        assert!(matches!(
            traj.without_bodies(&[5]),
            Err(NineError::BodyNotFound(_))
        ));
    }

    #[test]
    fn test_truncated() {
        let traj = load(BEL, RecordKind::Elements).unwrap();
        let head = traj.truncated(0.5).unwrap();
        assert_eq!(head.timestep_count(), 1);
        assert_eq!(head.quantity(Quantity::KozaiTheta).unwrap().shape(), (3, 1));
        assert_eq!(head.time_days().as_slice(), &[0.0]);
        assert_eq!(traj.truncated(1.0).unwrap(), traj);

        assert!(matches!(
            traj.truncated(0.2),
            Err(NineError::EmptySelection(_))
        ));
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                traj.truncated(bad),
                Err(NineError::NumericDomain(_))
            ));
        }
    }
}
