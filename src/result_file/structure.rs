//! # Structure inference
//!
//! A result file never declares how many bodies it tracks nor how many timesteps it
//! holds. Both are recovered from the record stream itself, relying on the integrator
//! writing **one record per body per timestep, bodies always in the same order**:
//!
//! ```text
//! header
//! t0 ... Star        ┐
//! t0 ... Jupiter     │ timestep 0
//! t0 ... Asteroid    ┘
//! t1 ... Star        ← first repeated identity: body count = 3
//! ...
//! ```
//!
//! [`inspect_structure`] performs a single forward pass:
//!
//! 1. canonicalize the header line ([`HeaderDescriptor`]),
//! 2. collect body identities until one repeats (or the stream ends),
//! 3. count the remaining records, checking on the way that record `p` carries the
//!    identity of body `p mod body_count`.
//!
//! The last step does not change the inferred counts; it only sets
//! [`StructureSummary::is_well_formed`] so callers can tell a trustworthy inference from a
//! plausible-but-wrong one.
use std::fmt;
use std::io::BufRead;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::BodyName;
use crate::nine_errors::NineError;

use super::header::HeaderDescriptor;

/// Body identity of a data record: its last whitespace-delimited token.
///
/// Return
/// ------
/// * `None` for a blank line, which is not a record
#[inline]
pub fn record_identity(line: &str) -> Option<&str> {
    line.split_whitespace().next_back()
}

/// Cardinalities recovered from a result file.
///
/// Invariants
/// -----------------
/// * `body_count ≥ 1` and `record_count ≥ body_count`.
/// * `body_names` holds `body_count` distinct names in first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureSummary {
    header: HeaderDescriptor,
    body_count: usize,
    record_count: usize,
    body_names: Vec<BodyName>,
    well_formed: bool,
}

impl StructureSummary {
    pub fn header(&self) -> &HeaderDescriptor {
        &self.header
    }

    pub fn body_count(&self) -> usize {
        self.body_count
    }

    /// Total number of data records in the file (blank lines excluded).
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn body_names(&self) -> &[BodyName] {
        &self.body_names
    }

    /// `true` when every record carries the identity expected from the body cycle.
    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }

    /// Number of complete timesteps (`record_count / body_count`, truncating).
    pub fn timestep_count(&self) -> usize {
        self.record_count / self.body_count
    }

    /// Records of a trailing partial timestep, dropped during materialization.
    pub fn records_dropped(&self) -> usize {
        self.record_count % self.body_count
    }

    /// Display adaptor adding a banner with the file name, as printed by the CLI.
    pub fn report<'a>(&'a self, name: &'a str) -> StructureReport<'a> {
        StructureReport {
            name,
            summary: self,
        }
    }
}

impl fmt::Display for StructureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bodies: {}", self.body_count)?;
        writeln!(
            f,
            "{}",
            self.body_names
                .iter()
                .enumerate()
                .map(|(k, name)| format!("{name}[{k}][:]"))
                .join(" ")
        )?;
        writeln!(f)?;

        let data_labels = self.header.data_labels();
        writeln!(f, "Datacolumns: {}", data_labels.len())?;
        writeln!(
            f,
            "{}",
            data_labels
                .iter()
                .enumerate()
                .map(|(k, label)| format!("{label}[:][{k}]"))
                .join(" ")
        )?;
        writeln!(f)?;

        writeln!(f, "Datalines: {}", self.record_count)?;
        if !self.well_formed {
            writeln!(f, "Warning: records are not grouped by timestep in a stable body order")?;
        }
        if self.records_dropped() > 0 {
            writeln!(
                f,
                "Warning: {} trailing record(s) of a partial timestep are ignored",
                self.records_dropped()
            )?;
        }
        Ok(())
    }
}

/// [`StructureSummary`] rendered under a banner naming its file.
pub struct StructureReport<'a> {
    name: &'a str,
    summary: &'a StructureSummary,
}

impl fmt::Display for StructureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(self.name.chars().count() + 10);
        writeln!(f, "{rule}")?;
        writeln!(f, "     {}", self.name)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}

/// Read the next non-blank line into `buf`.
///
/// Return
/// ------
/// * `Ok(true)` if a record was read, `Ok(false)` at end of stream
fn next_record<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<bool, NineError> {
    loop {
        buf.clear();
        if reader.read_line(buf)? == 0 {
            return Ok(false);
        }
        if !buf.trim().is_empty() {
            return Ok(true);
        }
    }
}

/// Infer the structure of a result file from its text stream.
///
/// The stream is consumed once, forward only. Reaching the end of the stream before any
/// identity repeats is not an error: the body count is then the number of distinct
/// identities seen (a file holding a single timestep).
///
/// Arguments
/// -----------------
/// * `reader` – buffered stream positioned at the header line.
///
/// Return
/// ----------
/// * The inferred [`StructureSummary`].
/// * [`NineError::MissingHeader`] for an empty stream, [`NineError::EmptyResultFile`]
///   when the header is not followed by any record, [`NineError::IoError`] on read failure.
///
/// Notes
/// ----------
/// * If records are not grouped per timestep in a stable order the inferred body count
///   can be wrong; this is reported through [`StructureSummary::is_well_formed`] and a
///   `warn!` event, never as an error.
pub fn inspect_structure<R: BufRead>(mut reader: R) -> Result<StructureSummary, NineError> {
    let mut buf = String::new();

    if reader.read_line(&mut buf)? == 0 {
        return Err(NineError::MissingHeader);
    }
    let header = HeaderDescriptor::parse(&buf);

    let mut body_names: Vec<BodyName> = Vec::new();
    let mut record_count = 0usize;
    let mut well_formed = true;

    while next_record(&mut reader, &mut buf)? {
        let Some(identity) = record_identity(&buf) else {
            continue;
        };
        record_count += 1;
        if body_names.iter().any(|name| name == identity) {
            well_formed &= body_names[0] == identity;
            break;
        }
        body_names.push(identity.to_string());
    }

    if body_names.is_empty() {
        return Err(NineError::EmptyResultFile);
    }
    let body_count = body_names.len();
    debug!(body_count, names = ?body_names, "body cycle detected");

    while next_record(&mut reader, &mut buf)? {
        let expected = &body_names[record_count % body_count];
        well_formed &= record_identity(&buf) == Some(expected.as_str());
        record_count += 1;
    }

    let summary = StructureSummary {
        header,
        body_count,
        record_count,
        body_names,
        well_formed,
    };

    debug!(
        record_count,
        timesteps = summary.timestep_count(),
        "record stream exhausted"
    );
    if !summary.well_formed {
        warn!(
            body_count,
            record_count,
            "records do not cycle through the bodies in a stable order, inferred body count may be wrong"
        );
    }
    if summary.records_dropped() > 0 {
        warn!(
            records_dropped = summary.records_dropped(),
            "record count is not a multiple of the body count, trailing partial timestep will be dropped"
        );
    }

    Ok(summary)
}
