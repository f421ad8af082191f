//! # Header canonicalization
//!
//! The first line of a result file labels its columns, e.g.
//!
//! ```text
//!   time [days]  mass [Msun]  a [AU]  e  i [deg]  omega [deg]  mean anomaly [deg]  name
//! ```
//!
//! There is no explicit delimiter: columns are separated by **two or more** whitespace
//! characters, a single space may appear *inside* a label, and units are annotated in
//! brackets. Canonicalization turns such a line into one token per column:
//!
//! 1. split on runs of ≥ 2 whitespace characters (and newlines),
//! 2. strip bracketed unit annotations `[...]`, with one optional preceding whitespace,
//! 3. trim each field and turn every remaining whitespace character into `_`,
//! 4. drop the empty fields produced by separators at the line edges.
//!
//! A field that is nothing but a unit (`time  [days]  e`) keeps its bracketed text as
//! label, so every non-blank field yields exactly one column.
//!
//! The example above canonicalizes to
//! `time mass a e i omega mean_anomaly name`. The last token labels the column holding
//! the body identity.
//!
//! Canonicalization is idempotent: [`HeaderDescriptor::to_header_line`] joins the tokens
//! with a two-space separator, and parsing that line again yields the same tokens.
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static FIELD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}|\n").expect("field separator pattern is valid"));

static UNIT_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s?\[[^\]]*\]").expect("unit annotation pattern is valid"));

static INNER_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s").expect("inner whitespace pattern is valid"));

/// Canonicalize a single field (units stripped, inner whitespace as `_`).
///
/// A field made only of a unit annotation keeps the annotation as its label, so that it
/// still names a column.
fn canonical_field(field: &str) -> String {
    let without_units = UNIT_ANNOTATION.replace_all(field, "");
    let label = match without_units.trim() {
        "" => field.trim(),
        stripped => stripped,
    };
    INNER_WHITESPACE.replace_all(label, "_").into_owned()
}

/// Canonicalize a raw header line into its column labels.
///
/// Arguments
/// ---------
/// * `line`: the raw header line, with or without its line terminator
///
/// Return
/// ------
/// * one canonical label per column, in column order. Unit stripping never removes a
///   column: a unit-only field keeps its bracketed text as label.
pub fn canonicalize_header(line: &str) -> Vec<String> {
    FIELD_SEPARATOR
        .split(line)
        .map(canonical_field)
        .filter(|label| !label.is_empty())
        .collect()
}

/// Canonical column labels of a result file.
///
/// Produced once from the header line and never mutated. The last label designates
/// the body-identity column; all others are data columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderDescriptor {
    labels: Vec<String>,
}

impl HeaderDescriptor {
    /// Parse and canonicalize a raw header line.
    pub fn parse(line: &str) -> Self {
        HeaderDescriptor {
            labels: canonicalize_header(line),
        }
    }

    /// All canonical labels, identity column included.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of the body-identity column (the last one).
    pub fn identity_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Labels of the data columns (every column but the identity one).
    pub fn data_labels(&self) -> &[String] {
        match self.labels.split_last() {
            Some((_, data)) => data,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Render the labels back into a header line that canonicalizes to the same labels.
    pub fn to_header_line(&self) -> String {
        self.labels.iter().join("  ")
    }
}
