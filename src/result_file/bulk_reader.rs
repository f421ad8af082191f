//! # Bulk numeric read
//!
//! Second pass over a result file: skip the header, then stream the records and keep only
//! the numeric columns a [`RecordKind`](super::RecordKind) needs, packed row-major into one
//! flat buffer indexed by record position. The line buffer is reused across records and
//! the output is sized up front, so memory stays proportional to the selected columns.
use std::io::BufRead;

use crate::conversion::parse_fortran_f64;
use crate::nine_errors::NineError;

/// Dense table of the selected numeric columns, one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    columns: usize,
    values: Vec<f64>,
}

impl NumericTable {
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.values.len() / self.columns
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Values of record `row`, in the order the columns were requested.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.columns..(row + 1) * self.columns]
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.columns + column]
    }
}

/// Read the selected numeric columns of up to `max_records` records.
///
/// Arguments
/// -----------------
/// * `reader` – buffered stream positioned at the header line (the header is skipped).
/// * `columns` – 0-based whitespace-delimited field positions to extract, in output order.
/// * `max_records` – stop after this many records; later records are never parsed. The
///   output buffer is allocated for this many rows, so pass the count from the structure pass.
///
/// Return
/// ----------
/// * A [`NumericTable`] with `min(max_records, records in stream)` rows.
/// * [`NineError::InvalidRecord`] (1-based file line) if a record is too short or a
///   selected field is not a number; [`NineError::IoError`] on read failure.
pub fn read_numeric_table<R: BufRead>(
    mut reader: R,
    columns: &[usize],
    max_records: usize,
) -> Result<NumericTable, NineError> {
    let Some(&last_column) = columns.iter().max() else {
        return Ok(NumericTable {
            columns: 0,
            values: Vec::new(),
        });
    };

    // field position → output slot
    let mut slot_of_field = vec![None; last_column + 1];
    for (slot, &field) in columns.iter().enumerate() {
        slot_of_field[field] = Some(slot);
    }

    let mut values = Vec::with_capacity(max_records * columns.len());
    let mut row = vec![0.0; columns.len()];
    let mut buf = String::new();
    let mut line_number = 0usize;
    let mut records = 0usize;

    // header
    if reader.read_line(&mut buf)? == 0 {
        return Err(NineError::MissingHeader);
    }
    line_number += 1;

    while records < max_records {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_number += 1;
        if buf.trim().is_empty() {
            continue;
        }

        let mut fields_seen = 0usize;
        for (field_index, token) in buf.split_ascii_whitespace().enumerate() {
            if field_index > last_column {
                break;
            }
            fields_seen += 1;
            if let Some(slot) = slot_of_field[field_index] {
                row[slot] = parse_fortran_f64(token).ok_or_else(|| NineError::InvalidRecord {
                    line: line_number,
                    reason: format!("field {field_index} is not a number: '{token}'"),
                })?;
            }
        }
        if fields_seen <= last_column {
            return Err(NineError::InvalidRecord {
                line: line_number,
                reason: format!(
                    "expected at least {} fields, found {fields_seen}",
                    last_column + 1
                ),
            });
        }

        values.extend_from_slice(&row);
        records += 1;
    }

    Ok(NumericTable {
        columns: columns.len(),
        values,
    })
}
