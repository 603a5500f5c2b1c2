//! Purpose: Table model applying header, width, and duplicate-key policy.
//! Exports: `Table`.
//! Invariants: Short rows are left short (the emitter pads with null);
//!             long rows are rejected with the 1-based data-row index.
//! Invariants: A row exactly one wider than the header loses its extra
//!             field when that field is empty and unquoted (trailing-comma
//!             CSV, a shape common enough in the wild to tolerate).
//! Invariants: Duplicate header keys: last occurrence wins; earlier
//!             columns with the same key text are masked out of output.
use crate::core::error::{Error, ErrorKind};
use crate::core::scan::{Field, Record};

#[derive(Debug)]
pub struct Table<'a> {
    header: Record<'a>,
    keep: Vec<bool>,
    rows: Vec<Record<'a>>,
}

impl<'a> Table<'a> {
    /// Build a table from scanned records; the first record is the header.
    pub fn from_records(mut records: Vec<Record<'a>>) -> Result<Table<'a>, Error> {
        if records.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("document has no header record"));
        }
        let header = records.remove(0);
        let width = header.fields.len();

        for (index, row) in records.iter_mut().enumerate() {
            if row.fields.len() == width + 1 && trailing_empty(&row.fields) {
                row.fields.pop();
            }
            if row.fields.len() > width {
                return Err(Error::new(ErrorKind::RowWidthMismatch)
                    .with_message(format!(
                        "row has {} fields but the header has {width}",
                        row.fields.len()
                    ))
                    .with_row(index as u64 + 1));
            }
        }

        let keep = keep_mask(&header.fields);
        Ok(Table {
            header,
            keep,
            rows: records,
        })
    }

    pub fn width(&self) -> usize {
        self.header.fields.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self) -> &[Field<'a>] {
        &self.header.fields
    }

    /// Whether the column's key survives duplicate-key masking.
    pub fn keeps_column(&self, column: usize) -> bool {
        self.keep[column]
    }

    pub fn rows(&self) -> &[Record<'a>] {
        &self.rows
    }
}

fn trailing_empty(fields: &[Field<'_>]) -> bool {
    fields
        .last()
        .is_some_and(|field| field.is_empty() && !field.quoted)
}

fn keep_mask(header: &[Field<'_>]) -> Vec<bool> {
    header
        .iter()
        .enumerate()
        .map(|(index, field)| {
            !header[index + 1..]
                .iter()
                .any(|later| later.text == field.text)
        })
        .collect()
}
