//! In-memory tabular dataset exchanged with the pipeline host
//!
//! A [`Frame`] is an ordered list of column names plus rows of JSON values.
//! Row order is significant and is preserved by every operation here.

use crate::error::{Error, FrameError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row-ordered table of JSON values
///
/// Every row holds exactly one value per column, including frames built by
/// deserialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Unchecked wire shape of a [`Frame`]
#[derive(Deserialize)]
struct RawFrame {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

impl TryFrom<RawFrame> for Frame {
    type Error = Error;

    fn try_from(raw: RawFrame) -> Result<Self> {
        Frame::from_rows(raw.columns, raw.rows)
    }
}

impl Frame {
    /// Create an empty frame with the given column names
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a frame from column names and rows, checking every row's arity
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frame = Self::new(columns);
        for row in rows {
            frame.push_row(row)?;
        }
        Ok(frame)
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowArity {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            }
            .into());
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column, or [`FrameError::MissingColumn`]
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()).into())
    }

    /// All values of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.require_column(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, values)| cell(values, idx, row, self.columns.len()))
            .collect()
    }

    /// Value at `(row, column)`
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Raw rows in order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Add a column, or overwrite it in place if a column of that name exists.
    ///
    /// `values` must hold exactly one value per row. All other columns pass
    /// through unchanged.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(FrameError::ColumnLength {
                column: name,
                expected: self.rows.len(),
                actual: values.len(),
            }
            .into());
        }

        match self.column_index(&name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(self)
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Value at `idx` in `values`, or [`FrameError::RowArity`] for a short row
pub(crate) fn cell(values: &[Value], idx: usize, row: usize, expected: usize) -> Result<&Value> {
    values.get(idx).ok_or_else(|| {
        FrameError::RowArity {
            row,
            expected,
            actual: values.len(),
        }
        .into()
    })
}

/// JSON type name used in error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
