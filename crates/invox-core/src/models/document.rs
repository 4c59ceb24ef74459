//! Structured output of the document-analysis service.
//!
//! The service responds with JSON; these types are its deserialized form.
//! A [`Document`] is immutable once returned: the extraction heuristics only
//! read it.

use serde::{Deserialize, Serialize};

/// A labeled field extracted from a scanned form, e.g.
/// `("Invoice Date:", "23 June, 2018")`.
///
/// Key and value are free-form text; the service normalizes neither case nor
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A grid of extracted cell text representing one detected tabular region.
///
/// Row 0 is conventionally a header row, but the service does not guarantee
/// it. Cell text may contain embedded newline/carriage-return sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows, including any header row.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The conventional header row (row 0), if the table has any rows.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Materialize the table as a row/column grid.
    ///
    /// Header handling is an explicit flag, never inferred: with
    /// `split_header` set, row 0 is stored out-of-band in
    /// [`TableGrid::header`]; otherwise it stays in line with the data rows.
    pub fn to_grid(&self, split_header: bool) -> TableGrid {
        let mut rows = self.rows.clone();
        let header = if split_header && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };
        TableGrid { header, rows }
    }
}

/// Row/column materialization of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    /// Header row, present only when the grid was materialized with
    /// `split_header`.
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Structured output of the analysis service for one input file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Labeled fields, in the order the service emitted them.
    #[serde(default)]
    pub key_values: Vec<KeyValue>,

    /// Detected tables, in the order the service emitted them.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Document {
    pub fn new(key_values: Vec<KeyValue>, tables: Vec<Table>) -> Self {
        Self { key_values, tables }
    }
}
