//! Reading and writing compositions and tabular datasets.
//!
//! - [`formula`] — chemical formula strings → [`Composition`](crate::Composition)
//! - [`table`] — row-oriented datasets in JSON-records or CSV form

use std::fmt;

pub mod error;
pub mod formula;
pub mod table;

pub use error::Error;
pub use table::{Dataset, read_dataset, write_dataset};

/// Tabular data formats understood by [`read_dataset`] and [`write_dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// An array of JSON objects, one per row.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Csv => write!(f, "CSV"),
        }
    }
}
