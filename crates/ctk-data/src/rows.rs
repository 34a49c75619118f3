//! Tabular row sources and their conversion into records.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ctk_model::{Record, Value, ValueType};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, RowError};

/// A forward-only reader over rows with a fixed set of named fields.
///
/// Call [`advance`](RowSource::advance) to move to the next row, then read
/// the current row's values by field index.
pub trait RowSource {
    type Error: Into<RowError>;

    fn field_count(&self) -> usize;

    fn field_name(&self, index: usize) -> &str;

    /// Declared type of a field; `Any` unless the source knows better.
    fn field_type(&self, _index: usize) -> ValueType {
        ValueType::Any
    }

    /// Moves to the next row, returning `false` once the rows are exhausted.
    fn advance(&mut self) -> std::result::Result<bool, Self::Error>;

    /// Value of field `index` in the current row.
    fn value(&self, index: usize) -> Value;
}

/// Reads every remaining row of `source` into a record.
///
/// Rows are read sequentially and then converted in parallel; the returned
/// records keep the source's row order and field order.
///
/// Fails with [`RowError::DuplicateField`] before reading any row when two
/// fields share a name.
pub fn to_records<R: RowSource>(source: &mut R) -> Result<Vec<Record>> {
    let columns: Vec<(String, ValueType)> = (0..source.field_count())
        .map(|index| (source.field_name(index).to_string(), source.field_type(index)))
        .collect();
    let mut seen = HashSet::with_capacity(columns.len());
    if let Some((name, _)) = columns.iter().find(|(name, _)| !seen.insert(name.as_str())) {
        return Err(RowError::DuplicateField(name.clone()));
    }
    let mut rows: Vec<Vec<Value>> = Vec::new();
    while source.advance().map_err(Into::<RowError>::into)? {
        rows.push((0..columns.len()).map(|index| source.value(index)).collect());
    }
    debug!(rows = rows.len(), fields = columns.len(), "read rows");
    Ok(rows
        .into_par_iter()
        .map(|values| build_record(&columns, values))
        .collect())
}

fn build_record(columns: &[(String, ValueType)], values: Vec<Value>) -> Record {
    let mut record = Record::with_capacity(columns.len());
    for ((name, value_type), value) in columns.iter().zip(values) {
        record.insert(name.clone(), value_type.clone(), value);
    }
    record
}

/// A [`RowSource`] over CSV data with a header row.
///
/// Header names are trimmed. Every field is optional text: empty cells read
/// as `Null`.
pub struct CsvRowSource<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    current: csv::StringRecord,
}

impl<R: Read> CsvRowSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();
        Ok(Self {
            reader,
            headers,
            current: csv::StringRecord::new(),
        })
    }
}

impl CsvRowSource<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(file)
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    type Error = csv::Error;

    fn field_count(&self) -> usize {
        self.headers.len()
    }

    fn field_name(&self, index: usize) -> &str {
        &self.headers[index]
    }

    fn field_type(&self, _index: usize) -> ValueType {
        ValueType::optional(ValueType::Text)
    }

    fn advance(&mut self) -> std::result::Result<bool, Self::Error> {
        self.reader.read_record(&mut self.current)
    }

    fn value(&self, index: usize) -> Value {
        match self.current.get(index) {
            Some(cell) if !cell.is_empty() => Value::Text(cell.to_string()),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_records() {
        let data = "Id, Name\n1,Ana\n2,\n";
        let mut source = CsvRowSource::new(data.as_bytes()).unwrap();
        let records = to_records(&mut source).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].names().collect::<Vec<_>>(), ["Id", "Name"]);
        assert_eq!(records[0].get("Name"), Some(&Value::Text("Ana".to_string())));
        assert_eq!(records[1].get("Name"), Some(&Value::Null));
        assert_eq!(
            records[1].field("Id").unwrap().value_type(),
            &ValueType::optional(ValueType::Text)
        );
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let data = "Id,Name,Name\n1,Ana,Lopez\n";
        let mut source = CsvRowSource::new(data.as_bytes()).unwrap();
        let error = to_records(&mut source).unwrap_err();
        assert!(matches!(&error, RowError::DuplicateField(name) if name == "Name"));
        assert_eq!(error.to_string(), "duplicate field name: Name");
    }

    #[test]
    fn ragged_csv_reports_error() {
        let data = "A,B\n1,2\n3\n";
        let mut source = CsvRowSource::new(data.as_bytes()).unwrap();
        let error = to_records(&mut source).unwrap_err();
        assert!(matches!(error, RowError::Csv(_)));
    }
}
