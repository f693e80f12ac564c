//! Raw delimited tables as read from disk, before normalization.

use crate::error::{CleanError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Cell texts treated as a missing reading.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "<NA>",
];

/// Whether a (trimmed) cell denotes a missing value.
pub fn is_missing_token(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell.trim())
}

/// Parse an intensity cell into a number, `None` for missing.
///
/// Returns `Err(())` for text that is neither numeric nor a missing token.
pub(crate) fn parse_cell(cell: &str) -> std::result::Result<Option<f64>, ()> {
    let cell = cell.trim();
    if is_missing_token(cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(()),
    }
}

/// A header plus string records, exactly as found in the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table, checking that every record matches the header width
    /// and that header names are unique.
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(CleanError::MalformedInput(
                "input has no header row".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(CleanError::MalformedInput(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }
        for record in &records {
            if record.len() != headers.len() {
                return Err(CleanError::DimensionMismatch {
                    expected: headers.len(),
                    actual: record.len(),
                });
            }
        }
        Ok(Self { headers, records })
    }

    /// Load a comma-separated file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse comma-separated data with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(CleanError::MalformedInput(
                "input has no header row".to_string(),
            ));
        }

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            records.push(record.iter().map(String::from).collect());
        }

        Self::new(headers, records)
    }

    /// Column names in file order.
    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data records in file order.
    #[inline]
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Number of data rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_reader() {
        let data = "Mass,RT,QC1,S1\n100.0,5.0,10,\n200.5,6.25,NA,3\n";
        let raw = RawTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(raw.shape(), (2, 4));
        assert_eq!(raw.headers(), &["Mass", "RT", "QC1", "S1"]);
        assert_eq!(raw.records()[0], vec!["100.0", "5.0", "10", ""]);
        assert_eq!(raw.column_index("QC1"), Some(2));
        assert_eq!(raw.column_index("QC2"), None);
    }

    #[test]
    fn test_from_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Mass,RT,S1").unwrap();
        writeln!(file, "1,2,3").unwrap();
        file.flush().unwrap();

        let raw = RawTable::from_csv(file.path()).unwrap();
        assert_eq!(raw.shape(), (1, 3));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RawTable::from_csv("/nonexistent/dir/input.csv").unwrap_err();
        assert_eq!(err.kind(), "IOError");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let data = "Mass,RT,S1\n1,2\n";
        let err = RawTable::from_reader(data.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), "MalformedInputError");
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let data = "Mass,RT,S1,S1\n1,2,3,4\n";
        assert!(matches!(
            RawTable::from_reader(data.as_bytes()),
            Err(CleanError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(RawTable::from_reader("".as_bytes()).is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("12.5"), Ok(Some(12.5)));
        assert_eq!(parse_cell(" 7 "), Ok(Some(7.0)));
        assert_eq!(parse_cell(""), Ok(None));
        assert_eq!(parse_cell("NA"), Ok(None));
        assert_eq!(parse_cell("NaN"), Ok(None));
        assert_eq!(parse_cell("1e3"), Ok(Some(1000.0)));
        assert_eq!(parse_cell("abc"), Err(()));
    }
}
