//! CSV output of feature tables.

use crate::data::{FeatureTable, PrefixSet, FEATURE_KEY_COLUMN};
use crate::error::{CleanError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix inserted before the input's extension to name the output file.
pub const CLEANED_SUFFIX: &str = "_cleaned";

/// Drop the helper columns that are not part of the cleaned output.
///
/// Blank columns are only needed for the ratio filter. Derived metrics are
/// never stored in the table, so nothing else has to be removed.
pub fn finalize(table: &FeatureTable, blank: &PrefixSet) -> Result<FeatureTable> {
    let keep_indices: Vec<usize> = (0..table.n_columns())
        .filter(|&i| !blank.matches(&table.column_names()[i]))
        .collect();
    table.subset_columns(&keep_indices)
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write a table as CSV, feature-key column first.
///
/// Missing values are written as empty cells.
pub fn write_csv<W: Write>(table: &FeatureTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let header = std::iter::once(FEATURE_KEY_COLUMN)
        .chain(table.column_names().iter().map(String::as_str));
    csv_writer.write_record(header).map_err(std::io::Error::from)?;

    for (row, key) in table.feature_keys().iter().enumerate() {
        let record = std::iter::once(key.clone())
            .chain(table.row(row).iter().map(|&v| format_value(v)));
        csv_writer.write_record(record).map_err(std::io::Error::from)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a table to `path` through a temporary file in the same directory.
///
/// The destination is only replaced once the whole table has been written.
pub fn write_atomic<P: AsRef<Path>>(table: &FeatureTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_csv(table, &mut tmp)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| CleanError::Io(e.error))?;
    Ok(())
}

/// Output path for an input file: `<stem>_cleaned.<ext>` next to the input.
pub fn cleaned_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, CLEANED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, CLEANED_SUFFIX),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_table() -> FeatureTable {
        FeatureTable::new(
            vec!["100.0_5.0".into(), "200.5_6.25".into()],
            vec!["S1".into(), "Blank1".into(), "QC1".into(), "Blank2".into()],
            vec![
                vec![Some(1.5), Some(0.0), Some(1200.0), None],
                vec![None, Some(2.0), Some(3.0), Some(4.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_finalize_drops_blank_columns() {
        let table = create_test_table();
        let out = finalize(&table, &PrefixSet::single("Blank")).unwrap();
        assert_eq!(out.column_names(), &["S1", "QC1"]);
        assert_eq!(out.row(0), &[Some(1.5), Some(1200.0)]);
    }

    #[test]
    fn test_write_csv() {
        let table = finalize(&create_test_table(), &PrefixSet::single("Blank")).unwrap();
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "mass_Rt,S1,QC1\n100.0_5.0,1.5,1200\n200.5_6.25,,3\n");
    }

    #[test]
    fn test_write_atomic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_atomic(&create_test_table(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("mass_Rt,S1,Blank1,QC1,Blank2\n"));
        assert_eq!(text.lines().count(), 3);
        // only the output file is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_atomic(&create_test_table(), &path).unwrap_err();
        assert_eq!(err.kind(), "IOError");
        assert!(!path.exists());
    }

    #[test]
    fn test_cleaned_path() {
        assert_eq!(cleaned_path("input.csv"), PathBuf::from("input_cleaned.csv"));
        assert_eq!(
            cleaned_path("data/run1.features.csv"),
            PathBuf::from("data/run1.features_cleaned.csv")
        );
        assert_eq!(cleaned_path("data/table"), PathBuf::from("data/table_cleaned"));
    }
}
