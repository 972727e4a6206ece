use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures while reading a record source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Source {} is unreadable: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Invalid {field} on line {line} of {}: '{value}'", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl SourceError {
    pub(crate) fn from_io(path: &Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Unreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }

    fn from_csv(path: &Path, err: &csv::Error) -> Self {
        let reason = match err.position() {
            Some(pos) => format!("line {}: {err}", pos.line()),
            None => err.to_string(),
        };
        Self::Unreadable {
            path: path.to_path_buf(),
            reason,
        }
    }
}

/// Layout shared by all record sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFormat {
    /// Field delimiter
    pub delimiter: u8,

    /// File name prefix identifying per-patient variant sources
    pub variant_prefix: String,

    /// File extension (without the dot) of variant sources
    pub variant_extension: String,
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            variant_prefix: "PAC".to_string(),
            variant_extension: "csv".to_string(),
        }
    }
}

impl SourceFormat {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_variant_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.variant_prefix = prefix.into();
        self
    }
}

/// A typed row together with its 1-based line number in the source
#[derive(Debug, Clone)]
pub struct SourceRow<T> {
    pub line: u64,
    pub value: T,
}

/// Iterator of typed rows from a delimited source with a header line
///
/// Rows are deserialized by header name, so column order does not matter and
/// surplus columns are ignored. A row missing a required column yields
/// [`SourceError::Unreadable`].
pub struct Records<R, T> {
    path: PathBuf,
    reader: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> Records<File, T> {
    /// Open a source file
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the file does not exist, or
    /// `SourceError::Unreadable` if it cannot be opened or its header cannot be read.
    pub fn open(path: &Path, format: &SourceFormat) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::from_io(path, &e))?;
        Self::from_reader(path, file, format)
    }
}

impl<R: Read, T: DeserializeOwned> Records<R, T> {
    /// Read records from any reader; `path` only names the source in errors
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unreadable` if the header line cannot be read.
    pub fn from_reader(
        path: &Path,
        reader: R,
        format: &SourceFormat,
    ) -> Result<Self, SourceError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| SourceError::from_csv(path, &e))?
            .clone();

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            headers,
            record: StringRecord::new(),
            _marker: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: Read, T: DeserializeOwned> Iterator for Records<R, T> {
    type Item = Result<SourceRow<T>, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map_or(0, csv::Position::line);
                let row = self
                    .record
                    .deserialize(Some(&self.headers))
                    .map(|value| SourceRow { line, value })
                    .map_err(|e| SourceError::Unreadable {
                        path: self.path.clone(),
                        reason: format!("line {line}: {e}"),
                    });
                Some(row)
            }
            Err(e) => Some(Err(SourceError::from_csv(&self.path, &e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        name: String,
        value: String,
    }

    fn records(text: &str) -> Records<&[u8], Pair> {
        Records::from_reader(Path::new("pairs.csv"), text.as_bytes(), &SourceFormat::default())
            .unwrap()
    }

    #[test]
    fn test_rows_by_header_name() {
        let rows: Vec<_> = records("value;name;extra\n1;a;x\n2 ; b ;y\n")
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value.name, "a");
        assert_eq!(rows[1].value.name, "b");
        assert_eq!(rows[1].value.value, "2");
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_missing_column_is_unreadable() {
        let mut rows = records("name;other\na;1\n");
        match rows.next() {
            Some(Err(SourceError::Unreadable { reason, .. })) => {
                assert!(reason.contains("line 2"), "{reason}");
            }
            other => panic!("expected unreadable row, got {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_unreadable() {
        let mut rows = records("name;value\na;1\nb\n");
        assert!(rows.next().unwrap().is_ok());
        assert!(matches!(
            rows.next(),
            Some(Err(SourceError::Unreadable { .. }))
        ));
    }

    #[test]
    fn test_header_only_source_is_empty() {
        assert_eq!(records("name;value\n").count(), 0);
    }

    #[test]
    fn test_open_missing_file() {
        let result: Result<Records<File, Pair>, _> =
            Records::open(Path::new("/nonexistent/pairs.csv"), &SourceFormat::default());
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn test_custom_delimiter() {
        let format = SourceFormat::default().with_delimiter(b',');
        let rows: Vec<SourceRow<Pair>> =
            Records::from_reader(Path::new("pairs.csv"), "name,value\na,1\n".as_bytes(), &format)
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
        assert_eq!(rows[0].value.value, "1");
    }
}
