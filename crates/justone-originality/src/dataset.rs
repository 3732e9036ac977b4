//! Tabular game data read from and written back to CSV.

use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::normalize::UmlautNormalizer;

/// Placeholder replaced by the round number in column templates.
pub const ROUND_PLACEHOLDER: &str = "{round}";

/// Default template of the per-round word pair column.
pub const DEFAULT_ROUND_COLUMN: &str = "new_justone{round}playervote_group";

/// Default template of the per-round output column.
pub const DEFAULT_OUTPUT_COLUMN: &str = "originality_{round}";

/// Column naming for rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    round_column: String,
    output_column: String,
}

impl ColumnLayout {
    /// Create a layout from two templates containing `{round}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a template lacks the placeholder.
    pub fn new(round_column: impl Into<String>, output_column: impl Into<String>) -> Result<Self> {
        let layout = Self { round_column: round_column.into(), output_column: output_column.into() };
        for template in [&layout.round_column, &layout.output_column] {
            if !template.contains(ROUND_PLACEHOLDER) {
                return Err(Error::Config(format!(
                    "column template '{template}' must contain {ROUND_PLACEHOLDER}"
                )));
            }
        }
        Ok(layout)
    }

    /// Name of the word pair column for `round`.
    #[must_use]
    pub fn round_column(&self, round: usize) -> String {
        self.round_column.replace(ROUND_PLACEHOLDER, &round.to_string())
    }

    /// Name of the originality column for `round`.
    #[must_use]
    pub fn output_column(&self, round: usize) -> String {
        self.output_column.replace(ROUND_PLACEHOLDER, &round.to_string())
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            round_column: DEFAULT_ROUND_COLUMN.to_owned(),
            output_column: DEFAULT_OUTPUT_COLUMN.to_owned(),
        }
    }
}

/// A CSV table held as strings.
///
/// The first column is the row identifier. Every row has one cell per header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from headers and rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHeader`] without headers and [`Error::Config`]
    /// when a row's length differs from the header's.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(Error::EmptyHeader);
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
            return Err(Error::Config(format!(
                "row {i} has {} cells, expected {}",
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Read a comma-separated file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened and [`Error::Csv`]
    /// on malformed input.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(File::open(path)?)?;
        info!(path = %path.display(), rows = dataset.len(), columns = dataset.headers.len(), "read dataset");
        Ok(dataset)
    }

    /// Read CSV from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] on malformed input.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(String::from).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, _>>()?;
        Self::new(headers, rows)
    }

    /// Write the dataset as CSV to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Csv`] on write failures.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_writer(File::create(path)?)?;
        info!(path = %path.display(), rows = self.len(), "wrote dataset");
        Ok(())
    }

    /// Write the dataset as CSV to any writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] on write failures.
    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Column names.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column called `name`, if any.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the column called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if there is no such column.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| Error::MissingColumn(name.to_owned()))
    }

    /// Cell at `row`, `column`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        &self.rows[row][column]
    }

    /// All values of one column in row order.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[column].as_str())
    }

    /// Apply `normalizer` to every cell except the identifier column.
    pub fn normalize(&mut self, normalizer: &UmlautNormalizer) {
        let mut changed = 0usize;
        for cell in self.rows.iter_mut().flat_map(|row| row.iter_mut().skip(1)) {
            let normalized = match normalizer.normalize(cell) {
                Cow::Owned(normalized) => Some(normalized),
                Cow::Borrowed(_) => None,
            };
            if let Some(normalized) = normalized {
                *cell = normalized;
                changed += 1;
            }
        }
        info!(cells = changed, "normalized umlauts");
    }

    /// Replace the column called `name`, or append it when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `values` does not have one entry per row.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::Config(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.headers.push(name.to_owned());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,new_justone1playervote_group,comment
p1,schoen + queue,gruesse
p2,\"baer, gross + hund\",
";

    #[test]
    fn read_and_write_round_trip() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.headers()[1], "new_justone1playervote_group");
        assert_eq!(dataset.cell(1, 1), "baer, gross + hund");
        assert_eq!(dataset.cell(1, 2), "");

        let mut out = Vec::new();
        dataset.to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), CSV);
    }

    #[test]
    fn normalize_skips_identifier_column() {
        let mut dataset = Dataset::new(
            vec!["id".into(), "pair".into()],
            vec![vec!["schoen".into(), "schoen + queue".into()]],
        )
        .unwrap();
        dataset.normalize(&UmlautNormalizer::default());
        assert_eq!(dataset.cell(0, 0), "schoen");
        assert_eq!(dataset.cell(0, 1), "schön + queue");
    }

    #[test]
    fn set_column_appends_then_overwrites() {
        let mut dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        dataset.set_column("originality_1", vec!["1.5".into(), String::new()]).unwrap();
        assert_eq!(dataset.headers().len(), 4);
        assert_eq!(dataset.cell(0, 3), "1.5");

        dataset.set_column("originality_1", vec!["2".into(), "3".into()]).unwrap();
        assert_eq!(dataset.headers().len(), 4);
        assert_eq!(dataset.column(3).collect::<Vec<_>>(), vec!["2", "3"]);

        assert!(dataset.set_column("originality_2", vec![]).is_err());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Dataset::from_reader("a,b\n1,2,3\n".as_bytes());
        assert!(matches!(result, Err(Error::Csv(_))));
        let result = Dataset::new(vec!["a".into()], vec![vec![]]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_column() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let result = dataset.require_column("new_justone2playervote_group");
        assert!(matches!(result, Err(Error::MissingColumn(_))));
    }

    #[test]
    fn column_layout() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.round_column(3), "new_justone3playervote_group");
        assert_eq!(layout.output_column(3), "originality_3");
        assert!(ColumnLayout::new("round", "originality_{round}").is_err());
    }
}
