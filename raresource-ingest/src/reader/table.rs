//! Delimited table reader.
//!
//! Reads a CSV export into rows keyed by declared column names. Only the
//! declared positions are kept, the file's own header line is discarded and
//! cells equal to the missing-value sentinel become `None`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::IngestError;

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Any text.
    Text,
    /// Text that must parse as a signed integer.
    Integer,
}

/// A column to keep: its position in the file, the name rows expose it
/// under, and its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub position: usize,
    pub name: &'static str,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    /// Declare a text column.
    pub const fn text(position: usize, name: &'static str) -> Self {
        Self {
            position,
            name,
            column_type: ColumnType::Text,
        }
    }

    /// Declare an integer column.
    pub const fn integer(position: usize, name: &'static str) -> Self {
        Self {
            position,
            name,
            column_type: ColumnType::Integer,
        }
    }
}

/// Dialect of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormat {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Cells equal to this value are missing.
    pub missing_value: String,
    /// Whether the first line is a header to discard.
    pub has_header: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            missing_value: String::new(),
            has_header: true,
        }
    }
}

/// One parsed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: u64,
    values: HashMap<String, Option<String>>,
}

impl Row {
    /// Source line the row was read from (1-based).
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Value of a column, `None` when missing or not declared.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|value| value.as_deref())
    }

    /// Take the value of a column out of the row.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.values.get_mut(name).and_then(Option::take)
    }

    /// Take a required value, failing when it is missing.
    pub fn take_required(&mut self, name: &str) -> Result<String, IngestError> {
        let line = self.line;
        self.take(name)
            .ok_or_else(|| IngestError::missing_field(name, line))
    }
}

/// Reads delimited files into [`Row`]s.
#[derive(Debug, Clone)]
pub struct TableReader {
    columns: Vec<ColumnSpec>,
    format: TableFormat,
}

impl TableReader {
    /// Create a reader for the given columns using the default format.
    pub fn new(columns: &[ColumnSpec]) -> Self {
        Self {
            columns: columns.to_vec(),
            format: TableFormat::default(),
        }
    }

    /// Create a reader with a custom format.
    pub fn with_format(columns: &[ColumnSpec], format: TableFormat) -> Self {
        Self {
            columns: columns.to_vec(),
            format,
        }
    }

    /// Read every row of the file at `path`.
    ///
    /// The file is opened, read to the end and closed before this returns.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Row>, IngestError> {
        let file = File::open(path.as_ref())?;
        let rows = self.read(BufReader::new(file))?;

        debug!(row_count = rows.len(), "Read table");
        Ok(rows)
    }

    /// Read every row from `reader`.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Vec<Row>, IngestError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let mut lines = LineIndex::new(&data);
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.format.delimiter)
            .quote(self.format.quote)
            .has_headers(self.format.has_header)
            .flexible(false)
            .from_reader(data.as_slice());

        let mut width = None;
        if self.format.has_header {
            let header_width = csv_reader.headers()?.len();
            self.check_width(header_width)?;
            width = Some(header_width);
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if width.is_none() {
                self.check_width(record.len())?;
                width = Some(record.len());
            }
            let line = record
                .position()
                .map(|pos| lines.line_at(pos.byte()))
                .unwrap_or_default();
            rows.push(self.parse_record(&record, line)?);
        }

        Ok(rows)
    }

    fn check_width(&self, width: usize) -> Result<(), IngestError> {
        match self.columns.iter().find(|column| column.position >= width) {
            Some(column) => Err(IngestError::MissingColumn {
                name: column.name.to_string(),
                position: column.position,
                width,
            }),
            None => Ok(()),
        }
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<Row, IngestError> {
        let mut values = HashMap::with_capacity(self.columns.len());

        for column in &self.columns {
            let raw = record.get(column.position).ok_or_else(|| IngestError::MissingColumn {
                name: column.name.to_string(),
                position: column.position,
                width: record.len(),
            })?;

            let value = if raw == self.format.missing_value {
                None
            } else {
                if column.column_type == ColumnType::Integer && raw.parse::<i64>().is_err() {
                    return Err(IngestError::parse(format!(
                        "Line {}: column {} value {:?} is not an integer",
                        line, column.name, raw
                    )));
                }
                Some(raw.to_string())
            };

            values.insert(column.name.to_string(), value);
        }

        Ok(Row { line, values })
    }
}

/// Maps record start offsets to 1-based line numbers.
///
/// `\n`, `\r\n` and a lone `\r` each end one line. Offsets must be passed
/// in increasing order.
struct LineIndex<'a> {
    data: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineIndex<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            line: 1,
        }
    }

    /// Line of the record starting at `byte`. A record's position can point
    /// at blank lines the reader skips before it.
    fn line_at(&mut self, byte: u64) -> u64 {
        let len = self.data.len();
        let mut start = usize::try_from(byte).map_or(len, |b| b.min(len));
        while matches!(self.data.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }

        for i in self.offset..start {
            match self.data[i] {
                b'\n' => self.line += 1,
                b'\r' if self.data.get(i + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
        }
        self.offset = self.offset.max(start);
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [ColumnSpec; 3] = [
        ColumnSpec::text(0, "name"),
        ColumnSpec::text(2, "note"),
        ColumnSpec::integer(3, "count"),
    ];

    #[test]
    fn test_read_declared_columns() {
        let data = "Header A,Header B,Header C,Header D\n\
                    alpha,ignored,\"quoted, note\",1\n\
                    beta,ignored,,2\n";

        let rows = TableReader::new(&COLUMNS).read(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].get("name"), Some("alpha"));
        assert_eq!(rows[0].get("note"), Some("quoted, note"));
        assert_eq!(rows[0].get("count"), Some("1"));
        assert_eq!(rows[0].get("Header B"), None);
        assert_eq!(rows[0].line(), 2);

        assert_eq!(rows[1].get("note"), None);
        assert_eq!(rows[1].get("name"), Some("beta"));
    }

    #[test]
    fn test_header_only_file() {
        let rows = TableReader::new(&COLUMNS)
            .read("a,b,c,d\n".as_bytes())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_column_position() {
        let result = TableReader::new(&COLUMNS).read("a,b,c\nx,y,z\n".as_bytes());
        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { position: 3, width: 3, .. })
        ));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let result = TableReader::new(&COLUMNS).read("a,b,c,d\nx,y,z\n".as_bytes());
        assert!(matches!(result, Err(IngestError::ParseError(_))));
    }

    #[test]
    fn test_integer_column_validation() {
        let result = TableReader::new(&COLUMNS).read("a,b,c,d\nx,y,z,12a\n".as_bytes());
        assert!(matches!(result, Err(IngestError::ParseError(_))));

        let rows = TableReader::new(&COLUMNS)
            .read("a,b,c,d\nx,y,z,\n".as_bytes())
            .unwrap();
        assert_eq!(rows[0].get("count"), None);
    }

    #[test]
    fn test_custom_format() {
        let format = TableFormat {
            delimiter: b'\t',
            quote: b'\'',
            missing_value: "NA".to_string(),
            has_header: false,
        };
        let data = "one\tx\t'a\tb'\t7\ntwo\tx\tNA\t8\n";

        let rows = TableReader::with_format(&COLUMNS, format)
            .read(data.as_bytes())
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("note"), Some("a\tb"));
        assert_eq!(rows[1].get("note"), None);
    }

    #[test]
    fn test_take_required() {
        let mut rows = TableReader::new(&COLUMNS)
            .read("a,b,c,d\n,y,z,3\n".as_bytes())
            .unwrap();
        let row = &mut rows[0];

        assert!(matches!(
            row.take_required("name"),
            Err(IngestError::MissingField { line: 2, .. })
        ));
        assert_eq!(row.take_required("note").unwrap(), "z");
        assert_eq!(row.take("note"), None);
    }

    #[test]
    fn test_line_numbers_with_crlf_and_blank_lines() {
        let columns = [ColumnSpec::text(0, "key"), ColumnSpec::text(1, "value")];
        let data = "h1,h2\r\nx,\"\"\r\n\r\ny,z\r\n";

        let mut rows = TableReader::new(&columns).read(data.as_bytes()).unwrap();
        let lines: Vec<u64> = rows.iter().map(Row::line).collect();
        assert_eq!(lines, vec![2, 4]);

        assert!(matches!(
            rows[0].take_required("value"),
            Err(IngestError::MissingField { line: 2, .. })
        ));
    }

    #[test]
    fn test_line_numbers_with_multiline_field() {
        let columns = [ColumnSpec::text(0, "key"), ColumnSpec::text(1, "value")];
        let data = "h1,h2\nx,\"first\nsecond\"\ny,z\n";

        let rows = TableReader::new(&columns).read(data.as_bytes()).unwrap();
        assert_eq!(rows[0].get("value"), Some("first\nsecond"));
        assert_eq!(rows[1].line(), 4);
    }

    #[test]
    fn test_read_missing_file() {
        let result = TableReader::new(&COLUMNS).read_path("/nonexistent/raresource.csv");
        assert!(matches!(result, Err(IngestError::IoError(_))));
    }
}
