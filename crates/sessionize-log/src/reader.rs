//! CSV log reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use sessionize_window::Record;
use tracing::debug;

use crate::error::{LogError, Result};

const VISITOR_COLUMN: &str = "ip";
const DATE_COLUMN: &str = "date";
const TIME_COLUMN: &str = "time";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Header positions of the columns a record is built from.
#[derive(Debug, Clone, Copy)]
struct Columns {
    visitor: usize,
    date: usize,
    time: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LogError::MissingColumn(name))
        };
        Ok(Self {
            visitor: find(VISITOR_COLUMN)?,
            date: find(DATE_COLUMN)?,
            time: find(TIME_COLUMN)?,
        })
    }
}

/// Streaming reader over an access log with a header row.
pub struct LogReader<R: Read> {
    inner: csv::Reader<R>,
    columns: Columns,
}

impl LogReader<File> {
    /// Open a log file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| LogError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> LogReader<R> {
    /// Wrap a reader, consuming and validating the header row.
    pub fn from_reader(input: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let columns = Columns::locate(inner.headers()?)?;
        debug!(?columns, "Located log columns");
        Ok(Self { inner, columns })
    }

    /// Iterate over the remaining rows as records.
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record>> + '_ {
        let columns = self.columns;
        self.inner
            .records()
            .map(move |row| parse_row(&row?, columns))
    }
}

/// Read a whole log into memory, failing on the first bad row.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let mut reader = LogReader::from_path(path)?;
    let records = reader.records().collect::<Result<Vec<_>>>()?;
    debug!(path = %path.display(), count = records.len(), "Read log records");
    Ok(records)
}

fn parse_row(row: &StringRecord, columns: Columns) -> Result<Record> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();
    let field = |idx: usize, name: &'static str| {
        row.get(idx)
            .filter(|v| !v.is_empty())
            .ok_or(LogError::MissingField { line, field: name })
    };

    let visitor = field(columns.visitor, VISITOR_COLUMN)?;
    let date = field(columns.date, DATE_COLUMN)?;
    let time = field(columns.time, TIME_COLUMN)?;

    let invalid = || LogError::InvalidTimestamp {
        line,
        value: format!("{date} {time}"),
    };
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| invalid())?;

    Ok(Record::new(visitor, NaiveDateTime::new(date, time)))
}
