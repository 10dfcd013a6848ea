//! Reading boundary rows out of the CSV export and selecting them by zone.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;

use crate::error::ZoneError;
use crate::ZoneMode;

/// A row must reach the status column at index 4.
pub const MIN_FIELDS: usize = 5;

const DISTRICT_COLUMN: usize = 0;
const WARD_COLUMN: usize = 1;
const GEOMETRY_COLUMN: usize = 2;
const STATUS_COLUMN: usize = 4;

const FLAGGED_STATUS: &str = "Ok";

/// The header always occupies line 1.
const FIRST_DATA_LINE: u64 = 2;

/// One data row of the boundary export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub district: String,
    pub ward: String,
    pub raw_geometry: String,
    pub status: String,
    /// 1-based row number in the source file, the header being line 1.
    pub line: u64,
}

impl Record {
    /// Whether the status column marks this row as part of the FD zone.
    pub fn is_flagged(&self) -> bool {
        self.status.eq_ignore_ascii_case(FLAGGED_STATUS)
    }

    fn from_csv(row: &StringRecord, line: u64) -> Result<Self, ZoneError> {
        if row.len() < MIN_FIELDS {
            return Err(ZoneError::ShortRow {
                line,
                found: row.len(),
            });
        }

        Ok(Self {
            district: row[DISTRICT_COLUMN].to_owned(),
            ward: row[WARD_COLUMN].to_owned(),
            raw_geometry: row[GEOMETRY_COLUMN].to_owned(),
            status: row[STATUS_COLUMN].to_owned(),
            line,
        })
    }
}

/// What to do with a row that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Stop at the first bad row.
    #[default]
    Abort,
    /// Log the bad row and keep going.
    Skip,
}

/// Reads all data rows from `reader`. The first line is always a header and
/// is discarded whatever it contains.
///
/// # Errors
///
/// Returns [`ZoneError::Csv`] or [`ZoneError::ShortRow`] for the first
/// malformed row under [`RowErrorPolicy::Abort`]. I/O failures always abort.
pub fn read_records<R: Read>(reader: R, policy: RowErrorPolicy) -> Result<Vec<Record>, ZoneError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    // Rows are counted rather than taken from the reader's record position,
    // which lags a line behind on CRLF input.
    for (index, result) in csv_reader.records().enumerate() {
        let line = FIRST_DATA_LINE + index as u64;
        let parsed = result
            .map_err(|source| ZoneError::Csv { line, source })
            .and_then(|row| Record::from_csv(&row, line));

        match (parsed, policy) {
            (Ok(record), _) => records.push(record),
            (Err(err), RowErrorPolicy::Skip) if !is_io_failure(&err) => {
                log::warn!("Skipping row: {err}");
                skipped += 1;
            }
            (Err(err), _) => return Err(err),
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} malformed rows", skipped);
    }
    log::info!("Read {} records", records.len());

    Ok(records)
}

fn is_io_failure(err: &ZoneError) -> bool {
    matches!(err, ZoneError::Csv { source, .. } if source.is_io_error())
}

/// Opens `path` and reads its rows with [`read_records`].
///
/// # Errors
///
/// Returns [`ZoneError::Io`] if the file cannot be opened, otherwise
/// whatever [`read_records`] returns.
pub fn read_records_from_path(path: &Path, policy: RowErrorPolicy) -> Result<Vec<Record>, ZoneError> {
    log::info!("Loading file: {}", path.display());
    let file = File::open(path).map_err(|e| ZoneError::io(path, e))?;
    read_records(BufReader::new(file), policy)
}

/// Keeps the records that belong to `mode`, in their original order.
pub fn filter_records(records: Vec<Record>, mode: ZoneMode) -> Vec<Record> {
    let total = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| record.is_flagged() == mode.is_flagged())
        .collect();
    log::info!("Kept {}/{} records for {}", kept.len(), total, mode);
    kept
}
