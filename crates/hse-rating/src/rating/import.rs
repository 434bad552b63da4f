use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use super::measurements::RawMeasurementSet;
use super::period::{PeriodError, PeriodSubmission, ReportingPeriod};

/// Reads period submissions from a CSV export.
///
/// Expected columns are `department`, `month`, `year` followed by any of the camelCase
/// measurement field names. Unknown columns are ignored and blank cells read as zero.
pub struct MeasurementImporter;

impl MeasurementImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PeriodSubmission>, ImportError> {
        let file = File::open(path.as_ref()).map_err(ImportError::Io)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PeriodSubmission>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(ImportError::Csv)?.clone();
        for required in ["department", "month", "year"] {
            if !headers.iter().any(|header| header == required) {
                return Err(ImportError::MissingColumn(required));
            }
        }

        let mut submissions = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row_number = index + 1;
            let record = row.map_err(ImportError::Csv)?;

            let mut fields = Map::new();
            let mut department_id = String::new();
            let mut month = "";
            let mut year = "";
            for (header, cell) in headers.iter().zip(record.iter()) {
                match header {
                    "department" => department_id = cell.to_string(),
                    "month" => month = cell,
                    "year" => year = cell,
                    _ => {
                        fields.insert(header.to_string(), Value::String(cell.to_string()));
                    }
                }
            }
            let period = ReportingPeriod::parse(month, year).map_err(|source| {
                ImportError::InvalidPeriod {
                    row: row_number,
                    source,
                }
            })?;

            let measurements: RawMeasurementSet = serde_json::from_value(Value::Object(fields))
                .map_err(|source| ImportError::Row {
                    row: row_number,
                    detail: source.to_string(),
                })?;

            let submission = PeriodSubmission {
                department_id,
                month: period.month(),
                year: period.year(),
                measurements,
            };
            submission
                .validate()
                .map_err(|source| ImportError::InvalidPeriod {
                    row: row_number,
                    source,
                })?;
            submissions.push(submission);
        }

        Ok(submissions)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to open measurement export: {0}")]
    Io(std::io::Error),
    #[error("failed to read measurement CSV: {0}")]
    Csv(csv::Error),
    #[error("measurement CSV is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: {source}")]
    InvalidPeriod { row: usize, source: PeriodError },
    #[error("row {row}: {detail}")]
    Row { row: usize, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn imports_rows_with_partial_columns() {
        let csv = "department,month,year,hseStaffActual,hseStaffRequired,light,notes\n\
                   mining,3,2024,9,10,2,late\n\
                   finance,3,2024,,4,,\n";

        let submissions =
            MeasurementImporter::from_reader(Cursor::new(csv)).expect("csv imports");

        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].department_id, "mining");
        assert_eq!(submissions[0].month, 3);
        assert_eq!(submissions[0].year, 2024);
        assert_eq!(submissions[0].measurements.hse_staff_actual, 9.0);
        assert_eq!(submissions[0].measurements.light_accidents, 2.0);
        assert_eq!(submissions[1].measurements.hse_staff_actual, 0.0);
        assert_eq!(submissions[1].measurements.hse_staff_required, 4.0);
    }

    #[test]
    fn rejects_rows_with_invalid_periods() {
        let csv = "department,month,year\nmining,1,2024\nmining,13,2024\n";

        let error = MeasurementImporter::from_reader(Cursor::new(csv)).expect_err("month 13");

        match error {
            ImportError::InvalidPeriod { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source, PeriodError::InvalidMonth(13));
            }
            other => panic!("expected invalid period, got {other:?}"),
        }
    }

    #[test]
    fn rejects_fractional_and_textual_period_cells() {
        let csv = "department,month,year\nmining,3.9,2024\n";
        let error = MeasurementImporter::from_reader(Cursor::new(csv)).expect_err("fractional");
        assert!(matches!(
            error,
            ImportError::InvalidPeriod { row: 1, source: PeriodError::MalformedMonth(ref cell) }
                if cell == "3.9"
        ));

        let csv = "department,month,year\nmining,3,2024.7\n";
        let error = MeasurementImporter::from_reader(Cursor::new(csv)).expect_err("fractional");
        assert!(matches!(
            error,
            ImportError::InvalidPeriod { row: 1, source: PeriodError::MalformedYear(ref cell) }
                if cell == "2024.7"
        ));

        let csv = "department,month,year\nmining,1,2024\nmining,March,2024\n";
        let error = MeasurementImporter::from_reader(Cursor::new(csv)).expect_err("word month");
        assert!(error.to_string().contains("March"), "{error}");
        assert!(matches!(
            error,
            ImportError::InvalidPeriod { row: 2, source: PeriodError::MalformedMonth(_) }
        ));
    }

    #[test]
    fn requires_period_columns() {
        let csv = "department,month\nmining,1\n";
        let error = MeasurementImporter::from_reader(Cursor::new(csv)).expect_err("no year");
        assert!(matches!(error, ImportError::MissingColumn("year")));
    }
}
