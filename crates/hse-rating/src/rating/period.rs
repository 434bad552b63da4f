use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::measurements::RawMeasurementSet;

pub const REPORTING_YEARS: RangeInclusive<i32> = 2000..=2100;

/// Organizational unit identifier used for risk-class and weight lookups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

impl DepartmentId {
    pub fn parse(raw: &str) -> Result<Self, PeriodError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PeriodError::MissingDepartment);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar month a measurement set was reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    year: i32,
    month: u32,
}

impl ReportingPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if !REPORTING_YEARS.contains(&year) {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// Parses month and year given as text, as they arrive in URL segments and CSV cells.
    pub fn parse(month: &str, year: &str) -> Result<Self, PeriodError> {
        let month = month.trim();
        let year = year.trim();
        let month = month
            .parse::<u32>()
            .map_err(|_| PeriodError::MalformedMonth(month.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| PeriodError::MalformedYear(year.to_string()))?;
        Self::new(month, year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Validation failure for a department/period pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("year must be between 2000 and 2100, got {0}")]
    InvalidYear(i32),
    #[error("month must be a whole number, got '{0}'")]
    MalformedMonth(String),
    #[error("year must be a whole number, got '{0}'")]
    MalformedYear(String),
    #[error("department id must not be empty")]
    MissingDepartment,
}

/// Measurements as submitted for one department and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSubmission {
    pub department_id: String,
    pub month: u32,
    pub year: i32,
    pub measurements: RawMeasurementSet,
}

impl PeriodSubmission {
    pub fn validate(&self) -> Result<(DepartmentId, ReportingPeriod), PeriodError> {
        let department_id = DepartmentId::parse(&self.department_id)?;
        let period = ReportingPeriod::new(self.month, self.year)?;
        Ok((department_id, period))
    }
}

/// Stored measurement set keyed by department and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub department_id: DepartmentId,
    pub period: ReportingPeriod,
    pub measurements: RawMeasurementSet,
    pub recorded_at: DateTime<Utc>,
}
