use super::period::{DepartmentId, PeriodRecord, ReportingPeriod};

/// Storage abstraction for submitted period measurements.
pub trait MeasurementRepository: Send + Sync {
    /// Inserts or replaces the record for its department and period.
    fn upsert(&self, record: PeriodRecord) -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        department_id: &DepartmentId,
        period: ReportingPeriod,
    ) -> Result<Option<PeriodRecord>, RepositoryError>;
    /// Stored periods for a department, oldest first.
    fn periods(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<ReportingPeriod>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
