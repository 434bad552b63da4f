use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::aggregator::{compute_rating, CompanyRating, KpiResult};
use super::measurements::RawMeasurementSet;
use super::minimums::Violation;
use super::period::{DepartmentId, PeriodError, PeriodRecord, PeriodSubmission, ReportingPeriod};
use super::profiles::RiskClass;
use super::registry::KpiKey;
use super::repository::{MeasurementRepository, RepositoryError};
use super::zone::RatingZone;

/// Rating of a stored period, shaped for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingReport {
    pub department_id: DepartmentId,
    pub period: String,
    pub risk_class: RiskClass,
    pub zone: RatingZone,
    pub rating: f64,
    pub details: BTreeMap<KpiKey, KpiResult>,
    pub violations: Vec<Violation>,
}

impl RatingReport {
    pub fn new(
        department_id: DepartmentId,
        period: ReportingPeriod,
        rating: CompanyRating,
    ) -> Self {
        Self {
            department_id,
            period: period.to_string(),
            risk_class: rating.risk_class,
            zone: RatingZone::from_rating(rating.rating),
            rating: rating.rating,
            details: rating.kpi_results,
            violations: rating.violations,
        }
    }
}

/// Service storing period measurements and rating them on read.
pub struct SafetyRatingService<R> {
    repository: Arc<R>,
}

impl<R> SafetyRatingService<R>
where
    R: MeasurementRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a period, replacing any earlier submission for it.
    pub fn record(
        &self,
        submission: PeriodSubmission,
    ) -> Result<PeriodRecord, RatingServiceError> {
        let (department_id, period) = submission.validate()?;
        let record = PeriodRecord {
            department_id,
            period,
            measurements: submission.measurements,
            recorded_at: Utc::now(),
        };
        self.repository.upsert(record.clone())?;
        info!(department_id = %record.department_id, %period, "period measurements recorded");
        Ok(record)
    }

    pub fn rate(
        &self,
        department_id: &DepartmentId,
        period: ReportingPeriod,
    ) -> Result<RatingReport, RatingServiceError> {
        let record = self
            .repository
            .fetch(department_id, period)?
            .ok_or(RepositoryError::NotFound)?;
        let rating = compute_rating(&record.measurements, record.department_id.as_str());
        Ok(RatingReport::new(record.department_id, record.period, rating))
    }

    /// Rate measurements without storing them.
    pub fn preview(
        &self,
        measurements: &RawMeasurementSet,
        department_id: &str,
    ) -> CompanyRating {
        compute_rating(measurements, department_id)
    }

    /// Ratings for every stored period of a department, oldest first.
    pub fn history(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<RatingReport>, RatingServiceError> {
        self.repository
            .periods(department_id)?
            .into_iter()
            .map(|period| self.rate(department_id, period))
            .collect()
    }
}

/// Error raised by the rating service.
#[derive(Debug, thiserror::Error)]
pub enum RatingServiceError {
    #[error(transparent)]
    Period(#[from] PeriodError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
