use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregator::CompanyRating;
use super::measurements::RawMeasurementSet;
use super::period::{DepartmentId, PeriodSubmission, ReportingPeriod};
use super::repository::MeasurementRepository;
use super::service::{RatingServiceError, SafetyRatingService};
use super::zone::RatingZone;
use crate::error::AppError;

/// Acknowledgement returned after storing a period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecordView {
    pub department_id: DepartmentId,
    pub period: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(alias = "department_id")]
    pub department_id: String,
    #[serde(default)]
    pub measurements: RawMeasurementSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub rating: CompanyRating,
    pub zone: RatingZone,
}

/// Router builder exposing period intake and rating endpoints.
pub fn rating_router<R>(service: Arc<SafetyRatingService<R>>) -> Router
where
    R: MeasurementRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/departments/:department_id/periods/:year/:month",
            put(record_handler::<R>),
        )
        .route(
            "/api/v1/departments/:department_id/periods/:year/:month/rating",
            get(rating_handler::<R>),
        )
        .route(
            "/api/v1/departments/:department_id/ratings",
            get(history_handler::<R>),
        )
        .route("/api/v1/ratings/preview", post(preview_handler::<R>))
        .with_state(service)
}

pub(crate) async fn record_handler<R>(
    State(service): State<Arc<SafetyRatingService<R>>>,
    Path((department_id, year, month)): Path<(String, String, String)>,
    axum::Json(measurements): axum::Json<RawMeasurementSet>,
) -> Result<Response, AppError>
where
    R: MeasurementRepository + 'static,
{
    let period = ReportingPeriod::parse(&month, &year).map_err(RatingServiceError::from)?;
    let submission = PeriodSubmission {
        department_id,
        month: period.month(),
        year: period.year(),
        measurements,
    };
    let record = service.record(submission)?;
    let view = PeriodRecordView {
        department_id: record.department_id,
        period: record.period.to_string(),
        recorded_at: record.recorded_at,
    };
    Ok((StatusCode::OK, axum::Json(view)).into_response())
}

pub(crate) async fn rating_handler<R>(
    State(service): State<Arc<SafetyRatingService<R>>>,
    Path((department_id, year, month)): Path<(String, String, String)>,
) -> Result<Response, AppError>
where
    R: MeasurementRepository + 'static,
{
    let department_id = DepartmentId::parse(&department_id).map_err(RatingServiceError::from)?;
    let period = ReportingPeriod::parse(&month, &year).map_err(RatingServiceError::from)?;
    let report = service.rate(&department_id, period)?;
    Ok((StatusCode::OK, axum::Json(report)).into_response())
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<SafetyRatingService<R>>>,
    Path(department_id): Path<String>,
) -> Result<Response, AppError>
where
    R: MeasurementRepository + 'static,
{
    let department_id = DepartmentId::parse(&department_id).map_err(RatingServiceError::from)?;
    let reports = service.history(&department_id)?;
    Ok((StatusCode::OK, axum::Json(reports)).into_response())
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<SafetyRatingService<R>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    R: MeasurementRepository + 'static,
{
    let rating = service.preview(&request.measurements, &request.department_id);
    let zone = RatingZone::from_rating(rating.rating);
    (StatusCode::OK, axum::Json(PreviewResponse { rating, zone })).into_response()
}
