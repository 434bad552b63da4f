//! Safety KPI scoring engine and the period service built on top of it.
//!
//! [`compute_rating`] is the pure core: raw period measurements plus a department id in, per-KPI
//! scores, minimum-requirement violations, and a 0–100 composite rating out. The registry and
//! risk tables it reads are immutable statics, so ratings can be computed concurrently without
//! coordination. [`SafetyRatingService`] and [`rating_router`] store measurements per department
//! and period and rate them on read.

pub mod aggregator;
pub mod import;
pub mod measurements;
pub mod minimums;
pub mod normalizer;
pub mod period;
pub mod profiles;
pub mod registry;
pub mod repository;
pub mod router;
pub mod service;
pub mod zone;

#[cfg(test)]
mod tests;

pub use aggregator::{compute_rating, CompanyRating, KpiResult};
pub use import::{ImportError, MeasurementImporter};
pub use measurements::RawMeasurementSet;
pub use minimums::Violation;
pub use normalizer::{normalize, normalize_named};
pub use period::{DepartmentId, PeriodError, PeriodRecord, PeriodSubmission, ReportingPeriod};
pub use profiles::{RiskClass, RiskProfile};
pub use registry::{KpiDefinition, KpiKey, KPI_REGISTRY};
pub use repository::{MeasurementRepository, RepositoryError};
pub use router::rating_router;
pub use service::{RatingReport, RatingServiceError, SafetyRatingService};
pub use zone::RatingZone;
