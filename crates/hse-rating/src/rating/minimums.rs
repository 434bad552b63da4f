use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::profiles::RiskProfile;
use super::registry::KpiKey;
use super::KpiResult;

/// Threshold-bearing KPIs in reporting order, with the fixed penalty for falling short.
pub const MINIMUM_REQUIREMENT_PENALTIES: [(KpiKey, f64); 6] = [
    (KpiKey::Ltifr, 25.0),
    (KpiKey::HseStaffing, 20.0),
    (KpiKey::Training, 15.0),
    (KpiKey::Equipment, 15.0),
    (KpiKey::Ppe, 20.0),
    (KpiKey::WorkplaceAssessment, 12.0),
];

/// A threshold KPI scoring below its risk-class minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub metric: KpiKey,
    pub required: f64,
    pub actual: f64,
    pub penalty: f64,
}

/// Compares threshold-bearing scores against the profile. Missing scores count as zero.
pub fn check_minimums(
    results: &BTreeMap<KpiKey, KpiResult>,
    profile: &RiskProfile,
) -> Vec<Violation> {
    MINIMUM_REQUIREMENT_PENALTIES
        .iter()
        .filter_map(|(metric, penalty)| {
            let required = profile.minimum_threshold(*metric)?;
            let actual = results
                .get(metric)
                .map(|result| f64::from(result.score))
                .unwrap_or(0.0);
            if actual < required {
                debug!(
                    %metric,
                    required,
                    actual,
                    penalty,
                    risk_class = profile.risk_class.label(),
                    "minimum requirement not met"
                );
                Some(Violation {
                    metric: *metric,
                    required,
                    actual,
                    penalty: *penalty,
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn total_penalty(violations: &[Violation]) -> f64 {
    violations.iter().map(|violation| violation.penalty).sum()
}
