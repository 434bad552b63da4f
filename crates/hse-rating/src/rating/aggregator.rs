use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::measurements::RawMeasurementSet;
use super::minimums::{check_minimums, total_penalty, Violation};
use super::normalizer::normalize;
use super::profiles::{risk_class, risk_profile, weights, RiskClass};
use super::registry::KpiKey;

/// Derived value and normalized score for one KPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub value: f64,
    pub score: u8,
}

/// Composite safety rating for one department and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRating {
    pub rating: f64,
    pub risk_class: RiskClass,
    pub kpi_results: BTreeMap<KpiKey, KpiResult>,
    pub violations: Vec<Violation>,
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn score_kpis(raw: &RawMeasurementSet) -> BTreeMap<KpiKey, KpiResult> {
    KpiKey::ALL
        .into_iter()
        .map(|key| {
            let value = raw.derive(key);
            let score = normalize(value, key);
            (key, KpiResult { value, score })
        })
        .collect()
}

/// Weighted mean of scores; keys without a weight contribute nothing.
pub fn weighted_score(
    results: &BTreeMap<KpiKey, KpiResult>,
    weights: &BTreeMap<KpiKey, f64>,
) -> f64 {
    let (weighted, total_weight) = results
        .iter()
        .filter_map(|(key, result)| weights.get(key).map(|weight| (result.score, *weight)))
        .fold((0.0, 0.0), |(weighted, total), (score, weight)| {
            (weighted + f64::from(score) * weight, total + weight)
        });

    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        0.0
    }
}

/// Scores every KPI, applies department weights, and subtracts minimum-requirement penalties.
pub fn compute_rating(raw: &RawMeasurementSet, department_id: &str) -> CompanyRating {
    let kpi_results = score_kpis(raw);
    let risk_class = risk_class(department_id);
    let weights = weights(department_id);

    let weighted = weighted_score(&kpi_results, &weights);
    let violations = check_minimums(&kpi_results, risk_profile(risk_class));
    let penalty = total_penalty(&violations);
    let rating = round_to_cents((weighted - penalty).clamp(0.0, 100.0));

    debug!(
        department_id,
        risk_class = risk_class.label(),
        weighted,
        penalty,
        rating,
        violations = violations.len(),
        "safety rating computed"
    );

    CompanyRating {
        rating,
        risk_class,
        kpi_results,
        violations,
    }
}
