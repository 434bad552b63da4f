use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::registry::{default_weight, KpiKey};

/// Hazard category assigned to a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskClass {
    High,
    Medium,
    Low,
}

impl RiskClass {
    pub fn label(&self) -> &'static str {
        match self {
            RiskClass::High => "HIGH",
            RiskClass::Medium => "MEDIUM",
            RiskClass::Low => "LOW",
        }
    }
}

/// Minimum acceptable scores for the threshold-bearing KPIs of one risk class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskProfile {
    pub risk_class: RiskClass,
    pub minimum_thresholds: &'static [(KpiKey, f64)],
    /// Carried for reporting only; minimum-requirement penalties are fixed.
    pub penalty_multiplier: f64,
}

impl RiskProfile {
    pub fn minimum_threshold(&self, key: KpiKey) -> Option<f64> {
        self.minimum_thresholds
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, minimum)| *minimum)
    }
}

static HIGH_RISK: RiskProfile = RiskProfile {
    risk_class: RiskClass::High,
    minimum_thresholds: &[
        (KpiKey::Ltifr, 85.0),
        (KpiKey::HseStaffing, 95.0),
        (KpiKey::Training, 95.0),
        (KpiKey::Equipment, 95.0),
        (KpiKey::Ppe, 95.0),
        (KpiKey::WorkplaceAssessment, 90.0),
    ],
    penalty_multiplier: 1.5,
};

static MEDIUM_RISK: RiskProfile = RiskProfile {
    risk_class: RiskClass::Medium,
    minimum_thresholds: &[
        (KpiKey::Ltifr, 70.0),
        (KpiKey::HseStaffing, 80.0),
        (KpiKey::Training, 85.0),
        (KpiKey::Equipment, 85.0),
        (KpiKey::Ppe, 85.0),
        (KpiKey::WorkplaceAssessment, 75.0),
    ],
    penalty_multiplier: 1.0,
};

static LOW_RISK: RiskProfile = RiskProfile {
    risk_class: RiskClass::Low,
    minimum_thresholds: &[
        (KpiKey::Ltifr, 50.0),
        (KpiKey::HseStaffing, 60.0),
        (KpiKey::Training, 70.0),
        (KpiKey::Equipment, 70.0),
        (KpiKey::Ppe, 70.0),
        (KpiKey::WorkplaceAssessment, 60.0),
    ],
    penalty_multiplier: 0.75,
};

static DEPARTMENT_RISK_CLASSES: &[(&str, RiskClass)] = &[
    ("mining", RiskClass::High),
    ("construction", RiskClass::High),
    ("production", RiskClass::High),
    ("energy", RiskClass::High),
    ("logistics", RiskClass::Medium),
    ("maintenance", RiskClass::Medium),
    ("warehouse", RiskClass::Medium),
    ("administration", RiskClass::Low),
    ("finance", RiskClass::Low),
    ("it", RiskClass::Low),
];

/// Partial weight tables. Each table redistributes exactly the default weight of the keys it
/// lists, so the merged table still sums to 1.0.
static DEPARTMENT_WEIGHT_OVERRIDES: &[(&str, &[(KpiKey, f64)])] = &[
    (
        "mining",
        &[
            (KpiKey::Ltifr, 0.19),
            (KpiKey::Ppe, 0.09),
            (KpiKey::Insurance, 0.02),
            (KpiKey::Emergency, 0.02),
        ],
    ),
    (
        "administration",
        &[
            (KpiKey::Ltifr, 0.12),
            (KpiKey::Training, 0.14),
            (KpiKey::Ppe, 0.05),
            (KpiKey::Equipment, 0.07),
        ],
    ),
];

fn department_key(department_id: &str) -> String {
    department_id.trim().to_ascii_lowercase()
}

pub fn risk_class(department_id: &str) -> RiskClass {
    let key = department_key(department_id);
    DEPARTMENT_RISK_CLASSES
        .iter()
        .find(|(department, _)| *department == key)
        .map(|(_, class)| *class)
        .unwrap_or(RiskClass::Medium)
}

pub fn risk_profile(risk_class: RiskClass) -> &'static RiskProfile {
    match risk_class {
        RiskClass::High => &HIGH_RISK,
        RiskClass::Medium => &MEDIUM_RISK,
        RiskClass::Low => &LOW_RISK,
    }
}

pub fn weight_override(department_id: &str) -> Option<&'static [(KpiKey, f64)]> {
    let key = department_key(department_id);
    DEPARTMENT_WEIGHT_OVERRIDES
        .iter()
        .find(|(department, _)| *department == key)
        .map(|(_, weights)| *weights)
}

pub fn weight(department_id: &str, key: KpiKey) -> f64 {
    weight_override(department_id)
        .and_then(|weights| {
            weights
                .iter()
                .find(|(candidate, _)| *candidate == key)
                .map(|(_, weight)| *weight)
        })
        .unwrap_or_else(|| default_weight(key))
}

/// Full weight table for a department with defaults filled in.
pub fn weights(department_id: &str) -> BTreeMap<KpiKey, f64> {
    KpiKey::ALL
        .into_iter()
        .map(|key| (key, weight(department_id, key)))
        .collect()
}
