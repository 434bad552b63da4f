use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Safety KPIs scored for every department and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KpiKey {
    Ltifr,
    HseStaffing,
    IncidentFree,
    Training,
    WorkplaceAssessment,
    WorkStoppage,
    Insurance,
    Prevention,
    Ppe,
    Equipment,
    Inspection,
    Compliance,
    Emergency,
    OccupationalDisease,
    Disciplinary,
}

impl KpiKey {
    pub const ALL: [KpiKey; 15] = [
        KpiKey::Ltifr,
        KpiKey::HseStaffing,
        KpiKey::IncidentFree,
        KpiKey::Training,
        KpiKey::WorkplaceAssessment,
        KpiKey::WorkStoppage,
        KpiKey::Insurance,
        KpiKey::Prevention,
        KpiKey::Ppe,
        KpiKey::Equipment,
        KpiKey::Inspection,
        KpiKey::Compliance,
        KpiKey::Emergency,
        KpiKey::OccupationalDisease,
        KpiKey::Disciplinary,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiKey::Ltifr => "ltifr",
            KpiKey::HseStaffing => "hseStaffing",
            KpiKey::IncidentFree => "incidentFree",
            KpiKey::Training => "training",
            KpiKey::WorkplaceAssessment => "workplaceAssessment",
            KpiKey::WorkStoppage => "workStoppage",
            KpiKey::Insurance => "insurance",
            KpiKey::Prevention => "prevention",
            KpiKey::Ppe => "ppe",
            KpiKey::Equipment => "equipment",
            KpiKey::Inspection => "inspection",
            KpiKey::Compliance => "compliance",
            KpiKey::Emergency => "emergency",
            KpiKey::OccupationalDisease => "occupationalDisease",
            KpiKey::Disciplinary => "disciplinary",
        }
    }

    pub fn definition(&self) -> &'static KpiDefinition {
        // ALL and KPI_REGISTRY share declaration order.
        &KPI_REGISTRY[*self as usize]
    }
}

impl fmt::Display for KpiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown KPI key '{0}'")]
pub struct UnknownKpiKey(pub String);

impl FromStr for KpiKey {
    type Err = UnknownKpiKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        KpiKey::ALL
            .into_iter()
            .find(|key| key.as_str() == trimmed)
            .ok_or_else(|| UnknownKpiKey(trimmed.to_string()))
    }
}

/// Static description of a KPI and its default contribution to the composite rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDefinition {
    pub key: KpiKey,
    pub name: &'static str,
    pub weight: f64,
    pub lower_is_better: bool,
    pub critical: bool,
}

const fn kpi(
    key: KpiKey,
    name: &'static str,
    weight: f64,
    lower_is_better: bool,
    critical: bool,
) -> KpiDefinition {
    KpiDefinition {
        key,
        name,
        weight,
        lower_is_better,
        critical,
    }
}

/// Default weights sum to 1.0.
pub static KPI_REGISTRY: [KpiDefinition; 15] = [
    kpi(KpiKey::Ltifr, "Accident severity (LTIFR)", 0.15, true, true),
    kpi(KpiKey::HseStaffing, "HSE staffing ratio", 0.08, false, true),
    kpi(KpiKey::IncidentFree, "Incident-free days", 0.07, false, false),
    kpi(KpiKey::Training, "Safety training coverage", 0.08, false, true),
    kpi(
        KpiKey::WorkplaceAssessment,
        "Workplace risk assessment",
        0.07,
        false,
        true,
    ),
    kpi(KpiKey::WorkStoppage, "Work-stoppage index", 0.05, false, false),
    kpi(KpiKey::Insurance, "Insurance burden", 0.05, true, false),
    kpi(KpiKey::Prevention, "Prevention budget ratio", 0.06, false, false),
    kpi(KpiKey::Ppe, "PPE coverage", 0.08, false, true),
    kpi(KpiKey::Equipment, "Equipment readiness", 0.07, false, true),
    kpi(KpiKey::Inspection, "Inspection plan completion", 0.06, false, false),
    kpi(KpiKey::Compliance, "Audit compliance", 0.06, false, false),
    kpi(KpiKey::Emergency, "Emergency drill participation", 0.04, false, false),
    kpi(KpiKey::OccupationalDisease, "Occupational diseases", 0.04, true, false),
    kpi(KpiKey::Disciplinary, "Disciplinary violation index", 0.04, true, false),
];

pub fn default_weight(key: KpiKey) -> f64 {
    key.definition().weight
}

pub fn is_critical(key: KpiKey) -> bool {
    key.definition().critical
}
