use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::registry::KpiKey;

/// Raw counters and amounts reported for one department and one period.
///
/// Every field defaults to zero. Values that are missing, `null`, non-numeric, or non-finite
/// are read as zero so that partially filled periods can still be rated. The accident counters
/// also accept the short names `fatal`, `severe`, `group` and `light`; when both spellings are
/// present the full name wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct RawMeasurementSet {
    #[serde(deserialize_with = "lenient_number")]
    pub fatal_accidents: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub severe_accidents: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub group_accidents: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub light_accidents: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub hse_staff_actual: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub hse_staff_required: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub days_without_incident: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub training_passed: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub training_required: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub assessed_workplaces: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub planned_workplaces: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub completed_actions: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub planned_actions: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub internal_stoppages: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub external_stoppages: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub insurance_payment: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub payroll_fund: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub prevention_budget: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub total_budget: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub ppe_equipped: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub ppe_required: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub equipment_inspected: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub equipment_total: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub inspections_done: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub inspections_planned: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub audit_issues: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub audit_total: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub drills_participated: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub drills_planned: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub occupational_diseases: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub red_tickets: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub yellow_tickets: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub green_tickets: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub employees: f64,
}

const SHORT_ACCIDENT_NAMES: [(&str, &str); 4] = [
    ("fatal", "fatalAccidents"),
    ("severe", "severeAccidents"),
    ("group", "groupAccidents"),
    ("light", "lightAccidents"),
];

impl Serialize for RawMeasurementSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawMeasurementSet::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for RawMeasurementSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        for (short, full) in SHORT_ACCIDENT_NAMES {
            if let Some(value) = fields.remove(short) {
                fields.entry(full).or_insert(value);
            }
        }
        RawMeasurementSet::deserialize(Value::Object(fields)).map_err(de::Error::custom)
    }
}

/// Reads a JSON value as a finite number, falling back to zero.
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite()).unwrap_or(0.0)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

/// `numerator / denominator * 100`, or zero when the denominator is not positive.
fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

fn planned_or_one(planned: f64) -> f64 {
    if planned > 0.0 {
        planned
    } else {
        1.0
    }
}

impl RawMeasurementSet {
    /// Weighted accident points: fatal 100, severe 50, group 40, light 10.
    pub fn accident_severity(&self) -> f64 {
        self.fatal_accidents * 100.0
            + self.severe_accidents * 50.0
            + self.group_accidents * 40.0
            + self.light_accidents * 10.0
    }

    pub fn workplace_assessment(&self) -> f64 {
        let assessed = self.assessed_workplaces / planned_or_one(self.planned_workplaces) * 100.0;
        let completed = self.completed_actions / planned_or_one(self.planned_actions) * 100.0;
        assessed * 0.4 + completed * 0.6
    }

    pub fn compliance(&self) -> f64 {
        if self.audit_total > 0.0 {
            (1.0 - self.audit_issues / self.audit_total) * 100.0
        } else {
            0.0
        }
    }

    pub fn disciplinary_index(&self) -> f64 {
        let points = self.red_tickets * 10.0 + self.yellow_tickets * 3.0 + self.green_tickets;
        percent(points, self.employees)
    }

    /// Derived value for a KPI in that KPI's natural units.
    pub fn derive(&self, key: KpiKey) -> f64 {
        let value = match key {
            KpiKey::Ltifr => self.accident_severity(),
            KpiKey::HseStaffing => percent(self.hse_staff_actual, self.hse_staff_required),
            KpiKey::IncidentFree => (self.days_without_incident / 365.0 * 100.0).min(100.0),
            KpiKey::Training => percent(self.training_passed, self.training_required),
            KpiKey::WorkplaceAssessment => self.workplace_assessment(),
            KpiKey::WorkStoppage => self.internal_stoppages * 2.0 - self.external_stoppages * 20.0,
            KpiKey::Insurance => percent(self.insurance_payment, self.payroll_fund) * 10.0,
            KpiKey::Prevention => percent(self.prevention_budget, self.total_budget),
            KpiKey::Ppe => percent(self.ppe_equipped, self.ppe_required),
            KpiKey::Equipment => percent(self.equipment_inspected, self.equipment_total),
            KpiKey::Inspection => percent(self.inspections_done, self.inspections_planned),
            KpiKey::Compliance => self.compliance(),
            KpiKey::Emergency => percent(self.drills_participated, self.drills_planned),
            KpiKey::OccupationalDisease => self.occupational_diseases,
            KpiKey::Disciplinary => self.disciplinary_index(),
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_zero() {
        let raw: RawMeasurementSet = serde_json::from_value(json!({})).expect("empty set parses");
        assert_eq!(raw, RawMeasurementSet::default());
    }

    #[test]
    fn garbage_values_are_read_as_zero() {
        let raw: RawMeasurementSet = serde_json::from_value(json!({
            "fatal": "n/a",
            "severeAccidents": null,
            "lightAccidents": "3",
            "employees": [1, 2],
            "hseStaffActual": true,
            "payrollFund": { "amount": 10 },
            "unknownColumn": 99
        }))
        .expect("lenient parse");

        assert_eq!(raw.fatal_accidents, 0.0);
        assert_eq!(raw.severe_accidents, 0.0);
        assert_eq!(raw.light_accidents, 3.0);
        assert_eq!(raw.employees, 0.0);
        assert_eq!(raw.hse_staff_actual, 0.0);
        assert_eq!(raw.payroll_fund, 0.0);
    }

    #[test]
    fn short_accident_aliases_are_accepted() {
        let raw: RawMeasurementSet = serde_json::from_value(json!({
            "fatal": 1, "severe": 1, "group": 1, "light": 2
        }))
        .expect("aliases parse");
        assert_eq!(raw.accident_severity(), 100.0 + 50.0 + 40.0 + 20.0);
    }

    #[test]
    fn full_accident_names_win_over_short_ones() {
        let raw: RawMeasurementSet = serde_json::from_value(json!({
            "fatal": 1,
            "fatalAccidents": 2,
            "lightAccidents": "4",
            "light": 9
        }))
        .expect("both spellings parse");

        assert_eq!(raw.fatal_accidents, 2.0);
        assert_eq!(raw.light_accidents, 4.0);
    }

    #[test]
    fn serializes_with_full_camel_case_names() {
        let raw = RawMeasurementSet {
            fatal_accidents: 1.0,
            hse_staff_actual: 3.0,
            ..RawMeasurementSet::default()
        };

        let encoded = serde_json::to_value(&raw).expect("serializes");

        assert_eq!(encoded["fatalAccidents"], 1.0);
        assert_eq!(encoded["hseStaffActual"], 3.0);
        assert!(encoded.get("fatal").is_none());
        let decoded: RawMeasurementSet = serde_json::from_value(encoded).expect("reads back");
        assert_eq!(decoded, raw);
    }

    #[test]
    fn zero_denominators_derive_zero() {
        let raw = RawMeasurementSet {
            hse_staff_actual: 4.0,
            training_passed: 10.0,
            insurance_payment: 500.0,
            prevention_budget: 20.0,
            ppe_equipped: 8.0,
            equipment_inspected: 3.0,
            inspections_done: 2.0,
            audit_issues: 1.0,
            drills_participated: 5.0,
            red_tickets: 1.0,
            ..RawMeasurementSet::default()
        };

        for key in [
            KpiKey::HseStaffing,
            KpiKey::Training,
            KpiKey::Insurance,
            KpiKey::Prevention,
            KpiKey::Ppe,
            KpiKey::Equipment,
            KpiKey::Inspection,
            KpiKey::Compliance,
            KpiKey::Emergency,
            KpiKey::Disciplinary,
        ] {
            let value = raw.derive(key);
            assert_eq!(value, 0.0, "{key} derived {value}");
        }
    }

    #[test]
    fn workplace_assessment_blends_coverage_and_actions() {
        let raw = RawMeasurementSet {
            assessed_workplaces: 8.0,
            planned_workplaces: 10.0,
            completed_actions: 1.0,
            planned_actions: 2.0,
            ..RawMeasurementSet::default()
        };
        assert!((raw.derive(KpiKey::WorkplaceAssessment) - (80.0 * 0.4 + 50.0 * 0.6)).abs() < 1e-9);

        let unplanned = RawMeasurementSet {
            assessed_workplaces: 1.0,
            completed_actions: 1.0,
            ..RawMeasurementSet::default()
        };
        assert!((unplanned.derive(KpiKey::WorkplaceAssessment) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn incident_free_days_cap_at_one_year() {
        let raw = RawMeasurementSet {
            days_without_incident: 730.0,
            ..RawMeasurementSet::default()
        };
        assert_eq!(raw.derive(KpiKey::IncidentFree), 100.0);

        let half = RawMeasurementSet {
            days_without_incident: 73.0,
            ..RawMeasurementSet::default()
        };
        assert!((half.derive(KpiKey::IncidentFree) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_derivations() {
        let raw = RawMeasurementSet {
            insurance_payment: 1_200.0,
            payroll_fund: 100_000.0,
            prevention_budget: 30.0,
            total_budget: 1_000.0,
            audit_issues: 2.0,
            audit_total: 8.0,
            internal_stoppages: 5.0,
            external_stoppages: 1.0,
            red_tickets: 1.0,
            yellow_tickets: 2.0,
            green_tickets: 4.0,
            employees: 200.0,
            ..RawMeasurementSet::default()
        };
        assert!((raw.derive(KpiKey::Insurance) - 12.0).abs() < 1e-9);
        assert!((raw.derive(KpiKey::Prevention) - 3.0).abs() < 1e-9);
        assert!((raw.derive(KpiKey::Compliance) - 75.0).abs() < 1e-9);
        assert_eq!(raw.derive(KpiKey::WorkStoppage), -10.0);
        assert!((raw.derive(KpiKey::Disciplinary) - 10.0).abs() < 1e-9);
    }
}
