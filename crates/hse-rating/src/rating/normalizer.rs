//! Piecewise curves mapping derived KPI values onto the 0–100 score scale.
//!
//! Each curve is a plain `fn(f64) -> f64` registered in [`CURVES`]. The curves may return values
//! outside the score range; [`normalize`] rounds and clamps every result.

use super::registry::KpiKey;

pub type Curve = fn(f64) -> f64;

/// A point on a piecewise-linear curve.
struct Breakpoint {
    input: f64,
    score: f64,
}

const fn point(input: f64, score: f64) -> Breakpoint {
    Breakpoint { input, score }
}

/// Accident severity points (fatal 100, severe 50, group 40, light 10).
const ACCIDENT_SEVERITY_CURVE: &[Breakpoint] = &[
    point(0.0, 100.0),
    point(1.0, 85.0),
    point(5.0, 60.0),
    point(20.0, 30.0),
    point(50.0, 10.0),
    point(100.0, 0.0),
];

/// Linear interpolation between breakpoints; values outside the curve take the nearest end score.
fn piecewise(value: f64, curve: &[Breakpoint]) -> f64 {
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return 0.0;
    };
    if value <= first.input {
        return first.score;
    }
    for pair in curve.windows(2) {
        let (low, high) = (&pair[0], &pair[1]);
        if value <= high.input {
            let fraction = (value - low.input) / (high.input - low.input);
            return low.score + fraction * (high.score - low.score);
        }
    }
    last.score
}

pub fn accident_severity(value: f64) -> f64 {
    piecewise(value, ACCIDENT_SEVERITY_CURVE)
}

pub fn staffing_ratio(value: f64) -> f64 {
    if value >= 100.0 {
        100.0
    } else if value < 50.0 {
        0.0
    } else {
        (value - 50.0) * 2.0
    }
}

/// Percentages already expressed on the score scale.
pub fn percentage(value: f64) -> f64 {
    value
}

/// Neutral stoppage balance scores 50; proactive internal stoppages raise it.
pub fn work_stoppage(value: f64) -> f64 {
    50.0 + value
}

pub fn insurance_burden(value: f64) -> f64 {
    100.0 - value
}

/// Prevention spending as a percentage of total budget; 2–5% is the target band.
pub fn prevention_budget(value: f64) -> f64 {
    if (2.0..=5.0).contains(&value) {
        100.0
    } else if (1.5..2.0).contains(&value) {
        80.0 + (value - 1.5) * 40.0
    } else if (1.0..1.5).contains(&value) {
        60.0 + (value - 1.0) * 40.0
    } else if value > 5.0 && value <= 7.0 {
        100.0 - (value - 5.0) * 15.0
    } else if value < 1.0 {
        value * 60.0
    } else {
        (70.0 - (value - 7.0) * 10.0).max(0.0)
    }
}

pub fn occupational_disease(value: f64) -> f64 {
    if value <= 0.0 {
        100.0
    } else if value <= 1.0 {
        55.0
    } else if value <= 2.0 {
        30.0
    } else if value <= 3.0 {
        15.0
    } else {
        (10.0 - (value - 3.0) * 3.0).max(0.0)
    }
}

pub fn disciplinary_index(value: f64) -> f64 {
    if value <= 0.0 {
        100.0
    } else if value <= 2.0 {
        95.0 - value * 10.0
    } else if value <= 5.0 {
        75.0 - (value - 2.0) * 10.0
    } else if value <= 10.0 {
        45.0 - (value - 5.0) * 6.0
    } else if value <= 20.0 {
        15.0 - (value - 10.0) * 1.5
    } else {
        0.0
    }
}

pub static CURVES: [(KpiKey, Curve); 15] = [
    (KpiKey::Ltifr, accident_severity),
    (KpiKey::HseStaffing, staffing_ratio),
    (KpiKey::IncidentFree, percentage),
    (KpiKey::Training, percentage),
    (KpiKey::WorkplaceAssessment, percentage),
    (KpiKey::WorkStoppage, work_stoppage),
    (KpiKey::Insurance, insurance_burden),
    (KpiKey::Prevention, prevention_budget),
    (KpiKey::Ppe, percentage),
    (KpiKey::Equipment, percentage),
    (KpiKey::Inspection, percentage),
    (KpiKey::Compliance, percentage),
    (KpiKey::Emergency, percentage),
    (KpiKey::OccupationalDisease, occupational_disease),
    (KpiKey::Disciplinary, disciplinary_index),
];

pub fn curve(key: KpiKey) -> Curve {
    CURVES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, curve)| *curve)
        .unwrap_or(percentage)
}

/// Rounds to the nearest integer score and clamps to 0–100. NaN scores 0.
pub fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

pub fn normalize(value: f64, key: KpiKey) -> u8 {
    to_score(curve(key)(value))
}

/// Normalizes by wire name; unrecognized names are clamped to the score range.
pub fn normalize_named(value: f64, key: &str) -> u8 {
    match key.parse::<KpiKey>() {
        Ok(key) => normalize(value, key),
        Err(_) => to_score(value),
    }
}
