use clap::Args;
use hse_rating::error::AppError;
use hse_rating::rating::{
    compute_rating, CompanyRating, MeasurementImporter, PeriodSubmission, RatingServiceError,
    RatingZone, RawMeasurementSet,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// Department identifier used for risk-class and weight lookup
    #[arg(long)]
    pub(crate) department: String,
    /// JSON file with the raw measurement set (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with department, month, year and measurement columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print one JSON document instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchRow {
    pub(crate) department_id: String,
    pub(crate) period: String,
    pub(crate) zone: RatingZone,
    #[serde(flatten)]
    pub(crate) rating: CompanyRating,
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), AppError> {
    let RateArgs { department, input } = args;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let measurements: RawMeasurementSet = serde_json::from_str(&raw)?;

    let rating = compute_rating(&measurements, &department);
    render_rating(&department, &rating);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let rows = rate_export(MeasurementImporter::from_path(&args.csv)?)?;

    if args.json {
        let document = serde_json::to_string_pretty(&rows)
            .map_err(|err| AppError::Io(std::io::Error::from(err)))?;
        println!("{document}");
        return Ok(());
    }

    println!("Rated {} period(s) from {}", rows.len(), args.csv.display());
    for row in &rows {
        println!(
            "- {} {}: {:.2} [{}] {} violation(s)",
            row.department_id,
            row.period,
            row.rating.rating,
            row.zone.label(),
            row.rating.violations.len()
        );
    }
    Ok(())
}

pub(crate) fn rate_export(submissions: Vec<PeriodSubmission>) -> Result<Vec<BatchRow>, AppError> {
    submissions
        .into_iter()
        .map(|submission| -> Result<BatchRow, AppError> {
            let (department_id, period) =
                submission.validate().map_err(RatingServiceError::from)?;
            let rating = compute_rating(&submission.measurements, department_id.as_str());
            Ok(BatchRow {
                department_id: department_id.to_string(),
                period: period.to_string(),
                zone: RatingZone::from_rating(rating.rating),
                rating,
            })
        })
        .collect()
}

pub(crate) fn render_rating(department: &str, rating: &CompanyRating) {
    let zone = RatingZone::from_rating(rating.rating);
    println!(
        "Department {} ({} risk): rating {:.2} [{}]",
        department,
        rating.risk_class.label(),
        rating.rating,
        zone.label()
    );

    println!("\nKPI scores");
    for (key, result) in &rating.kpi_results {
        println!(
            "- {:<32} value {:>10.2}  score {:>3}",
            key.definition().name,
            result.value,
            result.score
        );
    }

    if rating.violations.is_empty() {
        println!("\nMinimum requirements: all met");
    } else {
        println!("\nMinimum requirement violations");
        for violation in &rating.violations {
            println!(
                "- {}: score {} below required {} (-{} points)",
                violation.metric, violation.actual, violation.required, violation.penalty
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hse_rating::rating::KpiKey;
    use std::io::Cursor;

    #[test]
    fn rate_export_pairs_rows_with_zones() {
        let csv = "department,month,year,hseStaffActual,hseStaffRequired\n\
                   logistics,2,2025,1,1\n";
        let submissions = MeasurementImporter::from_reader(Cursor::new(csv)).expect("imports");

        let rows = rate_export(submissions).expect("rows rate");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].period, "2025-02");
        assert_eq!(rows[0].department_id, "logistics");
        assert_eq!(rows[0].zone, RatingZone::from_rating(rows[0].rating.rating));
        assert_eq!(rows[0].rating.kpi_results[&KpiKey::HseStaffing].score, 100);

        let encoded = serde_json::to_value(&rows[0]).expect("row serializes");
        assert_eq!(encoded["departmentId"], "logistics");
        assert!(encoded["riskClass"].is_string());
        assert!(encoded["kpiResults"].is_object());
    }

    #[test]
    fn rate_export_rejects_unvalidated_submissions() {
        let submission = PeriodSubmission {
            department_id: "logistics".to_string(),
            month: 0,
            year: 2025,
            measurements: RawMeasurementSet::default(),
        };

        let error = rate_export(vec![submission]).expect_err("month 0 is invalid");

        assert!(matches!(error, AppError::Rating(RatingServiceError::Period(_))));
    }
}
