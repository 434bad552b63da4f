use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::rating::{
    DepartmentId, MeasurementRepository, PeriodRecord, PeriodSubmission, RawMeasurementSet,
    ReportingPeriod, RepositoryError, SafetyRatingService,
};

/// Department with every KPI at its best attainable score.
pub(super) fn perfect_measurements() -> RawMeasurementSet {
    RawMeasurementSet {
        hse_staff_actual: 100.0,
        hse_staff_required: 100.0,
        days_without_incident: 365.0,
        training_passed: 100.0,
        training_required: 100.0,
        assessed_workplaces: 1.0,
        planned_workplaces: 1.0,
        completed_actions: 1.0,
        planned_actions: 1.0,
        internal_stoppages: 25.0,
        payroll_fund: 1_000_000.0,
        prevention_budget: 300.0,
        total_budget: 10_000.0,
        ppe_equipped: 100.0,
        ppe_required: 100.0,
        equipment_inspected: 100.0,
        equipment_total: 100.0,
        inspections_done: 10.0,
        inspections_planned: 10.0,
        audit_total: 12.0,
        drills_participated: 20.0,
        drills_planned: 20.0,
        employees: 100.0,
        ..RawMeasurementSet::default()
    }
}

/// Only the threshold-bearing inputs filled in; ancillary KPIs left at zero.
pub(super) fn threshold_ready_measurements() -> RawMeasurementSet {
    RawMeasurementSet {
        hse_staff_actual: 100.0,
        hse_staff_required: 100.0,
        training_passed: 100.0,
        training_required: 100.0,
        ppe_equipped: 100.0,
        ppe_required: 100.0,
        equipment_inspected: 100.0,
        equipment_total: 100.0,
        assessed_workplaces: 1.0,
        planned_workplaces: 1.0,
        completed_actions: 1.0,
        planned_actions: 1.0,
        employees: 100.0,
        ..RawMeasurementSet::default()
    }
}

pub(super) fn submission(department: &str, month: u32, year: i32) -> PeriodSubmission {
    PeriodSubmission {
        department_id: department.to_string(),
        month,
        year,
        measurements: perfect_measurements(),
    }
}

pub(super) fn period(month: u32, year: i32) -> ReportingPeriod {
    ReportingPeriod::new(month, year).expect("valid period")
}

pub(super) fn department(id: &str) -> DepartmentId {
    DepartmentId::parse(id).expect("valid department")
}

pub(super) fn memory_service() -> Arc<SafetyRatingService<MemoryRepository>> {
    Arc::new(SafetyRatingService::new(Arc::new(
        MemoryRepository::default(),
    )))
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<BTreeMap<(DepartmentId, ReportingPeriod), PeriodRecord>>,
}

impl MeasurementRepository for MemoryRepository {
    fn upsert(&self, record: PeriodRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert((record.department_id.clone(), record.period), record);
        Ok(())
    }

    fn fetch(
        &self,
        department_id: &DepartmentId,
        period: ReportingPeriod,
    ) -> Result<Option<PeriodRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&(department_id.clone(), period)).cloned())
    }

    fn periods(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<ReportingPeriod>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .keys()
            .filter(|(department, _)| department == department_id)
            .map(|(_, period)| *period)
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl MeasurementRepository for UnavailableRepository {
    fn upsert(&self, _record: PeriodRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn fetch(
        &self,
        _department_id: &DepartmentId,
        _period: ReportingPeriod,
    ) -> Result<Option<PeriodRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn periods(
        &self,
        _department_id: &DepartmentId,
    ) -> Result<Vec<ReportingPeriod>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}
