use hse_rating::rating::{
    DepartmentId, MeasurementRepository, PeriodRecord, ReportingPeriod, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type PeriodKey = (DepartmentId, ReportingPeriod);

/// Process-local period store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMeasurementRepository {
    records: Arc<Mutex<BTreeMap<PeriodKey, PeriodRecord>>>,
}

impl InMemoryMeasurementRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<PeriodKey, PeriodRecord>>, RepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("period store lock poisoned".to_string()))
    }
}

impl MeasurementRepository for InMemoryMeasurementRepository {
    fn upsert(&self, record: PeriodRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.insert((record.department_id.clone(), record.period), record);
        Ok(())
    }

    fn fetch(
        &self,
        department_id: &DepartmentId,
        period: ReportingPeriod,
    ) -> Result<Option<PeriodRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(&(department_id.clone(), period)).cloned())
    }

    fn periods(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<ReportingPeriod>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .keys()
            .filter(|(department, _)| department == department_id)
            .map(|(_, period)| *period)
            .collect())
    }
}
