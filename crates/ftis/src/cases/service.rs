use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{
    CaseFilter, CaseId, CaseIntake, CaseRecord, CaseStats, CaseUpdate, TriageResponse,
};
use super::repository::{CaseRepository, RepositoryError};
use crate::triage::{sequenced_case_id, TriageEngine};

/// Runs triage for incoming intakes and manages the resulting case log.
pub struct CaseService<R> {
    repository: Arc<R>,
    engine: TriageEngine,
    sequence: AtomicU64,
}

impl<R> CaseService<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: TriageEngine::new(),
            sequence: AtomicU64::new(1),
        }
    }

    /// Assess and store a new case stamped with the current time.
    pub fn submit(&self, intake: CaseIntake) -> Result<TriageResponse, CaseServiceError> {
        self.submit_at(intake, Utc::now())
    }

    pub fn submit_at(
        &self,
        intake: CaseIntake,
        submitted_at: DateTime<Utc>,
    ) -> Result<TriageResponse, CaseServiceError> {
        let mut result = self.engine.assess(&intake.observation, submitted_at);
        let id = self.next_id();
        result.case_id = sequenced_case_id(submitted_at, id.0);
        let record = CaseRecord::from_assessment(id, intake, &result);
        let stored = self.repository.insert(record)?;

        info!(
            db_id = stored.id.0,
            case_id = %stored.case_id,
            level = stored.triage_level.label(),
            score = stored.triage_score,
            "case submitted"
        );

        Ok(TriageResponse {
            result,
            db_id: stored.id,
        })
    }

    /// Matching cases, newest first, capped at the filter limit.
    pub fn list(&self, filter: &CaseFilter) -> Result<Vec<CaseRecord>, CaseServiceError> {
        let mut records: Vec<CaseRecord> = self
            .repository
            .all()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        newest_first(&mut records);
        records.truncate(filter.limit);
        Ok(records)
    }

    pub fn get(&self, id: CaseId) -> Result<CaseRecord, CaseServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn update(&self, id: CaseId, update: CaseUpdate) -> Result<CaseRecord, CaseServiceError> {
        self.update_at(id, update, Utc::now())
    }

    pub fn update_at(
        &self,
        id: CaseId,
        update: CaseUpdate,
        now: DateTime<Utc>,
    ) -> Result<CaseRecord, CaseServiceError> {
        let mut record = self.get(id)?;
        update.apply(&mut record, now);
        self.repository.update(record.clone())?;

        debug!(db_id = id.0, status = record.status.label(), "case updated");
        Ok(record)
    }

    pub fn stats(&self) -> Result<CaseStats, CaseServiceError> {
        let mut records = self.repository.all()?;
        newest_first(&mut records);
        Ok(CaseStats::from_records(records))
    }

    fn next_id(&self) -> CaseId {
        CaseId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }
}

fn newest_first(records: &mut [CaseRecord]) {
    records.sort_by_key(|record| Reverse((record.timestamp, record.id)));
}

#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
