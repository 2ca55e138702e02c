use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::cases::domain::{CaseId, CaseIntake, CaseRecord};
use crate::cases::repository::{CaseRepository, RepositoryError};
use crate::cases::{case_router, CaseService};
use crate::chat::KnowledgeBase;
use crate::triage::PatientObservation;

pub(super) fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Intake matching the critical demo preset.
pub(super) fn critical_intake() -> CaseIntake {
    CaseIntake {
        patient_name: "Asha Rao".to_string(),
        patient_age: Some(42),
        patient_gender: Some("Female".to_string()),
        observation: PatientObservation {
            headache: true,
            body_pain: true,
            nausea_vomiting: true,
            breathing_difficulty: true,
            platelet_count: Some(80),
            travel_history: true,
            mosquito_exposure: true,
            ..PatientObservation::new(40.5, 5)
        },
    }
}

pub(super) fn mild_intake() -> CaseIntake {
    CaseIntake::anonymous(PatientObservation {
        headache: true,
        platelet_count: Some(280),
        ..PatientObservation::new(37.8, 2)
    })
}

pub(super) fn build_service() -> (CaseService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CaseService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: CaseService<MemoryRepository>) -> axum::Router {
    case_router(Arc::new(service), Arc::new(KnowledgeBase::standard()))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for MemoryRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id, record);
        Ok(())
    }

    fn fetch(&self, id: CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl CaseRepository for ConflictRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(None)
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CaseRepository for UnavailableRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
