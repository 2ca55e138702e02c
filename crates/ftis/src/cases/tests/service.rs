use std::sync::Arc;

use chrono::Duration;

use super::common::*;
use crate::cases::domain::{CaseFilter, CaseId, CaseStatus, CaseUpdate};
use crate::cases::repository::{CaseRepository, RepositoryError};
use crate::cases::{seed_cases, CaseService, CaseServiceError, RECENT_CASE_COUNT};
use crate::triage::{Condition, TriageLevel, DEFAULT_PLATELET_COUNT};

#[test]
fn submit_stores_pending_case_with_assessment_summary() {
    let (service, repository) = build_service();

    let response = service
        .submit_at(critical_intake(), morning())
        .expect("submission succeeds");

    assert_eq!(response.db_id, CaseId(1));
    assert_eq!(response.result.level, TriageLevel::Critical);

    let stored = repository
        .fetch(response.db_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, CaseStatus::Pending);
    assert_eq!(stored.case_id, response.result.case_id);
    assert_eq!(stored.triage_score, 20);
    assert_eq!(stored.top_diagnosis, Some(Condition::Malaria));
    assert_eq!(stored.patient_name, "Asha Rao");
    assert_eq!(stored.timestamp, morning());
}

#[test]
fn submit_records_default_platelet_count() {
    let (service, repository) = build_service();
    let mut intake = mild_intake();
    intake.observation.platelet_count = None;

    let response = service.submit(intake).expect("submission succeeds");
    let stored = repository
        .fetch(response.db_id)
        .expect("fetch succeeds")
        .expect("record present");

    assert_eq!(stored.observation.platelet_count, Some(DEFAULT_PLATELET_COUNT));
    assert_eq!(stored.patient_name, "Anonymous");
}

#[test]
fn ids_increase_with_each_submission() {
    let (service, _) = build_service();
    let first = service.submit(mild_intake()).expect("first");
    let second = service.submit(mild_intake()).expect("second");
    assert_eq!(first.db_id, CaseId(1));
    assert_eq!(second.db_id, CaseId(2));
}

#[test]
fn submit_propagates_repository_conflicts() {
    let service = CaseService::new(Arc::new(ConflictRepository));
    match service.submit(mild_intake()) {
        Err(CaseServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();
    match service.get(CaseId(99)) {
        Err(CaseServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn list_filters_and_orders_newest_first() {
    let (service, _) = build_service();
    let start = morning();
    service
        .submit_at(mild_intake(), start)
        .expect("mild submission");
    service
        .submit_at(critical_intake(), start + Duration::minutes(5))
        .expect("critical submission");
    service
        .submit_at(mild_intake(), start + Duration::minutes(10))
        .expect("second mild submission");

    let all = service.list(&CaseFilter::default()).expect("list succeeds");
    let ids: Vec<u64> = all.iter().map(|record| record.id.0).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let mild = service
        .list(&CaseFilter {
            triage_level: Some(TriageLevel::Mild),
            ..CaseFilter::default()
        })
        .expect("filtered list");
    assert_eq!(mild.len(), 2);

    let limited = service
        .list(&CaseFilter {
            limit: 1,
            ..CaseFilter::default()
        })
        .expect("limited list");
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, CaseId(3));
}

#[test]
fn completing_a_case_stamps_review_time() {
    let (service, _) = build_service();
    let response = service.submit(critical_intake()).expect("submission");
    let reviewed_at = morning() + Duration::hours(1);

    let reviewing = service
        .update_at(
            response.db_id,
            CaseUpdate {
                status: Some(CaseStatus::Reviewing),
                assigned_doctor: Some("Dr. Mehta".to_string()),
                ..CaseUpdate::default()
            },
            reviewed_at,
        )
        .expect("reviewing update");
    assert_eq!(reviewing.reviewed_at, None);
    assert_eq!(reviewing.assigned_doctor.as_deref(), Some("Dr. Mehta"));

    let completed = service
        .update_at(
            response.db_id,
            CaseUpdate {
                status: Some(CaseStatus::Completed),
                final_diagnosis: Some("Malaria".to_string()),
                ..CaseUpdate::default()
            },
            reviewed_at,
        )
        .expect("completed update");
    assert_eq!(completed.reviewed_at, Some(reviewed_at));
    assert_eq!(completed.assigned_doctor.as_deref(), Some("Dr. Mehta"));
    assert_eq!(service.get(response.db_id).expect("stored"), completed);
}

#[test]
fn update_of_missing_case_is_not_found() {
    let (service, _) = build_service();
    match service.update(CaseId(5), CaseUpdate::default()) {
        Err(CaseServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn stats_count_urgent_and_pending_cases() {
    let (service, _) = build_service();
    service.submit(critical_intake()).expect("critical");
    service.submit(mild_intake()).expect("mild");
    let closed = service.submit(mild_intake()).expect("closed mild");
    service
        .update(
            closed.db_id,
            CaseUpdate {
                status: Some(CaseStatus::Completed),
                ..CaseUpdate::default()
            },
        )
        .expect("completion");

    let stats = service.stats().expect("stats succeed");
    assert_eq!(stats.total_cases, 3);
    assert_eq!(stats.pending_cases, 2);
    assert_eq!(stats.critical_cases, 1);
    assert_eq!(stats.status_breakdown.get(&CaseStatus::Completed), Some(&1));
    assert_eq!(stats.triage_breakdown.get(&TriageLevel::Mild), Some(&2));
    assert_eq!(stats.recent_cases.len(), 3);
}

#[test]
fn stats_keep_only_the_newest_cases() {
    let (service, _) = build_service();
    seed_cases(&service, 25, 42, morning()).expect("seeding succeeds");

    let stats = service.stats().expect("stats succeed");
    assert_eq!(stats.total_cases, 25);
    assert_eq!(stats.recent_cases.len(), RECENT_CASE_COUNT);
    assert!(stats
        .recent_cases
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    let breakdown_total: usize = stats.status_breakdown.values().sum();
    assert_eq!(breakdown_total, 25);
}

#[test]
fn seeded_completed_cases_record_final_diagnosis() {
    let (service, _) = build_service();
    seed_cases(&service, 40, 9, morning()).expect("seeding succeeds");

    let completed = service
        .list(&CaseFilter {
            status: Some(CaseStatus::Completed),
            ..CaseFilter::default()
        })
        .expect("list succeeds");
    assert!(!completed.is_empty());
    for record in completed {
        assert!(record.final_diagnosis.is_some());
        let reviewed_at = record.reviewed_at.expect("completed cases are stamped");
        assert!(reviewed_at <= morning());
    }
}

#[test]
fn unavailable_repository_surfaces_in_stats() {
    let service = CaseService::new(Arc::new(UnavailableRepository));
    assert!(matches!(
        service.stats(),
        Err(CaseServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn same_instant_submissions_get_distinct_case_ids() {
    let (service, _) = build_service();
    let first = service
        .submit_at(mild_intake(), morning())
        .expect("first submission");
    let second = service
        .submit_at(mild_intake(), morning())
        .expect("second submission");

    assert_eq!(first.result.case_id, "FTIS-1741944600000-000001");
    assert_eq!(second.result.case_id, "FTIS-1741944600000-000002");
}

#[test]
fn seeded_case_ids_are_unique() {
    let (service, _) = build_service();
    let seeded = seed_cases(&service, 200, 42, morning()).expect("seeding succeeds");

    let distinct: std::collections::HashSet<&str> = seeded
        .iter()
        .map(|response| response.result.case_id.as_str())
        .collect();
    assert_eq!(distinct.len(), seeded.len());
}
