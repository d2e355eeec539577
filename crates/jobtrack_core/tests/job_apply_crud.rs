use chrono::{NaiveDate, NaiveDateTime};
use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    JobApplyRepository, JobApplyService, JobApplyStatus, NewJobApply, SqliteJobApplyRepository,
};
use rusqlite::Connection;

fn at(date: (i32, u32, u32), time: (u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(time.0, time.1, time.2)
        .unwrap()
}

fn apply_to(company: &str) -> NewJobApply {
    NewJobApply {
        company_name: company.to_string(),
        ..NewJobApply::default()
    }
}

fn raw_updated_at(conn: &Connection, id: i64) -> String {
    conn.query_row(
        "SELECT updated_at FROM job_apply WHERE id = ?1;",
        [id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_forces_status_applied_and_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let new = NewJobApply {
        company_name: "Acme".to_string(),
        position: Some("Backend Engineer".to_string()),
        job_posting_url: Some("https://example.com/jobs/1".to_string()),
        applied_at: Some(at((2024, 3, 4), (10, 0, 0))),
        next_event_date: Some(at((2024, 3, 20), (14, 0, 0))),
        notes: Some("referred".to_string()),
    };
    let created = repo.create(&new).unwrap();
    assert_eq!(created.status, JobApplyStatus::Applied);

    let loaded = repo.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.company_name, "Acme");
    assert_eq!(loaded.position.as_deref(), Some("Backend Engineer"));
    assert_eq!(loaded.applied_at, Some(at((2024, 3, 4), (10, 0, 0))));
}

#[test]
fn find_all_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let first = repo.create(&apply_to("Acme")).unwrap();
    let second = repo.create(&apply_to("Globex")).unwrap();
    let third = repo.create(&apply_to("Initech")).unwrap();

    let all = repo.find_all().unwrap();
    let ids: Vec<_> = all.iter().map(|apply| apply.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn status_filter_returns_exactly_matching_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let a = repo.create(&apply_to("Acme")).unwrap();
    let b = repo.create(&apply_to("Globex")).unwrap();
    let c = repo.create(&apply_to("Initech")).unwrap();

    assert!(repo
        .update_status(a.id, JobApplyStatus::InterviewScheduled)
        .unwrap());
    assert!(repo
        .update_status(c.id, JobApplyStatus::InterviewScheduled)
        .unwrap());

    let scheduled = repo
        .find_by_status(JobApplyStatus::InterviewScheduled)
        .unwrap();
    let ids: Vec<_> = scheduled.iter().map(|apply| apply.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
    assert!(!ids.contains(&b.id));
}

#[test]
fn find_active_excludes_terminal_statuses() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let a = repo.create(&apply_to("Acme")).unwrap();
    let b = repo.create(&apply_to("Globex")).unwrap();
    let c = repo.create(&apply_to("Initech")).unwrap();

    assert!(repo.update_status(a.id, JobApplyStatus::Passed).unwrap());
    assert!(repo.update_status(b.id, JobApplyStatus::Rejected).unwrap());

    let active = repo.find_active().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, c.id);
}

#[test]
fn status_accepts_any_transition() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let apply = repo.create(&apply_to("Acme")).unwrap();

    // No transition graph: terminal to non-terminal is allowed.
    assert!(repo.update_status(apply.id, JobApplyStatus::Rejected).unwrap());
    assert!(repo
        .update_status(apply.id, JobApplyStatus::ExamScheduled)
        .unwrap());

    let loaded = repo.find_by_id(apply.id).unwrap().unwrap();
    assert_eq!(loaded.status, JobApplyStatus::ExamScheduled);
}

#[test]
fn company_filter_matches_exact_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let acme_first = repo.create(&apply_to("Acme")).unwrap();
    repo.create(&apply_to("Globex")).unwrap();
    let acme_second = repo.create(&apply_to("Acme")).unwrap();

    let acme = repo.find_by_company_name("Acme").unwrap();
    let ids: Vec<_> = acme.iter().map(|apply| apply.id).collect();
    assert_eq!(ids, vec![acme_second.id, acme_first.id]);

    assert!(repo.find_by_company_name("Umbrella").unwrap().is_empty());
}

#[test]
fn applied_date_range_skips_rows_without_applied_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let dated = repo
        .create(&NewJobApply {
            company_name: "Acme".to_string(),
            applied_at: Some(at((2024, 3, 5), (10, 0, 0))),
            ..NewJobApply::default()
        })
        .unwrap();
    repo.create(&apply_to("Globex")).unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    let in_range = repo.find_by_applied_date_range(start, end).unwrap();
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].id, dated.id);
}

#[test]
fn applied_date_range_orders_by_applied_at_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let early = repo
        .create(&NewJobApply {
            company_name: "Acme".to_string(),
            applied_at: Some(at((2024, 3, 4), (9, 0, 0))),
            ..NewJobApply::default()
        })
        .unwrap();
    let late = repo
        .create(&NewJobApply {
            company_name: "Globex".to_string(),
            applied_at: Some(at((2024, 3, 6), (9, 0, 0))),
            ..NewJobApply::default()
        })
        .unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let in_range = repo.find_by_applied_date_range(start, end).unwrap();
    let ids: Vec<_> = in_range.iter().map(|apply| apply.id).collect();
    assert_eq!(ids, vec![late.id, early.id]);
}

#[test]
fn per_field_updates_mutate_and_bump_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let apply = repo.create(&apply_to("Acme")).unwrap();

    assert!(repo.update_company_name(apply.id, "Acme Korea").unwrap());
    assert!(repo.update_position(apply.id, Some("Platform")).unwrap());
    assert!(repo
        .update_job_posting_url(apply.id, Some("https://example.com/jobs/2"))
        .unwrap());
    assert!(repo
        .update_applied_at(apply.id, Some(at((2024, 3, 7), (9, 0, 0))))
        .unwrap());
    assert!(repo
        .update_next_event_date(apply.id, Some(at((2024, 3, 21), (13, 0, 0))))
        .unwrap());
    assert!(repo.update_notes(apply.id, Some("phone screen done")).unwrap());

    let loaded = repo.find_by_id(apply.id).unwrap().unwrap();
    assert_eq!(loaded.company_name, "Acme Korea");
    assert_eq!(loaded.position.as_deref(), Some("Platform"));
    assert_eq!(loaded.applied_at, Some(at((2024, 3, 7), (9, 0, 0))));
    assert_eq!(loaded.next_event_date, Some(at((2024, 3, 21), (13, 0, 0))));
    assert_eq!(loaded.notes.as_deref(), Some("phone screen done"));
}

#[test]
fn update_after_delete_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let apply = repo.create(&apply_to("Acme")).unwrap();
    assert!(repo.delete(apply.id).unwrap());
    let stamp_before = raw_updated_at(&conn, apply.id);

    assert!(!repo.update_status(apply.id, JobApplyStatus::Passed).unwrap());
    assert!(!repo.update_company_name(apply.id, "Ghost Corp").unwrap());
    assert!(!repo.update_notes(apply.id, Some("should not stick")).unwrap());

    assert_eq!(raw_updated_at(&conn, apply.id), stamp_before);
    let status: String = conn
        .query_row(
            "SELECT status FROM job_apply WHERE id = ?1;",
            [apply.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(status, "APPLIED");
}

#[test]
fn soft_delete_hides_row_from_every_finder() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let apply = repo.create(&apply_to("Acme")).unwrap();
    assert!(repo.delete(apply.id).unwrap());

    assert!(repo.find_by_id(apply.id).unwrap().is_none());
    assert!(repo.find_all().unwrap().is_empty());
    assert!(repo.find_active().unwrap().is_empty());
    assert!(repo
        .find_by_status(JobApplyStatus::Applied)
        .unwrap()
        .is_empty());
    assert!(repo.find_by_company_name("Acme").unwrap().is_empty());
}

#[test]
fn delete_many_counts_existing_rows_even_if_already_deleted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobApplyRepository::new(&conn);

    let first = repo.create(&apply_to("Acme")).unwrap();
    let second = repo.create(&apply_to("Globex")).unwrap();
    assert!(repo.delete(first.id).unwrap());

    let count = repo.delete_many(&[first.id, second.id, 12345]).unwrap();
    assert_eq!(count, 2);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = JobApplyService::new(SqliteJobApplyRepository::new(&conn));

    let created = service.create_job_apply(&apply_to("Acme")).unwrap();
    assert!(service
        .update_status(created.id, JobApplyStatus::ExamScheduled)
        .unwrap());

    let active = service.find_active().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status, JobApplyStatus::ExamScheduled);

    assert!(service.delete_job_apply(created.id).unwrap());
    assert!(service.find_all().unwrap().is_empty());
}
