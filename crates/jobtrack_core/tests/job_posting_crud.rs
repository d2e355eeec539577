use chrono::{Duration, Local, NaiveDate};
use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    JobApplyRepository, JobApplyStatus, JobPostingRepository, JobPostingService, NewJobPosting,
    SqliteJobApplyRepository, SqliteJobPostingRepository,
};
use rusqlite::Connection;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn posting_for(company: &str) -> NewJobPosting {
    NewJobPosting {
        company_name: company.to_string(),
        ..NewJobPosting::default()
    }
}

fn raw_updated_at(conn: &Connection, id: i64) -> String {
    conn.query_row(
        "SELECT updated_at FROM job_posting WHERE id = ?1;",
        [id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::new(&conn);

    let new = NewJobPosting {
        company_name: "Acme".to_string(),
        position: Some("Backend Engineer".to_string()),
        job_posting_url: Some("https://example.com/jobs/1".to_string()),
        start_date: Some(day(2024, 3, 1)),
        end_date: Some(day(2024, 3, 31)),
        requirements: Some("3+ years Rust".to_string()),
        notes: Some("remote friendly".to_string()),
    };
    let created = repo.create(&new).unwrap();

    let loaded = repo.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.start_date, Some(day(2024, 3, 1)));
    assert_eq!(loaded.end_date, Some(day(2024, 3, 31)));
}

#[test]
fn find_all_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::new(&conn);

    let first = repo.create(&posting_for("Acme")).unwrap();
    let second = repo.create(&posting_for("Globex")).unwrap();

    let all = repo.find_all().unwrap();
    let ids: Vec<_> = all.iter().map(|posting| posting.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let acme = repo.find_by_company_name("Acme").unwrap();
    assert_eq!(acme.len(), 1);
    assert_eq!(acme[0].id, first.id);
}

#[test]
fn end_date_range_is_inclusive_and_ascending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::new(&conn);

    let late = repo
        .create(&NewJobPosting {
            company_name: "Globex".to_string(),
            end_date: Some(day(2024, 3, 20)),
            ..NewJobPosting::default()
        })
        .unwrap();
    let early = repo
        .create(&NewJobPosting {
            company_name: "Acme".to_string(),
            end_date: Some(day(2024, 3, 10)),
            ..NewJobPosting::default()
        })
        .unwrap();
    let outside = repo
        .create(&NewJobPosting {
            company_name: "Initech".to_string(),
            end_date: Some(day(2024, 4, 1)),
            ..NewJobPosting::default()
        })
        .unwrap();
    // No end date: never matches a range.
    repo.create(&posting_for("Umbrella")).unwrap();

    let in_range = repo
        .find_by_end_date_range(day(2024, 3, 10), day(2024, 3, 20))
        .unwrap();
    let ids: Vec<_> = in_range.iter().map(|posting| posting.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);
    assert!(!ids.contains(&outside.id));
}

#[test]
fn upcoming_deadlines_exclude_expired_postings() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::new(&conn);

    let today = Local::now().date_naive();
    let expired = repo
        .create(&NewJobPosting {
            company_name: "Expired".to_string(),
            end_date: Some(today - Duration::days(1)),
            ..NewJobPosting::default()
        })
        .unwrap();
    let due_today = repo
        .create(&NewJobPosting {
            company_name: "DueToday".to_string(),
            end_date: Some(today),
            ..NewJobPosting::default()
        })
        .unwrap();
    let due_soon = repo
        .create(&NewJobPosting {
            company_name: "DueSoon".to_string(),
            end_date: Some(today + Duration::days(5)),
            ..NewJobPosting::default()
        })
        .unwrap();
    let far_out = repo
        .create(&NewJobPosting {
            company_name: "FarOut".to_string(),
            end_date: Some(today + Duration::days(30)),
            ..NewJobPosting::default()
        })
        .unwrap();

    let upcoming = repo.find_upcoming_deadlines(7).unwrap();
    let ids: Vec<_> = upcoming.iter().map(|posting| posting.id).collect();
    assert_eq!(ids, vec![due_today.id, due_soon.id]);
    assert!(!ids.contains(&expired.id));
    assert!(!ids.contains(&far_out.id));
}

#[test]
fn per_field_updates_mutate_and_reject_deleted_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::new(&conn);

    let posting = repo.create(&posting_for("Acme")).unwrap();

    assert!(repo.update_company_name(posting.id, "Acme Korea").unwrap());
    assert!(repo.update_position(posting.id, Some("Platform")).unwrap());
    assert!(repo
        .update_job_posting_url(posting.id, Some("https://example.com/jobs/9"))
        .unwrap());
    assert!(repo
        .update_start_date(posting.id, Some(day(2024, 3, 1)))
        .unwrap());
    assert!(repo
        .update_end_date(posting.id, Some(day(2024, 3, 31)))
        .unwrap());
    assert!(repo
        .update_requirements(posting.id, Some("portfolio"))
        .unwrap());
    assert!(repo.update_notes(posting.id, Some("hiring freeze?")).unwrap());

    let loaded = repo.find_by_id(posting.id).unwrap().unwrap();
    assert_eq!(loaded.company_name, "Acme Korea");
    assert_eq!(loaded.end_date, Some(day(2024, 3, 31)));
    assert_eq!(loaded.requirements.as_deref(), Some("portfolio"));

    assert!(repo.delete(posting.id).unwrap());
    let stamp_before = raw_updated_at(&conn, posting.id);
    assert!(!repo.update_company_name(posting.id, "Ghost Corp").unwrap());
    assert!(!repo.update_end_date(posting.id, None).unwrap());
    assert_eq!(raw_updated_at(&conn, posting.id), stamp_before);
}

#[test]
fn delete_many_counts_existing_rows_even_if_already_deleted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::new(&conn);

    let first = repo.create(&posting_for("Acme")).unwrap();
    let second = repo.create(&posting_for("Globex")).unwrap();
    assert!(repo.delete(first.id).unwrap());

    let count = repo.delete_many(&[first.id, second.id, 777]).unwrap();
    assert_eq!(count, 2);
}

#[test]
fn conversion_copies_fields_and_merges_notes() {
    let conn = open_db_in_memory().unwrap();
    let postings = SqliteJobPostingRepository::new(&conn);
    let applies = SqliteJobApplyRepository::new(&conn);

    let posting = postings
        .create(&NewJobPosting {
            company_name: "Acme".to_string(),
            position: Some("Backend Engineer".to_string()),
            job_posting_url: Some("https://example.com/jobs/1".to_string()),
            start_date: Some(day(2024, 3, 1)),
            end_date: Some(day(2024, 3, 31)),
            requirements: Some("자소서 3항목".to_string()),
            notes: Some("좋은 회사".to_string()),
        })
        .unwrap();

    let apply = postings
        .convert_to_application(posting.id)
        .unwrap()
        .expect("conversion should produce an application");

    assert_eq!(apply.company_name, "Acme");
    assert_eq!(apply.position.as_deref(), Some("Backend Engineer"));
    assert_eq!(
        apply.job_posting_url.as_deref(),
        Some("https://example.com/jobs/1")
    );
    assert_eq!(apply.status, JobApplyStatus::Applied);
    assert_eq!(apply.applied_at, None);
    assert_eq!(apply.next_event_date, None);
    assert_eq!(
        apply.notes.as_deref(),
        Some("요구사항: 자소서 3항목\n메모: 좋은 회사")
    );

    // The application is persisted and the posting is retired.
    let stored = applies.find_by_id(apply.id).unwrap().unwrap();
    assert_eq!(stored, apply);
    assert!(postings.find_by_id(posting.id).unwrap().is_none());
    assert!(postings.find_all().unwrap().is_empty());
}

#[test]
fn conversion_without_requirements_or_notes_leaves_notes_empty() {
    let conn = open_db_in_memory().unwrap();
    let postings = SqliteJobPostingRepository::new(&conn);

    let posting = postings.create(&posting_for("Acme")).unwrap();
    let apply = postings
        .convert_to_application(posting.id)
        .unwrap()
        .unwrap();
    assert_eq!(apply.notes, None);
}

#[test]
fn converting_missing_or_deleted_posting_has_no_side_effect() {
    let conn = open_db_in_memory().unwrap();
    let postings = SqliteJobPostingRepository::new(&conn);
    let applies = SqliteJobApplyRepository::new(&conn);

    assert!(postings.convert_to_application(999).unwrap().is_none());

    let posting = postings.create(&posting_for("Acme")).unwrap();
    assert!(postings.delete(posting.id).unwrap());
    assert!(postings
        .convert_to_application(posting.id)
        .unwrap()
        .is_none());

    assert!(applies.find_all().unwrap().is_empty());
    let apply_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM job_apply;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(apply_rows, 0);
}

#[test]
fn converted_posting_cannot_be_converted_twice() {
    let conn = open_db_in_memory().unwrap();
    let postings = SqliteJobPostingRepository::new(&conn);
    let applies = SqliteJobApplyRepository::new(&conn);

    let posting = postings.create(&posting_for("Acme")).unwrap();
    assert!(postings.convert_to_application(posting.id).unwrap().is_some());
    assert!(postings.convert_to_application(posting.id).unwrap().is_none());
    assert_eq!(applies.find_all().unwrap().len(), 1);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = JobPostingService::new(SqliteJobPostingRepository::new(&conn));

    let created = service
        .create_job_posting(&NewJobPosting {
            company_name: "Acme".to_string(),
            end_date: Some(Local::now().date_naive() + Duration::days(3)),
            ..NewJobPosting::default()
        })
        .unwrap();

    assert_eq!(service.find_upcoming_deadlines(7).unwrap().len(), 1);

    let apply = service
        .convert_to_application(created.id)
        .unwrap()
        .expect("conversion should succeed");
    assert_eq!(apply.company_name, "Acme");
    assert!(service.find_all().unwrap().is_empty());
}
