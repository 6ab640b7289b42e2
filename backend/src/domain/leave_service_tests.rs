//! Tests for the leave application services.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::leave::{LeaveDateRange, LeaveReason, LeaveType};
use crate::domain::ports::{MockLeaveApplicationRepository, MockUserRepository};
use crate::domain::{DisplayName, EmailAddress, ErrorCode, UserDraft, Username};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
            .single()
            .expect("valid instant"),
    ))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn user(name: &str) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        username: Username::new(name.to_lowercase().replace(' ', "_")).expect("username"),
        email: EmailAddress::new(format!("{}@example.com", name.len())).expect("email"),
        display_name: DisplayName::new(name).expect("display name"),
        manager: None,
    })
    .expect("valid user")
}

fn application(
    applicant: UserId,
    manager: UserId,
    leave_type: &str,
    (start, end): (NaiveDate, NaiveDate),
    status: LeaveStatus,
) -> LeaveApplication {
    LeaveApplication::from_parts(LeaveApplicationParts {
        id: LeaveApplicationId::random(),
        applicant,
        manager,
        leave_type: LeaveType::new(leave_type).expect("leave type"),
        dates: LeaveDateRange::new(start, end).expect("range"),
        reason: LeaveReason::new("reason").expect("reason"),
        status,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    })
    .expect("valid application")
}

fn submission(manager: UserId) -> LeaveSubmission {
    LeaveSubmission {
        manager,
        leave_type: LeaveType::new("Vacation").expect("leave type"),
        dates: LeaveDateRange::new(date(2024, 7, 1), date(2024, 7, 3)).expect("range"),
        reason: LeaveReason::new("Summer").expect("reason"),
    }
}

fn command_service(
    applications: MockLeaveApplicationRepository,
    users: MockUserRepository,
    clock: Arc<dyn Clock>,
) -> LeaveApplicationCommandService<MockLeaveApplicationRepository, MockUserRepository> {
    LeaveApplicationCommandService::new(Arc::new(applications), Arc::new(users), clock)
}

#[rstest]
#[tokio::test]
async fn submit_persists_pending_application(clock: Arc<dyn Clock>) {
    let manager = user("Boss");
    let manager_id = manager.id();
    let applicant = UserId::random();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(manager)));
    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_insert()
        .withf(|app| app.status() == LeaveStatus::Pending)
        .times(1)
        .return_once(|_| Ok(()));

    let service = command_service(applications, users, clock);
    let created = service
        .submit(&applicant, submission(manager_id))
        .await
        .expect("submission succeeds");

    assert_eq!(created.applicant(), applicant);
    assert_eq!(created.manager(), manager_id);
    assert_eq!(created.status(), LeaveStatus::Pending);
    assert_eq!(
        created.created_at(),
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
            .single()
            .expect("valid instant")
    );
}

#[rstest]
#[tokio::test]
async fn submit_rejects_self_approval_without_lookup(clock: Arc<dyn Clock>) {
    let applicant = UserId::random();
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    let mut applications = MockLeaveApplicationRepository::new();
    applications.expect_insert().times(0);

    let service = command_service(applications, users, clock);
    let err = service
        .submit(&applicant, submission(applicant))
        .await
        .expect_err("self approval");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn submit_rejects_unknown_manager(clock: Arc<dyn Clock>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut applications = MockLeaveApplicationRepository::new();
    applications.expect_insert().times(0);

    let service = command_service(applications, users, clock);
    let err = service
        .submit(&UserId::random(), submission(UserId::random()))
        .await
        .expect_err("unknown manager");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case::manager_approves(true, None)]
#[case::applicant_cannot_edit(false, Some(ErrorCode::Forbidden))]
#[tokio::test]
async fn update_is_manager_only(
    clock: Arc<dyn Clock>,
    #[case] as_manager: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let applicant = UserId::random();
    let manager = UserId::random();
    let stored = application(
        applicant,
        manager,
        "Sick",
        (date(2024, 2, 1), date(2024, 2, 2)),
        LeaveStatus::Pending,
    );
    let id = stored.id();

    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    applications
        .expect_update()
        .times(usize::from(as_manager))
        .returning(|_| Ok(()));

    let service = command_service(applications, MockUserRepository::new(), clock);
    let actor = if as_manager { manager } else { applicant };
    let result = service
        .update(
            &actor,
            &id,
            LeaveApplicationEdit {
                status: Some(LeaveStatus::Approved),
                ..LeaveApplicationEdit::default()
            },
        )
        .await;

    match expected {
        None => assert_eq!(
            result.expect("update succeeds").status(),
            LeaveStatus::Approved
        ),
        Some(code) => assert_eq!(result.expect_err("update denied").code(), code),
    }
}

#[rstest]
#[tokio::test]
async fn update_rejects_reversed_dates(clock: Arc<dyn Clock>) {
    let manager = UserId::random();
    let stored = application(
        UserId::random(),
        manager,
        "Sick",
        (date(2024, 2, 1), date(2024, 2, 2)),
        LeaveStatus::Pending,
    );
    let id = stored.id();

    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    applications.expect_update().times(0);

    let service = command_service(applications, MockUserRepository::new(), clock);
    let err = service
        .update(
            &manager,
            &id,
            LeaveApplicationEdit {
                start_date: Some(date(2024, 3, 1)),
                ..LeaveApplicationEdit::default()
            },
        )
        .await
        .expect_err("reversed range");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn delete_is_applicant_only(clock: Arc<dyn Clock>) {
    let applicant = UserId::random();
    let manager = UserId::random();
    let stored = application(
        applicant,
        manager,
        "Sick",
        (date(2024, 2, 1), date(2024, 2, 2)),
        LeaveStatus::Pending,
    );
    let id = stored.id();

    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_find()
        .returning(move |_| Ok(Some(stored.clone())));
    applications.expect_delete().times(1).return_once(|_| Ok(true));

    let service = command_service(applications, MockUserRepository::new(), clock);

    let denied = service.delete(&manager, &id).await.expect_err("manager denied");
    assert_eq!(denied.code(), ErrorCode::Forbidden);
    service
        .delete(&applicant, &id)
        .await
        .expect("applicant deletes");
}

#[rstest]
#[tokio::test]
async fn get_missing_application_is_not_found() {
    let mut applications = MockLeaveApplicationRepository::new();
    applications.expect_find().times(1).return_once(|_| Ok(None));

    let service =
        LeaveApplicationQueryService::new(Arc::new(applications), Arc::new(MockUserRepository::new()));
    let err = service
        .get(&UserId::random(), &LeaveApplicationId::random())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn subordinate_listing_attaches_applicant_profiles() {
    let manager = UserId::random();
    let alice = user("Alice Smith");
    let alice_id = alice.id();
    let stored = vec![application(
        alice_id,
        manager,
        "Annual",
        (date(2024, 5, 1), date(2024, 5, 2)),
        LeaveStatus::Pending,
    )];

    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_list_for_manager()
        .times(1)
        .return_once(move |_| Ok(stored));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .withf(move |ids| ids == [alice_id])
        .times(1)
        .return_once(move |_| Ok(vec![alice]));

    let service = LeaveApplicationQueryService::new(Arc::new(applications), Arc::new(users));
    let listed = service
        .list_subordinate(&manager)
        .await
        .expect("listing succeeds");

    assert_eq!(listed.len(), 1);
    let entry = listed.first().expect("one entry");
    assert_eq!(entry.applicant.display_name().as_ref(), "Alice Smith");
    assert_eq!(entry.application.applicant(), alice_id);
}

#[rstest]
#[tokio::test]
async fn report_defaults_to_clock_year(clock: Arc<dyn Clock>) {
    let manager = UserId::random();
    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_list_for_manager_in_year()
        .withf(|_, year| *year == 2024)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_ids().times(0);

    let service = LeaveReportService::new(Arc::new(applications), Arc::new(users), clock);
    let response = service
        .total_leaves_report(&manager, None)
        .await
        .expect("empty report");

    assert_eq!(response.year, 2024);
    assert!(response.report.is_empty());
}

#[rstest]
#[tokio::test]
async fn report_names_each_subordinate(clock: Arc<dyn Clock>) {
    let manager = UserId::random();
    let subordinate = user("Test User");
    let subordinate_id = subordinate.id();
    let stored = vec![application(
        subordinate_id,
        manager,
        "Vacation",
        (date(2023, 1, 1), date(2023, 1, 5)),
        LeaveStatus::Approved,
    )];

    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_list_for_manager_in_year()
        .withf(|_, year| *year == 2023)
        .times(1)
        .return_once(move |_, _| Ok(stored));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .times(1)
        .return_once(move |_| Ok(vec![subordinate]));

    let service = LeaveReportService::new(Arc::new(applications), Arc::new(users), clock);
    let response = service
        .total_leaves_report(&manager, Some(2023))
        .await
        .expect("report builds");

    let record = response.report.records().first().expect("one row").clone();
    assert_eq!(record.employee_name, "Test User");
    assert_eq!(record.leave_type, "Vacation");
    assert_eq!(
        (
            record.total_days,
            record.pending_days,
            record.approved_days,
            record.rejected_days
        ),
        (5, 0, 5, 0)
    );
}

#[rstest]
#[tokio::test]
async fn report_propagates_repository_outage(clock: Arc<dyn Clock>) {
    let mut applications = MockLeaveApplicationRepository::new();
    applications
        .expect_list_for_manager_in_year()
        .times(1)
        .return_once(|_, _| Err(LeaveApplicationRepositoryError::connection("refused")));

    let service = LeaveReportService::new(
        Arc::new(applications),
        Arc::new(MockUserRepository::new()),
        clock,
    );
    let err = service
        .total_leaves_report(&UserId::random(), Some(2024))
        .await
        .expect_err("outage");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
