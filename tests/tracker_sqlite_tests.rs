//! End-to-end HOS scenarios against a file-backed SQLite store.

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use rhoslog::core::clock::{Clock, FixedClock};
use rhoslog::core::store::{DutyLogStore, StatusChange};
use rhoslog::core::tracker::{HosTracker, TrackerOptions};
use rhoslog::db::initialize::init_db;
use rhoslog::db::pool::DbPool;
use rhoslog::db::store::SqliteLogStore;
use rhoslog::errors::AppError;
use rhoslog::models::duty_status::DutyStatus;
use rhoslog::models::rule_set::RuleSet;
use rhoslog::models::violation::ViolationKind;

mod common;
use common::setup_test_db;

fn open_store<'a>(db_path: &str, clock: &'a FixedClock) -> SqliteLogStore<&'a FixedClock> {
    let pool = DbPool::new(db_path).unwrap();
    init_db(&pool.conn).unwrap();
    SqliteLogStore::new(pool, clock)
}

fn tracker<'a>(
    db_path: &str,
    clock: &'a FixedClock,
) -> HosTracker<SqliteLogStore<&'a FixedClock>, &'a FixedClock> {
    let options = TrackerOptions {
        retry_backoff: std::time::Duration::ZERO,
        ..TrackerOptions::default()
    };
    HosTracker::with_options(open_store(db_path, clock), clock, RuleSet::us_70_hour(), options)
}

fn start() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap())
}

#[test]
fn driving_limit_is_compliant_at_the_limit_and_breached_one_minute_later() {
    let db_path = setup_test_db("sqlite_driving_limit");
    let clock = start();
    let mut t = tracker(&db_path, &clock);

    t.register_driver("D1", "Driver One", "Yard").unwrap();
    clock.advance(Duration::hours(10));
    t.change_status("D1", DutyStatus::Driving, "Yard").unwrap();
    clock.advance(Duration::hours(11));

    let at_limit = t.summary("D1").unwrap();
    assert_eq!(at_limit.accumulator.driving_minutes, 660);
    assert_eq!(at_limit.remaining.driving, 0);
    assert!(at_limit.is_compliant());

    clock.advance(Duration::minutes(1));
    let over = t.summary("D1").unwrap();
    assert_eq!(over.violations.len(), 1);
    assert_eq!(over.violations[0].kind, ViolationKind::DrivingLimitExceeded);
    assert_eq!(over.violations[0].overage_minutes, 1);
}

#[test]
fn qualifying_break_resets_the_shift_but_not_the_cycle() {
    let db_path = setup_test_db("sqlite_break_resets");
    let clock = start();
    let mut t = tracker(&db_path, &clock);

    t.register_driver("D1", "Driver One", "Yard").unwrap();
    t.change_status("D1", DutyStatus::OnDuty, "Yard").unwrap();
    clock.advance(Duration::hours(1));
    t.change_status("D1", DutyStatus::Driving, "Yard").unwrap();
    clock.advance(Duration::hours(8));
    t.change_status("D1", DutyStatus::SleeperBerth, "Rest area").unwrap();
    clock.advance(Duration::hours(4));
    t.change_status("D1", DutyStatus::OffDuty, "Rest area").unwrap();
    clock.advance(Duration::hours(6));

    let s = t.summary("D1").unwrap();
    assert_eq!(s.accumulator.driving_minutes, 0);
    assert_eq!(s.accumulator.on_duty_minutes, 0);
    assert_eq!(s.accumulator.cycle_minutes, 9 * 60);
    assert_eq!(s.remaining.cycle, 70 * 60 - 9 * 60);
    assert_eq!(t.current_status("D1").unwrap(), DutyStatus::OffDuty);
    assert_eq!(
        t.current_status_duration("D1").unwrap(),
        Duration::hours(6)
    );
}

#[test]
fn log_survives_reopening_the_database() {
    let db_path = setup_test_db("sqlite_reopen");
    let clock = start();

    {
        let mut t = tracker(&db_path, &clock);
        t.register_driver("D1", "Driver One", "Yard").unwrap();
        clock.advance(Duration::minutes(30));
        t.change_status("D1", DutyStatus::Driving, "Yard").unwrap();
    }

    clock.advance(Duration::minutes(45));
    let mut t = tracker(&db_path, &clock);
    let entries = t.fetch("D1").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].end_time, Some(entries[1].start_time));
    assert!(entries[1].is_open());
    assert_eq!(t.summary("D1").unwrap().accumulator.driving_minutes, 45);
}

#[test]
fn concurrent_writer_gets_a_stale_write() {
    let db_path = setup_test_db("sqlite_stale_write");
    let clock = start();
    let mut a = open_store(&db_path, &clock);
    let mut b = open_store(&db_path, &clock);

    let first = a.register_driver("D1", "Driver One", "Yard").unwrap();
    clock.advance(Duration::minutes(5));

    let change = |status| StatusChange {
        driver_id: "D1".into(),
        status,
        location: "Yard".into(),
        client_timestamp: clock.now(),
        expected_open_id: Some(first.id),
    };

    b.append_status_change(&change(DutyStatus::OnDuty)).unwrap();
    let err = a.append_status_change(&change(DutyStatus::Driving)).unwrap_err();
    assert!(matches!(err, AppError::StaleWrite { .. }));

    // The losing write left nothing behind.
    let entries = a.fetch_entries("D1").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].status, DutyStatus::OnDuty);
}

#[test]
fn daily_log_splits_at_home_terminal_midnight() {
    let db_path = setup_test_db("sqlite_daily_log");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 20, 0, 0).unwrap());
    let options = TrackerOptions {
        retry_backoff: std::time::Duration::ZERO,
        home_offset: FixedOffset::west_opt(5 * 3600).unwrap(),
        ..TrackerOptions::default()
    };
    let mut t = HosTracker::with_options(
        open_store(&db_path, &clock),
        &clock,
        RuleSet::us_70_hour(),
        options,
    );

    // 15:00 local
    t.register_driver("D1", "Driver One", "Yard").unwrap();
    clock.advance(Duration::hours(7));
    // 22:00 local, drive through midnight until 02:00
    t.change_status("D1", DutyStatus::Driving, "Yard").unwrap();
    clock.advance(Duration::hours(4));

    let day1 = t
        .daily_log("D1", NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        .unwrap();
    assert_eq!(day1.total_for(DutyStatus::OffDuty), 7 * 60);
    assert_eq!(day1.total_for(DutyStatus::Driving), 2 * 60);

    let day2 = t
        .daily_log("D1", NaiveDate::from_ymd_opt(2025, 3, 11).unwrap())
        .unwrap();
    assert_eq!(day2.segments.len(), 1);
    assert_eq!(day2.total_for(DutyStatus::Driving), 2 * 60);
    assert!(day2.segments[0].ongoing);
}

#[test]
fn onboarding_on_a_locked_database_is_transient() {
    let db_path = setup_test_db("sqlite_locked_onboarding");
    let clock = start();
    drop(open_store(&db_path, &clock));

    let holder = rusqlite::Connection::open(&db_path).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let pool = DbPool::with_busy_timeout(&db_path, 0).unwrap();
    let mut store = SqliteLogStore::new(pool, &clock);
    let err = store.register_driver("D1", "Driver One", "Yard").unwrap_err();
    assert!(err.is_transient(), "unexpected error: {err}");

    holder.execute_batch("ROLLBACK;").unwrap();
    store.register_driver("D1", "Driver One", "Yard").unwrap();
}

#[test]
fn second_precision_changes_accumulate_into_a_violation() {
    let db_path = setup_test_db("sqlite_second_precision");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 17).unwrap());
    let mut t = tracker(&db_path, &clock);

    t.register_driver("D1", "Driver One", "Yard").unwrap();
    clock.advance(Duration::hours(10));
    for _ in 0..11 {
        t.change_status("D1", DutyStatus::Driving, "I-80").unwrap();
        clock.advance(Duration::minutes(60) + Duration::seconds(7));
        t.change_status("D1", DutyStatus::OnDuty, "Fuel stop").unwrap();
        clock.advance(Duration::seconds(3));
    }

    // 11 × 60m07s = 661m17s of driving
    let s = t.summary("D1").unwrap();
    assert_eq!(s.accumulator.driving_minutes, 661);
    assert_eq!(s.accumulator.on_duty_minutes, 661);
    assert_eq!(s.violations.len(), 1);
    assert_eq!(s.violations[0].kind, ViolationKind::DrivingLimitExceeded);
    assert_eq!(s.violations[0].overage_minutes, 1);
}
