//! HOS Tracker: the store, the clock and the rule set wired together.
//!
//! Every read goes to the store; nothing is cached across calls except the
//! last good summary kept by a [`StatusBoard`] for stale display.

use crate::core::calculator::daily_log;
use crate::core::clock::Clock;
use crate::core::logic::Core;
use crate::core::status::DutyLog;
use crate::core::store::{DutyLogStore, StatusChange};
use crate::errors::{AppError, AppResult};
use crate::models::daily_log::DailyLog;
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use crate::models::rule_set::RuleSet;
use crate::models::summary::HosSummary;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use std::thread;
use std::time::Duration as StdDuration;

#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub fetch_retries: u32,
    pub retry_backoff: StdDuration,
    pub home_offset: FixedOffset,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            fetch_retries: 2,
            retry_backoff: StdDuration::from_millis(250),
            home_offset: Utc.fix(),
        }
    }
}

/// Outcome of a status change: the entry it closed and the one it opened,
/// both from the same view of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub previous: DutyStatusEntry,
    pub entry: DutyStatusEntry,
}

pub struct HosTracker<S: DutyLogStore, C: Clock> {
    store: S,
    clock: C,
    rules: RuleSet,
    options: TrackerOptions,
}

impl<S: DutyLogStore, C: Clock> HosTracker<S, C> {
    pub fn new(store: S, clock: C, rules: RuleSet) -> Self {
        Self::with_options(store, clock, rules, TrackerOptions::default())
    }

    pub fn with_options(store: S, clock: C, rules: RuleSet, options: TrackerOptions) -> Self {
        Self {
            store,
            clock,
            rules,
            options,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Onboard a driver: its log starts with an open `OffDuty` entry.
    pub fn register_driver(
        &mut self,
        driver_id: &str,
        name: &str,
        location: &str,
    ) -> AppResult<DutyStatusEntry> {
        self.store.register_driver(driver_id, name, location)
    }

    /// Fetch a driver's log, retrying transient failures with linear backoff.
    pub fn fetch(&mut self, driver_id: &str) -> AppResult<Vec<DutyStatusEntry>> {
        let mut attempt: u32 = 0;
        loop {
            match self.store.fetch_entries(driver_id) {
                Ok(entries) => return Ok(entries),
                Err(e) if e.is_transient() && attempt < self.options.fetch_retries => {
                    attempt += 1;
                    log::warn!(
                        "fetch for driver {} failed ({}), retry {}/{}",
                        driver_id,
                        e,
                        attempt,
                        self.options.fetch_retries
                    );
                    thread::sleep(self.options.retry_backoff * attempt);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn fetch_log(&mut self, driver_id: &str) -> AppResult<DutyLog> {
        let entries = self.fetch(driver_id)?;
        DutyLog::from_entries(driver_id, entries)
    }

    /// Submit a status change. Never retried: on failure the caller must
    /// re-fetch before showing anything.
    pub fn change_status(
        &mut self,
        driver_id: &str,
        status: DutyStatus,
        location: &str,
    ) -> AppResult<StatusTransition> {
        let log = self.fetch_log(driver_id)?;
        let previous = log.current_entry()?.clone();

        let change = StatusChange {
            driver_id: driver_id.to_string(),
            status,
            location: location.to_string(),
            client_timestamp: self.clock.now(),
            expected_open_id: Some(previous.id),
        };

        let entry = self.store.append_status_change(&change)?;
        log::info!(
            "driver {} changed to {} at {}",
            driver_id,
            status.code(),
            entry.start_time.to_rfc3339()
        );
        Ok(StatusTransition { previous, entry })
    }

    pub fn current_status(&mut self, driver_id: &str) -> AppResult<DutyStatus> {
        self.fetch_log(driver_id)?.current_status()
    }

    pub fn current_status_duration(&mut self, driver_id: &str) -> AppResult<Duration> {
        let now = self.clock.now();
        self.fetch_log(driver_id)?.current_status_duration(now)
    }

    pub fn summary(&mut self, driver_id: &str) -> AppResult<HosSummary> {
        let entries = self.fetch(driver_id)?;
        Core::build_summary(driver_id, &entries, self.clock.now(), &self.rules)
    }

    pub fn daily_log(&mut self, driver_id: &str, day: NaiveDate) -> AppResult<DailyLog> {
        let entries = self.fetch(driver_id)?;
        if entries.is_empty() {
            return Err(AppError::NoActiveLog(driver_id.to_string()));
        }
        daily_log::build_daily_log(&entries, self.clock.now(), &self.options.home_offset, day)
    }

    /// Today's date at the home terminal.
    pub fn home_today(&self) -> NaiveDate {
        self.clock
            .now()
            .with_timezone(&self.options.home_offset)
            .date_naive()
    }
}

/// Display model: the last good summary, marked stale when a refresh fails.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    driver_id: String,
    last: Option<HosSummary>,
    stale: bool,
    last_error: Option<String>,
}

impl StatusBoard {
    pub fn new(driver_id: &str) -> Self {
        Self {
            driver_id: driver_id.to_string(),
            last: None,
            stale: false,
            last_error: None,
        }
    }

    pub fn refresh<S: DutyLogStore, C: Clock>(
        &mut self,
        tracker: &mut HosTracker<S, C>,
    ) -> AppResult<&HosSummary> {
        match tracker.summary(&self.driver_id) {
            Ok(summary) => {
                self.stale = false;
                self.last_error = None;
                let kept: &HosSummary = self.last.insert(summary);
                Ok(kept)
            }
            Err(e) => {
                self.stale = self.last.is_some();
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn summary(&self) -> Option<&HosSummary> {
        self.last.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::store::MemoryLogStore;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 5, 0, 0).unwrap()
    }

    fn quick() -> TrackerOptions {
        TrackerOptions {
            fetch_retries: 2,
            retry_backoff: StdDuration::ZERO,
            ..TrackerOptions::default()
        }
    }

    fn tracker(clock: &FixedClock) -> HosTracker<MemoryLogStore<&FixedClock>, &FixedClock> {
        HosTracker::with_options(
            MemoryLogStore::new(clock),
            clock,
            RuleSet::us_70_hour(),
            quick(),
        )
    }

    #[test]
    fn driver_day_from_onboarding_to_violation() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        t.register_driver("D1", "Jane", "Terminal").unwrap();

        clock.advance(Duration::hours(11));
        t.change_status("D1", DutyStatus::OnDuty, "Yard").unwrap();
        clock.advance(Duration::minutes(30));
        t.change_status("D1", DutyStatus::Driving, "I-70").unwrap();
        clock.advance(Duration::hours(11));

        let s = t.summary("D1").unwrap();
        assert_eq!(s.current.status, DutyStatus::Driving);
        assert_eq!(s.accumulator.driving_minutes, 660);
        assert!(s.is_compliant());

        clock.advance(Duration::minutes(1));
        let s = t.summary("D1").unwrap();
        assert_eq!(s.violations.len(), 1);
        assert_eq!(t.current_status_duration("D1").unwrap().num_minutes(), 661);
    }

    #[test]
    fn repeated_status_creates_new_entries() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        t.register_driver("D1", "Jane", "Terminal").unwrap();
        t.change_status("D1", DutyStatus::OnDuty, "Yard").unwrap();
        t.change_status("D1", DutyStatus::OnDuty, "Yard").unwrap();
        assert_eq!(t.fetch("D1").unwrap().len(), 3);
        assert_eq!(t.current_status("D1").unwrap(), DutyStatus::OnDuty);
    }

    #[test]
    fn transition_reports_the_entry_it_closed() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        let opening = t.register_driver("D1", "Jane", "Terminal").unwrap();

        clock.advance(Duration::minutes(15) + Duration::seconds(20));
        let first = t.change_status("D1", DutyStatus::OnDuty, "Yard").unwrap();
        assert_eq!(first.previous.id, opening.id);
        assert_eq!(first.previous.status, DutyStatus::OffDuty);
        assert_eq!(first.entry.status, DutyStatus::OnDuty);

        let second = t.change_status("D1", DutyStatus::Driving, "I-70").unwrap();
        assert_eq!(second.previous, first.entry);
    }

    #[test]
    fn unregistered_driver_cannot_change_status() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        assert!(matches!(
            t.change_status("D9", DutyStatus::Driving, "Nowhere"),
            Err(AppError::NoActiveLog(_))
        ));
        assert!(matches!(t.current_status("D9"), Err(AppError::NoActiveLog(_))));
    }

    #[test]
    fn transient_fetches_are_retried() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        t.register_driver("D1", "Jane", "Terminal").unwrap();

        t.store_mut().fail_next_fetches(2);
        assert!(t.summary("D1").is_ok());

        t.store_mut().fail_next_fetches(3);
        assert!(matches!(t.summary("D1"), Err(AppError::TransientFetch(_))));
    }

    #[test]
    fn board_keeps_last_summary_and_marks_it_stale() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        t.register_driver("D1", "Jane", "Terminal").unwrap();

        let mut board = StatusBoard::new("D1");
        board.refresh(&mut t).unwrap();
        assert!(!board.is_stale());

        t.store_mut().fail_next_fetches(10);
        assert!(board.refresh(&mut t).is_err());
        assert!(board.is_stale());
        assert!(board.summary().is_some());
        assert!(board.last_error().unwrap().contains("unavailable"));

        t.store_mut().fail_next_fetches(0);
        clock.advance(Duration::minutes(5));
        let s = board.refresh(&mut t).unwrap();
        assert_eq!(s.current_duration_minutes, 5);
        assert!(!board.is_stale());
    }

    #[test]
    fn board_without_history_is_not_stale() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        let mut board = StatusBoard::new("D1");
        assert!(board.refresh(&mut t).is_err());
        assert!(!board.is_stale());
        assert!(board.summary().is_none());
    }

    #[test]
    fn daily_log_of_today() {
        let clock = FixedClock::new(start());
        let mut t = tracker(&clock);
        t.register_driver("D1", "Jane", "Terminal").unwrap();
        clock.advance(Duration::hours(2));
        t.change_status("D1", DutyStatus::Driving, "I-25").unwrap();
        clock.advance(Duration::hours(3));

        let day = t.home_today();
        let log = t.daily_log("D1", day).unwrap();
        assert_eq!(log.total_for(DutyStatus::OffDuty), 120);
        assert_eq!(log.total_for(DutyStatus::Driving), 180);
    }
}
