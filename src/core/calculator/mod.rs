pub mod accumulator;
pub mod daily_log;
pub mod violations;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::duty_status::DutyStatus;
    use crate::models::entry::DutyStatusEntry;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
    }

    /// Build a contiguous log from `(status, minutes)` spans starting at
    /// `start`. The last span stays open; its minutes only move `now`.
    /// Returns the entries and the instant at the end of the last span.
    pub fn log_from(
        start: DateTime<Utc>,
        spans: &[(DutyStatus, i64)],
    ) -> (Vec<DutyStatusEntry>, DateTime<Utc>) {
        let spans: Vec<(DutyStatus, Duration)> = spans
            .iter()
            .map(|(status, minutes)| (*status, Duration::minutes(*minutes)))
            .collect();
        log_spans(start, &spans)
    }

    /// Same as [`log_from`] with exact span lengths, for boundaries that
    /// fall between whole minutes.
    pub fn log_spans(
        start: DateTime<Utc>,
        spans: &[(DutyStatus, Duration)],
    ) -> (Vec<DutyStatusEntry>, DateTime<Utc>) {
        let mut entries = Vec::new();
        let mut cursor = start;
        for (i, (status, length)) in spans.iter().enumerate() {
            let mut e = DutyStatusEntry::open("D1", *status, cursor, "fixture");
            e.id = i as i64 + 1;
            cursor += *length;
            if i + 1 < spans.len() {
                e.end_time = Some(cursor);
            }
            entries.push(e);
        }
        (entries, cursor)
    }
}
