use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn month_last_day(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// First and last day of a period: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();

    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    if let Some(first) = parse_date(&format!("{p}-01")) {
        let last = month_last_day(first.year(), first.month())
            .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
        return Ok((first, last));
    }

    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        if let (Some(f), Some(l)) = (first, last) {
            return Ok((f, l));
        }
    }

    Err(AppError::InvalidDate(format!("invalid period: {}", p)))
}

/// Parse `PERIOD` or `PERIOD:PERIOD` into inclusive date bounds.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (period_bounds(s)?.0, period_bounds(e)?.1),
        None => period_bounds(r)?,
    };

    if end < start {
        return Err(AppError::InvalidDate(format!(
            "range end {} precedes start {}",
            end, start
        )));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn periods_expand_to_bounds() {
        assert_eq!(period_bounds("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(period_bounds("2025").unwrap(), (d(2025, 1, 1), d(2025, 12, 31)));
        assert_eq!(period_bounds("2025-12-24").unwrap(), (d(2025, 12, 24), d(2025, 12, 24)));
        assert!(period_bounds("2025-13").is_err());
    }

    #[test]
    fn ranges_mix_period_forms() {
        assert_eq!(parse_range("2025-01:2025-03-10").unwrap(), (d(2025, 1, 1), d(2025, 3, 10)));
        assert!(parse_range("2025-03:2025-01").is_err());
    }
}
