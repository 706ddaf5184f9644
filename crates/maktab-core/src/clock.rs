//! Injectable time source.
//!
//! Exclusion dates, retention cutoffs and "this month" queries all derive
//! from a [`Clock`] handle held in application state instead of calling
//! `Utc::now()` at the point of use, so tests can pin "today" to a fixed
//! date and exercise the retention window deterministically.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, TimeZone, Utc};

pub trait Clock: Send + Sync {
    /// Current instant, UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current calendar date in the server's local timezone.
    ///
    /// Exclusion stamping and the retention cutoff are wall-clock concepts
    /// (records are dated by the day the action happened locally), so this
    /// is deliberately local rather than UTC.
    fn today(&self) -> NaiveDate;
}

/// Production clock reading the real system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Test clock pinned to a single date.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.today.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// First and last day of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let clock = FixedClock::on(date(2024, 6, 15));
        assert_eq!(clock.today(), date(2024, 6, 15));
        assert_eq!(clock.now_utc().date_naive(), date(2024, 6, 15));
    }

    #[test]
    fn month_bounds_mid_month() {
        let (start, end) = month_bounds(date(2024, 6, 15));
        assert_eq!(start, date(2024, 6, 1));
        assert_eq!(end, date(2024, 6, 30));
    }

    #[test]
    fn month_bounds_february_leap_year() {
        let (start, end) = month_bounds(date(2024, 2, 10));
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 2, 29));
    }

    #[test]
    fn month_bounds_december_crosses_year() {
        let (start, end) = month_bounds(date(2023, 12, 31));
        assert_eq!(start, date(2023, 12, 1));
        assert_eq!(end, date(2023, 12, 31));
    }
}
