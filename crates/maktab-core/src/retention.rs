//! The 3-year exclusion retention window.
//!
//! Two independent mechanisms share this threshold and must stay in sync:
//!
//! 1. the duplicate-check endpoint treats an exclusion as blocking only
//!    while its `excluded_date` is *after* `today - 3 years`
//!    ([`blocks_reregistration`]);
//! 2. the nightly sweep physically deletes rows whose `excluded_date` is
//!    *before* that same cutoff ([`sweep_eligible`]).
//!
//! Both comparisons are strict, so a record dated exactly at the cutoff
//! neither blocks re-registration nor gets deleted until the next day.
//! Note that the create-time guard against the excluded ledger ignores
//! this window entirely; only the read-side duplicate check filters by it.

use chrono::{Months, NaiveDate};

/// How long an exclusion record blocks ID reuse and survives cleanup.
pub const RETENTION_YEARS: u32 = 3;

/// `today - 3 years`, clamped to a valid date (Feb 29 maps to Feb 28).
pub fn retention_cutoff(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(RETENTION_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Does an exclusion dated `excluded_date` still block re-registration?
pub fn blocks_reregistration(excluded_date: NaiveDate, today: NaiveDate) -> bool {
    excluded_date > retention_cutoff(today)
}

/// Is a record dated `excluded_date` old enough for the sweep to delete?
pub fn sweep_eligible(excluded_date: NaiveDate, today: NaiveDate) -> bool {
    excluded_date < retention_cutoff(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cutoff_is_three_years_back() {
        assert_eq!(retention_cutoff(date(2024, 6, 15)), date(2021, 6, 15));
    }

    #[test]
    fn cutoff_clamps_leap_day() {
        // 2024-02-29 minus 36 months has no 2021-02-29 to land on
        assert_eq!(retention_cutoff(date(2024, 2, 29)), date(2021, 2, 28));
    }

    #[test]
    fn recent_exclusion_blocks_reuse() {
        let today = date(2024, 6, 15);
        assert!(blocks_reregistration(date(2023, 6, 15), today));
        assert!(blocks_reregistration(date(2021, 6, 16), today));
    }

    #[test]
    fn old_exclusion_does_not_block_reuse() {
        let today = date(2024, 6, 15);
        assert!(!blocks_reregistration(date(2020, 6, 15), today));
        assert!(!blocks_reregistration(date(2021, 6, 14), today));
    }

    #[test]
    fn boundary_record_neither_blocks_nor_sweeps() {
        let today = date(2024, 6, 15);
        let at_cutoff = date(2021, 6, 15);
        assert!(!blocks_reregistration(at_cutoff, today));
        assert!(!sweep_eligible(at_cutoff, today));
    }

    #[test]
    fn sweep_takes_only_strictly_older_rows() {
        let today = date(2024, 6, 15);
        assert!(sweep_eligible(date(2021, 6, 14), today));
        assert!(sweep_eligible(date(2020, 6, 15), today));
        assert!(!sweep_eligible(date(2021, 6, 16), today));
        assert!(!sweep_eligible(date(2023, 1, 1), today));
    }
}
