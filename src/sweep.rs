//! Background sweep that purges exclusion records past the retention window.
//!
//! Runs once a day at the configured local hour. Each pass deletes ledger
//! rows whose exclusion date is strictly older than the re-registration
//! cutoff, so a record stops blocking re-registration and gets swept by the
//! same threshold. Missed runs are not replayed; the next scheduled pass
//! covers them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, Local, NaiveDateTime};
use maktab_core::{Clock, retention_cutoff};
use maktab_store::{Store, StoreResult};
use tracing::{error, info};

use crate::state::AppState;

/// Time until the next occurrence of `hour:00:00`, strictly after `now`.
///
/// A sweep landing exactly on the boundary is pushed to the next day, so two
/// passes never run for the same scheduled slot.
pub fn delay_until_next_run(now: NaiveDateTime, hour: u32) -> Duration {
    let hour = hour.min(23);
    let run_at = now.date().and_hms_opt(hour, 0, 0).unwrap_or(now);
    let run_at = if run_at > now {
        run_at
    } else {
        run_at + Days::new(1)
    };
    run_at.signed_duration_since(now).to_std().unwrap_or_default()
}

/// One sweep pass: deletes every exclusion record older than the cutoff and
/// returns how many rows went.
pub async fn run_once(store: &dyn Store, clock: &dyn Clock) -> StoreResult<u64> {
    let cutoff = retention_cutoff(clock.today());
    store.delete_excluded_before(cutoff).await
}

/// Spawns the daily sweep task. Failures are logged and the loop keeps going.
pub fn spawn_retention_sweep(state: &AppState) {
    let store = Arc::clone(&state.store);
    let clock = Arc::clone(&state.clock);
    let hour = state.sweep_config.hour;

    tokio::spawn(async move {
        loop {
            let now = clock.now_utc().with_timezone(&Local).naive_local();
            tokio::time::sleep(delay_until_next_run(now, hour)).await;

            match run_once(store.as_ref(), clock.as_ref()).await {
                Ok(count) => {
                    if count > 0 {
                        info!(count, "Purged exclusion records past retention");
                    }
                }
                Err(e) => {
                    error!(error = %e, "Retention sweep failed");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn runs_later_today_when_before_the_hour() {
        let delay = delay_until_next_run(at(1, 30), 3);
        assert_eq!(delay, Duration::from_secs(90 * 60));
    }

    #[test]
    fn runs_tomorrow_when_past_the_hour() {
        let delay = delay_until_next_run(at(4, 0), 3);
        assert_eq!(delay, Duration::from_secs(23 * 3600));
    }

    #[test]
    fn boundary_instant_waits_a_full_day() {
        let delay = delay_until_next_run(at(3, 0), 3);
        assert_eq!(delay, Duration::from_secs(24 * 3600));
    }

    #[test]
    fn out_of_range_hour_clamps_to_latest() {
        let delay = delay_until_next_run(at(22, 0), 25);
        assert_eq!(delay, Duration::from_secs(3600));
    }
}
