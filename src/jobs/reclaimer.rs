//! Background reclamation of expired refresh tokens.
//!
//! Runs on a cron schedule in the configured timezone. Reclamation is
//! an optimisation, not a correctness mechanism: lookups already filter
//! on expiry, so a missed run only delays space reuse.

use std::str::FromStr;

use chrono::Utc;
use chrono_tz::Tz;
use cron::Schedule;
use tracing::{error, info};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Parses the configured cron expression and timezone.
pub fn parse_schedule(cron: &str, timezone: &str) -> Result<(Schedule, Tz), String> {
    let schedule = Schedule::from_str(cron)
        .map_err(|e| format!("Invalid RECLAIMER_CRON expression '{cron}': {e}"))?;
    let tz = Tz::from_str(timezone)
        .map_err(|e| format!("Invalid RECLAIMER_TIMEZONE '{timezone}': {e}"))?;
    Ok((schedule, tz))
}

/// Spawns the reclaimer loop. A bad schedule disables the job with an
/// error log rather than taking the server down.
pub fn spawn(state: AppState) {
    let (schedule, tz) = match parse_schedule(
        &state.reclaimer_config.cron,
        &state.reclaimer_config.timezone,
    ) {
        Ok(parsed) => parsed,
        Err(message) => {
            error!("{message}; expired token reclamation disabled");
            return;
        }
    };

    info!(
        cron = %state.reclaimer_config.cron,
        timezone = %state.reclaimer_config.timezone,
        "Starting refresh token reclaimer"
    );

    tokio::spawn(async move {
        loop {
            let Some(next) = schedule.upcoming(tz).next() else {
                info!("Reclaimer schedule has no further occurrences, stopping");
                return;
            };

            let until = (next.with_timezone(&Utc) - Utc::now())
                .to_std()
                .unwrap_or_default();
            tokio::time::sleep(until).await;

            match AuthService::reclaim_expired(&state.db).await {
                Ok(0) => info!("Reclaimer pass complete, nothing to remove"),
                Ok(removed) => info!(removed, "Reclaimed expired refresh tokens"),
                Err(err) => error!("Reclaimer pass failed: {}", err.error),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_schedule() {
        let (schedule, tz) = parse_schedule("0 0 * * * *", "UTC").unwrap();
        assert_eq!(tz, Tz::UTC);
        assert!(schedule.upcoming(tz).next().is_some());
    }

    #[test]
    fn test_parse_named_timezone() {
        let (_, tz) = parse_schedule("0 30 2 * * *", "Africa/Lagos").unwrap();
        assert_eq!(tz.name(), "Africa/Lagos");
    }

    #[test]
    fn test_invalid_cron_is_rejected() {
        let err = parse_schedule("not a cron", "UTC").unwrap_err();
        assert!(err.contains("RECLAIMER_CRON"));
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let err = parse_schedule("0 0 * * * *", "Mars/Olympus").unwrap_err();
        assert!(err.contains("RECLAIMER_TIMEZONE"));
    }
}
