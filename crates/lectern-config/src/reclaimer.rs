use std::env;

/// Schedule configuration for the refresh token reclaimer job.
///
/// `cron` is a six-field cron expression (seconds first) evaluated in the
/// named `timezone`. The expression and timezone are parsed by the job at
/// startup; an invalid value disables the job with an error log rather
/// than failing the server.
#[derive(Clone, Debug)]
pub struct ReclaimerConfig {
    pub cron: String,
    pub timezone: String,
}

impl ReclaimerConfig {
    pub fn from_env() -> Self {
        Self {
            cron: env::var("RECLAIMER_CRON").unwrap_or_else(|_| "0 0 * * * *".to_string()), // hourly
            timezone: env::var("RECLAIMER_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
        }
    }
}
